//! Signal-driven shutdown between connections
//!
//! SIGINT and SIGTERM clear the process-wide running flag. If the server is
//! parked in `accept` when the signal lands, the process exits on the spot;
//! otherwise the connection in flight is finished and the accept loop sees
//! the cleared flag before waiting again.
//!
//! The two flags are the only state shared with the signal handler. They are
//! lock-free atomics, which are safe to touch from signal context.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

static RUNNING: AtomicBool = AtomicBool::new(true);
static WAITING: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_signal(_signal: libc::c_int) {
    RUNNING.store(false, Ordering::SeqCst);

    if WAITING.load(Ordering::SeqCst) {
        // Only async-signal-safe calls from here
        unsafe { libc::_exit(0) };
    }
}

/// Install the handler for SIGINT and SIGTERM.
///
/// Interrupted system calls are restarted, so a signal that arrives while a
/// connection is being served does not cut that connection short.
pub fn install() -> io::Result<()> {
    for signal in [libc::SIGINT, libc::SIGTERM] {
        unsafe {
            let mut action: libc::sigaction = std::mem::zeroed();
            action.sa_sigaction = handle_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
            action.sa_flags = libc::SA_RESTART;
            libc::sigemptyset(&mut action.sa_mask);

            if libc::sigaction(signal, &action, std::ptr::null_mut()) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
    }

    Ok(())
}

/// False once a shutdown has been requested
pub fn is_running() -> bool {
    RUNNING.load(Ordering::SeqCst)
}

/// Marks the process as blocked in `accept` for as long as it lives
pub struct AcceptGuard {
    _private: (),
}

impl AcceptGuard {
    pub fn enter() -> Self {
        WAITING.store(true, Ordering::SeqCst);
        AcceptGuard { _private: () }
    }
}

impl Drop for AcceptGuard {
    fn drop(&mut self) {
        WAITING.store(false, Ordering::SeqCst);
    }
}
