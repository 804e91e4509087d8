//! `Date` header value
//!
//! Rendered in local time as `<weekday>, <day> <month> <yy> <hh:mm:ss> <zone>`,
//! e.g. `Mon, 03 Jan 22 14:05:09 CET`.

use super::{Error, Result};
use std::ffi::CStr;
use std::io;

const FORMAT: &CStr = c"%a, %d %b %y %T %Z";

/// Current local time formatted for the `Date` header
pub fn now() -> Result<String> {
    let t = unsafe { libc::time(std::ptr::null_mut()) };
    format(t)
}

/// Format a Unix timestamp in local time
pub fn format(t: libc::time_t) -> Result<String> {
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    if unsafe { libc::localtime_r(&t, &mut tm) }.is_null() {
        return Err(Error::Io(io::Error::last_os_error()));
    }

    let mut buf = [0u8; 48];
    let n = unsafe {
        libc::strftime(
            buf.as_mut_ptr() as *mut libc::c_char,
            buf.len(),
            FORMAT.as_ptr(),
            &tm,
        )
    };
    if n == 0 {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::Other,
            "strftime returned 0",
        )));
    }

    Ok(String::from_utf8_lossy(&buf[..n]).into_owned())
}
