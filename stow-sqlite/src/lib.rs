mod cbox;
mod compiler;
mod connection;
mod extract;
mod open_mode;
mod statement;

pub(crate) use cbox::*;
pub use compiler::*;
pub use connection::*;
pub use open_mode::*;
pub use statement::*;

use std::{ffi::CStr, ptr};

pub(crate) fn error_message_from_ptr(ptr: *const std::os::raw::c_char) -> String {
    unsafe {
        if ptr != ptr::null() {
            CStr::from_ptr(ptr)
                .to_str()
                .unwrap_or("unknown error (the error message was not valid UTF-8)")
                .to_string()
        } else {
            "unknown error (no error message available)".to_string()
        }
    }
}
