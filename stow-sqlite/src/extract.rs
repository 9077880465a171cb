use libsqlite3_sys::*;
use std::os::raw::c_int;
use stow_core::{DBValue, Error, Result};

pub(crate) fn extract_value(statement: *mut sqlite3_stmt, index: c_int) -> Result<DBValue> {
    unsafe {
        Ok(match sqlite3_column_type(statement, index) {
            SQLITE_NULL => DBValue::Null,
            SQLITE_INTEGER => DBValue::I64(sqlite3_column_int64(statement, index)),
            SQLITE_FLOAT => DBValue::F64(sqlite3_column_double(statement, index)),
            SQLITE_BLOB => {
                let ptr = sqlite3_column_blob(statement, index) as *const u8;
                let len = sqlite3_column_bytes(statement, index) as usize;
                DBValue::Blob(std::slice::from_raw_parts(ptr, len).to_vec())
            }
            SQLITE_TEXT => {
                let ptr = sqlite3_column_text(statement, index);
                let len = sqlite3_column_bytes(statement, index) as usize;
                let bytes = std::slice::from_raw_parts(ptr, len).to_vec();
                DBValue::Text(String::from_utf8_lossy(&bytes).into_owned())
            }
            other => {
                return Err(Error::Execute(format!("unexpected column type {other}")).into());
            }
        })
    }
}

pub(crate) fn extract_name(statement: *mut sqlite3_stmt, index: c_int) -> Result<String> {
    use std::ffi::CStr;
    unsafe { Ok(CStr::from_ptr(sqlite3_column_name(statement, index)).to_str()?.to_string()) }
}
