use crate::{extract::extract_value, CBox};
use libsqlite3_sys::*;
use std::os::raw::{c_char, c_int, c_void};
use stow_core::{Error, Result, Row, Statement};

extern "C" fn finalize_statement(p: *mut sqlite3_stmt) {
    unsafe {
        sqlite3_finalize(p);
    }
}

/// A prepared SQLite statement. Placeholder indices arrive 0-based from the
/// driver abstraction; every bind call below adds one to reach SQLite's
/// 1-based native convention.
pub struct SqliteStatement {
    pub(crate) statement: CBox<*mut sqlite3_stmt>,
    pub(crate) connection: *mut sqlite3,
    column_count: c_int,
    done: bool,
    current: Option<Row>,
}

impl SqliteStatement {
    pub(crate) fn new(statement: *mut sqlite3_stmt, connection: *mut sqlite3) -> Self {
        unsafe {
            sqlite3_clear_bindings(statement);
        }
        let column_count = unsafe { sqlite3_column_count(statement) };
        Self {
            statement: CBox::new(statement, finalize_statement),
            connection,
            column_count,
            done: true,
            current: None,
        }
    }

    fn last_error(&self) -> Error {
        Error::Execute(crate::error_message_from_ptr(unsafe {
            sqlite3_errmsg(self.connection)
        }))
    }

    fn step(&mut self) -> Result<()> {
        unsafe {
            loop {
                match sqlite3_step(*self.statement) {
                    SQLITE_ROW => {
                        let values = (0..self.column_count)
                            .map(|i| extract_value(*self.statement, i))
                            .collect::<Result<Vec<_>>>()?;
                        self.current = Some(Row::new(values));
                        self.done = false;
                        return Ok(());
                    }
                    SQLITE_DONE => {
                        self.current = None;
                        self.done = true;
                        return Ok(());
                    }
                    SQLITE_BUSY => continue,
                    _ => return Err(self.last_error().into()),
                }
            }
        }
    }
}

macro_rules! bind_int {
    ($name:ident, $ty:ty) => {
        fn $name(&mut self, index: usize, value: $ty) -> Result<()> {
            let rc = unsafe {
                sqlite3_bind_int64(*self.statement, index as c_int + 1, value as i64)
            };
            if rc != SQLITE_OK {
                return Err(self.last_error().into());
            }
            Ok(())
        }
    };
}

impl Statement for SqliteStatement {
    fn bind_null(&mut self, index: usize) -> Result<()> {
        let rc = unsafe { sqlite3_bind_null(*self.statement, index as c_int + 1) };
        if rc != SQLITE_OK {
            return Err(self.last_error().into());
        }
        Ok(())
    }

    fn bind_bool(&mut self, index: usize, value: bool) -> Result<()> {
        self.bind_i64(index, value as i64)
    }

    bind_int!(bind_i8, i8);
    bind_int!(bind_i16, i16);
    bind_int!(bind_i32, i32);
    bind_int!(bind_i64, i64);
    bind_int!(bind_u8, u8);
    bind_int!(bind_u16, u16);
    bind_int!(bind_u32, u32);

    fn bind_u64(&mut self, index: usize, value: u64) -> Result<()> {
        if value > i64::MAX as u64 {
            return Err(Error::Bind {
                index,
                message: format!("{value} does not fit in a SQLite 64-bit integer"),
            }
            .into());
        }
        self.bind_i64(index, value as i64)
    }

    fn bind_f64(&mut self, index: usize, value: f64) -> Result<()> {
        let rc = unsafe { sqlite3_bind_double(*self.statement, index as c_int + 1, value) };
        if rc != SQLITE_OK {
            return Err(self.last_error().into());
        }
        Ok(())
    }

    fn bind_text(&mut self, index: usize, value: &str) -> Result<()> {
        let rc = unsafe {
            sqlite3_bind_text(
                *self.statement,
                index as c_int + 1,
                value.as_ptr() as *const c_char,
                value.len() as c_int,
                SQLITE_TRANSIENT(),
            )
        };
        if rc != SQLITE_OK {
            return Err(self.last_error().into());
        }
        Ok(())
    }

    fn bind_blob(&mut self, index: usize, value: &[u8]) -> Result<()> {
        let rc = unsafe {
            sqlite3_bind_blob(
                *self.statement,
                index as c_int + 1,
                value.as_ptr() as *const c_void,
                value.len() as c_int,
                SQLITE_TRANSIENT(),
            )
        };
        if rc != SQLITE_OK {
            return Err(self.last_error().into());
        }
        Ok(())
    }

    fn execute(&mut self) -> Result<()> {
        unsafe {
            sqlite3_reset(*self.statement);
        }
        self.step()
    }

    fn is_empty(&self) -> bool {
        self.done
    }

    fn front(&self) -> Result<Row> {
        self.current
            .clone()
            .ok_or_else(|| Error::Execute("front() called on an empty statement".to_string()).into())
    }

    fn pop_front(&mut self) -> Result<()> {
        if self.done {
            return Err(Error::Execute("pop_front() called on an empty statement".to_string()).into());
        }
        self.step()
    }

    fn close(&mut self) -> Result<()> {
        unsafe {
            let rc = sqlite3_finalize(*self.statement);
            // Replace with a no-op handle so `Drop` does not double-finalize.
            *self.statement = std::ptr::null_mut();
            if rc != SQLITE_OK {
                return Err(Error::Execute("failed to finalize statement".to_string()).into());
            }
        }
        Ok(())
    }
}
