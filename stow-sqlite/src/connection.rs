use crate::{error_message_from_ptr, statement::SqliteStatement, CBox, SqliteOpenMode};
use libsqlite3_sys::*;
use std::{
    ffi::{CStr, CString},
    os::raw::{c_char, c_int},
    ptr,
};
use stow_core::{Connection, DBValue, Error, Result};

extern "C" fn close_connection(p: *mut sqlite3) {
    unsafe {
        if sqlite3_close(p) != SQLITE_OK {
            log::error!("failed to close sqlite connection cleanly");
        }
    }
}

pub struct SqliteConnection {
    connection: CBox<*mut sqlite3>,
    connected: bool,
}

impl SqliteConnection {
    /// `path` is a filesystem path, or `:memory:` for an in-memory database.
    pub fn open(path: &str, mode: SqliteOpenMode) -> Result<Self> {
        let c_path = CString::new(path).map_err(|e| Error::Connection(e.to_string()))?;
        unsafe {
            let mut raw: *mut sqlite3 = ptr::null_mut();
            let rc = sqlite3_open_v2(c_path.as_ptr(), &mut raw, mode.as_flags(), ptr::null());
            if rc != SQLITE_OK {
                let message = error_message_from_ptr(sqlite3_errmsg(raw));
                sqlite3_close(raw);
                let error = Error::Connection(message);
                log::error!("{error}");
                return Err(error.into());
            }
            // Extended result codes, per the driver contract.
            sqlite3_extended_result_codes(raw, 1);
            Ok(Self {
                connection: CBox::new(raw, close_connection),
                connected: true,
            })
        }
    }

    pub fn open_memory() -> Result<Self> {
        Self::open(":memory:", SqliteOpenMode::read_write_create())
    }

    fn last_error(&self) -> Error {
        Error::Execute(error_message_from_ptr(unsafe { sqlite3_errmsg(*self.connection) }))
    }

    /// Run possibly-multiple `;`-separated statements, discarding any rows —
    /// the SQLite driver's realisation of `execute(sql)`.
    fn run_unprepared(&mut self, sql: &str) -> Result<()> {
        unsafe {
            let sql = sql.trim();
            let mut rest = sql;
            while !rest.is_empty() {
                let c_sql = CString::new(rest).map_err(|e| Error::Prepare(e.to_string()))?;
                let mut statement: *mut sqlite3_stmt = ptr::null_mut();
                let mut tail: *const c_char = ptr::null();
                let rc = sqlite3_prepare_v2(
                    *self.connection,
                    c_sql.as_ptr(),
                    rest.len() as c_int,
                    &mut statement,
                    &mut tail,
                );
                if rc != SQLITE_OK {
                    let error = Error::Prepare(error_message_from_ptr(sqlite3_errmsg(*self.connection)));
                    log::error!("{error}");
                    return Err(error.into());
                }
                if statement.is_null() {
                    break;
                }
                loop {
                    match sqlite3_step(statement) {
                        SQLITE_ROW => continue,
                        SQLITE_DONE => break,
                        SQLITE_BUSY => continue,
                        _ => {
                            let error = self.last_error();
                            sqlite3_finalize(statement);
                            return Err(error.into());
                        }
                    }
                }
                sqlite3_finalize(statement);
                let consumed = tail.offset_from(c_sql.as_ptr());
                rest = if consumed >= 0 && (consumed as usize) < rest.len() {
                    rest[consumed as usize..].trim()
                } else {
                    ""
                };
            }
            Ok(())
        }
    }
}

impl Connection for SqliteConnection {
    type Statement = SqliteStatement;

    fn close(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn auto_commit(&self) -> Result<bool> {
        Ok(unsafe { sqlite3_get_autocommit(*self.connection) } != 0)
    }

    fn set_auto_commit(&mut self, _enabled: bool) -> Result<()> {
        Err(Error::InvalidQuery(
            "SQLite manages auto-commit itself; it cannot be toggled".to_string(),
        )
        .into())
    }

    fn transaction_start(&mut self) -> Result<()> {
        self.run_unprepared("BEGIN")
    }

    fn transaction_commit(&mut self) -> Result<()> {
        self.run_unprepared("COMMIT")
    }

    fn transaction_rollback(&mut self) -> Result<()> {
        self.run_unprepared("ROLLBACK")
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        self.run_unprepared(sql)
    }

    fn prepare(&mut self, sql: &str) -> Result<Self::Statement> {
        unsafe {
            let c_sql = CString::new(sql).map_err(|e| Error::Prepare(e.to_string()))?;
            let mut statement: *mut sqlite3_stmt = ptr::null_mut();
            let mut tail: *const c_char = ptr::null();
            let rc = sqlite3_prepare_v2(
                *self.connection,
                c_sql.as_ptr(),
                sql.len() as c_int,
                &mut statement,
                &mut tail,
            );
            if rc != SQLITE_OK {
                let error = Error::Prepare(error_message_from_ptr(sqlite3_errmsg(*self.connection)));
                log::error!("{error}");
                return Err(error.into());
            }
            if !tail.is_null() && *tail != 0 {
                let remainder = CStr::from_ptr(tail).to_string_lossy();
                sqlite3_finalize(statement);
                return Err(Error::Prepare(format!(
                    "cannot prepare more than one statement at a time (remaining: {remainder})"
                ))
                .into());
            }
            Ok(SqliteStatement::new(statement, *self.connection))
        }
    }

    fn last_insert_id(&self) -> Result<DBValue> {
        Ok(DBValue::I64(unsafe {
            sqlite3_last_insert_rowid(*self.connection)
        }))
    }
}
