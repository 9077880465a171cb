use libsqlite3_sys::*;
use std::os::raw::c_int;

/// SQLite's open flags, named the way the spec's configuration surface
/// names them rather than exposing the raw `SQLITE_OPEN_*` bit values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteOpenMode {
    pub read_only: bool,
    pub read_write: bool,
    pub create_if_missing: bool,
    pub in_memory: bool,
    pub no_mutex: bool,
    pub full_mutex: bool,
    pub no_symlink: bool,
}

impl SqliteOpenMode {
    /// The common case: open for read/write, creating the file if absent.
    pub fn read_write_create() -> Self {
        Self {
            read_write: true,
            create_if_missing: true,
            ..Default::default()
        }
    }

    pub(crate) fn as_flags(&self) -> c_int {
        let mut flags = 0;
        if self.read_only {
            flags |= SQLITE_OPEN_READONLY;
        }
        if self.read_write {
            flags |= SQLITE_OPEN_READWRITE;
        }
        if self.create_if_missing {
            flags |= SQLITE_OPEN_CREATE;
        }
        if self.in_memory {
            flags |= SQLITE_OPEN_MEMORY;
        }
        if self.no_mutex {
            flags |= SQLITE_OPEN_NOMUTEX;
        }
        if self.full_mutex {
            flags |= SQLITE_OPEN_FULLMUTEX;
        }
        if self.no_symlink {
            flags |= SQLITE_OPEN_NOFOLLOW;
        }
        flags | SQLITE_OPEN_URI
    }
}
