use crate::{DBValue, Result, Row};

/// A driver-owned prepared statement: an input-sequence over `Row`s.
///
/// Binding is only valid before the first `execute()`, or after an implicit
/// reset triggered by a fresh `execute()`. Iteration is single-pass forward:
/// once `pop_front` has advanced past a row, it cannot be revisited.
pub trait Statement {
    fn bind_null(&mut self, index: usize) -> Result<()>;
    fn bind_bool(&mut self, index: usize, value: bool) -> Result<()>;
    fn bind_i8(&mut self, index: usize, value: i8) -> Result<()>;
    fn bind_i16(&mut self, index: usize, value: i16) -> Result<()>;
    fn bind_i32(&mut self, index: usize, value: i32) -> Result<()>;
    fn bind_i64(&mut self, index: usize, value: i64) -> Result<()>;
    fn bind_u8(&mut self, index: usize, value: u8) -> Result<()>;
    fn bind_u16(&mut self, index: usize, value: u16) -> Result<()>;
    fn bind_u32(&mut self, index: usize, value: u32) -> Result<()>;
    fn bind_u64(&mut self, index: usize, value: u64) -> Result<()>;
    fn bind_f64(&mut self, index: usize, value: f64) -> Result<()>;
    fn bind_text(&mut self, index: usize, value: &str) -> Result<()>;
    fn bind_blob(&mut self, index: usize, value: &[u8]) -> Result<()>;

    /// Universal dispatch over every `DBValue` variant. The default
    /// forwards to the scalar `bind_*` methods above, so a driver only has
    /// to implement those.
    fn bind_value(&mut self, index: usize, value: &DBValue) -> Result<()> {
        match value {
            DBValue::Null => self.bind_null(index),
            DBValue::Bool(v) => self.bind_bool(index, *v),
            DBValue::I8(v) => self.bind_i8(index, *v),
            DBValue::I16(v) => self.bind_i16(index, *v),
            DBValue::I32(v) => self.bind_i32(index, *v),
            DBValue::I64(v) => self.bind_i64(index, *v),
            DBValue::U8(v) => self.bind_u8(index, *v),
            DBValue::U16(v) => self.bind_u16(index, *v),
            DBValue::U32(v) => self.bind_u32(index, *v),
            DBValue::U64(v) => self.bind_u64(index, *v),
            DBValue::F64(v) => self.bind_f64(index, *v),
            DBValue::Text(v) => self.bind_text(index, v),
            DBValue::Blob(v) => self.bind_blob(index, v),
            // Routed through `get_as_text` so the wire encoding and the
            // coerced-extraction encoding can never drift apart.
            DBValue::Date(_) | DBValue::TimeOfDay(_) | DBValue::DateTime(_) => {
                self.bind_text(index, &value.get_as_text()?)
            }
        }
    }

    /// Run with the currently bound values, advancing to the first row if
    /// any. Re-binding after `execute` and calling `execute` again resets
    /// native state and runs again.
    fn execute(&mut self) -> Result<()>;

    fn is_empty(&self) -> bool;

    /// Only defined when `!is_empty()`.
    fn front(&self) -> Result<Row>;

    /// Only defined when `!is_empty()`.
    fn pop_front(&mut self) -> Result<()>;

    /// Finalise native resources. Safe to call at most once; calling any
    /// other method afterwards is undefined.
    fn close(&mut self) -> Result<()>;
}

/// The connection/statement contract every driver must satisfy. Application
/// code depends only on this trait, never on a driver's concrete type.
pub trait Connection {
    type Statement: Statement;

    fn close(&mut self) -> Result<()>;
    fn is_connected(&self) -> bool;

    fn auto_commit(&self) -> Result<bool>;
    /// A driver whose engine cannot toggle auto-commit (SQLite, whose
    /// engine manages it) rejects this with an `Error::InvalidQuery`.
    fn set_auto_commit(&mut self, enabled: bool) -> Result<()>;

    fn transaction_start(&mut self) -> Result<()>;
    fn transaction_commit(&mut self) -> Result<()>;
    fn transaction_rollback(&mut self) -> Result<()>;

    /// Fire-and-forget statement for DDL and similar; any rows are
    /// discarded.
    fn execute(&mut self, sql: &str) -> Result<()>;

    fn prepare(&mut self, sql: &str) -> Result<Self::Statement>;

    fn last_insert_id(&self) -> Result<DBValue>;
}
