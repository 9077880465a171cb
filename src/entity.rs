use stow_core::{DBValue, Result, Row};

/// A type mappable onto a single table by hand-written convention: lowercase
/// table/column names, positional correspondence between `columns()` and
/// both `Row` and `values()`. The `id` column is always present and always
/// first; `id == 0` means "not yet stored".
pub trait Entity: Sized {
    fn table_name() -> &'static str;

    /// Column names in declaration order, `id` first.
    fn columns() -> &'static [&'static str];

    fn id(&self) -> u64;

    fn set_id(&mut self, id: u64);

    /// Build an entity from a row whose columns are ordered per `columns()`.
    fn from_row(row: &Row) -> Result<Self>;

    /// One `DBValue` per entry of `columns()`, in the same order.
    fn values(&self) -> Vec<DBValue>;

    /// `values()` without the leading `id` column, for INSERT column lists.
    fn insertable_columns() -> &'static [&'static str] {
        &Self::columns()[1..]
    }

    fn insertable_values(&self) -> Vec<DBValue> {
        self.values().split_off(1)
    }
}
