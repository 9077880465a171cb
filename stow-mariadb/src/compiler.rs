use stow_core::SqlCompiler;

#[derive(Debug, Default, Clone, Copy)]
pub struct MariaDbCompiler;

impl SqlCompiler for MariaDbCompiler {
    fn quote_char(&self) -> char {
        '`'
    }

    /// MariaDB's engine does not support `FULL OUTER JOIN`; rejected at
    /// compile time, no runtime translation attempted.
    fn supports_full_outer_join(&self) -> bool {
        false
    }
}
