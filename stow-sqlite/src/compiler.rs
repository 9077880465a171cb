use stow_core::SqlCompiler;

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteCompiler;

impl SqlCompiler for SqliteCompiler {
    fn quote_char(&self) -> char {
        '"'
    }
}
