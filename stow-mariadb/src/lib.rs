mod compiler;
mod config;
mod connection;
mod statement;
mod value_wrap;

pub use compiler::*;
pub use config::*;
pub use connection::*;
pub use statement::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiler_uses_backtick_quoting() {
        use stow_core::SqlCompiler;
        assert_eq!(MariaDbCompiler.quote_char(), '`');
        assert!(!MariaDbCompiler.supports_full_outer_join());
    }

    #[test]
    fn config_defaults_port_and_no_database() {
        let config = MariaDbConfig::new("localhost", "root", "secret");
        assert_eq!(config.port, 3306);
        assert!(config.database.is_none());
    }
}
