//! Stow: a typed, composable SQL query builder and driver abstraction for
//! SQLite and MariaDB, with a thin entity mapper on top.
//!
//! This crate is a facade: the query AST and compiler contract live in
//! `stow_core`, the dialects in `stow_sqlite`/`stow_mariadb`. What's added
//! here is the entity mapper (`Entity`, `EntityManager`, `PreCollection`).

mod collection;
mod entity;
mod manager;

pub use collection::PreCollection;
pub use entity::Entity;
pub use manager::EntityManager;

pub use stow_core::*;
pub use stow_mariadb::{MariaDbCompiler, MariaDbConfig, MariaDbConnection, MariaDbStatement};
pub use stow_sqlite::{SqliteCompiler, SqliteConnection, SqliteOpenMode, SqliteStatement};
