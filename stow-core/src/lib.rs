mod built_query;
mod driver;
mod error;
mod join;
mod query;
mod table_ref;
mod terminal;
mod value;
mod where_clause;
pub mod writer;

pub use built_query::*;
pub use driver::*;
pub use error::*;
pub use join::*;
pub use query::*;
pub use table_ref::*;
pub use terminal::*;
pub use value::*;
pub use where_clause::*;
pub use writer::SqlCompiler;

pub type Result<T> = anyhow::Result<T>;
