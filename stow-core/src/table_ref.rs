use std::fmt;

/// A table identifier. Never used raw in compiled SQL — always quoted by a
/// dialect's `SqlCompiler`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    name: String,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "a table identifier must not be empty");
        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Table {
    fn from(value: &str) -> Self {
        Table::new(value)
    }
}

impl From<String> for Table {
    fn from(value: String) -> Self {
        Table::new(value)
    }
}

/// A column reference: a bare name, optionally qualified by a table.
///
/// `"*"` is only meaningful inside a SELECT expression list; it is never
/// quoted by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    name: String,
    table: Option<Table>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "a column identifier must not be empty");
        Self { name, table: None }
    }

    pub fn qualified(table: impl Into<Table>, name: impl Into<String>) -> Self {
        let mut col = Self::new(name);
        col.table = Some(table.into());
        col
    }

    pub fn all() -> Self {
        Self {
            name: "*".to_string(),
            table: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn is_wildcard(&self) -> bool {
        self.name == "*"
    }

    pub fn with_table(mut self, table: impl Into<Table>) -> Self {
        self.table = Some(table.into());
        self
    }
}

impl From<&str> for Column {
    fn from(value: &str) -> Self {
        Column::new(value)
    }
}

impl From<String> for Column {
    fn from(value: String) -> Self {
        Column::new(value)
    }
}
