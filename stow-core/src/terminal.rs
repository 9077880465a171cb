use crate::{Column, Query, Result, Table};
use anyhow::bail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Avg,
    Count,
    Max,
    Min,
    Sum,
    GroupConcat,
}

impl Aggregate {
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Avg => "AVG",
            Self::Count => "COUNT",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Sum => "SUM",
            Self::GroupConcat => "GROUP_CONCAT",
        }
    }
}

/// A single entry of a SELECT expression list: a plain/qualified column, or
/// an aggregate wrapping one.
#[derive(Debug, Clone)]
pub struct SelectExpression {
    pub column: Column,
    pub aggregate: Option<Aggregate>,
    pub distinct: bool,
}

impl SelectExpression {
    pub fn column(column: impl Into<Column>) -> Self {
        Self {
            column: column.into(),
            aggregate: None,
            distinct: false,
        }
    }

    pub fn aggregate(column: impl Into<Column>, aggregate: Aggregate) -> Self {
        Self {
            column: column.into(),
            aggregate: Some(aggregate),
            distinct: false,
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

impl From<&str> for SelectExpression {
    fn from(value: &str) -> Self {
        Self::column(value)
    }
}

/// `SELECT`. An empty expression list defaults to `*`; `count()` with no
/// column defaults to `count("*")`.
#[derive(Debug, Clone)]
pub struct Select {
    pub query: Query,
    pub expressions: Vec<SelectExpression>,
}

impl Select {
    pub fn new(query: Query, expressions: Vec<SelectExpression>) -> Self {
        Self { query, expressions }
    }

    pub fn all(query: Query) -> Self {
        Self::new(query, Vec::new())
    }

    pub fn count(query: Query) -> Self {
        Self::new(query, vec![SelectExpression::aggregate(Column::all(), Aggregate::Count)])
    }
}

/// `UPDATE`. Precondition: `columns` non-empty, and the underlying query has
/// no joins (joins are meaningless on a single-table UPDATE target).
#[derive(Debug, Clone)]
pub struct Update {
    pub query: Query,
    pub columns: Vec<String>,
}

impl Update {
    pub fn new(query: Query, columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            bail!(crate::Error::InvalidQuery(
                "UPDATE requires at least one column to set".to_string()
            ));
        }
        if !query.joins.is_empty() {
            bail!(crate::Error::InvalidQuery(
                "UPDATE does not support JOIN".to_string()
            ));
        }
        Ok(Self { query, columns })
    }
}

/// `INSERT`. Precondition: `row_count == 1` or `columns` non-empty. With an
/// empty column list the compiler emits `DEFAULT VALUES`.
#[derive(Debug, Clone)]
pub struct Insert {
    pub table: Table,
    pub columns: Vec<String>,
    pub row_count: u32,
}

impl Insert {
    pub fn new(table: impl Into<Table>, columns: Vec<String>, row_count: u32) -> Result<Self> {
        if row_count == 0 {
            bail!(crate::Error::InvalidQuery(
                "INSERT requires at least one row".to_string()
            ));
        }
        if row_count != 1 && columns.is_empty() {
            bail!(crate::Error::InvalidQuery(
                "INSERT of more than one row requires an explicit column list".to_string()
            ));
        }
        Ok(Self {
            table: table.into(),
            columns,
            row_count,
        })
    }

    pub fn times(self, row_count: u32) -> Result<Self> {
        Self::new(self.table, self.columns, row_count)
    }
}

/// `DELETE`. Precondition: the underlying query has no joins.
#[derive(Debug, Clone)]
pub struct Delete {
    pub query: Query,
}

impl Delete {
    pub fn new(query: Query) -> Result<Self> {
        if !query.joins.is_empty() {
            bail!(crate::Error::InvalidQuery(
                "DELETE does not support JOIN".to_string()
            ));
        }
        Ok(Self { query })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_rejects_empty_columns() {
        assert!(Update::new(Query::from("mountain"), Vec::new()).is_err());
    }

    #[test]
    fn update_rejects_joined_query() {
        let q = Query::from("book").join(
            crate::JoinKind::Inner,
            "author",
            Some(Column::new("id")),
            Some(Column::new("author_id")),
        );
        assert!(Update::new(q, vec!["title".to_string()]).is_err());
    }

    #[test]
    fn insert_requires_columns_for_multi_row() {
        assert!(Insert::new("mountain", Vec::new(), 2).is_err());
        assert!(Insert::new("mountain", Vec::new(), 1).is_ok());
    }

    #[test]
    fn delete_rejects_joined_query() {
        let q = Query::from("book").join(
            crate::JoinKind::Inner,
            "author",
            Some(Column::new("id")),
            Some(Column::new("author_id")),
        );
        assert!(Delete::new(q).is_err());
    }
}
