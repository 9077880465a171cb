use crate::{Column, ComparisonOp, DBValue, Join, JoinKind, Junctor, Table, Where};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
pub struct OrderingTerm {
    pub column: Column,
    pub direction: OrderDirection,
}

/// `LIMIT`/`OFFSET`, with optional values fixed at build time ("presets").
///
/// If `offset_enabled` then `limit_enabled` (enforced by construction: there
/// is no combinator that enables offset without limit).
#[derive(Debug, Clone, Default)]
pub struct Limit {
    pub limit_enabled: bool,
    pub limit_preset: Option<u64>,
    pub offset_enabled: bool,
    pub offset_preset: Option<u64>,
}

/// The query AST: a table plus the clauses built up by pure combinators.
/// Consumed once by a terminal (`Select`/`Update`/`Insert`/`Delete`).
#[derive(Debug, Clone)]
pub struct Query {
    pub table: Table,
    pub joins: Vec<Join>,
    pub where_clause: Where,
    pub ordering: Vec<OrderingTerm>,
    pub limit: Limit,
}

impl Query {
    pub fn from(table: impl Into<Table>) -> Self {
        Self {
            table: table.into(),
            joins: Vec::new(),
            where_clause: Where::new(),
            ordering: Vec::new(),
            limit: Limit::default(),
        }
    }

    pub fn join(
        mut self,
        kind: JoinKind,
        target: impl Into<Table>,
        source_column: Option<Column>,
        target_column: Option<Column>,
    ) -> Self {
        self.joins.push(Join::new(kind, target, source_column, target_column));
        self
    }

    pub fn where_(self, column: Column, op: ComparisonOp, value: Option<DBValue>) -> Self {
        self.where_and(column, op, value)
    }

    pub fn where_and(mut self, column: Column, op: ComparisonOp, value: Option<DBValue>) -> Self {
        self.where_clause = self.where_clause.and(column, op, value);
        self
    }

    pub fn where_or(mut self, column: Column, op: ComparisonOp, value: Option<DBValue>) -> Self {
        self.where_clause = self.where_clause.or(column, op, value);
        self
    }

    pub fn where_parentheses(
        mut self,
        junctor: Junctor,
        build: impl FnOnce(Where) -> Where,
    ) -> Self {
        self.where_clause = self.where_clause.parentheses(junctor, build);
        self
    }

    pub fn order_by(mut self, column: impl Into<Column>, direction: OrderDirection) -> Self {
        self.ordering.push(OrderingTerm {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn asc(self, column: impl Into<Column>) -> Self {
        self.order_by(column, OrderDirection::Asc)
    }

    pub fn desc(self, column: impl Into<Column>) -> Self {
        self.order_by(column, OrderDirection::Desc)
    }

    pub fn limit(mut self, preset: Option<u64>) -> Self {
        self.limit.limit_enabled = true;
        self.limit.limit_preset = preset;
        self
    }

    pub fn offset(mut self, preset: Option<u64>) -> Self {
        assert!(
            self.limit.limit_enabled,
            "offset requires limit to be enabled first"
        );
        self.limit.offset_enabled = true;
        self.limit.offset_preset = preset;
        self
    }
}
