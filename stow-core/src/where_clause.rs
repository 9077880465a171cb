use crate::{Column, DBValue};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    In,
    NotIn,
    Like,
    NotLike,
    IsNull,
    IsNotNull,
}

impl ComparisonOp {
    /// Nullary operators take no operand and therefore no placeholder.
    pub fn is_nullary(&self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }

    pub fn sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Junctor {
    And,
    Or,
}

/// A single fragment of a WHERE token stream.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereToken {
    ColumnTable(crate::Table),
    Column(String),
    Placeholder,
    Comparison(ComparisonOp),
    Junctor(Junctor),
    Not,
    LeftParenthesis,
    RightParenthesis,
}

/// The WHERE clause: a linear token stream plus the placeholder count and
/// any preset values attached at construction time.
///
/// Appending and parenthesising are constant-time; the placeholder/operator
/// arity invariant is maintained by construction rather than re-checked.
#[derive(Debug, Clone, Default)]
pub struct Where {
    tokens: Vec<WhereToken>,
    placeholder_count: usize,
    presets: BTreeMap<usize, DBValue>,
}

impl Where {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[WhereToken] {
        &self.tokens
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholder_count
    }

    pub fn presets(&self) -> &BTreeMap<usize, DBValue> {
        &self.presets
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn last_is_open_paren(&self) -> bool {
        matches!(self.tokens.last(), Some(WhereToken::LeftParenthesis))
    }

    fn push_junctor(&mut self, junctor: Junctor) {
        if !self.tokens.is_empty() && !self.last_is_open_paren() {
            self.tokens.push(WhereToken::Junctor(junctor));
        }
    }

    fn push_column(&mut self, column: Column) {
        if let Some(table) = column.table() {
            self.tokens.push(WhereToken::ColumnTable(table.clone()));
        }
        self.tokens.push(WhereToken::Column(column.name().to_string()));
    }

    /// Append `column op value?` joined to any existing clause with `junctor`.
    /// `value` is only accepted for non-nullary operators, and when present
    /// is recorded as a preset for the placeholder this condition writes.
    pub fn condition(
        mut self,
        junctor: Junctor,
        column: Column,
        op: ComparisonOp,
        value: Option<DBValue>,
    ) -> Self {
        assert!(
            op.is_nullary() == value.is_none() || !op.is_nullary(),
            "a nullary operator (IS NULL / IS NOT NULL) must not carry a value"
        );
        self.push_junctor(junctor);
        self.push_column(column);
        self.tokens.push(WhereToken::Comparison(op));
        if !op.is_nullary() {
            let index = self.placeholder_count;
            self.tokens.push(WhereToken::Placeholder);
            self.placeholder_count += 1;
            if let Some(value) = value {
                self.presets.insert(index, value);
            }
        }
        self
    }

    pub fn and(self, column: Column, op: ComparisonOp, value: Option<DBValue>) -> Self {
        self.condition(Junctor::And, column, op, value)
    }

    pub fn or(self, column: Column, op: ComparisonOp, value: Option<DBValue>) -> Self {
        self.condition(Junctor::Or, column, op, value)
    }

    pub fn not(mut self) -> Self {
        self.tokens.push(WhereToken::Not);
        self
    }

    /// Emit `(`, let `build` extend the token stream with a nested clause,
    /// emit `)`. Placeholder indices and presets continue from the running
    /// count so nested clauses are indistinguishable from flat ones to the
    /// compiler.
    pub fn parentheses(
        mut self,
        junctor: Junctor,
        build: impl FnOnce(Where) -> Where,
    ) -> Self {
        self.push_junctor(junctor);
        self.tokens.push(WhereToken::LeftParenthesis);
        let inner = build(Where {
            tokens: Vec::new(),
            placeholder_count: self.placeholder_count,
            presets: BTreeMap::new(),
        });
        self.tokens.extend(inner.tokens);
        self.placeholder_count = inner.placeholder_count;
        for (index, value) in inner.presets {
            self.presets.insert(index, value);
        }
        self.tokens.push(WhereToken::RightParenthesis);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_condition_has_no_leading_junctor() {
        let w = Where::new().and(Column::new("height"), ComparisonOp::Gt, None);
        assert_eq!(
            w.tokens(),
            &[
                WhereToken::Column("height".to_string()),
                WhereToken::Comparison(ComparisonOp::Gt),
                WhereToken::Placeholder,
            ]
        );
        assert_eq!(w.placeholder_count(), 1);
    }

    #[test]
    fn nullary_operator_writes_no_placeholder() {
        let w = Where::new().and(Column::new("deleted_at"), ComparisonOp::IsNull, None);
        assert_eq!(w.placeholder_count(), 0);
        assert_eq!(
            w.tokens(),
            &[
                WhereToken::Column("deleted_at".to_string()),
                WhereToken::Comparison(ComparisonOp::IsNull),
            ]
        );
    }

    #[test]
    fn preset_value_still_reserves_a_placeholder_slot() {
        let w = Where::new().and(
            Column::new("age"),
            ComparisonOp::Ge,
            Some(DBValue::I64(60)),
        );
        assert_eq!(w.placeholder_count(), 1);
        assert_eq!(w.presets().get(&0), Some(&DBValue::I64(60)));
        assert!(w.tokens().contains(&WhereToken::Placeholder));
    }

    #[test]
    fn parentheses_continue_the_running_placeholder_count() {
        let w = Where::new()
            .and(Column::new("height"), ComparisonOp::Gt, None)
            .parentheses(Junctor::And, |inner| {
                inner
                    .and(
                        Column::new("location"),
                        ComparisonOp::Eq,
                        Some(DBValue::from("US")),
                    )
                    .or(
                        Column::new("location"),
                        ComparisonOp::Eq,
                        Some(DBValue::from("CA")),
                    )
            });
        assert_eq!(w.placeholder_count(), 3);
        assert_eq!(w.presets().get(&1), Some(&DBValue::Text("US".to_string())));
        assert_eq!(w.presets().get(&2), Some(&DBValue::Text("CA".to_string())));
        for (index, _) in w.presets() {
            assert!(*index < w.placeholder_count());
        }
    }
}
