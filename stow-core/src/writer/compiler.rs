use crate::{
    BuiltQuery, Column, Delete, Insert, Join, JoinKind, Placeholders, Presets, Query, Result,
    Select, Update, Where, WhereToken,
};
use anyhow::bail;
use std::fmt::Write;

/// Per-dialect pure compiler: walks a terminal's AST and writes parameterised
/// SQL. The shared contract (identifier quoting shape, placeholder
/// numbering, WHERE/JOIN/ORDER BY emission) lives here as default methods;
/// a dialect crate only overrides the handful of hooks where it actually
/// differs (quote character, FULL OUTER JOIN support).
pub trait SqlCompiler {
    /// The identifier delimiter: `"` for SQLite, `` ` `` for MariaDB.
    fn quote_char(&self) -> char;

    /// Whether this dialect's engine supports `FULL OUTER JOIN`.
    fn supports_full_outer_join(&self) -> bool {
        true
    }

    fn write_identifier(&self, out: &mut String, name: &str) {
        let q = self.quote_char();
        out.push(q);
        for c in name.chars() {
            if c == q {
                out.push(q);
                out.push(q);
            } else {
                out.push(c);
            }
        }
        out.push(q);
    }

    fn write_column(&self, out: &mut String, column: &Column) {
        if column.is_wildcard() {
            out.push('*');
            return;
        }
        if let Some(table) = column.table() {
            self.write_identifier(out, table.name());
            out.push('.');
        }
        self.write_identifier(out, column.name());
    }

    fn write_select_expression(&self, out: &mut String, expr: &crate::SelectExpression) {
        match expr.aggregate {
            Some(aggregate) => {
                out.push_str(aggregate.sql());
                out.push('(');
                if expr.distinct {
                    out.push_str("DISTINCT ");
                }
                self.write_column(out, &expr.column);
                out.push(')');
            }
            None => self.write_column(out, &expr.column),
        }
    }

    fn join_keyword(&self, kind: JoinKind) -> &'static str {
        match kind {
            JoinKind::Inner => " JOIN",
            JoinKind::LeftOuter => " LEFT OUTER JOIN",
            JoinKind::RightOuter => " RIGHT OUTER JOIN",
            JoinKind::FullOuter => " FULL OUTER JOIN",
            JoinKind::Cross => " CROSS JOIN",
        }
    }

    fn write_join(&self, out: &mut String, join: &Join) -> Result<()> {
        if join.kind == JoinKind::FullOuter && !self.supports_full_outer_join() {
            bail!(crate::Error::InvalidQuery(
                "FULL OUTER JOIN is not supported by this dialect".to_string()
            ));
        }
        out.push_str(self.join_keyword(join.kind));
        out.push(' ');
        self.write_identifier(out, join.target.name());
        if join.kind != JoinKind::Cross {
            if let (Some(source_column), Some(target_column)) =
                (&join.source_column, &join.target_column)
            {
                out.push_str(" ON ");
                self.write_column(out, source_column);
                out.push_str(" = ");
                self.write_column(out, target_column);
            }
        }
        Ok(())
    }

    fn write_where(&self, out: &mut String, where_: &Where) {
        if where_.is_empty() {
            return;
        }
        out.push_str(" WHERE");
        let tokens = where_.tokens();
        for (i, token) in tokens.iter().enumerate() {
            let preceded_by_table = i > 0 && matches!(tokens[i - 1], WhereToken::ColumnTable(_));
            let skip_space = matches!(token, WhereToken::Column(_)) && preceded_by_table;
            if !skip_space {
                out.push(' ');
            }
            match token {
                WhereToken::ColumnTable(table) => {
                    self.write_identifier(out, table.name());
                    out.push('.');
                }
                WhereToken::Column(name) => self.write_identifier(out, name),
                WhereToken::Placeholder => out.push('?'),
                WhereToken::Comparison(op) => out.push_str(op.sql()),
                WhereToken::Junctor(crate::Junctor::And) => out.push_str("AND"),
                WhereToken::Junctor(crate::Junctor::Or) => out.push_str("OR"),
                WhereToken::Not => out.push_str("NOT"),
                WhereToken::LeftParenthesis => out.push('('),
                WhereToken::RightParenthesis => out.push(')'),
            }
        }
    }

    fn write_order_by(&self, out: &mut String, terms: &[crate::OrderingTerm]) {
        if terms.is_empty() {
            return;
        }
        out.push_str(" ORDER BY ");
        for (i, term) in terms.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_column(out, &term.column);
            if term.direction == crate::OrderDirection::Desc {
                out.push_str(" DESC");
            }
        }
    }

    fn write_limit(&self, out: &mut String, limit: &crate::Limit) {
        if limit.limit_enabled {
            out.push_str(" LIMIT ?");
        }
        if limit.offset_enabled {
            out.push_str(" OFFSET ?");
        }
    }

    fn write_query_core(&self, out: &mut String, query: &Query) -> Result<()> {
        out.push_str(" FROM ");
        self.write_identifier(out, query.table.name());
        for join in &query.joins {
            self.write_join(out, join)?;
        }
        self.write_where(out, &query.where_clause);
        self.write_order_by(out, &query.ordering);
        self.write_limit(out, &query.limit);
        Ok(())
    }

    fn presets_of(&self, query: &Query) -> Presets {
        Presets {
            where_: query.where_clause.presets().clone(),
            limit: query.limit.limit_preset,
            offset: query.limit.offset_preset,
        }
    }

    fn compile_select(&self, select: &Select) -> Result<BuiltQuery> {
        let mut sql = String::from("SELECT ");
        if select.expressions.is_empty() {
            sql.push('*');
        } else {
            for (i, expr) in select.expressions.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                self.write_select_expression(&mut sql, expr);
            }
        }
        self.write_query_core(&mut sql, &select.query)?;
        Ok(BuiltQuery::new(
            sql,
            Placeholders {
                where_: select.query.where_clause.placeholder_count(),
            },
            self.presets_of(&select.query),
        ))
    }

    fn compile_update(&self, update: &Update) -> Result<BuiltQuery> {
        let mut sql = String::from("UPDATE ");
        self.write_identifier(&mut sql, update.query.table.name());
        sql.push_str(" SET ");
        for (i, column) in update.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            self.write_identifier(&mut sql, column);
            sql.push_str(" = ?");
        }
        self.write_where(&mut sql, &update.query.where_clause);
        self.write_order_by(&mut sql, &update.query.ordering);
        self.write_limit(&mut sql, &update.query.limit);
        // The SET clause writes its own `?` placeholders ahead of WHERE's, so
        // every WHERE-relative index (preset keys, placeholder_count) has to
        // shift by the number of SET columns to land on the right statement
        // index.
        let set_count = update.columns.len();
        let mut presets = self.presets_of(&update.query);
        presets.where_ = presets
            .where_
            .into_iter()
            .map(|(index, value)| (index + set_count, value))
            .collect();
        Ok(BuiltQuery::new(
            sql,
            Placeholders {
                where_: set_count + update.query.where_clause.placeholder_count(),
            },
            presets,
        ))
    }

    fn compile_insert(&self, insert: &Insert) -> Result<BuiltQuery> {
        let mut sql = String::from("INSERT INTO ");
        self.write_identifier(&mut sql, insert.table.name());
        if insert.columns.is_empty() {
            sql.push_str(" DEFAULT VALUES");
        } else {
            sql.push_str(" (");
            for (i, column) in insert.columns.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                self.write_identifier(&mut sql, column);
            }
            sql.push_str(") VALUES ");
            let group = format!("({})", vec!["?"; insert.columns.len()].join(","));
            for i in 0..insert.row_count {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(&group);
            }
        }
        Ok(BuiltQuery::new(
            sql,
            Placeholders::default(),
            Presets::default(),
        ))
    }

    fn compile_delete(&self, delete: &Delete) -> Result<BuiltQuery> {
        let mut sql = String::from("DELETE");
        self.write_query_core(&mut sql, &delete.query)?;
        Ok(BuiltQuery::new(
            sql,
            Placeholders {
                where_: delete.query.where_clause.placeholder_count(),
            },
            self.presets_of(&delete.query),
        ))
    }
}
