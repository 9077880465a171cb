use crate::DBValue;
use std::collections::BTreeMap;

/// Number of `?` placeholders a compiled query's WHERE clause wrote. LIMIT
/// and OFFSET each contribute at most one further placeholder, not counted
/// here (see `Presets`/the binding protocol in stow-core::writer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placeholders {
    pub where_: usize,
}

/// Preset values carried over verbatim from the AST: values the application
/// supplied at build time rather than at bind time.
#[derive(Debug, Clone, Default)]
pub struct Presets {
    pub where_: BTreeMap<usize, DBValue>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// The result of compiling a `Query`/terminal for one dialect: SQL text plus
/// the placeholder/preset metadata needed to bind it.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub sql: String,
    pub placeholders: Placeholders,
    pub presets: Presets,
}

impl BuiltQuery {
    pub fn new(sql: String, placeholders: Placeholders, presets: Presets) -> Self {
        Self {
            sql,
            placeholders,
            presets,
        }
    }

    /// Index at which the LIMIT placeholder, if enabled, is bound.
    pub fn limit_index(&self) -> usize {
        self.placeholders.where_
    }

    /// Index at which the OFFSET placeholder, if enabled, is bound.
    pub fn offset_index(&self) -> usize {
        self.placeholders.where_ + 1
    }

    /// The binding protocol (spec §4.5): bind every preset WHERE value, then
    /// the LIMIT/OFFSET presets if enabled. The application still has to
    /// fill whichever WHERE placeholders were not preset before calling
    /// `execute`.
    pub fn bind_presets(&self, statement: &mut dyn crate::Statement) -> crate::Result<()> {
        for (index, value) in &self.presets.where_ {
            statement.bind_value(*index, value)?;
        }
        if let Some(limit) = self.presets.limit {
            statement.bind_u64(self.limit_index(), limit)?;
        }
        if let Some(offset) = self.presets.offset {
            statement.bind_u64(self.offset_index(), offset)?;
        }
        Ok(())
    }
}
