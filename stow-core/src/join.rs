use crate::{Column, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
}

/// A single join clause: a target table plus the kind and, for non-cross
/// joins, the columns the `ON` clause equates.
#[derive(Debug, Clone)]
pub struct Join {
    pub kind: JoinKind,
    pub target: Table,
    pub source_column: Option<Column>,
    pub target_column: Option<Column>,
}

impl Join {
    pub fn new(
        kind: JoinKind,
        target: impl Into<Table>,
        source_column: Option<Column>,
        target_column: Option<Column>,
    ) -> Self {
        let target = target.into();
        if kind != JoinKind::Cross {
            assert!(
                source_column.is_some() && target_column.is_some(),
                "non-cross joins require both a source and a target column"
            );
        }
        Self {
            kind,
            target,
            source_column,
            target_column,
        }
    }
}
