use crate::Entity;
use std::marker::PhantomData;
use stow_core::{
    Aggregate, Column, ComparisonOp, Connection, DBValue, Delete, OrderDirection, Query,
    SelectExpression, Select, SqlCompiler, Statement, Where,
};

/// A builder wrapping a `Query` with terminal helpers, scoped to one entity
/// type. Every builder method is pure and consuming; terminals either
/// compile (`select`, `count`, ...) or compile-bind-execute against a driver
/// (the `*_via` variants).
pub struct PreCollection<T: Entity, D: Connection, C: SqlCompiler + Default> {
    query: Query,
    compiler: C,
    _marker: PhantomData<(T, D)>,
}

impl<T: Entity, D: Connection, C: SqlCompiler + Default> PreCollection<T, D, C> {
    pub(crate) fn new(query: Query) -> Self {
        Self {
            query,
            compiler: C::default(),
            _marker: PhantomData,
        }
    }

    pub fn where_(mut self, column: impl Into<Column>, op: ComparisonOp, value: Option<DBValue>) -> Self {
        self.query = self.query.where_and(column.into(), op, value);
        self
    }

    pub fn where_or(mut self, column: impl Into<Column>, op: ComparisonOp, value: Option<DBValue>) -> Self {
        self.query = self.query.where_or(column.into(), op, value);
        self
    }

    pub fn where_parentheses(
        mut self,
        junctor: stow_core::Junctor,
        build: impl FnOnce(Where) -> Where,
    ) -> Self {
        self.query = self.query.where_parentheses(junctor, build);
        self
    }

    pub fn order_by(mut self, column: impl Into<Column>, direction: OrderDirection) -> Self {
        self.query = self.query.order_by(column, direction);
        self
    }

    pub fn asc(self, column: impl Into<Column>) -> Self {
        self.order_by(column, OrderDirection::Asc)
    }

    pub fn desc(self, column: impl Into<Column>) -> Self {
        self.order_by(column, OrderDirection::Desc)
    }

    pub fn limit(mut self, preset: Option<u64>) -> Self {
        self.query = self.query.limit(preset);
        self
    }

    pub fn offset(mut self, preset: Option<u64>) -> Self {
        self.query = self.query.offset(preset);
        self
    }

    fn entity_select(&self) -> Select {
        Select::new(
            self.query.clone(),
            T::columns().iter().map(|&c| SelectExpression::column(c)).collect(),
        )
    }

    pub fn select(self) -> stow_core::Result<stow_core::BuiltQuery> {
        self.compiler.compile_select(&self.entity_select())
    }

    pub fn select_via(self, driver: &mut D) -> stow_core::Result<Vec<T>> {
        let built = self.select()?;
        let mut statement = driver.prepare(&built.sql)?;
        built.bind_presets(&mut statement)?;
        statement.execute()?;
        let mut out = Vec::new();
        while !statement.is_empty() {
            out.push(T::from_row(&statement.front()?)?);
            statement.pop_front()?;
        }
        Ok(out)
    }

    pub fn count(self) -> stow_core::Result<stow_core::BuiltQuery> {
        self.compiler.compile_select(&Select::count(self.query))
    }

    pub fn count_via(self, driver: &mut D) -> stow_core::Result<u64> {
        let built = self.count()?;
        let mut statement = driver.prepare(&built.sql)?;
        built.bind_presets(&mut statement)?;
        statement.execute()?;
        statement.front()?[0].get_as_u64()
    }

    pub fn aggregate(self, aggregate: Aggregate, column: impl Into<Column>) -> stow_core::Result<stow_core::BuiltQuery> {
        let select = Select::new(
            self.query,
            vec![SelectExpression::aggregate(column, aggregate)],
        );
        self.compiler.compile_select(&select)
    }

    pub fn aggregate_via(
        self,
        driver: &mut D,
        aggregate: Aggregate,
        column: impl Into<Column>,
    ) -> stow_core::Result<DBValue> {
        let query = self.query.clone();
        let select = Select::new(query, vec![SelectExpression::aggregate(column, aggregate)]);
        let built = self.compiler.compile_select(&select)?;
        let mut statement = driver.prepare(&built.sql)?;
        built.bind_presets(&mut statement)?;
        statement.execute()?;
        Ok(statement.front()?[0].clone())
    }

    pub fn delete_(self) -> stow_core::Result<Delete> {
        Delete::new(self.query)
    }

    pub fn delete_via(self, driver: &mut D) -> stow_core::Result<()> {
        let delete = Delete::new(self.query)?;
        let built = self.compiler.compile_delete(&delete)?;
        let mut statement = driver.prepare(&built.sql)?;
        built.bind_presets(&mut statement)?;
        statement.execute()
    }
}
