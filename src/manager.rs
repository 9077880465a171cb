use crate::{Entity, PreCollection};
use std::marker::PhantomData;
use stow_core::{
    Column, ComparisonOp, Connection, DBValue, Delete, Error, Insert, Query, SqlCompiler,
    Statement, Update,
};

/// Entity access parameterised over a driver connection and the SQL dialect
/// it speaks. Thin on top of the query builder: every operation compiles one
/// terminal, binds, and executes against the caller-supplied connection.
pub struct EntityManager<D: Connection, C: SqlCompiler + Default> {
    compiler: C,
    _driver: PhantomData<D>,
}

impl<D: Connection, C: SqlCompiler + Default> Default for EntityManager<D, C> {
    fn default() -> Self {
        Self {
            compiler: C::default(),
            _driver: PhantomData,
        }
    }
}

impl<D: Connection, C: SqlCompiler + Default> EntityManager<D, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: Entity>(&self, driver: &mut D, id: u64) -> stow_core::Result<Option<T>> {
        let query = Query::from(T::table_name()).where_and(
            Column::new("id"),
            ComparisonOp::Eq,
            Some(DBValue::U64(id)),
        );
        let select = stow_core::Select::new(
            query,
            T::columns()
                .iter()
                .map(|&c| stow_core::SelectExpression::column(c))
                .collect(),
        );
        let built = self.compiler.compile_select(&select)?;
        let mut statement = driver.prepare(&built.sql)?;
        built.bind_presets(&mut statement)?;
        statement.execute()?;
        if statement.is_empty() {
            return Ok(None);
        }
        Ok(Some(T::from_row(&statement.front()?)?))
    }

    /// Inserts if `entity.id() == 0` (and sets the generated id), otherwise
    /// updates the existing row.
    pub fn save<T: Entity>(&self, driver: &mut D, entity: &mut T) -> stow_core::Result<()> {
        if entity.id() == 0 {
            let id = self.store(driver, entity)?;
            entity.set_id(id);
            Ok(())
        } else {
            self.update(driver, entity)
        }
    }

    pub fn store<T: Entity>(&self, driver: &mut D, entity: &T) -> stow_core::Result<u64> {
        let columns = T::insertable_columns().iter().map(|s| s.to_string()).collect();
        let insert = Insert::new(T::table_name(), columns, 1)?;
        let built = self.compiler.compile_insert(&insert)?;
        let mut statement = driver.prepare(&built.sql)?;
        for (i, value) in entity.insertable_values().iter().enumerate() {
            statement.bind_value(i, value)?;
        }
        statement.execute()?;
        driver.last_insert_id()?.get_as_u64()
    }

    pub fn update<T: Entity>(&self, driver: &mut D, entity: &T) -> stow_core::Result<()> {
        if entity.id() == 0 {
            return Err(Error::InvalidQuery(
                "update requires an entity with a non-zero id".to_string(),
            )
            .into());
        }
        let columns: Vec<String> = T::insertable_columns().iter().map(|s| s.to_string()).collect();
        let query = Query::from(T::table_name()).where_and(
            Column::new("id"),
            ComparisonOp::Eq,
            Some(DBValue::U64(entity.id())),
        );
        let update = Update::new(query, columns)?;
        let built = self.compiler.compile_update(&update)?;
        let mut statement = driver.prepare(&built.sql)?;
        for (i, value) in entity.insertable_values().iter().enumerate() {
            statement.bind_value(i, value)?;
        }
        built.bind_presets(&mut statement)?;
        statement.execute()
    }

    pub fn remove<T: Entity>(&self, driver: &mut D, id: u64) -> stow_core::Result<()> {
        let query = Query::from(T::table_name()).where_and(
            Column::new("id"),
            ComparisonOp::Eq,
            Some(DBValue::U64(id)),
        );
        let delete = Delete::new(query)?;
        let built = self.compiler.compile_delete(&delete)?;
        let mut statement = driver.prepare(&built.sql)?;
        built.bind_presets(&mut statement)?;
        statement.execute()
    }

    pub fn remove_entity<T: Entity>(&self, driver: &mut D, entity: &T) -> stow_core::Result<()> {
        self.remove::<T>(driver, entity.id())
    }

    pub fn find<T: Entity>(&self) -> PreCollection<T, D, C> {
        PreCollection::new(Query::from(T::table_name()))
    }

    /// Passthrough for creating tables in tests; no migration system.
    pub fn execute_ddl(&self, driver: &mut D, sql: &str) -> stow_core::Result<()> {
        driver.execute(sql)
    }

    /// The many-side entity is assumed to carry a `<one-table>_id` column.
    pub fn many_to_one<One: Entity>(
        &self,
        driver: &mut D,
        one_id: u64,
    ) -> stow_core::Result<Option<One>> {
        self.get::<One>(driver, one_id)
    }

    /// Alias of `many_to_one`; the direction is the caller's choice.
    pub fn one_to_one<One: Entity>(
        &self,
        driver: &mut D,
        one_id: u64,
    ) -> stow_core::Result<Option<One>> {
        self.many_to_one::<One>(driver, one_id)
    }

    pub fn one_to_many<Many: Entity, One: Entity>(&self, one: &One) -> PreCollection<Many, D, C> {
        let foreign_key = format!("{}_id", One::table_name());
        let query = Query::from(Many::table_name()).where_and(
            Column::new(foreign_key),
            ComparisonOp::Eq,
            Some(DBValue::U64(one.id())),
        );
        PreCollection::new(query)
    }

    pub fn many_to_many<Target: Entity, Source: Entity>(
        &self,
        source: &Source,
    ) -> PreCollection<Target, D, C> {
        let join_table = join_table_name(Source::table_name(), Target::table_name());
        let source_column = format!("{}_id", Source::table_name());
        let target_column = format!("{}_id", Target::table_name());
        let query = Query::from(join_table.clone())
            .join(
                stow_core::JoinKind::Inner,
                Target::table_name(),
                Some(Column::qualified(Target::table_name(), "id")),
                Some(Column::qualified(join_table.clone(), target_column)),
            )
            .where_and(
                Column::qualified(join_table, source_column),
                ComparisonOp::Eq,
                Some(DBValue::U64(source.id())),
            );
        PreCollection::new(query)
    }

    pub fn many_to_many_assign<A: Entity, B: Entity>(
        &self,
        driver: &mut D,
        a: &A,
        b: &B,
    ) -> stow_core::Result<()> {
        let join_table = join_table_name(A::table_name(), B::table_name());
        let columns = vec![format!("{}_id", A::table_name()), format!("{}_id", B::table_name())];
        let insert = Insert::new(join_table, columns, 1)?;
        let built = self.compiler.compile_insert(&insert)?;
        let mut statement = driver.prepare(&built.sql)?;
        statement.bind_u64(0, a.id())?;
        statement.bind_u64(1, b.id())?;
        statement.execute()
    }

    pub fn many_to_many_unassign<A: Entity, B: Entity>(
        &self,
        driver: &mut D,
        a: &A,
        b: &B,
    ) -> stow_core::Result<()> {
        let join_table = join_table_name(A::table_name(), B::table_name());
        let query = Query::from(join_table)
            .where_and(
                Column::new(format!("{}_id", A::table_name())),
                ComparisonOp::Eq,
                Some(DBValue::U64(a.id())),
            )
            .where_and(
                Column::new(format!("{}_id", B::table_name())),
                ComparisonOp::Eq,
                Some(DBValue::U64(b.id())),
            );
        let delete = Delete::new(query)?;
        let built = self.compiler.compile_delete(&delete)?;
        let mut statement = driver.prepare(&built.sql)?;
        built.bind_presets(&mut statement)?;
        statement.execute()
    }
}

/// Two table names sorted lexicographically and joined by `_`.
fn join_table_name(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}_{b}")
    } else {
        format!("{b}_{a}")
    }
}
