use stow::{Connection, DBValue, Entity, EntityManager, Row, SqliteCompiler, SqliteConnection};
use stow_core::{Aggregate, ComparisonOp};

struct Person {
    id: u64,
    name: String,
    age: u64,
}

impl Entity for Person {
    fn table_name() -> &'static str {
        "person"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "age"]
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn from_row(row: &Row) -> stow_core::Result<Self> {
        Ok(Self {
            id: row[0].get_as_u64()?,
            name: row[1].get_text()?.to_string(),
            age: row[2].get_as_u64()?,
        })
    }

    fn values(&self) -> Vec<DBValue> {
        vec![DBValue::U64(self.id), DBValue::from(self.name.clone()), DBValue::U64(self.age)]
    }
}

type PersonManager = EntityManager<SqliteConnection, SqliteCompiler>;

fn open_with_people() -> (SqliteConnection, PersonManager) {
    let mut conn = SqliteConnection::open_memory().unwrap();
    conn.execute("CREATE TABLE person (id INTEGER PRIMARY KEY, name TEXT, age INTEGER)")
        .unwrap();
    let manager = PersonManager::new();
    for (name, age) in [("Ann", 72u64), ("Bo", 40), ("Cid", 65)] {
        let mut person = Person { id: 0, name: name.to_string(), age };
        manager.save(&mut conn, &mut person).unwrap();
    }
    (conn, manager)
}

#[test]
fn find_with_filter_and_order_matches_scenario() {
    let (mut conn, manager) = open_with_people();

    let found = manager
        .find::<Person>()
        .where_("age", ComparisonOp::Ge, Some(DBValue::U64(60)))
        .asc("age")
        .select_via(&mut conn)
        .unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].name, "Cid");
    assert_eq!(found[1].name, "Ann");
}

#[test]
fn entity_round_trip_preserves_fields_and_assigns_id() {
    let mut conn = SqliteConnection::open_memory().unwrap();
    conn.execute("CREATE TABLE person (id INTEGER PRIMARY KEY, name TEXT, age INTEGER)")
        .unwrap();
    let manager = PersonManager::new();

    let person = Person { id: 0, name: "Dee".to_string(), age: 30 };
    let id = manager.store(&mut conn, &person).unwrap();
    assert_ne!(id, 0);

    let fetched = manager.get::<Person>(&mut conn, id).unwrap().unwrap();
    assert_eq!(fetched.id, id);
    assert_eq!(fetched.name, "Dee");
    assert_eq!(fetched.age, 30);
}

#[test]
fn update_changes_only_the_targeted_row_and_lands_the_right_values() {
    let (mut conn, manager) = open_with_people();

    let mut ann = manager
        .find::<Person>()
        .where_("name", ComparisonOp::Eq, Some(DBValue::from("Ann".to_string())))
        .select_via(&mut conn)
        .unwrap()
        .remove(0);
    ann.age = 73;
    manager.update(&mut conn, &ann).unwrap();

    let refetched = manager.get::<Person>(&mut conn, ann.id).unwrap().unwrap();
    assert_eq!(refetched.name, "Ann");
    assert_eq!(refetched.age, 73);

    // Every other row must be untouched: in particular the SET-clause
    // placeholders must not have collided with the WHERE placeholder.
    let bo = manager
        .find::<Person>()
        .where_("name", ComparisonOp::Eq, Some(DBValue::from("Bo".to_string())))
        .select_via(&mut conn)
        .unwrap()
        .remove(0);
    assert_eq!(bo.age, 40);
}

struct Thing {
    id: u64,
    name: String,
}

impl Entity for Thing {
    fn table_name() -> &'static str {
        "thing"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn from_row(row: &Row) -> stow_core::Result<Self> {
        Ok(Self { id: row[0].get_as_u64()?, name: row[1].get_text()?.to_string() })
    }

    fn values(&self) -> Vec<DBValue> {
        vec![DBValue::U64(self.id), DBValue::from(self.name.clone())]
    }
}

struct Tag {
    id: u64,
    name: String,
}

impl Entity for Tag {
    fn table_name() -> &'static str {
        "tag"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn from_row(row: &Row) -> stow_core::Result<Self> {
        Ok(Self { id: row[0].get_as_u64()?, name: row[1].get_text()?.to_string() })
    }

    fn values(&self) -> Vec<DBValue> {
        vec![DBValue::U64(self.id), DBValue::from(self.name.clone())]
    }
}

#[test]
fn many_to_many_assign_and_unassign_update_counts() {
    let mut conn = SqliteConnection::open_memory().unwrap();
    conn.execute("CREATE TABLE thing (id INTEGER PRIMARY KEY, name TEXT)").unwrap();
    conn.execute("CREATE TABLE tag (id INTEGER PRIMARY KEY, name TEXT)").unwrap();
    conn.execute("CREATE TABLE tag_thing (tag_id INTEGER, thing_id INTEGER)").unwrap();
    let manager: EntityManager<SqliteConnection, SqliteCompiler> = EntityManager::new();

    let mut fruit = Thing { id: 0, name: "fruit".to_string() };
    let mut apple = Tag { id: 0, name: "apple".to_string() };
    let mut red = Thing { id: 0, name: "red".to_string() };
    manager.save(&mut conn, &mut fruit).unwrap();
    manager.save(&mut conn, &mut apple).unwrap();
    manager.save(&mut conn, &mut red).unwrap();

    manager.many_to_many_assign(&mut conn, &fruit, &apple).unwrap();
    manager.many_to_many_assign(&mut conn, &red, &apple).unwrap();

    assert_eq!(
        manager
            .many_to_many::<Tag, Thing>(&fruit)
            .count_via(&mut conn)
            .unwrap(),
        1
    );
    assert_eq!(
        manager
            .many_to_many::<Thing, Tag>(&apple)
            .count_via(&mut conn)
            .unwrap(),
        2
    );

    manager.many_to_many_unassign(&mut conn, &red, &apple).unwrap();
    assert_eq!(
        manager
            .many_to_many::<Thing, Tag>(&apple)
            .count_via(&mut conn)
            .unwrap(),
        1
    );
}

#[test]
fn aggregate_via_runs_the_compiled_aggregate() {
    let (mut conn, manager) = open_with_people();
    let max_age = manager
        .find::<Person>()
        .aggregate_via(&mut conn, Aggregate::Max, "age")
        .unwrap();
    assert_eq!(max_age, DBValue::I64(72));
}

#[test]
fn delete_via_removes_matching_rows() {
    let (mut conn, manager) = open_with_people();
    manager
        .find::<Person>()
        .where_("age", ComparisonOp::Lt, Some(DBValue::U64(50)))
        .delete_via(&mut conn)
        .unwrap();
    let remaining = manager.find::<Person>().asc("age").select_via(&mut conn).unwrap();
    assert_eq!(remaining.len(), 2);
}

