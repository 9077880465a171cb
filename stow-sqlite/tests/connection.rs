use stow_core::{Connection, DBValue, Row, Statement};
use stow_sqlite::SqliteConnection;

#[test]
fn insert_then_select_round_trips_values() {
    let mut conn = SqliteConnection::open_memory().unwrap();
    conn.execute("CREATE TABLE point (x INTEGER, y TEXT)").unwrap();

    let mut insert = conn.prepare("INSERT INTO point (x, y) VALUES (?, ?)").unwrap();
    insert.bind_value(0, &DBValue::I64(7)).unwrap();
    insert.bind_value(1, &DBValue::Text("north".to_string())).unwrap();
    insert.execute().unwrap();
    assert!(insert.is_empty());
    insert.close().unwrap();

    assert_eq!(conn.last_insert_id().unwrap(), DBValue::I64(1));

    let mut select = conn.prepare("SELECT x, y FROM point WHERE x = ?").unwrap();
    select.bind_value(0, &DBValue::I64(7)).unwrap();
    select.execute().unwrap();
    assert!(!select.is_empty());
    let row: Row = select.front().unwrap();
    assert_eq!(row[0], DBValue::I64(7));
    assert_eq!(row[1], DBValue::Text("north".to_string()));
    select.pop_front().unwrap();
    assert!(select.is_empty());
}

#[test]
fn null_round_trips_as_a_distinct_tag() {
    let mut conn = SqliteConnection::open_memory().unwrap();
    conn.execute("CREATE TABLE t (v TEXT)").unwrap();
    let mut insert = conn.prepare("INSERT INTO t (v) VALUES (?)").unwrap();
    insert.bind_value(0, &DBValue::Null).unwrap();
    insert.execute().unwrap();

    let mut select = conn.prepare("SELECT v FROM t").unwrap();
    select.execute().unwrap();
    let row = select.front().unwrap();
    assert_eq!(row[0], DBValue::Null);
}

#[test]
fn temporal_values_round_trip_through_the_same_iso8601_encoding() {
    use time::macros::{date, datetime, time};

    let mut conn = SqliteConnection::open_memory().unwrap();
    conn.execute("CREATE TABLE occasion (d TEXT, t TEXT, dt TEXT)").unwrap();

    let d = DBValue::Date(date!(2024 - 03 - 14));
    let t = DBValue::TimeOfDay(time!(9:30:00));
    let dt = DBValue::DateTime(datetime!(2024-03-14 9:30:00));

    let mut insert = conn.prepare("INSERT INTO occasion (d, t, dt) VALUES (?, ?, ?)").unwrap();
    insert.bind_value(0, &d).unwrap();
    insert.bind_value(1, &t).unwrap();
    insert.bind_value(2, &dt).unwrap();
    insert.execute().unwrap();

    let mut select = conn.prepare("SELECT d, t, dt FROM occasion").unwrap();
    select.execute().unwrap();
    let row = select.front().unwrap();

    // `bind_value` must have written exactly what `get_as_text` would have
    // formatted, so the stored TEXT, read back and reparsed, matches the
    // value that went in.
    assert_eq!(row[0].get_as_text().unwrap(), d.get_as_text().unwrap());
    assert_eq!(row[1].get_as_text().unwrap(), t.get_as_text().unwrap());
    assert_eq!(row[2].get_as_text().unwrap(), dt.get_as_text().unwrap());
    assert_eq!(row[0].get_as_date().unwrap(), date!(2024 - 03 - 14));
    assert_eq!(row[1].get_as_time().unwrap(), time!(9:30:00));
    assert_eq!(row[2].get_as_datetime().unwrap(), datetime!(2024-03-14 9:30:00));
}

#[test]
fn set_auto_commit_is_rejected() {
    let mut conn = SqliteConnection::open_memory().unwrap();
    assert!(conn.set_auto_commit(false).is_err());
}

#[test]
fn transaction_commit_persists_rows() {
    let mut conn = SqliteConnection::open_memory().unwrap();
    conn.execute("CREATE TABLE t (v INTEGER)").unwrap();
    conn.transaction_start().unwrap();
    conn.execute("INSERT INTO t (v) VALUES (1)").unwrap();
    conn.transaction_commit().unwrap();

    let mut select = conn.prepare("SELECT COUNT(*) FROM t").unwrap();
    select.execute().unwrap();
    let row = select.front().unwrap();
    assert_eq!(row[0], DBValue::I64(1));
}
