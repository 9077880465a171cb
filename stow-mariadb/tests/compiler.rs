use indoc::indoc;
use stow_core::{Column, ComparisonOp, DBValue, Insert, JoinKind, Query, Select, SqlCompiler};
use stow_mariadb::MariaDbCompiler;

#[test]
fn identifiers_are_backtick_quoted() {
    let query = Query::from("mountain").where_and(Column::new("height"), ComparisonOp::Gt, None);
    let built = MariaDbCompiler.compile_select(&Select::all(query)).unwrap();
    assert_eq!(built.sql, "SELECT * FROM `mountain` WHERE `height` > ?");
}

#[test]
fn identifier_escaping_doubles_embedded_backticks() {
    let query = Query::from("weird`table");
    let built = MariaDbCompiler.compile_select(&Select::all(query)).unwrap();
    assert_eq!(built.sql, "SELECT * FROM `weird``table`");
}

#[test]
fn full_outer_join_is_rejected() {
    let query = Query::from("a").join(
        JoinKind::FullOuter,
        "b",
        Some(Column::qualified("b", "a_id")),
        Some(Column::qualified("a", "id")),
    );
    assert!(MariaDbCompiler.compile_select(&Select::all(query)).is_err());
}

#[test]
fn left_outer_join_orders_by_qualified_column() {
    let query = Query::from("book").join(
        JoinKind::LeftOuter,
        "author",
        Some(Column::qualified("author", "id")),
        Some(Column::qualified("book", "author_id")),
    );
    let query = query.asc(Column::qualified("book", "name"));
    let built = MariaDbCompiler.compile_select(&Select::all(query)).unwrap();
    assert_eq!(
        built.sql,
        "SELECT * FROM `book` LEFT OUTER JOIN `author` ON `author`.`id` = `book`.`author_id` ORDER BY `book`.`name`"
    );
}

#[test]
fn multi_row_insert() {
    let insert = Insert::new(
        "mountain",
        vec!["name".to_string(), "location".to_string(), "height".to_string()],
        1,
    )
    .unwrap()
    .times(2)
    .unwrap();
    let built = MariaDbCompiler.compile_insert(&insert).unwrap();
    assert_eq!(
        built.sql,
        indoc! {"INSERT INTO `mountain` (`name`, `location`, `height`) VALUES (?,?,?), (?,?,?)"}
    );
}

#[test]
fn where_with_preset_value() {
    let query = Query::from("mountain").where_and(
        Column::new("location"),
        ComparisonOp::Eq,
        Some(DBValue::from("US")),
    );
    let built = MariaDbCompiler.compile_select(&Select::all(query)).unwrap();
    assert_eq!(built.sql, "SELECT * FROM `mountain` WHERE `location` = ?");
    assert_eq!(built.presets.where_.get(&0), Some(&DBValue::from("US")));
}
