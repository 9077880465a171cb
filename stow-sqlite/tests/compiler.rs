use indoc::indoc;
use stow_core::{
    Aggregate, Column, ComparisonOp, DBValue, Delete, Insert, JoinKind, Junctor, Query, Select,
    SelectExpression, SqlCompiler, Update,
};
use stow_sqlite::SqliteCompiler;

#[test]
fn where_with_parenthesised_or_and_presets() {
    let query = Query::from("mountain")
        .where_and(Column::new("height"), ComparisonOp::Gt, None)
        .where_parentheses(Junctor::And, |inner| {
            inner
                .and(Column::new("location"), ComparisonOp::Eq, Some(DBValue::from("US")))
                .or(Column::new("location"), ComparisonOp::Eq, Some(DBValue::from("CA")))
        });
    let select = Select::all(query);
    let built = SqliteCompiler.compile_select(&select).unwrap();
    assert_eq!(
        built.sql,
        r#"SELECT * FROM "mountain" WHERE "height" > ? AND ( "location" = ? OR "location" = ? )"#
    );
    assert_eq!(built.presets.where_.get(&1), Some(&DBValue::from("US")));
    assert_eq!(built.presets.where_.get(&2), Some(&DBValue::from("CA")));
    assert_eq!(built.placeholders.where_, 3);
    assert_eq!(built.presets.limit, None);
}

#[test]
fn order_by_multiple_columns() {
    let query = Query::from("mountain")
        .asc("height")
        .desc("name")
        .desc("location");
    let built = SqliteCompiler.compile_select(&Select::all(query)).unwrap();
    assert_eq!(
        built.sql,
        r#"SELECT * FROM "mountain" ORDER BY "height", "name" DESC, "location" DESC"#
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
    let built = SqliteCompiler.compile_insert(&insert).unwrap();
    assert_eq!(
        built.sql,
        indoc! {r#"INSERT INTO "mountain" ("name", "location", "height") VALUES (?,?,?), (?,?,?)"#}
    );
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
    let built = SqliteCompiler.compile_select(&Select::all(query)).unwrap();
    assert_eq!(
        built.sql,
        r#"SELECT * FROM "book" LEFT OUTER JOIN "author" ON "author"."id" = "book"."author_id" ORDER BY "book"."name""#
    );
}

#[test]
fn identifier_escaping_doubles_embedded_quotes() {
    let query = Query::from(r#"weird"table"#);
    let built = SqliteCompiler.compile_select(&Select::all(query)).unwrap();
    assert_eq!(built.sql, r#"SELECT * FROM "weird""table""#);
}

#[test]
fn aggregate_select_with_distinct() {
    let query = Query::from("sighting");
    let select = Select::new(
        query,
        vec![SelectExpression::aggregate(Column::new("species"), Aggregate::Count).distinct()],
    );
    let built = SqliteCompiler.compile_select(&select).unwrap();
    assert_eq!(built.sql, r#"SELECT COUNT(DISTINCT "species") FROM "sighting""#);
}

#[test]
fn count_with_no_column_defaults_to_count_star() {
    let built = SqliteCompiler.compile_select(&Select::count(Query::from("mountain"))).unwrap();
    assert_eq!(built.sql, r#"SELECT COUNT(*) FROM "mountain""#);
}

#[test]
fn update_rejects_empty_columns_before_reaching_the_compiler() {
    assert!(Update::new(Query::from("mountain"), Vec::new()).is_err());
}

#[test]
fn delete_with_limit_and_offset() {
    let query = Query::from("mountain")
        .where_and(Column::new("height"), ComparisonOp::Lt, Some(DBValue::I64(100)))
        .limit(Some(5))
        .offset(Some(10));
    let delete = Delete::new(query).unwrap();
    let built = SqliteCompiler.compile_delete(&delete).unwrap();
    assert_eq!(
        built.sql,
        r#"DELETE FROM "mountain" WHERE "height" < ? LIMIT ? OFFSET ?"#
    );
    assert_eq!(built.presets.limit, Some(5));
    assert_eq!(built.presets.offset, Some(10));
    assert_eq!(built.limit_index(), 1);
    assert_eq!(built.offset_index(), 2);
}

#[test]
fn update_compiles_set_clause_in_order() {
    let query = Query::from("mountain").where_and(Column::new("id"), ComparisonOp::Eq, None);
    let update = Update::new(query, vec!["name".to_string(), "height".to_string()]).unwrap();
    let built = SqliteCompiler.compile_update(&update).unwrap();
    assert_eq!(
        built.sql,
        r#"UPDATE "mountain" SET "name" = ?, "height" = ? WHERE "id" = ?"#
    );
}

#[test]
fn empty_columns_insert_emits_default_values() {
    let insert = Insert::new("mountain", Vec::new(), 1).unwrap();
    let built = SqliteCompiler.compile_insert(&insert).unwrap();
    assert_eq!(built.sql, r#"INSERT INTO "mountain" DEFAULT VALUES"#);
}

#[test]
fn is_null_writes_no_placeholder() {
    let query = Query::from("mountain").where_and(Column::new("name"), ComparisonOp::IsNull, None);
    let built = SqliteCompiler.compile_select(&Select::all(query)).unwrap();
    assert_eq!(built.sql, r#"SELECT * FROM "mountain" WHERE "name" IS NULL"#);
    assert_eq!(built.placeholders.where_, 0);
}

#[test]
fn cross_join_omits_on_clause() {
    let query = Query::from("a").join(JoinKind::Cross, "b", None, None);
    let built = SqliteCompiler.compile_select(&Select::all(query)).unwrap();
    assert_eq!(built.sql, r#"SELECT * FROM "a" CROSS JOIN "b""#);
}

#[test]
fn full_outer_join_is_allowed_on_sqlite() {
    let query = Query::from("a").join(
        JoinKind::FullOuter,
        "b",
        Some(Column::qualified("b", "a_id")),
        Some(Column::qualified("a", "id")),
    );
    assert!(SqliteCompiler.compile_select(&Select::all(query)).is_ok());
}

