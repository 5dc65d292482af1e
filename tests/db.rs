use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::BigInt;

mod common;

#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_in_memory_connection.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_migrations_create_catalogue_tables() {
    let test_db = common::TestDb::new("test_migrations.db");
    let mut conn = test_db.pool().get().unwrap();

    let tables = sql_query(
        "SELECT COUNT(*) AS count FROM sqlite_master \
         WHERE type = 'table' AND name IN ('items', 'users', 'promotions')",
    )
    .get_result::<Count>(&mut conn)
    .unwrap();
    assert_eq!(tables.count, 3);
}
