use super::*;

fn table_count(name: &str) -> Statement {
    Statement::new(
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'main' AND table_name = ?",
    )
    .bind(name)
}

async fn relation_exists(db: &DuckDbBackend, name: &str) -> bool {
    let row = db.first(&table_count(name)).await.unwrap().unwrap();
    row.get_i64(0).unwrap() > 0
}

#[tokio::test]
async fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

#[tokio::test]
async fn test_new_memory_special_case() {
    let db = DuckDbBackend::new(":memory:").unwrap();
    db.run(&Statement::new("CREATE TABLE t (id INTEGER)"))
        .await
        .unwrap();
    assert!(relation_exists(&db, "t").await);
}

#[tokio::test]
async fn test_run_and_all_with_params() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.run(&Statement::new(
        "CREATE TABLE users (id INTEGER, name TEXT, note TEXT)",
    ))
    .await
    .unwrap();

    let inserted = db
        .run(
            &Statement::new("INSERT INTO users VALUES (?, ?, ?)")
                .bind(1)
                .bind("ada")
                .bind(None::<&str>),
        )
        .await
        .unwrap();
    assert_eq!(inserted, 1);

    let rows = db
        .all(&Statement::new("SELECT id, name, note FROM users WHERE id = ?").bind(1))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_i64(0).unwrap(), 1);
    assert_eq!(rows[0].get_str(1).unwrap(), "ada");
    assert_eq!(rows[0].get_opt_str(2).unwrap(), None);
}

#[tokio::test]
async fn test_first_on_empty_result() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.run(&Statement::new("CREATE TABLE t (id INTEGER)"))
        .await
        .unwrap();
    let row = db.first(&Statement::new("SELECT id FROM t")).await.unwrap();
    assert!(row.is_none());
}

#[tokio::test]
async fn test_run_error_includes_sql() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db
        .run(&Statement::new("SELEC nonsense"))
        .await
        .unwrap_err();
    match err {
        DbError::ExecutionError(msg) => assert!(msg.contains("SELEC nonsense")),
        other => panic!("expected ExecutionError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_batch_commits_all_statements() {
    let db = DuckDbBackend::in_memory().unwrap();
    let affected = db
        .batch(&[
            Statement::new("CREATE TABLE a (id INTEGER)"),
            Statement::new("INSERT INTO a VALUES (?), (?)").bind(1).bind(2),
            Statement::new("CREATE TABLE b (id INTEGER)"),
        ])
        .await
        .unwrap();
    assert_eq!(affected.len(), 3);
    assert_eq!(affected[1], 2);
    assert!(relation_exists(&db, "a").await);
    assert!(relation_exists(&db, "b").await);
}

#[tokio::test]
async fn test_batch_failure_rolls_back_everything() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db
        .batch(&[
            Statement::new("CREATE TABLE a (id INTEGER)"),
            Statement::new("INSERT INTO a VALUES (1)"),
            Statement::new("INSERT INTO missing_table VALUES (1)"),
        ])
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::BatchFailed { index: 2, .. }));
    assert!(!relation_exists(&db, "a").await);

    // The connection is usable after the rollback
    db.run(&Statement::new("CREATE TABLE a (id INTEGER)"))
        .await
        .unwrap();
    assert!(relation_exists(&db, "a").await);
}

#[tokio::test]
async fn test_empty_batch() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(db.batch(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_file_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.duckdb");
    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.run(&Statement::new("CREATE TABLE kept (id INTEGER)"))
            .await
            .unwrap();
    }
    let db = DuckDbBackend::from_path(&path).unwrap();
    assert!(relation_exists(&db, "kept").await);
}
