#![cfg(feature = "sqlite")]

use sql_crud::prelude::*;
use tracing_subscriber::EnvFilter;

// RUST_LOG=sql_crud=trace shows every statement with its values inlined.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn seeded() -> Result<CrudConnection, SqlCrudError> {
    init_tracing();
    let mut conn = CrudConnection::sqlite_builder(":memory:").connect().await?;
    conn.execute_batch(
        "CREATE TABLE users (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             name TEXT NOT NULL,
             age INTEGER,
             score REAL
         );",
    )
    .await?;
    for (name, age) in [("ann", 17), ("bob", 25), ("cid", 31), ("dee", 44), ("eve", 52)] {
        conn.create(
            "users",
            &RowData::new().set("name", name).set("age", age).set("score", 1.5),
        )
        .await?;
    }
    Ok(conn)
}

#[tokio::test]
async fn create_then_find_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = seeded().await?;
    let id = conn
        .create(
            "users",
            &RowData::new().set("name", "zed").set("age", 9).set("score", RowValues::Null),
        )
        .await?;
    assert_eq!(id, 6);

    let found = conn
        .find(
            "users",
            &Filter::new().eq("id", id),
            &Columns::All,
            &OrderBy::new(),
        )
        .await?
        .expect("row exists");
    assert_eq!(found.get("name").and_then(RowValues::as_text), Some("zed"));
    assert_eq!(found.get("age").and_then(RowValues::as_int), Some(&9));
    assert_eq!(found.get("score"), Some(&RowValues::Null));

    let missing = conn
        .find("users", &Filter::new().eq("id", 999), &Columns::All, &OrderBy::new())
        .await?;
    assert!(missing.is_none());
    Ok(())
}

fn names(rows: &[Record]) -> Vec<String> {
    rows.iter()
        .filter_map(|r| r.get("name").and_then(RowValues::as_text).map(str::to_owned))
        .collect()
}

#[tokio::test]
async fn search_orders_and_paginates() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = seeded().await?;
    let order = OrderBy::new().desc("age");
    let columns = Columns::list(["name"]);

    let page1 = conn.search("users", &Filter::new(), 1, 2, &columns, &order).await?;
    let page3 = conn.search("users", &Filter::new(), 3, 2, &columns, &order).await?;
    assert_eq!(names(&page1), ["eve", "dee"]);
    assert_eq!(names(&page3), ["ann"]);
    assert_eq!(page1[0].len(), 1);

    let everyone = conn.search("users", &Filter::new(), 0, 2, &Columns::All, &order).await?;
    assert_eq!(everyone.len(), 5);
    Ok(())
}

#[tokio::test]
async fn conditions_filter_rows() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = seeded().await?;
    assert_eq!(conn.count("users", &Filter::new()).await?, 5);
    assert_eq!(conn.count("users", &Filter::new().gte("age", 18)).await?, 4);
    assert_eq!(conn.count("users", &Filter::new().between("age", 25, 44)).await?, 3);
    assert_eq!(conn.count("users", &Filter::new().like("name", "%e%")).await?, 2);
    assert_eq!(conn.count("users", &Filter::new().ne("name", "bob")).await?, 4);
    assert_eq!(
        conn.count("users", &Filter::new().in_list("name", ["ann", "eve", "nobody"]))
            .await?,
        2
    );
    assert_eq!(
        conn.count("users", &Filter::new().in_list("name", Vec::<String>::new()))
            .await?,
        0
    );
    // A null operand drops the entry instead of matching nothing.
    assert_eq!(conn.count("users", &Filter::new().eq("age", RowValues::Null)).await?, 5);
    Ok(())
}

#[tokio::test]
async fn generated_ids_belong_to_their_own_statement() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = seeded().await?;
    conn.execute_batch("CREATE TABLE kv (k TEXT PRIMARY KEY, v TEXT) WITHOUT ROWID;")
        .await?;

    // a previous insert on this session must not leak into keyless tables
    let id = conn.create("kv", &RowData::new().set("k", "a").set("v", "1")).await?;
    assert_eq!(id, 0);

    let outcome = conn
        .execute(&build_update(
            "users",
            &Filter::new().eq("name", "bob"),
            &RowData::new().set("age", 26),
        ))
        .await?;
    assert_eq!(outcome.rows_affected, 1);
    assert_eq!(outcome.last_insert_id, None);

    let outcome = conn
        .execute(&build_delete("users", &Filter::new().eq("name", "ann")))
        .await?;
    assert_eq!(outcome.last_insert_id, None);

    let raw = conn.raw_query("UPDATE users SET score = 0").await?;
    assert_eq!(raw.last_insert_id, None);
    let raw = conn
        .raw_query("INSERT INTO users (name, age) VALUES ('fay', 60)")
        .await?;
    assert_eq!(raw.last_insert_id, Some(6));
    Ok(())
}

#[tokio::test]
async fn update_and_delete_report_counts() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = seeded().await?;
    let changed = conn
        .update("users", &Filter::new().lt("age", 30), &RowData::new().set("score", 9.0))
        .await?;
    assert_eq!(changed, 2);

    let deleted = conn.delete("users", &Filter::new().gt("age", 40)).await?;
    assert_eq!(deleted, 2);
    assert_eq!(conn.count("users", &Filter::new()).await?, 3);
    Ok(())
}

#[tokio::test]
async fn unsafe_inputs_are_refused() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = seeded().await?;

    let err = conn.delete("users", &Filter::new()).await.unwrap_err();
    assert_eq!(err.code(), 501);
    let err = conn
        .delete("users", &Filter::new().eq("id", RowValues::Null))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SqlError);
    let err = conn.create("users", &RowData::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SqlError);
    let err = conn
        .update("users", &Filter::new(), &RowData::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SqlError);
    let err = conn.count("", &Filter::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SqlError);

    assert_eq!(conn.count("users", &Filter::new()).await?, 5);
    Ok(())
}

#[tokio::test]
async fn injection_attempts_are_inert() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = seeded().await?;
    let evil = "x'; DROP TABLE users; --";
    let id = conn
        .create("users", &RowData::new().set("name", evil).set("age", 1))
        .await?;
    let hits = conn
        .search(
            "users",
            &Filter::new().eq("name", evil),
            0,
            0,
            &Columns::All,
            &OrderBy::new(),
        )
        .await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].get("id"), Some(&RowValues::from(id)));
    assert_eq!(conn.count("users", &Filter::new().eq("name", "' OR '1'='1")).await?, 0);
    assert_eq!(conn.count("users", &Filter::new()).await?, 6);
    Ok(())
}

#[tokio::test]
async fn raw_query_and_query_builder() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = seeded().await?;

    let rows = conn.raw_query("SELECT name FROM users WHERE age > 40 ORDER BY id").await?;
    assert_eq!(rows.results.len(), 2);
    assert_eq!(rows.results[0].get("name").and_then(RowValues::as_text), Some("dee"));

    let outcome = conn.raw_query("UPDATE users SET age = age + 1").await?;
    assert!(outcome.results.is_empty());
    assert_eq!(outcome.rows_affected, 5);

    let err = conn.raw_query("SELEKT nonsense").await.unwrap_err();
    assert_eq!(err.code(), 501);

    let params = [RowValues::Int(30)];
    let rs = conn
        .query("SELECT count(*) AS n FROM users WHERE age > ?")
        .params(&params)
        .select()
        .await?;
    assert_eq!(rs.results[0].get("n"), Some(&RowValues::Int(3)));

    let dml = conn
        .query("DELETE FROM users WHERE name = ?")
        .params_owned(vec!["ann".into()])
        .dml()
        .await?;
    assert_eq!(dml.rows_affected, 1);

    let stmt = build_count("users", &Filter::new());
    let rs = conn.fetch(&stmt).await?;
    assert_eq!(rs.results[0].get("count"), Some(&RowValues::Int(4)));

    conn.close().await?;
    Ok(())
}

#[tokio::test]
async fn file_database_persists_between_sessions() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("crud.db");
    let path = path.to_string_lossy().into_owned();

    let mut conn = CrudConnection::new_sqlite(SqliteOptions::new(path.clone())).await?;
    conn.execute_batch("CREATE TABLE kv (k TEXT PRIMARY KEY, v TEXT);").await?;
    conn.create("kv", &RowData::new().set("k", "a").set("v", "1")).await?;
    conn.close().await?;

    let mut conn = CrudConnection::sqlite_builder(path).connect().await?;
    assert_eq!(conn.database_type(), DatabaseType::Sqlite);
    assert_eq!(conn.count("kv", &Filter::new().eq("k", "a")).await?, 1);
    conn.close().await?;
    Ok(())
}

#[tokio::test]
async fn unopenable_path_is_a_connection_failure() {
    let err = CrudConnection::sqlite_builder("/nonexistent-dir/sub/db.sqlite")
        .connect()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConnectionFail);
    assert_eq!(err.code(), 500);
}
