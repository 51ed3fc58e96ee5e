#![cfg(feature = "mysql")]

//! Runs against a live server only when `SQL_CRUD_MYSQL_HOST` is set.
//! Also reads `SQL_CRUD_MYSQL_USER`, `SQL_CRUD_MYSQL_PASSWORD`, `SQL_CRUD_MYSQL_DB`
//! and `SQL_CRUD_MYSQL_PORT`.

use std::env;

use sql_crud::prelude::*;

fn mysql_options() -> Option<MysqlOptions> {
    let host = env::var("SQL_CRUD_MYSQL_HOST").ok()?;
    let user = env::var("SQL_CRUD_MYSQL_USER").unwrap_or_else(|_| "root".to_string());
    let password = env::var("SQL_CRUD_MYSQL_PASSWORD").unwrap_or_default();
    let database = env::var("SQL_CRUD_MYSQL_DB").unwrap_or_else(|_| "testing".to_string());
    let port = env::var("SQL_CRUD_MYSQL_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3306);
    Some(MysqlOptions::new(host, user, password, database).with_port(port))
}

#[tokio::test]
async fn mysql_crud_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let Some(opts) = mysql_options() else {
        eprintln!("SQL_CRUD_MYSQL_HOST not set; skipping");
        return Ok(());
    };
    let mut conn = CrudConnection::new_mysql(opts).await?;
    assert_eq!(conn.database_type(), DatabaseType::Mysql);

    conn.execute_batch(
        "DROP TABLE IF EXISTS sql_crud_people;
         CREATE TABLE sql_crud_people (
             id INT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
             name VARCHAR(64) NOT NULL,
             age INT NULL,
             score DOUBLE NULL
         ) ENGINE=InnoDB;",
    )
    .await?;

    let first = conn
        .create(
            "sql_crud_people",
            &RowData::new().set("name", "ann").set("age", 30).set("score", 2.5),
        )
        .await?;
    let second = conn
        .create("sql_crud_people", &RowData::new().set("name", "o'brien").set("age", 41))
        .await?;
    assert!(second > first);

    let found = conn
        .find(
            "sql_crud_people",
            &Filter::new().eq("name", "o'brien"),
            &Columns::All,
            &OrderBy::new(),
        )
        .await?
        .expect("inserted row");
    assert_eq!(found.get("age"), Some(&RowValues::Int(41)));
    assert_eq!(found.get("score"), Some(&RowValues::Null));

    let raw = conn
        .raw_query("SELECT age, score FROM sql_crud_people ORDER BY id LIMIT 1")
        .await?;
    assert_eq!(raw.results[0].get("age"), Some(&RowValues::Int(30)));
    assert_eq!(raw.results[0].get("score").and_then(RowValues::as_float), Some(2.5));

    // unchanged rows are not counted
    let changed = conn
        .update(
            "sql_crud_people",
            &Filter::new().gte("age", 0),
            &RowData::new().set("age", 30),
        )
        .await?;
    assert_eq!(changed, 1);

    conn.begin_transaction().await?;
    conn.delete("sql_crud_people", &Filter::new().eq("name", "ann")).await?;
    conn.rollback().await?;
    assert_eq!(conn.count("sql_crud_people", &Filter::new()).await?, 2);

    let page = conn
        .search(
            "sql_crud_people",
            &Filter::new(),
            2,
            1,
            &Columns::list(["name"]),
            &OrderBy::new().asc("id"),
        )
        .await?;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].get("name").and_then(RowValues::as_text), Some("o'brien"));

    conn.execute_batch("DROP TABLE sql_crud_people;").await?;
    conn.close().await?;
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_a_connection_failure() {
    if env::var("SQL_CRUD_MYSQL_HOST").is_err() {
        return;
    }
    let err = CrudConnection::mysql_builder("127.0.0.1", "nobody", "wrong", "nowhere")
        .port(1)
        .connect()
        .await
        .unwrap_err();
    assert_eq!(err.code(), 500);
}
