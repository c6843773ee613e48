#![cfg(feature = "sqlite")]

use knex_sql::prelude::*;

const DDL: &str = "
    CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        age INTEGER,
        score REAL,
        active BOOLEAN,
        avatar BLOB
    );
";

async fn seeded() -> Result<Database, KnexError> {
    let db = Database::connect_sqlite(":memory:").await?;
    db.execute_batch(DDL).await?;
    for (name, age) in [("alice", 30), ("bob", 17), ("carol", 41), ("dave", 25)] {
        db.table("users")
            .insert([("name", Value::from(name)), ("age", Value::from(age))])
            .await?;
    }
    Ok(db)
}

fn names(rows: &[Record]) -> Vec<&str> {
    rows.iter()
        .filter_map(|r| r.get("name").and_then(Value::as_text))
        .collect()
}

#[tokio::test]
async fn insert_then_first_returns_the_same_fields() -> Result<(), KnexError> {
    let db = Database::connect_sqlite(":memory:").await?;
    assert_eq!(db.db_type(), DatabaseType::Sqlite);
    db.execute_batch(DDL).await?;

    let res = db
        .table("users")
        .insert([
            ("name", Value::from("alice")),
            ("age", Value::from(30)),
            ("score", Value::from(9.5)),
            ("active", Value::from(true)),
        ])
        .await?;
    assert_eq!(res.rows_affected, 1);
    assert_eq!(res.last_insert_id, Some(1));

    let rec = db
        .table("users")
        .select(["name", "age", "score", "active"])
        .where_equal([("name", "alice")])
        .first()
        .await?;
    assert_eq!(rec.column_names.as_slice(), ["name", "age", "score", "active"]);
    assert_eq!(rec.get("name"), Some(&Value::Text("alice".into())));
    assert_eq!(rec.get("age"), Some(&Value::Int(30)));
    assert_eq!(rec.get("score").and_then(Value::as_float), Some(9.5));
    assert_eq!(rec.get("active").and_then(Value::as_bool), Some(true));

    db.close().await
}

#[tokio::test]
async fn fetch_all_honours_order_and_pagination() -> Result<(), KnexError> {
    let db = seeded().await?;

    let adults = db
        .table("users")
        .where_condition("age", ">", 18)
        .order_by("age", "ASC")
        .get()
        .await?;
    assert_eq!(names(&adults), ["dave", "alice", "carol"]);

    let page = db
        .table("users")
        .order_by("age", "DESC")
        .limit(2)
        .offset(1)
        .fetch_all()
        .await?;
    assert_eq!(names(&page), ["alice", "dave"]);

    // OFFSET without LIMIT is rendered as asked; SQLite rejects it
    let err = db.table("users").offset(3).fetch_all().await.unwrap_err();
    assert!(matches!(err, KnexError::SqliteError(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn update_with_and_without_where() -> Result<(), KnexError> {
    let db = seeded().await?;

    let res = db
        .table("users")
        .where_condition("age", "<", 18)
        .update([("active", false)])
        .await?;
    assert_eq!(res.rows_affected, 1);
    assert_eq!(res.last_insert_id, None);

    let res = db.table("users").update([("score", 1.0)]).await?;
    assert_eq!(res.rows_affected, 4);

    let bob = db
        .table("users")
        .where_equal([("name", "bob")])
        .first()
        .await?;
    assert_eq!(bob.get("active").and_then(Value::as_bool), Some(false));
    assert_eq!(bob.get("score").and_then(Value::as_float), Some(1.0));
    Ok(())
}

#[tokio::test]
async fn delete_with_where_then_everything() -> Result<(), KnexError> {
    let db = seeded().await?;

    let res = db
        .table("users")
        .where_equal([("name", "bob")])
        .delete()
        .await?;
    assert_eq!(res.rows_affected, 1);
    assert_eq!(db.table("users").get().await?.len(), 3);

    let res = db.table("users").delete().await?;
    assert_eq!(res.rows_affected, 3);

    let err = db.table("users").first().await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn guarded_writes_leave_the_table_alone() -> Result<(), KnexError> {
    let db = seeded().await?;

    let err = db.table("users").require_where().delete().await.unwrap_err();
    assert!(matches!(err, KnexError::UnguardedWrite(_)));
    let err = db
        .table("users")
        .require_where()
        .update([("age", 0)])
        .await
        .unwrap_err();
    assert!(matches!(err, KnexError::UnguardedWrite(_)));

    assert_eq!(db.table("users").where_equal([("age", 0)]).get().await?.len(), 0);
    assert_eq!(db.table("users").get().await?.len(), 4);
    Ok(())
}

#[tokio::test]
async fn utf8_blobs_come_back_as_text() -> Result<(), KnexError> {
    let db = Database::connect_sqlite(":memory:").await?;
    db.execute_batch(DDL).await?;

    let png_magic = vec![0x89_u8, 0x50, 0x4e, 0x47];
    db.table("users")
        .insert([
            ("name", Value::from("erin")),
            ("avatar", Value::from(b"smiley".to_vec())),
        ])
        .await?;
    db.table("users")
        .insert([
            ("name", Value::from("frank")),
            ("avatar", Value::from(png_magic.clone())),
        ])
        .await?;

    let rows = db.table("users").order_by("id", "ASC").get().await?;
    assert_eq!(rows[0].get("avatar"), Some(&Value::Text("smiley".into())));
    assert_eq!(rows[1].get("avatar"), Some(&Value::Blob(png_magic)));
    assert_eq!(rows[0].get("age"), Some(&Value::Null));
    Ok(())
}

#[tokio::test]
async fn driver_errors_surface_unchanged() -> Result<(), KnexError> {
    let db = seeded().await?;
    let err = db
        .table("no_such_table")
        .insert([("name", "ghost")])
        .await
        .unwrap_err();
    assert!(matches!(err, KnexError::SqliteError(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn file_backed_database_survives_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("knex.db");
    let path = path.to_str().ok_or("non-utf8 temp path")?;

    let db = Database::connect_sqlite(path).await?;
    db.execute_batch(DDL).await?;
    db.table("users").insert([("name", "gina")]).await?;
    db.close().await?;

    let db = Database::connect_sqlite(path).await?;
    let gina = db.table("users").first().await?;
    assert_eq!(gina.get("name").and_then(Value::as_text), Some("gina"));
    db.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn raw_connection_sees_builder_writes() -> Result<(), KnexError> {
    let db = seeded().await?;
    let Database::Sqlite(conn) = &db else {
        panic!("expected a SQLite handle");
    };
    assert_eq!(conn.path(), ":memory:");

    let count = conn
        .with_connection(|c| {
            let n: i64 = c.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(n)
        })
        .await?;
    assert_eq!(count, 4);
    Ok(())
}

#[tokio::test]
async fn close_refuses_while_a_clone_is_alive() -> Result<(), KnexError> {
    let db = seeded().await?;
    let other = db.clone();

    let err = db.close().await.unwrap_err();
    assert!(err.is_connection_error(), "got {err:?}");

    // the surviving clone still owns a working connection
    assert_eq!(other.table("users").get().await?.len(), 4);
    other.close().await
}
