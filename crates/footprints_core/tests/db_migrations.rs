use footprints_core::db::migrations::{current_version, latest_version};
use footprints_core::db::{open_db, open_db_in_memory, DbError, UNICODE_LOWER};
use rusqlite::Connection;

const SUBMISSION_ID: &str = "00000000-0000-4000-8000-000000000001";

fn sqlite_object(conn: &Connection, kind: &str, name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2);",
        [kind, name],
        |row| row.get(0),
    )
    .unwrap()
}

fn insert_with_status(conn: &Connection, status: &str) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO submissions (id, message, emotion, location, status, created_at)
         VALUES (?1, 'm', 'fear', 'Zion', ?2, 1);",
        [SUBMISSION_ID, status],
    )
}

#[test]
fn fresh_store_has_submission_table_and_moderation_index() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_version(&conn).unwrap(), latest_version());
    assert!(sqlite_object(&conn, "table", "submissions"));
    assert!(sqlite_object(&conn, "index", "idx_submissions_status_created_at"));
}

#[test]
fn reopening_a_store_keeps_rows_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("footprints.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        insert_with_status(&conn, "approved").unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(current_version(&conn).unwrap(), latest_version());
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM submissions;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn store_from_a_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .pragma_update(None, "user_version", 999)
        .unwrap();

    let err = open_db(&path).unwrap_err();
    let DbError::SchemaTooNew { found, supported } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(*found, 999);
    assert_eq!(*supported, latest_version());
    assert!(err.to_string().contains("schema v999"));
}

#[test]
fn status_check_accepts_only_the_three_review_states() {
    let conn = open_db_in_memory().unwrap();

    assert!(insert_with_status(&conn, "archived").is_err());
    assert!(insert_with_status(&conn, "pending").is_ok());
}

#[test]
fn opened_connections_carry_the_unicode_lower_helper() {
    let conn = open_db_in_memory().unwrap();

    let folded: String = conn
        .query_row(&format!("SELECT {UNICODE_LOWER}('MÜNCHEN');"), [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(folded, "münchen");

    let builtin: String = conn
        .query_row("SELECT lower('MÜNCHEN');", [], |row| row.get(0))
        .unwrap();
    assert_ne!(builtin, folded);
}
