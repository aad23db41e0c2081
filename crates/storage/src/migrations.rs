//! Database migrations
//!
//! Each table lives in its own file and tracks its own `user_version`.

use physlog_core::{MEASUREMENT_TABLE, REGISTRY_TABLE};
use rusqlite::Connection;

pub const REGISTRY_SCHEMA_VERSION: i32 = 1;
pub const MEASUREMENT_SCHEMA_VERSION: i32 = 1;

const REGISTRY_V1: &str = r"
    CREATE TABLE IF NOT EXISTS id_table (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        local_name TEXT NOT NULL,
        external_name TEXT NOT NULL,
        identifier INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_id_table_local_name ON id_table(local_name);
";

/// Rows of an `id_table(名前, Name, ID)` file, oldest first.
const REGISTRY_LEGACY_COPY: &str = r#"
    INSERT INTO id_table (local_name, external_name, identifier)
    SELECT COALESCE("名前", ''), COALESCE("Name", ''), COALESCE("ID", '')
      FROM id_table_legacy ORDER BY rowid
"#;

const MEASUREMENT_V1: &str = r"
    CREATE TABLE IF NOT EXISTS physical_rawdata (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        subject_external_name TEXT NOT NULL,
        date TEXT NOT NULL,
        identifier INTEGER NOT NULL,
        composite_label TEXT NOT NULL,
        position TEXT NOT NULL,
        test_item TEXT NOT NULL,
        result TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_physical_rawdata_identifier
        ON physical_rawdata(identifier);
";

/// Rows of a `physical_rawdata(Name_1, date, ID, Name_2, Position,
/// [Test Item], Result)` file, oldest first.
const MEASUREMENT_LEGACY_COPY: &str = r#"
    INSERT INTO physical_rawdata
        (subject_external_name, date, identifier, composite_label, position, test_item, result)
    SELECT COALESCE("Name_1", ''), COALESCE("date", ''), COALESCE("ID", ''),
           COALESCE("Name_2", ''), COALESCE("Position", ''), COALESCE("Test Item", ''),
           COALESCE("Result", '')
      FROM physical_rawdata_legacy ORDER BY rowid
"#;

fn user_version(conn: &Connection) -> Result<i32, rusqlite::Error> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// True when `table` exists but was created without the `seq` counter,
/// i.e. by the earlier dashboard.
fn is_legacy_table(conn: &Connection, table: &str) -> Result<bool, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info(\"{table}\")"))?;
    let columns =
        stmt.query_map([], |row| row.get::<_, String>(1))?.collect::<Result<Vec<_>, _>>()?;
    Ok(!columns.is_empty() && !columns.iter().any(|c| c == "seq"))
}

/// Create `table` from `schema`. A legacy table of the same name is moved
/// aside, its rows copied over in storage order, then dropped.
fn create_or_import(
    conn: &Connection,
    table: &str,
    schema: &str,
    legacy_copy: &str,
) -> Result<(), rusqlite::Error> {
    let tx = conn.unchecked_transaction()?;
    let legacy = is_legacy_table(&tx, table)?;
    if legacy {
        tracing::info!(table, "Found table without seq column, importing legacy rows");
        tx.execute_batch(&format!("ALTER TABLE \"{table}\" RENAME TO \"{table}_legacy\";"))?;
    }

    tx.execute_batch(schema)?;

    if legacy {
        let copied = tx.execute(legacy_copy, [])?;
        tx.execute_batch(&format!("DROP TABLE \"{table}_legacy\";"))?;
        tracing::info!(table, rows = copied, "Imported legacy rows");
    }
    tx.commit()
}

pub fn run_registry_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version = user_version(conn)?;

    tracing::info!(
        table = REGISTRY_TABLE,
        "Database schema version: {} (target: {})",
        current_version,
        REGISTRY_SCHEMA_VERSION
    );

    if current_version < 1 {
        tracing::info!("Running migration v1: id_table");
        create_or_import(conn, REGISTRY_TABLE, REGISTRY_V1, REGISTRY_LEGACY_COPY)?;
    }

    conn.pragma_update(None, "user_version", REGISTRY_SCHEMA_VERSION)?;
    Ok(())
}

pub fn run_measurement_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version = user_version(conn)?;

    tracing::info!(
        table = MEASUREMENT_TABLE,
        "Database schema version: {} (target: {})",
        current_version,
        MEASUREMENT_SCHEMA_VERSION
    );

    if current_version < 1 {
        tracing::info!("Running migration v1: physical_rawdata");
        create_or_import(conn, MEASUREMENT_TABLE, MEASUREMENT_V1, MEASUREMENT_LEGACY_COPY)?;
    }

    conn.pragma_update(None, "user_version", MEASUREMENT_SCHEMA_VERSION)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let registry = Connection::open_in_memory().unwrap();
        run_registry_migrations(&registry).unwrap();
        run_registry_migrations(&registry).unwrap();
        assert_eq!(user_version(&registry).unwrap(), REGISTRY_SCHEMA_VERSION);
        assert_eq!(table_count(&registry, REGISTRY_TABLE), 1);

        let measurements = Connection::open_in_memory().unwrap();
        run_measurement_migrations(&measurements).unwrap();
        run_measurement_migrations(&measurements).unwrap();
        assert_eq!(user_version(&measurements).unwrap(), MEASUREMENT_SCHEMA_VERSION);
        assert_eq!(table_count(&measurements, MEASUREMENT_TABLE), 1);
    }

    #[test]
    fn legacy_registry_rows_are_imported_in_order() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE id_table ("名前" TEXT, "Name" TEXT, "ID" TEXT);
            INSERT INTO id_table VALUES ('太郎', 'Taro S', '12');
            INSERT INTO id_table VALUES ('次郎', 'Jiro T', 'abc');
            INSERT INTO id_table VALUES ('花子', NULL, '7');
            "#,
        )
        .unwrap();

        run_registry_migrations(&conn).unwrap();

        let rows: Vec<(i64, String, String, String)> = conn
            .prepare(
                "SELECT seq, local_name, external_name, CAST(identifier AS TEXT)
                   FROM id_table ORDER BY seq",
            )
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], (1, "太郎".to_owned(), "Taro S".to_owned(), "12".to_owned()));
        assert_eq!(rows[1].3, "abc");
        assert_eq!(rows[2].2, "");
        assert_eq!(table_count(&conn, "id_table_legacy"), 0);
        assert!(!is_legacy_table(&conn, REGISTRY_TABLE).unwrap());
    }

    #[test]
    fn legacy_measurement_rows_are_imported() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE physical_rawdata (
                "Name_1" TEXT, "date" TEXT, "ID" INTEGER, "Name_2" TEXT,
                "Position" TEXT, "Test Item" TEXT, "Result" REAL
            );
            INSERT INTO physical_rawdata VALUES
                ('Taro S', '2025-04-13 00:00:00', 12, 'P_太郎', 'P', 'Sprint', 5.5);
            "#,
        )
        .unwrap();

        run_measurement_migrations(&conn).unwrap();

        let (label, item, result): (String, String, String) = conn
            .query_row(
                "SELECT composite_label, test_item, result FROM physical_rawdata WHERE seq = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!(label, "P_太郎");
        assert_eq!(item, "Sprint");
        assert_eq!(result, "5.5");
    }

    fn table_count(conn: &Connection, name: &str) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )
        .unwrap()
    }
}
