//! SQLite implementation of the larder store boundary.
//!
//! Rows live in one table per model with a store-owned
//! `id INTEGER PRIMARY KEY AUTOINCREMENT` column, so deleted identities are
//! never reused and dangling references stay detectable. Relation link
//! records for every model share the private `__larder_links` table, created
//! at open and indexed by owner key.

mod value;
use value::{from_sql, Value};

use larder_core::store::{Link, LinkKey, Row, Store};
use larder_core::{Error, Ident, Result};

use rusqlite::types::ToSql;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::debug;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens a database file, creating it if absent.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path).map_err(Error::store_io)?;
        Self::bootstrap(conn)
    }

    /// Opens an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::store_io)?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS __larder_links (
                owner_table  TEXT    NOT NULL,
                owner_id     INTEGER NOT NULL,
                field        TEXT    NOT NULL,
                target_model TEXT    NOT NULL,
                target_id    INTEGER NOT NULL,
                ordinal      INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS __larder_links_owner
                ON __larder_links (owner_table, owner_id, field);",
        )
        .map_err(Error::store_io)?;
        Ok(Self { conn })
    }
}

/// Quotes an identifier for embedding in SQL.
fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

impl Store for SqliteStore {
    fn create_table(&mut self, table: &str, columns: &[&str]) -> Result<()> {
        let mut sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT",
            quote(table)
        );
        for column in columns {
            sql.push_str(", ");
            sql.push_str(&quote(column));
        }
        sql.push(')');

        debug!(table, "create table");
        self.conn.execute(&sql, []).map_err(Error::store_io)?;
        Ok(())
    }

    fn insert_row(&mut self, table: &str, row: &Row) -> Result<Ident> {
        if row.is_empty() {
            let sql = format!("INSERT INTO {} DEFAULT VALUES", quote(table));
            self.conn.execute(&sql, []).map_err(Error::store_io)?;
        } else {
            let columns: Vec<String> = row.keys().map(|name| quote(name)).collect();
            let placeholders: Vec<String> =
                (1..=row.len()).map(|index| format!("?{index}")).collect();
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                quote(table),
                columns.join(", "),
                placeholders.join(", ")
            );
            let values: Vec<Value<'_>> = row.values().map(Value::from).collect();
            self.conn
                .execute(&sql, rusqlite::params_from_iter(values))
                .map_err(Error::store_io)?;
        }
        Ok(Ident::new(self.conn.last_insert_rowid()))
    }

    fn update_row(&mut self, table: &str, ident: Ident, row: &Row) -> Result<()> {
        if row.is_empty() {
            return match self.select_row(table, ident)? {
                Some(_) => Ok(()),
                None => Err(Error::not_found(format!("table={table} id={ident}"))),
            };
        }

        let assignments: Vec<String> = row
            .keys()
            .enumerate()
            .map(|(index, name)| format!("{} = ?{}", quote(name), index + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            quote(table),
            assignments.join(", "),
            row.len() + 1
        );

        let values: Vec<Value<'_>> = row.values().map(Value::from).collect();
        let mut params: Vec<&dyn ToSql> = values.iter().map(|value| value as &dyn ToSql).collect();
        let id = ident.as_i64();
        params.push(&id);

        let affected = self
            .conn
            .execute(&sql, &params[..])
            .map_err(Error::store_io)?;
        if affected == 0 {
            return Err(Error::not_found(format!("table={table} id={ident}")));
        }
        Ok(())
    }

    fn delete_row(&mut self, table: &str, ident: Ident) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", quote(table));
        self.conn
            .execute(&sql, params![ident.as_i64()])
            .map_err(Error::store_io)?;
        Ok(())
    }

    fn select_row(&mut self, table: &str, ident: Ident) -> Result<Option<Row>> {
        let sql = format!("SELECT * FROM {} WHERE id = ?1", quote(table));
        let mut stmt = self.conn.prepare(&sql).map_err(Error::store_io)?;
        let columns: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut rows = stmt
            .query(params![ident.as_i64()])
            .map_err(Error::store_io)?;
        let Some(sql_row) = rows.next().map_err(Error::store_io)? else {
            return Ok(None);
        };

        let mut row = Row::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            if column == "id" {
                continue;
            }
            let value_ref = sql_row.get_ref(index).map_err(Error::store_io)?;
            row.insert(column.clone(), from_sql(value_ref).map_err(Error::store_io)?);
        }
        Ok(Some(row))
    }

    fn select_idents(&mut self, table: &str) -> Result<Vec<Ident>> {
        let sql = format!("SELECT id FROM {} ORDER BY id ASC", quote(table));
        let mut stmt = self.conn.prepare(&sql).map_err(Error::store_io)?;
        let idents = stmt
            .query_map([], |row| row.get::<_, i64>(0).map(Ident::new))
            .map_err(Error::store_io)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::store_io)?;
        Ok(idents)
    }

    fn select_links(&mut self, key: &LinkKey) -> Result<Vec<Link>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT target_model, target_id, ordinal FROM __larder_links
                 WHERE owner_table = ?1 AND owner_id = ?2 AND field = ?3
                 ORDER BY ordinal ASC",
            )
            .map_err(Error::store_io)?;
        let links = stmt
            .query_map(
                params![key.table, key.owner.as_i64(), key.field],
                |row| {
                    Ok(Link {
                        target_model: row.get(0)?,
                        target: Ident::new(row.get(1)?),
                        ordinal: row.get(2)?,
                    })
                },
            )
            .map_err(Error::store_io)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::store_io)?;
        Ok(links)
    }

    fn insert_link(&mut self, key: &LinkKey, link: &Link) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO __larder_links
                 (owner_table, owner_id, field, target_model, target_id, ordinal)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    key.table,
                    key.owner.as_i64(),
                    key.field,
                    link.target_model,
                    link.target.as_i64(),
                    link.ordinal
                ],
            )
            .map_err(Error::store_io)?;
        Ok(())
    }

    fn delete_links(&mut self, key: &LinkKey) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM __larder_links
                 WHERE owner_table = ?1 AND owner_id = ?2 AND field = ?3",
                params![key.table, key.owner.as_i64(), key.field],
            )
            .map_err(Error::store_io)?;
        Ok(())
    }

    fn begin(&mut self) -> Result<()> {
        self.conn.execute_batch("BEGIN").map_err(Error::store_io)
    }

    fn commit(&mut self) -> Result<()> {
        self.conn.execute_batch("COMMIT").map_err(Error::store_io)
    }

    fn rollback(&mut self) -> Result<()> {
        self.conn.execute_batch("ROLLBACK").map_err(Error::store_io)
    }
}
