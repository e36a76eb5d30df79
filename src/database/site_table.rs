use std::collections::BTreeMap;
use const_format::concatcp;
use log::debug;
use rusqlite::{Connection, OptionalExtension, params, Result, Transaction};

// Timestamps are stored in the fixed-width format produced by
// parser::timestamp::format_datetime, so MAX() picks the most recent one.
const CREATE_SITE_TABLE : &'static str =
    "CREATE TABLE IF NOT EXISTS site (
        link TEXT NOT NULL PRIMARY KEY,
        modified TEXT NOT NULL
    )";

const UPSERT_SITE : &'static str =
    "INSERT INTO site (link, modified) VALUES (?, ?) \
     ON CONFLICT(link) DO \
     UPDATE SET modified = excluded.modified";

const SELECT_SITES : &'static str =
    "SELECT link, modified FROM site";

const SELECT_SITE : &'static str =
    concatcp!(SELECT_SITES, " WHERE link = ?");

const SELECT_MAX_MODIFIED : &'static str =
    "SELECT MAX(modified) FROM site";

// This is just a namespace to keep method names short
pub struct SiteTable;

impl SiteTable {
    pub fn create_table(conn: &Connection) -> Result<()> {
        debug!("Execute\n{}", CREATE_SITE_TABLE);
        conn.execute(CREATE_SITE_TABLE, [])?;
        Ok(())
    }

    pub fn upsert(tx: &Transaction, link: &str, modified: &str) -> Result<()> {
        debug!("Execute\n{}\nwith: {} {}", UPSERT_SITE, link, modified);
        tx.execute(UPSERT_SITE, params![link, modified])?;
        Ok(())
    }

    pub fn select_all(tx: &Transaction) -> Result<BTreeMap<String, String>> {
        debug!("Execute\n{}", SELECT_SITES);
        let mut stmt = tx.prepare(SELECT_SITES)?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;
        let mut map = BTreeMap::new();
        for row in rows {
            let (link, modified) : (String, String) = row?;
            map.insert(link, modified);
        }
        Ok(map)
    }

    pub fn select_by_link(tx: &Transaction, link: &str) -> Result<Option<String>> {
        debug!("Execute\n{} with: {}", SELECT_SITE, link);
        let mut stmt = tx.prepare(SELECT_SITE)?;
        stmt.query_row([link], |row| {
            Ok(row.get(1)?)
        }).optional()
    }

    pub fn select_max_modified(tx: &Transaction) -> Result<Option<String>> {
        debug!("Execute\n{}", SELECT_MAX_MODIFIED);
        let mut stmt = tx.prepare(SELECT_MAX_MODIFIED)?;
        stmt.query_row([], |row| {
            Ok(row.get(0)?)
        })
    }
}
