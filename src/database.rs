//! # Database and Executor
//!
//! The high-level entry point. A [`Database`] owns the table and translates
//! prepared statements into cursor operations:
//!
//! - `insert` checks the root leaf's capacity, then writes the row through
//!   an end-of-table cursor (the tree is an append-only log at this stage;
//!   the cursor machinery is what key-ordered placement will reuse);
//! - `select` walks a start cursor to the end, decoding every row.
//!
//! A full table is not an error at this level: it is a normal statement
//! outcome ([`ExecuteResult::TableFull`]) the shell reports and moves on
//! from. Errors from this module are system errors (I/O, corrupt pages)
//! that abort the process.

use std::path::Path;

use eyre::Result;

use crate::config::LEAF_NODE_MAX_CELLS;
use crate::cursor::Cursor;
use crate::row::Row;
use crate::statement::Statement;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteResult {
    /// The row was stored.
    Insert,
    /// The scan finished; rows are in cell order.
    Select { rows: Vec<Row> },
    /// The root leaf is at capacity and node splitting is not implemented.
    TableFull,
}

pub struct Database {
    table: Table,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            table: Table::open(path)?,
        })
    }

    pub fn execute(&mut self, statement: Statement) -> Result<ExecuteResult> {
        match statement {
            Statement::Insert(row) => self.execute_insert(row),
            Statement::Select => self.execute_select(),
        }
    }

    fn execute_insert(&mut self, row: Row) -> Result<ExecuteResult> {
        if self.table.root_num_cells()? >= LEAF_NODE_MAX_CELLS as u32 {
            return Ok(ExecuteResult::TableFull);
        }

        let mut cursor = Cursor::end(&mut self.table)?;
        cursor.insert(row.id(), &row)?;
        Ok(ExecuteResult::Insert)
    }

    fn execute_select(&mut self) -> Result<ExecuteResult> {
        let mut rows = Vec::new();
        let mut cursor = Cursor::start(&mut self.table)?;
        while !cursor.end_of_table() {
            rows.push(Row::deserialize(cursor.value()?)?);
            cursor.advance()?;
        }
        Ok(ExecuteResult::Select { rows })
    }

    /// The `.btree` listing: the tree header line followed by the root
    /// leaf's cells.
    pub fn tree_listing(&mut self) -> Result<String> {
        let leaf = self.table.root_leaf()?;
        Ok(format!("Tree:\n{leaf}"))
    }

    /// Flushes everything resident and releases the page buffers.
    pub fn close(&mut self) -> Result<()> {
        self.table.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::prepare;
    use tempfile::tempdir;

    fn scratch_db(name: &str) -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join(name)).unwrap();
        (db, dir)
    }

    #[test]
    fn insert_then_select_returns_the_row() {
        let (mut db, _dir) = scratch_db("one.db");

        let result = db
            .execute(prepare("insert 1 alice alice@example.com").unwrap())
            .unwrap();
        assert_eq!(result, ExecuteResult::Insert);

        let ExecuteResult::Select { rows } = db.execute(Statement::Select).unwrap() else {
            panic!("expected a select result");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].to_string(), "(1, alice, alice@example.com)");
    }

    #[test]
    fn fourteenth_insert_reports_table_full() {
        let (mut db, _dir) = scratch_db("full.db");

        for i in 1..=13 {
            let statement = prepare(&format!("insert {i} user{i} user{i}@example.com")).unwrap();
            assert_eq!(db.execute(statement).unwrap(), ExecuteResult::Insert);
        }

        let statement = prepare("insert 14 user14 user14@example.com").unwrap();
        assert_eq!(db.execute(statement).unwrap(), ExecuteResult::TableFull);
    }

    #[test]
    fn tree_listing_shows_the_root_leaf() {
        let (mut db, _dir) = scratch_db("tree.db");
        db.execute(prepare("insert 1 a b").unwrap()).unwrap();

        let listing = db.tree_listing().unwrap();

        assert_eq!(listing, "Tree:\nleaf (size 1)\n  - 0 : 1");
    }
}
