//! # Cursor
//!
//! A cursor is a `(page, cell)` position in the tree plus an end-of-table
//! flag. It is the unit of access for both statements: a scan walks a start
//! cursor forward, an insert lands at an end cursor. The cursor mutably
//! borrows the table, so it lives exactly as long as one statement.
//!
//! Insertion goes through the leaf's shifting insert even though the end
//! cursor makes the shift a no-op today; when key-ordered placement arrives
//! the only change is where the cursor is positioned.

use eyre::{ensure, Result};

use crate::btree::{LeafNode, LeafNodeMut};
use crate::row::Row;
use crate::table::Table;

pub struct Cursor<'a> {
    table: &'a mut Table,
    page_num: u32,
    cell_num: u32,
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    /// Positions the cursor at the first cell of the table.
    pub fn start(table: &'a mut Table) -> Result<Self> {
        let page_num = table.root_page_num();
        let num_cells = table.root_num_cells()?;
        Ok(Self {
            table,
            page_num,
            cell_num: 0,
            end_of_table: num_cells == 0,
        })
    }

    /// Positions the cursor one past the last cell, where inserts land.
    pub fn end(table: &'a mut Table) -> Result<Self> {
        let page_num = table.root_page_num();
        let num_cells = table.root_num_cells()?;
        Ok(Self {
            table,
            page_num,
            cell_num: num_cells,
            end_of_table: true,
        })
    }

    pub fn end_of_table(&self) -> bool {
        self.end_of_table
    }

    /// The row image under the cursor.
    pub fn value(&mut self) -> Result<&mut [u8]> {
        ensure!(!self.end_of_table, "cursor is past the end of the table");
        let page = self.table.page(self.page_num)?;
        LeafNodeMut::from_page(page)?.into_value_at(self.cell_num as usize)
    }

    /// Moves to the next cell, raising the end flag past the last one.
    pub fn advance(&mut self) -> Result<()> {
        self.cell_num += 1;
        let page = self.table.page(self.page_num)?;
        let leaf = LeafNode::from_page(page)?;
        if self.cell_num >= leaf.num_cells() {
            self.end_of_table = true;
        }
        Ok(())
    }

    /// Inserts a keyed row at the cursor position, shifting later cells.
    pub fn insert(&mut self, key: u32, row: &Row) -> Result<()> {
        let page = self.table.page(self.page_num)?;
        LeafNodeMut::from_page(page)?.insert(self.cell_num as usize, key, row)
    }
}
