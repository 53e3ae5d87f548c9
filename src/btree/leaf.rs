//! # B+Tree Leaf Node
//!
//! A leaf interprets a 4096-byte page as a header plus an array of
//! fixed-size cells:
//!
//! ```text
//! +---------------------------+
//! | NodeHeader (10 bytes)     |
//! +---------------------------+
//! | Cell 0: key(4) || row(293)|
//! | Cell 1: key(4) || row(293)|
//! | ...                       |
//! +---------------------------+
//! | unused tail               |
//! +---------------------------+
//! ```
//!
//! Cells are packed contiguously in cursor insertion order. Insertion shifts
//! the cells at and after the target position one slot toward the tail to
//! make room, which is a no-op for the end-of-table cursor the executor uses
//! today but is what keeps the mechanism correct once key-ordered placement
//! arrives.
//!
//! A full leaf refuses further inserts. Splitting a leaf into two and
//! promoting a separator into a parent node is the next evolutionary stage;
//! the reserved header fields anticipate it.
//!
//! The views borrow the page buffer and own no storage: [`LeafNode`] for
//! reads, [`LeafNodeMut`] for writes. Constructors validate the page size
//! and node type, and indexed accessors validate the cell index, so the
//! offset arithmetic stays private to this module.

use std::fmt;

use eyre::{ensure, Result};
use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::config::{
    LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_KEY_SIZE, LEAF_NODE_MAX_CELLS, PAGE_SIZE,
    ROW_SIZE,
};
use crate::row::Row;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Internal = 0,
    Leaf = 1,
}

impl NodeType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(NodeType::Internal),
            1 => Some(NodeType::Leaf),
            _ => None,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct NodeHeader {
    node_type: u8,
    is_root: u8,
    parent: U32,
    num_cells: U32,
}

const _: () = assert!(std::mem::size_of::<NodeHeader>() == LEAF_NODE_HEADER_SIZE);

impl NodeHeader {
    pub fn from_bytes(data: &[u8]) -> Result<&Self> {
        ensure!(
            data.len() >= LEAF_NODE_HEADER_SIZE,
            "buffer too small for NodeHeader: {} < {}",
            data.len(),
            LEAF_NODE_HEADER_SIZE
        );
        Self::ref_from_bytes(&data[..LEAF_NODE_HEADER_SIZE])
            .map_err(|e| eyre::eyre!("failed to read NodeHeader: {:?}", e))
    }

    pub fn from_bytes_mut(data: &mut [u8]) -> Result<&mut Self> {
        ensure!(
            data.len() >= LEAF_NODE_HEADER_SIZE,
            "buffer too small for NodeHeader: {} < {}",
            data.len(),
            LEAF_NODE_HEADER_SIZE
        );
        Self::mut_from_bytes(&mut data[..LEAF_NODE_HEADER_SIZE])
            .map_err(|e| eyre::eyre!("failed to read NodeHeader: {:?}", e))
    }

    pub fn node_type(&self) -> Option<NodeType> {
        NodeType::from_byte(self.node_type)
    }

    pub fn set_node_type(&mut self, node_type: NodeType) {
        self.node_type = node_type as u8;
    }

    pub fn is_root(&self) -> bool {
        self.is_root != 0
    }

    pub fn set_is_root(&mut self, is_root: bool) {
        self.is_root = is_root as u8;
    }

    pub fn parent(&self) -> u32 {
        self.parent.get()
    }

    pub fn set_parent(&mut self, page_num: u32) {
        self.parent = U32::new(page_num);
    }

    pub fn num_cells(&self) -> u32 {
        self.num_cells.get()
    }

    pub fn set_num_cells(&mut self, count: u32) {
        self.num_cells = U32::new(count);
    }
}

/// Read-only leaf view over a page buffer.
#[derive(Debug)]
pub struct LeafNode<'a> {
    data: &'a [u8],
}

/// Mutable leaf view over a page buffer.
pub struct LeafNodeMut<'a> {
    data: &'a mut [u8],
}

fn cell_start(cell_num: usize) -> usize {
    LEAF_NODE_HEADER_SIZE + cell_num * LEAF_NODE_CELL_SIZE
}

fn value_start(cell_num: usize) -> usize {
    cell_start(cell_num) + LEAF_NODE_KEY_SIZE
}

impl<'a> LeafNode<'a> {
    pub fn from_page(data: &'a [u8]) -> Result<Self> {
        ensure!(
            data.len() == PAGE_SIZE,
            "invalid page size: {} != {}",
            data.len(),
            PAGE_SIZE
        );
        let header = NodeHeader::from_bytes(data)?;
        ensure!(
            header.node_type() == Some(NodeType::Leaf),
            "expected a leaf node, found type byte {:#04x}",
            data[0]
        );
        Ok(Self { data })
    }

    pub fn num_cells(&self) -> u32 {
        NodeHeader::from_bytes(self.data).unwrap().num_cells()
    }

    pub fn key_at(&self, cell_num: usize) -> Result<u32> {
        ensure!(
            cell_num < self.num_cells() as usize,
            "cell index {} out of bounds (num_cells={})",
            cell_num,
            self.num_cells()
        );
        Ok(self.raw_key(cell_num))
    }

    pub fn value_at(&self, cell_num: usize) -> Result<&'a [u8]> {
        ensure!(
            cell_num < self.num_cells() as usize,
            "cell index {} out of bounds (num_cells={})",
            cell_num,
            self.num_cells()
        );
        let start = value_start(cell_num);
        Ok(&self.data[start..start + ROW_SIZE])
    }

    fn raw_key(&self, cell_num: usize) -> u32 {
        let start = cell_start(cell_num);
        let bytes: [u8; LEAF_NODE_KEY_SIZE] = self.data[start..start + LEAF_NODE_KEY_SIZE]
            .try_into()
            .unwrap();
        u32::from_le_bytes(bytes)
    }
}

/// Renders the listing the `.btree` meta-command shows: the cell count,
/// then one `  - index : key` line per cell.
impl fmt::Display for LeafNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leaf (size {})", self.num_cells())?;
        for i in 0..self.num_cells() as usize {
            write!(f, "\n  - {} : {}", i, self.raw_key(i))?;
        }
        Ok(())
    }
}

impl<'a> LeafNodeMut<'a> {
    pub fn from_page(data: &'a mut [u8]) -> Result<Self> {
        ensure!(
            data.len() == PAGE_SIZE,
            "invalid page size: {} != {}",
            data.len(),
            PAGE_SIZE
        );
        let header = NodeHeader::from_bytes(data)?;
        ensure!(
            header.node_type() == Some(NodeType::Leaf),
            "expected a leaf node, found type byte {:#04x}",
            data[0]
        );
        Ok(Self { data })
    }

    /// Stamps an empty leaf onto a (zeroed) page buffer.
    pub fn init(data: &'a mut [u8]) -> Result<Self> {
        ensure!(
            data.len() == PAGE_SIZE,
            "invalid page size: {} != {}",
            data.len(),
            PAGE_SIZE
        );

        let header = NodeHeader::from_bytes_mut(data)?;
        header.set_node_type(NodeType::Leaf);
        header.set_is_root(false);
        header.set_parent(0);
        header.set_num_cells(0);

        Ok(Self { data })
    }

    pub fn num_cells(&self) -> u32 {
        NodeHeader::from_bytes(self.data).unwrap().num_cells()
    }

    /// Inserts `key`/`row` at `cell_num`, shifting later cells toward the
    /// tail. Refuses to overflow the leaf: splitting is not implemented.
    pub fn insert(&mut self, cell_num: usize, key: u32, row: &Row) -> Result<()> {
        let num_cells = self.num_cells() as usize;
        ensure!(
            num_cells < LEAF_NODE_MAX_CELLS,
            "leaf node is full ({} cells); node splitting is not implemented",
            num_cells
        );
        ensure!(
            cell_num <= num_cells,
            "insert position {} beyond cell count {}",
            cell_num,
            num_cells
        );

        for i in ((cell_num + 1)..=num_cells).rev() {
            self.data
                .copy_within(cell_start(i - 1)..cell_start(i), cell_start(i));
        }

        NodeHeader::from_bytes_mut(self.data)?.set_num_cells(num_cells as u32 + 1);

        let key_pos = cell_start(cell_num);
        self.data[key_pos..key_pos + LEAF_NODE_KEY_SIZE].copy_from_slice(&key.to_le_bytes());

        let value_pos = value_start(cell_num);
        row.serialize(&mut self.data[value_pos..value_pos + ROW_SIZE])
    }

    /// Consumes the view and hands out the row image slice of one cell,
    /// keeping the page buffer's lifetime.
    pub fn into_value_at(self, cell_num: usize) -> Result<&'a mut [u8]> {
        ensure!(
            cell_num < self.num_cells() as usize,
            "cell index {} out of bounds (num_cells={})",
            cell_num,
            self.num_cells()
        );
        let start = value_start(cell_num);
        let data = self.data;
        Ok(&mut data[start..start + ROW_SIZE])
    }

    pub fn as_ref(&self) -> LeafNode<'_> {
        LeafNode { data: self.data }
    }
}
