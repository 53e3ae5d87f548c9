//! # Storage Format Constants
//!
//! Every size and offset of the on-disk format in one place. Constants that
//! depend on each other are co-located and derived rather than repeated, so
//! a change to one ripples through the chain instead of silently diverging.
//!
//! ## Dependency Graph
//!
//! ```text
//! ROW_SIZE (293 bytes)
//!       │
//!       └─> LEAF_NODE_CELL_SIZE (4-byte key + ROW_SIZE value = 297)
//!                 │
//!                 └─> LEAF_NODE_MAX_CELLS (⌊4086 / 297⌋ = 13)
//!
//! PAGE_SIZE (4096 bytes)
//!       │
//!       ├─> LEAF_NODE_SPACE_FOR_CELLS (PAGE_SIZE - 10-byte leaf header)
//!       │
//!       └─> TABLE_MAX_PAGES (100 resident page slots)
//! ```
//!
//! ## Node Header Layout
//!
//! Every page begins with a 6-byte header common to all node types followed
//! by the per-type header. For leaves that is a single cell count:
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -------------------
//! 0       1     node_type (0 = internal, 1 = leaf)
//! 1       1     is_root
//! 2       4     parent page number (reserved)
//! 6       4     num_cells (leaf only)
//! 10      ...   cells
//! ```
//!
//! Cells are `key (4 bytes) || row image (293 bytes)` packed contiguously
//! after the header with no slot indirection; the row schema is fixed, so
//! every cell has the same size.

/// Size of one page, the unit of disk and cache addressing.
pub const PAGE_SIZE: usize = 4096;

/// Maximum number of pages the pager will hold resident. Addressing a page
/// number at or beyond this limit is a fatal error.
pub const TABLE_MAX_PAGES: usize = 100;

/// Longest meaningful username, in bytes. The on-disk field carries one
/// extra byte so a maximum-length value still ends in NUL.
pub const COLUMN_USERNAME_SIZE: usize = 32;

/// Longest meaningful email, in bytes.
pub const COLUMN_EMAIL_SIZE: usize = 255;

pub const ID_SIZE: usize = 4;
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE + 1;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE + 1;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Size of one serialized row: id, username buffer, email buffer.
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

/*
 * Common node header layout
 */
pub const NODE_TYPE_SIZE: usize = 1;
pub const NODE_TYPE_OFFSET: usize = 0;
pub const IS_ROOT_SIZE: usize = 1;
pub const IS_ROOT_OFFSET: usize = NODE_TYPE_OFFSET + NODE_TYPE_SIZE;
pub const PARENT_POINTER_SIZE: usize = 4;
pub const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;
pub const COMMON_NODE_HEADER_SIZE: usize = NODE_TYPE_SIZE + IS_ROOT_SIZE + PARENT_POINTER_SIZE;

/*
 * Leaf node header layout
 */
pub const LEAF_NODE_NUM_CELLS_SIZE: usize = 4;
pub const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

/*
 * Leaf node body layout
 */
pub const LEAF_NODE_KEY_SIZE: usize = 4;
pub const LEAF_NODE_KEY_OFFSET: usize = 0;
pub const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

const _: () = assert!(ROW_SIZE == 293);
const _: () = assert!(COMMON_NODE_HEADER_SIZE == 6);
const _: () = assert!(LEAF_NODE_HEADER_SIZE == 10);
const _: () = assert!(LEAF_NODE_CELL_SIZE == 297);
const _: () = assert!(LEAF_NODE_SPACE_FOR_CELLS == 4086);
const _: () = assert!(LEAF_NODE_MAX_CELLS == 13);
const _: () = assert!(LEAF_NODE_HEADER_SIZE + LEAF_NODE_MAX_CELLS * LEAF_NODE_CELL_SIZE <= PAGE_SIZE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_size_matches_field_sum() {
        assert_eq!(ROW_SIZE, 4 + 33 + 256);
    }

    #[test]
    fn thirteen_cells_fit_in_one_leaf() {
        assert_eq!(LEAF_NODE_MAX_CELLS, 13);
        assert!(LEAF_NODE_HEADER_SIZE + 14 * LEAF_NODE_CELL_SIZE > PAGE_SIZE);
    }

    #[test]
    fn email_field_ends_the_row() {
        assert_eq!(EMAIL_OFFSET + EMAIL_SIZE, ROW_SIZE);
    }
}
