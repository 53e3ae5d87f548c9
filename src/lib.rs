//! # minidb - A Single-File, Single-Table Relational Store
//!
//! minidb stores fixed-schema rows in a single database file and exposes them
//! through an interactive REPL. Rows live in the leaf of a B+tree whose pages
//! are managed by a buffering pager; at this stage the tree consists of a
//! single root leaf, so the store behaves as an append-only log carried by a
//! tree-shaped on-disk format that is ready for growth.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │        REPL (prompt, dispatch)        │
//! ├──────────────────────────────────────┤
//! │ Statement preparation (insert/select) │
//! ├──────────────────────────────────────┤
//! │        Executor (Database)            │
//! ├──────────────────────────────────────┤
//! │     Cursor (position in the tree)     │
//! ├──────────────────────────────────────┤
//! │     Leaf node view (cell layout)      │
//! ├──────────────────────────────────────┤
//! │    Pager (page buffers + file I/O)    │
//! └──────────────────────────────────────┘
//! ```
//!
//! ## File Layout
//!
//! The database file is a raw concatenation of 4096-byte pages with no file
//! header and no magic number. Page 0 is the root of the tree and, at this
//! stage, its only node. A file whose length is not a whole number of pages
//! is rejected at open.
//!
//! ## Module Overview
//!
//! - [`config`]: tuning constants with compile-time consistency checks
//! - [`row`]: the fixed 293-byte row and its codec
//! - [`storage`]: the pager and page buffer management
//! - [`btree`]: leaf node layout and typed page views
//! - [`table`]: ownership of the pager and the root page
//! - [`cursor`]: positioned access into the tree
//! - [`statement`]: text statement preparation and its diagnostics
//! - [`database`]: the executor tying statements to cursor operations
//! - [`cli`]: the interactive shell

pub mod btree;
pub mod cli;
pub mod config;
pub mod cursor;
pub mod database;
pub mod row;
pub mod statement;
pub mod storage;
pub mod table;

pub use cursor::Cursor;
pub use database::{Database, ExecuteResult};
pub use row::Row;
pub use statement::{prepare, PrepareError, Statement};
pub use table::Table;
