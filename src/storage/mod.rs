//! # Storage Module
//!
//! The storage layer mediates between page numbers and file bytes. The
//! database file is a flat sequence of [`crate::config::PAGE_SIZE`]-byte
//! pages; the [`Pager`] owns the file handle and an array of owned page
//! buffers, loading a page from disk the first time it is addressed and
//! writing every resident page back on close.
//!
//! There is no eviction: the cache is unbounded within the
//! [`crate::config::TABLE_MAX_PAGES`] slot array, which keeps the I/O
//! schedule fully transparent. There is also no fsync; durability is
//! "the kernel holds it once we closed cleanly".
//!
//! All access is single-threaded and synchronous. Every page load is one
//! seek + read, every flush one seek + write.

mod pager;

pub use pager::{PageBuf, Pager};
