//! # Interactive Shell
//!
//! The REPL around the database: a `db > ` prompt, meta-commands starting
//! with `.`, and the two statements the store understands. User mistakes
//! are printed and the loop continues; system errors unwind to `main`.
//!
//! - `repl`: the prompt loop, history, and result printing
//! - `commands`: the `.exit` / `.btree` / `.constants` meta-commands

pub mod commands;
pub mod repl;

pub use repl::Repl;
