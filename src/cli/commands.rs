//! # Meta-Command Handler
//!
//! Lines beginning with `.` are meta-commands, dispatched before statement
//! preparation ever sees them:
//!
//! | Command      | Action                                         |
//! |--------------|------------------------------------------------|
//! | `.exit`      | flush, close, say goodbye, leave the loop      |
//! | `.btree`     | print the tree listing of the root leaf        |
//! | `.constants` | print the storage format's tuning constants    |
//!
//! Anything else starting with `.` echoes back as unrecognized, with the
//! line reproduced literally.

use eyre::Result;

use crate::config::{
    COMMON_NODE_HEADER_SIZE, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_MAX_CELLS,
    LEAF_NODE_SPACE_FOR_CELLS, ROW_SIZE,
};
use crate::database::Database;

#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Leave the REPL loop.
    Exit,
    /// Text to print, then keep going.
    Output(String),
}

pub struct CommandHandler;

impl CommandHandler {
    pub fn is_meta(input: &str) -> bool {
        input.starts_with('.')
    }

    pub fn execute(input: &str, db: &mut Database) -> Result<CommandResult> {
        match input {
            ".exit" => Ok(CommandResult::Exit),
            ".btree" => Ok(CommandResult::Output(db.tree_listing()?)),
            ".constants" => Ok(CommandResult::Output(constants_listing())),
            _ => Ok(CommandResult::Output(format!(
                "Unrecognized command {input}"
            ))),
        }
    }
}

fn constants_listing() -> String {
    format!(
        "Constants:\n\
         ROW_SIZE: {ROW_SIZE}\n\
         COMMON_NODE_HEADER_SIZE: {COMMON_NODE_HEADER_SIZE}\n\
         LEAF_NODE_HEADER_SIZE: {LEAF_NODE_HEADER_SIZE}\n\
         LEAF_NODE_CELL_SIZE: {LEAF_NODE_CELL_SIZE}\n\
         LEAF_NODE_SPACE_FOR_CELLS: {LEAF_NODE_SPACE_FOR_CELLS}\n\
         LEAF_NODE_MAX_CELLS: {LEAF_NODE_MAX_CELLS}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn scratch_db(name: &str) -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join(name)).unwrap();
        (db, dir)
    }

    #[test]
    fn constants_listing_has_the_documented_values() {
        let binding = constants_listing();
        let lines: Vec<&str> = binding.lines().map(str::trim_start).collect();

        assert_eq!(
            lines,
            vec![
                "Constants:",
                "ROW_SIZE: 293",
                "COMMON_NODE_HEADER_SIZE: 6",
                "LEAF_NODE_HEADER_SIZE: 10",
                "LEAF_NODE_CELL_SIZE: 297",
                "LEAF_NODE_SPACE_FOR_CELLS: 4086",
                "LEAF_NODE_MAX_CELLS: 13",
            ]
        );
    }

    #[test]
    fn exit_is_recognized() {
        let (mut db, _dir) = scratch_db("exit.db");

        let result = CommandHandler::execute(".exit", &mut db).unwrap();

        assert_eq!(result, CommandResult::Exit);
    }

    #[test]
    fn unknown_command_echoes_the_literal_line() {
        let (mut db, _dir) = scratch_db("unknown.db");

        let result = CommandHandler::execute(".flush now", &mut db).unwrap();

        assert_eq!(
            result,
            CommandResult::Output("Unrecognized command .flush now".to_string())
        );
    }

    #[test]
    fn btree_prints_the_tree_header() {
        let (mut db, _dir) = scratch_db("btree.db");

        let CommandResult::Output(text) = CommandHandler::execute(".btree", &mut db).unwrap()
        else {
            panic!("expected output");
        };

        assert_eq!(text, "Tree:\nleaf (size 0)");
    }
}
