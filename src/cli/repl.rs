//! # REPL - Read-Eval-Print Loop
//!
//! One `db > ` prompt per line of input. A line starting with `.` is a
//! meta-command; everything else goes through statement preparation and,
//! when that succeeds, execution.
//!
//! ```text
//! db > insert 1 alice alice@example.com
//! Executed.
//! db > select
//! (1, alice, alice@example.com)
//! Executed.
//! db > .exit
//! Bye!
//! ```
//!
//! User errors (bad statements, a full table) are printed on stdout as part
//! of the dialogue and the loop continues. System errors and end-of-input
//! propagate out of [`Repl::run`]; the binary reports them and exits
//! non-zero, with the table's drop flushing whatever is resident.
//!
//! Line history is resolved once at construction and persisted when the
//! session ends: `~/.minidb_history` by default, elsewhere if the
//! `MINIDB_HISTORY` environment variable names a path, nowhere if it is set
//! but empty.

use std::env;
use std::path::PathBuf;

use eyre::{bail, Result, WrapErr};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::commands::{CommandHandler, CommandResult};
use crate::database::{Database, ExecuteResult};
use crate::statement::prepare;

const PROMPT: &str = "db > ";
const HISTORY_ENV_VAR: &str = "MINIDB_HISTORY";

pub struct Repl {
    db: Database,
    editor: DefaultEditor,
    history_file: Option<PathBuf>,
}

impl Repl {
    pub fn new(db: Database) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        let history_file = Self::resolve_history_file();
        if let Some(path) = &history_file {
            let _ = editor.load_history(path);
        }

        Ok(Self {
            db,
            editor,
            history_file,
        })
    }

    fn resolve_history_file() -> Option<PathBuf> {
        match env::var(HISTORY_ENV_VAR) {
            Ok(custom) => (!custom.is_empty()).then(|| PathBuf::from(custom)),
            Err(_) => env::var_os("HOME").map(|home| PathBuf::from(home).join(".minidb_history")),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if !self.handle_line(&line)? {
                        break;
                    }
                }
                Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
                    bail!("Error reading input")
                }
                Err(err) => return Err(err).wrap_err("Error reading input"),
            }
        }

        self.save_history();
        Ok(())
    }

    /// Dispatches one input line. Returns `false` when the session is over.
    fn handle_line(&mut self, line: &str) -> Result<bool> {
        if !line.is_empty() {
            let _ = self.editor.add_history_entry(line);
        }

        if CommandHandler::is_meta(line) {
            return match CommandHandler::execute(line, &mut self.db)? {
                CommandResult::Exit => {
                    self.db.close()?;
                    println!("Bye!");
                    Ok(false)
                }
                CommandResult::Output(text) => {
                    println!("{text}");
                    Ok(true)
                }
            };
        }

        match prepare(line) {
            Ok(statement) => match self.db.execute(statement)? {
                ExecuteResult::Insert => println!("Executed."),
                ExecuteResult::Select { rows } => {
                    for row in &rows {
                        println!("{row}");
                    }
                    println!("Executed.");
                }
                ExecuteResult::TableFull => println!("Error: Table full."),
            },
            Err(err) => println!("{err}"),
        }

        Ok(true)
    }

    fn save_history(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                log::warn!("could not save history: {e}");
            }
        }
    }
}
