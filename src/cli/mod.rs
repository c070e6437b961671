//! Interactive shell
//!
//! A rustyline REPL around a [`Playground`]. Lines starting with `.` are
//! shell commands; everything else is handed to the interpreter as one
//! statement. A trailing backslash continues the statement on the next line.

pub mod commands;
pub mod helper;
pub mod render;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;

use crate::playground::{Outcome, Playground};
use crate::storage::KeyValueStore;
use commands::SUPPORTED_COMMANDS;
use helper::SqlHelper;
use render::{format_error, format_result};

pub const DOT_COMMANDS: [(&str, &str); 6] = [
    (".help", "Show this help"),
    (".commands", "List the supported SQL commands"),
    (".history", "Show statements run in this session"),
    (".status", "Show the selected database and storage"),
    (".clear", "Clear the screen"),
    (".exit", "Exit the shell"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotCommand {
    Help,
    Commands,
    History,
    Status,
    Clear,
    Exit,
}

impl DotCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.split_whitespace().next()? {
            ".help" | ".h" | ".?" => Some(DotCommand::Help),
            ".commands" => Some(DotCommand::Commands),
            ".history" => Some(DotCommand::History),
            ".status" => Some(DotCommand::Status),
            ".clear" => Some(DotCommand::Clear),
            ".exit" | ".quit" | ".q" => Some(DotCommand::Exit),
            _ => None,
        }
    }
}

pub struct Shell<S: KeyValueStore> {
    playground: Playground<S>,
    /// Where the store lives, for `.status`
    location: String,
    history_file: Option<PathBuf>,
}

impl<S: KeyValueStore> Shell<S> {
    pub fn new(playground: Playground<S>, location: impl Into<String>) -> Self {
        Self {
            playground,
            location: location.into(),
            history_file: None,
        }
    }

    pub fn with_history_file(mut self, path: PathBuf) -> Self {
        self.history_file = Some(path);
        self
    }

    pub fn playground(&self) -> &Playground<S> {
        &self.playground
    }

    /// Runs statements in order, stopping at the first failure.
    pub fn execute_all(&mut self, statements: &[String]) -> anyhow::Result<()> {
        for sql in statements {
            match self.playground.run(sql) {
                Ok(result) => println!("{}", format_result(&result)),
                Err(e) => {
                    eprintln!("{}", format_error(&e));
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    pub fn run_interactive(&mut self) -> anyhow::Result<()> {
        print_banner();

        let mut rl: Editor<SqlHelper, DefaultHistory> = Editor::new()?;
        rl.set_helper(Some(SqlHelper::new()));
        self.refresh_names(&mut rl);

        if let Some(path) = &self.history_file {
            let _ = rl.load_history(path);
        }

        let mut multiline_buffer = String::new();
        let mut in_multiline = false;

        loop {
            let prompt = if in_multiline {
                format!("{} ", "...".dimmed())
            } else {
                let db = self.playground.selected_database().unwrap_or("(none)");
                format!("{}{} ", db.cyan(), ">".white())
            };

            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();

                    if let Some(head) = line.strip_suffix('\\') {
                        multiline_buffer.push_str(head);
                        multiline_buffer.push('\n');
                        in_multiline = true;
                        continue;
                    }

                    let input = if in_multiline {
                        multiline_buffer.push_str(line);
                        in_multiline = false;
                        std::mem::take(&mut multiline_buffer)
                    } else {
                        line.to_string()
                    };

                    if input.trim().is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input.as_str());

                    if input.starts_with('.') {
                        match DotCommand::parse(&input) {
                            Some(DotCommand::Exit) => {
                                println!("{}", "Goodbye!".dimmed());
                                break;
                            }
                            Some(command) => self.dot_command(command),
                            None => {
                                println!("  {} {}", "Unknown command:".red(), input);
                                println!("  Type {} for help", ".help".yellow());
                            }
                        }
                        continue;
                    }

                    match self.playground.run(&input) {
                        Ok(result) => println!("{}", format_result(&result)),
                        Err(e) => println!("{}", format_error(&e)),
                    }
                    self.refresh_names(&mut rl);
                }
                Err(ReadlineError::Interrupted) => {
                    if in_multiline {
                        println!("{}", "Cancelled".dimmed());
                        multiline_buffer.clear();
                        in_multiline = false;
                    } else {
                        println!("{}", "Type .exit to quit".dimmed());
                    }
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "Goodbye!".dimmed());
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline failed: {:?}", err);
                    return Err(err.into());
                }
            }
        }

        if let Some(path) = &self.history_file {
            if let Err(e) = rl.save_history(path) {
                tracing::warn!("Could not save history to {}: {}", path.display(), e);
            }
        }
        Ok(())
    }

    fn dot_command(&mut self, command: DotCommand) {
        match command {
            DotCommand::Help => print_help(),
            DotCommand::Commands => print_commands(),
            DotCommand::History => self.print_history(),
            DotCommand::Status => self.print_status(),
            DotCommand::Clear => {
                print!("\x1B[2J\x1B[1;1H");
                print_banner();
            }
            DotCommand::Exit => {}
        }
    }

    fn refresh_names(&self, rl: &mut Editor<SqlHelper, DefaultHistory>) {
        let catalog = self.playground.interpreter().catalog();
        let mut names = catalog.database_names();
        if let Some(db) = self.playground.interpreter().session().current(catalog) {
            names.extend(db.table_names());
        }
        if let Some(helper) = rl.helper_mut() {
            helper.set_names(names);
        }
    }

    fn print_history(&self) {
        let history = self.playground.history();
        if history.is_empty() {
            println!("  {}", "No statements yet".dimmed());
            return;
        }
        for (i, entry) in history.iter().enumerate() {
            let status = match &entry.outcome {
                Outcome::Success { .. } => "ok".green(),
                Outcome::Error(_) => "error".red(),
            };
            println!("  {:>3}  {:<5}  {}", i + 1, status, entry.statement);
            println!("        {}", entry.message().dimmed());
        }
    }

    fn print_status(&self) {
        let interpreter = self.playground.interpreter();
        println!(
            "  {} {}",
            "Database:".dimmed(),
            interpreter
                .selected_database()
                .unwrap_or("(none)")
                .cyan()
        );
        println!(
            "  {} {}",
            "Databases:".dimmed(),
            interpreter.catalog().databases.len()
        );
        println!("  {} {}", "Storage:".dimmed(), self.location.white());
    }
}

fn print_banner() {
    println!(
        "  {} {}",
        "SQL Playground".white().bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!(
        "  Type {} for help, {} to quit\n",
        ".help".yellow(),
        ".exit".yellow()
    );
}

fn print_help() {
    println!("\n{}", "Commands:".white().bold());
    for (command, description) in DOT_COMMANDS {
        println!("  {:<10} {}", command.yellow(), description);
    }
    println!("\nEnd a line with {} to continue on the next one.", "\\".yellow());
    println!("Type {} to see the SQL this shell understands.\n", ".commands".yellow());
}

fn print_commands() {
    println!("\n{}", "Supported SQL:".white().bold());
    for info in SUPPORTED_COMMANDS {
        println!("  {:<16} {}", info.kind.keyword().cyan(), info.description);
        println!("  {:<16} {}", "", info.example.green());
    }
    println!();
}
