use serde::Serialize;
use std::fmt;

use crate::error::{DbError, DbResult};

/// The eleven statement kinds the dialect understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CommandKind {
    Select,
    Insert,
    Update,
    Delete,
    CreateDatabase,
    Use,
    CreateTable,
    ShowDatabases,
    ShowTables,
    DropDatabase,
    DropTable,
}

/// Lowercase prefixes in matching order; the first one that matches wins.
const PREFIXES: [(&str, CommandKind); 11] = [
    ("select", CommandKind::Select),
    ("insert into", CommandKind::Insert),
    ("update", CommandKind::Update),
    ("delete from", CommandKind::Delete),
    ("create database", CommandKind::CreateDatabase),
    ("use", CommandKind::Use),
    ("create table", CommandKind::CreateTable),
    ("show databases", CommandKind::ShowDatabases),
    ("show tables", CommandKind::ShowTables),
    ("drop database", CommandKind::DropDatabase),
    ("drop table", CommandKind::DropTable),
];

impl CommandKind {
    pub const ALL: [CommandKind; 11] = [
        CommandKind::CreateDatabase,
        CommandKind::Use,
        CommandKind::CreateTable,
        CommandKind::Insert,
        CommandKind::Select,
        CommandKind::Update,
        CommandKind::Delete,
        CommandKind::ShowDatabases,
        CommandKind::ShowTables,
        CommandKind::DropDatabase,
        CommandKind::DropTable,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            CommandKind::Select => "SELECT",
            CommandKind::Insert => "INSERT INTO",
            CommandKind::Update => "UPDATE",
            CommandKind::Delete => "DELETE FROM",
            CommandKind::CreateDatabase => "CREATE DATABASE",
            CommandKind::Use => "USE",
            CommandKind::CreateTable => "CREATE TABLE",
            CommandKind::ShowDatabases => "SHOW DATABASES",
            CommandKind::ShowTables => "SHOW TABLES",
            CommandKind::DropDatabase => "DROP DATABASE",
            CommandKind::DropTable => "DROP TABLE",
        }
    }

    /// Statements that need a selected database.
    pub fn is_table_scoped(&self) -> bool {
        matches!(
            self,
            CommandKind::Select
                | CommandKind::Insert
                | CommandKind::Update
                | CommandKind::Delete
                | CommandKind::CreateTable
                | CommandKind::ShowTables
                | CommandKind::DropTable
        )
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Determines the command kind of a raw statement.
///
/// Matching is a case-insensitive prefix test on the trimmed text. The SHOW
/// statements are only recognised in their exact terminated form
/// (`show databases;`, `show tables;`).
pub fn classify(sql: &str) -> DbResult<CommandKind> {
    let normalized = sql.trim().to_lowercase();

    let kind = PREFIXES
        .iter()
        .find(|(prefix, _)| normalized.starts_with(prefix))
        .map(|(_, kind)| *kind);

    match kind {
        Some(CommandKind::ShowDatabases) if normalized != "show databases;" => {
            Err(unsupported(sql))
        }
        Some(CommandKind::ShowTables) if normalized != "show tables;" => Err(unsupported(sql)),
        Some(kind) => Ok(kind),
        None => Err(unsupported(sql)),
    }
}

fn unsupported(sql: &str) -> DbError {
    let first = sql.split_whitespace().next().unwrap_or_default();
    DbError::UnsupportedCommand(first.to_string())
}
