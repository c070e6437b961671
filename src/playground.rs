//! A persisted interpreter session.
//!
//! [`Playground`] pairs an [`Interpreter`] with a [`KeyValueStore`]. State is
//! restored from the store when it opens. A statement that changes the
//! catalog or the selection is saved before it takes effect in memory, so a
//! failed save leaves both sides as they were. It also keeps the
//! log of statements run in this session.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{DbError, DbResult, ErrorResponse};
use crate::session::Session;
use crate::sql::{Execution, Interpreter, QueryResult};
use crate::storage::{load_state, save_state, KeyValueStore};

/// One executed statement and how it ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub statement: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Success { message: String },
    Error(ErrorResponse),
}

impl HistoryEntry {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match &self.outcome {
            Outcome::Success { message } => message,
            Outcome::Error(response) => &response.message,
        }
    }
}

pub struct Playground<S: KeyValueStore> {
    interpreter: Interpreter,
    store: S,
    history: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> Playground<S> {
    /// Opens a playground over `store`, restoring whatever it holds.
    pub fn open(store: S) -> DbResult<Self> {
        let (catalog, session) = load_state(&store)?;
        tracing::info!(
            "Restored {} databases (selected: {:?})",
            catalog.databases.len(),
            session.selected_database()
        );

        Ok(Self {
            interpreter: Interpreter::with_state(catalog, session),
            store,
            history: Vec::new(),
        })
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn selected_database(&self) -> Option<&str> {
        self.interpreter.selected_database()
    }

    /// Executes one statement and records it in the history.
    ///
    /// A statement whose new state could not be saved is reported as a
    /// storage error and not applied.
    pub fn run(&mut self, sql: &str) -> DbResult<QueryResult> {
        let statement = sql.trim();
        let outcome = self
            .interpreter
            .prepare(statement)
            .and_then(|execution| self.commit(execution));

        self.record(statement, &outcome);
        outcome
    }

    /// Drops all state, in the store and then in memory.
    pub fn reset(&mut self) -> DbResult<()> {
        save_state(&mut self.store, &Catalog::new(), &Session::new())?;
        self.interpreter.reset();
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn commit(&mut self, execution: Execution) -> DbResult<QueryResult> {
        if execution.is_mutation() {
            let catalog = execution
                .catalog
                .as_ref()
                .unwrap_or(self.interpreter.catalog());
            let session = execution
                .session
                .as_ref()
                .unwrap_or(self.interpreter.session());
            save_state(&mut self.store, catalog, session)?;
        }
        Ok(self.interpreter.apply(execution))
    }

    fn record(&mut self, statement: &str, outcome: &Result<QueryResult, DbError>) {
        let outcome = match outcome {
            Ok(result) => Outcome::Success {
                message: result.message.clone(),
            },
            Err(e) => {
                tracing::debug!("Statement failed: {}", e);
                Outcome::Error(e.to_response())
            }
        };
        self.history.push(HistoryEntry {
            statement: statement.to_string(),
            outcome,
        });
    }
}
