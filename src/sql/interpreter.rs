use super::classifier::classify;
use super::executor::{execute, Execution, QueryResult};
use super::parser::parse_statement;
use super::validator::validate;
use crate::catalog::Catalog;
use crate::error::DbResult;
use crate::session::Session;

/// Runs one statement through classify, parse, validate and execute.
///
/// `catalog` and `session` are only read; any change comes back as a
/// replacement in the returned [`Execution`].
pub fn run(sql: &str, catalog: &Catalog, session: &Session) -> DbResult<Execution> {
    let kind = classify(sql)?;
    let statement = parse_statement(sql, kind)?;
    tracing::debug!("Parsed {} statement: {:?}", kind, statement);

    let validated = validate(&statement, catalog, session)?;
    execute(&validated, catalog, session)
}

/// Interpreter state for one session: its catalog and selected database.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    catalog: Catalog,
    session: Session,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from restored state. A selection naming a database that is not
    /// in `catalog` is dropped.
    pub fn with_state(catalog: Catalog, mut session: Session) -> Self {
        if !session.is_valid_for(&catalog) {
            tracing::warn!(
                "Selected database '{}' is not in the catalog, clearing selection",
                session.selected_database().unwrap_or_default()
            );
            session.clear();
        }
        Self { catalog, session }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selected_database(&self) -> Option<&str> {
        self.session.selected_database()
    }

    /// Executes one statement. On error nothing changes.
    pub fn execute(&mut self, sql: &str) -> DbResult<QueryResult> {
        let execution = self.prepare(sql)?;
        Ok(self.apply(execution))
    }

    /// Runs `sql` against the current state without changing it.
    pub fn prepare(&self, sql: &str) -> DbResult<Execution> {
        run(sql, &self.catalog, &self.session)
    }

    /// Takes on the state changes of a prepared statement.
    pub fn apply(&mut self, execution: Execution) -> QueryResult {
        if let Some(catalog) = execution.catalog {
            self.catalog = catalog;
        }
        if let Some(session) = execution.session {
            self.session = session;
        }
        execution.result
    }

    /// Drops every database and the selection.
    pub fn reset(&mut self) {
        self.catalog = Catalog::new();
        self.session = Session::new();
    }
}
