use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Database};

/// Per-session context: which database table-scoped statements run against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    selected_database: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(name: impl Into<String>) -> Self {
        Self {
            selected_database: Some(name.into()),
        }
    }

    pub fn selected_database(&self) -> Option<&str> {
        self.selected_database.as_deref()
    }

    pub fn clear(&mut self) {
        self.selected_database = None;
    }

    /// Resolves the selected database in `catalog`. A selection naming a
    /// database that no longer exists resolves to nothing.
    pub fn current<'a>(&self, catalog: &'a Catalog) -> Option<&'a Database> {
        self.selected_database
            .as_deref()
            .and_then(|name| catalog.database(name))
    }

    /// True when the selection is empty or names an existing database.
    pub fn is_valid_for(&self, catalog: &Catalog) -> bool {
        match &self.selected_database {
            None => true,
            Some(name) => catalog.has_database(name),
        }
    }
}
