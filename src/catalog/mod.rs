//! In-memory catalog: databases, their tables and rows.
//!
//! Pure data model. Lookups by name are case-insensitive; names are stored
//! as originally written.

mod table;
mod value;

pub use table::{Row, Table};
pub use value::Value;

use serde::{Deserialize, Serialize};

/// Case-insensitive name comparison used for databases and tables.
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// A named database holding an ordered list of tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    /// Database name
    pub name: String,
    /// Tables in creation order
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| same_name(&t.name, name))
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| same_name(&t.name, name))
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.table(name).is_some()
    }

    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Removes the table, returning it if it existed.
    pub fn remove_table(&mut self, name: &str) -> Option<Table> {
        let index = self.tables.iter().position(|t| same_name(&t.name, name))?;
        Some(self.tables.remove(index))
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name.clone()).collect()
    }
}

/// The full set of databases known to one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub databases: Vec<Database>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database(&self, name: &str) -> Option<&Database> {
        self.databases.iter().find(|db| same_name(&db.name, name))
    }

    pub fn database_mut(&mut self, name: &str) -> Option<&mut Database> {
        self.databases.iter_mut().find(|db| same_name(&db.name, name))
    }

    pub fn has_database(&self, name: &str) -> bool {
        self.database(name).is_some()
    }

    pub fn add_database(&mut self, database: Database) {
        self.databases.push(database);
    }

    /// Removes the database, returning it if it existed.
    pub fn remove_database(&mut self, name: &str) -> Option<Database> {
        let index = self
            .databases
            .iter()
            .position(|db| same_name(&db.name, name))?;
        Some(self.databases.remove(index))
    }

    pub fn database_names(&self) -> Vec<String> {
        self.databases.iter().map(|db| db.name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }
}
