//! Semantic checks of a parsed statement against the current catalog.
//!
//! Checks run in a fixed order and stop at the first failure:
//! selected database, target table, referenced columns, insert arity,
//! then database existence for the database-level statements.

use super::parser::{Projection, Statement};
use crate::catalog::{Catalog, Database, Table};
use crate::error::{DbError, DbResult};
use crate::session::Session;

/// A statement that passed [`validate`], with its column names resolved to
/// positions in the target table.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<'a> {
    pub statement: &'a Statement,
    /// SELECT: projected columns (all of them for `*`). INSERT: the listed
    /// columns. UPDATE: the assigned columns, then the WHERE column.
    /// DELETE: the WHERE column. Empty for everything else.
    pub columns: Vec<usize>,
}

pub fn validate<'a>(
    statement: &'a Statement,
    catalog: &Catalog,
    session: &Session,
) -> DbResult<Validated<'a>> {
    if statement.kind().is_table_scoped() {
        let database = session
            .current(catalog)
            .ok_or(DbError::NoDatabaseSelected)?;
        let columns = validate_table_scoped(statement, database)?;
        return Ok(Validated { statement, columns });
    }

    match statement {
        Statement::CreateDatabase { name } => {
            if catalog.has_database(name) {
                return Err(DbError::DatabaseAlreadyExists(name.clone()));
            }
        }
        Statement::DropDatabase { name } | Statement::Use { name } => {
            if !catalog.has_database(name) {
                return Err(DbError::DatabaseNotFound(name.clone()));
            }
        }
        _ => {}
    }

    Ok(Validated {
        statement,
        columns: Vec::new(),
    })
}

fn validate_table_scoped(statement: &Statement, database: &Database) -> DbResult<Vec<usize>> {
    if let Statement::CreateTable(create) = statement {
        if database.has_table(&create.name) {
            return Err(DbError::TableAlreadyExists {
                table: create.name.clone(),
                database: database.name.clone(),
            });
        }
        return Ok(Vec::new());
    }

    let Some(table_name) = statement.target_table() else {
        // SHOW TABLES only needs the database
        return Ok(Vec::new());
    };
    let table = database
        .table(table_name)
        .ok_or_else(|| DbError::TableNotFound {
            table: table_name.to_string(),
            database: database.name.clone(),
        })?;

    let columns = resolve_columns(statement, table)?;

    if let Statement::Insert(insert) = statement {
        let expected = insert.columns.len();
        for (index, row) in insert.rows.iter().enumerate() {
            if row.len() != expected {
                return Err(DbError::ArityMismatch {
                    row: index + 1,
                    expected,
                    actual: row.len(),
                });
            }
        }
    }

    Ok(columns)
}

fn resolve_columns(statement: &Statement, table: &Table) -> DbResult<Vec<usize>> {
    let referenced: Vec<&String> = match statement {
        Statement::Select(select) => match &select.projection {
            Projection::All => return Ok((0..table.columns().len()).collect()),
            Projection::Columns(columns) => columns.iter().collect(),
        },
        Statement::Insert(insert) => insert.columns.iter().collect(),
        Statement::Update(update) => update
            .assignments
            .iter()
            .map(|(column, _)| column)
            .chain(std::iter::once(&update.predicate.column))
            .collect(),
        Statement::Delete(delete) => vec![&delete.predicate.column],
        _ => Vec::new(),
    };

    let missing = table.missing_columns(referenced.iter().copied());
    if !missing.is_empty() {
        return Err(DbError::UnknownColumn(missing));
    }

    Ok(referenced
        .into_iter()
        .filter_map(|name| table.column_index(name))
        .collect())
}
