//! Applies validated statements to the catalog and session.
//!
//! Name and arity checks belong to the validator; the executor works from
//! the column positions it resolved. It never mutates its inputs. A statement that changes the
//! catalog works on a clone and hands the whole replacement back in
//! [`Execution`], so a failure part-way leaves the caller's state untouched.

use serde::Serialize;

use super::classifier::CommandKind;
use super::parser::{
    CompareOp, CreateTableStatement, DeleteStatement, InsertStatement, Predicate, Projection,
    SelectStatement, Statement, UpdateStatement,
};
use super::validator::Validated;
use crate::catalog::{same_name, Catalog, Database, Row, Table, Value};
use crate::error::{DbError, DbResult};
use crate::session::Session;

/// Success shape of one statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub kind: CommandKind,
    pub message: String,
    /// Projected column names (SELECT)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    /// Projected rows, aligned with `columns` (SELECT)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<Value>>>,
    /// Rows inserted, updated or deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected: Option<usize>,
}

impl QueryResult {
    fn message(kind: CommandKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            columns: None,
            rows: None,
            affected: None,
        }
    }

    fn affected(kind: CommandKind, count: usize, message: impl Into<String>) -> Self {
        Self {
            affected: Some(count),
            ..Self::message(kind, message)
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.as_ref().map(Vec::len).unwrap_or(0)
    }
}

/// Outcome of executing one statement.
#[derive(Debug, Clone)]
pub struct Execution {
    pub result: QueryResult,
    /// Replacement catalog, when the statement changed it
    pub catalog: Option<Catalog>,
    /// Replacement session, when the statement changed it
    pub session: Option<Session>,
}

impl Execution {
    fn read(result: QueryResult) -> Self {
        Self {
            result,
            catalog: None,
            session: None,
        }
    }

    fn write(result: QueryResult, catalog: Catalog) -> Self {
        Self {
            result,
            catalog: Some(catalog),
            session: None,
        }
    }

    pub fn is_mutation(&self) -> bool {
        self.catalog.is_some() || self.session.is_some()
    }
}

pub fn execute(
    validated: &Validated<'_>,
    catalog: &Catalog,
    session: &Session,
) -> DbResult<Execution> {
    let columns = validated.columns.as_slice();
    match validated.statement {
        Statement::Select(select) => execute_select(select, columns, catalog, session),
        Statement::Insert(insert) => execute_insert(insert, columns, catalog, session),
        Statement::Update(update) => execute_update(update, columns, catalog, session),
        Statement::Delete(delete) => execute_delete(delete, columns, catalog, session),
        Statement::CreateDatabase { name } => {
            let mut next = catalog.clone();
            next.add_database(Database::new(name.clone()));
            tracing::info!("Created database '{}'", name);
            Ok(Execution::write(
                QueryResult::message(
                    CommandKind::CreateDatabase,
                    format!("Database '{}' created successfully", name),
                ),
                next,
            ))
        }
        Statement::Use { name } => {
            let database = catalog
                .database(name)
                .ok_or_else(|| DbError::DatabaseNotFound(name.clone()))?;
            Ok(Execution {
                result: QueryResult::message(
                    CommandKind::Use,
                    format!("Using database '{}'", database.name),
                ),
                catalog: None,
                session: Some(Session::with_database(database.name.clone())),
            })
        }
        Statement::CreateTable(create) => execute_create_table(create, catalog, session),
        Statement::ShowDatabases => {
            let names = catalog.database_names();
            Ok(Execution::read(QueryResult::message(
                CommandKind::ShowDatabases,
                format!("Databases:\n{}", names.join("\n")),
            )))
        }
        Statement::ShowTables => {
            let database = session
                .current(catalog)
                .ok_or(DbError::NoDatabaseSelected)?;
            let message = if database.tables.is_empty() {
                format!("No tables in database '{}'", database.name)
            } else {
                format!(
                    "Tables in '{}':\n{}",
                    database.name,
                    database.table_names().join("\n")
                )
            };
            Ok(Execution::read(QueryResult::message(
                CommandKind::ShowTables,
                message,
            )))
        }
        Statement::DropDatabase { name } => {
            let mut next = catalog.clone();
            let removed = next
                .remove_database(name)
                .ok_or_else(|| DbError::DatabaseNotFound(name.clone()))?;
            tracing::info!("Dropped database '{}'", removed.name);

            // Dropping the selected database leaves nothing selected
            let session = match session.selected_database() {
                Some(selected) if same_name(selected, &removed.name) => Some(Session::new()),
                _ => None,
            };

            Ok(Execution {
                result: QueryResult::message(
                    CommandKind::DropDatabase,
                    format!("Database '{}' dropped successfully", name),
                ),
                catalog: Some(next),
                session,
            })
        }
        Statement::DropTable { name } => {
            let mut next = catalog.clone();
            let database = current_database_mut(&mut next, session)?;
            database
                .remove_table(name)
                .ok_or_else(|| DbError::TableNotFound {
                    table: name.clone(),
                    database: database.name.clone(),
                })?;
            let message = format!("Table '{}' dropped from '{}'", name, database.name);
            tracing::info!("{}", message);
            Ok(Execution::write(
                QueryResult::message(CommandKind::DropTable, message),
                next,
            ))
        }
    }
}

fn current_database<'a>(catalog: &'a Catalog, session: &Session) -> DbResult<&'a Database> {
    session.current(catalog).ok_or(DbError::NoDatabaseSelected)
}

fn current_database_mut<'a>(
    catalog: &'a mut Catalog,
    session: &Session,
) -> DbResult<&'a mut Database> {
    let name = session
        .selected_database()
        .ok_or(DbError::NoDatabaseSelected)?;
    catalog
        .database_mut(name)
        .ok_or(DbError::NoDatabaseSelected)
}

fn lookup_table<'a>(database: &'a Database, name: &str) -> DbResult<&'a Table> {
    database.table(name).ok_or_else(|| DbError::TableNotFound {
        table: name.to_string(),
        database: database.name.clone(),
    })
}

fn lookup_table_mut<'a>(database: &'a mut Database, name: &str) -> DbResult<&'a mut Table> {
    let database_name = database.name.clone();
    database
        .table_mut(name)
        .ok_or_else(|| DbError::TableNotFound {
            table: name.to_string(),
            database: database_name,
        })
}

fn execute_select(
    select: &SelectStatement,
    indexes: &[usize],
    catalog: &Catalog,
    session: &Session,
) -> DbResult<Execution> {
    let database = current_database(catalog, session)?;
    let table = lookup_table(database, &select.table)?;

    let columns = match &select.projection {
        Projection::All => table.columns().to_vec(),
        Projection::Columns(columns) => columns.clone(),
    };

    let rows: Vec<Vec<Value>> = table
        .rows()
        .iter()
        .map(|row| {
            indexes
                .iter()
                .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    tracing::debug!("Selected {} rows from '{}'", rows.len(), table.name);

    Ok(Execution::read(QueryResult {
        kind: CommandKind::Select,
        message: format!("Retrieved {} rows from {}", rows.len(), select.table),
        columns: Some(columns),
        rows: Some(rows),
        affected: None,
    }))
}

fn execute_insert(
    insert: &InsertStatement,
    indexes: &[usize],
    catalog: &Catalog,
    session: &Session,
) -> DbResult<Execution> {
    let mut next = catalog.clone();
    let database = current_database_mut(&mut next, session)?;
    let table = lookup_table_mut(database, &insert.table)?;

    let rows: Vec<Row> = insert
        .rows
        .iter()
        .map(|values| table.build_row(indexes.iter().copied().zip(values.iter())))
        .collect();

    let count = rows.len();
    for row in rows {
        table.push_row(row);
    }
    tracing::info!("Inserted {} rows into '{}'", count, table.name);

    Ok(Execution::write(
        QueryResult::affected(
            CommandKind::Insert,
            count,
            format!("{} rows inserted into {}", count, insert.table),
        ),
        next,
    ))
}

fn execute_update(
    update: &UpdateStatement,
    indexes: &[usize],
    catalog: &Catalog,
    session: &Session,
) -> DbResult<Execution> {
    // Assigned columns first, the WHERE column last
    let Some((&where_index, set_indexes)) = indexes.split_last() else {
        return Err(DbError::UnknownColumn(vec![update.predicate.column.clone()]));
    };

    let mut next = catalog.clone();
    let database = current_database_mut(&mut next, session)?;
    let table = lookup_table_mut(database, &update.table)?;

    let assignments: Vec<(usize, Value)> = set_indexes
        .iter()
        .copied()
        .zip(update.assignments.iter().map(|(_, v)| v.clone()))
        .collect();
    let target = &update.predicate.value;

    let count = table.update_where(&assignments, |row| row.get(where_index) == Some(target));
    tracing::info!("Updated {} rows in '{}'", count, table.name);

    Ok(Execution::write(
        QueryResult::affected(
            CommandKind::Update,
            count,
            format!("Updated {} rows in {}", count, update.table),
        ),
        next,
    ))
}

fn execute_delete(
    delete: &DeleteStatement,
    indexes: &[usize],
    catalog: &Catalog,
    session: &Session,
) -> DbResult<Execution> {
    let Some(&where_index) = indexes.first() else {
        return Err(DbError::UnknownColumn(vec![delete.predicate.column.clone()]));
    };

    let mut next = catalog.clone();
    let database = current_database_mut(&mut next, session)?;
    let table = lookup_table_mut(database, &delete.table)?;
    let predicate = &delete.predicate;

    let count = table.retain_rows(|row| {
        let stored = row.get(where_index).unwrap_or(&Value::Null);
        keeps_row(stored, predicate)
    });
    tracing::info!("Deleted {} rows from '{}'", count, table.name);

    Ok(Execution::write(
        QueryResult::affected(
            CommandKind::Delete,
            count,
            format!("Deleted {} rows from {}", count, delete.table),
        ),
        next,
    ))
}

/// Whether DELETE keeps a row whose WHERE column holds `stored`.
///
/// `=` and `!=` compare the stored text exactly. The ordering operators compare
/// the integer views of both sides and keep the row unless the comparison
/// holds, so a row where either side has no integer view is always kept.
pub fn keeps_row(stored: &Value, predicate: &Predicate) -> bool {
    let target = &predicate.value;
    let ordered = |holds: fn(i64, i64) -> bool| -> bool {
        match (stored.leading_integer(), target.leading_integer()) {
            (Some(a), Some(b)) => !holds(a, b),
            _ => true,
        }
    };

    match predicate.op {
        CompareOp::Eq => stored != target,
        CompareOp::NotEq => stored == target,
        CompareOp::Gt => ordered(|a, b| a > b),
        CompareOp::Lt => ordered(|a, b| a < b),
        CompareOp::GtEq => ordered(|a, b| a >= b),
        CompareOp::LtEq => ordered(|a, b| a <= b),
    }
}

fn execute_create_table(
    create: &CreateTableStatement,
    catalog: &Catalog,
    session: &Session,
) -> DbResult<Execution> {
    let mut next = catalog.clone();
    let database = current_database_mut(&mut next, session)?;
    database.add_table(Table::new(create.name.clone(), create.columns.clone()));
    let message = format!(
        "Table '{}' created in database '{}'",
        create.name, database.name
    );
    tracing::info!("{}", message);

    Ok(Execution::write(
        QueryResult::message(CommandKind::CreateTable, message),
        next,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predicate(op: CompareOp, value: Value) -> Predicate {
        Predicate {
            column: "age".to_string(),
            op,
            value,
        }
    }

    #[test]
    fn test_equality_keeps_non_matching() {
        let p = predicate(CompareOp::Eq, Value::from("Ana"));
        assert!(!keeps_row(&Value::from("Ana"), &p));
        assert!(keeps_row(&Value::from("Bo"), &p));
        assert!(keeps_row(&Value::Null, &p));

        let p = predicate(CompareOp::NotEq, Value::from("Ana"));
        assert!(keeps_row(&Value::from("Ana"), &p));
        assert!(!keeps_row(&Value::from("Bo"), &p));
    }

    #[test]
    fn test_equality_compares_text() {
        let p = predicate(CompareOp::Eq, Value::from("30"));
        assert!(!keeps_row(&Value::from("30"), &p));
        assert!(keeps_row(&Value::from("030"), &p));
        assert!(keeps_row(&Value::from("30.0"), &p));
    }

    #[test]
    fn test_ordering_operators() {
        let p = predicate(CompareOp::Gt, Value::from("30"));
        assert!(!keeps_row(&Value::from("31"), &p));
        assert!(keeps_row(&Value::from("30"), &p));
        assert!(!keeps_row(&Value::from("045"), &p));

        let p = predicate(CompareOp::LtEq, Value::from("30"));
        assert!(!keeps_row(&Value::from("30"), &p));
        assert!(keeps_row(&Value::from("31"), &p));
    }

    #[test]
    fn test_ordering_keeps_rows_without_numbers() {
        // Documented behaviour: no integer view on either side keeps the row
        for op in [CompareOp::Gt, CompareOp::Lt, CompareOp::GtEq, CompareOp::LtEq] {
            let p = predicate(op, Value::from("0"));
            assert!(keeps_row(&Value::from("abc"), &p));
            assert!(keeps_row(&Value::Null, &p));

            let p = predicate(op, Value::from("many"));
            assert!(keeps_row(&Value::from("5"), &p));
        }
    }

    #[test]
    fn test_ordering_truncates_like_integer_parsing() {
        let p = predicate(CompareOp::Gt, Value::from("10"));
        assert!(keeps_row(&Value::from("10.9"), &p));
        assert!(!keeps_row(&Value::from("11 apples"), &p));
    }

    #[test]
    fn test_execution_flags() {
        let read = Execution::read(QueryResult::message(CommandKind::ShowDatabases, "x"));
        assert!(!read.is_mutation());

        let write = Execution::write(
            QueryResult::message(CommandKind::CreateDatabase, "x"),
            Catalog::new(),
        );
        assert!(write.is_mutation());
    }

    #[test]
    fn test_result_serialization_skips_absent_fields() {
        let result = QueryResult::affected(CommandKind::Insert, 2, "2 rows inserted into t");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "Insert");
        assert_eq!(json["affected"], 2);
        assert!(json.get("rows").is_none());
        assert!(json.get("columns").is_none());
    }
}
