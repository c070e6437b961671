//! Common test utilities
//!
//! Provides shared helpers for:
//! - Building interpreters with a database already selected
//! - Opening file-backed playgrounds in a temp dir
//! - Reading table contents back out of a catalog

#![allow(dead_code)]

use sqlplay::{FileStore, Interpreter, Playground, Value};
use tempfile::TempDir;

/// Interpreter with `shop` created and selected.
pub fn shop() -> Interpreter {
    let mut interp = Interpreter::new();
    interp.execute("CREATE DATABASE shop;").unwrap();
    interp.execute("USE shop;").unwrap();
    interp
}

/// `shop` plus `users (name, email)` holding Ana.
pub fn shop_with_users() -> Interpreter {
    let mut interp = shop();
    interp.execute("CREATE TABLE users (name, email);").unwrap();
    interp
        .execute("INSERT INTO users (name, email) VALUES ('Ana','a@x.com');")
        .unwrap();
    interp
}

/// Runs each statement, panicking on the first failure.
pub fn run_all(interp: &mut Interpreter, statements: &[&str]) {
    for sql in statements {
        if let Err(e) = interp.execute(sql) {
            panic!("{} failed: {}", sql, e);
        }
    }
}

pub fn row_count(interp: &Interpreter, table: &str) -> usize {
    let catalog = interp.catalog();
    let db = interp
        .session()
        .current(catalog)
        .expect("no database selected");
    db.table(table).expect("no such table").len()
}

pub fn select_all(interp: &mut Interpreter, table: &str) -> Vec<Vec<Value>> {
    interp
        .execute(&format!("SELECT * FROM {};", table))
        .unwrap()
        .rows
        .unwrap_or_default()
}

pub fn open_file_playground(dir: &TempDir) -> Playground<FileStore> {
    let store = FileStore::in_dir(dir.path()).expect("Failed to open store");
    Playground::open(store).expect("Failed to open playground")
}
