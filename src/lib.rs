pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod playground;
pub mod session;
pub mod sql;
pub mod storage;

pub use catalog::{Catalog, Database, Row, Table, Value};
pub use config::Config;
pub use error::{DbError, DbResult, ErrorKind, ErrorResponse};
pub use playground::{HistoryEntry, Outcome, Playground};
pub use session::Session;
pub use sql::{classify, run, CommandKind, Interpreter, QueryResult};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
