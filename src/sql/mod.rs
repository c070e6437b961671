//! The statement interpreter.
//!
//! Raw text goes through [`classify`], [`parse_statement`], [`validate`] and
//! [`execute`]; [`run`] chains them and [`Interpreter`] keeps the resulting
//! catalog and session between calls.

pub mod classifier;
pub mod executor;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod validator;

pub use classifier::{classify, CommandKind};
pub use executor::{execute, keeps_row, Execution, QueryResult};
pub use interpreter::{run, Interpreter};
pub use lexer::{Span, SqlLexer, Token};
pub use parser::{
    parse_statement, CompareOp, CreateTableStatement, DeleteStatement, InsertStatement,
    Predicate, Projection, SelectStatement, SqlParser, Statement, UpdateStatement,
};
pub use validator::{validate, Validated};
