use std::fmt;

use super::classifier::CommandKind;
use super::lexer::{Span, SqlLexer, Token};
use crate::catalog::Value;
use crate::error::{DbError, DbResult};

/// SQL Abstract Syntax Tree types

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    CreateDatabase { name: String },
    Use { name: String },
    CreateTable(CreateTableStatement),
    ShowDatabases,
    ShowTables,
    DropDatabase { name: String },
    DropTable { name: String },
}

impl Statement {
    pub fn kind(&self) -> CommandKind {
        match self {
            Statement::Select(_) => CommandKind::Select,
            Statement::Insert(_) => CommandKind::Insert,
            Statement::Update(_) => CommandKind::Update,
            Statement::Delete(_) => CommandKind::Delete,
            Statement::CreateDatabase { .. } => CommandKind::CreateDatabase,
            Statement::Use { .. } => CommandKind::Use,
            Statement::CreateTable(_) => CommandKind::CreateTable,
            Statement::ShowDatabases => CommandKind::ShowDatabases,
            Statement::ShowTables => CommandKind::ShowTables,
            Statement::DropDatabase { .. } => CommandKind::DropDatabase,
            Statement::DropTable { .. } => CommandKind::DropTable,
        }
    }

    /// Table the statement works on, for table-scoped statements that
    /// require it to exist.
    pub fn target_table(&self) -> Option<&str> {
        match self {
            Statement::Select(s) => Some(&s.table),
            Statement::Insert(s) => Some(&s.table),
            Statement::Update(s) => Some(&s.table),
            Statement::Delete(s) => Some(&s.table),
            Statement::DropTable { name } => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    All,
    Columns(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub table: String,
    pub projection: Projection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub table: String,
    pub assignments: Vec<(String, Value)>,
    pub predicate: Predicate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub table: String,
    pub predicate: Predicate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    pub name: String,
    pub columns: Vec<String>,
}

/// `column <op> value`, the only WHERE form the dialect has.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub op: CompareOp,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
        };
        f.write_str(symbol)
    }
}

/// Whether a trailing `;` must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Required,
    Optional,
}

/// Parses `sql`, already classified as `kind`, into a [`Statement`].
///
/// Syntax errors are reported as `invalid <KIND> statement: <detail>`.
pub fn parse_statement(sql: &str, kind: CommandKind) -> DbResult<Statement> {
    SqlParser::new(sql)
        .and_then(|mut parser| parser.parse(kind))
        .map_err(|err| match err {
            DbError::SyntaxError(detail) => {
                DbError::SyntaxError(format!("invalid {} statement: {}", kind, detail))
            }
            other => other,
        })
}

/// SQL Parser
pub struct SqlParser {
    tokens: Vec<Token>,
    spans: Vec<Span>,
    source: Vec<char>,
    position: usize,
}

impl SqlParser {
    pub fn new(input: &str) -> DbResult<Self> {
        let mut lexer = SqlLexer::new(input);
        let (tokens, spans) = lexer.tokenize_spanned()?.into_iter().unzip();

        Ok(Self {
            tokens,
            spans,
            source: input.chars().collect(),
            position: 0,
        })
    }

    fn current_token(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn unexpected(&self, expected: &str) -> DbError {
        DbError::syntax(format!(
            "expected {}, found {}",
            expected,
            self.current_token()
        ))
    }

    fn expect(&mut self, expected: Token) -> DbResult<()> {
        if *self.current_token() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> DbResult<String> {
        match self.current_token().clone() {
            Token::Identifier(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    /// Consumes the optional `;` and requires nothing to follow it.
    fn finish(&mut self, terminator: Terminator) -> DbResult<()> {
        if *self.current_token() == Token::Semicolon {
            self.advance();
        } else if terminator == Terminator::Required {
            return Err(self.unexpected("';'"));
        }

        match self.current_token() {
            Token::Eof => Ok(()),
            other => Err(DbError::syntax(format!(
                "unexpected {} after end of statement",
                other
            ))),
        }
    }

    pub fn parse(&mut self, kind: CommandKind) -> DbResult<Statement> {
        match kind {
            CommandKind::Select => self.parse_select(),
            CommandKind::Insert => self.parse_insert(),
            CommandKind::Update => self.parse_update(),
            CommandKind::Delete => self.parse_delete(),
            CommandKind::CreateDatabase => {
                self.expect(Token::Create)?;
                self.expect(Token::Database)?;
                let name = self.expect_identifier("database name")?;
                self.finish(Terminator::Optional)?;
                Ok(Statement::CreateDatabase { name })
            }
            CommandKind::Use => {
                self.expect(Token::Use)?;
                let name = self.expect_identifier("database name")?;
                self.finish(Terminator::Optional)?;
                Ok(Statement::Use { name })
            }
            CommandKind::CreateTable => self.parse_create_table(),
            CommandKind::ShowDatabases => {
                self.expect(Token::Show)?;
                self.expect(Token::Databases)?;
                self.finish(Terminator::Required)?;
                Ok(Statement::ShowDatabases)
            }
            CommandKind::ShowTables => {
                self.expect(Token::Show)?;
                self.expect(Token::Tables)?;
                self.finish(Terminator::Required)?;
                Ok(Statement::ShowTables)
            }
            CommandKind::DropDatabase => {
                self.expect(Token::Drop)?;
                self.expect(Token::Database)?;
                let name = self.expect_identifier("database name")?;
                self.finish(Terminator::Optional)?;
                Ok(Statement::DropDatabase { name })
            }
            CommandKind::DropTable => {
                self.expect(Token::Drop)?;
                self.expect(Token::Table)?;
                let name = self.expect_identifier("table name")?;
                self.finish(Terminator::Optional)?;
                Ok(Statement::DropTable { name })
            }
        }
    }

    fn parse_select(&mut self) -> DbResult<Statement> {
        self.expect(Token::Select)?;

        // A `*` anywhere in the list selects every column
        let mut select_all = false;
        let mut columns = Vec::new();
        loop {
            if *self.current_token() == Token::Star {
                self.advance();
                select_all = true;
            } else {
                columns.push(self.expect_identifier("column name or '*'")?);
            }

            if *self.current_token() == Token::Comma {
                self.advance();
            } else {
                break;
            }
        }

        self.expect(Token::From)?;
        let table = self.expect_identifier("table name")?;
        self.finish(Terminator::Optional)?;

        let projection = if select_all {
            Projection::All
        } else {
            Projection::Columns(columns)
        };

        Ok(Statement::Select(SelectStatement { table, projection }))
    }

    fn parse_insert(&mut self) -> DbResult<Statement> {
        self.expect(Token::Insert)?;
        self.expect(Token::Into)?;

        let table = self.expect_identifier("table name")?;

        self.expect(Token::LeftParen)?;
        let columns = self.parse_identifier_list()?;
        self.expect(Token::RightParen)?;

        self.expect(Token::Values)?;

        let mut rows = Vec::new();
        loop {
            self.expect(Token::LeftParen)?;
            let mut row = Vec::new();
            loop {
                row.push(self.parse_value(&[Token::Comma, Token::RightParen])?);
                if *self.current_token() == Token::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
            self.expect(Token::RightParen)?;
            rows.push(row);

            if *self.current_token() == Token::Comma {
                self.advance();
            } else {
                break;
            }
        }

        self.finish(Terminator::Required)?;

        Ok(Statement::Insert(InsertStatement {
            table,
            columns,
            rows,
        }))
    }

    fn parse_update(&mut self) -> DbResult<Statement> {
        self.expect(Token::Update)?;

        let table = self.expect_identifier("table name")?;

        self.expect(Token::Set)?;

        let mut assignments = Vec::new();
        loop {
            let column = self.expect_identifier("column name")?;
            self.expect(Token::Equal)?;
            let value = self.parse_value(&[Token::Comma, Token::Where])?;
            assignments.push((column, value));

            if *self.current_token() == Token::Comma {
                self.advance();
            } else {
                break;
            }
        }

        self.expect(Token::Where)?;
        let predicate = self.parse_predicate()?;
        if predicate.op != CompareOp::Eq {
            return Err(DbError::UnsupportedOperator(predicate.op.to_string()));
        }

        self.finish(Terminator::Required)?;

        Ok(Statement::Update(UpdateStatement {
            table,
            assignments,
            predicate,
        }))
    }

    fn parse_delete(&mut self) -> DbResult<Statement> {
        self.expect(Token::Delete)?;
        self.expect(Token::From)?;

        let table = self.expect_identifier("table name")?;

        self.expect(Token::Where)?;
        let predicate = self.parse_predicate()?;

        self.finish(Terminator::Required)?;

        Ok(Statement::Delete(DeleteStatement { table, predicate }))
    }

    fn parse_create_table(&mut self) -> DbResult<Statement> {
        self.expect(Token::Create)?;
        self.expect(Token::Table)?;

        let name = self.expect_identifier("table name")?;

        self.expect(Token::LeftParen)?;
        let mut columns: Vec<String> = Vec::new();
        loop {
            let column = self.expect_identifier("column name")?;
            if columns.contains(&column) {
                return Err(DbError::syntax(format!("duplicate column '{}'", column)));
            }
            columns.push(column);

            // Type and constraint words after the name are discarded
            self.skip_column_definition()?;

            match self.current_token() {
                Token::Comma => self.advance(),
                Token::RightParen => {
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected("',' or ')'")),
            }
        }

        self.finish(Terminator::Optional)?;

        Ok(Statement::CreateTable(CreateTableStatement { name, columns }))
    }

    /// Skips to the `,` or `)` that ends the current column definition,
    /// stepping over nested parentheses such as `DECIMAL(10,2)`.
    fn skip_column_definition(&mut self) -> DbResult<()> {
        let mut depth = 0usize;
        loop {
            match self.current_token() {
                Token::Eof => return Err(self.unexpected("')'")),
                Token::Comma | Token::RightParen if depth == 0 => return Ok(()),
                Token::LeftParen => depth += 1,
                Token::RightParen => depth -= 1,
                _ => {}
            }
            self.advance();
        }
    }

    fn parse_identifier_list(&mut self) -> DbResult<Vec<String>> {
        let mut list = Vec::new();

        loop {
            list.push(self.expect_identifier("column name")?);

            if *self.current_token() == Token::Comma {
                self.advance();
            } else {
                break;
            }
        }

        Ok(list)
    }

    fn parse_predicate(&mut self) -> DbResult<Predicate> {
        let column = self.expect_identifier("column name")?;

        let op = match self.current_token() {
            Token::Equal => CompareOp::Eq,
            Token::NotEqual => CompareOp::NotEq,
            Token::LessThan => CompareOp::Lt,
            Token::LessThanEq => CompareOp::LtEq,
            Token::GreaterThan => CompareOp::Gt,
            Token::GreaterThanEq => CompareOp::GtEq,
            Token::Operator(op) => return Err(DbError::UnsupportedOperator(op.clone())),
            _ => return Err(self.unexpected("comparison operator")),
        };
        self.advance();

        let value = self.parse_value(&[Token::Semicolon])?;

        Ok(Predicate { column, op, value })
    }

    /// A value, read up to the first token in `stops`.
    ///
    /// A lone quoted string gives its content and a lone `NULL` gives
    /// [`Value::Null`]. Anything else is kept as the source text it spans,
    /// so `555-1234`, `1.50` and `02134` come back exactly as written.
    fn parse_value(&mut self, stops: &[Token]) -> DbResult<Value> {
        let first = self.position;
        while *self.current_token() != Token::Eof && !stops.contains(self.current_token()) {
            self.advance();
        }
        let last = match self.position.checked_sub(1) {
            Some(last) if last >= first => last,
            _ => return Err(self.unexpected("value")),
        };

        if first == last {
            match &self.tokens[first] {
                Token::String(s) => return Ok(Value::String(s.clone())),
                Token::Null => return Ok(Value::Null),
                _ => {}
            }
        }

        let text: String = self.source[self.spans[first].start..self.spans[last].end]
            .iter()
            .collect();
        Ok(Value::String(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(input: &str, kind: CommandKind) -> Statement {
        parse_statement(input, kind).unwrap()
    }

    fn parse_err(input: &str, kind: CommandKind) -> DbError {
        parse_statement(input, kind).unwrap_err()
    }

    #[test]
    fn test_select_star() {
        let stmt = parse("SELECT * FROM users;", CommandKind::Select);
        if let Statement::Select(s) = stmt {
            assert_eq!(s.table, "users");
            assert_eq!(s.projection, Projection::All);
        } else {
            panic!("Expected SELECT statement");
        }
    }

    #[test]
    fn test_select_columns() {
        let stmt = parse("select name, email from Users", CommandKind::Select);
        if let Statement::Select(s) = stmt {
            assert_eq!(s.table, "Users");
            assert_eq!(
                s.projection,
                Projection::Columns(vec!["name".to_string(), "email".to_string()])
            );
        } else {
            panic!("Expected SELECT statement");
        }
    }

    #[test]
    fn test_select_star_anywhere_selects_all() {
        let stmt = parse("SELECT name, * FROM users;", CommandKind::Select);
        if let Statement::Select(s) = stmt {
            assert_eq!(s.projection, Projection::All);
        } else {
            panic!("Expected SELECT statement");
        }
    }

    #[test]
    fn test_select_without_table() {
        let err = parse_err("SELECT * FROM;", CommandKind::Select);
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
        assert_eq!(
            err.to_string(),
            "Syntax error: invalid SELECT statement: expected table name, found ;"
        );
    }

    #[test]
    fn test_select_rejects_trailing_clause() {
        let err = parse_err("SELECT * FROM users WHERE a = 1;", CommandKind::Select);
        assert!(err.to_string().contains("unexpected WHERE after end of statement"));
    }

    #[test]
    fn test_insert_single_row() {
        let stmt = parse(
            "INSERT INTO users (name, email) VALUES ('Ana','a@x.com');",
            CommandKind::Insert,
        );
        if let Statement::Insert(s) = stmt {
            assert_eq!(s.table, "users");
            assert_eq!(s.columns, vec!["name".to_string(), "email".to_string()]);
            assert_eq!(
                s.rows,
                vec![vec![Value::from("Ana"), Value::from("a@x.com")]]
            );
        } else {
            panic!("Expected INSERT statement");
        }
    }

    #[test]
    fn test_insert_multiple_rows() {
        let stmt = parse(
            "INSERT INTO t (a, b) VALUES (1, 'x') ,\n ( -2.5 , true ),(null, bare);",
            CommandKind::Insert,
        );
        if let Statement::Insert(s) = stmt {
            assert_eq!(s.rows.len(), 3);
            assert_eq!(s.rows[0], vec![Value::from("1"), Value::from("x")]);
            assert_eq!(s.rows[1], vec![Value::from("-2.5"), Value::from("true")]);
            assert_eq!(s.rows[2], vec![Value::Null, Value::from("bare")]);
        } else {
            panic!("Expected INSERT statement");
        }
    }

    #[test]
    fn test_bare_values_keep_source_text() {
        let stmt = parse(
            "INSERT INTO t (phone, price, zip, big) VALUES (555-1234, 1.50, 02134, 12345678901234567890);",
            CommandKind::Insert,
        );
        if let Statement::Insert(s) = stmt {
            assert_eq!(
                s.rows,
                vec![vec![
                    Value::from("555-1234"),
                    Value::from("1.50"),
                    Value::from("02134"),
                    Value::from("12345678901234567890"),
                ]]
            );
        } else {
            panic!("Expected INSERT statement");
        }
    }

    #[test]
    fn test_bare_value_with_punctuation() {
        let stmt = parse(
            "DELETE FROM users WHERE email = a@x.com;",
            CommandKind::Delete,
        );
        if let Statement::Delete(s) = stmt {
            assert_eq!(s.predicate.value, Value::from("a@x.com"));
        } else {
            panic!("Expected DELETE statement");
        }
    }

    #[test]
    fn test_missing_value() {
        let err = parse_err("INSERT INTO t (a, b) VALUES (1, );", CommandKind::Insert);
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
        assert!(err.to_string().contains("expected value, found )"));

        let err = parse_err("UPDATE t SET a = WHERE b = 1;", CommandKind::Update);
        assert!(err.to_string().contains("expected value, found WHERE"));
    }

    #[test]
    fn test_insert_keeps_commas_inside_strings() {
        let stmt = parse(
            "INSERT INTO t (a) VALUES ('Smith, Jane');",
            CommandKind::Insert,
        );
        if let Statement::Insert(s) = stmt {
            assert_eq!(s.rows, vec![vec![Value::from("Smith, Jane")]]);
        } else {
            panic!("Expected INSERT statement");
        }
    }

    #[test]
    fn test_insert_requires_terminator() {
        let err = parse_err("INSERT INTO t (a) VALUES (1)", CommandKind::Insert);
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
        assert!(err.to_string().contains("expected ';'"));
    }

    #[test]
    fn test_insert_arity_is_not_a_syntax_error() {
        // Arity is checked later, against the column list
        let stmt = parse("INSERT INTO t (a, b) VALUES (1);", CommandKind::Insert);
        if let Statement::Insert(s) = stmt {
            assert_eq!(s.rows[0].len(), 1);
        } else {
            panic!("Expected INSERT statement");
        }
    }

    #[test]
    fn test_update() {
        let stmt = parse(
            "UPDATE users SET name = 'Jane', age = 31 WHERE email = 'john@example.com';",
            CommandKind::Update,
        );
        if let Statement::Update(s) = stmt {
            assert_eq!(s.table, "users");
            assert_eq!(
                s.assignments,
                vec![
                    ("name".to_string(), Value::from("Jane")),
                    ("age".to_string(), Value::from("31")),
                ]
            );
            assert_eq!(s.predicate.column, "email");
            assert_eq!(s.predicate.op, CompareOp::Eq);
            assert_eq!(s.predicate.value, Value::from("john@example.com"));
        } else {
            panic!("Expected UPDATE statement");
        }
    }

    #[test]
    fn test_update_requires_where() {
        let err = parse_err("UPDATE users SET name = 'x';", CommandKind::Update);
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
        assert!(err.to_string().contains("expected WHERE"));
    }

    #[test]
    fn test_update_only_equality() {
        let err = parse_err("UPDATE users SET a = 1 WHERE b > 2;", CommandKind::Update);
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperator);
        assert_eq!(err.to_string(), "Unsupported operator: >");
    }

    #[test]
    fn test_delete_operators() {
        let cases = [
            ("=", CompareOp::Eq),
            ("!=", CompareOp::NotEq),
            ("<", CompareOp::Lt),
            ("<=", CompareOp::LtEq),
            (">", CompareOp::Gt),
            (">=", CompareOp::GtEq),
        ];
        for (symbol, op) in cases {
            let sql = format!("DELETE FROM users WHERE age {} 30;", symbol);
            match parse(&sql, CommandKind::Delete) {
                Statement::Delete(s) => {
                    assert_eq!(s.predicate.op, op);
                    assert_eq!(s.predicate.value, Value::from("30"));
                }
                other => panic!("Expected DELETE statement, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_delete_unknown_operator() {
        let err = parse_err("DELETE FROM users WHERE age <> 30;", CommandKind::Delete);
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperator);
        assert_eq!(err.to_string(), "Unsupported operator: <>");
    }

    #[test]
    fn test_delete_requires_where() {
        let err = parse_err("DELETE FROM users;", CommandKind::Delete);
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
    }

    #[test]
    fn test_create_table_keeps_first_word() {
        let stmt = parse(
            "CREATE TABLE users (id INT PRIMARY KEY, name VARCHAR(255) NOT NULL, price DECIMAL(10,2));",
            CommandKind::CreateTable,
        );
        if let Statement::CreateTable(s) = stmt {
            assert_eq!(s.name, "users");
            assert_eq!(
                s.columns,
                vec!["id".to_string(), "name".to_string(), "price".to_string()]
            );
        } else {
            panic!("Expected CREATE TABLE statement");
        }
    }

    #[test]
    fn test_create_table_without_space() {
        let stmt = parse("create table users(name, email)", CommandKind::CreateTable);
        assert_eq!(
            stmt,
            Statement::CreateTable(CreateTableStatement {
                name: "users".to_string(),
                columns: vec!["name".to_string(), "email".to_string()],
            })
        );
    }

    #[test]
    fn test_create_table_duplicate_column() {
        let err = parse_err("CREATE TABLE t (a, b, a);", CommandKind::CreateTable);
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
        assert!(err.to_string().contains("duplicate column 'a'"));
    }

    #[test]
    fn test_create_table_unterminated() {
        let err = parse_err("CREATE TABLE t (a, b", CommandKind::CreateTable);
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
    }

    #[test]
    fn test_database_statements() {
        assert_eq!(
            parse("CREATE DATABASE Shop;", CommandKind::CreateDatabase),
            Statement::CreateDatabase {
                name: "Shop".to_string()
            }
        );
        assert_eq!(
            parse("use shop", CommandKind::Use),
            Statement::Use {
                name: "shop".to_string()
            }
        );
        assert_eq!(
            parse("DROP DATABASE shop ; ", CommandKind::DropDatabase),
            Statement::DropDatabase {
                name: "shop".to_string()
            }
        );
        assert_eq!(
            parse("DROP TABLE users;", CommandKind::DropTable),
            Statement::DropTable {
                name: "users".to_string()
            }
        );
    }

    #[test]
    fn test_missing_database_name() {
        let err = parse_err("CREATE DATABASE;", CommandKind::CreateDatabase);
        assert_eq!(
            err.to_string(),
            "Syntax error: invalid CREATE DATABASE statement: expected database name, found ;"
        );
    }

    #[test]
    fn test_show_statements() {
        assert_eq!(
            parse("SHOW DATABASES;", CommandKind::ShowDatabases),
            Statement::ShowDatabases
        );
        assert_eq!(parse("show tables;", CommandKind::ShowTables), Statement::ShowTables);
    }

    #[test]
    fn test_prefix_claimed_word_is_syntax_error() {
        let err = parse_err("username;", CommandKind::Use);
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
        assert!(err.to_string().contains("expected USE, found username"));
    }

    #[test]
    fn test_lexer_errors_are_syntax_errors() {
        let err = parse_err("INSERT INTO t (a) VALUES ('open);", CommandKind::Insert);
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
        assert!(err.to_string().starts_with("Syntax error: invalid INSERT INTO statement"));
    }
}
