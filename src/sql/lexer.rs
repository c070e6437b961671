use std::fmt;

use crate::error::{DbError, DbResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Statement keywords
    Select,
    From,
    Where,
    Insert,
    Into,
    Values,
    Update,
    Set,
    Delete,
    Create,
    Drop,
    Use,
    Show,

    // Object keywords
    Database,
    Databases,
    Table,
    Tables,

    Null,

    // Literals and identifiers
    Identifier(String),
    /// Digits with at most one inner `.`, kept as written (`02134`, `1.50`)
    Number(String),
    String(String),

    // Comparison operators
    Equal,         // =
    NotEqual,      // !=
    LessThan,      // <
    LessThanEq,    // <=
    GreaterThan,   // >
    GreaterThanEq, // >=
    /// Any other run of `=<>!`, kept so the parser can name it.
    Operator(String),

    // Delimiters
    Star,       // *
    Comma,      // ,
    LeftParen,  // (
    RightParen, // )
    Semicolon,  // ;

    /// Any other character. Only ever part of a bare value (`555-1234`,
    /// `a@x.com`) or of a skipped column definition.
    Symbol(char),

    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Select => write!(f, "SELECT"),
            Token::From => write!(f, "FROM"),
            Token::Where => write!(f, "WHERE"),
            Token::Insert => write!(f, "INSERT"),
            Token::Into => write!(f, "INTO"),
            Token::Values => write!(f, "VALUES"),
            Token::Update => write!(f, "UPDATE"),
            Token::Set => write!(f, "SET"),
            Token::Delete => write!(f, "DELETE"),
            Token::Create => write!(f, "CREATE"),
            Token::Drop => write!(f, "DROP"),
            Token::Use => write!(f, "USE"),
            Token::Show => write!(f, "SHOW"),
            Token::Database => write!(f, "DATABASE"),
            Token::Databases => write!(f, "DATABASES"),
            Token::Table => write!(f, "TABLE"),
            Token::Tables => write!(f, "TABLES"),
            Token::Null => write!(f, "NULL"),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Number(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "'{}'", s),
            Token::Equal => write!(f, "="),
            Token::NotEqual => write!(f, "!="),
            Token::LessThan => write!(f, "<"),
            Token::LessThanEq => write!(f, "<="),
            Token::GreaterThan => write!(f, ">"),
            Token::GreaterThanEq => write!(f, ">="),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Star => write!(f, "*"),
            Token::Comma => write!(f, ","),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Semicolon => write!(f, ";"),
            Token::Symbol(ch) => write!(f, "{}", ch),
            Token::Eof => write!(f, "end of statement"),
        }
    }
}

/// Character range `[start, end)` a token was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

pub struct SqlLexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl SqlLexer {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            input: chars,
            position: 0,
            current_char,
        }
    }

    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.current_char {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) {
        self.advance(); // skip /
        self.advance(); // skip *
        while let Some(ch) = self.current_char {
            if ch == '*' && self.peek() == Some('/') {
                self.advance();
                self.advance();
                break;
            }
            self.advance();
        }
    }

    fn read_number(&mut self) -> Token {
        let mut num_str = String::new();
        let mut has_dot = false;

        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot && self.peek().is_some_and(|c| c.is_ascii_digit()) {
                has_dot = true;
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Number(num_str)
    }

    fn read_string(&mut self, quote: char) -> DbResult<Token> {
        self.advance(); // opening quote

        let mut string = String::new();

        while let Some(ch) = self.current_char {
            if ch == quote {
                // Doubled quote is an escaped quote
                if self.peek() == Some(quote) {
                    string.push(quote);
                    self.advance();
                    self.advance();
                } else {
                    self.advance();
                    return Ok(Token::String(string));
                }
            } else if ch == '\\' {
                self.advance();
                if let Some(escaped) = self.current_char {
                    string.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        _ => escaped,
                    });
                    self.advance();
                }
            } else {
                string.push(ch);
                self.advance();
            }
        }

        Err(DbError::syntax(format!(
            "unterminated string {}{}",
            quote, string
        )))
    }

    fn read_identifier(&mut self) -> Token {
        let mut ident = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.to_uppercase().as_str() {
            "SELECT" => Token::Select,
            "FROM" => Token::From,
            "WHERE" => Token::Where,
            "INSERT" => Token::Insert,
            "INTO" => Token::Into,
            "VALUES" => Token::Values,
            "UPDATE" => Token::Update,
            "SET" => Token::Set,
            "DELETE" => Token::Delete,
            "CREATE" => Token::Create,
            "DROP" => Token::Drop,
            "USE" => Token::Use,
            "SHOW" => Token::Show,
            "DATABASE" => Token::Database,
            "DATABASES" => Token::Databases,
            "TABLE" => Token::Table,
            "TABLES" => Token::Tables,
            "NULL" => Token::Null,
            _ => Token::Identifier(ident),
        }
    }

    fn read_quoted_identifier(&mut self, quote: char) -> DbResult<Token> {
        self.advance(); // opening quote

        let mut ident = String::new();
        let closing = if quote == '[' { ']' } else { quote };

        while let Some(ch) = self.current_char {
            if ch == closing {
                self.advance();
                return Ok(Token::Identifier(ident));
            }
            ident.push(ch);
            self.advance();
        }

        Err(DbError::syntax(format!(
            "unterminated quoted identifier {}{}",
            quote, ident
        )))
    }

    /// Reads the longest run of comparison characters.
    fn read_operator(&mut self) -> Token {
        let mut op = String::new();
        while let Some(ch) = self.current_char {
            if matches!(ch, '=' | '<' | '>' | '!') {
                op.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match op.as_str() {
            "=" => Token::Equal,
            "!=" => Token::NotEqual,
            "<" => Token::LessThan,
            "<=" => Token::LessThanEq,
            ">" => Token::GreaterThan,
            ">=" => Token::GreaterThanEq,
            _ => Token::Operator(op),
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();

            match self.current_char {
                Some('-') if self.peek() == Some('-') => self.skip_line_comment(),
                Some('/') if self.peek() == Some('*') => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    fn read_token(&mut self) -> DbResult<Token> {
        let token = match self.current_char {
            None => Token::Eof,

            Some(ch) if ch.is_ascii_digit() => {
                return Ok(self.read_number());
            }

            Some(quote @ ('\'' | '"')) => {
                return self.read_string(quote);
            }

            Some(quote @ ('`' | '[')) => {
                return self.read_quoted_identifier(quote);
            }

            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                return Ok(self.read_identifier());
            }

            Some('=' | '<' | '>' | '!') => {
                return Ok(self.read_operator());
            }

            Some(ch) => {
                self.advance();
                match ch {
                    '*' => Token::Star,
                    ',' => Token::Comma,
                    '(' => Token::LeftParen,
                    ')' => Token::RightParen,
                    ';' => Token::Semicolon,
                    other => Token::Symbol(other),
                }
            }
        };

        Ok(token)
    }

    pub fn next_token(&mut self) -> DbResult<Token> {
        self.next_spanned().map(|(token, _)| token)
    }

    /// Next token together with the characters it covers.
    pub fn next_spanned(&mut self) -> DbResult<(Token, Span)> {
        self.skip_trivia();
        let start = self.position;
        let token = self.read_token()?;
        Ok((
            token,
            Span {
                start,
                end: self.position,
            },
        ))
    }

    pub fn tokenize(&mut self) -> DbResult<Vec<Token>> {
        Ok(self
            .tokenize_spanned()?
            .into_iter()
            .map(|(token, _)| token)
            .collect())
    }

    /// All tokens up to and including `Eof`, with their spans.
    pub fn tokenize_spanned(&mut self) -> DbResult<Vec<(Token, Span)>> {
        let mut tokens = Vec::new();

        loop {
            let (token, span) = self.next_spanned()?;
            let done = token == Token::Eof;
            tokens.push((token, span));
            if done {
                break;
            }
        }

        Ok(tokens)
    }
}
