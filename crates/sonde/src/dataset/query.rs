//! Row filter expressions.
//!
//! A small boolean language over column values:
//!
//! ```text
//! age >= 18 and (city == 'Paris' or city == "Lyon")
//! not `sale date` is null
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Result, SondeError};

use super::table::Dataset;
use super::value::{Value, parse_datetime};

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}

/// Literal on the right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
    Bool(bool),
}

/// Parsed filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Compare {
        column: String,
        op: CompareOp,
        literal: Literal,
    },
    IsNull {
        column: String,
        negated: bool,
    },
    Not(Box<Query>),
    And(Box<Query>, Box<Query>),
    Or(Box<Query>, Box<Query>),
}

impl Query {
    /// Parse a filter expression.
    pub fn parse(text: &str) -> Result<Query> {
        let tokens = tokenize(text)?;
        let mut parser = QueryParser { tokens, pos: 0 };
        let query = parser.parse_or()?;
        if let Some((position, token)) = parser.tokens.get(parser.pos) {
            return Err(SondeError::Query {
                position: *position,
                message: format!("unexpected token {}", token),
            });
        }
        Ok(query)
    }

    /// Columns referenced by the expression, in first-use order.
    pub fn columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Query::Compare { column, .. } | Query::IsNull { column, .. } => {
                if !out.contains(&column.as_str()) {
                    out.push(column);
                }
            }
            Query::Not(inner) => inner.collect_columns(out),
            Query::And(a, b) | Query::Or(a, b) => {
                a.collect_columns(out);
                b.collect_columns(out);
            }
        }
    }

    /// Evaluate the expression against one row.
    ///
    /// Comparisons involving a null or NaN cell, an absent column, or
    /// incompatible types are false.
    pub fn matches(&self, dataset: &Dataset, row: usize) -> bool {
        match self {
            Query::Compare {
                column,
                op,
                literal,
            } => dataset
                .get(row, column)
                .and_then(|value| compare(value, literal))
                .is_some_and(|ordering| op.accepts(ordering)),
            Query::IsNull { column, negated } => dataset
                .get(row, column)
                .is_some_and(|value| value.is_missing() != *negated),
            Query::Not(inner) => !inner.matches(dataset, row),
            Query::And(a, b) => a.matches(dataset, row) && b.matches(dataset, row),
            Query::Or(a, b) => a.matches(dataset, row) || b.matches(dataset, row),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Compare {
                column,
                op,
                literal,
            } => {
                write!(f, "`{}` {} ", column, op.symbol())?;
                match literal {
                    Literal::Number(n) => write!(f, "{}", n),
                    Literal::Text(s) => write!(f, "'{}'", s),
                    Literal::Bool(b) => write!(f, "{}", b),
                }
            }
            Query::IsNull { column, negated } => {
                write!(f, "`{}` is {}null", column, if *negated { "not " } else { "" })
            }
            Query::Not(inner) => write!(f, "not ({})", inner),
            Query::And(a, b) => write!(f, "({}) and ({})", a, b),
            Query::Or(a, b) => write!(f, "({}) or ({})", a, b),
        }
    }
}

fn compare(value: &Value, literal: &Literal) -> Option<Ordering> {
    match (value, literal) {
        (Value::Integer(_) | Value::Float(_), Literal::Number(n)) => {
            value.as_f64().and_then(|v| v.partial_cmp(n))
        }
        (Value::Bool(b), Literal::Bool(l)) => Some(b.cmp(l)),
        (Value::Text(s), Literal::Text(l)) => Some(s.as_str().cmp(l.as_str())),
        (Value::DateTime(dt), Literal::Text(l)) => parse_datetime(l).map(|other| dt.cmp(&other)),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Number(f64),
    Op(CompareOp),
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s) => write!(f, "'{}'", s),
            Token::Str(s) => write!(f, "string '{}'", s),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Op(op) => write!(f, "'{}'", op.symbol()),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(usize, Token)>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    let error = |position: usize, message: &str| SondeError::Query {
        position,
        message: message.to_string(),
    };

    while i < chars.len() {
        let (pos, ch) = chars[i];
        match ch {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push((pos, Token::LParen));
                i += 1;
            }
            ')' => {
                tokens.push((pos, Token::RParen));
                i += 1;
            }
            '=' | '!' | '<' | '>' => {
                let next = chars.get(i + 1).map(|(_, c)| *c);
                let (op, width) = match (ch, next) {
                    ('=', Some('=')) => (CompareOp::Eq, 2),
                    ('!', Some('=')) => (CompareOp::Ne, 2),
                    ('<', Some('=')) => (CompareOp::Le, 2),
                    ('>', Some('=')) => (CompareOp::Ge, 2),
                    ('<', _) => (CompareOp::Lt, 1),
                    ('>', _) => (CompareOp::Gt, 1),
                    _ => return Err(error(pos, "expected a comparison operator")),
                };
                tokens.push((pos, Token::Op(op)));
                i += width;
            }
            '\'' | '"' | '`' => {
                let quote = ch;
                let mut j = i + 1;
                let mut buf = String::new();
                while j < chars.len() && chars[j].1 != quote {
                    buf.push(chars[j].1);
                    j += 1;
                }
                if j >= chars.len() {
                    return Err(error(pos, "unterminated quote"));
                }
                let token = if quote == '`' {
                    Token::Ident(buf)
                } else {
                    Token::Str(buf)
                };
                tokens.push((pos, token));
                i = j + 1;
            }
            c if c.is_ascii_digit() || c == '-' || c == '.' => {
                let mut j = i + 1;
                while j < chars.len()
                    && (chars[j].1.is_ascii_alphanumeric() || matches!(chars[j].1, '.' | '-' | '+'))
                {
                    j += 1;
                }
                let end = chars.get(j).map_or(text.len(), |(p, _)| *p);
                let raw = &text[pos..end];
                let number = raw
                    .parse::<f64>()
                    .map_err(|_| error(pos, &format!("invalid number '{}'", raw)))?;
                tokens.push((pos, Token::Number(number)));
                i = j;
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut j = i + 1;
                while j < chars.len() && (chars[j].1.is_alphanumeric() || chars[j].1 == '_') {
                    j += 1;
                }
                let end = chars.get(j).map_or(text.len(), |(p, _)| *p);
                tokens.push((pos, Token::Ident(text[pos..end].to_string())));
                i = j;
            }
            _ => return Err(error(pos, &format!("unexpected character '{}'", ch))),
        }
    }
    Ok(tokens)
}

struct QueryParser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl QueryParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(0, |(p, _)| *p)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(_, t)| t.clone());
        self.pos += 1;
        token
    }

    fn error(&self, message: impl Into<String>) -> SondeError {
        SondeError::Query {
            position: self.position(),
            message: message.into(),
        }
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(s)) if s.eq_ignore_ascii_case(keyword))
    }

    fn parse_or(&mut self) -> Result<Query> {
        let mut left = self.parse_and()?;
        while self.at_keyword("or") {
            self.pos += 1;
            let right = self.parse_and()?;
            left = Query::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Query> {
        let mut left = self.parse_unary()?;
        while self.at_keyword("and") {
            self.pos += 1;
            let right = self.parse_unary()?;
            left = Query::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Query> {
        if self.at_keyword("not") {
            self.pos += 1;
            return Ok(Query::Not(Box::new(self.parse_unary()?)));
        }
        if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            let inner = self.parse_or()?;
            if self.next() != Some(Token::RParen) {
                return Err(self.error("expected ')'"));
            }
            return Ok(inner);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Query> {
        let column = match self.next() {
            Some(Token::Ident(name)) => name,
            Some(other) => return Err(self.error(format!("expected a column, found {}", other))),
            None => return Err(self.error("expected a column")),
        };

        if self.at_keyword("is") {
            self.pos += 1;
            let negated = self.at_keyword("not");
            if negated {
                self.pos += 1;
            }
            if !self.at_keyword("null") {
                return Err(self.error("expected 'null'"));
            }
            self.pos += 1;
            return Ok(Query::IsNull { column, negated });
        }

        let op = match self.next() {
            Some(Token::Op(op)) => op,
            _ => return Err(self.error("expected a comparison operator")),
        };
        let literal = match self.next() {
            Some(Token::Number(n)) => Literal::Number(n),
            Some(Token::Str(s)) => Literal::Text(s),
            Some(Token::Ident(s)) if s.eq_ignore_ascii_case("true") => Literal::Bool(true),
            Some(Token::Ident(s)) if s.eq_ignore_ascii_case("false") => Literal::Bool(false),
            _ => return Err(self.error("expected a literal")),
        };
        Ok(Query::Compare {
            column,
            op,
            literal,
        })
    }
}
