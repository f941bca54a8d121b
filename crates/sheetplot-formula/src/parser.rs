//! Formula parser
//!
//! The formula text is split into tokens first, then parsed by precedence
//! climbing. Precedence from loosest to tightest: comparison, `&`, `+ -`,
//! `* /`, `^`, prefix `-`/`+`, postfix `%`, `:` ranges.

use crate::ast::{BinaryOperator, CellReference, FormulaExpr, RangeReference, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use sheetplot_core::{CellAddress, CellError, CellRange};

/// Parse a formula (with or without the leading `=`) into an AST
///
/// ```rust
/// use sheetplot_formula::{parse_formula, FormulaExpr};
///
/// assert_eq!(parse_formula("=42").unwrap(), FormulaExpr::Number(42.0));
/// assert!(parse_formula("=SUM('Wet Tropics'!B2:B9)").is_ok());
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    let body = formula.trim();
    let body = body.strip_prefix('=').unwrap_or(body);
    if body.trim().is_empty() {
        return Err(FormulaError::Parse("empty formula".into()));
    }

    let tokens = Lexer::new(body).tokenize()?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expression(0)?;
    match parser.peek() {
        Token::End => Ok(expr),
        other => Err(FormulaError::Parse(format!(
            "unexpected {:?} after expression",
            other
        ))),
    }
}

const ERROR_CODES: [&str; 10] = [
    "#NULL!",
    "#DIV/0!",
    "#VALUE!",
    "#REF!",
    "#NAME?",
    "#NUM!",
    "#N/A",
    "#GETTING_DATA",
    "#SPILL!",
    "#CALC!",
];

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Str(String),
    Bool(bool),
    Error(CellError),
    Ident(String),
    Cell(String),
    Sheet(String),
    Op(BinaryOperator),
    Plus,
    Minus,
    Percent,
    Colon,
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    End,
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn tokenize(mut self) -> FormulaResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let rest = self.rest().trim_start();
            self.pos = self.src.len() - rest.len();
            let Some(c) = rest.chars().next() else {
                tokens.push(Token::End);
                return Ok(tokens);
            };

            let token = match c {
                '"' => self.string()?,
                '\'' => self.quoted_sheet()?,
                '#' => self.error()?,
                '0'..='9' | '.' => self.number()?,
                c if c.is_alphabetic() || c == '_' || c == '$' => self.word(),
                _ => {
                    self.bump();
                    match c {
                        '+' => Token::Plus,
                        '-' => Token::Minus,
                        '*' => Token::Op(BinaryOperator::Multiply),
                        '/' => Token::Op(BinaryOperator::Divide),
                        '^' => Token::Op(BinaryOperator::Power),
                        '&' => Token::Op(BinaryOperator::Concat),
                        '%' => Token::Percent,
                        ':' => Token::Colon,
                        ',' => Token::Comma,
                        ';' => Token::Semicolon,
                        '(' => Token::LParen,
                        ')' => Token::RParen,
                        '{' => Token::LBrace,
                        '}' => Token::RBrace,
                        '=' => Token::Op(BinaryOperator::Equal),
                        '<' if self.rest().starts_with('=') => {
                            self.bump();
                            Token::Op(BinaryOperator::LessEqual)
                        }
                        '<' if self.rest().starts_with('>') => {
                            self.bump();
                            Token::Op(BinaryOperator::NotEqual)
                        }
                        '<' => Token::Op(BinaryOperator::LessThan),
                        '>' if self.rest().starts_with('=') => {
                            self.bump();
                            Token::Op(BinaryOperator::GreaterEqual)
                        }
                        '>' => Token::Op(BinaryOperator::GreaterThan),
                        other => {
                            return Err(FormulaError::Parse(format!(
                                "unexpected character '{}'",
                                other
                            )))
                        }
                    }
                }
            };
            tokens.push(token);
        }
    }

    fn string(&mut self) -> FormulaResult<Token> {
        self.bump();
        let mut s = String::new();
        loop {
            match self.bump() {
                Some('"') if self.rest().starts_with('"') => {
                    self.bump();
                    s.push('"');
                }
                Some('"') => return Ok(Token::Str(s)),
                Some(c) => s.push(c),
                None => return Err(FormulaError::Parse("unterminated string".into())),
            }
        }
    }

    fn quoted_sheet(&mut self) -> FormulaResult<Token> {
        self.bump();
        let mut name = String::new();
        loop {
            match self.bump() {
                Some('\'') if self.rest().starts_with('\'') => {
                    self.bump();
                    name.push('\'');
                }
                Some('\'') => break,
                Some(c) => name.push(c),
                None => return Err(FormulaError::Parse("unterminated sheet name".into())),
            }
        }
        if self.bump() != Some('!') {
            return Err(FormulaError::Parse(format!(
                "expected '!' after sheet name '{}'",
                name
            )));
        }
        Ok(Token::Sheet(name))
    }

    fn error(&mut self) -> FormulaResult<Token> {
        let upper = self.rest().to_ascii_uppercase();
        let code = ERROR_CODES
            .iter()
            .find(|code| upper.starts_with(**code))
            .ok_or_else(|| FormulaError::Parse(format!("unknown error literal in '{}'", self.rest())))?;
        self.pos += code.len();
        CellError::parse(code)
            .map(Token::Error)
            .ok_or_else(|| FormulaError::Parse(format!("unknown error literal '{}'", code)))
    }

    fn number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        let mut end = start;
        while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
            end += 1;
        }
        if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
            let mut exp = end + 1;
            if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
                exp += 1;
            }
            if exp < bytes.len() && bytes[exp].is_ascii_digit() {
                end = exp;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
            }
        }
        self.pos = end;
        let text = &self.src[start..end];
        text.parse()
            .map(Token::Number)
            .map_err(|_| FormulaError::Parse(format!("invalid number '{}'", text)))
    }

    fn word(&mut self) -> Token {
        let start = self.pos;
        while let Some(c) = self.rest().chars().next() {
            if c.is_alphanumeric() || matches!(c, '_' | '$' | '.') {
                self.bump();
            } else {
                break;
            }
        }
        let word = &self.src[start..self.pos];

        if self.rest().starts_with('!') {
            self.bump();
            return Token::Sheet(word.to_string());
        }
        if self.rest().trim_start().starts_with('(') {
            return Token::Ident(word.to_string());
        }
        if word.eq_ignore_ascii_case("TRUE") {
            return Token::Bool(true);
        }
        if word.eq_ignore_ascii_case("FALSE") {
            return Token::Bool(false);
        }
        if !word.contains('.') && CellAddress::parse(word).is_ok() {
            return Token::Cell(word.to_string());
        }
        Token::Ident(word.to_string())
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::End)
    }

    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> FormulaResult<()> {
        let found = self.next();
        if found == expected {
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "expected {:?}, found {:?}",
                expected, found
            )))
        }
    }

    fn peek_binary(&self) -> Option<BinaryOperator> {
        match self.peek() {
            Token::Op(op) => Some(*op),
            Token::Plus => Some(BinaryOperator::Add),
            Token::Minus => Some(BinaryOperator::Subtract),
            _ => None,
        }
    }

    /// All binary operators are left-associative
    fn expression(&mut self, min_precedence: u8) -> FormulaResult<FormulaExpr> {
        let mut left = self.unary()?;
        while let Some(op) = self.peek_binary() {
            if op.precedence() < min_precedence {
                break;
            }
            self.next();
            let right = self.expression(op.precedence() + 1)?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn unary(&mut self) -> FormulaResult<FormulaExpr> {
        match self.peek() {
            Token::Minus => {
                self.next();
                Ok(FormulaExpr::UnaryOp {
                    op: UnaryOperator::Negate,
                    operand: Box::new(self.unary()?),
                })
            }
            Token::Plus => {
                self.next();
                self.unary()
            }
            _ => {
                let mut expr = self.range()?;
                while *self.peek() == Token::Percent {
                    self.next();
                    expr = FormulaExpr::UnaryOp {
                        op: UnaryOperator::Percent,
                        operand: Box::new(expr),
                    };
                }
                Ok(expr)
            }
        }
    }

    fn range(&mut self) -> FormulaResult<FormulaExpr> {
        let start = self.primary()?;
        if *self.peek() != Token::Colon {
            return Ok(start);
        }
        self.next();

        let FormulaExpr::CellRef(start) = start else {
            return Err(FormulaError::Parse("range must start with a cell".into()));
        };
        let end = match self.next() {
            Token::Cell(text) => cell_address(&text)?,
            other => {
                return Err(FormulaError::Parse(format!(
                    "expected cell after ':', found {:?}",
                    other
                )))
            }
        };
        Ok(FormulaExpr::RangeRef(RangeReference {
            sheet: start.sheet,
            range: CellRange::new(start.address, end),
        }))
    }

    fn primary(&mut self) -> FormulaResult<FormulaExpr> {
        match self.next() {
            Token::Number(n) => Ok(FormulaExpr::Number(n)),
            Token::Str(s) => Ok(FormulaExpr::String(s)),
            Token::Bool(b) => Ok(FormulaExpr::Boolean(b)),
            Token::Error(e) => Ok(FormulaExpr::Error(e)),
            Token::Cell(text) => Ok(FormulaExpr::CellRef(CellReference {
                sheet: None,
                address: cell_address(&text)?,
            })),
            Token::Sheet(sheet) => match self.next() {
                Token::Cell(text) => Ok(FormulaExpr::CellRef(CellReference {
                    sheet: Some(sheet),
                    address: cell_address(&text)?,
                })),
                other => Err(FormulaError::Parse(format!(
                    "expected cell after '{}!', found {:?}",
                    sheet, other
                ))),
            },
            Token::Ident(name) => {
                if *self.peek() == Token::LParen {
                    self.call(name)
                } else {
                    Ok(FormulaExpr::NameRef(name))
                }
            }
            Token::LParen => {
                let expr = self.expression(0)?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Token::LBrace => self.array(),
            other => Err(FormulaError::Parse(format!("unexpected {:?}", other))),
        }
    }

    fn call(&mut self, name: String) -> FormulaResult<FormulaExpr> {
        self.expect(Token::LParen)?;
        let mut args = Vec::new();
        if *self.peek() != Token::RParen {
            loop {
                args.push(self.expression(0)?);
                if *self.peek() != Token::Comma {
                    break;
                }
                self.next();
            }
        }
        self.expect(Token::RParen)?;
        Ok(FormulaExpr::Function {
            name: name.to_uppercase(),
            args,
        })
    }

    fn array(&mut self) -> FormulaResult<FormulaExpr> {
        let mut rows = vec![Vec::new()];
        loop {
            if let Some(row) = rows.last_mut() {
                row.push(self.expression(0)?);
            }
            match self.next() {
                Token::Comma => {}
                Token::Semicolon => rows.push(Vec::new()),
                Token::RBrace => return Ok(FormulaExpr::Array(rows)),
                other => {
                    return Err(FormulaError::Parse(format!(
                        "expected ',', ';' or '}}' in array, found {:?}",
                        other
                    )))
                }
            }
        }
    }
}

fn cell_address(text: &str) -> FormulaResult<CellAddress> {
    CellAddress::parse(text)
        .map_err(|e| FormulaError::Parse(format!("invalid cell reference '{}': {}", text, e)))
}
