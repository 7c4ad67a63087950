//! Unit expression evaluation.
//!
//! Grammar:
//!
//! ```text
//! expr  := term (('*' | '/') term)*
//! term  := atom (('**' | '^') ['+' | '-'] integer)?
//! atom  := number | name | '(' expr ')'
//! ```
//!
//! Names are resolved through a caller-supplied lookup so the same evaluator
//! serves both unit definitions and unit strings.

use crate::dimension::Dimension;

/// Deepest parenthesis nesting accepted in one expression.
pub(crate) const MAX_NESTING: usize = 64;

/// Longest expression, in characters, that is evaluated at all.
pub(crate) const MAX_EXPRESSION_LEN: usize = 512;

/// A scale factor against the registry reference scale plus a dimension.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Quantity {
    pub scale: f64,
    pub dimension: Dimension,
}

impl Quantity {
    pub fn number(scale: f64) -> Self {
        Self {
            scale,
            dimension: Dimension::dimensionless(),
        }
    }

    fn multiply(self, other: Quantity) -> Self {
        Self {
            scale: self.scale * other.scale,
            dimension: self.dimension.multiply(&other.dimension),
        }
    }

    fn divide(self, other: Quantity) -> Self {
        Self {
            scale: self.scale / other.scale,
            dimension: self.dimension.divide(&other.dimension),
        }
    }

    fn pow(self, power: i32) -> Self {
        Self {
            scale: self.scale.powi(power),
            dimension: self.dimension.pow(power),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ExprError {
    /// A name the lookup could not resolve.
    UnknownName(String),
    /// Malformed expression.
    Syntax(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Name(String),
    Mul,
    Div,
    Pow,
    Plus,
    Minus,
    Open,
    Close,
}

pub(crate) fn evaluate(
    input: &str,
    lookup: &dyn Fn(&str) -> Option<Quantity>,
) -> Result<Quantity, ExprError> {
    if input.chars().count() > MAX_EXPRESSION_LEN {
        return Err(ExprError::Syntax(format!(
            "expression longer than {MAX_EXPRESSION_LEN} characters"
        )));
    }
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ExprError::Syntax("empty expression".to_string()));
    }
    let mut parser = Parser {
        tokens,
        position: 0,
        depth: 0,
        lookup,
    };
    let quantity = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(ExprError::Syntax(format!("unexpected token {token:?}")));
    }
    Ok(quantity)
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == 'µ' || c == 'μ'
}

fn is_name_continue(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit()
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Pow);
                i += 2;
            }
            '*' | '·' => {
                tokens.push(Token::Mul);
                i += 1;
            }
            '^' => {
                tokens.push(Token::Pow);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Div);
                i += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '(' => {
                tokens.push(Token::Open);
                i += 1;
            }
            ')' => {
                tokens.push(Token::Close);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let (number, next) = read_number(&chars, i)?;
                tokens.push(Token::Number(number));
                i = next;
            }
            c if is_name_start(c) => {
                let start = i;
                while i < chars.len() && is_name_continue(chars[i]) {
                    i += 1;
                }
                tokens.push(Token::Name(chars[start..i].iter().collect()));
            }
            other => {
                return Err(ExprError::Syntax(format!("unexpected character '{other}'")));
            }
        }
    }
    Ok(tokens)
}

fn read_number(chars: &[char], start: usize) -> Result<(f64, usize), ExprError> {
    let mut end = start;
    while end < chars.len() && (chars[end].is_ascii_digit() || chars[end] == '.') {
        end += 1;
    }
    // Scientific notation only when an exponent actually follows the `e`.
    if end < chars.len() && (chars[end] == 'e' || chars[end] == 'E') {
        let mut exponent = end + 1;
        if exponent < chars.len() && (chars[exponent] == '+' || chars[exponent] == '-') {
            exponent += 1;
        }
        if exponent < chars.len() && chars[exponent].is_ascii_digit() {
            end = exponent;
            while end < chars.len() && chars[end].is_ascii_digit() {
                end += 1;
            }
        }
    }
    let text: String = chars[start..end].iter().collect();
    text.parse::<f64>()
        .map(|number| (number, end))
        .map_err(|_| ExprError::Syntax(format!("invalid number '{text}'")))
}

struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
    lookup: &'a dyn Fn(&str) -> Option<Quantity>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Quantity, ExprError> {
        let mut quantity = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Mul) => {
                    self.position += 1;
                    quantity = quantity.multiply(self.term()?);
                }
                Some(Token::Div) => {
                    self.position += 1;
                    quantity = quantity.divide(self.term()?);
                }
                _ => return Ok(quantity),
            }
        }
    }

    fn term(&mut self) -> Result<Quantity, ExprError> {
        let atom = self.atom()?;
        if self.peek() != Some(&Token::Pow) {
            return Ok(atom);
        }
        self.position += 1;
        let negative = match self.peek() {
            Some(Token::Minus) => {
                self.position += 1;
                true
            }
            Some(Token::Plus) => {
                self.position += 1;
                false
            }
            _ => false,
        };
        match self.next() {
            Some(Token::Number(power)) if power.fract() == 0.0 && power.abs() <= 64.0 => {
                // Bounded above, so the cast is exact.
                let power = power as i32;
                Ok(atom.pow(if negative { -power } else { power }))
            }
            Some(token) => Err(ExprError::Syntax(format!(
                "exponent must be an integer, found {token:?}"
            ))),
            None => Err(ExprError::Syntax("missing exponent".to_string())),
        }
    }

    fn atom(&mut self) -> Result<Quantity, ExprError> {
        match self.next() {
            Some(Token::Number(number)) => Ok(Quantity::number(number)),
            Some(Token::Name(name)) => {
                (self.lookup)(&name).ok_or(ExprError::UnknownName(name))
            }
            Some(Token::Open) => {
                if self.depth >= MAX_NESTING {
                    return Err(ExprError::Syntax("expression nested too deeply".to_string()));
                }
                self.depth += 1;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(ExprError::Syntax("unbalanced parenthesis".to_string())),
                }
            }
            Some(token) => Err(ExprError::Syntax(format!("unexpected token {token:?}"))),
            None => Err(ExprError::Syntax("unexpected end of expression".to_string())),
        }
    }
}
