use std::fmt;

use crate::lexer::Position;

/// Kind of a lexical token produced by the [`Lexer`](crate::Lexer).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Floating point number (digits with exactly one `.`)
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// 5.0
    /// ```
    Float(f64),

    /// Integer
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 0
    /// ```
    Integer(i64),

    /// String literal enclosed in single or double quotes
    ///
    /// No escape processing: the literal ends at the first matching quote.
    ///
    /// # Examples
    /// ```text
    /// 'fred'
    /// "item #1"
    /// ```
    String(String),

    /// Boolean values
    ///
    /// Lexed as literals so that a context binding can never shadow them.
    ///
    /// # Examples
    /// ```text
    /// true
    /// false
    /// ```
    Boolean(bool),

    /// Variable or function name
    ///
    /// Must start with an ASCII letter or underscore, followed by ASCII
    /// letters, digits, or underscores.
    ///
    /// # Examples
    /// ```text
    /// counter
    /// get_name
    /// _internal
    /// ```
    Identifier(String),

    // Comparison
    /// Equality operator (`==`, or a single `=`)
    EqEq,

    /// Inequality operator
    NotEq,

    /// Less than
    Lt,

    /// Greater than
    Gt,

    /// Less than or equal
    LtEq,

    /// Greater than or equal
    GtEq,

    // Arithmetic
    /// Addition
    Plus,

    /// Subtraction or unary negation
    Minus,

    /// Multiplication
    Star,

    /// Division
    Slash,

    // Logical
    /// Logical AND (`and` or `&&`)
    ///
    /// # Examples
    /// ```text
    /// counter > 0 and enabled
    /// ```
    And,

    /// Logical OR (`or` or `||`)
    Or,

    /// Logical NOT (`not` or `!`)
    Not,

    // Delimiters
    /// Left parenthesis for grouping or calls
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}

impl Token {
    /// Short description used in parse error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Float(n) => format!("number {}", n),
            Token::Integer(n) => format!("number {}", n),
            Token::String(s) => format!("string '{}'", s),
            Token::Boolean(b) => format!("'{}'", b),
            Token::Identifier(name) => format!("identifier '{}'", name),
            Token::EqEq => "'=='".to_string(),
            Token::NotEq => "'!='".to_string(),
            Token::Lt => "'<'".to_string(),
            Token::Gt => "'>'".to_string(),
            Token::LtEq => "'<='".to_string(),
            Token::GtEq => "'>='".to_string(),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::And => "'and'".to_string(),
            Token::Or => "'or'".to_string(),
            Token::Not => "'not'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// A token together with the source text it was read from and where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    /// Raw source text, quotes included for strings
    pub text: String,
    pub position: Position,
}

impl fmt::Display for SpannedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.token.describe(), self.position)
    }
}
