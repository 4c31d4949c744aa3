use std::fmt;

use crate::ast::{SpannedToken, Token};

/// Location of a token or error in the source, counted in characters from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {}", self.offset)
    }
}

/// Errors raised while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    /// A character that starts no token
    #[error("Unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: Position },

    /// A string literal with no closing quote
    #[error("Unterminated string starting with {quote} at {position}")]
    UnterminatedString { quote: char, position: Position },

    /// A numeric literal that does not fit its type
    #[error("Invalid number '{text}' at {position}")]
    InvalidNumber { text: String, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedChar { position, .. }
            | LexError::UnterminatedString { position, .. }
            | LexError::InvalidNumber { position, .. } => *position,
        }
    }
}

/// Converts source text into tokens on demand.
///
/// The lexer keeps returning [`Token::Eof`] once the input is exhausted.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    finished: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            finished: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == quote {
                return Ok(result);
            }
            result.push(ch);
        }

        Err(LexError::UnterminatedString {
            quote,
            position: Position { offset: start },
        })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut number = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let invalid = |number: String| LexError::InvalidNumber {
            text: number,
            position: Position { offset: start },
        };

        if is_float {
            number
                .parse::<f64>()
                .map(Token::Float)
                .map_err(|_| invalid(number))
        } else {
            number
                .parse::<i64>()
                .map(Token::Integer)
                .map_err(|_| invalid(number))
        }
    }

    /// Consume a one- or two-character operator. The two-character form wins
    /// when `second` follows `first`.
    fn operator(&mut self, second: char, double: Token, single: Token) -> Token {
        if self.peek_char(1) == Some(second) {
            self.advance();
            self.advance();
            double
        } else {
            self.advance();
            single
        }
    }

    /// Read the next token, reporting where it started and its raw text.
    pub fn next_token(&mut self) -> Result<SpannedToken, LexError> {
        self.skip_whitespace();

        let start = self.position;
        let token = self.scan()?;
        let text = self.input[start..self.position].iter().collect();

        Ok(SpannedToken {
            token,
            text,
            position: Position { offset: start },
        })
    }

    fn scan(&mut self) -> Result<Token, LexError> {
        let unexpected = |ch: char, offset: usize| LexError::UnexpectedChar {
            ch,
            position: Position { offset },
        };

        let token = match self.current_char() {
            None => Token::Eof,
            Some('+') => {
                self.advance();
                Token::Plus
            }
            Some('-') => {
                self.advance();
                Token::Minus
            }
            Some('*') => {
                self.advance();
                Token::Star
            }
            Some('/') => {
                self.advance();
                Token::Slash
            }
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            // A lone '=' is accepted as equality
            Some('=') => self.operator('=', Token::EqEq, Token::EqEq),
            Some('!') => self.operator('=', Token::NotEq, Token::Not),
            Some('>') => self.operator('=', Token::GtEq, Token::Gt),
            Some('<') => self.operator('=', Token::LtEq, Token::Lt),
            Some('&') => {
                if self.peek_char(1) != Some('&') {
                    return Err(unexpected('&', self.position));
                }
                self.advance();
                self.advance();
                Token::And
            }
            Some('|') => {
                if self.peek_char(1) != Some('|') {
                    return Err(unexpected('|', self.position));
                }
                self.advance();
                self.advance();
                Token::Or
            }
            Some(quote @ ('\'' | '"')) => Token::String(self.read_string(quote)?),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();

                match ident.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    "true" => Token::Boolean(true),
                    "false" => Token::Boolean(false),
                    _ => Token::Identifier(ident),
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number()?,
            Some(ch) => return Err(unexpected(ch, self.position)),
        };

        Ok(token)
    }
}

impl Iterator for Lexer {
    type Item = Result<SpannedToken, LexError>;

    /// Yields tokens up to, but not including, end of input. Stops after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(SpannedToken {
                token: Token::Eof, ..
            }) => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Lex the whole input, returning every token before end of input.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, LexError> {
    Lexer::new(input).collect()
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("and or not true false");
    assert_eq!(lexer.next_token().unwrap().token, Token::And);
    assert_eq!(lexer.next_token().unwrap().token, Token::Or);
    assert_eq!(lexer.next_token().unwrap().token, Token::Not);
    assert_eq!(lexer.next_token().unwrap().token, Token::Boolean(true));
    assert_eq!(lexer.next_token().unwrap().token, Token::Boolean(false));
    assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
}

#[test]
fn test_call_expression() {
    let mut lexer = Lexer::new("get_name()=='fred'");
    assert_eq!(
        lexer.next_token().unwrap().token,
        Token::Identifier("get_name".to_string())
    );
    assert_eq!(lexer.next_token().unwrap().token, Token::LParen);
    assert_eq!(lexer.next_token().unwrap().token, Token::RParen);
    assert_eq!(lexer.next_token().unwrap().token, Token::EqEq);
    let string = lexer.next_token().unwrap();
    assert_eq!(string.token, Token::String("fred".to_string()));
    assert_eq!(string.text, "'fred'");
    assert_eq!(string.position, Position { offset: 12 });
    assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
}
