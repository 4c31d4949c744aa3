use std::mem;

use crate::{
    ast::{BinOp, Expr, SpannedToken, Token, UnOp},
    lexer::{LexError, Lexer, Position},
    value::Value,
};

/// Nesting limit for parentheses and unary operators, keeping parser recursion bounded.
const MAX_DEPTH: usize = 128;

/// Limit on operators stacked above any leaf of the finished tree. Evaluating,
/// writing, and dropping a tree all recurse once per level.
const MAX_HEIGHT: usize = 256;

/// Malformed syntax: what the parser wanted and what it got instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Expected {expected}, found {found} at {position}")]
pub struct ParseError {
    pub position: Position,
    pub expected: String,
    pub found: String,
}

/// Any failure turning source text into a tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn position(&self) -> Position {
        match self {
            SyntaxError::Lex(e) => e.position(),
            SyntaxError::Parse(e) => e.position,
        }
    }
}

/// Recursive-descent parser over a [`Lexer`].
///
/// A parser holds one token of lookahead and is consumed by [`Parser::parse`];
/// create a new one for each source text.
///
/// Input nested more than 128 parentheses or unary operators deep, or with
/// more than 256 operators stacked above any operand (such as a flat chain of
/// 257 additions), is rejected with a [`ParseError`] expecting
/// "shallower nesting".
///
/// # Examples
///
/// ```
/// use expression_parser::{BinOp, Expr, Lexer, Parser};
///
/// let parser = Parser::new(Lexer::new("1 + 2 * 3")).unwrap();
/// let expr = parser.parse().unwrap();
/// assert!(matches!(expr, Expr::BinaryOp { op: BinOp::Add, .. }));
/// ```
pub struct Parser {
    lexer: Lexer,
    current: SpannedToken,
    depth: usize,
}

/// A subtree together with its height, so the height limit is checked
/// without walking the tree.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Node { expr, height: 0 }
    }
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, SyntaxError> {
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), SyntaxError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn error(&self, expected: &str) -> SyntaxError {
        SyntaxError::Parse(ParseError {
            position: self.current.position,
            expected: expected.to_string(),
            found: self.current.token.describe(),
        })
    }

    fn expect(&mut self, expected: Token, description: &str) -> Result<(), SyntaxError> {
        if !self.check(&expected) {
            return Err(self.error(description));
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current.token) == mem::discriminant(token)
    }

    /// Parse primary expressions (atoms): literals, names, calls, and parenthesized groups
    fn parse_primary(&mut self) -> Result<Node, SyntaxError> {
        let expr = match mem::replace(&mut self.current.token, Token::Eof) {
            // Literals
            Token::Float(n) => Expr::Literal(Value::Float(n)),
            Token::Integer(n) => Expr::Literal(Value::Integer(n)),
            Token::String(s) => Expr::Literal(Value::String(s)),
            Token::Boolean(b) => Expr::Literal(Value::Boolean(b)),

            // Names: `name` reads a variable, `name()` invokes a callable
            Token::Identifier(name) => {
                self.advance()?;
                if self.check(&Token::LParen) {
                    self.advance()?;
                    self.expect(Token::RParen, "')' (calls take no arguments)")?;
                    return Ok(Node::leaf(Expr::Call(name)));
                }
                return Ok(Node::leaf(Expr::Identifier(name)));
            }

            // Grouping adds no node, so the height passes through
            Token::LParen => {
                self.advance()?;
                let node = self.parse_expression()?;
                self.expect(Token::RParen, "')'")?;
                return Ok(node);
            }

            token => {
                self.current.token = token;
                return Err(self.error("an expression"));
            }
        };

        self.advance()?;
        Ok(Node::leaf(expr))
    }

    fn parse_unary(&mut self) -> Result<Node, SyntaxError> {
        let op = match &self.current.token {
            Token::Not => UnOp::Not,
            Token::Minus => UnOp::Negate,
            _ => return self.parse_primary(),
        };

        self.advance()?;
        let operand = self.nested(Self::parse_unary)?; // Right-associative
        self.grow(Expr::unary(op, operand.expr), operand.height + 1)
    }

    fn parse_multiplicative(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match &self.current.token {
                Token::Star => BinOp::Multiply,
                Token::Slash => BinOp::Divide,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_unary()?;
            left = self.combine(op, left, right)?;
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match &self.current.token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Subtract,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = self.combine(op, left, right)?;
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match &self.current.token {
                Token::Lt => BinOp::LessThan,
                Token::Gt => BinOp::GreaterThan,
                Token::LtEq => BinOp::LessEqual,
                Token::GtEq => BinOp::GreaterEqual,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_additive()?;
            left = self.combine(op, left, right)?;
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_relational()?;

        loop {
            let op = match &self.current.token {
                Token::EqEq => BinOp::Equal,
                Token::NotEq => BinOp::NotEqual,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_relational()?;
            left = self.combine(op, left, right)?;
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_equality()?;

        while self.check(&Token::And) {
            self.advance()?;
            let right = self.parse_equality()?;
            left = self.combine(BinOp::And, left, right)?;
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_and()?;

        while self.check(&Token::Or) {
            self.advance()?;
            let right = self.parse_and()?;
            left = self.combine(BinOp::Or, left, right)?;
        }
        Ok(left)
    }

    fn parse_expression(&mut self) -> Result<Node, SyntaxError> {
        self.nested(Self::parse_or)
    }

    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<Node, SyntaxError>,
    ) -> Result<Node, SyntaxError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("shallower nesting"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn combine(&self, op: BinOp, left: Node, right: Node) -> Result<Node, SyntaxError> {
        let height = left.height.max(right.height) + 1;
        self.grow(Expr::binary(op, left.expr, right.expr), height)
    }

    fn grow(&self, expr: Expr, height: usize) -> Result<Node, SyntaxError> {
        if height > MAX_HEIGHT {
            return Err(self.error("shallower nesting"));
        }
        Ok(Node { expr, height })
    }

    /// Parse a complete expression; any input left over is an error.
    pub fn parse(mut self) -> Result<Expr, SyntaxError> {
        let Node { expr, .. } = self.parse_expression()?;
        self.expect(Token::Eof, "end of input")?;
        log::debug!("parsed expression: {}", expr);
        Ok(expr)
    }
}
