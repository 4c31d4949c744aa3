/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Logical
    /// Logical OR (`or`, `||`)
    Or,
    /// Logical AND (`and`, `&&`)
    And,

    // Equality
    /// Equal (`==`, `=`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,

    // Relational
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Arithmetic
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
}

impl BinOp {
    /// Binding strength, lowest first. Unary operators sit at 7 and primaries at 8.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
            BinOp::Equal | BinOp::NotEqual => 3,
            BinOp::LessThan | BinOp::LessEqual | BinOp::GreaterThan | BinOp::GreaterEqual => 4,
            BinOp::Add | BinOp::Subtract => 5,
            BinOp::Multiply | BinOp::Divide => 6,
        }
    }

    /// Canonical source spelling
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Or => "or",
            BinOp::And => "and",
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::LessThan => "<",
            BinOp::LessEqual => "<=",
            BinOp::GreaterThan => ">",
            BinOp::GreaterEqual => ">=",
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
        }
    }

    /// Node label used by the structure dump
    pub fn label(self) -> &'static str {
        match self {
            BinOp::Or => "Or",
            BinOp::And => "And",
            BinOp::Equal => "Equals",
            BinOp::NotEqual => "NotEquals",
            BinOp::LessThan => "LessThan",
            BinOp::LessEqual => "LessThanEquals",
            BinOp::GreaterThan => "GreaterThan",
            BinOp::GreaterEqual => "GreaterThanEquals",
            BinOp::Add => "Plus",
            BinOp::Subtract => "Minus",
            BinOp::Multiply => "Multiply",
            BinOp::Divide => "Divide",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// Logical negation (`not`, `!`)
    Not,
    /// Arithmetic negation (`-`)
    Negate,
}

impl UnOp {
    pub const PRECEDENCE: u8 = 7;

    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Not => "not",
            UnOp::Negate => "-",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UnOp::Not => "Not",
            UnOp::Negate => "Negative",
        }
    }
}
