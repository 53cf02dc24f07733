//! Expression tree produced by [`parse_expression`](super::parse_expression).

/// A parsed rules expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal that reads as a number in full.
    Number(f64),

    /// A run of non-operator text: a dice literal, a variable reference, a
    /// number with a unit suffix, or free text. Kept verbatim when part of a
    /// [`Expr::Splice`], trimmed otherwise.
    Atom(String),

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    Compare {
        op: CompareOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// A call to a built-in function: `MAX(1, @STRMOD)`.
    Call { function: Function, args: Vec<Expr> },

    /// A parenthesized sub-expression.
    Group(Box<Expr>),

    /// Juxtaposed operands such as `(40 * 5) kg`. Each part is rendered and
    /// the concatenated text is read again as an expression.
    Splice(Vec<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gt,
    Lt,
    Eq,
}

/// Built-in functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Max,
    Min,
}

impl Function {
    /// Look up a function by its (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MAX" => Some(Function::Max),
            "MIN" => Some(Function::Min),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Max => "MAX",
            Function::Min => "MIN",
        }
    }
}
