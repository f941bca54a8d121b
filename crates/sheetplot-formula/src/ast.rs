//! Formula syntax tree

use sheetplot_core::{CellAddress, CellError, CellRange};

/// Formula expression
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    Number(f64),
    String(String),
    Boolean(bool),
    Error(CellError),

    /// Single cell reference
    CellRef(CellReference),
    /// Rectangular range reference
    RangeRef(RangeReference),
    /// Bare identifier that is not a function call (defined names are not supported)
    NameRef(String),

    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<FormulaExpr>,
    },

    /// Function call; the name is stored uppercase
    Function { name: String, args: Vec<FormulaExpr> },

    /// Array constant (`{1,2;3,4}`)
    Array(Vec<Vec<FormulaExpr>>),
}

/// Cell reference with optional sheet
#[derive(Debug, Clone, PartialEq)]
pub struct CellReference {
    pub sheet: Option<String>,
    pub address: CellAddress,
}

/// Range reference with optional sheet
#[derive(Debug, Clone, PartialEq)]
pub struct RangeReference {
    pub sheet: Option<String>,
    pub range: CellRange,
}

/// Binary operators, lowest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    Concat,
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOperator {
    /// Binding power; higher binds tighter
    pub(crate) fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::LessThan
            | BinaryOperator::LessEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterEqual => 1,
            BinaryOperator::Concat => 2,
            BinaryOperator::Add | BinaryOperator::Subtract => 3,
            BinaryOperator::Multiply | BinaryOperator::Divide => 4,
            BinaryOperator::Power => 5,
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Percent,
}
