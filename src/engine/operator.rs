use crate::error::{CalcError, CalcResult};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Arity {
    Unary,
    Binary,
}

/// How a stacked operator ranks against an incoming one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Precedence {
    /// The stacked operator reduces first.
    Higher,
    /// Same rank, left associative: the stacked operator reduces first.
    Equal,
    /// The incoming operator is pushed on top.
    Lower,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
    Permutation,
    Combination,
    BitAnd,
    BitOr,
    ShiftRight,
    ShiftLeft,
    BitNot,
    OpenBracket,
    CloseBracket,
    Not,
    And,
    Or,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Equal,
    NotEqual,
    Sin,
    Cos,
    Tan,
    Sec,
    Cosec,
    Cot,
    Asin,
    Acos,
    Atan,
    Asec,
    Acosec,
    Acot,
    Sinh,
    Cosh,
    Tanh,
    Log,
    Ln,
    Log10,
    Abs,
    Floor,
    Ceil,
}

impl Operator {
    /// Maps an operator symbol or function name to its operator.
    pub fn identify(text: &str) -> CalcResult<Self> {
        let op = match text {
            "+" => Operator::Add,
            "-" => Operator::Subtract,
            "*" => Operator::Multiply,
            "/" => Operator::Divide,
            "^" => Operator::Power,
            "%" => Operator::Modulo,
            "P" => Operator::Permutation,
            "C" => Operator::Combination,
            "&" => Operator::BitAnd,
            "|" => Operator::BitOr,
            ">>" => Operator::ShiftRight,
            "<<" => Operator::ShiftLeft,
            "~" => Operator::BitNot,
            "(" => Operator::OpenBracket,
            ")" => Operator::CloseBracket,
            "!" => Operator::Not,
            "&&" => Operator::And,
            "||" => Operator::Or,
            ">" => Operator::GreaterThan,
            "<" => Operator::LessThan,
            ">=" => Operator::GreaterThanOrEqual,
            "<=" => Operator::LessThanOrEqual,
            "==" => Operator::Equal,
            "!=" => Operator::NotEqual,
            "sin" => Operator::Sin,
            "cos" => Operator::Cos,
            "tan" => Operator::Tan,
            "sec" => Operator::Sec,
            "cosec" => Operator::Cosec,
            "cot" => Operator::Cot,
            "asin" => Operator::Asin,
            "acos" => Operator::Acos,
            "atan" => Operator::Atan,
            "asec" => Operator::Asec,
            "acosec" => Operator::Acosec,
            "acot" => Operator::Acot,
            "sinh" => Operator::Sinh,
            "cosh" => Operator::Cosh,
            "tanh" => Operator::Tanh,
            "log" => Operator::Log,
            "ln" => Operator::Ln,
            "log10" => Operator::Log10,
            "abs" => Operator::Abs,
            "floor" => Operator::Floor,
            "ceil" => Operator::Ceil,
            _ => return Err(CalcError::parse(format!("Unknown operator: {}", text))),
        };
        Ok(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "^",
            Operator::Modulo => "%",
            Operator::Permutation => "P",
            Operator::Combination => "C",
            Operator::BitAnd => "&",
            Operator::BitOr => "|",
            Operator::ShiftRight => ">>",
            Operator::ShiftLeft => "<<",
            Operator::BitNot => "~",
            Operator::OpenBracket => "(",
            Operator::CloseBracket => ")",
            Operator::Not => "!",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThanOrEqual => "<=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Sin => "sin",
            Operator::Cos => "cos",
            Operator::Tan => "tan",
            Operator::Sec => "sec",
            Operator::Cosec => "cosec",
            Operator::Cot => "cot",
            Operator::Asin => "asin",
            Operator::Acos => "acos",
            Operator::Atan => "atan",
            Operator::Asec => "asec",
            Operator::Acosec => "acosec",
            Operator::Acot => "acot",
            Operator::Sinh => "sinh",
            Operator::Cosh => "cosh",
            Operator::Tanh => "tanh",
            Operator::Log => "log",
            Operator::Ln => "ln",
            Operator::Log10 => "log10",
            Operator::Abs => "abs",
            Operator::Floor => "floor",
            Operator::Ceil => "ceil",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Operator::BitNot
            | Operator::Not
            | Operator::Sin
            | Operator::Cos
            | Operator::Tan
            | Operator::Sec
            | Operator::Cosec
            | Operator::Cot
            | Operator::Asin
            | Operator::Acos
            | Operator::Atan
            | Operator::Asec
            | Operator::Acosec
            | Operator::Acot
            | Operator::Sinh
            | Operator::Cosh
            | Operator::Tanh
            | Operator::Ln
            | Operator::Log10
            | Operator::Abs
            | Operator::Floor
            | Operator::Ceil => Arity::Unary,
            _ => Arity::Binary,
        }
    }

    pub fn is_unary(&self) -> bool {
        self.arity() == Arity::Unary
    }

    pub fn is_bracket(&self) -> bool {
        matches!(self, Operator::OpenBracket | Operator::CloseBracket)
    }

    /// Binding strength; larger binds tighter. Brackets sit at 0 and are
    /// special-cased by [`Operator::precedence`].
    pub fn priority(&self) -> u8 {
        match self {
            Operator::OpenBracket | Operator::CloseBracket => 0,
            Operator::Or => 1,
            Operator::And => 2,
            Operator::GreaterThan
            | Operator::LessThan
            | Operator::GreaterThanOrEqual
            | Operator::LessThanOrEqual
            | Operator::Equal
            | Operator::NotEqual => 3,
            Operator::BitOr => 4,
            Operator::BitAnd => 5,
            Operator::ShiftLeft | Operator::ShiftRight => 6,
            Operator::Add | Operator::Subtract => 7,
            Operator::Multiply | Operator::Divide | Operator::Modulo => 8,
            Operator::Permutation | Operator::Combination | Operator::Log => 9,
            Operator::Power => 10,
            _ => 11,
        }
    }

    /// Power and the prefix operators group right to left.
    pub fn is_right_associative(&self) -> bool {
        *self == Operator::Power || self.is_unary()
    }

    /// Ranks `self`, sitting on the operator stack, against `incoming`.
    pub fn precedence(&self, incoming: &Operator) -> Precedence {
        // An opening bracket is a floor for reduction, and a freshly opened
        // bracket is always pushed.
        if *self == Operator::OpenBracket || *incoming == Operator::OpenBracket {
            return Precedence::Lower;
        }
        let (mine, theirs) = (self.priority(), incoming.priority());
        if mine > theirs {
            Precedence::Higher
        } else if mine < theirs {
            Precedence::Lower
        } else if incoming.is_right_associative() {
            Precedence::Lower
        } else {
            Precedence::Equal
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Operator {
    type Error = CalcError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Operator::identify(value)
    }
}
