//! Operators shared by the parse tree and the typed IR.
//!
//! The discriminant of each variant is its byte in the rehydration format,
//! so the numbering is stable: append new operators, never reorder.

use std::fmt;

/// Binary, prefix, and postfix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Operator {
    // Arithmetic
    Plus = 0,
    Minus = 1,
    Star = 2,
    Slash = 3,
    Percent = 4,
    Shl = 5,
    Shr = 6,

    // Logical
    LogicalNot = 7,
    LogicalAnd = 8,
    LogicalOr = 9,
    LogicalXor = 10,

    // Bitwise
    BitwiseNot = 11,
    BitwiseAnd = 12,
    BitwiseOr = 13,
    BitwiseXor = 14,

    // Assignment
    Eq = 15,

    // Comparison
    EqEq = 16,
    Neq = 17,
    Lt = 18,
    Gt = 19,
    LtEq = 20,
    GtEq = 21,

    // Compound assignment
    PlusEq = 22,
    MinusEq = 23,
    StarEq = 24,
    SlashEq = 25,
    PercentEq = 26,
    ShlEq = 27,
    ShrEq = 28,
    BitwiseAndEq = 29,
    BitwiseOrEq = 30,
    BitwiseXorEq = 31,

    // Increment / decrement
    PlusPlus = 32,
    MinusMinus = 33,

    Comma = 34,
}

impl Operator {
    /// Decode an operator byte. Returns `None` for unknown values.
    pub const fn from_u8(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Self::Plus,
            1 => Self::Minus,
            2 => Self::Star,
            3 => Self::Slash,
            4 => Self::Percent,
            5 => Self::Shl,
            6 => Self::Shr,
            7 => Self::LogicalNot,
            8 => Self::LogicalAnd,
            9 => Self::LogicalOr,
            10 => Self::LogicalXor,
            11 => Self::BitwiseNot,
            12 => Self::BitwiseAnd,
            13 => Self::BitwiseOr,
            14 => Self::BitwiseXor,
            15 => Self::Eq,
            16 => Self::EqEq,
            17 => Self::Neq,
            18 => Self::Lt,
            19 => Self::Gt,
            20 => Self::LtEq,
            21 => Self::GtEq,
            22 => Self::PlusEq,
            23 => Self::MinusEq,
            24 => Self::StarEq,
            25 => Self::SlashEq,
            26 => Self::PercentEq,
            27 => Self::ShlEq,
            28 => Self::ShrEq,
            29 => Self::BitwiseAndEq,
            30 => Self::BitwiseOrEq,
            31 => Self::BitwiseXorEq,
            32 => Self::PlusPlus,
            33 => Self::MinusMinus,
            34 => Self::Comma,
            _ => return None,
        })
    }

    /// The byte used for this operator in the rehydration format.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::LogicalNot => "!",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::LogicalXor => "^^",
            Self::BitwiseNot => "~",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::Eq => "=",
            Self::EqEq => "==",
            Self::Neq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::PlusEq => "+=",
            Self::MinusEq => "-=",
            Self::StarEq => "*=",
            Self::SlashEq => "/=",
            Self::PercentEq => "%=",
            Self::ShlEq => "<<=",
            Self::ShrEq => ">>=",
            Self::BitwiseAndEq => "&=",
            Self::BitwiseOrEq => "|=",
            Self::BitwiseXorEq => "^=",
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
            Self::Comma => ",",
        }
    }

    /// `=` and every compound assignment.
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::PlusEq
                | Self::MinusEq
                | Self::StarEq
                | Self::SlashEq
                | Self::PercentEq
                | Self::ShlEq
                | Self::ShrEq
                | Self::BitwiseAndEq
                | Self::BitwiseOrEq
                | Self::BitwiseXorEq
        )
    }

    /// For a compound assignment, the underlying arithmetic operator
    /// (`+=` → `+`). Every other operator maps to itself.
    #[must_use]
    pub const fn remove_assignment(self) -> Self {
        match self {
            Self::PlusEq => Self::Plus,
            Self::MinusEq => Self::Minus,
            Self::StarEq => Self::Star,
            Self::SlashEq => Self::Slash,
            Self::PercentEq => Self::Percent,
            Self::ShlEq => Self::Shl,
            Self::ShrEq => Self::Shr,
            Self::BitwiseAndEq => Self::BitwiseAnd,
            Self::BitwiseOrEq => Self::BitwiseOr,
            Self::BitwiseXorEq => Self::BitwiseXor,
            other => other,
        }
    }

    /// `==` and `!=`.
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::EqEq | Self::Neq)
    }

    /// `<`, `>`, `<=`, `>=`.
    pub const fn is_relational(self) -> bool {
        matches!(self, Self::Lt | Self::Gt | Self::LtEq | Self::GtEq)
    }

    /// `&&`, `||`, `^^`.
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::LogicalAnd | Self::LogicalOr | Self::LogicalXor)
    }

    /// Operators that only accept integer operands.
    pub const fn is_bitwise(self) -> bool {
        matches!(
            self,
            Self::Shl
                | Self::Shr
                | Self::BitwiseAnd
                | Self::BitwiseOr
                | Self::BitwiseXor
                | Self::Percent
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[cfg(test)]
mod tests;
