//! Command tags of the rehydration format.
//!
//! Every record in a blob starts with one of these bytes. The discriminants
//! are the wire encoding: append new commands at the end, never renumber.

use std::fmt;

/// Version written after the string-table offset. Bump it whenever tag
/// numbering or a payload layout changes.
pub const FORMAT_VERSION: u16 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    // Layout
    BuiltinLayout = 0,
    DefaultLayout = 1,
    Layout = 2,

    // Modifiers
    DefaultModifiers = 3,
    Modifiers8Bit = 4,
    Modifiers = 5,

    // Symbols
    ArrayType = 6,
    EnumType = 7,
    FunctionDeclaration = 8,
    Field = 9,
    StructType = 10,
    SymbolRef = 11,
    SymbolAlias = 12,
    SystemType = 13,
    UnresolvedFunction = 14,
    Variable = 15,

    SymbolTable = 16,

    // Program elements
    Elements = 17,
    Enum = 18,
    FunctionDefinition = 19,
    InterfaceBlock = 20,
    VarDeclarations = 21,
    StructDefinition = 22,
    ElementsComplete = 23,

    // Statements
    Block = 24,
    Break = 25,
    Continue = 26,
    Discard = 27,
    Do = 28,
    ExpressionStatement = 29,
    For = 30,
    If = 31,
    InlineMarker = 32,
    Return = 33,
    Switch = 34,
    VarDeclaration = 35,

    // Expressions
    Binary = 36,
    BoolLiteral = 37,
    ConstructorArray = 38,
    ConstructorCompound = 39,
    ConstructorCompoundCast = 40,
    ConstructorDiagonalMatrix = 41,
    ConstructorMatrixResize = 42,
    ConstructorScalarCast = 43,
    ConstructorSplat = 44,
    ConstructorStruct = 45,
    FieldAccess = 46,
    FloatLiteral = 47,
    FunctionCall = 48,
    Index = 49,
    IntLiteral = 50,
    Postfix = 51,
    Prefix = 52,
    Setting = 53,
    Swizzle = 54,
    Ternary = 55,
    VariableReference = 56,

    /// An absent statement, expression or symbol table.
    Void = 57,
}

impl Command {
    /// Decode a command byte. Returns `None` for unknown values.
    pub const fn from_u8(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Self::BuiltinLayout,
            1 => Self::DefaultLayout,
            2 => Self::Layout,
            3 => Self::DefaultModifiers,
            4 => Self::Modifiers8Bit,
            5 => Self::Modifiers,
            6 => Self::ArrayType,
            7 => Self::EnumType,
            8 => Self::FunctionDeclaration,
            9 => Self::Field,
            10 => Self::StructType,
            11 => Self::SymbolRef,
            12 => Self::SymbolAlias,
            13 => Self::SystemType,
            14 => Self::UnresolvedFunction,
            15 => Self::Variable,
            16 => Self::SymbolTable,
            17 => Self::Elements,
            18 => Self::Enum,
            19 => Self::FunctionDefinition,
            20 => Self::InterfaceBlock,
            21 => Self::VarDeclarations,
            22 => Self::StructDefinition,
            23 => Self::ElementsComplete,
            24 => Self::Block,
            25 => Self::Break,
            26 => Self::Continue,
            27 => Self::Discard,
            28 => Self::Do,
            29 => Self::ExpressionStatement,
            30 => Self::For,
            31 => Self::If,
            32 => Self::InlineMarker,
            33 => Self::Return,
            34 => Self::Switch,
            35 => Self::VarDeclaration,
            36 => Self::Binary,
            37 => Self::BoolLiteral,
            38 => Self::ConstructorArray,
            39 => Self::ConstructorCompound,
            40 => Self::ConstructorCompoundCast,
            41 => Self::ConstructorDiagonalMatrix,
            42 => Self::ConstructorMatrixResize,
            43 => Self::ConstructorScalarCast,
            44 => Self::ConstructorSplat,
            45 => Self::ConstructorStruct,
            46 => Self::FieldAccess,
            47 => Self::FloatLiteral,
            48 => Self::FunctionCall,
            49 => Self::Index,
            50 => Self::IntLiteral,
            51 => Self::Postfix,
            52 => Self::Prefix,
            53 => Self::Setting,
            54 => Self::Swizzle,
            55 => Self::Ternary,
            56 => Self::VariableReference,
            57 => Self::Void,
            _ => return None,
        })
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?} ({})", self.as_u8())
    }
}
