//! Type descriptors.
//!
//! A [`Type`] never changes after construction. Scalars, vectors, matrices,
//! generics and the opaque handle types are members of the process-wide
//! [`BuiltinTypes`](crate::BuiltinTypes) set. Arrays, structs and enums may
//! also be created on the fly and owned by a [`SymbolTable`].
//!
//! # Equality
//!
//! Two types are equal when they are the same allocation, or when they have
//! the same name and the same shape. The second rule lets an array or struct
//! cloned into another table compare equal to its source.

use std::fmt;
use std::sync::Arc;

use glint_ir::{Modifiers, Span};

use crate::{CoercionCost, Symbol, SymbolTable};

/// Shared handle to a type. Builtin types are handed out as clones of the
/// singleton `Arc`, so pointer identity is meaningful.
pub type TypeRef = Arc<Type>;

/// Arithmetic family of a scalar.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Float,
    Signed,
    Unsigned,
    Boolean,
    NonNumeric,
}

/// Element count of an array type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArraySize {
    Sized(u32),
    Unsized,
}

impl ArraySize {
    /// Interpret a raw count where any negative value means unsized.
    pub fn from_raw(raw: i32) -> Self {
        u32::try_from(raw).map_or(ArraySize::Unsized, ArraySize::Sized)
    }

    pub fn count(self) -> Option<u32> {
        match self {
            ArraySize::Sized(count) => Some(count),
            ArraySize::Unsized => None,
        }
    }
}

/// One member of a struct type.
#[derive(Clone, Debug)]
pub struct StructField {
    pub modifiers: Modifiers,
    pub name: String,
    pub ty: TypeRef,
}

impl StructField {
    pub fn new(modifiers: Modifiers, name: impl Into<String>, ty: TypeRef) -> Self {
        StructField {
            modifiers,
            name: name.into(),
            ty,
        }
    }
}

/// The shape of a type.
#[derive(Debug)]
pub enum TypeKind {
    Void,
    Invalid,
    /// Opaque handles such as `sampler2D` or `shader`.
    Other,
    Scalar {
        number_kind: NumberKind,
        priority: u8,
        bit_width: u8,
    },
    /// The type of an untyped numeric literal. Displays as `scalar`.
    Literal {
        scalar: TypeRef,
        priority: u8,
    },
    Vector {
        component: TypeRef,
        columns: u8,
    },
    Matrix {
        component: TypeRef,
        columns: u8,
        rows: u8,
    },
    Array {
        component: TypeRef,
        size: ArraySize,
    },
    Struct {
        fields: Vec<StructField>,
    },
    Enum,
    /// A placeholder used in builtin signatures, standing for any member of
    /// its coercible list.
    Generic {
        coercible: Vec<TypeRef>,
    },
}

/// Discriminant of [`TypeKind`] without its payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeClass {
    Void,
    Invalid,
    Other,
    Scalar,
    Literal,
    Vector,
    Matrix,
    Array,
    Struct,
    Enum,
    Generic,
}

/// An immutable type descriptor.
#[derive(Debug)]
pub struct Type {
    name: String,
    kind: TypeKind,
    builtin: bool,
    span: Span,
}

impl Type {
    pub(crate) fn new_builtin(name: &str, kind: TypeKind) -> TypeRef {
        Arc::new(Type {
            name: name.to_owned(),
            kind,
            builtin: true,
            span: Span::NONE,
        })
    }

    /// An array of `component`. The name is conventionally built with
    /// [`Type::array_name`].
    pub fn make_array(name: impl Into<String>, component: &TypeRef, size: ArraySize) -> Type {
        Type {
            name: name.into(),
            kind: TypeKind::Array {
                component: Arc::clone(component),
                size,
            },
            builtin: false,
            span: Span::NONE,
        }
    }

    pub fn make_struct(span: Span, name: impl Into<String>, fields: Vec<StructField>) -> Type {
        Type {
            name: name.into(),
            kind: TypeKind::Struct { fields },
            builtin: false,
            span,
        }
    }

    pub fn make_enum(name: impl Into<String>) -> Type {
        Type {
            name: name.into(),
            kind: TypeKind::Enum,
            builtin: false,
            span: Span::NONE,
        }
    }

    /// `float[4]` for a sized array, `float[]` for an unsized one.
    pub fn array_name(component: &Type, size: ArraySize) -> String {
        match size {
            ArraySize::Sized(count) => format!("{}[{count}]", component.name),
            ArraySize::Unsized => format!("{}[]", component.name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name shown to users. Literal types read as their concrete scalar.
    pub fn display_name(&self) -> &str {
        self.scalar_type_for_literal().name()
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Whether this type belongs to the builtin singleton set.
    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    pub fn class(&self) -> TypeClass {
        match self.kind {
            TypeKind::Void => TypeClass::Void,
            TypeKind::Invalid => TypeClass::Invalid,
            TypeKind::Other => TypeClass::Other,
            TypeKind::Scalar { .. } => TypeClass::Scalar,
            TypeKind::Literal { .. } => TypeClass::Literal,
            TypeKind::Vector { .. } => TypeClass::Vector,
            TypeKind::Matrix { .. } => TypeClass::Matrix,
            TypeKind::Array { .. } => TypeClass::Array,
            TypeKind::Struct { .. } => TypeClass::Struct,
            TypeKind::Enum => TypeClass::Enum,
            TypeKind::Generic { .. } => TypeClass::Generic,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self.kind, TypeKind::Void)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.kind, TypeKind::Invalid)
    }

    /// Scalars, including literal types.
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, TypeKind::Scalar { .. } | TypeKind::Literal { .. })
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, TypeKind::Literal { .. })
    }

    pub fn is_vector(&self) -> bool {
        matches!(self.kind, TypeKind::Vector { .. })
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self.kind, TypeKind::Matrix { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array { .. })
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct { .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum)
    }

    pub fn is_generic(&self) -> bool {
        matches!(self.kind, TypeKind::Generic { .. })
    }

    pub fn number_kind(&self) -> NumberKind {
        match &self.kind {
            TypeKind::Scalar { number_kind, .. } => *number_kind,
            TypeKind::Literal { scalar, .. } => scalar.number_kind(),
            _ => NumberKind::NonNumeric,
        }
    }

    /// Float, signed or unsigned scalar.
    pub fn is_number(&self) -> bool {
        matches!(
            self.number_kind(),
            NumberKind::Float | NumberKind::Signed | NumberKind::Unsigned
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.number_kind(), NumberKind::Signed | NumberKind::Unsigned)
    }

    pub fn is_float(&self) -> bool {
        self.number_kind() == NumberKind::Float
    }

    pub fn is_signed(&self) -> bool {
        self.number_kind() == NumberKind::Signed
    }

    pub fn is_unsigned(&self) -> bool {
        self.number_kind() == NumberKind::Unsigned
    }

    pub fn is_boolean(&self) -> bool {
        self.number_kind() == NumberKind::Boolean
    }

    /// Coercion rank of a scalar; zero for everything else.
    pub fn priority(&self) -> u8 {
        match &self.kind {
            TypeKind::Scalar { priority, .. } | TypeKind::Literal { priority, .. } => *priority,
            _ => 0,
        }
    }

    pub fn bit_width(&self) -> u8 {
        match &self.kind {
            TypeKind::Scalar { bit_width, .. } => *bit_width,
            TypeKind::Literal { scalar, .. } => scalar.bit_width(),
            _ => 0,
        }
    }

    /// The concrete scalar behind a literal type, or `self`.
    pub fn scalar_type_for_literal(&self) -> &Type {
        match &self.kind {
            TypeKind::Literal { scalar, .. } => scalar,
            _ => self,
        }
    }

    /// Element type of a vector, matrix or array; `self` otherwise.
    pub fn component_type(&self) -> &Type {
        match &self.kind {
            TypeKind::Vector { component, .. }
            | TypeKind::Matrix { component, .. }
            | TypeKind::Array { component, .. } => component,
            _ => self,
        }
    }

    /// Column count of a scalar (1), vector or matrix; zero for other kinds.
    pub fn columns(&self) -> u8 {
        match &self.kind {
            TypeKind::Scalar { .. } | TypeKind::Literal { .. } => 1,
            TypeKind::Vector { columns, .. } | TypeKind::Matrix { columns, .. } => *columns,
            _ => 0,
        }
    }

    /// Row count of a matrix; 1 for scalars and vectors, zero otherwise.
    pub fn rows(&self) -> u8 {
        match &self.kind {
            TypeKind::Scalar { .. } | TypeKind::Literal { .. } | TypeKind::Vector { .. } => 1,
            TypeKind::Matrix { rows, .. } => *rows,
            _ => 0,
        }
    }

    pub fn array_size(&self) -> Option<ArraySize> {
        match &self.kind {
            TypeKind::Array { size, .. } => Some(*size),
            _ => None,
        }
    }

    pub fn fields(&self) -> &[StructField] {
        match &self.kind {
            TypeKind::Struct { fields } => fields,
            _ => &[],
        }
    }

    pub fn coercible_types(&self) -> &[TypeRef] {
        match &self.kind {
            TypeKind::Generic { coercible } => coercible,
            _ => &[],
        }
    }

    /// Number of scalar slots a value of this type occupies. Unsized arrays
    /// and non-value types occupy none.
    pub fn slot_count(&self) -> usize {
        match &self.kind {
            TypeKind::Scalar { .. } | TypeKind::Literal { .. } => 1,
            TypeKind::Vector { columns, .. } => usize::from(*columns),
            TypeKind::Matrix { columns, rows, .. } => usize::from(*columns) * usize::from(*rows),
            TypeKind::Array { component, size } => {
                size.count().map_or(0, |count| count as usize * component.slot_count())
            }
            TypeKind::Struct { fields } => fields.iter().map(|f| f.ty.slot_count()).sum(),
            _ => 0,
        }
    }

    /// The scalar type stored at `slot`, looking through vectors, matrices,
    /// arrays and struct members.
    pub fn slot_type(&self, slot: usize) -> &Type {
        match &self.kind {
            TypeKind::Vector { component, .. } | TypeKind::Matrix { component, .. } => component,
            TypeKind::Array { component, .. } => {
                let per_element = component.slot_count();
                if per_element == 0 {
                    return self;
                }
                component.slot_type(slot % per_element)
            }
            TypeKind::Struct { fields } => {
                let mut slot = slot;
                for field in fields {
                    let count = field.ty.slot_count();
                    if slot < count {
                        return field.ty.slot_type(slot);
                    }
                    slot -= count;
                }
                self
            }
            _ => self,
        }
    }

    /// Smallest value an integer type can hold.
    pub fn minimum_value(&self) -> Option<i64> {
        let bits = u32::from(self.bit_width());
        match self.number_kind() {
            NumberKind::Signed => Some(-(1i64 << (bits - 1))),
            NumberKind::Unsigned => Some(0),
            _ => None,
        }
    }

    /// Largest value an integer type can hold.
    pub fn maximum_value(&self) -> Option<i64> {
        let bits = u32::from(self.bit_width());
        match self.number_kind() {
            NumberKind::Signed => Some((1i64 << (bits - 1)) - 1),
            NumberKind::Unsigned => Some((1i64 << bits) - 1),
            _ => None,
        }
    }

    /// Cost of implicitly converting a value of this type into `other`.
    pub fn coercion_cost(&self, other: &Type) -> CoercionCost {
        if self == other {
            return CoercionCost::Free;
        }
        if self.is_vector() && other.is_vector() {
            if self.columns() == other.columns() {
                return self.component_type().coercion_cost(other.component_type());
            }
            return CoercionCost::Impossible;
        }
        if self.is_matrix() {
            if self.columns() == other.columns() && self.rows() == other.rows() {
                return self.component_type().coercion_cost(other.component_type());
            }
            return CoercionCost::Impossible;
        }
        if self.is_number() && other.is_number() {
            if self.is_literal() && self.is_integer() {
                return CoercionCost::Free;
            }
            if self.number_kind() != other.number_kind() {
                return CoercionCost::Impossible;
            }
            let (from, to) = (u32::from(self.priority()), u32::from(other.priority()));
            if to >= from {
                return CoercionCost::Normal(to - from);
            }
            return CoercionCost::Narrowing(from - to);
        }
        self.coercible_types()
            .iter()
            .position(|candidate| **candidate == *other)
            .map_or(CoercionCost::Impossible, |index| {
                CoercionCost::Normal(index as u32 + 1)
            })
    }

    /// Whether this type is an array, or a struct with an array somewhere
    /// among its members.
    pub fn is_or_contains_array(&self) -> bool {
        match &self.kind {
            TypeKind::Struct { fields } => fields.iter().any(|f| f.ty.is_or_contains_array()),
            TypeKind::Array { .. } => true,
            _ => false,
        }
    }

    /// Make this type available in `table`.
    ///
    /// Builtins are shared and returned as-is. A type already visible under
    /// the same name is reused. Arrays, structs and enums are otherwise
    /// copied and owned by `table`.
    ///
    /// # Panics
    ///
    /// Panics if the name is bound to a non-type or to a type of a
    /// different kind, or if `self` is some other kind of type.
    pub fn clone_into_table(self: &Arc<Self>, table: &SymbolTable) -> TypeRef {
        if self.builtin {
            return Arc::clone(self);
        }
        if let Some(existing) = table.lookup(&self.name) {
            let Symbol::Type(existing) = existing else {
                panic!("'{}' is bound to a non-type symbol", self.name);
            };
            assert_eq!(
                existing.class(),
                self.class(),
                "'{}' is already bound to a different kind of type",
                self.name
            );
            return existing;
        }
        let copy = match &self.kind {
            TypeKind::Array { component, size } => {
                Type::make_array(self.name.clone(), component, *size)
            }
            TypeKind::Struct { fields } => {
                Type::make_struct(self.span, self.name.clone(), fields.clone())
            }
            TypeKind::Enum => Type::make_enum(self.name.clone()),
            _ => panic!("don't know how to clone type '{}'", self.name),
        };
        tracing::trace!(name = %self.name, "cloning type into table");
        table.add(copy)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.name == other.name
                && self.class() == other.class()
                && self.columns() == other.columns()
                && self.rows() == other.rows()
                && self.array_size() == other.array_size())
    }
}

impl Eq for Type {}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests;
