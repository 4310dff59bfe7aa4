//! The process-wide builtin type set.
//!
//! Built once on first use and never mutated afterwards, so every thread
//! and every symbol table shares the same `Arc`s. Identity comparisons
//! against these singletons are therefore reliable.

use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;

use crate::types::{NumberKind, Type, TypeKind, TypeRef};

static BUILTINS: OnceLock<BuiltinTypes> = OnceLock::new();

/// Every builtin type, with direct handles to the scalars.
#[derive(Debug)]
pub struct BuiltinTypes {
    pub void: TypeRef,
    pub invalid: TypeRef,

    pub float: TypeRef,
    pub half: TypeRef,
    pub float_literal: TypeRef,
    pub int: TypeRef,
    pub uint: TypeRef,
    pub int_literal: TypeRef,
    pub short: TypeRef,
    pub ushort: TypeRef,
    pub byte: TypeRef,
    pub ubyte: TypeRef,
    pub bool: TypeRef,

    /// All builtin types in creation order.
    all: Vec<TypeRef>,
    by_name: FxHashMap<String, TypeRef>,
}

impl BuiltinTypes {
    /// The shared builtin set, initialised on first call.
    pub fn get() -> &'static BuiltinTypes {
        BUILTINS.get_or_init(BuiltinTypes::build)
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeRef> {
        self.by_name.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeRef> {
        self.all.iter()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    #[tracing::instrument(level = "debug")]
    fn build() -> BuiltinTypes {
        let mut set = Builder::default();

        let void = set.push(Type::new_builtin("void", TypeKind::Void));
        let invalid = set.push(Type::new_builtin("$invalid", TypeKind::Invalid));

        let float = set.scalar("float", NumberKind::Float, 10, 32);
        let half = set.scalar("half", NumberKind::Float, 9, 16);
        let float_literal = set.literal("$floatLiteral", &float, 8);
        let int = set.scalar("int", NumberKind::Signed, 7, 32);
        let uint = set.scalar("uint", NumberKind::Unsigned, 6, 32);
        let int_literal = set.literal("$intLiteral", &int, 5);
        let short = set.scalar("short", NumberKind::Signed, 4, 16);
        let ushort = set.scalar("ushort", NumberKind::Unsigned, 3, 16);
        let byte = set.scalar("byte", NumberKind::Signed, 2, 8);
        let ubyte = set.scalar("ubyte", NumberKind::Unsigned, 1, 8);
        let bool = set.scalar("bool", NumberKind::Boolean, 0, 1);

        for scalar in [&float, &half, &int, &uint, &short, &ushort, &byte, &ubyte, &bool] {
            for columns in 2..=4u8 {
                let name = format!("{}{columns}", scalar.name());
                set.push(Type::new_builtin(
                    &name,
                    TypeKind::Vector {
                        component: Arc::clone(scalar),
                        columns,
                    },
                ));
            }
        }
        for scalar in [&float, &half] {
            for columns in 2..=4u8 {
                for rows in 2..=4u8 {
                    let name = format!("{}{columns}x{rows}", scalar.name());
                    set.push(Type::new_builtin(
                        &name,
                        TypeKind::Matrix {
                            component: Arc::clone(scalar),
                            columns,
                            rows,
                        },
                    ));
                }
            }
        }

        set.generic("$genType", &["float", "float2", "float3", "float4"]);
        set.generic("$genHType", &["half", "half2", "half3", "half4"]);
        set.generic("$genIType", &["int", "int2", "int3", "int4"]);
        set.generic("$genBType", &["bool", "bool2", "bool3", "bool4"]);
        set.generic(
            "$mat",
            &[
                "float2x2", "float2x3", "float2x4", "float3x2", "float3x3", "float3x4",
                "float4x2", "float4x3", "float4x4",
            ],
        );
        set.generic(
            "$hmat",
            &[
                "half2x2", "half2x3", "half2x4", "half3x2", "half3x3", "half3x4", "half4x2",
                "half4x3", "half4x4",
            ],
        );
        set.generic("$vec", &["float2", "float3", "float4"]);
        set.generic("$hvec", &["half2", "half3", "half4"]);
        set.generic("$ivec", &["int2", "int3", "int4"]);
        set.generic("$bvec", &["bool2", "bool3", "bool4"]);

        for name in ["sampler2D", "texture2D", "sampler", "shader", "colorFilter", "blender"] {
            set.push(Type::new_builtin(name, TypeKind::Other));
        }

        tracing::debug!(count = set.all.len(), "builtin types initialised");
        BuiltinTypes {
            void,
            invalid,
            float,
            half,
            float_literal,
            int,
            uint,
            int_literal,
            short,
            ushort,
            byte,
            ubyte,
            bool,
            all: set.all,
            by_name: set.by_name,
        }
    }

    /// The canonical vector or matrix of `base` with the given shape.
    ///
    /// `(1, 1)` returns the scalar itself. Literal scalars resolve to the
    /// family of their concrete type.
    ///
    /// # Panics
    ///
    /// Panics if `base` is not a scalar, or if no builtin type has the
    /// requested shape (matrices exist only for `float` and `half`).
    pub fn to_compound(&self, base: &Type, columns: u8, rows: u8) -> TypeRef {
        assert!(base.is_scalar(), "'{}' is not a scalar type", base.name());
        let name = if columns == 1 && rows == 1 {
            base.name().to_owned()
        } else {
            let family = base.scalar_type_for_literal().name();
            if rows == 1 {
                format!("{family}{columns}")
            } else {
                format!("{family}{columns}x{rows}")
            }
        };
        match self.by_name.get(&name) {
            Some(ty) => Arc::clone(ty),
            None => panic!(
                "unsupported compound shape {columns}x{rows} for '{}'",
                base.name()
            ),
        }
    }
}

impl Type {
    /// See [`BuiltinTypes::to_compound`].
    pub fn to_compound(&self, types: &BuiltinTypes, columns: u8, rows: u8) -> TypeRef {
        types.to_compound(self, columns, rows)
    }
}

#[derive(Default)]
struct Builder {
    all: Vec<TypeRef>,
    by_name: FxHashMap<String, TypeRef>,
}

impl Builder {
    fn push(&mut self, ty: TypeRef) -> TypeRef {
        self.by_name.insert(ty.name().to_owned(), Arc::clone(&ty));
        self.all.push(Arc::clone(&ty));
        ty
    }

    fn scalar(&mut self, name: &str, number_kind: NumberKind, priority: u8, bits: u8) -> TypeRef {
        self.push(Type::new_builtin(
            name,
            TypeKind::Scalar {
                number_kind,
                priority,
                bit_width: bits,
            },
        ))
    }

    fn literal(&mut self, name: &str, scalar: &TypeRef, priority: u8) -> TypeRef {
        self.push(Type::new_builtin(
            name,
            TypeKind::Literal {
                scalar: Arc::clone(scalar),
                priority,
            },
        ))
    }

    fn generic(&mut self, name: &str, members: &[&str]) {
        let coercible = members
            .iter()
            .filter_map(|member| self.by_name.get(*member).cloned())
            .collect::<Vec<_>>();
        debug_assert_eq!(coercible.len(), members.len(), "unknown member of '{name}'");
        self.push(Type::new_builtin(name, TypeKind::Generic { coercible }));
    }
}
