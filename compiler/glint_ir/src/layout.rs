//! `layout(...)` qualifiers.

use std::fmt;

bitflags::bitflags! {
    /// Boolean layout qualifiers.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LayoutFlags: u32 {
        const ORIGIN_UPPER_LEFT = 1 << 0;
        const OVERRIDE_COVERAGE = 1 << 1;
        const PUSH_CONSTANT = 1 << 2;
        const BLEND_SUPPORT_ALL_EQUATIONS = 1 << 3;
        const SRGB_UNPREMUL = 1 << 4;
        const KEY = 1 << 5;
        const TRACKED = 1 << 6;
    }
}

/// Geometry primitive named by a `layout(points)`-style qualifier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Primitive {
    #[default]
    Default = -1,
    Points = 0,
    Lines = 1,
    LinesAdjacency = 2,
    Triangles = 3,
    TrianglesAdjacency = 4,
}

impl Primitive {
    pub const fn from_raw(raw: i8) -> Option<Self> {
        Some(match raw {
            -1 => Self::Default,
            0 => Self::Points,
            1 => Self::Lines,
            2 => Self::LinesAdjacency,
            3 => Self::Triangles,
            4 => Self::TrianglesAdjacency,
            _ => return None,
        })
    }

    const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Points => Some("points"),
            Self::Lines => Some("lines"),
            Self::LinesAdjacency => Some("lines_adjacency"),
            Self::Triangles => Some("triangles"),
            Self::TrianglesAdjacency => Some("triangles_adjacency"),
        }
    }
}

/// Host-side type a uniform is mirrored as in generated glue code.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum CType {
    #[default]
    Default = 0,
    Bool = 1,
    Float = 2,
    Float2 = 3,
    Float3 = 4,
    Float4 = 5,
    Int32 = 6,
    Rect = 7,
    IRect = 8,
    PMColor4f = 9,
    PMColor = 10,
    V4 = 11,
    Point = 12,
    IPoint = 13,
    Matrix = 14,
    M44 = 15,
    SurfaceProxyView = 16,
    FragmentProcessor = 17,
}

impl CType {
    pub const fn from_raw(raw: i8) -> Option<Self> {
        Some(match raw {
            0 => Self::Default,
            1 => Self::Bool,
            2 => Self::Float,
            3 => Self::Float2,
            4 => Self::Float3,
            5 => Self::Float4,
            6 => Self::Int32,
            7 => Self::Rect,
            8 => Self::IRect,
            9 => Self::PMColor4f,
            10 => Self::PMColor,
            11 => Self::V4,
            12 => Self::Point,
            13 => Self::IPoint,
            14 => Self::Matrix,
            15 => Self::M44,
            16 => Self::SurfaceProxyView,
            17 => Self::FragmentProcessor,
            _ => return None,
        })
    }
}

/// A full set of layout qualifiers.
///
/// Integer qualifiers use `-1` for "not specified".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    pub flags: LayoutFlags,
    pub location: i32,
    pub offset: i32,
    pub binding: i32,
    pub index: i32,
    pub set: i32,
    /// Builtin variable id (`frag_coord` and friends), `-1` if none.
    pub builtin: i32,
    pub input_attachment_index: i32,
    pub primitive: Primitive,
    pub max_vertices: i32,
    pub invocations: i32,
    /// Conditional-compilation guard for the declaration.
    pub when: String,
    pub ctype: CType,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            flags: LayoutFlags::empty(),
            location: -1,
            offset: -1,
            binding: -1,
            index: -1,
            set: -1,
            builtin: -1,
            input_attachment_index: -1,
            primitive: Primitive::Default,
            max_vertices: -1,
            invocations: -1,
            when: String::new(),
            ctype: CType::Default,
        }
    }
}

impl Layout {
    /// Layout that only names a builtin variable.
    pub fn builtin(builtin: i32) -> Self {
        Layout {
            builtin,
            ..Layout::default()
        }
    }

    /// Whether this layout is indistinguishable from `Layout::default()`.
    pub fn is_default(&self) -> bool {
        *self == Layout::default()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        let mut int_part = |name: &str, value: i32| {
            if value >= 0 {
                parts.push(format!("{name} = {value}"));
            }
        };
        int_part("location", self.location);
        int_part("offset", self.offset);
        int_part("binding", self.binding);
        int_part("index", self.index);
        int_part("set", self.set);
        int_part("builtin", self.builtin);
        int_part("input_attachment_index", self.input_attachment_index);

        let flag_names = [
            (LayoutFlags::ORIGIN_UPPER_LEFT, "origin_upper_left"),
            (LayoutFlags::OVERRIDE_COVERAGE, "override_coverage"),
            (LayoutFlags::PUSH_CONSTANT, "push_constant"),
            (
                LayoutFlags::BLEND_SUPPORT_ALL_EQUATIONS,
                "blend_support_all_equations",
            ),
            (LayoutFlags::SRGB_UNPREMUL, "srgb_unpremul"),
            (LayoutFlags::KEY, "key"),
            (LayoutFlags::TRACKED, "tracked"),
        ];
        for (flag, name) in flag_names {
            if self.flags.contains(flag) {
                parts.push(name.to_owned());
            }
        }
        if let Some(keyword) = self.primitive.keyword() {
            parts.push(keyword.to_owned());
        }
        if self.max_vertices >= 0 {
            parts.push(format!("max_vertices = {}", self.max_vertices));
        }
        if self.invocations >= 0 {
            parts.push(format!("invocations = {}", self.invocations));
        }
        if !self.when.is_empty() {
            parts.push(format!("when = {}", self.when));
        }

        if parts.is_empty() {
            Ok(())
        } else {
            write!(f, "layout ({})", parts.join(", "))
        }
    }
}
