//! Declaration modifiers: a layout plus storage and interpolation flags.

use std::fmt;

use crate::Layout;

bitflags::bitflags! {
    /// Storage, interpolation, and inlining qualifiers.
    ///
    /// The low eight bits are the ones common enough that the rehydration
    /// format has a one-byte encoding for them.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u32 {
        const CONST = 1 << 0;
        const IN = 1 << 1;
        const OUT = 1 << 2;
        const UNIFORM = 1 << 3;
        const FLAT = 1 << 4;
        const NO_PERSPECTIVE = 1 << 5;
        const HAS_SIDE_EFFECTS = 1 << 6;
        const VARYING = 1 << 7;
        const INLINE = 1 << 8;
        const NO_INLINE = 1 << 9;
    }
}

/// Layout qualifiers together with modifier flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub layout: Layout,
    pub flags: ModifierFlags,
}

impl Modifiers {
    pub fn new(layout: Layout, flags: ModifierFlags) -> Self {
        Modifiers { layout, flags }
    }

    /// Whether the flags fit in the one-byte encoding.
    pub fn fits_in_byte(&self) -> bool {
        self.flags.bits() <= u32::from(u8::MAX)
    }

    pub fn is_const(&self) -> bool {
        self.flags.contains(ModifierFlags::CONST)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words: Vec<String> = Vec::new();
        let layout = self.layout.to_string();
        if !layout.is_empty() {
            words.push(layout);
        }
        let keywords = [
            (ModifierFlags::UNIFORM, "uniform"),
            (ModifierFlags::CONST, "const"),
            (ModifierFlags::FLAT, "flat"),
            (ModifierFlags::NO_PERSPECTIVE, "noperspective"),
            (ModifierFlags::HAS_SIDE_EFFECTS, "has_side_effects"),
            (ModifierFlags::VARYING, "varying"),
            (ModifierFlags::INLINE, "inline"),
            (ModifierFlags::NO_INLINE, "noinline"),
        ];
        for (flag, keyword) in keywords {
            if self.flags.contains(flag) {
                words.push(keyword.to_owned());
            }
        }
        let inout = ModifierFlags::IN | ModifierFlags::OUT;
        if self.flags.contains(inout) {
            words.push("inout".to_owned());
        } else if self.flags.contains(ModifierFlags::IN) {
            words.push("in".to_owned());
        } else if self.flags.contains(ModifierFlags::OUT) {
            words.push("out".to_owned());
        }
        f.write_str(&words.join(" "))
    }
}
