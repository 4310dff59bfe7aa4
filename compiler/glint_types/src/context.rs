//! Per-compilation context.
//!
//! Everything a type-model operation needs beyond its arguments: the builtin
//! types, the error sink, the program settings, and the target
//! capabilities that `caps.*` settings fold against.

use glint_diagnostic::ErrorReporter;
use rustc_hash::FxHashMap;

use crate::BuiltinTypes;

/// Options that change how strictly programs are checked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProgramSettings {
    /// Accept lossy implicit conversions such as `float` to `half`.
    pub allow_narrowing_conversions: bool,
}

/// A known capability value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CapValue {
    Bool(bool),
    Int(i32),
}

/// Named target capabilities. An empty set leaves every setting unfolded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    values: FxHashMap<String, CapValue>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: CapValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<CapValue> {
        self.values.get(name).copied()
    }
}

/// Shared by reference across every operation of one compilation.
#[derive(Debug)]
pub struct Context {
    pub types: &'static BuiltinTypes,
    pub errors: ErrorReporter,
    pub settings: ProgramSettings,
    pub caps: Capabilities,
}

impl Context {
    pub fn new(settings: ProgramSettings) -> Self {
        Context {
            types: BuiltinTypes::get(),
            errors: ErrorReporter::new(),
            settings,
            caps: Capabilities::new(),
        }
    }

    #[must_use]
    pub fn with_caps(mut self, caps: Capabilities) -> Self {
        self.caps = caps;
        self
    }

    #[must_use]
    pub fn with_errors(mut self, errors: ErrorReporter) -> Self {
        self.errors = errors;
        self
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new(ProgramSettings::default())
    }
}
