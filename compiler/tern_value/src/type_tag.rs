//! Runtime type names.

use std::fmt;

/// Identifies the runtime type of a `Value` for converter dispatch.
///
/// Host values are tagged with their host model's kind (e.g. `"json"`), so
/// converters for one host model never claim values from another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Absent,
    Bool,
    Int,
    Float,
    Str,
    List,
    Host(&'static str),
}

impl TypeTag {
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Absent => "absent",
            TypeTag::Bool => "bool",
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Str => "str",
            TypeTag::List => "list",
            TypeTag::Host(kind) => kind,
        }
    }

    /// Whether this tag names an opaque host value.
    #[inline]
    pub fn is_host(self) -> bool {
        matches!(self, TypeTag::Host(_))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
