//! The semantic type lattice §4.G's inference rules produce.
//!
//! Distinct from [`gdscript_runtime::TypeInfo`] (what the host knows
//! about a *named* engine type): `GDType` is the value the type pass
//! actually computes for an expression, including the handful of
//! structural shapes (`null`, generic containers) the host's type
//! provider never needs to answer questions about directly.

use gdscript_runtime::RuntimeTypeProvider;

/// A semantic type as computed by [`crate::inference::infer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GDType {
    /// Unknown / unconstrained — GDScript's `Variant`. The inference
    /// engine's answer when it genuinely cannot say more.
    Variant,
    Bool,
    Int,
    Float,
    String,
    /// The type of `yield` and of a `signal` declaration's members.
    Signal,
    /// The type of `$path` / `%unique_name` node lookups.
    Node,
    /// The literal `null`; compatible with any reference type per
    /// [`GDType::compatible_with`], but not printed as `"null"` — it
    /// has no named engine counterpart.
    Null,
    /// A project- or engine-defined class/type name not covered by the
    /// built-in variants above (`Sprite2D`, a user's `class_name`, ...).
    Named(String),
    /// `Array[T]`; `None` when the element type wasn't itself inferrable.
    Array(Option<Box<GDType>>),
    /// `Dictionary[K, V]`.
    Dictionary(Option<Box<GDType>>, Option<Box<GDType>>),
}

impl GDType {
    /// Maps a declared-type name (as written in source, or stored on a
    /// [`gdscript_symbols::Symbol::declared_type`]) to the variant it
    /// denotes, falling back to [`GDType::Named`] for anything that
    /// isn't one of the built-in value/primitive names.
    pub fn from_declared_name(name: &str) -> GDType {
        match name {
            "Variant" => GDType::Variant,
            "bool" => GDType::Bool,
            "int" => GDType::Int,
            "float" => GDType::Float,
            "String" | "StringName" => GDType::String,
            "Signal" => GDType::Signal,
            "Node" => GDType::Node,
            other => GDType::Named(other.to_string()),
        }
    }

    /// The name this type would have as a runtime-provider query, i.e.
    /// the string the host's `IsKnownType`/`IsAssignableTo` family
    /// expects. `Array`/`Dictionary` report their bare container name;
    /// the host isn't expected to understand generic arguments.
    pub fn runtime_name(&self) -> &str {
        match self {
            GDType::Variant => "Variant",
            GDType::Bool => "bool",
            GDType::Int => "int",
            GDType::Float => "float",
            GDType::String => "String",
            GDType::Signal => "Signal",
            GDType::Node => "Node",
            GDType::Null => "null",
            GDType::Named(name) => name,
            GDType::Array(_) => "Array",
            GDType::Dictionary(_, _) => "Dictionary",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, GDType::Int | GDType::Float)
    }

    /// Value types have no engine base class and are never `null` —
    /// the reference-type half of §4.G's "`null` compatible with any
    /// reference type" rule.
    fn is_value_type(&self) -> bool {
        matches!(self, GDType::Bool | GDType::Int | GDType::Float | GDType::String)
    }

    /// Assignment/operand compatibility per §4.G: equal names are
    /// always compatible; `null` is compatible with any reference
    /// type; everything else defers to the runtime provider.
    pub fn compatible_with(&self, other: &GDType, provider: &dyn RuntimeTypeProvider) -> bool {
        if self == other {
            return true;
        }
        if matches!(self, GDType::Variant) || matches!(other, GDType::Variant) {
            return true;
        }
        if matches!(self, GDType::Null) {
            return !other.is_value_type();
        }
        if matches!(other, GDType::Null) {
            return !self.is_value_type();
        }
        provider.is_assignable_to(self.runtime_name(), other.runtime_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdscript_runtime::NullRuntimeTypeProvider;

    #[test]
    fn equal_names_are_compatible() {
        let provider = NullRuntimeTypeProvider;
        assert!(GDType::Int.compatible_with(&GDType::Int, &provider));
    }

    #[test]
    fn null_is_compatible_with_reference_types_only() {
        let provider = NullRuntimeTypeProvider;
        assert!(GDType::Null.compatible_with(&GDType::Named("Node".into()), &provider));
        assert!(!GDType::Null.compatible_with(&GDType::Int, &provider));
    }

    #[test]
    fn variant_is_compatible_with_anything() {
        let provider = NullRuntimeTypeProvider;
        assert!(GDType::Variant.compatible_with(&GDType::Int, &provider));
        assert!(GDType::Float.compatible_with(&GDType::Variant, &provider));
    }
}
