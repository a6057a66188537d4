//! The runtime type provider: the seam between this toolkit's structural
//! type inference and whatever actually knows the Godot class/type
//! hierarchy (the editor, a headless Godot build, or a generated
//! class-database dump).

/// Everything the toolkit knows about one Godot type, as reported by
/// the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: String,
    pub base_type: Option<String>,
    pub is_builtin: bool,
}

/// A member (property or method) looked up on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub name: String,
    pub type_name: Option<String>,
    pub is_method: bool,
}

/// A global function signature, as reported by the host (e.g. `print`,
/// `load`, `instance_from_id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalFunctionInfo {
    pub name: String,
    pub return_type: Option<String>,
}

/// The Godot runtime's type system, as seen from type inference and the
/// semantic model.
///
/// A default implementation ([`NullRuntimeTypeProvider`]) answers every
/// query with "unknown", which reduces type inference to structural
/// facts only (literals, declared types, local flow) — still useful
/// without any host integration.
pub trait RuntimeTypeProvider: Send + Sync {
    /// Whether `name` names a type the runtime knows about at all
    /// (built-in or project-defined).
    fn is_known_type(&self, name: &str) -> bool;

    /// Full type info for a known type name.
    fn get_type_info(&self, name: &str) -> Option<TypeInfo>;

    /// Look up a member (property or method) on `type_name`.
    fn get_member(&self, type_name: &str, member_name: &str) -> Option<MemberInfo>;

    /// The direct base type of `name`, if any.
    fn get_base_type(&self, name: &str) -> Option<String>;

    /// Whether a value of type `from` may be assigned where `to` is
    /// expected (covers `null`-to-reference-type, engine inheritance,
    /// and numeric widening rules the host defines).
    fn is_assignable_to(&self, from: &str, to: &str) -> bool;

    /// Signature of a global function such as `print` or `load`.
    fn get_global_function(&self, name: &str) -> Option<GlobalFunctionInfo>;

    /// Type info for a globally registered class (autoload singleton or
    /// engine singleton), distinct from [`RuntimeTypeProvider::get_type_info`]
    /// which also covers plain types.
    fn get_global_class(&self, name: &str) -> Option<TypeInfo>;

    /// Whether `name` is one of the engine's built-in types, as opposed
    /// to a project-defined or user script class.
    fn is_built_in(&self, name: &str) -> bool;
}

/// The conservative default: answers every query with "unknown".
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRuntimeTypeProvider;

impl RuntimeTypeProvider for NullRuntimeTypeProvider {
    fn is_known_type(&self, _name: &str) -> bool {
        false
    }

    fn get_type_info(&self, _name: &str) -> Option<TypeInfo> {
        None
    }

    fn get_member(&self, _type_name: &str, _member_name: &str) -> Option<MemberInfo> {
        None
    }

    fn get_base_type(&self, _name: &str) -> Option<String> {
        None
    }

    fn is_assignable_to(&self, from: &str, to: &str) -> bool {
        from == to
    }

    fn get_global_function(&self, _name: &str) -> Option<GlobalFunctionInfo> {
        None
    }

    fn get_global_class(&self, _name: &str) -> Option<TypeInfo> {
        None
    }

    fn is_built_in(&self, _name: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_provider_knows_nothing() {
        let provider = NullRuntimeTypeProvider;
        assert!(!provider.is_known_type("Node"));
        assert!(provider.get_type_info("Node").is_none());
        assert!(provider.get_member("Node", "name").is_none());
    }

    #[test]
    fn null_provider_assignability_falls_back_to_equality() {
        let provider = NullRuntimeTypeProvider;
        assert!(provider.is_assignable_to("int", "int"));
        assert!(!provider.is_assignable_to("int", "float"));
    }
}
