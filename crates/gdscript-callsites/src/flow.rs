//! Cross-method parameter type synthesis (§4.I, first half): given a
//! method's parameters, harvest every call site's i-th argument type
//! from the registry and merge them into an inferred type + confidence
//! per parameter.

use gdscript_semantic::GDType;

use crate::registry::CallSiteRegistry;

/// Confidence of a synthesized parameter type, the 5-level scale named
/// in the GLOSSARY. `Certain` is not produced by this analyzer — it is
/// reserved for direct declared-type annotations, which this crate
/// never overrides — but is kept in the enum since it is part of the
/// same external confidence vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeConfidence {
    Certain,
    High,
    Medium,
    Low,
    Unknown,
}

/// The synthesized type(s) for one parameter, across every call site on
/// record for its method.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInference {
    pub param_index: usize,
    /// Distinct non-`Variant` types observed for this argument position,
    /// in first-seen order. A union when `len() > 1`.
    pub types: Vec<GDType>,
    pub confidence: TypeConfidence,
    pub call_site_count: usize,
}

/// Runs parameter-type synthesis for every parameter of
/// `target_class::method`, using every call site
/// [`CallSiteRegistry::lookup_with_wildcard`] returns.
pub fn infer_parameter_types(
    registry: &CallSiteRegistry,
    target_class: &str,
    method: &str,
    param_count: usize,
) -> Vec<ParameterInference> {
    let call_sites = registry.lookup_with_wildcard(target_class, method);
    (0..param_count).map(|index| infer_one_parameter(&call_sites, index)).collect()
}

fn infer_one_parameter(call_sites: &[crate::entry::CallSiteEntry], index: usize) -> ParameterInference {
    let observed: Vec<&GDType> = call_sites.iter().filter_map(|site| site.arg_types.get(index)).collect();

    if observed.is_empty() {
        return ParameterInference { param_index: index, types: vec![], confidence: TypeConfidence::Unknown, call_site_count: 0 };
    }

    let known: Vec<GDType> = observed.iter().filter(|t| !matches!(t, GDType::Variant)).map(|t| (*t).clone()).collect();
    let mut distinct: Vec<GDType> = Vec::new();
    for ty in &known {
        if !distinct.contains(ty) {
            distinct.push(ty.clone());
        }
    }

    let confidence = if known.len() == observed.len() && distinct.len() <= 1 {
        TypeConfidence::High
    } else if known.len() == observed.len() {
        TypeConfidence::Medium
    } else {
        let known_fraction = known.len() as f64 / observed.len() as f64;
        if known_fraction > 0.8 {
            TypeConfidence::Medium
        } else {
            TypeConfidence::Low
        }
    };

    ParameterInference { param_index: index, types: distinct, confidence, call_site_count: observed.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{CallSiteEntry, Confidence};
    use gdscript_ast::NodeId;

    fn call_with_arg(target_method: &str, arg: GDType) -> CallSiteEntry {
        CallSiteEntry {
            source_file: "a.gd".into(),
            source_method: Some("caller".into()),
            line: 1,
            column: 0,
            target_class: "TestClass".into(),
            target_method: target_method.into(),
            call_node: NodeId::new(0),
            confidence: Confidence::Strict,
            duck_typed: false,
            arg_types: vec![arg],
        }
    }

    #[test]
    fn unanimous_argument_type_is_high_confidence() {
        let registry = CallSiteRegistry::new();
        registry.register(call_with_arg("testMethod", GDType::Int));
        registry.register(call_with_arg("testMethod", GDType::Int));
        let inferred = infer_parameter_types(&registry, "TestClass", "testMethod", 1);
        assert_eq!(inferred[0].types, vec![GDType::Int]);
        assert_eq!(inferred[0].confidence, TypeConfidence::High);
        assert_eq!(inferred[0].call_site_count, 2);
    }

    #[test]
    fn two_distinct_types_union_at_medium_confidence() {
        let registry = CallSiteRegistry::new();
        registry.register(call_with_arg("testMethod", GDType::Int));
        registry.register(call_with_arg("testMethod", GDType::String));
        let inferred = infer_parameter_types(&registry, "TestClass", "testMethod", 1);
        assert_eq!(inferred[0].types.len(), 2);
        assert_eq!(inferred[0].confidence, TypeConfidence::Medium);
        assert_eq!(inferred[0].call_site_count, 2);
    }

    #[test]
    fn no_call_sites_is_unknown() {
        let registry = CallSiteRegistry::new();
        let inferred = infer_parameter_types(&registry, "TestClass", "lonely", 1);
        assert_eq!(inferred[0].confidence, TypeConfidence::Unknown);
        assert_eq!(inferred[0].call_site_count, 0);
    }

    #[test]
    fn mostly_unresolved_arguments_decay_to_low() {
        let registry = CallSiteRegistry::new();
        registry.register(call_with_arg("testMethod", GDType::Variant));
        registry.register(call_with_arg("testMethod", GDType::Variant));
        registry.register(call_with_arg("testMethod", GDType::Int));
        let inferred = infer_parameter_types(&registry, "TestClass", "testMethod", 1);
        assert_eq!(inferred[0].confidence, TypeConfidence::Low);
    }
}
