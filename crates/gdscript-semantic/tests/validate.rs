use gdscript_diagnostics::DiagnosticCode;
use gdscript_runtime::{GlobalFunctionInfo, NullRuntimeTypeProvider, RuntimeTypeProvider, TypeInfo};
use gdscript_semantic::{validate_code, GDValidationOptions};

/// Knows just enough of Godot's global surface (`range`) for these
/// tests to exercise a call to a built-in without tripping
/// `MethodNotFound` — everything else falls back to "unknown", same as
/// `NullRuntimeTypeProvider`.
struct FakeRuntime;

impl RuntimeTypeProvider for FakeRuntime {
    fn is_known_type(&self, name: &str) -> bool {
        matches!(name, "Node" | "int" | "Array")
    }
    fn get_type_info(&self, name: &str) -> Option<TypeInfo> {
        self.is_known_type(name).then(|| TypeInfo { name: name.to_string(), base_type: None, is_builtin: true })
    }
    fn get_member(&self, _type_name: &str, _member_name: &str) -> Option<gdscript_runtime::MemberInfo> {
        None
    }
    fn get_base_type(&self, _name: &str) -> Option<String> {
        None
    }
    fn is_assignable_to(&self, from: &str, to: &str) -> bool {
        from == to
    }
    fn get_global_function(&self, name: &str) -> Option<GlobalFunctionInfo> {
        (name == "range").then(|| GlobalFunctionInfo { name: name.to_string(), return_type: Some("Array".to_string()) })
    }
    fn get_global_class(&self, _name: &str) -> Option<TypeInfo> {
        None
    }
    fn is_built_in(&self, name: &str) -> bool {
        self.is_known_type(name)
    }
}

#[test]
fn well_formed_class_has_no_diagnostics() {
    let source = "extends Node\n\nfunc _ready():\n\tvar count = 0\n\tfor i in range(10):\n\t\tcount += i\n\treturn count\n";
    let runtime = FakeRuntime;
    let diagnostics = validate_code(source, &GDValidationOptions::default(), &runtime);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
}

#[test]
fn duplicate_class_variable_is_flagged_once() {
    let source = "var health = 10\nvar health = 20\n";
    let runtime = NullRuntimeTypeProvider;
    let diagnostics = validate_code(source, &GDValidationOptions::default(), &runtime);
    let duplicates: Vec<_> = diagnostics.errors.iter().filter(|d| d.code == DiagnosticCode::DuplicateDeclaration).collect();
    assert_eq!(duplicates.len(), 1);
}

#[test]
fn return_inside_nested_if_is_not_flagged() {
    let source = "func f(x):\n\tif x > 0:\n\t\treturn x\n\telse:\n\t\treturn -x\n";
    let runtime = NullRuntimeTypeProvider;
    let diagnostics = validate_code(source, &GDValidationOptions::default(), &runtime);
    assert!(diagnostics.warnings.iter().all(|d| d.code != DiagnosticCode::ReturnOutsideFunction));
}

#[test]
fn constant_reassignment_is_flagged() {
    let source = "const MAX = 10\n\nfunc f():\n\tMAX = 20\n";
    let runtime = NullRuntimeTypeProvider;
    let diagnostics = validate_code(source, &GDValidationOptions::default(), &runtime);
    assert!(
        diagnostics.warnings.iter().any(|d| d.code == DiagnosticCode::ConstantReassignment)
            || diagnostics.errors.iter().any(|d| d.code == DiagnosticCode::ConstantReassignment)
    );
}
