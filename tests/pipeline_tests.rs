//! End-to-end pipeline tests
//!
//! These tests drive the whole pass (discovery → extraction → grouping →
//! emission) from source text and check the observable contract: accessor
//! order, diagnostics, determinism and namespace handling.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use stringify_core::{EquatableVec, LinePosition};
use stringify_gen::{GeneratorConfig, PassResult, Pipeline, SourceFile, group_targets};

fn config() -> GeneratorConfig {
    GeneratorConfig::new().with_header(false)
}

fn run(sources: &[SourceFile]) -> PassResult {
    Pipeline::new(config()).run(sources).expect("pipeline failed")
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_accessors_follow_member_name_order() {
    let source = SourceFile::in_memory(
        "struct T {\n    #[stringify(0)]\n    B: Decimal,\n    #[stringify(1)]\n    A: Decimal,\n}\n",
    );
    let result = run(&[source]);
    let artifact = result.output.artifacts().next().expect("one artifact");

    let a = artifact.source.find("get_A_string").expect("accessor for A");
    let b = artifact.source.find("get_B_string").expect("accessor for B");
    assert!(a < b, "A must come before B:\n{}", artifact.source);
}

#[test]
fn test_ordinal_ordering_puts_uppercase_first() {
    let source = SourceFile::in_memory("struct T { #[stringify(0)] alpha: Decimal, #[stringify(0)] Zeta: Decimal }");
    let result = run(&[source]);
    let artifact = result.output.artifacts().next().expect("one artifact");
    let zeta = artifact.source.find("get_Zeta_string").expect("Zeta");
    let alpha = artifact.source.find("get_alpha_string").expect("alpha");
    assert!(zeta < alpha);
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_mixed_validity_group() {
    let text = "pub struct T {\n    #[stringify(0)]\n    X: Decimal,\n    #[stringify(7)]\n    Y: Decimal,\n}\n";
    let source = SourceFile::new("src/lib.rs", text, Vec::new());
    let result = run(&[source]);

    let artifact = result.output.artifacts().next().expect("one artifact");
    assert_eq!(artifact.source.matches("pub fn ").count(), 1);
    assert!(artifact.source.contains("get_X_string"));
    assert!(!artifact.source.contains("get_Y_string"));

    let diagnostics: Vec<_> = result.output.diagnostics().collect();
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = diagnostics[0];
    assert_eq!(diagnostic.code(), "GEN_01");
    assert!(diagnostic.message.contains('7'));

    let location = diagnostic.location.as_ref().expect("located diagnostic");
    assert_eq!(location.file_path, "src/lib.rs");
    assert_eq!(location.line_span.start, LinePosition::new(3, 4));
    assert_eq!(&text[location.byte_span.start..location.byte_span.start + 14], "#[stringify(7)");
}

#[test]
fn test_every_invalid_code_produces_one_diagnostic() {
    for code in ["2", "7", "-1", "255"] {
        let text = format!("struct T {{ #[stringify({code})] value: Decimal }}");
        let result = run(&[SourceFile::new("src/lib.rs", text, Vec::new())]);
        let diagnostics: Vec<_> = result.output.diagnostics().collect();
        assert_eq!(diagnostics.len(), 1, "code {code}");
        assert_eq!(diagnostics[0].message, format!("The enum value {code} is not supported"));
        assert!(!result.output.artifacts().any(|a| a.source.contains("get_value_string")));
    }
}

#[test]
fn test_in_memory_source_has_no_location() {
    let result = run(&[SourceFile::in_memory("struct T { #[stringify(3)] v: Decimal }")]);
    let diagnostic = result.output.diagnostics().next().expect("diagnostic");
    assert!(diagnostic.location.is_none());
    assert!(result.targets.iter().all(|t| t.location.is_none()));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_identical_inputs_give_identical_outputs() {
    let sources = vec![
        SourceFile::new(
            "src/shop.rs",
            "pub struct Price { #[stringify(1)] a: Decimal, #[stringify(9)] b: Decimal }",
            vec!["shop".into()],
        ),
        SourceFile::new("src/lib.rs", "pub struct Root { #[stringify(0)] r: Decimal }", Vec::new()),
    ];
    let first = run(&sources);
    let second = run(&sources);
    assert_eq!(first.output, second.output);
    assert_eq!(first.targets, second.targets);
}

#[test]
fn test_group_order_is_independent_of_file_order() {
    let a = SourceFile::new("src/a.rs", "pub struct A { #[stringify(0)] v: Decimal }", vec!["a".into()]);
    let b = SourceFile::new("src/b.rs", "pub struct B { #[stringify(0)] v: Decimal }", vec!["b".into()]);
    let forward = run(&[a.clone(), b.clone()]);
    let backward = run(&[b, a]);
    let names = |r: &PassResult| r.output.artifacts().map(|x| x.name.clone()).collect::<Vec<_>>();
    assert_eq!(names(&forward), names(&backward));
    assert_eq!(names(&forward), vec!["a.A.generated.rs", "b.B.generated.rs"]);
}

// ============================================================================
// Equatable groups
// ============================================================================

#[test]
fn test_equal_groups_hash_equal() {
    let source = SourceFile::in_memory("struct T { #[stringify(0)] a: Decimal, #[stringify(1)] b: Decimal }");
    let first = group_targets(run(&[source.clone()]).targets);
    let second = group_targets(run(&[source]).targets);
    assert_eq!(first, second);
    assert_eq!(hash_of(&first[0]), hash_of(&second[0]));
}

#[test]
fn test_sequence_order_matters() {
    let forward: EquatableVec<&str> = vec!["a", "b"].into();
    let same: EquatableVec<&str> = vec!["a", "b"].into();
    let backward: EquatableVec<&str> = vec!["b", "a"].into();
    assert_eq!(forward, same);
    assert_eq!(hash_of(&forward), hash_of(&same));
    assert_ne!(forward, backward);
}

// ============================================================================
// Namespaces
// ============================================================================

#[test]
fn test_crate_root_types_group_across_files() {
    let first = SourceFile::new("src/lib.rs", "pub struct Price { #[stringify(0)] net: Decimal }", Vec::new());
    let second = SourceFile::new("src/main.rs", "pub struct Price { #[stringify(1)] gross: Decimal }", Vec::new());
    let result = run(&[first, second]);

    assert_eq!(result.output.groups.len(), 1);
    let artifact = &result.output.groups[0].artifact;
    assert_eq!(artifact.name, "Price.generated.rs");
    assert!(artifact.source.starts_with("impl Price {"));
    assert!(!artifact.source.contains("const _"));
    assert!(artifact.source.contains("get_gross_string"));
    assert!(artifact.source.contains("get_net_string"));
}

#[test]
fn test_same_type_name_in_different_modules_stays_apart() {
    let root = SourceFile::new("src/lib.rs", "pub struct Price { #[stringify(0)] v: Decimal }", Vec::new());
    let nested = SourceFile::new("src/shop.rs", "pub struct Price { #[stringify(0)] v: Decimal }", vec!["shop".into()]);
    let result = run(&[nested, root]);

    let names: Vec<_> = result.output.artifacts().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Price.generated.rs", "shop.Price.generated.rs"]);
    assert!(result.output.groups[1].artifact.source.contains("use crate::shop::Price;"));
}

#[test]
fn test_header_is_emitted_by_default() {
    let source = SourceFile::in_memory("struct T { #[stringify(0)] v: Decimal }");
    let result = Pipeline::new(GeneratorConfig::new()).run(&[source]).expect("pipeline failed");
    let artifact = result.output.artifacts().next().expect("artifact");
    assert!(artifact.source.starts_with("// Generated by stringify-gen v"));
}
