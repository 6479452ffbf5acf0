//! Permuted domain integration tests.

use tydl_analyzer::SemanticError;
use tydl_compiler::{compile_source, CompileError, CompiledUniverse, CompilerConfig};

const BASE: &str = "
(define base
  (domain
    (product keep x::int)
    (product drop x::int)
    (sum s
      (a)
      (b)
      (c))))
";

fn compile(permutation: &str) -> Result<CompiledUniverse, CompileError> {
    let source = format!("{}\n(define derived (permute_domain base {}))", BASE, permutation);
    compile_source(&source, &CompilerConfig::default())
}

fn semantic(result: Result<CompiledUniverse, CompileError>) -> SemanticError {
    match result {
        Err(CompileError::Semantic(e)) => e,
        other => panic!("Expected a semantic error, got {:?}", other),
    }
}

mod exactness {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sum_variants_survive_in_order_then_additions() {
        let compiled = compile("(with s (exclude a) (include (d) (e)))").unwrap();
        let derived = compiled.domain("derived").unwrap();
        let s = derived.resolve_type("s").and_then(|t| t.as_sum()).unwrap();
        let variants: Vec<&str> = s.variants.iter().map(|v| v.tag.as_str()).collect();
        assert_eq!(variants, vec!["b", "c", "d", "e"]);
    }

    #[test]
    fn test_base_domain_is_untouched() {
        let compiled = compile("(exclude drop) (with s (exclude a))").unwrap();
        let base = compiled.domain("base").unwrap();
        let tags: Vec<&str> = base.user_types.iter().map(|t| t.tag()).collect();
        assert_eq!(tags, vec!["keep", "drop", "s"]);
        let s = base.resolve_type("s").and_then(|t| t.as_sum()).unwrap();
        assert_eq!(s.variants.len(), 3);
    }

    #[test]
    fn test_derived_domain_keeps_its_own_tag_and_location() {
        let compiled = compile("(exclude drop) (include (product added y::keep))").unwrap();
        let derived = compiled.domain("derived").unwrap();
        let tags: Vec<&str> = derived.user_types.iter().map(|t| t.tag()).collect();
        assert_eq!(tags, vec!["keep", "s", "added"]);
        assert_eq!(derived.location.line, 11);
    }

    #[test]
    fn test_chained_permutations() {
        let source = format!(
            "{}
             (define second (permute_domain base (with s (exclude c))))
             (define third (permute_domain second (with s (include (z)))))",
            BASE
        );
        let compiled = compile_source(&source, &CompilerConfig::default()).unwrap();
        let third = compiled.domain("third").unwrap();
        let s = third.resolve_type("s").and_then(|t| t.as_sum()).unwrap();
        let variants: Vec<&str> = s.variants.iter().map(|v| v.tag.as_str()).collect();
        assert_eq!(variants, vec!["a", "b", "z"]);
    }
}

mod rejections {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_builtin_is_protected() {
        for builtin in ["bool", "int", "symbol", "ion"] {
            let err = semantic(compile(&format!("(exclude {})", builtin)));
            match err {
                SemanticError::CannotRemoveBuiltinType { name, .. } => assert_eq!(name, builtin),
                other => panic!("Expected CannotRemoveBuiltinType, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_absent_type_is_rejected() {
        let err = semantic(compile("(exclude missing)"));
        assert!(matches!(err, SemanticError::CannotRemoveNonExistentType { .. }));
    }

    #[test]
    fn test_type_excluded_twice_is_rejected() {
        let err = semantic(compile("(exclude drop drop)"));
        assert!(matches!(err, SemanticError::CannotRemoveNonExistentType { .. }));
    }

    #[test]
    fn test_dangling_reference_after_exclusion() {
        let source = "
            (define base (domain (product inner x::int) (product outer i::inner)))
            (define derived (permute_domain base (exclude inner)))";
        let err = semantic(compile_source(source, &CompilerConfig::default()));
        assert!(matches!(err, SemanticError::UndefinedType { ref name, .. } if name == "inner"));
    }

    #[test]
    fn test_included_variant_collides_with_type() {
        let err = semantic(compile("(with s (include (keep)))"));
        assert!(matches!(err, SemanticError::NameAlreadyUsed { ref name, .. } if name == "keep"));
    }

    #[test]
    fn test_error_location_points_at_name() {
        let err = semantic(compile("(with s (exclude zz))"));
        let location = err.location();
        assert_eq!((location.line, location.column), (11, 55));
    }
}
