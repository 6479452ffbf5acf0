//! Materialization of permuted domains.

use tracing::{debug, instrument, trace};
use tydl_analyzer::{SemanticError, SemanticResult};
use tydl_core::{is_builtin_tag, DataType, PermutedDomain, PermutedSum, TypeDomain};

/// Build the concrete domain described by `permuted`.
///
/// The base is looked up among `domains`, the domains materialized so far.
/// The result is not checked; callers check it like any other domain.
///
/// Alterations apply in a fixed order: exclusions, then sum permutations
/// (removals before additions), then inclusions. Surviving types keep
/// their base order and new types follow in declaration order.
#[instrument(
    level = "debug",
    skip_all,
    fields(domain = %permuted.tag, base = %permuted.permutes_domain)
)]
pub fn compute_permutation(
    permuted: &PermutedDomain,
    domains: &[TypeDomain],
) -> SemanticResult<TypeDomain> {
    let base = domains
        .iter()
        .find(|d| d.tag == permuted.permutes_domain)
        .ok_or_else(|| SemanticError::DomainPermutesNonExistentDomain {
            domain: permuted.tag.clone(),
            base: permuted.permutes_domain.clone(),
            location: permuted.location.clone(),
        })?;

    let mut user_types = base.user_types.clone();

    for excluded in &permuted.excluded_types {
        if is_builtin_tag(&excluded.name) {
            return Err(SemanticError::CannotRemoveBuiltinType {
                name: excluded.name.clone(),
                location: excluded.location.clone(),
            });
        }
        let index = position(&user_types, &excluded.name).ok_or_else(|| {
            SemanticError::CannotRemoveNonExistentType {
                name: excluded.name.clone(),
                location: excluded.location.clone(),
            }
        })?;
        trace!(name = %excluded.name, "excluding type");
        user_types.remove(index);
    }

    for permuted_sum in &permuted.permuted_sums {
        permute_sum(&mut user_types, permuted_sum)?;
    }

    user_types.extend(permuted.included_types.iter().cloned());

    debug!(types = user_types.len(), "permuted domain");
    Ok(TypeDomain::new(
        permuted.tag.clone(),
        user_types,
        permuted.location.clone(),
    ))
}

fn permute_sum(user_types: &mut [DataType], permuted_sum: &PermutedSum) -> SemanticResult<()> {
    let name = &permuted_sum.tag;
    let non_sum = || SemanticError::CannotPermuteNonSumType {
        name: name.clone(),
        location: permuted_sum.location.clone(),
    };

    if is_builtin_tag(name) {
        return Err(non_sum());
    }
    let index = position(user_types, name).ok_or_else(|| {
        SemanticError::CannotPermuteNonExistentSum {
            name: name.clone(),
            location: permuted_sum.location.clone(),
        }
    })?;
    let DataType::Sum(sum) = &mut user_types[index] else {
        return Err(non_sum());
    };

    for removed in &permuted_sum.removed_variants {
        let variant = sum
            .variants
            .iter()
            .position(|v| v.tag == removed.name)
            .ok_or_else(|| SemanticError::CannotRemoveNonExistentSumVariant {
                sum: name.clone(),
                variant: removed.name.clone(),
                location: removed.location.clone(),
            })?;
        sum.variants.remove(variant);
    }
    sum.variants
        .extend(permuted_sum.added_variants.iter().cloned());

    trace!(sum = %name, variants = sum.variants.len(), "permuted sum");
    Ok(())
}

fn position(types: &[DataType], tag: &str) -> Option<usize> {
    types.iter().position(|t| t.tag() == tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tydl_core::Statement;
    use tydl_parser::parse_type_universe;

    const BASE: &str = "
        (define toy
          (domain
            (product pair x::int y::int)
            (product triple x::int y::int z::int)
            (sum expr
              (lit value::int)
              (add left::expr right::expr))))";

    /// Materialize `toy` and permute it with `permutation`.
    fn permute(permutation: &str) -> SemanticResult<TypeDomain> {
        let source = format!("{}\n(define toy2 (permute_domain toy {}))", BASE, permutation);
        let universe = parse_type_universe(&source, &[]).unwrap();
        let Statement::TypeDomain(base) = &universe.statements[0] else {
            panic!("Expected a domain");
        };
        let Statement::PermutedDomain(permuted) = &universe.statements[1] else {
            panic!("Expected a permuted domain");
        };
        compute_permutation(permuted, &[base.clone()])
    }

    fn tags(domain: &TypeDomain) -> Vec<&str> {
        domain.user_types.iter().map(|t| t.tag()).collect()
    }

    #[test]
    fn test_identity_permutation() {
        let domain = permute("").unwrap();
        assert_eq!(domain.tag, "toy2");
        assert_eq!(tags(&domain), vec!["pair", "triple", "expr"]);
    }

    #[test]
    fn test_exclude_then_include() {
        let domain =
            permute("(exclude pair) (include (product quad a::int b::int c::int d::int))").unwrap();
        assert_eq!(tags(&domain), vec!["triple", "expr", "quad"]);
    }

    #[test]
    fn test_permuted_sum_variant_order() {
        let domain = permute(
            "(with expr (exclude lit) (include (neg operand::expr) (lit2 value::symbol)))",
        )
        .unwrap();
        let expr = domain.resolve_type("expr").and_then(DataType::as_sum).unwrap();
        let variants: Vec<&str> = expr.variants.iter().map(|v| v.tag.as_str()).collect();
        assert_eq!(variants, vec!["add", "neg", "lit2"]);
    }

    #[test]
    fn test_missing_base() {
        let source = "(define toy2 (permute_domain nope))";
        let universe = parse_type_universe(source, &[]).unwrap();
        let Statement::PermutedDomain(permuted) = &universe.statements[0] else {
            panic!("Expected a permuted domain");
        };
        assert!(matches!(
            compute_permutation(permuted, &[]),
            Err(SemanticError::DomainPermutesNonExistentDomain { .. })
        ));
    }

    #[test]
    fn test_cannot_remove_builtin_or_missing_type() {
        assert!(matches!(
            permute("(exclude int)"),
            Err(SemanticError::CannotRemoveBuiltinType { .. })
        ));
        match permute("(exclude quad)") {
            Err(SemanticError::CannotRemoveNonExistentType { name, location }) => {
                assert_eq!(name, "quad");
                assert_eq!(location.line, 9);
            }
            other => panic!("Expected CannotRemoveNonExistentType, got {:?}", other),
        }
    }

    #[test]
    fn test_sum_permutation_errors() {
        assert!(matches!(
            permute("(with shape (exclude circle))"),
            Err(SemanticError::CannotPermuteNonExistentSum { .. })
        ));
        assert!(matches!(
            permute("(with pair (exclude x))"),
            Err(SemanticError::CannotPermuteNonSumType { .. })
        ));
        assert!(matches!(
            permute("(with symbol (exclude x))"),
            Err(SemanticError::CannotPermuteNonSumType { .. })
        ));
        assert!(matches!(
            permute("(with expr (exclude mul))"),
            Err(SemanticError::CannotRemoveNonExistentSumVariant { .. })
        ));
    }

    #[test]
    fn test_excluded_sum_cannot_be_permuted() {
        assert!(matches!(
            permute("(exclude expr) (with expr (exclude lit))"),
            Err(SemanticError::CannotPermuteNonExistentSum { .. })
        ));
    }
}
