//! Main compiler implementation.

use crate::{compute_permutation, compute_transform, CompileResult, CompilerConfig};
use std::path::Path;
use tracing::{debug, info, instrument};
use tydl_analyzer::{check_type_domain, SemanticError, SemanticResult};
use tydl_core::{SourceLocation, Statement, TypeDomain, TypeUniverse};
use tydl_parser::{parse_type_universe, parse_type_universe_file};

/// The output of one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledUniverse {
    /// Statements as parsed, includes expanded.
    pub universe: TypeUniverse,
    /// Every domain, concrete and checked, in declaration order.
    pub domains: Vec<TypeDomain>,
    /// One diff per `transform` statement, in declaration order. Empty when
    /// transforms are not checked.
    pub transforms: Vec<TypeDomain>,
}

impl CompiledUniverse {
    pub fn domain(&self, tag: &str) -> Option<&TypeDomain> {
        find_domain(&self.domains, tag)
    }
}

/// The Compiler turns a type universe into checked domains.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    /// Create a new compiler.
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Compile the universe rooted at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn compile_file(&self, path: &Path) -> CompileResult<CompiledUniverse> {
        let universe = parse_type_universe_file(path, &self.config.include_dirs)?;
        self.compile_universe(universe)
    }

    /// Compile source text that has no backing file.
    pub fn compile_source(&self, source: &str) -> CompileResult<CompiledUniverse> {
        let universe = parse_type_universe(source, &self.config.include_dirs)?;
        self.compile_universe(universe)
    }

    /// Materialize, check and diff an already parsed universe.
    pub fn compile_universe(&self, universe: TypeUniverse) -> CompileResult<CompiledUniverse> {
        let domains = compute_type_domains(&universe)?;
        let transforms = if self.config.check_transforms {
            compute_transforms(&universe, &domains)?
        } else {
            Vec::new()
        };
        info!(
            domains = domains.len(),
            transforms = transforms.len(),
            "compiled type universe"
        );
        Ok(CompiledUniverse {
            universe,
            domains,
            transforms,
        })
    }
}

/// Resolve every domain of `universe` into a concrete, checked domain.
///
/// Domains are processed in declaration order, so a permuted domain can
/// only build on a domain declared before it.
pub fn compute_type_domains(universe: &TypeUniverse) -> SemanticResult<Vec<TypeDomain>> {
    if universe.is_empty() {
        return Err(SemanticError::EmptyUniverse {
            location: SourceLocation::unknown(),
        });
    }

    let mut domains: Vec<TypeDomain> = Vec::new();
    for statement in &universe.statements {
        let domain = match statement {
            Statement::TypeDomain(domain) => domain.clone(),
            Statement::PermutedDomain(permuted) => compute_permutation(permuted, &domains)?,
            Statement::Transform(_) => continue,
        };

        if find_domain(&domains, &domain.tag).is_some() {
            return Err(SemanticError::DuplicateTypeDomainName {
                name: domain.tag,
                location: statement.location().clone(),
            });
        }
        check_type_domain(&domain)?;
        debug!(domain = %domain.tag, types = domain.user_types.len(), "domain ready");
        domains.push(domain);
    }
    Ok(domains)
}

/// Diff the domains named by every `transform` statement of `universe`.
pub fn compute_transforms(
    universe: &TypeUniverse,
    domains: &[TypeDomain],
) -> SemanticResult<Vec<TypeDomain>> {
    universe
        .transforms()
        .map(|transform| {
            let lookup = |tag: &str| {
                find_domain(domains, tag)
                    .ok_or_else(|| SemanticError::undefined_domain(tag, &transform.location))
            };
            let source = lookup(&transform.source_domain_tag)?;
            let destination = lookup(&transform.destination_domain_tag)?;
            Ok(compute_transform(source, destination))
        })
        .collect()
}

fn find_domain<'d>(domains: &'d [TypeDomain], tag: &str) -> Option<&'d TypeDomain> {
    domains.iter().find(|d| d.tag == tag)
}

/// Compile the universe rooted at `path`.
pub fn compile_file(path: &Path, config: &CompilerConfig) -> CompileResult<CompiledUniverse> {
    Compiler::new(config.clone()).compile_file(path)
}

/// Compile universe source text.
pub fn compile_source(source: &str, config: &CompilerConfig) -> CompileResult<CompiledUniverse> {
    Compiler::new(config.clone()).compile_source(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompileError;

    fn compile(source: &str) -> CompileResult<CompiledUniverse> {
        compile_source(source, &CompilerConfig::default())
    }

    #[test]
    fn test_compile_simple_domain() {
        let compiled = compile("(define toy (domain (product pair x::int y::int)))").unwrap();
        assert_eq!(compiled.domains.len(), 1);
        assert!(compiled.domain("toy").is_some());
        assert!(compiled.transforms.is_empty());
    }

    #[test]
    fn test_empty_universe() {
        assert!(matches!(
            compile("// nothing here"),
            Err(CompileError::Semantic(SemanticError::EmptyUniverse { .. }))
        ));
    }

    #[test]
    fn test_transform_only_universe_has_no_domains() {
        assert!(matches!(
            compile("(transform a b)"),
            Err(CompileError::Semantic(
                SemanticError::TransformReferencesUndefinedDomain { .. }
            ))
        ));
    }

    #[test]
    fn test_duplicate_domain_name() {
        let err = compile(
            "(define toy (domain (product pair x::int)))
             (define toy (domain (product other x::int)))",
        )
        .unwrap_err();
        match err {
            CompileError::Semantic(SemanticError::DuplicateTypeDomainName { name, location }) => {
                assert_eq!(name, "toy");
                assert_eq!(location.line, 2);
            }
            other => panic!("Expected DuplicateTypeDomainName, got {:?}", other),
        }
    }

    #[test]
    fn test_permutation_is_checked() {
        let err = compile(
            "(define toy (domain (product pair x::int)))
             (define toy2 (permute_domain toy (include (product bad x::nope))))",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CompileError::Semantic(SemanticError::UndefinedType { .. })
        ));
    }

    #[test]
    fn test_permutation_needs_earlier_base() {
        let err = compile(
            "(define toy2 (permute_domain toy))
             (define toy (domain (product pair x::int)))",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CompileError::Semantic(SemanticError::DomainPermutesNonExistentDomain { .. })
        ));
    }

    #[test]
    fn test_transforms_follow_config() {
        let source = "(define a (domain (product p x::int)))
                      (define b (domain (product p x::int y::int)))
                      (transform a b)";
        let compiled = compile(source).unwrap();
        assert_eq!(compiled.transforms.len(), 1);
        assert_eq!(compiled.transforms[0].tag, "a");
        assert!(compiled.transforms[0].user_types[0].is_different());

        let unchecked =
            compile_source(source, &CompilerConfig::new().with_check_transforms(false)).unwrap();
        assert!(unchecked.transforms.is_empty());
    }

    #[test]
    fn test_transform_to_undefined_domain() {
        let err = compile(
            "(define a (domain (product p x::int)))
             (transform a missing)",
        )
        .unwrap_err();
        match err {
            CompileError::Semantic(SemanticError::TransformReferencesUndefinedDomain {
                name,
                ..
            }) => assert_eq!(name, "missing"),
            other => panic!("Expected TransformReferencesUndefinedDomain, got {:?}", other),
        }
    }
}
