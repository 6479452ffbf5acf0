//! Top-level forms and permuted domains.
//!
//! Handles parsing of:
//! - `(define <name> (domain ...))`
//! - `(define <name> (permute_domain <base> ...))`
//! - `(transform <src> <dst>)`
//! - `(include_file "<path>")`

use super::{expect_first, expect_string, expect_symbol, expect_tagged, require_arity, Parser};
use crate::error::{ParseError, ParseResult};
use crate::sexp::SExp;
use tracing::debug;
use tydl_core::{
    Ident, PermutedDomain, PermutedSum, SourceLocation, Statement, Transform, TypeDomain,
};

impl Parser<'_> {
    /// Parse one top-level form. Includes expand to the statements of the
    /// included file, or to nothing if it was already parsed.
    pub(crate) fn parse_top_level(&mut self, value: &SExp) -> ParseResult<Vec<Statement>> {
        let (tag, args) = expect_tagged(value)?;
        match tag {
            "define" => Ok(vec![self.parse_define(args, &value.location)?]),
            "transform" => Ok(vec![parse_transform(args, &value.location)?]),
            "include_file" => self.parse_include_file(args, &value.location),
            _ => Err(ParseError::InvalidTopLevelTag {
                tag: tag.to_string(),
                location: head_location(value),
            }),
        }
    }

    // ==================== DEFINE ====================

    fn parse_define(&self, args: &[SExp], location: &SourceLocation) -> ParseResult<Statement> {
        require_arity("define", args, 2, location)?;
        let name = expect_symbol(&args[0])?;
        let (body_tag, body_args) = expect_tagged(&args[1])?;

        match body_tag {
            "domain" => {
                let user_types = body_args
                    .iter()
                    .map(|t| self.parse_domain_level_type(t))
                    .collect::<ParseResult<Vec<_>>>()?;
                Ok(Statement::TypeDomain(TypeDomain::new(
                    name,
                    user_types,
                    location.clone(),
                )))
            }
            "permute_domain" => self
                .parse_permute_domain(name, body_args, &args[1].location, location)
                .map(Statement::PermutedDomain),
            _ => Err(ParseError::unknown_constructor(
                body_tag,
                "domain definition",
                head_location(&args[1]),
            )),
        }
    }

    // ==================== PERMUTE DOMAIN ====================

    /// Parse `(permute_domain <base> <alteration>*)`.
    fn parse_permute_domain(
        &self,
        name: &str,
        args: &[SExp],
        body_location: &SourceLocation,
        location: &SourceLocation,
    ) -> ParseResult<PermutedDomain> {
        let (base, alterations) = expect_first("permute_domain", args, body_location)?;
        let permutes_domain = expect_symbol(base)?;

        let mut excluded_types = Vec::new();
        let mut included_types = Vec::new();
        let mut permuted_sums = Vec::new();

        for alteration in alterations {
            let (tag, alteration_args) = expect_tagged(alteration)?;
            match tag {
                "exclude" => {
                    for excluded in alteration_args {
                        excluded_types.push(parse_ident(excluded)?);
                    }
                }
                "include" => {
                    for included in alteration_args {
                        included_types.push(self.parse_domain_level_type(included)?);
                    }
                }
                "with" => {
                    permuted_sums.push(self.parse_with(alteration_args, &alteration.location)?);
                }
                _ => {
                    return Err(ParseError::unknown_constructor(
                        tag,
                        "domain permutation",
                        head_location(alteration),
                    ));
                }
            }
        }

        Ok(PermutedDomain {
            tag: name.to_string(),
            permutes_domain: permutes_domain.to_string(),
            excluded_types,
            included_types,
            permuted_sums,
            location: location.clone(),
        })
    }

    /// Parse `(with <sum> (exclude <variant>*)? (include <variant>*)?)`.
    fn parse_with(&self, args: &[SExp], location: &SourceLocation) -> ParseResult<PermutedSum> {
        let (sum, alterations) = expect_first("with", args, location)?;
        let tag = expect_symbol(sum)?;

        let mut removed_variants = Vec::new();
        let mut added_variants = Vec::new();

        for alteration in alterations {
            let (alteration_tag, alteration_args) = expect_tagged(alteration)?;
            match alteration_tag {
                "exclude" => {
                    for removed in alteration_args {
                        removed_variants.push(parse_ident(removed)?);
                    }
                }
                "include" => {
                    for added in alteration_args {
                        added_variants.push(self.parse_variant(added)?);
                    }
                }
                _ => {
                    return Err(ParseError::unknown_constructor(
                        alteration_tag,
                        "sum permutation",
                        head_location(alteration),
                    ));
                }
            }
        }

        Ok(PermutedSum {
            tag: tag.to_string(),
            removed_variants,
            added_variants,
            location: location.clone(),
        })
    }

    // ==================== INCLUDE FILE ====================

    fn parse_include_file(
        &mut self,
        args: &[SExp],
        location: &SourceLocation,
    ) -> ParseResult<Vec<Statement>> {
        require_arity("include_file", args, 1, location)?;
        let path = expect_string(&args[0])?;

        let resolved = self
            .resolver
            .resolve(path, &self.base_dir, &args[0].location)?;
        if !self.resolver.mark_seen(resolved.clone()) {
            debug!(include = path, resolved = %resolved.display(), "already parsed, skipping");
            return Ok(Vec::new());
        }

        Ok(self
            .parse_included_file(&resolved, &args[0].location)?
            .statements)
    }
}

// ==================== TRANSFORM ====================

fn parse_transform(args: &[SExp], location: &SourceLocation) -> ParseResult<Statement> {
    require_arity("transform", args, 2, location)?;
    Ok(Statement::Transform(Transform {
        source_domain_tag: expect_symbol(&args[0])?.to_string(),
        destination_domain_tag: expect_symbol(&args[1])?.to_string(),
        location: location.clone(),
    }))
}

fn parse_ident(value: &SExp) -> ParseResult<Ident> {
    Ok(Ident::new(expect_symbol(value)?, value.location.clone()))
}

/// Location of the head of `(head ...)`, falling back to the form itself.
pub(crate) fn head_location(value: &SExp) -> SourceLocation {
    value
        .as_list()
        .and_then(|items| items.first())
        .map(|head| head.location.clone())
        .unwrap_or_else(|| value.location.clone())
}
