//! Semantic checks for a concrete type domain.
//!
//! Checking runs in two passes. Name collection registers every type and
//! variant tag in the domain namespace and verifies per-tuple uniqueness of
//! element identifiers and record field tags. The error check then walks
//! every tuple (domain-level tuples and sum variants) and validates type
//! references, arity ordering, optional `ion` elements and emptiness.

use crate::names::{NameBinding, NameKind, NameTable};
use crate::{SemanticError, SemanticResult};
use std::collections::HashSet;
use tracing::{instrument, trace};
use tydl_core::{
    Arity, DataType, NamedElement, SourceLocation, Sum, Tuple, TupleType, TypeDomain,
    BUILTIN_TYPES, ION_TAG,
};

/// Check one domain. Returns the first violation found.
#[instrument(level = "debug", skip_all, fields(domain = %domain.tag))]
pub fn check_type_domain(domain: &TypeDomain) -> SemanticResult<()> {
    let mut checker = DomainChecker::new(domain);
    checker.collect_names()?;
    checker.check_types()
}

/// Per-invocation checker state.
struct DomainChecker<'d> {
    domain: &'d TypeDomain,
    names: NameTable,
}

impl<'d> DomainChecker<'d> {
    fn new(domain: &'d TypeDomain) -> Self {
        Self {
            domain,
            names: NameTable::new(),
        }
    }

    // ==================== NAME COLLECTION ====================

    fn collect_names(&mut self) -> SemanticResult<()> {
        let domain = self.domain;
        for builtin in &BUILTIN_TYPES {
            self.define(builtin.tag(), NameKind::BuiltinType, &domain.location)?;
        }

        for data_type in &domain.user_types {
            match data_type {
                DataType::Tuple(tuple) => {
                    self.define(&tuple.tag, NameKind::UserType, &tuple.location)?;
                    self.collect_element_names(tuple)?;
                }
                DataType::Sum(sum) => {
                    self.define(&sum.tag, NameKind::UserType, &sum.location)?;
                    for variant in &sum.variants {
                        self.define(&variant.tag, NameKind::Variant, &variant.location)?;
                        self.collect_element_names(variant)?;
                    }
                }
                builtin => self.define(builtin.tag(), NameKind::UserType, &domain.location)?,
            }
        }

        trace!(user_types = domain.user_types.len(), "collected domain names");
        Ok(())
    }

    fn collect_element_names(&mut self, tuple: &Tuple) -> SemanticResult<()> {
        self.names.push();
        let result = self.define_elements(tuple);
        self.names.pop();
        result
    }

    fn define_elements(&mut self, tuple: &Tuple) -> SemanticResult<()> {
        let mut field_tags = HashSet::new();
        for element in &tuple.named_elements {
            self.define(&element.identifier, NameKind::Element, &element.location)?;
            if tuple.tuple_type == TupleType::Record && !field_tags.insert(element.tag.as_str()) {
                return Err(SemanticError::name_already_used(
                    &element.tag,
                    &element.location,
                ));
            }
        }
        Ok(())
    }

    fn define(
        &mut self,
        name: &str,
        kind: NameKind,
        location: &SourceLocation,
    ) -> SemanticResult<()> {
        if self
            .names
            .define(NameBinding::new(name, kind, location.clone()))
        {
            Ok(())
        } else {
            Err(SemanticError::name_already_used(name, location))
        }
    }

    // ==================== ERROR CHECK ====================

    fn check_types(&self) -> SemanticResult<()> {
        for data_type in &self.domain.user_types {
            match data_type {
                DataType::Tuple(tuple) => self.check_tuple(tuple)?,
                DataType::Sum(sum) => self.check_sum(sum)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn check_sum(&self, sum: &Sum) -> SemanticResult<()> {
        if sum.variants.is_empty() {
            return Err(SemanticError::EmptySum {
                tag: sum.tag.clone(),
                location: sum.location.clone(),
            });
        }
        sum.variants.iter().try_for_each(|v| self.check_tuple(v))
    }

    fn check_tuple(&self, tuple: &Tuple) -> SemanticResult<()> {
        if tuple.tuple_type == TupleType::Record && tuple.named_elements.is_empty() {
            return Err(SemanticError::EmptyRecord {
                tag: tuple.tag.clone(),
                location: tuple.location.clone(),
            });
        }

        let mut seen_variadic = false;
        for element in &tuple.named_elements {
            self.check_type_reference(tuple, element)?;
            check_arity_order(element, seen_variadic)?;
            check_optional_ion(element)?;
            seen_variadic |= element.type_reference.arity.is_variadic();
        }
        Ok(())
    }

    /// A reference must name a built-in or user type. Variant tags and the
    /// enclosing tuple's element identifiers are names, but not type names.
    fn check_type_reference(&self, tuple: &Tuple, element: &NamedElement) -> SemanticResult<()> {
        let reference = &element.type_reference;
        let name = reference.type_name.as_str();
        match self.names.lookup_domain(name) {
            Some(binding) if binding.kind.is_type() => Ok(()),
            Some(_) => Err(SemanticError::not_a_type_name(name, &reference.location)),
            None if tuple.element(name).is_some() => {
                Err(SemanticError::not_a_type_name(name, &reference.location))
            }
            None => Err(SemanticError::undefined_type(name, &reference.location)),
        }
    }
}

/// Elements follow `(required | optional)* variadic?`.
fn check_arity_order(element: &NamedElement, seen_variadic: bool) -> SemanticResult<()> {
    if !seen_variadic {
        return Ok(());
    }
    let name = element.identifier.clone();
    let location = element.location.clone();
    Err(match element.type_reference.arity {
        Arity::Required => SemanticError::RequiredElementAfterVariadic {
            element: name,
            location,
        },
        Arity::Optional => SemanticError::OptionalElementAfterVariadic {
            element: name,
            location,
        },
        Arity::Variadic { .. } => SemanticError::MoreThanOneVariadicElement {
            element: name,
            location,
        },
    })
}

fn check_optional_ion(element: &NamedElement) -> SemanticResult<()> {
    let reference = &element.type_reference;
    if reference.arity == Arity::Optional && reference.type_name == ION_TAG {
        return Err(SemanticError::OptionalIonElement {
            element: element.identifier.clone(),
            location: element.location.clone(),
        });
    }
    Ok(())
}
