//! Type declarations, elements and type references.
//!
//! Handles parsing of:
//! - `(product <tag> <id>::<type-ref>*)`
//! - `(record <tag> [<id>::](<field> <type-ref>)*)`
//! - `(sum <tag> (<variant-tag> <element>*)*)`
//! - type references `t`, `(? t)` and `(* t N)`

use super::{expect_first, expect_symbol, expect_tagged, require_arity, Parser};
use crate::error::{ParseError, ParseResult};
use crate::sexp::{SExp, SExpKind};
use tydl_core::{Arity, DataType, NamedElement, Sum, Tuple, TupleType, TypeRef};

const OPTIONAL_TAG: &str = "?";
const VARIADIC_TAG: &str = "*";

impl Parser<'_> {
    /// Parse a type declaration that may appear directly in a domain.
    pub(crate) fn parse_domain_level_type(&self, value: &SExp) -> ParseResult<DataType> {
        let (keyword, args) = expect_tagged(value)?;
        match keyword {
            "product" | "record" => {
                let (tag, elements) = expect_first(keyword, args, &value.location)?;
                let tuple_type = if keyword == "product" {
                    TupleType::Product
                } else {
                    TupleType::Record
                };
                parse_tuple_body(expect_symbol(tag)?, tuple_type, elements, value)
                    .map(DataType::Tuple)
            }
            "sum" => {
                let (tag, variants) = expect_first(keyword, args, &value.location)?;
                let variants = variants
                    .iter()
                    .map(|v| self.parse_variant(v))
                    .collect::<ParseResult<Vec<_>>>()?;
                Ok(DataType::Sum(Sum::new(
                    expect_symbol(tag)?,
                    variants,
                    value.location.clone(),
                )))
            }
            _ => Err(ParseError::unknown_constructor(
                keyword,
                "type declaration",
                super::universe::head_location(value),
            )),
        }
    }

    /// Parse a sum variant `(<tag> <element>*)`.
    ///
    /// The variant is a record when its first element is an s-expression
    /// headed by a field tag rather than an arity tag.
    pub(crate) fn parse_variant(&self, value: &SExp) -> ParseResult<Tuple> {
        let (tag, elements) = expect_tagged(value)?;
        let is_record = elements.first().is_some_and(|first| {
            first
                .head_symbol()
                .is_some_and(|head| head != OPTIONAL_TAG && head != VARIADIC_TAG)
        });
        let tuple_type = if is_record {
            TupleType::Record
        } else {
            TupleType::Product
        };
        parse_tuple_body(tag, tuple_type, elements, value)
    }
}

fn parse_tuple_body(
    tag: &str,
    tuple_type: TupleType,
    elements: &[SExp],
    form: &SExp,
) -> ParseResult<Tuple> {
    let named_elements = elements
        .iter()
        .map(|e| match tuple_type {
            TupleType::Product => parse_product_element(e),
            TupleType::Record => parse_record_element(e),
        })
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(Tuple::new(
        tag,
        tuple_type,
        named_elements,
        form.location.clone(),
    ))
}

// ==================== ELEMENTS ====================

/// `identifier::<type-ref>`
fn parse_product_element(value: &SExp) -> ParseResult<NamedElement> {
    let identifier = match value.annotations.as_slice() {
        [] => {
            return Err(ParseError::MissingElementIdentifier {
                location: value.location.clone(),
            })
        }
        [identifier] => identifier,
        _ => {
            return Err(ParseError::MultipleElementIdentifiers {
                location: value.location.clone(),
            })
        }
    };
    Ok(NamedElement::new(
        identifier.as_str(),
        "",
        parse_type_ref(value)?,
        value.location.clone(),
    ))
}

/// `(field <type-ref>)` or `identifier::(field <type-ref>)`
fn parse_record_element(value: &SExp) -> ParseResult<NamedElement> {
    let [field, type_ref] = value.as_list().unwrap_or_default() else {
        return Err(ParseError::InvalidRecordElement {
            location: value.location.clone(),
        });
    };
    let tag = expect_symbol(field)?;
    let identifier = match value.annotations.as_slice() {
        [] => tag,
        [identifier] => identifier.as_str(),
        _ => {
            return Err(ParseError::MultipleElementIdentifiers {
                location: value.location.clone(),
            })
        }
    };
    Ok(NamedElement::new(
        identifier,
        tag,
        parse_type_ref(type_ref)?,
        value.location.clone(),
    ))
}

// ==================== TYPE REFERENCES ====================

fn parse_type_ref(value: &SExp) -> ParseResult<TypeRef> {
    let location = value.location.clone();
    let items = match &value.kind {
        SExpKind::Symbol(name) => return Ok(TypeRef::new(name.as_str(), Arity::Required, location)),
        SExpKind::List(items) if !items.is_empty() => items,
        _ => {
            return Err(ParseError::ExpectedSymbolOrSexp {
                found: value.kind_name(),
                location,
            })
        }
    };

    let (head, args) = (&items[0], &items[1..]);
    let arity_tag = expect_symbol(head)?;
    match arity_tag {
        OPTIONAL_TAG => {
            require_arity(OPTIONAL_TAG, args, 1, &location)?;
            Ok(TypeRef::new(expect_symbol(&args[0])?, Arity::Optional, location))
        }
        VARIADIC_TAG => {
            require_arity(VARIADIC_TAG, args, 2, &location)?;
            let type_name = expect_symbol(&args[0])?;
            let min = parse_minimum_arity(&args[1])?;
            Ok(TypeRef::new(type_name, Arity::Variadic { min }, location))
        }
        other => Err(ParseError::ExpectedTypeReferenceArityTag {
            found: other.to_string(),
            location: head.location.clone(),
        }),
    }
}

fn parse_minimum_arity(value: &SExp) -> ParseResult<u32> {
    match value.kind {
        SExpKind::Int(n) => u32::try_from(n).map_err(|_| ParseError::InvalidMinimumArity {
            value: n,
            location: value.location.clone(),
        }),
        _ => Err(ParseError::ExpectedInteger {
            found: value.kind_name(),
            location: value.location.clone(),
        }),
    }
}
