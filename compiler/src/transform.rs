//! Domain differ for `transform` statements.

use tracing::{instrument, trace};
use tydl_core::{DataType, Sum, Tuple, TypeDomain};

/// Diff `source` against `destination`.
///
/// The result carries the source domain's tag and location and one entry
/// per source type that also exists in the destination, with
/// `is_different` set where the two differ. Types missing from the
/// destination are dropped.
#[instrument(
    level = "debug",
    skip_all,
    fields(source = %source.tag, destination = %destination.tag)
)]
pub fn compute_transform(source: &TypeDomain, destination: &TypeDomain) -> TypeDomain {
    let user_types = source
        .user_types
        .iter()
        .filter_map(|source_type| {
            let Some(destination_type) = destination
                .user_types
                .iter()
                .find(|t| t.tag() == source_type.tag())
            else {
                trace!(tag = source_type.tag(), "dropped, not in destination");
                return None;
            };
            Some(diff_type(source_type, destination_type))
        })
        .collect();

    TypeDomain::new(source.tag.clone(), user_types, source.location.clone())
}

fn diff_type(source: &DataType, destination: &DataType) -> DataType {
    match (source, destination) {
        (DataType::Tuple(s), DataType::Tuple(d)) => DataType::Tuple(diff_tuple(s, Some(d))),
        (DataType::Sum(s), DataType::Sum(d)) => DataType::Sum(diff_sum(s, d)),
        // Kind mismatch: the destination's shape is what the transform has
        // to produce.
        _ => destination.as_different(),
    }
}

fn diff_tuple(source: &Tuple, destination: Option<&Tuple>) -> Tuple {
    let is_different = destination.map_or(true, |d| !source.structurally_eq(d));
    source.with_different(is_different)
}

/// Variants present only in the destination do not affect the result.
fn diff_sum(source: &Sum, destination: &Sum) -> Sum {
    let variants: Vec<Tuple> = source
        .variants
        .iter()
        .map(|v| diff_tuple(v, destination.variant(&v.tag)))
        .collect();
    Sum {
        is_different: variants.iter().any(|v| v.is_different),
        variants,
        ..source.clone()
    }
}
