//! Data type definitions.

use crate::SourceLocation;

/// Tag of the built-in boolean type.
pub const BOOL_TAG: &str = "bool";
/// Tag of the built-in integer type.
pub const INT_TAG: &str = "int";
/// Tag of the built-in symbol type.
pub const SYMBOL_TAG: &str = "symbol";
/// Tag of the built-in opaque passthrough type.
pub const ION_TAG: &str = "ion";

/// The built-in types every domain starts with, in declaration order.
pub static BUILTIN_TYPES: [DataType; 4] = [
    DataType::Bool,
    DataType::Int,
    DataType::Symbol,
    DataType::Ion,
];

/// How many values an element holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly one value.
    Required,
    /// Zero or one value.
    Optional,
    /// Any number of values, at least `min`.
    Variadic { min: u32 },
}

impl Arity {
    pub fn is_variadic(&self) -> bool {
        matches!(self, Arity::Variadic { .. })
    }
}

/// A reference to a type by name.
#[derive(Debug, Clone)]
pub struct TypeRef {
    pub type_name: String,
    pub arity: Arity,
    pub location: SourceLocation,
}

impl TypeRef {
    pub fn new(type_name: impl Into<String>, arity: Arity, location: SourceLocation) -> Self {
        Self {
            type_name: type_name.into(),
            arity,
            location,
        }
    }

    pub fn required(type_name: impl Into<String>) -> Self {
        Self::new(type_name, Arity::Required, SourceLocation::unknown())
    }

    pub fn optional(type_name: impl Into<String>) -> Self {
        Self::new(type_name, Arity::Optional, SourceLocation::unknown())
    }

    pub fn variadic(type_name: impl Into<String>, min: u32) -> Self {
        Self::new(type_name, Arity::Variadic { min }, SourceLocation::unknown())
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.arity == other.arity
    }
}

impl Eq for TypeRef {}

/// One field of a tuple.
#[derive(Debug, Clone)]
pub struct NamedElement {
    /// Code-facing name, unique within the enclosing tuple.
    pub identifier: String,
    /// Wire-form field name. Empty for product elements.
    pub tag: String,
    pub type_reference: TypeRef,
    pub location: SourceLocation,
}

impl NamedElement {
    pub fn new(
        identifier: impl Into<String>,
        tag: impl Into<String>,
        type_reference: TypeRef,
        location: SourceLocation,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            tag: tag.into(),
            type_reference,
            location,
        }
    }

    /// A product element: positional, so it carries no wire tag.
    pub fn product(identifier: impl Into<String>, type_reference: TypeRef) -> Self {
        Self::new(identifier, "", type_reference, SourceLocation::unknown())
    }

    /// A record element whose identifier is its tag.
    pub fn record(tag: impl Into<String>, type_reference: TypeRef) -> Self {
        let tag = tag.into();
        Self::new(tag.clone(), tag, type_reference, SourceLocation::unknown())
    }
}

impl PartialEq for NamedElement {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.tag == other.tag
            && self.type_reference == other.type_reference
    }
}

impl Eq for NamedElement {}

/// Wire form of a tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TupleType {
    /// Positional.
    Product,
    /// Field-tagged.
    Record,
}

impl TupleType {
    pub fn keyword(&self) -> &'static str {
        match self {
            TupleType::Product => "product",
            TupleType::Record => "record",
        }
    }
}

/// An ordered sequence of named elements.
#[derive(Debug, Clone)]
pub struct Tuple {
    pub tag: String,
    pub tuple_type: TupleType,
    pub named_elements: Vec<NamedElement>,
    /// Set only by the transform differ.
    pub is_different: bool,
    pub location: SourceLocation,
}

impl Tuple {
    pub fn new(
        tag: impl Into<String>,
        tuple_type: TupleType,
        named_elements: Vec<NamedElement>,
        location: SourceLocation,
    ) -> Self {
        Self {
            tag: tag.into(),
            tuple_type,
            named_elements,
            is_different: false,
            location,
        }
    }

    pub fn product(tag: impl Into<String>, named_elements: Vec<NamedElement>) -> Self {
        Self::new(tag, TupleType::Product, named_elements, SourceLocation::unknown())
    }

    pub fn record(tag: impl Into<String>, named_elements: Vec<NamedElement>) -> Self {
        Self::new(tag, TupleType::Record, named_elements, SourceLocation::unknown())
    }

    /// Find an element by identifier.
    pub fn element(&self, identifier: &str) -> Option<&NamedElement> {
        self.named_elements
            .iter()
            .find(|e| e.identifier == identifier)
    }

    /// Copy of this tuple with the difference flag set.
    pub fn with_different(&self, is_different: bool) -> Self {
        Self {
            is_different,
            ..self.clone()
        }
    }

    /// Equality of shape only: tag, kind and elements. Ignores the
    /// difference flag as well as locations.
    pub fn structurally_eq(&self, other: &Tuple) -> bool {
        self.tag == other.tag
            && self.tuple_type == other.tuple_type
            && self.named_elements == other.named_elements
    }
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other) && self.is_different == other.is_different
    }
}

impl Eq for Tuple {}

/// A closed choice among variant tuples.
#[derive(Debug, Clone)]
pub struct Sum {
    pub tag: String,
    pub variants: Vec<Tuple>,
    /// Set only by the transform differ.
    pub is_different: bool,
    pub location: SourceLocation,
}

impl Sum {
    pub fn new(tag: impl Into<String>, variants: Vec<Tuple>, location: SourceLocation) -> Self {
        Self {
            tag: tag.into(),
            variants,
            is_different: false,
            location,
        }
    }

    /// Find a variant by tag.
    pub fn variant(&self, tag: &str) -> Option<&Tuple> {
        self.variants.iter().find(|v| v.tag == tag)
    }
}

impl PartialEq for Sum {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.variants == other.variants
            && self.is_different == other.is_different
    }
}

impl Eq for Sum {}

/// A type that may be referenced from an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Bool,
    Int,
    Symbol,
    /// Opaque passthrough value.
    Ion,
    Tuple(Tuple),
    Sum(Sum),
}

impl DataType {
    pub fn tag(&self) -> &str {
        match self {
            DataType::Bool => BOOL_TAG,
            DataType::Int => INT_TAG,
            DataType::Symbol => SYMBOL_TAG,
            DataType::Ion => ION_TAG,
            DataType::Tuple(t) => &t.tag,
            DataType::Sum(s) => &s.tag,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(
            self,
            DataType::Bool | DataType::Int | DataType::Symbol | DataType::Ion
        )
    }

    /// Built-ins that carry a scalar value. `ion` is deliberately not one.
    pub fn is_primitive(&self) -> bool {
        matches!(self, DataType::Bool | DataType::Int | DataType::Symbol)
    }

    pub fn is_different(&self) -> bool {
        match self {
            DataType::Tuple(t) => t.is_different,
            DataType::Sum(s) => s.is_different,
            _ => false,
        }
    }

    /// Copy of this type flagged as different. Built-ins have no flag and
    /// are returned unchanged.
    pub fn as_different(&self) -> DataType {
        match self {
            DataType::Tuple(t) => DataType::Tuple(t.with_different(true)),
            DataType::Sum(s) => DataType::Sum(Sum {
                is_different: true,
                ..s.clone()
            }),
            other => other.clone(),
        }
    }

    /// Built-ins have no location.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            DataType::Tuple(t) => Some(&t.location),
            DataType::Sum(s) => Some(&s.location),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&Tuple> {
        match self {
            DataType::Tuple(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_sum(&self) -> Option<&Sum> {
        match self {
            DataType::Sum(s) => Some(s),
            _ => None,
        }
    }
}

/// True when `tag` names one of the built-in types.
pub fn is_builtin_tag(tag: &str) -> bool {
    BUILTIN_TYPES.iter().any(|t| t.tag() == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Tuple {
        Tuple::product(
            "pair",
            vec![
                NamedElement::product("x", TypeRef::required("int")),
                NamedElement::product("y", TypeRef::required("int")),
            ],
        )
    }

    #[test]
    fn test_equality_ignores_locations() {
        let a = pair();
        let mut b = pair();
        b.location = SourceLocation::new(10, 4);
        b.named_elements[0].location = SourceLocation::new(11, 1);
        b.named_elements[0].type_reference.location = SourceLocation::new(11, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_sees_arity() {
        let a = pair();
        let mut b = pair();
        b.named_elements[1].type_reference.arity = Arity::Optional;
        assert_ne!(a, b);
    }

    #[test]
    fn test_difference_flag_is_not_structural() {
        let a = pair();
        let b = pair().with_different(true);
        assert!(a.structurally_eq(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_builtins() {
        assert!(is_builtin_tag("int"));
        assert!(is_builtin_tag("ion"));
        assert!(!is_builtin_tag("pair"));
        assert!(DataType::Symbol.is_primitive());
        assert!(!DataType::Ion.is_primitive());
        assert!(DataType::Ion.is_builtin());
        assert!(!DataType::Tuple(pair()).is_builtin());
    }

    #[test]
    fn test_lookup_helpers() {
        let t = pair();
        assert_eq!(t.element("y").map(|e| e.identifier.as_str()), Some("y"));
        assert!(t.element("z").is_none());

        let s = Sum::new("shape", vec![pair()], SourceLocation::unknown());
        assert!(s.variant("pair").is_some());
        assert!(s.variant("circle").is_none());
    }
}
