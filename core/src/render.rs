//! Rendering of the model back to source text.
//!
//! The output re-parses to a value equal to the rendered one.

use crate::{
    Arity, DataType, NamedElement, PermutedDomain, PermutedSum, Statement, Transform, Tuple,
    TupleType, TypeDomain, TypeRef, TypeUniverse,
};
use std::borrow::Cow;
use std::fmt::{self, Display, Write};

const INDENT: &str = "  ";

/// Render `name` as a symbol, quoting it when it is not a plain identifier.
pub(crate) fn symbol(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    let plain = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    if plain {
        return Cow::Borrowed(name);
    }
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('\'');
    for c in name.chars() {
        match c {
            '\'' => quoted.push_str("\\'"),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    Cow::Owned(quoted)
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = symbol(&self.type_name);
        match self.arity {
            Arity::Required => write!(f, "{}", name),
            Arity::Optional => write!(f, "(? {})", name),
            Arity::Variadic { min } => write!(f, "(* {} {})", name, min),
        }
    }
}

fn write_element(out: &mut String, tuple_type: TupleType, element: &NamedElement) -> fmt::Result {
    match tuple_type {
        TupleType::Product => write!(
            out,
            "{}::{}",
            symbol(&element.identifier),
            element.type_reference
        ),
        TupleType::Record => {
            if element.identifier != element.tag {
                write!(out, "{}::", symbol(&element.identifier))?;
            }
            write!(
                out,
                "({} {})",
                symbol(&element.tag),
                element.type_reference
            )
        }
    }
}

/// `(<tag> <element>*)`, the body shared by domain-level tuples and variants.
fn write_tuple_body(out: &mut String, tuple: &Tuple) -> fmt::Result {
    write!(out, "{}", symbol(&tuple.tag))?;
    for element in &tuple.named_elements {
        out.push(' ');
        write_element(out, tuple.tuple_type, element)?;
    }
    Ok(())
}

fn write_variant(out: &mut String, variant: &Tuple) -> fmt::Result {
    out.push('(');
    write_tuple_body(out, variant)?;
    out.push(')');
    Ok(())
}

fn write_data_type(out: &mut String, data_type: &DataType, depth: usize) -> fmt::Result {
    match data_type {
        DataType::Tuple(t) => {
            write!(out, "({} ", t.tuple_type.keyword())?;
            write_tuple_body(out, t)?;
            out.push(')');
        }
        DataType::Sum(s) => {
            write!(out, "(sum {}", symbol(&s.tag))?;
            for variant in &s.variants {
                out.push('\n');
                out.push_str(&INDENT.repeat(depth + 1));
                write_variant(out, variant)?;
            }
            out.push(')');
        }
        builtin => out.push_str(builtin.tag()),
    }
    Ok(())
}

impl Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_data_type(&mut out, self, 0)?;
        f.write_str(&out)
    }
}

impl Display for TypeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write!(out, "(define {}\n{}(domain", symbol(&self.tag), INDENT)?;
        for data_type in &self.user_types {
            out.push('\n');
            out.push_str(&INDENT.repeat(2));
            write_data_type(&mut out, data_type, 2)?;
        }
        out.push_str("))");
        f.write_str(&out)
    }
}

fn write_permuted_sum(out: &mut String, sum: &PermutedSum) -> fmt::Result {
    write!(out, "(with {}", symbol(&sum.tag))?;
    if !sum.removed_variants.is_empty() {
        write!(out, "\n{}(exclude", INDENT.repeat(3))?;
        for removed in &sum.removed_variants {
            write!(out, " {}", symbol(&removed.name))?;
        }
        out.push(')');
    }
    if !sum.added_variants.is_empty() {
        write!(out, "\n{}(include", INDENT.repeat(3))?;
        for added in &sum.added_variants {
            write!(out, "\n{}", INDENT.repeat(4))?;
            write_variant(out, added)?;
        }
        out.push(')');
    }
    out.push(')');
    Ok(())
}

impl Display for PermutedDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write!(
            out,
            "(define {}\n{}(permute_domain {}",
            symbol(&self.tag),
            INDENT,
            symbol(&self.permutes_domain)
        )?;
        if !self.excluded_types.is_empty() {
            write!(out, "\n{}(exclude", INDENT.repeat(2))?;
            for excluded in &self.excluded_types {
                write!(out, " {}", symbol(&excluded.name))?;
            }
            out.push(')');
        }
        if !self.included_types.is_empty() {
            write!(out, "\n{}(include", INDENT.repeat(2))?;
            for included in &self.included_types {
                write!(out, "\n{}", INDENT.repeat(3))?;
                write_data_type(&mut out, included, 3)?;
            }
            out.push(')');
        }
        for sum in &self.permuted_sums {
            write!(out, "\n{}", INDENT.repeat(2))?;
            write_permuted_sum(&mut out, sum)?;
        }
        out.push_str("))");
        f.write_str(&out)
    }
}

impl Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(transform {} {})",
            symbol(&self.source_domain_tag),
            symbol(&self.destination_domain_tag)
        )
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::TypeDomain(d) => Display::fmt(d, f),
            Statement::PermutedDomain(p) => Display::fmt(p, f),
            Statement::Transform(t) => Display::fmt(t, f),
        }
    }
}

impl Display for TypeUniverse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            Display::fmt(statement, f)?;
        }
        Ok(())
    }
}
