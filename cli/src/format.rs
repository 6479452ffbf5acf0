//! Output formatting for compiled universes.

use tydl_compiler::CompiledUniverse;
use tydl_core::{Statement, TypeDomain, TypeUniverse};

/// One line per domain, then one line per transform.
pub fn format_summary(compiled: &CompiledUniverse) -> String {
    let mut lines: Vec<String> = compiled.domains.iter().map(format_domain_line).collect();

    for (transform, diff) in compiled.universe.transforms().zip(&compiled.transforms) {
        let different: Vec<&str> = diff
            .user_types
            .iter()
            .filter(|t| t.is_different())
            .map(|t| t.tag())
            .collect();
        let mut line = format!(
            "transform {} -> {}: {} of {} shared types differ",
            transform.source_domain_tag,
            transform.destination_domain_tag,
            different.len(),
            diff.user_types.len()
        );
        if !different.is_empty() {
            line.push_str(&format!(" ({})", different.join(", ")));
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn format_domain_line(domain: &TypeDomain) -> String {
    let tags: Vec<&str> = domain.user_types.iter().map(|t| t.tag()).collect();
    format!(
        "domain {}: {} types ({})",
        domain.tag,
        tags.len(),
        tags.join(", ")
    )
}

/// The concrete domains as source text.
pub fn format_domains(compiled: &CompiledUniverse) -> String {
    TypeUniverse::new(
        compiled
            .domains
            .iter()
            .cloned()
            .map(Statement::TypeDomain)
            .collect(),
    )
    .to_string()
}
