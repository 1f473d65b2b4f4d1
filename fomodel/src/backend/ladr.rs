//! Input files for Mace4.

use std::fmt::Write;

use super::{SearchOptions, SearchRequest};

/// Render a complete Mace4 input file for `request`.
///
/// The search is restricted to the requested domain size.
/// Axioms are copied verbatim, a missing final period is added.
pub fn render_input(request: &SearchRequest) -> String {
    let options = &request.options;
    let mut input = String::new();

    // writing into a String cannot fail
    let _ = writeln!(input, "assign(domain_size, {}).", request.domain_size);
    let _ = writeln!(input, "assign(end_size, {}).", request.domain_size);
    let _ = writeln!(input, "assign(max_seconds, {}).", whole_seconds(options));
    match options.max_models() {
        Some(count) => {
            let _ = writeln!(input, "assign(max_models, {count}).");
        }
        None => input.push_str("assign(max_models, -1).\n"),
    }
    for parameter in options.parameters() {
        let _ = writeln!(input, "{}", terminated(parameter));
    }

    input.push_str("\nformulas(assumptions).\n");
    for axiom in &request.axioms {
        let axiom = axiom.trim();
        if !axiom.is_empty() {
            let _ = writeln!(input, "{}", terminated(axiom));
        }
    }
    input.push_str(&crate::formula::render_sentences(&request.sentences));
    input.push_str("end_of_list.\n");

    log::trace!("mace4 input:\n{input}");

    input
}

/// Time budget in seconds, rounded up so that a positive budget never becomes 0.
fn whole_seconds(options: &SearchOptions) -> u64 {
    let budget = options.time_budget();
    budget.as_secs() + u64::from(budget.subsec_nanos() > 0)
}

fn terminated(text: &str) -> String {
    let text = text.trim();
    if text.ends_with('.') {
        text.to_string()
    } else {
        format!("{text}.")
    }
}
