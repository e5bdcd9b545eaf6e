//! Variant Resolution
//!
//! Body text carries two-way reading annotations `(A,B)`: `A` is the
//! reading as printed, `B` the editors' correction. Resolution substitutes
//! the configured alternative for every group, counts groups whose
//! alternatives disagree on tsheg boundaries, and detects parenthesis
//! debris left behind by malformed groups.

use std::sync::LazyLock;

use regex::Regex;

/// Inter-syllable separator (U+0F0B); also the boundary marker whose
/// presence must agree between the two alternatives of a variant group
pub const TSHEG: char = '་';

static GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^\),]*),([^\),]*)\)").expect("valid regex"));

/// Which alternative of a `(A,B)` group survives resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantChoice {
    /// Keep the first alternative, the reading as printed
    #[default]
    Original,
    /// Keep the second alternative, the editors' correction
    Corrected,
}

/// Outcome of resolving one line of body text
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Body text with every well-formed group replaced by one alternative
    pub text: String,
    /// Groups whose alternatives disagreed on a leading or trailing tsheg
    pub tsheg_mismatches: u32,
    /// A literal parenthesis survived substitution
    pub spurious_parenthesis: bool,
}

/// Resolve every variant group in `body`
///
/// Text already free of well-formed groups passes through unchanged, so
/// resolving twice gives the same result as resolving once.
pub fn resolve_variants(body: &str, choice: VariantChoice) -> Resolution {
    let mut text = String::with_capacity(body.len());
    let mut tsheg_mismatches = 0;
    let mut tail = 0;

    for caps in GROUP_RE.captures_iter(body) {
        let Some(group) = caps.get(0) else { continue };
        let first = caps.get(1).map_or("", |m| m.as_str());
        let second = caps.get(2).map_or("", |m| m.as_str());

        if boundary_mismatch(first, second) {
            tsheg_mismatches += 1;
        }

        text.push_str(&body[tail..group.start()]);
        text.push_str(match choice {
            VariantChoice::Original => first,
            VariantChoice::Corrected => second,
        });
        tail = group.end();
    }
    text.push_str(&body[tail..]);

    let spurious_parenthesis = text.contains('(') || text.contains(')');
    Resolution {
        text,
        tsheg_mismatches,
        spurious_parenthesis,
    }
}

/// Both alternatives present but disagreeing on tsheg at either edge
///
/// An empty alternative records an insertion or deletion; those are
/// legitimate and exempt from the check.
fn boundary_mismatch(first: &str, second: &str) -> bool {
    if first.is_empty() || second.is_empty() {
        return false;
    }
    first.starts_with(TSHEG) != second.starts_with(TSHEG)
        || first.ends_with(TSHEG) != second.ends_with(TSHEG)
}
