//! PEP 508 requirement string parser
//!
//! Handles the subset of PEP 508 used by requirement lists and PEP 621
//! metadata:
//! - Name with optional extras: `requests[socks]`
//! - Specifier lists: `>=1.0,<2.0`, optionally wrapped in parentheses
//! - Direct references: `pkg @ https://...` (no constraint)
//! - Environment markers after `;` and comments after `#` are dropped

use regex::Regex;
use std::sync::LazyLock;

static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<name>[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*(?:\[(?P<extras>[^\[\]]*)\])?\s*(?P<rest>.*)$",
    )
    .unwrap()
});
static EXTRA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$").unwrap());
static SPECIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<op>===|==|!=|~=|>=|<=|>|<)\s*(?P<version>[A-Za-z0-9.*+!_-]+)$").unwrap()
});
static FALLBACK_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_\-.]+)").unwrap());

/// A single version specifier such as `>=1.0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    /// Comparison operator (`==`, `>=`, ...)
    pub operator: String,
    /// Version operand
    pub version: String,
}

/// Result of parsing one requirement string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Package name as written
    pub name: String,
    /// Exact pin or best available constraint
    pub pinned_version: Option<String>,
}

/// Parse a requirement string into a name and pin.
///
/// Returns `None` for blank or comment-only input and for strings that do
/// not even start with a package name. When the full grammar fails the
/// leading name is still returned, unpinned.
pub fn parse_requirement(line: &str) -> Option<Requirement> {
    let line = line.split(';').next().unwrap_or_default().trim();
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return None;
    }

    if let Some((name, specifiers)) = parse_pep508(line) {
        return Some(Requirement {
            name,
            pinned_version: select_pin(&specifiers),
        });
    }

    FALLBACK_NAME_RE.captures(line).map(|caps| Requirement {
        name: caps[1].to_string(),
        pinned_version: None,
    })
}

/// Strict grammar: name, optional extras, then a URL or specifier list
fn parse_pep508(line: &str) -> Option<(String, Vec<Specifier>)> {
    let caps = REQUIREMENT_RE.captures(line)?;
    let name = caps.name("name")?.as_str().to_string();

    if let Some(extras) = caps.name("extras") {
        let valid = extras
            .as_str()
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .all(|e| EXTRA_RE.is_match(e));
        if !valid {
            return None;
        }
    }

    let rest = caps.name("rest").map_or("", |m| m.as_str()).trim();
    if rest.is_empty() {
        return Some((name, Vec::new()));
    }

    if let Some(url) = rest.strip_prefix('@') {
        return (!url.trim().is_empty()).then_some((name, Vec::new()));
    }

    let list = match rest.strip_prefix('(') {
        Some(inner) => inner.strip_suffix(')')?.trim(),
        None => rest,
    };
    let specifiers = parse_specifier_list(list)?;
    Some((name, specifiers))
}

fn parse_specifier_list(list: &str) -> Option<Vec<Specifier>> {
    list.split(',')
        .map(|part| {
            let caps = SPECIFIER_RE.captures(part.trim())?;
            Some(Specifier {
                operator: caps["op"].to_string(),
                version: caps["version"].to_string(),
            })
        })
        .collect()
}

/// Choose the pin to report: the first `==` version, else the specifier
/// ranked first by (operator lacks `==`, operator) rendered with its operator.
fn select_pin(specifiers: &[Specifier]) -> Option<String> {
    if let Some(exact) = specifiers.iter().find(|s| s.operator == "==") {
        return Some(exact.version.clone());
    }

    specifiers
        .iter()
        .min_by_key(|s| (!s.operator.contains("=="), s.operator.as_str()))
        .map(|s| format!("{}{}", s.operator, s.version))
}
