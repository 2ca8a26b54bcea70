//! Literal place-name corrections
//!
//! OpenCage and GeoNames disagree on a handful of names, mostly around the
//! Austrian-Hungarian border where German and Hungarian naming collide.
//! These are fixed data, not a transliteration rule: prefixes and suffixes
//! are removed only when they match exactly at the anchor, and substitutions
//! replace a field only when the whole field matches. All comparisons are
//! case-sensitive.

/// Stripped from the start of a region
pub const REGION_PREFIXES: &[&str] = &["Komitat "];

/// Stripped from the end of a region
pub const REGION_SUFFIXES: &[&str] = &["megye"];

/// Whole-field city substitutions
pub const CITY_SUBSTITUTIONS: &[(&str, &str)] = &[("Straß-Sommerein", "Hegyeshalom")];

/// Stripped from the start of a locality, applied in order
pub const LOCALITY_PREFIXES: &[&str] = &["KG ", "Katastralgemeinde ", "Bezirksteil "];

/// Whole-field locality substitutions
pub const LOCALITY_SUBSTITUTIONS: &[(&str, &str)] = &[("Krenfeld", "Kelenföld")];

pub fn correct_region(region: String) -> String {
    let region = strip_prefixes(region, REGION_PREFIXES);
    strip_suffixes(region, REGION_SUFFIXES)
}

pub fn correct_city(city: String) -> String {
    substitute(city, CITY_SUBSTITUTIONS)
}

pub fn correct_locality(locality: String) -> String {
    let locality = strip_prefixes(locality, LOCALITY_PREFIXES);
    substitute(locality, LOCALITY_SUBSTITUTIONS)
}

/// Each prefix is removed at most once, in table order
fn strip_prefixes(mut value: String, prefixes: &[&str]) -> String {
    for prefix in prefixes {
        if let Some(rest) = value.strip_prefix(prefix) {
            value = rest.to_string();
        }
    }
    value
}

fn strip_suffixes(mut value: String, suffixes: &[&str]) -> String {
    for suffix in suffixes {
        if let Some(rest) = value.strip_suffix(suffix) {
            value = rest.to_string();
        }
    }
    value
}

fn substitute(value: String, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .find(|(from, _)| *from == value)
        .map(|(_, to)| to.to_string())
        .unwrap_or(value)
}
