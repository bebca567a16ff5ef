//! Identifier case conversion used for generated paths and template values

/// `"MyWidget"` -> `"my-widget"`
///
/// Hyphenates before every uppercase letter, so acronyms are split letter by
/// letter (`"HTTPServer"` -> `"h-t-t-p-server"`).
pub fn to_kebab(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_uppercase() {
            out.push('-');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    match out.strip_prefix('-') {
        Some(stripped) => stripped.to_string(),
        None => out,
    }
}

/// `"my-widget"` -> `"MyWidget"`
///
/// Splits on `-` and `_`; only the first letter of each segment changes case.
pub fn to_pascal(s: &str) -> String {
    s.split(['-', '_'])
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect()
}

/// `"my-widget"` -> `"myWidget"`
pub fn to_camel(s: &str) -> String {
    let pascal = to_pascal(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn to_upper(s: &str) -> String {
    s.to_uppercase()
}

pub fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
