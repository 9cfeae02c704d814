//! Derived forms of the PI's name shown in event descriptions.

/// The PI short-name rule: honorific plus the second whitespace-separated token of
/// the full name ("Ada Lovelace" becomes "Dr. Lovelace").
///
/// A single-token name uses that token. An empty name yields the honorific alone.
pub fn pi_short_name(full_name: &str, honorific: &str) -> String {
    let mut tokens = full_name.split_whitespace();
    let first = tokens.next();
    let chosen = tokens.next().or(first);

    match chosen {
        Some(name) if honorific.is_empty() => name.to_string(),
        Some(name) => format!("{honorific} {name}"),
        None => honorific.to_string(),
    }
}

/// Replaces every occurrence of `placeholder` in `description` with `short_name`.
pub fn substitute_placeholder(description: &str, placeholder: &str, short_name: &str) -> String {
    if placeholder.is_empty() {
        return description.to_string();
    }
    description.replace(placeholder, short_name)
}
