//! Define the naming-convention transforms used to match property names against accessor names.
//!
//! ## Notes
//! - **Case model**: only the first character is ever case-normalized. The rest of a name is compared
//!   verbatim, so `firstName` and `firstname` are different properties.
//! - **Indexing model**: indices returned here are byte offsets into the input, suitable for slicing.
//! - Empty input is passed through unchanged by every transform (no error).

/// Return a copy of `name` with its first character upper-cased.
///
/// ## Parameters
/// - `name`: the name to transform.
///
/// ## Returns
/// - (`String`): `name` with only its first character changed; empty input yields an empty string.
///
/// ## Examples
/// ```rust
/// use introspect_core::naming::capitalize;
///
/// assert_eq!(capitalize("alive"), "Alive");
/// assert_eq!(capitalize("firstName"), "FirstName");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(name: &str) -> String {
    map_first_char(name, |c| single(c, c.to_uppercase()))
}

/// Return a copy of `name` with its first character lower-cased.
///
/// ## Examples
/// ```rust
/// use introspect_core::naming::uncapitalize;
///
/// assert_eq!(uncapitalize("Alive"), "alive");
/// assert_eq!(uncapitalize("URL"), "uRL");
/// ```
pub fn uncapitalize(name: &str) -> String {
    map_first_char(name, |c| single(c, c.to_lowercase()))
}

fn map_first_char(name: &str, map: impl FnOnce(char) -> char) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(name.len());
    out.push(map(first));
    out.push_str(chars.as_str());
    out
}

/// Keep `c` unless its case mapping is exactly one character (`ß` would otherwise become `SS`).
fn single(c: char, mut mapped: impl Iterator<Item = char>) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(m), None) => m,
        _ => c,
    }
}

/// Locate the first upper-case character of `name`.
///
/// The index is a byte offset, not a character count: `first_upper_case_index("éA")` is `Some(2)`.
/// Use `name[..i].chars().count()` where a character position is needed.
///
/// ## Returns
/// - `Some(index)`: byte offset of the first upper-case character.
/// - `None`: `name` contains no upper-case character.
///
/// ## Examples
/// ```rust
/// use introspect_core::naming::first_upper_case_index;
///
/// assert_eq!(first_upper_case_index("isAlive"), Some(2));
/// assert_eq!(first_upper_case_index("getname"), None);
/// ```
pub fn first_upper_case_index(name: &str) -> Option<usize> {
    name.char_indices().find(|(_, c)| c.is_uppercase()).map(|(i, _)| i)
}

/// Return the accessor suffix of a method name: everything from its first upper-case character.
///
/// `getFirstName` yields `FirstName`, `isAlive` yields `Alive`. Names without an upper-case
/// character have no suffix.
pub fn accessor_suffix(method_name: &str) -> Option<&str> {
    first_upper_case_index(method_name).map(|i| &method_name[i..])
}

/// Return a copy of `input` with every occurrence of `ch` removed.
///
/// The relative order of the remaining characters is preserved, and the operation is idempotent.
///
/// ## Examples
/// ```rust
/// use introspect_core::naming::strip_char;
///
/// assert_eq!(strip_char("first_name", '_'), "firstname");
/// assert_eq!(strip_char("__", '_'), "");
/// ```
pub fn strip_char(input: &str, ch: char) -> String {
    input.chars().filter(|&c| c != ch).collect()
}

/// Return a copy of `input` with every character in `separators` removed.
pub fn strip_chars(input: &str, separators: &[char]) -> String {
    input.chars().filter(|c| !separators.contains(c)).collect()
}

/// Convert a `snake_case` identifier to `lowerCamelCase`.
///
/// This is how Rust method identifiers are mapped onto accessor names: `get_first_name` becomes
/// `getFirstName`, `is_alive` becomes `isAlive`. Leading and repeated underscores are dropped; a
/// leading raw-identifier marker (`r#`) must be stripped by the caller.
///
/// ## Examples
/// ```rust
/// use introspect_core::naming::snake_to_lower_camel;
///
/// assert_eq!(snake_to_lower_camel("get_first_name"), "getFirstName");
/// assert_eq!(snake_to_lower_camel("set_url"), "setUrl");
/// assert_eq!(snake_to_lower_camel("name"), "name");
/// ```
pub fn snake_to_lower_camel(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for (i, part) in ident.split('_').filter(|p| !p.is_empty()).enumerate() {
        if i == 0 {
            out.push_str(part);
        } else {
            out.push_str(&capitalize(part));
        }
    }
    out
}
