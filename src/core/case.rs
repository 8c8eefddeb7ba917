//! Identifier case conversion
//!
//! Store modules derive every generated name from a base operation name:
//! constants stay in CONSTANT_CASE, state-slice and handler keys are
//! camelCase. Same input always yields the same key.

/// Convert an identifier to camelCase.
///
/// # Examples
///
/// ```
/// use trellis::core::case::camel_case;
///
/// assert_eq!(camel_case("FETCH_USER"), "fetchUser");
/// assert_eq!(camel_case("LOGIN"), "login");
/// assert_eq!(camel_case("fetch_user_PENDING"), "fetchUserPending");
/// ```
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut capitalize_next = false;
    for c in name.chars() {
        if c == '_' || c == '-' || c == ' ' {
            // Leading separators do not capitalize the first segment
            capitalize_next = !out.is_empty();
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Convert an identifier to CONSTANT_CASE.
///
/// Used to normalize base operation names before any key derivation, so
/// `"fetchUser"`, `"fetch_user"` and `"FETCH_USER"` all name the same
/// operation.
///
/// # Examples
///
/// ```
/// use trellis::core::case::constant_case;
///
/// assert_eq!(constant_case("fetchUser"), "FETCH_USER");
/// assert_eq!(constant_case("FETCH_USER"), "FETCH_USER");
/// assert_eq!(constant_case("fetch-user"), "FETCH_USER");
/// ```
pub fn constant_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        } else if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c);
            prev_lower = false;
        } else {
            out.extend(c.to_uppercase());
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out
}
