/// Normalizes a declared name to its snake_case storage form.
///
/// `unsignedArrayData` becomes `unsigned_array_data`, `BasicData` becomes
/// `basic_data`. Consecutive uppercase runs stay one word (`rectCGRect` →
/// `rect_cgrect`).
pub(crate) fn snake_case(src: &str) -> String {
    let mut out = String::with_capacity(src.len() + 4);
    let mut prev_lower = false;
    for ch in src.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

/// Returns `true` if the name is identifier-shaped: `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_identifier(src: &str) -> bool {
    let mut chars = src.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
