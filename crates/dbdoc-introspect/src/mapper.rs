use dbdoc_core::PRIMARY_KEY_ROLE;

/// Collapse an engine's key marker to `PRI` or empty; only primary-key
/// membership is modeled.
pub fn key_role(raw: &str) -> String {
    if raw.trim().eq_ignore_ascii_case(PRIMARY_KEY_ROLE) {
        PRIMARY_KEY_ROLE.to_string()
    } else {
        String::new()
    }
}

/// Interpret catalog yes/no markers (`YES`, `Y`, `1`, `true`).
pub fn is_yes(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_uppercase().as_str(),
        "YES" | "Y" | "1" | "TRUE" | "T"
    )
}
