//! Distinguished name helpers.
//!
//! DNs are compared case-insensitively and with whitespace between RDNs
//! ignored, so `CN=Admins, OU=Groups,DC=example,DC=com` and
//! `cn=admins,ou=groups,dc=example,dc=com` identify the same entry.
//! Full RFC 4514 parsing (hex escapes, multi-valued RDNs) is out of scope;
//! backslash-escaped commas are the only escape handled.

/// Split a DN into RDN strings on unescaped commas.
fn split_rdns(dn: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in dn.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ',' {
            parts.push(&dn[start..i]);
            start = i + 1;
        }
    }
    parts.push(&dn[start..]);
    parts
}

/// Normalize a DN for identity comparison: lowercase, trim each RDN.
pub fn normalize_dn(dn: &str) -> String {
    split_rdns(dn)
        .iter()
        .map(|rdn| rdn.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join(",")
}

/// The value of the first (leftmost) RDN, used as a fallback display label.
///
/// `rdn_value("cn=Admins,ou=Groups,dc=example,dc=com")` is `"Admins"`.
/// Returns the whole first RDN when it has no `=`.
pub fn rdn_value(dn: &str) -> &str {
    let first = split_rdns(dn).first().copied().unwrap_or(dn).trim();
    match first.split_once('=') {
        Some((_, value)) => value.trim(),
        None => first,
    }
}
