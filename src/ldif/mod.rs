//! LDIF (RFC 2849) parsing — streaming reader and DN helpers.

pub mod dn;
pub mod reader;

pub use dn::{normalize_dn, rdn_value};
pub use reader::{parse_str, LdifReader};
