//! LDIF reader tests: record splitting, folding, base64, error cases.

use ldifgraph::ldif::{normalize_dn, parse_str, rdn_value, LdifReader};
use ldifgraph::types::LdifError;

// ==================== Record Parsing ====================

#[test]
fn test_two_records() {
    let ldif = "\
dn: uid=alice,ou=people,dc=example,dc=com
objectClass: inetOrgPerson
uid: alice
cn: Alice Adams

dn: cn=staff,ou=groups,dc=example,dc=com
objectClass: groupOfNames
cn: staff
member: uid=alice,ou=people,dc=example,dc=com
";
    let entries = parse_str(ldif).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].dn, "uid=alice,ou=people,dc=example,dc=com");
    assert_eq!(entries[0].first("cn"), Some("Alice Adams"));
    assert_eq!(
        entries[1].values("member"),
        &["uid=alice,ou=people,dc=example,dc=com".to_string()]
    );
}

#[test]
fn test_multi_valued_attribute_order() {
    let ldif = "\
dn: cn=staff,dc=example,dc=com
objectClass: top
objectClass: groupOfNames
member: uid=a,dc=example,dc=com
member: uid=b,dc=example,dc=com
";
    let entries = parse_str(ldif).unwrap();
    assert_eq!(
        entries[0].values("member"),
        &[
            "uid=a,dc=example,dc=com".to_string(),
            "uid=b,dc=example,dc=com".to_string()
        ]
    );
    assert_eq!(entries[0].object_classes().len(), 2);
}

#[test]
fn test_attribute_names_case_insensitive() {
    let ldif = "\
dn: uid=a,dc=example,dc=com
ObjectClass: person
UID: a
";
    let entries = parse_str(ldif).unwrap();
    assert_eq!(entries[0].first("objectclass"), Some("person"));
    assert_eq!(entries[0].first("objectClass"), Some("person"));
    assert_eq!(entries[0].first("uid"), Some("a"));
    assert!(entries[0].has_attribute("Uid"));
}

#[test]
fn test_folded_line() {
    let ldif = "\
dn: uid=a,dc=example,dc=com
description: a value that keeps
 going and going
uid: a
";
    let entries = parse_str(ldif).unwrap();
    assert_eq!(
        entries[0].first("description"),
        Some("a value that keepsgoing and going")
    );
    assert_eq!(entries[0].first("uid"), Some("a"));
}

#[test]
fn test_version_line_and_comments() {
    let ldif = "\
version: 1
# exported from ldapsearch
# a folded comment
 continues here
dn: uid=a,dc=example,dc=com
uid: a
";
    let entries = parse_str(ldif).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].first("uid"), Some("a"));
    assert!(!entries[0].has_attribute("version"));
}

#[test]
fn test_crlf_line_endings() {
    let ldif = "dn: uid=a,dc=example,dc=com\r\nuid: a\r\n\r\ndn: uid=b,dc=example,dc=com\r\nuid: b\r\n";
    let entries = parse_str(ldif).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].first("uid"), Some("b"));
}

#[test]
fn test_missing_blank_separator() {
    // A new dn: line ends the previous record even without a blank line.
    let ldif = "\
dn: uid=a,dc=example,dc=com
uid: a
dn: uid=b,dc=example,dc=com
uid: b
";
    let entries = parse_str(ldif).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].first("uid"), Some("a"));
    assert_eq!(entries[1].dn, "uid=b,dc=example,dc=com");
}

#[test]
fn test_attribute_options_stripped() {
    let ldif = "\
dn: uid=a,dc=example,dc=com
cn;lang-en: Alice
cn;lang-fr: Alice
";
    let entries = parse_str(ldif).unwrap();
    assert_eq!(entries[0].values("cn").len(), 2);
}

// ==================== Base64 and URL Values ====================

#[test]
fn test_base64_value() {
    let ldif = "\
dn: uid=a,dc=example,dc=com
description:: SGVsbG8gd29ybGQ=
";
    let entries = parse_str(ldif).unwrap();
    assert_eq!(entries[0].first("description"), Some("Hello world"));
}

#[test]
fn test_base64_dn() {
    let ldif = "\
dn:: Y249Sm9zw6kgR2FyY8OtYSxkYz1leGFtcGxlLGRjPWNvbQ==
cn:: U3RhZmY=
";
    let entries = parse_str(ldif).unwrap();
    assert_eq!(entries[0].dn, "cn=José García,dc=example,dc=com");
    assert_eq!(entries[0].first("cn"), Some("Staff"));
}

#[test]
fn test_url_value_skipped() {
    let ldif = "\
dn: uid=a,dc=example,dc=com
jpegphoto:< file:///tmp/photo.jpg
uid: a
";
    let entries = parse_str(ldif).unwrap();
    assert!(!entries[0].has_attribute("jpegphoto"));
    assert_eq!(entries[0].first("uid"), Some("a"));
}

// ==================== Error Cases ====================

#[test]
fn test_attribute_before_dn() {
    let err = parse_str("uid: a\ndn: uid=a,dc=example,dc=com\n").unwrap_err();
    match err {
        LdifError::MissingDn(line) => assert_eq!(line, 1),
        e => panic!("Expected MissingDn, got {e:?}"),
    }
}

#[test]
fn test_malformed_line() {
    let ldif = "\
dn: uid=a,dc=example,dc=com
this line has no separator
";
    let err = parse_str(ldif).unwrap_err();
    assert!(matches!(err, LdifError::MalformedLine { line: 2, .. }));
}

#[test]
fn test_invalid_base64() {
    let ldif = "\
dn: uid=a,dc=example,dc=com
description:: !!!not-base64!!!
";
    let err = parse_str(ldif).unwrap_err();
    assert!(matches!(err, LdifError::InvalidBase64(2)));
}

#[test]
fn test_iteration_stops_after_error() {
    let mut reader = LdifReader::from_str("no colon here\n");
    assert!(matches!(reader.next(), Some(Err(_))));
    assert!(reader.next().is_none());
}

#[test]
fn test_empty_input() {
    assert!(parse_str("").unwrap().is_empty());
    assert!(parse_str("\n\n# just a comment\n\n").unwrap().is_empty());
}

// ==================== DN Helpers ====================

#[test]
fn test_normalize_dn() {
    assert_eq!(
        normalize_dn("CN=Admins, OU=Groups, DC=Example, DC=Com"),
        "cn=admins,ou=groups,dc=example,dc=com"
    );
    assert_eq!(
        normalize_dn("cn=admins,ou=groups,dc=example,dc=com"),
        "cn=admins,ou=groups,dc=example,dc=com"
    );
}

#[test]
fn test_normalize_dn_escaped_comma() {
    // The escaped comma stays inside the first RDN.
    let dn = "cn=Doe\\, John,ou=People,dc=example,dc=com";
    assert_eq!(
        normalize_dn(dn),
        "cn=doe\\, john,ou=people,dc=example,dc=com"
    );
}

#[test]
fn test_rdn_value() {
    assert_eq!(rdn_value("cn=Admins,ou=Groups,dc=example,dc=com"), "Admins");
    assert_eq!(rdn_value("uid=alice"), "alice");
    assert_eq!(rdn_value("no-equals-here"), "no-equals-here");
}
