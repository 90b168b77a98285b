//! A single parsed LDIF entry.

use std::collections::HashMap;

/// One LDIF record: a distinguished name plus its attribute-value pairs.
///
/// Attribute names are stored lowercased because LDAP attribute names are
/// case-insensitive. Values keep their original case and order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The distinguished name, exactly as written in the dump.
    pub dn: String,
    attributes: HashMap<String, Vec<String>>,
}

impl Entry {
    /// Create an entry with no attributes yet.
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: HashMap::new(),
        }
    }

    /// Append a value to an attribute.
    pub fn add_value(&mut self, name: &str, value: impl Into<String>) {
        self.attributes
            .entry(name.to_lowercase())
            .or_default()
            .push(value.into());
    }

    /// All values of an attribute, empty if absent.
    pub fn values(&self, name: &str) -> &[String] {
        self.attributes
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First value of an attribute, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    /// Whether the entry carries this attribute at all.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(&name.to_lowercase())
    }

    /// The lowercased names of all attributes present.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// All `objectClass` values.
    pub fn object_classes(&self) -> &[String] {
        self.values("objectClass")
    }

    /// Total number of attribute values.
    pub fn value_count(&self) -> usize {
        self.attributes.values().map(Vec::len).sum()
    }
}
