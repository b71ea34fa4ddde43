//! Input records: ordered field names with optional raw string values.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

/// An insertion-ordered map from field name to raw value.
///
/// `None` is an absent value, which mapping treats the same as a blank
/// string. Re-inserting a name replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, Option<String>)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Builds a record from `(name, value)` pairs; later duplicates win.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(name, value)| (name, Some(value)))
            .collect()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert_raw(name, Some(value.into()));
    }

    /// Inserts `name` with no value.
    pub fn insert_absent(&mut self, name: impl Into<String>) {
        self.insert_raw(name, None);
    }

    pub fn insert_raw(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// `None` if the name is not in the record, `Some(None)` if it is but
    /// has no value.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Extend<(K, Option<V>)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, Option<V>)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert_raw(name, value.map(Into::into));
        }
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut record = Record::with_capacity(iter.size_hint().0);
        record.extend(iter);
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Option<String>);
    type IntoIter = std::vec::IntoIter<(String, Option<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to strings or null")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Record, A::Error> {
                let mut record = Record::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, Option<String>>()? {
                    record.insert_raw(name, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinsert_keeps_position() {
        let mut record = Record::new();
        record.insert("A", "1");
        record.insert("B", "2");
        record.insert("A", "3");
        let entries: Vec<_> = record.iter().collect();
        assert_eq!(entries, [("A", Some("3")), ("B", Some("2"))]);
    }

    #[test]
    fn absent_values_are_distinct_from_missing_names() {
        let mut record = Record::new();
        record.insert_absent("CreatedOn");
        assert_eq!(record.get("CreatedOn"), Some(None));
        assert_eq!(record.get("Label"), None);
        assert!(record.contains_key("CreatedOn"));
    }

    #[test]
    fn collects_from_optional_pairs() {
        let record: Record = [("Label", Some("Foo")), ("Number", None)].into_iter().collect();
        assert_eq!(record.len(), 2);
        assert_eq!(record.names().collect::<Vec<_>>(), ["Label", "Number"]);
    }

    #[test]
    fn deserializes_json_in_document_order() {
        let record: Record =
            serde_json::from_str(r#"{"Value": "3.5", "Label": "Foo", "CreatedOn": null}"#).unwrap();
        let entries: Vec<_> = record.iter().collect();
        assert_eq!(
            entries,
            [("Value", Some("3.5")), ("Label", Some("Foo")), ("CreatedOn", None)]
        );
    }

    #[test]
    fn rejects_non_string_json_values() {
        assert!(serde_json::from_str::<Record>(r#"{"Value": 3.5}"#).is_err());
    }
}
