//! Insertion-ordered field mapping.
//!
//! Authored templates list fields in an order the author chose, and group
//! detection iterates fields in exactly that order. A hash map would
//! scramble it, so the page mapping is a thin ordered structure with JSON
//! object round-trip fidelity.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::template::model::FieldDefinition;

/// Ordered mapping from field name to field definition.
///
/// Keys are unique; inserting an existing key replaces the definition in
/// place without moving the entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, FieldDefinition)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, field)| field)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldDefinition> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, field)| field)
    }

    /// Insert a field, returning the previous definition if the name was
    /// already present.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        field: FieldDefinition,
    ) -> Option<FieldDefinition> {
        let name = name.into();
        match self.get_mut(&name) {
            Some(existing) => Some(std::mem::replace(existing, field)),
            None => {
                self.entries.push((name, field));
                None
            }
        }
    }

    /// Remove a field, preserving the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<FieldDefinition> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.entries
            .iter()
            .map(|(name, field)| (name.as_str(), field))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl FromIterator<(String, FieldDefinition)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, FieldDefinition)>>(iter: I) -> Self {
        let mut fields = FieldMap::new();
        for (name, field) in iter {
            fields.insert(name, field);
        }
        fields
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, FieldDefinition);
    type IntoIter = std::vec::IntoIter<(String, FieldDefinition)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, field) in &self.entries {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = FieldMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of field names to field definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
                let mut fields = FieldMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, field)) = access.next_entry::<String, FieldDefinition>()? {
                    fields.insert(name, field);
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}
