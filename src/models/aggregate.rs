use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A partial mapping from period or category key to a total, as returned by
/// the aggregate backend.
///
/// Keys are kept as strings in the order they appeared in the JSON object.
/// Periods without activity are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseAggregate {
    entries: Vec<(String, f64)>,
}

impl SparseAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, total: f64) {
        self.entries.push((key.into(), total));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total stored under `key`. A repeated key resolves to its last value.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for SparseAggregate {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Serialize for SparseAggregate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, total) in &self.entries {
            map.serialize_entry(key, total)?;
        }
        map.end()
    }
}

struct SparseAggregateVisitor;

impl<'de> Visitor<'de> for SparseAggregateVisitor {
    type Value = SparseAggregate;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of keys to numeric totals")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut aggregate = SparseAggregate::new();
        while let Some((key, total)) = access.next_entry::<String, Option<f64>>()? {
            // A null total means the same as an absent key.
            if let Some(total) = total {
                aggregate.insert(key, total);
            }
        }
        Ok(aggregate)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(SparseAggregate::default())
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(SparseAggregate::default())
    }
}

impl<'de> Deserialize<'de> for SparseAggregate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SparseAggregateVisitor)
    }
}

/// Body of every aggregate endpoint. Any list may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregateResponse {
    pub income_list: SparseAggregate,
    pub outcome_list: SparseAggregate,
    pub income_category_percentage_list: SparseAggregate,
    pub outcome_category_percentage_list: SparseAggregate,
    pub income_category_cost_list: SparseAggregate,
    pub outcome_category_cost_list: SparseAggregate,
}
