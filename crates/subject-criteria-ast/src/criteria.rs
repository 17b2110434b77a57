//! Criteria as authored in a test

use crate::RawValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single expectation: a loosely named field and its raw expected value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// Field name exactly as authored (any case, any spacing)
    pub raw_field: String,
    /// Expected value exactly as authored
    pub raw_expected: RawValue,
}

impl Criterion {
    pub fn new(raw_field: impl Into<String>, raw_expected: impl Into<RawValue>) -> Self {
        Self {
            raw_field: raw_field.into(),
            raw_expected: raw_expected.into(),
        }
    }
}

/// An ordered set of criteria keyed by raw field name
///
/// Authoring order is preserved so that diagnostics list failures in the
/// order the test wrote them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria {
    entries: IndexMap<String, RawValue>,
}

impl Criteria {
    /// Create an empty criteria set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, expected: impl Into<RawValue>) -> Self {
        self.insert(field, expected);
        self
    }

    /// Insert or replace a criterion
    pub fn insert(&mut self, field: impl Into<String>, expected: impl Into<RawValue>) {
        self.entries.insert(field.into(), expected.into());
    }

    /// Look up a raw expected value by its exact raw field name
    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.entries.get(field)
    }

    /// Number of criteria
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no criteria
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate raw field names and values in authoring order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate as owned [`Criterion`] values
    pub fn criteria(&self) -> impl Iterator<Item = Criterion> + '_ {
        self.entries
            .iter()
            .map(|(k, v)| Criterion::new(k.clone(), v.clone()))
    }
}

impl<K, V> FromIterator<(K, V)> for Criteria
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut criteria = Criteria::new();
        for (k, v) in iter {
            criteria.insert(k, v);
        }
        criteria
    }
}

impl From<Criterion> for Criteria {
    fn from(criterion: Criterion) -> Self {
        Criteria::new().with(criterion.raw_field, criterion.raw_expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_authoring_order_preserved() {
        let criteria = Criteria::new()
            .with("Screening Status", "Call")
            .with("subject age", 30)
            .with("screening due date", "Today");

        let fields: Vec<&str> = criteria.iter().map(|(k, _)| k).collect();
        assert_eq!(fields, vec!["Screening Status", "subject age", "screening due date"]);
    }

    #[test]
    fn test_json_object_round() {
        let json = r#"{"screening status": "Call", "subject age": 30}"#;
        let criteria: Criteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.len(), 2);
        assert_eq!(criteria.get("subject age"), Some(&RawValue::from(30)));
    }

    #[test]
    fn test_from_iterator() {
        let criteria: Criteria = [("a", "1"), ("b", "2")].into_iter().collect();
        let owned: Vec<Criterion> = criteria.criteria().collect();
        assert_eq!(owned[1], Criterion::new("b", "2"));
    }
}
