use crate::compliance::domain::Asset;
use indexmap::IndexMap;
use serde_json::Value;

/// One chart bucket: a distinct value and how many times it occurs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub name: String,
    pub value: usize,
}

/// Buckets in first-seen order plus the number of distinct values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceSummary {
    pub occurrences: Vec<Occurrence>,
    pub distinct: usize,
}

impl OccurrenceSummary {
    fn from_counts(counts: IndexMap<String, usize>) -> Self {
        let distinct = counts.len();
        let occurrences = counts
            .into_iter()
            .map(|(name, value)| Occurrence { name, value })
            .collect();
        Self {
            occurrences,
            distinct,
        }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.occurrences
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value)
    }
}

/// Counts how often algorithm properties and asset names occur across
/// detections, for the overview charts.
pub struct OccurrenceCounter;

impl OccurrenceCounter {
    /// Counts `cryptoProperties.algorithmProperties.<property>` values.
    ///
    /// The property may be a single value or an array; each array element
    /// counts once. Assets with a missing, `null`, `false`, `0` or empty
    /// string property are skipped.
    pub fn count_property(assets: &[Asset], property: &str) -> OccurrenceSummary {
        let mut counts: IndexMap<String, usize> = IndexMap::new();

        for value in assets
            .iter()
            .filter_map(|asset| asset.algorithm_property(property))
            .filter(|value| is_truthy(value))
        {
            match value {
                Value::Array(items) => {
                    for item in items {
                        *counts.entry(key_of(item)).or_insert(0) += 1;
                    }
                }
                other => *counts.entry(key_of(other)).or_insert(0) += 1,
            }
        }

        OccurrenceSummary::from_counts(counts)
    }

    /// Counts asset names; assets without a non-empty name are skipped
    pub fn count_names(assets: &[Asset]) -> OccurrenceSummary {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for name in assets
            .iter()
            .filter_map(Asset::name)
            .filter(|name| !name.is_empty())
        {
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
        OccurrenceSummary::from_counts(counts)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn key_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn asset_with(property: &str, value: Value) -> Asset {
        Asset::new(json!({
            "type": "cryptographic-asset",
            "cryptoProperties": {"algorithmProperties": {property: value}}
        }))
    }

    #[test]
    fn test_count_property_single_values() {
        let assets = vec![
            asset_with("primitive", json!("pke")),
            asset_with("primitive", json!("block-cipher")),
            asset_with("primitive", json!("pke")),
        ];
        let summary = OccurrenceCounter::count_property(&assets, "primitive");
        assert_eq!(summary.distinct, 2);
        assert_eq!(summary.occurrences[0].name, "pke");
        assert_eq!(summary.get("pke"), Some(2));
        assert_eq!(summary.get("block-cipher"), Some(1));
    }

    #[test]
    fn test_count_property_arrays() {
        let assets = vec![
            asset_with("cryptoFunctions", json!(["keygen", "encrypt"])),
            asset_with("cryptoFunctions", json!("encrypt")),
        ];
        let summary = OccurrenceCounter::count_property(&assets, "cryptoFunctions");
        assert_eq!(summary.distinct, 2);
        assert_eq!(summary.get("encrypt"), Some(2));
        assert_eq!(summary.get("keygen"), Some(1));
    }

    #[test]
    fn test_count_property_skips_missing_and_empty() {
        let assets = vec![
            asset_with("mode", json!("")),
            asset_with("mode", Value::Null),
            Asset::new(json!({"name": "AES"})),
            asset_with("mode", json!("gcm")),
        ];
        let summary = OccurrenceCounter::count_property(&assets, "mode");
        assert_eq!(summary.distinct, 1);
        assert_eq!(summary.get("gcm"), Some(1));
    }

    #[test]
    fn test_count_property_stringifies_numbers() {
        let assets = vec![asset_with("parameterSetIdentifier", json!(128))];
        let summary = OccurrenceCounter::count_property(&assets, "parameterSetIdentifier");
        assert_eq!(summary.get("128"), Some(1));
    }

    #[test]
    fn test_count_names() {
        let assets = vec![
            Asset::new(json!({"name": "RSA"})),
            Asset::new(json!({"name": "AES"})),
            Asset::new(json!({"name": "RSA"})),
            Asset::new(json!({"bom-ref": "x"})),
        ];
        let summary = OccurrenceCounter::count_names(&assets);
        assert_eq!(summary.distinct, 2);
        assert_eq!(
            summary.occurrences,
            vec![
                Occurrence {
                    name: "RSA".to_string(),
                    value: 2
                },
                Occurrence {
                    name: "AES".to_string(),
                    value: 1
                },
            ]
        );
    }

    #[test]
    fn test_count_empty_collection() {
        assert_eq!(
            OccurrenceCounter::count_names(&[]),
            OccurrenceSummary::default()
        );
    }
}
