use crate::domain::record::{Record, WireRecord};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// String-keyed counts, kept in the order the analysis service emitted
/// them. JSON objects have no guaranteed key order, so we read the map
/// entry by entry instead of going through a sorted map type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution(pub Vec<(String, u64)>);

impl Distribution {
    pub fn iter(&self) -> impl Iterator<Item = &(String, u64)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[(&str, u64); N]> for Distribution {
    fn from(pairs: [(&str, u64); N]) -> Self {
        Self(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }
}

impl<'de> Deserialize<'de> for Distribution {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = Distribution;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of string keys to counts")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, serde_json::Number>()? {
                    // Some aggregates come back as floats; clamp to a count.
                    let count = value
                        .as_u64()
                        .or_else(|| value.as_f64().map(|f| f.max(0.0) as u64))
                        .unwrap_or(0);
                    out.push((key, count));
                }
                Ok(Distribution(out))
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

/// Response body of `POST <base>/eda`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EdaReport {
    #[serde(default)]
    pub time_distribution: Distribution,
    #[serde(default)]
    pub avg_word_count: f64,
    #[serde(default)]
    pub sentiment_distribution: Distribution,
    #[serde(default)]
    pub app_distribution: Distribution,
}

/// Response body of `POST <base>/extract_requirements`. The `records`
/// map is flattened into an ordered list as it is read, folding each
/// map key in as the record id.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ExtractionReport {
    #[serde(default)]
    pub distribution_over_apps: Distribution,
    #[serde(default)]
    pub word_count_distribution: Distribution,
    #[serde(default)]
    pub sentiment_distribution: Distribution,
    #[serde(default)]
    pub distribution_over_reviews: Distribution,
    #[serde(default)]
    pub distribution_over_time: Distribution,
    #[serde(default, deserialize_with = "records_in_order")]
    pub records: Vec<Record>,
}

fn records_in_order<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RecordsVisitor;

    impl<'de> Visitor<'de> for RecordsVisitor {
        type Value = Vec<Record>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of record ids to records")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((id, wire)) = access.next_entry::<String, WireRecord>()? {
                out.push(Record::from_wire(id, wire));
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(RecordsVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Sentiment;

    #[test]
    fn test_distribution_preserves_source_order() {
        let dist: Distribution =
            serde_json::from_str(r#"{"zebra": 3, "apple": 1, "mango": 2}"#).unwrap();
        let keys: Vec<&str> = dist.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_distribution_accepts_float_counts() {
        let dist: Distribution = serde_json::from_str(r#"{"a": 2.0, "b": 3}"#).unwrap();
        assert_eq!(dist, Distribution::from([("a", 2), ("b", 3)]));
    }

    #[test]
    fn test_eda_report_missing_fields_default() {
        let report: EdaReport = serde_json::from_str(r#"{"avg_word_count": 12.4}"#).unwrap();
        assert!(report.time_distribution.is_empty());
        assert!((report.avg_word_count - 12.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extraction_report_flattens_records() {
        let body = r#"{
            "sentiment_distribution": {"positive": 1, "negative": 1},
            "records": {
                "5": {"App": "A", "Review": "slow", "Date": "2023-01",
                      "requirements": [{"requirement": "speed", "sentiment": "negative"}]},
                "2": {"App": "B", "Review": "nice", "Date": "2023-02",
                      "requirements": []}
            }
        }"#;
        let report: ExtractionReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.records.len(), 2);
        // Records keep the response map's own order, not a sorted one.
        assert_eq!(report.records[0].id, "5");
        assert_eq!(report.records[1].id, "2");
        assert_eq!(report.records[0].requirements[0].sentiment, Sentiment::Negative);
    }
}
