use serde::{Deserialize, Serialize};

/// Sentiment label attached to an extracted requirement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Requirement {
    pub requirement: String,
    pub sentiment: Sentiment,
}

/// One review plus its extracted requirements. `id` is the key the
/// analysis service assigned to the record in its response map.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub app: String,
    pub review: String,
    pub date: String,
    pub requirements: Vec<Requirement>,
}

/// Record as it appears in the extraction response, before the map key
/// is folded in as `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireRecord {
    #[serde(rename = "App", default)]
    pub app: String,
    #[serde(rename = "Review", default)]
    pub review: String,
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

impl Record {
    pub fn from_wire(id: String, wire: WireRecord) -> Self {
        Self {
            id,
            app: wire.app,
            review: wire.review,
            date: wire.date,
            requirements: wire.requirements,
        }
    }

    pub fn total_requirements(&self) -> usize {
        self.requirements.len()
    }

    /// Case-insensitive substring match across the five searchable fields:
    /// app, review, date, and each requirement's text and sentiment label.
    /// An empty term matches every record.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.app.to_lowercase().contains(&term)
            || self.review.to_lowercase().contains(&term)
            || self.date.to_lowercase().contains(&term)
            || self.requirements.iter().any(|req| {
                req.requirement.to_lowercase().contains(&term)
                    || req.sentiment.as_str().contains(&term)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record {
            id: "0".to_string(),
            app: "PhotoShare".to_string(),
            review: "Uploads are slow and it crashes".to_string(),
            date: "2023-04".to_string(),
            requirements: vec![
                Requirement {
                    requirement: "faster uploads".to_string(),
                    sentiment: Sentiment::Negative,
                },
                Requirement {
                    requirement: "crash fixes".to_string(),
                    sentiment: Sentiment::Negative,
                },
            ],
        }
    }

    #[test]
    fn test_empty_term_matches() {
        assert!(sample().matches(""));
    }

    #[test]
    fn test_matches_each_field() {
        let record = sample();
        assert!(record.matches("photoshare"));
        assert!(record.matches("CRASHES"));
        assert!(record.matches("2023"));
        assert!(record.matches("faster up"));
        assert!(record.matches("negative"));
        assert!(!record.matches("positive"));
        assert!(!record.matches("banking"));
    }

    #[test]
    fn test_sentiment_parses_lowercase_labels() {
        let req: Requirement =
            serde_json::from_str(r#"{"requirement":"dark mode","sentiment":"positive"}"#).unwrap();
        assert_eq!(req.sentiment, Sentiment::Positive);

        // Unknown labels are rejected rather than silently mapped.
        let bad = serde_json::from_str::<Requirement>(
            r#"{"requirement":"dark mode","sentiment":"mixed"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_from_wire_keeps_key_as_id() {
        let wire: WireRecord = serde_json::from_str(
            r#"{"App":"A","Review":"r","Date":"2023-01","requirements":[]}"#,
        )
        .unwrap();
        let record = Record::from_wire("17".to_string(), wire);
        assert_eq!(record.id, "17");
        assert_eq!(record.app, "A");
        assert!(record.requirements.is_empty());
    }
}
