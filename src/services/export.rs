use crate::domain::record::Record;
use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use csv::{QuoteStyle, WriterBuilder};
use std::path::PathBuf;

const EXPORT_HEADER: &str = "App,Review,Date,Total_Requirements,Requirements,Sentiments";

/// Builds the export CSV: a plain header row, then one row per record
/// with every field double-quoted (the writer doubles embedded
/// quotes). Requirement texts and sentiment labels are `; `-joined
/// lists aligned by requirement index.
pub fn records_to_csv(records: &[&Record]) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(vec![]);

    for record in records {
        let requirements = record
            .requirements
            .iter()
            .map(|r| r.requirement.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        let sentiments = record
            .requirements
            .iter()
            .map(|r| r.sentiment.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        let total = record.total_requirements().to_string();
        wtr.write_record([
            record.app.as_str(),
            record.review.as_str(),
            record.date.as_str(),
            total.as_str(),
            requirements.as_str(),
            sentiments.as_str(),
        ])?;
    }

    let rows = String::from_utf8(wtr.into_inner()?)?;
    Ok(format!("{}\n{}", EXPORT_HEADER, rows))
}

/// `all_requirements_<ts>.csv` or `filtered_requirements_<ts>.csv`,
/// with the RFC 3339 timestamp made filename-safe (`:` and `.`
/// replaced by `-`).
pub fn export_file_name(filtered: bool, now: DateTime<Utc>) -> String {
    let timestamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    if filtered {
        format!("filtered_requirements_{}.csv", timestamp)
    } else {
        format!("all_requirements_{}.csv", timestamp)
    }
}

/// Writes the export into the user's download directory (current
/// directory when none exists) and returns the path. The file handle
/// only lives inside the write call.
pub fn write_export(records: &[&Record], filtered: bool) -> Result<PathBuf> {
    let csv = records_to_csv(records)?;
    let dir = dirs::download_dir().unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(export_file_name(filtered, Utc::now()));
    std::fs::write(&path, csv)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{Requirement, Sentiment};
    use chrono::TimeZone;

    #[test]
    fn test_quoting_and_joined_lists() {
        let record = Record {
            id: "0".to_string(),
            app: "A".to_string(),
            review: r#"He said "hi""#.to_string(),
            date: "2023-01".to_string(),
            requirements: vec![Requirement {
                requirement: "fast load".to_string(),
                sentiment: Sentiment::Positive,
            }],
        };

        let csv = records_to_csv(&[&record]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), EXPORT_HEADER);
        assert_eq!(
            lines.next().unwrap(),
            r#""A","He said ""hi""","2023-01","1","fast load","positive""#
        );
    }

    #[test]
    fn test_multiple_requirements_align_by_index() {
        let record = Record {
            id: "0".to_string(),
            app: "A".to_string(),
            review: "r".to_string(),
            date: "2023-01".to_string(),
            requirements: vec![
                Requirement {
                    requirement: "fast load".to_string(),
                    sentiment: Sentiment::Positive,
                },
                Requirement {
                    requirement: "fewer ads".to_string(),
                    sentiment: Sentiment::Negative,
                },
            ],
        };

        let csv = records_to_csv(&[&record]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(r#""fast load; fewer ads""#));
        assert!(row.contains(r#""positive; negative""#));
        assert!(row.contains(r#""2""#));
    }

    #[test]
    fn test_export_file_name_is_filename_safe() {
        let now = Utc.with_ymd_and_hms(2023, 1, 5, 12, 30, 45).unwrap();
        let name = export_file_name(false, now);
        assert_eq!(name, "all_requirements_2023-01-05T12-30-45-000Z.csv");
        assert!(!name.contains(':'));

        let name = export_file_name(true, now);
        assert!(name.starts_with("filtered_requirements_"));
    }
}
