use crate::domain::analysis::Distribution;
use crate::domain::record::Record;

/// One plotted point: a category name and its count.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub name: String,
    pub value: u64,
}

/// Reshapes a `category -> count` aggregate into the list the chart
/// widgets draw, in the aggregate's own order.
pub fn distribution_points(distribution: &Distribution) -> Vec<ChartPoint> {
    distribution
        .iter()
        .map(|(name, value)| ChartPoint {
            name: name.clone(),
            value: *value,
        })
        .collect()
}

/// Ranks requirements across all records by occurrence count. Each
/// requirement string is trimmed and lower-cased first so casing and
/// stray whitespace collapse into one bucket; ties keep the order the
/// requirements were first encountered in.
pub fn top_requirements(records: &[Record], limit: usize) -> Vec<ChartPoint> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for record in records {
        for req in &record.requirements {
            let normalized = req.requirement.trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }
            match counts.iter_mut().find(|(name, _)| *name == normalized) {
                Some((_, count)) => *count += 1,
                None => counts.push((normalized, 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1)); // stable: ties keep insertion order
    counts
        .into_iter()
        .take(limit)
        .map(|(name, value)| ChartPoint { name, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{Requirement, Sentiment};

    fn record_with(reqs: &[&str]) -> Record {
        Record {
            id: "0".to_string(),
            app: "A".to_string(),
            review: String::new(),
            date: "2023-01".to_string(),
            requirements: reqs
                .iter()
                .map(|r| Requirement {
                    requirement: r.to_string(),
                    sentiment: Sentiment::Neutral,
                })
                .collect(),
        }
    }

    #[test]
    fn test_points_follow_distribution_order() {
        let dist = Distribution::from([("march", 4), ("january", 9), ("february", 2)]);
        let points = distribution_points(&dist);
        let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["march", "january", "february"]);
        assert_eq!(points[1].value, 9);
    }

    #[test]
    fn test_top_requirements_normalizes_and_ranks() {
        let records = vec![
            record_with(&["Fast Load", "slow ui"]),
            record_with(&["fast load ", "fast load"]),
        ];
        let top = top_requirements(&records, 5);
        assert_eq!(
            top,
            vec![
                ChartPoint {
                    name: "fast load".to_string(),
                    value: 3
                },
                ChartPoint {
                    name: "slow ui".to_string(),
                    value: 1
                },
            ]
        );
    }

    #[test]
    fn test_top_requirements_truncates_and_breaks_ties_by_first_seen() {
        let records = vec![record_with(&["a", "b", "c", "d", "e", "f", "b"])];
        let top = top_requirements(&records, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].name, "b");
        // Remaining singletons keep first-encountered order.
        let rest: Vec<&str> = top[1..].iter().map(|p| p.name.as_str()).collect();
        assert_eq!(rest, vec!["a", "c", "d", "e"]);
    }
}
