//! Range checks over `affected[].ranges[]`

use indexmap::IndexSet;

use crate::checks::Check;
use crate::config::RunConfig;
use crate::record::{Field, Record};

const GIT_RANGE: &str = "GIT";

/// Every range with events has at least one `introduced` event
pub struct IntroducedEventExists;

#[async_trait::async_trait]
impl Check for IntroducedEventExists {
    async fn run(&self, record: &Record, _config: &RunConfig) -> Vec<String> {
        let lacks_introduced = ranges(record).any(|range| {
            let mut events = range.get("events").iter().peekable();
            events.peek().is_some() && !events.any(|event| event.get("introduced").exists())
        });

        if lacks_introduced {
            vec!["missing 'introduced' object in event".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Ranges have the right type for their entry and never start and end at
/// the same version or commit
pub struct RangeIsDistinct;

#[async_trait::async_trait]
impl Check for RangeIsDistinct {
    async fn run(&self, record: &Record, _config: &RunConfig) -> Vec<String> {
        let mut findings = Vec::new();

        for entry in record.get("affected").iter() {
            let is_package = entry.get("package").exists();

            for range in entry.get("ranges").iter() {
                let range_type = range.get("type").to_text();
                if is_package == (range_type == GIT_RANGE) {
                    findings.push(format!(
                        "unexpected range type {range_type:?} for {}",
                        range.to_text()
                    ));
                }

                let events = range.get("events");
                let introduced: IndexSet<String> = events
                    .iter()
                    .map(|event| event.get("introduced"))
                    .filter(Field::exists)
                    .map(|field| field.to_text())
                    .collect();
                // last_affected may equal introduced for a single affected version
                let fixed: IndexSet<String> = events
                    .iter()
                    .map(|event| event.get("fixed"))
                    .filter(Field::exists)
                    .map(|field| field.to_text())
                    .collect();

                findings.extend(
                    fixed
                        .iter()
                        .filter(|value| introduced.contains(*value))
                        .map(|value| format!("overlapping event: {value:?}")),
                );
            }
        }

        findings
    }
}

fn ranges(record: &Record) -> impl Iterator<Item = Field<'_>> {
    record
        .get("affected")
        .iter()
        .flat_map(|entry| entry.get("ranges").iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    async fn run(check: &dyn Check, json: &str) -> Vec<String> {
        let record: Record = json.parse().unwrap();
        check.run(&record, &RunConfig::default()).await
    }

    #[rstest]
    #[case::no_affected(r#"{"id": "OSV-1"}"#, 0)]
    #[case::no_ranges(r#"{"affected": [{"package": {"ecosystem": "npm", "name": "a"}, "versions": ["1.0.0"]}]}"#, 0)]
    #[case::introduced_present(r#"{"affected": [{"ranges": [{"type": "SEMVER", "events": [{"introduced": "0"}, {"fixed": "2.0.0"}]}]}]}"#, 0)]
    #[case::fixed_only(r#"{"affected": [{"ranges": [{"type": "SEMVER", "events": [{"fixed": "2.0.0"}]}]}]}"#, 1)]
    #[case::empty_events(r#"{"affected": [{"ranges": [{"type": "SEMVER", "events": []}]}]}"#, 0)]
    #[case::one_bad_range_among_good(r#"{"affected": [
        {"ranges": [{"type": "SEMVER", "events": [{"introduced": "1.0.0"}]}]},
        {"ranges": [{"type": "SEMVER", "events": [{"fixed": "3.0.0"}]}, {"type": "SEMVER", "events": [{"last_affected": "4.0.0"}]}]}
    ]}"#, 1)]
    #[tokio::test]
    async fn introduced_event_exists_reports_once_per_document(
        #[case] json: &str,
        #[case] expected: usize,
    ) {
        let findings = run(&IntroducedEventExists, json).await;

        assert_eq!(findings.len(), expected);
        if expected == 1 {
            assert_eq!(findings[0], "missing 'introduced' object in event");
        }
    }

    #[tokio::test]
    async fn range_is_distinct_reports_each_overlapping_value_once() {
        let findings = run(
            &RangeIsDistinct,
            r#"{"affected": [{
                "package": {"ecosystem": "PyPI", "name": "a"},
                "ranges": [{"type": "ECOSYSTEM", "events": [
                    {"introduced": "1.0"}, {"fixed": "1.0"},
                    {"introduced": "2.0"}, {"fixed": "2.0"}, {"fixed": "2.0"},
                    {"introduced": "3.0"}, {"last_affected": "3.0"}
                ]}]
            }]}"#,
        )
        .await;

        assert_eq!(
            findings,
            vec![
                r#"overlapping event: "1.0""#.to_string(),
                r#"overlapping event: "2.0""#.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn range_is_distinct_accepts_disjoint_events() {
        let findings = run(
            &RangeIsDistinct,
            r#"{"affected": [
                {"package": {"ecosystem": "npm", "name": "a"},
                 "ranges": [{"type": "SEMVER", "events": [{"introduced": "0"}, {"fixed": "1.2.3"}]}]},
                {"ranges": [{"type": "GIT", "repo": "https://github.com/a/a", "events": [{"introduced": "abc"}, {"fixed": "def"}]}]}
            ]}"#,
        )
        .await;

        assert!(findings.is_empty());
    }

    #[rstest]
    #[case::git_range_for_package(true, "GIT")]
    #[case::semver_range_without_package(false, "SEMVER")]
    #[tokio::test]
    async fn range_is_distinct_rejects_mismatched_range_types(
        #[case] with_package: bool,
        #[case] range_type: &str,
    ) {
        let range = serde_json::json!({"type": range_type, "events": [{"introduced": "1.0.0"}]});
        let mut entry = serde_json::json!({"ranges": [range.clone()]});
        if with_package {
            entry["package"] = serde_json::json!({"ecosystem": "npm", "name": "a"});
        }
        let json = serde_json::json!({"affected": [entry]}).to_string();

        assert_eq!(
            run(&RangeIsDistinct, &json).await,
            vec![format!("unexpected range type {range_type:?} for {range}")]
        );
    }
}
