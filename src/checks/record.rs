//! Record-shape checks: affected data and identifier lists

use std::collections::BTreeSet;

use crate::checks::Check;
use crate::config::RunConfig;
use crate::record::Record;

/// `affected` is present and non-empty unless the record is withdrawn
pub struct AffectedDataExists;

#[async_trait::async_trait]
impl Check for AffectedDataExists {
    async fn run(&self, record: &Record, _config: &RunConfig) -> Vec<String> {
        if !record.get("withdrawn").is_null() {
            return Vec::new();
        }
        let affected = record.get("affected");
        if affected.is_null() || affected.is_empty_array() {
            return vec!["Invalid Affected: affected field cannot be null or empty".to_string()];
        }
        Vec::new()
    }
}

/// `aliases` has no duplicates and does not name the record itself
pub struct ValidAliases;

#[async_trait::async_trait]
impl Check for ValidAliases {
    async fn run(&self, record: &Record, _config: &RunConfig) -> Vec<String> {
        identifier_list_findings(record, "aliases")
    }
}

/// `related` has no duplicates and does not name the record itself
pub struct ValidRelated;

#[async_trait::async_trait]
impl Check for ValidRelated {
    async fn run(&self, record: &Record, _config: &RunConfig) -> Vec<String> {
        identifier_list_findings(record, "related")
    }
}

/// `upstream` has no duplicates, does not name the record itself and shares
/// no entry with `aliases` or `related`
pub struct ValidUpstream;

#[async_trait::async_trait]
impl Check for ValidUpstream {
    async fn run(&self, record: &Record, _config: &RunConfig) -> Vec<String> {
        let mut findings = identifier_list_findings(record, "upstream");

        let upstream: BTreeSet<String> = record.get("upstream").strings().into_iter().collect();
        for other in ["aliases", "related"] {
            let shared: Vec<&String> = record
                .get(other)
                .strings()
                .iter()
                .filter_map(|entry| upstream.get(entry))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            if !shared.is_empty() {
                findings.push(format!("upstream entries also listed in {other}: {shared:?}"));
            }
        }
        findings
    }
}

/// At most one duplicate finding and one self-reference finding for `field`
fn identifier_list_findings(record: &Record, field: &str) -> Vec<String> {
    let entries = record.get(field).strings();
    let mut findings = Vec::new();

    let mut seen = BTreeSet::new();
    let duplicates: BTreeSet<&String> = entries
        .iter()
        .filter(|entry| !seen.insert(entry.as_str()))
        .collect();
    if !duplicates.is_empty() {
        findings.push(format!("{field} contains duplicate entries: {duplicates:?}"));
    }

    let id = record.id();
    if !id.is_empty() && entries.iter().any(|entry| entry == id) {
        findings.push(format!("{field} contains the record's own id {id:?}"));
    }

    findings
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
    #[case(r#"{"id": "CVE-2023-41045", "affected": [{"package": {"ecosystem": "PyPI", "name": "x"}}]}"#, 0)]
    #[case(r#"{"id": "SUSE-FU-2022:0444-1", "affected": []}"#, 1)]
    #[case(r#"{"id": "RHSA-2022:0216", "affected": null}"#, 1)]
    #[case(r#"{"id": "RHSA-2022:0216"}"#, 1)]
    #[case(r#"{"id": "GHSA-x", "withdrawn": "2024-01-01T00:00:00Z"}"#, 0)]
    #[case(r#"{"id": "GHSA-x", "withdrawn": "2024-01-01T00:00:00Z", "affected": []}"#, 0)]
    #[case(r#"{"id": "GHSA-x", "withdrawn": null, "affected": []}"#, 1)]
    #[tokio::test]
    async fn affected_data_exists_flags_missing_affected(#[case] json: &str, #[case] expected: usize) {
        let findings = run(&AffectedDataExists, json).await;

        assert_eq!(findings.len(), expected);
        if expected == 1 {
            assert_eq!(
                findings[0],
                "Invalid Affected: affected field cannot be null or empty"
            );
        }
    }

    #[tokio::test]
    async fn valid_aliases_reports_duplicate_and_self_reference_once_each() {
        let findings = run(
            &ValidAliases,
            r#"{"id": "CVE-2023-0001", "aliases": ["CVE-2023-0001", "GHSA-a", "CVE-2023-0001", "GHSA-a"]}"#,
        )
        .await;

        assert_eq!(
            findings,
            vec![
                r#"aliases contains duplicate entries: {"CVE-2023-0001", "GHSA-a"}"#.to_string(),
                r#"aliases contains the record's own id "CVE-2023-0001""#.to_string(),
            ]
        );
    }

    #[rstest]
    #[case(r#"["b", "a", "b", "a"]"#)]
    #[case(r#"["a", "a", "b", "b"]"#)]
    #[case(r#"["a", "b", "a", "b", "b"]"#)]
    #[tokio::test]
    async fn duplicate_detection_is_order_independent(#[case] related: &str) {
        let findings = run(
            &ValidRelated,
            &format!(r#"{{"id": "OSV-1", "related": {related}}}"#),
        )
        .await;

        assert_eq!(
            findings,
            vec![r#"related contains duplicate entries: {"a", "b"}"#.to_string()]
        );
    }

    #[rstest]
    #[case(r#"{"id": "OSV-1"}"#)]
    #[case(r#"{"id": "OSV-1", "aliases": null}"#)]
    #[case(r#"{"id": "OSV-1", "aliases": ["CVE-1", "GHSA-1"]}"#)]
    #[tokio::test]
    async fn valid_aliases_accepts_clean_lists(#[case] json: &str) {
        assert!(run(&ValidAliases, json).await.is_empty());
    }

    #[tokio::test]
    async fn valid_upstream_reports_every_violation() {
        let findings = run(
            &ValidUpstream,
            r#"{
                "id": "UBUNTU-1",
                "aliases": ["CVE-1"],
                "related": ["USN-1", "CVE-2"],
                "upstream": ["CVE-1", "CVE-2", "CVE-2", "UBUNTU-1", "USN-1"]
            }"#,
        )
        .await;

        assert_eq!(
            findings,
            vec![
                r#"upstream contains duplicate entries: {"CVE-2"}"#.to_string(),
                r#"upstream contains the record's own id "UBUNTU-1""#.to_string(),
                r#"upstream entries also listed in aliases: ["CVE-1"]"#.to_string(),
                r#"upstream entries also listed in related: ["CVE-2", "USN-1"]"#.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn valid_upstream_accepts_disjoint_lists() {
        let findings = run(
            &ValidUpstream,
            r#"{"id": "UBUNTU-1", "aliases": ["CVE-1"], "upstream": ["CVE-2"]}"#,
        )
        .await;

        assert!(findings.is_empty());
    }
}
