//! Read-only, path-addressable view over a parsed OSV record
//!
//! Paths are dot separated; numeric segments index into arrays
//! (`"affected.0.package.name"`). Lookups never fail: a missing path yields a
//! [`Field`] whose [`Field::exists`] is false.

use serde_json::Value;

/// Error raised when the input bytes are not a JSON document
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid JSON: {0}")]
    MalformedDocument(#[from] serde_json::Error),
}

/// One parsed advisory record
#[derive(Debug, Clone)]
pub struct Record {
    raw: String,
    root: Value,
}

impl Record {
    /// Parses `bytes` as a JSON document
    pub fn parse(bytes: &[u8]) -> Result<Self, RecordError> {
        let root = serde_json::from_slice(bytes)?;
        Ok(Self {
            raw: String::from_utf8_lossy(bytes).into_owned(),
            root,
        })
    }

    /// Parses `bytes`, falling back to an empty record when they are not JSON.
    ///
    /// The raw text is kept either way so schema validation still sees the
    /// original input.
    pub fn parse_lossy(bytes: &[u8]) -> (Self, Option<RecordError>) {
        match Self::parse(bytes) {
            Ok(record) => (record, None),
            Err(e) => (
                Self {
                    raw: String::from_utf8_lossy(bytes).into_owned(),
                    root: Value::Null,
                },
                Some(e),
            ),
        }
    }

    /// Original document text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Structured document root
    pub fn value(&self) -> &Value {
        &self.root
    }

    /// Looks up `path` from the document root
    pub fn get(&self, path: &str) -> Field<'_> {
        Field::new(Some(&self.root)).get(path)
    }

    /// The record's `id`, or an empty string when absent
    pub fn id(&self) -> &str {
        self.get("id").as_str().unwrap_or_default()
    }
}

impl std::str::FromStr for Record {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.as_bytes())
    }
}

/// Result of a path lookup: present-or-absent plus the typed value
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    value: Option<&'a Value>,
}

impl<'a> Field<'a> {
    fn new(value: Option<&'a Value>) -> Self {
        Self { value }
    }

    /// Whether the path resolved to a value (an explicit `null` counts)
    pub fn exists(&self) -> bool {
        self.value.is_some()
    }

    /// Whether the path is absent or holds `null`
    pub fn is_null(&self) -> bool {
        matches!(self.value, None | Some(Value::Null))
    }

    /// Whether the value is an array with no elements
    pub fn is_empty_array(&self) -> bool {
        matches!(self.value, Some(Value::Array(items)) if items.is_empty())
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.value.and_then(Value::as_str)
    }

    /// Text form of the value: strings unquoted, other values as compact JSON,
    /// absent paths as an empty string
    pub fn to_text(&self) -> String {
        match self.value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Looks up `path` relative to this field
    pub fn get(&self, path: &str) -> Field<'a> {
        let mut current = self.value;
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            current = match current {
                Some(Value::Object(map)) => map.get(segment),
                Some(Value::Array(items)) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index)),
                _ => None,
            };
        }
        Field::new(current)
    }

    /// Iterates array elements; yields nothing for non-arrays.
    ///
    /// Stop early with the usual iterator adaptors (`any`, `find`, `take_while`).
    pub fn iter(self) -> impl Iterator<Item = Field<'a>> + 'a {
        let items: &'a [Value] = match self.value {
            Some(Value::Array(items)) => items,
            _ => &[],
        };
        items.iter().map(|v| Field::new(Some(v)))
    }

    /// Text form of every array element
    pub fn strings(&self) -> Vec<String> {
        self.iter().map(|f| f.to_text()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record() -> Record {
        r#"{
            "id": "GHSA-xxxx",
            "aliases": ["CVE-2023-0001"],
            "withdrawn": null,
            "affected": [
                {"package": {"ecosystem": "PyPI", "name": "django"}, "versions": ["1.0", 2]},
                {"ranges": [{"type": "GIT", "events": [{"introduced": "0"}]}]}
            ]
        }"#
        .parse()
        .unwrap()
    }

    #[rstest]
    #[case("id", true)]
    #[case("affected.0.package.name", true)]
    #[case("affected.1.ranges.0.events.0.introduced", true)]
    #[case("affected.2", false)]
    #[case("affected.first", false)]
    #[case("withdrawn", true)]
    #[case("summary", false)]
    #[case("id.nested", false)]
    fn get_reports_existence(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(record().get(path).exists(), expected);
    }

    #[test]
    fn explicit_null_exists_but_is_null() {
        let record = record();
        let withdrawn = record.get("withdrawn");
        assert!(withdrawn.exists());
        assert!(withdrawn.is_null());
    }

    #[test]
    fn nested_get_matches_full_path() {
        let record = record();
        let entry = record.get("affected.0");
        assert_eq!(entry.get("package.ecosystem").as_str(), Some("PyPI"));
        assert_eq!(record.id(), "GHSA-xxxx");
    }

    #[test]
    fn strings_renders_non_string_elements_as_json() {
        assert_eq!(record().get("affected.0.versions").strings(), vec!["1.0", "2"]);
    }

    #[test]
    fn iter_over_non_array_is_empty() {
        assert_eq!(record().get("id").iter().count(), 0);
        assert_eq!(record().get("missing").iter().count(), 0);
    }

    #[test]
    fn iter_supports_early_stop() {
        let record = record();
        let with_package = record
            .get("affected")
            .iter()
            .position(|entry| !entry.get("package").exists());
        assert_eq!(with_package, Some(1));
    }

    #[test]
    fn parse_lossy_keeps_raw_text_for_invalid_json() {
        let (record, err) = Record::parse_lossy(b"{\"id\": ");
        assert!(matches!(err, Some(RecordError::MalformedDocument(_))));
        assert_eq!(record.raw(), "{\"id\": ");
        assert!(!record.get("id").exists());
    }
}
