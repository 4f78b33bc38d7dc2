use std::{fs::File, io::Read, path::Path};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{StatementParseError, StatementResult};

/// Canonical payee names mapped to the textual variations they appear under
/// in narrations.
///
/// Loaded from a JSON object such as
///
/// ```json
/// { "ACME Corporation": ["ACME Corporation", "ACME Inc.", "ACME"] }
/// ```
///
/// Document order is kept: entries and their variations are tried in the
/// order they were written, and the first hit wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayeeRegistry(IndexMap<String, Vec<String>>);

impl PayeeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> StatementResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            StatementParseError::RegistryUnavailable(format!("{}: {}", path.display(), e))
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl Read) -> StatementResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| StatementParseError::RegistryUnavailable(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> StatementResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| StatementParseError::RegistryUnavailable(e.to_string()))
    }

    /// Append a payee, or replace its variations in place if already known.
    pub fn insert<I>(&mut self, canonical: impl Into<String>, variations: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.0.insert(
            canonical.into(),
            variations.into_iter().map(Into::into).collect(),
        );
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for PayeeRegistry
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut registry = Self::new();
        for (canonical, variations) in iter {
            registry.insert(canonical, variations);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn testdata(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
    }

    #[test]
    fn test_load_from_file() {
        let registry = PayeeRegistry::load(testdata("known_payees.json")).unwrap();

        assert!(!registry.is_empty());
        let (canonical, variations) = registry.iter().next().unwrap();
        assert_eq!(canonical, "ACME Corporation");
        assert_eq!(variations[0], "ACME Corporation");
    }

    #[test]
    fn test_load_missing_file() {
        let result = PayeeRegistry::load(testdata("does_not_exist.json"));

        match result.unwrap_err() {
            StatementParseError::RegistryUnavailable(reason) => {
                assert!(reason.contains("does_not_exist.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case("")]
    #[case("not json")]
    #[case(r#"["ACME"]"#)]
    #[case(r#"{"ACME Corporation": "ACME"}"#)]
    #[case(r#"{"ACME Corporation": [1, 2]}"#)]
    fn test_malformed_source(#[case] content: &str) {
        let result = PayeeRegistry::from_json_str(content);
        assert!(matches!(
            result,
            Err(StatementParseError::RegistryUnavailable(_))
        ));
    }

    #[test]
    fn test_insertion_order_is_document_order() {
        let registry = PayeeRegistry::from_json_str(
            r#"{"Zebra Versand": ["Zebra"], "ACME Corporation": ["ACME"], "Mitte GmbH": ["Mitte"]}"#,
        )
        .unwrap();

        let names: Vec<_> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Zebra Versand", "ACME Corporation", "Mitte GmbH"]);
    }

    #[test]
    fn test_from_iter_and_reinsert_keeps_position() {
        let mut registry: PayeeRegistry =
            [("A", vec!["a"]), ("B", vec!["b"])].into_iter().collect();
        registry.insert("A", ["alpha"]);

        let entries: Vec<_> = registry.iter().collect();
        assert_eq!(registry.len(), 2);
        assert_eq!(entries[0].0, "A");
        assert_eq!(entries[0].1, ["alpha".to_string()]);
    }

    #[test]
    fn test_registry_serialization() {
        let registry: PayeeRegistry = [("ACME Corporation", ["ACME"])].into_iter().collect();

        let json = serde_json::to_string(&registry).unwrap();
        assert_eq!(json, r#"{"ACME Corporation":["ACME"]}"#);

        let deserialized = PayeeRegistry::from_json_str(&json).unwrap();
        assert_eq!(deserialized, registry);
    }
}
