use crate::utils::error::{DocsError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const BACKENDS_KEY: &str = "backends";
pub const CONTRACTS_KEY: &str = "contracts";
pub const SPECS_KEY: &str = "specs";

/// The parsed data file.
///
/// Only JSON validity is checked when a document is built. A missing
/// `backends`, `contracts` or `specs` key surfaces when a page asks for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DataDocument {
    root: Value,
}

impl DataDocument {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content).map(Self::new)
    }

    pub fn from_json_slice(content: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_slice(content).map(Self::new)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Looks up `identifier` in the `backends` mapping.
    pub fn backend(&self, identifier: &str) -> Result<&Value> {
        self.root
            .get(BACKENDS_KEY)
            .and_then(|backends| backends.get(identifier))
            .ok_or_else(|| DocsError::UnknownBackend {
                identifier: identifier.to_string(),
            })
    }

    pub fn contracts(&self) -> Result<&[Value]> {
        let value = self
            .root
            .get(CONTRACTS_KEY)
            .ok_or(DocsError::UnknownContractsKey)?;
        as_sequence(CONTRACTS_KEY, value)
    }

    pub fn specs(&self) -> Result<&[Value]> {
        let value = self.root.get(SPECS_KEY).ok_or(DocsError::UnknownSpecsKey)?;
        as_sequence(SPECS_KEY, value)
    }
}

fn as_sequence<'a>(key: &str, value: &'a Value) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| DocsError::InvalidEntry {
            kind: key.to_string(),
            key: key.to_string(),
            message: format!("expected an array, found {}", json_type_name(value)),
        })
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One documentation page handed to the preprocessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub name: String,
    pub markdown: String,
}

impl Page {
    pub fn new(name: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markdown: markdown.into(),
        }
    }
}

/// A marker found in page markdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    Backend(String),
    Contracts,
    Specs,
}

impl Marker {
    pub const BACKEND_PREFIX: &'static str = "!!! backend:";
    pub const CONTRACTS: &'static str = "!!! contracts";
    pub const SPECS: &'static str = "!!! specs";

    /// The exact text replaced by the rendered fragment.
    pub fn text(&self) -> String {
        match self {
            Marker::Backend(identifier) => format!("{}{}", Self::BACKEND_PREFIX, identifier),
            Marker::Contracts => Self::CONTRACTS.to_string(),
            Marker::Specs => Self::SPECS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendEntry {
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default, alias = "docstring")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractEntry {
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default, alias = "docstring")]
    pub description: Option<String>,
    #[serde(default)]
    pub columns: Vec<ContractColumn>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractColumn {
    pub name: String,
    #[serde(default, rename = "type")]
    pub column_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sections: Vec<SpecSection>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecSection {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deserializes one entry, reporting shape problems as [`DocsError::InvalidEntry`].
pub fn parse_entry<T: DeserializeOwned>(kind: &str, key: &str, value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|e| DocsError::InvalidEntry {
        kind: kind.to_string(),
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_sections_surface_on_lookup() {
        let doc = DataDocument::new(json!({"backends": {}}));

        assert!(matches!(
            doc.backend("concepts.Patients"),
            Err(DocsError::UnknownBackend { identifier }) if identifier == "concepts.Patients"
        ));
        assert!(matches!(doc.contracts(), Err(DocsError::UnknownContractsKey)));
        assert!(matches!(doc.specs(), Err(DocsError::UnknownSpecsKey)));
    }

    #[test]
    fn test_non_object_root_has_no_backends() {
        let doc = DataDocument::from_json_str("[1, 2, 3]").unwrap();
        assert!(matches!(doc.backend("x"), Err(DocsError::UnknownBackend { .. })));
    }

    #[test]
    fn test_contracts_must_be_an_array() {
        let doc = DataDocument::new(json!({"contracts": {"a": 1}}));
        let err = doc.contracts().unwrap_err();
        assert!(matches!(err, DocsError::InvalidEntry { ref message, .. } if message.contains("an object")));
    }

    #[test]
    fn test_backend_entry_aliases_and_extra_order() {
        let value = json!({
            "title": "Patients",
            "docstring": "A patient cohort.",
            "zeta": 1,
            "alpha": 2
        });
        let entry: BackendEntry = parse_entry("backend", "concepts.Patients", &value).unwrap();

        assert_eq!(entry.name, "Patients");
        assert_eq!(entry.description.as_deref(), Some("A patient cohort."));
        let keys: Vec<&str> = entry.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_entry_without_name_is_invalid() {
        let err = parse_entry::<ContractEntry>("contract", "0", &json!({"description": "x"}))
            .unwrap_err();
        assert!(matches!(err, DocsError::InvalidEntry { kind, key, .. } if kind == "contract" && key == "0"));
    }

    #[test]
    fn test_marker_text() {
        assert_eq!(
            Marker::Backend("concepts.Patients".to_string()).text(),
            "!!! backend:concepts.Patients"
        );
        assert_eq!(Marker::Contracts.text(), "!!! contracts");
        assert_eq!(Marker::Specs.text(), "!!! specs");
    }
}
