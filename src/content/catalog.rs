use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::error::{StageError, StageResult};

/// Key -> localized string lookup.
///
/// Keys are dotted paths (`sections.2.title`). Implementations decide where strings come from;
/// the resolver only relies on this contract.
pub trait Localizer {
    /// Localized string, or `None` when missing.
    fn text(&self, key: &str) -> Option<String>;

    /// Localized string list, or `None` when missing.
    fn list(&self, key: &str) -> Option<Vec<String>>;

    /// Pluralized string for `count`, with `{{count}}` interpolated.
    ///
    /// Looks up `key_one` when `count == 1` and `key_other` otherwise, then falls back to the bare
    /// key.
    fn plural(&self, key: &str, count: usize) -> Option<String> {
        let suffix = if count == 1 { "one" } else { "other" };
        let raw = self
            .text(&format!("{key}_{suffix}"))
            .or_else(|| self.text(key))?;
        Some(raw.replace("{{count}}", &count.to_string()))
    }
}

/// Localizer over one language's JSON resource tree.
///
/// ```json
/// { "sections": [ { "title": "Hello", "items": ["a", "b"] } ] }
/// ```
///
/// Arrays are addressable by index segment (`sections.0.title`).
#[derive(Clone, Debug, Default)]
pub struct JsonCatalog {
    language: String,
    root: serde_json::Value,
}

impl JsonCatalog {
    /// Wrap an already-parsed resource tree.
    pub fn new(language: impl Into<String>, root: serde_json::Value) -> StageResult<Self> {
        if !root.is_object() {
            return Err(StageError::validation(
                "localization catalog root must be a JSON object",
            ));
        }
        Ok(Self {
            language: language.into(),
            root,
        })
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json_str(language: impl Into<String>, s: &str) -> StageResult<Self> {
        let root: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| StageError::serde(format!("parse localization JSON: {e}")))?;
        Self::new(language, root)
    }

    /// Parse a catalog from a JSON file on disk.
    pub fn from_path(language: impl Into<String>, path: impl AsRef<Path>) -> StageResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StageError::validation(format!(
                "open localization JSON '{}': {e}",
                path.display()
            ))
        })?;
        let root: serde_json::Value = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| StageError::serde(format!("parse '{}': {e}", path.display())))?;
        Self::new(language, root)
    }

    /// Language tag the catalog was loaded for.
    pub fn language(&self) -> &str {
        &self.language
    }

    fn lookup(&self, key: &str) -> Option<&serde_json::Value> {
        key.split('.').try_fold(&self.root, |node, seg| match node {
            serde_json::Value::Object(map) => map.get(seg),
            serde_json::Value::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl Localizer for JsonCatalog {
    fn text(&self, key: &str) -> Option<String> {
        match self.lookup(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn list(&self, key: &str) -> Option<Vec<String>> {
        let items = self.lookup(key)?.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/catalog.rs"]
mod tests;
