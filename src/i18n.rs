//! Translation tables for user-facing text.
//!
//! A table is a nested YAML mapping addressed by dotted keys such as
//! `report.total_images`. Lookups that miss return the key itself so a
//! partial table still produces readable (if untranslated) output.
use crate::constants::DEFAULT_LANG_CODE;
use crate::error::{Result, SqueezeError};
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const EN_TABLE: &str = include_str!("../lang/en.yaml");
const ZH_TW_TABLE: &str = include_str!("../lang/zh-tw.yaml");

#[derive(Debug, Clone)]
pub struct Translator {
    lang_code: String,
    table: Value,
}

fn builtin_table(lang_code: &str) -> Option<&'static str> {
    match lang_code.to_lowercase().as_str() {
        "en" => Some(EN_TABLE),
        "zh-tw" => Some(ZH_TW_TABLE),
        _ => None,
    }
}

impl Translator {
    pub fn from_yaml(lang_code: &str, yaml: &str) -> Result<Self> {
        Ok(Self {
            lang_code: lang_code.to_string(),
            table: serde_yaml::from_str(yaml)?,
        })
    }

    /// A table with no entries; every lookup returns its key.
    pub fn empty(lang_code: &str) -> Self {
        Self {
            lang_code: lang_code.to_string(),
            table: Value::Null,
        }
    }

    /// The embedded table for `lang_code`, or English when there is none.
    pub fn builtin(lang_code: &str) -> Self {
        let (code, yaml) = match builtin_table(lang_code) {
            Some(yaml) => (lang_code, yaml),
            None => (DEFAULT_LANG_CODE, EN_TABLE),
        };
        Self::from_yaml(code, yaml).unwrap_or_else(|e| {
            warn!("Built-in language table '{}' is invalid: {}", code, e);
            Self::empty(code)
        })
    }

    /// Loads `<dir>/<lang_code>.yaml` if present, else the embedded table.
    pub fn load(lang_code: &str, dir: &Path) -> Self {
        let path = dir.join(format!("{}.yaml", lang_code));
        if path.is_file() {
            match fs::read_to_string(&path)
                .map_err(SqueezeError::from)
                .and_then(|yaml| Self::from_yaml(lang_code, &yaml))
            {
                Ok(tr) => {
                    debug!("Loaded language file {:?}", path);
                    return tr;
                }
                Err(e) => warn!("Ignoring language file {:?}: {}", path, e),
            }
        }

        if builtin_table(lang_code).is_none() {
            warn!(
                "Language '{}' not found, falling back to '{}'",
                lang_code, DEFAULT_LANG_CODE
            );
        }
        Self::builtin(lang_code)
    }

    pub fn lang_code(&self) -> &str {
        &self.lang_code
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let mut node = &self.table;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        match node {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Looks up `key`, returning the key itself when missing.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_else(|| key.to_string())
    }

    /// Looks up `key` and replaces each `{name}` placeholder.
    pub fn format<V: AsRef<str>>(&self, key: &str, args: &[(&str, V)]) -> String {
        let mut text = self.t(key);
        for (name, value) in args {
            text = text.replace(&format!("{{{}}}", name), value.as_ref());
        }
        text
    }
}
