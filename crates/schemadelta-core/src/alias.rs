//! Known module and model renames/merges between two schema versions.
//!
//! Lookups never fail: an identifier without an entry maps to itself.

use crate::errors::DeltaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four alias tables plus the derived reverse rename table.
///
/// Deserializes from TOML or JSON; every table is optional:
///
/// ```toml
/// [renamed_modules]
/// account_voucher = "account"
///
/// [merged_models]
/// "sale.config.settings" = "res.config.settings"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "AliasTables", into = "AliasTables")]
pub struct AliasMap {
    renamed_modules: BTreeMap<String, String>,
    merged_modules: BTreeMap<String, String>,
    renamed_models: BTreeMap<String, String>,
    merged_models: BTreeMap<String, String>,
    inv_renamed_models: BTreeMap<String, String>,
}

/// Wire shape of an alias configuration file.
///
/// Tables are read in key order, so for a file the reverse rename of an
/// ambiguous target resolves to the lexicographically last prior model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct AliasTables {
    renamed_modules: BTreeMap<String, String>,
    merged_modules: BTreeMap<String, String>,
    renamed_models: BTreeMap<String, String>,
    merged_models: BTreeMap<String, String>,
}

impl From<AliasTables> for AliasMap {
    fn from(tables: AliasTables) -> Self {
        let mut map = AliasMap::default();
        for (old, new) in tables.renamed_modules {
            map = map.rename_module(old, new);
        }
        for (old, new) in tables.merged_modules {
            map = map.merge_module(old, new);
        }
        for (old, new) in tables.renamed_models {
            map = map.rename_model(old, new);
        }
        for (old, new) in tables.merged_models {
            map = map.merge_model(old, new);
        }
        map
    }
}

impl From<AliasMap> for AliasTables {
    fn from(map: AliasMap) -> Self {
        AliasTables {
            renamed_modules: map.renamed_modules,
            merged_modules: map.merged_modules,
            renamed_models: map.renamed_models,
            merged_models: map.merged_models,
        }
    }
}

impl AliasMap {
    /// Identity mapping: no aliasing known.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename_module(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.renamed_modules.insert(old.into(), new.into());
        self
    }

    pub fn merge_module(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.merged_modules.insert(old.into(), new.into());
        self
    }

    /// Register a model rename. The reverse table follows insertion order, so
    /// when two prior models are renamed to the same target the later one wins.
    pub fn rename_model(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        let (old, new) = (old.into(), new.into());
        if let Some(previous) = self.renamed_models.insert(old.clone(), new.clone()) {
            if self.inv_renamed_models.get(&previous) == Some(&old) {
                self.inv_renamed_models.remove(&previous);
            }
        }
        self.inv_renamed_models.insert(new, old);
        self
    }

    pub fn merge_model(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.merged_models.insert(old.into(), new.into());
        self
    }

    /// Parse a TOML alias configuration.
    ///
    /// # Errors
    ///
    /// `InvalidAliasConfig` when the document is not valid TOML or has
    /// unexpected tables.
    pub fn from_toml_str(text: &str) -> Result<Self, DeltaError> {
        toml::from_str(text).map_err(|e| DeltaError::InvalidAliasConfig {
            format: "toml".to_string(),
            reason: e.to_string(),
        })
    }

    /// Parse a JSON alias configuration.
    ///
    /// # Errors
    ///
    /// `InvalidAliasConfig` when the document is not valid JSON or has
    /// unexpected keys.
    pub fn from_json_str(text: &str) -> Result<Self, DeltaError> {
        serde_json::from_str(text).map_err(|e| DeltaError::InvalidAliasConfig {
            format: "json".to_string(),
            reason: e.to_string(),
        })
    }

    /// Renamed target, else merged target, else the module itself.
    pub fn module_map<'a>(&'a self, module: &'a str) -> &'a str {
        self.renamed_modules
            .get(module)
            .or_else(|| self.merged_modules.get(module))
            .map_or(module, String::as_str)
    }

    /// Renamed target, else merged target, else the model itself.
    pub fn model_map<'a>(&'a self, model: &'a str) -> &'a str {
        self.renamed_models
            .get(model)
            .or_else(|| self.merged_models.get(model))
            .map_or(model, String::as_str)
    }

    /// Strict rename only; merges are ignored.
    pub fn model_rename_map<'a>(&'a self, model: &'a str) -> &'a str {
        self.renamed_models.get(model).map_or(model, String::as_str)
    }

    /// Prior name of a renamed model, else the model itself.
    pub fn inv_model_map<'a>(&'a self, model: &'a str) -> &'a str {
        self.inv_renamed_models
            .get(model)
            .map_or(model, String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.renamed_modules.is_empty()
            && self.merged_modules.is_empty()
            && self.renamed_models.is_empty()
            && self.merged_models.is_empty()
    }
}
