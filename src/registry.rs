//! The sheet name registry.
//!
//! Tag invocations identify a spreadsheet by a human-readable name which is
//! mapped to the actual Google spreadsheet key here. Only registered names
//! resolve, so wiki content can never smuggle in a spreadsheet key of its own.

use crate::{Error, Result};
use std::collections::HashMap;

/// Sheets that ship with the deployment.
static BUILT_IN: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "SBMLLevel3Packages" => "0ApbKgxVhXxVydG15WXlIT0JacHhwc0FPemV6bE1aQXc",
};

/// A map from human-readable sheet names to Google spreadsheet keys.
///
/// Names registered at run time shadow the built-in table.
#[derive(Clone, Debug, Default)]
pub struct SheetRegistry {
    /// Names added on top of the built-in table.
    extra: HashMap<String, String>,
}

impl SheetRegistry {
    /// Creates a registry containing only the built-in sheets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from a JSON object of name-to-key mappings, layered
    /// over the built-in sheets.
    pub fn from_json(json: &str) -> Result<Self> {
        let extra = serde_json::from_str::<HashMap<String, String>>(json)
            .map_err(Error::Registry)?;
        Ok(Self { extra })
    }

    /// Registers a sheet name.
    pub fn register(&mut self, name: impl Into<String>, key: impl Into<String>) {
        self.extra.insert(name.into(), key.into());
    }

    /// Resolves a sheet name to its spreadsheet key.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.extra
            .get(name)
            .map(String::as_str)
            .or_else(|| BUILT_IN.get(name).copied())
    }
}
