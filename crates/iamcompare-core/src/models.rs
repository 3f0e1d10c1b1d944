//! The models table: one entry per model family, used to order and colour the figures.

use crate::config::Palette;
use crate::meta::MetaTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Colour used when a palette is empty
const FALLBACK_COLOR: &str = "#888";

/// A model family as it appears in the comparison figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub model_type: String,
    pub stripped_model: String,
    /// First model version of this family in the meta table
    pub full_model: String,
    /// Ordinal position, used as the y coordinate in the comparison panels
    pub i: usize,
    pub color: String,
}

/// Model families ordered by (type, name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsTable {
    entries: Vec<ModelEntry>,
}

impl ModelsTable {
    /// Group the meta table by (model type, model family).
    ///
    /// Colours are taken from `palette` in order. If there are more families than colours the
    /// palette is reused and a warning is emitted.
    pub fn create(meta: &MetaTable, palette: &Palette) -> Self {
        let mut groups: BTreeMap<(&str, &str), &str> = BTreeMap::new();
        for row in meta.rows() {
            groups
                .entry((row.model_type.as_str(), row.stripped_model.as_str()))
                .or_insert(row.model.as_str());
        }

        if groups.len() > palette.len() {
            warn!(
                models = groups.len(),
                colors = palette.len(),
                "Not enough colours for all models, colours will be repeated"
            );
        }

        let entries = groups
            .into_iter()
            .enumerate()
            .map(|(i, ((model_type, stripped_model), full_model))| ModelEntry {
                model_type: model_type.to_string(),
                stripped_model: stripped_model.to_string(),
                full_model: full_model.to_string(),
                i,
                color: palette.color(i).unwrap_or(FALLBACK_COLOR).to_string(),
            })
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: Vec<ModelEntry>) -> Self {
        Self { entries }
    }

    /// Drop the families whose full model name contains `pattern` and renumber the rest.
    pub fn excluding(&self, pattern: &str) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|entry| !entry.full_model.contains(pattern))
            .enumerate()
            .map(|(i, entry)| ModelEntry {
                i,
                ..entry.clone()
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelEntry> {
        self.entries.iter()
    }

    /// Entry for a model family
    pub fn get(&self, stripped_model: &str) -> Option<&ModelEntry> {
        self.entries
            .iter()
            .find(|entry| entry.stripped_model == stripped_model)
    }

    pub fn contains(&self, stripped_model: &str) -> bool {
        self.get(stripped_model).is_some()
    }

    /// Largest ordinal index
    pub fn max_index(&self) -> Option<usize> {
        self.entries.iter().map(|entry| entry.i).max()
    }

    /// Entries grouped by model type
    pub fn by_type(&self) -> BTreeMap<&str, Vec<&ModelEntry>> {
        let mut groups: BTreeMap<&str, Vec<&ModelEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups
                .entry(entry.model_type.as_str())
                .or_default()
                .push(entry);
        }
        groups
    }
}
