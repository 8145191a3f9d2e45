//! Detail modal filled from a keyed lookup table

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::EffectsError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModalContent {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub link: Option<String>,
}

/// Key → content table, built once at startup
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ModalCatalog {
    entries: BTreeMap<String, ModalContent>,
}

impl ModalCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A JSON object of `key: { title, description, tags, link }`
    pub fn from_json(json: &str) -> Result<Self, EffectsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, key: impl Into<String>, content: ModalContent) {
        self.entries.insert(key.into(), content);
    }

    pub fn get(&self, key: &str) -> Option<&ModalContent> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Modal dialog showing at most one catalog entry
#[derive(Clone, Debug, Default)]
pub struct Modal {
    catalog: ModalCatalog,
    open: Option<String>,
}

impl Modal {
    pub fn new(catalog: ModalCatalog) -> Self {
        Self {
            catalog,
            open: None,
        }
    }

    /// Show the entry for `key`; an unknown key leaves the modal as it was
    pub fn open(&mut self, key: &str) -> Result<&ModalContent, EffectsError> {
        if self.catalog.get(key).is_none() {
            log::warn!("modal requested for unknown entry `{key}`");
            return Err(EffectsError::UnknownEntry(key.to_string()));
        }
        self.open = Some(key.to_string());
        self.content()
            .ok_or_else(|| EffectsError::UnknownEntry(key.to_string()))
    }

    pub fn catalog(&self) -> &ModalCatalog {
        &self.catalog
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn content(&self) -> Option<&ModalContent> {
        self.open.as_deref().and_then(|key| self.catalog.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "particles": {
            "title": "Particle Background",
            "description": "Canvas constellation with linked neighbours.",
            "tags": ["rust", "wgpu"],
            "link": "https://example.com/particles"
        },
        "typewriter": { "title": "Typewriter" }
    }"#;

    #[test]
    fn test_catalog_from_json() {
        let catalog = ModalCatalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["particles", "typewriter"]);
        let tw = catalog.get("typewriter").unwrap();
        assert!(tw.tags.is_empty());
        assert_eq!(tw.link, None);
    }

    #[test]
    fn test_open_and_close() {
        let mut modal = Modal::new(ModalCatalog::from_json(CATALOG).unwrap());
        assert!(!modal.is_open());

        let content = modal.open("particles").unwrap();
        assert_eq!(content.title, "Particle Background");
        assert_eq!(content.tags, vec!["rust", "wgpu"]);
        assert!(modal.is_open());

        modal.close();
        assert!(modal.content().is_none());
    }

    #[test]
    fn test_unknown_key_keeps_current_entry() {
        let mut modal = Modal::new(ModalCatalog::from_json(CATALOG).unwrap());
        modal.open("typewriter").unwrap();
        assert!(matches!(
            modal.open("missing"),
            Err(EffectsError::UnknownEntry(key)) if key == "missing"
        ));
        assert_eq!(modal.content().unwrap().title, "Typewriter");
    }
}
