//! TOML catalogs of generated layouts.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::descriptor::{LayoutDescriptor, RawLayoutBuf};
use crate::error::LayoutError;

/// Errors raised while loading a layout catalog.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed to read layout catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse layout catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("layout `{name}` is invalid: {source}")]
    InvalidLayout {
        name: String,
        #[source]
        source: LayoutError,
    },

    #[error("layout `{0}` is declared more than once")]
    DuplicateLayout(String),
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    layouts: Vec<LayoutEntry>,
}

/// One `[[layouts]]` table as written by the generator.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutEntry {
    pub name: String,
    #[serde(default)]
    pub field_count: Option<u32>,
    pub wire_length: u32,
    pub host_size: u32,
    pub wire_ranges: Vec<[u32; 2]>,
    pub host_ranges: Vec<[u32; 2]>,
}

impl LayoutEntry {
    fn to_raw(&self) -> RawLayoutBuf {
        RawLayoutBuf {
            field_count: self.field_count.unwrap_or(self.wire_ranges.len() as u32),
            wire_length: self.wire_length,
            host_size: self.host_size,
            wire_ranges: self.wire_ranges.concat(),
            host_ranges: self.host_ranges.concat(),
        }
    }
}

/// Validated layouts keyed by record name.
#[derive(Debug, Clone, Default)]
pub struct LayoutCatalog {
    layouts: BTreeMap<String, LayoutDescriptor>,
}

impl LayoutCatalog {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_toml_str(&content)?;
        log::info!("loaded {} layouts from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parses a catalog and validates every layout in it.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;

        let mut layouts = BTreeMap::new();
        for entry in file.layouts {
            let descriptor = LayoutDescriptor::new(&entry.to_raw().as_raw()).map_err(|source| {
                CatalogError::InvalidLayout {
                    name: entry.name.clone(),
                    source,
                }
            })?;
            if layouts.insert(entry.name.clone(), descriptor).is_some() {
                return Err(CatalogError::DuplicateLayout(entry.name));
            }
        }

        Ok(Self { layouts })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LayoutDescriptor> {
        self.layouts.get(name)
    }

    /// Layout names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}
