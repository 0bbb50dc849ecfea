//! # Catalog
//!
//! Read-only access to the species catalog. The catalog is loaded once in
//! full (list, then every detail in parallel) and never cached or paged.
//!
//! Loading degrades instead of failing: an unreachable listing yields an
//! empty catalog and a failed detail fetch drops that one entry.

pub mod pokeapi;

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::CatalogEntry;

pub use pokeapi::PokeApiCatalog;

/// Lightweight reference returned by the species listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeciesRef {
    pub name: String,
    /// URL of the detail record
    pub url: String,
}

/// Detail record for one species
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SpeciesDetail {
    /// Type names in slot order
    pub types: Vec<String>,
    pub sprite: Option<String>,
    pub base_experience: u32,
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// First `limit` species in catalog order
    async fn list_species(&self, limit: u32) -> Result<Vec<SpeciesRef>, CatalogError>;

    async fn species_detail(&self, species: &SpeciesRef) -> Result<SpeciesDetail, CatalogError>;
}

/// Combine a listing reference and its detail into a catalog entry
pub fn entry_from_detail(species: &SpeciesRef, detail: SpeciesDetail) -> CatalogEntry {
    CatalogEntry {
        name: species.name.clone(),
        type_: detail.types.join(", "),
        image: detail.sprite,
        base_experience: detail.base_experience,
    }
}

/// Fetch the listing and then all details concurrently.
///
/// Entries keep listing order. Never fails; see the module docs.
pub async fn load_catalog(source: &dyn CatalogSource, limit: u32) -> Vec<CatalogEntry> {
    let species = match source.list_species(limit).await {
        Ok(species) => species,
        Err(e) => {
            tracing::warn!(error = %e, "Catalog listing unavailable, continuing with empty catalog");
            return Vec::new();
        }
    };

    let details = join_all(species.iter().map(|s| source.species_detail(s))).await;

    let mut entries = Vec::with_capacity(species.len());
    for (species, detail) in species.iter().zip(details) {
        match detail {
            Ok(detail) => entries.push(entry_from_detail(species, detail)),
            Err(e) => {
                tracing::warn!(species = %species.name, error = %e, "Skipping catalog entry");
            }
        }
    }

    tracing::info!(requested = limit, loaded = entries.len(), "Catalog loaded");
    entries
}

/// Case-insensitive substring search over entry names. The query is used
/// as typed, so surrounding whitespace takes part in the match.
pub fn filter_entries<'a>(entries: &'a [CatalogEntry], query: &str) -> Vec<&'a CatalogEntry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle))
        .collect()
}
