//! PokeAPI catalog client.
//!
//! `GET {base}pokemon?limit=N` for the listing, then the per-species URL
//! from each listing entry for its detail record.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{CatalogSource, SpeciesDetail, SpeciesRef};
use crate::error::CatalogError;

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<SpeciesRef>,
}

#[derive(Deserialize)]
struct DetailResponse {
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    sprites: Sprites,
    #[serde(default)]
    base_experience: Option<u32>,
}

#[derive(Deserialize)]
struct TypeSlot {
    #[serde(default)]
    slot: u8,
    #[serde(rename = "type")]
    type_: NamedResource,
}

#[derive(Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Deserialize, Default)]
struct Sprites {
    #[serde(default)]
    front_default: Option<String>,
}

impl From<DetailResponse> for SpeciesDetail {
    fn from(mut detail: DetailResponse) -> Self {
        detail.types.sort_by_key(|t| t.slot);
        SpeciesDetail {
            types: detail.types.into_iter().map(|t| t.type_.name).collect(),
            sprite: detail.sprites.front_default,
            base_experience: detail.base_experience.unwrap_or(0),
        }
    }
}

pub struct PokeApiCatalog {
    base_url: String,
    http: Client,
}

impl PokeApiCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("teambuilder/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.to_string(),
            http,
        })
    }

    fn listing_url(&self, limit: u32) -> String {
        format!(
            "{}/pokemon?limit={}",
            self.base_url.trim_end_matches('/'),
            limit
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogSource for PokeApiCatalog {
    async fn list_species(&self, limit: u32) -> Result<Vec<SpeciesRef>, CatalogError> {
        let url = self.listing_url(limit);
        tracing::debug!(%url, "Fetching species listing");
        let list: ListResponse = self.get_json(&url).await?;
        Ok(list.results)
    }

    async fn species_detail(&self, species: &SpeciesRef) -> Result<SpeciesDetail, CatalogError> {
        let detail: DetailResponse = self.get_json(&species.url).await?;
        Ok(detail.into())
    }
}
