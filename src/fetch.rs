use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::FetchError;
use crate::models::{PokemonRecord, NO_DESCRIPTION};

#[derive(Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    height: u32,
    weight: u32,
    sprites: SpritesResponse,
    species: ResourceUrl,
}

#[derive(Debug, Deserialize)]
struct SpritesResponse {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResourceUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct SpeciesResponse {
    #[serde(default)]
    flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedEntry>,
}

#[derive(Debug, Deserialize)]
struct NamedEntry {
    name: String,
}

/// Where Pokémon data comes from. Every call re-issues its requests.
#[allow(async_fn_in_trait)]
pub trait PokeSource {
    /// Look up a Pokémon by name or numeric id. `Ok(None)` when the service
    /// does not answer 200.
    async fn fetch_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<PokemonRecord>, FetchError>;

    /// First flavor text of a species, or [`NO_DESCRIPTION`].
    async fn fetch_description(&self, species_url: &str) -> String;

    /// Every known name, sorted ascending. Empty when the service does not
    /// answer 200.
    async fn fetch_all_names(&self) -> Result<Vec<String>, FetchError>;

    /// Raw bytes of a sprite image.
    async fn fetch_sprite(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// [`PokeSource`] backed by the public REST API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    api_base: String,
    list_limit: usize,
}

impl HttpSource {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            list_limit: config.list_limit,
        }
    }

    async fn try_fetch_description(&self, species_url: &str) -> Result<String, FetchError> {
        debug!(url = species_url, "fetching species");
        let res = self.client.get(species_url).send().await?;
        if res.status() != StatusCode::OK {
            debug!(status = %res.status(), "species lookup missed");
            return Ok(NO_DESCRIPTION.to_string());
        }
        let species: SpeciesResponse = res.json().await?;
        Ok(species
            .flavor_text_entries
            .into_iter()
            .next()
            .map(|e| e.flavor_text)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()))
    }
}

impl PokeSource for HttpSource {
    async fn fetch_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<PokemonRecord>, FetchError> {
        let url = format!("{}/pokemon/{}", self.api_base, identifier);
        debug!(%url, "fetching pokemon");
        let res = self.client.get(&url).send().await?;
        if res.status() != StatusCode::OK {
            debug!(status = %res.status(), identifier, "pokemon lookup missed");
            return Ok(None);
        }
        let p: PokemonResponse = res.json().await?;
        let description = self.fetch_description(&p.species.url).await;

        Ok(Some(PokemonRecord {
            name: p.name,
            height: p.height,
            weight: p.weight,
            description,
            sprite: p.sprites.front_default,
        }))
    }

    async fn fetch_description(&self, species_url: &str) -> String {
        match self.try_fetch_description(species_url).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = species_url, error = %e, "description unavailable");
                NO_DESCRIPTION.to_string()
            }
        }
    }

    async fn fetch_all_names(&self) -> Result<Vec<String>, FetchError> {
        let url = format!("{}/pokemon?limit={}", self.api_base, self.list_limit);
        debug!(%url, "fetching name list");
        let res = self.client.get(&url).send().await?;
        if res.status() != StatusCode::OK {
            debug!(status = %res.status(), "name list unavailable");
            return Ok(Vec::new());
        }
        let list: ListResponse = res.json().await?;
        let mut names: Vec<String> = list.results.into_iter().map(|e| e.name).collect();
        names.sort();
        Ok(names)
    }

    async fn fetch_sprite(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "fetching sprite");
        let res = self.client.get(url).send().await?;
        if res.status() != StatusCode::OK {
            return Err(FetchError::Status(res.status()));
        }
        Ok(res.bytes().await?.to_vec())
    }
}
