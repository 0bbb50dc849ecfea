//! # Firestore Team Store
//!
//! Team documents in a Cloud Firestore collection, reached through the
//! REST `v1` documents API with reqwest.
//!
//! | Operation | Request                                                   |
//! |-----------|-----------------------------------------------------------|
//! | create    | `POST   {base}/teams`                                     |
//! | update    | `PATCH  {base}/teams/{id}?updateMask.fieldPaths=…`        |
//! | delete    | `DELETE {base}/teams/{id}`                                |
//! | list      | `GET    {base}/teams?pageSize=…&pageToken=…`              |

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::firestore_value::{
    members_to_value, new_team_fields, team_from_document, Document, Fields,
    ListDocumentsResponse, Value,
};
use super::{TeamStore, TEAMS_COLLECTION};
use crate::error::StoreError;
use crate::models::{NewTeam, Team, TeamId, TeamPatch};

const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: u32 = 300;

/// Connection settings for a Firestore database
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirestoreConfig {
    pub project_id: String,
    /// Database id, `(default)` unless a named database is used
    #[serde(default = "default_database")]
    pub database: String,
    /// Web API key sent as the `key` query parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// OAuth bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// API root, overridable for the emulator
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl FirestoreConfig {
    pub fn new(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            database: default_database(),
            api_key: None,
            token: None,
            endpoint: default_endpoint(),
        }
    }

    /// URL of the documents root for this database
    pub fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.endpoint.trim_end_matches('/'),
            self.project_id,
            self.database
        )
    }
}

#[derive(Serialize)]
struct WriteBody<'a> {
    fields: &'a Fields,
}

pub struct FirestoreTeamStore {
    config: FirestoreConfig,
    http: Client,
}

impl FirestoreTeamStore {
    pub fn new(config: FirestoreConfig, timeout: Duration) -> Result<Self, StoreError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("teambuilder/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.config.documents_url(), TEAMS_COLLECTION)
    }

    fn document_url(&self, id: &TeamId) -> String {
        format!(
            "{}/{}",
            self.collection_url(),
            urlencoding::encode(id.as_str())
        )
    }

    /// Attach credentials to a request
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match &self.config.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request,
        };
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        id: Option<&TeamId>,
    ) -> Result<Response, StoreError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(StoreError::NotFound(id.clone()));
            }
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());
        Err(StoreError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Fields and mask query for a partial update
fn patch_request_parts(patch: &TeamPatch) -> (Fields, Vec<(&'static str, &'static str)>) {
    let mut fields = Fields::new();
    if let Some(name) = &patch.name {
        fields.insert("name".to_string(), Value::string(name));
    }
    if let Some(pokemons) = &patch.pokemons {
        fields.insert("pokemons".to_string(), members_to_value(pokemons));
    }

    let mut query: Vec<(&'static str, &'static str)> = patch
        .field_paths()
        .into_iter()
        .map(|path| ("updateMask.fieldPaths", path))
        .collect();
    query.push(("currentDocument.exists", "true"));

    (fields, query)
}

#[async_trait]
impl TeamStore for FirestoreTeamStore {
    async fn create(&self, team: &NewTeam) -> Result<TeamId, StoreError> {
        let fields = new_team_fields(team);
        let request = self
            .http
            .post(self.collection_url())
            .json(&WriteBody { fields: &fields });

        let doc: Document = self.send(request, None).await?.json().await?;
        let id = doc.id().ok_or_else(|| {
            StoreError::Malformed(format!("created document has no id: {:?}", doc.name))
        })?;
        Ok(TeamId::new(id))
    }

    async fn update(&self, id: &TeamId, patch: &TeamPatch) -> Result<(), StoreError> {
        if patch.is_empty() {
            return Ok(());
        }
        let (fields, query) = patch_request_parts(patch);
        let request = self
            .http
            .patch(self.document_url(id))
            .query(&query)
            .json(&WriteBody { fields: &fields });

        self.send(request, Some(id)).await?;
        Ok(())
    }

    async fn delete(&self, id: &TeamId) -> Result<(), StoreError> {
        let request = self.http.delete(self.document_url(id));
        self.send(request, Some(id)).await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Team>, StoreError> {
        let mut teams = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(self.collection_url())
                .query(&[("pageSize", PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListDocumentsResponse = self.send(request, None).await?.json().await?;
            for doc in &page.documents {
                teams.push(team_from_document(doc)?);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(teams)
    }

    fn backend_name(&self) -> &'static str {
        "firestore"
    }
}
