//! REST client for the persistence backend.
//!
//! All configuration is explicit — base URL and CSRF token are passed in at
//! construction, never read from ambient globals. Every call is async and
//! returns a typed result; the engine never awaits these directly. Hosts
//! spawn persistence calls after a commit so a slow network can never stall
//! the pointer-move path, and a failure is reported without rolling back
//! the local store (retry is a manual re-save).
//!
//! The payload shapes are the legacy wire contract: positions travel as
//! `x_position`/`y_position` in wall inches, and mutating calls carry the
//! CSRF token in an `X-CSRFToken` header, passed through untouched.

#[cfg(test)]
#[path = "net_test.rs"]
mod net_test;

use serde::{Deserialize, Serialize};

use crate::store::{Entity, EntityId, EntityKind};

const CSRF_HEADER: &str = "X-CSRFToken";

/// Backend connection settings, supplied by the host at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin the backend is served from, e.g. `https://planner.example`.
    pub base_url: String,
    /// Session CSRF token, forwarded verbatim on every mutating call.
    pub csrf_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend rejected the request: {0}")]
    Rejected(String),
    #[error("invalid artwork: {0}")]
    Invalid(&'static str),
}

/// A new artwork for the manual-entry form.
#[derive(Debug, Clone, Default)]
pub struct NewArtwork {
    pub name: String,
    /// Inches.
    pub width: f64,
    /// Inches.
    pub height: f64,
    /// Nail point, inches down from the top edge.
    pub hanging_point: f64,
    pub medium: Option<String>,
    pub price: Option<f64>,
    /// Not for sale.
    pub nfs: bool,
    /// Optional image upload: (file name, bytes).
    pub image: Option<(String, Vec<u8>)>,
}

impl NewArtwork {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Invalid("name must not be empty"));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ApiError::Invalid("width must be a positive number"));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(ApiError::Invalid("height must be a positive number"));
        }
        if !self.hanging_point.is_finite() || self.hanging_point < 0.0 {
            return Err(ApiError::Invalid("hanging point must not be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PositionUpdate {
    x_position: f64,
    y_position: f64,
    wall_id: uuid::Uuid,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArtworkResponse {
    success: bool,
    #[serde(default)]
    artwork: Option<Entity>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthStatus {
    authenticated: bool,
}

/// Path for a position update; artworks and permanent objects persist
/// through different endpoints.
fn position_path(kind: EntityKind, id: &EntityId) -> String {
    match kind {
        EntityKind::Artwork => format!("update_artwork_position/{id}"),
        EntityKind::PermanentObject => format!("update_object_position/{id}"),
    }
}

impl StatusResponse {
    fn into_result(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(self.error.unwrap_or_else(|| "unknown error".to_owned())))
        }
    }
}

/// The backend client. Cheap to clone; holds a pooled HTTP client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { config, http: reqwest::Client::new() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Persist a committed position. Called once per drag commit and once
    /// per entity moved by an applied spacing plan.
    ///
    /// # Errors
    ///
    /// `Http` on transport failure, `Rejected` if the backend refuses.
    pub async fn update_position(
        &self,
        kind: EntityKind,
        id: &EntityId,
        x: f64,
        y: f64,
        wall_id: uuid::Uuid,
    ) -> Result<(), ApiError> {
        let body = PositionUpdate { x_position: x, y_position: y, wall_id };
        let response: StatusResponse = self
            .http
            .post(self.url(&position_path(kind, id)))
            .header(CSRF_HEADER, &self.config.csrf_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.into_result()
    }

    /// Create an artwork via the manual-entry form (multipart upload).
    ///
    /// # Errors
    ///
    /// `Invalid` before any network call if the fields fail validation;
    /// otherwise `Http`/`Rejected` as above.
    pub async fn create_artwork(&self, artwork: NewArtwork) -> Result<Entity, ApiError> {
        artwork.validate()?;
        let mut form = reqwest::multipart::Form::new()
            .text("name", artwork.name)
            .text("width", artwork.width.to_string())
            .text("height", artwork.height.to_string())
            .text("hanging", artwork.hanging_point.to_string());
        if let Some(medium) = artwork.medium {
            form = form.text("medium", medium);
        }
        if let Some(price) = artwork.price {
            form = form.text("price", price.to_string());
        }
        if artwork.nfs {
            form = form.text("nfs", "on");
        }
        if let Some((file_name, bytes)) = artwork.image {
            form = form.part("image", reqwest::multipart::Part::bytes(bytes).file_name(file_name));
        }

        let response: ArtworkResponse = self
            .http
            .post(self.url("artwork-manual"))
            .header(CSRF_HEADER, &self.config.csrf_token)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if !response.success {
            return Err(ApiError::Rejected(
                response.error.unwrap_or_else(|| "unknown error".to_owned()),
            ));
        }
        response
            .artwork
            .ok_or_else(|| ApiError::Rejected("backend returned no artwork".to_owned()))
    }

    /// Delete a permanent object.
    ///
    /// # Errors
    ///
    /// `Http` on transport failure, `Rejected` if the backend refuses.
    pub async fn delete_permanent_object(&self, id: &EntityId) -> Result<(), ApiError> {
        let response: StatusResponse = self
            .http
            .post(self.url(&format!("delete_permanent_object/{id}")))
            .header(CSRF_HEADER, &self.config.csrf_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.into_result()
    }

    /// Whether the current session is authenticated. Consulted before a
    /// permanent save; guests are offered a temporary-save path instead.
    ///
    /// # Errors
    ///
    /// `Http` on transport failure.
    pub async fn check_auth_status(&self) -> Result<bool, ApiError> {
        let status: AuthStatus = self
            .http
            .get(self.url("check-auth-status"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(status.authenticated)
    }
}
