//! Sea-router HTTP client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use searisk_core::{LonLat, PathGenerationError, PathGenerator, RoutePath};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Path generator backed by a sea-routing service.
///
/// Issues `GET {base}/route?origin=lon,lat&destination=lon,lat&units=naut`
/// and expects a GeoJSON `Feature` back. Uses the blocking reqwest client,
/// so it must not be built or dropped on an async runtime thread.
#[derive(Debug, Clone)]
pub struct HttpPathGenerator {
    client: Client,
    base_url: String,
    request_id: Option<String>,
}

impl HttpPathGenerator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PathGenerationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PathGenerationError::Unavailable(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_id: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward a request id to the router as `X-Request-ID`.
    pub fn set_request_id(&mut self, request_id: Option<String>) {
        self.request_id = request_id
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
    }

    fn route_url(&self) -> String {
        format!("{}/route", self.base_url)
    }
}

fn format_point(point: LonLat) -> String {
    format!("{},{}", point[0], point[1])
}

impl PathGenerator for HttpPathGenerator {
    fn generate(&self, origin: LonLat, destination: LonLat) -> Result<RoutePath, PathGenerationError> {
        let mut request = self.client.get(self.route_url()).query(&[
            ("origin", format_point(origin)),
            ("destination", format_point(destination)),
            ("units", "naut".to_string()),
        ]);
        if let Some(request_id) = self.request_id.as_deref() {
            request = request.header("X-Request-ID", request_id);
        }

        let response = request.send().map_err(|err| {
            tracing::warn!("Sea router request failed: {}", err);
            PathGenerationError::Unavailable(err.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PathGenerationError::NoRoute { origin, destination });
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!("Sea router returned {}: {}", status, body);
            return Err(PathGenerationError::Unavailable(format!("router returned {status}")));
        }

        let body: serde_json::Value = response
            .json()
            .map_err(|err| PathGenerationError::InvalidResponse(err.to_string()))?;
        let route = RoutePath::from_feature(body)?;
        tracing::debug!(
            points = route.coordinates.len(),
            length = route.length,
            "Sea router returned a path"
        );
        Ok(route)
    }
}
