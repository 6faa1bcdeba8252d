//! Locations API client.
//!
//! [`LocationApi`] is the seam between the store and the network. The store
//! only ever sees decoded records or a [`ClientError`].

use std::future::Future;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use pinmap_core::{Envelope, Location, LocationId, NewLocation};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Operations offered by the locations API.
pub trait LocationApi: Send + Sync {
    /// Every location, newest first.
    fn list(&self) -> impl Future<Output = Result<Vec<Location>, ClientError>> + Send;

    /// The newest `limit` locations.
    fn recent(&self, limit: u32) -> impl Future<Output = Result<Vec<Location>, ClientError>> + Send;

    /// One location by ID.
    fn get(&self, id: LocationId) -> impl Future<Output = Result<Location, ClientError>> + Send;

    /// Persist a new location and return the stored record.
    fn create(
        &self,
        location: &NewLocation,
    ) -> impl Future<Output = Result<Location, ClientError>> + Send;

    /// Delete a location by ID.
    fn delete(&self, id: LocationId) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// [`LocationApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpLocationApi {
    /// HTTP client.
    client: Client,
    /// `.../api/locations`, no trailing slash.
    locations_url: Url,
}

impl HttpLocationApi {
    /// Create a client for the configured API.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if the locations path cannot be
    /// joined onto the base URL.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), config)
    }

    /// Create a client that reuses an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if the locations path cannot be
    /// joined onto the base URL.
    pub fn with_client(client: Client, config: &ClientConfig) -> Result<Self, ClientError> {
        let locations_url = config
            .api_url
            .join("locations")
            .map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;

        Ok(Self {
            client,
            locations_url,
        })
    }

    /// URL of the locations collection.
    #[must_use]
    pub const fn locations_url(&self) -> &Url {
        &self.locations_url
    }

    fn member_url(&self, segment: &str) -> Result<Url, ClientError> {
        let mut url = self.locations_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.locations_url.to_string()))?
            .push(segment);
        Ok(url)
    }
}

impl LocationApi for HttpLocationApi {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Location>, ClientError> {
        let response = self.client.get(self.locations_url.clone()).send().await?;
        require_data(decode(response).await?)
    }

    #[instrument(skip(self))]
    async fn recent(&self, limit: u32) -> Result<Vec<Location>, ClientError> {
        let mut url = self.member_url("recent")?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());

        let response = self.client.get(url).send().await?;
        require_data(decode(response).await?)
    }

    #[instrument(skip(self), fields(location_id = %id))]
    async fn get(&self, id: LocationId) -> Result<Location, ClientError> {
        let url = self.member_url(&id.to_string())?;
        let response = self.client.get(url).send().await?;
        require_data(decode(response).await?)
    }

    #[instrument(skip(self, location))]
    async fn create(&self, location: &NewLocation) -> Result<Location, ClientError> {
        let response = self
            .client
            .post(self.locations_url.clone())
            .json(location)
            .send()
            .await?;
        let location: Location = require_data(decode(response).await?)?;

        debug!(location_id = %location.id, "Location created");
        Ok(location)
    }

    #[instrument(skip(self), fields(location_id = %id))]
    async fn delete(&self, id: LocationId) -> Result<(), ClientError> {
        let url = self.member_url(&id.to_string())?;
        let response = self.client.delete(url).send().await?;
        decode::<serde_json::Value>(response).await?;

        debug!(location_id = %id, "Location deleted");
        Ok(())
    }
}

/// Read a response body as an envelope, turning failure envelopes into errors.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    let envelope = match serde_json::from_slice::<Envelope<T>>(&bytes) {
        Ok(envelope) => envelope,
        // Non-envelope error bodies (e.g. from a proxy) still carry a status
        Err(_) if !status.is_success() => {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_owned(),
                errors: Vec::new(),
            });
        }
        Err(e) => return Err(ClientError::Decode(e)),
    };

    if !status.is_success() || !envelope.success {
        warn!(
            status = status.as_u16(),
            error = ?envelope.error,
            "Locations API returned an error"
        );
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: envelope
                .error
                .unwrap_or_else(|| "Request failed".to_owned()),
            errors: envelope.errors.unwrap_or_default(),
        });
    }

    Ok(envelope)
}

fn require_data<T>(envelope: Envelope<T>) -> Result<T, ClientError> {
    envelope.data.ok_or(ClientError::MissingData)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpLocationApi {
        HttpLocationApi::new(&ClientConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn test_locations_url() {
        assert_eq!(
            api("http://localhost:3000/api").locations_url().as_str(),
            "http://localhost:3000/api/locations"
        );
        assert_eq!(
            api("http://pins.example/v2/api/").locations_url().as_str(),
            "http://pins.example/v2/api/locations"
        );
    }

    #[test]
    fn test_member_url() {
        let api = api("http://localhost:3000/api");
        assert_eq!(
            api.member_url("42").unwrap().as_str(),
            "http://localhost:3000/api/locations/42"
        );
        assert_eq!(
            api.member_url("recent").unwrap().as_str(),
            "http://localhost:3000/api/locations/recent"
        );
    }

    #[test]
    fn test_require_data() {
        let envelope: Envelope<u32> = Envelope::confirmation("done");
        assert!(matches!(
            require_data(envelope),
            Err(ClientError::MissingData)
        ));
        assert_eq!(require_data(Envelope::data(7)).unwrap(), 7);
    }
}
