use anyhow::anyhow;
use delivmap_core::gateways::geocode::{GeocodeError, GeocodingGateway};
use delivmap_entities::address::Address;
use itertools::Itertools as _;
use reqwest::StatusCode;
use serde::Deserialize;
use std::{
    cell::Cell,
    time::{Duration, Instant},
};

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Minimum pause between two requests, per the Nominatim usage policy.
const REQUEST_PAUSE: Duration = Duration::from_secs(1);

/// Free-text forward geocoding against the Nominatim HTTP API.
pub struct Nominatim {
    client: reqwest::blocking::Client,
    endpoint: String,
    last_request: Cell<Option<Instant>>,
}

impl Nominatim {
    pub fn new(user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent.to_owned())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: SEARCH_URL.to_owned(),
            last_request: Cell::new(None),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn throttle(&self) {
        if let Some(last) = self.last_request.get() {
            let elapsed = last.elapsed();
            if elapsed < REQUEST_PAUSE {
                std::thread::sleep(REQUEST_PAUSE - elapsed);
            }
        }
        self.last_request.set(Some(Instant::now()));
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

fn address_to_query_string(addr: &Address) -> String {
    let addr_parts = [&addr.street, &addr.city, &addr.state, &addr.zip];
    addr_parts
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .join(", ")
}

fn classify_request_error(err: reqwest::Error) -> GeocodeError {
    if err.is_timeout() {
        GeocodeError::Timeout
    } else if err.is_connect() {
        GeocodeError::Unavailable
    } else {
        GeocodeError::Other(err.into())
    }
}

fn classify_status(status: StatusCode) -> Option<GeocodeError> {
    match status {
        StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::BAD_GATEWAY
        | StatusCode::GATEWAY_TIMEOUT
        | StatusCode::TOO_MANY_REQUESTS => Some(GeocodeError::Unavailable),
        status if !status.is_success() => Some(GeocodeError::Other(anyhow!(
            "Geocoding request failed with status {status}"
        ))),
        _ => None,
    }
}

impl GeocodingGateway for Nominatim {
    fn resolve_address_lat_lng(&self, addr: &Address) -> Result<Option<(f64, f64)>, GeocodeError> {
        if addr.is_empty() {
            return Ok(None);
        }
        let query = address_to_query_string(addr);
        self.throttle();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query.as_str()), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .map_err(classify_request_error)?;
        if let Some(err) = classify_status(response.status()) {
            return Err(err);
        }
        let results: Vec<SearchResult> = response
            .json()
            .map_err(|err| GeocodeError::Other(err.into()))?;
        let Some(hit) = results.first() else {
            log::debug!("No location found for '{query}'");
            return Ok(None);
        };
        let lat: f64 = hit
            .lat
            .parse()
            .map_err(|_| GeocodeError::Other(anyhow!("Unparseable latitude '{}'", hit.lat)))?;
        let lng: f64 = hit
            .lon
            .parse()
            .map_err(|_| GeocodeError::Other(anyhow!("Unparseable longitude '{}'", hit.lon)))?;
        log::debug!("Resolved address location '{query}': ({lat}, {lng})");
        Ok(Some((lat, lng)))
    }
}
