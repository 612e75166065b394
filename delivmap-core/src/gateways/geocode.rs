use crate::entities::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("The geocoding request timed out")]
    Timeout,
    #[error("The geocoding service is unavailable")]
    Unavailable,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GeocodeError {
    /// Transient failures are worth another attempt; everything else is
    /// fatal and propagates.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Unavailable)
    }
}

pub trait GeocodingGateway {
    /// Resolves an address to WGS84 coordinates in degrees.
    ///
    /// `Ok(None)` means the provider answered but found no match.
    fn resolve_address_lat_lng(&self, addr: &Address) -> Result<Option<(f64, f64)>, GeocodeError>;
}
