use crate::{gateways::geocode::GeocodeError, repositories};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}
