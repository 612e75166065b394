// Low-level access to the persisted order table. The repository only
// moves whole tables in and out; all per-record logic lives in the
// usecases.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The order table could not be found")]
    NotFound,
    #[error("The order table contains no records")]
    Empty,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub trait OrderRepo {
    fn load_orders(&self) -> Result<Vec<Order>>;

    /// Rewrites the whole table. Called after each successfully resolved
    /// row so that a crash mid-run loses at most the in-flight record.
    fn save_orders(&self, orders: &[Order]) -> Result<()>;
}
