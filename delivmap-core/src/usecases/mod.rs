mod classify_orders;
mod error;
mod resolve_locations;

pub use self::{classify_orders::*, error::Error, resolve_locations::*};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        entities::*,
        gateways::{geocode::*, map::*},
        repositories::OrderRepo,
        util::{geo::*, retry::*},
    };
}
