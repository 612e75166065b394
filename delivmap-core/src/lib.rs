pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use delivmap_entities::{address::*, color::*, geo::*, order::*};
}
