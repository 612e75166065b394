pub mod geo;
pub mod retry;
