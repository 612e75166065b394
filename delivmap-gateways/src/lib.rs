pub mod leaflet;
pub mod nominatim;
