use anyhow::{anyhow, Result};
use delivmap_entities::{
    color::{ColorBucket, QuantityColorMap},
    geo::{MapPoint, MapPolygon},
};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "delivmap.toml";

pub struct Config {
    pub geocoding: Geocoding,
    pub boundary: MapPolygon,
    pub colors: QuantityColorMap,
    pub map: Map,
}

pub struct Geocoding {
    pub gateway: GeocodingGateway,
}

pub enum GeocodingGateway {
    Nominatim {
        user_agent: String,
        timeout: Duration,
        max_attempts: u32,
    },
}

pub struct Map {
    pub output: PathBuf,
    pub zoom: u8,
    pub tiles: String,
}

impl Config {
    pub fn try_load_from_file_or_default(file_path: Option<&Path>) -> Result<Self> {
        let file_path = file_path.unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        Self::try_from(raw_config)
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            geocoding,
            gateway,
            boundary,
            colors,
            map,
        } = from;

        let geocoding_gateway = geocoding
            .unwrap_or_default()
            .gateway
            .ok_or_else(|| anyhow!("No geocoding gateway configured"))?;
        let geocoding = match geocoding_gateway {
            raw::GeocodingGateway::Nominatim => {
                let defaults = raw::Gateway::default()
                    .nominatim
                    .expect("Nominatim gateway defaults");
                let nominatim = gateway
                    .and_then(|gateway| gateway.nominatim)
                    .unwrap_or_else(|| defaults.clone());
                Geocoding {
                    gateway: GeocodingGateway::Nominatim {
                        user_agent: nominatim
                            .user_agent
                            .or(defaults.user_agent)
                            .expect("Nominatim user agent"),
                        timeout: nominatim
                            .timeout
                            .or(defaults.timeout)
                            .expect("Nominatim timeout"),
                        max_attempts: nominatim
                            .max_attempts
                            .or(defaults.max_attempts)
                            .expect("Nominatim max attempts"),
                    },
                }
            }
        };

        let boundary = boundary.unwrap_or_default();
        let active = boundary
            .active
            .unwrap_or_else(|| raw::Boundary::default().active.expect("Active boundary name"));
        let polygons = boundary
            .polygon
            .unwrap_or_else(|| raw::Boundary::default().polygon.expect("Boundary polygons"));
        let polygon = polygons
            .into_iter()
            .find(|p| p.name == active)
            .ok_or_else(|| anyhow!("Boundary polygon '{active}' is not defined"))?;
        let vertices = polygon
            .vertices
            .into_iter()
            .map(|[lat, lng]| {
                MapPoint::try_from_lat_lng_deg(lat, lng)
                    .ok_or_else(|| anyhow!("Invalid boundary vertex ({lat}, {lng})"))
            })
            .collect::<Result<Vec<_>>>()?;
        let boundary = MapPolygon::try_from_vertices(vertices)
            .ok_or_else(|| anyhow!("Boundary polygon '{active}' needs at least 3 vertices"))?;

        let colors = colors.unwrap_or_default();
        let default_color = colors
            .default
            .unwrap_or_else(|| raw::Colors::default().default.expect("Default color"));
        let buckets = colors
            .bucket
            .unwrap_or_else(|| raw::Colors::default().bucket.expect("Color buckets"))
            .into_iter()
            .map(|raw::Bucket { min, max, color }| ColorBucket { min, max, color })
            .collect();
        let colors = QuantityColorMap::new(buckets, default_color)?;

        let map = map.unwrap_or_default();
        let map_defaults = raw::Map::default();
        let map = Map {
            output: map.output.or(map_defaults.output).expect("Map output path"),
            zoom: map.zoom.or(map_defaults.zoom).expect("Map zoom"),
            tiles: map.tiles.or(map_defaults.tiles).expect("Map tiles"),
        };

        Ok(Self {
            geocoding,
            boundary,
            colors,
            map,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_complete_and_valid() {
        let cfg = Config::try_from(raw::Config::default()).unwrap();
        let GeocodingGateway::Nominatim {
            user_agent,
            timeout,
            max_attempts,
        } = cfg.geocoding.gateway;
        assert_eq!("delivmap", user_agent);
        assert_eq!(Duration::from_secs(10), timeout);
        assert_eq!(3, max_attempts);
        assert_eq!(7, cfg.boundary.vertices().len());
        assert_eq!(Some("#2f4b7c"), cfg.colors.color_of(7));
        assert_eq!("red", cfg.colors.display_color(1000));
        assert_eq!(PathBuf::from("map-cluster.html"), cfg.map.output);
        assert_eq!(12, cfg.map.zoom);
    }

    #[test]
    fn partial_config_falls_back_to_section_defaults() {
        let raw: raw::Config = toml::from_str(
            r#"
            [boundary]
            active = "2023"

            [map]
            zoom = 10
            "#,
        )
        .unwrap();
        let cfg = Config::try_from(raw).unwrap();
        assert_eq!(10, cfg.map.zoom);
        assert_eq!(PathBuf::from("map-cluster.html"), cfg.map.output);
        // The 2023 polygon ships with the defaults.
        assert_eq!(7, cfg.boundary.vertices().len());
    }

    #[test]
    fn unknown_boundary_name_is_rejected() {
        let raw: raw::Config = toml::from_str(
            r#"
            [boundary]
            active = "2019"
            "#,
        )
        .unwrap();
        assert!(Config::try_from(raw).is_err());
    }
}
