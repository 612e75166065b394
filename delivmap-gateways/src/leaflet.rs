use anyhow::{bail, Context as _};
use askama::Template;
use delivmap_core::gateways::map::{MapMarker, MapRenderer};
use delivmap_entities::geo::MapPolygon;
use serde::Serialize;
use std::{fs, path::PathBuf};

/// Renders a standalone HTML map with clustered, color-coded markers and
/// the service-area boundary overlay.
pub struct LeafletMap {
    pub output: PathBuf,
    pub zoom: u8,
    pub tiles: String,
}

#[derive(Template)]
#[template(path = "map.html")]
struct MapTemplate<'a> {
    tiles_url: &'a str,
    attribution: &'a str,
    zoom: u8,
    center_lat: f64,
    center_lng: f64,
    markers_json: String,
    boundary_json: String,
}

#[derive(Serialize)]
struct MarkerPayload<'a> {
    lat: f64,
    lng: f64,
    color: &'a str,
    qty: u64,
    order_id: &'a str,
    popup: String,
}

impl<'a> From<&'a MapMarker> for MarkerPayload<'a> {
    fn from(from: &'a MapMarker) -> Self {
        Self {
            lat: from.pos.lat_deg(),
            lng: from.pos.lng_deg(),
            color: &from.color,
            qty: from.quantity,
            order_id: &from.order_id,
            popup: format!(
                "ORDER:{} Address:{}<br>Quantity: {}",
                from.order_id, from.address_label, from.quantity
            ),
        }
    }
}

/// Maps a tile set name to its URL template and attribution.
fn tile_layer(name: &str) -> (&'static str, &'static str) {
    match name {
        "cartodb-positron" => (
            "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
            "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>",
        ),
        _ => (
            "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
        ),
    }
}

impl MapRenderer for LeafletMap {
    fn render_map(&self, markers: &[MapMarker], boundary: &MapPolygon) -> anyhow::Result<()> {
        if markers.is_empty() {
            bail!("There are no markers to render");
        }
        let center_lat =
            markers.iter().map(|m| m.pos.lat_deg()).sum::<f64>() / markers.len() as f64;
        let center_lng =
            markers.iter().map(|m| m.pos.lng_deg()).sum::<f64>() / markers.len() as f64;
        let payloads: Vec<MarkerPayload<'_>> = markers.iter().map(Into::into).collect();
        let boundary_vertices: Vec<[f64; 2]> = boundary
            .vertices()
            .iter()
            .map(|v| [v.lat_deg(), v.lng_deg()])
            .collect();
        let (tiles_url, attribution) = tile_layer(&self.tiles);
        let html = MapTemplate {
            tiles_url,
            attribution,
            zoom: self.zoom,
            center_lat,
            center_lng,
            markers_json: serde_json::to_string(&payloads)?,
            boundary_json: serde_json::to_string(&boundary_vertices)?,
        }
        .render()?;
        fs::write(&self.output, html)
            .with_context(|| format!("Failed to write map to '{}'", self.output.display()))?;
        log::info!(
            "Wrote map with {} markers to '{}'",
            markers.len(),
            self.output.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delivmap_entities::geo::MapPoint;

    fn point(lat: f64, lng: f64) -> MapPoint {
        MapPoint::try_from_lat_lng_deg(lat, lng).unwrap()
    }

    fn boundary() -> MapPolygon {
        MapPolygon::try_from_vertices(vec![
            point(44.98, -93.87),
            point(44.90, -93.36),
            point(44.71, -93.53),
        ])
        .unwrap()
    }

    fn marker(order_id: &str, lat: f64, lng: f64) -> MapMarker {
        MapMarker {
            pos: point(lat, lng),
            color: "#003f5c".into(),
            quantity: 5,
            order_id: order_id.into(),
            address_label: "1 Main St, Chaska, MN, 55318".into(),
        }
    }

    #[test]
    fn rendered_map_embeds_markers_and_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = LeafletMap {
            output: dir.path().join("map-cluster.html"),
            zoom: 12,
            tiles: "cartodb-positron".into(),
        };
        renderer
            .render_map(&[marker("1001", 44.9, -93.5)], &boundary())
            .unwrap();

        let html = fs::read_to_string(dir.path().join("map-cluster.html")).unwrap();
        assert!(html.contains("L.markerClusterGroup"));
        assert!(html.contains("1001"));
        assert!(html.contains("#003f5c"));
        assert!(html.contains("basemaps.cartocdn.com"));
        assert!(html.contains("L.polygon"));
    }

    #[test]
    fn refuse_to_render_an_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = LeafletMap {
            output: dir.path().join("map-cluster.html"),
            zoom: 12,
            tiles: "cartodb-positron".into(),
        };
        assert!(renderer.render_map(&[], &boundary()).is_err());
    }
}
