use crate::entities::{MapPoint, MapPolygon};

/// Everything the renderer needs to draw one order marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub pos: MapPoint,
    pub color: String,
    pub quantity: u64,
    pub order_id: String,
    pub address_label: String,
}

pub trait MapRenderer {
    fn render_map(&self, markers: &[MapMarker], boundary: &MapPolygon) -> anyhow::Result<()>;
}
