use super::prelude::*;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClassifiedOrders {
    pub markers: Vec<MapMarker>,
    pub outside_boundary: usize,
    pub skipped: usize,
}

/// Turns located orders into colored map markers.
///
/// Orders without a location and donations are passed over silently.
/// A quantity that cannot be parsed excludes the record from marker
/// creation; a location outside the service-area boundary is only
/// reported and still rendered.
pub fn classify_orders(
    orders: &[Order],
    colors: &QuantityColorMap,
    boundary: &MapPolygon,
) -> ClassifiedOrders {
    let mut classified = ClassifiedOrders::default();
    for order in orders {
        if order.is_donation() {
            continue;
        }
        let Some(pos) = order.location else {
            continue;
        };
        let quantity = match order.quantity.trim().parse::<u64>() {
            Ok(quantity) => quantity,
            Err(_) => {
                log::warn!(
                    "Skipping order {} with invalid quantity {:?}",
                    order.id,
                    order.quantity
                );
                classified.skipped += 1;
                continue;
            }
        };
        if !polygon_contains(boundary, pos) {
            log::warn!(
                "Order {} at {} lies outside the service area",
                order.id,
                pos
            );
            classified.outside_boundary += 1;
        }
        classified.markers.push(MapMarker {
            pos,
            color: colors.display_color(quantity).to_owned(),
            quantity,
            order_id: order.id.as_str().to_owned(),
            address_label: order.address.to_string(),
        });
    }
    classified
}
