use delivmap_entities::{address::Address, geo::MapPoint, order::Order};
use serde::{Deserialize, Serialize};

/// One row of the order table, with the original column names.
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "Address 1")]
    pub address_1: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Zip")]
    pub zip: String,
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Qty")]
    pub qty: String,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
}

fn to_optional(field: String) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field)
    }
}

impl From<OrderRecord> for Order {
    fn from(from: OrderRecord) -> Self {
        let OrderRecord {
            address_1,
            city,
            state,
            zip,
            item,
            order_id,
            qty,
            latitude,
            longitude,
        } = from;
        let location = match (latitude, longitude) {
            (Some(lat), Some(lng)) => {
                let pos = MapPoint::try_from_lat_lng_deg(lat, lng);
                if pos.is_none() {
                    log::warn!(
                        "Ignoring out-of-range coordinates ({lat}, {lng}) of order {order_id}"
                    );
                }
                pos
            }
            _ => None,
        };
        Self {
            id: order_id.into(),
            address: Address {
                street: to_optional(address_1),
                city: to_optional(city),
                state: to_optional(state),
                zip: to_optional(zip),
            },
            item,
            quantity: qty,
            location,
        }
    }
}

impl From<&Order> for OrderRecord {
    fn from(from: &Order) -> Self {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            address_1: field(&from.address.street),
            city: field(&from.address.city),
            state: field(&from.address.state),
            zip: field(&from.address.zip),
            item: from.item.clone(),
            order_id: from.id.as_str().to_owned(),
            qty: from.quantity.clone(),
            latitude: from.location.map(MapPoint::lat_deg),
            longitude: from.location.map(MapPoint::lng_deg),
        }
    }
}
