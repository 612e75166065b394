use std::fmt;

use crate::{address::Address, geo::MapPoint};

/// Order identifier as found in the source table.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct OrderId(String);

impl OrderId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for OrderId {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for OrderId {
    fn from(from: &str) -> Self {
        from.to_owned().into()
    }
}

impl From<OrderId> for String {
    fn from(from: OrderId) -> Self {
        from.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single delivery order.
///
/// The quantity is kept as the raw table value and only parsed during
/// classification, so that a malformed field affects that single record
/// and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub address: Address,
    pub item: String,
    pub quantity: String,
    pub location: Option<MapPoint>,
}

impl Order {
    /// Donation entries are non-physical and never geocoded or mapped.
    pub fn is_donation(&self) -> bool {
        self.item.to_lowercase().contains("donation")
    }
}
