use thiserror::Error;

/// A half-open quantity interval `[min, max)` mapped to a display color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBucket {
    pub min: u64,
    pub max: u64,
    pub color: String,
}

impl ColorBucket {
    pub fn contains(&self, quantity: u64) -> bool {
        self.min <= quantity && quantity < self.max
    }
}

#[derive(Debug, Error)]
#[error("invalid color bucket [{min}, {max})")]
pub struct InvalidColorBucket {
    pub min: u64,
    pub max: u64,
}

/// An ordered bucket table that maps order quantities to display colors.
///
/// The first bucket containing the quantity wins, in declaration order.
/// Quantities outside all buckets fall back to the default color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityColorMap {
    buckets: Vec<ColorBucket>,
    default_color: String,
}

impl QuantityColorMap {
    pub fn new(
        buckets: Vec<ColorBucket>,
        default_color: String,
    ) -> Result<Self, InvalidColorBucket> {
        if let Some(bucket) = buckets.iter().find(|b| b.min >= b.max) {
            return Err(InvalidColorBucket {
                min: bucket.min,
                max: bucket.max,
            });
        }
        Ok(Self {
            buckets,
            default_color,
        })
    }

    pub fn color_of(&self, quantity: u64) -> Option<&str> {
        self.buckets
            .iter()
            .find(|b| b.contains(quantity))
            .map(|b| b.color.as_str())
    }

    pub fn display_color(&self, quantity: u64) -> &str {
        self.color_of(quantity).unwrap_or(&self.default_color)
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }
}
