//! CSV-backed implementation of the order repository.
//!
//! The CSV file is both input and output: resolved coordinates are written
//! back into the same table so that an interrupted run can be resumed.

use delivmap_core::repositories::{Error, OrderRepo, Result};
use delivmap_entities::order::Order;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

mod models;

use models::OrderRecord;

pub struct CsvOrderStore {
    path: PathBuf,
}

impl CsvOrderStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OrderRepo for CsvOrderStore {
    fn load_orders(&self) -> Result<Vec<Order>> {
        let mut reader = match csv::Reader::from_path(&self.path) {
            Ok(reader) => reader,
            Err(err) => {
                let not_found = matches!(
                    err.kind(),
                    csv::ErrorKind::Io(io_err) if io_err.kind() == ErrorKind::NotFound
                );
                return Err(if not_found {
                    Error::NotFound
                } else {
                    Error::Other(err.into())
                });
            }
        };
        let mut orders = Vec::new();
        for record in reader.deserialize() {
            let record: OrderRecord = record.map_err(anyhow::Error::from)?;
            orders.push(record.into());
        }
        if orders.is_empty() {
            return Err(Error::Empty);
        }
        log::debug!("Loaded {} orders from '{}'", orders.len(), self.path.display());
        Ok(orders)
    }

    fn save_orders(&self, orders: &[Order]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path).map_err(anyhow::Error::from)?;
        for order in orders {
            let record = OrderRecord::from(order);
            writer.serialize(record).map_err(anyhow::Error::from)?;
        }
        writer.flush()?;
        Ok(())
    }
}
