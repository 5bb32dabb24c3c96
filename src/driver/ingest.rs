/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Loading order and courier definitions.

use crate::error::IngestionError;
use crate::model::{Courier, Order};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Reads the orders file: a JSON array of `{ "id", "name", "prepTime" }`.
///
/// # Errors
///
/// Returns [`IngestionError`] if the file is unreadable or malformed.
pub fn load_orders(path: impl AsRef<Path>) -> Result<Vec<Order>, IngestionError> {
    load_records(path.as_ref())
}

/// Reads the couriers file: a JSON array of `{ "name", "arrivalTime" }`.
///
/// # Errors
///
/// Returns [`IngestionError`] if the file is unreadable or malformed.
pub fn load_couriers(path: impl AsRef<Path>) -> Result<Vec<Courier>, IngestionError> {
    load_records(path.as_ref())
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, IngestionError> {
    let raw = std::fs::read_to_string(path).map_err(|source| IngestionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<T> = serde_json::from_str(&raw).map_err(|source| IngestionError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = records.len(), "records loaded");
    Ok(records)
}
