use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::HuntError;

#[derive(Debug, Deserialize)]
struct ResultSet {
    selectors: Option<Vec<Value>>,
}

/// Extract every `selectorvalue` from a phonebook result set, in order.
///
/// Records without a string `selectorvalue` are skipped with a warning.
pub fn extract_selectors(raw: &str) -> Result<Vec<String>, HuntError> {
    let result_set: ResultSet = serde_json::from_str(raw)?;
    let selectors = result_set.selectors.ok_or(HuntError::MissingSelectors)?;

    let mut results = Vec::with_capacity(selectors.len());
    for (index, record) in selectors.iter().enumerate() {
        match record.get("selectorvalue").and_then(Value::as_str) {
            Some(value) => results.push(value.to_string()),
            None => warn!("Selector record {} has no 'selectorvalue', skipping", index),
        }
    }

    debug!("Extracted {} of {} selector records", results.len(), selectors.len());
    Ok(results)
}
