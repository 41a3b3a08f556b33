//! Log entry record.
//!
//! Not yet produced or consumed by the worker. The shape and JSON field names
//! are fixed so an ingestion source can be wired in later.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub service: String,
    pub message: String,
    pub metadata: HashMap<String, serde_json::Value>,
}
