//! Persisted form of an editing session.
//!
//! A document is the plain vertex list of every layer plus its display
//! metadata, with colors written as `#RRGGBB` hex. JSON is the interchange format; MessagePack (`rmp-serde`) is
//! the compact binary form used for autosave snapshots.

use crate::id::LayerId;
use crate::model::{Color, Vertices, Xywh};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    pub id: LayerId,
    pub vertices: Vertices,
    pub opacity: u8,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub rect: Xywh,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub layers: Vec<LayerRecord>,
    pub active: usize,
    pub image: ImageRecord,
}

impl SessionRecord {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("JSON encode error: {e}"))
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let record: Self =
            serde_json::from_str(text).map_err(|e| format!("JSON decode error: {e}"))?;
        record.validate()?;
        Ok(record)
    }

    pub fn to_msgpack(&self) -> Result<Vec<u8>, String> {
        rmp_serde::to_vec_named(self).map_err(|e| format!("MessagePack encode error: {e}"))
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, String> {
        let record: Self = rmp_serde::from_slice(bytes)
            .map_err(|e| format!("MessagePack decode error: {e}"))?;
        record.validate()?;
        Ok(record)
    }

    /// A session always has at least one layer and a valid active index.
    fn validate(&self) -> Result<(), String> {
        if self.layers.is_empty() {
            return Err("session has no layers".to_string());
        }
        if self.active >= self.layers.len() {
            return Err(format!(
                "active layer {} out of range for {} layers",
                self.active,
                self.layers.len()
            ));
        }
        Ok(())
    }
}
