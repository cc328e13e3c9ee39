use async_trait::async_trait;
use serde::{Serialize, Serializer};
use std::sync::Arc;

use crate::error::Result;

/// Resolved icon symbol, ready to hand to the rendering backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolAsset {
    /// Symbol path as configured
    pub src: String,

    /// Raw asset bytes (SVG or raster)
    #[serde(rename = "bytes", serialize_with = "serialize_len")]
    pub data: Arc<[u8]>,
}

impl SymbolAsset {
    pub fn new(src: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self { src: src.into(), data: data.into() }
    }
}

fn serialize_len<S: Serializer>(data: &Arc<[u8]>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(data.len() as u64)
}

/// Port for resolving icon symbols referenced by style configurations
#[async_trait]
pub trait AssetResolver: Send + Sync {
    /// Resolve a symbol path to its asset
    async fn resolve(&self, symbol: &str) -> Result<SymbolAsset>;
}
