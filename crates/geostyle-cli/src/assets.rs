//! File-system adapter for icon symbols

use async_trait::async_trait;
use geostyle_core::error::{GeostyleError, Result};
use geostyle_core::ports::{AssetResolver, SymbolAsset};
use std::path::{Component, Path, PathBuf};

/// Resolves symbols as paths relative to an asset directory
#[derive(Debug, Clone)]
pub struct FileAssetResolver {
    root: PathBuf,
}

impl FileAssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn locate(&self, symbol: &str) -> Result<PathBuf> {
        let relative = Path::new(symbol.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(GeostyleError::AssetUnavailable {
                symbol: symbol.to_string(),
                reason: "path leaves the asset directory".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetResolver for FileAssetResolver {
    async fn resolve(&self, symbol: &str) -> Result<SymbolAsset> {
        let path = self.locate(symbol)?;
        let data = tokio::fs::read(&path).await.map_err(|e| GeostyleError::AssetUnavailable {
            symbol: symbol.to_string(),
            reason: format!("{}: {}", path.display(), e),
        })?;
        tracing::debug!("Resolved symbol {} ({} bytes)", symbol, data.len());
        Ok(SymbolAsset::new(symbol, data))
    }
}
