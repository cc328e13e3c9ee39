//! Layer orchestration: configuration, feature loading and data updates.
//!
//! Every configuration takes a new generation number. A configuration is
//! installed only if no newer one has been installed meanwhile, and a feature
//! load is kept only if the installed configuration did not change while it
//! ran. Failed configurations install nothing, so they never invalidate work
//! still in flight.

use geostyle_core::error::Result;
use geostyle_core::models::{DataFrame, Feature, LayerOptions, Theme};
use geostyle_core::ports::{AssetResolver, FeatureSource};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::builder::StyleStateBuilder;
use crate::resolver::{FeatureStyler, Resolution};
use crate::style::ResolvedStyle;

/// Result of an asynchronous layer operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer configuration started before this one finished
    Superseded,
}

#[derive(Default)]
struct LayerInner {
    /// Generation of the installed styler, 0 before the first configuration
    applied: u64,
    styler: Option<FeatureStyler>,
    options: Option<LayerOptions>,
    features: Vec<Feature>,
    frame: Option<DataFrame>,
}

/// A GeoJSON layer and its style resolution state
pub struct StyleLayer {
    builder: StyleStateBuilder,
    generation: AtomicU64,
    inner: RwLock<LayerInner>,
}

impl StyleLayer {
    pub fn new(resolver: Arc<dyn AssetResolver>, theme: Theme) -> Self {
        Self {
            builder: StyleStateBuilder::new(resolver, theme),
            generation: AtomicU64::new(0),
            inner: RwLock::new(LayerInner::default()),
        }
    }

    /// Apply new layer options.
    ///
    /// Builds every style before swapping, so readers see either the old or
    /// the new configuration. The last data delivery is re-applied.
    pub async fn configure(&self, options: LayerOptions) -> Result<Completion> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Configuring layer (generation {})", generation);

        let mut styler = match FeatureStyler::build(&self.builder, &options).await {
            Ok(styler) => styler,
            Err(e) => {
                warn!("Configuration failed (generation {}): {}", generation, e);
                return Err(e);
            }
        };

        let mut inner = self.write();
        if inner.applied > generation {
            debug!("Discarding stale configuration (generation {})", generation);
            return Ok(Completion::Superseded);
        }

        if let Some(frame) = &inner.frame {
            if let Err(e) = styler.update_data(frame) {
                warn!("Failed to apply data to new configuration: {}", e);
            }
        }

        info!(
            "Layer configured with {} rules in {:?} mode (generation {})",
            styler.rule_count(),
            options.mode,
            generation
        );
        inner.applied = generation;
        inner.styler = Some(styler);
        inner.options = Some(options);
        Ok(Completion::Applied)
    }

    /// Load features from a source, dropped if the layer is reconfigured meanwhile
    pub async fn load_features(&self, source: &dyn FeatureSource) -> Result<Completion> {
        let applied = self.read().applied;
        let features = source.load().await?;

        let mut inner = self.write();
        if inner.applied != applied {
            debug!("Discarding features from {} loaded under a stale configuration", source.describe());
            return Ok(Completion::Superseded);
        }

        info!("Loaded {} features from {}", features.len(), source.describe());
        inner.features = features;
        Ok(Completion::Applied)
    }

    /// Apply a new tabular data delivery; it is kept for later reconfigurations
    pub fn update_data(&self, frame: DataFrame) -> Result<()> {
        let mut inner = self.write();
        if let Some(styler) = inner.styler.as_mut() {
            styler.update_data(&frame)?;
        }
        debug!("Data updated with {} rows", frame.len());
        inner.frame = Some(frame);
        Ok(())
    }

    /// Style for a feature; None before the first configuration
    pub fn resolve(&self, feature: &Feature) -> Option<ResolvedStyle> {
        self.read().styler.as_ref()?.resolve(feature)
    }

    pub fn resolve_explained(&self, feature: &Feature) -> Option<Resolution> {
        self.read().styler.as_ref().map(|s| s.resolve_explained(feature))
    }

    /// Resolve every loaded feature in source order and hand each to `draw`
    pub fn render_with<F>(&self, mut draw: F)
    where
        F: FnMut(&Feature, Resolution),
    {
        let inner = self.read();
        let Some(styler) = inner.styler.as_ref() else {
            return;
        };
        for feature in &inner.features {
            draw(feature, styler.resolve_explained(feature));
        }
    }

    /// Resolved styles of every loaded feature, in source order
    pub fn render(&self) -> Vec<Option<ResolvedStyle>> {
        let mut styles = Vec::new();
        self.render_with(|_, resolution| styles.push(resolution.style));
        styles
    }

    /// Whether the layer has a configuration to resolve against
    pub fn is_ready(&self) -> bool {
        self.read().styler.is_some()
    }

    /// Generation of the most recently started configuration
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Generation of the installed configuration, 0 if none
    pub fn applied_generation(&self) -> u64 {
        self.read().applied
    }

    pub fn feature_count(&self) -> usize {
        self.read().features.len()
    }

    /// Options of the active configuration
    pub fn options(&self) -> Option<LayerOptions> {
        self.read().options.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, LayerInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LayerInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
