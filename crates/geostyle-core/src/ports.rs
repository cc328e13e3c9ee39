//! Port trait definitions
//!
//! These traits define the collaborators the style engine consumes.
//! Adapters live next to the code that owns the concrete I/O.

pub mod assets;
pub mod source;

pub use assets::{AssetResolver, SymbolAsset};
pub use source::FeatureSource;
