//! Public-site rendering
//!
//! - [`SectionRenderer`] resolves layouts and binds collection data
//! - [`ProviderRegistry`] maps collection names to [`CollectionProvider`]s

pub mod providers;
pub mod renderer;

pub use providers::{CollectionProvider, ProviderRegistry, StoreCollectionProvider, DYNAMIC_COLLECTIONS};
pub use renderer::{CollectionData, DataDependency, Layout, RenderedPage, RenderedSection, SectionRenderer};
