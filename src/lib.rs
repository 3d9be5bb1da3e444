//! School portal page composition and theming
//!
//! Tenants (schools) assemble pages from ordered, typed sections. Each
//! section is bound to one of several interchangeable styles, and the
//! tenant's branding cascades over a selected theme into what is rendered.
//!
//! ## Architecture
//!
//! ```text
//! SiteEditor ─► PageComposer ─► SectionEditor          (admin)
//!                   │ debounced autosave
//!                   ▼
//!              PageService ─► EventBus
//!                   │
//!                   ▼
//!              RecordStore (MemoryStore | SqliteStore)
//!                   ▲
//! SectionRenderer ──┘ via ProviderRegistry              (public site)
//!      │
//!      ▼
//! RenderContext (Theme + TenantBranding) + StyleRegistry
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use school_portal::{NewPage, PageType, PortalConfig, SectionType, Services, TenantContext};
//!
//! # async fn run() -> school_portal::Result<()> {
//! let config = PortalConfig::default();
//! let services = Services::from_config(&config)?;
//! let admin = TenantContext::admin("school-1");
//!
//! let page = services
//!     .pages
//!     .create_page(&admin, NewPage::new("Home", "home", PageType::Homepage))
//!     .await?;
//! let composer = services.open_page(admin, &page.id).await?;
//! composer.add_section(SectionType::Hero).await?;
//! composer.save_now().await?;
//! # Ok(())
//! # }
//! ```

pub mod branding;
pub mod catalog;
pub mod composer;
pub mod config;
pub mod context;
pub mod editor;
pub mod error;
pub mod logging;
pub mod model;
pub mod render;
pub mod services;
pub mod store;

pub use branding::{resolve, Aspect, RenderContext, TenantBranding};
pub use catalog::{SectionType, StyleDefinition, StyleKind, StyleRegistry, Theme, ThemeCatalog};
pub use composer::{ComposerStatus, PageComposer, SaveOutcome, SaveState, SiteEditor};
pub use config::PortalConfig;
pub use context::TenantContext;
pub use editor::{SectionEditor, SectionFields};
pub use error::{PortalError, Result, StoreError};
pub use model::{MoveDirection, NewPage, Page, PagePatch, PageStatus, PageType, Section, SectionPatch};
pub use render::{CollectionProvider, ProviderRegistry, RenderedPage, RenderedSection, SectionRenderer};
pub use services::{EventBus, PageService, PortalEvent, Services};
pub use store::{MemoryStore, Record, RecordStore, SqliteStore};
