//! Service layer for school-portal
//!
//! Services sit between the UI-facing components (composer, renderer) and
//! the record store. They add:
//! - Tenant scoping and admin gating
//! - Slug uniqueness
//! - Event emission for audit/notifications
//!
//! ## Architecture
//!
//! ```text
//! SiteEditor / PageComposer / SectionRenderer
//!     ↓
//! Service Layer (PageService)
//!     ↓
//! RecordStore (memory or SQLite)
//! ```

pub mod events;
pub mod page_service;

pub use events::{spawn_listener, spawn_logging_listener, EventBus, EventListener, LoggingEventListener, PortalEvent};
pub use page_service::{NavLink, Navigation, PageService};

use std::sync::Arc;
use std::time::Duration;

use crate::composer::{PageComposer, SiteEditor};
use crate::config::PortalConfig;
use crate::context::TenantContext;
use crate::error::{PortalError, Result};
use crate::render::{ProviderRegistry, RenderedPage, SectionRenderer};
use crate::store::RecordStore;

/// Service container.
///
/// Holds the shared store, event bus and services; hand it to whatever
/// hosts the admin UI and the public site.
pub struct Services {
    pub store: Arc<dyn RecordStore>,
    pub pages: Arc<PageService>,
    pub renderer: Arc<SectionRenderer>,
    pub events: Arc<EventBus>,
    autosave_delay: Duration,
}

impl Services {
    /// Create all services over an existing store
    pub fn new(store: Arc<dyn RecordStore>, config: &PortalConfig) -> Self {
        let events = Arc::new(EventBus::with_capacity(config.event_capacity));
        let pages = PageService::new(store.clone(), events.clone())
            .with_default_theme(config.default_theme.clone());
        let renderer = SectionRenderer::new(ProviderRegistry::for_store(store.clone()));

        Self {
            store,
            pages: Arc::new(pages),
            renderer: Arc::new(renderer),
            events,
            autosave_delay: config.autosave_delay(),
        }
    }

    /// Open the configured store and build the services on it
    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        Ok(Self::new(config.open_store()?, config))
    }

    /// Replace the collection providers used for rendering
    pub fn with_providers(mut self, providers: ProviderRegistry) -> Self {
        self.renderer = Arc::new(SectionRenderer::new(providers));
        self
    }

    pub fn autosave_delay(&self) -> Duration {
        self.autosave_delay
    }

    /// Admin page-selection session
    pub async fn site_editor(&self, ctx: TenantContext) -> Result<SiteEditor> {
        SiteEditor::open(self.pages.clone(), ctx, self.autosave_delay).await
    }

    /// Editing session for one page
    pub async fn open_page(&self, ctx: TenantContext, page_id: &str) -> Result<PageComposer> {
        PageComposer::open(self.pages.clone(), ctx, page_id, self.autosave_delay).await
    }

    /// Render a tenant's published page by slug
    pub async fn render_published(&self, tenant_id: &str, slug: &str) -> Result<RenderedPage> {
        let page = self
            .pages
            .find_by_slug(tenant_id, slug)
            .await?
            .filter(|p| p.is_published())
            .ok_or_else(|| PortalError::PageNotFound(slug.to_string()))?;

        let ctx = self.pages.render_context(tenant_id).await?;
        Ok(self.renderer.render_page(&page, &ctx).await)
    }
}
