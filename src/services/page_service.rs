//! Page service - business logic for page persistence
//!
//! Wraps the record store with tenant scoping, slug uniqueness, admin
//! gating and event emission.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::branding::{RenderContext, TenantBranding};
use crate::catalog::ThemeCatalog;
use crate::context::TenantContext;
use crate::error::{PortalError, Result, StoreError};
use crate::model::{build_default_pages, NewPage, Page, PageType};
use crate::store::{self, Record, RecordStore, StoredRecord, SCHOOLS};

use super::events::{EventBus, PortalEvent};

fn record_tenant(record: &Record) -> Option<&str> {
    record.get("tenantId").and_then(Value::as_str)
}

fn slugs_of(pages: &[Page]) -> Vec<String> {
    pages.iter().map(|p| p.slug.clone()).collect()
}

/// A navigation entry for the public site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub title: String,
    pub slug: String,
    pub href: String,
}

impl NavLink {
    fn from_page(page: &Page) -> Self {
        let href = match page.page_type {
            PageType::Homepage => "/".to_string(),
            _ => format!("/{}", page.slug),
        };
        Self {
            title: page.title.clone(),
            slug: page.slug.clone(),
            href,
        }
    }
}

/// Published pages flagged for the header and footer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub header: Vec<NavLink>,
    pub footer: Vec<NavLink>,
}

/// Page service for business logic
pub struct PageService {
    store: Arc<dyn RecordStore>,
    events: Arc<EventBus>,
    catalog: &'static ThemeCatalog,
    default_theme: Option<String>,
}

impl PageService {
    pub fn new(store: Arc<dyn RecordStore>, events: Arc<EventBus>) -> Self {
        Self {
            store,
            events,
            catalog: ThemeCatalog::builtin(),
            default_theme: None,
        }
    }

    /// Theme used when a tenant has none selected
    pub fn with_default_theme(mut self, theme_id: Option<String>) -> Self {
        self.default_theme = theme_id;
        self
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    // =========================================================================
    // Read Operations
    // =========================================================================

    /// Raw page records owned by a tenant, parseable or not
    async fn tenant_records(&self, tenant_id: &str) -> Result<Vec<Record>> {
        let records = self.store.list(Page::collection()).await?;
        Ok(records
            .into_iter()
            .filter(|r| record_tenant(r) == Some(tenant_id))
            .collect())
    }

    /// All pages of a tenant, in store order.
    ///
    /// Records that no longer parse are skipped here but still count for
    /// slug uniqueness and can still be deleted.
    pub async fn list_pages(&self, tenant_id: &str) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        for record in self.tenant_records(tenant_id).await? {
            let id = store::record_id(&record).unwrap_or_default().to_string();
            match Page::from_record(record) {
                Ok(page) => pages.push(page),
                Err(e) => warn!(tenant = %tenant_id, page_id = %id, error = %e, "Skipping malformed page record"),
            }
        }

        Ok(pages)
    }

    /// A page by id; pages of other tenants are reported as not found
    pub async fn get_page(&self, tenant_id: &str, page_id: &str) -> Result<Page> {
        let record = self
            .store
            .get(Page::collection(), page_id)
            .await?
            .ok_or_else(|| PortalError::PageNotFound(page_id.to_string()))?;

        let page = Page::from_record(record)?;
        if page.tenant_id != tenant_id {
            return Err(PortalError::PageNotFound(page_id.to_string()));
        }
        Ok(page)
    }

    pub async fn find_by_slug(&self, tenant_id: &str, slug: &str) -> Result<Option<Page>> {
        Ok(self
            .list_pages(tenant_id)
            .await?
            .into_iter()
            .find(|p| p.slug == slug))
    }

    /// Slugs in use by a tenant, including pages that fail to parse
    async fn tenant_slugs(&self, tenant_id: &str) -> Result<Vec<(String, String)>> {
        Ok(self
            .tenant_records(tenant_id)
            .await?
            .iter()
            .filter_map(|r| {
                let slug = r.get("slug").and_then(Value::as_str)?;
                let id = store::record_id(r).unwrap_or_default();
                Some((id.to_string(), slug.to_string()))
            })
            .collect())
    }

    async fn ensure_slug_free(&self, tenant_id: &str, slug: &str, page_id: Option<&str>) -> Result<()> {
        let taken = self
            .tenant_slugs(tenant_id)
            .await?
            .iter()
            .any(|(id, s)| s == slug && Some(id.as_str()) != page_id);

        if taken {
            return Err(PortalError::DuplicateSlug {
                tenant_id: tenant_id.to_string(),
                slug: slug.to_string(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Create a draft page with no sections
    pub async fn create_page(&self, ctx: &TenantContext, new_page: NewPage) -> Result<Page> {
        ctx.require_admin("create page")?;
        let page = Page::new(ctx.tenant_id(), new_page)?;
        self.ensure_slug_free(ctx.tenant_id(), &page.slug, None).await?;

        self.store.insert(Page::collection(), page.to_record()?).await?;
        info!(tenant = %ctx, page_id = %page.id, slug = %page.slug, "Created page");

        self.events.emit(PortalEvent::PageCreated {
            tenant_id: page.tenant_id.clone(),
            page_id: page.id.clone(),
            slug: page.slug.clone(),
        });

        Ok(page)
    }

    /// Replace the stored page with `page` (all top-level fields and the
    /// full section list). Returns the stored copy with a fresh `updated_at`.
    pub async fn save_page(&self, ctx: &TenantContext, page: &Page) -> Result<Page> {
        ctx.require_admin("save page")?;
        if page.tenant_id != ctx.tenant_id() {
            return Err(PortalError::PermissionDenied(format!(
                "page {} belongs to another tenant",
                page.id
            )));
        }
        self.ensure_slug_free(ctx.tenant_id(), &page.slug, Some(&page.id))
            .await?;

        let mut saved = page.clone();
        saved.renumber();
        saved.touch();

        match self.store.update(Page::collection(), saved.record_id(), saved.to_record()?).await {
            Ok(_) => {}
            Err(StoreError::NotFound { .. }) => {
                return Err(PortalError::PageNotFound(saved.id.clone()));
            }
            Err(e) => return Err(e.into()),
        }
        debug!(page_id = %saved.id, sections = saved.sections.len(), "Saved page");

        self.events.emit(PortalEvent::PageSaved {
            tenant_id: saved.tenant_id.clone(),
            page_id: saved.id.clone(),
            section_count: saved.sections.len(),
        });

        Ok(saved)
    }

    /// Irreversibly delete a page
    pub async fn delete_page(&self, ctx: &TenantContext, page_id: &str) -> Result<()> {
        ctx.require_admin("delete page")?;
        // Tenant check on the raw record so unparseable pages stay deletable
        let owned = self
            .store
            .get(Page::collection(), page_id)
            .await?
            .is_some_and(|r| record_tenant(&r) == Some(ctx.tenant_id()));
        if !owned {
            return Err(PortalError::PageNotFound(page_id.to_string()));
        }

        self.store.delete(Page::collection(), page_id).await?;
        info!(tenant = %ctx, page_id, "Deleted page");

        self.events.emit(PortalEvent::PageDeleted {
            tenant_id: ctx.tenant_id().to_string(),
            page_id: page_id.to_string(),
        });
        Ok(())
    }

    /// Create the starter pages whose slugs are still free.
    ///
    /// Section styles follow the tenant's active theme. Inserts stop at the
    /// first failure; the pages created before it are kept and named in the
    /// returned error.
    pub async fn generate_default_pages(&self, ctx: &TenantContext) -> Result<Vec<Page>> {
        ctx.require_admin("generate default pages")?;

        let existing: Vec<String> = self
            .tenant_slugs(ctx.tenant_id())
            .await?
            .into_iter()
            .map(|(_, slug)| slug)
            .collect();
        let render = self.render_context(ctx.tenant_id()).await?;

        let pages = build_default_pages(
            ctx.tenant_id(),
            |slug| existing.iter().any(|s| s == slug),
            |section_type| render.section_style(section_type),
        )?;

        let mut created: Vec<Page> = Vec::with_capacity(pages.len());
        for page in pages {
            let inserted = match page.to_record() {
                Ok(record) => self.store.insert(Page::collection(), record).await,
                Err(e) => Err(e),
            };
            if let Err(source) = inserted {
                let slugs = slugs_of(&created);
                warn!(tenant = %ctx, slug = %page.slug, created = ?slugs, error = %source, "Default page generation stopped");
                if !slugs.is_empty() {
                    self.events.emit(PortalEvent::DefaultPagesGenerated {
                        tenant_id: ctx.tenant_id().to_string(),
                        slugs: slugs.clone(),
                    });
                }
                return Err(PortalError::DefaultPagesIncomplete { created: slugs, source });
            }
            created.push(page);
        }

        info!(tenant = %ctx, count = created.len(), "Generated default pages");
        self.events.emit(PortalEvent::DefaultPagesGenerated {
            tenant_id: ctx.tenant_id().to_string(),
            slugs: slugs_of(&created),
        });

        Ok(created)
    }

    // =========================================================================
    // Branding
    // =========================================================================

    /// Branding overrides from the tenant's school record; none if absent
    pub async fn load_branding(&self, tenant_id: &str) -> Result<TenantBranding> {
        match self.store.get(SCHOOLS, tenant_id).await? {
            Some(record) => Ok(store::from_record(record)?),
            None => {
                debug!(tenant = %tenant_id, "No school record, using theme defaults");
                Ok(TenantBranding::default())
            }
        }
    }

    /// Theme and branding for one render or editing session
    pub async fn render_context(&self, tenant_id: &str) -> Result<RenderContext> {
        let branding = self.load_branding(tenant_id).await?;
        RenderContext::select(self.catalog, branding, self.default_theme.as_deref())
    }

    /// Header and footer links to published pages
    pub async fn navigation(&self, tenant_id: &str) -> Result<Navigation> {
        let pages = self.list_pages(tenant_id).await?;
        let published = || pages.iter().filter(|p| p.is_published());

        Ok(Navigation {
            header: published()
                .filter(|p| p.show_in_header)
                .map(NavLink::from_page)
                .collect(),
            footer: published()
                .filter(|p| p.show_in_footer)
                .map(NavLink::from_page)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PagePatch, PageStatus};
    use crate::store::{MemoryStore, PAGES};
    use serde_json::json;

    fn service() -> (PageService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let service = PageService::new(store.clone(), Arc::new(EventBus::new()));
        (service, store)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (service, _) = service();
        let ctx = TenantContext::admin("t1");

        let page = service
            .create_page(&ctx, NewPage::new("Home", "home", PageType::Homepage))
            .await
            .unwrap();

        let loaded = service.get_page("t1", &page.id).await.unwrap();
        assert_eq!(loaded, page);
        assert!(matches!(
            service.get_page("t2", &page.id).await,
            Err(PortalError::PageNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_visitor_cannot_write() {
        let (service, store) = service();
        let err = service
            .create_page(&TenantContext::visitor("t1"), NewPage::new("Home", "home", PageType::Homepage))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::PermissionDenied(_)));
        assert_eq!(store.count(PAGES), 0);
    }

    #[tokio::test]
    async fn test_save_rechecks_slug() {
        let (service, _) = service();
        let ctx = TenantContext::admin("t1");
        service
            .create_page(&ctx, NewPage::new("Home", "home", PageType::Homepage))
            .await
            .unwrap();
        let mut about = service
            .create_page(&ctx, NewPage::new("About", "about", PageType::About))
            .await
            .unwrap();

        about
            .apply_patch(&PagePatch {
                slug: Some("home".into()),
                ..Default::default()
            })
            .unwrap();
        assert!(matches!(
            service.save_page(&ctx, &about).await,
            Err(PortalError::DuplicateSlug { .. })
        ));
    }

    #[tokio::test]
    async fn test_save_missing_page() {
        let (service, _) = service();
        let ctx = TenantContext::admin("t1");
        let page = Page::new("t1", NewPage::new("Ghost", "ghost", PageType::Custom)).unwrap();
        assert!(matches!(
            service.save_page(&ctx, &page).await,
            Err(PortalError::PageNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_branding_and_theme_selection() {
        let (service, store) = service();
        store
            .insert(
                SCHOOLS,
                json!({"id": "t1", "name": "Hill School", "themeId": "theme-4", "primaryColor": "#111111"})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await
            .unwrap();

        let ctx = service.render_context("t1").await.unwrap();
        assert_eq!(ctx.theme().id, "theme-4");
        assert_eq!(ctx.branding().primary_color.as_deref(), Some("#111111"));

        let other = service.render_context("t2").await.unwrap();
        assert!(other.theme().is_default);
    }

    #[tokio::test]
    async fn test_configured_default_theme() {
        let store = Arc::new(MemoryStore::new());
        let service = PageService::new(store, Arc::new(EventBus::new()))
            .with_default_theme(Some("theme-13".into()));
        let ctx = service.render_context("t1").await.unwrap();
        assert_eq!(ctx.theme().name, "Ultra-Modern Neon");
    }

    #[tokio::test]
    async fn test_navigation_lists_published_pages() {
        let (service, _) = service();
        let ctx = TenantContext::admin("t1");
        let pages = service.generate_default_pages(&ctx).await.unwrap();

        let nav = service.navigation("t1").await.unwrap();
        assert!(nav.header.is_empty());

        let mut home = pages[0].clone();
        home.status = PageStatus::Published;
        service.save_page(&ctx, &home).await.unwrap();
        let mut about = pages[1].clone();
        about.status = PageStatus::Published;
        service.save_page(&ctx, &about).await.unwrap();

        let nav = service.navigation("t1").await.unwrap();
        let hrefs: Vec<_> = nav.header.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/", "/about"]);
        assert_eq!(nav.footer.len(), 1);
    }
}
