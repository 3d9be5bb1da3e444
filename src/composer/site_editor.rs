//! Site editor: page selection on top of per-page composers

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::page_composer::PageComposer;
use crate::context::TenantContext;
use crate::error::Result;
use crate::model::{NewPage, Page};
use crate::services::PageService;

/// Admin session over all pages of one tenant.
///
/// At most one page is open for editing at a time.
pub struct SiteEditor {
    ctx: TenantContext,
    service: Arc<PageService>,
    autosave_delay: Duration,
    pages: Vec<Page>,
    current: Option<PageComposer>,
}

impl SiteEditor {
    /// Load the tenant's page list. Requires an admin context.
    pub async fn open(service: Arc<PageService>, ctx: TenantContext, autosave_delay: Duration) -> Result<Self> {
        ctx.require_admin("open site editor")?;
        let pages = service.list_pages(ctx.tenant_id()).await?;
        debug!(tenant = %ctx, pages = pages.len(), "Opened site editor");

        Ok(Self {
            ctx,
            service,
            autosave_delay,
            pages,
            current: None,
        })
    }

    /// Pages as last loaded from the store
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn current(&self) -> Option<&PageComposer> {
        self.current.as_ref()
    }

    /// Reload the page list
    pub async fn refresh(&mut self) -> Result<()> {
        self.pages = self.service.list_pages(self.ctx.tenant_id()).await?;
        Ok(())
    }

    /// Open a page, first saving the current one if it has edits.
    ///
    /// When that save fails the current page stays open and the error is
    /// returned.
    pub async fn select_page(&mut self, page_id: &str) -> Result<PageComposer> {
        if let Some(current) = &self.current {
            if current.page_id() == page_id {
                return Ok(current.clone());
            }
            current.flush().await?;
            current.discard_pending().await;
        }

        let composer = PageComposer::open(
            self.service.clone(),
            self.ctx.clone(),
            page_id,
            self.autosave_delay,
        )
        .await?;
        self.current = Some(composer.clone());
        Ok(composer)
    }

    pub async fn create_page(&mut self, new_page: NewPage) -> Result<Page> {
        let page = self.service.create_page(&self.ctx, new_page).await?;
        self.pages.push(page.clone());
        Ok(page)
    }

    /// Delete a page. The list changes only once the store confirms.
    pub async fn delete_page(&mut self, page_id: &str) -> Result<()> {
        self.service.delete_page(&self.ctx, page_id).await?;

        self.pages.retain(|p| p.id != page_id);
        if let Some(current) = &self.current {
            if current.page_id() == page_id {
                current.discard_pending().await;
                self.current = None;
            }
        }
        info!(tenant = %self.ctx, page_id, "Page removed from site editor");
        Ok(())
    }

    /// Create the missing starter pages and add them to the list.
    ///
    /// On failure the list is reloaded so pages created before the error
    /// still show up.
    pub async fn generate_default_pages(&mut self) -> Result<Vec<Page>> {
        match self.service.generate_default_pages(&self.ctx).await {
            Ok(created) => {
                self.pages.extend(created.iter().cloned());
                Ok(created)
            }
            Err(e) => {
                if let Err(refresh) = self.refresh().await {
                    warn!(tenant = %self.ctx, error = %refresh, "Page list reload failed");
                }
                Err(e)
            }
        }
    }

    /// Save the open page if it has edits
    pub async fn flush(&self) -> Result<()> {
        match &self.current {
            Some(current) => current.flush().await,
            None => Ok(()),
        }
    }
}
