//! Page composer: in-memory editing of one page with debounced autosave
//!
//! ## Concurrency
//!
//! All state lives behind one tokio `Mutex`. At most one save is in flight;
//! mutations arriving meanwhile are applied to the in-memory page and
//! persisted by the next save. A pending autosave timer is cancelled before
//! any manual save starts, and is re-armed by every mutation.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{watch, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::state::{ComposerStatus, SaveOutcome, SaveState};
use crate::branding::RenderContext;
use crate::catalog::{SectionType, StyleRegistry};
use crate::context::TenantContext;
use crate::editor::SectionEditor;
use crate::error::{PortalError, Result};
use crate::model::{MoveDirection, Page, PagePatch, Section, SectionPatch};
use crate::services::{EventBus, PageService, PortalEvent};

struct PendingTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

struct Inner {
    page: Page,
    state: SaveState,
    revision: u64,
    saved_revision: u64,
    timer: Option<PendingTimer>,
    timer_generation: u64,
    last_error: Option<String>,
}

impl Inner {
    fn status(&self) -> ComposerStatus {
        ComposerStatus {
            state: self.state,
            revision: self.revision,
            saved_revision: self.saved_revision,
            last_error: self.last_error.clone(),
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.handle.abort();
        }
    }
}

struct Shared {
    page_id: String,
    ctx: TenantContext,
    service: Arc<PageService>,
    render: RenderContext,
    registry: &'static StyleRegistry,
    delay: Duration,
    inner: Mutex<Inner>,
    status_tx: watch::Sender<ComposerStatus>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.inner.get_mut().cancel_timer();
    }
}

/// Editing session for a single page.
///
/// Cheap to clone; clones share the same page and save lifecycle.
#[derive(Clone)]
pub struct PageComposer {
    shared: Arc<Shared>,
}

impl PageComposer {
    /// Load a page for editing. Requires an admin context.
    pub async fn open(
        service: Arc<PageService>,
        ctx: TenantContext,
        page_id: &str,
        autosave_delay: Duration,
    ) -> Result<Self> {
        ctx.require_admin("edit page")?;
        let page = service.get_page(ctx.tenant_id(), page_id).await?;
        let render = service.render_context(ctx.tenant_id()).await?;
        debug!(page_id, theme = %render.theme().id, "Opened page composer");

        Ok(Self::with_page(service, ctx, page, render, autosave_delay))
    }

    pub(crate) fn with_page(
        service: Arc<PageService>,
        ctx: TenantContext,
        page: Page,
        render: RenderContext,
        autosave_delay: Duration,
    ) -> Self {
        let page_id = page.id.clone();
        let inner = Inner {
            page,
            state: SaveState::Clean,
            revision: 0,
            saved_revision: 0,
            timer: None,
            timer_generation: 0,
            last_error: None,
        };
        let (status_tx, _) = watch::channel(inner.status());

        Self {
            shared: Arc::new(Shared {
                page_id,
                ctx,
                service,
                render,
                registry: StyleRegistry::builtin(),
                delay: autosave_delay,
                inner: Mutex::new(inner),
                status_tx,
            }),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Snapshot of the in-memory page
    pub async fn page(&self) -> Page {
        self.shared.inner.lock().await.page.clone()
    }

    pub fn page_id(&self) -> &str {
        &self.shared.page_id
    }

    pub async fn section(&self, section_id: &str) -> Result<Section> {
        self.shared
            .inner
            .lock()
            .await
            .page
            .section(section_id)
            .cloned()
            .ok_or_else(|| PortalError::SectionNotFound(section_id.to_string()))
    }

    pub fn status(&self) -> ComposerStatus {
        self.shared.status_tx.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ComposerStatus> {
        self.shared.status_tx.subscribe()
    }

    pub fn render_context(&self) -> &RenderContext {
        &self.shared.render
    }

    pub fn context(&self) -> &TenantContext {
        &self.shared.ctx
    }

    pub(crate) fn registry(&self) -> &'static StyleRegistry {
        self.shared.registry
    }

    pub(crate) fn events(&self) -> &Arc<EventBus> {
        self.shared.service.events()
    }

    /// Editor bound to one section of this page
    pub async fn section_editor(&self, section_id: &str) -> Result<SectionEditor> {
        let section = self.section(section_id).await?;
        Ok(SectionEditor::new(self.clone(), section.id, section.section_type))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Apply a mutation to the in-memory page.
    ///
    /// `f` must leave the page untouched when it fails.
    pub(crate) async fn mutate<T>(&self, f: impl FnOnce(&mut Page) -> Result<T> + Send) -> Result<T> {
        let mut inner = self.shared.inner.lock().await;
        let out = f(&mut inner.page)?;
        self.record_mutation(&mut inner);
        Ok(out)
    }

    fn record_mutation(&self, inner: &mut Inner) {
        inner.revision += 1;
        inner.state = inner.state.on_mutation();
        if inner.state == SaveState::Dirty {
            self.schedule_autosave(inner);
        }
        self.publish(inner);
    }

    /// Append a section styled per the active theme
    pub async fn add_section(&self, section_type: SectionType) -> Result<Section> {
        let style = self.theme_style(section_type);
        self.mutate(|page| Ok(page.add_section(section_type, style).clone()))
            .await
    }

    /// The active theme's style for a type, if the registry knows it
    fn theme_style(&self, section_type: SectionType) -> String {
        let registry = self.shared.registry;
        let themed = self.shared.render.section_style(section_type);
        if registry.get_style(section_type, &themed).is_some() {
            return themed;
        }
        registry
            .default_style(section_type)
            .map(|s| s.id.to_string())
            .unwrap_or(themed)
    }

    pub async fn update_section(&self, section_id: &str, patch: SectionPatch) -> Result<Section> {
        self.mutate(|page| page.update_section(section_id, &patch).cloned())
            .await
    }

    pub async fn delete_section(&self, section_id: &str) -> Result<Section> {
        self.mutate(|page| page.delete_section(section_id)).await
    }

    pub async fn reorder_sections<S: AsRef<str> + Sync>(&self, ordered_ids: &[S]) -> Result<()> {
        self.mutate(|page| page.reorder_sections(ordered_ids)).await
    }

    /// Returns false (and changes nothing) at either end of the list
    pub async fn move_section(&self, section_id: &str, direction: MoveDirection) -> Result<bool> {
        let mut inner = self.shared.inner.lock().await;
        if !inner.page.move_section(section_id, direction)? {
            return Ok(false);
        }
        self.record_mutation(&mut inner);
        Ok(true)
    }

    /// Title, slug, type, status and navigation flags
    pub async fn update_page(&self, patch: PagePatch) -> Result<()> {
        self.mutate(|page| page.apply_patch(&patch)).await
    }

    // =========================================================================
    // Saving
    // =========================================================================

    /// Save immediately, cancelling any pending autosave
    pub async fn save_now(&self) -> Result<SaveOutcome> {
        let mut inner = self.shared.inner.lock().await;
        match inner.state {
            SaveState::Saving => Ok(SaveOutcome::InFlight),
            SaveState::Clean => {
                inner.cancel_timer();
                Ok(SaveOutcome::UpToDate)
            }
            SaveState::Dirty | SaveState::SaveFailed => {
                inner.cancel_timer();
                self.run_save(inner).await
            }
        }
    }

    /// Wait for any in-flight save, then save until clean
    pub async fn flush(&self) -> Result<()> {
        loop {
            let mut rx = self.subscribe_state();
            rx.wait_for(|s| s.state != SaveState::Saving)
                .await
                .map_err(|e| PortalError::InvalidInput(format!("composer closed: {}", e)))?;

            match self.save_now().await? {
                SaveOutcome::UpToDate => return Ok(()),
                SaveOutcome::Saved { .. } if !self.status().state.has_unsaved_changes() => {
                    return Ok(())
                }
                _ => continue,
            }
        }
    }

    /// Cancel a pending autosave without saving
    pub async fn discard_pending(&self) {
        self.shared.inner.lock().await.cancel_timer();
    }

    async fn run_save(&self, mut inner: MutexGuard<'_, Inner>) -> Result<SaveOutcome> {
        debug_assert!(inner.state.can_save());
        inner.state = SaveState::Saving;
        let snapshot = inner.page.clone();
        let revision = inner.revision;
        self.publish(&inner);
        drop(inner);

        let result = self.shared.service.save_page(&self.shared.ctx, &snapshot).await;

        let mut inner = self.shared.inner.lock().await;
        let buffered = inner.revision > revision;

        match &result {
            Ok(saved) => {
                inner.saved_revision = revision;
                inner.last_error = None;
                inner.page.updated_at = saved.updated_at;
                debug!(page_id = %saved.id, revision, "Page persisted");
            }
            Err(e) => {
                warn!(page_id = %snapshot.id, error = %e, "Save failed");
                inner.last_error = Some(e.to_string());
                self.events().emit(PortalEvent::SaveFailed {
                    page_id: snapshot.id.clone(),
                    error: e.to_string(),
                });
            }
        }

        inner.state = inner.state.on_save_finished(result.is_ok(), buffered);
        if buffered {
            debug!(page_id = %snapshot.id, "Edits arrived during save, rescheduling");
            self.schedule_autosave(&mut inner);
        }
        self.publish(&inner);

        result.map(|_| SaveOutcome::Saved { revision })
    }

    fn schedule_autosave(&self, inner: &mut Inner) {
        inner.cancel_timer();
        inner.timer_generation += 1;
        let generation = inner.timer_generation;

        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let delay = self.shared.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = weak.upgrade() {
                PageComposer { shared }.autosave(generation).await;
            }
        });

        inner.timer = Some(PendingTimer { generation, handle });
    }

    async fn autosave(&self, generation: u64) {
        let mut inner = self.shared.inner.lock().await;
        match &inner.timer {
            Some(timer) if timer.generation == generation => {}
            _ => return,
        }
        // Detach rather than abort: this task is the timer
        inner.timer = None;

        if !inner.state.can_save() {
            return;
        }

        info!(page_id = %inner.page.id, "Autosaving page");
        if let Err(e) = self.run_save(inner).await {
            debug!(error = %e, "Autosave left page in save_failed");
        }
    }

    fn publish(&self, inner: &Inner) {
        self.shared.status_tx.send_replace(inner.status());
    }
}
