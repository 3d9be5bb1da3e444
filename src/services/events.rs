//! Page lifecycle notifications
//!
//! The page service and composers announce creates, saves, deletes and
//! failed saves on a broadcast channel. Listeners are optional; an audit
//! log or a cache invalidator can subscribe without the services knowing.

use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

/// Buffered events per subscriber before the slowest one starts lagging
const DEFAULT_CAPACITY: usize = 256;

/// Events emitted by the page service and composer
#[derive(Debug, Clone, PartialEq)]
pub enum PortalEvent {
    PageCreated {
        tenant_id: String,
        page_id: String,
        slug: String,
    },
    PageSaved {
        tenant_id: String,
        page_id: String,
        section_count: usize,
    },
    PageDeleted {
        tenant_id: String,
        page_id: String,
    },
    SaveFailed {
        page_id: String,
        error: String,
    },
    DefaultPagesGenerated {
        tenant_id: String,
        slugs: Vec<String>,
    },
}

/// Reacts to portal events synchronously, in emission order
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &PortalEvent);
}

/// Fan-out of [`PortalEvent`]s to any number of subscribers
pub struct EventBus {
    sender: broadcast::Sender<PortalEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// `capacity` is clamped to at least one slot
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event; returns how many subscribers will see it
    pub fn emit(&self, event: PortalEvent) -> usize {
        trace!(?event, "portal event");
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PortalEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns events into structured log lines
pub struct LoggingEventListener;

impl EventListener for LoggingEventListener {
    fn on_event(&self, event: &PortalEvent) {
        match event {
            PortalEvent::PageCreated { tenant_id, page_id, slug } => {
                info!(tenant = %tenant_id, page = %page_id, slug = %slug, "Page created");
            }
            PortalEvent::PageSaved { tenant_id, page_id, section_count } => {
                info!(tenant = %tenant_id, page = %page_id, sections = section_count, "Page saved");
            }
            PortalEvent::PageDeleted { tenant_id, page_id } => {
                info!(tenant = %tenant_id, page = %page_id, "Page deleted");
            }
            PortalEvent::SaveFailed { page_id, error } => {
                warn!(page = %page_id, error = %error, "Page save failed");
            }
            PortalEvent::DefaultPagesGenerated { tenant_id, slugs } => {
                info!(tenant = %tenant_id, count = slugs.len(), "Default pages generated");
            }
        }
    }
}

/// Drive `listener` from the bus on a background task.
///
/// The task ends once every handle to the bus is gone.
pub fn spawn_listener<L>(bus: &EventBus, listener: L) -> JoinHandle<()>
where
    L: EventListener + 'static,
{
    let mut receiver = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => listener.on_event(&event),
                Err(RecvError::Lagged(missed)) => debug!(missed, "Listener fell behind the event bus"),
                Err(RecvError::Closed) => return,
            }
        }
    })
}

/// [`spawn_listener`] with a [`LoggingEventListener`]
pub fn spawn_logging_listener(bus: Arc<EventBus>) -> JoinHandle<()> {
    spawn_listener(&bus, LoggingEventListener)
}
