//! Page composition and the save lifecycle
//!
//! - [`PageComposer`] edits one page and owns its dirty tracking, debounced
//!   autosave and manual save
//! - [`SiteEditor`] selects between pages

pub mod page_composer;
pub mod site_editor;
pub mod state;

pub use page_composer::PageComposer;
pub use site_editor::SiteEditor;
pub use state::{ComposerStatus, SaveOutcome, SaveState};
