//! Persisted entities: pages with embedded sections

pub mod default_pages;
pub mod page;

pub use default_pages::{build_default_pages, default_slugs};
pub use page::{
    validate_slug, MoveDirection, NewPage, Page, PagePatch, PageStatus, PageType, Section,
    SectionPatch,
};
