//! Static catalogs: section types, styles and themes
//!
//! Both registries are process-wide and immutable after first use, so they
//! are handed out as `&'static` references and read without locking.

pub mod section_type;
pub mod styles;
pub mod themes;

pub use section_type::SectionType;
pub use styles::{StyleDefinition, StyleKind, StyleRegistry};
pub use themes::{ColorScheme, Theme, ThemeCatalog, ThemeCategory, Typography, FALLBACK_STYLE};
