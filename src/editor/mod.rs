//! Admin-facing section editing

pub mod fields;
pub mod section_editor;

pub use fields::{fields_for, EditorField, FieldKind, SectionFields, FORM_ID_KEY};
pub use section_editor::SectionEditor;
