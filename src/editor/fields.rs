//! Editable field schemas per section type

use serde::Serialize;

use crate::catalog::SectionType;

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "itemFields", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Url,
    Image,
    /// A list of items, each with the nested fields
    Repeater(&'static [EditorField]),
    /// Reference to a form record by id
    FormReference,
}

/// One editable content key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditorField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl EditorField {
    const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind }
    }

    /// Nested item fields for repeaters
    pub fn item_fields(&self) -> Option<&'static [EditorField]> {
        match self.kind {
            FieldKind::Repeater(fields) => Some(fields),
            _ => None,
        }
    }
}

/// The editor surface for a section type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "editor", content = "fields", rename_all = "snake_case")]
pub enum SectionFields {
    Fields(&'static [EditorField]),
    /// Delegates to the form sub-editor, bound by `formId`
    FormEmbed,
    /// No type-specific fields
    Placeholder,
}

impl SectionFields {
    /// Field definition for a content key, if the schema declares it
    pub fn field(&self, key: &str) -> Option<&'static EditorField> {
        match *self {
            SectionFields::Fields(fields) => fields.iter().find(|f| f.key == key),
            SectionFields::FormEmbed => (key == FORM_FIELD.key).then_some(&FORM_FIELD),
            SectionFields::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, SectionFields::Placeholder)
    }
}

/// Content key holding the embedded form's id
pub const FORM_ID_KEY: &str = "formId";

static FORM_FIELD: EditorField = EditorField::new(FORM_ID_KEY, "Form", FieldKind::FormReference);

const HERO: &[EditorField] = &[
    EditorField::new("title", "Title", FieldKind::Text),
    EditorField::new("subtitle", "Subtitle", FieldKind::Text),
    EditorField::new("description", "Description", FieldKind::TextArea),
    EditorField::new("primaryButtonText", "Primary Button Text", FieldKind::Text),
    EditorField::new("primaryButtonLink", "Primary Button Link", FieldKind::Url),
    EditorField::new("secondaryButtonText", "Secondary Button Text", FieldKind::Text),
    EditorField::new("secondaryButtonLink", "Secondary Button Link", FieldKind::Url),
    EditorField::new("backgroundImage", "Background Image", FieldKind::Image),
];

const FEATURE_ITEM: &[EditorField] = &[
    EditorField::new("title", "Title", FieldKind::Text),
    EditorField::new("description", "Description", FieldKind::TextArea),
];

const FEATURES: &[EditorField] = &[
    EditorField::new("title", "Section Title", FieldKind::Text),
    EditorField::new("items", "Features", FieldKind::Repeater(FEATURE_ITEM)),
];

const TESTIMONIAL_ITEM: &[EditorField] = &[
    EditorField::new("author", "Author", FieldKind::Text),
    EditorField::new("text", "Testimonial", FieldKind::TextArea),
];

const TESTIMONIALS: &[EditorField] = &[
    EditorField::new("title", "Section Title", FieldKind::Text),
    EditorField::new("items", "Testimonials", FieldKind::Repeater(TESTIMONIAL_ITEM)),
];

const CTA: &[EditorField] = &[
    EditorField::new("title", "Title", FieldKind::Text),
    EditorField::new("description", "Description", FieldKind::TextArea),
    EditorField::new("buttonText", "Button Text", FieldKind::Text),
    EditorField::new("buttonLink", "Button Link", FieldKind::Url),
];

const FAQ_ITEM: &[EditorField] = &[
    EditorField::new("question", "Question", FieldKind::Text),
    EditorField::new("answer", "Answer", FieldKind::TextArea),
];

const FAQ: &[EditorField] = &[
    EditorField::new("title", "Section Title", FieldKind::Text),
    EditorField::new("items", "Questions", FieldKind::Repeater(FAQ_ITEM)),
];

/// Field schema for a section type.
///
/// Exhaustive over [`SectionType`]: a new variant must be placed here.
pub fn fields_for(section_type: SectionType) -> SectionFields {
    match section_type {
        SectionType::Hero => SectionFields::Fields(HERO),
        SectionType::Features => SectionFields::Fields(FEATURES),
        SectionType::Testimonials => SectionFields::Fields(TESTIMONIALS),
        SectionType::Cta => SectionFields::Fields(CTA),
        SectionType::Faq => SectionFields::Fields(FAQ),
        SectionType::FormEmbed => SectionFields::FormEmbed,
        SectionType::Gallery
        | SectionType::BlogPosts
        | SectionType::Announcements
        | SectionType::Classes
        | SectionType::Programs
        | SectionType::Courses
        | SectionType::AcademicCalendar
        | SectionType::ResultChecker
        | SectionType::Products
        | SectionType::About
        | SectionType::Stats
        | SectionType::Team
        | SectionType::Contact
        | SectionType::Events => SectionFields::Placeholder,
    }
}
