//! Page aggregate and its embedded sections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::SectionType;
use crate::error::{PortalError, Result};
use crate::store::{Record, StoredRecord, PAGES};

/// Kind of page, used for default page generation and navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Homepage,
    About,
    Programs,
    Admissions,
    Contact,
    #[default]
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    #[default]
    Draft,
    Published,
}

/// An ordered, typed, styleable content block owned by one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub style: String,
    #[serde(default)]
    pub content: Record,
    #[serde(default)]
    pub settings: Record,
    pub order: u32,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Section {
    fn new(section_type: SectionType, style: String, order: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            section_type,
            style,
            content: Record::new(),
            settings: Record::new(),
            order,
            visible: true,
        }
    }
}

/// Partial section update.
///
/// `content` and `settings` are shallow-merged by key; other fields replace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch {
    pub style: Option<String>,
    pub content: Option<Record>,
    pub settings: Option<Record>,
    pub visible: Option<bool>,
}

impl SectionPatch {
    pub fn style(style: impl Into<String>) -> Self {
        Self {
            style: Some(style.into()),
            ..Default::default()
        }
    }

    /// A content patch for a single key
    pub fn content_field(key: impl Into<String>, value: serde_json::Value) -> Self {
        let mut content = Record::new();
        content.insert(key.into(), value);
        Self {
            content: Some(content),
            ..Default::default()
        }
    }

    pub fn visible(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Default::default()
        }
    }

    fn apply(&self, section: &mut Section) {
        if let Some(style) = &self.style {
            section.style = style.clone();
        }
        if let Some(content) = &self.content {
            for (key, value) in content {
                section.content.insert(key.clone(), value.clone());
            }
        }
        if let Some(settings) = &self.settings {
            for (key, value) in settings {
                section.settings.insert(key.clone(), value.clone());
            }
        }
        if let Some(visible) = self.visible {
            section.visible = visible;
        }
    }
}

/// Direct page field edits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(rename = "type")]
    pub page_type: Option<PageType>,
    pub status: Option<PageStatus>,
    pub show_in_header: Option<bool>,
    pub show_in_footer: Option<bool>,
}

/// Input for page creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPage {
    pub title: String,
    pub slug: String,
    #[serde(rename = "type", default)]
    pub page_type: PageType,
}

impl NewPage {
    pub fn new(title: impl Into<String>, slug: impl Into<String>, page_type: PageType) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            page_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// A tenant's page. Sections are embedded and kept sorted by `order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub tenant_id: String,
    pub title: String,
    pub slug: String,
    #[serde(rename = "type", default)]
    pub page_type: PageType,
    #[serde(default)]
    pub status: PageStatus,
    #[serde(default)]
    pub show_in_header: bool,
    #[serde(default)]
    pub show_in_footer: bool,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Slugs are non-empty and limited to `[a-z0-9-]`
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(PortalError::InvalidInput("slug must not be empty".into()));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(PortalError::InvalidInput(format!(
            "slug '{}' may only contain lowercase letters, digits and '-'",
            slug
        )));
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(PortalError::InvalidInput("title must not be empty".into()));
    }
    Ok(())
}

impl Page {
    /// A new draft page with no sections
    pub fn new(tenant_id: impl Into<String>, new_page: NewPage) -> Result<Self> {
        validate_title(&new_page.title)?;
        validate_slug(&new_page.slug)?;

        let now = Utc::now();
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            tenant_id: tenant_id.into(),
            title: new_page.title,
            slug: new_page.slug,
            page_type: new_page.page_type,
            status: PageStatus::Draft,
            show_in_header: false,
            show_in_footer: false,
            sections: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    fn index_of(&self, section_id: &str) -> Result<usize> {
        self.sections
            .iter()
            .position(|s| s.id == section_id)
            .ok_or_else(|| PortalError::SectionNotFound(section_id.to_string()))
    }

    /// Append a section with empty content
    pub fn add_section(&mut self, section_type: SectionType, style: impl Into<String>) -> &Section {
        self.renumber();
        let order = self.sections.len() as u32 + 1;
        self.sections.push(Section::new(section_type, style.into(), order));
        debug!(page_id = %self.id, %section_type, order, "Section added");

        let last = self.sections.len() - 1;
        &self.sections[last]
    }

    pub fn update_section(&mut self, section_id: &str, patch: &SectionPatch) -> Result<&Section> {
        let index = self.index_of(section_id)?;
        patch.apply(&mut self.sections[index]);
        Ok(&self.sections[index])
    }

    /// Remove a section and close the gap in `order`
    pub fn delete_section(&mut self, section_id: &str) -> Result<Section> {
        let index = self.index_of(section_id)?;
        let removed = self.sections.remove(index);
        self.renumber();
        debug!(page_id = %self.id, section_id, "Section deleted");
        Ok(removed)
    }

    /// Assign `order` by position in `ordered_ids`.
    ///
    /// The ids must be exactly the page's current section ids.
    pub fn reorder_sections<S: AsRef<str>>(&mut self, ordered_ids: &[S]) -> Result<()> {
        if ordered_ids.len() != self.sections.len() {
            return Err(PortalError::SectionSetMismatch(format!(
                "expected {} section ids, got {}",
                self.sections.len(),
                ordered_ids.len()
            )));
        }

        let mut positions = Vec::with_capacity(ordered_ids.len());
        for id in ordered_ids {
            let id = id.as_ref();
            let index = self
                .sections
                .iter()
                .position(|s| s.id == id)
                .ok_or_else(|| PortalError::SectionSetMismatch(format!("unknown section {}", id)))?;
            if positions.contains(&index) {
                return Err(PortalError::SectionSetMismatch(format!(
                    "section {} listed twice",
                    id
                )));
            }
            positions.push(index);
        }

        for (position, index) in positions.into_iter().enumerate() {
            self.sections[index].order = position as u32 + 1;
        }
        self.renumber();
        Ok(())
    }

    /// Swap a section with its neighbour. Returns false at either end.
    pub fn move_section(&mut self, section_id: &str, direction: MoveDirection) -> Result<bool> {
        self.renumber();
        let index = self.index_of(section_id)?;
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.sections.len() => index + 1,
            _ => return Ok(false),
        };

        // Positions are authoritative after the swap; sorting by the old
        // order would undo it
        self.sections.swap(index, target);
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.order = i as u32 + 1;
        }
        Ok(true)
    }

    /// Apply direct field edits; nothing changes if validation fails
    pub fn apply_patch(&mut self, patch: &PagePatch) -> Result<()> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        if let Some(slug) = &patch.slug {
            validate_slug(slug)?;
        }

        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(slug) = &patch.slug {
            self.slug = slug.clone();
        }
        if let Some(page_type) = patch.page_type {
            self.page_type = page_type;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(flag) = patch.show_in_header {
            self.show_in_header = flag;
        }
        if let Some(flag) = patch.show_in_footer {
            self.show_in_footer = flag;
        }
        Ok(())
    }

    /// Visible sections in render order
    pub fn visible_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.visible)
    }

    pub fn is_published(&self) -> bool {
        self.status == PageStatus::Published
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Sort by `order` (stable) and reassign `1..n`
    pub fn renumber(&mut self) {
        self.sections.sort_by_key(|s| s.order);
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.order = i as u32 + 1;
        }
    }
}

impl StoredRecord for Page {
    fn collection() -> &'static str {
        PAGES
    }

    fn record_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page() -> Page {
        Page::new("school-a", NewPage::new("Home", "home", PageType::Homepage)).unwrap()
    }

    fn orders(page: &Page) -> Vec<u32> {
        page.sections.iter().map(|s| s.order).collect()
    }

    fn ids(page: &Page) -> Vec<String> {
        page.sections.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_new_page_defaults() {
        let page = page();
        assert_eq!(page.status, PageStatus::Draft);
        assert!(page.sections.is_empty());
        assert_eq!(page.created_at, page.updated_at);
    }

    #[test]
    fn test_slug_validation() {
        assert!(validate_slug("about-us-2").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("About").is_err());
        assert!(validate_slug("a/b").is_err());
        assert!(Page::new("t", NewPage::new("  ", "x", PageType::Custom)).is_err());
    }

    #[test]
    fn test_add_section() {
        let mut page = page();
        let section = page.add_section(SectionType::Hero, "2").clone();
        assert_eq!(section.order, 1);
        assert_eq!(section.style, "2");
        assert!(section.visible);
        assert!(section.content.is_empty() && section.settings.is_empty());

        page.add_section(SectionType::Cta, "1");
        assert_eq!(orders(&page), vec![1, 2]);
        assert_ne!(page.sections[0].id, page.sections[1].id);
    }

    #[test]
    fn test_order_stays_contiguous() {
        let mut page = page();
        for t in [SectionType::Hero, SectionType::Features, SectionType::Cta, SectionType::Faq] {
            page.add_section(t, "1");
        }
        let all = ids(&page);

        page.delete_section(&all[1]).unwrap();
        assert_eq!(orders(&page), vec![1, 2, 3]);

        page.reorder_sections(&[all[3].clone(), all[0].clone(), all[2].clone()]).unwrap();
        assert_eq!(ids(&page), vec![all[3].clone(), all[0].clone(), all[2].clone()]);
        assert_eq!(orders(&page), vec![1, 2, 3]);

        page.add_section(SectionType::Stats, "1");
        page.delete_section(&all[0]).unwrap();
        assert_eq!(orders(&page), vec![1, 2, 3]);
    }

    #[test]
    fn test_reorder_mismatch_leaves_page_unchanged() {
        let mut page = page();
        page.add_section(SectionType::Hero, "1");
        page.add_section(SectionType::Cta, "1");
        let before = page.clone();
        let all = ids(&page);

        let err = page.reorder_sections(&[all[0].clone()]).unwrap_err();
        assert!(matches!(err, PortalError::SectionSetMismatch(_)));

        let err = page
            .reorder_sections(&[all[0].clone(), all[0].clone()])
            .unwrap_err();
        assert!(matches!(err, PortalError::SectionSetMismatch(_)));

        assert!(page.reorder_sections(&[all[0].as_str(), "ghost"]).is_err());
        assert_eq!(page, before);
    }

    #[test]
    fn test_update_section_merges_content() {
        let mut page = page();
        let id = page.add_section(SectionType::Hero, "1").id.clone();

        page.update_section(&id, &SectionPatch::content_field("title", json!("Welcome")))
            .unwrap();
        page.update_section(&id, &SectionPatch::content_field("subtitle", json!("Learn")))
            .unwrap();

        let content = &page.section(&id).unwrap().content;
        assert_eq!(content.get("title"), Some(&json!("Welcome")));
        assert_eq!(content.get("subtitle"), Some(&json!("Learn")));
        assert_eq!(content.len(), 2);
    }

    #[test]
    fn test_update_section_idempotent() {
        let mut page = page();
        let id = page.add_section(SectionType::Cta, "1").id.clone();
        let patch = SectionPatch {
            content: Some(json!({"title": "Apply", "buttonText": "Go"}).as_object().cloned().unwrap()),
            visible: Some(false),
            ..Default::default()
        };

        page.update_section(&id, &patch).unwrap();
        let once = page.section(&id).unwrap().clone();
        page.update_section(&id, &patch).unwrap();
        assert_eq!(page.section(&id).unwrap(), &once);
    }

    #[test]
    fn test_missing_section() {
        let mut page = page();
        assert!(matches!(
            page.update_section("nope", &SectionPatch::visible(false)),
            Err(PortalError::SectionNotFound(_))
        ));
        assert!(matches!(page.delete_section("nope"), Err(PortalError::SectionNotFound(_))));
    }

    #[test]
    fn test_move_section() {
        let mut page = page();
        page.add_section(SectionType::Hero, "1");
        page.add_section(SectionType::Cta, "1");
        let all = ids(&page);

        assert!(!page.move_section(&all[0], MoveDirection::Up).unwrap());
        assert!(page.move_section(&all[0], MoveDirection::Down).unwrap());
        assert_eq!(ids(&page), vec![all[1].clone(), all[0].clone()]);
        assert_eq!(orders(&page), vec![1, 2]);
        assert!(!page.move_section(&all[0], MoveDirection::Down).unwrap());
    }

    #[test]
    fn test_move_section_survives_renumber() {
        let mut page = page();
        page.add_section(SectionType::Hero, "1");
        page.add_section(SectionType::Features, "1");
        page.add_section(SectionType::Cta, "1");
        let all = ids(&page);

        assert!(page.move_section(&all[2], MoveDirection::Up).unwrap());
        let moved = vec![all[0].clone(), all[2].clone(), all[1].clone()];
        assert_eq!(ids(&page), moved);
        assert_eq!(orders(&page), vec![1, 2, 3]);

        // A later renumber (as done on save) keeps the moved layout
        page.renumber();
        assert_eq!(ids(&page), moved);
    }

    #[test]
    fn test_apply_patch_is_atomic() {
        let mut page = page();
        let bad = PagePatch {
            title: Some("New".into()),
            slug: Some("Bad Slug".into()),
            ..Default::default()
        };
        assert!(page.apply_patch(&bad).is_err());
        assert_eq!(page.title, "Home");

        let good = PagePatch {
            status: Some(PageStatus::Published),
            show_in_header: Some(true),
            ..Default::default()
        };
        page.apply_patch(&good).unwrap();
        assert!(page.is_published());
        assert!(page.show_in_header);
    }

    #[test]
    fn test_record_shape() {
        let mut page = page();
        page.add_section(SectionType::BlogPosts, "3");

        let record = page.to_record().unwrap();
        assert_eq!(record["tenantId"], "school-a");
        assert_eq!(record["type"], "homepage");
        assert_eq!(record["sections"][0]["type"], "blog_posts");

        let back = Page::from_record(record).unwrap();
        assert_eq!(back, page);
    }

    #[test]
    fn test_visible_sections() {
        let mut page = page();
        let hidden = page.add_section(SectionType::Hero, "1").id.clone();
        page.add_section(SectionType::Cta, "1");
        page.update_section(&hidden, &SectionPatch::visible(false)).unwrap();

        let visible: Vec<_> = page.visible_sections().map(|s| s.section_type).collect();
        assert_eq!(visible, vec![SectionType::Cta]);
    }
}
