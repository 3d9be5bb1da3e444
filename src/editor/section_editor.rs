//! Per-section editing on top of a [`PageComposer`]
//!
//! Every edit becomes a partial `update_section` call on the composer, so
//! the page's save lifecycle sees it like any other mutation.

use serde_json::Value;
use tracing::debug;

use super::fields::{fields_for, FieldKind, SectionFields};
use crate::catalog::{SectionType, StyleDefinition};
use crate::composer::PageComposer;
use crate::error::{PortalError, Result};
use crate::model::{Page, Section, SectionPatch};
use crate::store::Record;

/// Editor for one section of an open page
#[derive(Clone)]
pub struct SectionEditor {
    composer: PageComposer,
    section_id: String,
    section_type: SectionType,
}

impl SectionEditor {
    pub(crate) fn new(composer: PageComposer, section_id: String, section_type: SectionType) -> Self {
        Self {
            composer,
            section_id,
            section_type,
        }
    }

    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    pub fn section_type(&self) -> SectionType {
        self.section_type
    }

    /// Current state of the section
    pub async fn section(&self) -> Result<Section> {
        self.composer.section(&self.section_id).await
    }

    pub fn fields(&self) -> SectionFields {
        fields_for(self.section_type)
    }

    /// Styles offered by the style picker
    pub fn available_styles(&self) -> &'static [StyleDefinition] {
        self.composer.registry().list_styles(self.section_type)
    }

    /// Set one content field
    pub async fn set_field(&self, key: &str, value: Value) -> Result<Section> {
        self.composer
            .update_section(&self.section_id, SectionPatch::content_field(key, value))
            .await
    }

    /// Bind the embedded form (form_embed sections)
    pub async fn set_form(&self, form_id: &str) -> Result<Section> {
        if !matches!(self.fields(), SectionFields::FormEmbed) {
            return Err(PortalError::InvalidInput(format!(
                "{} sections do not embed forms",
                self.section_type
            )));
        }
        self.set_field(super::fields::FORM_ID_KEY, Value::String(form_id.to_string()))
            .await
    }

    /// Append an empty item to a repeater; returns the new item's index
    pub async fn add_item(&self, key: &str) -> Result<usize> {
        let item_fields = self.repeater_fields(key)?;
        let key = key.to_string();
        let section_id = self.section_id.clone();

        self.composer
            .mutate(move |page| {
                let mut items = repeater_items(page, &section_id, &key)?;
                let item: Record = item_fields
                    .iter()
                    .map(|f| (f.key.to_string(), Value::String(String::new())))
                    .collect();
                items.push(Value::Object(item));
                let index = items.len() - 1;

                page.update_section(&section_id, &SectionPatch::content_field(key, Value::Array(items)))?;
                Ok(index)
            })
            .await
    }

    /// Set a field of one repeater item
    pub async fn set_item_field(&self, key: &str, index: usize, field: &str, value: Value) -> Result<Section> {
        let item_fields = self.repeater_fields(key)?;
        if !item_fields.iter().any(|f| f.key == field) {
            return Err(PortalError::InvalidInput(format!(
                "'{}' items have no field '{}'",
                key, field
            )));
        }
        let key = key.to_string();
        let field = field.to_string();
        let section_id = self.section_id.clone();

        self.composer
            .mutate(move |page| {
                let mut items = repeater_items(page, &section_id, &key)?;
                let item = items
                    .get_mut(index)
                    .ok_or_else(|| PortalError::InvalidInput(format!("no item {} in '{}'", index, key)))?;

                match item {
                    Value::Object(map) => {
                        map.insert(field, value);
                    }
                    other => {
                        let mut map = Record::new();
                        map.insert(field, value);
                        *other = Value::Object(map);
                    }
                }

                page.update_section(&section_id, &SectionPatch::content_field(key, Value::Array(items)))
                    .cloned()
            })
            .await
    }

    pub async fn remove_item(&self, key: &str, index: usize) -> Result<Section> {
        self.repeater_fields(key)?;
        let key = key.to_string();
        let section_id = self.section_id.clone();

        self.composer
            .mutate(move |page| {
                let mut items = repeater_items(page, &section_id, &key)?;
                if index >= items.len() {
                    return Err(PortalError::InvalidInput(format!("no item {} in '{}'", index, key)));
                }
                items.remove(index);

                page.update_section(&section_id, &SectionPatch::content_field(key, Value::Array(items)))
                    .cloned()
            })
            .await
    }

    /// Switch the section to another style of its type
    pub async fn select_style(&self, style_id: &str) -> Result<Section> {
        if self
            .composer
            .registry()
            .get_style(self.section_type, style_id)
            .is_none()
        {
            return Err(PortalError::StyleNotFound {
                section_type: self.section_type.to_string(),
                style_id: style_id.to_string(),
            });
        }

        debug!(section_id = %self.section_id, style_id, "Style selected");
        self.composer
            .update_section(&self.section_id, SectionPatch::style(style_id))
            .await
    }

    pub async fn set_visible(&self, visible: bool) -> Result<Section> {
        self.composer
            .update_section(&self.section_id, SectionPatch::visible(visible))
            .await
    }

    /// Remove the section from the page. No confirmation at this layer.
    pub async fn delete(self) -> Result<Section> {
        self.composer.delete_section(&self.section_id).await
    }

    fn repeater_fields(&self, key: &str) -> Result<&'static [super::fields::EditorField]> {
        match self.fields().field(key).map(|f| f.kind) {
            Some(FieldKind::Repeater(fields)) => Ok(fields),
            _ => Err(PortalError::InvalidInput(format!(
                "'{}' is not a list field of {} sections",
                key, self.section_type
            ))),
        }
    }
}

/// Current items of a repeater; a missing or non-array value reads as empty
fn repeater_items(page: &Page, section_id: &str, key: &str) -> Result<Vec<Value>> {
    let section = page
        .section(section_id)
        .ok_or_else(|| PortalError::SectionNotFound(section_id.to_string()))?;

    Ok(match section.content.get(key) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    })
}
