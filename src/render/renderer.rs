//! Section renderer contract for the public site
//!
//! Resolves each visible section to a concrete layout and binds its content
//! plus any collection data it declares. Rendering always produces a
//! result: unknown styles fall back to a valid layout and failed data
//! fetches leave an empty, annotated data block.

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::providers::ProviderRegistry;
use crate::branding::{Aspect, RenderContext};
use crate::catalog::{SectionType, StyleDefinition, StyleKind, StyleRegistry};
use crate::model::{Page, Section};
use crate::store::Record;

/// Collection data a section needs before it can be rendered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataDependency {
    pub collection: String,
    pub limit: Option<usize>,
    /// Records must equal these top-level fields
    pub filter: Option<Record>,
}

fn as_limit(value: Option<&Value>) -> Option<usize> {
    match value? {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl DataDependency {
    /// The dependency declared by a section, if any.
    ///
    /// `content.source` names the collection, defaulting to the one implied
    /// by the section type. The limit comes from `settings.limit`, then
    /// `content.limit`; the filter from `settings.filter`.
    pub fn for_section(section: &Section) -> Option<Self> {
        let source = section
            .content
            .get("source")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let collection = match source {
            Some(source) => source.to_string(),
            None => section.section_type.collection()?.to_string(),
        };

        let limit = as_limit(section.settings.get("limit")).or_else(|| as_limit(section.content.get("limit")));
        let filter = section
            .settings
            .get("filter")
            .and_then(Value::as_object)
            .cloned();

        Some(Self {
            collection,
            limit,
            filter,
        })
    }

    fn matches(&self, record: &Record) -> bool {
        match &self.filter {
            Some(filter) => filter.iter().all(|(k, v)| record.get(k) == Some(v)),
            None => true,
        }
    }
}

/// A resolved layout implementation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub style_id: String,
    pub name: String,
    pub css_class: String,
}

impl From<&StyleDefinition> for Layout {
    fn from(style: &StyleDefinition) -> Self {
        Self {
            style_id: style.id.to_string(),
            name: style.name.to_string(),
            css_class: style.css_class(),
        }
    }
}

/// Fetched collection data bound to a section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionData {
    pub collection: String,
    pub records: Vec<Record>,
    /// Why `records` is empty, when fetching failed
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSection {
    pub section_id: String,
    pub section_type: SectionType,
    pub order: u32,
    pub layout: Layout,
    /// The stored style was not usable and a fallback layout was chosen
    pub fell_back: bool,
    pub content: Record,
    pub settings: Record,
    pub data: Option<CollectionData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub page_id: String,
    pub title: String,
    pub slug: String,
    pub theme_id: String,
    pub css_variables: Vec<(&'static str, String)>,
    pub header: Option<Layout>,
    pub footer: Option<Layout>,
    pub breadcrumb: Option<Layout>,
    pub sections: Vec<RenderedSection>,
}

/// Renders pages against the style registry and collection providers
pub struct SectionRenderer {
    registry: &'static StyleRegistry,
    providers: ProviderRegistry,
}

impl SectionRenderer {
    pub fn new(providers: ProviderRegistry) -> Self {
        Self {
            registry: StyleRegistry::builtin(),
            providers,
        }
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Effective style of a section: its own style, then the theme's style
    /// for the type, then the type's first style. The flag is set when the
    /// section's own style was not used.
    pub fn resolve_style(&self, section: &Section, ctx: &RenderContext) -> Option<(&'static StyleDefinition, bool)> {
        let registry = self.registry;
        let section_type = section.section_type;

        if let Some(style) = registry.get_style(section_type, &section.style) {
            return Some((style, false));
        }

        let themed = ctx.resolve(Aspect::SectionStyle(section_type));
        let fallback = registry
            .get_style(section_type, &themed)
            .or_else(|| registry.default_style(section_type))?;

        debug!(
            section_id = %section.id,
            %section_type,
            requested = %section.style,
            resolved = fallback.id,
            "Style not found, using fallback layout"
        );
        Some((fallback, true))
    }

    fn layout_for(&self, section: &Section, ctx: &RenderContext) -> (Layout, bool) {
        match self.resolve_style(section, ctx) {
            Some((style, fell_back)) => (Layout::from(style), fell_back),
            // Only reachable with a registry that has no styles for the type
            None => (
                Layout {
                    style_id: section.style.clone(),
                    name: section.section_type.label().to_string(),
                    css_class: format!("{}-style-{}", section.section_type.as_str().replace('_', "-"), section.style),
                },
                true,
            ),
        }
    }

    fn chrome_layout(&self, kind: StyleKind, ctx: &RenderContext, aspect: Aspect) -> Option<Layout> {
        self.registry
            .get_or_default(kind, &ctx.resolve(aspect))
            .map(|(style, _)| Layout::from(style))
    }

    async fn fetch(&self, tenant_id: &str, dependency: &DataDependency) -> CollectionData {
        let provider = match self.providers.get(&dependency.collection) {
            Some(provider) => provider,
            None => {
                warn!(collection = %dependency.collection, "No provider for collection");
                return CollectionData {
                    collection: dependency.collection.clone(),
                    records: Vec::new(),
                    error: Some(format!("no provider for collection '{}'", dependency.collection)),
                };
            }
        };

        // With a filter the limit applies after filtering
        let fetch_limit = match dependency.filter {
            Some(_) => None,
            None => dependency.limit,
        };

        match provider.list_for_tenant(tenant_id, fetch_limit).await {
            Ok(records) => CollectionData {
                collection: dependency.collection.clone(),
                records: records
                    .into_iter()
                    .filter(|r| dependency.matches(r))
                    .take(dependency.limit.unwrap_or(usize::MAX))
                    .collect(),
                error: None,
            },
            Err(e) => {
                warn!(collection = %dependency.collection, error = %e, "Collection fetch failed");
                CollectionData {
                    collection: dependency.collection.clone(),
                    records: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Render the visible sections of a page in order.
    ///
    /// Collection data for all sections is fetched concurrently.
    pub async fn render_page(&self, page: &Page, ctx: &RenderContext) -> RenderedPage {
        let mut sections: Vec<&Section> = page.visible_sections().collect();
        sections.sort_by_key(|s| s.order);

        let dependencies: Vec<Option<DataDependency>> =
            sections.iter().map(|s| DataDependency::for_section(s)).collect();

        let fetches = dependencies.iter().map(|dependency| async move {
            match dependency {
                Some(dependency) => Some(self.fetch(&page.tenant_id, dependency).await),
                None => None,
            }
        });
        let data = join_all(fetches).await;

        let rendered = sections
            .into_iter()
            .zip(data)
            .map(|(section, data)| {
                let (layout, fell_back) = self.layout_for(section, ctx);
                RenderedSection {
                    section_id: section.id.clone(),
                    section_type: section.section_type,
                    order: section.order,
                    layout,
                    fell_back,
                    content: section.content.clone(),
                    settings: section.settings.clone(),
                    data,
                }
            })
            .collect();

        RenderedPage {
            page_id: page.id.clone(),
            title: page.title.clone(),
            slug: page.slug.clone(),
            theme_id: ctx.theme().id.clone(),
            css_variables: ctx.css_variables(),
            header: self.chrome_layout(StyleKind::Header, ctx, Aspect::HeaderStyle),
            footer: self.chrome_layout(StyleKind::Footer, ctx, Aspect::FooterStyle),
            breadcrumb: self.chrome_layout(StyleKind::Breadcrumb, ctx, Aspect::BreadcrumbStyle),
            sections: rendered,
        }
    }
}
