//! Branding resolution
//!
//! Merges a tenant's explicit branding overrides with the selected theme.
//! Precedence per aspect: non-empty tenant override, then the theme's value,
//! then a literal default. Resolution is a pure function over values that
//! are already loaded.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::catalog::{SectionType, Theme, ThemeCatalog, FALLBACK_STYLE};
use crate::error::{PortalError, Result};

/// Tenant-level overrides, read from the tenant's `schools` record.
///
/// Unknown fields of the school record are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantBranding {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub font_family: Option<String>,
    pub heading_font: Option<String>,
    #[serde(alias = "selectedTheme")]
    pub theme_id: Option<String>,
    pub header_style: Option<String>,
    pub footer_style: Option<String>,
    pub blog_post_style: Option<String>,
    pub blog_archive_style: Option<String>,
    pub announcement_post_style: Option<String>,
    pub announcement_archive_style: Option<String>,
    pub breadcrumb_style: Option<String>,
}

impl TenantBranding {
    fn archive_override(&self, section_type: SectionType) -> Option<&str> {
        match section_type {
            SectionType::BlogPosts => self.blog_archive_style.as_deref(),
            SectionType::Announcements => self.announcement_archive_style.as_deref(),
            _ => None,
        }
    }

    fn single_post_override(&self, section_type: SectionType) -> Option<&str> {
        match section_type {
            SectionType::BlogPosts => self.blog_post_style.as_deref(),
            SectionType::Announcements => self.announcement_post_style.as_deref(),
            _ => None,
        }
    }
}

/// A single resolvable presentation value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    PrimaryColor,
    SecondaryColor,
    AccentColor,
    BackgroundColor,
    TextColor,
    FontFamily,
    HeadingFont,
    SectionStyle(SectionType),
    ArchiveStyle(SectionType),
    SinglePostStyle(SectionType),
    HeaderStyle,
    FooterStyle,
    BreadcrumbStyle,
}

impl Aspect {
    /// Value used when neither branding nor theme provide one
    pub fn literal_default(&self) -> &'static str {
        match self {
            Self::PrimaryColor => "#2563eb",
            Self::SecondaryColor => "#64748b",
            Self::AccentColor => "#f59e0b",
            Self::BackgroundColor => "#ffffff",
            Self::TextColor => "#1f2937",
            Self::FontFamily | Self::HeadingFont => "Inter",
            Self::SectionStyle(_)
            | Self::ArchiveStyle(_)
            | Self::SinglePostStyle(_)
            | Self::HeaderStyle
            | Self::FooterStyle
            | Self::BreadcrumbStyle => FALLBACK_STYLE,
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryColor => write!(f, "primaryColor"),
            Self::SecondaryColor => write!(f, "secondaryColor"),
            Self::AccentColor => write!(f, "accentColor"),
            Self::BackgroundColor => write!(f, "backgroundColor"),
            Self::TextColor => write!(f, "textColor"),
            Self::FontFamily => write!(f, "fontFamily"),
            Self::HeadingFont => write!(f, "headingFont"),
            Self::SectionStyle(t) => write!(f, "sectionStyle({})", t),
            Self::ArchiveStyle(t) => write!(f, "archiveStyle({})", t),
            Self::SinglePostStyle(t) => write!(f, "singlePostStyle({})", t),
            Self::HeaderStyle => write!(f, "headerStyle"),
            Self::FooterStyle => write!(f, "footerStyle"),
            Self::BreadcrumbStyle => write!(f, "breadcrumbStyle"),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Effective value of `aspect` for the given theme and branding
pub fn resolve(theme: &Theme, branding: &TenantBranding, aspect: Aspect) -> String {
    let colors = &theme.color_scheme;
    let fonts = &theme.typography;

    let (tenant, themed): (Option<&str>, Option<&str>) = match aspect {
        Aspect::PrimaryColor => (branding.primary_color.as_deref(), Some(colors.primary.as_str())),
        Aspect::SecondaryColor => (branding.secondary_color.as_deref(), Some(colors.secondary.as_str())),
        Aspect::AccentColor => (branding.accent_color.as_deref(), Some(colors.accent.as_str())),
        Aspect::BackgroundColor => (branding.background_color.as_deref(), Some(colors.background.as_str())),
        Aspect::TextColor => (branding.text_color.as_deref(), Some(colors.text.as_str())),
        Aspect::FontFamily => (branding.font_family.as_deref(), Some(fonts.font_family.as_str())),
        Aspect::HeadingFont => (branding.heading_font.as_deref(), Some(fonts.heading_font.as_str())),
        Aspect::SectionStyle(t) => (None, theme.section_styles.get(&t).map(String::as_str)),
        Aspect::ArchiveStyle(t) => (
            branding.archive_override(t),
            theme.archive_styles.get(&t).map(String::as_str),
        ),
        Aspect::SinglePostStyle(t) => (
            branding.single_post_override(t),
            theme.single_post_styles.get(&t).map(String::as_str),
        ),
        Aspect::HeaderStyle => (branding.header_style.as_deref(), None),
        Aspect::FooterStyle => (branding.footer_style.as_deref(), None),
        Aspect::BreadcrumbStyle => (branding.breadcrumb_style.as_deref(), None),
    };

    non_empty(tenant)
        .or_else(|| non_empty(themed))
        .unwrap_or_else(|| aspect.literal_default())
        .to_string()
}

/// Theme and branding applied to one render or editing session.
///
/// Carries what a browser front end would push into CSS custom properties;
/// nothing here is global.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    theme: Theme,
    branding: TenantBranding,
}

impl RenderContext {
    pub fn new(theme: Theme, branding: TenantBranding) -> Self {
        Self { theme, branding }
    }

    /// Pick the tenant's theme: branding selection, then `fallback_theme`,
    /// then the catalog default.
    pub fn select(
        catalog: &ThemeCatalog,
        branding: TenantBranding,
        fallback_theme: Option<&str>,
    ) -> Result<Self> {
        let by_id = |id: Option<&str>| {
            let id = non_empty(id)?;
            let theme = catalog.get_theme(id);
            if theme.is_none() {
                warn!(theme_id = %id, "Unknown theme id, falling back");
            }
            theme
        };

        let theme = by_id(branding.theme_id.as_deref())
            .or_else(|| by_id(fallback_theme))
            .or_else(|| catalog.default_theme())
            .ok_or_else(|| PortalError::Config("theme catalog is empty".into()))?
            .clone();

        Ok(Self::new(theme, branding))
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn branding(&self) -> &TenantBranding {
        &self.branding
    }

    pub fn resolve(&self, aspect: Aspect) -> String {
        resolve(&self.theme, &self.branding, aspect)
    }

    /// Default style for newly added sections of this type
    pub fn section_style(&self, section_type: SectionType) -> String {
        self.resolve(Aspect::SectionStyle(section_type))
    }

    /// Custom properties for the document root
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--color-primary", self.resolve(Aspect::PrimaryColor)),
            ("--color-secondary", self.resolve(Aspect::SecondaryColor)),
            ("--color-accent", self.resolve(Aspect::AccentColor)),
            ("--color-background", self.resolve(Aspect::BackgroundColor)),
            ("--color-text", self.resolve(Aspect::TextColor)),
            ("--font-family", self.resolve(Aspect::FontFamily)),
            ("--font-heading", self.resolve(Aspect::HeadingFont)),
        ]
    }
}
