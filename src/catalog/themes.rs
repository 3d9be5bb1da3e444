//! Theme catalog
//!
//! Whole-site presets: a color scheme, typography and the default style
//! number for each section type the theme cares about. Contains 26 built-in
//! themes, `theme-1` ("Classic Academy") being the default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::section_type::SectionType;

/// Style number used when a theme declares nothing for a section type
pub const FALLBACK_STYLE: &str = "1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeCategory {
    Classic,
    Modern,
    Minimal,
    Playful,
    Elegant,
    Corporate,
    Nature,
    Creative,
    Bold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub heading_font: String,
    pub body_font: String,
}

/// A whole-site visual preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: ThemeCategory,
    pub color_scheme: ColorScheme,
    pub typography: Typography,
    /// Default style number per section type
    #[serde(default)]
    pub section_styles: BTreeMap<SectionType, String>,
    /// Default archive style for listing pages (blog, announcements)
    #[serde(default)]
    pub archive_styles: BTreeMap<SectionType, String>,
    /// Default single-post style (blog, announcements)
    #[serde(default)]
    pub single_post_styles: BTreeMap<SectionType, String>,
    #[serde(default)]
    pub is_default: bool,
}

impl Theme {
    /// Default style number for a section type, `"1"` when undeclared
    pub fn style_for(&self, section_type: SectionType) -> &str {
        self.section_styles
            .get(&section_type)
            .map(String::as_str)
            .unwrap_or(FALLBACK_STYLE)
    }

    pub fn archive_style_for(&self, section_type: SectionType) -> &str {
        self.archive_styles
            .get(&section_type)
            .map(String::as_str)
            .unwrap_or(FALLBACK_STYLE)
    }

    pub fn single_post_style_for(&self, section_type: SectionType) -> &str {
        self.single_post_styles
            .get(&section_type)
            .map(String::as_str)
            .unwrap_or(FALLBACK_STYLE)
    }
}

/// Ordered, read-only collection of themes
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// Build a catalog from themes in registration order
    pub fn new(themes: Vec<Theme>) -> Self {
        Self { themes }
    }

    /// The built-in catalog, built on first use
    pub fn builtin() -> &'static ThemeCatalog {
        static CATALOG: OnceLock<ThemeCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| ThemeCatalog::new(THEME_SEEDS.iter().map(ThemeSeed::build).collect()))
    }

    pub fn list_themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn get_theme(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    /// The theme flagged as default, else the first registered one.
    ///
    /// Returns `None` only for an empty catalog.
    pub fn default_theme(&self) -> Option<&Theme> {
        self.themes
            .iter()
            .find(|t| t.is_default)
            .or_else(|| self.themes.first())
    }

    pub fn style_for<'a>(&self, theme: &'a Theme, section_type: SectionType) -> &'a str {
        theme.style_for(section_type)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

// =============================================================================
// Built-in themes
// =============================================================================

/// Section types every built-in theme declares, in seed column order
const SEED_SECTION_ORDER: [SectionType; 8] = [
    SectionType::Hero,
    SectionType::Features,
    SectionType::Testimonials,
    SectionType::Cta,
    SectionType::Gallery,
    SectionType::BlogPosts,
    SectionType::Announcements,
    SectionType::About,
];

/// Post types with archive/single-post defaults, in seed column order
const SEED_POST_ORDER: [SectionType; 2] = [SectionType::BlogPosts, SectionType::Announcements];

struct ThemeSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: ThemeCategory,
    /// primary, secondary, accent, background, text
    colors: [&'static str; 5],
    /// family, heading, body
    fonts: [&'static str; 3],
    sections: [&'static str; 8],
    archive: [&'static str; 2],
    single: [&'static str; 2],
}

impl ThemeSeed {
    fn build(&self) -> Theme {
        let [primary, secondary, accent, background, text] = self.colors;
        let [font_family, heading_font, body_font] = self.fonts;

        let pair = |order: &[SectionType], values: &[&str]| {
            order
                .iter()
                .zip(values)
                .map(|(t, v)| (*t, v.to_string()))
                .collect::<BTreeMap<_, _>>()
        };

        Theme {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            category: self.category,
            color_scheme: ColorScheme {
                primary: primary.to_string(),
                secondary: secondary.to_string(),
                accent: accent.to_string(),
                background: background.to_string(),
                text: text.to_string(),
            },
            typography: Typography {
                font_family: font_family.to_string(),
                heading_font: heading_font.to_string(),
                body_font: body_font.to_string(),
            },
            section_styles: pair(&SEED_SECTION_ORDER[..], &self.sections[..]),
            archive_styles: pair(&SEED_POST_ORDER[..], &self.archive[..]),
            single_post_styles: pair(&SEED_POST_ORDER[..], &self.single[..]),
            is_default: self.id == "theme-1",
        }
    }
}

// Section columns: hero, features, testimonials, cta, gallery, blog_posts, announcements, about
const THEME_SEEDS: &[ThemeSeed] = &[
    ThemeSeed {
        id: "theme-1",
        name: "Classic Academy",
        description: "Navy and gold with traditional serif headings",
        category: ThemeCategory::Classic,
        colors: ["#1e3a8a", "#475569", "#d97706", "#ffffff", "#1f2937"],
        fonts: ["Inter", "Merriweather", "Inter"],
        sections: ["1", "1", "1", "1", "1", "1", "1", "1"],
        archive: ["1", "1"],
        single: ["1", "1"],
    },
    ThemeSeed {
        id: "theme-2",
        name: "Modern Campus",
        description: "Clean blue palette with split layouts",
        category: ThemeCategory::Modern,
        colors: ["#2563eb", "#0f172a", "#22d3ee", "#f8fafc", "#0f172a"],
        fonts: ["Inter", "Poppins", "Inter"],
        sections: ["2", "4", "2", "2", "2", "3", "3", "3"],
        archive: ["4", "3"],
        single: ["2", "1"],
    },
    ThemeSeed {
        id: "theme-3",
        name: "Art Studio",
        description: "Black on white with generous whitespace",
        category: ThemeCategory::Minimal,
        colors: ["#111827", "#6b7280", "#10b981", "#ffffff", "#111827"],
        fonts: ["Inter", "Inter", "Inter"],
        sections: ["4", "3", "3", "4", "1", "2", "4", "2"],
        archive: ["2", "2"],
        single: ["4", "4"],
    },
    ThemeSeed {
        id: "theme-4",
        name: "Vibrant Kids",
        description: "Bright primaries and rounded shapes for primary schools",
        category: ThemeCategory::Playful,
        colors: ["#f97316", "#8b5cf6", "#facc15", "#fffbeb", "#1f2937"],
        fonts: ["Nunito", "Baloo 2", "Nunito"],
        sections: ["5", "1", "2", "2", "4", "1", "1", "3"],
        archive: ["1", "1"],
        single: ["1", "1"],
    },
    ThemeSeed {
        id: "theme-5",
        name: "Elegant Prep",
        description: "Burgundy and cream for preparatory schools",
        category: ThemeCategory::Elegant,
        colors: ["#7f1d1d", "#78716c", "#ca8a04", "#fdfbf7", "#292524"],
        fonts: ["Lora", "Playfair Display", "Lora"],
        sections: ["1", "2", "3", "2", "3", "4", "3", "4"],
        archive: ["5", "3"],
        single: ["5", "3"],
    },
    ThemeSeed {
        id: "theme-6",
        name: "Corporate Institute",
        description: "Professional slate tones for colleges and institutes",
        category: ThemeCategory::Corporate,
        colors: ["#0f766e", "#334155", "#f59e0b", "#ffffff", "#1e293b"],
        fonts: ["Roboto", "Roboto Slab", "Roboto"],
        sections: ["2", "1", "1", "1", "1", "3", "4", "1"],
        archive: ["3", "2"],
        single: ["3", "3"],
    },
    ThemeSeed {
        id: "theme-7",
        name: "Nature Green",
        description: "Leafy greens and earthy neutrals",
        category: ThemeCategory::Nature,
        colors: ["#15803d", "#65a30d", "#ca8a04", "#f7fee7", "#1a2e05"],
        fonts: ["Open Sans", "Lora", "Open Sans"],
        sections: ["1", "2", "1", "3", "2", "1", "1", "1"],
        archive: ["1", "1"],
        single: ["1", "1"],
    },
    ThemeSeed {
        id: "theme-8",
        name: "Ocean Blue",
        description: "Calm blues with wave dividers",
        category: ThemeCategory::Modern,
        colors: ["#0369a1", "#0e7490", "#38bdf8", "#f0f9ff", "#082f49"],
        fonts: ["Inter", "Montserrat", "Inter"],
        sections: ["2", "4", "1", "2", "3", "3", "3", "2"],
        archive: ["4", "1"],
        single: ["2", "1"],
    },
    ThemeSeed {
        id: "theme-9",
        name: "Sunset Warm",
        description: "Warm oranges and magentas",
        category: ThemeCategory::Creative,
        colors: ["#ea580c", "#db2777", "#fbbf24", "#fff7ed", "#431407"],
        fonts: ["Poppins", "Poppins", "Open Sans"],
        sections: ["6", "5", "4", "1", "2", "3", "2", "3"],
        archive: ["4", "4"],
        single: ["2", "2"],
    },
    ThemeSeed {
        id: "theme-10",
        name: "Royal Heritage",
        description: "Deep purple and gold for long-established schools",
        category: ThemeCategory::Classic,
        colors: ["#581c87", "#44403c", "#eab308", "#faf5ff", "#1c1917"],
        fonts: ["Libre Baskerville", "Cinzel", "Libre Baskerville"],
        sections: ["5", "1", "3", "1", "1", "4", "1", "4"],
        archive: ["5", "3"],
        single: ["5", "1"],
    },
    ThemeSeed {
        id: "theme-11",
        name: "Tech Academy",
        description: "Cool greys and electric blue for STEM schools",
        category: ThemeCategory::Modern,
        colors: ["#1d4ed8", "#1f2937", "#06b6d4", "#f9fafb", "#111827"],
        fonts: ["IBM Plex Sans", "Space Grotesk", "IBM Plex Sans"],
        sections: ["2", "5", "2", "3", "2", "3", "3", "3"],
        archive: ["4", "2"],
        single: ["4", "4"],
    },
    ThemeSeed {
        id: "theme-12",
        name: "Artistic Studio",
        description: "Expressive layouts for arts schools",
        category: ThemeCategory::Creative,
        colors: ["#be185d", "#7c3aed", "#f59e0b", "#fdf2f8", "#1f2937"],
        fonts: ["Work Sans", "DM Serif Display", "Work Sans"],
        sections: ["3", "2", "2", "3", "2", "4", "3", "4"],
        archive: ["4", "4"],
        single: ["5", "2"],
    },
    ThemeSeed {
        id: "theme-13",
        name: "Ultra-Modern Neon",
        description: "Dark canvas with neon gradients and glowing accents",
        category: ThemeCategory::Bold,
        colors: ["#a855f7", "#0ea5e9", "#22d3ee", "#0b0b14", "#f8fafc"],
        fonts: ["Space Grotesk", "Orbitron", "Space Grotesk"],
        sections: ["6", "5", "4", "2", "2", "3", "2", "3"],
        archive: ["4", "4"],
        single: ["2", "2"],
    },
    ThemeSeed {
        id: "theme-14",
        name: "Soft Pastel",
        description: "Gentle pastels for nursery and early years",
        category: ThemeCategory::Playful,
        colors: ["#f472b6", "#a78bfa", "#6ee7b7", "#fdf4ff", "#374151"],
        fonts: ["Quicksand", "Quicksand", "Nunito"],
        sections: ["4", "1", "1", "4", "4", "1", "4", "1"],
        archive: ["1", "2"],
        single: ["4", "4"],
    },
    ThemeSeed {
        id: "theme-15",
        name: "Dark Mode Pro",
        description: "Dark backgrounds with high-contrast accents",
        category: ThemeCategory::Bold,
        colors: ["#3b82f6", "#64748b", "#f43f5e", "#0f172a", "#e2e8f0"],
        fonts: ["Inter", "Inter", "Inter"],
        sections: ["3", "4", "2", "2", "2", "3", "2", "3"],
        archive: ["4", "2"],
        single: ["2", "4"],
    },
    ThemeSeed {
        id: "theme-16",
        name: "University Crimson",
        description: "Crimson and charcoal collegiate styling",
        category: ThemeCategory::Classic,
        colors: ["#b91c1c", "#374151", "#f59e0b", "#ffffff", "#111827"],
        fonts: ["Source Sans Pro", "Crimson Text", "Source Sans Pro"],
        sections: ["1", "1", "3", "1", "1", "4", "1", "4"],
        archive: ["3", "3"],
        single: ["3", "3"],
    },
    ThemeSeed {
        id: "theme-17",
        name: "Montessori Earth",
        description: "Natural wood tones and soft greens",
        category: ThemeCategory::Nature,
        colors: ["#92400e", "#4d7c0f", "#d97706", "#fefce8", "#292524"],
        fonts: ["Nunito", "Lora", "Nunito"],
        sections: ["2", "2", "3", "4", "4", "2", "4", "1"],
        archive: ["2", "2"],
        single: ["4", "4"],
    },
    ThemeSeed {
        id: "theme-18",
        name: "Science Lab",
        description: "Teal and white with clean data-driven layouts",
        category: ThemeCategory::Modern,
        colors: ["#0d9488", "#155e75", "#84cc16", "#f0fdfa", "#134e4a"],
        fonts: ["Roboto", "Exo 2", "Roboto"],
        sections: ["2", "3", "1", "2", "1", "2", "3", "3"],
        archive: ["2", "1"],
        single: ["4", "1"],
    },
    ThemeSeed {
        id: "theme-19",
        name: "Sports Academy",
        description: "Energetic reds and bold type for athletics programs",
        category: ThemeCategory::Bold,
        colors: ["#dc2626", "#111827", "#facc15", "#ffffff", "#111827"],
        fonts: ["Oswald", "Bebas Neue", "Roboto"],
        sections: ["3", "5", "4", "1", "3", "3", "2", "1"],
        archive: ["1", "1"],
        single: ["2", "2"],
    },
    ThemeSeed {
        id: "theme-20",
        name: "International School",
        description: "Globe blues with multilingual-friendly fonts",
        category: ThemeCategory::Corporate,
        colors: ["#1e40af", "#0f766e", "#fb923c", "#ffffff", "#1e293b"],
        fonts: ["Noto Sans", "Noto Serif", "Noto Sans"],
        sections: ["5", "1", "1", "2", "1", "1", "1", "3"],
        archive: ["3", "1"],
        single: ["3", "1"],
    },
    ThemeSeed {
        id: "theme-21",
        name: "Faith & Values",
        description: "Warm neutrals for faith-based schools",
        category: ThemeCategory::Elegant,
        colors: ["#1e3a8a", "#a16207", "#b45309", "#fffbeb", "#1c1917"],
        fonts: ["Lato", "Cormorant Garamond", "Lato"],
        sections: ["1", "2", "3", "1", "3", "4", "1", "4"],
        archive: ["5", "1"],
        single: ["5", "1"],
    },
    ThemeSeed {
        id: "theme-22",
        name: "Early Years Rainbow",
        description: "Multicolor accents for kindergartens",
        category: ThemeCategory::Playful,
        colors: ["#ef4444", "#3b82f6", "#22c55e", "#ffffff", "#1f2937"],
        fonts: ["Baloo 2", "Fredoka", "Nunito"],
        sections: ["5", "1", "1", "2", "4", "1", "1", "3"],
        archive: ["1", "1"],
        single: ["1", "1"],
    },
    ThemeSeed {
        id: "theme-23",
        name: "Ivy League",
        description: "Forest green and ivory with stately serifs",
        category: ThemeCategory::Elegant,
        colors: ["#14532d", "#57534e", "#b45309", "#fafaf9", "#1c1917"],
        fonts: ["EB Garamond", "Playfair Display", "EB Garamond"],
        sections: ["1", "2", "3", "2", "1", "4", "3", "4"],
        archive: ["5", "3"],
        single: ["5", "5"],
    },
    ThemeSeed {
        id: "theme-24",
        name: "Coastal Breeze",
        description: "Sandy neutrals and sea blues",
        category: ThemeCategory::Nature,
        colors: ["#0891b2", "#a8a29e", "#fb7185", "#fafaf9", "#164e63"],
        fonts: ["Mulish", "Josefin Sans", "Mulish"],
        sections: ["2", "4", "2", "3", "2", "2", "3", "2"],
        archive: ["2", "4"],
        single: ["4", "2"],
    },
    ThemeSeed {
        id: "theme-25",
        name: "Monochrome Edge",
        description: "Strict black and white with sharp edges",
        category: ThemeCategory::Minimal,
        colors: ["#000000", "#525252", "#e11d48", "#ffffff", "#0a0a0a"],
        fonts: ["Helvetica Neue", "Helvetica Neue", "Helvetica Neue"],
        sections: ["4", "3", "3", "4", "2", "2", "4", "2"],
        archive: ["2", "2"],
        single: ["4", "4"],
    },
    ThemeSeed {
        id: "theme-26",
        name: "Golden Jubilee",
        description: "Celebratory gold and deep blue for anniversaries",
        category: ThemeCategory::Elegant,
        colors: ["#b45309", "#1e3a8a", "#fde047", "#fffdf5", "#1f2937"],
        fonts: ["Raleway", "Cinzel", "Raleway"],
        sections: ["5", "4", "3", "2", "3", "4", "1", "4"],
        archive: ["5", "5"],
        single: ["5", "5"],
    },
];
