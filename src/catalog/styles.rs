//! Style registry
//!
//! Static catalog of the visual variants available for each section type,
//! plus the site-chrome catalogs (breadcrumb, archive, single post, header,
//! footer). Identifiers are unique within their scope only: every section
//! type has its own `"1"`.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::section_type::SectionType;
use crate::editor::fields::{fields_for, SectionFields};

/// What a style entry applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    Section(SectionType),
    Breadcrumb,
    Archive,
    SinglePost,
    Header,
    Footer,
}

impl StyleKind {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Section(t) => t.as_str(),
            Self::Breadcrumb => "breadcrumb",
            Self::Archive => "archive",
            Self::SinglePost => "single-post",
            Self::Header => "header",
            Self::Footer => "footer",
        }
    }
}

/// One named, described style entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleDefinition {
    pub id: &'static str,
    pub name: &'static str,
    /// Loose grouping tag ("classic", "modern", "minimal", ...)
    pub category: &'static str,
    pub description: &'static str,
    pub kind: StyleKind,
}

impl StyleDefinition {
    /// CSS class token the public site attaches to the rendered block
    pub fn css_class(&self) -> String {
        format!("{}-style-{}", self.kind.prefix().replace('_', "-"), self.id)
    }

    /// Preview image reference for the style picker
    pub fn preview_ref(&self) -> String {
        format!("previews/{}/{}.png", self.kind.prefix(), self.id)
    }

    /// Editable fields for section styles; chrome styles have none
    pub fn field_schema(&self) -> SectionFields {
        match self.kind {
            StyleKind::Section(t) => fields_for(t),
            _ => SectionFields::Placeholder,
        }
    }
}

type Seed = (&'static str, &'static str, &'static str, &'static str);

fn section_seeds(section_type: SectionType) -> &'static [Seed] {
    match section_type {
        SectionType::Hero => &[
            ("1", "Centered Banner", "classic", "Full-width background image with centered headline and two buttons"),
            ("2", "Split Screen", "modern", "Headline on the left, feature image on the right"),
            ("3", "Video Backdrop", "bold", "Looping background video behind a dark overlay"),
            ("4", "Minimal Headline", "minimal", "Large typography on a plain background"),
            ("5", "Slideshow", "classic", "Rotating slides with captions"),
            ("6", "Gradient Glow", "bold", "Animated gradient with neon call-to-action buttons"),
        ],
        SectionType::Features => &[
            ("1", "Icon Grid", "classic", "Three-column grid of icon cards"),
            ("2", "Alternating Rows", "modern", "Image and text rows that alternate sides"),
            ("3", "Numbered List", "minimal", "Compact numbered feature list"),
            ("4", "Cards with Hover", "modern", "Elevated cards that lift on hover"),
            ("5", "Bento Grid", "bold", "Mixed-size tiles in a bento layout"),
        ],
        SectionType::Testimonials => &[
            ("1", "Quote Carousel", "classic", "One quote at a time with navigation dots"),
            ("2", "Card Wall", "modern", "Masonry wall of testimonial cards"),
            ("3", "Spotlight", "elegant", "Single large quote with portrait"),
            ("4", "Marquee", "bold", "Continuously scrolling quotes"),
        ],
        SectionType::Cta => &[
            ("1", "Banner Strip", "classic", "Full-width colored strip with one button"),
            ("2", "Boxed Card", "modern", "Centered card with shadow"),
            ("3", "Split Image", "modern", "Call to action beside an image"),
            ("4", "Outline Minimal", "minimal", "Outlined box with understated button"),
        ],
        SectionType::Gallery => &[
            ("1", "Grid", "classic", "Uniform thumbnail grid with lightbox"),
            ("2", "Masonry", "modern", "Pinterest-style masonry columns"),
            ("3", "Carousel", "classic", "Horizontal image carousel"),
            ("4", "Polaroid", "playful", "Tilted polaroid frames"),
        ],
        SectionType::BlogPosts => &[
            ("1", "Card Grid", "classic", "Three latest posts as cards"),
            ("2", "List with Thumbnails", "minimal", "Vertical list with small thumbnails"),
            ("3", "Featured + Grid", "modern", "One featured post followed by a grid"),
            ("4", "Magazine", "elegant", "Editorial magazine layout"),
        ],
        SectionType::Announcements => &[
            ("1", "Notice Board", "classic", "Pinned notices with dates"),
            ("2", "Ticker", "bold", "Scrolling headline ticker"),
            ("3", "Timeline", "modern", "Chronological timeline"),
            ("4", "Compact List", "minimal", "Dense list of titles and dates"),
        ],
        SectionType::Classes => &[
            ("1", "Schedule Table", "classic", "Upcoming live classes in a table"),
            ("2", "Class Cards", "modern", "Cards with instructor, time and join button"),
            ("3", "Agenda", "minimal", "Day-by-day agenda view"),
        ],
        SectionType::Programs => &[
            ("1", "Program Cards", "classic", "Cards for each program with image"),
            ("2", "Tabs", "modern", "Tabbed program descriptions"),
            ("3", "Accordion", "minimal", "Expandable program list"),
            ("4", "Icon Tiles", "playful", "Colorful icon tiles"),
        ],
        SectionType::Courses => &[
            ("1", "Course Grid", "classic", "Grid of course cards with level badges"),
            ("2", "Course List", "minimal", "List with duration and instructor"),
            ("3", "Featured Course", "modern", "Highlighted course with curriculum preview"),
        ],
        SectionType::Faq => &[
            ("1", "Accordion", "classic", "Expandable questions"),
            ("2", "Two Columns", "modern", "Questions split over two columns"),
            ("3", "Plain List", "minimal", "All answers expanded"),
        ],
        SectionType::AcademicCalendar => &[
            ("1", "Month Grid", "classic", "Calendar month grid"),
            ("2", "Term Timeline", "modern", "Terms and key dates on a timeline"),
            ("3", "Event List", "minimal", "Upcoming dates as a list"),
        ],
        SectionType::ResultChecker => &[
            ("1", "Inline Form", "classic", "Student ID and PIN form inline"),
            ("2", "Card Form", "modern", "Form in a centered card with instructions"),
        ],
        SectionType::FormEmbed => &[
            ("1", "Full Width", "classic", "Form spans the content width"),
            ("2", "Side Panel", "modern", "Form beside descriptive text"),
        ],
        SectionType::Products => &[
            ("1", "Product Grid", "classic", "Uniform grid with prices"),
            ("2", "Product Carousel", "modern", "Sliding product cards"),
            ("3", "Catalog List", "minimal", "Detailed list view"),
        ],
        SectionType::About => &[
            ("1", "Image Left", "classic", "Photo on the left, story on the right"),
            ("2", "Image Right", "classic", "Story on the left, photo on the right"),
            ("3", "Mission Cards", "modern", "Mission, vision and values cards"),
            ("4", "Founders Letter", "elegant", "Letter from the principal with signature"),
        ],
        SectionType::Stats => &[
            ("1", "Counter Row", "classic", "Animated counters in a row"),
            ("2", "Highlight Boxes", "modern", "Boxed numbers with captions"),
            ("3", "Big Numbers", "bold", "Oversized numbers on brand color"),
        ],
        SectionType::Team => &[
            ("1", "Portrait Grid", "classic", "Staff portraits in a grid"),
            ("2", "Carousel", "modern", "Sliding staff cards"),
            ("3", "Directory", "minimal", "Names and roles list"),
        ],
        SectionType::Contact => &[
            ("1", "Map and Form", "classic", "Embedded map beside contact form"),
            ("2", "Info Cards", "modern", "Address, phone and email cards"),
            ("3", "Simple Block", "minimal", "Plain contact details"),
        ],
        SectionType::Events => &[
            ("1", "Event Cards", "classic", "Upcoming events as cards"),
            ("2", "Date Badges", "modern", "List with large date badges"),
            ("3", "Calendar Strip", "minimal", "Horizontal week strip"),
        ],
    }
}

const BREADCRUMB_SEEDS: &[Seed] = &[
    ("1", "Simple Trail", "classic", "Text links separated by slashes"),
    ("2", "Banner Trail", "modern", "Page title banner with trail underneath"),
    ("3", "Pill Trail", "modern", "Rounded pills for each level"),
    ("4", "Arrow Trail", "classic", "Chevron-separated links"),
    ("5", "Hidden", "minimal", "No breadcrumb shown"),
    ("6", "Image Banner", "bold", "Full-width image banner with overlay trail"),
];

const ARCHIVE_SEEDS: &[Seed] = &[
    ("1", "Card Grid", "classic", "Posts as a card grid with pagination"),
    ("2", "List", "minimal", "Title, date and excerpt list"),
    ("3", "Sidebar Layout", "classic", "List with categories sidebar"),
    ("4", "Masonry", "modern", "Masonry cards of varying height"),
    ("5", "Magazine", "elegant", "Featured lead post plus columns"),
];

const SINGLE_POST_SEEDS: &[Seed] = &[
    ("1", "Standard", "classic", "Title, cover image and body"),
    ("2", "Full Width Hero", "bold", "Cover image as full-width hero"),
    ("3", "With Sidebar", "classic", "Body with related-posts sidebar"),
    ("4", "Minimal Reader", "minimal", "Narrow reading column"),
    ("5", "Magazine Article", "elegant", "Drop caps and pull quotes"),
];

const HEADER_SEEDS: &[Seed] = &[
    ("1", "Logo Left", "classic", "Logo left, navigation right"),
    ("2", "Centered Logo", "elegant", "Centered logo above navigation"),
    ("3", "Transparent Overlay", "modern", "Transparent header over the hero"),
    ("4", "Top Bar", "classic", "Contact top bar above main navigation"),
    ("5", "Sticky Compact", "minimal", "Compact header that sticks on scroll"),
    ("6", "Mega Menu", "corporate", "Wide dropdown mega menu"),
];

const FOOTER_SEEDS: &[Seed] = &[
    ("1", "Four Columns", "classic", "Links, contact and social in columns"),
    ("2", "Centered", "minimal", "Centered logo and links"),
    ("3", "Dark Block", "bold", "Dark footer with newsletter signup"),
    ("4", "Map Footer", "classic", "Footer with embedded location map"),
    ("5", "Compact", "minimal", "Single-line copyright footer"),
];

fn build(seeds: &[Seed], kind: StyleKind) -> Vec<StyleDefinition> {
    seeds
        .iter()
        .map(|&(id, name, category, description)| StyleDefinition {
            id,
            name,
            category,
            description,
            kind,
        })
        .collect()
}

fn find<'a>(styles: &'a [StyleDefinition], id: &str) -> Option<&'a StyleDefinition> {
    styles.iter().find(|s| s.id == id)
}

/// Read-only registry of every style the site builder offers
#[derive(Debug)]
pub struct StyleRegistry {
    sections: HashMap<SectionType, Vec<StyleDefinition>>,
    breadcrumbs: Vec<StyleDefinition>,
    archives: Vec<StyleDefinition>,
    single_posts: Vec<StyleDefinition>,
    headers: Vec<StyleDefinition>,
    footers: Vec<StyleDefinition>,
}

impl StyleRegistry {
    fn new() -> Self {
        let sections = SectionType::ALL
            .iter()
            .map(|&t| (t, build(section_seeds(t), StyleKind::Section(t))))
            .collect();

        Self {
            sections,
            breadcrumbs: build(BREADCRUMB_SEEDS, StyleKind::Breadcrumb),
            archives: build(ARCHIVE_SEEDS, StyleKind::Archive),
            single_posts: build(SINGLE_POST_SEEDS, StyleKind::SinglePost),
            headers: build(HEADER_SEEDS, StyleKind::Header),
            footers: build(FOOTER_SEEDS, StyleKind::Footer),
        }
    }

    /// The process-wide registry, built on first use
    pub fn builtin() -> &'static StyleRegistry {
        static REGISTRY: OnceLock<StyleRegistry> = OnceLock::new();
        REGISTRY.get_or_init(StyleRegistry::new)
    }

    /// Styles for a section type, in registration order
    pub fn list_styles(&self, section_type: SectionType) -> &[StyleDefinition] {
        self.sections
            .get(&section_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Same as [`list_styles`](Self::list_styles) for a raw type key; unknown
    /// keys yield an empty slice.
    pub fn list_styles_by_key(&self, key: &str) -> &[StyleDefinition] {
        match key.parse::<SectionType>() {
            Ok(t) => self.list_styles(t),
            Err(_) => &[],
        }
    }

    pub fn get_style(&self, section_type: SectionType, style_id: &str) -> Option<&StyleDefinition> {
        find(self.list_styles(section_type), style_id)
    }

    /// First registered style for the type
    pub fn default_style(&self, section_type: SectionType) -> Option<&StyleDefinition> {
        self.list_styles(section_type).first()
    }

    pub fn breadcrumb_styles(&self) -> &[StyleDefinition] {
        &self.breadcrumbs
    }

    pub fn archive_styles(&self) -> &[StyleDefinition] {
        &self.archives
    }

    pub fn single_post_styles(&self) -> &[StyleDefinition] {
        &self.single_posts
    }

    pub fn header_styles(&self) -> &[StyleDefinition] {
        &self.headers
    }

    pub fn footer_styles(&self) -> &[StyleDefinition] {
        &self.footers
    }

    /// Look up any style by kind and id
    pub fn get(&self, kind: StyleKind, style_id: &str) -> Option<&StyleDefinition> {
        let styles = match kind {
            StyleKind::Section(t) => self.list_styles(t),
            StyleKind::Breadcrumb => &self.breadcrumbs,
            StyleKind::Archive => &self.archives,
            StyleKind::SinglePost => &self.single_posts,
            StyleKind::Header => &self.headers,
            StyleKind::Footer => &self.footers,
        };
        find(styles, style_id)
    }

    /// Look up a style, substituting the first entry of its kind when the id
    /// is unknown. The flag is `true` when the substitution happened.
    pub fn get_or_default(&self, kind: StyleKind, style_id: &str) -> Option<(&StyleDefinition, bool)> {
        if let Some(style) = self.get(kind, style_id) {
            return Some((style, false));
        }
        let first = match kind {
            StyleKind::Section(t) => self.default_style(t),
            StyleKind::Breadcrumb => self.breadcrumbs.first(),
            StyleKind::Archive => self.archives.first(),
            StyleKind::SinglePost => self.single_posts.first(),
            StyleKind::Header => self.headers.first(),
            StyleKind::Footer => self.footers.first(),
        };
        first.map(|s| (s, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_type_has_styles() {
        let registry = StyleRegistry::builtin();
        for t in SectionType::ALL {
            assert!(!registry.list_styles(t).is_empty(), "{} has no styles", t);
            assert_eq!(registry.default_style(t).unwrap().id, "1");
        }
    }

    #[test]
    fn test_ids_unique_within_type() {
        let registry = StyleRegistry::builtin();
        for t in SectionType::ALL {
            let ids: HashSet<_> = registry.list_styles(t).iter().map(|s| s.id).collect();
            assert_eq!(ids.len(), registry.list_styles(t).len(), "duplicate ids in {}", t);
        }
    }

    #[test]
    fn test_unknown_key_is_empty() {
        assert!(StyleRegistry::builtin().list_styles_by_key("carousel").is_empty());
        assert_eq!(StyleRegistry::builtin().list_styles_by_key("hero").len(), 6);
    }

    #[test]
    fn test_get_style() {
        let registry = StyleRegistry::builtin();
        let style = registry.get_style(SectionType::Hero, "2").unwrap();
        assert_eq!(style.name, "Split Screen");
        assert_eq!(style.css_class(), "hero-style-2");
        assert!(registry.get_style(SectionType::Hero, "99").is_none());
    }

    #[test]
    fn test_css_class_uses_dashes() {
        let style = StyleRegistry::builtin()
            .get_style(SectionType::BlogPosts, "3")
            .unwrap();
        assert_eq!(style.css_class(), "blog-posts-style-3");
        assert_eq!(style.preview_ref(), "previews/blog_posts/3.png");
    }

    #[test]
    fn test_get_or_default_falls_back() {
        let registry = StyleRegistry::builtin();
        let (style, fell_back) = registry
            .get_or_default(StyleKind::Section(SectionType::Cta), "42")
            .unwrap();
        assert!(fell_back);
        assert_eq!(style.id, "1");

        let (style, fell_back) = registry.get_or_default(StyleKind::Footer, "3").unwrap();
        assert!(!fell_back);
        assert_eq!(style.name, "Dark Block");
    }
}
