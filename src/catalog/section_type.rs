//! The closed set of section types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PortalError;

/// Kind of content block a page section holds.
///
/// Editor field schemas, layout selection and data dependencies all match on
/// this enum exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Hero,
    Features,
    Testimonials,
    Cta,
    Gallery,
    BlogPosts,
    Announcements,
    Classes,
    Programs,
    Courses,
    Faq,
    AcademicCalendar,
    ResultChecker,
    FormEmbed,
    Products,
    About,
    Stats,
    Team,
    Contact,
    Events,
}

impl SectionType {
    pub const ALL: [SectionType; 20] = [
        Self::Hero,
        Self::Features,
        Self::Testimonials,
        Self::Cta,
        Self::Gallery,
        Self::BlogPosts,
        Self::Announcements,
        Self::Classes,
        Self::Programs,
        Self::Courses,
        Self::Faq,
        Self::AcademicCalendar,
        Self::ResultChecker,
        Self::FormEmbed,
        Self::Products,
        Self::About,
        Self::Stats,
        Self::Team,
        Self::Contact,
        Self::Events,
    ];

    /// Storage key (matches the serde name)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Features => "features",
            Self::Testimonials => "testimonials",
            Self::Cta => "cta",
            Self::Gallery => "gallery",
            Self::BlogPosts => "blog_posts",
            Self::Announcements => "announcements",
            Self::Classes => "classes",
            Self::Programs => "programs",
            Self::Courses => "courses",
            Self::Faq => "faq",
            Self::AcademicCalendar => "academic_calendar",
            Self::ResultChecker => "result_checker",
            Self::FormEmbed => "form_embed",
            Self::Products => "products",
            Self::About => "about",
            Self::Stats => "stats",
            Self::Team => "team",
            Self::Contact => "contact",
            Self::Events => "events",
        }
    }

    /// Human-readable name for the "Add Section" menu
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hero => "Hero Banner",
            Self::Features => "Features",
            Self::Testimonials => "Testimonials",
            Self::Cta => "Call to Action",
            Self::Gallery => "Gallery",
            Self::BlogPosts => "Blog Posts",
            Self::Announcements => "Announcements",
            Self::Classes => "Live Classes",
            Self::Programs => "Programs",
            Self::Courses => "Courses",
            Self::Faq => "FAQ",
            Self::AcademicCalendar => "Academic Calendar",
            Self::ResultChecker => "Result Checker",
            Self::FormEmbed => "Embedded Form",
            Self::Products => "Products",
            Self::About => "About",
            Self::Stats => "Statistics",
            Self::Team => "Team",
            Self::Contact => "Contact",
            Self::Events => "Events",
        }
    }

    /// External collection this section binds at render time, if any
    pub fn collection(&self) -> Option<&'static str> {
        match self {
            Self::Classes => Some("classes"),
            Self::AcademicCalendar | Self::Events => Some("events"),
            Self::Announcements => Some("announcements"),
            Self::Gallery => Some("gallery"),
            Self::Courses => Some("courses"),
            Self::Hero
            | Self::Features
            | Self::Testimonials
            | Self::Cta
            | Self::BlogPosts
            | Self::Programs
            | Self::Faq
            | Self::ResultChecker
            | Self::FormEmbed
            | Self::Products
            | Self::About
            | Self::Stats
            | Self::Team
            | Self::Contact => None,
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PortalError::InvalidInput(format!("unknown section type '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_type() {
        for t in SectionType::ALL {
            assert_eq!(t.as_str().parse::<SectionType>().unwrap(), t);
        }
    }

    #[test]
    fn test_serde_name_matches_key() {
        let json = serde_json::to_string(&SectionType::AcademicCalendar).unwrap();
        assert_eq!(json, "\"academic_calendar\"");
    }

    #[test]
    fn test_unknown_type() {
        assert!("carousel".parse::<SectionType>().is_err());
    }

    #[test]
    fn test_dynamic_collections() {
        assert_eq!(SectionType::Classes.collection(), Some("classes"));
        assert_eq!(SectionType::AcademicCalendar.collection(), Some("events"));
        assert_eq!(SectionType::Hero.collection(), None);
    }
}
