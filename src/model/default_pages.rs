//! Starter pages created by "generate default pages"

use serde_json::json;

use super::page::{NewPage, Page, PageType, SectionPatch};
use crate::catalog::SectionType;
use crate::error::Result;

struct Blueprint {
    title: &'static str,
    slug: &'static str,
    page_type: PageType,
    show_in_footer: bool,
    sections: &'static [SectionType],
}

const BLUEPRINTS: &[Blueprint] = &[
    Blueprint {
        title: "Home",
        slug: "home",
        page_type: PageType::Homepage,
        show_in_footer: false,
        sections: &[
            SectionType::Hero,
            SectionType::Features,
            SectionType::Announcements,
            SectionType::Testimonials,
            SectionType::Cta,
        ],
    },
    Blueprint {
        title: "About Us",
        slug: "about",
        page_type: PageType::About,
        show_in_footer: true,
        sections: &[SectionType::Hero, SectionType::About, SectionType::Team],
    },
    Blueprint {
        title: "Programs",
        slug: "programs",
        page_type: PageType::Programs,
        show_in_footer: true,
        sections: &[SectionType::Hero, SectionType::Programs, SectionType::Classes],
    },
    Blueprint {
        title: "Admissions",
        slug: "admissions",
        page_type: PageType::Admissions,
        show_in_footer: true,
        sections: &[SectionType::Hero, SectionType::Faq, SectionType::Cta],
    },
    Blueprint {
        title: "Contact",
        slug: "contact",
        page_type: PageType::Contact,
        show_in_footer: true,
        sections: &[SectionType::Contact, SectionType::FormEmbed],
    },
];

/// Slugs of the generated pages, in generation order
pub fn default_slugs() -> impl Iterator<Item = &'static str> {
    BLUEPRINTS.iter().map(|b| b.slug)
}

fn starter_content(section_type: SectionType, page_title: &str) -> Option<SectionPatch> {
    let content = match section_type {
        SectionType::Hero => json!({
            "title": page_title,
            "subtitle": "",
            "primaryButtonText": "Learn More",
            "primaryButtonLink": "/about",
        }),
        SectionType::Cta => json!({
            "title": "Ready to join us?",
            "buttonText": "Apply Now",
            "buttonLink": "/admissions",
        }),
        SectionType::Features | SectionType::Testimonials | SectionType::Faq => json!({
            "title": section_type.label(),
            "items": [],
        }),
        _ => return None,
    };

    Some(SectionPatch {
        content: content.as_object().cloned(),
        ..Default::default()
    })
}

/// Build the starter pages for a tenant.
///
/// `skip` filters out slugs that already exist; `style_for` supplies the
/// active theme's style for each section type.
pub fn build_default_pages(
    tenant_id: &str,
    skip: impl Fn(&str) -> bool,
    style_for: impl Fn(SectionType) -> String,
) -> Result<Vec<Page>> {
    let mut pages = Vec::new();

    for blueprint in BLUEPRINTS.iter().filter(|b| !skip(b.slug)) {
        let mut page = Page::new(
            tenant_id,
            NewPage::new(blueprint.title, blueprint.slug, blueprint.page_type),
        )?;
        page.show_in_header = true;
        page.show_in_footer = blueprint.show_in_footer;

        for &section_type in blueprint.sections {
            let id = page.add_section(section_type, style_for(section_type)).id.clone();
            if let Some(patch) = starter_content(section_type, blueprint.title) {
                page.update_section(&id, &patch)?;
            }
        }
        pages.push(page);
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_all_pages() {
        let pages = build_default_pages("t1", |_| false, |_| "1".to_string()).unwrap();
        let slugs: Vec<_> = pages.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, default_slugs().collect::<Vec<_>>());

        let home = &pages[0];
        assert_eq!(home.page_type, PageType::Homepage);
        assert_eq!(home.sections.len(), 5);
        assert_eq!(home.sections[0].content["title"], "Home");
        assert!(pages.iter().all(|p| p.tenant_id == "t1" && p.show_in_header));
    }

    #[test]
    fn test_skips_existing_and_uses_styles() {
        let pages = build_default_pages(
            "t1",
            |slug| slug == "home",
            |t| if t == SectionType::Hero { "4".into() } else { "1".into() },
        )
        .unwrap();

        assert_eq!(pages.len(), 4);
        assert_eq!(pages[0].slug, "about");
        assert_eq!(pages[0].sections[0].style, "4");
        assert_eq!(pages[0].sections[1].style, "1");
    }
}
