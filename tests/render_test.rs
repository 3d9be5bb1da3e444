//! Section renderer integration tests
//!
//! Covers:
//! - Visibility and ordering of rendered sections
//! - Style fallback for unknown styles
//! - Collection data binding, limits and provider failures
//! - Published-only rendering through the service container

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use common::{record, TestStore};
use school_portal::render::CollectionProvider;
use school_portal::store::{Record, SCHOOLS};
use school_portal::{
    NewPage, Page, PagePatch, PageStatus, PageType, PortalConfig, PortalError, ProviderRegistry,
    SectionPatch, SectionType, Services, StoreError, TenantContext,
};

struct BrokenProvider;

#[async_trait]
impl CollectionProvider for BrokenProvider {
    async fn list_for_tenant(&self, _tenant_id: &str, _limit: Option<usize>) -> Result<Vec<Record>, StoreError> {
        Err(StoreError::Backend("events service unavailable".into()))
    }
}

async fn services_with_page(store: Arc<TestStore>) -> (Services, Page) {
    let services = Services::new(store, &PortalConfig::default());
    let ctx = TenantContext::admin("t1");
    let page = services
        .pages
        .create_page(&ctx, NewPage::new("Home", "home", PageType::Homepage))
        .await
        .unwrap();
    (services, page)
}

fn publish(page: &mut Page) {
    page.apply_patch(&PagePatch {
        status: Some(PageStatus::Published),
        ..Default::default()
    })
    .unwrap();
}

#[tokio::test]
async fn test_render_order_visibility_and_fallback() {
    let store = TestStore::new();
    store
        .insert_json(SCHOOLS, json!({"id": "t1", "themeId": "theme-2", "primaryColor": "#000000"}))
        .await;
    let (services, mut page) = services_with_page(store).await;
    let ctx = TenantContext::admin("t1");

    let hero = page.add_section(SectionType::Hero, "99").id.clone();
    let hidden = page.add_section(SectionType::Cta, "1").id.clone();
    let faq = page.add_section(SectionType::Faq, "2").id.clone();
    page.update_section(&hidden, &SectionPatch::visible(false)).unwrap();
    page.reorder_sections(&[faq.clone(), hero.clone(), hidden.clone()]).unwrap();
    publish(&mut page);
    services.pages.save_page(&ctx, &page).await.unwrap();

    let rendered = services.render_published("t1", "home").await.unwrap();
    assert_eq!(rendered.theme_id, "theme-2");
    assert!(rendered
        .css_variables
        .contains(&("--color-primary", "#000000".to_string())));

    let ids: Vec<_> = rendered.sections.iter().map(|s| s.section_id.clone()).collect();
    assert_eq!(ids, vec![faq.clone(), hero.clone()]);

    let faq_section = &rendered.sections[0];
    assert_eq!(faq_section.layout.style_id, "2");
    assert!(!faq_section.fell_back);

    let hero_section = &rendered.sections[1];
    assert!(hero_section.fell_back);
    assert_eq!(hero_section.layout.style_id, "2");
    assert_eq!(hero_section.layout.css_class, "hero-style-2");
}

#[tokio::test]
async fn test_collection_binding_with_limit() {
    let store = TestStore::new();
    for (tenant, name) in [("t1", "Grade 1"), ("t2", "Other"), ("t1", "Grade 2"), ("t1", "Grade 3")] {
        store
            .insert_json("classes", json!({"tenantId": tenant, "name": name}))
            .await;
    }
    let (services, mut page) = services_with_page(store).await;

    let classes = page.add_section(SectionType::Classes, "1").id.clone();
    page.update_section(
        &classes,
        &SectionPatch {
            settings: Some(record(json!({"limit": 2}))),
            ..Default::default()
        },
    )
    .unwrap();
    page.add_section(SectionType::Hero, "1");
    publish(&mut page);
    services
        .pages
        .save_page(&TenantContext::admin("t1"), &page)
        .await
        .unwrap();

    let rendered = services.render_published("t1", "home").await.unwrap();
    let data = rendered.sections[0].data.as_ref().unwrap();
    assert_eq!(data.collection, "classes");
    assert!(data.error.is_none());
    let names: Vec<_> = data.records.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Grade 1", "Grade 2"]);

    assert!(rendered.sections[1].data.is_none());
    // Fetched data is never written back into the section
    let stored = services.pages.get_page("t1", &page.id).await.unwrap();
    assert!(!stored.section(&classes).unwrap().content.contains_key("records"));
}

#[tokio::test]
async fn test_filter_applies_before_limit() {
    let store = TestStore::new();
    for (title, category) in [("A", "news"), ("B", "sports"), ("C", "sports"), ("D", "sports")] {
        store
            .insert_json("announcements", json!({"tenantId": "t1", "title": title, "category": category}))
            .await;
    }
    let (services, mut page) = services_with_page(store).await;

    let id = page.add_section(SectionType::Announcements, "1").id.clone();
    page.update_section(
        &id,
        &SectionPatch {
            settings: Some(record(json!({"limit": 2, "filter": {"category": "sports"}}))),
            ..Default::default()
        },
    )
    .unwrap();
    publish(&mut page);
    services
        .pages
        .save_page(&TenantContext::admin("t1"), &page)
        .await
        .unwrap();

    let rendered = services.render_published("t1", "home").await.unwrap();
    let titles: Vec<_> = rendered.sections[0]
        .data
        .as_ref()
        .unwrap()
        .records
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["B", "C"]);
}

#[tokio::test]
async fn test_provider_failure_keeps_section() {
    let store = TestStore::new();
    let (services, mut page) = services_with_page(store.clone()).await;

    let mut providers = ProviderRegistry::for_store(store);
    providers.register("events", Arc::new(BrokenProvider));
    let services = services.with_providers(providers);

    page.add_section(SectionType::Events, "1");
    let gallery = page.add_section(SectionType::Gallery, "1").id.clone();
    page.update_section(&gallery, &SectionPatch::content_field("source", json!("albums")))
        .unwrap();
    publish(&mut page);
    services
        .pages
        .save_page(&TenantContext::admin("t1"), &page)
        .await
        .unwrap();

    let rendered = services.render_published("t1", "home").await.unwrap();
    assert_eq!(rendered.sections.len(), 2);

    let events = rendered.sections[0].data.as_ref().unwrap();
    assert!(events.records.is_empty());
    assert!(events.error.as_deref().unwrap().contains("unavailable"));

    let albums = rendered.sections[1].data.as_ref().unwrap();
    assert_eq!(albums.collection, "albums");
    assert!(albums.error.is_some());
}

#[tokio::test]
async fn test_drafts_are_not_rendered() {
    let (services, _) = services_with_page(TestStore::new()).await;
    assert!(matches!(
        services.render_published("t1", "home").await,
        Err(PortalError::PageNotFound(_))
    ));
    assert!(matches!(
        services.render_published("t1", "missing").await,
        Err(PortalError::PageNotFound(_))
    ));
}
