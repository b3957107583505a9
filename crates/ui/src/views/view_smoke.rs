use checklist_core::model::{LanguageMode, SectionKey};
use services::PROGRESS_STORAGE_KEY;
use storage::repository::{KeyValueRepository, Storage};

use super::test_harness::{ChecklistHarness, setup_checklist_harness};
use crate::vm::ChecklistIntent;

async fn stored_blob(harness: &ChecklistHarness) -> Option<String> {
    harness
        .storage
        .blobs
        .get(PROGRESS_STORAGE_KEY)
        .await
        .expect("read blob")
}

/// Drive the writer coroutine until the stored blob satisfies `done`.
async fn settle_until(
    harness: &mut ChecklistHarness,
    done: impl Fn(Option<&str>) -> bool,
) -> Option<String> {
    for _ in 0..20 {
        harness.drive_async().await;
        let blob = stored_blob(harness).await;
        if done(blob.as_deref()) {
            return blob;
        }
    }
    stored_blob(harness).await
}

/// Every opening tag that starts with `prefix`, up to and including its `>`.
fn tags<'a>(html: &'a str, prefix: &str) -> Vec<&'a str> {
    html.match_indices(prefix)
        .map(|(start, _)| {
            let end = html[start..].find('>').map_or(html.len(), |i| start + i + 1);
            &html[start..end]
        })
        .collect()
}

/// Whether a boolean attribute is rendered as set on `tag`.
fn has_flag(tag: &str, name: &str) -> bool {
    tag.contains(&format!(" {name}"))
        && !tag.contains(&format!("{name}=false"))
        && !tag.contains(&format!("{name}=\"false\""))
}

fn step_input<'a>(html: &'a str, dom_id: &str) -> &'a str {
    let id_attr = format!("id=\"{dom_id}\"");
    tags(html, "<input")
        .into_iter()
        .find(|tag| tag.contains(&id_attr))
        .unwrap_or_else(|| panic!("no checkbox {dom_id} in {html}"))
}

fn checked_count(html: &str) -> usize {
    tags(html, "<input")
        .into_iter()
        .filter(|tag| has_flag(tag, "checked"))
        .count()
}

/// Only the first section starts expanded.
fn assert_default_open_state(html: &str) {
    let details = tags(html, "<details");
    assert_eq!(details.len(), 4, "expected four sections in {html}");
    assert!(has_flag(details[0], "open"), "first section should be open: {}", details[0]);
    for tag in &details[1..] {
        assert!(!has_flag(tag, "open"), "later sections should be collapsed: {tag}");
    }
}

async fn settle_blob(harness: &mut ChecklistHarness, expected: Option<&str>) -> Option<String> {
    settle_until(harness, |blob| blob == expected).await
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_smoke_renders_bundled_catalog() {
    let mut harness = setup_checklist_harness(Storage::in_memory()).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("DEMOLITION / DEMOLICIÓN"), "missing title in {html}");
    assert!(html.contains("TILE INSTALL (Mortar) / INSTALACIÓN DE AZULEJO (Con mortero)"));
    assert!(html.contains("Overall: 0 / 14"), "missing overall in {html}");
    assert!(html.contains("1. Shut off main water."), "missing step text in {html}");
    assert!(html.contains("1. Cierra el suministro principal de agua."));
    assert!(html.contains("show-both"), "default language should be both");
    assert_eq!(html.matches("type=\"checkbox\"").count(), 14);
    assert_eq!(html.matches("Mark Section").count(), 4);
    assert_default_open_state(&html);
    assert_eq!(checked_count(&html), 0);
    assert!(!html.contains("Clear all saved progress?"));
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_smoke_seeds_from_saved_progress() {
    let storage = Storage::in_memory();
    storage
        .blobs
        .set(
            PROGRESS_STORAGE_KEY,
            r#"{"demolition-0":true,"tile-prep-1":true,"tile-prep-2":false,"retired-0":true}"#,
        )
        .await
        .expect("seed blob");

    let mut harness = setup_checklist_harness(storage).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Overall: 2 / 14"), "missing overall in {html}");
    assert!(html.contains(">1 / 5<"), "missing demolition counter in {html}");
    assert!(html.contains(">1 / 4<"), "missing tile-prep counter in {html}");

    assert!(has_flag(step_input(&html, "demolition-0"), "checked"));
    assert!(!has_flag(step_input(&html, "demolition-1"), "checked"));
    assert!(has_flag(step_input(&html, "tile-prep-1"), "checked"));
    assert!(!has_flag(step_input(&html, "tile-prep-2"), "checked"));
    assert_eq!(checked_count(&html), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_smoke_corrupt_progress_renders_unchecked() {
    let storage = Storage::in_memory();
    storage
        .blobs
        .set(PROGRESS_STORAGE_KEY, "not json at all")
        .await
        .expect("seed blob");

    let mut harness = setup_checklist_harness(storage).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Overall: 0 / 14"), "missing overall in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_smoke_toggle_and_mark_section_persist() {
    let mut harness = setup_checklist_harness(Storage::in_memory()).await;
    harness.rebuild();

    harness.dispatch(ChecklistIntent::Toggle {
        id: SectionKey::new("demolition").step(0),
        done: true,
    });
    let html = harness.render();
    assert!(html.contains("Overall: 1 / 14"), "missing overall in {html}");
    assert!(html.contains(">1 / 5<"), "missing demolition counter in {html}");

    harness.dispatch(ChecklistIntent::SetSection {
        key: SectionKey::new("tile-prep"),
        done: true,
    });
    let html = harness.render();
    assert!(html.contains("Overall: 5 / 14"), "missing overall in {html}");
    assert!(html.contains(">4 / 4<"), "missing tile-prep counter in {html}");

    let expected = r#"{"demolition-0":true,"tile-prep-0":true,"tile-prep-1":true,"tile-prep-2":true,"tile-prep-3":true}"#;
    let blob = settle_blob(&mut harness, Some(expected)).await;
    assert_eq!(blob.as_deref(), Some(expected));

    let reloaded = harness.progress.load().await;
    assert!(reloaded.is_done(&SectionKey::new("tile-prep").step(3)));
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_smoke_mark_all_then_unmark_all() {
    let mut harness = setup_checklist_harness(Storage::in_memory()).await;
    harness.rebuild();

    harness.dispatch(ChecklistIntent::SetAll { done: false });
    harness.dispatch(ChecklistIntent::SetAll { done: true });
    assert!(harness.render().contains("Overall: 14 / 14"));

    harness.dispatch(ChecklistIntent::SetAll { done: false });
    assert!(harness.render().contains("Overall: 0 / 14"));

    // Unmarking writes explicit `false` entries rather than dropping keys.
    let all_false = |blob: Option<&str>| {
        blob.and_then(|raw| serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw).ok())
            .is_some_and(|map| map.len() == 14 && map.values().all(|v| v == &serde_json::Value::Bool(false)))
    };
    let blob = settle_until(&mut harness, all_false).await;
    assert!(all_false(blob.as_deref()), "unexpected blob {blob:?}");
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_smoke_language_toggle_is_display_only() {
    let mut harness = setup_checklist_harness(Storage::in_memory()).await;
    harness.rebuild();
    harness.dispatch(ChecklistIntent::Toggle {
        id: SectionKey::new("tile-dry").step(2),
        done: true,
    });
    let expected = r#"{"tile-dry-2":true}"#;
    let before = settle_blob(&mut harness, Some(expected)).await;
    assert_eq!(before.as_deref(), Some(expected));

    harness.dispatch(ChecklistIntent::SelectLanguage(LanguageMode::English));
    let html = harness.render();
    assert!(html.contains("show-en"), "missing mode class in {html}");
    assert!(html.contains("1. Shut off main water."));
    assert!(!html.contains("1. Cierra el suministro principal de agua."));
    assert!(html.contains("Overall: 1 / 14"));

    harness.dispatch(ChecklistIntent::SelectLanguage(LanguageMode::Spanish));
    let html = harness.render();
    assert!(html.contains("show-es"), "missing mode class in {html}");
    assert!(!html.contains("1. Shut off main water."));
    assert!(html.contains("1. Cierra el suministro principal de agua."));
    assert!(html.contains("Overall: 1 / 14"));

    harness.dispatch(ChecklistIntent::SelectLanguage(LanguageMode::Both));
    for _ in 0..3 {
        harness.drive_async().await;
    }
    assert_eq!(stored_blob(&harness).await, before);
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_smoke_reset_asks_then_clears() {
    let mut harness = setup_checklist_harness(Storage::in_memory()).await;
    harness.rebuild();
    harness.dispatch(ChecklistIntent::SetAll { done: true });
    let saved = settle_until(&mut harness, |blob| blob.is_some()).await;
    assert!(saved.is_some(), "mark all was not persisted");

    assert_eq!(checked_count(&harness.render()), 14);

    harness.dispatch(ChecklistIntent::RequestReset);
    let html = harness.render();
    assert!(html.contains("Clear all saved progress?"), "missing modal in {html}");
    assert!(html.contains("Overall: 14 / 14"), "reset must wait for confirmation");

    harness.dispatch(ChecklistIntent::CancelReset);
    let html = harness.render();
    assert!(!html.contains("Clear all saved progress?"));
    assert!(html.contains("Overall: 14 / 14"));

    harness.dispatch(ChecklistIntent::RequestReset);
    harness.dispatch(ChecklistIntent::ConfirmReset);
    let html = harness.render();
    assert!(html.contains("Overall: 0 / 14"), "missing reset overall in {html}");
    assert!(!html.contains("Clear all saved progress?"));
    assert_eq!(checked_count(&html), 0, "reset left checked boxes in {html}");
    assert_default_open_state(&html);

    assert_eq!(settle_blob(&mut harness, None).await, None);
}
