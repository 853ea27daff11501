mod common;

use common::{date, item, release, seed_releases};
use lushlog_core::{
    display_date, group_by_category, release_by_id, sorted_by_date_descending, ItemType, Release,
    ReleaseId, ReleaseStore, RELEASE_CATEGORIES,
};
use std::sync::Arc;

fn mixed_items() -> Vec<lushlog_core::ReleaseItem> {
    vec![
        item(1, ItemType::Fixed, "fix a"),
        item(2, ItemType::New, "new a"),
        item(3, ItemType::from("beta"), "beta a"),
        item(4, ItemType::Fixed, "fix b"),
        item(5, ItemType::New, "new b"),
    ]
}

fn texts(items: &[&lushlog_core::ReleaseItem]) -> Vec<String> {
    items.iter().map(|item| item.text.clone()).collect()
}

#[test]
fn sorted_by_date_descending_orders_newest_first() {
    let releases = vec![
        release(3, "2020-08-28", "v9.34.0"),
        release(1, "2020-08-30", "v9.36.0"),
        release(2, "2020-08-29", "v9.35.0"),
    ];

    let sorted = sorted_by_date_descending(&releases);
    let dates: Vec<_> = sorted.iter().map(|release| release.date).collect();
    assert_eq!(
        dates,
        vec![date("2020-08-30"), date("2020-08-29"), date("2020-08-28")]
    );
    assert_eq!(releases[0].number, "v9.34.0");
}

#[test]
fn sorted_by_date_descending_keeps_input_order_for_equal_dates() {
    let releases = vec![
        release(1, "2020-08-29", "first"),
        release(2, "2020-08-30", "newest"),
        release(3, "2020-08-29", "second"),
        release(4, "2020-08-29", "third"),
    ];

    let labels: Vec<_> = sorted_by_date_descending(&releases)
        .into_iter()
        .map(|release| release.number)
        .collect();
    assert_eq!(labels, vec!["newest", "first", "second", "third"]);
}

#[test]
fn sorted_by_date_descending_works_on_store_snapshots() {
    let mut store = ReleaseStore::new();
    store.replace_all(seed_releases()).unwrap();
    store.append(release(4, "2020-09-01", "v10.0.0")).unwrap();

    let snapshot = store.snapshot();
    let sorted = sorted_by_date_descending(&snapshot);
    let ids: Vec<_> = sorted.iter().map(|release| release.id.to_string()).collect();
    assert_eq!(ids, vec!["4", "1", "2", "3"]);
    assert!(Arc::ptr_eq(&sorted[0], &snapshot[3]));
    assert_eq!(store.releases()[0].id, ReleaseId::from(1));
}

#[test]
fn group_by_category_preserves_order_and_drops_unrecognized() {
    let items = mixed_items();
    let groups = group_by_category(&items, &RELEASE_CATEGORIES);

    let categories: Vec<_> = groups
        .groups()
        .iter()
        .map(|group| group.category.clone())
        .collect();
    assert_eq!(categories, RELEASE_CATEGORIES.to_vec());
    assert_eq!(texts(groups.get(&ItemType::New)), vec!["new a", "new b"]);
    assert_eq!(texts(groups.get(&ItemType::Fixed)), vec!["fix a", "fix b"]);
    assert!(groups.get(&ItemType::Improved).is_empty());
    assert!(groups.get(&ItemType::from("beta")).is_empty());
    assert_eq!(groups.item_count(), 4);
}

#[test]
fn group_by_category_places_each_recognized_item_exactly_once() {
    let items = mixed_items();
    let groups = group_by_category(&items, &RELEASE_CATEGORIES);

    for item in items.iter().filter(|item| item.kind.is_recognized()) {
        let hits = groups
            .groups()
            .iter()
            .filter(|group| group.items.iter().any(|grouped| grouped.id == item.id))
            .count();
        assert_eq!(hits, 1, "item {} grouped {hits} times", item.id);
    }
}

#[test]
fn group_by_category_is_idempotent() {
    let items = mixed_items();
    let first = group_by_category(&items, &RELEASE_CATEGORIES);
    let second = group_by_category(&items, &RELEASE_CATEGORIES);
    assert_eq!(first, second);
    assert_eq!(items.len(), 5);
}

#[test]
fn group_by_category_honors_requested_subset_and_duplicates() {
    let items = mixed_items();
    let categories = [ItemType::Fixed, ItemType::Fixed];
    let groups = group_by_category(&items, &categories);

    assert_eq!(groups.groups().len(), 1);
    assert_eq!(texts(groups.get(&ItemType::Fixed)), vec!["fix a", "fix b"]);
    assert!(groups.get(&ItemType::New).is_empty());
}

#[test]
fn group_by_category_of_empty_items_yields_empty_groups() {
    let groups = group_by_category(&[], &RELEASE_CATEGORIES);
    assert_eq!(groups.groups().len(), 3);
    assert!(groups.groups().iter().all(|group| group.items.is_empty()));
}

#[test]
fn release_by_id_finds_match_or_returns_none() {
    let releases: Vec<Release> = seed_releases();
    let found = release_by_id(&releases, &ReleaseId::from(2)).unwrap();
    assert_eq!(found.number, "v9.35.0");
    assert!(release_by_id(&releases, &ReleaseId::from(99)).is_none());
}

#[test]
fn display_date_matches_changelog_header_format() {
    assert_eq!(display_date(date("2020-08-30")), "30 August 2020");
}
