//! Pure projections used by changelog views.
//!
//! # Invariants
//! - Date ordering is descending and stable: equal dates keep input order.
//! - Grouping yields one group per distinct requested category, in request
//!   order; unrequested types are dropped, empty categories stay present.

use crate::model::release::{ItemType, Release, ReleaseId, ReleaseItem};
use chrono::NaiveDate;
use std::borrow::Borrow;

/// Display order of item categories in a release.
pub const RELEASE_CATEGORIES: [ItemType; 3] = [ItemType::New, ItemType::Improved, ItemType::Fixed];

/// Items of one category, in release order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: ItemType,
    pub items: Vec<&'a ReleaseItem>,
}

/// Result of [`group_by_category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroups<'a> {
    groups: Vec<CategoryGroup<'a>>,
}

impl<'a> CategoryGroups<'a> {
    /// Groups in requested category order.
    pub fn groups(&self) -> &[CategoryGroup<'a>] {
        &self.groups
    }

    /// Items for `category`; empty when it has none or was not requested.
    pub fn get(&self, category: &ItemType) -> &[&'a ReleaseItem] {
        self.groups
            .iter()
            .find(|group| &group.category == category)
            .map(|group| group.items.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of grouped items.
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }
}

/// Returns releases ordered by `date`, newest first.
pub fn sorted_by_date_descending<R>(releases: &[R]) -> Vec<R>
where
    R: Borrow<Release> + Clone,
{
    let mut sorted = releases.to_vec();
    // `sort_by` is stable, which fixes the tie-break on store order.
    sorted.sort_by(|left, right| as_release(right).date.cmp(&as_release(left).date));
    sorted
}

/// Partitions `items` by type into one group per requested category.
pub fn group_by_category<'a>(
    items: &'a [ReleaseItem],
    categories: &[ItemType],
) -> CategoryGroups<'a> {
    let mut groups: Vec<CategoryGroup<'a>> = Vec::with_capacity(categories.len());
    for category in categories {
        if groups.iter().any(|group| &group.category == category) {
            continue;
        }
        groups.push(CategoryGroup {
            category: category.clone(),
            items: Vec::new(),
        });
    }

    for item in items {
        if let Some(group) = groups.iter_mut().find(|group| group.category == item.kind) {
            group.items.push(item);
        }
    }

    CategoryGroups { groups }
}

/// Linear lookup by id; `None` when absent.
pub fn release_by_id<'a, R>(releases: &'a [R], release_id: &ReleaseId) -> Option<&'a R>
where
    R: Borrow<Release>,
{
    releases
        .iter()
        .find(|release| &as_release(*release).id == release_id)
}

fn as_release<R: Borrow<Release>>(release: &R) -> &Release {
    <R as Borrow<Release>>::borrow(release)
}

/// Formats a release date as shown in changelog headers (`30 August 2020`).
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}
