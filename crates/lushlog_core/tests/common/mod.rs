#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use lushlog_core::{
    DeleteAck, ItemType, NewRelease, NewReleaseItem, Release, ReleaseId, ReleaseItem,
    RemoteError, RemoteReleaseService, RemoteResult,
};
use std::cell::RefCell;
use std::collections::VecDeque;

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid test date")
}

pub fn release(id: u64, day: &str, number: &str) -> Release {
    Release::new(id, date(day), number)
}

pub fn item(id: u64, kind: ItemType, text: &str) -> ReleaseItem {
    ReleaseItem::new(id, kind, text)
}

pub fn seed_releases() -> Vec<Release> {
    let mut first = release(1, "2020-08-30", "v9.36.0");
    first.published = true;
    first.items = vec![
        item(11, ItemType::Improved, "Search finds shared responses"),
        item(12, ItemType::Fixed, "Search no longer misses team responses"),
        item(13, ItemType::New, "Inline validation messages"),
    ];
    let second = release(2, "2020-08-29", "v9.35.0");
    let third = release(3, "2020-08-28", "v9.34.0");
    vec![first, second, third]
}

/// Remote fake that answers each operation from a queue of scripted results
/// and records every call.
#[derive(Default)]
pub struct ScriptedRemote {
    lists: RefCell<VecDeque<RemoteResult<Vec<Release>>>>,
    creates: RefCell<VecDeque<RemoteResult<Release>>>,
    deletes: RefCell<VecDeque<RemoteResult<DeleteAck>>>,
    items: RefCell<VecDeque<RemoteResult<ReleaseItem>>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_list(&self, result: RemoteResult<Vec<Release>>) {
        self.lists.borrow_mut().push_back(result);
    }

    pub fn push_create(&self, result: RemoteResult<Release>) {
        self.creates.borrow_mut().push_back(result);
    }

    pub fn push_delete(&self, result: RemoteResult<DeleteAck>) {
        self.deletes.borrow_mut().push_back(result);
    }

    pub fn push_item(&self, result: RemoteResult<ReleaseItem>) {
        self.items.borrow_mut().push_back(result);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn next<T>(&self, queue: &RefCell<VecDeque<RemoteResult<T>>>, call: String) -> RemoteResult<T> {
        self.calls.borrow_mut().push(call.clone());
        queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Transport(format!("no scripted response for {call}"))))
    }
}

#[async_trait(?Send)]
impl RemoteReleaseService for ScriptedRemote {
    async fn list_releases(&self) -> RemoteResult<Vec<Release>> {
        self.next(&self.lists, "list".to_string())
    }

    async fn create_release(&self, input: &NewRelease) -> RemoteResult<Release> {
        self.next(&self.creates, format!("create {}", input.title))
    }

    async fn delete_release(&self, release_id: &ReleaseId) -> RemoteResult<DeleteAck> {
        self.next(&self.deletes, format!("delete {release_id}"))
    }

    async fn add_item(
        &self,
        release_id: &ReleaseId,
        input: &NewReleaseItem,
    ) -> RemoteResult<ReleaseItem> {
        self.next(&self.items, format!("add_item {release_id} {}", input.text))
    }
}
