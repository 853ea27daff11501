//! Release and release-item records.
//!
//! # Responsibility
//! - Define the canonical release record and its append-only item list.
//! - Define validated inputs for create/add-item requests.
//!
//! # Invariants
//! - `Release::id` and `ReleaseItem::id` come from a remote response.
//! - `items` keeps append order; nothing in core reorders it.
//! - Unknown item types are preserved as `ItemType::Unrecognized`.

use super::wire::{serialize_date, ItemWire, ReleaseWire};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque identifier assigned by the remote service.
///
/// The service may encode ids as JSON strings or integers; both decode to
/// the same canonical text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteId(String);

/// Release identifier.
pub type ReleaseId = RemoteId;

/// Release item identifier.
pub type ItemId = RemoteId;

impl RemoteId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RemoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RemoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RemoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

macro_rules! remote_id_from_integer {
    ($($int:ty),*) => {
        $(
            impl From<$int> for RemoteId {
                fn from(value: $int) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

remote_id_from_integer!(i32, i64, u32, u64);

impl Serialize for RemoteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RemoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(value) => Self(value),
            RawId::Unsigned(value) => Self(value.to_string()),
            RawId::Signed(value) => Self(value.to_string()),
        })
    }
}

/// Category of a release item.
///
/// Serialized as the lowercase wire string (`new|improved|fixed`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    New,
    Improved,
    Fixed,
    /// Any other value the service returned. Kept so the record survives a
    /// round trip, but excluded from grouped views.
    Unrecognized(String),
}

impl ItemType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "new",
            Self::Improved => "improved",
            Self::Fixed => "fixed",
            Self::Unrecognized(value) => value.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for ItemType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "new" => Self::New,
            "improved" => Self::Improved,
            "fixed" => Self::Fixed,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<&str> for ItemType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ItemType> for String {
    fn from(value: ItemType) -> Self {
        match value {
            ItemType::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hyperlink attached to a release item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLink {
    pub href: String,
    pub text: String,
}

/// One changelog entry inside a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemWire")]
pub struct ReleaseItem {
    pub id: ItemId,
    /// Serialized as `type` to match the service schema.
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<ItemLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

impl ReleaseItem {
    /// Creates an item with no optional attributes.
    pub fn new(id: impl Into<ItemId>, kind: ItemType, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            text: text.into(),
            link: None,
            note: None,
            img: None,
        }
    }
}

/// Canonical release record as confirmed by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReleaseWire")]
pub struct Release {
    pub id: ReleaseId,
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    /// User-facing label, usually a version string. Wire name is `title`.
    #[serde(rename = "title")]
    pub number: String,
    /// Informational only; core never branches on it.
    pub published: bool,
    pub items: Vec<ReleaseItem>,
}

impl Release {
    /// Creates an unpublished release with no items.
    pub fn new(id: impl Into<ReleaseId>, date: NaiveDate, number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date,
            number: number.into(),
            published: false,
            items: Vec::new(),
        }
    }

    /// Returns a copy of this release with `item` appended to `items`.
    pub fn with_item(&self, item: ReleaseItem) -> Self {
        let mut next = self.clone();
        next.items.push(item);
        next
    }
}

/// Input validation errors for create/add-item requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValidationError {
    EmptyTitle,
    EmptyText,
    UnrecognizedType(String),
}

impl Display for InputValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "release title cannot be empty"),
            Self::EmptyText => write!(f, "release item text cannot be empty"),
            Self::UnrecognizedType(value) => {
                write!(
                    f,
                    "unrecognized release item type `{value}`; expected new|improved|fixed"
                )
            }
        }
    }
}

impl Error for InputValidationError {}

/// Request body for creating a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    pub title: String,
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub published: bool,
}

impl NewRelease {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            date,
            published: false,
        }
    }

    /// Validates request fields before any network call.
    pub fn validate(&self) -> Result<(), InputValidationError> {
        if self.title.trim().is_empty() {
            return Err(InputValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Request body for appending an item to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReleaseItem {
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<ItemLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

impl NewReleaseItem {
    pub fn new(kind: ItemType, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            link: None,
            note: None,
            img: None,
        }
    }

    pub fn with_link(mut self, href: impl Into<String>, text: impl Into<String>) -> Self {
        self.link = Some(ItemLink {
            href: href.into(),
            text: text.into(),
        });
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = Some(img.into());
        self
    }

    /// Validates request fields before any network call.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is blank.
    /// - `UnrecognizedType` when `kind` is outside `new|improved|fixed`.
    pub fn validate(&self) -> Result<(), InputValidationError> {
        if self.text.trim().is_empty() {
            return Err(InputValidationError::EmptyText);
        }
        if let ItemType::Unrecognized(value) = &self.kind {
            return Err(InputValidationError::UnrecognizedType(value.clone()));
        }
        Ok(())
    }
}
