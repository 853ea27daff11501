//! Wire-shape decoding for release payloads.
//!
//! The service answers in two shapes: flat records, and records whose
//! user-supplied fields sit under a `data` envelope. Top-level fields win
//! over enveloped ones when both are present.

use super::release::{ItemLink, ItemType, Release, ReleaseId, ReleaseItem, RemoteId};
use chrono::{DateTime, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";
/// Long English form typed into the release form, e.g. `August 30, 2020`.
const LONG_DATE_FORMATS: [&str; 2] = ["%B %d, %Y", "%b %d, %Y"];

pub(crate) fn serialize_date<S: Serializer>(
    date: &NaiveDate,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_FORMAT))
}

/// Parses a calendar date from `YYYY-MM-DD`, an RFC 3339 timestamp, or the
/// long English form (`August 30, 2020`, `Aug 30, 2020`).
///
/// Timestamps keep the date as written in their own offset. Anything else is
/// an error, which fails decoding of the whole enclosing payload.
pub(crate) fn parse_calendar_date(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    if let Some(date) = LONG_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
    {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|err| format!("invalid release date `{trimmed}`: {err}"))
}

fn deserialize_optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|value| parse_calendar_date(&value).map_err(D::Error::custom))
        .transpose()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReleaseFields {
    #[serde(default, alias = "number")]
    title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    date: Option<NaiveDate>,
    #[serde(default)]
    published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReleaseWire {
    id: ReleaseId,
    #[serde(default)]
    data: Option<ReleaseFields>,
    #[serde(default)]
    items: Vec<ReleaseItem>,
    #[serde(flatten)]
    fields: ReleaseFields,
}

impl TryFrom<ReleaseWire> for Release {
    type Error = String;

    fn try_from(value: ReleaseWire) -> Result<Self, Self::Error> {
        let envelope = value.data.unwrap_or_default();
        let id = value.id;
        let number = value
            .fields
            .title
            .or(envelope.title)
            .ok_or_else(|| format!("release {id} is missing `title`"))?;
        let date = value
            .fields
            .date
            .or(envelope.date)
            .ok_or_else(|| format!("release {id} is missing `date`"))?;

        Ok(Self {
            id,
            date,
            number,
            published: value.fields.published.or(envelope.published).unwrap_or(false),
            items: value.items,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ItemFields {
    #[serde(default, rename = "type")]
    kind: Option<ItemType>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    link: Option<ItemLink>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    img: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemWire {
    id: RemoteId,
    #[serde(default)]
    data: Option<ItemFields>,
    #[serde(flatten)]
    fields: ItemFields,
}

impl TryFrom<ItemWire> for ReleaseItem {
    type Error = String;

    fn try_from(value: ItemWire) -> Result<Self, Self::Error> {
        let envelope = value.data.unwrap_or_default();
        let fields = value.fields;
        let id = value.id;
        let kind = fields
            .kind
            .or(envelope.kind)
            .ok_or_else(|| format!("release item {id} is missing `type`"))?;
        let text = fields
            .text
            .or(envelope.text)
            .ok_or_else(|| format!("release item {id} is missing `text`"))?;

        Ok(Self {
            id,
            kind,
            text,
            link: fields.link.or(envelope.link),
            note: fields.note.or(envelope.note),
            img: fields.img.or(envelope.img),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::parse_calendar_date;
    use chrono::NaiveDate;

    #[test]
    fn parse_calendar_date_accepts_plain_dates() {
        assert_eq!(
            parse_calendar_date("2020-08-30").unwrap(),
            NaiveDate::from_ymd_opt(2020, 8, 30).unwrap()
        );
    }

    #[test]
    fn parse_calendar_date_keeps_timestamp_local_date() {
        assert_eq!(
            parse_calendar_date("2020-08-29T22:00:00.000Z").unwrap(),
            NaiveDate::from_ymd_opt(2020, 8, 29).unwrap()
        );
        assert_eq!(
            parse_calendar_date("2020-08-30T00:30:00+02:00").unwrap(),
            NaiveDate::from_ymd_opt(2020, 8, 30).unwrap()
        );
    }

    #[test]
    fn parse_calendar_date_accepts_long_english_form() {
        let expected = NaiveDate::from_ymd_opt(2020, 8, 30).unwrap();
        assert_eq!(parse_calendar_date("August 30, 2020").unwrap(), expected);
        assert_eq!(parse_calendar_date(" Aug 30, 2020 ").unwrap(), expected);
    }

    #[test]
    fn parse_calendar_date_rejects_free_text() {
        let err = parse_calendar_date("end of August").unwrap_err();
        assert!(err.contains("invalid release date"));
    }
}
