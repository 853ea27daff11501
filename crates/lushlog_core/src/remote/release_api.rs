//! Release service contract and `reqwest` implementation.
//!
//! # Responsibility
//! - Define `RemoteReleaseService`, the only remote dependency of sync.
//! - Issue HTTP requests and decode server-confirmed entities.
//!
//! # Invariants
//! - Every success value is decoded from the response body; nothing is
//!   echoed back from the request input.
//! - No retries or timeouts are applied here.

use super::config::ApiConfig;
use crate::model::release::{NewRelease, NewReleaseItem, Release, ReleaseId, ReleaseItem, RemoteId};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote call failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Request never produced an HTTP response (DNS, connect, TLS, body read).
    Transport(String),
    /// Service answered with a non-2xx status.
    Status { status: u16, body: String },
    /// 2xx response without a decodable entity payload.
    MalformedResponse(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "transport error: {message}"),
            Self::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "release service returned status {status}")
                } else {
                    write!(f, "release service returned status {status}: {body}")
                }
            }
            Self::MalformedResponse(message) => write!(f, "malformed response: {message}"),
        }
    }
}

impl Error for RemoteError {}

/// Acknowledgement of a remote delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAck {
    /// Id echoed by the service, when the body carried one.
    pub echoed_id: Option<ReleaseId>,
}

/// Four-operation contract of the remote release service.
///
/// Futures are not required to be `Send`; callers drive them on a single
/// cooperative thread.
#[async_trait(?Send)]
pub trait RemoteReleaseService {
    async fn list_releases(&self) -> RemoteResult<Vec<Release>>;
    async fn create_release(&self, input: &NewRelease) -> RemoteResult<Release>;
    async fn delete_release(&self, release_id: &ReleaseId) -> RemoteResult<DeleteAck>;
    async fn add_item(
        &self,
        release_id: &ReleaseId,
        input: &NewReleaseItem,
    ) -> RemoteResult<ReleaseItem>;
}

/// HTTP-backed release service.
#[derive(Debug, Clone)]
pub struct HttpReleaseService {
    client: Client,
    config: ApiConfig,
}

impl HttpReleaseService {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Uses a caller-configured client (proxies, headers, TLS roots).
    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> RemoteResult<String> {
        let response = request.send().await.map_err(|err| {
            warn!("event=remote_request module=remote status=error op={operation} kind=transport");
            RemoteError::Transport(err.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        if !status.is_success() {
            warn!(
                "event=remote_request module=remote status=error op={operation} http_status={}",
                status.as_u16()
            );
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(
            "event=remote_request module=remote status=ok op={operation} http_status={} body_len={}",
            status.as_u16(),
            body.len()
        );
        Ok(body)
    }
}

#[async_trait(?Send)]
impl RemoteReleaseService for HttpReleaseService {
    async fn list_releases(&self) -> RemoteResult<Vec<Release>> {
        let request = self.client.get(self.config.releases_url());
        let body = self.send(request, "list").await?;
        decode_entity(&body, "list")
    }

    async fn create_release(&self, input: &NewRelease) -> RemoteResult<Release> {
        let request = self.client.post(self.config.releases_url()).json(input);
        let body = self.send(request, "create").await?;
        decode_entity(&body, "create")
    }

    async fn delete_release(&self, release_id: &ReleaseId) -> RemoteResult<DeleteAck> {
        let request = self.client.delete(self.config.release_url(release_id));
        let body = self.send(request, "delete").await?;
        decode_delete_ack(&body)
    }

    async fn add_item(
        &self,
        release_id: &ReleaseId,
        input: &NewReleaseItem,
    ) -> RemoteResult<ReleaseItem> {
        let request = self
            .client
            .post(self.config.release_items_url(release_id))
            .json(input);
        let body = self.send(request, "add_item").await?;
        decode_entity(&body, "add_item")
    }
}

/// Decodes a required JSON entity from a 2xx body.
pub(crate) fn decode_entity<T: DeserializeOwned>(
    body: &str,
    operation: &'static str,
) -> RemoteResult<T> {
    if body.trim().is_empty() {
        return Err(RemoteError::MalformedResponse(format!(
            "{operation}: empty response body"
        )));
    }
    serde_json::from_str(body)
        .map_err(|err| RemoteError::MalformedResponse(format!("{operation}: {err}")))
}

/// Decodes a delete acknowledgement.
///
/// Accepts a deleted release object (`{"id": ..}`) or a bare id. Any other
/// JSON value is a valid acknowledgement without an echo; an empty or
/// non-JSON body is malformed.
pub(crate) fn decode_delete_ack(body: &str) -> RemoteResult<DeleteAck> {
    let value: Value = decode_entity(body, "delete")?;
    let echoed = match value {
        Value::Object(mut fields) => fields.remove("id"),
        Value::Null => {
            return Err(RemoteError::MalformedResponse(
                "delete: null response body".to_string(),
            ))
        }
        other => Some(other),
    };
    let echoed_id = echoed.and_then(|value| serde_json::from_value::<RemoteId>(value).ok());
    Ok(DeleteAck { echoed_id })
}

#[cfg(test)]
mod tests {
    use super::{decode_delete_ack, decode_entity, RemoteError};
    use crate::model::release::{Release, ReleaseId, ReleaseItem};

    #[test]
    fn decode_entity_rejects_empty_body() {
        let err = decode_entity::<Release>("  ", "create").unwrap_err();
        assert_eq!(
            err,
            RemoteError::MalformedResponse("create: empty response body".to_string())
        );
    }

    #[test]
    fn decode_entity_rejects_null_list() {
        let err = decode_entity::<Vec<Release>>("null", "list").unwrap_err();
        assert!(matches!(err, RemoteError::MalformedResponse(_)));
    }

    #[test]
    fn decode_entity_rejects_item_without_text() {
        let err = decode_entity::<ReleaseItem>(r#"{"id": 7, "type": "new"}"#, "add_item")
            .unwrap_err();
        assert!(err.to_string().contains("missing `text`"), "{err}");
    }

    #[test]
    fn decode_delete_ack_reads_object_and_bare_ids() {
        let ack = decode_delete_ack(r#"{"id": 2, "title": "v9.35.0"}"#).unwrap();
        assert_eq!(ack.echoed_id, Some(ReleaseId::from(2)));

        let ack = decode_delete_ack(r#""abc""#).unwrap();
        assert_eq!(ack.echoed_id, Some(ReleaseId::from("abc")));

        let ack = decode_delete_ack(r#"{"ok": true}"#).unwrap();
        assert_eq!(ack.echoed_id, None);
    }

    #[test]
    fn decode_delete_ack_rejects_empty_and_null_bodies() {
        assert!(matches!(
            decode_delete_ack("").unwrap_err(),
            RemoteError::MalformedResponse(_)
        ));
        assert!(matches!(
            decode_delete_ack("null").unwrap_err(),
            RemoteError::MalformedResponse(_)
        ));
    }
}
