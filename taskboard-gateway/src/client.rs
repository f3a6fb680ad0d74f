//! HTTP implementation of [`KanbanGateway`] for the taskboard REST API.

use crate::auth::CredentialProvider;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use taskboard_kanban::gateway::{
    CardDraft, MemberInvite, MemberRemoval, MoveRequest, NewBoard, NewColumn, NewComment,
    RoleChange,
};
use taskboard_kanban::{
    Board, BoardId, BoardMember, Card, CardId, CardPatch, Column, Comment, CommentId,
    KanbanError, KanbanGateway, Notification, NotificationId, Result,
};
use tracing::{debug, instrument, warn};
use url::Url;

/// Extract a human-readable message from a JSON error body.
///
/// Tries `error_description`, then `message`, then `error`, then falls back
/// to the raw body. A blank body yields `None`.
fn extract_error_description(body: &str) -> Option<String> {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "message", "error"] {
            if let Some(msg) = json.get(key).and_then(|v| v.as_str()) {
                return Some(msg.to_string());
            }
        }
    }
    let body = body.trim();
    (!body.is_empty()).then(|| body.to_string())
}

/// Map a non-success status to the engine's error taxonomy.
///
/// Missing or gone resources mean the card or column changed elsewhere.
fn status_error(status: StatusCode, message: Option<String>) -> KanbanError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::CONFLICT | StatusCode::GONE => {
            KanbanError::conflict(message)
        }
        _ => KanbanError::fetch(Some(status.as_u16()), message),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MoveAck {
    Card(Box<Card>),
    Wrapped { card: Box<Card> },
    Other(serde_json::Value),
}

#[derive(Deserialize)]
struct UnreadCount {
    #[serde(default)]
    count: u64,
}

#[derive(Serialize)]
struct CommentEdit<'a> {
    content: &'a str,
}

/// Client for the taskboard REST API
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    timeout: Duration,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpGateway {
    /// Build a gateway from configuration and a credential provider
    pub fn new(
        config: &GatewayConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> std::result::Result<Self, GatewayError> {
        // Url::join drops the last segment unless the base ends with '/'
        let mut raw = config.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|source| GatewayError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let timeout = config.timeout();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            timeout,
            credentials,
        })
    }

    /// The API root requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL of a `kanban/...` endpoint
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(&format!("kanban/{}", path))
            .map_err(|e| KanbanError::fetch(None, Some(format!("invalid endpoint {}: {}", path, e))))
    }

    /// Start a request with the bearer token attached when there is one
    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        let mut builder = self.client.request(method, url);
        if let Some(token) = self.credentials.token().await? {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Send a request and map transport failures
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                KanbanError::Timeout {
                    elapsed_ms: millis(self.timeout),
                }
            } else {
                KanbanError::fetch(None, Some(e.to_string()))
            }
        })?;
        self.check_response(response).await
    }

    /// Map an HTTP response to a `KanbanError` based on status code
    async fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_description(&body);
        warn!(status = status.as_u16(), message = ?message, "Request rejected");
        Err(status_error(status, message))
    }

    /// Read the body as JSON, an empty body reading as `null`
    async fn json<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let body = response
            .text()
            .await
            .map_err(|e| KanbanError::fetch(None, Some(e.to_string())))?;
        let body = if body.trim().is_empty() { "null" } else { &body };
        Ok(serde_json::from_str(body)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.request(Method::GET, path).await?;
        let response = self.send(builder).await?;
        self.json(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path).await?.json(body);
        let response = self.send(builder).await?;
        self.json(response).await
    }

    /// Send a request whose response body is ignored
    async fn send_unit<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        let mut builder = self.request(method, path).await?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder).await?;
        Ok(())
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn segment(id: &impl AsRef<str>) -> String {
    urlencoding::encode(id.as_ref()).into_owned()
}

const NO_BODY: Option<&()> = None;

#[async_trait]
impl KanbanGateway for HttpGateway {
    #[instrument(skip(self))]
    async fn list_boards(&self) -> Result<Vec<Board>> {
        self.get("boards").await
    }

    #[instrument(skip(self, board), fields(name = %board.name))]
    async fn create_board(&self, board: &NewBoard) -> Result<Board> {
        self.send_json(Method::POST, "boards", board).await
    }

    #[instrument(skip(self), fields(board = %board_id))]
    async fn list_columns(&self, board_id: &BoardId) -> Result<Vec<Column>> {
        self.get(&format!("boards/{}/columns", segment(board_id)))
            .await
    }

    #[instrument(skip(self, column), fields(board = %column.board_id, title = %column.title))]
    async fn create_column(&self, column: &NewColumn) -> Result<Column> {
        self.send_json(Method::POST, "columns", column).await
    }

    #[instrument(skip(self), fields(board = %board_id))]
    async fn list_cards(&self, board_id: &BoardId) -> Result<Vec<Card>> {
        self.get(&format!("boards/{}/cards", segment(board_id))).await
    }

    #[instrument(skip(self, draft), fields(column = %draft.column_id))]
    async fn create_card(&self, draft: &CardDraft) -> Result<Card> {
        self.send_json(Method::POST, "cards", draft).await
    }

    #[instrument(skip(self, patch), fields(card = %card_id))]
    async fn update_card(&self, card_id: &CardId, patch: &CardPatch) -> Result<Card> {
        self.send_json(Method::PUT, &format!("cards/{}", segment(card_id)), patch)
            .await
    }

    #[instrument(skip(self, request), fields(card = %request.card_id, to = %request.to_column_id))]
    async fn move_card(&self, request: &MoveRequest) -> Result<Option<Card>> {
        let ack: MoveAck = self.send_json(Method::POST, "cards/move", request).await?;
        Ok(match ack {
            MoveAck::Card(card) | MoveAck::Wrapped { card } => Some(*card),
            MoveAck::Other(_) => {
                debug!("Move acknowledged without a card");
                None
            }
        })
    }

    #[instrument(skip(self), fields(card = %card_id))]
    async fn delete_card(&self, card_id: &CardId) -> Result<()> {
        self.send_unit(Method::DELETE, &format!("cards/{}", segment(card_id)), NO_BODY)
            .await
    }

    #[instrument(skip(self), fields(board = %board_id))]
    async fn list_members(&self, board_id: &BoardId) -> Result<Vec<BoardMember>> {
        self.get(&format!("boards/{}/members", segment(board_id)))
            .await
    }

    #[instrument(skip(self, invite), fields(board = %invite.board_id))]
    async fn add_member(&self, invite: &MemberInvite) -> Result<()> {
        self.send_unit(Method::POST, "boards/members", Some(invite))
            .await
    }

    #[instrument(skip(self, change), fields(board = %change.board_id, user = %change.user_id))]
    async fn update_member_role(&self, change: &RoleChange) -> Result<()> {
        self.send_unit(Method::PUT, "boards/members/role", Some(change))
            .await
    }

    #[instrument(skip(self, removal), fields(board = %removal.board_id, user = %removal.user_id))]
    async fn remove_member(&self, removal: &MemberRemoval) -> Result<()> {
        self.send_unit(Method::DELETE, "boards/members", Some(removal))
            .await
    }

    #[instrument(skip(self), fields(card = %card_id))]
    async fn list_comments(&self, card_id: &CardId) -> Result<Vec<Comment>> {
        self.get(&format!("cards/{}/comments", segment(card_id)))
            .await
    }

    #[instrument(skip(self, comment), fields(card = %comment.card_id))]
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        self.send_json(Method::POST, "comments", comment).await
    }

    #[instrument(skip(self, content), fields(comment = %comment_id))]
    async fn update_comment(&self, comment_id: &CommentId, content: &str) -> Result<Comment> {
        self.send_json(
            Method::PUT,
            &format!("comments/{}", segment(comment_id)),
            &CommentEdit { content },
        )
        .await
    }

    #[instrument(skip(self), fields(comment = %comment_id))]
    async fn delete_comment(&self, comment_id: &CommentId) -> Result<()> {
        self.send_unit(
            Method::DELETE,
            &format!("comments/{}", segment(comment_id)),
            NO_BODY,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_notifications(&self) -> Result<Vec<Notification>> {
        self.get("notifications").await
    }

    #[instrument(skip(self))]
    async fn unread_notification_count(&self) -> Result<u64> {
        let unread: UnreadCount = self.get("notifications/unread/count").await?;
        Ok(unread.count)
    }

    #[instrument(skip(self), fields(notification = %notification_id))]
    async fn mark_notification_read(&self, notification_id: &NotificationId) -> Result<()> {
        self.send_unit(
            Method::PUT,
            &format!("notifications/{}/read", segment(notification_id)),
            NO_BODY,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn mark_all_notifications_read(&self) -> Result<()> {
        self.send_unit(Method::PUT, "notifications/read-all", NO_BODY)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Anonymous;

    #[test]
    fn test_extract_error_description() {
        assert_eq!(
            extract_error_description(r#"{"message":"Card not found"}"#).as_deref(),
            Some("Card not found")
        );
        assert_eq!(
            extract_error_description(r#"{"error":"Forbidden"}"#).as_deref(),
            Some("Forbidden")
        );
        assert_eq!(
            extract_error_description("Bad Gateway").as_deref(),
            Some("Bad Gateway")
        );
        assert_eq!(extract_error_description("  "), None);
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, None),
            KanbanError::Conflict { .. }
        ));
        assert!(matches!(
            status_error(StatusCode::GONE, None),
            KanbanError::Conflict { .. }
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, Some("bad".into())),
            KanbanError::Fetch {
                status: Some(400),
                ..
            }
        ));
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_secs(30)), 30_000);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_endpoint_joins_under_api_root() {
        let config = GatewayConfig::default().with_base_url("http://localhost:4000/api");
        let gateway = HttpGateway::new(&config, Arc::new(Anonymous)).unwrap();

        assert_eq!(
            gateway.endpoint("cards/move").unwrap().as_str(),
            "http://localhost:4000/api/kanban/cards/move"
        );
        assert_eq!(
            gateway
                .endpoint(&format!("cards/{}", segment(&CardId::from("a b"))))
                .unwrap()
                .as_str(),
            "http://localhost:4000/api/kanban/cards/a%20b"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = GatewayConfig::default().with_base_url("not a url");
        assert!(matches!(
            HttpGateway::new(&config, Arc::new(Anonymous)),
            Err(GatewayError::InvalidBaseUrl { .. })
        ));
    }
}
