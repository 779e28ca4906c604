//! Client for the SmugMug legacy 1.2.2 JSON API.
//!
//! Covers the three calls the sync needs: password login (yielding a
//! session id and the account nickname), the album listing, and the
//! per-album image listing in its heavy form (sizes, MD5 sums, video
//! tier URLs). Every response carries a `stat` field; anything other
//! than `"ok"` is surfaced as an [`ApiError::Response`].

pub mod error;
pub mod types;

use reqwest::Client;
use serde_json::Value;

pub use error::ApiError;
pub use types::{Album, AlbumInfo, Image, ImageInfo};

const API_BASE: &str = "https://api.smugmug.com/services/api/json/1.2.2/";

pub struct SmugClient {
    http: Client,
    base_url: String,
    api_key: String,
    session_id: String,
    nick_name: String,
}

/// Issue one API call and return the parsed body after the `stat` check.
async fn call(
    http: &Client,
    base_url: &str,
    method: &str,
    params: &[(&str, &str)],
) -> Result<Value, ApiError> {
    let response = http
        .get(base_url)
        .query(&[("method", method)])
        .query(params)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::HttpStatus {
            method: method.to_string(),
            status: response.status().as_u16(),
        });
    }

    let body: Value = response.json().await?;
    let stat = body["stat"].as_str().unwrap_or("");
    if stat != "ok" {
        return Err(ApiError::Response {
            method: method.to_string(),
            code: body["code"].as_i64().unwrap_or(0),
            message: body["message"].as_str().unwrap_or("unknown error").to_string(),
        });
    }
    Ok(body)
}

impl SmugClient {
    /// Authenticate with `smugmug.login.withPassword` against the
    /// production endpoint.
    pub async fn login(email: &str, password: &str, api_key: &str) -> Result<Self, ApiError> {
        Self::login_at(API_BASE, email, password, api_key).await
    }

    /// Same as [`login`](Self::login) with an explicit endpoint; tests
    /// point this at a local mock server.
    pub async fn login_at(
        base_url: &str,
        email: &str,
        password: &str,
        api_key: &str,
    ) -> Result<Self, ApiError> {
        let http = Client::new();
        let body = call(
            &http,
            base_url,
            "smugmug.login.withPassword",
            &[
                ("APIKey", api_key),
                ("EmailAddress", email),
                ("Password", password),
            ],
        )
        .await?;

        let login = &body["Login"];
        let session_id: String = serde_json::from_value(login["Session"]["id"].clone())?;
        let nick_name: String = serde_json::from_value(login["User"]["NickName"].clone())?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            session_id,
            nick_name,
        })
    }

    pub fn nick_name(&self) -> &str {
        &self.nick_name
    }

    /// The underlying HTTP client, shared with the download executor so
    /// connection pools are reused.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// List all albums for the logged-in account, in catalog order.
    pub async fn albums(&self) -> Result<Vec<Album>, ApiError> {
        let body = call(
            &self.http,
            &self.base_url,
            "smugmug.albums.get",
            &[
                ("SessionID", self.session_id.as_str()),
                ("APIKey", self.api_key.as_str()),
                ("NickName", self.nick_name.as_str()),
                ("Heavy", "1"),
            ],
        )
        .await?;

        let wire: Vec<AlbumInfo> = serde_json::from_value(body["Albums"].clone())?;
        Ok(wire.into_iter().map(Album::from_wire).collect())
    }

    /// List an album's images, in catalog order. Conversion to the domain
    /// type validates each record; a missing filename or unknown format
    /// code fails the whole listing for that album.
    pub async fn images(&self, album: &Album) -> Result<Vec<Image>, ApiError> {
        let album_id = album.id.to_string();
        let body = call(
            &self.http,
            &self.base_url,
            "smugmug.images.get",
            &[
                ("SessionID", self.session_id.as_str()),
                ("APIKey", self.api_key.as_str()),
                ("AlbumID", album_id.as_str()),
                ("AlbumKey", album.key.as_str()),
                ("Heavy", "1"),
            ],
        )
        .await?;

        let wire: Vec<ImageInfo> = serde_json::from_value(body["Album"]["Images"].clone())?;
        wire.into_iter()
            .map(|info| Image::from_wire(info, album))
            .collect()
    }
}

impl std::fmt::Debug for SmugClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmugClient")
            .field("nick_name", &self.nick_name)
            .field("session_id", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_login(server: &MockServer) {
        Mock::given(method("GET"))
            .and(query_param("method", "smugmug.login.withPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stat": "ok",
                "Login": {
                    "Session": {"id": "sess-1"},
                    "User": {"id": 99, "NickName": "tester", "DisplayName": "Tester"}
                }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_login_success() {
        let server = MockServer::start().await;
        mock_login(&server).await;

        let client = SmugClient::login_at(&server.uri(), "u@example.com", "pw", "key")
            .await
            .unwrap();
        assert_eq!(client.nick_name(), "tester");
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_code_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stat": "fail", "code": 5, "message": "invalid login"
            })))
            .mount(&server)
            .await;

        let err = SmugClient::login_at(&server.uri(), "u@example.com", "pw", "key")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Response { code: 5, .. }));
    }

    #[tokio::test]
    async fn test_albums_preserve_catalog_order() {
        let server = MockServer::start().await;
        mock_login(&server).await;
        Mock::given(method("GET"))
            .and(query_param("method", "smugmug.albums.get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stat": "ok",
                "Albums": [
                    {"id": 2, "Key": "b", "Title": "Beta",
                     "Category": {"id": 1, "Name": "Cat"},
                     "LastUpdated": "2024-01-02 00:00:00", "URL": "http://x/b"},
                    {"id": 1, "Key": "a", "Title": "Alpha",
                     "Category": {"id": 1, "Name": "Cat"},
                     "SubCategory": {"id": 3, "Name": "Sub"},
                     "LastUpdated": "2024-01-01 00:00:00", "URL": "http://x/a"}
                ]
            })))
            .mount(&server)
            .await;

        let client = SmugClient::login_at(&server.uri(), "u", "p", "k").await.unwrap();
        let albums = client.albums().await.unwrap();
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].title, "Beta");
        assert_eq!(albums[1].subcategory.as_deref(), Some("Sub"));
    }

    #[tokio::test]
    async fn test_images_validates_records() {
        let server = MockServer::start().await;
        mock_login(&server).await;
        Mock::given(method("GET"))
            .and(query_param("method", "smugmug.images.get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stat": "ok",
                "Album": {"Images": [
                    {"id": 1, "Key": "i1", "FileName": "a.jpg", "Format": "JPG",
                     "Size": 10, "MD5Sum": "h", "OriginalURL": "http://x/a.jpg"},
                    {"id": 2, "Key": "i2", "FileName": "", "Format": "JPG",
                     "Size": 10, "MD5Sum": "h", "OriginalURL": "http://x/b.jpg"}
                ]}
            })))
            .mount(&server)
            .await;

        let client = SmugClient::login_at(&server.uri(), "u", "p", "k").await.unwrap();
        let album = Album {
            id: 7,
            key: "alb".into(),
            url: "http://x/alb".into(),
            title: "T".into(),
            category: "C".into(),
            subcategory: None,
            last_updated: "2024-01-01 00:00:00".into(),
        };
        let err = client.images(&album).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingFilename { image_id: 2, .. }));
    }

    #[tokio::test]
    async fn test_non_success_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = SmugClient::login_at(&server.uri(), "u", "p", "k")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { status: 503, .. }));
    }
}
