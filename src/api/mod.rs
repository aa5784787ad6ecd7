pub mod imgur;

use log::debug;
use reqwest::Client;
use url::Url;

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    post::{Post, PostRequest},
};

/// Client for the disaster-report backend.
///
/// Both operations are single-attempt; a hung backend fails at the configured
/// timeout instead of blocking forever.
#[derive(Debug, Clone)]
pub struct WardClient {
    client: Client,
    posts_url: Url,
}

impl WardClient {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            posts_url: posts_endpoint(config.base_url())?,
        })
    }

    /// Client against an explicit base URL, used by tests.
    #[cfg(test)]
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            posts_url: posts_endpoint(&base_url).unwrap(),
        }
    }

    fn endpoint(&self) -> Url {
        self.posts_url.clone()
    }

    /// Fetches every post. The body is decoded strictly; a missing or
    /// mistyped field is a `Decode` error, not a `"null"` string.
    pub async fn fetch_posts(&self) -> ApiResult<Vec<Post>> {
        let url = self.endpoint();
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let posts: Vec<Post> = serde_json::from_slice(&body)?;
        debug!("fetched {} posts", posts.len());
        Ok(posts)
    }

    /// Submits a new report. The response body is ignored on success.
    pub async fn create_post(&self, request: &PostRequest) -> ApiResult<()> {
        let url = self.endpoint();
        debug!("POST {}", url);
        let response = self.client.post(url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        Ok(())
    }
}

/// Resolves `{base}/posts/`, rejecting anything that is not a plain http(s)
/// base. A `mailto:`-style URL parses fine but has no path to extend.
fn posts_endpoint(base_url: &Url) -> ApiResult<Url> {
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(ApiError::BaseUrl(base_url.to_string()));
    }
    // Url::join would misbehave on a base without a trailing slash
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::BaseUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(["posts", ""]);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client(server: &MockServer) -> WardClient {
        WardClient::with_base_url(Url::parse(&server.uri()).unwrap())
    }

    #[test]
    fn non_http_base_url_is_rejected_at_construction() {
        use clap::Parser;

        let config = Config::try_parse_from([
            "disaster-ward",
            "--base-url",
            "mailto:user@example.com",
        ])
        .unwrap();
        let err = WardClient::new(&config).unwrap_err();
        assert!(matches!(err, ApiError::BaseUrl(_)));
    }

    #[tokio::test]
    async fn fetch_posts_decodes_the_documented_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "1",
                "user_id": "uid-1",
                "text": "river is rising fast",
                "image_path": "https://i.example/a.jpg",
                "location": [37.5665, 126.9780],
                "category": "Flood",
                "accuracy": "15",
            }])))
            .mount(&server)
            .await;

        let posts = client(&server).fetch_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id(), "1");
        assert_eq!(posts[0].category(), Some(crate::post::Category::Flood));
        assert_eq!(posts[0].latitude(), 37.5665);
    }

    #[tokio::test]
    async fn fetch_posts_surfaces_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client(&server).fetch_posts().await.unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_posts_rejects_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "id": "1", "text": "half a post" }])),
            )
            .mount(&server)
            .await;

        let err = client(&server).fetch_posts().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn create_post_sends_the_documented_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts/"))
            .and(body_json(json!({
                "user_id": "uid-1",
                "text": "heavy snow on route 7",
                "image_path": "",
                "location": [37.0, 127.0],
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let request =
            PostRequest::new("uid-1", "heavy snow on route 7", "", [37.0, 127.0]).unwrap();
        client(&server).create_post(&request).await.unwrap();
    }

    #[tokio::test]
    async fn create_post_surfaces_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts/"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .mount(&server)
            .await;

        let request = PostRequest::new("uid-1", "text", "", [0.0, 0.0]).unwrap();
        let err = client(&server).create_post(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { .. }));
    }
}
