//! Project-scoped GitLab API v4 client
//!
//! Every request carries the `Private-Token` header of the technical user. Responses
//! with a non-success status become [`ApiError::Status`] with the response body.

use crate::core::config::ReleaserConfig;
use crate::core::error::{ApiError, ReleaserError, ReleaserResult};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const TOKEN_HEADER: &str = "Private-Token";
const USER_AGENT: &str = concat!("gitlab-releaser/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the API of one GitLab project
#[derive(Debug, Clone)]
pub struct GitLabClient {
  http: Client,
  api_url: Url,
  project_id: String,
  token: String,
}

impl GitLabClient {
  /// Create a client for `project_id` on the API rooted at `api_url`
  pub fn new(api_url: &str, project_id: &str, token: &str) -> ReleaserResult<Self> {
    let invalid = |reason: String| {
      ReleaserError::with_help(
        format!("Invalid GitLab API URL {}: {}", api_url, reason),
        "CI_API_V4_URL must be the API root, e.g. https://git.duniter.org/api/v4",
      )
    };
    let parsed = Url::parse(api_url).map_err(|e| invalid(e.to_string()))?;
    if parsed.cannot_be_a_base() {
      return Err(invalid("not a hierarchical URL".to_string()));
    }

    let http = Client::builder().user_agent(USER_AGENT).timeout(TIMEOUT).build()?;

    Ok(Self {
      http,
      api_url: parsed,
      project_id: project_id.to_string(),
      token: token.to_string(),
    })
  }

  pub fn from_config(config: &ReleaserConfig) -> ReleaserResult<Self> {
    Self::new(&config.api_url, &config.project_id, &config.token)
  }

  /// Project URL extended with `segments`, each one percent-encoded
  pub fn url(&self, segments: &[&str]) -> Url {
    let mut url = self.api_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().push("projects").push(&self.project_id).extend(segments);
    }
    url
  }

  fn request(&self, method: Method, url: Url) -> RequestBuilder {
    self.http.request(method, url).header(TOKEN_HEADER, &self.token)
  }

  /// Send a request and turn unsuccessful statuses into errors
  async fn execute(&self, method: Method, url: Url, request: RequestBuilder) -> ReleaserResult<Response> {
    tracing::debug!(%method, %url, "GitLab API request");
    let response = request.send().await.map_err(ApiError::from)?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(
        ApiError::Status {
          method: method.to_string(),
          url: url.to_string(),
          status: status.as_u16(),
          body,
        }
        .into(),
      );
    }
    Ok(response)
  }

  /// GET a JSON document
  pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str], query: &[(&str, &str)]) -> ReleaserResult<T> {
    let url = self.url(segments);
    let request = self.request(Method::GET, url.clone()).query(query);
    let response = self.execute(Method::GET, url.clone(), request).await?;

    let text = response.text().await.map_err(ApiError::from)?;
    serde_json::from_str(&text).map_err(|e| {
      ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
      }
      .into()
    })
  }

  /// Send a JSON body with the given method
  pub async fn send_json<B: Serialize + ?Sized>(&self, method: Method, segments: &[&str], body: &B) -> ReleaserResult<()> {
    let url = self.url(segments);
    let request = self.request(method.clone(), url.clone()).json(body);
    self.execute(method, url, request).await?;
    Ok(())
  }

  /// POST without body
  pub async fn post(&self, segments: &[&str]) -> ReleaserResult<()> {
    let url = self.url(segments);
    let request = self.request(Method::POST, url.clone());
    self.execute(Method::POST, url, request).await?;
    Ok(())
  }
}
