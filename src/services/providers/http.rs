/// Movie service over HTTP/JSON
///
/// Endpoints:
/// 1. `GET /movies` → full catalog
/// 2. `GET /search?query=` → ranked matches
/// 3. `GET /recommend?title=` (or `?id=`) → similar titles
/// 4. `GET /` → welcome message, used as a health probe
use crate::{
    config::{Config, RecommendBy},
    error::{ClientError, ClientResult},
    middleware::request_id::{make_span_with_request_id, with_request_id, RequestId},
    models::{Movie, ServiceInfo},
    services::providers::MovieService,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::Instrument;

#[derive(Clone)]
pub struct HttpMovieService {
    http_client: HttpClient,
    api_url: String,
    recommend_by: RecommendBy,
}

impl HttpMovieService {
    pub fn new(api_url: String, recommend_by: RecommendBy, timeout: Duration) -> ClientResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            recommend_by,
        })
    }

    pub fn from_config(config: &Config) -> ClientResult<Self> {
        Self::new(
            config.api_url.clone(),
            config.recommend_by,
            config.request_timeout(),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Query parameter identifying `movie` for `/recommend`
    fn recommend_param(&self, movie: &Movie) -> (&'static str, String) {
        match self.recommend_by {
            RecommendBy::Title => ("title", movie.title.clone()),
            RecommendBy::Id => ("id", movie.id.to_string()),
        }
    }

    /// Issues a GET and decodes the JSON body
    ///
    /// The body is read as text first so that a malformed payload surfaces as
    /// `ClientError::Decode` rather than as a transport error.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let url = self.url(path);
        let request_id = RequestId::new();
        let span = make_span_with_request_id(&request_id, "GET", &url);

        async {
            let mut request = self.http_client.get(&url);
            if !query.is_empty() {
                request = request.query(query);
            }

            let response = with_request_id(request, &request_id).send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(status = %status, "Movie service request failed");
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let body = response.text().await?;
            let decoded: T = serde_json::from_str(&body).map_err(|e| {
                tracing::warn!(error = %e, "Movie service returned a malformed body");
                ClientError::from(e)
            })?;

            Ok::<T, ClientError>(decoded)
        }
        .instrument(span)
        .await
    }
}

#[async_trait::async_trait]
impl MovieService for HttpMovieService {
    async fn list_movies(&self) -> ClientResult<Vec<Movie>> {
        let movies: Vec<Movie> = self.get_json("/movies", &[]).await?;

        tracing::info!(
            results = movies.len(),
            provider = self.name(),
            "Catalog fetched"
        );

        Ok(movies)
    }

    async fn search(&self, query: &str) -> ClientResult<Vec<Movie>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let movies: Vec<Movie> = self.get_json("/search", &[("query", query)]).await?;

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = self.name(),
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn recommend(&self, movie: &Movie) -> ClientResult<Vec<Movie>> {
        let (key, value) = self.recommend_param(movie);
        let movies: Vec<Movie> = self.get_json("/recommend", &[(key, value.as_str())]).await?;

        tracing::info!(
            movie_id = %movie.id,
            title = %movie.title,
            results = movies.len(),
            provider = self.name(),
            "Recommendations fetched"
        );

        Ok(movies)
    }

    async fn health(&self) -> ClientResult<ServiceInfo> {
        self.get_json("/", &[]).await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service(recommend_by: RecommendBy) -> HttpMovieService {
        HttpMovieService::new(
            "http://movies.local/".to_string(),
            recommend_by,
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let service = create_test_service(RecommendBy::Title);
        assert_eq!(service.url("/movies"), "http://movies.local/movies");
    }

    #[test]
    fn test_recommend_param_by_title() {
        let service = create_test_service(RecommendBy::Title);
        let movie = Movie::new(7, "The Dark Knight");
        assert_eq!(
            service.recommend_param(&movie),
            ("title", "The Dark Knight".to_string())
        );
    }

    #[test]
    fn test_recommend_param_by_id() {
        let service = create_test_service(RecommendBy::Id);
        let movie = Movie::new(7, "The Dark Knight");
        assert_eq!(service.recommend_param(&movie), ("id", "7".to_string()));
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_without_a_request() {
        let service = create_test_service(RecommendBy::Title);
        let result = service.search("   ").await;
        assert!(matches!(result, Err(ClientError::InvalidInput(_))));
    }
}
