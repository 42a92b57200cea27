//! HTTP contracts of the puzzle service and the player backend.
//!
//! All calls go through an injected [`HttpClient`], one attempt each.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, NetworkError};
use crate::models::{
    CheckRequest, CheckResponse, PlayerStats, Puzzle, PuzzleRequest, RecordSessionRequest,
    RegisterRequest, RegisterResponse,
};
use crate::traits::{Headers, HttpClient, Response};

pub const DEFAULT_API_URL: &str = "https://cryptoquip.app";

/// Backend client shared by every command.
#[derive(Clone)]
pub struct PuzzleClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PuzzleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PuzzleClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn json_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Accept".to_string(), "application/json".to_string());
    headers
}

impl PuzzleClient {
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str, operation: &str) -> Result<Response, ApiError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self
            .http
            .get(&url, &json_headers())
            .await
            .map_err(|err| NetworkError::from_http_error(err, &url, operation))?;
        Ok(response)
    }

    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        operation: &str,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        let body = serde_json::to_string(body).map_err(|err| NetworkError::Other {
            message: format!("failed to encode request: {}", err),
        })?;
        tracing::debug!("POST {}", url);
        let response = self
            .http
            .post(&url, &body, &json_headers())
            .await
            .map_err(|err| NetworkError::from_http_error(err, &url, operation))?;
        Ok(response)
    }

    /// Fetch today's, a dated, or a random puzzle.
    pub async fn fetch_puzzle(&self, request: &PuzzleRequest) -> Result<Puzzle, ApiError> {
        let path = format!("/api/puzzles/{}", request.path_segment());
        let response = self.get(&path, &format!("load {}", request)).await?;
        decode(&path, ensure_success(response)?)
    }

    /// Submit a solution. `Ok(false)` means the server judged it incorrect;
    /// HTTP 404 means the puzzle id is unknown.
    pub async fn check_solution(&self, game_id: &str, solution: &str) -> Result<bool, ApiError> {
        let path = format!("/api/puzzles/{}/check", urlencoding::encode(game_id));
        let response = self
            .post(&path, &CheckRequest { solution }, "check your solution")
            .await?;

        if response.status == 404 {
            return Err(ApiError::PuzzleNotFound {
                game_id: game_id.to_string(),
            });
        }

        let check: CheckResponse = decode(&path, ensure_success(response)?)?;
        Ok(check.correct)
    }

    /// Register a client-generated player id and return its claim code.
    pub async fn register_player(&self, player_id: &str) -> Result<String, ApiError> {
        let path = "/api/players";
        let response = self
            .post(path, &RegisterRequest { player_id }, "register")
            .await?;
        let registered: RegisterResponse = decode(path, ensure_success(response)?)?;
        Ok(registered.claim_code)
    }

    /// Record a completed solve. Idempotent on the server side.
    pub async fn record_session(
        &self,
        player_id: &str,
        game_id: &str,
        completion_time: Duration,
    ) -> Result<(), ApiError> {
        let path = format!("/api/players/{}/sessions", urlencoding::encode(player_id));
        let body = RecordSessionRequest {
            game_id,
            completion_time_ms: completion_time.as_millis() as u64,
        };
        let response = self.post(&path, &body, "record your solve").await?;
        ensure_success(response)?;
        Ok(())
    }

    /// Fetch aggregate statistics, keeping only the most recent entries.
    pub async fn fetch_stats(&self, player_id: &str) -> Result<PlayerStats, ApiError> {
        let path = format!("/api/players/{}/stats", urlencoding::encode(player_id));
        let response = self.get(&path, "load your statistics").await?;
        let stats: PlayerStats = decode(&path, ensure_success(response)?)?;
        Ok(stats.truncate_recent())
    }
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(NetworkError::HttpStatus {
        status: response.status,
        message,
    }
    .into())
}

fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
    response.json().map_err(|err| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;
    use serde_json::json;

    fn client_with(mock: &MockHttpClient) -> PuzzleClient {
        PuzzleClient::new("http://test/", Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_fetch_puzzle_by_date() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://test/api/puzzles/2024-05-01",
            MockResponse::json(
                200,
                json!({"id": "p1", "date": "2024-05-01", "encryptedText": "AB C"}),
            ),
        );
        let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let puzzle = client_with(&mock)
            .fetch_puzzle(&PuzzleRequest::Date(date))
            .await
            .unwrap();

        assert_eq!(puzzle.id, "p1");
        assert_eq!(mock.get_requests()[0].method, "GET");
    }

    #[tokio::test]
    async fn test_check_not_found_is_distinct() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://test/api/puzzles/gone/check",
            MockResponse::json(404, json!({"error": "not found"})),
        );

        let result = client_with(&mock).check_solution("gone", "AB").await;
        assert_eq!(
            result,
            Err(ApiError::PuzzleNotFound {
                game_id: "gone".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_ids_are_percent_encoded_in_paths() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({"correct": true})));

        client_with(&mock).check_solution("a/b c", "AB").await.unwrap();

        assert_eq!(
            mock.get_requests()[0].url,
            "http://test/api/puzzles/a%2Fb%20c/check"
        );
    }

    #[tokio::test]
    async fn test_check_sends_solution_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({"correct": false})));

        let correct = client_with(&mock).check_solution("p1", "HI, YO").await.unwrap();

        assert!(!correct);
        let request = &mock.get_requests()[0];
        assert_eq!(request.json_body().unwrap(), json!({"solution": "HI, YO"}));
        assert_eq!(
            request.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[tokio::test]
    async fn test_transport_errors_are_classified() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::Timeout("slow".to_string())));

        let err = client_with(&mock)
            .fetch_puzzle(&PuzzleRequest::Today)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Network(NetworkError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(503, json!({})));

        let err = client_with(&mock).fetch_stats("abc").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Network(NetworkError::HttpStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_record_session_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::new(204, bytes::Bytes::new())));

        client_with(&mock)
            .record_session("abc", "p1", Duration::from_millis(90_500))
            .await
            .unwrap();

        let request = &mock.get_requests()[0];
        assert_eq!(request.url, "http://test/api/players/abc/sessions");
        assert_eq!(
            request.json_body().unwrap(),
            json!({"gameId": "p1", "completionTimeMs": 90_500})
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::new(
            200,
            bytes::Bytes::from("not json"),
        )));

        let err = client_with(&mock).register_player("abc").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
