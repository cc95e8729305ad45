//! API gateway client — the single point of entry for all backend calls.
//!
//! Every endpoint speaks the backend's JSON envelope: `{ success, message?,
//! data?, error? }`, or the paginated variant for list endpoints. Privileged
//! calls attach the session's access token as a bearer header.
//!
//! Each method is one request: no retries, no deduplication, no cancellation.
//! Two rapid saves are two independent requests; the backend's answer to the
//! last one wins. Transport failures map to `AppError::Network`; anything the
//! backend rejected maps to `AppError::Api` carrying its message verbatim.

#![allow(dead_code)]

use bytes::Bytes;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::blog::{Blog, CreateBlogInput, UpdateBlogInput};
use crate::models::project::{CreateProjectInput, Project, UpdateProjectInput};
use crate::models::resume::{CreateResumeInput, Resume};
use crate::models::stats::{BlogStats, ProjectStats, ResumeStats, UserStats};
use crate::models::user::{AuthTokens, LoginCredentials, RegisterCredentials, User};

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Response envelope used by every non-paginated endpoint.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Envelope for list endpoints: the collection plus its page window.
#[derive(Debug, Deserialize)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub pagination: Pagination,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BlogQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub technology: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl BlogQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = common_params(self.page, self.limit, self.search.as_deref());
        if let Some(tag) = &self.tag {
            params.push(("tag", tag.clone()));
        }
        params
    }
}

impl ProjectQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = common_params(self.page, self.limit, self.search.as_deref());
        if let Some(technology) = &self.technology {
            params.push(("technology", technology.clone()));
        }
        if let Some(status) = &self.status {
            params.push(("status", status.clone()));
        }
        params
    }
}

impl UserQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        common_params(self.page, self.limit, self.search.as_deref())
    }
}

fn common_params(
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(page) = page {
        params.push(("page", page.to_string()));
    }
    if let Some(limit) = limit {
        params.push(("limit", limit.to_string()));
    }
    if let Some(search) = search {
        params.push(("search", search.to_string()));
    }
    params
}

/// Thin HTTP wrapper over the portfolio backend.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    // ── auth ────────────────────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, AppError> {
        let body = LoginCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send(self.http.post(self.url("/api/auth/login")).json(&body))
            .await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AppError> {
        let body = RegisterCredentials {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_no_content(self.http.post(self.url("/api/auth/register")).json(&body))
            .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, AppError> {
        let body = serde_json::json!({ "refreshToken": refresh_token });
        self.send(self.http.post(self.url("/api/auth/refresh")).json(&body))
            .await
    }

    pub async fn me(&self, token: &str) -> Result<User, AppError> {
        self.send(self.http.get(self.url("/api/auth/me")).bearer_auth(token))
            .await
    }

    // ── blogs ───────────────────────────────────────────────────────────────

    pub async fn list_blogs(&self, query: &BlogQuery) -> Result<PaginatedResponse<Blog>, AppError> {
        self.send_page(self.http.get(self.url("/api/blogs")).query(&query.params()))
            .await
    }

    pub async fn get_blog(&self, slug: &str) -> Result<Blog, AppError> {
        self.send(self.http.get(self.url(&format!("/api/blogs/{slug}"))))
            .await
    }

    pub async fn create_blog(
        &self,
        input: &CreateBlogInput,
        token: &str,
    ) -> Result<Blog, AppError> {
        self.send(
            self.http
                .post(self.url("/api/blogs"))
                .bearer_auth(token)
                .json(input),
        )
        .await
    }

    pub async fn update_blog(
        &self,
        id: &str,
        input: &UpdateBlogInput,
        token: &str,
    ) -> Result<Blog, AppError> {
        self.send(
            self.http
                .patch(self.url(&format!("/api/blogs/{id}")))
                .bearer_auth(token)
                .json(input),
        )
        .await
    }

    pub async fn delete_blog(&self, id: &str, token: &str) -> Result<(), AppError> {
        self.send_no_content(
            self.http
                .delete(self.url(&format!("/api/blogs/{id}")))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn blog_tags(&self) -> Result<Vec<String>, AppError> {
        self.send(self.http.get(self.url("/api/blogs/tags"))).await
    }

    // ── projects ────────────────────────────────────────────────────────────

    pub async fn list_projects(
        &self,
        query: &ProjectQuery,
    ) -> Result<PaginatedResponse<Project>, AppError> {
        self.send_page(
            self.http
                .get(self.url("/api/projects"))
                .query(&query.params()),
        )
        .await
    }

    pub async fn get_project(&self, slug: &str) -> Result<Project, AppError> {
        self.send(self.http.get(self.url(&format!("/api/projects/{slug}"))))
            .await
    }

    pub async fn create_project(
        &self,
        input: &CreateProjectInput,
        token: &str,
    ) -> Result<Project, AppError> {
        self.send(
            self.http
                .post(self.url("/api/projects"))
                .bearer_auth(token)
                .json(input),
        )
        .await
    }

    pub async fn update_project(
        &self,
        id: &str,
        input: &UpdateProjectInput,
        token: &str,
    ) -> Result<Project, AppError> {
        self.send(
            self.http
                .patch(self.url(&format!("/api/projects/{id}")))
                .bearer_auth(token)
                .json(input),
        )
        .await
    }

    pub async fn delete_project(&self, id: &str, token: &str) -> Result<(), AppError> {
        self.send_no_content(
            self.http
                .delete(self.url(&format!("/api/projects/{id}")))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn project_technologies(&self) -> Result<Vec<String>, AppError> {
        self.send(self.http.get(self.url("/api/projects/technologies")))
            .await
    }

    // ── resumes ─────────────────────────────────────────────────────────────

    pub async fn list_resumes(&self, token: &str) -> Result<Vec<Resume>, AppError> {
        self.send(self.http.get(self.url("/api/resumes")).bearer_auth(token))
            .await
    }

    pub async fn get_resume(&self, id: &str, token: &str) -> Result<Resume, AppError> {
        self.send(
            self.http
                .get(self.url(&format!("/api/resumes/{id}")))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn create_resume(
        &self,
        input: &CreateResumeInput,
        token: &str,
    ) -> Result<Resume, AppError> {
        self.send(
            self.http
                .post(self.url("/api/resumes"))
                .bearer_auth(token)
                .json(input),
        )
        .await
    }

    pub async fn update_resume(
        &self,
        id: &str,
        input: &CreateResumeInput,
        token: &str,
    ) -> Result<Resume, AppError> {
        self.send(
            self.http
                .patch(self.url(&format!("/api/resumes/{id}")))
                .bearer_auth(token)
                .json(input),
        )
        .await
    }

    pub async fn delete_resume(&self, id: &str, token: &str) -> Result<(), AppError> {
        self.send_no_content(
            self.http
                .delete(self.url(&format!("/api/resumes/{id}")))
                .bearer_auth(token),
        )
        .await
    }

    /// Server-side rendering path, distinct from the local renderer. Returns
    /// the raw document bytes.
    pub async fn download_resume_pdf(&self, id: &str, token: &str) -> Result<Bytes, AppError> {
        let response = self
            .http
            .get(self.url(&format!("/api/resumes/{id}/pdf")))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api {
                status: status.as_u16(),
                message: "Failed to download PDF".to_string(),
            });
        }
        Ok(response.bytes().await?)
    }

    // ── users ───────────────────────────────────────────────────────────────

    pub async fn list_users(
        &self,
        query: &UserQuery,
        token: &str,
    ) -> Result<PaginatedResponse<User>, AppError> {
        self.send_page(
            self.http
                .get(self.url("/api/users"))
                .query(&query.params())
                .bearer_auth(token),
        )
        .await
    }

    pub async fn get_user(&self, id: &str, token: &str) -> Result<User, AppError> {
        self.send(
            self.http
                .get(self.url(&format!("/api/users/{id}")))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn update_user_role(
        &self,
        id: &str,
        role: &str,
        token: &str,
    ) -> Result<(), AppError> {
        let body = serde_json::json!({ "role": role });
        self.send_no_content(
            self.http
                .patch(self.url(&format!("/api/users/{id}/role")))
                .bearer_auth(token)
                .json(&body),
        )
        .await
    }

    pub async fn delete_user(&self, id: &str, token: &str) -> Result<(), AppError> {
        self.send_no_content(
            self.http
                .delete(self.url(&format!("/api/users/{id}")))
                .bearer_auth(token),
        )
        .await
    }

    // ── analytics ───────────────────────────────────────────────────────────

    pub async fn blog_stats(&self, token: &str) -> Result<BlogStats, AppError> {
        self.send(
            self.http
                .get(self.url("/api/blogs/analytics/overview"))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn project_stats(&self, token: &str) -> Result<ProjectStats, AppError> {
        self.send(
            self.http
                .get(self.url("/api/projects/analytics/overview"))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn resume_stats(&self, token: &str) -> Result<ResumeStats, AppError> {
        self.send(
            self.http
                .get(self.url("/api/resumes/analytics/overview"))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn user_stats(&self, token: &str) -> Result<UserStats, AppError> {
        self.send(
            self.http
                .get(self.url("/api/users/analytics/overview"))
                .bearer_auth(token),
        )
        .await
    }

    // ── transport ───────────────────────────────────────────────────────────

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), "backend response");
        parse_envelope(status, &body)
    }

    async fn send_no_content(&self, request: RequestBuilder) -> Result<(), AppError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        parse_envelope_no_data(status, &body)
    }

    async fn send_page<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<PaginatedResponse<T>, AppError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        parse_page(status, &body)
    }
}

// ── envelope parsing ────────────────────────────────────────────────────────

fn backend_message<T>(envelope: &ApiResponse<T>, status: StatusCode) -> String {
    envelope
        .error
        .clone()
        .or_else(|| envelope.message.clone())
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()))
}

fn parse_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, AppError> {
    let envelope: ApiResponse<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        // Non-JSON error body (proxy page, empty response): keep the status.
        Err(_) if !status.is_success() => {
            return Err(AppError::Api {
                status: status.as_u16(),
                message: format!("request failed with status {}", status.as_u16()),
            });
        }
        Err(e) => return Err(AppError::Json(e)),
    };

    if !status.is_success() || !envelope.success {
        return Err(AppError::Api {
            status: status.as_u16(),
            message: backend_message(&envelope, status),
        });
    }

    envelope.data.ok_or(AppError::Api {
        status: status.as_u16(),
        message: "response contained no data".to_string(),
    })
}

fn parse_envelope_no_data(status: StatusCode, body: &str) -> Result<(), AppError> {
    // DELETE and role-update endpoints answer with an empty or data-less
    // envelope; only success matters.
    if body.trim().is_empty() && status.is_success() {
        return Ok(());
    }
    let envelope: ApiResponse<serde_json::Value> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) => {
            if status.is_success() {
                return Ok(());
            }
            return Err(AppError::Api {
                status: status.as_u16(),
                message: format!("request failed with status {}", status.as_u16()),
            });
        }
    };
    if !status.is_success() || !envelope.success {
        return Err(AppError::Api {
            status: status.as_u16(),
            message: backend_message(&envelope, status),
        });
    }
    Ok(())
}

fn parse_page<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<PaginatedResponse<T>, AppError> {
    if !status.is_success() {
        let envelope: Result<ApiResponse<serde_json::Value>, _> = serde_json::from_str(body);
        let message = envelope
            .map(|e| backend_message(&e, status))
            .unwrap_or_else(|_| format!("request failed with status {}", status.as_u16()));
        return Err(AppError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let page: PaginatedResponse<T> = serde_json::from_str(body)?;
    if !page.success {
        return Err(AppError::Api {
            status: status.as_u16(),
            message: page
                .error
                .unwrap_or_else(|| format!("request failed with status {}", status.as_u16())),
        });
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope_success_unwraps_data() {
        let body = r#"{ "success": true, "data": { "value": 7 } }"#;
        let data: serde_json::Value = parse_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(data["value"], 7);
    }

    #[test]
    fn test_parse_envelope_failure_passes_message_verbatim() {
        let body = r#"{ "success": false, "error": "Title is required" }"#;
        let err = parse_envelope::<serde_json::Value>(StatusCode::BAD_REQUEST, body).unwrap_err();
        match err {
            AppError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Title is required");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_envelope_success_flag_false_despite_200() {
        let body = r#"{ "success": false, "error": "nope" }"#;
        let err = parse_envelope::<serde_json::Value>(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, AppError::Api { status: 200, .. }));
    }

    #[test]
    fn test_parse_envelope_non_json_error_body() {
        let err = parse_envelope::<serde_json::Value>(
            StatusCode::BAD_GATEWAY,
            "<html>Bad Gateway</html>",
        )
        .unwrap_err();
        match err {
            AppError::Api { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("502"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_no_data_accepts_empty_success_body() {
        assert!(parse_envelope_no_data(StatusCode::NO_CONTENT, "").is_ok());
    }

    #[test]
    fn test_parse_page_deserializes_pagination() {
        let body = r#"{
            "success": true,
            "data": [ { "v": 1 }, { "v": 2 } ],
            "pagination": {
                "currentPage": 1, "totalPages": 3, "totalItems": 25,
                "hasNext": true, "hasPrev": false
            }
        }"#;
        let page: PaginatedResponse<serde_json::Value> =
            parse_page(StatusCode::OK, body).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next);
    }

    #[test]
    fn test_blog_query_params_include_only_set_fields() {
        let query = BlogQuery {
            page: Some(2),
            tag: Some("rust".to_string()),
            ..BlogQuery::default()
        };
        let params = query.params();
        assert_eq!(
            params,
            vec![("page", "2".to_string()), ("tag", "rust".to_string())]
        );
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.url("/api/blogs"), "http://localhost:5000/api/blogs");
    }
}
