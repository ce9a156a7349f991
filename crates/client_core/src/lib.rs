//! Client core for the employee management system: the HTTP collaborator,
//! the session context, the form validator, the collection view engine,
//! and the page controllers that tie them together.
//!
//! All business logic and persistence live behind the API; this crate only
//! holds ephemeral view state and a read-through cache of the record list.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use shared::{
    domain::{Employee, EmployeeDraft, EmployeeId},
    error::ApiClientError,
    protocol::{ApiErrorBody, DashboardStats, LoginRequest, LoginResponse},
};
use tracing::warn;

pub mod controller;
pub mod session;
pub mod validate;
pub mod view;

use session::SessionContext;

pub type ApiResult<T> = Result<T, ApiClientError>;

/// The external API collaborator. Transport details are owned by the
/// implementation; controllers only see this surface.
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse>;
    async fn list_all(&self) -> ApiResult<Vec<Employee>>;
    async fn create(&self, draft: &EmployeeDraft) -> ApiResult<Employee>;
    async fn update(&self, id: EmployeeId, draft: &EmployeeDraft) -> ApiResult<Employee>;
    async fn remove(&self, id: EmployeeId) -> ApiResult<()>;
    async fn dashboard_stats(&self) -> ApiResult<DashboardStats>;
}

/// Logs in through the collaborator and, only on success, writes the
/// bearer token and display username into the session context.
pub async fn sign_in(
    api: &dyn EmployeeApi,
    session: &SessionContext,
    username: &str,
    password: &str,
) -> ApiResult<()> {
    let response = api.login(username, password).await?;
    session.begin(response.token, username);
    Ok(())
}

/// `EmployeeApi` over HTTP against the backend's REST surface. The session
/// context is injected; its bearer token is attached to every request.
pub struct HttpEmployeeApi {
    http: Client,
    server_url: String,
    session: Arc<SessionContext>,
}

impl HttpEmployeeApi {
    pub fn new(server_url: impl Into<String>, session: Arc<SessionContext>) -> Self {
        let server_url: String = server_url.into();
        Self {
            http: Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{path}", self.server_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Maps a non-success status onto the error taxonomy: 404 is a missing
    /// record, any other 4xx is a server-side rejection carrying the body's
    /// message, everything else is a transport fault.
    async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiClientError::NotFound);
        }
        if status.is_client_error() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(ApiErrorBody::into_message)
                .unwrap_or_else(|| format!("request rejected ({status})"));
            return Err(ApiClientError::Validation { message });
        }
        Err(ApiClientError::Transport(format!("server returned {status}")))
    }
}

#[async_trait]
impl EmployeeApi for HttpEmployeeApi {
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let response = self
            .http
            .post(self.endpoint("/auth/login"))
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(ApiClientError::transport)?;

        // Rejected credentials come back as 401/403 and must surface as an
        // auth failure, not a generic validation message.
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(ApiErrorBody::into_message)
                .unwrap_or_else(|| "invalid username or password".to_string());
            return Err(ApiClientError::Auth(message));
        }

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiClientError::transport)
    }

    async fn list_all(&self) -> ApiResult<Vec<Employee>> {
        let response = self
            .authorized(self.http.get(self.endpoint("/employees/all")))
            .send()
            .await
            .map_err(ApiClientError::transport)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiClientError::transport)
    }

    async fn create(&self, draft: &EmployeeDraft) -> ApiResult<Employee> {
        let response = self
            .authorized(self.http.post(self.endpoint("/employees")))
            .json(draft)
            .send()
            .await
            .map_err(ApiClientError::transport)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiClientError::transport)
    }

    async fn update(&self, id: EmployeeId, draft: &EmployeeDraft) -> ApiResult<Employee> {
        let response = self
            .authorized(self.http.put(self.endpoint(&format!("/employees/{}", id.0))))
            .json(draft)
            .send()
            .await
            .map_err(ApiClientError::transport)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiClientError::transport)
    }

    async fn remove(&self, id: EmployeeId) -> ApiResult<()> {
        let response = self
            .authorized(
                self.http
                    .delete(self.endpoint(&format!("/employees/{}", id.0))),
            )
            .send()
            .await
            .map_err(ApiClientError::transport)?;
        Self::check(response).await.map(|_| ()).inspect_err(|err| {
            warn!(employee_id = id.0, "delete request failed: {err}");
        })
    }

    async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        let response = self
            .authorized(self.http.get(self.endpoint("/dashboard/stats")))
            .send()
            .await
            .map_err(ApiClientError::transport)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiClientError::transport)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
