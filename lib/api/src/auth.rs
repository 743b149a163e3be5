//! Login and self-registration.

use delib_session::{AuthToken, Role};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::{ApiError, extract_message};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Successful login: the credential pair the session store keeps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: AuthToken,
    pub role: Role,
}

/// Account type chosen on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationRole {
    Client,
    Librarian,
}

impl RegistrationRole {
    fn endpoint(&self) -> &'static str {
        match self {
            Self::Client => "/api/auth/client/register",
            Self::Librarian => "/api/auth/librarian/register",
        }
    }
}

impl std::str::FromStr for RegistrationRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "librarian" => Ok(Self::Librarian),
            _ => Err(()),
        }
    }
}

/// Extra fields a librarian registers with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffDetails {
    pub ssn: String,
    pub salary: f64,
}

/// Self-registration form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Confirmation; the server checks it against `password`.
    pub password2: String,
    pub role: RegistrationRole,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub staff: Option<StaffDetails>,
}

impl ApiClient {
    /// Exchanges credentials for a token and role.
    ///
    /// A 401 means the email/password pair was rejected.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> delib_core::Result<LoginResponse, ApiError> {
        let builder = self
            .request(Method::POST, "/api/auth/login", None)
            .json(&LoginRequest { email, password });
        let response: LoginResponse = self.send_json(builder).await?;
        info!(role = %response.role, "login accepted");
        Ok(response)
    }

    /// Registers a new client or librarian account.
    ///
    /// The server may answer 200 with `{"error": "..."}`; that is reported as
    /// [`ApiError::Validation`].
    #[instrument(skip(self, registration), fields(role = ?registration.role))]
    pub async fn register(&self, registration: &Registration) -> delib_core::Result<(), ApiError> {
        let builder = self
            .request(Method::POST, registration.role.endpoint(), None)
            .json(registration);
        let body = self.send_text(builder).await?;
        match rejection_in_body(&body) {
            Some(message) => Err(ApiError::Validation {
                message: Some(message),
            }
            .into()),
            None => Ok(()),
        }
    }
}

fn rejection_in_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?;
    extract_message(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::serve;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Json;
    use serde_json::{Value, json};

    fn registration(role: RegistrationRole) -> Registration {
        Registration {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
            password2: "pw".to_string(),
            role,
            staff: None,
        }
    }

    #[test]
    fn client_registration_omits_staff_fields() {
        let json = serde_json::to_value(registration(RegistrationRole::Client)).expect("serialize");
        assert_eq!(json["role"], "client");
        assert_eq!(json["password2"], "pw");
        assert!(json.get("ssn").is_none());
        assert!(json.get("salary").is_none());
    }

    #[test]
    fn librarian_registration_flattens_staff_fields() {
        let mut form = registration(RegistrationRole::Librarian);
        form.staff = Some(StaffDetails {
            ssn: "123-45-6789".to_string(),
            salary: 52000.0,
        });
        let json = serde_json::to_value(form).expect("serialize");
        assert_eq!(json["role"], "librarian");
        assert_eq!(json["ssn"], "123-45-6789");
        assert_eq!(json["salary"], 52000.0);
    }

    #[test]
    fn rejection_only_when_error_field_present() {
        assert_eq!(
            rejection_in_body(r#"{"error":"Email taken"}"#).as_deref(),
            Some("Email taken")
        );
        assert_eq!(rejection_in_body(r#"{"id":1}"#), None);
        assert_eq!(rejection_in_body("Registered"), None);
        assert_eq!(rejection_in_body(""), None);
    }

    #[tokio::test]
    async fn login_returns_token_and_role() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body == json!({"email": "ada@example.com", "password": "pw"}) {
                    Ok(Json(json!({"accessToken": "abc123", "role": "ROLE_CLIENT"})))
                } else {
                    Err(StatusCode::UNAUTHORIZED)
                }
            }),
        );
        let client = serve(router).await;

        let response = client.login("ada@example.com", "pw").await.expect("login");
        assert_eq!(response.access_token.as_str(), "abc123");
        assert_eq!(response.role, Role::Reader);

        let err = client.login("ada@example.com", "wrong").await.unwrap_err();
        assert!(err.current_context().is_unauthorized());
    }

    #[tokio::test]
    async fn login_with_unknown_role_is_a_decode_error() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async { Json(json!({"accessToken": "abc", "role": "ROLE_ADMIN"})) }),
        );
        let client = serve(router).await;

        let err = client.login("a@b.c", "pw").await.unwrap_err();
        assert!(matches!(err.current_context(), ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn register_routes_by_role_and_surfaces_body_errors() {
        let router = Router::new()
            .route(
                "/api/auth/client/register",
                post(|| async { Json(json!({"error": "Email already registered"})) }),
            )
            .route(
                "/api/auth/librarian/register",
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body["ssn"], "1");
                    "ok"
                }),
            );
        let client = serve(router).await;

        let err = client
            .register(&registration(RegistrationRole::Client))
            .await
            .unwrap_err();
        assert_eq!(
            err.current_context().server_message(),
            Some("Email already registered")
        );

        let mut librarian = registration(RegistrationRole::Librarian);
        librarian.staff = Some(StaffDetails {
            ssn: "1".to_string(),
            salary: 1.0,
        });
        client.register(&librarian).await.expect("register librarian");
    }
}
