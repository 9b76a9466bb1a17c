use serde::{Deserialize, Serialize};
use std::fmt;

/// Tokens and role issued by a successful login, before the client maps the role
#[derive(Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Role exactly as the authority sent it
    pub role: String,
    pub user_id: String,
}

impl fmt::Debug for LoginGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginGrant")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Fields collected by the registration form
#[derive(Clone, Default, Deserialize)]
pub struct RegistrationProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for RegistrationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationProfile")
            .field("username", &self.username)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &logger_redacted::redact(&self.email))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Identifier as sent by the authority: a JSON number or string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub role: String,
    pub user_id: UserId,
}

impl From<LoginResponse> for LoginGrant {
    fn from(response: LoginResponse) -> Self {
        Self {
            access_token: response.access,
            refresh_token: response.refresh,
            role: response.role,
            user_id: response.user_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct VerifyEmailRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailResponse {
    pub exists: bool,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest<'a> {
    pub email: &'a str,
    pub new_password: &'a str,
    pub confirm_password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Pull a human-readable message out of an error body
///
/// Looks at `error`, `detail` and `message` first, then falls back to
/// field-keyed validation errors such as `{"email": ["already taken"]}`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    for key in ["error", "detail", "message"] {
        if let Some(text) = object.get(key).and_then(serde_json::Value::as_str) {
            if !text.trim().is_empty() {
                return Some(text.to_string());
            }
        }
    }

    let mut messages = Vec::new();
    for (field, entry) in object {
        let texts: Vec<&str> = match entry {
            serde_json::Value::String(s) => vec![s.as_str()],
            serde_json::Value::Array(items) => items.iter().filter_map(serde_json::Value::as_str).collect(),
            _ => continue,
        };
        if !texts.is_empty() {
            messages.push(format!("{field}: {}", texts.join(", ")));
        }
    }

    (!messages.is_empty()).then(|| messages.join("; "))
}
