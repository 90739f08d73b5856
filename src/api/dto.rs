//! Request and response bodies exchanged with the backend

use serde::{Deserialize, Serialize};

use crate::models::transaction::wire_id;

/// `POST /login`
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub login: &'a str,
    pub senha: &'a str,
}

/// Body of a successful login
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub dados: LoginData,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    #[serde(rename = "usuarioLogado")]
    pub logged_user: LoggedUser,
}

/// Credentials of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggedUser {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    #[serde(deserialize_with = "wire_id::deserialize")]
    pub id: String,
}

/// `POST /usuarios`
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub username: String,
}

/// `{sucesso, resultado, mensagem}` wrapper around most responses
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub sucesso: Option<bool>,
    pub resultado: Option<T>,
    pub mensagem: Option<String>,
}

/// What an error response may carry
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub mensagem: Option<String>,
    pub detalhe: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Message to show the user, with the detail appended when present
    pub fn describe(&self) -> Option<String> {
        let message = self.mensagem.as_deref()?.trim();
        if message.is_empty() {
            return None;
        }
        Some(match &self.detalhe {
            Some(serde_json::Value::String(d)) if !d.is_empty() => format!("{} ({})", message, d),
            _ => message.to_string(),
        })
    }
}
