//! Request and response payloads shared by the frontend and the API.

use crate::model::diagnostic::DiagnosticRecord;
use serde::{Deserialize, Serialize};

/// Body of `GET /api/get-diagnostics-by-canteen`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanteenDiagnosticsResponse {
    #[serde(default)]
    pub latest: Option<DiagnosticRecord>,
    #[serde(default)]
    pub previous: Option<DiagnosticRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of `POST /api/save-diagnostics`.
pub struct SaveDiagnosticsRequest {
    pub diagnostics: Vec<DiagnosticRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginTokenRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub token: String,
}

/// Session token returned by `POST /api/login`, stored by the browser as `jwt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCanteen {
    pub name: String,
    pub city: String,
    pub sector: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub canteen: NewCanteen,
}
