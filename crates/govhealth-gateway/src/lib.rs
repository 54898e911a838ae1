#![forbid(unsafe_code)]

//! Internal assurance API.
//!
//! Exposes the validation pipeline over HTTP for regression detection, and
//! only in the staging environment: everywhere else the routes answer a
//! plain 404 exactly like an unknown path, so their presence is
//! undetectable.  Within staging, a static admin credential header is
//! checked independently of the environment gate.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;

use govhealth_engine::directory::GovernanceDirectory;
use govhealth_engine::validation_pipeline::validate;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Deployment environment the gateway believes it is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Unrecognized values resolve to production, the most restrictive
    /// reading.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" => Self::Staging,
            _ => Self::Production,
        }
    }

    pub const fn allows_assurance_routes(self) -> bool {
        matches!(self, Self::Staging)
    }
}

/// Gateway configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub environment: Environment,
    pub admin_token: String,
    pub listen_addr: String,
    pub data_path: String,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            environment: Environment::parse(
                &std::env::var("GOVHEALTH_ENV").unwrap_or_default(),
            ),
            admin_token: std::env::var("GOVHEALTH_ADMIN_TOKEN").unwrap_or_default(),
            listen_addr: std::env::var("GOVHEALTH_LISTEN_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8471".to_string()),
            data_path: std::env::var("GOVHEALTH_DATA_PATH")
                .unwrap_or_else(|_| "organizations.json".to_string()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn GovernanceDirectory + Send + Sync>,
    pub environment: Environment,
    pub admin_token: Arc<String>,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn GovernanceDirectory + Send + Sync>,
        environment: Environment,
        admin_token: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            environment,
            admin_token: Arc::new(admin_token.into()),
        }
    }
}

/// One row of the batch summary.
#[derive(Debug, Serialize)]
struct OrganizationValidationSummary {
    organization_id: String,
    ghi: f64,
    grade: String,
    passed: bool,
    issue_count: usize,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/internal/assurance/validation",
            get(batch_validation_handler),
        )
        .route(
            "/internal/assurance/organizations/{org_id}/validation",
            get(organization_validation_handler),
        )
        .with_state(state)
}

async fn organization_validation_handler(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    let Some(record) = state.directory.organization(&org_id) else {
        return not_found();
    };

    let result = validate(&record.profile, &record.findings, &record.tech_stack);
    tracing::info!(
        target: "govhealth::gateway",
        organization = %org_id,
        ghi = result.health_index.ghi,
        passed = result.passed,
        "assurance validation served"
    );
    (StatusCode::OK, Json(result)).into_response()
}

async fn batch_validation_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    let summaries: Vec<OrganizationValidationSummary> = state
        .directory
        .organizations()
        .iter()
        .map(|record| {
            let result = validate(&record.profile, &record.findings, &record.tech_stack);
            OrganizationValidationSummary {
                organization_id: result.organization_id,
                ghi: result.health_index.ghi,
                grade: result.health_index.grade.as_str().to_string(),
                passed: result.passed,
                issue_count: result.issues.len(),
            }
        })
        .collect();

    let passed = summaries.iter().filter(|summary| summary.passed).count();
    tracing::info!(
        target: "govhealth::gateway",
        organizations = summaries.len(),
        passed,
        "assurance batch validation served"
    );
    (
        StatusCode::OK,
        Json(json!({
            "organizations": summaries,
            "total": summaries.len(),
            "passed": passed,
        })),
    )
        .into_response()
}

/// Environment gate first: outside staging the route must be
/// indistinguishable from an unknown path, so the credential is never even
/// inspected there.  Inside staging the credential check is independent:
/// missing header is a request-validation error, wrong value is forbidden.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    if !state.environment.allows_assurance_routes() {
        return Err(not_found());
    }

    let Some(value) = headers.get(ADMIN_TOKEN_HEADER) else {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": {
                    "code": "missing_admin_token",
                    "detail": format!("header `{ADMIN_TOKEN_HEADER}` is required"),
                }
            })),
        )
            .into_response());
    };

    let presented = value.to_str().unwrap_or_default();
    if state.admin_token.is_empty() || presented != state.admin_token.as_str() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": {
                    "code": "invalid_admin_token",
                    "detail": "admin credential rejected",
                }
            })),
        )
            .into_response());
    }

    Ok(())
}

/// The same body axum produces for genuinely unknown routes.
fn not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}
