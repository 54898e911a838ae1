use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use govhealth_engine::directory::{InMemoryDirectory, OrganizationRecord};
use govhealth_engine::domain::{
    ApplicationTier, Finding, FindingSeverity, FindingStatus, OrganizationProfile,
};
use govhealth_gateway::{build_router, AppState, Environment, ADMIN_TOKEN_HEADER};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const TOKEN: &str = "staging-admin-token";

fn sample_directory() -> InMemoryDirectory {
    let passing = OrganizationRecord {
        profile: OrganizationProfile {
            id: "org-pass".to_string(),
            industry: "technology".to_string(),
            application_tier: Some(ApplicationTier::Tier2),
            sla_target: Some(99.95),
            ..OrganizationProfile::default()
        },
        findings: Vec::new(),
        tech_stack: Vec::new(),
        scheduled_audits: Vec::new(),
    };
    let failing = OrganizationRecord {
        profile: OrganizationProfile {
            id: "org-fail".to_string(),
            ..OrganizationProfile::default()
        },
        findings: (0..4)
            .map(|i| Finding {
                id: format!("f{i}"),
                severity: FindingSeverity::Critical,
                status: FindingStatus::Open,
                title: "control gap".to_string(),
                description: String::new(),
                domain: None,
            })
            .collect(),
        tech_stack: Vec::new(),
        scheduled_audits: Vec::new(),
    };
    InMemoryDirectory::new([passing, failing])
}

fn router(environment: Environment) -> Router {
    build_router(AppState::new(
        Arc::new(sample_directory()),
        environment,
        TOKEN,
    ))
}

async fn get(router: &Router, path: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().uri(path);
    if let Some(token) = token {
        request = request.header(ADMIN_TOKEN_HEADER, token);
    }
    let response = router
        .clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

const ORG_ROUTE: &str = "/internal/assurance/organizations/org-pass/validation";
const BATCH_ROUTE: &str = "/internal/assurance/validation";

// ---------------------------------------------------------------------------
// Environment gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn outside_staging_the_routes_look_like_unknown_paths() {
    for environment in [Environment::Production, Environment::Development] {
        let app = router(environment);

        let (status, _) = get(&app, ORG_ROUTE, Some(TOKEN)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get(&app, BATCH_ROUTE, Some(TOKEN)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Indistinguishable from a genuinely unknown path.
        let (unknown_status, _) = get(&app, "/internal/assurance/nope", Some(TOKEN)).await;
        assert_eq!(status, unknown_status);
    }
}

// ---------------------------------------------------------------------------
// Credential check (staging only)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_credential_is_a_validation_error() {
    let app = router(Environment::Staging);
    let (status, body) = get(&app, ORG_ROUTE, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "missing_admin_token");
}

#[tokio::test]
async fn wrong_credential_is_forbidden() {
    let app = router(Environment::Staging);
    let (status, body) = get(&app, ORG_ROUTE, Some("wrong-token")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "invalid_admin_token");
}

// ---------------------------------------------------------------------------
// Validation payloads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn staging_serves_the_full_validation_result() {
    let app = router(Environment::Staging);
    let (status, body) = get(&app, ORG_ROUTE, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["organization_id"], "org-pass");
    assert_eq!(body["passed"], true);
    assert_eq!(body["health_index"]["grade"], "A");
    assert!(body["health_index"]["dimensions"]["audit_readiness"].is_number());
    assert!(body["fingerprint_hex"].is_string());
}

#[tokio::test]
async fn unknown_organization_is_not_found_even_with_credentials() {
    let app = router(Environment::Staging);
    let (status, _) = get(
        &app,
        "/internal/assurance/organizations/org-missing/validation",
        Some(TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn batch_summarizes_every_organization() {
    let app = router(Environment::Staging);
    let (status, body) = get(&app, BATCH_ROUTE, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["passed"], 1);

    let organizations = body["organizations"].as_array().unwrap();
    assert_eq!(organizations.len(), 2);
    assert_eq!(organizations[0]["organization_id"], "org-fail");
    assert_eq!(organizations[0]["passed"], false);
    assert!(organizations[0]["issue_count"].as_u64().unwrap() >= 2);
    assert_eq!(organizations[1]["organization_id"], "org-pass");
    assert_eq!(organizations[1]["grade"], "A");
}
