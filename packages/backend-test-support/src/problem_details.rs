//! Problem Details test helpers for backend testing
//!
//! Assertions for `application/problem+json` responses that do not depend
//! on backend types.

use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Mirror of the backend's ProblemDetails body.
#[derive(Debug, Deserialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
}

/// Assert that a ServiceResponse conforms to the error contract:
/// status, content type, code and (optionally) a detail substring.
pub async fn assert_problem_details_from_service_response(
    resp: actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    assert_eq!(resp.status(), expected_status);

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let body = actix_web::test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).expect("Response body should be valid UTF-8");
    let problem: ProblemDetailsLike = serde_json::from_str(body_str).unwrap_or_else(|_| {
        panic!("Failed to parse error body as ProblemDetails. Raw body: {body_str}")
    });

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(!problem.title.is_empty(), "title should not be empty");
    assert!(
        problem.type_.ends_with(&expected_code.to_lowercase()),
        "type should end with the lowercased code (got {})",
        problem.type_
    );
    if let Some(expected_detail) = expected_detail_contains {
        assert!(
            problem.detail.contains(expected_detail),
            "Expected detail to contain '{}', but got '{}'",
            expected_detail,
            problem.detail
        );
    }
    problem
}
