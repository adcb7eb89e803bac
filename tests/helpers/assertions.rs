// Test Assertion Helpers
//
// Common assertions for responses produced by `actix_web::test`.

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde_json::Value;

fn assert_status(response: &ServiceResponse, expected: StatusCode) {
    let status = response.status();
    assert_eq!(
        status,
        expected,
        "Expected {} {}, got {} {}",
        expected.as_u16(),
        expected.canonical_reason().unwrap_or("Unknown"),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );
}

/// Assert HTTP response is 200 OK
pub fn assert_ok(response: &ServiceResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert HTTP response is 201 Created
pub fn assert_created(response: &ServiceResponse) {
    assert_status(response, StatusCode::CREATED);
}

/// Assert HTTP response is 400 Bad Request
pub fn assert_bad_request(response: &ServiceResponse) {
    assert_status(response, StatusCode::BAD_REQUEST);
}

/// Assert HTTP response is 404 Not Found
pub fn assert_not_found(response: &ServiceResponse) {
    assert_status(response, StatusCode::NOT_FOUND);
}

/// Assert body has the error envelope with the given code and return its message
pub fn assert_error_body(body: &Value, code: u16) -> String {
    assert_eq!(
        body["error"]["code"],
        code,
        "Unexpected error body: {}",
        body
    );
    body["error"]["message"]
        .as_str()
        .unwrap_or_else(|| panic!("Error body without message: {}", body))
        .to_string()
}

/// Assert a JSON field exists and return it
pub fn assert_json_field<'a>(body: &'a Value, field: &str) -> &'a Value {
    body.get(field)
        .unwrap_or_else(|| panic!("Field '{}' missing from {}", field, body))
}
