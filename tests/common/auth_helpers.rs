//! Authentication test helpers
//!
//! Request bodies for the registration and login endpoints, and a shortcut
//! that registers a client and hands back its token.

use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};

pub const CLIENT_EMAIL: &str = "a@x.com";
pub const FREELANCER_EMAIL: &str = "fran@x.com";
pub const PASSWORD: &str = "pw123456";

/// Registration body for the reference client
pub fn client_registration() -> Value {
    json!({
        "name": "Acme Co",
        "email": CLIENT_EMAIL,
        "password": PASSWORD,
        "businessName": "Acme",
        "businessType": "Retail",
        "companySize": "10-50",
        "address": "1 Main St"
    })
}

/// Text fields of a freelancer registration, no files
pub fn freelancer_form(email: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("name", "Fran")
        .add_text("email", email)
        .add_text("password", PASSWORD)
        .add_text("skills", "Rust, SQL")
        .add_text("experience", "3-5")
}

/// A file part with the given name and contents
pub fn file_part(file_name: &str, contents: &[u8]) -> Part {
    Part::bytes(contents.to_vec()).file_name(file_name)
}

pub fn login_body(email: &str, password: &str, user_type: &str) -> Value {
    json!({ "email": email, "password": password, "userType": user_type })
}

/// Create authorization header
pub fn auth_header(token: &str) -> (HeaderName, HeaderValue) {
    let value = HeaderValue::from_str(&format!("Bearer {}", token))
        .expect("token is a valid header value");
    (AUTHORIZATION, value)
}

/// Register the reference client and return its token
pub async fn register_test_client(server: &TestServer) -> String {
    let response = server
        .post("/api/register/client")
        .json(&client_registration())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());

    let body: Value = response.json();
    body["token"]
        .as_str()
        .expect("registration returns a token")
        .to_string()
}

/// Register a freelancer without files and return its token
pub async fn register_test_freelancer(server: &TestServer) -> String {
    let response = server
        .post("/api/register/freelancer")
        .multipart(freelancer_form(FREELANCER_EMAIL))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());

    let body: Value = response.json();
    body["token"]
        .as_str()
        .expect("registration returns a token")
        .to_string()
}
