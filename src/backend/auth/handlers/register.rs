/**
 * Registration Handlers
 *
 * `POST /api/register/client` takes a JSON body.
 * `POST /api/register/freelancer` takes `multipart/form-data` with text
 * fields plus optional `profilePicture` and `resume` file parts.
 *
 * # Multipart processing
 *
 * Every part is read and checked before anything is written:
 * - a file part under any other name is rejected as `Unexpected field`
 * - a second file for the same slot is rejected the same way
 * - the extension is checked before the file body is read
 * - the body is read chunk by chunk and abandoned once it passes 5 MiB
 *
 * Both handlers return 201 with the token and the new account.
 */

use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    response::Json,
};
use bytes::{Bytes, BytesMut};

use crate::backend::auth::error::AuthError;
use crate::backend::auth::handlers::types::{
    AuthResponse, RegisterClientRequest, RegisterFreelancerRequest, UserResponse,
};
use crate::backend::auth::service::Registration;
use crate::backend::auth::uploads::{IncomingFile, UploadKind, MAX_UPLOAD_BYTES};
use crate::backend::error::{BackendError, REGISTRATION_FAILED_MESSAGE};
use crate::backend::server::state::AppState;

const UNEXPECTED_FIELD_MESSAGE: &str = "Unexpected field";

fn created(registration: Registration, message: &str) -> (StatusCode, Json<AuthResponse>) {
    (
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: message.to_string(),
            token: registration.token,
            user: UserResponse::from(&registration.identity),
        }),
    )
}

/// Client registration handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing or malformed fields, email already registered
/// * `500 Internal Server Error` - Database or hashing failure
///
/// # Example Request
///
/// ```http
/// POST /api/register/client HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "name": "Acme Co",
///   "email": "a@x.com",
///   "password": "pw123456",
///   "businessName": "Acme",
///   "businessType": "Retail",
///   "companySize": "10-50",
///   "address": "1 Main St"
/// }
/// ```
pub async fn register_client(
    State(app_state): State<AppState>,
    payload: Result<Json<RegisterClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected client registration body: {}", rejection.body_text());
        BackendError::from(AuthError::validation("Invalid request body"))
    })?;

    let expose = app_state.expose_error_details();

    let (account, profile) = request
        .validate()
        .map_err(|e| BackendError::from_flow(e, REGISTRATION_FAILED_MESSAGE, expose))?;

    let registration = app_state
        .auth
        .register_client(account, profile)
        .await
        .map_err(|e| BackendError::from_flow(e, REGISTRATION_FAILED_MESSAGE, expose))?;

    Ok(created(registration, "Client registered successfully"))
}

/// Freelancer registration handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing fields, duplicate email, unexpected or
///   disallowed file, file over 5 MiB, unreadable multipart body
/// * `500 Internal Server Error` - Database, hashing or storage failure
pub async fn register_freelancer(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::warn!("Rejected freelancer registration body: {}", rejection.body_text());
        BackendError::from(AuthError::validation("Invalid request body"))
    })?;

    let expose = app_state.expose_error_details();

    let (request, files) = read_freelancer_form(multipart)
        .await
        .map_err(|e| BackendError::from_flow(e, REGISTRATION_FAILED_MESSAGE, expose))?;
    let (account, profile) = request
        .validate()
        .map_err(|e| BackendError::from_flow(e, REGISTRATION_FAILED_MESSAGE, expose))?;

    let registration = app_state
        .auth
        .register_freelancer(account, profile, files)
        .await
        .map_err(|e| BackendError::from_flow(e, REGISTRATION_FAILED_MESSAGE, expose))?;

    Ok(created(registration, "Freelancer registered successfully"))
}

fn malformed(err: MultipartError) -> AuthError {
    tracing::warn!("Malformed multipart body: {}", err.body_text());
    AuthError::validation("Invalid multipart body")
}

/// Read every part of the freelancer form into memory
async fn read_freelancer_form(
    mut multipart: Multipart,
) -> Result<(RegisterFreelancerRequest, Vec<IncomingFile>), AuthError> {
    let mut request = RegisterFreelancerRequest::default();
    let mut files: Vec<IncomingFile> = Vec::new();

    while let Some(mut field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();

        let Some(file_name) = field.file_name().map(str::to_string) else {
            let value = field.text().await.map_err(malformed)?;
            request.set_field(&name, value);
            continue;
        };

        // Browsers send an empty file part for an untouched file input
        if file_name.is_empty() {
            continue;
        }

        let kind = UploadKind::from_field(&name).ok_or_else(|| {
            tracing::warn!("Unexpected file field: {:?}", name);
            AuthError::validation(UNEXPECTED_FIELD_MESSAGE)
        })?;
        if files.iter().any(|file| file.kind == kind) {
            tracing::warn!("Duplicate file field: {}", name);
            return Err(AuthError::validation(UNEXPECTED_FIELD_MESSAGE));
        }

        kind.check_file_name(&file_name).map_err(|e| {
            tracing::warn!("Rejected {} upload: {}", kind, file_name);
            e
        })?;
        let data = read_limited(&mut field, kind).await?;
        files.push(IncomingFile::new(kind, file_name, data)?);
    }

    Ok((request, files))
}

/// Read a file part, failing as soon as it passes the upload limit
async fn read_limited(field: &mut Field<'_>, kind: UploadKind) -> Result<Bytes, AuthError> {
    let mut buffer = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(malformed)? {
        if buffer.len() + chunk.len() > MAX_UPLOAD_BYTES {
            tracing::warn!("Rejected {} upload over {} bytes", kind, MAX_UPLOAD_BYTES);
            return Err(AuthError::FileTooLarge {
                kind,
                limit: MAX_UPLOAD_BYTES,
            });
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer.freeze())
}
