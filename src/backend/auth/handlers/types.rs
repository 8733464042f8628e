/**
 * Authentication Handler Types
 *
 * Request and response bodies for the registration, login and profile
 * endpoints. Field names are camelCase on the wire.
 *
 * Request fields are all optional at the serde level so that a missing
 * field becomes our own `ValidationError` instead of a framework
 * rejection. `validate` turns a request into the checked input the
 * `AuthService` flows take.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::error::AuthError;
use crate::backend::auth::profiles::{NewClientProfile, NewFreelancerProfile, RoleProfile};
use crate::backend::auth::service::{AccountFields, LoginAttempt};
use crate::backend::auth::users::IdentitySummary;
use crate::shared::{CompanySize, ExperienceLevel, Role};

pub const MISSING_FIELDS_MESSAGE: &str = "Please provide all required fields";
pub const MISSING_LOGIN_FIELDS_MESSAGE: &str = "Please provide email, password, and user type";

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Treat absent, empty and whitespace-only values alike
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Check the account fields shared by both registrations
///
/// Name and email are stored trimmed; the password is kept verbatim.
fn check_account(name: &str, email: &str, password: &str) -> Result<AccountFields, AuthError> {
    let email = email.trim();
    if !email.contains('@') {
        return Err(AuthError::validation("Invalid email format"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    Ok(AccountFields {
        name: name.trim().to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Client registration request
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub company_size: Option<String>,
    pub address: Option<String>,
}

impl RegisterClientRequest {
    pub fn validate(&self) -> Result<(AccountFields, NewClientProfile), AuthError> {
        let (
            Some(name),
            Some(email),
            Some(password),
            Some(business_name),
            Some(business_type),
            Some(company_size),
            Some(address),
        ) = (
            present(&self.name),
            present(&self.email),
            present(&self.password),
            present(&self.business_name),
            present(&self.business_type),
            present(&self.company_size),
            present(&self.address),
        )
        else {
            return Err(AuthError::validation(MISSING_FIELDS_MESSAGE));
        };

        let account = check_account(name, email, password)?;
        let profile = NewClientProfile {
            business_name: business_name.trim().to_string(),
            business_type: business_type.trim().to_string(),
            company_size: company_size.trim().parse::<CompanySize>()?,
            address: address.trim().to_string(),
        };

        Ok((account, profile))
    }
}

/// Text fields of the freelancer multipart form
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFreelancerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
}

impl RegisterFreelancerRequest {
    /// Set a text field by its multipart name; unknown names are ignored
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "password" => &mut self.password,
            "skills" => &mut self.skills,
            "experience" => &mut self.experience,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Validate the text fields; file references are filled in after storage
    pub fn validate(&self) -> Result<(AccountFields, NewFreelancerProfile), AuthError> {
        let (Some(name), Some(email), Some(password), Some(skills), Some(experience)) = (
            present(&self.name),
            present(&self.email),
            present(&self.password),
            present(&self.skills),
            present(&self.experience),
        ) else {
            return Err(AuthError::validation(MISSING_FIELDS_MESSAGE));
        };

        let account = check_account(name, email, password)?;
        let profile = NewFreelancerProfile {
            skills: skills.trim().to_string(),
            experience: experience.trim().parse::<ExperienceLevel>()?,
            profile_picture: None,
            resume: None,
        };

        Ok((account, profile))
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// `client` or `freelancer`
    pub user_type: Option<String>,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<LoginAttempt, AuthError> {
        let (Some(email), Some(password), Some(user_type)) = (
            present(&self.email),
            present(&self.password),
            present(&self.user_type),
        ) else {
            return Err(AuthError::validation(MISSING_LOGIN_FIELDS_MESSAGE));
        };

        Ok(LoginAttempt {
            email: email.trim().to_string(),
            password: password.to_string(),
            role: user_type.parse::<Role>().ok(),
        })
    }
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub user_type: Role,
}

impl From<&IdentitySummary> for UserResponse {
    fn from(identity: &IdentitySummary) -> Self {
        UserResponse {
            id: identity.id,
            name: identity.name.clone(),
            email: identity.email.clone(),
            user_type: identity.user_type,
        }
    }
}

/// Registration response
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    /// JWT token (7-day expiration)
    pub token: String,
    pub user: UserResponse,
}

/// Logged-in user with profile
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    #[serde(flatten)]
    pub user: UserResponse,
    pub profile: Option<RoleProfile>,
}

/// Login response
#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: LoginUser,
}

/// Identity merged with its profile
#[derive(Serialize, Debug)]
pub struct ProfileUser {
    #[serde(flatten)]
    pub identity: IdentitySummary,
    pub profile: Option<RoleProfile>,
}

/// Profile response
#[derive(Serialize, Debug)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: ProfileUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn client_request() -> RegisterClientRequest {
        RegisterClientRequest {
            name: Some("Acme Co".into()),
            email: Some("a@x.com".into()),
            password: Some("pw123456".into()),
            business_name: Some(" Acme ".into()),
            business_type: Some("Retail".into()),
            company_size: Some("10-50".into()),
            address: Some("1 Main St".into()),
        }
    }

    #[test]
    fn test_client_request_valid() {
        let (account, profile) = client_request().validate().unwrap();
        assert_eq!(account.email, "a@x.com");
        assert_eq!(profile.business_name, "Acme");
        assert_eq!(profile.company_size, CompanySize::UpTo50);
    }

    #[test]
    fn test_email_stored_trimmed() {
        let mut request = client_request();
        request.email = Some("  a@x.com ".into());
        let (account, _) = request.validate().unwrap();
        assert_eq!(account.email, "a@x.com");

        let login = LoginRequest {
            email: Some(" a@x.com".into()),
            password: Some(" pw123456 ".into()),
            user_type: Some("client".into()),
        };
        let attempt = login.validate().unwrap();
        assert_eq!(attempt.email, "a@x.com");
        assert_eq!(attempt.password, " pw123456 ");
    }

    #[test]
    fn test_client_request_missing_field() {
        let mut request = client_request();
        request.address = Some("   ".into());
        assert_matches!(
            request.validate(),
            Err(AuthError::Validation(message)) if message == MISSING_FIELDS_MESSAGE
        );
    }

    #[test]
    fn test_client_request_bad_bucket() {
        let mut request = client_request();
        request.company_size = Some("5000".into());
        assert_matches!(request.validate(), Err(AuthError::Validation(_)));
    }

    #[test]
    fn test_client_request_bad_email_and_password() {
        let mut request = client_request();
        request.email = Some("not-an-email".into());
        assert_matches!(
            request.validate(),
            Err(AuthError::Validation(message)) if message == "Invalid email format"
        );

        let mut request = client_request();
        request.password = Some("short".into());
        assert_matches!(request.validate(), Err(AuthError::Validation(_)));
    }

    #[test]
    fn test_freelancer_fields_by_name() {
        let mut request = RegisterFreelancerRequest::default();
        for (name, value) in [
            ("name", "Fran"),
            ("email", "f@x.com"),
            ("password", "pw123456"),
            ("skills", "Rust"),
            ("experience", "1-3"),
            ("favouriteColour", "green"),
        ] {
            request.set_field(name, value.to_string());
        }

        let (account, profile) = request.validate().unwrap();
        assert_eq!(account.name, "Fran");
        assert_eq!(profile.experience, ExperienceLevel::OneToThree);
        assert!(profile.resume.is_none());
    }

    #[test]
    fn test_login_request_unknown_role() {
        let request = LoginRequest {
            email: Some("a@x.com".into()),
            password: Some("pw123456".into()),
            user_type: Some("admin".into()),
        };
        let attempt = request.validate().unwrap();
        assert!(attempt.role.is_none());
    }

    #[test]
    fn test_login_request_missing_field() {
        let request = LoginRequest {
            email: Some("a@x.com".into()),
            password: None,
            user_type: Some("client".into()),
        };
        assert_matches!(
            request.validate(),
            Err(AuthError::Validation(message)) if message == MISSING_LOGIN_FIELDS_MESSAGE
        );
    }
}
