/**
 * Role Profiles
 *
 * Role-specific data attached 1:1 to an identity. The profile points at its
 * owning identity through `user_id`; it never owns the identity. Which
 * table is read is decided by a single match on `Role`.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::auth::error::AuthError;
use crate::shared::{CompanySize, ExperienceLevel, Role};

/// Client profile
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_name: String,
    pub business_type: String,
    pub company_size: CompanySize,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Freelancer profile
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Public path of the uploaded picture, e.g. `/uploads/profilePicture-...png`
    pub profile_picture: Option<String>,
    /// Public path of the uploaded resume
    pub resume: Option<String>,
    pub skills: String,
    pub experience: ExperienceLevel,
    /// 0 to 5, starts at 0
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

/// Profile of either role
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RoleProfile {
    Client(ClientProfile),
    Freelancer(FreelancerProfile),
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Client(_) => Role::Client,
            RoleProfile::Freelancer(_) => Role::Freelancer,
        }
    }

    #[cfg(test)]
    fn user_id(&self) -> Uuid {
        match self {
            RoleProfile::Client(profile) => profile.user_id,
            RoleProfile::Freelancer(profile) => profile.user_id,
        }
    }
}

/// Validated client profile fields
#[derive(Debug, Clone)]
pub struct NewClientProfile {
    pub business_name: String,
    pub business_type: String,
    pub company_size: CompanySize,
    pub address: String,
}

/// Validated freelancer profile fields
#[derive(Debug, Clone)]
pub struct NewFreelancerProfile {
    pub skills: String,
    pub experience: ExperienceLevel,
    pub profile_picture: Option<String>,
    pub resume: Option<String>,
}

/// Profile fields for whichever role is registering
#[derive(Debug, Clone)]
pub enum NewRoleProfile {
    Client(NewClientProfile),
    Freelancer(NewFreelancerProfile),
}

impl NewRoleProfile {
    pub fn role(&self) -> Role {
        match self {
            NewRoleProfile::Client(_) => Role::Client,
            NewRoleProfile::Freelancer(_) => Role::Freelancer,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    user_id: Uuid,
    business_name: String,
    business_type: String,
    company_size: String,
    address: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for ClientProfile {
    type Error = AuthError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let company_size = row.company_size.parse::<CompanySize>().map_err(|_| {
            AuthError::Internal(format!("client profile {} has unknown company size", row.id))
        })?;

        Ok(ClientProfile {
            id: row.id,
            user_id: row.user_id,
            business_name: row.business_name,
            business_type: row.business_type,
            company_size,
            address: row.address,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FreelancerRow {
    id: Uuid,
    user_id: Uuid,
    profile_picture: Option<String>,
    resume: Option<String>,
    skills: String,
    experience: String,
    rating: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<FreelancerRow> for FreelancerProfile {
    type Error = AuthError;

    fn try_from(row: FreelancerRow) -> Result<Self, Self::Error> {
        let experience = row.experience.parse::<ExperienceLevel>().map_err(|_| {
            AuthError::Internal(format!("freelancer profile {} has unknown experience", row.id))
        })?;

        Ok(FreelancerProfile {
            id: row.id,
            user_id: row.user_id,
            profile_picture: row.profile_picture,
            resume: row.resume,
            skills: row.skills,
            experience,
            rating: row.rating,
            created_at: row.created_at,
        })
    }
}

/// Create the profile for `user_id`
///
/// Runs on the caller's connection so it can share a transaction with
/// `users::insert_identity`.
pub async fn insert_profile(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    new: NewRoleProfile,
) -> Result<RoleProfile, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    match new {
        NewRoleProfile::Client(fields) => {
            sqlx::query(
                r#"
                INSERT INTO clients (id, user_id, business_name, business_type, company_size, address, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(id)
            .bind(user_id)
            .bind(&fields.business_name)
            .bind(&fields.business_type)
            .bind(fields.company_size.as_str())
            .bind(&fields.address)
            .bind(now)
            .execute(&mut *conn)
            .await?;

            Ok(RoleProfile::Client(ClientProfile {
                id,
                user_id,
                business_name: fields.business_name,
                business_type: fields.business_type,
                company_size: fields.company_size,
                address: fields.address,
                created_at: now,
            }))
        }
        NewRoleProfile::Freelancer(fields) => {
            sqlx::query(
                r#"
                INSERT INTO freelancers (id, user_id, profile_picture, resume, skills, experience, rating, created_at)
                VALUES (?, ?, ?, ?, ?, ?, 0, ?)
                "#,
            )
            .bind(id)
            .bind(user_id)
            .bind(&fields.profile_picture)
            .bind(&fields.resume)
            .bind(&fields.skills)
            .bind(fields.experience.as_str())
            .bind(now)
            .execute(&mut *conn)
            .await?;

            Ok(RoleProfile::Freelancer(FreelancerProfile {
                id,
                user_id,
                profile_picture: fields.profile_picture,
                resume: fields.resume,
                skills: fields.skills,
                experience: fields.experience,
                rating: 0.0,
                created_at: now,
            }))
        }
    }
}

/// Get the profile of `user_id` for its role
///
/// # Returns
/// Profile or None if the identity has no profile row
pub async fn find_profile(
    pool: &SqlitePool,
    user_id: Uuid,
    role: Role,
) -> Result<Option<RoleProfile>, AuthError> {
    match role {
        Role::Client => {
            let row = sqlx::query_as::<_, ClientRow>(
                r#"
                SELECT id, user_id, business_name, business_type, company_size, address, created_at
                FROM clients
                WHERE user_id = ?
                "#,
            )
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

            row.map(|row| ClientProfile::try_from(row).map(RoleProfile::Client))
                .transpose()
        }
        Role::Freelancer => {
            let row = sqlx::query_as::<_, FreelancerRow>(
                r#"
                SELECT id, user_id, profile_picture, resume, skills, experience, rating, created_at
                FROM freelancers
                WHERE user_id = ?
                "#,
            )
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

            row.map(|row| FreelancerProfile::try_from(row).map(RoleProfile::Freelancer))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::password::{PasswordHasher, Secret};
    use crate::backend::auth::users::{insert_identity, NewIdentity};
    use crate::backend::server::config::connect_database;

    async fn pool_with_identity(role: Role) -> (SqlitePool, Uuid) {
        let pool = connect_database("sqlite::memory:", 1).await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        let identity = insert_identity(
            &mut conn,
            NewIdentity {
                name: "Someone".to_string(),
                email: "someone@x.com".to_string(),
                secret: Secret::plain("pw123456"),
                role,
            },
            &PasswordHasher::new(4),
        )
        .await
        .unwrap();
        drop(conn);
        (pool, identity.id)
    }

    #[tokio::test]
    async fn test_client_profile_round_trip() {
        let (pool, user_id) = pool_with_identity(Role::Client).await;
        let mut conn = pool.acquire().await.unwrap();
        let created = insert_profile(
            &mut conn,
            user_id,
            NewRoleProfile::Client(NewClientProfile {
                business_name: "Acme".to_string(),
                business_type: "Retail".to_string(),
                company_size: CompanySize::UpTo50,
                address: "1 Main St".to_string(),
            }),
        )
        .await
        .unwrap();
        drop(conn);

        let found = find_profile(&pool, user_id, Role::Client).await.unwrap().unwrap();
        assert_eq!(found.role(), Role::Client);
        assert_eq!(found.user_id(), user_id);
        match found {
            RoleProfile::Client(profile) => {
                assert_eq!(profile.business_name, "Acme");
                assert_eq!(profile.company_size, CompanySize::UpTo50);
            }
            other => panic!("Expected client profile, got {:?}", other),
        }
        assert_eq!(created.role(), Role::Client);
    }

    #[tokio::test]
    async fn test_freelancer_profile_defaults() {
        let (pool, user_id) = pool_with_identity(Role::Freelancer).await;
        let mut conn = pool.acquire().await.unwrap();
        insert_profile(
            &mut conn,
            user_id,
            NewRoleProfile::Freelancer(NewFreelancerProfile {
                skills: "Rust, SQL".to_string(),
                experience: ExperienceLevel::ThreeToFive,
                profile_picture: None,
                resume: Some("/uploads/resume-1.pdf".to_string()),
            }),
        )
        .await
        .unwrap();
        drop(conn);

        match find_profile(&pool, user_id, Role::Freelancer).await.unwrap() {
            Some(RoleProfile::Freelancer(profile)) => {
                assert_eq!(profile.rating, 0.0);
                assert_eq!(profile.profile_picture, None);
                assert_eq!(profile.resume.as_deref(), Some("/uploads/resume-1.pdf"));
                assert_eq!(profile.experience, ExperienceLevel::ThreeToFive);
            }
            other => panic!("Expected freelancer profile, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_profile_is_none() {
        let (pool, user_id) = pool_with_identity(Role::Client).await;
        assert!(find_profile(&pool, user_id, Role::Client).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_profile_requires_existing_identity() {
        let pool = connect_database("sqlite::memory:", 1).await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        let result = insert_profile(
            &mut conn,
            Uuid::new_v4(),
            NewRoleProfile::Freelancer(NewFreelancerProfile {
                skills: "Design".to_string(),
                experience: ExperienceLevel::UnderOne,
                profile_picture: None,
                resume: None,
            }),
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_serializes_flat() {
        let profile = RoleProfile::Client(ClientProfile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            business_name: "Acme".to_string(),
            business_type: "Retail".to_string(),
            company_size: CompanySize::UpTo50,
            address: "1 Main St".to_string(),
            created_at: Utc::now(),
        });
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["kind"], "client");
        assert_eq!(json["businessName"], "Acme");
        assert_eq!(json["companySize"], "10-50");
    }
}
