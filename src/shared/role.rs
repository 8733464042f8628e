/**
 * Account Roles and Profile Buckets
 *
 * Every account is exactly one of `client` or `freelancer`. The role is
 * fixed at registration and decides which profile variant the account
 * carries. Company size and experience are closed buckets; the spellings
 * below are the ones stored in the database and sent over the wire.
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Freelancer,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Freelancer => "freelancer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SharedError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "client" => Ok(Role::Client),
            "freelancer" => Ok(Role::Freelancer),
            other => Err(SharedError::validation(
                "userType",
                format!("Unknown user type '{other}'"),
            )),
        }
    }
}

/// Client company-size bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "1-10")]
    UpTo10,
    #[serde(rename = "10-50")]
    UpTo50,
    #[serde(rename = "50-100")]
    UpTo100,
    #[serde(rename = "100+")]
    Over100,
}

impl CompanySize {
    pub const ALL: [CompanySize; 4] = [
        CompanySize::UpTo10,
        CompanySize::UpTo50,
        CompanySize::UpTo100,
        CompanySize::Over100,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            CompanySize::UpTo10 => "1-10",
            CompanySize::UpTo50 => "10-50",
            CompanySize::UpTo100 => "50-100",
            CompanySize::Over100 => "100+",
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanySize {
    type Err = SharedError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == value)
            .ok_or_else(|| {
                SharedError::validation(
                    "companySize",
                    "Company size must be one of 1-10, 10-50, 50-100, 100+",
                )
            })
    }
}

/// Freelancer experience bucket, in years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "0-1")]
    UnderOne,
    #[serde(rename = "1-3")]
    OneToThree,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = "10+")]
    OverTen,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 5] = [
        ExperienceLevel::UnderOne,
        ExperienceLevel::OneToThree,
        ExperienceLevel::ThreeToFive,
        ExperienceLevel::FiveToTen,
        ExperienceLevel::OverTen,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::UnderOne => "0-1",
            ExperienceLevel::OneToThree => "1-3",
            ExperienceLevel::ThreeToFive => "3-5",
            ExperienceLevel::FiveToTen => "5-10",
            ExperienceLevel::OverTen => "10+",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = SharedError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == value)
            .ok_or_else(|| {
                SharedError::validation(
                    "experience",
                    "Experience must be one of 0-1, 1-3, 3-5, 5-10, 10+",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("client".parse::<Role>().unwrap(), Role::Client);
        assert_eq!("freelancer".parse::<Role>().unwrap(), Role::Freelancer);
        assert_eq!(Role::Freelancer.to_string(), "freelancer");
    }

    #[test]
    fn test_role_parse_is_exact() {
        let err = "Client".parse::<Role>().unwrap_err();
        assert_eq!(err.field(), "userType");
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_spelling() {
        assert_eq!(serde_json::to_string(&Role::Client).unwrap(), "\"client\"");
        let role: Role = serde_json::from_str("\"freelancer\"").unwrap();
        assert_eq!(role, Role::Freelancer);
    }

    #[test]
    fn test_company_size_buckets() {
        for size in CompanySize::ALL {
            assert_eq!(size.as_str().parse::<CompanySize>().unwrap(), size);
            let json = serde_json::to_string(&size).unwrap();
            assert_eq!(json, format!("\"{}\"", size.as_str()));
        }
        assert_eq!("11-20".parse::<CompanySize>().unwrap_err().field(), "companySize");
    }

    #[test]
    fn test_experience_buckets() {
        for level in ExperienceLevel::ALL {
            assert_eq!(level.as_str().parse::<ExperienceLevel>().unwrap(), level);
        }
        assert_eq!("20+".parse::<ExperienceLevel>().unwrap_err().field(), "experience");
    }
}
