//! Directory records served by the record API
//!
//! Credentials arrive in the create payloads (`NewDoctor`, `NewUser`) and are
//! hashed before they reach the store. Stored records never carry them back
//! out.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Doctor listed in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    /// Unique contact identifier
    pub email: String,
    pub specialty: String,
    pub services: String,
    pub location: String,
    pub availability: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a doctor
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub email: String,
    pub password: String,
    pub specialty: String,
    pub services: String,
    pub location: String,
    pub availability: String,
}

impl NewDoctor {
    /// Whether `doctor` carries exactly the submitted public fields.
    pub fn matches(&self, doctor: &Doctor) -> bool {
        self.name == doctor.name
            && self.email == doctor.email
            && self.specialty == doctor.specialty
            && self.services == doctor.services
            && self.location == doctor.location
            && self.availability == doctor.availability
    }
}

impl fmt::Debug for NewDoctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewDoctor")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("specialty", &self.specialty)
            .field("services", &self.services)
            .field("location", &self.location)
            .field("availability", &self.availability)
            .finish()
    }
}

/// Directory user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a user
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn matches(&self, user: &User) -> bool {
        self.name == user.name && self.email == user.email
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
