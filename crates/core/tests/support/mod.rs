//! Shared test helpers for `doctorfinder-core` integration tests.
//!
//! In-memory fakes for every core port, so tests can drive the session
//! holder, profile service and patient flows without any network or disk.

#![allow(dead_code)]

pub mod directory;
pub mod identity;

use chrono::{TimeZone, Utc};
use doctorfinder_domain::{Address, Identity, ProfileDocument, Symptom};

pub fn identity(uid: &str) -> Identity {
    Identity::new(uid, format!("{uid}@example.com"))
}

/// Stored profile with a fixed timestamp, fever + cough selected and an
/// address.
pub fn sample_profile() -> ProfileDocument {
    let created_at = Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).single().unwrap_or_default();
    let mut profile = ProfileDocument::new_patient("jane doe", "jdoe", "jane@example.com", created_at);
    profile.symptoms = [Symptom::Fever, Symptom::Cough].into_iter().collect();
    profile.address = Some(Address {
        street: "1 Main St".into(),
        city: "Springfield".into(),
        state: "IL".into(),
        zip_code: "62701".into(),
    });
    profile
}
