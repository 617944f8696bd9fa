//! Patient profile documents
//!
//! A profile document lives in the external document store under the
//! `users` collection, keyed by the identity uid. The client keeps one cached
//! copy of it in local storage ([`CachedProfile`]); the store stays the source
//! of truth.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::impl_domain_tag_conversions;

/// Symptom vocabulary offered on the patient dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Symptom {
    Fever,
    Cough,
    Headache,
    SoreThroat,
    Fatigue,
    BodyAches,
    Nausea,
    Diarrhea,
    ShortnessOfBreath,
    ChestPain,
    Dizziness,
    AbdominalPain,
    BackPain,
    JointPain,
    Rash,
    Anxiety,
    Depression,
    Insomnia,
}

impl_domain_tag_conversions!(Symptom {
    Fever => "fever",
    Cough => "cough",
    Headache => "headache",
    SoreThroat => "sore-throat",
    Fatigue => "fatigue",
    BodyAches => "body-aches",
    Nausea => "nausea",
    Diarrhea => "diarrhea",
    ShortnessOfBreath => "shortness-of-breath",
    ChestPain => "chest-pain",
    Dizziness => "dizziness",
    AbdominalPain => "abdominal-pain",
    BackPain => "back-pain",
    JointPain => "joint-pain",
    Rash => "rash",
    Anxiety => "anxiety",
    Depression => "depression",
    Insomnia => "insomnia",
});

impl Symptom {
    /// Human-readable label, e.g. `"Sore Throat"`.
    pub fn label(&self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Set of selected symptoms.
///
/// Serialized as a JSON array of tags in vocabulary order. Tags outside the
/// vocabulary are dropped on read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomSet(BTreeSet<Symptom>);

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, symptom: Symptom) -> bool {
        self.0.contains(&symptom)
    }

    pub fn insert(&mut self, symptom: Symptom) -> bool {
        self.0.insert(symptom)
    }

    pub fn remove(&mut self, symptom: Symptom) -> bool {
        self.0.remove(&symptom)
    }

    /// Flip `symptom`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, symptom: Symptom) -> bool {
        if self.0.remove(&symptom) {
            false
        } else {
            self.0.insert(symptom);
            true
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Symptom> + '_ {
        self.0.iter().copied()
    }

    pub fn tags(&self) -> Vec<&'static str> {
        self.0.iter().map(Symptom::as_str).collect()
    }
}

impl FromIterator<Symptom> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = Symptom>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for SymptomSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for symptom in &self.0 {
            seq.serialize_element(symptom.as_str())?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for SymptomSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tags = Vec::<String>::deserialize(deserializer)?;
        let mut set = BTreeSet::new();
        for tag in tags {
            match tag.parse::<Symptom>() {
                Ok(symptom) => {
                    set.insert(symptom);
                }
                Err(_) => tracing::warn!(tag = %tag, "dropping unknown symptom tag"),
            }
        }
        Ok(Self(set))
    }
}

/// Account role recorded on the profile document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Patient,
}

impl_domain_tag_conversions!(Role {
    Patient => "patient",
});

/// Home address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Address {
    /// Every field holds something other than whitespace.
    pub fn is_complete(&self) -> bool {
        [&self.street, &self.city, &self.state, &self.zip_code]
            .iter()
            .all(|value| !value.trim().is_empty())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.city, self.state, self.zip_code)
    }
}

/// Profile document keyed by identity uid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub symptoms: SymptomSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

impl ProfileDocument {
    /// Fresh patient profile as written at signup.
    pub fn new_patient(
        name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            email: email.into(),
            role: Role::Patient,
            symptoms: SymptomSet::new(),
            address: None,
            created_at,
        }
    }
}

/// Locally persisted copy of a profile document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedProfile {
    /// Identity the document belongs to
    pub uid: String,
    pub cached_at: DateTime<Utc>,
    pub profile: ProfileDocument,
}

impl CachedProfile {
    pub fn new(uid: impl Into<String>, profile: ProfileDocument, cached_at: DateTime<Utc>) -> Self {
        Self { uid: uid.into(), cached_at, profile }
    }

    pub fn belongs_to(&self, uid: &str) -> bool {
        self.uid == uid
    }
}
