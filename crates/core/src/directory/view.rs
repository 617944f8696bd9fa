//! Directory page state
//!
//! Two tables (doctors, users) and an add form for each. A table that fails
//! to load shows empty rather than an error.

use doctorfinder_domain::{Doctor, DoctorFinderError, NewDoctor, NewUser, Result, User};
use tracing::{error, warn};

use super::ports::DirectoryApi;

pub const NO_DOCTORS_PLACEHOLDER: &str = "No doctors found";
pub const NO_USERS_PLACEHOLDER: &str = "No users found";

/// Add-doctor form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub specialty: String,
    pub services: String,
    pub location: String,
    pub availability: String,
}

impl DoctorForm {
    pub fn is_submittable(&self) -> bool {
        [
            &self.name,
            &self.email,
            &self.password,
            &self.specialty,
            &self.services,
            &self.location,
            &self.availability,
        ]
        .iter()
        .all(|field| !field.is_empty())
    }

    pub fn to_payload(&self) -> NewDoctor {
        NewDoctor {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            specialty: self.specialty.clone(),
            services: self.services.clone(),
            location: self.location.clone(),
            availability: self.availability.clone(),
        }
    }
}

/// Add-user form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserForm {
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.password.is_empty()
    }

    pub fn to_payload(&self) -> NewUser {
        NewUser { name: self.name.clone(), email: self.email.clone(), password: self.password.clone() }
    }
}

/// Directory tables plus their add forms
#[derive(Debug, Clone, Default)]
pub struct DirectoryPage {
    pub doctors: Vec<Doctor>,
    pub users: Vec<User>,
    pub doctor_form: DoctorForm,
    pub user_form: UserForm,
}

impl DirectoryPage {
    /// Fetch both tables. Each one that fails to load is shown empty; the
    /// other still renders.
    pub async fn load(api: &dyn DirectoryApi) -> Self {
        let doctors = api.list_doctors().await.unwrap_or_else(|err| {
            error!(error = %err, "failed to load doctors");
            Vec::new()
        });
        let users = api.list_users().await.unwrap_or_else(|err| {
            error!(error = %err, "failed to load users");
            Vec::new()
        });

        Self { doctors, users, ..Self::default() }
    }

    /// Placeholder row for the doctors table, if it is empty.
    pub fn doctors_placeholder(&self) -> Option<&'static str> {
        self.doctors.is_empty().then_some(NO_DOCTORS_PLACEHOLDER)
    }

    pub fn users_placeholder(&self) -> Option<&'static str> {
        self.users.is_empty().then_some(NO_USERS_PLACEHOLDER)
    }

    /// Submit the doctor form. On success the record is appended and the form
    /// cleared; on failure the form keeps its values.
    pub async fn add_doctor(&mut self, api: &dyn DirectoryApi) -> Result<&Doctor> {
        if !self.doctor_form.is_submittable() {
            return Err(DoctorFinderError::InvalidInput("all doctor fields are required".into()));
        }

        let created = api.create_doctor(&self.doctor_form.to_payload()).await.inspect_err(|err| {
            warn!(error = %err, "failed to add doctor");
        })?;
        self.doctor_form = DoctorForm::default();
        self.doctors.push(created);
        self.doctors
            .last()
            .ok_or_else(|| DoctorFinderError::Internal("doctor table empty after insert".into()))
    }

    /// Submit the user form; same contract as [`Self::add_doctor`].
    pub async fn add_user(&mut self, api: &dyn DirectoryApi) -> Result<&User> {
        if !self.user_form.is_submittable() {
            return Err(DoctorFinderError::InvalidInput("all user fields are required".into()));
        }

        let created = api.create_user(&self.user_form.to_payload()).await.inspect_err(|err| {
            warn!(error = %err, "failed to add user");
        })?;
        self.user_form = UserForm::default();
        self.users.push(created);
        self.users
            .last()
            .ok_or_else(|| DoctorFinderError::Internal("user table empty after insert".into()))
    }
}
