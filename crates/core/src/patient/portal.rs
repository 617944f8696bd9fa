//! Patient flows over the session holder and profile service

use std::sync::Arc;

use doctorfinder_domain::{DoctorFinderError, Identity, Result};
use tracing::info;

use super::dashboard::Dashboard;
use super::forms::{LoginForm, SignupForm};
use crate::profile::ProfileService;
use crate::session::SessionHolder;

/// Signup, login, logout and dashboard actions
pub struct PatientPortal {
    session: Arc<SessionHolder>,
    profiles: Arc<ProfileService>,
}

impl PatientPortal {
    pub fn new(session: Arc<SessionHolder>, profiles: Arc<ProfileService>) -> Self {
        Self { session, profiles }
    }

    pub fn session(&self) -> &SessionHolder {
        &self.session
    }

    /// Create the account, then its patient profile document.
    ///
    /// An incomplete form is rejected before anything is sent.
    pub async fn sign_up(&self, form: &SignupForm) -> Result<Identity> {
        if !form.is_submittable() {
            return Err(DoctorFinderError::InvalidInput(
                "name, username, email and password are required".into(),
            ));
        }

        let identity = self.session.sign_up(&form.email, &form.password).await?;
        self.profiles.create_profile(&identity, &form.name, &form.username, &form.email).await?;
        info!(uid = %identity.uid, "patient signed up");
        Ok(identity)
    }

    /// Sign in; an incomplete form is rejected before anything is sent.
    pub async fn log_in(&self, form: &LoginForm) -> Result<Identity> {
        if !form.is_submittable() {
            return Err(DoctorFinderError::InvalidInput("email and password are required".into()));
        }
        self.session.sign_in(&form.email, &form.password).await
    }

    pub async fn log_out(&self) -> Result<()> {
        self.session.sign_out().await
    }

    /// Dashboard for the signed-in patient.
    ///
    /// Waits for the session to resolve; fails with `Auth` when nobody is
    /// signed in.
    pub async fn open_dashboard(&self) -> Result<Dashboard> {
        let identity = self.signed_in().await?;
        let profile = self.profiles.load(&identity).await?;
        Ok(Dashboard::from_profile(profile.as_ref()))
    }

    /// Persist the edited symptom selection and mark it saved.
    pub async fn save_symptoms(&self, dashboard: &mut Dashboard) -> Result<()> {
        if !dashboard.can_save_symptoms() {
            return Err(DoctorFinderError::InvalidInput("no unsaved symptom selection".into()));
        }
        let identity = self.signed_in().await?;
        self.profiles.save_symptoms(&identity, &dashboard.symptoms).await?;
        dashboard.symptoms_saved = true;
        Ok(())
    }

    pub async fn update_address(&self, dashboard: &mut Dashboard) -> Result<()> {
        if !dashboard.can_update_address() {
            return Err(DoctorFinderError::InvalidInput(
                "street, city, state and zip code are required".into(),
            ));
        }
        let identity = self.signed_in().await?;
        self.profiles.update_address(&identity, &dashboard.address).await?;
        dashboard.address_saved = true;
        Ok(())
    }

    async fn signed_in(&self) -> Result<Identity> {
        self.session
            .wait_until_resolved()
            .await?
            .identity
            .ok_or_else(|| DoctorFinderError::Auth("not signed in".into()))
    }
}
