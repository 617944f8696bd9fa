//! Fake record API

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use doctorfinder_core::DirectoryApi;
use doctorfinder_domain::{Doctor, DoctorFinderError, NewDoctor, NewUser, Result, User};
use parking_lot::Mutex;

#[derive(Default)]
pub struct FakeDirectoryApi {
    doctors: Mutex<Vec<Doctor>>,
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
    unreachable: AtomicBool,
    doctors_down: AtomicBool,
}

impl FakeDirectoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the API were down.
    pub fn unreachable() -> Self {
        let api = Self::default();
        api.unreachable.store(true, Ordering::SeqCst);
        api
    }

    /// Only the doctor listing fails; everything else keeps working.
    pub fn fail_doctor_listing(&self) {
        self.doctors_down.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(DoctorFinderError::Network("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryApi for FakeDirectoryApi {
    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.check()?;
        if self.doctors_down.load(Ordering::SeqCst) {
            return Err(DoctorFinderError::Network("Failed to fetch doctors".into()));
        }
        Ok(self.doctors.lock().clone())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.check()?;
        Ok(self.users.lock().clone())
    }

    async fn create_doctor(&self, doctor: &NewDoctor) -> Result<Doctor> {
        self.check()?;
        let created = Doctor {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: doctor.name.clone(),
            email: doctor.email.clone(),
            specialty: doctor.specialty.clone(),
            services: doctor.services.clone(),
            location: doctor.location.clone(),
            availability: doctor.availability.clone(),
            created_at: Utc::now(),
        };
        self.doctors.lock().push(created.clone());
        Ok(created)
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.check()?;
        let created = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: Utc::now(),
        };
        self.users.lock().push(created.clone());
        Ok(created)
    }
}
