//! Directory service - record API business logic

use std::sync::Arc;

use doctorfinder_domain::{Doctor, NewDoctor, NewUser, Result, User};
use tracing::info;

use super::ports::{CredentialHasher, DoctorRepository, UserRepository};

/// Lists and creates directory records. Credentials are hashed before they
/// reach a repository; nothing else is validated here.
pub struct DirectoryService {
    doctors: Arc<dyn DoctorRepository>,
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl DirectoryService {
    pub fn new(
        doctors: Arc<dyn DoctorRepository>,
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self { doctors, users, hasher }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.doctors.list().await
    }

    /// Hash the doctor's password, then store the record.
    pub async fn create_doctor(&self, doctor: NewDoctor) -> Result<Doctor> {
        let password = self.hasher.hash(&doctor.password).await?;
        let created = self.doctors.insert(NewDoctor { password, ..doctor }).await?;
        info!(doctor_id = created.id, "doctor created");
        Ok(created)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.users.list().await
    }

    /// Hash the user's password, then store the record.
    pub async fn create_user(&self, user: NewUser) -> Result<User> {
        let password = self.hasher.hash(&user.password).await?;
        let created = self.users.insert(NewUser { password, ..user }).await?;
        info!(user_id = created.id, "user created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingDoctors {
        inserted: Mutex<Vec<NewDoctor>>,
    }

    #[async_trait]
    impl DoctorRepository for RecordingDoctors {
        async fn list(&self) -> Result<Vec<Doctor>> {
            Ok(Vec::new())
        }

        async fn insert(&self, doctor: NewDoctor) -> Result<Doctor> {
            let created = Doctor {
                id: 1,
                name: doctor.name.clone(),
                email: doctor.email.clone(),
                specialty: doctor.specialty.clone(),
                services: doctor.services.clone(),
                location: doctor.location.clone(),
                availability: doctor.availability.clone(),
                created_at: Utc::now(),
            };
            self.inserted.lock().push(doctor);
            Ok(created)
        }
    }

    struct NoUsers;

    #[async_trait]
    impl UserRepository for NoUsers {
        async fn list(&self) -> Result<Vec<User>> {
            Ok(Vec::new())
        }

        async fn insert(&self, _user: NewUser) -> Result<User> {
            Err(doctorfinder_domain::DoctorFinderError::Internal("not used".into()))
        }
    }

    struct ReversingHasher;

    #[async_trait]
    impl CredentialHasher for ReversingHasher {
        async fn hash(&self, password: &str) -> Result<String> {
            Ok(format!("hashed:{}", password.chars().rev().collect::<String>()))
        }
    }

    #[tokio::test]
    async fn create_doctor_stores_hashed_password() {
        let doctors = Arc::new(RecordingDoctors::default());
        let service = DirectoryService::new(doctors.clone(), Arc::new(NoUsers), Arc::new(ReversingHasher));

        let payload = NewDoctor {
            name: "A".into(),
            email: "a@x.com".into(),
            password: "pw".into(),
            specialty: "Cardiology".into(),
            services: "consult".into(),
            location: "NYC".into(),
            availability: "Mon-Fri".into(),
        };
        let created = service.create_doctor(payload.clone()).await.unwrap();

        assert!(payload.matches(&created));
        let stored = doctors.inserted.lock();
        assert_eq!(stored[0].password, "hashed:wp");
    }
}
