//! Doctor repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use doctorfinder_core::DoctorRepository;
use doctorfinder_domain::{Doctor, NewDoctor, Result as DomainResult};
use rusqlite::{params, Row};
use tokio::task;
use tracing::debug;

use super::manager::{map_join_error, map_sql_error, DbManager};
use super::{created_now, format_timestamp, parse_timestamp};

/// SQLite-backed implementation of `DoctorRepository`
pub struct SqliteDoctorRepository {
    db: Arc<DbManager>,
}

impl SqliteDoctorRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DoctorRepository for SqliteDoctorRepository {
    async fn list(&self) -> DomainResult<Vec<Doctor>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Doctor>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, name, email, specialty, services, location, availability, created_at
                     FROM doctors ORDER BY id",
                )
                .map_err(map_sql_error)?;

            let doctors = stmt
                .query_map([], map_doctor_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            debug!(count = doctors.len(), "listed doctors");
            Ok(doctors)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert(&self, doctor: NewDoctor) -> DomainResult<Doctor> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Doctor> {
            let conn = db.get_connection()?;
            let created_at = created_now();

            conn.execute(
                "INSERT INTO doctors
                    (name, email, password, specialty, services, location, availability, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    doctor.name,
                    doctor.email,
                    doctor.password,
                    doctor.specialty,
                    doctor.services,
                    doctor.location,
                    doctor.availability,
                    format_timestamp(&created_at),
                ],
            )
            .map_err(map_sql_error)?;

            Ok(Doctor {
                id: conn.last_insert_rowid(),
                name: doctor.name,
                email: doctor.email,
                specialty: doctor.specialty,
                services: doctor.services,
                location: doctor.location,
                availability: doctor.availability,
                created_at,
            })
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_doctor_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        specialty: row.get(3)?,
        services: row.get(4)?,
        location: row.get(5)?,
        availability: row.get(6)?,
        created_at: parse_timestamp(7, &row.get::<_, String>(7)?)?,
    })
}
