//! Conversions from external infrastructure errors into domain errors.

use doctorfinder_domain::DoctorFinderError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DoctorFinderError);

impl From<InfraError> for DoctorFinderError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DoctorFinderError> for InfraError {
    fn from(value: DoctorFinderError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoDoctorFinderError {
    fn into_domain(self) -> DoctorFinderError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → DoctorFinderError */
/* -------------------------------------------------------------------------- */

impl IntoDoctorFinderError for SqlError {
    fn into_domain(self) -> DoctorFinderError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        DoctorFinderError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        DoctorFinderError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        DoctorFinderError::Database(format!("unique constraint violation: {message}"))
                    }
                    (ErrorCode::ConstraintViolation, 1299) => {
                        DoctorFinderError::Database(format!("not null constraint violation: {message}"))
                    }
                    (ErrorCode::CannotOpen, _) => {
                        DoctorFinderError::Database(format!("unable to open database: {message}"))
                    }
                    _ => DoctorFinderError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                DoctorFinderError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                DoctorFinderError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                DoctorFinderError::Database(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => DoctorFinderError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => DoctorFinderError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → DoctorFinderError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(DoctorFinderError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DoctorFinderError */
/* -------------------------------------------------------------------------- */

impl IntoDoctorFinderError for HttpError {
    fn into_domain(self) -> DoctorFinderError {
        if self.is_timeout() {
            return DoctorFinderError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return DoctorFinderError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return DoctorFinderError::Network(format!("invalid response body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => DoctorFinderError::Auth(message),
                404 => DoctorFinderError::NotFound(message),
                400..=499 => DoctorFinderError::InvalidInput(message),
                _ => DoctorFinderError::Network(message),
            };
        }

        DoctorFinderError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / io / argon2 → DoctorFinderError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(DoctorFinderError::Internal(format!("JSON error: {value}")))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(DoctorFinderError::Internal(format!("I/O error: {value}")))
    }
}

impl From<argon2::password_hash::Error> for InfraError {
    fn from(value: argon2::password_hash::Error) -> Self {
        InfraError(DoctorFinderError::Security(format!("credential hashing failed: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
