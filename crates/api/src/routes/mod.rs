//! Record API routes
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/api/doctors` | every doctor |
//! | POST | `/api/doctors` | create a doctor |
//! | GET | `/api/users` | every user |
//! | POST | `/api/users` | create a user |
//! | GET | `/` | liveness text |

mod doctors;
mod health;
mod users;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::context::ApiContext;

pub use doctors::{create_doctor, list_doctors};
pub use health::liveness;
pub use users::{create_user, list_users};

/// Build the application router. CORS is open to any origin.
pub fn router(context: Arc<ApiContext>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/api/doctors", get(list_doctors).post(create_doctor))
        .route("/api/users", get(list_users).post(create_user))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}
