//! Patient-facing flows: signup, login, dashboard

mod dashboard;
mod forms;
mod nav;
mod portal;

pub use dashboard::{capitalize_words, Dashboard};
pub use forms::{LoginForm, SignupForm};
pub use nav::NavLinks;
pub use portal::PatientPortal;
