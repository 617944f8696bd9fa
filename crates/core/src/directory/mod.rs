//! Doctor and user directory

pub mod ports;
mod service;
mod view;

pub use service::DirectoryService;
pub use view::{DirectoryPage, DoctorForm, UserForm, NO_DOCTORS_PLACEHOLDER, NO_USERS_PLACEHOLDER};
