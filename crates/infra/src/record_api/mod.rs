//! Client for the Record API

pub mod client;

pub use client::RecordApiClient;
