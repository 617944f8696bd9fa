//! Access token abstraction
//!
//! The document store authorizes every request with the signed-in user's ID
//! token. Taking the token through this trait keeps the store testable
//! without a live identity service.

use async_trait::async_trait;
use doctorfinder_domain::Result;

/// Source of bearer tokens for authenticated requests
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    /// A currently valid access token, refreshed if needed.
    ///
    /// # Errors
    /// `DoctorFinderError::Auth` when nobody is signed in or the refresh is
    /// rejected.
    async fn access_token(&self) -> Result<String>;
}
