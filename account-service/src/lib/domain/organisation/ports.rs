use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::organisation::models::Organisation;

/// Read access to organisations.
#[async_trait]
pub trait OrganisationRepository: Send + Sync + 'static {
    /// Retrieve organisation by contact email.
    ///
    /// # Returns
    /// Optional organisation (None if not found)
    ///
    /// # Errors
    /// * `Internal` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Organisation>, AccountError>;
}
