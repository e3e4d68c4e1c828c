//! Ownership guard for mutating operations.
//!
//! Only the user who created a topic, post, or comment may edit or delete it.
//! There is no administrative override. Services fetch the resource first,
//! check ownership, and only then write.

use super::{Error, UserId};

/// Resources that record the user who created them.
pub trait Owned {
    /// The creator of the resource. Fixed at creation.
    fn owner(&self) -> UserId;
}

/// Decide whether `requester` may mutate a resource owned by `owner`.
///
/// # Examples
/// ```
/// use forum_backend::domain::{UserId, ownership::authorize};
///
/// let five = UserId::new(5).expect("valid id");
/// let six = UserId::new(6).expect("valid id");
/// assert!(authorize(five, five));
/// assert!(!authorize(five, six));
/// ```
#[must_use]
pub fn authorize(owner: UserId, requester: UserId) -> bool {
    owner == requester
}

/// Reject the request with [`Error::forbidden`] unless `requester` owns `resource`.
///
/// `action` completes the sentence "not authorised to ...".
///
/// # Errors
/// Returns a forbidden error when the requester is not the owner.
pub fn ensure_owner<R: Owned + ?Sized>(
    resource: &R,
    requester: UserId,
    action: &str,
) -> Result<(), Error> {
    if authorize(resource.owner(), requester) {
        Ok(())
    } else {
        Err(Error::forbidden(format!("not authorised to {action}")))
    }
}
