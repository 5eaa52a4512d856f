//! Error type for `ember-engine`.

use thiserror::Error;
use uuid::Uuid;

/// An engine-level error, generic over the backing store's error type.
///
/// Expected conflicts (duplicate event, duplicate award) never surface
/// here — they are reflected in return-value shape only. Transient storage
/// errors bubble through [`Error::Store`] unmodified; the engine never
/// retries.
#[derive(Debug, Error)]
pub enum Error<E>
where
  E: std::error::Error,
{
  /// The referenced user has no stats record.
  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error("store error: {0}")]
  Store(#[source] E),
}
