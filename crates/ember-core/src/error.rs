//! Error types for `ember-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Two catalog entries share an id; the catalog refuses to construct.
  #[error("duplicate reward id in catalog: {0:?}")]
  DuplicateRewardId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
