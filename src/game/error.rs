//! Error types for the runtime core
//!
//! The taxonomy is small on purpose:
//! - `CoreError::UnsupportedEnvironment`: scheduling cannot start, fatal.
//! - `StepError`: something broke inside one simulation step. Steps are
//!   fail-fast: the first trait or layer error aborts the step so later
//!   passes never observe partially-updated state. The driver decides
//!   whether to keep running the next frame.
//! - Missing-capability lookups (a trait kind an entity doesn't have)
//!   are `Option::None`, never errors.

use std::fmt;
use super::entity::{EntityId, TraitKind};

/// Top-level runtime error surfaced to the driver
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The host cannot supply a time source; the loop never starts.
    UnsupportedEnvironment,
    /// A simulation step aborted.
    Step(StepError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::UnsupportedEnvironment => {
                write!(f, "no frame clock available in this environment")
            }
            CoreError::Step(e) => write!(f, "step aborted: {}", e),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<StepError> for CoreError {
    fn from(e: StepError) -> Self {
        CoreError::Step(e)
    }
}

/// Error that aborts a single simulation step
#[derive(Debug, Clone, PartialEq)]
pub enum StepError {
    /// A trait update failed on a specific entity.
    Trait {
        entity: EntityId,
        kind: TraitKind,
        message: String,
    },
    /// A layer observed scene state that violates its preconditions.
    InvariantViolation(String),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::Trait { entity, kind, message } => {
                write!(f, "trait '{}' failed on entity {}: {}", kind, entity, message)
            }
            StepError::InvariantViolation(msg) => {
                write!(f, "invariant violation: {}", msg)
            }
        }
    }
}

impl std::error::Error for StepError {}

/// Failure raised by a single trait's update.
///
/// The entity layer wraps this with the owning entity and trait kind
/// before it reaches the step boundary. The traits shipped with the
/// crate never fail; the type exists for scripted or external traits.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitError {
    pub message: String,
}

impl TraitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for TraitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TraitError {}
