// Copyright 2025 Cowboy AI, LLC.

//! Error types for definition-time validation
//!
//! Every error is raised while declaring objects, constructing morphisms or
//! composing chains. Evaluation never produces a `CategoryError`.

use thiserror::Error;

use crate::tier::Tier;

/// Errors that can occur while declaring objects, morphisms or compositions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    /// A type fails the object tier required by its context
    #[error("Object validation failed: {object} is not a {required} object")]
    ObjectValidation {
        /// Name of the rejected object type
        object: String,
        /// Tier the context required
        required: Tier,
    },

    /// A morphism's endpoints or evaluation fail the required tier
    #[error("Morphism validation failed: {morphism} is not a {required} morphism ({reason})")]
    MorphismValidation {
        /// Name of the rejected morphism type
        morphism: String,
        /// Tier the context required
        required: Tier,
        /// Which part of the morphism failed
        reason: String,
    },

    /// Two adjacent morphisms in a chain do not line up
    #[error(
        "Morphisms are not composable: target of #{position} ({first}) is {target}, \
         but source of #{} ({second}) is {next_source}",
        .position + 1
    )]
    Composability {
        /// Index of the first morphism of the offending pair
        position: usize,
        /// Name of the first morphism of the pair
        first: String,
        /// Name of the second morphism of the pair
        second: String,
        /// Target object of the first morphism
        target: String,
        /// Source object of the second morphism
        next_source: String,
    },

    /// A composition was requested over zero morphisms
    #[error("Cannot compose an empty chain of {tier} morphisms")]
    Arity {
        /// Tier the composition was requested at
        tier: Tier,
    },
}

/// Result type for category operations
pub type CategoryResult<T> = Result<T, CategoryError>;

impl CategoryError {
    /// Check if this error rejects an object or morphism declaration
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CategoryError::ObjectValidation { .. } | CategoryError::MorphismValidation { .. }
        )
    }

    /// Positions of the offending adjacent pair for composability errors
    pub fn offending_pair(&self) -> Option<(usize, usize)> {
        match self {
            CategoryError::Composability { position, .. } => Some((*position, position + 1)),
            _ => None,
        }
    }

    /// Tier the failing context required
    pub fn required_tier(&self) -> Tier {
        match self {
            CategoryError::ObjectValidation { required, .. }
            | CategoryError::MorphismValidation { required, .. } => *required,
            CategoryError::Arity { tier } => *tier,
            // composability is tier independent
            CategoryError::Composability { .. } => Tier::Universal,
        }
    }
}
