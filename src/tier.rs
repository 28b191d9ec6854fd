// Copyright 2025 Cowboy AI, LLC.

//! Strictness tiers for objects and morphisms
//!
//! Tiers are ordered `Universal < Set < Type`: every stricter tier refines the
//! weaker ones. The [`tag`] module carries the same information at the type
//! level so composed morphisms can record the tier they were validated at.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strictness tier of an object or morphism
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Any stateless, trivially constructible marker
    Universal,

    /// Markers with an element-membership predicate
    Set,

    /// Set markers naming a concrete carrier type
    Type,
}

impl Tier {
    /// All tiers, weakest first
    pub const ALL: [Tier; 3] = [Tier::Universal, Tier::Set, Tier::Type];

    /// Whether this tier satisfies the requirements of `required`
    pub fn refines(self, required: Tier) -> bool {
        self >= required
    }

    /// Lower-case name used in diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Universal => "universal",
            Tier::Set => "set",
            Tier::Type => "type",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-level tier tags
pub mod tag {
    use super::Tier;

    /// Associates a zero-sized tag type with its runtime [`Tier`]
    pub trait TierTag: 'static {
        /// The tier this tag stands for
        const TIER: Tier;
    }

    /// Tags for tiers whose morphisms carry evaluation behaviour
    pub trait Evaluating: TierTag {}

    /// Universal tier tag
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Universal {}

    /// Set tier tag
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Set {}

    /// Type tier tag
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Type {}

    impl TierTag for Universal {
        const TIER: Tier = Tier::Universal;
    }

    impl TierTag for Set {
        const TIER: Tier = Tier::Set;
    }

    impl TierTag for Type {
        const TIER: Tier = Tier::Type;
    }

    impl Evaluating for Set {}
    impl Evaluating for Type {}
}
