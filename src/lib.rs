//! # CIM Category
//!
//! Objects and morphisms of a category, validated when they are defined.
//!
//! User code declares **objects** (stateless marker types) and **morphisms**
//! (arrows between objects) and composes morphisms into chains. Every check
//! happens at definition time:
//!
//! - **Objects** are classified into three tiers: universal, set and type
//! - **Morphisms** are classified by the tiers of their endpoints and, at the
//!   type tier, by whether their evaluation accepts the source carrier
//! - **Compositions** must match each target to the next source
//!
//! Evaluating a morphism or a composition performs no checks at all.
//!
//! ## Example
//!
//! ```
//! use cim_category::{Category, TypeCategory};
//!
//! let cat = TypeCategory;
//! let int = cat.object::<i64>();
//! let text = cat.object::<String>();
//!
//! let show = cat.morphism(int, text, |n: i64| n.to_string()).unwrap();
//! let count = cat.morphism(text, int, |s: String| s.len() as i64).unwrap();
//!
//! let digits = cat.compose((show, count)).unwrap();
//! assert_eq!(digits.apply(123), 3);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Declare, then trust**: capabilities are recorded once, when a type is declared
//! 2. **Fail early**: invalid objects, morphisms and chains are rejected at construction
//! 3. **Zero-cost evaluation**: composition folds statically over its links

#![warn(missing_docs)]

pub mod capability;
pub mod category;
mod errors;
pub mod tier;

pub use capability::{Capability, CapabilityDetector, CapabilitySet, Signature, TypeProfile};
pub use category::{
    are_composable, compose, compose_in, is_same, is_same_object, is_set_morphism,
    is_set_object, is_type_morphism, is_type_object, is_universal_morphism,
    is_universal_object, validate_chain, Arrow, ArrowSignature, Carrier, Category,
    ChainSignature, Composed, Evaluate, IntoChain, SetArrow, SetCategory, SetMorphism,
    SetObject, SourceCarrier, TargetCarrier, TypeArrow, TypeCategory, TypeMorphism, TypeObj,
    TypeObject, UniversalCategory, UniversalMorphism, UniversalObject,
};
pub use errors::{CategoryError, CategoryResult};
pub use tier::Tier;
