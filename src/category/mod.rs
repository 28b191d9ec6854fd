//! Objects, morphisms and their composition
//!
//! Objects and morphisms are checked when they are declared. Once a morphism
//! or a composition exists it is known to obey the laws of its tier, and
//! evaluating it does no further checking.

pub mod composition;
pub mod constructors;
pub mod morphism;
pub mod object;
pub mod registry;

pub use composition::{
    are_composable, compose, compose_in, validate_chain, ChainSignature, Composed, IntoChain,
};
pub use constructors::{SetMorphism, TypeMorphism, UniversalMorphism};
pub use morphism::{
    is_set_morphism, is_type_morphism, is_universal_morphism, Arrow, ArrowSignature, Evaluate,
    SetArrow, SourceCarrier, TargetCarrier, TypeArrow,
};
pub use object::{
    is_same, is_same_object, is_set_object, is_type_object, is_universal_object, Carrier,
    SetObject, TypeObj, TypeObject, UniversalObject,
};
pub use registry::{Category, SetCategory, TypeCategory, UniversalCategory};
