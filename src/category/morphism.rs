// Copyright 2025 Cowboy AI, LLC.

//! Morphism abstractions and their classification
//!
//! A morphism is an arrow between two object markers, exposed through the
//! static `source()` and `target()` of [`Arrow`]. Its tier follows from the
//! tiers of its endpoints:
//!
//! - **Universal**: both endpoints are universal objects
//! - **Set**: both endpoints are set objects. The evaluation function is not
//!   checked at this tier; a type can classify as a set morphism without its
//!   call behaviour being verified.
//! - **Type**: both endpoints are type objects and evaluation accepts the
//!   source carrier, producing something convertible to the target carrier

use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::object::{self, Carrier, SetObject, TypeObject, UniversalObject};
use crate::capability::{Capability, CapabilityDetector, CapabilitySet, Signature, VerdictKind};
use crate::errors::{CategoryError, CategoryResult};
use crate::tier::Tier;

/// An arrow between two object markers
pub trait Arrow: Sized + 'static {
    /// Source object marker
    type Source: UniversalObject;

    /// Target object marker
    type Target: UniversalObject;

    /// The source object
    fn source() -> Self::Source {
        Self::Source::default()
    }

    /// The target object
    fn target() -> Self::Target {
        Self::Target::default()
    }
}

/// Arrows between set objects
pub trait SetArrow: Arrow<Source: SetObject, Target: SetObject> {}

impl<M> SetArrow for M
where
    M: Arrow,
    M::Source: SetObject,
    M::Target: SetObject,
{
}

/// Arrows between type objects
pub trait TypeArrow: SetArrow + Arrow<Source: TypeObject, Target: TypeObject> {}

impl<M> TypeArrow for M
where
    M: Arrow,
    M::Source: TypeObject,
    M::Target: TypeObject,
{
}

/// Carrier of a morphism's source object
pub type SourceCarrier<M> = Carrier<<M as Arrow>::Source>;

/// Carrier of a morphism's target object
pub type TargetCarrier<M> = Carrier<<M as Arrow>::Target>;

/// Evaluation behaviour of a morphism on inputs of type `A`
pub trait Evaluate<A> {
    /// Result of evaluating on an `A`
    type Output;

    /// Evaluate the morphism
    fn evaluate(&self, input: A) -> Self::Output;
}

/// Signatures of a morphism and its declared endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ArrowSignature {
    /// The morphism type
    pub morphism: Signature,
    /// Its source object
    pub source: Signature,
    /// Its target object
    pub target: Signature,
}

impl ArrowSignature {
    /// Signature of `M`, read from its `Arrow` implementation
    pub fn of<M: Arrow>() -> Self {
        Self {
            morphism: Signature::of::<M>(),
            source: Signature::of::<M::Source>(),
            target: Signature::of::<M::Target>(),
        }
    }
}

impl fmt::Display for ArrowSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} → {}", self.morphism, self.source, self.target)
    }
}

/// Record `M` as a morphism with declared endpoints
pub fn declare_arrow<M: Arrow>(detector: &CapabilityDetector) -> ArrowSignature {
    let signature = ArrowSignature {
        morphism: Signature::of::<M>(),
        source: object::declare_universal_object::<M::Source>(detector),
        target: object::declare_universal_object::<M::Target>(detector),
    };
    detector.record_arrow(
        signature.morphism,
        signature.source,
        signature.target,
        CapabilitySet::only(Capability::Endpoints),
    );
    signature
}

/// Record `M` as a morphism between set objects
pub fn declare_set_arrow<M>(detector: &CapabilityDetector) -> ArrowSignature
where
    M: Arrow,
    M::Source: SetObject,
    M::Target: SetObject,
{
    object::declare_set_object::<M::Source>(detector);
    object::declare_set_object::<M::Target>(detector);
    declare_arrow::<M>(detector)
}

/// Record `M` as a morphism between type objects with checked evaluation
///
/// The bounds prove that `M` evaluates on its source carrier and produces a
/// value convertible to its target carrier.
pub fn declare_type_arrow<M>(detector: &CapabilityDetector) -> ArrowSignature
where
    M: Arrow + Evaluate<Carrier<M::Source>>,
    M::Source: TypeObject,
    M::Target: TypeObject,
    <M as Evaluate<Carrier<M::Source>>>::Output: Into<Carrier<M::Target>>,
{
    object::declare_type_object::<M::Source>(detector);
    object::declare_type_object::<M::Target>(detector);
    let signature = declare_arrow::<M>(detector);
    detector.record(
        signature.morphism,
        CapabilitySet::only(Capability::EndpointCarriers).with(Capability::Evaluation),
    );
    signature
}

/// Strictest morphism tier `morphism` satisfies, if any
pub fn classify(detector: &CapabilityDetector, morphism: &Signature) -> Option<Tier> {
    detector.memoize(morphism, VerdictKind::Morphism, || {
        if !detector.probe(morphism, Capability::Endpoints) {
            return None;
        }
        let (source, target) = detector.endpoints(morphism)?;
        let endpoints = object::classify(detector, &source).min(object::classify(detector, &target))?;

        match endpoints {
            Tier::Universal => Some(Tier::Universal),
            Tier::Set => Some(Tier::Set),
            Tier::Type => {
                let evaluates = detector.probe(morphism, Capability::EndpointCarriers)
                    && detector.probe(morphism, Capability::Evaluation);
                Some(if evaluates { Tier::Type } else { Tier::Set })
            }
        }
    })
}

/// Whether `morphism` is a morphism of at least the `required` tier
pub fn satisfies(detector: &CapabilityDetector, morphism: &Signature, required: Tier) -> bool {
    classify(detector, morphism).is_some_and(|tier| tier.refines(required))
}

/// Reject `morphism` unless it is a morphism of at least the `required` tier
pub fn require_morphism(
    detector: &CapabilityDetector,
    morphism: &Signature,
    required: Tier,
) -> CategoryResult<()> {
    if satisfies(detector, morphism, required) {
        return Ok(());
    }
    let reason = rejection_reason(detector, morphism, required);
    debug!(morphism = morphism.name(), %required, %reason, "morphism rejected");
    Err(CategoryError::MorphismValidation {
        morphism: morphism.to_string(),
        required,
        reason,
    })
}

fn rejection_reason(detector: &CapabilityDetector, morphism: &Signature, required: Tier) -> String {
    let Some((source, target)) = detector
        .endpoints(morphism)
        .filter(|_| detector.probe(morphism, Capability::Endpoints))
    else {
        return "no declared source and target".to_string();
    };
    if !object::satisfies(detector, &source, required) {
        return format!("source {} is not a {} object", source, required);
    }
    if !object::satisfies(detector, &target, required) {
        return format!("target {} is not a {} object", target, required);
    }
    "evaluation is not invocable on the source carrier".to_string()
}

/// Whether `M` is a declared universal morphism
pub fn is_universal_morphism<M: ?Sized + 'static>() -> bool {
    satisfies(CapabilityDetector::global(), &Signature::of::<M>(), Tier::Universal)
}

/// Whether `M` is a declared set morphism
pub fn is_set_morphism<M: ?Sized + 'static>() -> bool {
    satisfies(CapabilityDetector::global(), &Signature::of::<M>(), Tier::Set)
}

/// Whether `M` is a declared type morphism
pub fn is_type_morphism<M: ?Sized + 'static>() -> bool {
    satisfies(CapabilityDetector::global(), &Signature::of::<M>(), Tier::Type)
}
