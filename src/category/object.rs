// Copyright 2025 Cowboy AI, LLC.

//! Objects of a category and their classification
//!
//! An object is a stateless marker type. Three tiers refine each other:
//!
//! - **Universal**: trivially default-constructible and zero-sized
//! - **Set**: additionally exposes a static membership predicate
//! - **Type**: additionally names a concrete carrier type
//!
//! Classification consults the [`CapabilityDetector`]. Objects are declared
//! with the `declare_*` functions, whose trait bounds prove the capabilities
//! being recorded.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;
use tracing::debug;

use crate::capability::{Capability, CapabilityDetector, CapabilitySet, Signature, VerdictKind};
use crate::errors::{CategoryError, CategoryResult};
use crate::tier::Tier;

/// Markers that can stand for an object of the universal category
///
/// Implemented for every `Copy + Default` type; whether the marker is also
/// stateless is decided by the detector when the type is declared.
pub trait UniversalObject: Copy + Default + fmt::Debug + Send + Sync + 'static {}

impl<T> UniversalObject for T where T: Copy + Default + fmt::Debug + Send + Sync + 'static {}

/// Objects with an element-membership predicate
pub trait SetObject: UniversalObject {
    /// Whether `candidate` is an element of this object
    fn is_element(candidate: &dyn Any) -> bool;
}

/// Set objects whose elements inhabit one concrete carrier type
pub trait TypeObject: SetObject {
    /// The value type elements of this object inhabit
    type Carrier: 'static;
}

/// Carrier type of a type object
pub type Carrier<O> = <O as TypeObject>::Carrier;

/// The canonical type object wrapping carrier `T`
///
/// Its membership predicate accepts exactly the values whose dynamic type is `T`.
pub struct TypeObj<T>(PhantomData<fn() -> T>);

impl<T> TypeObj<T> {
    /// Create the marker
    pub const fn new() -> Self {
        TypeObj(PhantomData)
    }
}

impl<T> Clone for TypeObj<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypeObj<T> {}

impl<T> Default for TypeObj<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PartialEq for TypeObj<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> Eq for TypeObj<T> {}

impl<T> Hash for TypeObj<T> {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

impl<T> fmt::Debug for TypeObj<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeObj<{}>", std::any::type_name::<T>())
    }
}

impl<T: 'static> SetObject for TypeObj<T> {
    fn is_element(candidate: &dyn Any) -> bool {
        candidate.is::<T>()
    }
}

impl<T: 'static> TypeObject for TypeObj<T> {
    type Carrier = T;
}

fn universal_capabilities<O: UniversalObject>() -> CapabilitySet {
    let mut capabilities = CapabilitySet::only(Capability::DefaultConstructible);
    if mem::size_of::<O>() == 0 {
        capabilities.insert(Capability::Stateless);
    }
    capabilities
}

/// Record the universal-object capabilities of `O`
pub fn declare_universal_object<O: UniversalObject>(detector: &CapabilityDetector) -> Signature {
    let signature = Signature::of::<O>();
    detector.record(signature, universal_capabilities::<O>());
    signature
}

/// Record the set-object capabilities of `O`
pub fn declare_set_object<O: SetObject>(detector: &CapabilityDetector) -> Signature {
    let signature = Signature::of::<O>();
    detector.record(
        signature,
        universal_capabilities::<O>().with(Capability::Membership),
    );
    signature
}

/// Record the type-object capabilities of `O`, including its carrier
pub fn declare_type_object<O: TypeObject>(detector: &CapabilityDetector) -> Signature {
    let signature = Signature::of::<O>();
    detector.record_carrier(
        signature,
        Signature::of::<O::Carrier>(),
        universal_capabilities::<O>()
            .with(Capability::Membership)
            .with(Capability::Carrier),
    );
    signature
}

/// Strictest object tier `object` satisfies, if any
///
/// Probing stops at the first missing capability: a type that is not a
/// universal object is never probed for membership or carriers.
pub fn classify(detector: &CapabilityDetector, object: &Signature) -> Option<Tier> {
    detector.memoize(object, VerdictKind::Object, || {
        let universal = detector.probe(object, Capability::DefaultConstructible)
            && detector.probe(object, Capability::Stateless);
        if !universal {
            return None;
        }
        if !detector.probe(object, Capability::Membership) {
            return Some(Tier::Universal);
        }
        if !detector.probe(object, Capability::Carrier) {
            return Some(Tier::Set);
        }
        Some(Tier::Type)
    })
}

/// Whether `object` is an object of at least the `required` tier
pub fn satisfies(detector: &CapabilityDetector, object: &Signature, required: Tier) -> bool {
    classify(detector, object).is_some_and(|tier| tier.refines(required))
}

/// Reject `object` unless it is an object of at least the `required` tier
pub fn require_object(
    detector: &CapabilityDetector,
    object: &Signature,
    required: Tier,
) -> CategoryResult<()> {
    if satisfies(detector, object, required) {
        return Ok(());
    }
    debug!(object = object.name(), %required, "object rejected");
    Err(CategoryError::ObjectValidation {
        object: object.to_string(),
        required,
    })
}

/// Whether `O` is a declared universal object
///
/// Reads the global detector, so the answer is `false` until `O` has been
/// declared, for example by a registry or a morphism constructor.
pub fn is_universal_object<O: ?Sized + 'static>() -> bool {
    satisfies(CapabilityDetector::global(), &Signature::of::<O>(), Tier::Universal)
}

/// Whether `O` is a declared set object
///
/// Depends on declarations made so far in the process: `O` must have been
/// declared as a set or type object before this returns `true`.
pub fn is_set_object<O: ?Sized + 'static>() -> bool {
    satisfies(CapabilityDetector::global(), &Signature::of::<O>(), Tier::Set)
}

/// Whether `O` is a declared type object
///
/// Depends on declarations made so far in the process. `TypeObj<u8>` only
/// qualifies after something declares it, such as `TypeCategory::object::<u8>()`.
pub fn is_type_object<O: ?Sized + 'static>() -> bool {
    satisfies(CapabilityDetector::global(), &Signature::of::<O>(), Tier::Type)
}

/// Object identity: whether `X` and `Y` are the same marker
pub fn is_same<X: ?Sized + 'static, Y: ?Sized + 'static>() -> bool {
    Signature::of::<X>() == Signature::of::<Y>()
}

/// Value form of [`is_same`]
pub fn is_same_object<X: 'static, Y: 'static>(_x: &X, _y: &Y) -> bool {
    is_same::<X, Y>()
}
