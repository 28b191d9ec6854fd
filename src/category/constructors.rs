// Copyright 2025 Cowboy AI, LLC.

//! Validated morphism builders
//!
//! Each builder checks its endpoints (and, for the type tier, its evaluation
//! function) when it is constructed and returns an error immediately if the
//! check fails. Evaluating a constructed morphism performs no checks at all.

use std::fmt;
use std::marker::PhantomData;

use super::morphism::{self, Arrow, Evaluate};
use super::object::{Carrier, SetObject, TypeObject, UniversalObject};
use crate::capability::{CapabilityDetector, Signature};
use crate::errors::CategoryResult;
use crate::tier::Tier;

/// A morphism with declared endpoints and no evaluation behaviour
pub struct UniversalMorphism<Src, Trg> {
    _endpoints: PhantomData<fn() -> (Src, Trg)>,
}

impl<Src, Trg> UniversalMorphism<Src, Trg>
where
    Src: UniversalObject,
    Trg: UniversalObject,
{
    /// Create the morphism, rejecting endpoints that are not universal objects
    pub fn new() -> CategoryResult<Self> {
        let detector = CapabilityDetector::global();
        let signature = morphism::declare_arrow::<Self>(detector);
        morphism::require_morphism(detector, &signature.morphism, Tier::Universal)?;
        Ok(Self {
            _endpoints: PhantomData,
        })
    }
}

impl<Src, Trg> Clone for UniversalMorphism<Src, Trg> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Src, Trg> Copy for UniversalMorphism<Src, Trg> {}

impl<Src: 'static, Trg: 'static> fmt::Debug for UniversalMorphism<Src, Trg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UniversalMorphism({} → {})",
            Signature::of::<Src>(),
            Signature::of::<Trg>()
        )
    }
}

impl<Src, Trg> Arrow for UniversalMorphism<Src, Trg>
where
    Src: UniversalObject,
    Trg: UniversalObject,
{
    type Source = Src;
    type Target = Trg;
}

/// A morphism between set objects owning its evaluation function
///
/// Evaluation forwards its argument to the function and returns the result
/// verbatim. Membership of the argument in the source object is not checked.
pub struct SetMorphism<Src, Trg, F> {
    base: UniversalMorphism<Src, Trg>,
    fun: F,
}

impl<Src, Trg, F> SetMorphism<Src, Trg, F>
where
    Src: SetObject,
    Trg: SetObject,
    F: 'static,
{
    /// Create the morphism, rejecting endpoints that are not set objects
    pub fn new(fun: F) -> CategoryResult<Self> {
        let base = UniversalMorphism::new()?;
        let detector = CapabilityDetector::global();
        let signature = morphism::declare_set_arrow::<Self>(detector);
        morphism::require_morphism(detector, &signature.morphism, Tier::Set)?;
        Ok(Self { base, fun })
    }
}

impl<Src, Trg, F> SetMorphism<Src, Trg, F> {
    /// Evaluate on `input`
    pub fn call<A, R>(&self, input: A) -> R
    where
        F: Fn(A) -> R,
    {
        (self.fun)(input)
    }

    /// The universal morphism underneath
    pub fn as_universal(&self) -> UniversalMorphism<Src, Trg> {
        self.base
    }

    /// Give up the evaluation function
    pub fn into_inner(self) -> F {
        self.fun
    }
}

impl<Src, Trg, F: Clone> Clone for SetMorphism<Src, Trg, F> {
    fn clone(&self) -> Self {
        Self {
            base: self.base,
            fun: self.fun.clone(),
        }
    }
}

impl<Src: 'static, Trg: 'static, F> fmt::Debug for SetMorphism<Src, Trg, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SetMorphism({} → {})",
            Signature::of::<Src>(),
            Signature::of::<Trg>()
        )
    }
}

impl<Src, Trg, F> Arrow for SetMorphism<Src, Trg, F>
where
    Src: UniversalObject,
    Trg: UniversalObject,
    F: 'static,
{
    type Source = Src;
    type Target = Trg;
}

impl<Src, Trg, F, A, R> Evaluate<A> for SetMorphism<Src, Trg, F>
where
    F: Fn(A) -> R,
{
    type Output = R;

    fn evaluate(&self, input: A) -> R {
        self.call(input)
    }
}

/// A morphism between type objects whose function maps carrier to carrier
pub struct TypeMorphism<Src, Trg, F> {
    inner: SetMorphism<Src, Trg, F>,
}

impl<Src, Trg, F, R> TypeMorphism<Src, Trg, F>
where
    Src: TypeObject,
    Trg: TypeObject,
    F: Fn(Carrier<Src>) -> R + 'static,
    R: Into<Carrier<Trg>>,
{
    /// Create the morphism
    ///
    /// The function must accept the source carrier and return something
    /// convertible to the target carrier; both endpoints must be type objects.
    pub fn new(fun: F) -> CategoryResult<Self> {
        let inner = SetMorphism::new(fun)?;
        let detector = CapabilityDetector::global();
        let signature = morphism::declare_type_arrow::<Self>(detector);
        morphism::require_morphism(detector, &signature.morphism, Tier::Type)?;
        Ok(Self { inner })
    }

    /// Evaluate on an element of the source carrier
    pub fn apply(&self, input: Carrier<Src>) -> Carrier<Trg> {
        self.inner.call(input).into()
    }
}

impl<Src, Trg, F> TypeMorphism<Src, Trg, F> {
    /// The set morphism underneath
    pub fn as_set(&self) -> &SetMorphism<Src, Trg, F> {
        &self.inner
    }
}

impl<Src, Trg, F: Clone> Clone for TypeMorphism<Src, Trg, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<Src: 'static, Trg: 'static, F> fmt::Debug for TypeMorphism<Src, Trg, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TypeMorphism({} → {})",
            Signature::of::<Src>(),
            Signature::of::<Trg>()
        )
    }
}

impl<Src, Trg, F> Arrow for TypeMorphism<Src, Trg, F>
where
    Src: UniversalObject,
    Trg: UniversalObject,
    F: 'static,
{
    type Source = Src;
    type Target = Trg;
}

impl<Src, Trg, F, R> Evaluate<Carrier<Src>> for TypeMorphism<Src, Trg, F>
where
    Src: TypeObject,
    Trg: TypeObject,
    F: Fn(Carrier<Src>) -> R,
    R: Into<Carrier<Trg>>,
{
    type Output = Carrier<Trg>;

    fn evaluate(&self, input: Carrier<Src>) -> Carrier<Trg> {
        self.inner.call(input).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::morphism::{is_set_morphism, is_type_morphism, is_universal_morphism};
    use crate::category::object::{is_set_object, is_type_object, TypeObj};
    use crate::errors::CategoryError;
    use std::any::Any;

    #[derive(Debug, Default, Clone, Copy)]
    struct Origin;

    #[derive(Debug, Default, Clone, Copy)]
    struct Anything;

    impl SetObject for Anything {
        fn is_element(_candidate: &dyn Any) -> bool {
            true
        }
    }

    #[derive(Debug, Default, Clone, Copy)]
    struct Celsius;

    impl SetObject for Celsius {
        fn is_element(candidate: &dyn Any) -> bool {
            candidate.downcast_ref::<f64>().is_some_and(|t| *t >= -273.15)
        }
    }

    impl TypeObject for Celsius {
        type Carrier = f64;
    }

    #[test]
    fn test_universal_morphism_accepts_stateless_markers() {
        let m = UniversalMorphism::<Origin, Origin>::new().unwrap();
        let _: Origin = UniversalMorphism::<Origin, Origin>::source();
        assert!(is_universal_morphism::<UniversalMorphism<Origin, Origin>>());
        assert_eq!(format!("{:?}", m), "UniversalMorphism(Origin → Origin)");
    }

    #[test]
    fn test_universal_morphism_rejects_stateful_endpoints() {
        let err = UniversalMorphism::<Origin, u16>::new().unwrap_err();
        assert_eq!(
            err,
            CategoryError::MorphismValidation {
                morphism: "UniversalMorphism<Origin, u16>".to_string(),
                required: Tier::Universal,
                reason: "target u16 is not a universal object".to_string(),
            }
        );
    }

    #[test]
    fn test_set_morphism_forwards_verbatim() {
        let describe = SetMorphism::<Anything, Anything, _>::new(|n: i32| format!("#{n}")).unwrap();

        assert_eq!(describe.call(7), "#7");
        assert_eq!(describe.evaluate(-1_i32), "#-1");
        assert!(is_set_object::<Anything>());
    }

    #[test]
    fn test_set_morphism_returns_function_result() {
        let halve = SetMorphism::<Anything, Anything, _>::new(|n: u32| (n / 2, n % 2)).unwrap();

        assert_eq!(halve.evaluate(7_u32), (3, 1));
        assert_eq!(halve.call(10_u32), (5, 0));
        assert_eq!(format!("{:?}", halve), "SetMorphism(Anything → Anything)");
    }

    #[test]
    fn test_set_morphism_skips_membership_checks() {
        let reject_nothing = SetMorphism::<Celsius, Celsius, _>::new(|t: f64| t - 500.0).unwrap();

        // -600 is no element of Celsius, evaluation does not care
        assert!(!Celsius::is_element(&-600.0_f64));
        assert_eq!(reject_nothing.call(-100.0), -600.0);
    }

    #[test]
    fn test_set_morphism_requires_set_endpoints_at_runtime_tier() {
        // has a membership predicate but carries state
        #[derive(Debug, Default, Clone, Copy)]
        struct Bag(u8);

        impl SetObject for Bag {
            fn is_element(_candidate: &dyn Any) -> bool {
                true
            }
        }

        let err = SetMorphism::<Bag, Anything, _>::new(|x: u8| x).unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("source Bag"));
    }

    #[test]
    fn test_type_morphism_converts_into_target_carrier() {
        let widen = TypeMorphism::<TypeObj<u8>, TypeObj<u64>, _>::new(|b: u8| b).unwrap();
        assert_eq!(widen.apply(200), 200_u64);
        assert_eq!(widen.evaluate(3_u8), 3_u64);
        assert_eq!(widen.as_set().call(4_u8), 4_u8);
        assert!(is_type_object::<TypeObj<u8>>());
        assert!(is_type_object::<TypeObj<u64>>());
    }

    #[test]
    fn test_type_morphism_is_classified_at_every_weaker_tier() {
        fn fahrenheit(c: f64) -> f64 {
            c * 9.0 / 5.0 + 32.0
        }

        let convert = TypeMorphism::<Celsius, Celsius, fn(f64) -> f64>::new(fahrenheit).unwrap();
        assert_eq!(convert.apply(100.0), 212.0);

        type Convert = TypeMorphism<Celsius, Celsius, fn(f64) -> f64>;
        assert!(is_type_morphism::<Convert>());
        assert!(is_set_morphism::<Convert>());
        assert!(is_universal_morphism::<Convert>());
        assert_eq!(format!("{:?}", convert.clone()), "TypeMorphism(Celsius → Celsius)");
    }
}
