// Copyright 2025 Cowboy AI, LLC.

//! Composition of morphism chains
//!
//! A chain is a tuple of one to eight morphisms of the same tier. Composing it
//! checks, once, that every target matches the following source by object
//! identity and that every link classifies at the requested tier. The result
//! is a [`Composed`] morphism whose evaluation is a plain left-to-right fold:
//! every link runs exactly once, in order, with no checks in between.
//!
//! Internally the tuple is rebuilt as a cons list `(m0, (m1, (m2, ())))` so
//! the fold is resolved statically.

use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

use super::morphism::{self, Arrow, ArrowSignature, Evaluate};
use super::object::{Carrier, SetObject, TypeObject, UniversalObject};
use crate::capability::{Capability, CapabilityDetector, CapabilitySet, Signature};
use crate::errors::{CategoryError, CategoryResult};
use crate::tier::tag::{self, Evaluating, TierTag};
use crate::tier::Tier;

/// Validated description of a composition chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainSignature {
    /// Tier the chain was validated at
    pub tier: Tier,
    /// Source of the first link
    pub source: Signature,
    /// Target of the last link
    pub target: Signature,
    /// Every link, in order
    pub links: Vec<ArrowSignature>,
}

impl ChainSignature {
    /// Number of links
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Always false for a validated chain
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl fmt::Display for ChainSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)?;
        for link in &self.links {
            write!(f, " → {}", link.target)?;
        }
        Ok(())
    }
}

/// Whether every adjacent pair of `links` lines up
pub fn are_composable(links: &[ArrowSignature]) -> bool {
    links.windows(2).all(|pair| pair[0].target == pair[1].source)
}

/// Validate a chain of morphism signatures at `tier`
///
/// Rejects empty chains, then the first adjacent pair whose target and source
/// differ, then any link that does not classify at `tier`.
pub fn validate_chain(
    detector: &CapabilityDetector,
    tier: Tier,
    links: &[ArrowSignature],
) -> CategoryResult<ChainSignature> {
    let (Some(first), Some(last)) = (links.first(), links.last()) else {
        return Err(CategoryError::Arity { tier });
    };

    for (position, pair) in links.windows(2).enumerate() {
        if pair[0].target != pair[1].source {
            debug!(position, first = %pair[0], second = %pair[1], "chain rejected");
            return Err(CategoryError::Composability {
                position,
                first: pair[0].morphism.to_string(),
                second: pair[1].morphism.to_string(),
                target: pair[0].target.to_string(),
                next_source: pair[1].source.to_string(),
            });
        }
    }

    for link in links {
        morphism::require_morphism(detector, &link.morphism, tier)?;
    }

    Ok(ChainSignature {
        tier,
        source: first.source,
        target: last.target,
        links: links.to_vec(),
    })
}

/// Cons list of morphisms
pub trait Links: 'static {
    /// Number of morphisms in the list
    const LEN: usize;

    /// Append the signature of every morphism, in order
    fn signatures(out: &mut Vec<ArrowSignature>);
}

impl Links for () {
    const LEN: usize = 0;

    fn signatures(_out: &mut Vec<ArrowSignature>) {}
}

impl<H: Arrow, T: Links> Links for (H, T) {
    const LEN: usize = 1 + T::LEN;

    fn signatures(out: &mut Vec<ArrowSignature>) {
        out.push(ArrowSignature::of::<H>());
        T::signatures(out);
    }
}

/// Declares every morphism of a list at the tier tagged by `K`
pub trait DeclareLinks<K: TierTag>: Links {
    /// Record the capabilities of every morphism in `detector`
    fn declare(detector: &CapabilityDetector);
}

impl<K: TierTag> DeclareLinks<K> for () {
    fn declare(_detector: &CapabilityDetector) {}
}

impl<H, T> DeclareLinks<tag::Universal> for (H, T)
where
    H: Arrow,
    T: DeclareLinks<tag::Universal>,
{
    fn declare(detector: &CapabilityDetector) {
        morphism::declare_arrow::<H>(detector);
        T::declare(detector);
    }
}

impl<H, T> DeclareLinks<tag::Set> for (H, T)
where
    H: Arrow,
    H::Source: SetObject,
    H::Target: SetObject,
    T: DeclareLinks<tag::Set>,
{
    fn declare(detector: &CapabilityDetector) {
        morphism::declare_set_arrow::<H>(detector);
        T::declare(detector);
    }
}

impl<H, T> DeclareLinks<tag::Type> for (H, T)
where
    H: Arrow + Evaluate<Carrier<H::Source>>,
    H::Source: TypeObject,
    H::Target: TypeObject,
    <H as Evaluate<Carrier<H::Source>>>::Output: Into<Carrier<H::Target>>,
    T: DeclareLinks<tag::Type>,
{
    fn declare(detector: &CapabilityDetector) {
        morphism::declare_type_arrow::<H>(detector);
        T::declare(detector);
    }
}

/// Left-to-right evaluation of a morphism list
pub trait Fold<A> {
    /// Result of the last morphism
    type Output;

    /// Run every morphism once, in order
    fn fold(&self, input: A) -> Self::Output;
}

impl<A> Fold<A> for () {
    type Output = A;

    fn fold(&self, input: A) -> A {
        input
    }
}

impl<A, H, T> Fold<A> for (H, T)
where
    H: Evaluate<A>,
    T: Fold<<H as Evaluate<A>>::Output>,
{
    type Output = <T as Fold<<H as Evaluate<A>>::Output>>::Output;

    fn fold(&self, input: A) -> Self::Output {
        let next = self.0.evaluate(input);
        self.1.fold(next)
    }
}

/// Tuples of morphisms that can be composed
pub trait IntoChain: Sized + 'static {
    /// The same morphisms as a cons list
    type Links: Links;

    /// Source of the first morphism
    type Source: UniversalObject;

    /// Target of the last morphism
    type Target: UniversalObject;

    /// Rebuild the tuple as a cons list
    fn into_links(self) -> Self::Links;
}

macro_rules! cons {
    () => { () };
    ($head:ident $(, $tail:ident)*) => { ($head, cons!($($tail),*)) };
}

macro_rules! impl_into_chain {
    ($first:ident $(, $rest:ident)* ; $last:ident) => {
        impl<$first $(, $rest)*> IntoChain for ($first, $($rest,)*)
        where
            $first: Arrow,
            $($rest: Arrow,)*
        {
            type Links = cons!($first $(, $rest)*);
            type Source = <$first as Arrow>::Source;
            type Target = <$last as Arrow>::Target;

            #[allow(non_snake_case)]
            fn into_links(self) -> Self::Links {
                let ($first, $($rest,)*) = self;
                cons!($first $(, $rest)*)
            }
        }
    };
}

impl_into_chain!(M0; M0);
impl_into_chain!(M0, M1; M1);
impl_into_chain!(M0, M1, M2; M2);
impl_into_chain!(M0, M1, M2, M3; M3);
impl_into_chain!(M0, M1, M2, M3, M4; M4);
impl_into_chain!(M0, M1, M2, M3, M4, M5; M5);
impl_into_chain!(M0, M1, M2, M3, M4, M5, M6; M6);
impl_into_chain!(M0, M1, M2, M3, M4, M5, M6, M7; M7);

/// A validated composition of the morphisms in `C`, tagged with tier `K`
///
/// Owns its morphisms. Set and type tier compositions evaluate by folding.
pub struct Composed<K, C: IntoChain> {
    links: C::Links,
    signature: ChainSignature,
    _tier: PhantomData<fn() -> K>,
}

impl<K: TierTag, C: IntoChain> Composed<K, C> {
    /// Tier the chain was validated at
    pub fn tier(&self) -> Tier {
        K::TIER
    }

    /// Validated description of the chain
    pub fn signature(&self) -> &ChainSignature {
        &self.signature
    }

    /// Number of composed morphisms
    pub fn len(&self) -> usize {
        <C::Links as Links>::LEN
    }

    /// Always false: chains are never empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The composed morphisms as a cons list
    pub fn links(&self) -> &C::Links {
        &self.links
    }
}

impl<C> Composed<tag::Type, C>
where
    C: IntoChain,
    C::Source: TypeObject,
    C::Target: TypeObject,
    C::Links: Fold<Carrier<C::Source>, Output = Carrier<C::Target>>,
{
    /// Evaluate on an element of the source carrier
    pub fn apply(&self, input: Carrier<C::Source>) -> Carrier<C::Target> {
        self.links.fold(input)
    }
}

impl<K, C> Clone for Composed<K, C>
where
    C: IntoChain,
    C::Links: Clone,
{
    fn clone(&self) -> Self {
        Self {
            links: self.links.clone(),
            signature: self.signature.clone(),
            _tier: PhantomData,
        }
    }
}

impl<K: TierTag, C: IntoChain> fmt::Debug for Composed<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composed")
            .field("tier", &K::TIER)
            .field("chain", &self.signature.to_string())
            .finish()
    }
}

impl<K: TierTag, C: IntoChain> Arrow for Composed<K, C> {
    type Source = C::Source;
    type Target = C::Target;
}

impl<K, C, A> Evaluate<A> for Composed<K, C>
where
    K: Evaluating,
    C: IntoChain,
    C::Links: Fold<A>,
{
    type Output = <C::Links as Fold<A>>::Output;

    fn evaluate(&self, input: A) -> Self::Output {
        self.links.fold(input)
    }
}

fn composed_capabilities(tier: Tier) -> CapabilitySet {
    let endpoints = CapabilitySet::only(Capability::Endpoints);
    match tier {
        Tier::Universal | Tier::Set => endpoints,
        Tier::Type => endpoints
            .with(Capability::EndpointCarriers)
            .with(Capability::Evaluation),
    }
}

/// Compose `chain` at the tier tagged by `K`, declaring into `detector`
///
/// On success the composite itself is recorded as a morphism of tier `K`, so it
/// can take part in further compositions.
pub fn compose_in<K, C>(detector: &CapabilityDetector, chain: C) -> CategoryResult<Composed<K, C>>
where
    K: TierTag,
    C: IntoChain,
    C::Links: DeclareLinks<K>,
{
    <C::Links as DeclareLinks<K>>::declare(detector);

    let mut links = Vec::with_capacity(<C::Links as Links>::LEN);
    <C::Links as Links>::signatures(&mut links);
    let signature = validate_chain(detector, K::TIER, &links)?;

    detector.record_arrow(
        Signature::of::<Composed<K, C>>(),
        signature.source,
        signature.target,
        composed_capabilities(K::TIER),
    );
    debug!(tier = %K::TIER, chain = %signature, links = signature.len(), "composed chain");

    Ok(Composed {
        links: chain.into_links(),
        signature,
        _tier: PhantomData,
    })
}

/// Compose `chain` at the tier tagged by `K` using the global detector
pub fn compose<K, C>(chain: C) -> CategoryResult<Composed<K, C>>
where
    K: TierTag,
    C: IntoChain,
    C::Links: DeclareLinks<K>,
{
    compose_in(CapabilityDetector::global(), chain)
}
