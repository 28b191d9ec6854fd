// Copyright 2025 Cowboy AI, LLC.

//! Category registries
//!
//! One registry per tier. Each answers whether a value is an object or a
//! morphism of its tier and composes chains at that tier, so the composite is
//! itself classified as a morphism of the same tier. [`TypeCategory`] is the
//! usual entry point for declaring objects and morphisms.

use super::composition::{self, Composed, DeclareLinks, IntoChain};
use super::constructors::{SetMorphism, TypeMorphism, UniversalMorphism};
use super::morphism;
use super::object::{self, Carrier, SetObject, TypeObj, TypeObject, UniversalObject};
use crate::capability::{CapabilityDetector, Signature};
use crate::errors::CategoryResult;
use crate::tier::tag::{self, TierTag};
use crate::tier::Tier;

/// A category scoped to one tier
pub trait Category {
    /// Type-level tag of the tier
    type Tag: TierTag;

    /// The tier this category checks
    fn tier(&self) -> Tier {
        <Self::Tag as TierTag>::TIER
    }

    /// Whether `object` is an object of this category
    fn is_object<O: 'static>(&self, _object: &O) -> bool {
        object::satisfies(
            CapabilityDetector::global(),
            &Signature::of::<O>(),
            <Self::Tag as TierTag>::TIER,
        )
    }

    /// Whether `morphism` is a morphism of this category
    fn is_morphism<M: 'static>(&self, _morphism: &M) -> bool {
        morphism::satisfies(
            CapabilityDetector::global(),
            &Signature::of::<M>(),
            <Self::Tag as TierTag>::TIER,
        )
    }

    /// Compose a chain of one to eight morphisms of this category
    fn compose<C>(&self, chain: C) -> CategoryResult<Composed<Self::Tag, C>>
    where
        C: IntoChain,
        C::Links: DeclareLinks<Self::Tag>,
    {
        composition::compose::<Self::Tag, C>(chain)
    }
}

/// Category of stateless markers and the arrows between them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniversalCategory;

impl Category for UniversalCategory {
    type Tag = tag::Universal;
}

impl UniversalCategory {
    /// Declare `O` as a universal object and return the marker
    pub fn declare_object<O: UniversalObject>(&self) -> CategoryResult<O> {
        let detector = CapabilityDetector::global();
        let signature = object::declare_universal_object::<O>(detector);
        object::require_object(detector, &signature, Tier::Universal)?;
        Ok(O::default())
    }

    /// Build the arrow from `Src` to `Trg`
    pub fn morphism<Src, Trg>(&self) -> CategoryResult<UniversalMorphism<Src, Trg>>
    where
        Src: UniversalObject,
        Trg: UniversalObject,
    {
        UniversalMorphism::new()
    }
}

/// Category of objects with membership predicates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetCategory;

impl Category for SetCategory {
    type Tag = tag::Set;
}

impl SetCategory {
    /// Declare `O` as a set object and return the marker
    pub fn declare_object<O: SetObject>(&self) -> CategoryResult<O> {
        let detector = CapabilityDetector::global();
        let signature = object::declare_set_object::<O>(detector);
        object::require_object(detector, &signature, Tier::Set)?;
        Ok(O::default())
    }

    /// Build a set morphism from `Src` to `Trg` evaluated by `fun`
    pub fn morphism<Src, Trg, F>(
        &self,
        _source: Src,
        _target: Trg,
        fun: F,
    ) -> CategoryResult<SetMorphism<Src, Trg, F>>
    where
        Src: SetObject,
        Trg: SetObject,
        F: 'static,
    {
        SetMorphism::new(fun)
    }
}

/// Category of carrier types and the functions between them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeCategory;

impl Category for TypeCategory {
    type Tag = tag::Type;
}

impl TypeCategory {
    /// Wrap carrier `T` as its canonical type object
    pub fn object<T: 'static>(&self) -> TypeObj<T> {
        object::declare_type_object::<TypeObj<T>>(CapabilityDetector::global());
        TypeObj::new()
    }

    /// Declare `O` as a type object and return the marker
    pub fn declare_object<O: TypeObject>(&self) -> CategoryResult<O> {
        let detector = CapabilityDetector::global();
        let signature = object::declare_type_object::<O>(detector);
        object::require_object(detector, &signature, Tier::Type)?;
        Ok(O::default())
    }

    /// Build the type morphism from `source` to `target` evaluated by `fun`
    ///
    /// `fun` must accept the source carrier and return a value convertible to
    /// the target carrier.
    pub fn morphism<Src, Trg, F, R>(
        &self,
        _source: Src,
        _target: Trg,
        fun: F,
    ) -> CategoryResult<TypeMorphism<Src, Trg, F>>
    where
        Src: TypeObject,
        Trg: TypeObject,
        F: Fn(Carrier<Src>) -> R + 'static,
        R: Into<Carrier<Trg>>,
    {
        TypeMorphism::new(fun)
    }
}
