// Copyright 2025 Cowboy AI, LLC.

//! Capability detection for objects and morphisms
//!
//! A capability is a piece of structure a type supports: a default
//! constructor, a membership predicate, a carrier type, declared endpoints and
//! so on. Rust offers no structural reflection, so the detector is an explicit
//! registry keyed by [`TypeId`]. Capabilities are recorded when a type is
//! declared through an entry point whose trait bounds prove them, and every
//! classifier in the crate is expressed purely in terms of [`CapabilityDetector::probe`].
//!
//! Probing is total: a type that was never declared simply has no
//! capabilities.

use dashmap::DashMap;
use serde::{Deserialize, Serialize, Serializer};
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use tracing::{debug, trace};

use crate::tier::Tier;

/// Structural identity of a type
///
/// Two signatures are equal exactly when they describe the same type; the name
/// is carried along for diagnostics only.
#[derive(Clone, Copy)]
pub struct Signature {
    type_id: TypeId,
    name: &'static str,
}

impl Signature {
    /// Signature of `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Signature of the type of `value`
    pub fn of_val<T: ?Sized + 'static>(_value: &T) -> Self {
        Self::of::<T>()
    }

    /// The type's identity
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without module paths, e.g. `TypeObj<i64>`
    pub fn short_name(&self) -> String {
        let mut short = String::with_capacity(self.name.len());
        let mut segment = String::new();
        for ch in self.name.chars() {
            match ch {
                ':' => segment.clear(),
                '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' => {
                    short.push_str(&segment);
                    segment.clear();
                    short.push(ch);
                }
                _ => segment.push(ch),
            }
        }
        short.push_str(&segment);
        short
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Signature {}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.name)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// A named structural expression a type may support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Trivially default-constructible: `Default + Copy`
    DefaultConstructible,
    /// Carries no state: zero-sized
    Stateless,
    /// Static element-membership predicate
    Membership,
    /// Associated carrier type
    Carrier,
    /// Static `source()` and `target()` operations
    Endpoints,
    /// Endpoints expose carrier types
    EndpointCarriers,
    /// Evaluation invocable on the source carrier, converting to the target carrier
    Evaluation,
}

impl Capability {
    /// Every capability, in declaration order
    pub const ALL: [Capability; 7] = [
        Capability::DefaultConstructible,
        Capability::Stateless,
        Capability::Membership,
        Capability::Carrier,
        Capability::Endpoints,
        Capability::EndpointCarriers,
        Capability::Evaluation,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of capabilities
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    /// The empty set
    pub const EMPTY: CapabilitySet = CapabilitySet(0);

    /// Set holding a single capability
    pub const fn only(capability: Capability) -> Self {
        CapabilitySet(capability.bit())
    }

    /// Add a capability
    pub fn insert(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, capability: Capability) -> Self {
        self.insert(capability);
        self
    }

    /// Whether the set holds `capability`
    pub fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Union of both sets
    pub fn union(self, other: CapabilitySet) -> Self {
        CapabilitySet(self.0 | other.0)
    }

    /// Whether every capability of `other` is also in `self`
    pub fn is_superset(self, other: CapabilitySet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the set is empty
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the contained capabilities
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CapabilitySet::EMPTY, |set, capability| set.with(capability))
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Everything the detector knows about one type
#[derive(Debug, Clone)]
pub struct TypeProfile {
    /// The type described by this profile
    pub signature: Signature,
    /// Declared capabilities
    pub capabilities: CapabilitySet,
    /// Declared `(source, target)` objects, for morphisms
    pub endpoints: Option<(Signature, Signature)>,
    /// Carrier type, for type objects
    pub carrier: Option<Signature>,
}

impl TypeProfile {
    fn new(signature: Signature) -> Self {
        Self {
            signature,
            capabilities: CapabilitySet::EMPTY,
            endpoints: None,
            carrier: None,
        }
    }
}

/// What a memoised verdict classifies a type as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictKind {
    /// Object tier
    Object,
    /// Morphism tier
    Morphism,
}

/// Registry of declared capabilities and memoised classification verdicts
pub struct CapabilityDetector {
    profiles: DashMap<TypeId, TypeProfile>,
    verdicts: DashMap<(TypeId, VerdictKind), Option<Tier>>,
    // bumped on every capability change
    generation: AtomicU64,
}

impl CapabilityDetector {
    /// Create an empty detector
    pub fn new() -> Self {
        Self {
            profiles: DashMap::new(),
            verdicts: DashMap::new(),
            generation: AtomicU64::new(0),
        }
    }

    /// The process-wide detector used by constructors, registries and composition
    pub fn global() -> &'static CapabilityDetector {
        static GLOBAL: OnceLock<CapabilityDetector> = OnceLock::new();
        GLOBAL.get_or_init(CapabilityDetector::new)
    }

    /// Whether `signature` supports `capability`
    pub fn probe(&self, signature: &Signature, capability: Capability) -> bool {
        self.profiles
            .get(&signature.type_id())
            .is_some_and(|profile| profile.capabilities.contains(capability))
    }

    /// All capabilities declared for `signature`
    pub fn capabilities(&self, signature: &Signature) -> CapabilitySet {
        self.profiles
            .get(&signature.type_id())
            .map(|profile| profile.capabilities)
            .unwrap_or_default()
    }

    /// Snapshot of the profile of `signature`
    pub fn profile(&self, signature: &Signature) -> Option<TypeProfile> {
        self.profiles
            .get(&signature.type_id())
            .map(|profile| profile.clone())
    }

    /// Declared `(source, target)` objects of a morphism
    pub fn endpoints(&self, signature: &Signature) -> Option<(Signature, Signature)> {
        self.profiles
            .get(&signature.type_id())
            .and_then(|profile| profile.endpoints)
    }

    /// Declared carrier of a type object
    pub fn carrier(&self, signature: &Signature) -> Option<Signature> {
        self.profiles
            .get(&signature.type_id())
            .and_then(|profile| profile.carrier)
    }

    /// Record capabilities for `signature`
    ///
    /// Capabilities only accumulate. Returns whether anything new was learned.
    pub fn record(&self, signature: Signature, capabilities: CapabilitySet) -> bool {
        self.update(signature, |profile| {
            profile.capabilities = profile.capabilities.union(capabilities);
        })
    }

    /// Record a morphism together with its declared endpoints
    pub fn record_arrow(
        &self,
        signature: Signature,
        source: Signature,
        target: Signature,
        capabilities: CapabilitySet,
    ) -> bool {
        self.update(signature, |profile| {
            profile.capabilities = profile.capabilities.union(capabilities);
            profile.endpoints = Some((source, target));
        })
    }

    /// Record a type object together with its carrier
    pub fn record_carrier(
        &self,
        signature: Signature,
        carrier: Signature,
        capabilities: CapabilitySet,
    ) -> bool {
        self.update(signature, |profile| {
            profile.capabilities = profile.capabilities.union(capabilities);
            profile.carrier = Some(carrier);
        })
    }

    /// Return the memoised verdict for `signature`, computing it on a miss
    ///
    /// `compute` runs without any map lock held, so it may probe the detector
    /// again (morphism verdicts depend on endpoint verdicts).
    pub fn memoize(
        &self,
        signature: &Signature,
        kind: VerdictKind,
        compute: impl FnOnce() -> Option<Tier>,
    ) -> Option<Tier> {
        let key = (signature.type_id(), kind);
        let cached = self.verdicts.get(&key).map(|verdict| *verdict);
        if let Some(verdict) = cached {
            trace!(type_name = signature.name(), ?kind, ?verdict, "verdict cache hit");
            return verdict;
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let verdict = compute();
        self.verdicts.insert(key, verdict);
        if self.generation.load(Ordering::SeqCst) != generation {
            // computed against capabilities that have since changed
            self.verdicts.remove(&key);
        }
        verdict
    }

    /// Number of declared types
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether no type has been declared
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    fn update(&self, signature: Signature, apply: impl FnOnce(&mut TypeProfile)) -> bool {
        let changed = {
            let mut profile = self
                .profiles
                .entry(signature.type_id())
                .or_insert_with(|| TypeProfile::new(signature));
            let before = (profile.capabilities, profile.endpoints, profile.carrier);
            apply(&mut profile);
            before != (profile.capabilities, profile.endpoints, profile.carrier)
        };

        if changed {
            // any verdict may depend on this type through morphism endpoints
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.verdicts.clear();
            debug!(
                type_name = signature.name(),
                capabilities = ?self.capabilities(&signature),
                "declared capabilities"
            );
        }
        changed
    }
}

impl Default for CapabilityDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CapabilityDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityDetector")
            .field("types", &self.profiles.len())
            .field("verdicts", &self.verdicts.len())
            .finish()
    }
}
