// Copyright 2025 Cowboy AI, LLC.

use cim_category::{
    validate_chain, Arrow, ArrowSignature, CapabilityDetector, Category, CategoryError, Evaluate,
    Signature, Tier, TypeCategory, TypeObj, UniversalCategory,
};
use proptest::prelude::*;

type Int = TypeObj<i64>;
type Pair = TypeObj<(i64, i64)>;

fn shift(by: i64) -> impl Fn(i64) -> i64 + Clone + 'static {
    move |n| n.wrapping_add(by)
}

fn scale(by: i64) -> impl Fn(i64) -> i64 + Clone + 'static {
    move |n| n.wrapping_mul(by)
}

proptest! {
    #[test]
    fn evaluation_folds_left_to_right(x in any::<i64>(), a in any::<i64>(), b in -64_i64..64, c in any::<i64>()) {
        let cat = TypeCategory;
        let int = cat.object::<i64>();
        let f = cat.morphism(int, int, shift(a)).unwrap();
        let g = cat.morphism(int, int, scale(b)).unwrap();
        let h = cat.morphism(int, int, shift(c)).unwrap();

        let expected = h.apply(g.apply(f.apply(x)));
        let composed = cat.compose((f, g, h)).unwrap();
        prop_assert_eq!(composed.apply(x), expected);
    }

    #[test]
    fn nested_composition_agrees_with_flat(x in any::<i64>(), a in any::<i64>(), b in any::<i64>()) {
        let cat = TypeCategory;
        let int = cat.object::<i64>();
        let f = cat.morphism(int, int, shift(a)).unwrap();
        let g = cat.morphism(int, int, scale(b)).unwrap();
        let h = cat.morphism(int, int, shift(a)).unwrap();

        let flat = cat.compose((f.clone(), g.clone(), h.clone())).unwrap();
        let left = cat.compose((cat.compose((f.clone(), g.clone())).unwrap(), h.clone())).unwrap();
        let right = cat.compose((f, cat.compose((g, h)).unwrap())).unwrap();

        prop_assert_eq!(left.apply(x), flat.apply(x));
        prop_assert_eq!(right.apply(x), flat.apply(x));
    }

    #[test]
    fn singleton_behaves_like_its_morphism(x in any::<i64>(), a in any::<i64>()) {
        let cat = TypeCategory;
        let int = cat.object::<i64>();
        let f = cat.morphism(int, int, shift(a)).unwrap();

        let single = cat.compose((f.clone(),)).unwrap();
        prop_assert_eq!(single.apply(x), f.apply(x));
        prop_assert_eq!(single.len(), 1);
        prop_assert_eq!(single.signature().links[0], arrow_signature(&f));
    }

    #[test]
    fn composed_endpoints_are_first_source_and_last_target(x in any::<i64>(), y in any::<i64>()) {
        let cat = TypeCategory;
        let int = cat.object::<i64>();
        let pair = cat.object::<(i64, i64)>();
        let with = cat.morphism(int, pair, move |n: i64| (n, y)).unwrap();
        let sum = cat.morphism(pair, int, |(l, r): (i64, i64)| l.wrapping_add(r)).unwrap();
        let dup = cat.morphism(int, pair, |n: i64| (n, n)).unwrap();

        let composed = cat.compose((with, sum, dup)).unwrap();
        prop_assert_eq!(composed.signature().source, Signature::of::<Int>());
        prop_assert_eq!(composed.signature().target, Signature::of::<Pair>());
        let _: Pair = target_of(&composed);

        let total = x.wrapping_add(y);
        prop_assert_eq!(composed.evaluate(x), (total, total));
    }
}

fn target_of<M: Arrow>(_morphism: &M) -> M::Target {
    M::target()
}

fn arrow_signature<M: Arrow>(_morphism: &M) -> ArrowSignature {
    ArrowSignature::of::<M>()
}

#[derive(Debug, Default, Clone, Copy)]
struct A;
#[derive(Debug, Default, Clone, Copy)]
struct B;
#[derive(Debug, Default, Clone, Copy)]
struct C;
#[derive(Debug, Default, Clone, Copy)]
struct D;

#[test]
fn matching_chain_composes() {
    let cat = UniversalCategory;
    let ab = cat.morphism::<A, B>().unwrap();
    let bc = cat.morphism::<B, C>().unwrap();
    let cd = cat.morphism::<C, D>().unwrap();

    let composed = cat.compose((ab, bc, cd)).unwrap();
    assert_eq!(composed.signature().to_string(), "A → B → C → D");
    assert_eq!(composed.tier(), Tier::Universal);
    assert!(cat.is_morphism(&composed));
}

#[test]
fn gap_in_chain_names_first_pair() {
    let cat = UniversalCategory;
    let ab = cat.morphism::<A, B>().unwrap();
    let cd = cat.morphism::<C, D>().unwrap();

    let err = cat.compose((ab, cd)).unwrap_err();
    assert_eq!(err.offending_pair(), Some((0, 1)));
}

#[test]
fn gap_later_in_chain_names_its_pair() {
    let cat = UniversalCategory;
    let ab = cat.morphism::<A, B>().unwrap();
    let bc = cat.morphism::<B, C>().unwrap();
    let da = cat.morphism::<D, A>().unwrap();

    let err = cat.compose((ab, bc, da, ab)).unwrap_err();
    assert_eq!(err.offending_pair(), Some((1, 2)));
}

#[test]
fn eight_links_compose() {
    let cat = TypeCategory;
    let int = cat.object::<i64>();
    let inc = cat.morphism(int, int, shift(1)).unwrap();

    let composed = cat
        .compose((
            inc.clone(),
            inc.clone(),
            inc.clone(),
            inc.clone(),
            inc.clone(),
            inc.clone(),
            inc.clone(),
            inc,
        ))
        .unwrap();
    assert_eq!(composed.len(), 8);
    assert_eq!(composed.apply(0), 8);
}

#[test]
fn empty_chain_is_rejected() {
    let detector = CapabilityDetector::new();
    let err = validate_chain(&detector, Tier::Type, &[]).unwrap_err();
    assert_eq!(err, CategoryError::Arity { tier: Tier::Type });
    assert_eq!(err.required_tier(), Tier::Type);
}
