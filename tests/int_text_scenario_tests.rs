// Copyright 2025 Cowboy AI, LLC.

use std::any::Any;

use cim_category::{
    is_type_morphism, Arrow, Category, CategoryError, Evaluate, SetObject, Signature, Tier,
    TypeCategory, TypeObject,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Default, Clone, Copy)]
struct IntObj;

impl SetObject for IntObj {
    fn is_element(candidate: &dyn Any) -> bool {
        candidate.is::<i64>()
    }
}

impl TypeObject for IntObj {
    type Carrier = i64;
}

#[derive(Debug, Default, Clone, Copy)]
struct StrObj;

impl SetObject for StrObj {
    fn is_element(candidate: &dyn Any) -> bool {
        candidate.is::<String>()
    }
}

impl TypeObject for StrObj {
    type Carrier = String;
}

fn to_text(n: i64) -> String {
    n.to_string()
}

fn length(s: String) -> i64 {
    s.len() as i64
}

fn source_of<M: Arrow>(_morphism: &M) -> M::Source {
    M::source()
}

#[test]
fn declared_objects_are_type_objects() {
    let cat = TypeCategory;
    let int = cat.declare_object::<IntObj>().unwrap();
    let text = cat.declare_object::<StrObj>().unwrap();

    assert!(cat.is_object(&int));
    assert!(cat.is_object(&text));
    assert!(IntObj::is_element(&7_i64));
    assert!(!IntObj::is_element(&"7".to_string()));
}

#[test]
fn text_length_of_decimal_rendering() {
    let cat = TypeCategory;
    let int = cat.declare_object::<IntObj>().unwrap();
    let text = cat.declare_object::<StrObj>().unwrap();

    let f = cat.morphism(int, text, to_text as fn(i64) -> String).unwrap();
    let g = cat.morphism(text, int, length as fn(String) -> i64).unwrap();
    assert_eq!(f.apply(42), "42");
    assert_eq!(g.apply("abcd".to_string()), 4);

    let digits = cat.compose((f, g)).unwrap();
    assert_eq!(digits.apply(5), 1);
    assert_eq!(digits.apply(123), 3);
    assert_eq!(digits.evaluate(-10_i64), 3);

    let _: IntObj = source_of(&digits);
    assert_eq!(digits.signature().source, Signature::of::<IntObj>());
    assert_eq!(digits.signature().target, Signature::of::<IntObj>());
    assert_eq!(digits.signature().to_string(), "IntObj → StrObj → IntObj");
    assert!(cat.is_morphism(&digits));
}

#[test]
fn repeating_the_rendering_is_not_composable() {
    let cat = TypeCategory;
    let int = cat.declare_object::<IntObj>().unwrap();
    let text = cat.declare_object::<StrObj>().unwrap();
    let f = cat.morphism(int, text, to_text as fn(i64) -> String).unwrap();

    let err = cat.compose((f.clone(), f)).unwrap_err();
    assert_eq!(err.offending_pair(), Some((0, 1)));
    match &err {
        CategoryError::Composability { target, next_source, .. } => {
            assert_eq!(target, "StrObj");
            assert_eq!(next_source, "IntObj");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.is_validation_error());
}

#[test]
fn morphisms_are_type_tier() {
    let cat = TypeCategory;
    let int = cat.declare_object::<IntObj>().unwrap();
    let text = cat.declare_object::<StrObj>().unwrap();
    let f = cat.morphism(int, text, to_text as fn(i64) -> String).unwrap();

    assert!(is_type_morphism::<cim_category::TypeMorphism<IntObj, StrObj, fn(i64) -> String>>());
    assert_eq!(cat.tier(), Tier::Type);
    assert!(cat.is_morphism(&f));
}

#[test]
fn closures_over_canonical_type_objects() {
    let cat = TypeCategory;
    let int = cat.object::<i64>();
    let text = cat.object::<String>();

    let f = cat.morphism(int, text, |n: i64| n.to_string()).unwrap();
    let g = cat.morphism(text, int, |s: String| s.len() as i64).unwrap();
    assert_eq!(format!("{f:?}"), "TypeMorphism(TypeObj<i64> → TypeObj<String>)");

    let digits = cat.compose((f, g)).unwrap();
    assert_eq!(digits.apply(5), 1);
    assert_eq!(digits.apply(123), 3);
}
