//! Int/Text Scenario - CIM Category
//!
//! Declares two type objects, one for integers and one for text, and two
//! morphisms between them. Composing them yields "number of decimal digits".
//! Composing the rendering with itself is rejected before anything runs.
//!
//! Key concepts demonstrated:
//! - Declaring custom type objects
//! - Building type morphisms from plain functions
//! - Composition and its definition-time checks

use std::any::Any;

use anyhow::Result;
use cim_category::{Category, CategoryError, SetObject, TypeCategory, TypeObject};

/// Integers
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

/// Text
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

fn main() -> Result<()> {
    println!("=== Int/Text Scenario ===\n");

    let cat = TypeCategory;
    let int = cat.declare_object::<IntObj>()?;
    let text = cat.declare_object::<StrObj>()?;
    println!("declared objects: {int:?}, {text:?}");

    let render = cat.morphism(int, text, |n: i64| n.to_string())?;
    let length = cat.morphism(text, int, |s: String| s.len() as i64)?;

    let digits = cat.compose((render.clone(), length))?;
    println!("composed: {}", digits.signature());
    for n in [5, 123, -42, 1_000_000] {
        println!("  digits({n}) = {}", digits.apply(n));
    }

    println!("\n--- Rejected composition ---");
    match cat.compose((render.clone(), render)) {
        Ok(_) => anyhow::bail!("rendering twice should not compose"),
        Err(err @ CategoryError::Composability { .. }) => {
            let (first, second) = err.offending_pair().unwrap_or_default();
            println!("  pair ({first}, {second}): {err}");
        }
        Err(other) => return Err(other.into()),
    }

    println!("\n=== Done ===");
    Ok(())
}
