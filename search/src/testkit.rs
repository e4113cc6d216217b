//! Small recipe graphs shared by the unit tests.

use alchemist_kernel::graph::{RecipeGraph, RecipeGraphBuilder, BASE_ELEMENT_NAMES};

fn bases() -> RecipeGraphBuilder {
    let mut b = RecipeGraphBuilder::new();
    for name in BASE_ELEMENT_NAMES {
        b.element(name, 0).unwrap();
        b.primordial(name).unwrap();
    }
    b
}

/// Base elements plus `Mud = Earth + Water` (tier 1).
pub(crate) fn mud_graph() -> RecipeGraph {
    let mut b = bases();
    b.element("Mud", 1).unwrap();
    b.recipe("Mud", "Earth", "Water").unwrap();
    b.build().unwrap()
}

/// Like [`mud_graph`] but Mud also lists the mirrored `Water + Earth`.
pub(crate) fn mirrored_mud_graph() -> RecipeGraph {
    let mut b = bases();
    b.element("Mud", 1).unwrap();
    b.recipe("Mud", "Earth", "Water").unwrap();
    b.recipe("Mud", "Water", "Earth").unwrap();
    b.build().unwrap()
}

/// The workshop graph:
///
/// ```text
/// tier 1  Mud = Earth+Water   Lava = Earth+Fire   Pressure = Air+Air
///         Time = Air+Fire     Void (no recipe)
/// tier 2  Stone = Lava+Air | Earth+Pressure       Shadow = Void+Air
///         Bird = Egg+Air | Air+Lava               Egg = Bird+Stone
/// tier 3  Wall = Stone+Mud                        Clock = Time+Air | Stone+Fire
/// tier 4  House = Wall+Wall
/// ```
///
/// Stone has two derivations, so Wall has two and House has four ordered
/// combinations (three distinct trees). Egg and Bird reference each other
/// at the same tier.
pub(crate) fn workshop_graph() -> RecipeGraph {
    let mut b = bases();
    for (name, tier) in [
        ("Mud", 1),
        ("Lava", 1),
        ("Pressure", 1),
        ("Time", 1),
        ("Void", 1),
        ("Stone", 2),
        ("Shadow", 2),
        ("Bird", 2),
        ("Egg", 2),
        ("Wall", 3),
        ("Clock", 3),
        ("House", 4),
    ] {
        b.element(name, tier).unwrap();
    }
    for (result, first, second) in [
        ("Mud", "Earth", "Water"),
        ("Lava", "Earth", "Fire"),
        ("Pressure", "Air", "Air"),
        ("Time", "Air", "Fire"),
        ("Stone", "Lava", "Air"),
        ("Stone", "Earth", "Pressure"),
        ("Shadow", "Void", "Air"),
        ("Bird", "Egg", "Air"),
        ("Bird", "Air", "Lava"),
        ("Egg", "Bird", "Stone"),
        ("Wall", "Stone", "Mud"),
        ("Clock", "Time", "Air"),
        ("Clock", "Stone", "Fire"),
        ("House", "Wall", "Wall"),
    ] {
        b.recipe(result, first, second).unwrap();
    }
    b.build().unwrap()
}
