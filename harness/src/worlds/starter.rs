//! `Starter`: a small hand-written recipe world.
//!
//! Every search mode has at least one scenario here:
//!
//! | element | shape                                                    |
//! |---------|----------------------------------------------------------|
//! | Mud     | one recipe from base elements                            |
//! | Steam   | the same recipe listed in both orders                    |
//! | Stone   | two recipes (Lava+Air, Earth+Pressure)                   |
//! | Wall    | Stone+Mud, so two derivations                            |
//! | House   | Wall+Wall, four ordered combinations, three distinct     |
//! | Clock   | Time+Air first; Time is excluded by the default policy   |
//! | Shadow  | needs Void, which has no recipe                          |
//! | Egg     | needs Bird at its own tier                               |
//! | Bird    | Egg+Air is skipped, Air+Lava resolves                    |

use std::collections::BTreeMap;

use alchemist_kernel::graph::BASE_ELEMENT_NAMES;
use alchemist_kernel::snapshot::RecipeSnapshot;

const TIERED: &[(&str, u32)] = &[
    ("Mud", 1),
    ("Steam", 1),
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
];

const RECIPES: &[(&str, &str, &str)] = &[
    ("Mud", "Earth", "Water"),
    ("Steam", "Water", "Fire"),
    ("Steam", "Fire", "Water"),
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
];

/// The starter world as a snapshot, in the same shape the ingestion step
/// writes.
#[must_use]
pub fn starter_snapshot() -> RecipeSnapshot {
    let mut element: Vec<String> = BASE_ELEMENT_NAMES.iter().map(|n| (*n).to_string()).collect();
    let mut recipe: BTreeMap<String, Vec<[String; 2]>> = BASE_ELEMENT_NAMES
        .iter()
        .map(|n| ((*n).to_string(), vec![[String::new(), String::new()]]))
        .collect();
    let mut tiering = BTreeMap::new();
    let mut icon = BTreeMap::new();

    for &(name, tier) in TIERED {
        element.push(name.to_string());
        tiering.insert(name.to_string(), tier);
        icon.insert(name.to_string(), format!("icons/{name}.webp"));
    }
    for &(result, first, second) in RECIPES {
        recipe
            .entry(result.to_string())
            .or_default()
            .push([first.to_string(), second.to_string()]);
    }

    RecipeSnapshot {
        element,
        recipe,
        tiering,
        icon,
    }
}
