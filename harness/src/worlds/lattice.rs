//! `Lattice`: parameterized synthetic recipe worlds for stress tests and
//! benchmarks.
//!
//! Tier `t` holds `width` elements named `T{t}E{i}`. Each element gets
//! `recipes` recipes whose ingredients are drawn from tier `t - 1` (the base
//! elements for tier 1), so every recipe satisfies the tier rule and every
//! element is derivable. Derivation counts grow quickly with `recipes`.

use std::collections::BTreeMap;

use alchemist_kernel::graph::BASE_ELEMENT_NAMES;
use alchemist_kernel::snapshot::RecipeSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeConfig {
    pub tiers: u32,
    pub width: usize,
    pub recipes: usize,
}

impl LatticeConfig {
    /// Name of the element at `index` in `tier`.
    #[must_use]
    pub fn element_name(tier: u32, index: usize) -> String {
        format!("T{tier}E{index}")
    }

    /// The first element of the top tier.
    #[must_use]
    pub fn apex(&self) -> String {
        Self::element_name(self.tiers, 0)
    }
}

/// Build the snapshot for `config`. Deterministic.
#[must_use]
pub fn lattice_snapshot(config: &LatticeConfig) -> RecipeSnapshot {
    let mut element: Vec<String> = BASE_ELEMENT_NAMES.iter().map(|n| (*n).to_string()).collect();
    let mut recipe: BTreeMap<String, Vec<[String; 2]>> = BASE_ELEMENT_NAMES
        .iter()
        .map(|n| ((*n).to_string(), vec![[String::new(), String::new()]]))
        .collect();
    let mut tiering = BTreeMap::new();

    let mut previous: Vec<String> = element.clone();
    for tier in 1..=config.tiers {
        let mut current = Vec::with_capacity(config.width);
        for i in 0..config.width {
            let name = LatticeConfig::element_name(tier, i);
            let pairs = (0..config.recipes)
                .map(|r| {
                    let first = &previous[(i + r) % previous.len()];
                    let second = &previous[(i + 2 * r + 1) % previous.len()];
                    [first.clone(), second.clone()]
                })
                .collect();
            recipe.insert(name.clone(), pairs);
            tiering.insert(name.clone(), tier);
            element.push(name.clone());
            current.push(name);
        }
        previous = current;
    }

    RecipeSnapshot {
        element,
        recipe,
        tiering,
        icon: BTreeMap::new(),
    }
}
