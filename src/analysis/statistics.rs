//! Placement statistics of a generated grid

use std::collections::HashMap;

use crate::spatial::grid::Grid;
use crate::spatial::tiles::{TileCatalog, VariantId};

/// How often one variant or base tile was placed
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementShare {
    /// Variant or base tile name
    pub name: String,
    /// Number of collapsed cells holding it
    pub count: usize,
    /// `count` over all collapsed cells
    pub observed: f64,
    /// Its weight over the catalog's total weight
    pub expected: f64,
}

impl PlacementShare {
    /// Observed minus expected share
    pub fn deviation(&self) -> f64 {
        self.observed - self.expected
    }
}

/// Variant and base tile counts over the collapsed cells of a grid
#[derive(Debug, Clone)]
pub struct PlacementStatistics {
    /// Collapsed cells counted
    pub collapsed: usize,
    /// One entry per catalog variant, in id order
    pub variants: Vec<PlacementShare>,
    /// One entry per base tile, in declaration order
    pub bases: Vec<PlacementShare>,
}

impl PlacementStatistics {
    /// Count placements in `grid`, ignoring cells that are not collapsed
    ///
    /// Expected shares come from the catalog weights, which is what a
    /// constraint-free run would converge to. Adjacency rules skew the
    /// observed shares away from them.
    pub fn from_grid(grid: &Grid, catalog: &TileCatalog) -> Self {
        let mut counts = vec![0usize; catalog.len()];
        for (_, cell) in grid.iter() {
            if let Some(count) = cell.collapsed_variant().and_then(|v| counts.get_mut(v)) {
                *count += 1;
            }
        }

        let collapsed: usize = counts.iter().sum();
        let total_weight: f64 = catalog.weights().iter().sum();
        let share = |part: f64, whole: f64| if whole > 0.0 { part / whole } else { 0.0 };

        let variants: Vec<PlacementShare> = catalog
            .variants()
            .iter()
            .zip(&counts)
            .map(|(variant, &count)| PlacementShare {
                name: variant.name.clone(),
                count,
                observed: share(count as f64, collapsed as f64),
                expected: share(variant.weight, total_weight),
            })
            .collect();

        let mut by_base: HashMap<&str, (usize, f64)> = HashMap::new();
        for (variant, &count) in catalog.variants().iter().zip(&counts) {
            let entry = by_base.entry(variant.base.as_str()).or_default();
            entry.0 += count;
            entry.1 += variant.weight;
        }
        let bases = catalog
            .base_names()
            .iter()
            .map(|base| {
                let (count, weight) = by_base.get(base.as_str()).copied().unwrap_or_default();
                PlacementShare {
                    name: base.clone(),
                    count,
                    observed: share(count as f64, collapsed as f64),
                    expected: share(weight, total_weight),
                }
            })
            .collect();

        Self {
            collapsed,
            variants,
            bases,
        }
    }

    /// Share entry for a variant id
    pub fn variant(&self, id: VariantId) -> Option<&PlacementShare> {
        self.variants.get(id)
    }

    /// Share entry for a base tile name
    pub fn base(&self, name: &str) -> Option<&PlacementShare> {
        self.bases.iter().find(|share| share.name == name)
    }

    /// Largest absolute gap between observed and expected base shares
    pub fn max_base_deviation(&self) -> f64 {
        self.bases
            .iter()
            .map(|share| share.deviation().abs())
            .fold(0.0, f64::max)
    }
}
