//! Compatibility rules derived from edge labels

use crate::algorithm::bitset::TileBitset;
use crate::spatial::side::Side;
use crate::spatial::tiles::{TileCatalog, VariantId};

/// For every variant and side, the set of variants allowed on that side
///
/// Variant `b` is allowed on side `s` of `a` iff `a`'s label on `s` equals
/// `b`'s label on the opposite side, so the relation is symmetric by
/// construction. A catalog built by [`TileCatalog::expand`] holds each variant's
/// half turn, which matches it on every side, so no entry of such an index is
/// empty.
#[derive(Debug, Clone)]
pub struct AdjacencyIndex {
    allowed: Vec<[TileBitset; 4]>,
    variant_count: usize,
}

impl AdjacencyIndex {
    /// Derive the index from a catalog by comparing every ordered pair
    pub fn build(catalog: &TileCatalog) -> Self {
        let variant_count = catalog.len();
        let variants = catalog.variants();

        let allowed = variants
            .iter()
            .map(|first| {
                Side::ALL.map(|side| {
                    let mut permitted = TileBitset::new(variant_count);
                    for (id, second) in variants.iter().enumerate() {
                        if first.edge(side) == second.edge(side.opposite()) {
                            permitted.insert(id);
                        }
                    }
                    permitted
                })
            })
            .collect();

        Self {
            allowed,
            variant_count,
        }
    }

    /// Number of variants the index covers
    pub const fn variant_count(&self) -> usize {
        self.variant_count
    }

    /// Variants allowed on `side` of `variant`; empty for unknown ids
    pub fn allowed(&self, variant: VariantId, side: Side) -> TileBitset {
        self.allowed_ref(variant, side)
            .cloned()
            .unwrap_or_else(|| TileBitset::new(self.variant_count))
    }

    /// Borrowing form of [`Self::allowed`]
    pub fn allowed_ref(&self, variant: VariantId, side: Side) -> Option<&TileBitset> {
        self.allowed
            .get(variant)
            .and_then(|sides| sides.get(side.index()))
    }

    /// Whether `neighbor` may sit on `side` of `variant`
    pub fn is_allowed(&self, variant: VariantId, side: Side, neighbor: VariantId) -> bool {
        self.allowed_ref(variant, side)
            .is_some_and(|permitted| permitted.contains(neighbor))
    }

    /// Union of the variants allowed on `side` of any variant in `domain`
    ///
    /// This is the support a neighbour on that side keeps during propagation.
    pub fn supported_by(&self, domain: &TileBitset, side: Side) -> TileBitset {
        let mut support = TileBitset::new(self.variant_count);
        for variant in domain.iter() {
            if let Some(permitted) = self.allowed_ref(variant, side) {
                support.union_with(permitted);
            }
        }
        support
    }
}
