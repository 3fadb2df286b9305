//! Tile definitions and rotation expansion
//!
//! Base tiles are declared once with a symmetry class. Expansion turns each
//! one into its distinct rotations, shifting edge labels with the rotation and
//! splitting the declared weight across the variants so the total generation
//! mass of a design does not depend on how many rotations it has.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::io::configuration::DEFAULT_TILE_WEIGHT;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::side::Side;

/// Dense 0-based identifier of a tile variant within a catalog
pub type VariantId = usize;

/// Rotational symmetry of a base tile design
///
/// Determines how many distinct rotations the design yields. Classes are
/// named after the letter whose shape has the same symmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymmetryClass {
    /// Straight piece, 180° invariant: rotations 0 and 180 (class A)
    I,
    /// Corner piece: 4 rotations (class B)
    L,
    /// Junction piece, mirror symmetric left to right: 4 rotations (class C)
    T,
    /// Fully symmetric piece: 1 rotation (class D)
    X,
}

impl SymmetryClass {
    /// Number of distinct rotations the class yields
    pub const fn rotation_count(self) -> usize {
        match self {
            Self::I => 2,
            Self::L | Self::T => 4,
            Self::X => 1,
        }
    }

    /// Rotation angles in degrees, starting at 0
    pub fn rotations(self) -> impl Iterator<Item = u16> {
        let count = self.rotation_count();
        let step = 360 / count as u16;
        (0..count as u16).map(move |i| i * step)
    }

    /// Side whose label a missing label may be copied from
    ///
    /// Only sides the symmetry forces to be equal are linked.
    const fn mirror_of(self, side: Side) -> Option<Side> {
        match (self, side) {
            (Self::I, _) => Some(side.opposite()),
            (Self::T, Side::Left) => Some(Side::Right),
            (Self::T, Side::Right) => Some(Side::Left),
            _ => None,
        }
    }
}

impl FromStr for SymmetryClass {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" | "A" => Ok(Self::I),
            "L" | "B" => Ok(Self::L),
            "T" | "C" => Ok(Self::T),
            "X" | "D" => Ok(Self::X),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for SymmetryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::I => "I",
            Self::L => "L",
            Self::T => "T",
            Self::X => "X",
        };
        f.write_str(letter)
    }
}

/// A tile design as declared by a tile set, before rotation expansion
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTile {
    /// Unique design name
    pub name: String,
    /// Symmetry class as written; validated during expansion
    pub symmetry: String,
    /// Declared generation weight
    pub weight: f64,
    /// Edge labels keyed by side; may be partial
    pub edges: HashMap<Side, String>,
}

impl BaseTile {
    /// Create a base tile with default weight and no edges
    pub fn new(name: impl Into<String>, symmetry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symmetry: symmetry.into(),
            weight: DEFAULT_TILE_WEIGHT,
            edges: HashMap::new(),
        }
    }

    /// Set the generation weight
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the label on one side
    #[must_use]
    pub fn with_edge(mut self, side: Side, label: impl Into<String>) -> Self {
        self.edges.insert(side, label.into());
        self
    }

    /// Set all four labels in top, right, bottom, left order
    #[must_use]
    pub fn with_edges(mut self, labels: [&str; 4]) -> Self {
        for (side, label) in Side::ALL.into_iter().zip(labels) {
            self.edges.insert(side, label.to_string());
        }
        self
    }

    /// Resolve all four labels, inheriting from sides the symmetry forces equal
    fn resolve_edges(&self, symmetry: SymmetryClass) -> Result<[String; 4]> {
        let lookup = |side: Side| -> Option<String> {
            self.edges.get(&side).cloned().or_else(|| {
                if symmetry == SymmetryClass::X {
                    // Every side of a fully symmetric tile carries the same label
                    Side::ALL.iter().find_map(|s| self.edges.get(s).cloned())
                } else {
                    symmetry
                        .mirror_of(side)
                        .and_then(|mirror| self.edges.get(&mirror).cloned())
                }
            })
        };

        if let Some(side) = Side::ALL.into_iter().find(|&side| lookup(side).is_none()) {
            return Err(AlgorithmError::MissingEdgeLabel {
                tile: self.name.clone(),
                side,
            });
        }

        Ok(Side::ALL.map(|side| lookup(side).unwrap_or_default()))
    }
}

/// One rotation of a base tile, with its own edge labels and weight
#[derive(Debug, Clone, PartialEq)]
pub struct TileVariant {
    /// Unique variant name; the base name when the design has one rotation
    pub name: String,
    /// Name of the base design
    pub base: String,
    /// Clockwise rotation in degrees
    pub rotation: u16,
    /// Symmetry class of the base design
    pub symmetry: SymmetryClass,
    /// Share of the base weight carried by this variant
    pub weight: f64,
    /// Edge labels indexed by [`Side::index`]
    pub edges: [String; 4],
}

impl TileVariant {
    /// Edge label on the given side
    pub fn edge(&self, side: Side) -> &str {
        self.edges
            .get(side.index())
            .map_or("", std::string::String::as_str)
    }

    /// Number of clockwise quarter turns applied to the base design
    pub const fn quarter_turns(&self) -> usize {
        (self.rotation / 90) as usize
    }
}

/// Expanded, immutable set of all tile variants
#[derive(Debug, Clone)]
pub struct TileCatalog {
    variants: Vec<TileVariant>,
    weights: Vec<f64>,
    by_name: HashMap<String, VariantId>,
    base_names: Vec<String>,
}

impl TileCatalog {
    /// Expand base tiles into every distinct rotation
    ///
    /// Variant `k` of a base with `n` rotations is rotated `k * 360 / n`
    /// degrees clockwise; its label on side `s` is the base label on side
    /// `(s - k * 4 / n) mod 4`. Each variant carries `weight / n`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No base tiles are given
    /// - A symmetry class is not recognised
    /// - A side has no label after inheriting from symmetric sides
    /// - A weight is not finite and positive
    /// - Two base tiles or generated variants share a name
    pub fn expand(base_tiles: &[BaseTile]) -> Result<Self> {
        if base_tiles.is_empty() {
            return Err(AlgorithmError::EmptyCatalog);
        }

        let mut variants = Vec::new();
        let mut by_name = HashMap::new();
        let mut base_names = Vec::with_capacity(base_tiles.len());

        for base in base_tiles {
            let symmetry: SymmetryClass =
                base.symmetry
                    .parse()
                    .map_err(|class| AlgorithmError::UnknownSymmetryClass {
                        tile: base.name.clone(),
                        class,
                    })?;

            if !base.weight.is_finite() || base.weight <= 0.0 {
                return Err(AlgorithmError::InvalidWeight {
                    tile: base.name.clone(),
                    weight: base.weight,
                });
            }

            if base_names.contains(&base.name) {
                return Err(AlgorithmError::DuplicateTile {
                    name: base.name.clone(),
                });
            }
            base_names.push(base.name.clone());

            let base_edges = base.resolve_edges(symmetry)?;
            let count = symmetry.rotation_count();
            let weight = base.weight / count as f64;

            for rotation in symmetry.rotations() {
                let quarter_turns = (rotation / 90) as usize;
                let name = if count == 1 {
                    base.name.clone()
                } else {
                    format!("{} {rotation}", base.name)
                };

                let edges = Side::ALL.map(|side| {
                    let source = Side::from_index(side.index() + 4 - quarter_turns);
                    base_edges
                        .get(source.index())
                        .cloned()
                        .unwrap_or_default()
                });

                if by_name.insert(name.clone(), variants.len()).is_some() {
                    return Err(AlgorithmError::DuplicateTile { name });
                }

                variants.push(TileVariant {
                    name,
                    base: base.name.clone(),
                    rotation,
                    symmetry,
                    weight,
                    edges,
                });
            }
        }

        let weights = variants.iter().map(|variant| variant.weight).collect();

        Ok(Self {
            variants,
            weights,
            by_name,
            base_names,
        })
    }

    /// Number of variants
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the catalog holds no variants
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// All variants in id order
    pub fn variants(&self) -> &[TileVariant] {
        &self.variants
    }

    /// Variant by id
    pub fn get(&self, id: VariantId) -> Option<&TileVariant> {
        self.variants.get(id)
    }

    /// Variant weights in id order
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight of a variant, zero for unknown ids
    pub fn weight(&self, id: VariantId) -> f64 {
        self.weights.get(id).copied().unwrap_or(0.0)
    }

    /// Variant name by id
    pub fn name(&self, id: VariantId) -> Option<&str> {
        self.variants.get(id).map(|variant| variant.name.as_str())
    }

    /// Look up a variant id by name
    ///
    /// # Errors
    ///
    /// Returns an error if no variant has this name
    pub fn id_of(&self, name: &str) -> Result<VariantId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| AlgorithmError::UnknownTile {
                name: name.to_string(),
            })
    }

    /// Names of the base designs in declaration order
    pub fn base_names(&self) -> &[String] {
        &self.base_names
    }

    /// Ids of all variants expanded from one base design
    pub fn variants_of<'a>(&'a self, base: &'a str) -> impl Iterator<Item = VariantId> + 'a {
        self.variants
            .iter()
            .enumerate()
            .filter(move |(_, variant)| variant.base == base)
            .map(|(id, _)| id)
    }
}
