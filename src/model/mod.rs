//! Structural data model: atoms, residues, chains, bonds.
//!
//! A [`StructuralModel`] stores per-atom attributes in parallel arrays
//! indexed by *local* atom index (the atom's position within its own
//! structure). Residues cover contiguous half-open atom ranges, chains
//! cover contiguous half-open residue ranges, and both sequences are
//! strictly increasing — the ordering invariant that lets mutation
//! recompute range bounds with a min/max scan instead of a full re-sort.
//!
//! Models are produced by an external [`StructureParser`]
//! (`crate::engine::StructureParser`), transformed (never mutated in
//! place) by [`rebuild`](rebuild::rebuild) on atom deletion, and merged
//! into a global index space by [`Scene`](crate::scene::Scene).

mod element;
pub mod rebuild;

pub use element::Element;
use glam::Vec3;

// ---------------------------------------------------------------------------
// Bond
// ---------------------------------------------------------------------------

/// An unordered covalent bond between two local atom indices.
///
/// Stored canonically with `a < b` so that equality and dedup work without
/// order sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    /// Lower atom index.
    pub a: usize,
    /// Higher atom index.
    pub b: usize,
}

impl Bond {
    /// Build a canonical bond from an unordered index pair.
    #[must_use]
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }

    /// Whether either endpoint is `atom`.
    #[must_use]
    pub fn touches(&self, atom: usize) -> bool {
        self.a == atom || self.b == atom
    }
}

// ---------------------------------------------------------------------------
// Residue / Chain
// ---------------------------------------------------------------------------

/// Back-references from a residue to its named backbone atoms, by local
/// atom index. `None` means the atom is absent (or was removed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackboneRefs {
    /// Backbone amide nitrogen (`N`).
    pub n: Option<usize>,
    /// Alpha carbon (`CA`).
    pub ca: Option<usize>,
    /// Backbone carbonyl carbon (`C`).
    pub c: Option<usize>,
}

/// A residue: a contiguous half-open range of local atom indices plus
/// identity metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    /// Three-letter residue name (e.g. `ALA`, `HOH`).
    pub name: String,
    /// Author sequence number.
    pub seq: i32,
    /// First atom index (inclusive).
    pub atom_start: usize,
    /// One past the last atom index (exclusive).
    pub atom_end: usize,
    /// Named backbone atom back-references.
    pub backbone: BackboneRefs,
}

impl Residue {
    /// Number of atoms in the residue's range.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.atom_end - self.atom_start
    }
}

/// A chain: a contiguous half-open range of residue indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    /// Author chain identifier.
    pub id: char,
    /// First residue index (inclusive).
    pub residue_start: usize,
    /// One past the last residue index (exclusive).
    pub residue_end: usize,
}

impl Chain {
    /// Number of residues in the chain's range.
    #[must_use]
    pub fn residue_count(&self) -> usize {
        self.residue_end - self.residue_start
    }
}

// ---------------------------------------------------------------------------
// StructuralModel
// ---------------------------------------------------------------------------

/// One molecular structure: parallel per-atom arrays plus residue, chain,
/// and bond lists, all in local index space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuralModel {
    /// Atom positions.
    pub positions: Vec<Vec3>,
    /// Crystallographic B-factors.
    pub b_factors: Vec<f32>,
    /// Element codes.
    pub elements: Vec<Element>,
    /// Heteroatom flags (HETATM records).
    pub is_hetero: Vec<bool>,
    /// Atom names (e.g. `CA`, `OXT`).
    pub atom_names: Vec<String>,
    /// Residues, grouped by chain, ranges strictly increasing.
    pub residues: Vec<Residue>,
    /// Chains, ranges strictly increasing.
    pub chains: Vec<Chain>,
    /// Covalent bonds as parsed.
    pub bonds: Vec<Bond>,
}

impl StructuralModel {
    /// Number of atoms.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether the model holds no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Verify the ordering invariant: parallel arrays agree in length,
    /// residue atom-ranges are in-bounds, pairwise disjoint, and strictly
    /// increasing, and chain residue-ranges likewise.
    ///
    /// Parsers must hand over models for which this holds; every mutation
    /// in this crate preserves it.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        let n = self.positions.len();
        if self.b_factors.len() != n
            || self.elements.len() != n
            || self.is_hetero.len() != n
            || self.atom_names.len() != n
        {
            return false;
        }

        let mut prev_atom_end = 0;
        for res in &self.residues {
            if res.atom_start >= res.atom_end
                || res.atom_start < prev_atom_end
                || res.atom_end > n
            {
                return false;
            }
            let in_range = |idx: Option<usize>| {
                idx.is_none_or(|i| i >= res.atom_start && i < res.atom_end)
            };
            if !in_range(res.backbone.n)
                || !in_range(res.backbone.ca)
                || !in_range(res.backbone.c)
            {
                return false;
            }
            prev_atom_end = res.atom_end;
        }

        let mut prev_res_end = 0;
        for chain in &self.chains {
            if chain.residue_start >= chain.residue_end
                || chain.residue_start < prev_res_end
                || chain.residue_end > self.residues.len()
            {
                return false;
            }
            prev_res_end = chain.residue_end;
        }

        self.bonds
            .iter()
            .all(|bond| bond.a < bond.b && bond.b < n)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Build a minimal ordered model: `residue_sizes` atoms per residue,
    /// one chain covering everything, carbon atoms on the x-axis. Residue
    /// backbone refs point at the first atom of each residue.
    pub(crate) fn linear_model(residue_sizes: &[usize]) -> StructuralModel {
        let mut model = StructuralModel::default();
        let mut start = 0;
        for (ri, &size) in residue_sizes.iter().enumerate() {
            for i in 0..size {
                let idx = start + i;
                model.positions.push(Vec3::new(idx as f32, 0.0, 0.0));
                model.b_factors.push(10.0);
                model.elements.push(Element::Carbon);
                model.is_hetero.push(false);
                model.atom_names.push(format!("C{i}"));
            }
            model.residues.push(Residue {
                name: "ALA".to_owned(),
                seq: ri as i32 + 1,
                atom_start: start,
                atom_end: start + size,
                backbone: BackboneRefs {
                    n: Some(start),
                    ca: None,
                    c: None,
                },
            });
            start += size;
        }
        if !model.residues.is_empty() {
            model.chains.push(Chain {
                id: 'A',
                residue_start: 0,
                residue_end: model.residues.len(),
            });
        }
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_is_canonical() {
        assert_eq!(Bond::new(4, 1), Bond::new(1, 4));
        assert_eq!(Bond::new(4, 1).a, 1);
        assert!(Bond::new(1, 4).touches(4));
        assert!(!Bond::new(1, 4).touches(2));
    }

    #[test]
    fn linear_model_is_ordered() {
        let model = testing::linear_model(&[4, 6]);
        assert_eq!(model.atom_count(), 10);
        assert!(model.is_ordered());
    }

    #[test]
    fn overlapping_residues_violate_ordering() {
        let mut model = testing::linear_model(&[4, 6]);
        model.residues[1].atom_start = 2;
        assert!(!model.is_ordered());
    }

    #[test]
    fn out_of_range_backbone_ref_violates_ordering() {
        let mut model = testing::linear_model(&[4]);
        model.residues[0].backbone.ca = Some(9);
        assert!(!model.is_ordered());
    }

    #[test]
    fn mismatched_parallel_arrays_violate_ordering() {
        let mut model = testing::linear_model(&[3]);
        let _ = model.b_factors.pop();
        assert!(!model.is_ordered());
    }
}
