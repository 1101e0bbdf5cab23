//! Atom removal and model rebuild.
//!
//! Deleting atoms never mutates a model in place: [`rebuild`] derives a
//! fresh [`StructuralModel`] from the old one plus a removal set, together
//! with the old→new index map needed to translate bond lists, selections,
//! and snapshots. The ordering invariant of the input is preserved by
//! construction, so residue and chain ranges collapse with a single
//! min/max scan.

use rustc_hash::FxHashSet;

use super::{Bond, Chain, Residue, StructuralModel};

// ---------------------------------------------------------------------------
// AtomIndexMap
// ---------------------------------------------------------------------------

/// Dense old→new atom index map produced by a removal.
///
/// Surviving atoms are renumbered in original order starting at 0; removed
/// atoms have no image. Bounded by the old atom count, so a flat vector
/// beats a hash map for lookup cost and locality.
#[derive(Debug, Clone)]
pub struct AtomIndexMap {
    forward: Vec<Option<usize>>,
    surviving: usize,
}

impl AtomIndexMap {
    /// Build the monotone compaction map for `atom_count` atoms minus
    /// `removed`. Out-of-range entries in `removed` are ignored.
    #[must_use]
    pub fn from_removed(atom_count: usize, removed: &FxHashSet<usize>) -> Self {
        let mut forward = Vec::with_capacity(atom_count);
        let mut next = 0;
        for old in 0..atom_count {
            if removed.contains(&old) {
                forward.push(None);
            } else {
                forward.push(Some(next));
                next += 1;
            }
        }
        Self {
            forward,
            surviving: next,
        }
    }

    /// New index of `old`, or `None` if the atom was removed (or out of
    /// range).
    #[must_use]
    pub fn map(&self, old: usize) -> Option<usize> {
        self.forward.get(old).copied().flatten()
    }

    /// Atom count of the old model.
    #[must_use]
    pub fn old_len(&self) -> usize {
        self.forward.len()
    }

    /// Atom count of the rebuilt model.
    #[must_use]
    pub fn surviving(&self) -> usize {
        self.surviving
    }
}

// ---------------------------------------------------------------------------
// rebuild
// ---------------------------------------------------------------------------

/// Derive a new model with `removed` local atom indices deleted.
///
/// Residues whose entire range is removed are dropped; survivors collapse
/// to `[min(mapped), max(mapped) + 1)`. Backbone back-references follow the
/// atom map, turning absent when their target was removed. Chains collapse
/// the same way over the residue index map. Bonds touching a removed atom
/// are dropped, the rest remapped. Linear in atoms + residues + chains +
/// bonds.
///
/// A model losing all its atoms is returned empty; dropping the owning
/// structure entry in that case is the caller's decision.
#[must_use]
pub fn rebuild(
    model: &StructuralModel,
    removed: &FxHashSet<usize>,
) -> (StructuralModel, AtomIndexMap) {
    let map = AtomIndexMap::from_removed(model.atom_count(), removed);

    let mut out = StructuralModel {
        positions: Vec::with_capacity(map.surviving()),
        b_factors: Vec::with_capacity(map.surviving()),
        elements: Vec::with_capacity(map.surviving()),
        is_hetero: Vec::with_capacity(map.surviving()),
        atom_names: Vec::with_capacity(map.surviving()),
        residues: Vec::with_capacity(model.residues.len()),
        chains: Vec::with_capacity(model.chains.len()),
        bonds: Vec::new(),
    };

    for old in 0..model.atom_count() {
        if map.map(old).is_some() {
            out.positions.push(model.positions[old]);
            out.b_factors.push(model.b_factors[old]);
            out.elements.push(model.elements[old]);
            out.is_hetero.push(model.is_hetero[old]);
            out.atom_names.push(model.atom_names[old].clone());
        }
    }

    // Residues: collapse surviving ranges, drop emptied ones, and record
    // the old→new residue map for the chain pass.
    let mut residue_map: Vec<Option<usize>> = vec![None; model.residues.len()];
    for (old_ri, res) in model.residues.iter().enumerate() {
        let mut new_range: Option<(usize, usize)> = None;
        for old_atom in res.atom_start..res.atom_end {
            if let Some(new_atom) = map.map(old_atom) {
                new_range = Some(match new_range {
                    None => (new_atom, new_atom),
                    Some((lo, _)) => (lo, new_atom),
                });
            }
        }
        let Some((lo, hi)) = new_range else {
            continue;
        };
        residue_map[old_ri] = Some(out.residues.len());
        let remap = |idx: Option<usize>| idx.and_then(|i| map.map(i));
        out.residues.push(Residue {
            name: res.name.clone(),
            seq: res.seq,
            atom_start: lo,
            atom_end: hi + 1,
            backbone: super::BackboneRefs {
                n: remap(res.backbone.n),
                ca: remap(res.backbone.ca),
                c: remap(res.backbone.c),
            },
        });
    }

    for chain in &model.chains {
        let mut new_range: Option<(usize, usize)> = None;
        for old_ri in chain.residue_start..chain.residue_end {
            if let Some(new_ri) = residue_map[old_ri] {
                new_range = Some(match new_range {
                    None => (new_ri, new_ri),
                    Some((lo, _)) => (lo, new_ri),
                });
            }
        }
        if let Some((lo, hi)) = new_range {
            out.chains.push(Chain {
                id: chain.id,
                residue_start: lo,
                residue_end: hi + 1,
            });
        }
    }

    out.bonds = filter_bonds(&model.bonds, &map);

    log::debug!(
        "rebuild: {} -> {} atoms, {} -> {} residues, {} -> {} bonds",
        model.atom_count(),
        out.atom_count(),
        model.residues.len(),
        out.residues.len(),
        model.bonds.len(),
        out.bonds.len()
    );

    (out, map)
}

/// Filter a bond list through an atom index map: drop any bond with an
/// unmapped endpoint, remap the rest. Used by [`rebuild`] and whenever a
/// working bond list must follow a model it was built against.
#[must_use]
pub fn filter_bonds(bonds: &[Bond], map: &AtomIndexMap) -> Vec<Bond> {
    bonds
        .iter()
        .filter_map(|bond| match (map.map(bond.a), map.map(bond.b)) {
            (Some(a), Some(b)) => Some(Bond::new(a, b)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::testing::linear_model;
    use super::*;

    fn removal(indices: &[usize]) -> FxHashSet<usize> {
        indices.iter().copied().collect()
    }

    #[test]
    fn removal_shrinks_atom_count_by_set_size() {
        let model = linear_model(&[4, 6]);
        let (out, _) = rebuild(&model, &removal(&[0, 5, 9]));
        assert_eq!(out.atom_count(), model.atom_count() - 3);
        assert!(out.is_ordered());
    }

    #[test]
    fn scenario_two_residues_collapse() {
        // 10 atoms, residues [0,4) and [4,10); removing {2,3} leaves the
        // first residue as [0,2) and the second as [2,8).
        let model = linear_model(&[4, 6]);
        let (out, _) = rebuild(&model, &removal(&[2, 3]));
        assert_eq!(out.atom_count(), 8);
        assert_eq!(out.residues.len(), 2);
        assert_eq!((out.residues[0].atom_start, out.residues[0].atom_end), (0, 2));
        assert_eq!((out.residues[1].atom_start, out.residues[1].atom_end), (2, 8));
        assert!(out.is_ordered());
    }

    #[test]
    fn empty_removal_is_identity() {
        let mut model = linear_model(&[3, 2]);
        model.bonds = vec![Bond::new(0, 1), Bond::new(3, 4)];
        let (out, map) = rebuild(&model, &removal(&[]));
        assert_eq!(out, model);
        assert_eq!(map.surviving(), model.atom_count());
    }

    #[test]
    fn fully_removed_residue_is_dropped() {
        let model = linear_model(&[2, 3, 2]);
        let (out, _) = rebuild(&model, &removal(&[2, 3, 4]));
        assert_eq!(out.residues.len(), 2);
        assert_eq!(out.residues[1].seq, 3);
        assert_eq!((out.residues[1].atom_start, out.residues[1].atom_end), (2, 4));
        assert!(out.is_ordered());
    }

    #[test]
    fn backbone_refs_follow_the_map() {
        let mut model = linear_model(&[4]);
        model.residues[0].backbone.ca = Some(1);
        model.residues[0].backbone.c = Some(2);
        let (out, _) = rebuild(&model, &removal(&[0, 2]));
        // N pointed at atom 0 (removed), CA at 1 -> 0, C at 2 (removed).
        assert_eq!(out.residues[0].backbone.n, None);
        assert_eq!(out.residues[0].backbone.ca, Some(0));
        assert_eq!(out.residues[0].backbone.c, None);
    }

    #[test]
    fn chains_drop_when_all_residues_drop() {
        let mut model = linear_model(&[2, 2]);
        // Two chains of one residue each.
        model.chains = vec![
            Chain { id: 'A', residue_start: 0, residue_end: 1 },
            Chain { id: 'B', residue_start: 1, residue_end: 2 },
        ];
        let (out, _) = rebuild(&model, &removal(&[0, 1]));
        assert_eq!(out.chains.len(), 1);
        assert_eq!(out.chains[0].id, 'B');
        assert_eq!((out.chains[0].residue_start, out.chains[0].residue_end), (0, 1));
    }

    #[test]
    fn bonds_touching_removed_atoms_drop() {
        let mut model = linear_model(&[5]);
        model.bonds = vec![Bond::new(0, 1), Bond::new(1, 2), Bond::new(3, 4)];
        let (out, _) = rebuild(&model, &removal(&[2]));
        assert_eq!(out.bonds, vec![Bond::new(0, 1), Bond::new(2, 3)]);
    }

    #[test]
    fn filter_bonds_remaps_survivors() {
        let map = AtomIndexMap::from_removed(5, &removal(&[1]));
        let bonds = vec![Bond::new(0, 1), Bond::new(2, 4), Bond::new(0, 3)];
        assert_eq!(
            filter_bonds(&bonds, &map),
            vec![Bond::new(1, 3), Bond::new(0, 2)]
        );
    }

    #[test]
    fn out_of_range_removals_are_ignored() {
        let model = linear_model(&[3]);
        let (out, _) = rebuild(&model, &removal(&[7, 99]));
        assert_eq!(out.atom_count(), 3);
    }

    #[test]
    fn removing_everything_yields_an_empty_model() {
        let model = linear_model(&[2, 2]);
        let (out, map) = rebuild(&model, &removal(&[0, 1, 2, 3]));
        assert!(out.is_empty());
        assert!(out.residues.is_empty());
        assert!(out.chains.is_empty());
        assert_eq!(map.surviving(), 0);
    }
}
