//! Authoritative multi-structure scene: insertion-ordered entries, global
//! index offsets, and the merged flat model.
//!
//! The scene owns every loaded structure as a [`StructureEntry`] (the
//! structure's model, its working bond list, an optional uniform tint, and
//! its atom offset into the global index space). Offsets are recomputed on
//! every membership change so they stay contiguous and strictly increasing
//! in insertion order. [`Scene::merge`] flattens all entries into one
//! [`MergedModel`] whose residue, chain, and bond indices are shifted into
//! the global space, with a per-structure span table for partitioning the
//! result back out.

use rustc_hash::FxHashSet;

use crate::model::rebuild::{filter_bonds, rebuild};
use crate::model::{Bond, Chain, Residue, StructuralModel};

// ---------------------------------------------------------------------------
// StructureEntry
// ---------------------------------------------------------------------------

/// One loaded structure plus its place in the merged index space.
#[derive(Debug, Clone)]
pub struct StructureEntry {
    name: String,
    model: StructuralModel,
    bonds: Vec<Bond>,
    tint: Option<[f32; 3]>,
    offset: usize,
}

impl StructureEntry {
    /// Unique structure name assigned at registration.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The structure's model, in local index space.
    #[must_use]
    pub fn model(&self) -> &StructuralModel {
        &self.model
    }

    /// Working bond list (parsed or inferred bonds plus user edits), in
    /// local index space.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Uniform tint color, absent for the first-registered structure.
    #[must_use]
    pub fn tint(&self) -> Option<[f32; 3]> {
        self.tint
    }

    /// Atom offset into the global index space.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of atoms in this structure.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.model.atom_count()
    }

    /// Whether `global` falls inside this entry's span.
    #[must_use]
    pub fn contains_global(&self, global: usize) -> bool {
        global >= self.offset && global < self.offset + self.atom_count()
    }
}

// ---------------------------------------------------------------------------
// MergedModel
// ---------------------------------------------------------------------------

/// Per-structure span inside the merged model.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSpan {
    /// Structure name.
    pub name: String,
    /// First global atom index.
    pub offset: usize,
    /// Number of atoms.
    pub count: usize,
    /// Uniform tint, if the structure has one.
    pub tint: Option<[f32; 3]>,
}

/// The flat single-model view of every loaded structure, in global index
/// space, plus the side table mapping structure names to their spans.
#[derive(Debug, Clone, Default)]
pub struct MergedModel {
    /// Concatenated model with shifted residue/chain/bond indices.
    pub model: StructuralModel,
    /// Per-structure spans in insertion order.
    pub spans: Vec<MergedSpan>,
}

impl MergedModel {
    /// Total atom count.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.model.atom_count()
    }

    /// Span for a structure name, if present.
    #[must_use]
    pub fn span_of(&self, name: &str) -> Option<&MergedSpan> {
        self.spans.iter().find(|s| s.name == name)
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The authoritative structure store. Owns all entries in insertion order.
#[derive(Debug, Default)]
pub struct Scene {
    entries: Vec<StructureEntry>,
    /// Tint cursor; only ever advances so tints stay stable across
    /// removals.
    tints_assigned: usize,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation last consumed by the renderer.
    rendered_generation: u64,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether scene data changed since the last [`Scene::mark_rendered`].
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark the current generation as consumed by the renderer.
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    /// Current mutation generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // -- Membership --

    /// Register a structure. The requested name is disambiguated against
    /// existing entries (`name`, `name-2`, `name-3`, …); every structure
    /// after the first receives the next tint from `palette`. Returns the
    /// assigned name.
    pub fn add_structure(
        &mut self,
        model: StructuralModel,
        bonds: Vec<Bond>,
        requested_name: &str,
        palette: &[[f32; 3]],
    ) -> String {
        let name = self.unique_name(requested_name);
        let tint = if self.entries.is_empty() || palette.is_empty() {
            None
        } else {
            let tint = palette[self.tints_assigned % palette.len()];
            self.tints_assigned += 1;
            Some(tint)
        };
        log::info!(
            "registered structure '{}' ({} atoms, {} bonds{})",
            name,
            model.atom_count(),
            bonds.len(),
            if tint.is_some() { ", tinted" } else { "" }
        );
        self.entries.push(StructureEntry {
            name: name.clone(),
            model,
            bonds,
            tint,
            offset: 0,
        });
        self.recompute_offsets();
        self.invalidate();
        name
    }

    /// Remove a structure by name. Returns false (and changes nothing) for
    /// an unknown name.
    pub fn remove_structure(&mut self, name: &str) -> bool {
        let Some(idx) = self.entries.iter().position(|e| e.name == name) else {
            return false;
        };
        let entry = self.entries.remove(idx);
        log::info!(
            "removed structure '{}' ({} atoms)",
            entry.name,
            entry.atom_count()
        );
        self.recompute_offsets();
        self.invalidate();
        true
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.invalidate();
    }

    // -- Access --

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[StructureEntry] {
        &self.entries
    }

    /// Entry by name.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&StructureEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Number of loaded structures.
    #[must_use]
    pub fn structure_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether no structures are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total atom count across all entries.
    #[must_use]
    pub fn total_atom_count(&self) -> usize {
        self.entries.iter().map(StructureEntry::atom_count).sum()
    }

    /// Owning entry index and local atom index for a global index.
    #[must_use]
    pub fn entry_of_global(&self, global: usize) -> Option<(usize, usize)> {
        self.entries
            .iter()
            .position(|e| e.contains_global(global))
            .map(|i| (i, global - self.entries[i].offset))
    }

    // -- Atom / bond editing --

    /// Delete atoms by global index. Touched entries are rebuilt through
    /// the removal algorithm; entries losing every atom are dropped
    /// entirely. Returns the number of atoms actually removed.
    pub fn remove_atoms(&mut self, global: &FxHashSet<usize>) -> usize {
        if global.is_empty() {
            return 0;
        }

        // Partition the global removal set into per-entry local sets.
        let mut per_entry: Vec<FxHashSet<usize>> =
            vec![FxHashSet::default(); self.entries.len()];
        let mut removed = 0;
        for &g in global {
            if let Some((ei, local)) = self.entry_of_global(g) {
                if per_entry[ei].insert(local) {
                    removed += 1;
                }
            }
        }
        if removed == 0 {
            return 0;
        }

        let mut surviving = Vec::with_capacity(self.entries.len());
        for (entry, local_set) in self.entries.drain(..).zip(per_entry) {
            if local_set.is_empty() {
                surviving.push(entry);
                continue;
            }
            if local_set.len() >= entry.atom_count() {
                log::info!(
                    "structure '{}' lost all atoms, dropping entry",
                    entry.name
                );
                continue;
            }
            let mut entry = entry;
            let (new_model, map) = rebuild(&entry.model, &local_set);
            entry.bonds = filter_bonds(&entry.bonds, &map);
            entry.model = new_model;
            surviving.push(entry);
        }
        self.entries = surviving;
        self.recompute_offsets();
        self.invalidate();
        removed
    }

    /// Add bonds given as global index pairs. Pairs are canonicalized and
    /// deduplicated; self-pairs, out-of-range indices, pairs spanning two
    /// structures, and already-present bonds are skipped. Returns the
    /// number of bonds added.
    pub fn add_bonds(&mut self, pairs: &[(usize, usize)]) -> usize {
        let mut seen = FxHashSet::default();
        let mut added = 0;
        for &(i, j) in pairs {
            if i == j {
                continue;
            }
            let bond = Bond::new(i, j);
            if !seen.insert(bond) {
                continue;
            }
            let (Some((ea, la)), Some((eb, lb))) =
                (self.entry_of_global(bond.a), self.entry_of_global(bond.b))
            else {
                log::warn!(
                    "add_bonds: pair ({}, {}) out of range, skipping",
                    bond.a,
                    bond.b
                );
                continue;
            };
            if ea != eb {
                log::warn!(
                    "add_bonds: pair ({}, {}) spans two structures, skipping",
                    bond.a,
                    bond.b
                );
                continue;
            }
            let local = Bond::new(la, lb);
            let entry = &mut self.entries[ea];
            if entry.bonds.contains(&local) {
                continue;
            }
            entry.bonds.push(local);
            added += 1;
        }
        if added > 0 {
            self.invalidate();
        }
        added
    }

    /// Remove every bond with one endpoint in `set_a` and the other in
    /// `set_b` (global indices, either orientation). Returns the number of
    /// bonds removed.
    pub fn remove_bonds(
        &mut self,
        set_a: &FxHashSet<usize>,
        set_b: &FxHashSet<usize>,
    ) -> usize {
        if set_a.is_empty() || set_b.is_empty() {
            return 0;
        }
        let mut removed = 0;
        for entry in &mut self.entries {
            let offset = entry.offset;
            let before = entry.bonds.len();
            entry.bonds.retain(|bond| {
                let ga = bond.a + offset;
                let gb = bond.b + offset;
                let hit = (set_a.contains(&ga) && set_b.contains(&gb))
                    || (set_a.contains(&gb) && set_b.contains(&ga));
                !hit
            });
            removed += before - entry.bonds.len();
        }
        if removed > 0 {
            self.invalidate();
        }
        removed
    }

    // -- Merge --

    /// Flatten all entries into one model in global index space.
    #[must_use]
    pub fn merge(&self) -> MergedModel {
        let total = self.total_atom_count();
        let mut model = StructuralModel {
            positions: Vec::with_capacity(total),
            b_factors: Vec::with_capacity(total),
            elements: Vec::with_capacity(total),
            is_hetero: Vec::with_capacity(total),
            atom_names: Vec::with_capacity(total),
            residues: Vec::new(),
            chains: Vec::new(),
            bonds: Vec::new(),
        };
        let mut spans = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            let atom_off = entry.offset;
            let res_off = model.residues.len();

            model.positions.extend_from_slice(&entry.model.positions);
            model.b_factors.extend_from_slice(&entry.model.b_factors);
            model.elements.extend_from_slice(&entry.model.elements);
            model.is_hetero.extend_from_slice(&entry.model.is_hetero);
            model
                .atom_names
                .extend(entry.model.atom_names.iter().cloned());

            model.residues.extend(entry.model.residues.iter().map(|r| {
                let shift = |idx: Option<usize>| idx.map(|i| i + atom_off);
                Residue {
                    name: r.name.clone(),
                    seq: r.seq,
                    atom_start: r.atom_start + atom_off,
                    atom_end: r.atom_end + atom_off,
                    backbone: crate::model::BackboneRefs {
                        n: shift(r.backbone.n),
                        ca: shift(r.backbone.ca),
                        c: shift(r.backbone.c),
                    },
                }
            }));
            model.chains.extend(entry.model.chains.iter().map(|c| Chain {
                id: c.id,
                residue_start: c.residue_start + res_off,
                residue_end: c.residue_end + res_off,
            }));
            model.bonds.extend(
                entry
                    .bonds
                    .iter()
                    .map(|b| Bond::new(b.a + atom_off, b.b + atom_off)),
            );

            spans.push(MergedSpan {
                name: entry.name.clone(),
                offset: atom_off,
                count: entry.atom_count(),
                tint: entry.tint,
            });
        }

        debug_assert!(model.is_ordered());
        MergedModel { model, spans }
    }

    // -- Internals --

    /// Offset of entry *i* = sum of atom counts of entries `0..i`.
    fn recompute_offsets(&mut self) {
        let mut offset = 0;
        for entry in &mut self.entries {
            entry.offset = offset;
            offset += entry.atom_count();
        }
    }

    fn unique_name(&self, requested: &str) -> String {
        let base = requested.trim();
        let base = if base.is_empty() { "structure" } else { base };
        if self.entry(base).is_none() {
            return base.to_owned();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if self.entry(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}
