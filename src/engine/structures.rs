//! Structure membership and atom/bond editing for [`ViewerEngine`].

use rustc_hash::FxHashSet;

use super::ViewerEngine;
use crate::error::EngineError;
use crate::repr::{RenderBackend, StateSnapshot};

impl<B: RenderBackend> ViewerEngine<B> {
    /// Parse `text` and register the result under `name` (disambiguated
    /// on collision). A parse failure rejects the add outright — no
    /// partial entry is created. Returns the assigned name.
    pub fn add_structure(
        &mut self,
        text: &str,
        name: &str,
    ) -> Result<String, EngineError> {
        let model = self.parser.parse(text).map_err(EngineError::Parse)?;
        if model.is_empty() {
            return Err(EngineError::Parse(
                "structure contains no atoms".to_owned(),
            ));
        }
        debug_assert!(model.is_ordered());

        let bonds = if model.bonds.is_empty() {
            self.bond_inference.infer(&model)
        } else {
            model.bonds.clone()
        };

        let snapshot = self.rep.snapshot(&self.merged);
        let assigned = self.scene.add_structure(
            model,
            bonds,
            name,
            &self.options.colors.structure_tints,
        );
        self.rebuild_visual_state(&snapshot);
        Ok(assigned)
    }

    /// Remove a structure by name. Unknown names are reported as
    /// not-removed and change nothing.
    pub fn remove_structure(&mut self, name: &str) -> bool {
        let snapshot = self.rep.snapshot(&self.merged);
        if !self.scene.remove_structure(name) {
            log::warn!("remove_structure: no structure named '{name}'");
            return false;
        }
        self.rebuild_visual_state(&snapshot);
        true
    }

    /// Delete atoms by global index. A structure losing every atom is
    /// dropped entirely; when the last structure goes, the session reverts
    /// to the cleared state. Returns the number of atoms removed; an empty
    /// selection is a no-op.
    pub fn remove_atoms(&mut self, global: &[usize]) -> usize {
        if global.is_empty() {
            return 0;
        }
        let set: FxHashSet<usize> = global.iter().copied().collect();
        let snapshot = self.rep.snapshot(&self.merged);
        let removed = self.scene.remove_atoms(&set);
        if removed == 0 {
            return 0;
        }
        self.rebuild_visual_state(&snapshot);
        removed
    }

    /// Add bonds given as global index pairs (canonical min/max dedup;
    /// self-pairs, out-of-range and cross-structure pairs skipped).
    /// Returns the number of bonds added.
    pub fn add_bonds(&mut self, pairs: &[(usize, usize)]) -> usize {
        let added = self.scene.add_bonds(pairs);
        if added > 0 {
            // Bond geometry changed: layers rebuild, atom state survives
            // untouched through the snapshot.
            let snapshot = self.rep.snapshot(&self.merged);
            self.rebuild_visual_state(&snapshot);
        }
        added
    }

    /// Remove every bond with one endpoint in `set_a` and the other in
    /// `set_b`. Returns the number of bonds removed.
    pub fn remove_bonds(
        &mut self,
        set_a: &FxHashSet<usize>,
        set_b: &FxHashSet<usize>,
    ) -> usize {
        let removed = self.scene.remove_bonds(set_a, set_b);
        if removed > 0 {
            let snapshot = self.rep.snapshot(&self.merged);
            self.rebuild_visual_state(&snapshot);
        }
        removed
    }

    /// Re-merge the scene and rebuild the visual state around it: old
    /// layers are disposed (their geometry is stale), arrays are reset to
    /// defaults, the snapshot restores surviving structures' edits, and
    /// layers are rebuilt and resynchronized.
    pub(crate) fn rebuild_visual_state(&mut self, snapshot: &StateSnapshot) {
        self.merged = self.scene.merge();
        self.rep.dispose_all(&mut self.backend);
        self.rep
            .reset(&self.merged, self.options.colors.fallback_color);
        self.rep.restore(snapshot, &self.merged);
        self.rep.sync_layers(&mut self.backend, &self.merged.model);
        log::debug!(
            "visual state rebuilt: {} atoms across {} structures",
            self.merged.atom_count(),
            self.merged.spans.len()
        );
    }
}
