//! Per-atom representation, color, visibility, and scale operations for
//! [`ViewerEngine`].

use super::ViewerEngine;
use crate::repr::{RenderBackend, RepKind};

impl<B: RenderBackend> ViewerEngine<B> {
    /// Assign a representation kind to every atom. Returns whether
    /// anything changed.
    pub fn set_representation(&mut self, kind: RepKind) -> bool {
        let changed = self.rep.set_kind_all(kind);
        if changed {
            self.sync_visual();
        }
        changed
    }

    /// Assign a representation kind to a set of atoms (mixed mode: other
    /// atoms keep their kinds). Empty selections are a no-op.
    pub fn set_representation_for_atoms(
        &mut self,
        kind: RepKind,
        indices: &[usize],
    ) -> bool {
        let changed = self.rep.set_kind(indices, kind);
        if changed {
            self.sync_visual();
        }
        changed
    }

    /// Color a set of atoms. Empty selections are a no-op.
    pub fn color_atoms(&mut self, indices: &[usize], color: [f32; 3]) -> bool {
        let changed = self.rep.set_color(indices, color);
        if changed {
            self.sync_visual();
        }
        changed
    }

    /// Hide a set of atoms. Empty selections are a no-op.
    pub fn hide_atoms(&mut self, indices: &[usize]) -> bool {
        let changed = self.rep.set_visible(indices, false);
        if changed {
            self.sync_visual();
        }
        changed
    }

    /// Show a set of atoms. Empty selections are a no-op.
    pub fn show_atoms(&mut self, indices: &[usize]) -> bool {
        let changed = self.rep.set_visible(indices, true);
        if changed {
            self.sync_visual();
        }
        changed
    }

    /// Set the scale multiplier of a set of atoms. Empty selections are a
    /// no-op.
    pub fn scale_atoms(&mut self, indices: &[usize], scale: f32) -> bool {
        let changed = self.rep.set_scale(indices, scale);
        if changed {
            self.sync_visual();
        }
        changed
    }

    /// Hide every atom of a structure. Returns false for an unknown name.
    pub fn hide_structure(&mut self, name: &str) -> bool {
        self.set_structure_visibility(name, false)
    }

    /// Show every atom of a structure. Returns false for an unknown name.
    pub fn show_structure(&mut self, name: &str) -> bool {
        self.set_structure_visibility(name, true)
    }

    fn set_structure_visibility(&mut self, name: &str, flag: bool) -> bool {
        let Some(span) = self.merged.span_of(name) else {
            log::warn!("no structure named '{name}'");
            return false;
        };
        let indices: Vec<usize> =
            (span.offset..span.offset + span.count).collect();
        if self.rep.set_visible(&indices, flag) {
            self.sync_visual();
        }
        true
    }

    /// Push current colors, masks, and scales to every active layer,
    /// building and tearing down layers as kind usage changed.
    fn sync_visual(&mut self) {
        self.rep.sync_layers(&mut self.backend, &self.merged.model);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::test_engine;
    use super::*;

    #[test]
    fn mixed_mode_keeps_masks_exclusive() {
        let mut engine = test_engine();
        let _ = engine.add_structure("3 3", "a").unwrap();
        assert!(
            engine.set_representation_for_atoms(RepKind::Cartoon, &[0, 1, 2])
        );

        let bns = engine.representation().combined_mask(RepKind::BallAndStick);
        let cartoon = engine.representation().combined_mask(RepKind::Cartoon);
        for i in 0..6 {
            assert!(!(bns[i] && cartoon[i]), "atom {i} in two masks");
            assert!(bns[i] || cartoon[i], "atom {i} in no mask");
        }
        assert_eq!(
            engine.representation().active_layer_kinds(),
            vec![RepKind::BallAndStick, RepKind::Cartoon]
        );
    }

    #[test]
    fn reassigning_all_atoms_tears_down_the_stale_layer() {
        let mut engine = test_engine();
        let _ = engine.add_structure("4", "a").unwrap();
        assert!(engine.set_representation(RepKind::Spacefill));
        assert_eq!(
            engine.representation().active_layer_kinds(),
            vec![RepKind::Spacefill]
        );
    }

    #[test]
    fn hidden_atoms_leave_every_mask() {
        let mut engine = test_engine();
        let _ = engine.add_structure("4", "a").unwrap();
        assert!(engine.hide_atoms(&[1, 2]));
        let mask = engine.representation().combined_mask(RepKind::DEFAULT);
        assert_eq!(mask, vec![true, false, false, true]);

        assert!(engine.show_atoms(&[1]));
        let mask = engine.representation().combined_mask(RepKind::DEFAULT);
        assert_eq!(mask, vec![true, true, false, true]);
    }

    #[test]
    fn structure_level_visibility_covers_its_span_only() {
        let mut engine = test_engine();
        let _ = engine.add_structure("2", "a").unwrap();
        let _ = engine.add_structure("2", "b").unwrap();
        assert!(engine.hide_structure("b"));
        assert_eq!(
            engine.representation().visible(),
            &[true, true, false, false]
        );
        assert!(engine.show_structure("b"));
        assert!(engine.representation().visible().iter().all(|&v| v));
        assert!(!engine.hide_structure("zzz"));
    }

    #[test]
    fn empty_selections_change_nothing() {
        let mut engine = test_engine();
        let _ = engine.add_structure("3", "a").unwrap();
        assert!(!engine.color_atoms(&[], [1.0, 0.0, 0.0]));
        assert!(!engine.hide_atoms(&[]));
        assert!(!engine.scale_atoms(&[], 2.0));
    }

    #[test]
    fn scaling_reaches_the_layer_sync() {
        let mut engine = test_engine();
        let _ = engine.add_structure("3", "a").unwrap();
        assert!(engine.scale_atoms(&[1], 2.5));
        assert_eq!(engine.representation().scales(), &[1.0, 2.5, 1.0]);
    }
}
