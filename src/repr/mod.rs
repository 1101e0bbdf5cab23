//! Per-atom visual state and multi-layer representation sync.
//!
//! [`RepresentationState`] owns four arrays sized to the merged model —
//! color, visibility, scale multiplier, and assigned representation kind —
//! plus the map from kind to its active render layer. Every atom has
//! exactly one assigned kind at any time; several kinds may be active at
//! once across different atoms (mixed mode). The combined visibility rule
//! (`assigned kind matches AND atom visible`) makes layer masks disjoint
//! by construction, so no atom is ever drawn twice.

mod backend;

pub use backend::RenderBackend;
use rustc_hash::FxHashMap;

use crate::model::StructuralModel;
use crate::scene::MergedModel;

// ---------------------------------------------------------------------------
// RepKind
// ---------------------------------------------------------------------------

/// A rendering style assignable per atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepKind {
    /// Spheres and cylinders for atoms and bonds.
    BallAndStick,
    /// Van-der-Waals spheres.
    Spacefill,
    /// Secondary-structure cartoon.
    Cartoon,
    /// Smoothed backbone tube.
    Tube,
}

impl RepKind {
    /// Kind assigned when nothing else is dominant.
    pub const DEFAULT: Self = Self::BallAndStick;

    /// Every kind, in tie-breaking order.
    pub const ALL: [Self; 4] =
        [Self::BallAndStick, Self::Spacefill, Self::Cartoon, Self::Tube];

    /// Stable lowercase name for logs and UI.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BallAndStick => "ball-and-stick",
            Self::Spacefill => "spacefill",
            Self::Cartoon => "cartoon",
            Self::Tube => "tube",
        }
    }
}

// ---------------------------------------------------------------------------
// StateSnapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct SnapshotSlice {
    colors: Vec<[f32; 3]>,
    visible: Vec<bool>,
    scales: Vec<f32>,
    kinds: Vec<RepKind>,
}

/// Per-structure slices of the visual-state arrays, captured before a
/// merged-model rebuild and restored afterwards for structures that
/// survive it.
#[derive(Debug, Clone, Default)]
pub struct StateSnapshot {
    slices: FxHashMap<String, SnapshotSlice>,
}

// ---------------------------------------------------------------------------
// RepresentationState
// ---------------------------------------------------------------------------

/// Owner of the per-atom visual state and of all active render layers.
pub struct RepresentationState<B: RenderBackend> {
    colors: Vec<[f32; 3]>,
    visible: Vec<bool>,
    scales: Vec<f32>,
    kinds: Vec<RepKind>,
    layers: FxHashMap<RepKind, B::Layer>,
}

impl<B: RenderBackend> Default for RepresentationState<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RenderBackend> std::fmt::Debug for RepresentationState<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepresentationState")
            .field("atom_count", &self.atom_count())
            .field("active_layers", &self.active_layer_kinds())
            .finish()
    }
}

impl<B: RenderBackend> RepresentationState<B> {
    /// Create empty state with no layers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            colors: Vec::new(),
            visible: Vec::new(),
            scales: Vec::new(),
            kinds: Vec::new(),
            layers: FxHashMap::default(),
        }
    }

    /// Number of atoms the arrays are sized to.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.kinds.len()
    }

    /// Per-atom colors.
    #[must_use]
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Per-atom visibility flags.
    #[must_use]
    pub fn visible(&self) -> &[bool] {
        &self.visible
    }

    /// Per-atom scale multipliers.
    #[must_use]
    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    /// Per-atom assigned representation kinds.
    #[must_use]
    pub fn kinds(&self) -> &[RepKind] {
        &self.kinds
    }

    /// Kinds currently assigned to at least one atom, in
    /// [`RepKind::ALL`] order.
    #[must_use]
    pub fn used_kinds(&self) -> Vec<RepKind> {
        RepKind::ALL
            .into_iter()
            .filter(|k| self.kinds.contains(k))
            .collect()
    }

    /// The most common assigned kind, ties broken by [`RepKind::ALL`]
    /// order; `None` when the arrays are empty.
    #[must_use]
    pub fn dominant_kind(&self) -> Option<RepKind> {
        let mut best: Option<(RepKind, usize)> = None;
        for kind in RepKind::ALL {
            let count = self.kinds.iter().filter(|&&k| k == kind).count();
            if count > 0 && best.is_none_or(|(_, c)| count > c) {
                best = Some((kind, count));
            }
        }
        best.map(|(kind, _)| kind)
    }

    // -- Rebuild lifecycle --

    /// Recreate the arrays for a freshly merged model. Colors start from
    /// element-derived defaults (`fallback` for unknown elements), then
    /// each tinted structure's span is overwritten with its uniform tint;
    /// the untinted first structure keeps element coloring. Visibility
    /// resets to true, scale to 1.0, and the assigned kind to the
    /// previously dominant kind (or [`RepKind::DEFAULT`]).
    pub fn reset(&mut self, merged: &MergedModel, fallback: [f32; 3]) {
        let kind = self.dominant_kind().unwrap_or(RepKind::DEFAULT);
        let n = merged.atom_count();

        self.colors = merged
            .model
            .elements
            .iter()
            .map(|e| e.cpk_color().unwrap_or(fallback))
            .collect();
        for span in &merged.spans {
            if let Some(tint) = span.tint {
                for color in
                    &mut self.colors[span.offset..span.offset + span.count]
                {
                    *color = tint;
                }
            }
        }
        self.visible = vec![true; n];
        self.scales = vec![1.0; n];
        self.kinds = vec![kind; n];
    }

    /// Capture per-structure slices of all four arrays, keyed by structure
    /// name, from the merged model the arrays are currently sized to.
    #[must_use]
    pub fn snapshot(&self, merged: &MergedModel) -> StateSnapshot {
        let mut slices = FxHashMap::default();
        for span in &merged.spans {
            let range = span.offset..span.offset + span.count;
            let _ = slices.insert(
                span.name.clone(),
                SnapshotSlice {
                    colors: self.colors[range.clone()].to_vec(),
                    visible: self.visible[range.clone()].to_vec(),
                    scales: self.scales[range.clone()].to_vec(),
                    kinds: self.kinds[range].to_vec(),
                },
            );
        }
        StateSnapshot { slices }
    }

    /// Restore snapshotted slices into freshly reset arrays. For each
    /// structure present in both the snapshot and the new merged model,
    /// `min(old, new)` entries are copied back; atoms beyond the snapshot
    /// keep their defaults.
    pub fn restore(&mut self, snapshot: &StateSnapshot, merged: &MergedModel) {
        for span in &merged.spans {
            let Some(slice) = snapshot.slices.get(&span.name) else {
                continue;
            };
            let n = span.count.min(slice.kinds.len());
            for i in 0..n {
                self.colors[span.offset + i] = slice.colors[i];
                self.visible[span.offset + i] = slice.visible[i];
                self.scales[span.offset + i] = slice.scales[i];
                self.kinds[span.offset + i] = slice.kinds[i];
            }
        }
    }

    // -- Per-atom edits --

    /// Assign `kind` to the given atoms. Returns whether anything changed.
    pub fn set_kind(&mut self, indices: &[usize], kind: RepKind) -> bool {
        let mut changed = false;
        for &i in indices {
            if let Some(slot) = self.kinds.get_mut(i) {
                if *slot != kind {
                    *slot = kind;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Assign `kind` to every atom. Returns whether anything changed.
    pub fn set_kind_all(&mut self, kind: RepKind) -> bool {
        let mut changed = false;
        for slot in &mut self.kinds {
            if *slot != kind {
                *slot = kind;
                changed = true;
            }
        }
        changed
    }

    /// Set the color of the given atoms. Returns whether anything changed.
    pub fn set_color(&mut self, indices: &[usize], color: [f32; 3]) -> bool {
        let mut changed = false;
        for &i in indices {
            if let Some(slot) = self.colors.get_mut(i) {
                if *slot != color {
                    *slot = color;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Set visibility of the given atoms. Returns whether anything
    /// changed.
    pub fn set_visible(&mut self, indices: &[usize], flag: bool) -> bool {
        let mut changed = false;
        for &i in indices {
            if let Some(slot) = self.visible.get_mut(i) {
                if *slot != flag {
                    *slot = flag;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Set the scale multiplier of the given atoms. Returns whether
    /// anything changed.
    pub fn set_scale(&mut self, indices: &[usize], scale: f32) -> bool {
        let mut changed = false;
        for &i in indices {
            if let Some(slot) = self.scales.get_mut(i) {
                if *slot != scale {
                    *slot = scale;
                    changed = true;
                }
            }
        }
        changed
    }

    // -- Layer sync --

    /// Combined visibility mask for one kind: atom *i* is in the mask iff
    /// it is assigned `kind` and marked visible.
    #[must_use]
    pub fn combined_mask(&self, kind: RepKind) -> Vec<bool> {
        self.kinds
            .iter()
            .zip(&self.visible)
            .map(|(&k, &v)| k == kind && v)
            .collect()
    }

    /// Bring the layer set in line with the assigned kinds: build a layer
    /// for every kind in use, dispose layers for kinds no atom uses any
    /// more, then push colors and the combined visibility mask (with
    /// scales) to every remaining layer.
    pub fn sync_layers(&mut self, backend: &mut B, model: &StructuralModel) {
        let used = self.used_kinds();

        let stale: Vec<RepKind> = self
            .layers
            .keys()
            .copied()
            .filter(|k| !used.contains(k))
            .collect();
        for kind in stale {
            if let Some(layer) = self.layers.remove(&kind) {
                log::debug!("disposing unused layer '{}'", kind.name());
                backend.dispose_layer(layer);
            }
        }

        for kind in used {
            if !self.layers.contains_key(&kind) {
                log::debug!("building layer '{}'", kind.name());
                let layer = backend.build_layer(kind, model);
                let _ = self.layers.insert(kind, layer);
            }
            let mask = self.combined_mask(kind);
            if let Some(layer) = self.layers.get_mut(&kind) {
                backend.apply_colors(layer, &self.colors);
                backend.apply_visibility(layer, &mask, &self.scales);
            }
        }
    }

    /// Kinds with an active layer right now.
    #[must_use]
    pub fn active_layer_kinds(&self) -> Vec<RepKind> {
        RepKind::ALL
            .into_iter()
            .filter(|k| self.layers.contains_key(k))
            .collect()
    }

    /// Release every layer. Called on merged-model rebuild (handles are
    /// invalidated by the geometry change) and at session teardown.
    pub fn dispose_all(&mut self, backend: &mut B) {
        for kind in RepKind::ALL {
            if let Some(layer) = self.layers.remove(&kind) {
                backend.dispose_layer(layer);
            }
        }
    }
}
