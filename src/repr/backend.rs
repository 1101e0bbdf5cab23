//! Rendering collaborator interface.
//!
//! The core never touches GPU state. For every representation kind in use
//! it asks the backend to build one *layer* (the render instance covering
//! all atoms assigned that kind), then pushes pure arrays into it: colors,
//! a combined visibility mask, and per-atom scales. Layer handles are
//! exclusively owned by [`RepresentationState`](super::RepresentationState)
//! and must be handed back through [`RenderBackend::dispose_layer`]
//! whenever a rebuild or teardown invalidates them — dropping a handle any
//! other way leaks the underlying rendering resources.

use glam::Mat4;

use super::RepKind;
use crate::model::StructuralModel;

/// Renderer-per-kind collaborator implemented by the embedding
/// application.
pub trait RenderBackend {
    /// Opaque handle to one active render layer.
    type Layer;

    /// Build a layer for `kind` over the merged model (bonds included in
    /// the model, already in global index space).
    fn build_layer(
        &mut self,
        kind: RepKind,
        model: &StructuralModel,
    ) -> Self::Layer;

    /// Release a layer's rendering resources.
    fn dispose_layer(&mut self, layer: Self::Layer);

    /// Push the full per-atom color array to a layer. Broadcasting the
    /// whole array is always safe and idempotent; the layer ignores atoms
    /// outside its mask.
    fn apply_colors(&mut self, layer: &mut Self::Layer, colors: &[[f32; 3]]);

    /// Push the combined per-atom visibility mask and scale multipliers to
    /// a layer.
    fn apply_visibility(
        &mut self,
        layer: &mut Self::Layer,
        mask: &[bool],
        scales: &[f32],
    );

    /// Base transforms of the layer's instanced geometry, for picking and
    /// overlay passes.
    fn base_transforms(&self, layer: &Self::Layer) -> Vec<Mat4>;
}
