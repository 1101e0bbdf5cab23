//! The engine facade tying the scene, representation state, and camera
//! together behind one synchronous API.
//!
//! [`ViewerEngine`] owns the [`Scene`], the cached [`MergedModel`], the
//! per-atom [`RepresentationState`](crate::repr::RepresentationState), and
//! the camera with its animator. Every mutation is atomic from the
//! caller's perspective: by the time a call returns, the merged model is
//! fully rebuilt, visual state restored, and every active layer
//! resynchronized — no intermediate state is ever observable. The only
//! per-frame entry point is [`ViewerEngine::tick`], safe to call every
//! frame including while idle.

mod queries;
mod representation;
mod structures;
mod view;

pub use queries::{SessionInfo, StructureSummary};
use web_time::Instant;

use crate::camera::animation::CameraAnimator;
use crate::camera::Camera;
use crate::model::{Bond, StructuralModel};
use crate::options::Options;
use crate::repr::{RenderBackend, RepresentationState};
use crate::scene::{MergedModel, Scene};

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Text-format parser collaborator. Successful parses must satisfy the
/// model ordering invariant
/// ([`StructuralModel::is_ordered`]).
pub trait StructureParser {
    /// Parse raw structure text into a model, or report why not.
    fn parse(&self, text: &str) -> Result<StructuralModel, String>;
}

/// Covalent-bond inference collaborator, consulted when a parsed model
/// carries no bonds of its own.
pub trait BondInference {
    /// Derive a bond list (local indices) from atom coordinates.
    fn infer(&self, model: &StructuralModel) -> Vec<Bond>;
}

// ---------------------------------------------------------------------------
// ViewerEngine
// ---------------------------------------------------------------------------

/// The main entry point: a synchronous molecular-scene engine generic over
/// its rendering backend.
pub struct ViewerEngine<B: RenderBackend> {
    pub(crate) backend: B,
    pub(crate) parser: Box<dyn StructureParser>,
    pub(crate) bond_inference: Box<dyn BondInference>,
    pub(crate) options: Options,
    pub(crate) scene: Scene,
    pub(crate) merged: MergedModel,
    pub(crate) rep: RepresentationState<B>,
    pub(crate) camera: Camera,
    pub(crate) animator: CameraAnimator,
    last_tick: Option<Instant>,
}

impl<B: RenderBackend> ViewerEngine<B> {
    /// Create an empty engine from its collaborators and options.
    #[must_use]
    pub fn new(
        backend: B,
        parser: Box<dyn StructureParser>,
        bond_inference: Box<dyn BondInference>,
        options: Options,
    ) -> Self {
        let camera = Camera {
            fovy: options.camera.fovy,
            znear: options.camera.znear,
            zfar: options.camera.zfar,
            ..Camera::default()
        };
        Self {
            backend,
            parser,
            bond_inference,
            options,
            scene: Scene::new(),
            merged: MergedModel::default(),
            rep: RepresentationState::new(),
            camera,
            animator: CameraAnimator::new(),
            last_tick: None,
        }
    }

    // -- Accessors --

    /// The structure store.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The current merged model (empty when nothing is loaded).
    #[must_use]
    pub fn merged_model(&self) -> &MergedModel {
        &self.merged
    }

    /// Per-atom visual state.
    #[must_use]
    pub fn representation(&self) -> &RepresentationState<B> {
        &self.rep
    }

    /// Camera state.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera state, for external orbit/pan/zoom controllers.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Engine options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether a camera transition is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    // -- Frame ticking --

    /// Advance any running camera transition by `dt` seconds. Idempotent
    /// and safe to call every frame; returns whether the camera changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.animator.tick(dt, &mut self.camera)
    }

    /// [`ViewerEngine::tick`] with wall-clock elapsed time since the
    /// previous call.
    pub fn tick_now(&mut self) -> bool {
        let now = Instant::now();
        let dt = self
            .last_tick
            .map_or(0.0, |prev| now.duration_since(prev).as_secs_f32());
        self.last_tick = Some(now);
        self.tick(dt)
    }

    // -- Teardown --

    /// Drop every structure, release every layer, and revert to the
    /// cleared state. The camera is left where it is.
    pub fn clear(&mut self) {
        log::info!("clearing session ({} structures)", self.scene.structure_count());
        self.scene.clear();
        self.merged = MergedModel::default();
        self.rep.dispose_all(&mut self.backend);
        self.rep
            .reset(&self.merged, self.options.colors.fallback_color);
        self.animator.cancel();
    }
}

impl<B: RenderBackend> Drop for ViewerEngine<B> {
    fn drop(&mut self) {
        // Layers hold external rendering resources; release them even if
        // the embedder forgot to call clear().
        self.rep.dispose_all(&mut self.backend);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use rustc_hash::FxHashMap;

    use super::*;
    use crate::model::testing::linear_model;
    use crate::repr::RepKind;

    /// Parser for tests: the text is a whitespace-separated list of
    /// residue sizes (e.g. `"4 6"`), anything else fails.
    pub(crate) struct TestParser;

    impl StructureParser for TestParser {
        fn parse(&self, text: &str) -> Result<StructuralModel, String> {
            let sizes: Result<Vec<usize>, _> = text
                .split_whitespace()
                .map(str::parse::<usize>)
                .collect();
            match sizes {
                Ok(sizes) if !sizes.is_empty() => Ok(linear_model(&sizes)),
                _ => Err(format!("unparseable structure text: {text:?}")),
            }
        }
    }

    /// Inference for tests: a chain of sequential bonds.
    pub(crate) struct ChainInference;

    impl BondInference for ChainInference {
        fn infer(&self, model: &StructuralModel) -> Vec<Bond> {
            (1..model.atom_count()).map(|i| Bond::new(i - 1, i)).collect()
        }
    }

    /// Backend for tests: counts outstanding layer handles.
    #[derive(Default)]
    pub(crate) struct CountingBackend {
        pub(crate) built: usize,
        pub(crate) disposed: usize,
        pub(crate) last_masks: FxHashMap<&'static str, Vec<bool>>,
    }

    impl RenderBackend for CountingBackend {
        type Layer = RepKind;

        fn build_layer(
            &mut self,
            kind: RepKind,
            _model: &StructuralModel,
        ) -> Self::Layer {
            self.built += 1;
            kind
        }

        fn dispose_layer(&mut self, _layer: Self::Layer) {
            self.disposed += 1;
        }

        fn apply_colors(
            &mut self,
            _layer: &mut Self::Layer,
            _colors: &[[f32; 3]],
        ) {
        }

        fn apply_visibility(
            &mut self,
            layer: &mut Self::Layer,
            mask: &[bool],
            _scales: &[f32],
        ) {
            let _ = self.last_masks.insert(layer.name(), mask.to_vec());
        }

        fn base_transforms(&self, _layer: &Self::Layer) -> Vec<glam::Mat4> {
            Vec::new()
        }
    }

    /// Engine wired to the test collaborators.
    pub(crate) fn test_engine() -> ViewerEngine<CountingBackend> {
        ViewerEngine::new(
            CountingBackend::default(),
            Box::new(TestParser),
            Box::new(ChainInference),
            Options::default(),
        )
    }
}
