// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Structural-model and camera-orientation core for molecular viewers.
//!
//! Molscene owns the in-memory model of one or more molecular structures
//! (atoms, residues, chains, bonds), keeps it valid under incremental
//! edits (atom/bond deletion and insertion, multi-structure merging), and
//! derives camera orientation from atom coordinates. Rendering, text
//! parsing, and bond inference stay with the embedding application behind
//! collaborator traits.
//!
//! # Key entry points
//!
//! - [`engine::ViewerEngine`] - the synchronous engine facade
//! - [`scene::Scene`] - the multi-structure store and merge layer
//! - [`repr::RepresentationState`] - per-atom visual state and layer sync
//! - [`camera::orientation`] - principal-axis camera orientation
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Structures enter through [`engine::StructureParser`], are merged into a
//! single global index space, and flow out to the renderer as pure arrays
//! (colors, visibility masks, scales) pushed into per-kind layers built by
//! the [`repr::RenderBackend`] collaborator. Atom deletion rebuilds the
//! affected models through a monotone index compaction
//! ([`model::rebuild`]), and the per-atom visual state is snapshotted and
//! restored across every rebuild so user edits survive structural
//! mutation.

pub mod camera;
pub mod engine;
pub mod error;
pub mod model;
pub mod options;
pub mod repr;
pub mod scene;
pub mod util;
