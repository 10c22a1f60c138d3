// -- Lint policy ---------------------------------------------------------
// Crate-wide lints; thresholds and groups also live in Cargo.toml.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
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
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Test code may unwrap.
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

//! Per-instance orientation transform for drawing large batches of splats,
//! billboards and particles in one instanced draw.
//!
//! Each instance carries a uniform scale + translation, a unit quaternion
//! and an RGBA color. For every vertex of the shared base primitive the
//! stage rotates the local position by the quaternion, scales, translates,
//! projects through an external view-projection, and forwards the color
//! untouched to the fragment stage.
//!
//! # Key entry points
//!
//! - [`transform`] - the pure CPU reference of the stage (and a parallel
//!   batch fallback)
//! - [`renderer::InstancedPass`] - the wgpu pipeline running the same stage
//!   in WGSL
//! - [`camera::Camera`] - a perspective view-projection collaborator
//! - [`options::Options`] - TOML configuration
//!
//! Quaternions are used as supplied. A non-unit rotation produces a combined
//! rotation and scale rather than an error.

pub mod camera;
pub mod error;
pub mod gpu;
pub mod options;
pub mod renderer;
pub mod transform;

pub use error::SplatterError;
