//! # scenariomip-core
//!
//! The deterministic core of the ScenarioMIP core-variables release - THE LOGIC.
//!
//! This crate turns the variable definitions workbook into the artifacts
//! attached to each release:
//! - the full definitions workbook, copied under a versioned name
//! - a CSV with only the core variables
//! - a README describing the breakdown of the core set
//!
//! ## Flow
//!
//! ```text
//! workbook ──read_sheet──▶ VariableTable ──core_subset──▶ VariableTable (core)
//!                                                   │
//! METADATA.json ──MetadataDocument──▶ version ──────┤
//!                                                   ▼
//!                                  write_artifacts ──▶ ArtifactSet
//! ```
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO network dependencies (pure Rust)
//! - Same inputs always produce byte-identical CSV and README output
//! - Never mutates its inputs; artifacts are rewritten in full on every run

// =============================================================================
// MODULES
// =============================================================================

pub mod breakdown;
pub mod export;
pub mod formats;
pub mod metadata;
pub mod naming;
pub mod primitives;
pub mod readme;
pub mod selection;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CoreIndicator, CoreVariablesError, VariableRow, VariableTable};

// =============================================================================
// RE-EXPORTS: Pipeline stages
// =============================================================================

pub use breakdown::Breakdown;
pub use export::{ArtifactSet, write_artifacts};
pub use formats::read_sheet;
pub use metadata::MetadataDocument;
pub use naming::{ArtifactNames, version_filename};
pub use readme::{ReadmeContext, render_readme};
