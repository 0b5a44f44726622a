//! G-code post-processing module.
//!
//! This module provides the filament change by mesh pass and the pieces it is
//! built from: the color group index, the `M600` template, the `;MESH:`
//! marker scanner and the color transition tracker.

pub mod change_command;
pub mod color_groups;
pub mod color_transition;
pub mod filament_change;
mod generator;
pub mod mesh_scanner;

pub use change_command::{ChangeCommand, ChangeCommandBuilder, GENERATOR_NAME};
pub use color_groups::{ColorGroup, ColorGroupIndex, UNASSIGNED};
pub use color_transition::{ColorChange, ColorTransitionTracker, FilamentChangeReport, ScanState};
pub use filament_change::FilamentChangeByMesh;
pub use generator::{GCode, LAYER_KEYWORD};
pub use mesh_scanner::{
    parse_mesh_marker, LayerMeshScanner, MeshBoundaryMarker, MESH_MARKER, NONMESH_MARKER,
};
