//! Filament change by mesh.
//!
//! Post-processes sliced G-code so that a single-extruder printer pauses for a
//! filament swap (`M600`) whenever it starts printing a mesh that belongs to a
//! different color group than the one currently loaded.
//!
//! ## Example
//!
//! ```rust
//! use filament_change::config::FilamentChangeConfig;
//! use filament_change::gcode::FilamentChangeByMesh;
//!
//! let config = FilamentChangeConfig::new()
//!     .with_enabled(true)
//!     .with_color_meshes(1, "partA")
//!     .with_color_meshes(2, "partB");
//!
//! let layers = vec![
//!     "G1\n;MESH:partA.stl\nG1".to_string(),
//!     ";MESH:partB.stl\nG1".to_string(),
//! ];
//!
//! let output = FilamentChangeByMesh::new(config).execute(layers);
//! assert!(output[1].contains("actual color = 1; color to load = 2"));
//! ```

pub mod config;
pub mod gcode;

pub use config::{FilamentChangeConfig, GCodeFlavor, HostSettings, RetractMethod};
pub use gcode::{FilamentChangeByMesh, FilamentChangeReport, GCode};

/// Error type for operations around the transform (I/O, configuration).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
