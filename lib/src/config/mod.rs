//! Configuration module for the filament change pass.
//!
//! This module provides the typed settings consumed by the transform and the
//! narrow interface used to read the one value owned by the host application
//! (the G-code flavor).

mod filament_change_config;
mod gcode_flavor;

pub use filament_change_config::{FilamentChangeConfig, COLOR_GROUP_COUNT};
pub use gcode_flavor::{GCodeFlavor, HostSettings, RetractMethod};
