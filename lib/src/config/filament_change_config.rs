//! Filament change configuration.
//!
//! This module provides the FilamentChangeConfig type holding every setting
//! of the pass: which meshes belong to which color group and how the `M600`
//! command is parameterized.

use super::gcode_flavor::{GCodeFlavor, HostSettings, RetractMethod};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Number of color groups meshes can be assigned to.
pub const COLOR_GROUP_COUNT: usize = 4;

/// Settings for the filament change pass.
///
/// Every key is optional when decoding; missing keys take their defaults. An
/// explicit `null` for a numeric key leaves that `M600` parameter out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilamentChangeConfig {
    /// Run the pass at all. Disabled passes return their input untouched.
    pub plugin_enabled: bool,

    // === Color groups ===
    /// Comma-separated mesh names (file name without extension) of color 1.
    pub color1_meshes: String,
    /// Comma-separated mesh names of color 2.
    pub color2_meshes: String,
    /// Comma-separated mesh names of color 3.
    pub color3_meshes: String,
    /// Comma-separated mesh names of color 4.
    pub color4_meshes: String,

    // === M600 parameters ===
    /// Use the firmware's own filament change settings instead of the ones below.
    pub firmware_config: bool,

    /// Initial retraction before moving away from the print (mm).
    pub initial_retract: Option<f64>,

    /// Later retraction to unload the filament (mm).
    pub later_retract: Option<f64>,

    /// X position of the head for the change (mm).
    pub x_position: Option<f64>,

    /// Y position of the head for the change (mm).
    pub y_position: Option<f64>,

    /// Relative Z lift for the change (mm, >= 0).
    pub z_position: Option<f64>,

    /// Parameter letter for the later retraction. Derived from the flavor when unset.
    pub retract_method: Option<RetractMethod>,

    /// Flavor copied from the host; not user-editable.
    pub machine_gcode_flavor: GCodeFlavor,
}

impl Default for FilamentChangeConfig {
    fn default() -> Self {
        Self {
            plugin_enabled: false,

            color1_meshes: String::new(),
            color2_meshes: String::new(),
            color3_meshes: String::new(),
            color4_meshes: String::new(),

            firmware_config: false,
            initial_retract: Some(30.0),
            later_retract: Some(300.0),
            x_position: Some(0.0),
            y_position: Some(0.0),
            z_position: Some(0.0),
            retract_method: None,

            machine_gcode_flavor: GCodeFlavor::default(),
        }
    }
}

impl FilamentChangeConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the config.
    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("initial_retract", self.initial_retract),
            ("later_retract", self.later_retract),
            ("x_position", self.x_position),
            ("y_position", self.y_position),
            ("z_position", self.z_position),
        ];
        for (key, value) in numbers {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(Error::Config(format!("{} must be a finite number", key)));
                }
            }
        }
        if let Some(z) = self.z_position {
            if z < 0.0 {
                return Err(Error::Config(format!(
                    "z_position must be >= 0, got {}",
                    z
                )));
            }
        }
        Ok(())
    }

    /// Copy the host-owned settings into this config.
    ///
    /// Leaves the current flavor in place when the host has none to offer.
    pub fn initialize<H: HostSettings + ?Sized>(&mut self, host: &H) {
        if let Some(flavor) = host.gcode_flavor() {
            self.machine_gcode_flavor = flavor;
        }
    }

    /// The retract method to use: the configured one, or the flavor's default.
    pub fn resolved_retract_method(&self) -> RetractMethod {
        self.retract_method
            .unwrap_or_else(|| self.machine_gcode_flavor.default_retract_method())
    }

    /// The four raw mesh lists, color 1 first.
    pub fn color_meshes(&self) -> [&str; COLOR_GROUP_COUNT] {
        [
            &self.color1_meshes,
            &self.color2_meshes,
            &self.color3_meshes,
            &self.color4_meshes,
        ]
    }

    /// Enable or disable the pass.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.plugin_enabled = enabled;
        self
    }

    /// Set the mesh list of a color group (1-4). Other group numbers are ignored.
    pub fn with_color_meshes(mut self, group: usize, meshes: &str) -> Self {
        let slot = match group {
            1 => &mut self.color1_meshes,
            2 => &mut self.color2_meshes,
            3 => &mut self.color3_meshes,
            4 => &mut self.color4_meshes,
            _ => return self,
        };
        *slot = meshes.to_string();
        self
    }

    /// Use the firmware's filament change settings.
    pub fn with_firmware_config(mut self, firmware_config: bool) -> Self {
        self.firmware_config = firmware_config;
        self
    }

    /// Set initial and later retraction distances.
    pub fn with_retract(mut self, initial: Option<f64>, later: Option<f64>) -> Self {
        self.initial_retract = initial;
        self.later_retract = later;
        self
    }

    /// Set the head position for the change.
    pub fn with_position(mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Self {
        self.x_position = x;
        self.y_position = y;
        self.z_position = z;
        self
    }

    /// Set the retract method explicitly.
    pub fn with_retract_method(mut self, method: RetractMethod) -> Self {
        self.retract_method = Some(method);
        self
    }

    /// Set the machine flavor.
    pub fn with_gcode_flavor(mut self, flavor: GCodeFlavor) -> Self {
        self.machine_gcode_flavor = flavor;
        self
    }
}

impl fmt::Display for FilamentChangeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let assigned = self
            .color_meshes()
            .iter()
            .filter(|meshes| !meshes.is_empty())
            .count();
        write!(
            f,
            "FilamentChangeConfig(enabled={}, color_groups={}, firmware_config={}, flavor={})",
            self.plugin_enabled, assigned, self.firmware_config, self.machine_gcode_flavor
        )
    }
}
