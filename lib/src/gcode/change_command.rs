//! `M600` filament change command template.
//!
//! The template is built once per run from the configuration. Each inserted
//! change appends its own "from color / to color" text to it.

use super::color_groups::ColorGroup;
use crate::config::{FilamentChangeConfig, RetractMethod};
use std::fmt::Write;

/// Name written into the trailing comment of every generated command.
pub const GENERATOR_NAME: &str = "FilamentChangeByMesh";

/// Builder for the change command template.
#[derive(Debug, Clone, Default)]
pub struct ChangeCommandBuilder {
    use_firmware_defaults: bool,
    initial_retract: Option<f64>,
    later_retract: Option<f64>,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    retract_method: RetractMethod,
}

impl ChangeCommandBuilder {
    /// Create a builder with every parameter absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from the `M600` settings of a config.
    pub fn from_config(config: &FilamentChangeConfig) -> Self {
        Self {
            use_firmware_defaults: config.firmware_config,
            initial_retract: config.initial_retract,
            later_retract: config.later_retract,
            x: config.x_position,
            y: config.y_position,
            z: config.z_position,
            retract_method: config.resolved_retract_method(),
        }
    }

    /// Leave retraction and X/Y to the firmware.
    pub fn use_firmware_defaults(mut self, enabled: bool) -> Self {
        self.use_firmware_defaults = enabled;
        self
    }

    /// Set initial and later retraction distances.
    pub fn retract(mut self, initial: Option<f64>, later: Option<f64>) -> Self {
        self.initial_retract = initial;
        self.later_retract = later;
        self
    }

    /// Set the change position.
    pub fn position(mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Set the letter used for the later retraction.
    pub fn retract_method(mut self, method: RetractMethod) -> Self {
        self.retract_method = method;
        self
    }

    /// Assemble the template.
    ///
    /// Retractions need a non-zero value, X and Y any value; all of those are
    /// skipped under firmware defaults. Z needs a positive value and is
    /// written even under firmware defaults.
    pub fn build(&self) -> ChangeCommand {
        let mut text = String::from("\nM600");

        if !self.use_firmware_defaults {
            if let Some(initial) = self.initial_retract.filter(|v| *v != 0.0) {
                let _ = write!(text, " E{:.2}", initial);
            }
            if let Some(later) = self.later_retract.filter(|v| *v != 0.0) {
                let _ = write!(text, " {}{:.2}", self.retract_method.letter(), later);
            }
            if let Some(x) = self.x {
                let _ = write!(text, " X{:.2}", x);
            }
            if let Some(y) = self.y {
                let _ = write!(text, " Y{:.2}", y);
            }
        }
        if let Some(z) = self.z.filter(|v| *v > 0.0) {
            let _ = write!(text, " Z{:.2}", z);
        }

        let _ = write!(text, " ; Generated by {} plugin - ", GENERATOR_NAME);
        ChangeCommand { text }
    }
}

/// Immutable change command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeCommand {
    text: String,
}

impl ChangeCommand {
    /// The template text: a leading line break, `M600` with its parameters and
    /// the open trailing comment.
    pub fn template(&self) -> &str {
        &self.text
    }

    /// Full text to append to a marker line for a change between two colors.
    pub fn for_transition(&self, from: ColorGroup, to: ColorGroup) -> String {
        format!(
            "{}actual color = {}; color to load = {}",
            self.text, from, to
        )
    }
}
