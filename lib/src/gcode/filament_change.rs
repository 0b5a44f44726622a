//! Filament change by mesh post-processing pass.
//!
//! # Overview
//!
//! Single-extruder printers can still print several colors if the print is
//! paused for a manual filament swap. This pass lets the user assign meshes to
//! up to four color groups and inserts an `M600` wherever the printer starts a
//! mesh of a color other than the loaded one:
//! 1. Build the mesh → color group index from the configured lists
//! 2. Build the `M600` template from the retraction/position settings
//! 3. Walk every layer in print order, tracking the loaded color
//! 4. Append the command to each `;MESH:` marker line that changes the color
//!
//! Layers keep their count and order; only marker lines grow.

use super::change_command::{ChangeCommand, ChangeCommandBuilder};
use super::color_groups::ColorGroupIndex;
use super::color_transition::{ColorTransitionTracker, FilamentChangeReport};
use crate::config::FilamentChangeConfig;
use tracing::{debug, info};

/// The filament change pass.
#[derive(Debug, Clone)]
pub struct FilamentChangeByMesh {
    config: FilamentChangeConfig,
}

impl FilamentChangeByMesh {
    /// Create the pass with the given configuration.
    pub fn new(config: FilamentChangeConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &FilamentChangeConfig {
        &self.config
    }

    /// Check if the pass will modify anything at all.
    pub fn is_enabled(&self) -> bool {
        self.config.plugin_enabled
    }

    /// The change command template this pass inserts.
    pub fn change_command(&self) -> ChangeCommand {
        ChangeCommandBuilder::from_config(&self.config).build()
    }

    /// Insert filament changes into a sequence of layers.
    pub fn execute(&self, layers: Vec<String>) -> Vec<String> {
        self.execute_with_report(layers).0
    }

    /// Insert filament changes and report where they went.
    ///
    /// When the pass is disabled the layers come back untouched with an empty report.
    pub fn execute_with_report(&self, layers: Vec<String>) -> (Vec<String>, FilamentChangeReport) {
        if !self.is_enabled() {
            debug!("filament change by mesh disabled, G-code left unchanged");
            return (layers, FilamentChangeReport::new());
        }

        let groups = ColorGroupIndex::new(self.config.color_meshes());
        let command = self.change_command();
        debug!(
            meshes = groups.len(),
            template = command.template().trim_start(),
            "filament change by mesh configured"
        );

        let mut tracker = ColorTransitionTracker::new(&groups, &command);
        let output: Vec<String> = layers
            .iter()
            .enumerate()
            .map(|(layer_index, layer)| tracker.process_layer(layer_index, layer))
            .collect();
        let report = tracker.finish();

        info!(
            layers = output.len(),
            changes = report.num_changes(),
            "filament change by mesh complete"
        );
        (output, report)
    }
}
