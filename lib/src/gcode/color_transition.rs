//! Color transition tracking across a whole print.
//!
//! The tracker keeps the color currently loaded in the printer while it walks
//! every layer in print order. When a mesh boundary introduces a different
//! color group, the change command is appended to that marker line.

use super::change_command::ChangeCommand;
use super::color_groups::{ColorGroup, ColorGroupIndex, UNASSIGNED};
use super::mesh_scanner::LayerMeshScanner;
use tracing::debug;

/// State carried across the layers of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Color currently loaded; [`UNASSIGNED`] until the first assigned mesh.
    pub active_color: ColorGroup,
}

/// A single inserted color change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorChange {
    /// Layer index within the sequence
    pub layer_index: usize,

    /// Marker line the command was appended to
    pub line_index: usize,

    /// Mesh that triggered the change
    pub mesh: String,

    /// Color loaded before the change
    pub from_color: ColorGroup,

    /// Color loaded by the change
    pub to_color: ColorGroup,
}

/// All changes inserted by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilamentChangeReport {
    /// Changes in print order
    pub changes: Vec<ColorChange>,

    /// First color loaded in the print, if any mesh was assigned
    pub first_color: Option<ColorGroup>,

    /// Color loaded at the end of the print
    pub last_color: Option<ColorGroup>,
}

impl FilamentChangeReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any change was inserted.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Number of inserted changes.
    pub fn num_changes(&self) -> usize {
        self.changes.len()
    }

    /// Changes inserted on a given layer.
    pub fn changes_on_layer(&self, layer_index: usize) -> impl Iterator<Item = &ColorChange> {
        self.changes
            .iter()
            .filter(move |change| change.layer_index == layer_index)
    }
}

/// Walks the layers of one print and splices in color changes.
///
/// One tracker serves exactly one run; its state is never shared.
#[derive(Debug)]
pub struct ColorTransitionTracker<'a> {
    groups: &'a ColorGroupIndex,
    command: &'a ChangeCommand,
    state: ScanState,
    report: FilamentChangeReport,
}

impl<'a> ColorTransitionTracker<'a> {
    /// Create a tracker with no color loaded.
    pub fn new(groups: &'a ColorGroupIndex, command: &'a ChangeCommand) -> Self {
        Self {
            groups,
            command,
            state: ScanState::default(),
            report: FilamentChangeReport::new(),
        }
    }

    /// Current scan state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Decide what a mesh boundary does to the loaded color.
    ///
    /// Returns the previously loaded color when a change command must be
    /// inserted. The first assigned color of the print is loaded silently.
    fn observe(&mut self, mesh_id: &str) -> Option<(ColorGroup, ColorGroup)> {
        let target = self.groups.resolve(mesh_id);
        if target == UNASSIGNED || target == self.state.active_color {
            return None;
        }

        let previous = self.state.active_color;
        self.state.active_color = target;
        if self.report.first_color.is_none() {
            self.report.first_color = Some(target);
        }
        self.report.last_color = Some(target);

        (previous != UNASSIGNED).then_some((previous, target))
    }

    /// Process one layer, returning its text with any commands appended.
    pub fn process_layer(&mut self, layer_index: usize, layer: &str) -> String {
        let mut lines: Option<Vec<String>> = None;

        for marker in LayerMeshScanner::new(layer) {
            let Some((from, to)) = self.observe(marker.mesh_id) else {
                continue;
            };

            debug!(
                layer = layer_index,
                line = marker.line_index,
                mesh = marker.mesh_id,
                from,
                to,
                "inserting filament change"
            );

            let lines = lines.get_or_insert_with(|| layer.split('\n').map(str::to_owned).collect());
            lines[marker.line_index].push_str(&self.command.for_transition(from, to));

            self.report.changes.push(ColorChange {
                layer_index,
                line_index: marker.line_index,
                mesh: marker.mesh_id.to_string(),
                from_color: from,
                to_color: to,
            });
        }

        match lines {
            Some(lines) => lines.join("\n"),
            None => layer.to_string(),
        }
    }

    /// Finish the run and hand back the report.
    pub fn finish(self) -> FilamentChangeReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcode::change_command::ChangeCommandBuilder;

    fn setup() -> (ColorGroupIndex, ChangeCommand) {
        let groups = ColorGroupIndex::new(["red", "green", "blue", ""]);
        let command = ChangeCommandBuilder::new().build();
        (groups, command)
    }

    #[test]
    fn test_first_color_is_silent() {
        let (groups, command) = setup();
        let mut tracker = ColorTransitionTracker::new(&groups, &command);

        let layer = ";MESH:red.stl\nG1 X1";
        assert_eq!(tracker.process_layer(0, layer), layer);
        assert_eq!(tracker.state().active_color, 1);

        let report = tracker.finish();
        assert!(!report.has_changes());
        assert_eq!(report.first_color, Some(1));
    }

    #[test]
    fn test_transition_appends_to_marker_line() {
        let (groups, command) = setup();
        let mut tracker = ColorTransitionTracker::new(&groups, &command);

        tracker.process_layer(0, ";MESH:red.stl\nG1 X1");
        let out = tracker.process_layer(1, "G0 Z0.4\n;MESH:green.stl\nG1 X2");

        assert_eq!(
            out,
            "G0 Z0.4\n;MESH:green.stl\nM600 ; Generated by FilamentChangeByMesh plugin - \
             actual color = 1; color to load = 2\nG1 X2"
        );

        let report = tracker.finish();
        assert_eq!(report.num_changes(), 1);
        assert_eq!(
            report.changes[0],
            ColorChange {
                layer_index: 1,
                line_index: 1,
                mesh: "green".to_string(),
                from_color: 1,
                to_color: 2,
            }
        );
        assert_eq!(report.last_color, Some(2));
    }

    #[test]
    fn test_repeats_and_unassigned_are_ignored() {
        let (groups, command) = setup();
        let mut tracker = ColorTransitionTracker::new(&groups, &command);

        let layer = ";MESH:red.stl\n;MESH:cat.stl\n;MESH:red.stl\n;MESH:NONMESH\n;MESH:red.obj";
        assert_eq!(tracker.process_layer(0, layer), layer);
        assert_eq!(tracker.state().active_color, 1);
        assert!(!tracker.finish().has_changes());
    }

    #[test]
    fn test_multiple_changes_in_one_layer() {
        let (groups, command) = setup();
        let mut tracker = ColorTransitionTracker::new(&groups, &command);

        let out = tracker.process_layer(0, ";MESH:red.stl\n;MESH:blue.stl\n;MESH:red.stl");
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].ends_with("actual color = 1; color to load = 3"));
        assert_eq!(lines[3], ";MESH:red.stl");
        assert!(lines[4].ends_with("actual color = 3; color to load = 1"));

        let report = tracker.finish();
        assert_eq!(report.num_changes(), 2);
        assert_eq!(report.changes_on_layer(0).count(), 2);
        assert_eq!(report.changes_on_layer(1).count(), 0);
    }

    #[test]
    fn test_state_spans_layers() {
        let (groups, command) = setup();
        let mut tracker = ColorTransitionTracker::new(&groups, &command);

        tracker.process_layer(0, ";MESH:green.stl");
        tracker.process_layer(1, "G1 X1\nG1 X2");
        let out = tracker.process_layer(2, ";MESH:green.stl\n;MESH:blue.stl");

        assert!(out.contains("actual color = 2; color to load = 3"));
        assert_eq!(tracker.finish().changes[0].layer_index, 2);
    }
}
