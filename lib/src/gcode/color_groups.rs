//! Mesh name to color group lookup.

use crate::config::COLOR_GROUP_COUNT;
use std::collections::HashMap;

/// Color group number. Groups are 1-based; [`UNASSIGNED`] marks a mesh in no group.
pub type ColorGroup = u8;

/// Color group of a mesh that is not listed anywhere.
pub const UNASSIGNED: ColorGroup = 0;

/// Lookup from mesh identifier to its color group.
///
/// Names are matched exactly and case-sensitively. Lists are split on `,`
/// without trimming, so `"a, b"` assigns `"a"` and `" b"`.
#[derive(Debug, Clone, Default)]
pub struct ColorGroupIndex {
    groups: HashMap<String, ColorGroup>,
}

impl ColorGroupIndex {
    /// Build the index from the raw comma-separated lists, color 1 first.
    ///
    /// A mesh listed under several colors resolves to the highest-numbered one.
    pub fn new(color_meshes: [&str; COLOR_GROUP_COUNT]) -> Self {
        let mut groups = HashMap::new();
        for (idx, meshes) in color_meshes.iter().enumerate() {
            let group = (idx + 1) as ColorGroup;
            for mesh in meshes.split(',') {
                groups.insert(mesh.to_string(), group);
            }
        }
        Self { groups }
    }

    /// Color group of a mesh, or [`UNASSIGNED`].
    pub fn resolve(&self, mesh_id: &str) -> ColorGroup {
        self.groups.get(mesh_id).copied().unwrap_or(UNASSIGNED)
    }

    /// Number of distinct mesh names in the index.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
