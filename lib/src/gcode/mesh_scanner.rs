//! Mesh boundary detection within one layer.
//!
//! Slicers mark the start of each mesh's geometry with a `;MESH:<file name>`
//! comment. Geometry that belongs to no mesh (skirt, support, ...) is marked
//! `;MESH:NONMESH` and is not a boundary.

use std::iter::Enumerate;
use std::str::Split;

/// Prefix of a mesh boundary marker line.
pub const MESH_MARKER: &str = ";MESH:";

/// Marker of geometry that belongs to no mesh.
pub const NONMESH_MARKER: &str = ";MESH:NONMESH";

/// A mesh boundary marker found in a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshBoundaryMarker<'a> {
    /// Line index within the layer.
    pub line_index: usize,
    /// Mesh file name with its extension stripped.
    pub mesh_id: &'a str,
}

/// Lazily yields the mesh boundary markers of one layer, in line order.
#[derive(Debug, Clone)]
pub struct LayerMeshScanner<'a> {
    lines: Enumerate<Split<'a, char>>,
}

impl<'a> LayerMeshScanner<'a> {
    /// Scan a layer's text.
    pub fn new(layer: &'a str) -> Self {
        Self {
            lines: layer.split('\n').enumerate(),
        }
    }
}

impl<'a> Iterator for LayerMeshScanner<'a> {
    type Item = MeshBoundaryMarker<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.find_map(|(line_index, line)| {
            parse_mesh_marker(line).map(|mesh_id| MeshBoundaryMarker {
                line_index,
                mesh_id,
            })
        })
    }
}

/// Mesh identifier of a marker line, or `None` for any other line.
pub fn parse_mesh_marker(line: &str) -> Option<&str> {
    if line.starts_with(NONMESH_MARKER) {
        return None;
    }
    let file_name = line.strip_prefix(MESH_MARKER)?;
    Some(strip_extension(file_name))
}

/// Drop everything from the last `.` on.
fn strip_extension(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name)
}
