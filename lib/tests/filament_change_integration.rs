//! End-to-end filament change tests.
//!
//! These tests run the complete pass over realistic layer sequences,
//! including:
//! - G-code file splitting and joining around the pass
//! - Color transitions across and within layers
//! - Firmware defaults and host flavor handling
//! - Configuration loaded from JSON

use filament_change::config::{FilamentChangeConfig, GCodeFlavor, RetractMethod};
use filament_change::gcode::{FilamentChangeByMesh, GCode};

const PRINT: &str = "\
;FLAVOR:Marlin
;Generated with Cura
G28
;LAYER:0
;MESH:NONMESH
;TYPE:SKIRT
G1 X10 Y10 E1
;MESH:body.stl
;TYPE:WALL-OUTER
G1 X20 Y20 E2
;MESH:eye_left.stl
G1 X21 Y21 E3
;LAYER:1
;MESH:body.stl
G1 X20 Y20 E4
;MESH:eye_left.stl
G1 X21 Y21 E5
;MESH:eye_right.stl
G1 X22 Y22 E6
;LAYER:2
;MESH:hat.3mf
G1 X30 Y30 E7
;End of Gcode
";

fn print_config() -> FilamentChangeConfig {
    FilamentChangeConfig::new()
        .with_enabled(true)
        .with_color_meshes(1, "body")
        .with_color_meshes(2, "eye_left,eye_right")
        .with_color_meshes(3, "hat")
}

fn inserted_lines(output: &str) -> Vec<&str> {
    output.lines().filter(|line| line.starts_with("M600")).collect()
}

/// A whole file goes through split → pass → join.
#[test]
fn test_full_file_pass() {
    let gcode = GCode::from_string(PRINT.to_string());
    let layers = gcode.layers();
    assert_eq!(layers.len(), 4);

    let pass = FilamentChangeByMesh::new(print_config());
    let (output_layers, report) = pass.execute_with_report(layers.clone());
    assert_eq!(output_layers.len(), layers.len());
    assert_eq!(output_layers[0], layers[0]);

    let output = GCode::from_layers(&output_layers);
    let changes = inserted_lines(output.content());

    // body(1) → eye(2) on layer 0, eye(2) → body(1) and body(1) → eye(2) on layer 1,
    // eye(2) → hat(3) on layer 2; eye_left → eye_right stays on color 2.
    assert_eq!(changes.len(), 4);
    assert_eq!(report.num_changes(), 4);
    assert!(changes[0].ends_with("actual color = 1; color to load = 2"));
    assert!(changes[1].ends_with("actual color = 2; color to load = 1"));
    assert!(changes[2].ends_with("actual color = 1; color to load = 2"));
    assert!(changes[3].ends_with("actual color = 2; color to load = 3"));

    // Every M600 directly follows the marker that triggered it.
    let lines: Vec<&str> = output.content().lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        if line.starts_with("M600") {
            assert!(lines[idx - 1].starts_with(";MESH:"));
        }
    }

    // Removing the inserted lines gives back the original file.
    let stripped: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| !line.starts_with("M600"))
        .collect();
    let original: Vec<&str> = PRINT.lines().collect();
    assert_eq!(stripped, original);
}

/// Meshes of the same color never trigger a change between each other.
#[test]
fn test_same_color_meshes() {
    let config = FilamentChangeConfig::new()
        .with_enabled(true)
        .with_color_meshes(1, "body,eye_left,eye_right,hat");
    let layers = GCode::from_string(PRINT.to_string()).layers();

    let output = FilamentChangeByMesh::new(config).execute(layers.clone());
    assert_eq!(output, layers);
}

/// RepRap flavor picks the `L` retraction letter unless overridden.
#[test]
fn test_reprap_flavor_from_host() {
    let mut config = print_config();
    config.initialize(&GCodeFlavor::RepRap);

    let layers = vec![";MESH:body.stl".to_string(), ";MESH:hat.stl".to_string()];
    let output = FilamentChangeByMesh::new(config.clone()).execute(layers.clone());
    assert!(output[1].contains("M600 E30.00 L300.00 X0.00 Y0.00 ;"));

    let config = config.with_retract_method(RetractMethod::U);
    let output = FilamentChangeByMesh::new(config).execute(layers);
    assert!(output[1].contains(" U300.00 "));
}

/// Configuration loaded from JSON behaves like the builder.
#[test]
fn test_config_from_json() {
    let json = r#"{
        "plugin_enabled": true,
        "color1_meshes": "body",
        "color2_meshes": "hat",
        "firmware_config": true,
        "z_position": 10
    }"#;
    let config = FilamentChangeConfig::from_json(json).unwrap();

    let layers = vec![
        ";LAYER:0\n;MESH:body.stl".to_string(),
        ";LAYER:1\n;MESH:hat.stl".to_string(),
    ];
    let output = FilamentChangeByMesh::new(config).execute(layers);
    assert_eq!(
        output[1],
        ";LAYER:1\n;MESH:hat.stl\nM600 Z10.00 ; Generated by FilamentChangeByMesh plugin - \
         actual color = 1; color to load = 2"
    );
}

/// Config and G-code files on disk.
#[test]
fn test_files_on_disk() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("filament_change.json");
    let input_path = dir.path().join("input.gcode");
    let output_path = dir.path().join("output.gcode");

    std::fs::write(&config_path, print_config().to_json().unwrap()).unwrap();
    GCode::from_string(PRINT.to_string())
        .write_to_file(&input_path)
        .unwrap();

    let config = FilamentChangeConfig::from_file(&config_path).unwrap();
    let input = GCode::read_from_file(&input_path).unwrap();
    let output = FilamentChangeByMesh::new(config).execute(input.layers());
    GCode::from_layers(&output).write_to_file(&output_path).unwrap();

    let written = GCode::read_from_file(&output_path).unwrap();
    assert_eq!(inserted_lines(written.content()).len(), 4);
    assert!(written.content().ends_with(";End of Gcode\n"));
}
