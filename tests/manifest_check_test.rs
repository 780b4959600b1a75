//! Manifest generation and validation of written colormaps.

mod common;

use common::{fixtures, TestWorkspace};
use lut_compress::Tolerance;
use niivue_lut::models::AlphaRule;
use niivue_lut::output::{write_manifest, MANIFEST_FILE};
use niivue_lut::services::{check_file, ConversionSettings, Converter};
use niivue_lut::sources::mipav::parse_palette;
use niivue_lut::sources::{MipavFile, PaletteSource};
use pretty_assertions::assert_eq;

fn convert_folder(ws: &TestWorkspace, tolerance: u8) {
    let sources: Vec<Box<dyn PaletteSource>> = MipavFile::discover(&ws.src())
        .unwrap()
        .into_iter()
        .map(|f| Box::new(f) as Box<dyn PaletteSource>)
        .collect();
    Converter::new(ConversionSettings {
        tolerance: Tolerance::uniform(tolerance),
        output_dir: ws.out(),
        ..ConversionSettings::default()
    })
    .convert_all(&sources);
}

#[test]
fn test_manifest_after_conversion() {
    let ws = TestWorkspace::new();
    ws.add_palette("winter.txt", &fixtures::gray_rows());
    ws.add_palette("autumn.txt", &fixtures::hot_rows());
    convert_folder(&ws, 2);

    let entries = write_manifest(&ws.out()).unwrap();
    assert_eq!(entries, vec!["autumn.json", "winter.json"]);

    // A second run must not list the manifest itself.
    let again = write_manifest(&ws.out()).unwrap();
    assert_eq!(again, entries);
    assert_eq!(
        ws.outputs(),
        vec!["autumn.json", MANIFEST_FILE, "winter.json"]
    );
}

#[test]
fn test_check_against_source_palette() {
    let ws = TestWorkspace::new();
    ws.add_palette("wave.txt", &fixtures::wave_rows());
    convert_folder(&ws, 3);

    let palette = parse_palette(
        "wave",
        &fixtures::mipav_text(&fixtures::wave_rows()),
        AlphaRule::Ramp,
    )
    .unwrap();
    let path = ws.out().join("wave.json");

    let loose = check_file(&path, Some(&palette), Tolerance::uniform(3)).unwrap();
    assert!(loose.passed());
    assert!(loose.max_error.unwrap().iter().all(|&e| e <= 3.0));

    let strict = check_file(&path, Some(&palette), Tolerance::uniform(0)).unwrap();
    assert!(!strict.passed());
    assert_eq!(strict.nodes, loose.nodes);
}

#[test]
fn test_check_rejects_unsorted_positions() {
    let ws = TestWorkspace::new();
    std::fs::create_dir(ws.out()).unwrap();
    let path = ws.out().join("bad.json");
    std::fs::write(
        &path,
        r#"{"R":[0,0,0],"G":[0,0,0],"B":[0,0,0],"A":[0,0,0],"I":[0,200,100]}"#,
    )
    .unwrap();

    assert!(check_file(&path, None, Tolerance::default()).is_err());
}
