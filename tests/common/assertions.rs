//! Assertion helpers for tests.

use lut_compress::{ControlPointSet, DensePalette, Tolerance};
use niivue_lut::output::NiivueColormap;
use pretty_assertions::assert_eq;
use std::path::Path;

/// Read a written colormap and check its structural invariants
pub fn read_colormap(path: &Path) -> (NiivueColormap, ControlPointSet) {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    assert!(text.ends_with('\n'), "Output must end with a newline");

    let map = NiivueColormap::from_json(&text).expect("Output is not NiiVue JSON");
    let set = ControlPointSet::try_from(map.clone()).expect("Output violates control point rules");
    (map, set)
}

/// Assert the file reproduces `palette` within `tolerance` on every channel
pub fn assert_reproduces(path: &Path, palette: &DensePalette, tolerance: Tolerance) {
    let (_, set) = read_colormap(path);
    assert!(
        set.satisfies(palette, tolerance),
        "{} does not reproduce {} within {tolerance}: max error {:?}",
        path.display(),
        palette.name(),
        set.max_error(palette)
    );
    for point in set.points() {
        assert_eq!(
            point.color,
            palette.get(usize::from(point.position)),
            "Control point at {} is not the palette value",
            point.position
        );
    }
}
