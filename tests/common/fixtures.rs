//! Test fixtures: MIPAV palette text in a few characteristic shapes.

/// Render rows as MIPAV text, one "R G B" line each.
pub fn mipav_text(rows: &[[u8; 3]]) -> String {
    rows.iter()
        .map(|[r, g, b]| format!("{r} {g} {b}\n"))
        .collect()
}

/// Black to white, one step per index
pub fn gray_rows() -> Vec<[u8; 3]> {
    (0..=255u8).map(|v| [v, v, v]).collect()
}

/// Black to red over the first half, red to yellow over the second
pub fn hot_rows() -> Vec<[u8; 3]> {
    (0..256usize)
        .map(|i| {
            if i < 128 {
                [(i * 2) as u8, 0, 0]
            } else {
                [255, ((i - 128) * 2) as u8, 0]
            }
        })
        .collect()
}

/// Flat dark blue with a hard switch to orange at index 128
pub fn step_rows() -> Vec<[u8; 3]> {
    (0..256usize)
        .map(|i| if i < 128 { [10, 20, 120] } else { [250, 140, 0] })
        .collect()
}

/// A smooth curve that needs many control points
pub fn wave_rows() -> Vec<[u8; 3]> {
    (0..256usize)
        .map(|i| {
            let t = i as f64 / 255.0;
            let r = (128.0 + 127.0 * (t * 9.0).sin()).round() as u8;
            let g = (255.0 * t * t).round() as u8;
            let b = (128.0 + 127.0 * (t * 5.0).cos()).round() as u8;
            [r, g, b]
        })
        .collect()
}

/// `alpha = round_half_even(i / 2)`
pub fn ramp_alpha(i: usize) -> u8 {
    let half = i / 2;
    (if i % 2 == 1 && half % 2 == 1 { half + 1 } else { half }) as u8
}
