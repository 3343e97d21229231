//! Thumbnail regression test
//!
//! Checks thumbnail geometry for portrait, landscape and square sources and
//! that both resampling methods keep solid colors intact.

use goldenpix_transform::{
    ScaleMethod, TransformError, extract_thumbnail, thumbnail, thumbnail_with_method,
};
use goldenpix_test::{RegParams, fixtures};

#[test]
fn thumbnail_reg() {
    let mut rp = RegParams::new("thumbnail");

    // --- Test 1: Portrait source bounded by its height ---
    let portrait = fixtures::gradient(1000, 2000);
    let thumb = thumbnail(&portrait, 500).expect("portrait thumbnail");
    rp.compare_values(250.0, thumb.width() as f64, 0.0);
    rp.compare_values(500.0, thumb.height() as f64, 0.0);

    // --- Test 2: Landscape source bounded by its width ---
    let landscape = fixtures::gradient(1920, 1080);
    let thumb = thumbnail(&landscape, 500).expect("landscape thumbnail");
    rp.compare_values(500.0, thumb.width() as f64, 0.0);
    rp.compare_values(281.0, thumb.height() as f64, 0.0);

    // --- Test 3: Solid colors survive both methods ---
    let solid = fixtures::solid(640, 480, 0xff12_3456);
    for method in [ScaleMethod::Sampling, ScaleMethod::AreaMap] {
        let t = thumbnail_with_method(&solid, 100, method).expect("solid thumbnail");
        let expected = fixtures::solid(100, 75, 0xff12_3456);
        rp.compare_pix(&expected, &t);
    }

    // --- Test 4: Gradient corners are preserved by sampling ---
    let grad = fixtures::gradient(64, 64);
    let t = thumbnail(&grad, 32).expect("gradient thumbnail");
    let (r, g, _) = t.get_rgb(0, 0).expect("origin");
    rp.compare_values(0.0, r as f64, 8.0);
    rp.compare_values(0.0, g as f64, 8.0);
    let (r, g, _) = t.get_rgb(31, 31).expect("corner");
    rp.compare_values(255.0, r as f64, 8.0);
    rp.compare_values(255.0, g as f64, 8.0);

    // --- Test 5: Golden brought to the candidate's thumbnail size ---
    let golden = fixtures::gradient(1080, 2160);
    let candidate = thumbnail(&portrait, 500).expect("candidate");
    let g = extract_thumbnail(&golden, candidate.width(), candidate.height())
        .expect("golden thumbnail");
    rp.compare_values(candidate.width() as f64, g.width() as f64, 0.0);
    rp.compare_values(candidate.height() as f64, g.height() as f64, 0.0);

    // --- Test 6: Degenerate inputs ---
    let sliver = fixtures::solid(4000, 2, 0xff00_0000);
    let degenerate = matches!(thumbnail(&sliver, 500), Err(TransformError::Shape { .. }));
    rp.compare_values(1.0, if degenerate { 1.0 } else { 0.0 }, 0.0);
    let zero = matches!(
        thumbnail(&solid, 0),
        Err(TransformError::InvalidParameters(_))
    );
    rp.compare_values(1.0, if zero { 1.0 } else { 0.0 }, 0.0);

    // --- Test 7: Area mapping averages a fine checkerboard to gray ---
    let board = fixtures::checkerboard(64, 64, 1, 0xff00_0000, 0xffff_ffff);
    let gray = thumbnail_with_method(&board, 32, ScaleMethod::AreaMap).expect("area map");
    let expected = fixtures::solid(32, 32, 0xff80_8080);
    rp.compare_pix(&expected, &gray);
    // Sampling picks one cell color per block instead
    let sampled = thumbnail(&board, 32).expect("sampling");
    let (r, _, _) = sampled.get_rgb(0, 0).expect("origin");
    rp.compare_values(1.0, if r == 0 || r == 255 { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "thumbnail regression test failed");
}
