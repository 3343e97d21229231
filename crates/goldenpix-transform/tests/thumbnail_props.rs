//! Property tests for scaling and thumbnails

use goldenpix_core::PixelBuffer;
use goldenpix_transform::{ScaleMethod, scale_to_size, thumbnail, thumbnail_dimensions};
use proptest::prelude::*;

fn arb_buffer() -> impl Strategy<Value = PixelBuffer> {
    (1u32..40, 1u32..40).prop_flat_map(|(w, h)| {
        proptest::collection::vec(any::<u32>(), (w * h) as usize)
            .prop_map(move |data| PixelBuffer::from_data(w, h, data).unwrap())
    })
}

fn arb_method() -> impl Strategy<Value = ScaleMethod> {
    prop_oneof![
        Just(ScaleMethod::Sampling),
        Just(ScaleMethod::AreaMap),
    ]
}

proptest! {
    #[test]
    fn scale_to_own_size_is_identity(pix in arb_buffer(), method in arb_method()) {
        let out = scale_to_size(&pix, pix.width(), pix.height(), method).unwrap();
        prop_assert_eq!(out, pix);
    }

    #[test]
    fn thumbnail_at_own_size_is_identity(pix in arb_buffer()) {
        let out = thumbnail(&pix, pix.max_dimension()).unwrap();
        prop_assert_eq!(out, pix);
    }

    #[test]
    fn thumbnail_is_deterministic(pix in arb_buffer(), target in 1u32..64) {
        let a = thumbnail(&pix, target);
        let b = thumbnail(&pix, target);
        match (a, b) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "thumbnail results disagree"),
        }
    }

    #[test]
    fn thumbnail_longest_side_is_target(
        w in 1u32..5000,
        h in 1u32..5000,
        target in 1u32..1000,
    ) {
        if let Ok((tw, th)) = thumbnail_dimensions(w, h, target) {
            prop_assert_eq!(tw.max(th), target);
            // Shorter side never exceeds the exact ratio
            let exact = target as f64 * w.min(h) as f64 / w.max(h) as f64;
            prop_assert!((tw.min(th) as f64) <= exact + 1e-9);
            prop_assert!((tw.min(th) as f64) > exact - 1.0);
        }
    }
}
