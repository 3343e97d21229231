//! Power-of-two subsampling for large sources

use goldenpix_core::{PixelBuffer, Result};

/// Largest power-of-two sample factor that keeps both halved dimensions
/// above the requested size.
///
/// Returns 1 when the source already fits within `req_width x req_height`.
pub fn calculate_sample_size(width: u32, height: u32, req_width: u32, req_height: u32) -> u32 {
    let mut sample_size = 1;
    if height > req_height || width > req_width {
        let half_height = height / 2;
        let half_width = width / 2;
        while half_height / sample_size > req_height && half_width / sample_size > req_width {
            sample_size *= 2;
        }
    }
    sample_size
}

/// Keep every `factor`-th pixel in both directions, starting at (0, 0).
///
/// Output dimensions are `ceil(width / factor) x ceil(height / factor)`.
pub fn subsample(pix: &PixelBuffer, factor: u32) -> Result<PixelBuffer> {
    let factor = factor.max(1);
    let w = pix.width().div_ceil(factor);
    let h = pix.height().div_ceil(factor);
    let mut data = Vec::with_capacity(w as usize * h as usize);
    for y in (0..pix.height()).step_by(factor as usize) {
        data.extend(pix.row(y).iter().step_by(factor as usize));
    }
    PixelBuffer::from_data(w, h, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_size_fits() {
        assert_eq!(calculate_sample_size(400, 300, 500, 500), 1);
        assert_eq!(calculate_sample_size(500, 500, 500, 500), 1);
    }

    #[test]
    fn test_sample_size_power_of_two() {
        assert_eq!(calculate_sample_size(2000, 4000, 500, 500), 2);
        assert_eq!(calculate_sample_size(4000, 4000, 500, 500), 4);
        assert_eq!(calculate_sample_size(8001, 8001, 500, 500), 8);
        // One dimension already close to the request stops the search
        assert_eq!(calculate_sample_size(4000, 600, 500, 500), 1);
    }

    #[test]
    fn test_subsample() {
        let pix = PixelBuffer::from_data(5, 3, (0..15).collect()).unwrap();
        let sub = subsample(&pix, 2).unwrap();
        assert_eq!(sub.dimensions(), (3, 2));
        assert_eq!(sub.data(), &[0, 2, 4, 10, 12, 14]);
        assert_eq!(subsample(&pix, 1).unwrap(), pix);
    }
}
