//! goldenpix-transform - Thumbnail normalization
//!
//! Brings images to a comparable, bounded size before comparison:
//!
//! - Scaling by nearest-neighbor sampling or area mapping
//! - Aspect-preserving thumbnails bounded by the longest side
//! - Center-cropped thumbnails of an exact size

mod error;
pub mod scale;
pub mod thumbnail;

pub use error::{TransformError, TransformResult};
pub use scale::{ScaleMethod, scale_to_size};
pub use thumbnail::{
    DEFAULT_THUMBNAIL_SIZE, extract_thumbnail, thumbnail, thumbnail_dimensions,
    thumbnail_with_method,
};
