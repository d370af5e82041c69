//! 8-bit grayscale page buffers.
//!
//! - [`ImageU8`]: borrowed, read-only view used for every detection query.
//! - [`GrayImageU8`]: owned buffer that the transformer mutates in place.
//! - [`io`]: PNG/JSON helpers on top of the `image` crate.
pub mod gray;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::gray::{GrayImageU8, BLACK, WHITE};
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
