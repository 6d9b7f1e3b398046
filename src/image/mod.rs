pub mod f32;
pub mod frame;
pub mod io;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::frame::{luma_of, Frame};
pub use self::traits::{ImageView, ImageViewMut, Rows};
