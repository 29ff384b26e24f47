pub mod io;
pub mod ops;
mod u8;

pub use self::ops::{close, normalize};
pub use self::u8::{GrayImageU8, ImageU8};
