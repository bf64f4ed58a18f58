use serde::{Deserialize, Serialize};

use crate::gray16;

/// One RGB pixel with full 16-bit components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel16 {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Pixel16 {
    pub const fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }

    /// A neutral pixel with all channels at `level`.
    pub const fn splat(level: u16) -> Self {
        Self::new(level, level, level)
    }

    #[inline]
    pub fn gray(&self) -> u16 {
        gray16(self.r, self.g, self.b)
    }
}

impl From<[u16; 3]> for Pixel16 {
    fn from([r, g, b]: [u16; 3]) -> Self {
        Self::new(r, g, b)
    }
}
