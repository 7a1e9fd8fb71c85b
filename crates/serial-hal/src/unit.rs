//! Transfer unit definitions

use serde::{Deserialize, Serialize};

/// Character size the peripheral is configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameWidth {
    /// 5 to 8 data bits, one byte per unit
    Narrow,
    /// 9 data bits, one 16-bit word per unit
    Wide,
}

impl FrameWidth {
    /// Check if units are 16-bit words
    pub fn is_wide(&self) -> bool {
        matches!(self, FrameWidth::Wide)
    }

    /// Storage bytes taken by one unit
    pub fn unit_bytes(&self) -> usize {
        match self {
            FrameWidth::Narrow => 1,
            FrameWidth::Wide => 2,
        }
    }
}

impl Default for FrameWidth {
    fn default() -> Self {
        FrameWidth::Narrow
    }
}

/// One element of the serial stream
pub trait Unit: Copy + Default + Send + Sync + 'static {
    /// Frame width this unit type stores
    const WIDTH: FrameWidth;
}

impl Unit for u8 {
    const WIDTH: FrameWidth = FrameWidth::Narrow;
}

impl Unit for u16 {
    const WIDTH: FrameWidth = FrameWidth::Wide;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_width_matches_size() {
        assert_eq!(<u8 as Unit>::WIDTH.unit_bytes(), std::mem::size_of::<u8>());
        assert_eq!(<u16 as Unit>::WIDTH.unit_bytes(), std::mem::size_of::<u16>());
        assert!(<u16 as Unit>::WIDTH.is_wide());
        assert!(!FrameWidth::default().is_wide());
    }
}
