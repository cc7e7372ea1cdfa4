use serde::{Deserialize, Serialize};

/// Store the raw bits of a u32 in an f32 slot.
///
/// The result is meaningless as a number; it only survives copies, never
/// arithmetic. The shader reads it back with `floatBitsToUint`.
#[inline]
pub fn smuggle_u32(value: u32) -> f32 {
    f32::from_bits(value)
}

/// Inverse of [`smuggle_u32`].
#[inline]
pub fn recover_u32(lane: f32) -> u32 {
    lane.to_bits()
}

/// Texel formats of the four packed buffers, named after the GL internal
/// formats the ray-marcher was written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TexelFormat {
    /// 4 × f32. Positions (lane 3 carries u32 bits) and attributes.
    Rgba32Float,
    /// 3 × f32. Neighbor displacement vectors.
    Rgb32Float,
    /// 1 × f32 carrying u32 bits. Neighbor indices.
    R32Float,
}

impl TexelFormat {
    pub fn channels(self) -> u32 {
        match self {
            TexelFormat::Rgba32Float => 4,
            TexelFormat::Rgb32Float => 3,
            TexelFormat::R32Float => 1,
        }
    }

    /// Bytes per texel; every channel is a 32-bit float.
    pub fn texel_size(self) -> u32 {
        self.channels() * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smuggle_roundtrip_boundaries() {
        for v in [0u32, 1, 2, 255, 0x007F_FFFF, 0x0080_0000, 30_268_338, u32::MAX / 2] {
            assert_eq!(recover_u32(smuggle_u32(v)), v, "bits of {v} not preserved");
        }
    }

    #[test]
    fn smuggle_is_not_a_numeric_cast() {
        // 1 as bits is the smallest subnormal, not 1.0
        assert_ne!(smuggle_u32(1), 1.0);
        assert_eq!(smuggle_u32(1).to_bits(), 1);
        assert_eq!(smuggle_u32(0), 0.0);
    }

    #[test]
    fn channel_counts() {
        assert_eq!(TexelFormat::Rgba32Float.channels(), 4);
        assert_eq!(TexelFormat::Rgb32Float.channels(), 3);
        assert_eq!(TexelFormat::R32Float.channels(), 1);
        assert_eq!(TexelFormat::Rgb32Float.texel_size(), 12);
    }
}
