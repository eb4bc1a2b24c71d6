//! Z-order (Morton) keys for 2D grid coordinates.
//!
//! The quadtree stores its leaf cells at `morton_index(x, y)` so that cells which are close in
//! space are also close in memory.

/// Interleaves the bits of `x` (even positions) and `y` (odd positions).
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::morton::morton_index;
///
/// assert_eq!(morton_index(0, 0), 0);
/// assert_eq!(morton_index(1, 0), 1);
/// assert_eq!(morton_index(0, 1), 2);
/// assert_eq!(morton_index(3, 0), 5);
/// assert_eq!(morton_index(u32::MAX, u32::MAX), u64::MAX);
/// ```
#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
#[inline]
pub fn morton_index(x: u32, y: u32) -> u64 {
    use std::arch::x86_64::_pdep_u64;
    // SAFETY: the bmi2 target feature is enabled at compile time.
    unsafe {
        _pdep_u64(x as u64, 0x5555_5555_5555_5555) | _pdep_u64(y as u64, 0xAAAA_AAAA_AAAA_AAAA)
    }
}

/// Interleaves the bits of `x` (even positions) and `y` (odd positions).
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::morton::morton_index;
///
/// assert_eq!(morton_index(0, 0), 0);
/// assert_eq!(morton_index(1, 0), 1);
/// assert_eq!(morton_index(0, 1), 2);
/// assert_eq!(morton_index(3, 0), 5);
/// assert_eq!(morton_index(u32::MAX, u32::MAX), u64::MAX);
/// ```
#[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
#[inline]
pub fn morton_index(x: u32, y: u32) -> u64 {
    morton_index_portable(x, y)
}

/// Shift-and-mask version of [`morton_index`], available on every target.
#[inline]
pub fn morton_index_portable(x: u32, y: u32) -> u64 {
    spread_bits(x) | (spread_bits(y) << 1)
}

/// Recovers the grid coordinates of a Morton key.
///
/// ```
/// use rs_barnes_hut::morton::{morton_decode, morton_index};
///
/// assert_eq!(morton_decode(morton_index(12, 7)), (12, 7));
/// ```
#[inline]
pub fn morton_decode(key: u64) -> (u32, u32) {
    (compact_bits(key), compact_bits(key >> 1))
}

#[inline]
fn spread_bits(v: u32) -> u64 {
    let mut v = v as u64;
    v = (v | (v << 16)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333_3333_3333;
    v = (v | (v << 1)) & 0x5555_5555_5555_5555;
    v
}

#[inline]
fn compact_bits(key: u64) -> u32 {
    let mut v = key & 0x5555_5555_5555_5555;
    v = (v | (v >> 1)) & 0x3333_3333_3333_3333;
    v = (v | (v >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v >> 4)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v >> 8)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v >> 16)) & 0x0000_0000_FFFF_FFFF;
    v as u32
}
