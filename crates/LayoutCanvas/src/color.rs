//! # Color Codec
//!
//! The layout engine's attribute model only carries strings, so colors
//! travel as `"#" + hex` tokens of a packed RGBA `u32` (red in the low
//! byte, alpha in the high byte). Encoding writes into a fixed inline
//! buffer; decoding is the exact inverse for every token this crate
//! produces.
//!
//! The same channel doubles as a side door for edge identifiers: an opaque
//! numeric id encoded as `"#" + hex(id)` rides in the color slot, and the
//! true display color is recovered later from a side table keyed by the id
//! (the engine round-trips caller-supplied identifiers for nodes but not
//! for edges).

use glam::Vec4;

/// Packs a `Vec4` color (channels in `0.0..=1.0`) into RGBA bytes,
/// red in the low byte.
pub fn pack(color: Vec4) -> u32 {
    let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
    quantize(color.x) | quantize(color.y) << 8 | quantize(color.z) << 16 | quantize(color.w) << 24
}

/// Unpacks RGBA bytes into a `Vec4` color.
pub fn unpack(rgba: u32) -> Vec4 {
    Vec4::new(
        (rgba & 0xff) as f32 / 255.0,
        (rgba >> 8 & 0xff) as f32 / 255.0,
        (rgba >> 16 & 0xff) as f32 / 255.0,
        (rgba >> 24 & 0xff) as f32 / 255.0,
    )
}

/// A `"#" + hex` token in a fixed inline buffer. At most `#` plus eight
/// hex digits, so no heap allocation is ever needed.
#[derive(Clone, Copy, Debug)]
pub struct ColorToken {
    buf: [u8; 9],
    len: u8,
}

impl ColorToken {
    pub fn as_str(&self) -> &str {
        // The buffer only ever holds '#' and ASCII hex digits.
        std::str::from_utf8(&self.buf[..self.len as usize]).unwrap_or("#0")
    }
}

impl std::fmt::Display for ColorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encodes a packed RGBA value (or a smuggled edge id) as a `#hex` token.
/// Leading zeros are omitted, matching the engine-facing format.
pub fn encode(value: u32) -> ColorToken {
    let mut buf = [0u8; 9];
    buf[0] = b'#';
    let digits = b"0123456789abcdef";
    let mut len = 1;
    let mut shift = 32;
    let mut started = false;
    while shift > 0 {
        shift -= 4;
        let nibble = (value >> shift & 0xf) as usize;
        if nibble != 0 || started || shift == 0 {
            started = true;
            buf[len] = digits[nibble];
            len += 1;
        }
    }
    ColorToken {
        buf,
        len: len as u8,
    }
}

/// Decodes a `#hex` token back to its `u32` value. Returns `None` for
/// anything that is not a token this system produced or validated.
pub fn decode(token: &str) -> Option<u32> {
    let hex = token.strip_prefix('#')?;
    if hex.is_empty() || hex.len() > 8 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}
