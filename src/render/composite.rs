use crate::foundation::error::{AquarelleError, AquarelleResult};

/// One premultiplied RGBA8 pixel (r,g,b already scaled by a).
pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels: `src + dst * (1 - src.a)`.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite `src` over `dst` pixel-by-pixel. Both buffers are
/// premultiplied RGBA8 and must have equal, 4-aligned lengths.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> AquarelleResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(AquarelleError::geometry(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Undo premultiplication for export (straight-alpha RGBA8).
pub fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
