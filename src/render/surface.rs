use std::path::Path;

use crate::foundation::core::{BezPath, CanvasSize, Rgba8};
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::render::composite;

/// The persistent raster surface paint accumulates on.
///
/// Pixels are premultiplied RGBA8 end-to-end. The surface is never cleared
/// implicitly: every [`fill_path`](PaintSurface::fill_path) composites onto
/// what is already there, which is what lets near-transparent stroke layers
/// build up visible pigment where they overlap. [`clear`](PaintSurface::clear)
/// exists only for the explicit reset action.
pub struct PaintSurface {
    size: CanvasSize,
    pixmap: vello_cpu::Pixmap,
    scratch: vello_cpu::Pixmap,
    ctx: vello_cpu::RenderContext,
}

impl PaintSurface {
    /// Create a fully transparent surface. Dimensions must be non-zero and
    /// fit the rasterizer's u16 pixmap limit.
    pub fn new(size: CanvasSize) -> AquarelleResult<Self> {
        let (w, h) = surface_extents(size)?;
        Ok(Self {
            size,
            pixmap: vello_cpu::Pixmap::new(w, h),
            scratch: vello_cpu::Pixmap::new(w, h),
            ctx: vello_cpu::RenderContext::new(w, h),
        })
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Refill the whole surface with a flat color (the explicit reset
    /// collaborator; normal painting never calls this).
    pub fn clear(&mut self, background: Rgba8) {
        let px = background.premul();
        for chunk in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Rasterize `path` filled with `color` (no stroke) and composite it
    /// over the surface.
    ///
    /// The path is rendered into a transparent scratch layer first and then
    /// premul-over'd onto the persistent pixmap, so one call is one layer of
    /// pigment regardless of self-intersections in the path.
    pub fn fill_path(&mut self, path: &BezPath, color: Rgba8) -> AquarelleResult<()> {
        self.scratch.data_as_u8_slice_mut().fill(0);

        self.ctx.reset();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_path(&bezpath_to_cpu(path));
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.scratch);

        composite::over_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            self.scratch.data_as_u8_slice(),
        )
    }

    /// Raw premultiplied pixel bytes, row-major RGBA8.
    pub fn pixels_premul(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Straight-alpha RGBA8 copy for export.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = self.pixmap.data_as_u8_slice().to_vec();
        composite::unpremultiply_in_place(&mut out);
        out
    }

    /// Serialize the surface to a PNG file (the "download" collaborator).
    pub fn write_png(&self, path: &Path) -> AquarelleResult<()> {
        let rgba = self.to_rgba8();
        image::save_buffer_with_format(
            path,
            &rgba,
            self.size.width,
            self.size.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| {
            AquarelleError::validation(format!("write png '{}': {e}", path.display()))
        })
    }
}

fn surface_extents(size: CanvasSize) -> AquarelleResult<(u16, u16)> {
    if size.width == 0 || size.height == 0 {
        return Err(AquarelleError::geometry("surface dimensions must be > 0"));
    }
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| AquarelleError::geometry("surface width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| AquarelleError::geometry("surface height exceeds u16"))?;
    Ok((w, h))
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
