use rand::Rng;

use crate::foundation::core::{BezPath, Point, Rgba8, all_finite};
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::render::surface::PaintSurface;

/// One translucent paint layer: a cyclic polygon with a fixed low-alpha
/// fill.
///
/// A layer starts as (typically) a single anchor point and grows through
/// [`deform`](StrokeLayer::deform) rounds into an irregular blob boundary.
/// Layers are throwaway values: built at paint time, rendered once, dropped.
/// The rasterized pixels on the surface are the only artifact that
/// persists.
#[derive(Clone, Debug)]
pub struct StrokeLayer {
    vertices: Vec<Point>,
    fill: Rgba8,
}

impl StrokeLayer {
    /// Copies `initial` by value; later deformation never touches the
    /// caller's list. Rejects an empty list or non-finite coordinates.
    pub fn new(initial: &[Point], fill: Rgba8) -> AquarelleResult<Self> {
        if initial.is_empty() {
            return Err(AquarelleError::geometry(
                "stroke layer needs at least one vertex",
            ));
        }
        if !all_finite(initial) {
            return Err(AquarelleError::geometry(
                "stroke layer vertices must be finite",
            ));
        }
        Ok(Self {
            vertices: initial.to_vec(),
            fill,
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn fill(&self) -> Rgba8 {
        self.fill
    }

    /// One deformation round: for every cyclic adjacent pair (including the
    /// wrap-around pair) generate the perturbed midpoint
    /// `midpoint(v_i, v_{i+1}) + (U(-r,r), U(-r,r))`, then splice each new
    /// point at index 1 in generation order. Vertex count doubles exactly.
    ///
    /// The fixed splice offset makes every insertion push the previously
    /// inserted points further along, reversing their relative order. That
    /// interleaving is what the rendered blob shape depends on; do not
    /// replace it with an alternate old/new merge.
    pub fn deform(&mut self, radius: f64, rng: &mut impl Rng) {
        let n = self.vertices.len();
        let mut grown = Vec::with_capacity(n);
        for i in 0..n {
            let mid = self.vertices[i].midpoint(self.vertices[(i + 1) % n]);
            let jx = rng.random_range(-radius..radius);
            let jy = rng.random_range(-radius..radius);
            grown.push(Point::new(mid.x + jx, mid.y + jy));
        }
        for p in grown {
            self.vertices.insert(1, p);
        }
    }

    /// Closed polygon path over the current vertex sequence, in sequence
    /// order (post-deformation order, not construction order).
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.vertices[0]);
        for &v in &self.vertices[1..] {
            path.line_to(v);
        }
        path.close_path();
        path
    }

    /// Fill the polygon onto the surface with this layer's color, no
    /// outline.
    pub fn render(&self, surface: &mut PaintSurface) -> AquarelleResult<()> {
        surface.fill_path(&self.to_path(), self.fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn anchor_layer() -> StrokeLayer {
        StrokeLayer::new(&[Point::new(100.0, 100.0)], Rgba8::new(12, 80, 160, 2)).unwrap()
    }

    #[test]
    fn new_rejects_empty_and_non_finite() {
        assert!(StrokeLayer::new(&[], Rgba8::opaque(0, 0, 0)).is_err());
        assert!(
            StrokeLayer::new(&[Point::new(f64::INFINITY, 0.0)], Rgba8::opaque(0, 0, 0)).is_err()
        );
        assert!(StrokeLayer::new(&[Point::new(0.0, f64::NAN)], Rgba8::opaque(0, 0, 0)).is_err());
    }

    #[test]
    fn new_copies_vertices_by_value() {
        let mut initial = vec![Point::new(1.0, 2.0)];
        let layer = StrokeLayer::new(&initial, Rgba8::opaque(0, 0, 0)).unwrap();
        initial[0] = Point::new(9.0, 9.0);
        assert_eq!(layer.vertices()[0], Point::new(1.0, 2.0));
    }

    #[test]
    fn deform_doubles_vertex_count() {
        let mut rng = Pcg32::seed_from_u64(42);
        for start in 1..=5usize {
            let pts: Vec<Point> = (0..start).map(|i| Point::new(i as f64, 0.0)).collect();
            let mut layer = StrokeLayer::new(&pts, Rgba8::opaque(0, 0, 0)).unwrap();
            for k in 1..=6u32 {
                layer.deform(32.0, &mut rng);
                assert_eq!(layer.vertex_count(), start * 2usize.pow(k));
            }
        }
    }

    #[test]
    fn deform_keeps_fill_color() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut layer = anchor_layer();
        let fill = layer.fill();
        for _ in 0..8 {
            layer.deform(32.0, &mut rng);
        }
        assert_eq!(layer.fill(), fill);
    }

    #[test]
    fn single_vertex_deform_inserts_perturbed_anchor_at_index_1() {
        // midpoint of the (v0, v0) wrap-around pair is the anchor itself,
        // so the sole new vertex is anchor + seeded offset.
        let mut rng = Pcg32::seed_from_u64(3);
        let expected_dx = rng.random_range(-32.0..32.0);
        let expected_dy = rng.random_range(-32.0..32.0);

        let mut rng = Pcg32::seed_from_u64(3);
        let mut layer = anchor_layer();
        layer.deform(32.0, &mut rng);

        assert_eq!(layer.vertex_count(), 2);
        assert_eq!(layer.vertices()[0], Point::new(100.0, 100.0));
        let inserted = layer.vertices()[1];
        assert_eq!(inserted.x, 100.0 + expected_dx);
        assert_eq!(inserted.y, 100.0 + expected_dy);
        assert!(expected_dx.abs() < 32.0 && expected_dy.abs() < 32.0);
    }

    #[test]
    fn splice_at_index_1_reverses_new_point_order() {
        // With zero-width jitter excluded, track where each generated
        // midpoint lands: the last generated point must sit closest to
        // index 1.
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let mut rng = Pcg32::seed_from_u64(99);
        let mut layer = StrokeLayer::new(&pts, Rgba8::opaque(0, 0, 0)).unwrap();
        layer.deform(0.001, &mut rng);

        assert_eq!(layer.vertex_count(), 8);
        // Generation order: m0=(5,0), m1=(10,5), m2=(5,10), m3=(0,5).
        // Inserting each at index 1 yields v0, m3, m2, m1, m0, v1, v2, v3.
        let near = |p: Point, x: f64, y: f64| (p.x - x).abs() < 0.01 && (p.y - y).abs() < 0.01;
        assert!(near(layer.vertices()[1], 0.0, 5.0));
        assert!(near(layer.vertices()[2], 5.0, 10.0));
        assert!(near(layer.vertices()[3], 10.0, 5.0));
        assert!(near(layer.vertices()[4], 5.0, 0.0));
        assert!(near(layer.vertices()[5], 10.0, 0.0));
    }

    #[test]
    fn distinct_streams_diverge() {
        let mut a = anchor_layer();
        let mut b = anchor_layer();
        let mut rng_a = Pcg32::seed_from_u64(1);
        let mut rng_b = Pcg32::seed_from_u64(2);
        a.deform(32.0, &mut rng_a);
        b.deform(32.0, &mut rng_b);
        assert_ne!(a.vertices()[1], b.vertices()[1]);
    }

    #[test]
    fn to_path_is_closed_and_ordered() {
        use kurbo::PathEl;

        let pts = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
        ];
        let layer = StrokeLayer::new(&pts, Rgba8::opaque(0, 0, 0)).unwrap();
        let els: Vec<PathEl> = layer.to_path().elements().to_vec();
        assert_eq!(els.len(), 4);
        assert!(matches!(els[0], PathEl::MoveTo(p) if p == pts[0]));
        assert!(matches!(els[1], PathEl::LineTo(p) if p == pts[1]));
        assert!(matches!(els[2], PathEl::LineTo(p) if p == pts[2]));
        assert!(matches!(els[3], PathEl::ClosePath));
    }
}
