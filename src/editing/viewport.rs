// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Coordinate spaces for the spline canvas.
//!
//! Three spaces are involved:
//! - *domain*: the spline's own (location, value) coordinates;
//! - *unit*: the normalized square the canvas draws in, y pointing down;
//! - *device*: pixels on the rendering surface.
//!
//! The region (the visible part of the domain) is derived from the points,
//! so the view follows the spline as it is edited. Sizes for strokes and
//! handles are given in unit space and never depend on the region.

use crate::path::SplinePoint;
use crate::settings;
use kurbo::{Line, Point, Rect, Size};

/// Domain rectangle covering `points` and the origin, plus margins
pub fn region_for(points: &[SplinePoint]) -> Rect {
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    Rect::new(
        min_x - settings::region::MARGIN_X,
        min_y - settings::region::MARGIN_Y,
        max_x + settings::region::MARGIN_X,
        max_y + settings::region::MARGIN_Y,
    )
}

/// A tick mark along the zero axis, in unit space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTick {
    pub line: Line,
    pub major: bool,
}

/// Mapping between domain, unit and device coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPort {
    region: Rect,
    surface: Size,
}

impl ViewPort {
    /// Viewport over `region`, on a 1x1 pixel surface until told otherwise
    pub fn new(region: Rect) -> Self {
        Self {
            region,
            surface: Size::new(1.0, 1.0),
        }
    }

    /// Viewport framing the given points
    pub fn for_points(points: &[SplinePoint]) -> Self {
        Self::new(region_for(points))
    }

    /// Set the rendering surface size in device pixels
    pub fn with_surface(mut self, surface: Size) -> Self {
        self.surface = surface;
        self
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn surface(&self) -> Size {
        self.surface
    }

    pub fn domain_to_unit(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.region.x0) / self.region.width(),
            1.0 - (p.y - self.region.y0) / self.region.height(),
        )
    }

    pub fn unit_to_domain(&self, u: Point) -> Point {
        Point::new(
            self.region.x0 + u.x * self.region.width(),
            self.region.y0 + (1.0 - u.y) * self.region.height(),
        )
    }

    pub fn device_to_unit(&self, px: Point) -> Point {
        let (w, h) = self.surface_extent();
        Point::new(px.x / w, px.y / h)
    }

    pub fn unit_to_device(&self, u: Point) -> Point {
        let (w, h) = self.surface_extent();
        Point::new(u.x * w, u.y * h)
    }

    pub fn device_to_domain(&self, px: Point) -> Point {
        self.unit_to_domain(self.device_to_unit(px))
    }

    pub fn domain_to_device(&self, p: Point) -> Point {
        self.unit_to_device(self.domain_to_unit(p))
    }

    /// Unit-space size of `n` size steps
    pub fn scale(&self, n: f64) -> f64 {
        n * settings::view::SIZE_UNIT
    }

    /// Convert a device-pixel length to unit space, measured against the
    /// longer surface side so the result never exceeds `len` pixels on
    /// either axis
    pub fn device_len_to_unit(&self, len: f64) -> f64 {
        let (w, h) = self.surface_extent();
        len / w.max(h)
    }

    /// Distance between two domain points, measured in unit space
    pub fn unit_distance(&self, a: Point, b: Point) -> f64 {
        self.domain_to_unit(a).distance(self.domain_to_unit(b))
    }

    /// The zero axis and its tick marks, in unit space
    pub fn axis_ticks(&self) -> (Line, Vec<AxisTick>) {
        use settings::axis;

        let zero = self.domain_to_unit(Point::ZERO).y;
        let axis_line = Line::new(
            Point::new(self.domain_to_unit(Point::new(self.region.x0, 0.0)).x, zero),
            Point::new(self.domain_to_unit(Point::new(self.region.x1, 0.0)).x, zero),
        );
        let ticks = (0..axis::TICK_COUNT)
            .map(|i| {
                let major = i % axis::MAJOR_EVERY == 0;
                let x = self
                    .domain_to_unit(Point::new(
                        i as f64 * axis::TICK_SPACING + axis::TICK_START,
                        0.0,
                    ))
                    .x;
                let len = if major {
                    axis::MAJOR_LENGTH
                } else {
                    axis::MINOR_LENGTH
                };
                AxisTick {
                    line: Line::new(Point::new(x, zero), Point::new(x, zero + self.scale(len))),
                    major,
                }
            })
            .collect();
        (axis_line, ticks)
    }

    /// Surface size, with degenerate sides treated as one pixel
    fn surface_extent(&self) -> (f64, f64) {
        let w = if self.surface.width > 0.0 {
            self.surface.width
        } else {
            1.0
        };
        let h = if self.surface.height > 0.0 {
            self.surface.height
        } else {
            1.0
        };
        (w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a - b).hypot() < 1e-9,
            "expected {:?} to be close to {:?}",
            a,
            b
        );
    }

    fn sample_points() -> Vec<SplinePoint> {
        vec![
            SplinePoint::new(0.0, 0.0, 0.0),
            SplinePoint::new(0.23, 0.8, 0.3),
            SplinePoint::new(0.4, 0.2, -0.4),
        ]
    }

    #[test]
    fn region_includes_origin_and_margins() {
        let points = vec![
            SplinePoint::new(1.0, 2.0, 0.0),
            SplinePoint::new(3.0, 4.0, 0.0),
        ];
        let region = region_for(&points);
        let expected = Rect::new(-0.2, -1.0, 3.2, 5.0);
        assert!((region.x0 - expected.x0).abs() < 1e-12);
        assert!((region.y0 - expected.y0).abs() < 1e-12);
        assert!((region.x1 - expected.x1).abs() < 1e-12);
        assert!((region.y1 - expected.y1).abs() < 1e-12);
    }

    #[test]
    fn region_of_empty_list_is_margins_only() {
        assert_eq!(region_for(&[]), Rect::new(-0.2, -1.0, 0.2, 1.0));
    }

    #[test]
    fn unit_corners() {
        let vp = ViewPort::new(Rect::new(-1.0, -2.0, 3.0, 2.0));
        assert_close(vp.domain_to_unit(Point::new(-1.0, 2.0)), Point::new(0.0, 0.0));
        assert_close(vp.domain_to_unit(Point::new(3.0, -2.0)), Point::new(1.0, 1.0));
    }

    #[test]
    fn unit_round_trip_over_region() {
        let vp = ViewPort::for_points(&sample_points());
        let region = vp.region();
        for i in 0..=10 {
            for j in 0..=10 {
                let p = Point::new(
                    region.x0 + region.width() * i as f64 / 10.0,
                    region.y0 + region.height() * j as f64 / 10.0,
                );
                assert_close(vp.unit_to_domain(vp.domain_to_unit(p)), p);
                let u = Point::new(i as f64 / 10.0, j as f64 / 10.0);
                assert_close(vp.domain_to_unit(vp.unit_to_domain(u)), u);
            }
        }
    }

    #[test]
    fn device_mapping_uses_surface() {
        let vp = ViewPort::new(Rect::new(0.0, 0.0, 2.0, 2.0)).with_surface(Size::new(400.0, 200.0));
        assert_close(vp.device_to_domain(Point::new(200.0, 100.0)), Point::new(1.0, 1.0));
        assert_close(vp.device_to_domain(Point::new(0.0, 200.0)), Point::new(0.0, 0.0));
        assert_close(vp.domain_to_device(Point::new(2.0, 2.0)), Point::new(400.0, 0.0));
    }

    #[test]
    fn zero_surface_does_not_divide_by_zero() {
        let vp = ViewPort::new(Rect::new(0.0, 0.0, 1.0, 1.0)).with_surface(Size::ZERO);
        let p = vp.device_to_domain(Point::new(0.5, 0.5));
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn scale_is_region_independent() {
        let small = ViewPort::new(Rect::new(0.0, 0.0, 1.0, 1.0));
        let large = ViewPort::new(Rect::new(-100.0, -100.0, 100.0, 100.0));
        assert_eq!(small.scale(8.0), large.scale(8.0));
        assert!((small.scale(8.0) - 0.08).abs() < 1e-12);
    }

    #[test]
    fn axis_has_major_every_tenth_tick() {
        let vp = ViewPort::for_points(&sample_points());
        let (axis, ticks) = vp.axis_ticks();
        assert_eq!(ticks.len(), 100);
        assert_eq!(ticks.iter().filter(|t| t.major).count(), 10);
        assert_eq!(axis.p0.y, axis.p1.y);
        assert!((axis.p0.x - 0.0).abs() < 1e-12);
        assert!((axis.p1.x - 1.0).abs() < 1e-12);
    }
}
