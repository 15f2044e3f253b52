//! Strongly-typed numeric primitives for footprint geometry (zero-cost newtypes).
//!
//! - Lengths are always millimetres once they leave the unit parser
//! - Angles stay in degrees until they reach the rotation matrix
//! - Absolute positions and relative offsets are distinct types

use glam::DVec2;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Inches per foot.
pub const INCHES_PER_FOOT: i32 = 12;

/// Length in millimetres (the canonical unit of every resolved coordinate)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Millimeters(pub f64);

impl Millimeters {
    pub const ZERO: Millimeters = Millimeters(0.0);

    /// Convert a length in inches.
    #[inline]
    pub fn from_inches(inches: f64) -> Millimeters {
        Millimeters(inches * MM_PER_INCH)
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// False for NaN and the infinities
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Millimeters {
    type Output = Millimeters;
    fn add(self, rhs: Millimeters) -> Millimeters { Millimeters(self.0 + rhs.0) }
}
impl Sub for Millimeters {
    type Output = Millimeters;
    fn sub(self, rhs: Millimeters) -> Millimeters { Millimeters(self.0 - rhs.0) }
}
impl Mul<f64> for Millimeters {
    type Output = Millimeters;
    fn mul(self, rhs: f64) -> Millimeters { Millimeters(self.0 * rhs) }
}
impl Div<f64> for Millimeters {
    type Output = Millimeters;
    fn div(self, rhs: f64) -> Millimeters { Millimeters(self.0 / rhs) }
}
impl Neg for Millimeters {
    type Output = Millimeters;
    fn neg(self) -> Millimeters { Millimeters(-self.0) }
}

/// Four decimal places with trailing zeros removed; `-0` prints as `0`.
///
/// This is the number format of every emitted configuration file.
impl fmt::Display for Millimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.4}", self.0);
        let trimmed = if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.')
        } else {
            fixed.as_str()
        };
        if trimmed == "-0" {
            f.write_str("0")
        } else {
            f.write_str(trimmed)
        }
    }
}

/// Angle in degrees, counter-clockwise
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// A length written the way surveyors write it: whole feet plus inches.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FtIn {
    pub feet: i32,
    pub inches: f64,
}

impl fmt::Display for FtIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}' {}\"", self.feet, self.inches)
    }
}

/// An absolute position in the footprint plane
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub x: Millimeters,
    pub y: Millimeters,
}

impl Position {
    pub const ORIGIN: Position = Position { x: Millimeters::ZERO, y: Millimeters::ZERO };

    pub fn new(x: Millimeters, y: Millimeters) -> Self {
        Position { x, y }
    }

    /// Shorthand for raw millimetre values
    pub fn mm(x: f64, y: f64) -> Self {
        Position { x: Millimeters(x), y: Millimeters(y) }
    }

    /// Same position with the x coordinate replaced
    pub fn with_x(self, x: Millimeters) -> Self {
        Position { x, y: self.y }
    }

    /// Same position with the y coordinate replaced
    pub fn with_y(self, y: Millimeters) -> Self {
        Position { x: self.x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A displacement relative to some reference frame (not an absolute position).
/// Position + Offset = Position
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset {
    pub dx: Millimeters,
    pub dy: Millimeters,
}

impl Offset {
    pub fn new(dx: Millimeters, dy: Millimeters) -> Self {
        Offset { dx, dy }
    }

    /// Rotate counter-clockwise by `angle` with the standard 2-D rotation matrix.
    pub fn rotated(self, angle: Angle) -> Offset {
        if angle.degrees() == 0.0 {
            return self;
        }
        let v = DVec2::from_angle(angle.radians()).rotate(DVec2::new(self.dx.0, self.dy.0));
        Offset { dx: Millimeters(v.x), dy: Millimeters(v.y) }
    }
}

impl Add<Offset> for Position {
    type Output = Position;
    fn add(self, rhs: Offset) -> Position {
        Position { x: self.x + rhs.dx, y: self.y + rhs.dy }
    }
}

impl Sub<Position> for Position {
    type Output = Offset;
    fn sub(self, rhs: Position) -> Offset {
        Offset { dx: self.x - rhs.x, dy: self.y - rhs.y }
    }
}

/// Vertical extent of an extruded volume
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct HeightRange {
    pub base: Millimeters,
    pub top: Millimeters,
}

impl HeightRange {
    pub fn new(base: Millimeters, top: Millimeters) -> Self {
        HeightRange { base, top }
    }

    pub fn half_thickness(&self) -> Millimeters {
        (self.top - self.base) * 0.5
    }

    /// Mid-height of the volume, measured from the same datum as `base`
    pub fn center(&self) -> Millimeters {
        self.base + self.half_thickness()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn millimeters_arithmetic() {
        let a = Millimeters(3.0);
        let b = Millimeters(2.0);

        assert_eq!(a + b, Millimeters(5.0));
        assert_eq!(a - b, Millimeters(1.0));
        assert_eq!(a * 2.0, Millimeters(6.0));
        assert_eq!(a / 2.0, Millimeters(1.5));
        assert_eq!(-a, Millimeters(-3.0));
    }

    #[test]
    fn millimeters_from_inches() {
        assert_eq!(Millimeters::from_inches(30.0), Millimeters(762.0));
    }

    #[test]
    fn millimeters_display_trims_zeros() {
        assert_eq!(Millimeters(762.0).to_string(), "762");
        assert_eq!(Millimeters(609.5999999999999).to_string(), "609.6");
        assert_eq!(Millimeters(-3581.4).to_string(), "-3581.4");
        assert_eq!(Millimeters(0.12345).to_string(), "0.1235");
        assert_eq!(Millimeters(50000.0).to_string(), "50000");
    }

    #[test]
    fn millimeters_display_negative_zero() {
        assert_eq!(Millimeters(-0.0).to_string(), "0");
        assert_eq!(Millimeters(-0.00001).to_string(), "0");
    }

    #[test]
    fn millimeters_finiteness() {
        assert!(Millimeters(-3581.4).is_finite());
        assert!(!Millimeters(f64::NAN).is_finite());
        assert!(!Millimeters(f64::INFINITY).is_finite());
    }

    #[test]
    fn angle_radians() {
        assert_abs_diff_eq!(Angle(180.0).radians(), std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn offset_rotated_zero_is_identity() {
        let o = Offset::new(Millimeters(1.5), Millimeters(-2.5));
        assert_eq!(o.rotated(Angle::ZERO), o);
    }

    #[test]
    fn offset_rotated_quarter_turn() {
        let o = Offset::new(Millimeters(10.0), Millimeters(0.0)).rotated(Angle(90.0));
        assert_abs_diff_eq!(o.dx.raw(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(o.dy.raw(), 10.0, epsilon = 1e-9);

        let o = Offset::new(Millimeters(0.0), Millimeters(10.0)).rotated(Angle(90.0));
        assert_abs_diff_eq!(o.dx.raw(), -10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(o.dy.raw(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn position_plus_offset_gives_position() {
        let p = Position::mm(1.0, 2.0);
        let o = Offset::new(Millimeters(3.0), Millimeters(4.0));
        assert_eq!(p + o, Position::mm(4.0, 6.0));
    }

    #[test]
    fn position_minus_position_gives_offset() {
        let offset = Position::mm(5.0, 7.0) - Position::mm(2.0, 3.0);
        assert_eq!(offset, Offset::new(Millimeters(3.0), Millimeters(4.0)));
    }

    #[test]
    fn position_with_axis() {
        let p = Position::mm(1.0, 2.0);
        assert_eq!(p.with_x(Millimeters(9.0)), Position::mm(9.0, 2.0));
        assert_eq!(p.with_y(Millimeters(9.0)), Position::mm(1.0, 9.0));
    }

    #[test]
    fn height_range_half_thickness_and_center() {
        let h = HeightRange::new(Millimeters(-3048.0), Millimeters(0.0));
        assert_eq!(h.half_thickness(), Millimeters(1524.0));
        assert_eq!(h.center(), Millimeters(-1524.0));
    }
}
