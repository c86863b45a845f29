/// A single labeled sample `(x, y)`.
///
/// Points are immutable once created. Callers validate finiteness before
/// handing them to the simulation; the core itself accepts any value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new `Point`.
    ///
    /// # Args
    /// * `x` - The input value.
    /// * `y` - The observed label.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Whether both coordinates are finite (neither NaN nor infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_point() {
        assert!(Point::new(1.5, -2.).is_finite());
    }

    #[test]
    fn non_finite_point() {
        assert!(!Point::new(f64::NAN, 0.).is_finite());
        assert!(!Point::new(0., f64::INFINITY).is_finite());
    }

    #[test]
    fn from_tuple() {
        let point = Point::from((3., 4.));
        assert_eq!(point.x(), 3.);
        assert_eq!(point.y(), 4.);
    }
}
