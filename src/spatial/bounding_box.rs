use nalgebra::{point, Point3, Vector3};
use sixfold_common::Float;

use crate::error::Error;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb<Real: Float> {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl<Real: Float> Default for Aabb<Real> {
    fn default() -> Self {
        Self::new_invalid()
    }
}

impl<Real: Float> Aabb<Real> {
    #[inline]
    pub fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// An inverted box, which becomes valid once it has been [expanded](Self::expand_to) to
    /// contain at least one point.
    pub fn new_invalid() -> Self {
        Self {
            mins: point![Real::MAX, Real::MAX, Real::MAX],
            maxs: point![Real::MIN, Real::MIN, Real::MIN],
        }
    }

    /// The smallest box containing every point in `points`. Invalid if `points` is empty.
    pub fn from_points<'p>(points: impl IntoIterator<Item = &'p Point3<Real>>) -> Self {
        let mut res = Self::new_invalid();
        for p in points {
            res.expand_to(p);
        }
        res
    }

    /// Grow `self` such that it contains `p`.
    pub fn expand_to(&mut self, p: &Point3<Real>) {
        self.mins = self.mins.inf(p);
        self.maxs = self.maxs.sup(p);
    }

    /// The side lengths of `self`.
    #[inline]
    pub fn extents(&self) -> Vector3<Real> {
        self.maxs - self.mins
    }

    /// The smallest of `mins`' components.
    #[inline]
    pub fn global_min(&self) -> Real {
        self.mins.x.min(self.mins.y).min(self.mins.z)
    }

    /// The largest of `maxs`' components.
    #[inline]
    pub fn global_max(&self) -> Real {
        self.maxs.x.max(self.maxs.y).max(self.maxs.z)
    }

    /// The distance between the smallest and largest coordinate value found along any axis.
    ///
    /// Note that this compares values across axes: a box spanning `0..1` in X and `5..6` in Y has a
    /// global span of `6`.
    ///
    /// # Errors
    ///
    /// * [`DegenerateMesh`](Error::DegenerateMesh) if the span isn't strictly positive (which
    ///   includes boxes that never contained any point), or if `self` has collapsed to a single
    ///   point.
    pub fn global_span(&self) -> Result<Real, Error<Real>> {
        let (min, max) = (self.global_min(), self.global_max());
        // written so that NaN bounds fail too
        if !(max > min) || self.mins == self.maxs {
            return Err(Error::DegenerateMesh { min, max });
        }
        Ok(max - min)
    }
}

#[cfg(test)]
mod test {
    use nalgebra::{point, vector};

    use super::Aabb;
    use crate::error::Error;

    #[test]
    fn expands_from_invalid() {
        let mut bb = Aabb::<f32>::new_invalid();
        bb.expand_to(&point![1.0, -2.0, 3.0]);
        assert_eq!(bb.mins, bb.maxs);
        bb.expand_to(&point![0.0, 0.0, 0.0]);
        assert_eq!(bb.mins, point![0.0, -2.0, 0.0]);
        assert_eq!(bb.maxs, point![1.0, 0.0, 3.0]);
        assert_eq!(bb.extents(), vector![1.0, 2.0, 3.0]);
    }

    #[test]
    fn global_span_compares_across_axes() {
        let bb = Aabb::new(point![0.0f64, 5.0, 0.0], point![1.0, 6.0, 1.0]);
        assert_eq!(bb.global_span().unwrap(), 6.0);
    }

    #[test]
    fn degenerate_spans() {
        assert!(matches!(
            Aabb::<f32>::new_invalid().global_span(),
            Err(Error::DegenerateMesh { .. })
        ));
        // a lone vertex is degenerate even when its coordinates differ from one another
        let single = Aabb::from_points([&point![1.0f32, 2.0, 3.0], &point![1.0, 2.0, 3.0]]);
        let err = single.global_span().unwrap_err();
        assert!(matches!(err, Error::DegenerateMesh { min, max } if min == 1.0 && max == 3.0));
        let msg = err.to_string();
        assert!(msg.contains("global min 1, global max 3"), "{msg}");
        assert!(!msg.contains(">="), "{msg}");
    }
}
