use nalgebra::Point2;

use crate::{
    curve::{CurveLocation, SubdivisionEngine},
    drag::{DragProjector, PointMap},
    error::SubdivisionError,
    misc::FloatingPoint,
};

/// Pointer interaction with a curve
///
/// Tracks whether a drag is in progress, where the pointer was last seen and which curve
/// location was grabbed. Control point moves are mirrored onto companion curves sharing the
/// same control point indexing, e.g. a control polygon overlay at resolution 0.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession<T: FloatingPoint> {
    dragging: bool,
    last_pointer: Option<Point2<T>>,
    hit: Option<CurveLocation<T>>,
    spread_width: usize,
}

impl<T: FloatingPoint> Default for DragSession<T> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<T: FloatingPoint> DragSession<T> {
    /// A width of 0 is treated as 1
    pub fn new(spread_width: usize) -> Self {
        Self {
            dragging: false,
            last_pointer: None,
            hit: None,
            spread_width: spread_width.max(1),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn last_pointer(&self) -> Option<&Point2<T>> {
        self.last_pointer.as_ref()
    }

    /// Location grabbed by the current drag
    pub fn hit(&self) -> Option<&CurveLocation<T>> {
        self.hit.as_ref()
    }

    pub fn spread_width(&self) -> usize {
        self.spread_width
    }

    pub fn set_spread_width(&mut self, spread_width: usize) {
        self.spread_width = spread_width.max(1);
    }

    /// Closest location to the pointer, for cursor placement
    pub fn hover(
        &self,
        engine: &mut SubdivisionEngine<T>,
        pointer: &Point2<T>,
    ) -> anyhow::Result<CurveLocation<T>> {
        engine.closest_point(pointer)
    }

    /// Grab the curve at the location closest to `pointer` and start dragging
    pub fn press(
        &mut self,
        engine: &mut SubdivisionEngine<T>,
        pointer: Point2<T>,
    ) -> anyhow::Result<&CurveLocation<T>> {
        let hit = engine.closest_point(&pointer)?;
        self.dragging = true;
        self.last_pointer = Some(pointer);
        Ok(&*self.hit.insert(hit))
    }

    /// Move the grabbed location by the pointer motion since the last event
    /// Returns the new control point positions, empty when no drag is in progress
    /// # Failures
    /// - if a moved index is not a control point of a companion, in which case no curve changes
    /// # Example
    /// ```
    /// use subdivo::prelude::*;
    /// use nalgebra::Point2;
    ///
    /// let points = vec![Point2::new(0., 0.), Point2::new(5., 5.), Point2::new(10., 0.)];
    /// let mut curve = SubdivisionEngine::try_new(points.clone(), CurveConfig::default()).unwrap();
    /// let mut polygon = vec![
    ///     SubdivisionEngine::try_new(points, CurveConfig::default().with_resolution(0)).unwrap(),
    /// ];
    ///
    /// let mut session = DragSession::new(1);
    /// session.press(&mut curve, Point2::new(5., 2.5)).unwrap();
    /// let moved = session.drag(&mut curve, &mut polygon, Point2::new(5., 3.5)).unwrap();
    /// assert_eq!(moved.len(), 1);
    /// assert_eq!(curve.control_points(), polygon[0].control_points());
    /// session.release();
    /// assert!(!session.is_dragging());
    /// ```
    pub fn drag(
        &mut self,
        engine: &mut SubdivisionEngine<T>,
        companions: &mut [SubdivisionEngine<T>],
        pointer: Point2<T>,
    ) -> anyhow::Result<PointMap<T>> {
        let (true, Some(last), Some(hit)) = (self.dragging, self.last_pointer, self.hit.as_ref())
        else {
            return Ok(PointMap::new());
        };

        let delta = pointer - last;
        let positions = DragProjector::new(self.spread_width).project(
            hit.weights(),
            &delta,
            engine.control_points(),
        );

        for companion in companions.iter() {
            let len = companion.control_points().len();
            if let Some(index) = positions.keys().find(|i| **i >= len) {
                anyhow::bail!(SubdivisionError::ControlIndexOutOfRange { index: *index, len });
            }
        }

        engine.adjust_points(&positions)?;
        for companion in companions.iter_mut() {
            companion.adjust_points(&positions)?;
        }
        self.last_pointer = Some(pointer);
        Ok(positions)
    }

    /// End the drag
    pub fn release(&mut self) {
        self.dragging = false;
        self.last_pointer = None;
        self.hit = None;
    }
}
