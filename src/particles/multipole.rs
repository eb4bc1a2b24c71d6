use crate::particles::{BoundingBox, Cell, PointMass};
use crate::utils::dist;

/// Aggregate of a group of particles: total mass, center of mass and the box it covers.
///
/// A multipole built from zero mass has a NaN center. Callers only aggregate non-empty cells.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Multipole {
    pub mass: f64,
    pub x: f64,
    pub y: f64,
    pub bounds: BoundingBox,
}

impl Multipole {
    /// Particle-to-multipole: aggregates the particles of a cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_barnes_hut::particles::{BoundingBox, Cell, Multipole};
    ///
    /// let cell = Cell::new(
    ///     BoundingBox::new(0.0, 10.0, 0.0, 10.0),
    ///     vec![2.0, 2.5],
    ///     vec![3.0, 3.5],
    ///     vec![4.0, 4.5],
    /// );
    /// let m = Multipole::p2m(&cell);
    /// assert_eq!(m.mass, 4.5);
    /// assert!((m.x - 14.75 / 4.5).abs() < 1e-12);
    /// assert!((m.y - 19.25 / 4.5).abs() < 1e-12);
    /// ```
    pub fn p2m(cell: &Cell) -> Multipole {
        let p = &cell.particles;
        let (mut mass, mut x, mut y) = (0.0, 0.0, 0.0);
        for i in 0..p.len() {
            mass += p.mass[i];
            x += p.mass[i] * p.x[i];
            y += p.mass[i] * p.y[i];
        }
        Multipole { mass, x: x / mass, y: y / mass, bounds: cell.bounds }
    }

    /// Multipole-to-multipole: aggregates the four children of a tree node.
    pub fn m2m(children: &[Multipole]) -> Multipole {
        debug_assert_eq!(children.len(), 4);
        let mut bounds = children[0].bounds;
        let (mut mass, mut x, mut y) = (0.0, 0.0, 0.0);
        for child in children {
            mass += child.mass;
            x += child.mass * child.x;
            y += child.mass * child.y;
            bounds = bounds.union(&child.bounds);
        }
        Multipole { mass, x: x / mass, y: y / mass, bounds }
    }

    /// Gap between the box the multipole stands for and the box `b`, zero if they overlap.
    ///
    /// Separated along one axis only this is the gap along that axis; separated along both it
    /// is the distance between the two nearest corners.
    ///
    /// ```
    /// use rs_barnes_hut::particles::{BoundingBox, Multipole};
    ///
    /// let cell = BoundingBox::new(0.0, 1.0, 0.0, 1.0);
    /// let far = Multipole { mass: 1.0, x: 3.5, y: 0.5, bounds: BoundingBox::new(3.0, 4.0, 0.0, 1.0) };
    /// assert_eq!(far.distance(&cell), 2.0);
    ///
    /// let corner = Multipole { mass: 1.0, x: -3.5, y: 5.5, bounds: BoundingBox::new(-4.0, -3.0, 5.0, 6.0) };
    /// assert_eq!(corner.distance(&cell), 5.0);
    /// ```
    pub fn distance(&self, b: &BoundingBox) -> f64 {
        box_distance(&self.bounds, b)
    }

    /// Distance from the center of mass alone to the box `b`, zero if it lies inside.
    pub fn center_distance(&self, b: &BoundingBox) -> f64 {
        box_distance(&BoundingBox::new(self.x, self.x, self.y, self.y), b)
    }

    /// Side of the region the multipole stands for.
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn as_point(&self) -> PointMass {
        PointMass::new(self.mass, self.x, self.y)
    }
}

fn box_distance(a: &BoundingBox, b: &BoundingBox) -> f64 {
    if a.x_max < b.x_min {
        if a.y_max < b.y_min {
            dist(b.x_min, b.y_min, a.x_max, a.y_max)
        } else if a.y_min > b.y_max {
            dist(b.x_min, b.y_max, a.x_max, a.y_min)
        } else {
            b.x_min - a.x_max
        }
    } else if a.x_min > b.x_max {
        if a.y_max < b.y_min {
            dist(b.x_max, b.y_min, a.x_min, a.y_max)
        } else if a.y_min > b.y_max {
            dist(b.x_max, b.y_max, a.x_min, a.y_min)
        } else {
            a.x_min - b.x_max
        }
    } else if a.y_max < b.y_min {
        b.y_min - a.y_max
    } else if a.y_min > b.y_max {
        a.y_min - b.y_max
    } else {
        0.0
    }
}
