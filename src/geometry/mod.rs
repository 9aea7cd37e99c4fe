use num_traits::Float;
use serde::{Deserialize, Serialize};


/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}


/// 2D Point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_three_four_five() {
        assert_eq!(euclidean(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(euclidean(3.0_f32, 4.0, 0.0, 0.0), 5.0);
    }

    #[test]
    fn test_point_distance_is_symmetric() {
        let a = Point::new(-1.5, 2.0);
        let b = Point::new(4.0, -3.25);
        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(a.distance(&a), 0.0);
    }
}
