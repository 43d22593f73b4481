use crate::generate::PointBuffer;
use glam::Vec3;

/// Fixed-length position history behind the companion object. Index 0 is
/// the newest sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    positions: Vec<Vec3>,
}

impl Trail {
    pub fn new(len: usize, start: Vec3) -> Self {
        Self {
            positions: vec![start; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Every particle takes its predecessor's position; particle 0 takes
    /// `head`.
    pub fn shift(&mut self, head: Vec3) {
        if self.positions.is_empty() {
            return;
        }
        self.positions.rotate_right(1);
        self.positions[0] = head;
    }

    pub fn to_point_buffer(&self) -> PointBuffer {
        PointBuffer {
            positions: self.positions.iter().flat_map(|p| p.to_array()).collect(),
            colors: None,
        }
    }
}
