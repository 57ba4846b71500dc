//! Structure of arrays containers.
//!
//! Every container keeps all of its columns at the same length, indices are
//! shared between the columns.

use glam::Vec3;

/// Three parallel columns of `f32`, one per axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vec3Soa {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
}

impl Vec3Soa {
    pub fn new(len: usize) -> Self {
        Self::splat(len, Vec3::ZERO)
    }

    pub fn splat(len: usize, v: Vec3) -> Self {
        Self {
            x: vec![v.x; len],
            y: vec![v.y; len],
            z: vec![v.z; len],
        }
    }

    pub fn len(&self) -> usize {
        debug_assert!(self.x.len() == self.y.len() && self.y.len() == self.z.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, k: usize) -> Vec3 {
        Vec3::new(self.x[k], self.y[k], self.z[k])
    }

    pub fn set(&mut self, k: usize, v: Vec3) {
        self.x[k] = v.x;
        self.y[k] = v.y;
        self.z[k] = v.z;
    }

    pub fn push(&mut self, v: Vec3) {
        self.x.push(v.x);
        self.y.push(v.y);
        self.z.push(v.z);
    }

    pub fn fill(&mut self, v: Vec3) {
        self.x.fill(v.x);
        self.y.fill(v.y);
        self.z.fill(v.z);
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.len()).map(|k| self.get(k))
    }
}

impl FromIterator<Vec3> for Vec3Soa {
    fn from_iter<T: IntoIterator<Item = Vec3>>(iter: T) -> Self {
        let mut soa = Self::default();
        for v in iter {
            soa.push(v);
        }
        soa
    }
}
