use glam::Vec3;

use crate::{MathError, component};

/// A normalized 3-component direction.
///
/// Every constructor and [`UnitVector::set`] normalizes its input. Zero or
/// non-finite input is rejected with [`MathError::DegenerateVector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitVector(Vec3);

impl UnitVector {
    pub const UP: Self = Self(Vec3::Y);
    pub const RIGHT: Self = Self(Vec3::X);
    pub const FORWARD: Self = Self(Vec3::Z);

    pub fn new(x: f32, y: f32, z: f32) -> Result<Self, MathError> {
        normalized(Vec3::new(x, y, z)).map(Self)
    }

    /// Builds from a 3-element source such as a config array.
    pub fn from_array(values: [f32; 3]) -> Result<Self, MathError> {
        normalized(Vec3::from_array(values)).map(Self)
    }

    pub fn get(&self) -> Vec3 {
        self.0
    }

    /// Component by dimension index: 0 = x, 1 = y, 2 = z.
    pub fn component(&self, dimension: usize) -> Result<f32, MathError> {
        component(&self.0.to_array(), dimension)
    }

    /// A vector of the given magnitude along this direction.
    pub fn scale(&self, magnitude: f32) -> Vec3 {
        self.0 * magnitude
    }

    /// Replaces the direction. On error the current value is kept.
    pub fn set(&mut self, vector: Vec3) -> Result<(), MathError> {
        self.0 = normalized(vector)?;
        Ok(())
    }

    pub fn cross(&self, other: &UnitVector) -> Result<UnitVector, MathError> {
        UnitVector::try_from(self.0.cross(other.0))
    }
}

impl TryFrom<Vec3> for UnitVector {
    type Error = MathError;

    fn try_from(vector: Vec3) -> Result<Self, Self::Error> {
        normalized(vector).map(Self)
    }
}

impl From<UnitVector> for Vec3 {
    fn from(unit: UnitVector) -> Self {
        unit.0
    }
}

fn normalized(vector: Vec3) -> Result<Vec3, MathError> {
    let length = vector.length();
    if !length.is_finite() || length <= f32::EPSILON {
        return Err(MathError::DegenerateVector);
    }
    Ok(vector / length)
}
