//! Geometric values the runtime understands natively
//!
//! These travel as single opaque stack slots (the runtime's vector and
//! matrix types), never as tables.

/// Two-component vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

/// Three-component vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Four-component vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Vector4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

/// Affine transform stored as four rows: three basis vectors and a translation
///
/// The runtime exposes this as its opaque matrix type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub right: Vector3,
    pub front: Vector3,
    pub up: Vector3,
    pub position: Vector3,
}

impl Matrix {
    /// Identity rotation at the origin
    pub const IDENTITY: Matrix = Matrix {
        right: Vector3::new(1.0, 0.0, 0.0),
        front: Vector3::new(0.0, 1.0, 0.0),
        up: Vector3::new(0.0, 0.0, 1.0),
        position: Vector3::new(0.0, 0.0, 0.0),
    };

    /// Identity rotation translated to `position`
    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Rows in storage order: right, front, up, position
    pub fn rows(&self) -> [Vector3; 4] {
        [self.right, self.front, self.up, self.position]
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}
