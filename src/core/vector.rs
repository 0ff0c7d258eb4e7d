use serde::{Deserialize, Serialize};

/// 2D vector for physics calculations
///
/// In-place adding and subtracting go through `+=` and `-=`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn set(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn scale(&mut self, f: f64) -> &mut Self {
        self.x *= f;
        self.y *= f;
        self
    }

    /// Rotates counter-clockwise by `angle` radians.
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        let (sin, cos) = angle.sin_cos();
        let x = self.x * cos - self.y * sin;
        let y = self.x * sin + self.y * cos;
        self.x = x;
        self.y = y;
        self
    }

    /// Scales to unit length. Zero and unit vectors are left untouched.
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 && len != 1.0 {
            self.scale(1.0 / len);
        }
        self
    }

    pub fn clear(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }

    pub fn length(&self) -> f64 {
        length(self.x, self.y)
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn distance_from(&self, other: Vector) -> f64 {
        length(self.x - other.x, self.y - other.y)
    }

    pub fn dot(&self, other: Vector) -> f64 {
        dot(self.x, self.y, other.x, other.y)
    }

    pub fn cross(&self, other: Vector) -> f64 {
        cross(self.x, self.y, other.x, other.y)
    }

    /// Direction of this vector in `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        angle(self.x, self.y)
    }

    /// Copy rotated by `angle`.
    pub fn rotated(mut self, angle: f64) -> Self {
        self.rotate(angle);
        self
    }

    /// Unit copy, see [`Vector::normalize`].
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Velocity of a point at offset `self` on a body spinning at `omega`.
    pub fn spin(&self, omega: f64) -> Self {
        Self { x: -omega * self.y, y: omega * self.x }
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

impl std::ops::Add for Vector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vector {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::ops::Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl std::ops::AddAssign for Vector {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

#[inline]
pub fn cross(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

#[inline]
pub fn dot(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * bx + ay * by
}

#[inline]
pub fn length(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt()
}

/// `atan2(y, x)` shifted into `[0, 2π)`.
#[inline]
pub fn angle(x: f64, y: f64) -> f64 {
    let a = y.atan2(x);
    if a < 0.0 {
        a + 2.0 * std::f64::consts::PI
    } else {
        a
    }
}
