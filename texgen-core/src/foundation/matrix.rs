use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

/// Row-major 4×4 `f32` matrix.
///
/// Used both as a color transform (applied to `(r, g, b, a)` column vectors) and as a texture
/// coordinate transform, where the upper-left 2×2 block is the UV basis and column 3 holds the
/// UV offset.
///
/// [`Matrix44::translation`] and [`Matrix44::rotation_z`] are built for row vectors
/// (`[x, y, z, 1] · m`): translation lands in row 3 and leaves column 3 untouched.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Matrix44 {
    /// Entries in row-major order.
    pub data: [f32; 16],
}

impl Default for Matrix44 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix44 {
    /// Build from four rows.
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut data = [0.0; 16];
        for (i, row) in rows.iter().enumerate() {
            data[i * 4..i * 4 + 4].copy_from_slice(row);
        }
        Self { data }
    }

    /// All entries zero.
    pub fn zero() -> Self {
        Self { data: [0.0; 16] }
    }

    /// The identity.
    pub fn identity() -> Self {
        Self::scale(1.0, 1.0, 1.0)
    }

    /// Diagonal scale with `w` left at 1.
    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        let mut m = Self::zero();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = sz;
        m[(3, 3)] = 1.0;
        m
    }

    /// Translation stored in row 3, so `[x, y, z, 1] · m` moves the point.
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        let mut m = Self::identity();
        m[(3, 0)] = tx;
        m[(3, 1)] = ty;
        m[(3, 2)] = tz;
        m
    }

    /// Rotation about the Z axis, angle in radians; counter-clockwise for row vectors.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = s;
        m[(1, 0)] = -s;
        m[(1, 1)] = c;
        m
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        let mut out = Self::zero();
        for i in 0..4 {
            for j in 0..4 {
                out[(j, i)] = self[(i, j)];
            }
        }
        out
    }

    /// Row `i`.
    pub fn row(&self, i: usize) -> [f32; 4] {
        let mut out = [0.0; 4];
        out.copy_from_slice(&self.data[i * 4..i * 4 + 4]);
        out
    }

    /// Column `j`.
    pub fn column(&self, j: usize) -> [f32; 4] {
        [self[(0, j)], self[(1, j)], self[(2, j)], self[(3, j)]]
    }

    fn map(mut self, f: impl Fn(f32) -> f32) -> Self {
        for v in &mut self.data {
            *v = f(*v);
        }
        self
    }
}

impl Index<(usize, usize)> for Matrix44 {
    type Output = f32;

    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        debug_assert!(i < 4 && j < 4);
        &self.data[i * 4 + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix44 {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f32 {
        debug_assert!(i < 4 && j < 4);
        &mut self.data[i * 4 + j]
    }
}

impl Mul for Matrix44 {
    type Output = Matrix44;

    fn mul(self, rhs: Matrix44) -> Matrix44 {
        let mut out = Matrix44::zero();
        for i in 0..4 {
            for j in 0..4 {
                out[(i, j)] = self[(i, 0)] * rhs[(0, j)]
                    + self[(i, 1)] * rhs[(1, j)]
                    + self[(i, 2)] * rhs[(2, j)]
                    + self[(i, 3)] * rhs[(3, j)];
            }
        }
        out
    }
}

impl Mul<[f32; 4]> for Matrix44 {
    type Output = [f32; 4];

    fn mul(self, v: [f32; 4]) -> [f32; 4] {
        std::array::from_fn(|i| {
            self[(i, 0)] * v[0] + self[(i, 1)] * v[1] + self[(i, 2)] * v[2] + self[(i, 3)] * v[3]
        })
    }
}

impl Mul<f32> for Matrix44 {
    type Output = Matrix44;

    fn mul(self, s: f32) -> Matrix44 {
        self.map(|v| v * s)
    }
}

impl Mul<Matrix44> for f32 {
    type Output = Matrix44;

    fn mul(self, m: Matrix44) -> Matrix44 {
        m * self
    }
}

impl Div<f32> for Matrix44 {
    type Output = Matrix44;

    fn div(self, s: f32) -> Matrix44 {
        self.map(|v| v / s)
    }
}

impl Add for Matrix44 {
    type Output = Matrix44;

    fn add(mut self, rhs: Matrix44) -> Matrix44 {
        for (a, b) in self.data.iter_mut().zip(rhs.data) {
            *a += b;
        }
        self
    }
}

impl Sub for Matrix44 {
    type Output = Matrix44;

    fn sub(mut self, rhs: Matrix44) -> Matrix44 {
        for (a, b) in self.data.iter_mut().zip(rhs.data) {
            *a -= b;
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/matrix.rs"]
mod tests;
