use blockwork_geom::Vec3;

/// The six axis-aligned face directions of a cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        let (dx, dy, dz) = self.delta();
        Vec3::new(dx as f32, dy as f32, dz as f32)
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        matches!(self, Face::PosX | Face::PosY | Face::PosZ)
    }

    /// `(normal, u, v)` axis indices with `u x v` pointing along the outward
    /// normal, so `(0,0) -> (1,0) -> (1,1)` winds counter-clockwise seen from outside.
    /// Quads merge along `v`.
    #[inline]
    pub fn axes(self) -> (usize, usize, usize) {
        match self {
            Face::PosX => (0, 1, 2),
            Face::NegX => (0, 2, 1),
            Face::PosY => (1, 2, 0),
            Face::NegY => (1, 0, 2),
            Face::PosZ => (2, 0, 1),
            Face::NegZ => (2, 1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(axis: usize) -> Vec3 {
        let mut v = Vec3::ZERO;
        *v.axis_mut(axis) = 1.0;
        v
    }

    #[test]
    fn tangent_axes_are_right_handed() {
        for f in Face::ALL {
            let (n, u, v) = f.axes();
            assert_eq!(unit(n).dot(f.normal()).abs(), 1.0);
            assert_eq!(unit(u).cross(unit(v)), f.normal(), "{f:?}");
        }
    }

    #[test]
    fn indices_are_dense() {
        for (i, f) in Face::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }
}
