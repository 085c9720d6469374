use ultraviolet::Vec2;

/// 2D point/direction used throughout the simulation.
pub type Vector = Vec2;

/// Helpers `ultraviolet` doesn't provide with the semantics the animation needs.
pub trait VectorExt {
    /// Unit vector in the same direction, or zero when the magnitude is zero.
    fn normalize_or_zero(self) -> Self;

    /// Unit vector pointing at `angle` radians.
    fn from_angle(angle: f32) -> Self;

    fn distance(self, other: Self) -> f32;
}

impl VectorExt for Vec2 {
    #[inline]
    fn normalize_or_zero(self) -> Self {
        let mag = self.mag();
        if mag > 0.0 { self / mag } else { Vec2::zero() }
    }

    #[inline]
    fn from_angle(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(cos, sin)
    }

    #[inline]
    fn distance(self, other: Self) -> f32 {
        (other - self).mag()
    }
}
