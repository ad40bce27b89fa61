use nalgebra::Vector2;

/// z-component of the 2D cross product.
#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Unit vector, or `None` if shorter than `eps`.
#[inline]
pub(crate) fn unit(v: Vector2<f64>, eps: f64) -> Option<Vector2<f64>> {
    let n = v.norm();
    if !n.is_finite() || n <= eps {
        None
    } else {
        Some(v / n)
    }
}

/// Rotate by +90° in the coordinate frame (clockwise on a y-down screen).
#[inline]
pub(crate) fn perp(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

/// Direction angle in degrees, `(-180, 180]`.
#[inline]
pub(crate) fn heading_deg(v: Vector2<f64>) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

/// Wrap an angle in degrees into `(-180, 180]`.
#[inline]
pub(crate) fn wrap_deg(a: f64) -> f64 {
    let mut x = a % 360.0;
    if x <= -180.0 {
        x += 360.0;
    } else if x > 180.0 {
        x -= 360.0;
    }
    x
}

/// Sign with a dead zone: -1, 0 or 1.
#[inline]
pub(crate) fn sign_eps(x: f64, eps: f64) -> i8 {
    if x > eps {
        1
    } else if x < -eps {
        -1
    } else {
        0
    }
}
