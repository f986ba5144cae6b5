//! Vector, rotation and smoothing helpers shared by locomotion and camera.

use glam::{Mat3, Quat, Vec3};

/// Squared length under which a projected direction is treated as degenerate.
pub const DEGENERATE_LENGTH_SQUARED: f32 = 1e-10;

/// Interpolation factor for a critically-damped exponential approach.
///
/// `current += (target - current) * exp_blend_factor(sharpness, dt)` moves
/// toward `target` without overshoot and independent of frame rate. The
/// result lies in `[0, 1)` for non-negative inputs.
pub fn exp_blend_factor(sharpness: f32, dt: f32) -> f32 {
    1.0 - (-sharpness * dt).exp()
}

/// Remove the component of `v` along `normal`.
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let len_sq = normal.length_squared();
    if len_sq <= f32::EPSILON {
        return v;
    }
    v - normal * (v.dot(normal) / len_sq)
}

/// Component of `v` along `axis`.
pub fn project_on_axis(v: Vec3, axis: Vec3) -> Vec3 {
    let len_sq = axis.length_squared();
    if len_sq <= f32::EPSILON {
        return Vec3::ZERO;
    }
    axis * (v.dot(axis) / len_sq)
}

/// Unit projection of `v` onto the plane orthogonal to `normal`, or `None`
/// when the projection is degenerate (`v` nearly parallel to `normal`).
pub fn planar_direction(v: Vec3, normal: Vec3) -> Option<Vec3> {
    let projected = project_on_plane(v, normal);
    if projected.length_squared() < DEGENERATE_LENGTH_SQUARED {
        return None;
    }
    projected.try_normalize()
}

/// Rotation whose forward (`+Z`) axis points along `forward` and whose up
/// (`+Y`) axis lies in the plane spanned by `forward` and `up`.
///
/// A zero `forward` yields the identity. When `forward` is parallel to `up`
/// an arbitrary orthonormal right axis is chosen.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(z) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };
    let x = up
        .cross(z)
        .try_normalize()
        .unwrap_or_else(|| z.any_orthonormal_vector());
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

/// Spherical interpolation between two directions.
///
/// Interpolates the angle between `from` and `to` and linearly interpolates
/// their lengths. `t` is clamped to `[0, 1]`. Opposite directions rotate
/// about an arbitrary axis orthogonal to `from`.
pub fn slerp_direction(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let from_len = from.length();
    let to_len = to.length();
    if from_len <= f32::EPSILON || to_len <= f32::EPSILON {
        return from.lerp(to, t);
    }

    let a = from / from_len;
    let b = to / to_len;
    let angle = a.dot(b).clamp(-1.0, 1.0).acos();
    if angle < 1e-5 {
        return from.lerp(to, t);
    }

    let axis = a
        .cross(b)
        .try_normalize()
        .unwrap_or_else(|| a.any_orthonormal_vector());
    let direction = Quat::from_axis_angle(axis, angle * t) * a;
    direction * (from_len + (to_len - from_len) * t)
}

/// Quaternion slerp that does not clamp `t`.
///
/// Factors above 1 extrapolate past `to` along the same great arc. Takes the
/// short path between `from` and `to`.
pub fn slerp_unclamped(from: Quat, to: Quat, t: f32) -> Quat {
    let mut to = to;
    let mut dot = from.dot(to);
    if dot < 0.0 {
        to = -to;
        dot = -dot;
    }
    if dot > 1.0 - f32::EPSILON {
        return (from + (to - from) * t).normalize();
    }

    let theta = dot.min(1.0).acos();
    let sin_theta = theta.sin();
    let a = (theta * (1.0 - t)).sin() / sin_theta;
    let b = (theta * t).sin() / sin_theta;
    (from * a + to * b).normalize()
}
