//! The four named affine operations the demo can apply to the square.
//!
//! Each [`Transformation`] ties together an arrow key, a freshly built 4×4
//! homogeneous matrix, and the color the transformed square is drawn in.
//! Matrices are rebuilt from identity every time they are asked for; nothing
//! accumulates between frames.

use glam::{Mat4, Vec3};
use winit::keyboard::KeyCode;

use crate::color::Color;

/// A single affine operation with a fixed key binding and draw color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transformation {
    /// Shift right by 0.6 NDC units.
    Translate,
    /// Rotate 45° counterclockwise about the z-axis.
    Rotate,
    /// Scale x and y by 1.5, leaving z unchanged.
    Scale,
    /// Shear with fixed off-diagonal coefficients.
    Shear,
}

impl Transformation {
    /// All operations, in the order their keys are checked each frame.
    pub const ALL: [Transformation; 4] = [
        Transformation::Translate,
        Transformation::Rotate,
        Transformation::Scale,
        Transformation::Shear,
    ];

    /// The arrow key that triggers this operation while held.
    pub fn key(self) -> KeyCode {
        match self {
            Transformation::Translate => KeyCode::ArrowRight,
            Transformation::Rotate => KeyCode::ArrowDown,
            Transformation::Scale => KeyCode::ArrowLeft,
            Transformation::Shear => KeyCode::ArrowUp,
        }
    }

    /// Builds this operation's matrix from identity.
    pub fn matrix(self) -> Mat4 {
        match self {
            Transformation::Translate => Mat4::from_translation(Vec3::new(0.6, 0.0, 0.0)),
            Transformation::Rotate => Mat4::from_rotation_z(45f32.to_radians()),
            Transformation::Scale => Mat4::from_scale(Vec3::new(1.5, 1.5, 1.0)),
            Transformation::Shear => shear(0.5, 0.2),
        }
    }

    /// The color the transformed square is drawn in.
    pub fn color(self) -> Color {
        match self {
            Transformation::Translate => Color::BLUE,
            Transformation::Rotate => Color::RED,
            Transformation::Scale => Color::GREEN,
            Transformation::Shear => Color::PURPLE,
        }
    }
}

/// Shear matrix built by direct entry assignment.
///
/// `y_by_x` lands at (row 1, column 0), so y picks up `y_by_x · x`;
/// `x_by_y` lands at (row 0, column 1), so x picks up `x_by_y · y`.
/// Every other entry stays identity.
pub fn shear(y_by_x: f32, x_by_y: f32) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.x_axis.y = y_by_x;
    m.y_axis.x = x_by_y;
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_vec3_eq(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn translate_shifts_corners_right() {
        let m = Transformation::Translate.matrix();
        let corner = m.transform_point3(Vec3::new(0.2, 0.2, 0.0));
        assert_vec3_eq(corner, Vec3::new(0.8, 0.2, 0.0));

        let opposite = m.transform_point3(Vec3::new(-0.2, -0.2, 0.0));
        assert_vec3_eq(opposite, Vec3::new(0.4, -0.2, 0.0));
    }

    #[test]
    fn rotate_turns_45_degrees_about_z() {
        let m = Transformation::Rotate.matrix();

        // A corner on the diagonal rotates onto the y-axis.
        let corner = m.transform_point3(Vec3::new(0.2, 0.2, 0.0));
        assert_vec3_eq(corner, Vec3::new(0.0, 0.2 * 2f32.sqrt(), 0.0));

        // A point on the x-axis rises to the diagonal.
        let on_axis = m.transform_point3(Vec3::new(1.0, 0.0, 0.0));
        let half_sqrt2 = std::f32::consts::FRAC_1_SQRT_2;
        assert_vec3_eq(on_axis, Vec3::new(half_sqrt2, half_sqrt2, 0.0));
    }

    #[test]
    fn scale_grows_xy_only() {
        let m = Transformation::Scale.matrix();
        let p = m.transform_point3(Vec3::new(0.2, -0.2, 0.7));
        assert_vec3_eq(p, Vec3::new(0.3, -0.3, 0.7));
    }

    #[test]
    fn shear_sets_only_the_two_off_diagonal_entries() {
        let cols = Transformation::Shear.matrix().to_cols_array_2d();

        // cols[c][r]: (row 1, col 0) = 0.5, (row 0, col 1) = 0.2.
        assert_eq!(cols[0][1], 0.5);
        assert_eq!(cols[1][0], 0.2);

        let identity = Mat4::IDENTITY.to_cols_array_2d();
        for c in 0..4 {
            for r in 0..4 {
                if (c, r) == (0, 1) || (c, r) == (1, 0) {
                    continue;
                }
                assert_eq!(cols[c][r], identity[c][r], "entry (row {r}, col {c})");
            }
        }
    }

    #[test]
    fn shear_skews_points() {
        let m = Transformation::Shear.matrix();
        // x' = x + 0.2 y, y' = y + 0.5 x.
        let p = m.transform_point3(Vec3::new(0.2, 0.2, 0.0));
        assert_vec3_eq(p, Vec3::new(0.24, 0.3, 0.0));
    }

    #[test]
    fn keys_and_colors_match_the_legend() {
        use Transformation::*;

        assert_eq!(Translate.key(), KeyCode::ArrowRight);
        assert_eq!(Rotate.key(), KeyCode::ArrowDown);
        assert_eq!(Scale.key(), KeyCode::ArrowLeft);
        assert_eq!(Shear.key(), KeyCode::ArrowUp);

        assert_eq!(Translate.color(), Color::BLUE);
        assert_eq!(Rotate.color(), Color::RED);
        assert_eq!(Scale.color(), Color::GREEN);
        assert_eq!(Shear.color(), Color::PURPLE);
    }
}
