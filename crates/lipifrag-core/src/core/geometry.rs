use nalgebra::{Point3, Rotation3, Unit, Vector3};

/// Ideal tetrahedral angle in degrees.
const TETRAHEDRAL_ANGLE: f64 = 109.5;

/// Places a capping atom on the ray from `retained` through `removed`.
///
/// The cap lands `bond_length` from `retained`. Returns `None` when the two
/// positions coincide and no direction can be derived.
pub fn cap_position(
    retained: &Point3<f64>,
    removed: &Point3<f64>,
    bond_length: f64,
) -> Option<Point3<f64>> {
    let direction = removed - retained;
    let norm = direction.norm();
    if norm <= f64::EPSILON {
        return None;
    }
    Some(retained + direction / norm * bond_length)
}

/// Generates three hydrogens around a methyl carbon with one heavy neighbour.
///
/// The hydrogens sit `bond_length` from `center`, each at the tetrahedral angle
/// to the `center -> neighbor` bond and 120 degrees apart around it. Returns
/// `None` if `neighbor` coincides with `center`.
pub fn methyl_hydrogens(
    center: &Point3<f64>,
    neighbor: &Point3<f64>,
    bond_length: f64,
) -> Option<[Point3<f64>; 3]> {
    let axis = neighbor - center;
    if axis.norm() <= f64::EPSILON {
        return None;
    }
    let n1 = axis.normalize();

    let reference = if n1.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let perpendicular = (reference - n1 * n1.dot(&reference)).normalize();

    let tilt = Rotation3::from_axis_angle(
        &Unit::new_normalize(n1.cross(&perpendicular)),
        TETRAHEDRAL_ANGLE.to_radians(),
    );
    let spin = Rotation3::from_axis_angle(&Unit::new_normalize(n1), 120.0f64.to_radians());

    let h1 = center + (tilt * n1).normalize() * bond_length;
    let h2 = center + spin * (h1 - center);
    let h3 = center + spin * (h2 - center);
    Some([h1, h2, h3])
}
