use crate::particles::Particle;
use crate::utils::PROXIMITY_EPSILON;

/// Newtonian attraction of a point mass at `source` on a point mass at `position`.
///
/// Returns `(0, 0)` when the two are closer than [`PROXIMITY_EPSILON`], which covers a
/// particle meeting itself as well as near-singular encounters.
///
/// # Examples
///
/// ```
/// use rs_gravity::particles::point_mass_force;
///
/// let (fx, fy) = point_mass_force((0.0, 0.0), 2.0, (0.0, 4.0), 8.0, 1.0);
/// assert_eq!((fx, fy), (0.0, 1.0)); // 2 * 8 / 4², towards the source
///
/// assert_eq!(point_mass_force((0.0, 0.0), 2.0, (0.0, 0.05), 8.0, 1.0), (0.0, 0.0));
/// ```
pub fn point_mass_force(position: (f64, f64), mass: f64, source: (f64, f64), source_mass: f64, g: f64) -> (f64, f64) {
    let dx = source.0 - position.0;
    let dy = source.1 - position.1;
    let dist_sq = dx * dx + dy * dy;
    let dist = dist_sq.sqrt();
    if dist < PROXIMITY_EPSILON {
        return (0.0, 0.0);
    }
    let force = g * mass * source_mass / dist_sq;
    (force * dx / dist, force * dy / dist)
}

/// Exact gravitational force on `particles[index]` from every other particle.
///
/// This is the O(n) per particle reference the Barnes-Hut traversal approximates.
pub fn direct_force(index: usize, particles: &[Particle], g: f64) -> (f64, f64) {
    let target = &particles[index];
    particles
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != index)
        .fold((0.0, 0.0), |(fx, fy), (_, source)| {
            let (dfx, dfy) = point_mass_force(target.position, target.mass, source.position, source.mass, g);
            (fx + dfx, fy + dfy)
        })
}
