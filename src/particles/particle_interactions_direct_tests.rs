use approx::assert_relative_eq;
use crate::particles::{direct_force, point_mass_force, Particle};

#[test]
fn test_point_mass_force_inverse_square() {
    let near = point_mass_force((0.0, 0.0), 1.0, (2.0, 0.0), 1.0, 1.0);
    let far = point_mass_force((0.0, 0.0), 1.0, (4.0, 0.0), 1.0, 1.0);
    assert_relative_eq!(near.0 / far.0, 4.0, max_relative = 1e-12);
}

#[test]
fn test_point_mass_force_skips_close_sources() {
    assert_eq!(point_mass_force((1.0, 1.0), 5.0, (1.0, 1.0), 5.0, 1.0), (0.0, 0.0));
    assert_eq!(point_mass_force((1.0, 1.0), 5.0, (1.05, 1.05), 5.0, 1.0), (0.0, 0.0));
}

#[test]
fn test_direct_force_excludes_self() {
    let particles = vec![
        Particle::new((0.0, 0.0), (0.0, 0.0), 1.0, 1.0).unwrap(),
        Particle::new((-3.0, 0.0), (0.0, 0.0), 2.0, 1.0).unwrap(),
        Particle::new((3.0, 0.0), (0.0, 0.0), 2.0, 1.0).unwrap(),
    ];
    // Symmetric neighbours cancel.
    let (fx, fy) = direct_force(0, &particles, 1.0);
    assert!(fx.abs() < 1e-15);
    assert_eq!(fy, 0.0);

    // The outer particle is pulled inwards by both others.
    let (fx, _) = direct_force(2, &particles, 1.0);
    let expected = -(2.0 * 1.0 / 9.0 + 2.0 * 2.0 / 36.0);
    assert_relative_eq!(fx, expected, max_relative = 1e-12);
}

#[test]
fn test_direct_force_on_lone_particle() {
    let particles = vec![Particle::new((5.0, 5.0), (0.0, 0.0), 1.0, 1.0).unwrap()];
    assert_eq!(direct_force(0, &particles, 1.0), (0.0, 0.0));
}
