use approx::assert_relative_eq;
use crate::particles::Particle;
use crate::utils::PhysicsError;

#[test]
fn test_new_valid() {
    let particle = Particle::new((10.0, 20.0), (1.0, -1.0), 4.0, 2.0)
        .expect("Failed to create particle with valid parameters");
    assert_eq!(particle.position, (10.0, 20.0));
    assert_eq!(particle.velocity, (1.0, -1.0));
    assert_eq!(particle.acceleration, (0.0, 0.0));
}

#[test]
fn test_new_rejects_malformed_input() {
    assert_eq!(Particle::new((0.0, 0.0), (0.0, 0.0), -1.0, 1.0), Err(PhysicsError::InvalidMass));
    assert_eq!(Particle::new((0.0, 0.0), (0.0, 0.0), f64::NAN, 1.0), Err(PhysicsError::InvalidMass));
    assert_eq!(Particle::new((0.0, 0.0), (0.0, 0.0), 1.0, -0.5), Err(PhysicsError::InvalidRadius));
    assert_eq!(Particle::new((f64::INFINITY, 0.0), (0.0, 0.0), 1.0, 1.0), Err(PhysicsError::InvalidPosition));
    assert_eq!(Particle::new((0.0, 0.0), (0.0, f64::NAN), 1.0, 1.0), Err(PhysicsError::InvalidVelocity));
}

#[test]
fn test_zero_radius_is_allowed() {
    assert!(Particle::new((0.0, 0.0), (0.0, 0.0), 1.0, 0.0).is_ok());
}

#[test]
fn test_apply_force_is_additive() {
    let mut particle = Particle::new((0.0, 0.0), (0.0, 0.0), 2.0, 1.0).unwrap();
    particle.apply_force(1.0, 2.0);
    particle.apply_force(3.0, -4.0);
    assert_relative_eq!(particle.acceleration.0, 2.0);
    assert_relative_eq!(particle.acceleration.1, -1.0);
}

#[test]
fn test_advance_is_semi_implicit() {
    let mut particle = Particle::new((0.0, 0.0), (0.0, 0.0), 1.0, 1.0).unwrap();
    particle.apply_force(0.0, 10.0);
    particle.advance(0.1);
    // Velocity is updated before position, so the particle already moves on the first step.
    assert_relative_eq!(particle.velocity.1, 1.0);
    assert_relative_eq!(particle.position.1, 0.1);
    assert_eq!(particle.acceleration, (0.0, 0.0));

    // Without new forces the next step is pure drift.
    particle.advance(0.1);
    assert_relative_eq!(particle.velocity.1, 1.0);
    assert_relative_eq!(particle.position.1, 0.2);
}

#[test]
fn test_reflect_off_viewport() {
    let mut particle = Particle::new((805.0, 300.0), (10.0, 2.0), 1.0, 1.0).unwrap();
    assert!(particle.reflect_off_viewport((800.0, 600.0), 0.8));
    assert_eq!(particle.position, (800.0, 300.0));
    assert_relative_eq!(particle.velocity.0, -8.0);
    assert_relative_eq!(particle.velocity.1, 2.0);

    let mut particle = Particle::new((-1.0, -1.0), (-5.0, -5.0), 1.0, 1.0).unwrap();
    assert!(particle.reflect_off_viewport((800.0, 600.0), 0.8));
    assert_eq!(particle.position, (0.0, 0.0));
    assert_relative_eq!(particle.velocity.0, 4.0);
    assert_relative_eq!(particle.velocity.1, 4.0);
}

#[test]
fn test_reflect_inside_viewport_is_noop() {
    let mut particle = Particle::new((400.0, 300.0), (3.0, 4.0), 1.0, 1.0).unwrap();
    let before = particle.clone();
    assert!(!particle.reflect_off_viewport((800.0, 600.0), 0.8));
    assert_eq!(particle, before);
}

#[test]
fn test_diagnostics() {
    let a = Particle::new((0.0, 0.0), (3.0, 4.0), 2.0, 1.0).unwrap();
    let b = Particle::new((3.0, 4.0), (0.0, 0.0), 1.0, 4.0).unwrap();
    assert_eq!(a.momentum(), (6.0, 8.0));
    assert_relative_eq!(a.kinetic_energy(), 25.0);
    assert_relative_eq!(a.distance_to(&b), 5.0);
    assert!(!a.overlaps(&b)); // touching exactly
    let c = Particle::new((3.0, 4.0), (0.0, 0.0), 1.0, 4.1).unwrap();
    assert!(a.overlaps(&c));
}
