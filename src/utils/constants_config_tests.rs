use std::time::Duration;
use crate::utils::{PhysicsError, SimulationConfig, DEFAULT_SIMULATION_CONFIG};

#[test]
fn test_default_matches_constant() {
    let config = SimulationConfig::default();
    assert_eq!(config, DEFAULT_SIMULATION_CONFIG);
    assert_eq!(config.tick_interval, Duration::from_millis(16));
    assert_eq!(config.center(), (400.0, 300.0));
}

#[test]
fn test_new_falls_back_to_defaults() {
    let config = SimulationConfig::new(None, None, Some(0.05), Some(1));
    assert_eq!(config.gravitational_constant, DEFAULT_SIMULATION_CONFIG.gravitational_constant);
    assert_eq!(config.theta, DEFAULT_SIMULATION_CONFIG.theta);
    assert_eq!(config.time_step, 0.05);
    assert_eq!(config.tree_capacity, 1);
    assert_eq!(config.viewport, DEFAULT_SIMULATION_CONFIG.viewport);
}

#[test]
fn test_validate_rejects_bad_values() {
    assert_eq!(SimulationConfig::default().with_time_step(0.0).validate(), Err(PhysicsError::InvalidTimeStep));
    assert_eq!(SimulationConfig::default().with_time_step(f64::NAN).validate(), Err(PhysicsError::InvalidTimeStep));
    assert_eq!(SimulationConfig::default().with_tree_capacity(0).validate(), Err(PhysicsError::InvalidCapacity));
    assert_eq!(SimulationConfig::default().with_theta(f64::INFINITY).validate(), Err(PhysicsError::InvalidTheta));
    assert!(matches!(
        SimulationConfig::default().with_restitution(1.5).validate(),
        Err(PhysicsError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        SimulationConfig::default().with_viewport(0.0, 600.0).validate(),
        Err(PhysicsError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_theta_zero_is_valid() {
    // Exact summation is a legitimate, if slow, setting.
    assert!(SimulationConfig::default().with_theta(0.0).validate().is_ok());
}
