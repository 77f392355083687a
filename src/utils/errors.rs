use std::fmt;
use std::error::Error;

/// Represents errors that can occur while setting up or feeding a simulation.
///
/// The physics core itself never returns these: they are raised at the boundary,
/// before a particle or a configuration reaches the per-tick pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Indicates an invalid mass value (non-positive or non-finite).
    InvalidMass,
    /// Indicates an invalid radius value (negative or non-finite).
    InvalidRadius,
    /// Indicates a position with a non-finite component.
    InvalidPosition,
    /// Indicates a velocity with a non-finite component.
    InvalidVelocity,
    /// Indicates an invalid integration time step (non-positive or non-finite).
    InvalidTimeStep,
    /// Indicates an invalid Barnes-Hut opening angle (negative or non-finite).
    InvalidTheta,
    /// Indicates a quadtree leaf capacity of zero.
    InvalidCapacity,
    /// A general error for configuration values that are out of range.
    InvalidConfiguration(String),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "Invalid mass value"),
            PhysicsError::InvalidRadius => write!(f, "Invalid radius value"),
            PhysicsError::InvalidPosition => write!(f, "Invalid position value"),
            PhysicsError::InvalidVelocity => write!(f, "Invalid velocity value"),
            PhysicsError::InvalidTimeStep => write!(f, "Invalid time step value"),
            PhysicsError::InvalidTheta => write!(f, "Invalid opening angle value"),
            PhysicsError::InvalidCapacity => write!(f, "Invalid tree capacity value"),
            PhysicsError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}


impl Error for PhysicsError {}
