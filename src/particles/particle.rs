use crate::utils::PhysicsError;

/// A point mass moving in the plane.
///
/// `acceleration` accumulates `force / mass` from every contributor during a tick and
/// is consumed and cleared by [`Particle::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position represented as (x, y).
    pub position: (f64, f64),
    /// Velocity represented as (vx, vy).
    pub velocity: (f64, f64),
    /// Accumulated acceleration represented as (ax, ay).
    pub acceleration: (f64, f64),
    /// Particle's mass, always positive.
    pub mass: f64,
    /// Particle's radius, never negative.
    pub radius: f64,
}

impl Particle {
    /// Creates a new Particle at rest with respect to forces (zero acceleration).
    ///
    /// # Errors
    ///
    /// Returns an error if `mass` is not positive, `radius` is negative, or any
    /// component is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::particles::Particle;
    /// use rs_gravity::utils::PhysicsError;
    ///
    /// let particle = Particle::new((1.0, 2.0), (0.0, 1.0), 10.0, 5.0)
    ///     .expect("Failed to create particle");
    /// assert_eq!(particle.acceleration, (0.0, 0.0));
    ///
    /// let result = Particle::new((0.0, 0.0), (0.0, 0.0), 0.0, 5.0);
    /// assert_eq!(result, Err(PhysicsError::InvalidMass));
    /// ```
    pub fn new(
        position: (f64, f64),
        velocity: (f64, f64),
        mass: f64,
        radius: f64,
    ) -> Result<Self, PhysicsError> {
        let particle = Particle {
            position,
            velocity,
            acceleration: (0.0, 0.0),
            mass,
            radius,
        };
        particle.validate()?;
        Ok(particle)
    }

    /// Checks the invariants the physics core relies on.
    ///
    /// The fields are public, so a particle assembled by hand is re-checked with this
    /// before it is handed to a simulation.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(PhysicsError::InvalidMass);
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(PhysicsError::InvalidRadius);
        }
        if !self.position.0.is_finite() || !self.position.1.is_finite() {
            return Err(PhysicsError::InvalidPosition);
        }
        if !self.velocity.0.is_finite() || !self.velocity.1.is_finite() {
            return Err(PhysicsError::InvalidVelocity);
        }
        Ok(())
    }

    /// Adds the acceleration produced by the force `(fx, fy)`.
    ///
    /// Contributions are additive; call once per force source.
    pub fn apply_force(&mut self, fx: f64, fy: f64) {
        self.acceleration.0 += fx / self.mass;
        self.acceleration.1 += fy / self.mass;
    }

    /// Advances the particle over `dt` using semi-implicit Euler integration.
    ///
    /// The velocity is updated from the accumulated acceleration first, the position then
    /// moves with the new velocity, and the accumulator is reset for the next tick.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::particles::Particle;
    ///
    /// let mut particle = Particle::new((0.0, 0.0), (1.0, 0.0), 2.0, 1.0).unwrap();
    /// particle.apply_force(4.0, 0.0);
    /// particle.advance(0.5);
    ///
    /// // v = 1 + (4 / 2) * 0.5 = 2, x = 2 * 0.5 = 1
    /// assert_eq!(particle.velocity, (2.0, 0.0));
    /// assert_eq!(particle.position, (1.0, 0.0));
    /// assert_eq!(particle.acceleration, (0.0, 0.0));
    /// ```
    pub fn advance(&mut self, dt: f64) {
        self.velocity.0 += self.acceleration.0 * dt;
        self.velocity.1 += self.acceleration.1 * dt;

        self.position.0 += self.velocity.0 * dt;
        self.position.1 += self.velocity.1 * dt;

        self.acceleration = (0.0, 0.0);
    }

    /// Bounces the particle off the edges of a `(width, height)` region anchored at the origin.
    ///
    /// On each axis where the position left `[0, extent]`, the velocity component is
    /// reversed and scaled by `restitution`, and the position is clamped to the edge.
    /// Returns true if any axis was reflected.
    pub fn reflect_off_viewport(&mut self, viewport: (f64, f64), restitution: f64) -> bool {
        let (width, height) = viewport;
        let mut reflected = false;

        if self.position.0 < 0.0 || self.position.0 > width {
            self.velocity.0 = -self.velocity.0 * restitution;
            self.position.0 = self.position.0.clamp(0.0, width);
            reflected = true;
        }
        if self.position.1 < 0.0 || self.position.1 > height {
            self.velocity.1 = -self.velocity.1 * restitution;
            self.position.1 = self.position.1.clamp(0.0, height);
            reflected = true;
        }
        reflected
    }

    pub fn momentum(&self) -> (f64, f64) {
        (self.mass * self.velocity.0, self.mass * self.velocity.1)
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * (self.velocity.0 * self.velocity.0 + self.velocity.1 * self.velocity.1)
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        let dx = other.position.0 - self.position.0;
        let dy = other.position.1 - self.position.1;
        (dx * dx + dy * dy).sqrt()
    }

    /// True if the two discs interpenetrate (touching is not overlapping).
    pub fn overlaps(&self, other: &Particle) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }
}
