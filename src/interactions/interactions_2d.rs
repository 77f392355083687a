use log::trace;
use crate::particles::Particle;

/// How overlapping particles are reconciled at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionMode {
    /// Bounce apart with an impulse along the line of centres.
    #[default]
    Elastic,
    /// Fuse into one particle conserving mass and momentum.
    Merge,
}

impl CollisionMode {
    pub fn toggled(self) -> Self {
        match self {
            CollisionMode::Elastic => CollisionMode::Merge,
            CollisionMode::Merge => CollisionMode::Elastic,
        }
    }
}

/// What a collision pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    /// Pairs that received an impulse (elastic mode).
    pub collisions: usize,
    /// Pairs fused into one particle (merge mode).
    pub merges: usize,
}

/// Resolves a collision between two overlapping particles with an impulse.
///
/// Nothing happens if the discs do not overlap or are already separating along the
/// line of centres. Otherwise both velocities change by `±j·n/m` with
/// `j = -(1 + e)·v_rel·n / (1/m1 + 1/m2)`, and the pair is pushed apart by half the
/// overlap, each side moving in proportion to the other's share of the total mass.
/// Returns true if an impulse was applied.
///
/// # Examples
///
/// ```
/// use rs_gravity::interactions::elastic_collision_2d;
/// use rs_gravity::particles::Particle;
///
/// let mut a = Particle::new((0.0, 0.0), (1.0, 0.0), 1.0, 1.0).unwrap();
/// let mut b = Particle::new((1.5, 0.0), (-1.0, 0.0), 1.0, 1.0).unwrap();
///
/// assert!(elastic_collision_2d(&mut a, &mut b, 1.0));
/// // Equal masses with perfect restitution swap velocities
/// assert_eq!(a.velocity, (-1.0, 0.0));
/// assert_eq!(b.velocity, (1.0, 0.0));
/// // and are pushed apart symmetrically by half the overlap
/// assert_eq!(a.position.0, -0.125);
/// assert_eq!(b.position.0, 1.625);
/// ```
pub fn elastic_collision_2d(p1: &mut Particle, p2: &mut Particle, restitution: f64) -> bool {
    let dx = p2.position.0 - p1.position.0;
    let dy = p2.position.1 - p1.position.1;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance >= p1.radius + p2.radius {
        return false;
    }

    // Coincident centres have no line between them; pick the x axis.
    let (nx, ny) = if distance > 0.0 { (dx / distance, dy / distance) } else { (1.0, 0.0) };

    let dvx = p2.velocity.0 - p1.velocity.0;
    let dvy = p2.velocity.1 - p1.velocity.1;
    let vel_along_normal = dvx * nx + dvy * ny;
    if vel_along_normal >= 0.0 {
        return false;
    }

    let impulse = -(1.0 + restitution) * vel_along_normal / (1.0 / p1.mass + 1.0 / p2.mass);
    let (ix, iy) = (impulse * nx, impulse * ny);
    p1.velocity.0 -= ix / p1.mass;
    p1.velocity.1 -= iy / p1.mass;
    p2.velocity.0 += ix / p2.mass;
    p2.velocity.1 += iy / p2.mass;

    let penetration = (p1.radius + p2.radius - distance) * 0.5;
    let total_mass = p1.mass + p2.mass;
    let (cx, cy) = (nx * penetration, ny * penetration);
    p1.position.0 -= cx * (p2.mass / total_mass);
    p1.position.1 -= cy * (p2.mass / total_mass);
    p2.position.0 += cx * (p1.mass / total_mass);
    p2.position.1 += cy * (p1.mass / total_mass);

    true
}

/// Fuses two particles into one.
///
/// Mass adds up; position and velocity are mass-weighted averages, so momentum is
/// conserved; the radius conserves the summed volume `r³` of both discs.
///
/// # Examples
///
/// ```
/// use rs_gravity::interactions::merge_particles;
/// use rs_gravity::particles::Particle;
///
/// let a = Particle::new((0.0, 0.0), (1.0, 0.0), 4.0, 2.0).unwrap();
/// let b = Particle::new((0.0, 0.0), (-1.0, 0.0), 4.0, 2.0).unwrap();
/// let merged = merge_particles(&a, &b);
///
/// assert_eq!(merged.mass, 8.0);
/// assert_eq!(merged.velocity, (0.0, 0.0));
/// assert!((merged.radius - 16f64.cbrt()).abs() < 1e-12);
/// ```
pub fn merge_particles(a: &Particle, b: &Particle) -> Particle {
    let total_mass = a.mass + b.mass;
    let weighted = |u: f64, v: f64| (u * a.mass + v * b.mass) / total_mass;
    Particle {
        position: (weighted(a.position.0, b.position.0), weighted(a.position.1, b.position.1)),
        velocity: (weighted(a.velocity.0, b.velocity.0), weighted(a.velocity.1, b.velocity.1)),
        acceleration: (0.0, 0.0),
        mass: total_mass,
        radius: (a.radius.powi(3) + b.radius.powi(3)).cbrt(),
    }
}

/// Resolves every overlapping pair in `particles` according to `mode`.
///
/// Elastic mode makes one pass over the ascending pairs `(i, j)`, `i < j`.
///
/// Merge mode scans the same pairs; a merged particle takes the lower slot `i`, slot `j`
/// is removed (preserving the order of the rest), and the merged particle keeps being
/// compared against the following particles. The scan repeats until a full pass merges
/// nothing, so no overlapping pair is left behind however the overlaps were ordered.
pub fn resolve_collisions(particles: &mut Vec<Particle>, mode: CollisionMode, restitution: f64) -> CollisionReport {
    match mode {
        CollisionMode::Elastic => CollisionReport {
            collisions: collide_pairs(particles, restitution),
            merges: 0,
        },
        CollisionMode::Merge => CollisionReport {
            collisions: 0,
            merges: merge_overlapping(particles),
        },
    }
}

fn collide_pairs(particles: &mut [Particle], restitution: f64) -> usize {
    let mut collisions = 0;
    for i in 0..particles.len() {
        let (head, tail) = particles.split_at_mut(i + 1);
        let p1 = &mut head[i];
        for p2 in tail.iter_mut() {
            if elastic_collision_2d(p1, p2, restitution) {
                collisions += 1;
            }
        }
    }
    collisions
}

fn merge_overlapping(particles: &mut Vec<Particle>) -> usize {
    let mut merges = 0;
    loop {
        let mut merged_this_pass = 0;
        let mut i = 0;
        while i < particles.len() {
            let mut j = i + 1;
            while j < particles.len() {
                if particles[i].overlaps(&particles[j]) {
                    let absorbed = particles.remove(j);
                    trace!("Merging particle {} into {} (mass {} + {})", j, i, absorbed.mass, particles[i].mass);
                    particles[i] = merge_particles(&particles[i], &absorbed);
                    merged_this_pass += 1;
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
        merges += merged_this_pass;
        if merged_this_pass == 0 {
            return merges;
        }
    }
}
