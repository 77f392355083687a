use crate::particles::{point_mass_force, Particle};
use crate::utils::{MAX_TREE_DEPTH, PROXIMITY_EPSILON};

/// An axis-aligned rectangle in screen orientation.
///
/// `(x, y)` is the top-left corner and y grows downward, so the north-west quadrant
/// of a rectangle is the one that shares its `(x, y)` corner.
///
/// # Examples
///
/// ```
/// use rs_gravity::particles::Rect;
///
/// let rect = Rect::new(0.0, 0.0, 4.0, 2.0);
///
/// // Lower edges are inclusive, upper edges exclusive
/// assert!(rect.contains(0.0, 0.0));
/// assert!(rect.contains(3.9, 1.9));
/// assert!(!rect.contains(4.0, 1.0));
/// assert!(!rect.contains(1.0, 2.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    /// Returns true if the point (x, y) is inside this rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x &&
            x <  self.x + self.width &&
            y >= self.y &&
            y <  self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Splits the rectangle into four equal quadrants, returned as `[NW, NE, SW, SE]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::particles::Rect;
    ///
    /// let [nw, ne, sw, se] = Rect::new(0.0, 0.0, 2.0, 2.0).subdivide();
    /// assert_eq!(nw, Rect::new(0.0, 0.0, 1.0, 1.0));
    /// assert_eq!(ne, Rect::new(1.0, 0.0, 1.0, 1.0));
    /// assert_eq!(sw, Rect::new(0.0, 1.0, 1.0, 1.0));
    /// assert_eq!(se, Rect::new(1.0, 1.0, 1.0, 1.0));
    /// ```
    pub fn subdivide(&self) -> [Rect; 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        [
            Rect::new(self.x, self.y, hw, hh),           // NW
            Rect::new(self.x + hw, self.y, hw, hh),      // NE
            Rect::new(self.x, self.y + hh, hw, hh),      // SW
            Rect::new(self.x + hw, self.y + hh, hw, hh), // SE
        ]
    }

    /// Index into [`Rect::subdivide`] of the quadrant holding the point.
    ///
    /// Decided against the midlines rather than the children's own `contains`, so a point
    /// inside this rectangle always lands in exactly one child even when the children's
    /// edges do not add up exactly in floating point.
    fn quadrant_of(&self, x: f64, y: f64) -> usize {
        let (mid_x, mid_y) = self.center();
        let east = x >= mid_x;
        let south = y >= mid_y;
        match (east, south) {
            (false, false) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (true, true) => 3,
        }
    }
}

/// Computes the bounding rectangle of every particle position, grown by `margin` on each side.
///
/// Returns `None` when there are no particles. The upper edges of a [`Rect`] are exclusive,
/// so on an axis where `margin` is lost to rounding (coordinates far from the origin) the
/// margin is grown until the extreme particle is strictly inside.
///
/// # Examples
///
/// ```
/// use rs_gravity::particles::{bounding_rect, Particle, Rect};
///
/// let particles = vec![
///     Particle::new((10.0, 20.0), (0.0, 0.0), 1.0, 1.0).unwrap(),
///     Particle::new((30.0, -5.0), (0.0, 0.0), 1.0, 1.0).unwrap(),
/// ];
/// let rect = bounding_rect(&particles, 100.0).unwrap();
/// assert_eq!(rect, Rect::new(-90.0, -105.0, 220.0, 225.0));
/// assert!(bounding_rect(&[], 100.0).is_none());
/// ```
pub fn bounding_rect(particles: &[Particle], margin: f64) -> Option<Rect> {
    if particles.is_empty() {
        return None;
    }
    let mut min = (f64::INFINITY, f64::INFINITY);
    let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in particles {
        min.0 = min.0.min(p.position.0);
        min.1 = min.1.min(p.position.1);
        max.0 = max.0.max(p.position.0);
        max.1 = max.1.max(p.position.1);
    }
    let (x, width) = padded_span(min.0, max.0, margin);
    let (y, height) = padded_span(min.1, max.1, margin);
    Some(Rect::new(x, y, width, height))
}

/// Origin and extent of `[min, max]` padded by at least `margin`, with `origin + extent > max`.
fn padded_span(min: f64, max: f64, margin: f64) -> (f64, f64) {
    let mut margin = margin
        .max(min.abs().max(max.abs()) * f64::EPSILON * 4.0)
        .max(f64::MIN_POSITIVE);
    loop {
        let origin = min - margin;
        let extent = (max - min) + 2.0 * margin;
        if origin + extent > max || !extent.is_finite() {
            return (origin, extent);
        }
        margin *= 2.0;
    }
}

/// The tree's copy of a particle: where it was and how heavy it was when the tree was built.
///
/// `index` is the particle's position in the slice the tree was built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleData {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub mass: f64,
}

impl ParticleData {
    pub fn from_particle(index: usize, particle: &Particle) -> Self {
        ParticleData {
            index,
            x: particle.position.0,
            y: particle.position.1,
            mass: particle.mass,
        }
    }
}

/// Index of a node inside a [`QuadTree`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A quadtree node.
///
/// A leaf holds particles and no children; once subdivided a node holds exactly four
/// children (NW, NE, SW, SE) and no particles, and stays that way.
#[derive(Debug, Clone)]
pub struct QuadNode {
    boundary: Rect,
    depth: u32,
    particles: Vec<ParticleData>,
    children: Option<[NodeId; 4]>,
    total_mass: f64,
    center_of_mass: (f64, f64),
}

impl QuadNode {
    fn new(boundary: Rect, depth: u32) -> Self {
        QuadNode {
            boundary,
            depth,
            particles: Vec::new(),
            children: None,
            total_mass: 0.0,
            center_of_mass: (0.0, 0.0),
        }
    }

    pub fn boundary(&self) -> Rect {
        self.boundary
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn particles(&self) -> &[ParticleData] {
        &self.particles
    }

    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.children
    }

    /// Aggregate mass; only meaningful after [`QuadTree::aggregate`].
    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    /// Aggregate centre of mass; only meaningful after [`QuadTree::aggregate`].
    pub fn center_of_mass(&self) -> (f64, f64) {
        self.center_of_mass
    }
}

/// Barnes-Hut quadtree backed by a flat node arena.
///
/// Children are referenced by [`NodeId`] and always allocated after their parent. The
/// tree is meant to live for a single simulation step: build it, [`aggregate`](Self::aggregate)
/// it, query it, drop it.
///
/// # Examples
///
/// ```
/// use rs_gravity::particles::{bounding_rect, Particle, QuadTree};
///
/// let particles = vec![
///     Particle::new((0.0, 0.0), (0.0, 0.0), 1.0, 1.0).unwrap(),
///     Particle::new((10.0, 0.0), (0.0, 0.0), 3.0, 1.0).unwrap(),
/// ];
/// let boundary = bounding_rect(&particles, 100.0).unwrap();
/// let mut tree = QuadTree::build(boundary, 4, &particles);
/// tree.aggregate();
///
/// assert_eq!(tree.total_mass(), 4.0);
/// assert_eq!(tree.center_of_mass(), (7.5, 0.0));
///
/// let (fx, fy) = tree.compute_force(&particles[0], 1.0, 0.5);
/// assert!((fx - 0.03).abs() < 1e-12); // 1 * 1 * 3 / 10²
/// assert_eq!(fy, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<QuadNode>,
    capacity: usize,
}

const ROOT: NodeId = NodeId(0);

impl QuadTree {
    /// Creates a tree consisting of an empty root leaf covering `boundary`.
    ///
    /// A `capacity` of zero is treated as one.
    pub fn new(boundary: Rect, capacity: usize) -> Self {
        QuadTree {
            nodes: vec![QuadNode::new(boundary, 0)],
            capacity: capacity.max(1),
        }
    }

    /// Builds a tree over `particles`, inserting them in slice order.
    ///
    /// The tree is not aggregated yet.
    ///
    /// # Panics
    ///
    /// Panics if a particle lies outside `boundary`: the caller is expected to derive the
    /// boundary from the same particles (see [`bounding_rect`]).
    pub fn build(boundary: Rect, capacity: usize, particles: &[Particle]) -> Self {
        let mut tree = Self::new(boundary, capacity);
        for (index, particle) in particles.iter().enumerate() {
            let inserted = tree.insert(ParticleData::from_particle(index, particle));
            assert!(
                inserted,
                "particle {} at {:?} lies outside the tree boundary {:?}",
                index, particle.position, boundary
            );
        }
        tree
    }

    /// Inserts a particle, returning false (and leaving the tree untouched) if it lies
    /// outside the root boundary.
    pub fn insert(&mut self, p: ParticleData) -> bool {
        if !self.nodes[ROOT.0].boundary.contains(p.x, p.y) {
            return false;
        }
        self.insert_into(ROOT, p);
        true
    }

    fn insert_into(&mut self, mut id: NodeId, p: ParticleData) {
        loop {
            let node = &mut self.nodes[id.0];
            match node.children {
                Some(children) => {
                    id = children[node.boundary.quadrant_of(p.x, p.y)];
                }
                None => {
                    // Past the depth limit only exactly coincident particles remain; keep them together.
                    if node.particles.len() < self.capacity || node.depth >= MAX_TREE_DEPTH {
                        node.particles.push(p);
                        return;
                    }
                    self.subdivide(id);
                }
            }
        }
    }

    /// Splits a leaf into four children and moves its particles into them.
    ///
    /// Does nothing if the node is already subdivided.
    pub fn subdivide(&mut self, id: NodeId) {
        if self.nodes[id.0].children.is_some() {
            return;
        }
        let boundary = self.nodes[id.0].boundary;
        let depth = self.nodes[id.0].depth + 1;

        let first = self.nodes.len();
        self.nodes.extend(boundary.subdivide().into_iter().map(|quad| QuadNode::new(quad, depth)));
        let children = [NodeId(first), NodeId(first + 1), NodeId(first + 2), NodeId(first + 3)];

        let held = std::mem::take(&mut self.nodes[id.0].particles);
        self.nodes[id.0].children = Some(children);
        for p in held {
            self.insert_into(children[boundary.quadrant_of(p.x, p.y)], p);
        }
    }

    /// Computes total mass and centre of mass of every node, bottom-up.
    ///
    /// Children always sit after their parent in the arena, so a reverse sweep finishes
    /// every child before its parent. Calling this twice without inserting in between
    /// gives identical results.
    pub fn aggregate(&mut self) {
        for i in (0..self.nodes.len()).rev() {
            let (mass, weighted_x, weighted_y) = match self.nodes[i].children {
                None => self.nodes[i].particles.iter().fold((0.0, 0.0, 0.0), |(m, wx, wy), p| {
                    (m + p.mass, wx + p.x * p.mass, wy + p.y * p.mass)
                }),
                Some(children) => children.iter().fold((0.0, 0.0, 0.0), |(m, wx, wy), child| {
                    let child = &self.nodes[child.0];
                    (
                        m + child.total_mass,
                        wx + child.center_of_mass.0 * child.total_mass,
                        wy + child.center_of_mass.1 * child.total_mass,
                    )
                }),
            };

            let node = &mut self.nodes[i];
            node.total_mass = mass;
            node.center_of_mass = if mass > 0.0 {
                (weighted_x / mass, weighted_y / mass)
            } else {
                (0.0, 0.0)
            };
        }
    }

    /// Approximates the gravitational force exerted on `particle` by everything in the tree.
    ///
    /// A subdivided node whose `width / distance` falls below `theta` acts as a single mass
    /// at its centre of mass; otherwise its children are visited. Particles in a leaf act
    /// individually. Sources closer than [`PROXIMITY_EPSILON`] are skipped, which is also how
    /// the particle avoids attracting itself. `theta = 0` yields exact pairwise summation.
    pub fn compute_force(&self, particle: &Particle, g: f64, theta: f64) -> (f64, f64) {
        self.force_from(ROOT, particle.position, particle.mass, g, theta)
    }

    /// Gravitational acceleration a unit test mass would feel at `(x, y)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::particles::{Particle, QuadTree, Rect};
    ///
    /// let particles = vec![Particle::new((0.0, 0.0), (0.0, 0.0), 8.0, 1.0).unwrap()];
    /// let mut tree = QuadTree::build(Rect::new(-10.0, -10.0, 20.0, 20.0), 4, &particles);
    /// tree.aggregate();
    ///
    /// let (gx, gy) = tree.field_at(2.0, 0.0, 1.0, 0.5);
    /// assert_eq!((gx, gy), (-2.0, 0.0)); // 8 / 2², pointing back at the mass
    /// ```
    pub fn field_at(&self, x: f64, y: f64, g: f64, theta: f64) -> (f64, f64) {
        self.force_from(ROOT, (x, y), 1.0, g, theta)
    }

    fn force_from(&self, id: NodeId, position: (f64, f64), mass: f64, g: f64, theta: f64) -> (f64, f64) {
        let node = &self.nodes[id.0];
        if node.total_mass == 0.0 {
            return (0.0, 0.0);
        }

        match node.children {
            None => node.particles.iter().fold((0.0, 0.0), |(fx, fy), q| {
                let (dfx, dfy) = point_mass_force(position, mass, (q.x, q.y), q.mass, g);
                (fx + dfx, fy + dfy)
            }),
            Some(children) => {
                let dx = node.center_of_mass.0 - position.0;
                let dy = node.center_of_mass.1 - position.1;
                let dist = (dx * dx + dy * dy).sqrt();

                // Too close to the centre of mass to approximate, open the node regardless.
                if dist >= PROXIMITY_EPSILON && node.boundary.width / dist < theta {
                    point_mass_force(position, mass, node.center_of_mass, node.total_mass, g)
                } else {
                    children.iter().fold((0.0, 0.0), |(fx, fy), child| {
                        let (dfx, dfy) = self.force_from(*child, position, mass, g, theta);
                        (fx + dfx, fy + dfy)
                    })
                }
            }
        }
    }

    /// Rectangles of the root and of every node created by subdivision, in arena order.
    pub fn boundaries(&self) -> Vec<Rect> {
        self.nodes.iter().map(|node| node.boundary).collect()
    }

    /// Particle lists of every leaf, empty leaves included.
    pub fn leaves(&self) -> impl Iterator<Item = &[ParticleData]> + '_ {
        self.nodes.iter().filter(|node| node.is_leaf()).map(|node| node.particles())
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn node(&self, id: NodeId) -> &QuadNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[ROOT.0].is_leaf() && self.nodes[ROOT.0].particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_mass(&self) -> f64 {
        self.nodes[ROOT.0].total_mass
    }

    pub fn center_of_mass(&self) -> (f64, f64) {
        self.nodes[ROOT.0].center_of_mass
    }
}

/// Adds the tree's approximate gravitational force to every particle's accumulator.
///
/// `tree` must have been built from `particles` and aggregated.
pub fn accumulate_forces(tree: &QuadTree, particles: &mut [Particle], g: f64, theta: f64) {
    for particle in particles.iter_mut() {
        let (fx, fy) = tree.compute_force(particle, g, theta);
        particle.apply_force(fx, fy);
    }
}
