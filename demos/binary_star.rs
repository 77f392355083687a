// demos/binary_star.rs
// Run with `RUST_LOG=debug cargo run --example binary_star -- 2000` to see the tick log.

use log::info;
use rs_gravity::particles::Simulation;
use rs_gravity::utils::{PhysicsError, SimulationConfig};

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    let steps: usize = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1000);

    let mut sim = Simulation::new(SimulationConfig::default())?.with_binary_system();

    // A few clicks around the system, one of them too close to the centre to count
    sim.add_particle_at(650.0, 300.0)?;
    sim.add_particle_at(400.0, 80.0)?;
    sim.add_particle_at(405.0, 300.0)?;

    println!("Initial state:");
    println!("Particles: {}, total mass: {}", sim.particles().len(), sim.total_mass());
    println!("Kinetic energy: {}", sim.kinetic_energy());

    for step in 1..=steps {
        let report = sim.step();
        if report.collisions > 0 {
            info!("Tick {}: {} collisions", sim.tick(), report.collisions);
        }
        if step == steps / 2 {
            println!("\nHalfway, switching to merge mode");
            sim.toggle_collision_mode();
        }
        if step % 250 == 0 {
            let (px, py) = sim.total_momentum();
            println!(
                "Tick {:>5}: particles={}, momentum=({:.3}, {:.3}), kinetic energy={:.3}, tree nodes={}",
                sim.tick(),
                sim.particles().len(),
                px,
                py,
                sim.kinetic_energy(),
                sim.tree_boundaries().map_or(0, |rects| rects.len()),
            );
        }
    }

    println!("\nFinal state:");
    for view in sim.snapshot() {
        println!(
            "  at ({:.1}, {:.1}) radius={:.2} mass={}",
            view.position.0, view.position.1, view.radius, view.mass
        );
    }

    Ok(())
}
