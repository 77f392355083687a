// rs_gravity_wasm/tests/web.rs
// Run with `wasm-pack test --headless --firefox rs_gravity_wasm`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use rs_gravity_wasm::WasmSimulation;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_step_exposes_flat_positions() {
    let mut sim = WasmSimulation::binary_system(800.0, 600.0, 1).expect("Failed to create simulation");
    let count = sim.step();
    assert_eq!(count, 7);
    assert_eq!(sim.positions().length() as usize, 2 * count);
    assert_eq!(sim.radii().length() as usize, count);
    assert_eq!(sim.tick(), 1);
}

#[wasm_bindgen_test]
fn test_tree_rects_follow_display_flag() {
    let mut sim = WasmSimulation::binary_system(800.0, 600.0, 1).expect("Failed to create simulation");
    sim.step();
    assert_eq!(sim.tree_rects().length(), 0);

    sim.toggle_show_tree();
    sim.step();
    assert!(sim.show_tree());
    assert!(sim.tree_rects().length() >= 4);
    assert_eq!(sim.tree_rects().length() % 4, 0);
}

#[wasm_bindgen_test]
fn test_add_particle_rejects_non_finite_click() {
    let mut sim = WasmSimulation::new(800.0, 600.0, 1).expect("Failed to create simulation");
    assert!(sim.add_particle_at(f64::NAN, 10.0).is_err());
    sim.add_particle_at(650.0, 300.0).expect("Valid click");
    assert_eq!(sim.step(), 1);
}
