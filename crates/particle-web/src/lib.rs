pub mod runner;

pub use runner::ParticleRunner;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<ParticleRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. Returns `None` before `particles_init`.
fn with_runner<R>(f: impl FnOnce(&mut ParticleRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Create the particle world. `config_json` may be empty for defaults.
/// Returns false (and logs why) when the config is rejected.
#[wasm_bindgen]
pub fn particles_init(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match ParticleRunner::from_json(config_json) {
        Ok(runner) => {
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("particle-web: initialized");
            true
        }
        Err(e) => {
            log::error!("particle-web: {}", e);
            false
        }
    }
}

#[wasm_bindgen]
pub fn particles_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn particles_set_gravity(x: f32, y: f32) {
    with_runner(|r| r.set_gravity(x, y));
}

/// Rigid-object ids start at 1; 0 means the runner is not initialized.
#[wasm_bindgen]
pub fn particles_add_circle(x: f32, y: f32, radius: f32) -> u32 {
    with_runner(|r| r.add_circle(x, y, radius)).unwrap_or(0)
}

#[wasm_bindgen]
pub fn particles_add_rect(x: f32, y: f32, width: f32, height: f32, rotation: f32) -> u32 {
    with_runner(|r| r.add_rect(x, y, width, height, rotation)).unwrap_or(0)
}

#[wasm_bindgen]
pub fn particles_remove_rigid(id: u32) -> bool {
    with_runner(|r| r.remove_rigid(id)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn particles_emit(x: f32, y: f32, count: u32) {
    with_runner(|r| r.emit(x, y, count));
}

/// Returns the new pack's id, or 0 (never a valid id) before init.
#[wasm_bindgen]
pub fn particles_spawn_dye_pack(x: f32, y: f32) -> u32 {
    with_runner(|r| r.spawn_dye_pack(x, y)).unwrap_or(0)
}

#[wasm_bindgen]
pub fn particles_hit_dye_pack(id: u32) -> bool {
    with_runner(|r| r.hit_dye_pack(id)).unwrap_or(false)
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_dye_pack_offset() -> u32 {
    with_runner(|r| r.dye_pack_offset()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_particle_count() -> u32 {
    with_runner(|r| r.particle_count()).unwrap_or(0)
}
