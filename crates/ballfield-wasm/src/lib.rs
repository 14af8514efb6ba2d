use ballfield_core::config::FieldConfig;
use ballfield_core::control::{ProgressFilter, ScrollConfig};
use ballfield_core::output::{InstanceBuffers, InstanceTransform};
use ballfield_core::particle::ColorClass;
use ballfield_core::solver::{FrameInput, Solver};
use wasm_bindgen::prelude::*;

/// Browser-facing ball field: owns the solver and the two instance buffers
/// the renderer reads from wasm memory.
#[wasm_bindgen]
pub struct BallFieldWorld {
    solver: Solver,
    buffers: InstanceBuffers,
    scroll: ProgressFilter,
}

#[wasm_bindgen]
impl BallFieldWorld {
    /// Create the default 46-ball field. Without a seed, spawn layout is drawn
    /// from entropy.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u32>) -> Result<BallFieldWorld, JsValue> {
        Self::build(FieldConfig::default(), seed)
    }

    /// Create a field with a custom particle count and radius range.
    #[wasm_bindgen]
    pub fn with_particles(
        count: usize,
        radius_min: f32,
        radius_max: f32,
        seed: Option<u32>,
    ) -> Result<BallFieldWorld, JsValue> {
        let config = FieldConfig {
            particle_count: count,
            radius_min,
            radius_max,
            ..FieldConfig::default()
        };
        Self::build(config, seed)
    }

    /// Step with an explicit control scalar. Returns elapsed milliseconds.
    ///
    /// A fully dispersed field respawns once the control returns below the
    /// cluster threshold.
    #[wasm_bindgen]
    pub fn step(&mut self, control: f32, pointer_active: bool, x: f32, y: f32, dt: f32) -> f32 {
        let start = js_sys::Date::now();
        if self.solver.revive_if_returned(control) {
            web_sys::console::log_1(&"WASM BallFieldWorld re-formed".into());
        }
        let pointer = pointer_active.then(|| glam::Vec2::new(x, y));
        self.solver.step(FrameInput::new(control, pointer, dt));
        self.buffers.write(self.solver.instances());
        (js_sys::Date::now() - start) as f32
    }

    /// Step from raw scroll progress, smoothing it first. Pass
    /// `pointer_active = false` while a scroll gesture is in progress.
    #[wasm_bindgen]
    pub fn step_scroll(
        &mut self,
        raw_progress: f32,
        pointer_active: bool,
        x: f32,
        y: f32,
        dt: f32,
    ) -> f32 {
        self.scroll.set_target(raw_progress);
        self.scroll.tick();
        let control = self.scroll.control();
        self.step(control, pointer_active, x, y, dt)
    }

    #[wasm_bindgen]
    pub fn scroll_progress(&self) -> f32 {
        self.scroll.current()
    }

    #[wasm_bindgen]
    pub fn primary_buffer_ptr(&self) -> *const f32 {
        self.buffers.buffer(ColorClass::Primary).as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn primary_buffer_byte_length(&self) -> usize {
        self.buffers.bytes(ColorClass::Primary).len()
    }

    #[wasm_bindgen]
    pub fn accent_buffer_ptr(&self) -> *const f32 {
        self.buffers.buffer(ColorClass::Accent).as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn accent_buffer_byte_length(&self) -> usize {
        self.buffers.bytes(ColorClass::Accent).len()
    }

    /// Floats per instance in either buffer.
    #[wasm_bindgen]
    pub fn instance_stride(&self) -> usize {
        std::mem::size_of::<InstanceTransform>() / std::mem::size_of::<f32>()
    }

    /// True if the buffers changed since the last call.
    #[wasm_bindgen]
    pub fn take_dirty(&mut self) -> bool {
        self.buffers.take_dirty()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.solver.particles().len()
    }

    #[wasm_bindgen]
    pub fn active_count(&self) -> usize {
        self.solver.particles().active_count()
    }

    #[wasm_bindgen]
    pub fn is_dispersed(&self) -> bool {
        self.solver.is_dispersed()
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.solver.reset();
        self.scroll.reset();
        self.buffers.write(self.solver.instances());
    }
}

impl BallFieldWorld {
    fn build(config: FieldConfig, seed: Option<u32>) -> Result<BallFieldWorld, JsValue> {
        let seed = seed.map(u64::from).unwrap_or_else(rand::random);
        let solver =
            Solver::new(config, seed).map_err(|err| JsValue::from_str(&format!("{err:#}")))?;
        let buffers = InstanceBuffers::new(solver.particles());

        web_sys::console::log_1(
            &format!(
                "WASM BallFieldWorld created: {} particles ({} primary, {} accent)",
                solver.particles().len(),
                solver.particles().count_of(ColorClass::Primary),
                solver.particles().count_of(ColorClass::Accent),
            )
            .into(),
        );

        Ok(BallFieldWorld {
            solver,
            buffers,
            scroll: ProgressFilter::new(ScrollConfig::default()),
        })
    }
}

impl Drop for BallFieldWorld {
    fn drop(&mut self) {
        web_sys::console::log_1(&"WASM BallFieldWorld released".into());
    }
}
