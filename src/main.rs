//! FPS Arena entry point
//!
//! On the web this boots WebGPU, wires browser input and runs the frame loop.
//! Natively it plays a headless autopilot session and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent};

    use fps_arena::Settings;
    use fps_arena::platform::{EventListener, FpsCounter, FrameLoop};
    use fps_arena::renderer::{RenderError, SdfRenderState};
    use fps_arena::sim::{GameState, InputState, apply_look, fire, tick};
    use fps_arena::ui::HudSnapshot;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        settings: Settings,
        render_state: Option<SdfRenderState>,
        last_time: f64,
        fps: FpsCounter,
        document: Document,
    }

    impl Game {
        fn new(seed: u64, document: Document) -> Self {
            Self {
                state: GameState::new(seed),
                input: InputState::default(),
                settings: Settings::load(),
                render_state: None,
                last_time: 0.0,
                fps: FpsCounter::new(),
                document,
            }
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let report = tick(&mut self.state, &self.input, dt);
            if let Some(spawned) = report.wave_spawned {
                log::info!("Wave {} incoming ({} enemies)", spawned.wave, spawned.count);
            }
            self.fps.record(time);

            self.render(time);
            self.update_hud();
        }

        fn render(&mut self, time: f64) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, &self.settings, time) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", hidden);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let hud = HudSnapshot::from_state(&self.state, self.input.locked);

            self.set_text("health-text", &hud.health_pct.to_string());
            if let Some(el) = self.document.get_element_by_id("health-fill") {
                let _ = el.set_attribute("class", hud.health_band.css_class());
                let _ = el.set_attribute("style", &format!("width: {}%", hud.health_pct));
            }
            self.set_text("score", &hud.score.to_string());
            self.set_text("wave", &hud.wave.to_string());

            self.set_hidden("fps-item", !self.settings.show_fps);
            self.set_text("fps", &self.fps.fps().to_string());

            self.set_hidden("wave-banner", !hud.wave_incoming);
            self.set_hidden("overlay", hud.locked);
        }

        fn read_settings_panel(&mut self) {
            let checked = |id: &str| {
                self.document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.checked())
            };

            if let Some(v) = checked("opt-flash") {
                self.settings.screen_flash = v;
                self.settings.hit_highlight = v;
            }
            if let Some(v) = checked("opt-reduced-motion") {
                self.settings.reduced_motion = v;
            }
            if let Some(v) = checked("opt-fps") {
                self.settings.show_fps = v;
            }
            if let Some(input) = self
                .document
                .get_element_by_id("opt-sensitivity")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                // Slider value is in thousandths of a radian per pixel
                let v = input.value_as_number();
                if v.is_finite() {
                    self.settings.mouse_sensitivity = (v / 1000.0) as f32;
                }
            }
            self.settings.save();
        }

        fn write_settings_panel(&self) {
            let set_checked = |id: &str, value: bool| {
                if let Some(input) = self
                    .document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                {
                    input.set_checked(value);
                }
            };
            set_checked("opt-flash", self.settings.screen_flash);
            set_checked("opt-reduced-motion", self.settings.reduced_motion);
            set_checked("opt-fps", self.settings.show_fps);
            if let Some(input) = self
                .document
                .get_element_by_id("opt-sensitivity")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value_as_number(self.settings.mouse_sensitivity as f64 * 1000.0);
            }
        }
    }

    /// Everything registered with the browser for one page session
    struct Session {
        _game: Rc<RefCell<Game>>,
        listeners: Vec<EventListener>,
        frame_loop: FrameLoop,
    }

    impl Drop for Session {
        fn drop(&mut self) {
            log::info!(
                "Session torn down: released {} listeners, frame pending: {}",
                self.listeners.len(),
                self.frame_loop.is_pending()
            );
        }
    }

    thread_local! {
        static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("FPS Arena starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let (width, height) = fit_canvas(&window, &canvas);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, document.clone())));
        game.borrow().write_settings_panel();
        log::info!("Game initialized with seed: {}", seed);

        match init_renderer(&canvas, width, height).await {
            Ok(mut render_state) => {
                render_state.set_start_time(window.performance().map_or(0.0, |p| p.now()));
                game.borrow_mut().render_state = Some(render_state);
            }
            Err(e) => {
                // Keep running so the HUD and input still work
                log::error!("WebGPU unavailable: {e}");
            }
        }

        let listeners = setup_listeners(&window, &document, &canvas, &game);

        let frame_game = game.clone();
        let frame_loop = FrameLoop::start(window.clone(), move |time| {
            frame_game.borrow_mut().frame(time);
        });

        SESSION.with(|s| {
            *s.borrow_mut() = Some(Session {
                _game: game,
                listeners,
                frame_loop,
            });
        });

        // Teardown listener lives outside the session so it can drop it
        let teardown = EventListener::new(&window, "pagehide", |_event| {
            let session = SESSION.with(|s| s.borrow_mut().take());
            // Defer the drop until no session callback is on the stack
            wasm_bindgen_futures::spawn_local(async move {
                drop(session);
            });
        });
        std::mem::forget(teardown);

        log::info!("FPS Arena running!");
    }

    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<SdfRenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        SdfRenderState::new(surface, &adapter, width, height).await
    }

    fn setup_listeners(
        window: &web_sys::Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
        game: &Rc<RefCell<Game>>,
    ) -> Vec<EventListener> {
        let mut listeners = Vec::new();

        // Keyboard: held movement keys
        for (event_type, down) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            listeners.extend(EventListener::new(window, event_type, move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    let mut g = game.borrow_mut();
                    if g.input.handle_key(&event.code(), down) && g.input.locked {
                        event.prevent_default();
                    }
                }
            }));
        }

        // Mouse down: fire (primary button only)
        {
            let game = game.clone();
            listeners.extend(EventListener::new(canvas, "mousedown", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if event.button() != 0 {
                    return;
                }
                let mut g = game.borrow_mut();
                let g = &mut *g;
                fire(&mut g.state, &g.input);
            }));
        }

        // Mouse move: look while locked
        {
            let game = game.clone();
            listeners.extend(EventListener::new(document, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let mut g = game.borrow_mut();
                if g.input.locked {
                    let sensitivity = g.settings.mouse_sensitivity;
                    apply_look(&mut g.state.player, event.movement_x() as f32, sensitivity);
                }
            }));
        }

        // Pointer lock gained/lost
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let document_clone = document.clone();
            listeners.extend(EventListener::new(document, "pointerlockchange", move |_event| {
                let canvas_el: &web_sys::Element = canvas_clone.as_ref();
                let locked = document_clone
                    .pointer_lock_element()
                    .is_some_and(|el| el == *canvas_el);
                if locked {
                    log::info!("Pointer lock acquired");
                } else {
                    log::info!("Pointer lock released");
                }
                game.borrow_mut().input.set_locked(locked);
            }));
        }

        listeners.extend(EventListener::new(document, "pointerlockerror", |_event| {
            log::warn!("Pointer lock request was denied");
        }));

        // Click to Play
        if let Some(btn) = document.get_element_by_id("play-btn") {
            let canvas_clone = canvas.clone();
            listeners.extend(EventListener::new(&btn, "click", move |_event| {
                canvas_clone.request_pointer_lock();
            }));
        }

        // Settings panel
        if let Some(panel) = document.get_element_by_id("settings") {
            let game = game.clone();
            listeners.extend(EventListener::new(&panel, "change", move |_event| {
                game.borrow_mut().read_settings_panel();
            }));
        }

        // Resize: surface only
        {
            let game = game.clone();
            let window_clone = window.clone();
            let canvas_clone = canvas.clone();
            listeners.extend(EventListener::new(window, "resize", move |_event| {
                let (width, height) = fit_canvas(&window_clone, &canvas_clone);
                if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                    render_state.resize(width, height);
                }
            }));
        }

        listeners
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use fps_arena::sim::{GameState, InputState, fire, tick};
    use fps_arena::{Tuning, TuningError, facing_yaw};
    use thiserror::Error;

    /// Simulated display refresh
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Two minutes of play
    const MAX_FRAMES: u32 = 60 * 120;
    /// Shots per second the autopilot fires
    const FIRE_INTERVAL_FRAMES: u32 = 12;

    #[derive(Error, Debug)]
    pub enum HeadlessError {
        #[error("failed to read {path}: {source}")]
        Io {
            path: String,
            #[source]
            source: std::io::Error,
        },

        #[error("{path}: {source}")]
        Tuning {
            path: String,
            #[source]
            source: TuningError,
        },
    }

    pub fn load_tuning(path: Option<&str>) -> Result<Tuning, HeadlessError> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path).map_err(|source| HeadlessError::Io {
            path: path.to_owned(),
            source,
        })?;
        let tuning = Tuning::from_json(&json).map_err(|source| HeadlessError::Tuning {
            path: path.to_owned(),
            source,
        })?;
        log::info!("Loaded tuning from {path}");
        Ok(tuning)
    }

    /// Turn toward the nearest enemy and fire on a fixed cadence
    pub fn run(tuning: Tuning, seed: u64) {
        let mut state = GameState::with_tuning(seed, tuning);
        let input = InputState {
            locked: true,
            ..Default::default()
        };

        let mut shots = 0u32;
        let mut hits = 0u32;

        for frame in 0..MAX_FRAMES {
            let eye = state.player.pos;
            if let Some(target) = state
                .enemies
                .iter()
                .map(|e| e.pos)
                .min_by(|a, b| a.distance_squared(eye).total_cmp(&b.distance_squared(eye)))
            {
                // Camera forward is -Z at yaw 0, the opposite of an object's facing
                state.player.yaw = fps_arena::normalize_angle(facing_yaw(eye - target));
            }

            if frame % FIRE_INTERVAL_FRAMES == 0 {
                if let Some(shot) = fire(&mut state, &input) {
                    shots += 1;
                    hits += u32::from(shot.hit.is_some());
                }
            }

            let report = tick(&mut state, &input, FRAME_DT);
            if let Some(spawned) = report.wave_spawned {
                log::info!(
                    "t={:.1}s wave {} ({} enemies), score {}",
                    frame as f32 * FRAME_DT,
                    spawned.wave,
                    spawned.count,
                    state.score
                );
            }

            if state.player.health <= 0.0 {
                log::info!("Player overwhelmed at t={:.1}s", frame as f32 * FRAME_DT);
                break;
            }
        }

        println!(
            "wave {}  score {}  health {:.0}  shots {}  hits {}",
            state.wave(),
            state.score,
            state.player.health,
            shots,
            hits
        );
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_no_path_uses_defaults() {
            let tuning = load_tuning(None).expect("defaults");
            assert_eq!(tuning.shot_damage, Tuning::default().shot_damage);
        }

        #[test]
        fn test_missing_file_is_io_error() {
            let path = std::env::temp_dir().join("fps-arena-no-such-tuning.json");
            let err = load_tuning(path.to_str()).expect_err("file does not exist");
            assert!(matches!(err, HeadlessError::Io { .. }));
            assert!(err.to_string().contains("fps-arena-no-such-tuning.json"));
        }

        #[test]
        fn test_invalid_file_is_tuning_error() {
            let path = std::env::temp_dir().join("fps-arena-bad-tuning.json");
            std::fs::write(&path, r#"{ "shot_damage": -1.0 }"#).expect("write temp file");
            let err = load_tuning(path.to_str()).expect_err("negative damage");
            let _ = std::fs::remove_file(&path);
            assert!(matches!(
                err,
                HeadlessError::Tuning {
                    source: TuningError::Invalid { field: "shot_damage", .. },
                    ..
                }
            ));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("FPS Arena (native) starting headless session...");
    log::info!("Run with `trunk serve` for the web version");

    let path = std::env::args().nth(1);
    let tuning = match headless::load_tuning(path.as_deref()) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let seed = std::env::var("FPS_ARENA_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5eed);
    headless::run(tuning, seed);
}
