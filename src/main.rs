//! Spell Duel entry point
//!
//! In the browser this wires the canvas, pointer and controls to the frame
//! loop. Natively it runs a headless duel and prints the final score.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement, MouseEvent,
    };

    use spell_duel::Settings;
    use spell_duel::input::{PointerTracker, SurfaceRect};
    use spell_duel::platform::{Canvas2dPainter, PerformanceClock};
    use spell_duel::render::{paint, scoreboard};
    use spell_duel::sim::{CombatantId, DuelState, Event, FrameLoop};

    /// Game instance holding all state
    struct Game {
        frame_loop: FrameLoop<PerformanceClock>,
        painter: Canvas2dPainter,
        pointer: PointerTracker,
        settings: Settings,
        /// Pending animation frame, cancelled on teardown
        raf_id: Option<i32>,
    }

    impl Game {
        /// Run one tick and paint it
        fn frame(&mut self) {
            self.frame_loop.set_pointer(self.pointer.position());
            match self.frame_loop.tick() {
                Ok(true) => {}
                Ok(false) => return,
                Err(e) => log::error!("Frame failed: {}", e),
            }
            paint(self.frame_loop.state(), &mut self.painter);
            self.update_hud();
        }

        /// Update the scoreboard in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("scoreboard") {
                el.set_text_content(Some(&scoreboard(self.frame_loop.state())));
            }
        }

        fn restart(&mut self) {
            self.frame_loop.submit(Event::Restart {
                canvas_width: self.settings.canvas_width,
                canvas_height: self.settings.canvas_height,
            });
            log::info!("Duel restarted");
        }

        /// Tear down: no further frames run
        fn shutdown(&mut self) {
            self.frame_loop.stop();
            if let (Some(id), Some(window)) = (self.raf_id.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }

    /// Settings from `<script id="duel-config" type="application/json">`, if any
    fn read_settings(document: &Document) -> Settings {
        let Some(json) = document
            .get_element_by_id("duel-config")
            .and_then(|el| el.text_content())
        else {
            return Settings::default();
        };
        match Settings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from #duel-config");
                settings
            }
            Err(e) => {
                log::error!("Ignoring #duel-config: {}", e);
                Settings::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Spell Duel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let settings = read_settings(&document);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(settings.canvas_width as u32);
        canvas.set_height(settings.canvas_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let state = DuelState::with_tuning(
            settings.canvas_width,
            settings.canvas_height,
            settings.tuning.clone(),
        );
        let clock = PerformanceClock::new().expect("no performance timer");

        let game = Rc::new(RefCell::new(Game {
            frame_loop: FrameLoop::new(state, clock),
            painter: Canvas2dPainter::new(ctx),
            pointer: PointerTracker::new(),
            settings,
            raf_id: None,
        }));

        setup_pointer(&canvas, game.clone());
        setup_restart_button(&document, game.clone());
        setup_controls(&document, game.clone());
        setup_teardown(game.clone());

        request_animation_frame(game);

        log::info!("Spell Duel running!");
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let leave = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            game.borrow_mut().pointer.observe(
                event.client_x() as f32,
                event.client_y() as f32,
                SurfaceRect {
                    left: rect.left() as f32,
                    top: rect.top() as f32,
                },
            );
        });
        let _ = window
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();

        // Pointer left the page or the tab lost focus: no sample until it moves again
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            leave.borrow_mut().pointer.clear();
        });
        let _ = window
            .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        if let Some(root) = window.document().and_then(|d| d.document_element()) {
            let _ = root
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Per-combatant inputs: `spell-color-N`, `speed-N`, `cast-rate-N`
    fn setup_controls(document: &Document, game: Rc<RefCell<Game>>) {
        for combatant in CombatantId::ALL {
            let (spell_color, speed, cast_rate) = {
                let g = game.borrow();
                match g.frame_loop.state().combatant(combatant) {
                    Ok(c) => (c.spell_color.clone(), c.speed, c.cast_rate),
                    Err(e) => {
                        log::error!("Cannot bind controls: {}", e);
                        continue;
                    }
                }
            };

            bind_input(
                document,
                &format!("spell-color-{}", combatant),
                &spell_color,
                game.clone(),
                move |_, value| {
                    Some(Event::ChangeSpellColor {
                        combatant,
                        color: value,
                    })
                },
            );
            bind_input(
                document,
                &format!("speed-{}", combatant),
                &speed.to_string(),
                game.clone(),
                move |settings, value| {
                    let speed = settings.clamp_control(parse_slider(&value)?);
                    Some(Event::ChangeSpeed { combatant, speed })
                },
            );
            bind_input(
                document,
                &format!("cast-rate-{}", combatant),
                &cast_rate.to_string(),
                game.clone(),
                move |settings, value| {
                    let rate = settings.clamp_control(parse_slider(&value)?);
                    Some(Event::ChangeCastRate { combatant, rate })
                },
            );
        }
    }

    fn parse_slider(value: &str) -> Option<f32> {
        match value.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                log::warn!("Ignoring non-numeric control value {:?}", value);
                None
            }
        }
    }

    /// Set an input's initial value and queue an event on every change
    fn bind_input<F>(
        document: &Document,
        id: &str,
        initial: &str,
        game: Rc<RefCell<Game>>,
        to_event: F,
    ) where
        F: Fn(&Settings, String) -> Option<Event> + 'static,
    {
        let Some(input) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            log::warn!("Control #{} not found", id);
            return;
        };
        input.set_value(initial);

        let target = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            if let Some(event) = to_event(&g.settings, target.value()) {
                g.frame_loop.submit(event);
            }
        });
        let _ = input
            .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().shutdown();
        });
        let _ = window
            .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let next = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(next);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().raf_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.raf_id = None;
            if !g.frame_loop.is_running() {
                return;
            }
            g.frame();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Spell Duel (native) starting...");

    if let Err(e) = run_headless() {
        log::error!("Headless duel failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate `headless_frames` frames on a stepping clock
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> spell_duel::Result<()> {
    use spell_duel::Settings;
    use spell_duel::render::scoreboard;
    use spell_duel::sim::{DuelState, FrameLoop, StepClock};

    let settings = Settings::load()?;
    let state = DuelState::with_tuning(
        settings.canvas_width,
        settings.canvas_height,
        settings.tuning.clone(),
    );
    let mut frame_loop = FrameLoop::new(state, StepClock::new(settings.frame_ms));

    log::info!(
        "Running {} frames on a {}x{} canvas",
        settings.headless_frames,
        settings.canvas_width,
        settings.canvas_height
    );
    for _ in 0..settings.headless_frames {
        frame_loop.tick()?;
    }
    frame_loop.stop();

    let score = scoreboard(frame_loop.state());
    log::info!(
        "Final score {} ({} spells in flight)",
        score,
        frame_loop.state().spells.len()
    );
    println!("Player 1 vs Player 2: {}", score);
    Ok(())
}
