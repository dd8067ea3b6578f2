//! Browser host bridge
//!
//! The engine is headless; this is where it meets a real browser. A
//! `#[wasm_bindgen]` handle owns the engine, forwards frame/countdown ticks
//! and commands, hands JSON snapshots to the presentation layer, and persists
//! progress to LocalStorage whenever a scoring event touched it. Native
//! builds get none of this; the demo binary drives the engine directly.

#[cfg(target_arch = "wasm32")]
mod web {
    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    use crate::engine::{Command, Engine, EngineEvent, SessionState};
    use crate::progress::NinjaProgress;

    #[wasm_bindgen(start)]
    pub fn wasm_main() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Math Ninja Blitz engine loaded");
    }

    /// Session + progress in one snapshot for the presentation layer
    #[derive(Serialize)]
    struct Snapshot<'a> {
        session: &'a SessionState,
        progress: &'a NinjaProgress,
    }

    /// Engine handle exposed to the JS host
    #[wasm_bindgen]
    pub struct BlitzEngine {
        engine: Engine,
    }

    #[wasm_bindgen]
    impl BlitzEngine {
        /// Start a session over the stored progress record
        #[wasm_bindgen(constructor)]
        pub fn new() -> BlitzEngine {
            let progress = NinjaProgress::load();
            let seed = js_sys::Date::now() as u64;
            BlitzEngine {
                engine: Engine::new(progress, seed),
            }
        }

        /// Per-animation-frame tick; `dt` in seconds
        pub fn frame(&mut self, dt: f32) {
            self.engine.frame(dt, js_sys::Date::now());
            self.flush();
        }

        /// 1 Hz countdown tick
        pub fn countdown_tick(&mut self) {
            self.engine.countdown_tick();
            self.flush();
        }

        pub fn slice(&mut self, id: u32) {
            self.engine.handle(Command::Slice(id));
            self.flush();
        }

        pub fn answer(&mut self, option_index: usize) {
            self.engine.handle(Command::Answer(option_index));
            self.flush();
        }

        pub fn level_up(&mut self) {
            self.engine.handle(Command::LevelUp);
            self.flush();
        }

        pub fn exit_game(&mut self) {
            self.engine.handle(Command::Exit);
            self.flush();
        }

        pub fn exited(&self) -> bool {
            self.engine.has_exited()
        }

        /// Current session + progress as JSON
        pub fn snapshot(&self) -> String {
            serde_json::to_string(&Snapshot {
                session: &self.engine.session,
                progress: &self.engine.progress,
            })
            .unwrap_or_else(|_| "{}".to_string())
        }
    }

    impl Default for BlitzEngine {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BlitzEngine {
        /// Persist progress once per batch of durable changes
        fn flush(&mut self) {
            let mut dirty = false;
            for event in self.engine.drain_events() {
                match event {
                    EngineEvent::Progress(_) => dirty = true,
                    EngineEvent::LevelUpAvailable => {
                        log::info!("level-up threshold reached")
                    }
                    EngineEvent::Exited => log::info!("session exited"),
                }
            }
            if dirty {
                self.engine.progress.save();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::BlitzEngine;
