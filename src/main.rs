//! Math Ninja Blitz entry point
//!
//! Native builds run a short headless demo: a scripted player slices fruit,
//! answers questions (fumbling one on purpose) and prints the progress record
//! it ends up with. The real host is a browser; see `platform`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use math_ninja_blitz::engine::{Command, Engine, EngineEvent, FruitKind, Phase};
    use math_ninja_blitz::progress::NinjaProgress;

    env_logger::init();
    log::info!("Math Ninja Blitz (headless) starting...");

    let mut engine = Engine::new(NinjaProgress::new(), 0xB117);
    let dt = 1.0_f32 / 60.0;
    let mut clock_ms = 0.0_f64;
    let mut tick_accum = 0.0_f32;
    let mut rounds = 0u32;
    let mut fumble_next = true; // drop one answer to show the life path

    for _ in 0..60_000 {
        if rounds >= 5 || engine.has_exited() {
            break;
        }

        clock_ms += f64::from(dt) * 1000.0;
        engine.frame(dt, clock_ms);

        tick_accum += dt;
        if tick_accum >= 1.0 {
            tick_accum -= 1.0;
            engine.countdown_tick();
        }

        match engine.session.phase {
            Phase::Slicing => {
                let targets: Vec<u32> = engine
                    .session
                    .fruits
                    .in_flight
                    .iter()
                    .filter(|f| f.kind == FruitKind::Fruit && !f.sliced)
                    .map(|f| f.id)
                    .collect();
                for id in targets {
                    engine.handle(Command::Slice(id));
                }
            }
            Phase::Quiz => {
                if let Some(question) = engine.session.question.clone() {
                    let pick = if fumble_next {
                        (question.correct_index + 1) % question.options.len()
                    } else {
                        question.correct_index
                    };
                    fumble_next = false;
                    log::info!("Q: {} -> option {}", question.text, pick);
                    engine.handle(Command::Answer(pick));
                    rounds += 1;
                }
            }
            Phase::Feedback => {}
            Phase::GameOver | Phase::Completed => break,
        }

        for event in engine.drain_events() {
            match event {
                EngineEvent::Progress(delta) => log::debug!("progress delta: {delta:?}"),
                EngineEvent::LevelUpAvailable => log::info!("level-up available"),
                EngineEvent::Exited => {}
            }
        }
    }

    println!("\nsession score: {}", engine.session.score);
    println!("lives left:    {}", engine.progress.lives);
    match serde_json::to_string_pretty(&engine.progress) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("progress snapshot failed: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::wasm_main, this is just to satisfy the compiler
}
