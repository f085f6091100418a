//! Deposit Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element};

    use deposit_run::audio::{AudioManager, SoundEffect};
    use deposit_run::consts::*;
    use deposit_run::sim::{Facing, RenderSnapshot, ValueTier};
    use deposit_run::{AudioError, Outcome, Presenter, Session, SessionSummary, Settings, autopilot};

    /// How long a collected deposit stays on screen before removal (ms)
    const PICKUP_FADE_MS: i32 = 300;

    /// DOM-backed presenter: absolutely positioned divs inside `#world`
    struct DomPresenter {
        document: Document,
        world: Element,
        actor: Option<Element>,
        /// Deposit element and its top-left corner, taken on pickup
        deposits: Vec<Option<(Element, f32, f32)>>,
        audio: AudioManager,
        reduced_motion: bool,
        last_seconds: Option<u32>,
    }

    impl DomPresenter {
        fn new(document: Document, world: Element, settings: &Settings) -> Self {
            Self {
                document,
                world,
                actor: None,
                deposits: Vec::new(),
                audio: AudioManager::new(settings),
                reduced_motion: settings.reduced_motion,
                last_seconds: None,
            }
        }

        fn create_div(&self, class: &str, style: &str) -> Option<Element> {
            let el = self.document.create_element("div").ok()?;
            let _ = el.set_attribute("class", class);
            let _ = el.set_attribute("style", style);
            self.world.append_child(&el).ok()?;
            Some(el)
        }

        /// Tear down and rebuild the level markup for a fresh session
        fn build_level(&mut self, session: &Session) {
            self.world.set_inner_html("");
            self.last_seconds = None;

            for p in &session.state().platforms {
                self.create_div(
                    "platform",
                    &format!(
                        "left:{}px;top:{}px;width:{}px;height:{}px",
                        p.x, p.y, p.width, p.height
                    ),
                );
            }

            self.deposits = session
                .state()
                .deposits
                .iter()
                .map(|d| {
                    let left = d.pos.x - DEPOSIT_SIZE / 2.0;
                    let top = d.pos.y - DEPOSIT_SIZE / 2.0;
                    self.create_div(
                        &format!("deposit tier-{}", d.tier.as_str()),
                        &format!(
                            "left:{}px;top:{}px;width:{}px;height:{}px",
                            left, top, DEPOSIT_SIZE, DEPOSIT_SIZE
                        ),
                    )
                    .map(|el| (el, left, top))
                })
                .collect();

            self.actor = self.create_div(
                "actor",
                &format!("width:{}px;height:{}px", ACTOR_WIDTH, ACTOR_HEIGHT),
            );

            set_class(&self.document, "result", "hidden");
            self.render(&session.snapshot());
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        /// Floating "+xN" label above a pickup
        fn float_label(&self, x: f32, y: f32, tier: ValueTier) {
            if self.reduced_motion {
                return;
            }
            if let Some(label) = self.create_div(
                &format!("float-label tier-{}", tier.as_str()),
                &format!("left:{}px;top:{}px", x, y - DEPOSIT_SIZE),
            ) {
                label.set_text_content(Some(&format!("+x{}", tier.multiplier())));
                remove_later(label, 800);
            }
        }
    }

    impl Presenter for DomPresenter {
        fn render(&mut self, snapshot: &RenderSnapshot) {
            if let Some(actor) = &self.actor {
                let flip = if snapshot.facing == Facing::Left { -1 } else { 1 };
                let _ = actor.set_attribute(
                    "style",
                    &format!(
                        "width:{}px;height:{}px;transform:translate({}px,{}px) scaleX({})",
                        ACTOR_WIDTH, ACTOR_HEIGHT, snapshot.actor_pos.x, snapshot.actor_pos.y, flip
                    ),
                );
                let class = if snapshot.grounded { "actor" } else { "actor airborne" };
                let _ = actor.set_attribute("class", class);
            }

            self.set_text(
                "hud-count",
                &format!("{}/{}", snapshot.collected_count, DEPOSIT_QUOTA),
            );
            self.set_text("hud-value", &format!("x{}", snapshot.multiplier_sum));

            let seconds = snapshot.seconds_left();
            if self.last_seconds != Some(seconds) {
                self.set_text("hud-time", &seconds.to_string());
                self.last_seconds = Some(seconds);
            }
        }

        fn play_jump_cue(&mut self) -> Result<(), AudioError> {
            self.audio.play(SoundEffect::Jump)
        }

        fn on_deposit_collected(&mut self, deposit_id: u32, tier: ValueTier) {
            if let Err(e) = self.audio.play(SoundEffect::Collect(tier)) {
                log::debug!("Collect cue dropped: {e}");
            }
            let Some((el, left, top)) = self
                .deposits
                .get_mut(deposit_id as usize)
                .and_then(Option::take)
            else {
                return;
            };
            let _ = el.set_attribute("class", &format!("deposit tier-{} collected", tier.as_str()));
            self.float_label(left, top, tier);
            remove_later(el, PICKUP_FADE_MS);
        }

        fn on_quota_reached(&mut self) {
            if let Err(e) = self.audio.play(SoundEffect::Success) {
                log::debug!("Success cue dropped: {e}");
            }
        }

        fn end_session(&mut self, summary: &SessionSummary) {
            let title = match summary.outcome {
                Outcome::Success => "All deposits secured!",
                Outcome::Timeout => {
                    if let Err(e) = self.audio.play(SoundEffect::Timeout) {
                        log::debug!("Timeout cue dropped: {e}");
                    }
                    "Time's up!"
                }
            };
            self.set_text("result-title", title);
            self.set_text(
                "result-detail",
                &format!(
                    "{} of {} collected, value x{}",
                    summary.collected, DEPOSIT_QUOTA, summary.multiplier_sum
                ),
            );
            set_class(&self.document, "result", "");
        }
    }

    fn set_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    fn remove_later(el: Element, delay_ms: i32) {
        let Some(window) = web_sys::window() else {
            el.remove();
            return;
        };
        let closure = Closure::once(move || el.remove());
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms,
        );
        closure.forget();
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        presenter: DomPresenter,
        accumulator: f32,
        last_time: f64,
        settings: Settings,
        idle_mode: bool,
        paused: bool,
    }

    impl Game {
        /// Run simulation frames for `dt` seconds of wall time
        fn update(&mut self, dt: f32) {
            if self.paused {
                return;
            }
            let dt = dt.min(0.1);
            self.session.update(&mut self.presenter, dt);

            self.accumulator += dt;
            let mut substeps = 0;
            while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
                if self.idle_mode {
                    let intent = autopilot::steer(self.session.state());
                    *self.session.input_mut() = intent;
                }
                self.session.frame(&mut self.presenter);
                self.accumulator -= FRAME_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }
        }

        fn restart(&mut self, seed: u64) {
            self.session.restart(seed);
            self.accumulator = 0.0;
            self.presenter.build_level(&self.session);
            log::info!("Game restarted with seed: {}", seed);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Deposit Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let world = document.get_element_by_id("world").expect("no #world element");
        let settings = Settings::load();

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(settings.clone(), seed);
        let mut presenter = DomPresenter::new(document.clone(), world, &settings);
        presenter.build_level(&session);

        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            presenter,
            accumulator: 0.0,
            last_time: 0.0,
            settings,
            idle_mode: false,
            paused: false,
        }));

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Deposit Run running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if pressed {
                    g.presenter.audio.resume();
                    match event.code().as_str() {
                        "KeyI" if !event.repeat() => {
                            g.idle_mode = !g.idle_mode;
                            g.session.input_mut().clear();
                            log::info!("Idle mode: {}", g.idle_mode);
                            return;
                        }
                        "KeyM" if !event.repeat() => {
                            let muted = !g.presenter.audio.is_muted();
                            g.presenter.audio.set_muted(muted);
                            g.settings.muted = muted;
                            g.settings.save();
                            return;
                        }
                        _ => {}
                    }
                }
                if g.session.key_event(&event.code(), pressed, event.repeat()) {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;

            g.update(dt);
        }

        // Keep the chain alive across sessions so restart needs no re-arm
        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let mut g = game.borrow_mut();
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                g.paused = hidden;
                // Keys released while hidden never deliver keyup
                g.session.input_mut().clear();
                g.last_time = 0.0;
                if hidden {
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().session.input_mut().clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless run: the demo bot plays one session against a logging presenter
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use deposit_run::consts::*;
    use deposit_run::sim::{RenderSnapshot, ValueTier};
    use deposit_run::{AudioError, Presenter, Session, SessionSummary, Settings, autopilot};

    #[derive(Default)]
    struct LogPresenter {
        frames: u64,
        summary: Option<SessionSummary>,
    }

    impl Presenter for LogPresenter {
        fn render(&mut self, snapshot: &RenderSnapshot) {
            self.frames += 1;
            if self.frames % FRAME_RATE as u64 == 0 {
                log::debug!(
                    "t-{}s actor ({:.0}, {:.0}) {}/{}",
                    snapshot.seconds_left(),
                    snapshot.actor_pos.x,
                    snapshot.actor_pos.y,
                    snapshot.collected_count,
                    DEPOSIT_QUOTA
                );
            }
        }

        fn play_jump_cue(&mut self) -> Result<(), AudioError> {
            Err(AudioError::Unavailable)
        }

        fn on_deposit_collected(&mut self, deposit_id: u32, tier: ValueTier) {
            log::info!("Collected deposit {} (x{})", deposit_id, tier.multiplier());
        }

        fn on_quota_reached(&mut self) {
            log::info!("Quota reached");
        }

        fn end_session(&mut self, summary: &SessionSummary) {
            self.summary = Some(summary.clone());
        }
    }

    pub fn run(seed: u64) -> Option<SessionSummary> {
        let settings = Settings::load();
        let mut session = Session::new(settings, seed);
        let mut presenter = LogPresenter::default();

        while !session.is_finished() {
            *session.input_mut() = autopilot::steer(session.state());
            session.update(&mut presenter, FRAME_DT);
            session.frame(&mut presenter);
        }

        presenter.summary
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    log::info!("Deposit Run (native) starting headless demo, seed {}", seed);
    log::info!("Run with `trunk serve` for the playable web version");

    match headless::run(seed) {
        Some(summary) => match serde_json::to_string(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not encode summary: {e}"),
        },
        None => log::error!("Session ended without a summary"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is wasm_main via wasm_bindgen(start)
}
