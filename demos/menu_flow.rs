//=========================================================================
// Menu Flow Demo
//
// Three screens wired through the state host:
//
//   MainMenu ──"2"/click──▶ Settings ──Esc──▶ MainMenu
//   MainMenu ──"3"/click──▶ Authors  ──Esc──▶ MainMenu
//   MainMenu ──Esc/"4"────▶ quit
//
// Visuals are modelled as retained layers whose properties are updated
// in `render`; the demo logs them instead of drawing.
//
// Run with: cargo run --example menu_flow
//
//=========================================================================

use std::time::Duration;

use log::{debug, info};
use yaspeg::prelude::*;

//=== Screens =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Screen {
    MainMenu,
    Settings,
    Authors,
}

impl StateKey for Screen {}

/// A retained visual whose properties `render` keeps in sync.
#[derive(Debug, Default)]
struct Layer {
    name: &'static str,
    opacity: f32,
}

impl Layer {
    fn new(name: &'static str) -> Self {
        Self { name, opacity: 0.0 }
    }

    fn set_opacity(&mut self, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        if (self.opacity - opacity).abs() > f32::EPSILON {
            self.opacity = opacity;
            debug!(target: "layers", "{} opacity {:.2}", self.name, opacity);
        }
    }
}

/// Fades in over `fade` after init and out over the outro.
fn fade_opacity(ctx: &StateContext<Screen>, fade: Duration, exit_started: Option<Duration>) -> f32 {
    let elapsed = ctx.elapsed_in_state().as_secs_f32();
    let fade = fade.as_secs_f32().max(f32::EPSILON);
    match exit_started {
        Some(start) => 1.0 - (elapsed - start.as_secs_f32()) / fade,
        None => elapsed / fade,
    }
}

//--- Main Menu -----------------------------------------------------------

const MENU_ITEMS: [(&str, Rect); 4] = [
    ("Play", Rect::new(300.0, 200.0, 200.0, 40.0)),
    ("Settings", Rect::new(300.0, 250.0, 200.0, 40.0)),
    ("Authors", Rect::new(300.0, 300.0, 200.0, 40.0)),
    ("Quit", Rect::new(300.0, 350.0, 200.0, 40.0)),
];

struct MainMenu {
    background: Layer,
    exit_started: Option<Duration>,
}

impl MainMenu {
    const FADE: Duration = Duration::from_millis(300);

    fn new() -> Self {
        Self {
            background: Layer::default(),
            exit_started: None,
        }
    }

    fn activate(item: usize, ctx: &mut StateContext<Screen>) {
        // A key and a click in the same frame pick the first one.
        if ctx.pending_transitions() > 0 {
            return;
        }

        match item {
            1 => ctx.switch_to(Screen::Settings),
            2 => ctx.switch_to(Screen::Authors),
            3 => ctx.quit(),
            _ => info!("{} is not part of this demo", MENU_ITEMS[item].0),
        }
    }
}

impl GameState<Screen> for MainMenu {
    fn state_init(&mut self, _ctx: &mut StateContext<Screen>) {
        self.background = Layer::new("menu background");
    }

    fn events(&mut self, event: &StateEvent, ctx: &mut StateContext<Screen>) {
        if event.is_escape() {
            ctx.quit();
            return;
        }

        if event.kind == EventType::KeyDown && !event.is_repeat {
            if let Some(digit) = event.characters.chars().next().and_then(|c| c.to_digit(10)) {
                if (1..=4).contains(&digit) {
                    Self::activate(digit as usize - 1, ctx);
                }
            }
        }

        if let Some(item) = MENU_ITEMS.iter().position(|(_, rect)| event.is_click_in(rect)) {
            Self::activate(item, ctx);
        }
    }

    fn logic(&mut self, ctx: &mut StateContext<Screen>) {
        if ctx.is_exiting() && self.exit_started.is_none() {
            self.exit_started = Some(ctx.elapsed_in_state());
        }
    }

    fn render(&mut self, ctx: &mut StateContext<Screen>) {
        let opacity = fade_opacity(ctx, Self::FADE, self.exit_started);
        self.background.set_opacity(opacity);
    }

    fn outro(&self) -> Duration {
        Self::FADE
    }

    fn clean_up(&mut self, _ctx: &mut StateContext<Screen>) {
        self.background.set_opacity(0.0);
    }

    fn name(&self) -> &str {
        "MainMenu"
    }
}

//--- Settings ------------------------------------------------------------

struct Settings {
    fullscreen: bool,
    fullscreen_box: Rect,
    difficulty: usize,
    difficulty_buttons: [Rect; 3],
    flash: Layer,
    flash_left: Duration,
    leaving: bool,
}

impl Settings {
    const FLASH: Duration = Duration::from_millis(500);

    fn new() -> Self {
        Self {
            fullscreen: false,
            fullscreen_box: Rect::new(200.0, 200.0, 24.0, 24.0),
            difficulty: 1,
            difficulty_buttons: [
                Rect::new(200.0, 260.0, 24.0, 24.0),
                Rect::new(200.0, 290.0, 24.0, 24.0),
                Rect::new(200.0, 320.0, 24.0, 24.0),
            ],
            flash: Layer::default(),
            flash_left: Duration::ZERO,
            leaving: false,
        }
    }
}

impl GameState<Screen> for Settings {
    fn state_init(&mut self, _ctx: &mut StateContext<Screen>) {
        self.flash = Layer::new("settings flash");
    }

    fn events(&mut self, event: &StateEvent, ctx: &mut StateContext<Screen>) {
        if event.is_escape() {
            ctx.switch_to(Screen::MainMenu);
            return;
        }

        if event.is_click_in(&self.fullscreen_box) {
            self.fullscreen = !self.fullscreen;
            self.flash_left = Self::FLASH;
            info!("Fullscreen: {}", self.fullscreen);
        }

        if let Some(choice) = self.difficulty_buttons.iter().position(|r| event.is_click_in(r)) {
            if choice != self.difficulty {
                self.difficulty = choice;
                self.flash_left = Self::FLASH;
                info!("Difficulty: {}", choice);
            }
        }
    }

    fn logic(&mut self, ctx: &mut StateContext<Screen>) {
        self.flash_left = self.flash_left.saturating_sub(ctx.delta());

        // The outro replays the flash once.
        if ctx.is_exiting() && !self.leaving {
            self.leaving = true;
            self.flash_left = Self::FLASH;
        }
    }

    fn render(&mut self, _ctx: &mut StateContext<Screen>) {
        let opacity = self.flash_left.as_secs_f32() / Self::FLASH.as_secs_f32();
        self.flash.set_opacity(opacity);
    }

    fn outro(&self) -> Duration {
        Self::FLASH
    }

    fn name(&self) -> &str {
        "Settings"
    }
}

//--- Authors -------------------------------------------------------------

#[derive(Default)]
struct Authors {
    credits: Layer,
}

impl GameState<Screen> for Authors {
    fn state_init(&mut self, _ctx: &mut StateContext<Screen>) {
        self.credits = Layer::new("credits");
        self.credits.set_opacity(1.0);
    }

    fn events(&mut self, event: &StateEvent, ctx: &mut StateContext<Screen>) {
        if event.is_escape() || event.is_confirm() {
            ctx.switch_to(Screen::MainMenu);
        }
    }

    fn clean_up(&mut self, _ctx: &mut StateContext<Screen>) {
        self.credits.set_opacity(0.0);
    }

    fn name(&self) -> &str {
        "Authors"
    }
}

//=== Entry Point =========================================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    EngineBuilder::<Screen>::new()
        .with_title("Yaspeg")
        .build()
        .init(|host| {
            host.register_initial(Screen::MainMenu, MainMenu::new);
            host.register(Screen::Settings, Settings::new);
            host.register(Screen::Authors, Authors::default);
        })
        .run();
}
