//! Gesture controller: owns the simulation and routes pointer input, screen
//! changes, sound cues and the background cycle.

use std::time::Instant;

use glam::Vec2;
use swipe_platform::{Cue, CuePlayer, MutedCues, PointerEvent};
use tracing::{debug, info, warn};

use crate::canvas::Canvas;
use crate::config::SwipeConfig;
use crate::emitter::Emitter;
use crate::palette::{BackgroundCycle, BackgroundGradient, Palette};
use crate::particle::{Particle, ParticleStyle};
use crate::render::Renderer;
use crate::rng::RandomSource;
use crate::simulation::Simulation;
use crate::trail::Trail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Home,
    Playing,
}

pub struct SwipeGame<R: RandomSource> {
    state: GameState,
    simulation: Simulation,
    emitter: Emitter,
    renderer: Renderer,
    palette: Palette,
    background: BackgroundCycle,
    rng: R,
    cues: Box<dyn CuePlayer>,
    drawing: bool,
    current: Option<Trail>,
    last_point: Option<Vec2>,
}

impl<R: RandomSource> SwipeGame<R> {
    /// `config` is expected to have passed [`SwipeConfig::validate`].
    pub fn new(config: &SwipeConfig, rng: R, cues: Box<dyn CuePlayer>) -> Self {
        Self {
            state: GameState::Home,
            simulation: Simulation::new(config.retention()),
            emitter: Emitter::from(&config.emitter),
            renderer: Renderer::new(config.render.fade_alpha),
            palette: config.palette.clone(),
            background: BackgroundCycle::new(config.palette.backgrounds.len()),
            rng,
            cues,
            drawing: false,
            current: None,
            last_point: None,
        }
    }

    /// Silent game with default settings.
    pub fn with_rng(rng: R) -> Self {
        Self::new(&SwipeConfig::default(), rng, Box::new(MutedCues))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn start(&mut self) {
        self.reset();
        self.state = GameState::Playing;
        info!("entering play screen");
    }

    pub fn go_home(&mut self) {
        self.reset();
        self.state = GameState::Home;
        info!("returning to home screen");
    }

    fn reset(&mut self) {
        self.simulation.clear();
        self.drawing = false;
        self.current = None;
        self.last_point = None;
    }

    pub fn handle(&mut self, event: PointerEvent, now: Instant) {
        match event {
            PointerEvent::Down { x, y } => self.pointer_down(Vec2::new(x, y), now),
            PointerEvent::Move { x, y } => self.pointer_move(Vec2::new(x, y)),
            PointerEvent::Up | PointerEvent::Leave => self.pointer_up(),
        }
    }

    pub fn pointer_down(&mut self, point: Vec2, now: Instant) {
        if self.state != GameState::Playing {
            return;
        }
        self.drawing = true;
        self.last_point = Some(point);

        let color = self.palette.random_color(&mut self.rng);
        let style = ParticleStyle::random(&mut self.rng);
        self.current = Some(Trail::begin(point, color, style, now));
        debug!("gesture start at {point} with {style:?} {color}");

        self.play_cue();
        let index = self.background.advance();
        debug!("background -> {index}");
    }

    pub fn pointer_move(&mut self, point: Vec2) {
        if !self.drawing || self.state != GameState::Playing {
            return;
        }
        if let (Some(last), Some(trail)) = (self.last_point, self.current.as_mut()) {
            let particles =
                self.emitter
                    .emit(last, point, trail.color(), trail.style(), &mut self.rng);
            self.simulation.spawn(particles);
            trail.push(point);
        }
        self.last_point = Some(point);
    }

    pub fn pointer_up(&mut self) {
        if !self.drawing {
            return;
        }
        self.drawing = false;
        if let Some(trail) = self.current.take() {
            if trail.is_committable() {
                debug!("gesture end, keeping {} points", trail.points().len());
                self.simulation.retain_trail(trail);
            }
        }
        self.last_point = None;
    }

    fn play_cue(&mut self) {
        let cue = if self.rng.coin() { Cue::Chirp } else { Cue::Chime };
        if let Err(err) = self.cues.play(cue) {
            warn!("could not play {cue:?}: {err}");
        }
    }

    /// Advance and draw one frame. Returns `false` without touching anything
    /// when not playing.
    pub fn frame<C: Canvas + ?Sized>(&mut self, now: Instant, canvas: &mut C) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        self.simulation.tick(now);
        self.renderer.render(self.simulation.particles(), canvas);
        true
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn particles(&self) -> &[Particle] {
        self.simulation.particles()
    }

    pub fn trails(&self) -> &[Trail] {
        self.simulation.trails()
    }

    pub fn current_trail(&self) -> Option<&Trail> {
        self.current.as_ref()
    }

    pub fn background_index(&self) -> usize {
        self.background.index()
    }

    pub fn background(&self) -> BackgroundGradient {
        self.palette.backgrounds[self.background.index()]
    }
}
