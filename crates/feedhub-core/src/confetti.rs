//! Confetti burst: colored rectangles that fall under gravity, spin, and fade.
//!
//! The animator owns its drawing surface and advances every particle once per
//! display refresh. Per-frame constants are calibrated against a nominal frame
//! unit so the motion is independent of the actual refresh rate; only the
//! horizontal friction is applied once per frame regardless of `dt`.

use std::time::{Duration, Instant};

use feedhub_platform::{Rgba, Surface, Viewport};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::config::ConfettiConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub color: Rgba,
    /// Degrees.
    pub rotation: f32,
    pub angular_velocity: f32,
    pub opacity: f32,
}

impl Particle {
    fn spawn<R: Rng>(rng: &mut R, width: f32, palette: &[Rgba]) -> Self {
        let mut unit = || rng.random::<f32>();
        let pos = Vec2::new(unit() * width, -20.0 - unit() * 200.0);
        let size = Vec2::new(6.0 + unit() * 10.0, 8.0 + unit() * 12.0);
        let vel = Vec2::new((unit() - 0.5) * 7.0, unit() * 4.0 + 2.0);
        let rotation = unit() * 360.0;
        let angular_velocity = (unit() - 0.5) * 6.0;
        let color = palette[rng.random_range(0..palette.len())];
        Self {
            pos,
            vel,
            size,
            color,
            rotation,
            angular_velocity,
            opacity: 1.0,
        }
    }

    /// Advances one frame; `k` is elapsed time in frame units.
    fn step(&mut self, k: f32, physics: &Physics) {
        self.vel.y += physics.gravity * k;
        self.vel.x *= physics.friction;
        self.pos += self.vel * k;
        self.rotation += self.angular_velocity * k;
        self.opacity -= physics.decay * k;
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Physics {
    gravity: f32,
    friction: f32,
    decay: f32,
    frame_unit: Duration,
    cutoff: Duration,
}

impl From<&ConfettiConfig> for Physics {
    fn from(config: &ConfettiConfig) -> Self {
        Self {
            gravity: config.gravity,
            friction: config.friction,
            decay: config.decay,
            frame_unit: config.frame_unit(),
            cutoff: config.cutoff(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FireOptions {
    pub count: Option<usize>,
    /// An empty list is treated like `None`.
    pub colors: Option<Vec<Rgba>>,
}

impl FireOptions {
    pub fn count(count: usize) -> Self {
        Self {
            count: Some(count),
            colors: None,
        }
    }

    pub fn with_colors(mut self, colors: Vec<Rgba>) -> Self {
        self.colors = Some(colors);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Animating { fired_at: Instant, last_frame: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Particles remain; schedule another frame.
    Continue,
    /// Every particle faded out.
    Finished,
    /// The wall-clock ceiling since the last `fire` was reached.
    CutOff,
    /// Nothing was animating.
    Idle,
}

pub struct Confetti<S: Surface> {
    surface: Option<S>,
    physics: Physics,
    palette: Vec<Rgba>,
    default_count: usize,
    particles: Vec<Particle>,
    state: AnimatorState,
    rng: StdRng,
}

impl<S: Surface> Confetti<S> {
    pub fn new(surface: S, config: &ConfettiConfig) -> Self {
        let mut confetti = Self::detached(config);
        confetti.surface = Some(surface);
        confetti
    }

    /// An animator without a drawing surface; `fire` is a no-op.
    pub fn detached(config: &ConfettiConfig) -> Self {
        Self {
            surface: None,
            physics: Physics::from(config),
            palette: config.palette(),
            default_count: config.default_count,
            particles: Vec::new(),
            state: AnimatorState::Idle,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn fire(&mut self, options: FireOptions, now: Instant) {
        let Some(surface) = self.surface.as_ref() else {
            trace!("confetti: no surface, ignoring fire");
            return;
        };
        let width = surface.viewport().width.max(0.0);
        let count = options.count.unwrap_or(self.default_count);
        let palette = match options.colors {
            Some(colors) if !colors.is_empty() => colors,
            _ => self.palette.clone(),
        };

        if matches!(self.state, AnimatorState::Animating { .. }) {
            debug!("confetti: restarting, discarding {} particles", self.particles.len());
        }
        self.particles.clear();
        self.particles
            .extend((0..count).map(|_| Particle::spawn(&mut self.rng, width, &palette)));
        self.state = AnimatorState::Animating {
            fired_at: now,
            last_frame: now,
        };
        info!("confetti: fired {count} particles");
    }

    /// One update-and-draw pass. Call once per display refresh while
    /// [`Confetti::is_animating`] holds.
    pub fn frame(&mut self, now: Instant) -> FrameOutcome {
        let AnimatorState::Animating { fired_at, last_frame } = self.state else {
            return FrameOutcome::Idle;
        };

        if now.saturating_duration_since(fired_at) >= self.physics.cutoff {
            debug!("confetti: cutoff reached with {} particles left", self.particles.len());
            self.stop();
            return FrameOutcome::CutOff;
        }

        let dt = now.saturating_duration_since(last_frame);
        let k = dt.as_secs_f32() / self.physics.frame_unit.as_secs_f32();
        for particle in &mut self.particles {
            particle.step(k, &self.physics);
        }

        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
            for particle in self.particles.iter().filter(|p| p.is_visible()) {
                surface.fill_rotated_rect(
                    particle.pos.to_array(),
                    particle.size.to_array(),
                    particle.rotation,
                    particle.color.faded(particle.opacity),
                );
            }
        }

        self.particles.retain(Particle::is_visible);
        if self.particles.is_empty() {
            trace!("confetti: all particles faded");
            self.stop();
            return FrameOutcome::Finished;
        }

        self.state = AnimatorState::Animating {
            fired_at,
            last_frame: now,
        };
        FrameOutcome::Continue
    }

    /// Drives frames with a plain sleep loop until the burst ends.
    pub fn run_to_end(&mut self, frame_interval: Duration) -> FrameOutcome {
        loop {
            std::thread::sleep(frame_interval);
            match self.frame(Instant::now()) {
                FrameOutcome::Continue => continue,
                outcome => return outcome,
            }
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(surface) = self.surface.as_mut() {
            if surface.viewport() != viewport {
                trace!("confetti: resize to {}x{}", viewport.width, viewport.height);
                surface.resize(viewport);
            }
        }
    }

    /// Cancels any running burst and releases the surface.
    pub fn teardown(&mut self) -> Option<S> {
        self.stop();
        self.surface.take()
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimatorState::Animating { .. })
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Instant at which the running burst is force-stopped.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            AnimatorState::Animating { fired_at, .. } => Some(fired_at + self.physics.cutoff),
            AnimatorState::Idle => None,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    fn stop(&mut self) {
        self.particles.clear();
        self.state = AnimatorState::Idle;
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
    }
}

impl<S: Surface> Drop for Confetti<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
