use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use isleworld_assets::{ModelLibrary, ModelSlot, Primitive};
use isleworld_common::{SceneRng, Tick, Transform};
use isleworld_input::{BoundingBox, Hit, HoverState, Ray};

use crate::config::CreatureConfig;

const MODEL_KEY: &str = "creature";

const IDLE_LERP: f32 = 0.1;
const IDLE_BOB_RATE: f32 = 2.0;
pub(crate) const IDLE_BOB_AMPLITUDE: f32 = 0.5;

const JUMP_RATE: f32 = 0.9;
const JUMP_HEIGHT: f32 = 20.0 * 6.0;
const JUMP_FORWARD: f32 = 25.0;
const JUMP_TILT: f32 = 0.6;
const LANDING_STEP: f32 = 50.0;
pub(crate) const TURN_MARGIN: f32 = 10.0;

const MIN_INTERVAL: f32 = 1.0;
const MAX_INTERVAL: f32 = 4.0;

/// Intent raised by the creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatureEvent {
    Clicked,
}

/// Mutable walk state. Created at mount, advanced every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreatureState {
    pub rest_position: Vec3,
    /// Landing spot of the last jump; idle floats around it.
    pub current_position: Vec3,
    pub is_jumping: bool,
    pub jump_progress: f32,
    pub next_jump_interval_seconds: f32,
    pub max_roam_distance: f32,
    pub elapsed_since_last_jump: f32,
    /// `1.0` or `-1.0` along the roam axis.
    pub direction: f32,
}

impl CreatureState {
    fn at_rest(config: &CreatureConfig, first_interval: f32) -> Self {
        Self {
            rest_position: config.rest_position,
            current_position: config.rest_position,
            is_jumping: false,
            jump_progress: 0.0,
            next_jump_interval_seconds: first_interval,
            max_roam_distance: config.max_roam_distance,
            elapsed_since_last_jump: 0.0,
            direction: 1.0,
        }
    }

    /// Lowest and highest x the creature may land on.
    pub fn roam_bounds(&self) -> (f32, f32) {
        (
            self.rest_position.x - self.max_roam_distance,
            self.rest_position.x + self.max_roam_distance,
        )
    }
}

/// Free-roaming creature with an idle float and a periodic jump.
#[derive(Debug, Clone)]
pub struct CreatureAnimator {
    config: CreatureConfig,
    state: CreatureState,
    transform: Transform,
    slot: ModelSlot,
    hover: HoverState,
    rng: SceneRng,
    jumps: u64,
}

impl CreatureAnimator {
    pub fn new(config: CreatureConfig, mut rng: SceneRng, library: &mut ModelLibrary) -> Self {
        let slot = library.resolve(
            MODEL_KEY,
            Primitive::Box {
                half_extents: config.body_half_extents.to_array(),
            },
        );
        let state = CreatureState::at_rest(&config, rng.range(MIN_INTERVAL, MAX_INTERVAL));
        tracing::debug!(
            rest = ?config.rest_position,
            first_jump_in = state.next_jump_interval_seconds,
            "creature mounted"
        );
        Self {
            transform: Transform::from_position(config.rest_position).with_scale(config.scale),
            config,
            state,
            slot,
            hover: HoverState::default(),
            rng,
            jumps: 0,
        }
    }

    pub fn config(&self) -> &CreatureConfig {
        &self.config
    }

    pub fn state(&self) -> &CreatureState {
        &self.state
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn slot(&self) -> ModelSlot {
        self.slot
    }

    /// Completed jumps since mount.
    pub fn jumps(&self) -> u64 {
        self.jumps
    }

    pub fn glow_intensity(&self, is_day: bool) -> f32 {
        if is_day {
            self.config.day_glow
        } else {
            self.config.night_glow
        }
    }

    pub fn tick(&mut self, tick: &Tick) {
        let delta = tick.delta_seconds.max(0.0);

        if !self.state.is_jumping {
            self.state.elapsed_since_last_jump += delta;
            if self.state.elapsed_since_last_jump >= self.state.next_jump_interval_seconds {
                self.state.is_jumping = true;
                self.state.jump_progress = 0.0;
                tracing::debug!(x = self.state.current_position.x, direction = self.state.direction, "creature jump start");
                self.pose_jump();
                return;
            }
            self.idle();
            return;
        }

        let progress = self.state.jump_progress + delta * JUMP_RATE;
        if progress >= 1.0 {
            // Touch down at water level before easing back into the float.
            self.state.jump_progress = 1.0;
            self.pose_jump();
            self.land();
            self.idle();
        } else {
            self.state.jump_progress = progress;
            self.pose_jump();
        }
    }

    fn idle(&mut self) {
        let bob = (self.state.elapsed_since_last_jump * IDLE_BOB_RATE).sin() * IDLE_BOB_AMPLITUDE;
        let target = self.state.current_position + Vec3::new(0.0, bob, 0.0);
        self.transform.position = self.transform.position.lerp(target, IDLE_LERP);
        self.transform.rotation = self.transform.rotation.slerp(Quat::IDENTITY, IDLE_LERP);
    }

    fn pose_jump(&mut self) {
        let p = self.state.jump_progress;
        let direction = self.state.direction;
        let height = JUMP_HEIGHT * p * (1.0 - p);
        let forward = p * JUMP_FORWARD * direction;
        self.transform.position = self.state.current_position + Vec3::new(forward, height, 0.0);
        self.transform.rotation = Quat::from_rotation_z((p - 0.5) * direction * JUMP_TILT);
    }

    fn land(&mut self) {
        let state = &mut self.state;
        let mut x = state.current_position.x + LANDING_STEP * state.direction;
        let offset = x - state.rest_position.x;
        if offset.abs() >= state.max_roam_distance - TURN_MARGIN {
            state.direction = -state.direction;
        }
        let (low, high) = state.roam_bounds();
        x = x.clamp(low, high);

        state.current_position.x = x;
        state.is_jumping = false;
        state.jump_progress = 0.0;
        state.elapsed_since_last_jump = 0.0;
        state.next_jump_interval_seconds = self.rng.range(MIN_INTERVAL, MAX_INTERVAL);
        self.jumps += 1;
        tracing::debug!(
            x,
            direction = state.direction,
            next_jump_in = state.next_jump_interval_seconds,
            "creature landed"
        );
    }

    /// Body box rays are tested against, following the animated transform.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.transform.position,
            self.config.body_half_extents * self.transform.scale,
            self.transform.rotation,
        )
    }

    pub fn pick(&self, ray: &Ray) -> Option<Hit> {
        self.bounds().intersect(ray)
    }

    /// Gate a click at intersection `point`.
    ///
    /// Accepted only when the point is within `click_radius` of the creature
    /// origin and at least `clickable_min_y` high. A valid config keeps the
    /// resting body below that line, so only a jump makes it catchable.
    pub fn try_click(&self, point: Vec3) -> Option<CreatureEvent> {
        let distance = point.distance(self.transform.position);
        if distance > self.config.click_radius || point.y < self.config.clickable_min_y {
            tracing::trace!(distance, y = point.y, "creature click rejected");
            return None;
        }
        tracing::debug!(distance, y = point.y, "creature clicked");
        Some(CreatureEvent::Clicked)
    }

    pub fn click(&self, ray: &Ray) -> Option<CreatureEvent> {
        self.pick(ray).and_then(|hit| self.try_click(hit.point))
    }

    pub fn is_hovered(&self) -> bool {
        self.hover.is_hovered()
    }

    pub fn pointer_enter(&mut self, now_ms: f64) -> bool {
        self.hover.enter(now_ms)
    }

    pub fn pointer_leave(&mut self, now_ms: f64) -> bool {
        self.hover.leave(now_ms)
    }
}
