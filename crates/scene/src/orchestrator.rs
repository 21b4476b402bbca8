use std::collections::BTreeMap;
use std::time::Instant;

use glam::{Vec2, Vec3};

use isleworld_assets::ModelLibrary;
use isleworld_common::{SceneClock, SceneRng, Transform};
use isleworld_creature::{CreatureAnimator, CreatureEvent};
use isleworld_input::{Hit, PointerAction, Ray, pixel_to_ndc};
use isleworld_islands::{IslandComposer, IslandEvent, layout_islands, validate_unique_paths};
use isleworld_ocean::{VertexCache, WaveSurface};
use isleworld_render::{DrawItem, OceanStats, RenderFrame, StarStats};
use isleworld_schedule::{FrameScheduler, FrameTimer, SubscriptionId};
use isleworld_sky::{CelestialBackdrop, SkyTheme};

use crate::camera::CameraConfig;
use crate::config::SceneConfig;
use crate::lighting::LightingPreset;

const OCEAN_PRIORITY: i32 = 0;
const SKY_PRIORITY: i32 = 1;
const ISLAND_PRIORITY: i32 = 2;
const CREATURE_PRIORITY: i32 = 3;

/// Inputs supplied by the host page.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneProps {
    pub categories: Vec<String>,
    pub is_day: bool,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    pub theme: SkyTheme,
}

impl SceneProps {
    pub fn new<S: Into<String>>(categories: impl IntoIterator<Item = S>) -> Self {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            is_day: true,
            viewport: Vec2::new(1280.0, 720.0),
            theme: SkyTheme::default(),
        }
    }

    pub fn with_day(mut self, is_day: bool) -> Self {
        self.is_day = is_day;
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Vec2::new(width, height);
        self
    }

    pub fn with_theme(mut self, theme: SkyTheme) -> Self {
        self.theme = theme;
        self
    }
}

/// Intent emitted to the host, drained with [`SceneOrchestrator::drain_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    IslandClick { category: String },
    CreatureClick,
}

impl From<IslandEvent> for SceneEvent {
    fn from(event: IslandEvent) -> Self {
        match event {
            IslandEvent::Clicked { path } => Self::IslandClick { category: path },
        }
    }
}

/// What a pointer ray landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Island(usize),
    Creature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subsystem {
    Ocean,
    Sky,
    Island(usize),
    Creature,
}

/// Everything that exists only while mounted.
#[derive(Debug)]
struct Stage {
    ocean: WaveSurface,
    sky: CelestialBackdrop,
    islands: Vec<IslandComposer>,
    creature: CreatureAnimator,
    routes: BTreeMap<SubscriptionId, Subsystem>,
}

/// Owner of the whole scene.
///
/// Composes the ocean, sky, islands and creature, registers each with the
/// frame scheduler, and dispatches due subscriptions on every tick. The
/// host drives it with [`tick`](Self::tick) and pointer actions and reads
/// back events and render frames. After [`unmount`](Self::unmount) every
/// operation is a no-op.
#[derive(Debug)]
pub struct SceneOrchestrator {
    config: SceneConfig,
    seed: u64,
    clock: SceneClock,
    scheduler: FrameScheduler,
    library: ModelLibrary,
    stage: Option<Stage>,
    categories: Vec<String>,
    is_day: bool,
    viewport: Vec2,
    hovered: Option<PickTarget>,
    events: Vec<SceneEvent>,
    timer: FrameTimer,
}

impl SceneOrchestrator {
    pub fn mount(props: SceneProps, config: SceneConfig, seed: u64, mut library: ModelLibrary) -> Self {
        let config = config.sanitized();
        let mut rng = SceneRng::seeded(seed);
        let mut scheduler = FrameScheduler::new();
        let mut routes = BTreeMap::new();

        let ocean = WaveSurface::new(config.wave, config.ocean).unwrap_or_else(|err| {
            tracing::warn!(%err, "ocean surface rejected, mounting an empty one");
            WaveSurface::from_cache(config.wave, VertexCache::empty(), Vec::new())
        });
        routes.insert(
            scheduler.subscribe(OCEAN_PRIORITY, config.budgets.wave_interval_ms),
            Subsystem::Ocean,
        );

        let sky = CelestialBackdrop::new(props.theme.clone(), config.stars, props.is_day, rng.fork());
        routes.insert(scheduler.subscribe(SKY_PRIORITY, 0.0), Subsystem::Sky);

        let islands = compose_islands(&props.categories, &mut library);
        for index in 0..islands.len() {
            routes.insert(
                scheduler.subscribe(ISLAND_PRIORITY, config.budgets.hover_interval_ms),
                Subsystem::Island(index),
            );
        }

        let creature = CreatureAnimator::new(config.creature, rng.fork(), &mut library);
        routes.insert(scheduler.subscribe(CREATURE_PRIORITY, 0.0), Subsystem::Creature);

        tracing::debug!(
            seed,
            islands = islands.len(),
            vertices = ocean.vertex_count(),
            stars = sky.stars().len(),
            is_day = props.is_day,
            "scene mounted"
        );

        Self {
            config,
            seed,
            clock: SceneClock::new(),
            scheduler,
            library,
            stage: Some(Stage {
                ocean,
                sky,
                islands,
                creature,
                routes,
            }),
            categories: props.categories,
            is_day: props.is_day,
            viewport: props.viewport,
            hovered: None,
            events: Vec::new(),
            timer: FrameTimer::default(),
        }
    }

    /// Tear down every subsystem and subscription.
    pub fn unmount(&mut self) {
        if self.stage.take().is_none() {
            return;
        }
        self.scheduler.clear();
        self.hovered = None;
        tracing::debug!(frames = self.clock.frames(), "scene unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.stage.is_some()
    }

    /// Advance the scene clock by `delta_seconds` and run every subsystem
    /// whose budget allows it. Returns how many ran.
    pub fn tick(&mut self, delta_seconds: f32) -> usize {
        let Some(stage) = self.stage.as_mut() else {
            tracing::trace!("tick after unmount ignored");
            return 0;
        };
        let started = Instant::now();
        let tick = self.clock.advance(delta_seconds);
        let _span = tracing::info_span!("scene_tick", frame = self.clock.frames()).entered();

        let due = self.scheduler.due(&tick);
        for id in &due {
            match stage.routes.get(id) {
                Some(Subsystem::Ocean) => stage.ocean.update(tick.elapsed_seconds),
                Some(Subsystem::Sky) => stage.sky.tick(tick.now_ms()),
                Some(Subsystem::Island(index)) => {
                    if let Some(island) = stage.islands.get_mut(*index) {
                        island.tick(&tick);
                    }
                }
                Some(Subsystem::Creature) => stage.creature.tick(&tick),
                None => tracing::trace!(?id, "no route for subscription"),
            }
        }
        self.timer.record(started.elapsed());
        tracing::trace!(ran = due.len(), "tick dispatched");
        due.len()
    }

    /// Feed one pointer action. Any resulting events are queued.
    pub fn pointer(&mut self, action: PointerAction) {
        let now_ms = self.clock.elapsed_seconds() * 1000.0;
        let Some(stage) = self.stage.as_mut() else {
            return;
        };
        match action {
            PointerAction::Move(ray) => {
                let target = pick(stage, &ray).map(|(target, _)| target);
                update_hover(stage, &mut self.hovered, target, now_ms);
            }
            PointerAction::Click(ray) => match pick(stage, &ray) {
                Some((PickTarget::Creature, hit)) => {
                    if let Some(CreatureEvent::Clicked) = stage.creature.try_click(hit.point) {
                        self.events.push(SceneEvent::CreatureClick);
                    }
                }
                Some((PickTarget::Island(index), _)) => {
                    if let Some(event) = stage.islands.get_mut(index).and_then(|i| i.click()) {
                        self.events.push(event.into());
                    }
                }
                None => {}
            },
            PointerAction::DoubleClick(ray) => {
                // Only islands navigate; a double-click on the creature is ignored.
                let event = match pick(stage, &ray) {
                    Some((PickTarget::Island(index), _)) => {
                        stage.islands.get_mut(index).and_then(|i| i.double_click())
                    }
                    _ => None,
                };
                if let Some(event) = event {
                    self.events.push(event.into());
                }
            }
            PointerAction::Leave => update_hover(stage, &mut self.hovered, None, now_ms),
        }
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_day(&mut self, is_day: bool) {
        if is_day == self.is_day {
            return;
        }
        self.is_day = is_day;
        let now_ms = self.clock.elapsed_seconds() * 1000.0;
        if let Some(stage) = self.stage.as_mut() {
            stage.sky.set_day(is_day, now_ms);
        }
        tracing::debug!(is_day, "time of day changed");
    }

    pub fn set_theme(&mut self, theme: SkyTheme) {
        if let Some(stage) = self.stage.as_mut() {
            stage.sky.set_theme(theme);
        }
    }

    /// Replace the island set. Old island subscriptions are dropped and the
    /// new islands are registered in their place.
    pub fn set_categories<S: Into<String>>(&mut self, categories: impl IntoIterator<Item = S>) {
        self.categories = categories.into_iter().map(Into::into).collect();
        let Some(stage) = self.stage.as_mut() else {
            return;
        };
        let scheduler = &mut self.scheduler;
        stage.routes.retain(|id, subsystem| {
            if matches!(subsystem, Subsystem::Island(_)) {
                scheduler.unsubscribe(*id);
                false
            } else {
                true
            }
        });
        if matches!(self.hovered, Some(PickTarget::Island(_))) {
            self.hovered = None;
        }

        stage.islands = compose_islands(&self.categories, &mut self.library);
        for index in 0..stage.islands.len() {
            stage.routes.insert(
                scheduler.subscribe(ISLAND_PRIORITY, self.config.budgets.hover_interval_ms),
                Subsystem::Island(index),
            );
        }
        tracing::debug!(islands = stage.islands.len(), "island set rebuilt");
    }

    /// Viewport resize. Bloom is re-gated against the new width.
    pub fn resize(&mut self, width: f32, height: f32) {
        let was = self.bloom_enabled();
        self.viewport = Vec2::new(width, height);
        let now = self.bloom_enabled();
        if was != now {
            tracing::debug!(width, bloom = now, "bloom toggled by resize");
        }
    }

    pub fn bloom_enabled(&self) -> bool {
        self.config.bloom.enabled_for(self.viewport.x)
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y.max(1.0)
    }

    /// World-space ray under a pixel of the viewport.
    pub fn pointer_ray(&self, pixel: Vec2) -> Option<Ray> {
        let ndc = pixel_to_ndc(pixel, self.viewport)?;
        self.config.camera.screen_ray(ndc, self.aspect())
    }

    /// Pixel a world point is drawn at, if it is in front of the camera.
    pub fn screen_position(&self, point: Vec3) -> Option<Vec2> {
        let ndc = self.config.camera.project(point, self.aspect())?;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraConfig {
        &self.config.camera
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn clock(&self) -> &SceneClock {
        &self.clock
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn library(&self) -> &ModelLibrary {
        &self.library
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn is_day(&self) -> bool {
        self.is_day
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn hovered(&self) -> Option<PickTarget> {
        self.hovered
    }

    pub fn subscriptions(&self) -> usize {
        self.scheduler.len()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn ocean(&self) -> Option<&WaveSurface> {
        self.stage.as_ref().map(|s| &s.ocean)
    }

    pub fn sky(&self) -> Option<&CelestialBackdrop> {
        self.stage.as_ref().map(|s| &s.sky)
    }

    pub fn islands(&self) -> &[IslandComposer] {
        self.stage
            .as_ref()
            .map(|s| s.islands.as_slice())
            .unwrap_or_default()
    }

    pub fn island(&self, path: &str) -> Option<&IslandComposer> {
        self.islands().iter().find(|i| i.path() == path)
    }

    pub fn creature(&self) -> Option<&CreatureAnimator> {
        self.stage.as_ref().map(|s| &s.creature)
    }

    /// FNV-1a hash of the simulated state, for comparing two runs.
    pub fn state_hash(&self) -> u64 {
        let mut h = Fnv::new();
        h.write(&self.clock.frames().to_le_bytes());
        h.write(&self.clock.elapsed_seconds().to_le_bytes());
        h.write(&[self.is_day as u8]);
        let Some(stage) = self.stage.as_ref() else {
            return h.finish();
        };

        h.write(&stage.ocean.updates().to_le_bytes());
        for vertex in stage.ocean.vertices() {
            h.write_f32(vertex.position[2]);
        }
        for &value in stage.sky.stars().positions() {
            h.write_f32(value);
        }
        for island in &stage.islands {
            h.write(island.path().as_bytes());
            h.write_transform(island.base());
        }
        let state = stage.creature.state();
        for value in [
            state.current_position.x,
            state.jump_progress,
            state.next_jump_interval_seconds,
            state.elapsed_since_last_jump,
            state.direction,
        ] {
            h.write_f32(value);
        }
        h.write(&[state.is_jumping as u8]);
        h.write_transform(stage.creature.transform());
        h.finish()
    }

    /// Frame description for the renderer. Empty after unmount.
    pub fn snapshot(&self) -> RenderFrame {
        let mut frame = RenderFrame {
            frame_index: self.clock.frames(),
            elapsed_seconds: self.clock.elapsed_seconds(),
            is_day: self.is_day,
            lights: LightingPreset::for_time_of_day(self.is_day).lights(),
            bloom: self.config.bloom.pass_for(self.viewport.x),
            view: self.config.camera.view(),
            ..RenderFrame::default()
        };
        let Some(stage) = self.stage.as_ref() else {
            return frame;
        };

        frame.background = stage
            .sky
            .gradient()
            .stops()
            .iter()
            .map(|s| (s.offset, s.color))
            .collect();
        frame.ocean = OceanStats {
            vertex_count: stage.ocean.vertex_count(),
            dirty: stage.ocean.is_dirty(),
            color: stage.sky.theme().sea_color(self.is_day),
        };
        frame.stars = StarStats {
            count: stage.sky.stars().len(),
            opacity: stage.sky.star_opacity(),
        };

        for island in &stage.islands {
            frame.items.push(DrawItem {
                label: format!("{}/base", island.path()),
                transform: *island.base(),
                shape: island.base_slot().into(),
                emissive: 0.0,
            });
            for object in island.objects() {
                frame.items.push(DrawItem {
                    label: format!("{}/{}", island.path(), object.kind.name()),
                    transform: island.object_transform(object),
                    shape: object.slot.into(),
                    emissive: 0.0,
                });
            }
            if let Some(label) = island.label() {
                frame.overlay.push(label);
            }
        }
        frame.items.push(DrawItem {
            label: "creature".to_string(),
            transform: *stage.creature.transform(),
            shape: stage.creature.slot().into(),
            emissive: stage.creature.glow_intensity(self.is_day),
        });
        frame
    }
}

fn compose_islands(categories: &[String], library: &mut ModelLibrary) -> Vec<IslandComposer> {
    let configs = layout_islands(categories);
    if let Err(err) = validate_unique_paths(&configs) {
        tracing::warn!(%err, "duplicate island paths");
    }
    configs
        .iter()
        .map(|config| {
            if let Err(err) = config.validate() {
                tracing::warn!(%err, "island has invalid objects, skipping them");
            }
            IslandComposer::new(config, library)
        })
        .collect()
}

/// Nearest target along `ray`.
fn pick(stage: &Stage, ray: &Ray) -> Option<(PickTarget, Hit)> {
    let islands = stage
        .islands
        .iter()
        .enumerate()
        .filter_map(|(index, island)| island.bounds().intersect(ray).map(|hit| (PickTarget::Island(index), hit)));
    let creature = stage.creature.pick(ray).map(|hit| (PickTarget::Creature, hit));
    islands
        .chain(creature)
        .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
}

fn update_hover(stage: &mut Stage, hovered: &mut Option<PickTarget>, target: Option<PickTarget>, now_ms: f64) {
    if *hovered == target {
        return;
    }
    match hovered.take() {
        Some(PickTarget::Island(index)) => {
            if let Some(island) = stage.islands.get_mut(index) {
                island.pointer_leave(now_ms);
            }
        }
        Some(PickTarget::Creature) => {
            stage.creature.pointer_leave(now_ms);
        }
        None => {}
    }
    match target {
        Some(PickTarget::Island(index)) => {
            if let Some(island) = stage.islands.get_mut(index) {
                island.pointer_enter(now_ms);
            }
        }
        Some(PickTarget::Creature) => {
            stage.creature.pointer_enter(now_ms);
        }
        None => {}
    }
    *hovered = target;
}

struct Fnv(u64);

impl Fnv {
    fn new() -> Self {
        Self(0xcbf2_9ce4_8422_2325)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(0x0100_0000_01b3);
        }
    }

    fn write_f32(&mut self, value: f32) {
        self.write(&value.to_le_bytes());
    }

    fn write_transform(&mut self, t: &Transform) {
        let values = t
            .position
            .to_array()
            .into_iter()
            .chain(t.rotation.to_array())
            .chain(t.scale.to_array());
        for value in values {
            self.write_f32(value);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}
