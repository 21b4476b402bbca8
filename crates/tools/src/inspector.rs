use std::fmt;
use std::time::Duration;

use isleworld_scene::SceneOrchestrator;

/// Read-only queries against a running scene for debugging and profiling.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(scene: &SceneOrchestrator) -> SceneSummary {
        let timer = scene.timer();
        let budget = Duration::try_from_secs_f64(scene.config().budgets.frame_budget_ms / 1000.0).unwrap_or(Duration::MAX);
        SceneSummary {
            mounted: scene.is_mounted(),
            frames: scene.clock().frames(),
            elapsed_seconds: scene.clock().elapsed_seconds(),
            seed: scene.seed(),
            is_day: scene.is_day(),
            islands: scene.islands().len(),
            subscriptions: scene.subscriptions(),
            ocean_updates: scene.ocean().map_or(0, |o| o.updates()),
            stars: scene.sky().map_or(0, |s| s.stars().len()),
            creature_jumps: scene.creature().map_or(0, |c| c.jumps()),
            fallback_models: scene.library().fallback_count(),
            pending_events: scene.pending_events(),
            bloom: scene.bloom_enabled(),
            avg_tick: timer.average(),
            max_tick: timer.max(),
            over_budget: timer.over_budget(budget),
            state_hash: scene.state_hash(),
        }
    }

    pub fn inspect_island(scene: &SceneOrchestrator, path: &str) -> Option<IslandInfo> {
        scene.island(path).map(|island| {
            let p = island.base().position;
            IslandInfo {
                path: island.path().to_string(),
                position: [p.x, p.y, p.z],
                objects: island
                    .objects()
                    .iter()
                    .map(|o| o.kind.name().to_string())
                    .collect(),
                skipped: island.skipped(),
                hovered: island.is_hovered(),
            }
        })
    }

    pub fn creature_info(scene: &SceneOrchestrator) -> Option<CreatureInfo> {
        scene.creature().map(|c| {
            let p = c.transform().position;
            let state = c.state();
            CreatureInfo {
                position: [p.x, p.y, p.z],
                landing_x: state.current_position.x,
                jumping: state.is_jumping,
                progress: state.jump_progress,
                jumps: c.jumps(),
            }
        })
    }

    pub fn list_islands(scene: &SceneOrchestrator) -> Vec<String> {
        scene.islands().iter().map(|i| i.path().to_string()).collect()
    }
}

/// Scene-wide counters.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub mounted: bool,
    pub frames: u64,
    pub elapsed_seconds: f64,
    pub seed: u64,
    pub is_day: bool,
    pub islands: usize,
    pub subscriptions: usize,
    pub ocean_updates: u64,
    pub stars: usize,
    pub creature_jumps: u64,
    pub fallback_models: usize,
    pub pending_events: usize,
    pub bloom: bool,
    pub avg_tick: Duration,
    pub max_tick: Duration,
    /// Recent ticks slower than the frame budget.
    pub over_budget: usize,
    pub state_hash: u64,
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Scene: {} frames={} t={:.2}s seed={} {}",
            if self.mounted { "mounted" } else { "unmounted" },
            self.frames,
            self.elapsed_seconds,
            self.seed,
            if self.is_day { "day" } else { "night" }
        )?;
        writeln!(
            f,
            "  islands={} subscriptions={} ocean_updates={} stars={} jumps={}",
            self.islands, self.subscriptions, self.ocean_updates, self.stars, self.creature_jumps
        )?;
        writeln!(
            f,
            "  fallback_models={} pending_events={} bloom={}",
            self.fallback_models,
            self.pending_events,
            if self.bloom { "on" } else { "off" }
        )?;
        writeln!(
            f,
            "  tick avg={:?} max={:?} over_budget={}",
            self.avg_tick, self.max_tick, self.over_budget
        )?;
        write!(f, "  hash={:#018x}", self.state_hash)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IslandInfo {
    pub path: String,
    pub position: [f32; 3],
    pub objects: Vec<String>,
    pub skipped: usize,
    pub hovered: bool,
}

impl fmt::Display for IslandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Island [{}] pos=({:.2}, {:.2}, {:.2}) objects=[{}]",
            self.path,
            self.position[0],
            self.position[1],
            self.position[2],
            self.objects.join(", ")
        )?;
        if self.skipped > 0 {
            write!(f, " skipped={}", self.skipped)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatureInfo {
    pub position: [f32; 3],
    pub landing_x: f32,
    pub jumping: bool,
    pub progress: f32,
    pub jumps: u64,
}

impl fmt::Display for CreatureInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Creature pos=({:.2}, {:.2}, {:.2}) landing_x={:.1} {} jumps={}",
            self.position[0],
            self.position[1],
            self.position[2],
            self.landing_x,
            if self.jumping {
                format!("jumping p={:.2}", self.progress)
            } else {
                "idle".to_string()
            },
            self.jumps
        )
    }
}
