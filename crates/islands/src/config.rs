use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use isleworld_assets::Primitive;

/// Positions for categories that have no predefined island, indexed by the
/// category's list index modulo the table length.
pub const FALLBACK_POSITIONS: [[f32; 3]; 6] = [
    [-18.0, 0.0, -15.0],
    [18.0, 0.0, 15.0],
    [-32.0, 0.0, 6.0],
    [32.0, 0.0, -6.0],
    [0.0, 0.0, 34.0],
    [0.0, 0.0, -38.0],
];

/// Errors from validating island tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IslandError {
    #[error("island path {0:?} appears more than once")]
    DuplicatePath(String),
    #[error("object {index} on island {path:?} has non-positive scale {scale}")]
    InvalidScale {
        path: String,
        index: usize,
        scale: f32,
    },
}

/// Kind of decoration placed on an island.
///
/// Names outside the known set parse to `Unknown` so that a newer table can
/// be loaded by an older scene; unknown objects are simply not drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectKind {
    Book,
    Mailbox,
    PalmTree,
    Donut,
    QuestionMark,
    Projects,
    Lamppost,
    Unknown(String),
}

impl ObjectKind {
    pub fn name(&self) -> &str {
        match self {
            Self::Book => "book",
            Self::Mailbox => "mailbox",
            Self::PalmTree => "palmTree",
            Self::Donut => "donut",
            Self::QuestionMark => "questionMark",
            Self::Projects => "projects",
            Self::Lamppost => "lamppost",
            Self::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Box drawn in place of the model when it cannot be loaded.
    pub fn fallback_primitive(&self) -> Primitive {
        let half_extents = match self {
            Self::Book => [1.0, 0.3, 1.4],
            Self::Mailbox => [0.6, 1.2, 0.6],
            Self::PalmTree => [1.2, 3.0, 1.2],
            Self::Donut => [1.2, 0.5, 1.2],
            Self::QuestionMark => [0.6, 1.5, 0.3],
            Self::Projects => [1.5, 1.0, 1.0],
            Self::Lamppost => [0.3, 2.5, 0.3],
            Self::Unknown(_) => [0.5, 0.5, 0.5],
        };
        Primitive::Box { half_extents }
    }
}

impl From<&str> for ObjectKind {
    fn from(name: &str) -> Self {
        match name {
            "book" => Self::Book,
            "mailbox" => Self::Mailbox,
            "palmTree" => Self::PalmTree,
            "donut" => Self::Donut,
            "questionMark" => Self::QuestionMark,
            "projects" => Self::Projects,
            "lamppost" => Self::Lamppost,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ObjectKind {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<ObjectKind> for String {
    fn from(kind: ObjectKind) -> Self {
        kind.name().to_string()
    }
}

/// One decoration, positioned relative to its island.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslandObject {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub position: Vec3,
    pub scale: f32,
}

impl IslandObject {
    pub fn new(kind: impl Into<ObjectKind>, position: [f32; 3], scale: f32) -> Self {
        Self {
            kind: kind.into(),
            position: Vec3::from_array(position),
            scale,
        }
    }
}

/// A navigable island: its path, where it floats, and what stands on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslandConfig {
    pub path: String,
    pub position: Vec3,
    pub objects: Vec<IslandObject>,
}

impl IslandConfig {
    pub fn new(path: impl Into<String>, position: [f32; 3], objects: Vec<IslandObject>) -> Self {
        Self {
            path: path.into(),
            position: Vec3::from_array(position),
            objects,
        }
    }

    /// Single palm tree island used for categories without a predefined
    /// layout.
    pub fn fallback(path: impl Into<String>, index: usize) -> Self {
        let position = FALLBACK_POSITIONS[index % FALLBACK_POSITIONS.len()];
        Self::new(
            path,
            position,
            vec![IslandObject::new(ObjectKind::PalmTree, [0.0, 1.5, 0.0], 1.0)],
        )
    }

    pub fn validate(&self) -> Result<(), IslandError> {
        for (index, object) in self.objects.iter().enumerate() {
            if object.scale.is_nan() || object.scale <= 0.0 {
                return Err(IslandError::InvalidScale {
                    path: self.path.clone(),
                    index,
                    scale: object.scale,
                });
            }
        }
        Ok(())
    }
}

/// Built-in layout for a known category.
pub fn predefined_island(path: &str) -> Option<IslandConfig> {
    use ObjectKind::*;
    let island = match path {
        "tech" => IslandConfig::new(
            path,
            [-22.0, 0.0, -8.0],
            vec![
                IslandObject::new(Book, [-1.5, 1.2, 0.5], 1.2),
                IslandObject::new(Projects, [2.0, 1.5, -1.0], 1.0),
                IslandObject::new(Lamppost, [3.5, 1.0, 2.5], 0.8),
            ],
        ),
        "life" => IslandConfig::new(
            path,
            [22.0, 0.0, -10.0],
            vec![
                IslandObject::new(Donut, [-1.0, 1.4, 1.0], 1.0),
                IslandObject::new(PalmTree, [2.0, 1.5, -1.5], 1.1),
            ],
        ),
        "projects" => IslandConfig::new(
            path,
            [0.0, 0.0, -26.0],
            vec![
                IslandObject::new(Projects, [0.0, 1.5, 0.0], 1.4),
                IslandObject::new(Lamppost, [-3.0, 1.0, 2.0], 0.8),
            ],
        ),
        "about" => IslandConfig::new(
            path,
            [-14.0, 0.0, 20.0],
            vec![
                IslandObject::new(QuestionMark, [0.0, 2.0, 0.0], 1.2),
                IslandObject::new(PalmTree, [-2.5, 1.5, -2.0], 0.9),
            ],
        ),
        "contact" => IslandConfig::new(
            path,
            [26.0, 0.0, 22.0],
            vec![
                IslandObject::new(Mailbox, [0.0, 1.5, 0.0], 1.0),
                IslandObject::new(Lamppost, [2.5, 1.0, 1.5], 0.8),
            ],
        ),
        _ => return None,
    };
    Some(island)
}

/// One island per category, in list order.
///
/// Known categories use their predefined layout, others get the fallback
/// island for their list index. Repeated categories are dropped so that
/// paths stay unique.
pub fn layout_islands<S: AsRef<str>>(categories: &[S]) -> Vec<IslandConfig> {
    let mut seen = BTreeSet::new();
    let mut islands = Vec::with_capacity(categories.len());
    for (index, category) in categories.iter().enumerate() {
        let category = category.as_ref();
        if !seen.insert(category) {
            tracing::warn!(category, "duplicate category skipped");
            continue;
        }
        let island = predefined_island(category).unwrap_or_else(|| {
            tracing::debug!(category, index, "no predefined island, using fallback");
            IslandConfig::fallback(category, index)
        });
        islands.push(island);
    }
    islands
}

/// Every path in the set must be unique.
pub fn validate_unique_paths(islands: &[IslandConfig]) -> Result<(), IslandError> {
    let mut seen = BTreeSet::new();
    for island in islands {
        if !seen.insert(island.path.as_str()) {
            return Err(IslandError::DuplicatePath(island.path.clone()));
        }
    }
    Ok(())
}
