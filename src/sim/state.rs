//! Game state and core simulation types
//!
//! Everything a session touches lives in [`World`]. Obstacles and bonuses are
//! owned by the [`EntityRegistry`]; nothing registers itself on construction.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;
use crate::progression::SessionSummary;

/// Active game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Title screen, waiting for a jump or the shop control
    Menu,
    /// A play attempt is running
    Session,
    /// The player just died; the next tick holds, then returns to the menu
    PostDeath { summary: SessionSummary },
    /// Cosmetic variant shop
    Shop,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Menu => "menu",
            Mode::Session => "session",
            Mode::PostDeath { .. } => "post-death",
            Mode::Shop => "shop",
        }
    }
}

/// One-shot domain events raised and consumed within a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlayerDied,
    ObstaclePassed { pair_id: u32 },
    BonusCollected { bonus_id: u32 },
}

/// Skin applied to the backdrop and obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
}

impl TimeOfDay {
    /// Uniform draw over both skins
    pub fn roll(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            TimeOfDay::Day
        } else {
            TimeOfDay::Night
        }
    }
}

/// Entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    UpperObstacle,
    LowerObstacle,
    Bonus,
    Backdrop,
    Ground,
}

/// What happens to an entity once it has scrolled off the left edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffscreenPolicy {
    /// Jump back to the right (endless tiles)
    Wrap,
    /// Remove from the registry
    Despawn,
}

/// What touching an entity does to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    Lethal,
    Collect,
}

impl EntityKind {
    pub fn offscreen_policy(self) -> OffscreenPolicy {
        match self {
            EntityKind::Backdrop | EntityKind::Ground => OffscreenPolicy::Wrap,
            EntityKind::UpperObstacle | EntityKind::LowerObstacle | EntityKind::Bonus => {
                OffscreenPolicy::Despawn
            }
        }
    }

    pub fn contact(self) -> Contact {
        match self {
            EntityKind::UpperObstacle | EntityKind::LowerObstacle | EntityKind::Ground => {
                Contact::Lethal
            }
            EntityKind::Bonus => Contact::Collect,
            EntityKind::Backdrop => Contact::None,
        }
    }

    /// Whether the time-of-day skin changes this entity's look
    pub fn is_skinned(self) -> bool {
        matches!(
            self,
            EntityKind::UpperObstacle | EntityKind::LowerObstacle | EntityKind::Backdrop
        )
    }
}

/// A world entity (tagged by kind, shared fields)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub bounds: Aabb,
    pub skin: TimeOfDay,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, bounds: Aabb) -> Self {
        Self {
            id,
            kind,
            bounds,
            skin: TimeOfDay::Day,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.bounds.pos.x
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.bounds.size.x
    }

    /// Take on `skin` if this kind has a time-of-day look
    pub fn apply_skin(&mut self, skin: TimeOfDay) {
        if self.kind.is_skinned() {
            self.skin = skin;
        }
    }
}

/// The player's flying sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub bounds: Aabb,
    /// Vertical velocity (positive = upward)
    pub velocity: f32,
    /// Cosmetic variant identifier
    pub variant: String,
    /// Ticks since the animation was restarted
    pub anim_ticks: u32,
}

impl Player {
    pub fn new(variant: impl Into<String>) -> Self {
        Self {
            bounds: Aabb::new(PLAYER_X, PLAYER_START_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
            velocity: 0.0,
            variant: variant.into(),
            anim_ticks: 0,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.bounds.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.bounds.pos.y
    }

    /// Back to the spawn point with no momentum
    pub fn reset(&mut self) {
        self.bounds.pos = Vec2::new(PLAYER_X, PLAYER_START_Y);
        self.velocity = 0.0;
        self.anim_ticks = 0;
    }

    /// Advance the wing animation by one tick
    pub fn animate(&mut self) {
        self.anim_ticks = self.anim_ticks.wrapping_add(1);
    }

    /// Animation frame index for a cycle of `frame_count` frames
    pub fn anim_frame(&self, frame_count: usize) -> usize {
        if frame_count == 0 {
            return 0;
        }
        (self.anim_ticks / ANIM_TICKS_PER_FRAME) as usize % frame_count
    }
}

/// Upper and lower obstacle sharing one x, separated by the gap
#[derive(Debug, Clone, PartialEq)]
pub struct ObstaclePair {
    pub id: u32,
    pub upper: Entity,
    pub lower: Entity,
    /// Set once the pair has scrolled behind the player
    pub passed: bool,
}

impl ObstaclePair {
    #[inline]
    pub fn x(&self) -> f32 {
        self.lower.x()
    }

    pub fn members(&self) -> [&Entity; 2] {
        [&self.upper, &self.lower]
    }

    pub fn members_mut(&mut self) -> [&mut Entity; 2] {
        [&mut self.upper, &mut self.lower]
    }
}

/// A collectible coin placed inside a pair's gap
#[derive(Debug, Clone, PartialEq)]
pub struct BonusItem {
    pub entity: Entity,
    pub pair_id: u32,
    pub collected: bool,
}

/// Sole owner of obstacle and bonus lifetime
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    pairs: Vec<ObstaclePair>,
    bonuses: Vec<BonusItem>,
    next_id: u32,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            pairs: Vec::new(),
            bonuses: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID (never reused, even across clears)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn insert_pair(&mut self, pair: ObstaclePair) {
        self.pairs.push(pair);
    }

    pub fn insert_bonus(&mut self, bonus: BonusItem) {
        self.bonuses.push(bonus);
    }

    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    pub fn pairs_mut(&mut self) -> &mut [ObstaclePair] {
        &mut self.pairs
    }

    pub fn bonuses(&self) -> &[BonusItem] {
        &self.bonuses
    }

    pub fn bonuses_mut(&mut self) -> &mut [BonusItem] {
        &mut self.bonuses
    }

    pub fn pair(&self, id: u32) -> Option<&ObstaclePair> {
        self.pairs.iter().find(|p| p.id == id)
    }

    /// Remove collected bonuses, returning how many went away
    pub fn remove_collected(&mut self) -> usize {
        let before = self.bonuses.len();
        self.bonuses.retain(|b| !b.collected);
        before - self.bonuses.len()
    }

    /// Drop entities that have left the canvas on the left
    pub fn despawn_offscreen(&mut self) -> usize {
        let before = self.pairs.len() + self.bonuses.len();
        self.pairs.retain(|p| p.lower.bounds.right() >= 0.0);
        self.bonuses.retain(|b| b.entity.bounds.right() >= 0.0);
        before - (self.pairs.len() + self.bonuses.len())
    }

    /// Left edge of the furthest-right pair
    pub fn rightmost_x(&self) -> Option<f32> {
        self.pairs.iter().map(|p| p.x()).reduce(f32::max)
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
        self.bonuses.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.bonuses.is_empty()
    }

    /// Re-skin every live entity whose kind has a time-of-day look
    pub fn apply_skin(&mut self, skin: TimeOfDay) {
        for pair in &mut self.pairs {
            for member in pair.members_mut() {
                member.apply_skin(skin);
            }
        }
        for bonus in &mut self.bonuses {
            bonus.entity.apply_skin(skin);
        }
    }
}

/// Two tiles of one layer, always exactly one tile width apart
#[derive(Debug, Clone, PartialEq)]
pub struct TileStrip {
    pub tiles: [Entity; 2],
}

impl TileStrip {
    pub fn new(kind: EntityKind, y: f32, width: f32, height: f32) -> Self {
        Self {
            tiles: [
                Entity::new(0, kind, Aabb::new(0.0, y, width, height)),
                Entity::new(1, kind, Aabb::new(width, y, width, height)),
            ],
        }
    }

    pub fn backdrop() -> Self {
        Self::new(EntityKind::Backdrop, 0.0, BACKDROP_WIDTH, CANVAS_HEIGHT)
    }

    pub fn ground() -> Self {
        Self::new(EntityKind::Ground, GROUND_Y, GROUND_WIDTH, GROUND_HEIGHT)
    }

    pub fn apply_skin(&mut self, skin: TimeOfDay) {
        for tile in &mut self.tiles {
            tile.apply_skin(skin);
        }
    }
}

/// Everything a play session reads or mutates
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub registry: EntityRegistry,
    pub backdrop: TileStrip,
    pub ground: TileStrip,
    pub time_of_day: TimeOfDay,
    /// Latched once `PlayerDied` has been raised this session
    pub death_reported: bool,
    pub rng: Pcg32,
}

impl World {
    pub fn new(seed: u64, variant: impl Into<String>) -> Self {
        Self {
            player: Player::new(variant),
            registry: EntityRegistry::new(),
            backdrop: TileStrip::backdrop(),
            ground: TileStrip::ground(),
            time_of_day: TimeOfDay::Day,
            death_reported: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Pick a new time of day and apply it everywhere it shows
    pub fn roll_time_of_day(&mut self) {
        self.time_of_day = TimeOfDay::roll(&mut self.rng);
        self.apply_skin();
    }

    pub fn apply_skin(&mut self) {
        self.backdrop.apply_skin(self.time_of_day);
        self.ground.apply_skin(self.time_of_day);
        self.registry.apply_skin(self.time_of_day);
    }

    /// Lethal surfaces currently on screen
    pub fn lethal_entities(&self) -> impl Iterator<Item = &Entity> {
        self.ground
            .tiles
            .iter()
            .chain(self.registry.pairs().iter().flat_map(|p| p.members()))
            .filter(|e| e.kind.contact() == Contact::Lethal)
    }
}
