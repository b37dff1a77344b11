//! Fixed timestep simulation tick
//!
//! The game-mode state machine. Each tick consumes one [`TickInput`], advances
//! whatever the active mode simulates, drains that tick's collision events and
//! reports what the platform layer should do (sounds, the post-death hold).

use std::time::Duration;

use glam::Vec2;

use super::state::{GameEvent, Mode, World};
use super::{collision, physics, scroller, spawner};
use crate::audio::SoundEffect;
use crate::progression::{PlayerProfile, Progression, ShopOutcome, VARIANTS};
use crate::tuning::Tuning;
use crate::ui::{self, Control};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Jump/confirm (keyboard)
    pub jump: bool,
    /// Pointer click position, canvas space
    pub click: Option<Vec2>,
    /// Current pointer position for hover, canvas space
    pub pointer: Option<Vec2>,
    /// Global quit signal (handled by the application loop)
    pub quit: bool,
}

/// What a tick produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Domain events raised this tick (already applied)
    pub events: Vec<GameEvent>,
    /// Sounds to play
    pub sounds: Vec<SoundEffect>,
    /// Blocking pause the loop must honor before presenting
    pub hold: Option<Duration>,
    /// Mode change as (from, to) names
    pub transition: Option<(&'static str, &'static str)>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: Mode,
    pub world: World,
    pub progression: Progression,
    pub tuning: Tuning,
    /// Control under the pointer, if any
    pub hovered: Option<Control>,
}

impl GameState {
    /// Create a new game at the menu
    pub fn new(seed: u64, profile: PlayerProfile, tuning: Tuning) -> Self {
        let progression = Progression::new(profile);
        let mut world = World::new(seed, progression.selected_variant());
        world.roll_time_of_day();
        Self {
            mode: Mode::Menu,
            world,
            progression,
            tuning,
            hovered: None,
        }
    }

    fn set_mode(&mut self, mode: Mode, report: &mut TickReport) {
        let from = self.mode.name();
        self.mode = mode;
        log::info!("mode: {} -> {}", from, mode.name());
        report.transition = Some((from, mode.name()));
        report.sounds.push(SoundEffect::Swoosh);
    }

    /// Reset everything a fresh attempt needs and fill the track
    fn start_session(&mut self, report: &mut TickReport) {
        let world = &mut self.world;
        world.player.reset();
        world.death_reported = false;
        world.registry.clear();
        world.roll_time_of_day();
        spawner::prespawn_run(
            &mut world.registry,
            &mut world.rng,
            world.time_of_day,
            &self.tuning,
        );
        self.progression.start_session();
        log::info!(
            "session started ({:?}, {} pairs ahead)",
            world.time_of_day,
            world.registry.pairs().len()
        );
        self.set_mode(Mode::Session, report);
    }

    /// Clear the session's leftovers and go back to the title screen
    fn return_to_menu(&mut self, report: &mut TickReport) {
        let world = &mut self.world;
        world.registry.clear();
        world.player.reset();
        world.roll_time_of_day();
        self.set_mode(Mode::Menu, report);
    }

    fn scroll_tiles(&mut self) {
        let speed = self.tuning.scroll_speed;
        scroller::scroll_strip(&mut self.world.backdrop, speed);
        scroller::scroll_strip(&mut self.world.ground, speed);
    }

    fn tick_menu(&mut self, input: &TickInput, report: &mut TickReport) {
        self.scroll_tiles();
        self.world.player.animate();

        if input.jump {
            self.start_session(report);
        } else if let Some(Control::OpenShop) = input.click.and_then(|p| ui::hit_test(&self.mode, p)) {
            self.set_mode(Mode::Shop, report);
        }
    }

    fn tick_session(&mut self, input: &TickInput, report: &mut TickReport) {
        if input.jump {
            physics::jump(&mut self.world.player, &self.tuning);
            report.sounds.push(SoundEffect::Flap);
        }
        physics::integrate(&mut self.world.player, &self.tuning);
        self.world.player.animate();

        self.scroll_tiles();
        let despawned = scroller::scroll_registry(&mut self.world.registry, self.tuning.scroll_speed);
        if despawned > 0 {
            log::debug!("despawned {} off-screen entities", despawned);
        }

        let events = collision::detect(&mut self.world);

        // Scoring first so a pass in the dying tick still counts
        let mut died = false;
        for event in &events {
            match *event {
                GameEvent::ObstaclePassed { pair_id } => {
                    self.progression.record_pass();
                    let world = &mut self.world;
                    let next = spawner::replenish(
                        &mut world.registry,
                        &mut world.rng,
                        world.time_of_day,
                        &self.tuning,
                    );
                    log::debug!(
                        "pair {} passed, score {}, spawned pair {}",
                        pair_id,
                        self.progression.session_score(),
                        next
                    );
                    report.sounds.push(SoundEffect::Point);
                }
                GameEvent::BonusCollected { bonus_id } => {
                    self.progression.record_bonus();
                    log::debug!(
                        "bonus {} collected, currency {}",
                        bonus_id,
                        self.progression.profile().currency
                    );
                    report.sounds.push(SoundEffect::Coin);
                }
                GameEvent::PlayerDied => died = true,
            }
        }

        if died {
            report.sounds.push(SoundEffect::Hit);
            let summary = self.progression.finish_session();
            if summary.new_high_score {
                log::info!(
                    "new high score {} (was {})",
                    summary.score,
                    summary.previous_high
                );
            } else {
                log::info!("session over, score {}", summary.score);
            }
            self.set_mode(Mode::PostDeath { summary }, report);
        }

        report.events = events;
    }

    fn tick_post_death(&mut self, report: &mut TickReport) {
        report.hold = Some(Duration::from_millis(self.tuning.death_pause_ms));
        self.return_to_menu(report);
    }

    fn tick_shop(&mut self, input: &TickInput, report: &mut TickReport) {
        let Some(control) = input.click.and_then(|p| ui::hit_test(&self.mode, p)) else {
            return;
        };
        match control {
            Control::VariantSlot(index) => {
                match self.progression.choose_variant(index, self.tuning.variant_price) {
                    ShopOutcome::Purchased { index, price } => {
                        log::info!(
                            "bought {} for {}, {} left",
                            VARIANTS[index].id,
                            price,
                            self.progression.profile().currency
                        );
                        report.sounds.push(SoundEffect::Purchase);
                    }
                    ShopOutcome::Selected { index } => {
                        self.world.player.variant = VARIANTS[index].id.to_string();
                        log::info!("selected variant {}", VARIANTS[index].id);
                        self.set_mode(Mode::Menu, report);
                    }
                    ShopOutcome::Unaffordable { index, price } => {
                        log::debug!(
                            "cannot afford {} ({} < {})",
                            VARIANTS[index].id,
                            self.progression.profile().currency,
                            price
                        );
                        report.sounds.push(SoundEffect::Denied);
                    }
                    ShopOutcome::Unknown => {}
                }
            }
            Control::Back => self.set_mode(Mode::Menu, report),
            Control::OpenShop => {}
        }
    }
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();

    match state.mode {
        Mode::Menu => state.tick_menu(input, &mut report),
        Mode::Session => state.tick_session(input, &mut report),
        Mode::PostDeath { .. } => state.tick_post_death(&mut report),
        Mode::Shop => state.tick_shop(input, &mut report),
    }

    state.hovered = input.pointer.and_then(|p| ui::hit_test(&state.mode, p));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::aabb::Aabb;
    use crate::sim::state::{BonusItem, Entity, EntityKind, TimeOfDay};

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    fn click(control: Control) -> TickInput {
        TickInput {
            click: Some(control.rect().center()),
            ..Default::default()
        }
    }

    fn game_with(profile: PlayerProfile) -> GameState {
        GameState::new(12345, profile, Tuning::default())
    }

    fn fresh_game() -> GameState {
        game_with(PlayerProfile::default())
    }

    fn in_session() -> GameState {
        let mut state = fresh_game();
        tick(&mut state, &jump());
        assert_eq!(state.mode, Mode::Session);
        state
    }

    #[test]
    fn test_jump_starts_session() {
        let mut state = fresh_game();
        assert_eq!(state.mode, Mode::Menu);
        assert!(state.world.registry.pairs().is_empty());

        let report = tick(&mut state, &jump());
        assert_eq!(state.mode, Mode::Session);
        assert_eq!(report.transition, Some(("menu", "session")));
        assert_eq!(state.progression.session_score(), 0);
        assert_eq!(state.world.player.y(), PLAYER_START_Y);
        assert_eq!(state.world.player.velocity, 0.0);

        let pairs = state.world.registry.pairs();
        assert_eq!(pairs.len(), state.tuning.prespawn_count as usize);
        assert!(pairs.iter().all(|p| p.x() > PLAYER_X && !p.passed));
    }

    #[test]
    fn test_unowned_selection_falls_back_for_player() {
        let state = game_with(PlayerProfile {
            selected_variant: "red".into(),
            owned_variants: vec![true],
            ..Default::default()
        });
        assert_eq!(state.progression.selected_variant(), "yellow");
        assert_eq!(state.world.player.variant, "yellow");
    }

    #[test]
    fn test_menu_ignores_clicks_off_controls() {
        let mut state = fresh_game();
        let input = TickInput {
            click: Some(Vec2::new(3.0, 3.0)),
            ..Default::default()
        };
        let report = tick(&mut state, &input);
        assert_eq!(state.mode, Mode::Menu);
        assert!(report.transition.is_none());
    }

    #[test]
    fn test_skin_applied_to_everything() {
        let mut state = fresh_game();
        let mut seen_day = false;
        let mut seen_night = false;
        for _ in 0..40 {
            tick(&mut state, &jump());
            let tod = state.world.time_of_day;
            seen_day |= tod == TimeOfDay::Day;
            seen_night |= tod == TimeOfDay::Night;
            assert!(state.world.backdrop.tiles.iter().all(|t| t.skin == tod));
            assert!(
                state
                    .world
                    .registry
                    .pairs()
                    .iter()
                    .all(|p| p.upper.skin == tod && p.lower.skin == tod)
            );
            // Die and come back to the menu
            state.world.player.bounds.pos.y = GROUND_Y;
            tick(&mut state, &TickInput::default());
            tick(&mut state, &TickInput::default());
            assert_eq!(state.mode, Mode::Menu);
        }
        assert!(seen_day && seen_night);
    }

    #[test]
    fn test_falling_player_dies_on_ground() {
        let mut state = in_session();
        let mut died_at = None;
        for t in 0..200 {
            let report = tick(&mut state, &TickInput::default());
            if report.events.contains(&GameEvent::PlayerDied) {
                died_at = Some(t);
                break;
            }
        }
        assert!(died_at.is_some());
        assert!(matches!(state.mode, Mode::PostDeath { .. }));
    }

    #[test]
    fn test_ground_death_updates_high_score() {
        let mut state = game_with(PlayerProfile {
            high_score: 5,
            ..Default::default()
        });
        tick(&mut state, &jump());
        for _ in 0..7 {
            state.progression.record_pass();
        }
        state.world.player.bounds.pos.y = GROUND_Y;

        let report = tick(&mut state, &TickInput::default());
        assert_eq!(report.events, vec![GameEvent::PlayerDied]);
        assert!(report.sounds.contains(&SoundEffect::Hit));
        match state.mode {
            Mode::PostDeath { summary } => {
                assert_eq!(summary.score, 7);
                assert!(summary.new_high_score);
            }
            other => panic!("expected post-death, got {other:?}"),
        }
        assert_eq!(state.progression.profile().high_score, 7);
        assert_eq!(state.progression.session_score(), 0);
    }

    #[test]
    fn test_post_death_holds_then_resets() {
        let mut state = in_session();
        state.world.player.bounds.pos.y = GROUND_Y;
        tick(&mut state, &TickInput::default());

        // Input during post-death is ignored
        let report = tick(&mut state, &jump());
        assert_eq!(report.hold, Some(Duration::from_millis(state.tuning.death_pause_ms)));
        assert_eq!(state.mode, Mode::Menu);
        assert!(state.world.registry.is_empty());
        assert_eq!(state.world.player.y(), PLAYER_START_Y);

        // Next session reports death again
        tick(&mut state, &jump());
        state.world.player.bounds.pos.y = GROUND_Y;
        let report = tick(&mut state, &TickInput::default());
        assert_eq!(report.events, vec![GameEvent::PlayerDied]);
    }

    #[test]
    fn test_pass_scores_and_replenishes() {
        let mut state = fresh_game();
        state.tuning.bonus_chance = 0.0;
        tick(&mut state, &jump());

        let first_id = state.world.registry.pairs()[0].id;
        let rightmost = state.world.registry.rightmost_x().unwrap();
        let lower_top = {
            let pair = &mut state.world.registry.pairs_mut()[0];
            for m in pair.members_mut() {
                m.bounds.pos.x = PLAYER_X + 1.0;
            }
            pair.lower.bounds.top()
        };
        // Hover in the middle of the gap
        state.world.player.bounds.pos.y = lower_top - 50.0 - PLAYER_HEIGHT / 2.0;

        let report = tick(&mut state, &TickInput::default());
        assert_eq!(report.events, vec![GameEvent::ObstaclePassed { pair_id: first_id }]);
        assert_eq!(state.mode, Mode::Session);
        assert_eq!(state.progression.session_score(), 1);
        assert!(report.sounds.contains(&SoundEffect::Point));

        let pairs = state.world.registry.pairs();
        assert_eq!(pairs.len(), state.tuning.prespawn_count as usize + 1);
        let speed = state.tuning.scroll_speed;
        assert_eq!(
            state.world.registry.rightmost_x(),
            Some(rightmost - speed + state.tuning.obstacle_spacing)
        );

        // Never twice
        let report = tick(&mut state, &TickInput::default());
        assert!(report.events.is_empty());
        assert_eq!(state.progression.session_score(), 1);
    }

    #[test]
    fn test_bonus_adds_currency() {
        let mut state = in_session();
        let id = state.world.registry.next_entity_id();
        let center = state.world.player.bounds.center();
        state.world.registry.insert_bonus(BonusItem {
            entity: Entity::new(
                id,
                EntityKind::Bonus,
                Aabb::centered(center, Vec2::splat(BONUS_SIZE)),
            ),
            pair_id: 0,
            collected: false,
        });

        let report = tick(&mut state, &TickInput::default());
        assert!(report.events.contains(&GameEvent::BonusCollected { bonus_id: id }));
        assert_eq!(state.progression.profile().currency, 1);
        assert!(report.sounds.contains(&SoundEffect::Coin));
    }

    #[test]
    fn test_jump_in_session() {
        let mut state = in_session();
        let y = state.world.player.y();
        let report = tick(&mut state, &jump());
        assert_eq!(report.sounds, vec![SoundEffect::Flap]);
        assert_eq!(
            state.world.player.velocity,
            state.tuning.jump_impulse - state.tuning.gravity
        );
        assert!(state.world.player.y() < y);
    }

    #[test]
    fn test_shop_purchase_affordable() {
        let mut state = game_with(PlayerProfile {
            currency: 300,
            ..Default::default()
        });
        tick(&mut state, &click(Control::OpenShop));
        assert_eq!(state.mode, Mode::Shop);

        let report = tick(&mut state, &click(Control::VariantSlot(1)));
        assert_eq!(state.mode, Mode::Shop);
        assert_eq!(report.sounds, vec![SoundEffect::Purchase]);
        let profile = state.progression.profile();
        assert_eq!(profile.currency, 50);
        assert!(profile.owns(1));
    }

    #[test]
    fn test_shop_purchase_unaffordable() {
        let mut state = game_with(PlayerProfile {
            currency: 100,
            ..Default::default()
        });
        tick(&mut state, &click(Control::OpenShop));
        let before = state.progression.profile().clone();

        let report = tick(&mut state, &click(Control::VariantSlot(1)));
        assert_eq!(state.mode, Mode::Shop);
        assert_eq!(state.progression.profile(), &before);
        assert_eq!(report.sounds, vec![SoundEffect::Denied]);
    }

    #[test]
    fn test_shop_select_owned_returns_to_menu() {
        let mut state = game_with(PlayerProfile {
            owned_variants: vec![true, false, true],
            ..Default::default()
        });
        tick(&mut state, &click(Control::OpenShop));
        tick(&mut state, &click(Control::VariantSlot(2)));
        assert_eq!(state.mode, Mode::Menu);
        assert_eq!(state.progression.selected_variant(), "red");
        assert_eq!(state.world.player.variant, "red");
    }

    #[test]
    fn test_shop_back_and_idle() {
        let mut state = fresh_game();
        tick(&mut state, &click(Control::OpenShop));
        // Jump and stray clicks do nothing in the shop
        tick(&mut state, &jump());
        tick(
            &mut state,
            &TickInput {
                click: Some(Vec2::new(1.0, 1.0)),
                ..Default::default()
            },
        );
        assert_eq!(state.mode, Mode::Shop);
        tick(&mut state, &click(Control::Back));
        assert_eq!(state.mode, Mode::Menu);
    }

    #[test]
    fn test_hover_tracks_pointer() {
        let mut state = fresh_game();
        let input = TickInput {
            pointer: Some(Control::OpenShop.rect().center()),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.hovered, Some(Control::OpenShop));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.hovered, None);
    }

    #[test]
    fn test_determinism() {
        let mut a = fresh_game();
        let mut b = fresh_game();
        let inputs = [jump(), TickInput::default(), jump(), TickInput::default()];
        for _ in 0..30 {
            for input in &inputs {
                assert_eq!(tick(&mut a, input), tick(&mut b, input));
            }
        }
        assert_eq!(a.world.player, b.world.player);
        assert_eq!(a.world.registry.pairs(), b.world.registry.pairs());
    }
}
