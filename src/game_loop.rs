//! Game loop and time advancement.
//!
//! `Simulation` owns one play session: the player, the enemy set, the
//! camera, and the periodic timers. The host calls [`Simulation::step`]
//! once per frame with the elapsed seconds and that frame's input, then
//! acts on the returned events (spawn requests, saves, UI notifications).

use glam::Vec2;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::balance::BalanceData;
use crate::camera::Camera;
use crate::components::EnemyId;
use crate::config::SimConfig;
use crate::constants::{
    DEFAULT_ENEMY_TYPE, ENEMY_HALF_EXTENT, INITIAL_SPAWN_MAX_DISTANCE, INITIAL_SPAWN_MIN_DISTANCE,
};
use crate::error::{GameError, GameResult};
use crate::events::{EventQueue, GameEvent};
use crate::input::InputSnapshot;
use crate::player::{Player, PlayerSnapshot};
use crate::spawning;
use crate::systems::{self, PlayerAttackResult};
use crate::time_system::{self, GameClock, SimTimers};
use crate::world::GameWorld;

pub struct Simulation {
    pub config: SimConfig,
    data: BalanceData,
    pub player: Player,
    pub world: GameWorld,
    pub camera: Camera,
    pub clock: GameClock,
    timers: SimTimers,
    events: EventQueue,
    rng: StdRng,
}

impl Simulation {
    /// Start a session from a persisted snapshot.
    ///
    /// Fails when the snapshot's class is not in the dataset; there is no
    /// sensible player to build in that case.
    pub fn new(snapshot: PlayerSnapshot, data: BalanceData, config: SimConfig) -> GameResult<Self> {
        let player = Player::from_snapshot(snapshot, &data)?;
        let world = GameWorld::new(config.world_width, config.world_height);
        let mut camera = Camera::new(config.viewport_width, config.viewport_height, config.camera_smoothing);
        camera.snap_to(player.position, world.size());

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            "session started: {} the level {} {}",
            player.name, player.level, player.class_tag
        );

        Ok(Self {
            timers: SimTimers::new(config.enemy_spawn_interval, config.autosave_interval),
            config,
            data,
            player,
            world,
            camera,
            clock: GameClock::new(),
            events: EventQueue::new(),
            rng,
        })
    }

    /// Scatter the opening enemies evenly by angle around the player.
    /// Returns how many were created.
    pub fn populate_initial_enemies(&mut self) -> usize {
        let positions = spawning::initial_ring_positions(
            self.player.position,
            self.config.initial_enemy_count,
            INITIAL_SPAWN_MIN_DISTANCE,
            INITIAL_SPAWN_MAX_DISTANCE,
            &mut self.rng,
        );

        let mut created = 0;
        for position in positions {
            let enemy_type = self.data.pick_enemy_type(self.player.level, &mut self.rng);
            let position = self.world.clamp_to_bounds(position, ENEMY_HALF_EXTENT);
            if self.spawn_enemy(&enemy_type, position).is_some() {
                created += 1;
            }
        }
        debug!("populated {} initial enemies", created);
        created
    }

    /// Advance the session by `dt` seconds.
    ///
    /// Order within a tick:
    /// 1. Player movement, cooldown, and a requested attack
    /// 2. Defeated enemies removed and experience granted
    /// 3. Every enemy runs its AI (in spawn order), then moves
    /// 4. Camera follows the player
    /// 5. Spawn and autosave timers
    ///
    /// A negative or non-finite `dt` is logged and the tick is skipped;
    /// overly long frames are clamped to `max_tick_seconds`.
    pub fn step(&mut self, dt: f32, input: &InputSnapshot) -> Vec<GameEvent> {
        puffin::profile_function!();

        let dt = match time_system::validate_tick(dt, self.config.max_tick_seconds) {
            Ok(dt) => dt,
            Err(e) => {
                warn!("{}; tick skipped", e);
                return Vec::new();
            }
        };
        self.clock.advance(dt);

        {
            puffin::profile_scope!("player");
            systems::move_player(&mut self.player, input, &self.world, dt);
            if input.attack_pressed {
                let result = systems::player_attack(
                    &mut self.world,
                    &mut self.player,
                    &self.data,
                    input,
                    &mut self.rng,
                    &mut self.events,
                );
                if result == PlayerAttackResult::NoTarget {
                    debug!("attack pressed with nothing in reach");
                }
            }
            systems::remove_dead_enemies(&mut self.world, &mut self.player, &self.data, &mut self.events);
        }

        {
            puffin::profile_scope!("enemies");
            systems::update_enemies(
                &mut self.world,
                &mut self.player,
                &self.data,
                &self.clock,
                self.config.respawn_point(),
                &mut self.rng,
                &mut self.events,
            );
            systems::integrate_enemies(&mut self.world, dt);
        }

        self.camera.update(self.player.position, self.world.size());

        {
            puffin::profile_scope!("timers");
            self.timers.tick(dt);
            if self.timers.enemy_spawn.is_due() && self.world.live_count() < self.config.max_live_enemies {
                self.timers.enemy_spawn.reset();
                self.request_spawn();
            }
            if self.timers.autosave.is_due() {
                self.timers.autosave.reset();
                self.request_save();
            }
        }

        self.drain_events()
    }

    /// Create an enemy of `type_tag`, substituting the default archetype for
    /// unknown types. Returns `None` only when even the default is missing.
    pub fn spawn_enemy(&mut self, type_tag: &str, position: Vec2) -> Option<EnemyId> {
        match self.world.spawn_enemy(&self.data, type_tag, position) {
            Ok(id) => Some(id),
            Err(GameError::UnknownEnemyType(tag)) => {
                warn!("unknown enemy type '{}', spawning {} instead", tag, DEFAULT_ENEMY_TYPE);
                match self.world.spawn_enemy(&self.data, DEFAULT_ENEMY_TYPE, position) {
                    Ok(id) => Some(id),
                    Err(e) => {
                        warn!("default enemy unavailable: {}", e);
                        None
                    }
                }
            }
            Err(e) => {
                warn!("enemy spawn failed: {}", e);
                None
            }
        }
    }

    /// Fulfil every spawn request in `events`. Returns the created enemies.
    pub fn apply_spawn_requests(&mut self, events: &[GameEvent]) -> Vec<EnemyId> {
        let mut created = Vec::new();
        for event in events {
            if let GameEvent::SpawnEnemyRequested { position, enemy_type } = event {
                let position = self.world.clamp_to_bounds(*position, ENEMY_HALF_EXTENT);
                created.extend(self.spawn_enemy(enemy_type, position));
            }
        }
        created
    }

    /// Queue a save of the current player state.
    pub fn request_save(&mut self) {
        info!("save requested at t={:.1}s", self.clock.time);
        self.events.push(GameEvent::SaveRequested(self.player.to_snapshot()));
    }

    /// End the session, returning the final save request with anything
    /// still queued.
    pub fn shutdown(&mut self) -> Vec<GameEvent> {
        info!("session ending at t={:.1}s", self.clock.time);
        self.request_save();
        self.drain_events()
    }

    /// The balance dataset; fixed for the whole session
    pub fn data(&self) -> &BalanceData {
        &self.data
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    pub fn experience_progress(&self) -> f32 {
        systems::experience_progress(&self.player, &self.data)
    }

    fn request_spawn(&mut self) {
        let position = spawning::random_spawn_position(
            self.player.position,
            self.config.spawn_min_distance,
            self.config.spawn_max_distance,
            self.world.size(),
            ENEMY_HALF_EXTENT,
            &mut self.rng,
        );
        let enemy_type = self.data.pick_enemy_type(self.player.level, &mut self.rng);
        debug!("requesting {} at ({:.0}, {:.0})", enemy_type, position.x, position.y);
        self.events.push(GameEvent::SpawnEnemyRequested { position, enemy_type });
    }
}
