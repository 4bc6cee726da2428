//! Game event system for decoupled communication between the simulation
//! and its collaborators.
//!
//! The simulation emits events during a tick; UI, persistence, and world
//! population drain them afterwards. Nothing here blocks the simulation.

use glam::Vec2;

use crate::components::{AIState, EnemyId};
use crate::player::PlayerSnapshot;

/// Who landed or received a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combatant {
    Player,
    Enemy(EnemyId),
}

/// Game events that collaborators can subscribe to
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// World population should create an enemy of `enemy_type` at `position`
    SpawnEnemyRequested {
        position: Vec2,
        enemy_type: String,
    },
    /// Persistence should store this snapshot
    SaveRequested(PlayerSnapshot),
    /// Player reached a new level
    PlayerLeveledUp {
        new_level: u32,
    },
    /// Player HP dropped to zero; the player has already been respawned
    PlayerDefeated,
    /// Enemy was removed from the world
    EnemyDefeated {
        enemy: EnemyId,
        exp_reward: u64,
    },
    /// An attack resolved
    AttackHit {
        attacker: Combatant,
        target: Combatant,
        damage: u32,
    },
    /// An enemy's AI switched state
    AIStateChanged {
        enemy: EnemyId,
        new_state: AIState,
    },
}

/// Simple event queue - events are pushed during update, drained at end of frame
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Pending events, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }
}
