//! The live enemy set and the world's bounding box.

use glam::Vec2;
use hecs::{Entity, World};

use crate::balance::BalanceData;
use crate::components::{AIState, EnemyAI, EnemyId, EnemyKind, Health, Position};
use crate::error::GameResult;

/// Read-only view of one enemy, enough to draw it
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyView {
    pub id: EnemyId,
    pub type_tag: String,
    pub name: String,
    pub level: u32,
    pub position: Vec2,
    pub state: AIState,
    pub current_hp: i32,
    pub max_hp: i32,
}

/// Owns every live enemy. Enemies are never handed out by reference beyond
/// a single call.
pub struct GameWorld {
    /// Enemy entities; each carries an `EnemyId`
    pub ecs: World,
    pub width: f32,
    pub height: f32,
    next_enemy_id: u64,
}

impl GameWorld {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            ecs: World::new(),
            width,
            height,
            next_enemy_id: 1,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Keep a sprite with the given half extent fully inside the world.
    pub fn clamp_to_bounds(&self, position: Vec2, half_extent: f32) -> Vec2 {
        let clamp_axis = |v: f32, size: f32| {
            let lo = half_extent;
            let hi = (size - half_extent).max(lo);
            v.clamp(lo, hi)
        };
        Vec2::new(clamp_axis(position.x, self.width), clamp_axis(position.y, self.height))
    }

    /// Create an enemy of `type_tag` at `position`. Unknown types create nothing.
    pub fn spawn_enemy(
        &mut self,
        data: &BalanceData,
        type_tag: &str,
        position: Vec2,
    ) -> GameResult<EnemyId> {
        let def = data.enemy(type_tag)?;
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        def.spawn(&mut self.ecs, id, type_tag, position);
        Ok(id)
    }

    pub fn live_count(&self) -> usize {
        self.ecs.query::<&EnemyId>().iter().count()
    }

    pub fn contains(&self, id: EnemyId) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: EnemyId) -> Option<Entity> {
        self.ecs
            .query::<&EnemyId>()
            .iter()
            .find(|(_, eid)| **eid == id)
            .map(|(entity, _)| entity)
    }

    /// Every live enemy in spawn order. This is the fixed iteration order
    /// the simulation uses each tick.
    pub fn enemies_in_order(&self) -> Vec<(Entity, EnemyId)> {
        let mut enemies: Vec<(Entity, EnemyId)> = self
            .ecs
            .query::<&EnemyId>()
            .iter()
            .map(|(entity, id)| (entity, *id))
            .collect();
        enemies.sort_by_key(|(_, id)| *id);
        enemies
    }

    pub fn despawn_enemy(&mut self, id: EnemyId) -> bool {
        match self.find(id) {
            Some(entity) => self.ecs.despawn(entity).is_ok(),
            None => false,
        }
    }

    /// Nearest live enemy within `radius` of `point`. Ties go to the older enemy.
    pub fn nearest_enemy_within(&self, point: Vec2, radius: f32) -> Option<(Entity, EnemyId)> {
        let mut best: Option<(Entity, EnemyId, f32)> = None;
        for (entity, (id, pos)) in self.ecs.query::<(&EnemyId, &Position)>().iter() {
            let dist = pos.0.distance(point);
            if dist > radius {
                continue;
            }
            let better = match best {
                None => true,
                Some((_, best_id, best_dist)) => dist < best_dist || (dist == best_dist && *id < best_id),
            };
            if better {
                best = Some((entity, *id, dist));
            }
        }
        best.map(|(entity, id, _)| (entity, id))
    }

    pub fn view(&self, id: EnemyId) -> Option<EnemyView> {
        let entity = self.find(id)?;
        let mut query = self
            .ecs
            .query_one::<(&EnemyKind, &Position, &EnemyAI, &Health)>(entity)
            .ok()?;
        let (kind, pos, ai, health) = query.get()?;
        Some(EnemyView {
            id,
            type_tag: kind.type_tag.clone(),
            name: kind.name.clone(),
            level: kind.level,
            position: pos.0,
            state: ai.state,
            current_hp: health.current,
            max_hp: health.max,
        })
    }

    /// Views of every live enemy in spawn order
    pub fn views(&self) -> Vec<EnemyView> {
        self.enemies_in_order()
            .into_iter()
            .filter_map(|(_, id)| self.view(id))
            .collect()
    }
}
