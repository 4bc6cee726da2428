//! Game balance dataset and the pure derivations built on it.
//!
//! Classes, enemy archetypes, skills, and items are loaded from JSON and
//! never mutated during a session. The experience table is derived once at
//! load time from the progression parameters.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::StatBlock;
use crate::constants::*;
use crate::error::{GameError, GameResult};

/// Dataset shipped with the crate
const EMBEDDED_BALANCE: &str = include_str!("../data/balance.json");

/// A player class: base stats, growth per level, and unlockable skills
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub primary_stat: String,
    pub base_stats: StatBlock,
    pub stat_growth: StatBlock,
    #[serde(default = "default_player_attack_interval")]
    pub attack_interval: f32,
    #[serde(default)]
    pub skills: Vec<SkillDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    pub damage: u32,
    pub cost: u32,
    pub cooldown: f32,
    /// Character level at which the skill unlocks
    pub level: u32,
    #[serde(default)]
    pub effect: Option<String>,
}

/// Definition of an enemy type - all the data needed to spawn one
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyDef {
    pub name: String,
    pub level: u32,
    pub stats: StatBlock,
    #[serde(default = "default_aggro_range")]
    pub aggro_range: f32,
    #[serde(default = "default_attack_range")]
    pub attack_range: f32,
    #[serde(default = "default_enemy_attack_interval")]
    pub attack_interval: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDef {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub stats: StatBlock,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub effect: Option<ConsumableEffect>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsumableEffect {
    pub heal: u32,
    pub restore_mp: u32,
}

/// Experience curve parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
    pub max_level: u32,
    /// Experience needed to go from level 0 to level 1
    pub first_level_exp: u64,
    /// Per-level multiplier applied to `first_level_exp` for later levels
    pub exp_growth: f64,
    #[serde(default = "default_exp_per_enemy_level")]
    pub exp_per_enemy_level: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatTuning {
    #[serde(default = "default_player_variance")]
    pub player_damage_variance: f32,
    #[serde(default = "default_enemy_variance")]
    pub enemy_damage_variance: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            player_damage_variance: PLAYER_DAMAGE_VARIANCE,
            enemy_damage_variance: ENEMY_DAMAGE_VARIANCE,
        }
    }
}

fn default_player_attack_interval() -> f32 {
    PLAYER_ATTACK_INTERVAL
}
fn default_aggro_range() -> f32 {
    DEFAULT_AGGRO_RANGE
}
fn default_attack_range() -> f32 {
    DEFAULT_ATTACK_RANGE
}
fn default_enemy_attack_interval() -> f32 {
    ENEMY_ATTACK_INTERVAL
}
fn default_exp_per_enemy_level() -> u64 {
    EXP_PER_ENEMY_LEVEL
}
fn default_player_variance() -> f32 {
    PLAYER_DAMAGE_VARIANCE
}
fn default_enemy_variance() -> f32 {
    ENEMY_DAMAGE_VARIANCE
}

/// The full read-only balance dataset
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceData {
    pub classes: BTreeMap<String, ClassDef>,
    pub enemies: BTreeMap<String, EnemyDef>,
    #[serde(default)]
    pub items: BTreeMap<String, ItemDef>,
    pub progression: Progression,
    #[serde(default)]
    pub combat: CombatTuning,
    /// Cumulative experience to reach each level, indexed 0..=max_level
    #[serde(skip)]
    experience_table: Vec<u64>,
}

impl BalanceData {
    /// The dataset compiled into the crate.
    pub fn embedded() -> GameResult<Self> {
        Self::from_json_str(EMBEDDED_BALANCE)
    }

    pub fn from_json_str(json: &str) -> GameResult<Self> {
        let mut data: BalanceData = serde_json::from_str(json).map_err(|source| GameError::Parse {
            what: "balance dataset",
            source,
        })?;
        data.experience_table = build_experience_table(&data.progression);
        Ok(data)
    }

    pub fn load(path: &Path) -> GameResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn max_level(&self) -> u32 {
        self.progression.max_level
    }

    pub fn class(&self, class_tag: &str) -> GameResult<&ClassDef> {
        self.classes
            .get(class_tag)
            .ok_or_else(|| GameError::UnknownClass(class_tag.to_string()))
    }

    pub fn enemy(&self, type_tag: &str) -> GameResult<&EnemyDef> {
        self.enemies
            .get(type_tag)
            .ok_or_else(|| GameError::UnknownEnemyType(type_tag.to_string()))
    }

    /// Stats of `class_tag` at `level`: `base + growth * (level - 1)`.
    pub fn stats_at_level(&self, class_tag: &str, level: u32) -> GameResult<StatBlock> {
        let class = self.class(class_tag)?;
        Ok(StatBlock::grown(&class.base_stats, &class.stat_growth, level))
    }

    /// Cumulative experience required to reach `level`.
    /// Levels past the cap return the cap's threshold.
    pub fn experience_threshold(&self, level: u32) -> u64 {
        let idx = level.min(self.max_level()) as usize;
        self.experience_table.get(idx).copied().unwrap_or(0)
    }

    /// Highest level whose threshold is at most `total_exp`, capped at max level.
    pub fn level_for_experience(&self, total_exp: u64) -> u32 {
        let reached = self.experience_table.partition_point(|&t| t <= total_exp);
        // Threshold 0 is always reached, so `reached >= 1`
        let level = reached.saturating_sub(1) as u32;
        level.min(self.max_level())
    }

    /// Fraction of the way from `level` to `level + 1`, in [0, 1].
    pub fn experience_progress(&self, total_exp: u64, level: u32) -> f32 {
        if level >= self.max_level() {
            return 1.0;
        }
        let current = self.experience_threshold(level);
        let next = self.experience_threshold(level + 1);
        if next <= current {
            return 1.0;
        }
        let progress = total_exp.saturating_sub(current) as f64 / (next - current) as f64;
        progress.clamp(0.0, 1.0) as f32
    }

    /// Skills of `class_tag` unlocked at or below `level`.
    pub fn available_skills(&self, class_tag: &str, level: u32) -> GameResult<Vec<&SkillDef>> {
        let class = self.class(class_tag)?;
        Ok(class.skills.iter().filter(|s| s.level <= level).collect())
    }

    /// Experience granted for defeating an enemy of `enemy_level`.
    pub fn experience_reward(&self, enemy_level: u32) -> u64 {
        u64::from(enemy_level) * self.progression.exp_per_enemy_level
    }

    /// Random archetype suited to `player_level`, falling back to the default type.
    pub fn pick_enemy_type(&self, player_level: u32, rng: &mut impl Rng) -> String {
        let min = player_level.saturating_sub(SPAWN_LEVEL_BELOW);
        let max = player_level.saturating_add(SPAWN_LEVEL_ABOVE);
        let suitable: Vec<&String> = self
            .enemies
            .iter()
            .filter(|(_, def)| def.level >= min && def.level <= max)
            .map(|(tag, _)| tag)
            .collect();

        suitable
            .choose(rng)
            .map(|tag| (*tag).clone())
            .unwrap_or_else(|| DEFAULT_ENEMY_TYPE.to_string())
    }
}

/// `t(0) = 0`, `t(1) = first`, `t(L) = t(L-1) + floor(first * growth^(L-1))`.
fn build_experience_table(progression: &Progression) -> Vec<u64> {
    let max = progression.max_level as usize;
    let mut table = Vec::with_capacity(max + 1);
    table.push(0u64);
    for level in 1..=max {
        let step = if level == 1 {
            progression.first_level_exp
        } else {
            let scaled = progression.first_level_exp as f64
                * progression.exp_growth.powi(level as i32 - 1);
            // At least one point per level so the table stays strictly increasing
            (scaled.floor() as u64).max(1)
        };
        let prev = table[level - 1];
        table.push(prev.saturating_add(step));
    }
    table
}

/// Randomized damage: `max(1, floor((attack - defense) * factor))`,
/// `factor` uniform in `[1 - variance, 1 + variance]`.
pub fn damage(attack: u32, defense: u32, variance: f32, rng: &mut impl Rng) -> u32 {
    let variance = if variance.is_finite() {
        variance.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let factor: f32 = rng.gen_range((1.0 - variance)..=(1.0 + variance));
    let raw = (attack as f32 - defense as f32) * factor;
    if raw < 1.0 {
        1
    } else {
        raw.floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn data() -> BalanceData {
        BalanceData::embedded().unwrap()
    }

    #[test]
    fn test_embedded_dataset_loads() {
        let data = data();
        assert_eq!(data.classes.len(), 3);
        assert!(data.enemies.contains_key(DEFAULT_ENEMY_TYPE));
        assert_eq!(data.max_level(), 99);
        assert_eq!(data.items["healthPotion"].effect.unwrap().heal, 50);
    }

    #[test]
    fn test_stats_at_level() {
        let data = data();
        let lvl1 = data.stats_at_level("swordsman", 1).unwrap();
        assert_eq!(lvl1.hp, 180);
        assert_eq!(lvl1.attack, 25);
        let lvl5 = data.stats_at_level("swordsman", 5).unwrap();
        assert_eq!(lvl5.hp, 180 + 12 * 4);
        assert_eq!(lvl5.defense, 20 + 2 * 4);
    }

    #[test]
    fn test_stats_at_level_unknown_class() {
        let err = data().stats_at_level("necromancer", 3).unwrap_err();
        assert!(matches!(err, GameError::UnknownClass(ref c) if c == "necromancer"));
    }

    #[test]
    fn test_experience_table_shape() {
        let data = data();
        assert_eq!(data.experience_threshold(0), 0);
        assert_eq!(data.experience_threshold(1), 100);
        assert_eq!(data.experience_threshold(2), 100 + 112);
        assert_eq!(data.experience_threshold(3), 100 + 112 + 125);
        for level in 1..=data.max_level() {
            assert!(data.experience_threshold(level) > data.experience_threshold(level - 1));
        }
    }

    #[test]
    fn test_experience_threshold_clamps_past_max() {
        let data = data();
        let cap = data.experience_threshold(99);
        assert_eq!(data.experience_threshold(100), cap);
        assert_eq!(data.experience_threshold(u32::MAX), cap);
    }

    #[test]
    fn test_level_for_experience_boundaries() {
        let data = data();
        assert_eq!(data.level_for_experience(0), 0);
        assert_eq!(data.level_for_experience(99), 0);
        assert_eq!(data.level_for_experience(100), 1);
        assert_eq!(data.level_for_experience(211), 1);
        assert_eq!(data.level_for_experience(212), 2);
        assert_eq!(data.level_for_experience(u64::MAX), 99);
    }

    #[test]
    fn test_level_round_trip_at_thresholds() {
        let data = data();
        for level in 0..=data.max_level() {
            assert_eq!(data.level_for_experience(data.experience_threshold(level)), level);
        }
    }

    #[test]
    fn test_experience_progress() {
        let data = data();
        assert_eq!(data.experience_progress(100, 1), 0.0);
        let halfway = 100 + 56;
        assert!((data.experience_progress(halfway, 1) - 0.5).abs() < 1e-6);
        assert_eq!(data.experience_progress(10_000, 1), 1.0);
        assert_eq!(data.experience_progress(0, 99), 1.0);
    }

    #[test]
    fn test_available_skills() {
        let data = data();
        let skills = data.available_skills("mage", 5).unwrap();
        let ids: Vec<&str> = skills.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["q", "w"]);
        assert_eq!(data.available_skills("mage", 20).unwrap().len(), 4);
        assert!(data.available_skills("bard", 1).is_err());
    }

    #[test]
    fn test_damage_never_below_one() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(damage(5, 500, 0.3, &mut rng), 1);
            assert_eq!(damage(10, 10, 0.3, &mut rng), 1);
        }
    }

    #[test]
    fn test_damage_variance_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let dealt = damage(100, 20, 0.3, &mut rng);
            assert!((55..=104).contains(&dealt), "damage {} out of range", dealt);
        }
        assert_eq!(damage(30, 10, 0.0, &mut rng), 20);
    }

    #[test]
    fn test_pick_enemy_type_by_level() {
        let data = data();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let tag = data.pick_enemy_type(10, &mut rng);
            let level = data.enemy(&tag).unwrap().level;
            assert!((8..=13).contains(&level), "{} has level {}", tag, level);
        }
        // Nothing lives near level 60
        assert_eq!(data.pick_enemy_type(60, &mut rng), DEFAULT_ENEMY_TYPE);
    }

    #[test]
    fn test_enemy_defaults_fill_ranges() {
        let data = data();
        let slime = data.enemy("greenSlime").unwrap();
        assert_eq!(slime.aggro_range, DEFAULT_AGGRO_RANGE);
        assert_eq!(slime.attack_range, DEFAULT_ATTACK_RANGE);
        assert_eq!(slime.attack_interval, ENEMY_ATTACK_INTERVAL);
        assert_eq!(data.enemy("orc").unwrap().attack_range, 36.0);
        assert!(matches!(data.enemy("dragon"), Err(GameError::UnknownEnemyType(_))));
    }

    #[test]
    fn test_experience_reward() {
        assert_eq!(data().experience_reward(5), 50);
    }
}
