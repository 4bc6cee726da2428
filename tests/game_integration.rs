//! End-to-end session scenarios driven through `Simulation::step`.

#![allow(clippy::unwrap_used)]

use drakoria::components::{AIState, EnemyId, Health, StatBlock};
use drakoria::events::Combatant;
use drakoria::{BalanceData, GameEvent, InputSnapshot, PlayerSnapshot, SimConfig, Simulation};
use glam::Vec2;

const FRAME: f32 = 1.0 / 60.0;

fn session(class: &str, config: SimConfig) -> Simulation {
    session_with_data(class, config, BalanceData::embedded().unwrap())
}

fn session_with_data(class: &str, config: SimConfig, data: BalanceData) -> Simulation {
    let snap = PlayerSnapshot::new_character("Tester", class, &data).unwrap();
    let config = SimConfig {
        seed: Some(7),
        ..config
    };
    Simulation::new(snap, data, config).unwrap()
}

fn set_enemy_hp(sim: &mut Simulation, id: EnemyId, hp: i32) {
    let entity = sim.world.find(id).unwrap();
    sim.world.ecs.get::<&mut Health>(entity).unwrap().current = hp;
}

fn enemy_hits(events: &[GameEvent]) -> Vec<(EnemyId, u32)> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::AttackHit {
                attacker: Combatant::Enemy(id),
                target: Combatant::Player,
                damage,
            } => Some((*id, *damage)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_enemy_chases_then_attacks() {
    let mut sim = session("mage", SimConfig::default());
    let id = sim.spawn_enemy("redSlime", Vec2::new(500.0, 300.0)).unwrap();

    let events = sim.step(FRAME, &InputSnapshot::idle());
    assert_eq!(sim.world.view(id).unwrap().state, AIState::Chasing);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::AIStateChanged { enemy, new_state: AIState::Chasing } if *enemy == id
    )));

    let mut reached = false;
    for _ in 0..300 {
        sim.step(FRAME, &InputSnapshot::idle());
        if sim.world.view(id).unwrap().state == AIState::Attacking {
            reached = true;
            break;
        }
    }
    assert!(reached, "enemy never reached attack range");
    let view = sim.world.view(id).unwrap();
    assert!(view.position.distance(sim.player.position) <= 32.0);

    let hp_before = sim.player.current_hp;
    let mut hit = None;
    for _ in 0..10 {
        let hits = enemy_hits(&sim.step(FRAME, &InputSnapshot::idle()));
        if let Some(first) = hits.first() {
            hit = Some(*first);
            break;
        }
    }
    let (attacker, damage) = hit.expect("enemy never attacked");
    assert_eq!(attacker, id);
    // (18 - 8) scaled by [0.7, 1.3]
    assert!((6..=13).contains(&damage), "damage {}", damage);
    assert_eq!(sim.player.current_hp, hp_before - damage as i32);
}

#[test]
fn test_two_enemies_strike_in_spawn_order() {
    let mut sim = session("mage", SimConfig::default());
    let a = sim.spawn_enemy("redSlime", Vec2::new(420.0, 300.0)).unwrap();
    let b = sim.spawn_enemy("redSlime", Vec2::new(380.0, 300.0)).unwrap();

    // First tick both switch to attacking, second tick both strike
    sim.step(FRAME, &InputSnapshot::idle());
    let hp_before = sim.player.current_hp;
    let hits = enemy_hits(&sim.step(FRAME, &InputSnapshot::idle()));

    let order: Vec<EnemyId> = hits.iter().map(|(id, _)| *id).collect();
    assert_eq!(order, vec![a, b]);
    let total: u32 = hits.iter().map(|(_, d)| *d).sum();
    assert_eq!(sim.player.current_hp, hp_before - total as i32);
}

#[test]
fn test_enemy_at_exactly_zero_hp_is_removed() {
    let mut data = BalanceData::embedded().unwrap();
    data.combat.player_damage_variance = 0.0;
    let mut sim = session_with_data("swordsman", SimConfig::default(), data);
    let id = sim.spawn_enemy("greenSlime", Vec2::new(430.0, 300.0)).unwrap();

    let entity = sim.world.find(id).unwrap();
    let defense = sim.world.ecs.get::<&StatBlock>(entity).unwrap().defense;
    let exact = (sim.player.stats.attack - defense) as i32;
    set_enemy_hp(&mut sim, id, exact);

    let events = sim.step(FRAME, &InputSnapshot::attacking());
    assert!(!sim.world.contains(id));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::EnemyDefeated { enemy, exp_reward: 10 } if *enemy == id
    )));
    assert_eq!(sim.player.experience, 10);
}

#[test]
fn test_kill_triggers_level_up() {
    let mut sim = session("swordsman", SimConfig::default());
    let threshold = sim.data().experience_threshold(5);
    sim.player.level = 4;
    sim.player.stats = sim.data().stats_at_level("swordsman", 4).unwrap();
    sim.player.experience = threshold - 10;
    sim.player.current_hp = 5;

    let id = sim.spawn_enemy("greenSlime", Vec2::new(420.0, 300.0)).unwrap();
    set_enemy_hp(&mut sim, id, 1);

    let events = sim.step(FRAME, &InputSnapshot::attacking());
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::PlayerLeveledUp { new_level: 5 })));
    let expected = sim.data().stats_at_level("swordsman", 5).unwrap();
    assert_eq!(sim.player.level, 5);
    assert_eq!(sim.player.experience, threshold);
    assert_eq!(sim.player.stats, expected);
    assert_eq!(sim.player.current_hp, expected.hp as i32);
}

#[test]
fn test_player_defeat_respawns() {
    let mut sim = session("mage", SimConfig::default());
    sim.player.position = Vec2::new(700.0, 700.0);
    sim.player.current_hp = 1;
    sim.spawn_enemy("orc", Vec2::new(710.0, 700.0)).unwrap();

    let mut defeated = false;
    for _ in 0..5 {
        let events = sim.step(FRAME, &InputSnapshot::idle());
        if events.iter().any(|e| matches!(e, GameEvent::PlayerDefeated)) {
            defeated = true;
            break;
        }
    }
    assert!(defeated);
    assert_eq!(sim.player.position, Vec2::new(400.0, 300.0));
    assert_eq!(sim.player.current_hp, 50);
}

#[test]
fn test_zero_elapsed_time_is_a_no_op() {
    let mut sim = session("archer", SimConfig::default());
    let events = sim.step(0.0, &InputSnapshot::moving(Vec2::new(1.0, 1.0)));
    assert!(events.is_empty());
    assert_eq!(sim.player.position, Vec2::new(400.0, 300.0));
}

#[test]
fn test_timers_request_spawns_and_saves() {
    let mut sim = session("archer", SimConfig::default());
    let mut spawns = 0;
    let mut saves = 0;
    // 30 seconds in quarter-second ticks
    for _ in 0..120 {
        for event in sim.step(0.25, &InputSnapshot::idle()) {
            match event {
                GameEvent::SpawnEnemyRequested { position, .. } => {
                    let dist = position.distance(sim.player.position);
                    assert!((299.0..=501.0).contains(&dist), "spawn distance {}", dist);
                    spawns += 1;
                }
                GameEvent::SaveRequested(snapshot) => {
                    assert_eq!(snapshot.class, "archer");
                    saves += 1;
                }
                _ => {}
            }
        }
    }
    assert_eq!(spawns, 3);
    assert_eq!(saves, 1);
}

#[test]
fn test_spawns_near_corner_stay_in_world_and_away() {
    let mut sim = session("swordsman", SimConfig::default());
    sim.player.position = Vec2::new(20.0, 20.0);

    let mut fulfilled = 0;
    for _ in 0..400 {
        let events = sim.step(0.25, &InputSnapshot::idle());
        for id in sim.apply_spawn_requests(&events) {
            let pos = sim.world.view(id).unwrap().position;
            assert!(pos.x >= 14.0 && pos.x <= 1586.0, "x {}", pos.x);
            assert!(pos.y >= 14.0 && pos.y <= 1186.0, "y {}", pos.y);
            let dist = pos.distance(sim.player.position);
            assert!(dist >= 299.9, "spawned {} px from the player", dist);
            fulfilled += 1;
        }
    }
    assert!(fulfilled >= 5, "only {} spawns", fulfilled);
}

#[test]
fn test_spawn_waits_for_room_under_cap() {
    let config = SimConfig {
        max_live_enemies: 1,
        ..SimConfig::default()
    };
    let mut sim = session("archer", config);
    let id = sim.spawn_enemy("greenSlime", Vec2::new(1500.0, 1100.0)).unwrap();

    for _ in 0..48 {
        let events = sim.step(0.25, &InputSnapshot::idle());
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::SpawnEnemyRequested { .. })));
    }

    assert!(sim.world.despawn_enemy(id));
    let events = sim.step(0.25, &InputSnapshot::idle());
    let requested = sim.apply_spawn_requests(&events);
    assert_eq!(requested.len(), 1);
    assert_eq!(sim.world.live_count(), 1);
}

#[test]
fn test_camera_follows_to_world_edge() {
    let mut sim = session("swordsman", SimConfig::default());
    for _ in 0..1200 {
        sim.step(FRAME, &InputSnapshot::moving(Vec2::new(1.0, 1.0)));
    }
    assert_eq!(sim.player.position, Vec2::new(1584.0, 1184.0));
    let (min, max) = sim.camera.visible_bounds();
    assert!((min - Vec2::new(800.0, 600.0)).length() < 0.5);
    assert!((max - Vec2::new(1600.0, 1200.0)).length() < 0.5);
}

#[test]
fn test_same_seed_same_session() {
    let run = || {
        let mut sim = session("swordsman", SimConfig::default());
        sim.populate_initial_enemies();
        for frame in 0..600 {
            let input = InputSnapshot {
                move_vector: Vec2::from_angle(frame as f32 * 0.02),
                attack_pressed: frame % 30 == 0,
                pointer_world_position: None,
            };
            let events = sim.step(FRAME, &input);
            sim.apply_spawn_requests(&events);
        }
        (sim.world.views(), sim.player.current_hp, sim.player.experience)
    };
    assert_eq!(run(), run());
}

#[test]
fn test_save_round_trip_restores_session() {
    let mut sim = session("mage", SimConfig::default());
    sim.step(0.5, &InputSnapshot::moving(Vec2::new(0.0, 1.0)));
    let events = sim.shutdown();
    let Some(GameEvent::SaveRequested(snapshot)) = events.last() else {
        panic!("no final save");
    };

    let json = serde_json::to_string(snapshot).unwrap();
    let restored: PlayerSnapshot = serde_json::from_str(&json).unwrap();
    let resumed = Simulation::new(restored, BalanceData::embedded().unwrap(), SimConfig::default()).unwrap();
    assert_eq!(resumed.player.position, sim.player.position);
    assert_eq!(resumed.player.level, 1);
}
