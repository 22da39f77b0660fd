#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative director state for the horde wave director.
//!
//! The world owns everything the wave systems must agree on: the simulation
//! clock, the cached map profile, the monster population ledger, difficulty
//! toggles, and session parameters. It is mutated exclusively through
//! [`apply`] and inspected through the [`query`] module, so a game reset is a
//! single unconditional state clear and tests construct a fresh world per
//! scenario.

use std::collections::BTreeMap;

use horde_core::{
    catalog, BossId, Command, ConfigToggle, EntityId, Event, MapProfile, MonsterId, SimTime,
    SpawnError,
};

/// Monster or boss occupying a slot in the live population ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Spawned {
    Monster(MonsterId),
    Boss(BossId),
}

#[derive(Clone, Copy, Debug)]
struct BossStatus {
    boss: BossId,
    defeated: bool,
}

/// Represents the authoritative director state.
#[derive(Debug)]
pub struct World {
    clock: SimTime,
    profile: MapProfile,
    humans: u32,
    monster_override: Option<u32>,
    toggles: [i32; ConfigToggle::ALL.len()],
    next_entity: u32,
    live: BTreeMap<EntityId, Spawned>,
    corpses: Vec<EntityId>,
    bosses: BTreeMap<EntityId, BossStatus>,
    total_spawned: u32,
    total_killed: u32,
}

impl World {
    /// Creates a new director world with an unloaded medium map profile.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: SimTime::ZERO,
            profile: MapProfile::default(),
            humans: 0,
            monster_override: None,
            toggles: [0; ConfigToggle::ALL.len()],
            next_entity: 1,
            live: BTreeMap::new(),
            corpses: Vec::new(),
            bosses: BTreeMap::new(),
            total_spawned: 0,
            total_killed: 0,
        }
    }

    fn allocate_entity(&mut self) -> EntityId {
        let entity = EntityId::new(self.next_entity);
        self.next_entity += 1;
        entity
    }

    fn toggle_slot(toggle: ConfigToggle) -> usize {
        ConfigToggle::ALL
            .iter()
            .position(|candidate| *candidate == toggle)
            .unwrap_or(0)
    }

    fn toggle_value(&self, toggle: ConfigToggle) -> i32 {
        self.toggles[Self::toggle_slot(toggle)]
    }

    fn set_toggle(&mut self, toggle: ConfigToggle, value: i32, out_events: &mut Vec<Event>) {
        let slot = Self::toggle_slot(toggle);
        if self.toggles[slot] != value {
            self.toggles[slot] = value;
            out_events.push(Event::ToggleChanged { toggle, value });
        }
    }

    fn kill(&mut self, entity: EntityId, out_events: &mut Vec<Event>) {
        if let Some(status) = self.bosses.get_mut(&entity) {
            // Boss deaths are routed through the idempotency guard no matter
            // which hook delivered them.
            if status.defeated {
                return;
            }
            status.defeated = true;
            let boss = status.boss;
            let _ = self.live.remove(&entity);
            self.corpses.push(entity);
            self.total_killed += 1;
            out_events.push(Event::BossDefeated { entity, boss });
            return;
        }

        if self.live.remove(&entity).is_some() {
            self.corpses.push(entity);
            self.total_killed += 1;
            out_events.push(Event::MonsterDied { entity });
        } else {
            tracing::warn!(entity = entity.get(), "death recorded for unknown entity");
        }
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        for toggle in ConfigToggle::ALL {
            self.set_toggle(toggle, 0, out_events);
        }
        self.monster_override = None;
        self.live.clear();
        self.corpses.clear();
        self.bosses.clear();
        self.total_spawned = 0;
        self.total_killed = 0;
        out_events.push(Event::GameReset);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.clock = world.clock.advanced_by(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::LoadMap { map } => {
            world.profile = MapProfile::derive(&map);
            out_events.push(Event::MapLoaded {
                size: world.profile.size(),
            });
        }
        Command::ResetGame => {
            world.reset(out_events);
        }
        Command::SyncHumans { count } => {
            if world.humans != count {
                world.humans = count;
                out_events.push(Event::HumansChanged { count });
            }
        }
        Command::SetMonsterOverride { count } => {
            let next = (count > 0).then_some(count);
            if world.monster_override != next {
                world.monster_override = next;
                out_events.push(Event::MonsterOverrideChanged { count });
            }
        }
        Command::ForceWaveAdvance => {
            out_events.push(Event::WaveAdvanceForced);
        }
        Command::SpawnMonster {
            spawn_point,
            monster,
            health_scale,
            armor_scale,
            drop,
        } => {
            if catalog::monster(monster).is_none() {
                tracing::warn!(monster = monster.get(), "unknown monster catalog index");
                out_events.push(Event::SpawnRejected {
                    reason: SpawnError::UnknownMonster,
                });
                return;
            }
            let entity = world.allocate_entity();
            let _ = world.live.insert(entity, Spawned::Monster(monster));
            world.total_spawned += 1;
            out_events.push(Event::MonsterSpawned {
                entity,
                monster,
                spawn_point,
                health_scale,
                armor_scale,
                drop,
            });
        }
        Command::SpawnBoss {
            boss,
            origin,
            scale,
            health_scale,
            armor_scale,
        } => {
            if catalog::boss(boss).is_none() {
                tracing::warn!(boss = boss.get(), "unknown boss catalog index");
                out_events.push(Event::SpawnRejected {
                    reason: SpawnError::UnknownBoss,
                });
                return;
            }
            let entity = world.allocate_entity();
            let _ = world.live.insert(entity, Spawned::Boss(boss));
            let _ = world.bosses.insert(
                entity,
                BossStatus {
                    boss,
                    defeated: false,
                },
            );
            world.total_spawned += 1;
            out_events.push(Event::BossSpawned {
                entity,
                boss,
                origin,
                scale,
                health_scale,
                armor_scale,
            });
            out_events.push(Event::HealthBarAttached { entity });
        }
        Command::RecordMonsterDeath { entity } | Command::RecordBossDeath { entity } => {
            world.kill(entity, out_events);
        }
        Command::GrantBenefit { benefit } => {
            let Some(spec) = catalog::benefit(benefit) else {
                tracing::warn!(benefit = benefit.get(), "unknown benefit catalog index");
                return;
            };
            let value = if spec.mode_toggle() && world.toggle_value(spec.toggle()) != 0 {
                0
            } else {
                spec.value()
            };
            world.set_toggle(spec.toggle(), value, out_events);
            out_events.push(Event::BenefitGranted { benefit });
            out_events.push(Event::Announced {
                channel: horde_core::AnnounceChannel::Center,
                text: spec.center_message().to_owned(),
            });
            out_events.push(Event::Announced {
                channel: horde_core::AnnounceChannel::Chat,
                text: spec.chat_message().to_owned(),
            });
        }
        Command::SetToggle { toggle, value } => {
            world.set_toggle(toggle, value, out_events);
        }
        Command::Announce { channel, text } => {
            out_events.push(Event::Announced { channel, text });
        }
        Command::PurgeCorpses => {
            let count = u32::try_from(world.corpses.len()).unwrap_or(u32::MAX);
            world.corpses.clear();
            out_events.push(Event::CorpsesPurged { count });
        }
    }
}

/// Read-only queries over the director world.
pub mod query {
    use super::World;
    use horde_core::{
        BossId, ConfigToggle, EntityId, MapProfile, PopulationView, SessionView, SimTime,
    };

    /// Current instant on the simulation clock.
    #[must_use]
    pub fn sim_time(world: &World) -> SimTime {
        world.clock
    }

    /// Profile of the currently loaded map.
    #[must_use]
    pub fn map_profile(world: &World) -> &MapProfile {
        &world.profile
    }

    /// Snapshot of the monster population ledger.
    #[must_use]
    pub fn population(world: &World) -> PopulationView {
        PopulationView {
            live: u32::try_from(world.live.len()).unwrap_or(u32::MAX),
            corpses: u32::try_from(world.corpses.len()).unwrap_or(u32::MAX),
            total_spawned: world.total_spawned,
            total_killed: world.total_killed,
        }
    }

    /// Snapshot of the match-wide session parameters.
    #[must_use]
    pub fn session(world: &World) -> SessionView {
        SessionView {
            humans: world.humans,
            chaotic: world.toggle_value(ConfigToggle::Chaotic),
            insane: world.toggle_value(ConfigToggle::Insane) != 0,
            monster_override: world.monster_override,
        }
    }

    /// Current value of a difficulty or perk toggle.
    #[must_use]
    pub fn toggle(world: &World, toggle: ConfigToggle) -> i32 {
        world.toggle_value(toggle)
    }

    /// Handles of every live monster, in allocation order.
    #[must_use]
    pub fn live_monsters(world: &World) -> Vec<EntityId> {
        world.live.keys().copied().collect()
    }

    /// Boss identity and whether its defeat was already handled, for entities
    /// spawned as bosses.
    #[must_use]
    pub fn boss_status(world: &World, entity: EntityId) -> Option<(BossId, bool)> {
        world
            .bosses
            .get(&entity)
            .map(|status| (status.boss, status.defeated))
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, query, World};
    use horde_core::{
        AnnounceChannel, BenefitId, BossId, Command, ConfigToggle, EntityId, Event, MonsterId,
        SpawnError, SpawnPointId, WorldPoint,
    };
    use std::time::Duration;

    fn spawn_one(world: &mut World) -> EntityId {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnMonster {
                spawn_point: SpawnPointId::new(1),
                monster: MonsterId::new(0),
                health_scale: 1.0,
                armor_scale: 1.0,
                drop: None,
            },
            &mut events,
        );
        match events.as_slice() {
            [Event::MonsterSpawned { entity, .. }] => *entity,
            other => panic!("unexpected events: {other:?}"),
        }
    }

    fn spawn_boss(world: &mut World) -> EntityId {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnBoss {
                boss: BossId::new(0),
                origin: WorldPoint::new(0.0, 0.0, 0.0),
                scale: 1.4,
                health_scale: 2.0,
                armor_scale: 3.0,
            },
            &mut events,
        );
        match events.as_slice() {
            [Event::BossSpawned { entity, .. }, Event::HealthBarAttached { .. }] => *entity,
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn tick_advances_the_clock() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(250),
            },
            &mut events,
        );
        assert_eq!(query::sim_time(&world).as_millis(), 250);
    }

    #[test]
    fn population_ledger_tracks_spawns_and_deaths() {
        let mut world = World::new();
        let entity = spawn_one(&mut world);
        assert_eq!(query::population(&world).live, 1);

        let mut events = Vec::new();
        apply(&mut world, Command::RecordMonsterDeath { entity }, &mut events);
        let population = query::population(&world);
        assert_eq!(population.live, 0);
        assert_eq!(population.corpses, 1);
        assert_eq!(population.total_killed, 1);

        events.clear();
        apply(&mut world, Command::PurgeCorpses, &mut events);
        assert_eq!(events, vec![Event::CorpsesPurged { count: 1 }]);
        assert_eq!(query::population(&world).corpses, 0);
    }

    #[test]
    fn boss_spawn_attaches_a_health_bar() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnBoss {
                boss: BossId::new(2),
                origin: WorldPoint::new(128.0, -960.0, 704.0),
                scale: 1.4,
                health_scale: 1.2,
                armor_scale: 1.45,
            },
            &mut events,
        );
        let [Event::BossSpawned { entity, .. }, Event::HealthBarAttached { entity: bar }] =
            events.as_slice()
        else {
            panic!("unexpected events: {events:?}");
        };
        assert_eq!(entity, bar, "health bar must follow the boss it was spawned for");
    }

    #[test]
    fn boss_death_is_idempotent() {
        let mut world = World::new();
        let entity = spawn_boss(&mut world);

        let mut events = Vec::new();
        apply(&mut world, Command::RecordBossDeath { entity }, &mut events);
        assert!(matches!(events.as_slice(), [Event::BossDefeated { .. }]));
        assert_eq!(query::boss_status(&world, entity), Some((BossId::new(0), true)));

        events.clear();
        apply(&mut world, Command::RecordBossDeath { entity }, &mut events);
        assert!(events.is_empty(), "second death report must be silent");
        assert_eq!(query::population(&world).total_killed, 1);
    }

    #[test]
    fn monster_death_hook_still_guards_bosses() {
        let mut world = World::new();
        let entity = spawn_boss(&mut world);

        let mut events = Vec::new();
        apply(&mut world, Command::RecordMonsterDeath { entity }, &mut events);
        apply(&mut world, Command::RecordBossDeath { entity }, &mut events);
        let defeats = events
            .iter()
            .filter(|event| matches!(event, Event::BossDefeated { .. }))
            .count();
        assert_eq!(defeats, 1);
    }

    #[test]
    fn unknown_catalog_indices_are_rejected() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnMonster {
                spawn_point: SpawnPointId::new(1),
                monster: MonsterId::new(u16::MAX),
                health_scale: 1.0,
                armor_scale: 1.0,
                drop: None,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::SpawnRejected {
                reason: SpawnError::UnknownMonster
            }]
        );
        assert_eq!(query::population(&world).total_spawned, 0);
    }

    #[test]
    fn grant_benefit_sets_toggle_and_announces() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::GrantBenefit {
                benefit: BenefitId::new(0),
            },
            &mut events,
        );
        assert_eq!(query::toggle(&world, ConfigToggle::Vampire), 1);
        assert!(events.contains(&Event::BenefitGranted {
            benefit: BenefitId::new(0)
        }));
        let announcements = events
            .iter()
            .filter(|event| matches!(event, Event::Announced { .. }))
            .count();
        assert_eq!(announcements, 2);
    }

    #[test]
    fn mode_toggle_benefit_alternates() {
        let mut world = World::new();
        let bfg = BenefitId::new(8);
        let mut events = Vec::new();
        apply(&mut world, Command::GrantBenefit { benefit: bfg }, &mut events);
        assert_eq!(query::toggle(&world, ConfigToggle::BfgPull), 1);
        apply(&mut world, Command::GrantBenefit { benefit: bfg }, &mut events);
        assert_eq!(query::toggle(&world, ConfigToggle::BfgPull), 0);
        apply(&mut world, Command::GrantBenefit { benefit: bfg }, &mut events);
        assert_eq!(query::toggle(&world, ConfigToggle::BfgPull), 1);
    }

    #[test]
    fn reset_clears_ledger_toggles_and_override() {
        let mut world = World::new();
        let _ = spawn_one(&mut world);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetToggle {
                toggle: ConfigToggle::Chaotic,
                value: 2,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SetMonsterOverride { count: 42 },
            &mut events,
        );
        apply(&mut world, Command::ResetGame, &mut events);

        assert_eq!(query::population(&world).live, 0);
        assert_eq!(query::population(&world).total_spawned, 0);
        assert_eq!(query::toggle(&world, ConfigToggle::Chaotic), 0);
        assert_eq!(query::session(&world).monster_override, None);
        assert!(events.contains(&Event::GameReset));
    }

    #[test]
    fn monster_override_events_fire_only_on_change() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetMonsterOverride { count: 30 },
            &mut events,
        );
        assert_eq!(events, vec![Event::MonsterOverrideChanged { count: 30 }]);
        assert_eq!(query::session(&world).monster_override, Some(30));

        events.clear();
        apply(
            &mut world,
            Command::SetMonsterOverride { count: 30 },
            &mut events,
        );
        assert!(events.is_empty(), "repeated override must be silent");

        apply(
            &mut world,
            Command::SetMonsterOverride { count: 0 },
            &mut events,
        );
        assert_eq!(events, vec![Event::MonsterOverrideChanged { count: 0 }]);
        assert_eq!(query::session(&world).monster_override, None);

        events.clear();
        apply(
            &mut world,
            Command::SetMonsterOverride { count: 0 },
            &mut events,
        );
        assert!(events.is_empty(), "clearing an unset override must be silent");
    }

    #[test]
    fn announcements_pass_through() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Announce {
                channel: AnnounceChannel::Typewriter,
                text: "hello".to_owned(),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::Announced {
                channel: AnnounceChannel::Typewriter,
                text: "hello".to_owned(),
            }]
        );
    }
}
