#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the horde wave director.
//!
//! This crate defines the message surface that connects the host-engine
//! adapter, the authoritative director world, and the pure wave systems.
//! Adapters submit [`Command`] values describing desired mutations, the world
//! executes those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values for systems to react to deterministically. Systems consume
//! event streams, query immutable snapshots, and respond exclusively with new
//! command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod weighted;

use catalog::{BOSS_ARENAS, LARGE_MAPS, SMALL_MAPS};

/// Instant on the monotonic simulation clock, measured in whole milliseconds
/// since the host engine booted. All deadlines and cooldowns in the director
/// are expressed against this clock.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SimTime(u64);

impl SimTime {
    /// The instant at which the simulation clock starts.
    pub const ZERO: Self = Self(0);

    /// Creates an instant from whole milliseconds since boot.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Whole milliseconds elapsed since boot.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Returns the instant advanced by the provided duration, saturating at
    /// the clock's maximum representable instant.
    #[must_use]
    pub fn advanced_by(self, dt: Duration) -> Self {
        let millis = u64::try_from(dt.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(millis))
    }

    /// Duration elapsed since an earlier instant, or zero if `earlier` is in
    /// the future.
    #[must_use]
    pub fn saturating_since(self, earlier: SimTime) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

/// Stable integer handle identifying a spawned game entity.
///
/// The director never holds raw host-engine entity references; the adapter
/// translates between its engine slots and these handles, so slot reuse on the
/// host side cannot alias director bookkeeping.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity handle with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a monster spawn point by the host adapter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SpawnPointId(u32);

impl SpawnPointId {
    /// Creates a new spawn-point identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Index of an entry in the static monster catalog.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MonsterId(u16);

impl MonsterId {
    /// Creates a new monster identifier with the provided catalog index.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the catalog index of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Index of an entry in the static boss catalog.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BossId(u16);

impl BossId {
    /// Creates a new boss identifier with the provided catalog index.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the catalog index of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Index of an entry in the static benefit catalog.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BenefitId(u16);

impl BenefitId {
    /// Creates a new benefit identifier with the provided catalog index.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the catalog index of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Index of an entry in the static item-drop catalog.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ItemId(u16);

impl ItemId {
    /// Creates a new item identifier with the provided catalog index.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the catalog index of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Phase of the wave state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// Initial delay before the first wave of a match.
    Warmup,
    /// Actively emitting monster spawns until the wave quota is exhausted.
    Spawning,
    /// Waiting for the advance gate to allow the wave to end.
    Cleanup,
    /// Short breather before the next wave begins.
    Rest,
}

/// Size classification of the loaded map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapSize {
    /// Cramped arenas with few usable spawn points.
    Small,
    /// The default classification for unrecognized maps.
    Medium,
    /// Sprawling maps that sustain large monster populations.
    Large,
}

impl MapSize {
    /// Upper bound applied both to a wave's spawn quota and to the number of
    /// monsters allowed to be alive at once on maps of this size.
    #[must_use]
    pub const fn monster_limit(self) -> u32 {
        match self {
            Self::Small => 16,
            Self::Medium => 18,
            Self::Large => 44,
        }
    }
}

/// Inclusive wave-level eligibility window for catalog entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LevelWindow {
    min: Option<u32>,
    max: Option<u32>,
}

impl LevelWindow {
    /// Window that admits every wave level.
    pub const ANY: Self = Self {
        min: None,
        max: None,
    };

    /// Window admitting levels at or above `min`.
    #[must_use]
    pub const fn from_level(min: u32) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Window admitting levels at or below `max`.
    #[must_use]
    pub const fn up_to(max: u32) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Window admitting levels between `min` and `max` inclusive.
    #[must_use]
    pub const fn between(min: u32, max: u32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Lower bound of the window, if any.
    #[must_use]
    pub const fn min(&self) -> Option<u32> {
        self.min
    }

    /// Upper bound of the window, if any.
    #[must_use]
    pub const fn max(&self) -> Option<u32> {
        self.max
    }

    /// Reports whether the provided wave level falls inside the window.
    #[must_use]
    pub fn contains(&self, level: u32) -> bool {
        self.min.map_or(true, |min| level >= min) && self.max.map_or(true, |max| level <= max)
    }
}

/// Runtime difficulty and perk toggles mirrored from the host configuration
/// store. Each toggle carries a small integer value; zero means disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigToggle {
    /// Chaotic difficulty tier (0, 1, or 2).
    Chaotic,
    /// Insane difficulty tier (0 or 1).
    Insane,
    /// Vampire damage-leech perk level (0, 1, or 2).
    Vampire,
    /// Passive ammunition regeneration perk.
    AmmoRegen,
    /// Automatic haste-on-frag perk.
    AutoHaste,
    /// Spawn-with-armor perk.
    StartArmor,
    /// Armor-piercing tracer bullets perk.
    TracedBullets,
    /// Cluster-variant proximity grenades perk.
    ClusterProx,
    /// Napalm-variant grenade launcher perk.
    NapalmLauncher,
    /// BFG gravity-pull laser mode; alternates with the standard lasers.
    BfgPull,
}

impl ConfigToggle {
    /// Every toggle, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Chaotic,
        Self::Insane,
        Self::Vampire,
        Self::AmmoRegen,
        Self::AutoHaste,
        Self::StartArmor,
        Self::TracedBullets,
        Self::ClusterProx,
        Self::NapalmLauncher,
        Self::BfgPull,
    ];

    /// Name of the host configuration variable backing the toggle.
    #[must_use]
    pub const fn variable_name(self) -> &'static str {
        match self {
            Self::Chaotic => "g_chaotic",
            Self::Insane => "g_insane",
            Self::Vampire => "g_vampire",
            Self::AmmoRegen => "g_ammoregen",
            Self::AutoHaste => "g_autohaste",
            Self::StartArmor => "g_startarmor",
            Self::TracedBullets => "g_tracedbullets",
            Self::ClusterProx => "g_upgradeproxs",
            Self::NapalmLauncher => "g_bouncygl",
            Self::BfgPull => "g_bfgpull",
        }
    }
}

/// Broadcast channel for player-facing announcements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnounceChannel {
    /// Large centered print.
    Center,
    /// Chat-style line.
    Chat,
    /// Typewriter-style reveal.
    Typewriter,
}

/// Location in host world units, used to place auto-spawned bosses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
    z: f32,
}

impl WorldPoint {
    /// Creates a new location from host world coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// East-west coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// North-south coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.z
    }
}

/// Static per-map configuration derived once per level load.
#[derive(Clone, Debug, PartialEq)]
pub struct MapProfile {
    name: String,
    size: MapSize,
    boss_arena: Option<WorldPoint>,
}

impl MapProfile {
    /// Derives the profile for the provided map identifier from the static
    /// map catalog. Unrecognized maps degrade to a medium-sized profile with
    /// no boss arena.
    #[must_use]
    pub fn derive(map: &str) -> Self {
        let size = if SMALL_MAPS.contains(&map) {
            MapSize::Small
        } else if LARGE_MAPS.contains(&map) {
            MapSize::Large
        } else {
            MapSize::Medium
        };
        let boss_arena = BOSS_ARENAS
            .iter()
            .find(|(name, _)| *name == map)
            .map(|(_, origin)| *origin);
        Self {
            name: map.to_owned(),
            size,
            boss_arena,
        }
    }

    /// Map identifier the profile was derived from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size classification of the map.
    #[must_use]
    pub const fn size(&self) -> MapSize {
        self.size
    }

    /// Fixed origin at which auto-spawned bosses appear, when the map has one.
    #[must_use]
    pub const fn boss_arena(&self) -> Option<WorldPoint> {
        self.boss_arena
    }
}

impl Default for MapProfile {
    fn default() -> Self {
        Self::derive("")
    }
}

/// Per-frame snapshot of a monster spawn point, assembled by the host adapter.
///
/// Occupancy is a host collision query (live players inside the spawn volume);
/// the director treats it as an opaque precondition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpawnPointDescriptor {
    /// Identifier of the spawn point.
    pub id: SpawnPointId,
    /// Whether the point is designated for flying monsters.
    pub flying: bool,
    /// Whether a live player currently blocks the point.
    pub occupied: bool,
}

/// Read-only snapshot of the monster population ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulationView {
    /// Number of monsters (bosses included) currently alive.
    pub live: u32,
    /// Number of corpses awaiting a purge.
    pub corpses: u32,
    /// Total monsters spawned since the last game reset.
    pub total_spawned: u32,
    /// Total monsters killed since the last game reset.
    pub total_killed: u32,
}

/// Read-only snapshot of match-wide session parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionView {
    /// Number of active human participants.
    pub humans: u32,
    /// Current chaotic difficulty tier (0 disabled, 1, or 2).
    pub chaotic: i32,
    /// Whether the insane difficulty tier is active.
    pub insane: bool,
    /// Operator override for the wave spawn quota, when set.
    pub monster_override: Option<u32>,
}

/// Commands that express all permissible director mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous frame.
        dt: Duration,
    },
    /// Derives and caches the map profile for a freshly loaded level.
    LoadMap {
        /// Host identifier of the loaded map.
        map: String,
    },
    /// Clears all director state back to initial values.
    ResetGame,
    /// Updates the number of active human participants.
    SyncHumans {
        /// Current human participant count.
        count: u32,
    },
    /// Sets the operator spawn-quota override; zero disables it.
    SetMonsterOverride {
        /// Explicit per-wave monster count, or zero to restore the formula.
        count: u32,
    },
    /// Raises the external force-advance signal for the current cleanup phase.
    ForceWaveAdvance,
    /// Requests that a monster be spawned at the provided point.
    SpawnMonster {
        /// Spawn point the monster should appear at.
        spawn_point: SpawnPointId,
        /// Catalog entry describing the monster type.
        monster: MonsterId,
        /// Wave-scaled health multiplier the host should apply.
        health_scale: f32,
        /// Wave-scaled power-armor multiplier the host should apply.
        armor_scale: f32,
        /// Item the monster carries and releases on death, when one was drawn.
        drop: Option<ItemId>,
    },
    /// Requests that a boss be spawned at the map's boss arena.
    SpawnBoss {
        /// Catalog entry describing the boss type.
        boss: BossId,
        /// Arena origin the boss should appear at.
        origin: WorldPoint,
        /// Cosmetic model scale the host should apply.
        scale: f32,
        /// Wave-scaled health multiplier the host should apply.
        health_scale: f32,
        /// Wave-scaled power-armor multiplier the host should apply.
        armor_scale: f32,
    },
    /// Records that the host destroyed a regular monster.
    RecordMonsterDeath {
        /// Handle of the monster that died.
        entity: EntityId,
    },
    /// Records that the host destroyed a boss. Repeat deliveries for the same
    /// boss are silent no-ops.
    RecordBossDeath {
        /// Handle of the boss that died.
        entity: EntityId,
    },
    /// Grants a permanent gameplay benefit chosen by the benefit grantor.
    GrantBenefit {
        /// Catalog entry describing the benefit.
        benefit: BenefitId,
    },
    /// Sets a difficulty or perk toggle to an explicit value.
    SetToggle {
        /// Toggle to mutate.
        toggle: ConfigToggle,
        /// New value; zero disables.
        value: i32,
    },
    /// Broadcasts a player-facing announcement.
    Announce {
        /// Channel the announcement is delivered on.
        channel: AnnounceChannel,
        /// Text of the announcement.
        text: String,
    },
    /// Frees every corpse left over from the previous wave.
    PurgeCorpses,
}

/// Events broadcast by the director world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the frame.
        dt: Duration,
    },
    /// Confirms that a map profile was derived and cached.
    MapLoaded {
        /// Size classification of the loaded map.
        size: MapSize,
    },
    /// Confirms that all director state was cleared.
    GameReset,
    /// Announces a change in the human participant count.
    HumansChanged {
        /// New human participant count.
        count: u32,
    },
    /// Announces a change of the operator spawn-quota override.
    MonsterOverrideChanged {
        /// New override value; zero means the formula applies again.
        count: u32,
    },
    /// Relays the external force-advance signal to the advance gate.
    WaveAdvanceForced,
    /// Confirms that a monster entered the population ledger.
    MonsterSpawned {
        /// Handle allocated to the monster.
        entity: EntityId,
        /// Catalog entry describing the monster type.
        monster: MonsterId,
        /// Spawn point the monster appeared at.
        spawn_point: SpawnPointId,
        /// Wave-scaled health multiplier for the host entity.
        health_scale: f32,
        /// Wave-scaled power-armor multiplier for the host entity.
        armor_scale: f32,
        /// Item the host should hand the monster as its death drop.
        drop: Option<ItemId>,
    },
    /// Confirms that a monster left the live population.
    MonsterDied {
        /// Handle of the monster that died.
        entity: EntityId,
    },
    /// Confirms that a boss entered the population ledger.
    BossSpawned {
        /// Handle allocated to the boss.
        entity: EntityId,
        /// Catalog entry describing the boss type.
        boss: BossId,
        /// Arena origin the boss appeared at.
        origin: WorldPoint,
        /// Cosmetic model scale for the host entity.
        scale: f32,
        /// Wave-scaled health multiplier for the host entity.
        health_scale: f32,
        /// Wave-scaled power-armor multiplier for the host entity.
        armor_scale: f32,
    },
    /// Directs the host to attach a tracking health-bar display entity to a
    /// freshly spawned boss. Follows the matching [`Event::BossSpawned`].
    HealthBarAttached {
        /// Handle of the boss the display entity follows.
        entity: EntityId,
    },
    /// Confirms a boss defeat. Emitted exactly once per boss; reward drops
    /// hang off this event on the host side.
    BossDefeated {
        /// Handle of the defeated boss.
        entity: EntityId,
        /// Catalog entry describing the boss type.
        boss: BossId,
    },
    /// Confirms that a benefit was applied and recorded.
    BenefitGranted {
        /// Catalog entry describing the benefit.
        benefit: BenefitId,
    },
    /// Announces a difficulty or perk toggle change.
    ToggleChanged {
        /// Toggle that changed.
        toggle: ConfigToggle,
        /// New value of the toggle.
        value: i32,
    },
    /// Relays a player-facing announcement to the host.
    Announced {
        /// Channel the announcement is delivered on.
        channel: AnnounceChannel,
        /// Text of the announcement.
        text: String,
    },
    /// Confirms that leftover corpses were freed.
    CorpsesPurged {
        /// Number of corpses that were freed.
        count: u32,
    },
    /// Reports that a spawn command referenced an unknown catalog entry.
    SpawnRejected {
        /// Specific reason the spawn was rejected.
        reason: SpawnError,
    },
}

/// Reasons a spawn command may be rejected by the director world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnError {
    /// The monster identifier does not index the monster catalog.
    UnknownMonster,
    /// The boss identifier does not index the boss catalog.
    UnknownBoss,
}
