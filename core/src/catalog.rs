//! Static reference data: monster, boss, item-drop, and benefit catalogs,
//! plus the map classification tables the director derives profiles from.
//!
//! Entries here are read-only content. Eligibility windows use wave levels;
//! weights feed the [`crate::weighted`] utility.

use crate::{BenefitId, BossId, ConfigToggle, ItemId, LevelWindow, MapSize, WorldPoint};

/// Wave level at which flying monster types become eligible anywhere.
pub const FLYING_UNLOCK_LEVEL: u32 = 5;

/// Static description of one monster type available to the selector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonsterSpec {
    class_name: &'static str,
    window: LevelWindow,
    weight: f32,
    flying: bool,
}

impl MonsterSpec {
    const fn new(class_name: &'static str, window: LevelWindow, weight: f32) -> Self {
        Self {
            class_name,
            window,
            weight,
            flying: false,
        }
    }

    const fn flyer(class_name: &'static str, window: LevelWindow, weight: f32) -> Self {
        Self {
            class_name,
            window,
            weight,
            flying: true,
        }
    }

    /// Host entity classname spawned for this monster type.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// Wave-level eligibility window.
    #[must_use]
    pub const fn window(&self) -> LevelWindow {
        self.window
    }

    /// Base selection weight.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Whether the monster requires a flying-designated spawn point.
    #[must_use]
    pub const fn flying(&self) -> bool {
        self.flying
    }
}

/// The monster catalog, indexed by [`crate::MonsterId`].
pub const MONSTERS: &[MonsterSpec] = &[
    MonsterSpec::new("monster_soldier_light", LevelWindow::up_to(19), 0.35),
    MonsterSpec::new("monster_soldier_ss", LevelWindow::up_to(20), 0.45),
    MonsterSpec::new("monster_soldier", LevelWindow::up_to(4), 0.45),
    MonsterSpec::new("monster_soldier_hypergun", LevelWindow::between(2, 7), 0.55),
    MonsterSpec::new("monster_soldier_lasergun", LevelWindow::between(3, 9), 0.45),
    MonsterSpec::new("monster_soldier_ripper", LevelWindow::between(3, 7), 0.45),
    MonsterSpec::new("monster_infantry2", LevelWindow::from_level(2), 0.36),
    MonsterSpec::new("monster_infantry", LevelWindow::from_level(8), 0.36),
    MonsterSpec::flyer("monster_flyer", LevelWindow::ANY, 0.14),
    MonsterSpec::flyer("monster_hover2", LevelWindow::between(5, 13), 0.14),
    MonsterSpec::flyer("monster_fixbot", LevelWindow::between(5, 18), 0.16),
    MonsterSpec::new("monster_gekk", LevelWindow::between(3, 17), 0.12),
    MonsterSpec::new("monster_gunner2", LevelWindow::between(3, 11), 0.35),
    MonsterSpec::new("monster_gunner", LevelWindow::from_level(8), 0.34),
    MonsterSpec::new("monster_medic", LevelWindow::between(5, 12), 0.1),
    MonsterSpec::new("monster_brain", LevelWindow::from_level(6), 0.23),
    MonsterSpec::new("monster_stalker", LevelWindow::between(4, 11), 0.19),
    MonsterSpec::new("monster_parasite", LevelWindow::between(4, 14), 0.23),
    MonsterSpec::new("monster_tank", LevelWindow::from_level(14), 0.3),
    MonsterSpec::new("monster_tank2", LevelWindow::between(5, 13), 0.3),
    MonsterSpec::new("monster_guncmdr2", LevelWindow::between(6, 10), 0.18),
    MonsterSpec::new("monster_mutant", LevelWindow::from_level(5), 0.55),
    MonsterSpec::new("monster_chick", LevelWindow::between(6, 18), 0.3),
    MonsterSpec::new("monster_chick_heat", LevelWindow::from_level(10), 0.34),
    MonsterSpec::new("monster_berserk", LevelWindow::from_level(7), 0.45),
    MonsterSpec::flyer("monster_floater", LevelWindow::between(9, 16), 0.13),
    MonsterSpec::flyer("monster_hover", LevelWindow::from_level(11), 0.18),
    MonsterSpec::flyer("monster_daedalus", LevelWindow::from_level(13), 0.08),
    MonsterSpec::new("monster_medic_commander", LevelWindow::from_level(13), 0.18),
    MonsterSpec::new("monster_tank_commander", LevelWindow::from_level(11), 0.15),
    MonsterSpec::new("monster_spider", LevelWindow::from_level(12), 0.24),
    MonsterSpec::new("monster_guncmdr", LevelWindow::from_level(11), 0.28),
    MonsterSpec::new("monster_gladc", LevelWindow::from_level(6), 0.3),
    MonsterSpec::new("monster_gladiator", LevelWindow::from_level(8), 0.3),
    MonsterSpec::new("monster_shambler", LevelWindow::from_level(10), 0.03),
    MonsterSpec::flyer("monster_floater2", LevelWindow::from_level(17), 0.35),
    MonsterSpec::flyer("monster_carrier2", LevelWindow::from_level(19), 0.09),
    MonsterSpec::new("monster_tank_64", LevelWindow::from_level(18), 0.1),
    MonsterSpec::new("monster_janitor", LevelWindow::from_level(16), 0.18),
    MonsterSpec::new("monster_janitor2", LevelWindow::from_level(19), 0.12),
    MonsterSpec::new("monster_makron", LevelWindow::between(16, 19), 0.03),
    MonsterSpec::new("monster_gladb", LevelWindow::from_level(16), 0.55),
    MonsterSpec::flyer("monster_boss2_64", LevelWindow::from_level(16), 0.08),
    MonsterSpec::new("monster_perrokl", LevelWindow::from_level(21), 0.27),
    MonsterSpec::new("monster_guncmdrkl", LevelWindow::from_level(23), 0.1),
    MonsterSpec::new("monster_shamblerkl", LevelWindow::from_level(18), 0.14),
    MonsterSpec::new("monster_makronkl", LevelWindow::from_level(20), 0.05),
    MonsterSpec::new("monster_widow1", LevelWindow::from_level(23), 0.08),
];

/// Resolves a monster identifier against the catalog.
#[must_use]
pub fn monster(id: crate::MonsterId) -> Option<&'static MonsterSpec> {
    MONSTERS.get(usize::from(id.get()))
}

/// Static description of one boss type available to the boss director.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossSpec {
    class_name: &'static str,
    display_name: &'static str,
    window: LevelWindow,
}

impl BossSpec {
    const fn new(class_name: &'static str, display_name: &'static str, window: LevelWindow) -> Self {
        Self {
            class_name,
            display_name,
            window,
        }
    }

    /// Host entity classname spawned for this boss type.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// Player-facing name used in announcements.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Wave-level eligibility window.
    #[must_use]
    pub const fn window(&self) -> LevelWindow {
        self.window
    }
}

/// The boss catalog, indexed by [`crate::BossId`]. Per-size candidate lists
/// below reference entries here so the recent-boss ring can compare
/// identifiers across size classes.
pub const BOSSES: &[BossSpec] = &[
    BossSpec::new("monster_guardian", "Guardian", LevelWindow::ANY),
    BossSpec::new("monster_supertank", "Super-Tank", LevelWindow::ANY),
    BossSpec::new("monster_boss2", "Hornet", LevelWindow::ANY),
    BossSpec::new("monster_carrier", "Carrier", LevelWindow::ANY),
    BossSpec::new("monster_shamblerkl", "Shambler", LevelWindow::from_level(15)),
    BossSpec::new("monster_guncmdrkl", "Gunner Commander", LevelWindow::from_level(15)),
    BossSpec::new("monster_widow", "Black Widow", LevelWindow::from_level(15)),
    BossSpec::new("monster_widow2", "Widow Guardian", LevelWindow::from_level(20)),
    BossSpec::new("monster_supertankkl", "Super-Tank Prime", LevelWindow::from_level(20)),
    BossSpec::new("monster_makronkl", "Makron", LevelWindow::from_level(25)),
    BossSpec::new("monster_jorg", "Jorg", LevelWindow::from_level(25)),
];

const SMALL_BOSS_IDS: &[BossId] = &[BossId::new(0), BossId::new(1), BossId::new(2)];
const MEDIUM_BOSS_IDS: &[BossId] = &[
    BossId::new(0),
    BossId::new(2),
    BossId::new(3),
    BossId::new(4),
    BossId::new(5),
];
const LARGE_BOSS_IDS: &[BossId] = &[
    BossId::new(2),
    BossId::new(3),
    BossId::new(6),
    BossId::new(7),
    BossId::new(8),
    BossId::new(9),
    BossId::new(10),
];

/// Map-specific boss lists that replace the size-class candidates outright.
const BOSS_OVERRIDES: &[(&str, &[BossId])] = &[
    ("q2ctf5", &[BossId::new(3), BossId::new(6), BossId::new(10)]),
    ("rdm14", &[BossId::new(2), BossId::new(4), BossId::new(5)]),
    ("q64/dm10", &[BossId::new(0), BossId::new(1)]),
    ("q64\\dm10", &[BossId::new(0), BossId::new(1)]),
];

/// Resolves a boss identifier against the catalog.
#[must_use]
pub fn boss(id: BossId) -> Option<&'static BossSpec> {
    BOSSES.get(usize::from(id.get()))
}

/// Boss candidates for the provided map size class.
#[must_use]
pub fn bosses_for(size: MapSize) -> &'static [BossId] {
    match size {
        MapSize::Small => SMALL_BOSS_IDS,
        MapSize::Medium => MEDIUM_BOSS_IDS,
        MapSize::Large => LARGE_BOSS_IDS,
    }
}

/// Map-specific boss candidate override, when one exists for the map.
#[must_use]
pub fn boss_override(map: &str) -> Option<&'static [BossId]> {
    BOSS_OVERRIDES
        .iter()
        .find(|(name, _)| *name == map)
        .map(|(_, ids)| *ids)
}

/// Broad classification of a droppable item, used by the host to decide how
/// the drop is presented and by per-category drop-rate tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    /// Health packs and stimulants.
    Health,
    /// Armor pieces and power screens.
    Armor,
    /// Timed powerups and spheres.
    Powerup,
    /// Weapon pickups.
    Weapon,
    /// Ammunition and carrying gear.
    Ammo,
}

/// Static description of one item a monster can carry as its death drop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemSpec {
    class_name: &'static str,
    window: LevelWindow,
    weight: f32,
    category: ItemCategory,
}

impl ItemSpec {
    const fn new(
        class_name: &'static str,
        window: LevelWindow,
        weight: f32,
        category: ItemCategory,
    ) -> Self {
        Self {
            class_name,
            window,
            weight,
            category,
        }
    }

    /// Host entity classname of the dropped item.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// Wave-level eligibility window.
    #[must_use]
    pub const fn window(&self) -> LevelWindow {
        self.window
    }

    /// Base drop weight.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Classification of the item.
    #[must_use]
    pub const fn category(&self) -> ItemCategory {
        self.category
    }
}

/// The item-drop catalog, indexed by [`crate::ItemId`].
pub const ITEMS: &[ItemSpec] = &[
    ItemSpec::new("item_health", LevelWindow::up_to(5), 0.20, ItemCategory::Health),
    ItemSpec::new("item_health_large", LevelWindow::ANY, 0.12, ItemCategory::Health),
    ItemSpec::new("item_health_mega", LevelWindow::ANY, 0.06, ItemCategory::Health),
    ItemSpec::new("item_adrenaline", LevelWindow::ANY, 0.17, ItemCategory::Health),
    ItemSpec::new("item_armor_shard", LevelWindow::ANY, 0.09, ItemCategory::Armor),
    ItemSpec::new("item_armor_jacket", LevelWindow::up_to(5), 0.12, ItemCategory::Armor),
    ItemSpec::new("item_armor_combat", LevelWindow::from_level(6), 0.06, ItemCategory::Armor),
    ItemSpec::new("item_armor_body", LevelWindow::from_level(8), 0.05, ItemCategory::Armor),
    ItemSpec::new("item_power_screen", LevelWindow::between(2, 8), 0.03, ItemCategory::Armor),
    ItemSpec::new("item_power_shield", LevelWindow::from_level(9), 0.07, ItemCategory::Armor),
    ItemSpec::new("item_quad", LevelWindow::from_level(6), 0.07, ItemCategory::Powerup),
    ItemSpec::new("item_double", LevelWindow::from_level(5), 0.076, ItemCategory::Powerup),
    ItemSpec::new("item_quadfire", LevelWindow::from_level(4), 0.056, ItemCategory::Powerup),
    ItemSpec::new("item_invulnerability", LevelWindow::from_level(4), 0.051, ItemCategory::Powerup),
    ItemSpec::new("item_sphere_defender", LevelWindow::ANY, 0.1, ItemCategory::Powerup),
    ItemSpec::new("item_sphere_hunter", LevelWindow::from_level(9), 0.06, ItemCategory::Powerup),
    ItemSpec::new("item_invisibility", LevelWindow::from_level(4), 0.08, ItemCategory::Powerup),
    ItemSpec::new("item_doppleganger", LevelWindow::from_level(6), 0.09, ItemCategory::Powerup),
    ItemSpec::new("weapon_chainfist", LevelWindow::up_to(2), 0.12, ItemCategory::Weapon),
    ItemSpec::new("weapon_shotgun", LevelWindow::ANY, 0.27, ItemCategory::Weapon),
    ItemSpec::new("weapon_supershotgun", LevelWindow::from_level(4), 0.19, ItemCategory::Weapon),
    ItemSpec::new("weapon_machinegun", LevelWindow::ANY, 0.29, ItemCategory::Weapon),
    ItemSpec::new("weapon_etf_rifle", LevelWindow::from_level(3), 0.19, ItemCategory::Weapon),
    ItemSpec::new("weapon_boomer", LevelWindow::from_level(4), 0.19, ItemCategory::Weapon),
    ItemSpec::new("weapon_chaingun", LevelWindow::from_level(5), 0.19, ItemCategory::Weapon),
    ItemSpec::new("weapon_grenadelauncher", LevelWindow::from_level(6), 0.19, ItemCategory::Weapon),
    ItemSpec::new("weapon_proxlauncher", LevelWindow::from_level(8), 0.19, ItemCategory::Weapon),
    ItemSpec::new("weapon_hyperblaster", LevelWindow::from_level(7), 0.19, ItemCategory::Weapon),
    ItemSpec::new("weapon_phalanx", LevelWindow::from_level(9), 0.19, ItemCategory::Weapon),
    ItemSpec::new("weapon_rocketlauncher", LevelWindow::from_level(6), 0.19, ItemCategory::Weapon),
    ItemSpec::new("weapon_railgun", LevelWindow::from_level(9), 0.19, ItemCategory::Weapon),
    ItemSpec::new("weapon_plasmabeam", LevelWindow::from_level(7), 0.19, ItemCategory::Weapon),
    ItemSpec::new("weapon_disintegrator", LevelWindow::from_level(14), 0.15, ItemCategory::Weapon),
    ItemSpec::new("weapon_bfg", LevelWindow::from_level(12), 0.15, ItemCategory::Weapon),
    ItemSpec::new("ammo_trap", LevelWindow::from_level(5), 0.18, ItemCategory::Ammo),
    ItemSpec::new("ammo_shells", LevelWindow::ANY, 0.25, ItemCategory::Ammo),
    ItemSpec::new("ammo_bullets", LevelWindow::ANY, 0.30, ItemCategory::Ammo),
    ItemSpec::new("ammo_flechettes", LevelWindow::from_level(5), 0.25, ItemCategory::Ammo),
    ItemSpec::new("ammo_grenades", LevelWindow::ANY, 0.35, ItemCategory::Ammo),
    ItemSpec::new("ammo_prox", LevelWindow::from_level(7), 0.25, ItemCategory::Ammo),
    ItemSpec::new("ammo_tesla", LevelWindow::from_level(4), 0.15, ItemCategory::Ammo),
    ItemSpec::new("ammo_cells", LevelWindow::from_level(5), 0.30, ItemCategory::Ammo),
    ItemSpec::new("ammo_magslug", LevelWindow::from_level(9), 0.25, ItemCategory::Ammo),
    ItemSpec::new("ammo_slugs", LevelWindow::from_level(7), 0.25, ItemCategory::Ammo),
    ItemSpec::new("ammo_disruptor", LevelWindow::from_level(12), 0.24, ItemCategory::Ammo),
    ItemSpec::new("ammo_rockets", LevelWindow::from_level(7), 0.25, ItemCategory::Ammo),
    ItemSpec::new("item_bandolier", LevelWindow::from_level(4), 0.32, ItemCategory::Ammo),
    ItemSpec::new("item_pack", LevelWindow::from_level(11), 0.34, ItemCategory::Ammo),
];

/// Resolves an item identifier against the catalog.
#[must_use]
pub fn item(id: ItemId) -> Option<&'static ItemSpec> {
    ITEMS.get(usize::from(id.get()))
}

/// Drop weight of an item at the given wave level: zero outside its window,
/// otherwise the catalog weight. Per-category tuning folds in here.
#[must_use]
pub fn item_drop_weight(spec: &ItemSpec, level: u32) -> f32 {
    if !spec.window().contains(level) {
        return 0.0;
    }
    spec.weight()
}

/// Static description of one grantable gameplay benefit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenefitSpec {
    name: &'static str,
    window: LevelWindow,
    weight: f32,
    toggle: ConfigToggle,
    value: i32,
    center_message: &'static str,
    chat_message: &'static str,
    prerequisite: Option<BenefitId>,
    mode_toggle: bool,
}

impl BenefitSpec {
    /// Short identifier used in logs and tests.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Wave-level eligibility window.
    #[must_use]
    pub const fn window(&self) -> LevelWindow {
        self.window
    }

    /// Selection weight at benefit checkpoints.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Toggle mutated when the benefit is applied.
    #[must_use]
    pub const fn toggle(&self) -> ConfigToggle {
        self.toggle
    }

    /// Value the toggle is set to when the benefit is applied.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Centered announcement shown when the benefit lands.
    #[must_use]
    pub const fn center_message(&self) -> &'static str {
        self.center_message
    }

    /// Chat-line announcement shown when the benefit lands.
    #[must_use]
    pub const fn chat_message(&self) -> &'static str {
        self.chat_message
    }

    /// Benefit that must already be obtained before this one is eligible.
    #[must_use]
    pub const fn prerequisite(&self) -> Option<BenefitId> {
        self.prerequisite
    }

    /// Whether the benefit alternates between two mutually exclusive modes
    /// instead of being granted once.
    #[must_use]
    pub const fn mode_toggle(&self) -> bool {
        self.mode_toggle
    }
}

/// The benefit catalog, indexed by [`crate::BenefitId`].
pub const BENEFITS: &[BenefitSpec] = &[
    BenefitSpec {
        name: "vampire",
        window: LevelWindow::from_level(4),
        weight: 0.2,
        toggle: ConfigToggle::Vampire,
        value: 1,
        center_message: "You're covered in blood!\nVampire Ability\nENABLED!",
        chat_message: "RECOVERING A HEALTH PERCENTAGE OF DAMAGE DONE!",
        prerequisite: None,
        mode_toggle: false,
    },
    BenefitSpec {
        name: "vampire upgraded",
        window: LevelWindow::from_level(24),
        weight: 0.1,
        toggle: ConfigToggle::Vampire,
        value: 2,
        center_message: "IMPROVED VAMPIRE ABILITY",
        chat_message: "RECOVERING HEALTH & ARMOR NOW!",
        prerequisite: Some(BenefitId::new(0)),
        mode_toggle: false,
    },
    BenefitSpec {
        name: "ammo regen",
        window: LevelWindow::from_level(8),
        weight: 0.15,
        toggle: ConfigToggle::AmmoRegen,
        value: 1,
        center_message: "AMMO REGEN\n\nENABLED!",
        chat_message: "AMMO REGEN IS NOW ENABLED!",
        prerequisite: None,
        mode_toggle: false,
    },
    BenefitSpec {
        name: "auto haste",
        window: LevelWindow::from_level(9),
        weight: 0.15,
        toggle: ConfigToggle::AutoHaste,
        value: 1,
        center_message: "DUAL-FIRE IS RUNNING THROUGH YOUR VEINS",
        chat_message: "AUTO-HASTE ENABLED!",
        prerequisite: None,
        mode_toggle: false,
    },
    BenefitSpec {
        name: "start armor",
        window: LevelWindow::from_level(9),
        weight: 0.1,
        toggle: ConfigToggle::StartArmor,
        value: 1,
        center_message: "STARTING ARMOR\nENABLED!",
        chat_message: "STARTING WITH 50 BODY-ARMOR!",
        prerequisite: None,
        mode_toggle: false,
    },
    BenefitSpec {
        name: "traced-piercing bullets",
        window: LevelWindow::from_level(9),
        weight: 0.2,
        toggle: ConfigToggle::TracedBullets,
        value: 1,
        center_message: "BULLETS\nUPGRADED!",
        chat_message: "Piercing-PowerShield Bullets!",
        prerequisite: None,
        mode_toggle: false,
    },
    BenefitSpec {
        name: "cluster prox grenades",
        window: LevelWindow::from_level(25),
        weight: 0.2,
        toggle: ConfigToggle::ClusterProx,
        value: 1,
        center_message: "IMPROVED PROX GRENADES",
        chat_message: "Prox Cluster Launcher Enabled",
        prerequisite: None,
        mode_toggle: false,
    },
    BenefitSpec {
        name: "napalm-grenade launcher",
        window: LevelWindow::from_level(25),
        weight: 0.2,
        toggle: ConfigToggle::NapalmLauncher,
        value: 1,
        center_message: "IMPROVED GRENADE LAUNCHER!",
        chat_message: "Napalm-Grenade Launcher Enabled",
        prerequisite: None,
        mode_toggle: false,
    },
    BenefitSpec {
        name: "bfg grav-pull lasers",
        window: LevelWindow::from_level(35),
        weight: 0.2,
        toggle: ConfigToggle::BfgPull,
        value: 1,
        center_message: "BFG LASERS UPGRADED!",
        chat_message: "BFG Grav-Pull Lasers Enabled",
        prerequisite: None,
        mode_toggle: true,
    },
];

/// Resolves a benefit identifier against the catalog.
#[must_use]
pub fn benefit(id: BenefitId) -> Option<&'static BenefitSpec> {
    BENEFITS.get(usize::from(id.get()))
}

/// Maps classified as small arenas.
pub(crate) const SMALL_MAPS: &[&str] = &[
    "q2dm3",
    "q2dm7",
    "q2dm2",
    "q2ctf4",
    "q64/dm10",
    "q64\\dm10",
    "q64/dm9",
    "q64\\dm9",
    "q64/dm7",
    "q64\\dm7",
    "q64/dm2",
    "q64\\dm2",
    "q64/dm1",
    "q64\\dm1",
    "fact3",
    "mgu3m4",
    "mgu4trial",
    "mgu6trial",
    "ec/base_ec",
    "mgdm1",
];

/// Maps classified as large arenas.
pub(crate) const LARGE_MAPS: &[&str] = &["q2ctf5", "old/kmdm3", "xdm2", "xdm6"];

/// Fixed boss arena origins per named map.
pub(crate) const BOSS_ARENAS: &[(&str, WorldPoint)] = &[
    ("q2dm1", WorldPoint::new(1184.0, 568.0, 704.0)),
    ("rdm14", WorldPoint::new(1248.0, 664.0, 896.0)),
    ("q2dm2", WorldPoint::new(128.0, -960.0, 704.0)),
    ("q2dm8", WorldPoint::new(112.0, 1216.0, 88.0)),
    ("q2ctf5", WorldPoint::new(2432.0, -960.0, 168.0)),
    ("xdm2", WorldPoint::new(-232.0, 472.0, 424.0)),
    ("q64/dm7", WorldPoint::new(64.0, 224.0, 120.0)),
    ("q64\\dm7", WorldPoint::new(64.0, 224.0, 120.0)),
    ("q64/dm10", WorldPoint::new(-304.0, 512.0, -92.0)),
    ("q64\\dm10", WorldPoint::new(-304.0, 512.0, -92.0)),
    ("q64/dm2", WorldPoint::new(1328.0, -256.0, 272.0)),
    ("q64\\dm2", WorldPoint::new(1328.0, -256.0, 272.0)),
];

#[cfg(test)]
mod tests {
    use super::{
        benefit, boss, boss_override, bosses_for, item, item_drop_weight, monster, BENEFITS,
        BOSSES, ITEMS, MONSTERS,
    };
    use crate::{BenefitId, BossId, ItemId, MapSize, MonsterId};

    #[test]
    fn monster_windows_are_well_formed() {
        for spec in MONSTERS {
            if let (Some(min), Some(max)) = (spec.window().min(), spec.window().max()) {
                assert!(min <= max, "{} has an inverted window", spec.class_name());
            }
            assert!(spec.weight() > 0.0, "{} has no weight", spec.class_name());
        }
    }

    #[test]
    fn small_boss_list_has_exactly_three_entries() {
        assert_eq!(bosses_for(MapSize::Small).len(), 3);
    }

    #[test]
    fn boss_lists_reference_catalog_entries() {
        for size in [MapSize::Small, MapSize::Medium, MapSize::Large] {
            for id in bosses_for(size) {
                assert!(boss(*id).is_some());
            }
        }
        for (_, ids) in super::BOSS_OVERRIDES {
            for id in *ids {
                assert!(boss(*id).is_some());
            }
        }
    }

    #[test]
    fn boss_override_substitutes_candidates() {
        let ids = boss_override("q2ctf5").expect("q2ctf5 carries an override");
        assert!(ids.contains(&BossId::new(3)));
        assert!(boss_override("q2dm1").is_none());
    }

    #[test]
    fn benefit_prerequisites_reference_catalog_entries() {
        for spec in BENEFITS {
            if let Some(pre) = spec.prerequisite() {
                assert!(benefit(pre).is_some(), "{} prerequisite dangles", spec.name());
            }
            assert!(spec.weight() > 0.0);
        }
    }

    #[test]
    fn item_windows_are_well_formed() {
        for spec in ITEMS {
            if let (Some(min), Some(max)) = (spec.window().min(), spec.window().max()) {
                assert!(min <= max, "{} has an inverted window", spec.class_name());
            }
            assert!(spec.weight() > 0.0, "{} has no weight", spec.class_name());
        }
    }

    #[test]
    fn item_drop_weight_gates_on_the_window() {
        let chainfist = item(ItemId::new(18)).expect("chainfist entry");
        assert_eq!(chainfist.class_name(), "weapon_chainfist");
        assert!(item_drop_weight(chainfist, 2) > 0.0);
        assert_eq!(item_drop_weight(chainfist, 3), 0.0);

        let bfg = item(ItemId::new(33)).expect("bfg entry");
        assert_eq!(item_drop_weight(bfg, 11), 0.0);
        assert!(item_drop_weight(bfg, 12) > 0.0);
    }

    #[test]
    fn every_level_has_droppable_items() {
        for level in 1..60 {
            assert!(
                ITEMS.iter().any(|spec| item_drop_weight(spec, level) > 0.0),
                "no drops at level {level}"
            );
        }
    }

    #[test]
    fn out_of_range_identifiers_resolve_to_none() {
        assert!(monster(MonsterId::new(u16::MAX)).is_none());
        assert!(boss(BossId::new(u16::MAX)).is_none());
        assert!(benefit(BenefitId::new(u16::MAX)).is_none());
        assert!(item(ItemId::new(u16::MAX)).is_none());
    }

    #[test]
    fn catalog_sizes_match_identifier_space() {
        assert!(MONSTERS.len() < usize::from(u16::MAX));
        assert!(BOSSES.len() < usize::from(u16::MAX));
        assert!(BENEFITS.len() < usize::from(u16::MAX));
        assert!(ITEMS.len() < usize::from(u16::MAX));
    }
}
