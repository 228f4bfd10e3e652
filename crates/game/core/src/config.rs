/// Combat tuning constants and pacing parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Chebyshev radius of a canister blast.
    pub explosion_radius: u32,
    pub explosion_damage: u32,
    /// Damage dealt each turn to whatever stands on a burning floor.
    pub burn_damage: u32,
    /// Number of its own turns a burning floor survives.
    pub burn_duration: u32,
    pub canister_hp: u32,
    /// Flat damage reduction granted by Block.
    pub block_reduction: u32,
    pub attack_damage: u32,
    pub attack_range: u32,
    /// Maximum search and slide distance of push/pull abilities.
    pub displacement_range: u32,
    pub pacing: PacingConfig,
}

/// Base delays (milliseconds, before the speed multiplier) used by decision schedules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PacingConfig {
    pub shambler_think_ms: u64,
    pub shambler_execute_ms: u64,
    pub brute_think_ms: u64,
    pub brute_step_ms: u64,
    pub brute_execute_ms: u64,
    pub hazard_think_ms: u64,
}

impl CombatConfig {
    pub const DEFAULT_EXPLOSION_RADIUS: u32 = 1;
    pub const DEFAULT_EXPLOSION_DAMAGE: u32 = 6;
    pub const DEFAULT_BURN_DAMAGE: u32 = 2;
    pub const DEFAULT_BURN_DURATION: u32 = 3;
    pub const DEFAULT_CANISTER_HP: u32 = 3;
    pub const DEFAULT_BLOCK_REDUCTION: u32 = 3;
    pub const DEFAULT_ATTACK_DAMAGE: u32 = 5;
    pub const DEFAULT_ATTACK_RANGE: u32 = 1;
    pub const DEFAULT_DISPLACEMENT_RANGE: u32 = 5;

    pub fn new() -> Self {
        Self {
            explosion_radius: Self::DEFAULT_EXPLOSION_RADIUS,
            explosion_damage: Self::DEFAULT_EXPLOSION_DAMAGE,
            burn_damage: Self::DEFAULT_BURN_DAMAGE,
            burn_duration: Self::DEFAULT_BURN_DURATION,
            canister_hp: Self::DEFAULT_CANISTER_HP,
            block_reduction: Self::DEFAULT_BLOCK_REDUCTION,
            attack_damage: Self::DEFAULT_ATTACK_DAMAGE,
            attack_range: Self::DEFAULT_ATTACK_RANGE,
            displacement_range: Self::DEFAULT_DISPLACEMENT_RANGE,
            pacing: PacingConfig::default(),
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            shambler_think_ms: 1000,
            shambler_execute_ms: 500,
            brute_think_ms: 150,
            brute_step_ms: 150,
            brute_execute_ms: 200,
            hazard_think_ms: 0,
        }
    }
}
