// Player defaults
pub const DEFAULT_PLAYER_NAME: &str = "The Apprentice";
pub const BASE_MAX_HP: u32 = 100;
pub const STARTING_LEVEL: u32 = 1;

// Progression constants
pub const XP_PER_LEVEL: u32 = 100;
pub const HP_PER_LEVEL: u32 = 20;
pub const DEFAULT_KILL_XP: u32 = 50;
pub const FRAGMENTS_REQUIRED: usize = 3;

// Combat variance (inclusive ranges)
pub const PLAYER_ATTACK_VARIANCE: i64 = 2;
pub const ENEMY_ATTACK_VARIANCE: i64 = 3;
pub const MIN_DAMAGE: u32 = 1;

// Only this many battle log lines are ever shown
pub const VISIBLE_LOG_ENTRIES: usize = 3;

// Pacing between an action's resolution and its follow-up commit
pub const ACTION_SETTLE_MS: u64 = 1000;
pub const ENEMY_TURN_DELAY_MS: u64 = 1500;
pub const BATTLE_END_DELAY_MS: u64 = 1500;

// Local fallback stats when enemy enrichment fails
pub const FALLBACK_ENEMY_HP: u32 = 35;
pub const FALLBACK_ENEMY_ATTACK: u32 = 8;
pub const FALLBACK_ENEMY_DEFENSE: u32 = 5;
pub const FALLBACK_BOSS_HP: u32 = 100;
pub const FALLBACK_BOSS_ATTACK: u32 = 15;
pub const FALLBACK_BOSS_DEFENSE: u32 = 10;
pub const FALLBACK_ENEMY_DESCRIPTION: &str = "A formidable enemy";
pub const FALLBACK_ENEMY_EMOJI: &str = "👹";

// Narrative collaborator
pub const GUARDIAN_NAME: &str = "Guardian of the Library";
pub const NARRATIVE_TIMEOUT_SECS: u64 = 10;

// Save system
pub const DEFAULT_SAVE_KEY: &str = "alexandriaGame";
