// --- Arena & timing ---
pub const ARENA_WIDTH: f64 = 1600.0;
pub const ARENA_HEIGHT: f64 = 900.0;
pub const TICKS_PER_SECOND: u32 = 50;
pub const BACKGROUND_PHASE_SECONDS: u64 = 30; // Morning -> evening -> night

// --- Avatar ---
pub const AVATAR_START_X: f64 = 900.0;
pub const AVATAR_START_Y: f64 = 400.0;
pub const AVATAR_SIZE: (f64, f64) = (100.0, 100.0);
pub const AVATAR_SPEED: f64 = 10.0;
pub const AVATAR_BOOST_SPEED: f64 = 20.0;
pub const MOOD_CUE_TICKS: u32 = 25;
pub const STARTING_LIVES: u32 = 3;

// --- Enemies ---
pub const ENEMY_SPAWN_INTERVAL: u64 = 200; // Ticks between enemy spawns
pub const ENEMY_SIZE: (f64, f64) = (64.0, 64.0);
pub const ENEMY_DESCENT_SPEED: f64 = 6.0;
pub const ENEMY_MIN_STOP_ALTITUDE: f64 = 50.0;
pub const ENEMY_BOMB_INTERVAL: (u64, u64) = (50, 300);

// --- Boss ---
pub const BOSS_ARRIVAL_TICK: u64 = 1000;
pub const BOSS_SIZE: (f64, f64) = (320.0, 320.0);
pub const BOSS_STOP_ALTITUDE: f64 = 200.0;
pub const BOSS_HIT_POINTS: i32 = 50;
pub const BOSS_BOMB_INTERVAL: (u64, u64) = (20, 100);

// --- Projectiles ---
pub const BEAM_SPEED: f64 = 10.0;
pub const BEAM_SIZE: (f64, f64) = (60.0, 20.0);
pub const SPREAD_BEAM_COUNT: usize = 5;
pub const SPREAD_ARC_DEGREES: f64 = 50.0; // Half-arc, beams span -50..=+50
pub const BOMB_SPEED: f64 = 6.0;
pub const BOMB_RADIUS: (u32, u32) = (10, 50);
pub const BOMB_BOUNCE_SCORE: u32 = 100;
pub const BOMB_ACCELERATION_SCORE: u32 = 200;
pub const BOMB_ACCELERATION_FACTOR: f64 = 1.15;
pub const BOMB_MAX_SPEED: f64 = 60.0;
pub const BOSS_BOMB_SPEED: (u32, u32) = (2, 10);
pub const BOSS_BOMB_JITTER: f64 = 200.0;

// --- Power-ups ---
pub const HYPER_COST: u32 = 100;
pub const HYPER_DURATION: i32 = 500;
pub const GRAVITY_COST: u32 = 50;
pub const GRAVITY_DURATION: i32 = 500;
pub const GRAVITY_RADIUS: f64 = 200.0;

// --- Effects ---
pub const ACTOR_EXPLOSION_LIFE: i32 = 100;
pub const BOMB_EXPLOSION_LIFE: i32 = 50;
pub const EXPLOSION_SIZE: (f64, f64) = (100.0, 90.0);
pub const EXPLOSION_FRAME_TICKS: i32 = 10;

// --- Scoring ---
pub const SCORE_ENEMY: u32 = 10;
pub const SCORE_BOSS_HIT: u32 = 5;
pub const SCORE_BOMB: u32 = 1;
pub const SCORE_BOSS_DEFEATED: u32 = 1000;
pub const LIFE_UP_STEP: u32 = 300;
pub const LIFE_UP_MILESTONES: u32 = 998;

// --- Damage ---
pub const BOMB_GRACE_TICKS: u64 = 50;
pub const BOSS_BOMB_GRACE_TICKS: u64 = 100;

// --- Terminal states ---
pub const GAME_OVER_PAUSE_MS: u64 = 3000;
pub const VICTORY_PAUSE_MS: u64 = 2000;
