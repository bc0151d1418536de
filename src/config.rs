use std::time::Duration;

use crate::constants::*;
use crate::types::{Arena, Vector2D};

/// Every tuning knob the simulation reads. Built from `constants` by default.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub arena: Arena,
    pub ticks_per_second: u32,
    /// Seconds each background phase lasts.
    pub background_phase_seconds: u64,

    pub starting_lives: u32,
    pub avatar_start: Vector2D,
    pub avatar_speed: f64,
    pub avatar_boost_speed: f64,
    pub mood_cue_ticks: u32,

    pub enemy_spawn_interval: u64,
    pub enemy_descent_speed: f64,
    pub enemy_min_stop_altitude: f64,
    /// Inclusive range the per-enemy drop interval is drawn from.
    pub enemy_bomb_interval: (u64, u64),
    pub boss_arrival_tick: u64,
    pub boss_hit_points: i32,
    pub boss_stop_altitude: f64,
    pub boss_bomb_interval: (u64, u64),

    pub beam_speed: f64,
    pub spread_beam_count: usize,
    pub spread_half_arc: f64,
    pub bomb_speed: f64,
    pub boss_bomb_speed: (u32, u32),
    pub boss_bomb_jitter: f64,
    pub bomb_bounce_score: u32,
    pub bomb_acceleration_score: u32,
    pub bomb_acceleration_factor: f64,
    pub bomb_max_speed: f64,

    pub hyper_cost: u32,
    pub hyper_duration: i32,
    pub gravity_cost: u32,
    pub gravity_duration: i32,
    pub gravity_radius: f64,

    pub actor_explosion_life: i32,
    pub bomb_explosion_life: i32,

    pub score_enemy: u32,
    pub score_boss_hit: u32,
    pub score_bomb: u32,
    pub score_boss_defeated: u32,
    pub life_up_step: u32,
    pub life_up_milestones: u32,

    pub bomb_grace_ticks: u64,
    pub boss_bomb_grace_ticks: u64,

    pub game_over_pause: Duration,
    pub victory_pause: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            arena: Arena::new(ARENA_WIDTH, ARENA_HEIGHT),
            ticks_per_second: TICKS_PER_SECOND,
            background_phase_seconds: BACKGROUND_PHASE_SECONDS,
            starting_lives: STARTING_LIVES,
            avatar_start: Vector2D::new(AVATAR_START_X, AVATAR_START_Y),
            avatar_speed: AVATAR_SPEED,
            avatar_boost_speed: AVATAR_BOOST_SPEED,
            mood_cue_ticks: MOOD_CUE_TICKS,
            enemy_spawn_interval: ENEMY_SPAWN_INTERVAL,
            enemy_descent_speed: ENEMY_DESCENT_SPEED,
            enemy_min_stop_altitude: ENEMY_MIN_STOP_ALTITUDE,
            enemy_bomb_interval: ENEMY_BOMB_INTERVAL,
            boss_arrival_tick: BOSS_ARRIVAL_TICK,
            boss_hit_points: BOSS_HIT_POINTS,
            boss_stop_altitude: BOSS_STOP_ALTITUDE,
            boss_bomb_interval: BOSS_BOMB_INTERVAL,
            beam_speed: BEAM_SPEED,
            spread_beam_count: SPREAD_BEAM_COUNT,
            spread_half_arc: SPREAD_ARC_DEGREES,
            bomb_speed: BOMB_SPEED,
            boss_bomb_speed: BOSS_BOMB_SPEED,
            boss_bomb_jitter: BOSS_BOMB_JITTER,
            bomb_bounce_score: BOMB_BOUNCE_SCORE,
            bomb_acceleration_score: BOMB_ACCELERATION_SCORE,
            bomb_acceleration_factor: BOMB_ACCELERATION_FACTOR,
            bomb_max_speed: BOMB_MAX_SPEED,
            hyper_cost: HYPER_COST,
            hyper_duration: HYPER_DURATION,
            gravity_cost: GRAVITY_COST,
            gravity_duration: GRAVITY_DURATION,
            gravity_radius: GRAVITY_RADIUS,
            actor_explosion_life: ACTOR_EXPLOSION_LIFE,
            bomb_explosion_life: BOMB_EXPLOSION_LIFE,
            score_enemy: SCORE_ENEMY,
            score_boss_hit: SCORE_BOSS_HIT,
            score_bomb: SCORE_BOMB,
            score_boss_defeated: SCORE_BOSS_DEFEATED,
            life_up_step: LIFE_UP_STEP,
            life_up_milestones: LIFE_UP_MILESTONES,
            bomb_grace_ticks: BOMB_GRACE_TICKS,
            boss_bomb_grace_ticks: BOSS_BOMB_GRACE_TICKS,
            game_over_pause: Duration::from_millis(GAME_OVER_PAUSE_MS),
            victory_pause: Duration::from_millis(VICTORY_PAUSE_MS),
        }
    }
}

impl GameConfig {
    /// Score thresholds that each grant one extra life: step, 2*step, ...
    pub fn life_up_thresholds(&self) -> Vec<u32> {
        (1..=self.life_up_milestones)
            .map(|n| n.saturating_mul(self.life_up_step))
            .collect()
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second.max(1) as f64)
    }
}

/// Options taken from the command line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliArgs {
    /// `Some((width, height))` when running headless against a screen buffer.
    pub debug: Option<(u16, u16)>,
    pub max_frames: Option<u64>,
    pub seed: Option<u64>,
}

impl CliArgs {
    /// `--debug [width height [max_frames]]`, `--seed N`, or a bare frame cap.
    pub fn parse(args: &[String]) -> Self {
        let mut cli = CliArgs::default();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--debug" => {
                    let mut width = 80;
                    let mut height = 24;
                    if i + 2 < args.len() {
                        if let (Ok(w), Ok(h)) = (args[i + 1].parse::<u16>(), args[i + 2].parse::<u16>()) {
                            width = w;
                            height = h;
                            i += 2;
                            if let Some(Ok(frames)) = args.get(i + 1).map(|a| a.parse::<u64>()) {
                                cli.max_frames = Some(frames);
                                i += 1;
                            }
                        }
                    }
                    cli.debug = Some((width, height));
                }
                "--seed" => {
                    cli.seed = args.get(i + 1).and_then(|a| a.parse().ok());
                    i += 1;
                }
                other => {
                    if let Ok(frames) = other.parse::<u64>() {
                        cli.max_frames = Some(frames);
                    }
                }
            }
            i += 1;
        }
        cli
    }
}
