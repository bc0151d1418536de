use rand::Rng;
use log::debug;

use crate::config::GameConfig;
use crate::constants::{AVATAR_SIZE, BOSS_SIZE, ENEMY_SIZE};
use crate::presentation::Sprite;
use crate::terminal_io::KeyState;
use crate::types::{fully_inside, Arena, Rect, Vector2D};

/// Everything an entity may look at while advancing one tick.
pub struct UpdateContext<'a> {
    pub arena: &'a Arena,
    pub keys: &'a KeyState,
    pub score: u32,
    /// Avatar center after the avatar moved this tick.
    pub anchor: Vector2D,
    pub config: &'a GameConfig,
}

/// Shared contract of every object living in the arena.
pub trait Entity {
    fn rect(&self) -> &Rect;

    fn update(&mut self, ctx: &UpdateContext);

    fn is_alive(&self) -> bool {
        true
    }

    fn sprite(&self) -> Sprite;

    fn collides_with<E: Entity>(&self, other: &E) -> bool
    where
        Self: Sized,
    {
        self.rect().intersects(other.rect())
    }
}

/// Advances every member of a group and drops the ones that died.
pub fn update_group<E: Entity>(group: &mut Vec<E>, ctx: &UpdateContext) {
    group.retain_mut(|entity| {
        entity.update(ctx);
        entity.is_alive()
    });
}

// --- Avatar ---

/// The eight compass octants, counter-clockwise from east.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::UpRight,
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Direction::Right),
            (1, -1) => Some(Direction::UpRight),
            (0, -1) => Some(Direction::Up),
            (-1, -1) => Some(Direction::UpLeft),
            (-1, 0) => Some(Direction::Left),
            (-1, 1) => Some(Direction::DownLeft),
            (0, 1) => Some(Direction::Down),
            (1, 1) => Some(Direction::DownRight),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Heading in degrees, 0 = east, counter-clockwise positive.
    pub fn degrees(self) -> f64 {
        45.0 * self.index() as f64
    }
}

/// One pre-rendered avatar pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvatarSprite {
    pub glyph: char,
    /// Rotation applied to the base image, in degrees.
    pub rotation: f64,
    /// The base image faces left; poses heading right are mirrored.
    pub mirrored: bool,
}

impl AvatarSprite {
    fn prerender(direction: Direction) -> Self {
        let (glyph, rotation, mirrored) = match direction {
            Direction::Right => ('→', 0.0, true),
            Direction::UpRight => ('↗', 45.0, true),
            Direction::Up => ('↑', 90.0, true),
            Direction::UpLeft => ('↖', -45.0, false),
            Direction::Left => ('←', 0.0, false),
            Direction::DownLeft => ('↙', 45.0, false),
            Direction::Down => ('↓', -90.0, true),
            Direction::DownRight => ('↘', -45.0, true),
        };
        AvatarSprite { glyph, rotation, mirrored }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Hyper { remaining: i32 },
}

/// Short-lived facial cue shown after kills and hits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mood {
    #[default]
    Neutral,
    Joy,
    Sad,
}

pub struct Avatar {
    pub rect: Rect,
    pub facing: Direction,
    pub speed: f64,
    pub mode: Mode,
    normal_speed: f64,
    boost_speed: f64,
    mood: Mood,
    mood_ticks: u32,
    mood_cue_ticks: u32,
    sprites: [AvatarSprite; 8],
}

impl Avatar {
    pub fn new(center: Vector2D, config: &GameConfig) -> Self {
        Avatar {
            rect: Rect::from_center(center, AVATAR_SIZE),
            facing: Direction::default(),
            speed: config.avatar_speed,
            mode: Mode::Normal,
            normal_speed: config.avatar_speed,
            boost_speed: config.avatar_boost_speed,
            mood: Mood::Neutral,
            mood_ticks: 0,
            mood_cue_ticks: config.mood_cue_ticks,
            sprites: Direction::ALL.map(AvatarSprite::prerender),
        }
    }

    /// Picks the movement speed for this tick from the boost key.
    pub fn set_boost(&mut self, held: bool) {
        self.speed = if held { self.boost_speed } else { self.normal_speed };
    }

    pub fn activate_hyper(&mut self, duration: i32) {
        self.mode = Mode::Hyper { remaining: duration };
    }

    pub fn is_hyper(&self) -> bool {
        matches!(self.mode, Mode::Hyper { .. })
    }

    pub fn cheer(&mut self) {
        self.set_mood(Mood::Joy);
    }

    pub fn grieve(&mut self) {
        self.set_mood(Mood::Sad);
    }

    fn set_mood(&mut self, mood: Mood) {
        self.mood = mood;
        self.mood_ticks = self.mood_cue_ticks;
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn current_sprite(&self) -> &AvatarSprite {
        &self.sprites[self.facing.index()]
    }
}

impl Entity for Avatar {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn update(&mut self, ctx: &UpdateContext) {
        let (dx, dy) = ctx.keys.delta();
        let displacement = Vector2D::new(dx as f64, dy as f64).scale(self.speed);
        self.rect.translate(displacement);
        if !fully_inside(&self.rect, ctx.arena) {
            // All-or-nothing: leaving on either axis cancels the whole step.
            self.rect.translate(displacement.scale(-1.0));
        }
        if let Some(facing) = Direction::from_delta(dx, dy) {
            self.facing = facing;
        }

        if let Mode::Hyper { remaining } = self.mode {
            let remaining = remaining - 1;
            self.mode = if remaining < 0 {
                debug!("Hyper mode expired");
                Mode::Normal
            } else {
                Mode::Hyper { remaining }
            };
        }

        if self.mood_ticks > 0 {
            self.mood_ticks -= 1;
            if self.mood_ticks == 0 {
                self.mood = Mood::Neutral;
            }
        }
    }

    fn sprite(&self) -> Sprite {
        Sprite::Avatar {
            pose: *self.current_sprite(),
            mood: self.mood,
            hyper: self.is_hyper(),
        }
    }
}

// --- Enemy & Boss ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DescentState {
    Descending,
    Holding,
}

/// Fall until the stop altitude, then hold and drop bombs on an interval.
#[derive(Clone, Debug, PartialEq)]
pub struct Descent {
    pub velocity: f64,
    pub stop_altitude: f64,
    pub state: DescentState,
    pub drop_interval: u64,
}

impl Descent {
    pub fn new(speed: f64, stop_altitude: f64, drop_interval: u64) -> Self {
        Descent {
            velocity: speed,
            stop_altitude,
            state: DescentState::Descending,
            drop_interval,
        }
    }

    fn step(&mut self, rect: &mut Rect) {
        if self.state == DescentState::Descending && rect.center().y > self.stop_altitude {
            self.velocity = 0.0;
            self.state = DescentState::Holding;
        }
        rect.y += self.velocity;
    }

    pub fn ready_to_drop(&self, tick: u64) -> bool {
        self.state == DescentState::Holding && self.drop_interval > 0 && tick % self.drop_interval == 0
    }
}

pub struct Enemy {
    pub rect: Rect,
    pub descent: Descent,
    /// One of three alien designs.
    pub variant: u8,
}

impl Enemy {
    pub fn new(rng: &mut impl Rng, config: &GameConfig) -> Self {
        let arena = &config.arena;
        let x = rng.gen_range(0.0..=arena.width);
        let stop_altitude = rng.gen_range(config.enemy_min_stop_altitude..=arena.height / 2.0);
        let (min_interval, max_interval) = config.enemy_bomb_interval;
        let interval = rng.gen_range(min_interval..=max_interval);
        Enemy {
            rect: Rect::from_center(Vector2D::new(x, 0.0), ENEMY_SIZE),
            descent: Descent::new(config.enemy_descent_speed, stop_altitude, interval),
            variant: rng.gen_range(0..3),
        }
    }
}

impl Entity for Enemy {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn update(&mut self, _ctx: &UpdateContext) {
        self.descent.step(&mut self.rect);
    }

    fn sprite(&self) -> Sprite {
        Sprite::Enemy { variant: self.variant }
    }
}

pub struct Boss {
    pub rect: Rect,
    pub descent: Descent,
    pub hit_points: i32,
}

impl Boss {
    pub fn new(rng: &mut impl Rng, config: &GameConfig) -> Self {
        let (min_interval, max_interval) = config.boss_bomb_interval;
        let interval = rng.gen_range(min_interval..=max_interval);
        Boss {
            rect: Rect::from_center(Vector2D::new(config.arena.width / 2.0, 0.0), BOSS_SIZE),
            descent: Descent::new(config.enemy_descent_speed, config.boss_stop_altitude, interval),
            hit_points: config.boss_hit_points,
        }
    }

    pub fn take_hit(&mut self) {
        self.hit_points -= 1;
    }

    pub fn is_defeated(&self) -> bool {
        self.hit_points <= 0
    }
}

impl Entity for Boss {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn update(&mut self, _ctx: &UpdateContext) {
        self.descent.step(&mut self.rect);
    }

    fn sprite(&self) -> Sprite {
        Sprite::Boss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn context<'a>(arena: &'a Arena, keys: &'a KeyState, config: &'a GameConfig) -> UpdateContext<'a> {
        UpdateContext { arena, keys, score: 0, anchor: arena.center(), config }
    }

    #[test]
    fn direction_from_every_nonzero_delta() {
        for dx in -1..=1 {
            for dy in -1..=1 {
                let dir = Direction::from_delta(dx, dy);
                assert_eq!(dir.is_none(), dx == 0 && dy == 0);
            }
        }
        assert_eq!(Direction::from_delta(1, -1), Some(Direction::UpRight));
        assert_eq!(Direction::Down.degrees(), 270.0);
    }

    #[test]
    fn avatar_moves_and_faces_combined_delta() {
        let config = GameConfig::default();
        let arena = config.arena;
        let keys = KeyState { up: true, left: true, ..KeyState::default() };
        let mut avatar = Avatar::new(Vector2D::new(800.0, 450.0), &config);
        avatar.update(&context(&arena, &keys, &config));
        assert_eq!(avatar.rect.center(), Vector2D::new(790.0, 440.0));
        assert_eq!(avatar.facing, Direction::UpLeft);
        assert_eq!(avatar.current_sprite().glyph, '↖');
    }

    #[test]
    fn avatar_boundary_revert_is_all_or_nothing() {
        let config = GameConfig::default();
        let arena = config.arena;
        // Touching the left wall: moving up-left must not slide upward.
        let mut avatar = Avatar::new(Vector2D::new(55.0, 450.0), &config);
        let keys = KeyState { up: true, left: true, ..KeyState::default() };
        avatar.update(&context(&arena, &keys, &config));
        assert_eq!(avatar.rect.center(), Vector2D::new(55.0, 450.0));
        assert_eq!(avatar.facing, Direction::UpLeft);
    }

    #[test]
    fn opposing_keys_keep_facing() {
        let config = GameConfig::default();
        let arena = config.arena;
        let keys = KeyState { left: true, right: true, ..KeyState::default() };
        let mut avatar = Avatar::new(Vector2D::new(800.0, 450.0), &config);
        avatar.update(&context(&arena, &keys, &config));
        assert_eq!(avatar.facing, Direction::Right);
        assert_eq!(avatar.rect.center(), Vector2D::new(800.0, 450.0));
    }

    #[test]
    fn boost_doubles_step() {
        let config = GameConfig::default();
        let arena = config.arena;
        let keys = KeyState { right: true, boost: true, ..KeyState::default() };
        let mut avatar = Avatar::new(Vector2D::new(800.0, 450.0), &config);
        avatar.set_boost(keys.boost);
        avatar.update(&context(&arena, &keys, &config));
        assert_eq!(avatar.rect.center().x, 820.0);
        avatar.set_boost(false);
        assert_eq!(avatar.speed, config.avatar_speed);
    }

    #[test]
    fn hyper_expires_after_counter_goes_negative() {
        let config = GameConfig::default();
        let arena = config.arena;
        let keys = KeyState::default();
        let mut avatar = Avatar::new(arena.center(), &config);
        avatar.activate_hyper(2);
        for _ in 0..3 {
            assert!(avatar.is_hyper());
            avatar.update(&context(&arena, &keys, &config));
        }
        assert_eq!(avatar.mode, Mode::Normal);
    }

    #[test]
    fn mood_cue_fades() {
        let config = GameConfig::default();
        let arena = config.arena;
        let keys = KeyState::default();
        let mut avatar = Avatar::new(arena.center(), &config);
        avatar.grieve();
        assert_eq!(avatar.mood(), Mood::Sad);
        for _ in 0..config.mood_cue_ticks {
            avatar.update(&context(&arena, &keys, &config));
        }
        assert_eq!(avatar.mood(), Mood::Neutral);
    }

    #[test]
    fn enemy_holds_after_passing_stop_altitude() {
        let config = GameConfig::default();
        let arena = config.arena;
        let keys = KeyState::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut enemy = Enemy::new(&mut rng, &config);
        enemy.descent.stop_altitude = 20.0;
        enemy.descent.drop_interval = 5;
        let ctx = context(&arena, &keys, &config);
        for _ in 0..4 {
            enemy.update(&ctx);
        }
        // 0 -> 6 -> 12 -> 18 -> 24, the check happens before the move.
        assert_eq!(enemy.descent.state, DescentState::Descending);
        enemy.update(&ctx);
        assert_eq!(enemy.descent.state, DescentState::Holding);
        let parked = enemy.rect.center().y;
        enemy.update(&ctx);
        assert_eq!(enemy.rect.center().y, parked);
        assert!(enemy.descent.ready_to_drop(10));
        assert!(!enemy.descent.ready_to_drop(11));
    }

    #[test]
    fn enemy_reads_descent_and_drop_interval_from_config() {
        let config = GameConfig {
            enemy_descent_speed: 2.5,
            enemy_bomb_interval: (7, 7),
            mood_cue_ticks: 3,
            ..GameConfig::default()
        };
        let keys = KeyState::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut enemy = Enemy::new(&mut rng, &config);
        assert_eq!(enemy.descent.drop_interval, 7);
        enemy.update(&context(&config.arena, &keys, &config));
        assert_eq!(enemy.rect.center().y, 2.5);

        let mut avatar = Avatar::new(config.arena.center(), &config);
        avatar.cheer();
        for _ in 0..3 {
            assert_eq!(avatar.mood(), Mood::Joy);
            avatar.update(&context(&config.arena, &keys, &config));
        }
        assert_eq!(avatar.mood(), Mood::Neutral);
    }

    #[test]
    fn descending_enemy_never_drops() {
        let descent = Descent::new(6.0, 100.0, 5);
        assert!(!descent.ready_to_drop(0));
    }

    #[test]
    fn boss_uses_fixed_altitude_and_hit_points() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut boss = Boss::new(&mut rng, &config);
        assert_eq!(boss.descent.stop_altitude, 200.0);
        assert_eq!(boss.hit_points, 50);
        assert!((20..=100).contains(&boss.descent.drop_interval));
        boss.hit_points = 1;
        boss.take_hit();
        assert!(boss.is_defeated());
    }
}
