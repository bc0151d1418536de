use rand::Rng;
use log::debug;

use crate::config::GameConfig;
use crate::constants::{BEAM_SIZE, BOMB_RADIUS};
use crate::entities::{Avatar, Boss, Enemy, Entity, UpdateContext};
use crate::presentation::Sprite;
use crate::types::{direction, fully_inside, in_bounds, Rect, Vector2D};

// --- Beam ---

pub struct Beam {
    pub rect: Rect,
    pub velocity: Vector2D,
    pub speed: f64,
    /// Heading in degrees, 0 = east, counter-clockwise positive.
    pub degrees: f64,
    alive: bool,
}

impl Beam {
    /// Fires along the avatar's facing, rotated by `offset` degrees.
    pub fn new(avatar: &Avatar, offset: f64, config: &GameConfig) -> Self {
        let degrees = avatar.facing.degrees() + offset;
        let velocity = Vector2D::from_degrees(degrees);
        let center = avatar.rect.center().add(Vector2D::new(
            avatar.rect.width * velocity.x,
            avatar.rect.height * velocity.y,
        ));
        Beam {
            rect: Rect::from_center(center, rotated_extent(BEAM_SIZE, degrees)),
            velocity,
            speed: config.beam_speed,
            degrees,
            alive: true,
        }
    }
}

/// Bounding box of a `size` sprite rotated by `degrees`.
fn rotated_extent((width, height): (f64, f64), degrees: f64) -> (f64, f64) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (
        (width * cos.abs() + height * sin.abs()).max(1.0),
        (width * sin.abs() + height * cos.abs()).max(1.0),
    )
}

/// Offsets for `count` beams spread evenly across `-half_arc..=half_arc`.
pub fn spread_angles(count: usize, half_arc: f64) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let step = 2.0 * half_arc / (n - 1) as f64;
            (0..n).map(|i| -half_arc + step * i as f64).collect()
        }
    }
}

pub fn spread_fire(avatar: &Avatar, config: &GameConfig) -> Vec<Beam> {
    spread_angles(config.spread_beam_count, config.spread_half_arc)
        .into_iter()
        .map(|offset| Beam::new(avatar, offset, config))
        .collect()
}

impl Entity for Beam {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn update(&mut self, ctx: &UpdateContext) {
        self.rect.translate(self.velocity.scale(self.speed));
        if !fully_inside(&self.rect, ctx.arena) {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn sprite(&self) -> Sprite {
        Sprite::Beam { degrees: self.degrees }
    }
}

// --- Bomb ---

pub const BOMB_COLORS: [(u8, u8, u8); 6] = [
    (255, 0, 0),
    (0, 255, 0),
    (0, 0, 255),
    (255, 255, 0),
    (255, 0, 255),
    (0, 255, 255),
];

pub struct Bomb {
    pub rect: Rect,
    pub velocity: Vector2D,
    pub speed: f64,
    pub color: usize,
    alive: bool,
}

impl Bomb {
    /// Dropped from the bottom of `enemy`, aimed at where the avatar is now.
    pub fn new(enemy: &Enemy, avatar: &Avatar, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let radius = rng.gen_range(BOMB_RADIUS.0..=BOMB_RADIUS.1) as f64;
        let color = rng.gen_range(0..BOMB_COLORS.len());
        let origin = enemy.rect.center().add(Vector2D::new(0.0, enemy.rect.height / 2.0));
        Bomb {
            rect: Rect::from_center(origin, (2.0 * radius, 2.0 * radius)),
            velocity: direction(&enemy.rect, &avatar.rect),
            speed: config.bomb_speed,
            color,
            alive: true,
        }
    }

    /// Points the velocity back inside on every axis the rect has crossed.
    fn bounce(&mut self, ctx: &UpdateContext) {
        let (horizontal, vertical) = in_bounds(&self.rect, ctx.arena);
        if !horizontal {
            if self.rect.left() < 0.0 {
                self.velocity.x = self.velocity.x.abs();
            } else {
                self.velocity.x = -self.velocity.x.abs();
            }
        }
        if !vertical {
            if self.rect.top() < 0.0 {
                self.velocity.y = self.velocity.y.abs();
            } else {
                self.velocity.y = -self.velocity.y.abs();
            }
        }
    }
}

impl Entity for Bomb {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn update(&mut self, ctx: &UpdateContext) {
        self.rect.translate(self.velocity.scale(self.speed));
        if !fully_inside(&self.rect, ctx.arena) {
            if ctx.score < ctx.config.bomb_bounce_score {
                self.alive = false;
                return;
            }
            debug!("Bomb bounced at ({:.0}, {:.0})", self.rect.x, self.rect.y);
            self.bounce(ctx);
        }
        if ctx.score >= ctx.config.bomb_acceleration_score {
            self.speed = (self.speed * ctx.config.bomb_acceleration_factor).min(ctx.config.bomb_max_speed);
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn sprite(&self) -> Sprite {
        Sprite::Bomb { color: self.color }
    }
}

// --- Boss bomb ---

pub struct BossBomb {
    pub rect: Rect,
    pub velocity: Vector2D,
    pub speed: f64,
    alive: bool,
}

impl BossBomb {
    /// Dropped below the boss with horizontal jitter and a random speed.
    pub fn new(boss: &Boss, avatar: &Avatar, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let radius = rng.gen_range(BOMB_RADIUS.0..=BOMB_RADIUS.1) as f64;
        let jitter = rng.gen_range(-config.boss_bomb_jitter..config.boss_bomb_jitter);
        let (min_speed, max_speed) = config.boss_bomb_speed;
        let origin = boss.rect.center().add(Vector2D::new(jitter, boss.rect.height / 2.0));
        BossBomb {
            rect: Rect::from_center(origin, (2.0 * radius, 2.0 * radius)),
            velocity: direction(&boss.rect, &avatar.rect),
            speed: rng.gen_range(min_speed..=max_speed) as f64,
            alive: true,
        }
    }
}

impl Entity for BossBomb {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn update(&mut self, ctx: &UpdateContext) {
        self.rect.translate(self.velocity.scale(self.speed));
        if !fully_inside(&self.rect, ctx.arena) {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn sprite(&self) -> Sprite {
        Sprite::BossBomb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entities::Direction;
    use crate::terminal_io::KeyState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn context<'a>(config: &'a GameConfig, keys: &'a KeyState, score: u32) -> UpdateContext<'a> {
        UpdateContext { arena: &config.arena, keys, score, anchor: config.arena.center(), config }
    }

    fn bomb_at(center: Vector2D, velocity: Vector2D) -> Bomb {
        Bomb {
            rect: Rect::from_center(center, (20.0, 20.0)),
            velocity,
            speed: 6.0,
            color: 0,
            alive: true,
        }
    }

    #[test]
    fn spread_of_five_is_evenly_spaced() {
        assert_eq!(spread_angles(5, 50.0), vec![-50.0, -25.0, 0.0, 25.0, 50.0]);
        assert_eq!(spread_angles(1, 50.0), vec![0.0]);
        assert!(spread_angles(0, 50.0).is_empty());
    }

    #[test]
    fn spread_fire_shares_origin_and_speed() {
        let config = GameConfig::default();
        let avatar = Avatar::new(config.arena.center(), &config);
        let beams = spread_fire(&avatar, &config);
        assert_eq!(beams.len(), 5);
        for (beam, offset) in beams.iter().zip(spread_angles(5, 50.0)) {
            assert_eq!(beam.speed, config.beam_speed);
            assert!((beam.degrees - offset).abs() < 1e-9);
            assert!((beam.velocity.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn beam_follows_facing() {
        let config = GameConfig::default();
        let mut avatar = Avatar::new(config.arena.center(), &config);
        avatar.facing = Direction::Up;
        let beam = Beam::new(&avatar, 0.0, &config);
        assert!(beam.velocity.x.abs() < 1e-9);
        assert!((beam.velocity.y + 1.0).abs() < 1e-9);
        assert!(beam.rect.center().y < avatar.rect.center().y);
        // Rotated upright, the beam is taller than wide.
        assert!(beam.rect.height > beam.rect.width);
    }

    #[test]
    fn beam_dies_leaving_arena() {
        let config = GameConfig::default();
        let keys = KeyState::default();
        let mut avatar = Avatar::new(Vector2D::new(1500.0, 450.0), &config);
        avatar.facing = Direction::Right;
        let mut beam = Beam::new(&avatar, 0.0, &config);
        let ctx = context(&config, &keys, 0);
        for _ in 0..5 {
            beam.update(&ctx);
        }
        assert!(!beam.is_alive());
    }

    #[test]
    fn bomb_below_bounce_tier_is_removed() {
        let config = GameConfig::default();
        let keys = KeyState::default();
        let mut bomb = bomb_at(Vector2D::new(1585.0, 450.0), Vector2D::new(1.0, 0.0));
        bomb.update(&context(&config, &keys, 99));
        assert!(!bomb.is_alive());
    }

    #[test]
    fn bomb_in_bounce_tier_reflects_violated_axis() {
        let config = GameConfig::default();
        let keys = KeyState::default();
        let mut bomb = bomb_at(Vector2D::new(1588.0, 450.0), Vector2D::new(0.6, 0.8));
        bomb.update(&context(&config, &keys, 150));
        assert!(bomb.is_alive());
        assert_eq!(bomb.velocity, Vector2D::new(-0.6, 0.8));
        assert_eq!(bomb.speed, config.bomb_speed);
    }

    #[test]
    fn bomb_accelerates_every_tick_past_threshold() {
        let config = GameConfig::default();
        let keys = KeyState::default();
        let mut bomb = bomb_at(config.arena.center(), Vector2D::new(0.0, 1.0));
        let ctx = context(&config, &keys, 200);
        bomb.update(&ctx);
        assert!((bomb.speed - 6.0 * 1.15).abs() < 1e-9);
        bomb.update(&ctx);
        assert!((bomb.speed - 6.0 * 1.15f64.powi(2)).abs() < 1e-9);
        assert!(bomb.is_alive());
    }

    #[test]
    fn bouncing_bomb_speed_saturates_at_cap() {
        let config = GameConfig::default();
        let keys = KeyState::default();
        let mut bomb = bomb_at(config.arena.center(), Vector2D::new(0.6, 0.8));
        let ctx = context(&config, &keys, 500);
        for _ in 0..20 {
            bomb.update(&ctx);
        }
        // 6 * 1.15^17 already exceeds 60.
        assert_eq!(bomb.speed, config.bomb_max_speed);
        // Bounced bombs never leave, so the cap keeps them from running away.
        for _ in 0..200 {
            bomb.update(&ctx);
            assert_eq!(bomb.speed, config.bomb_max_speed);
        }
        assert!(bomb.is_alive());
        assert!(bomb.rect.center().x.is_finite() && bomb.rect.center().y.is_finite());
    }

    #[test]
    fn bomb_aims_at_avatar() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut enemy = Enemy::new(&mut rng, &config);
        enemy.rect.set_center(Vector2D::new(100.0, 100.0));
        let avatar = Avatar::new(Vector2D::new(400.0, 500.0), &config);
        let bomb = Bomb::new(&enemy, &avatar, &config, &mut rng);
        assert!((bomb.velocity.x - 0.6).abs() < 1e-9);
        assert!((bomb.velocity.y - 0.8).abs() < 1e-9);
        assert_eq!(bomb.rect.center(), Vector2D::new(100.0, 132.0));
        assert!(bomb.color < BOMB_COLORS.len());
    }

    #[test]
    fn boss_bomb_never_bounces() {
        let config = GameConfig::default();
        let keys = KeyState::default();
        let mut rng = StdRng::seed_from_u64(5);
        let boss = Boss::new(&mut rng, &config);
        let avatar = Avatar::new(config.arena.center(), &config);
        let mut bomb = BossBomb::new(&boss, &avatar, &config, &mut rng);
        assert!((2.0..=10.0).contains(&bomb.speed));
        bomb.rect.set_center(Vector2D::new(5.0, 450.0));
        bomb.velocity = Vector2D::new(-1.0, 0.0);
        bomb.update(&context(&config, &keys, 500));
        assert!(!bomb.is_alive());
    }
}
