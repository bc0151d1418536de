use log::info;
use rand::Rng;

use crate::config::GameConfig;
use crate::effects::{Explosion, GravityField};
use crate::entities::{Avatar, Boss, Enemy};
use crate::projectiles::{Beam, Bomb, BossBomb};

/// Non-negative score. Purchases are refused rather than going below zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score(u32);

impl Score {
    pub fn new(points: u32) -> Self {
        Score(points)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn add(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }

    /// Deducts `cost` if affordable; returns whether it was.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        match self.0.checked_sub(cost) {
            Some(rest) => {
                self.0 = rest;
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Life(u32);

impl Life {
    pub fn new(lives: u32) -> Self {
        Life(lives)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn gain(&mut self) {
        self.0 += 1;
    }

    pub fn lose(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn is_exhausted(&self) -> bool {
        self.0 < 1
    }
}

/// Increasing score thresholds, each worth one life, each paid once.
#[derive(Clone, Debug, PartialEq)]
pub struct LifeMilestones {
    thresholds: Vec<u32>,
    claimed: usize,
}

impl LifeMilestones {
    pub fn new(thresholds: Vec<u32>) -> Self {
        LifeMilestones { thresholds, claimed: 0 }
    }

    /// Claims every unclaimed threshold at or below `score`; returns how many.
    pub fn sweep(&mut self, score: u32) -> u32 {
        let mut gained = 0;
        while let Some(&threshold) = self.thresholds.get(self.claimed) {
            if score < threshold {
                break;
            }
            self.claimed += 1;
            gained += 1;
        }
        gained
    }

    pub fn next_threshold(&self) -> Option<u32> {
        self.thresholds.get(self.claimed).copied()
    }
}

/// Post-hit invulnerability measured as ticks since the last hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraceTimer {
    period: u64,
    last_hit: Option<u64>,
}

impl GraceTimer {
    pub fn new(period: u64) -> Self {
        GraceTimer { period, last_hit: None }
    }

    pub fn start(&mut self, tick: u64) {
        self.last_hit = Some(tick);
    }

    pub fn is_active(&self, tick: u64) -> bool {
        match self.last_hit {
            Some(hit) => self.period > 0 && tick.saturating_sub(hit) <= self.period,
            None => false,
        }
    }
}

/// At most one boss per run, guarded by a one-shot flag.
#[derive(Default)]
pub struct BossSlot {
    boss: Option<Boss>,
    spawned: bool,
}

impl BossSlot {
    /// Installs the boss once `tick` reaches the arrival tick; later calls do nothing.
    pub fn try_spawn(&mut self, tick: u64, config: &GameConfig, rng: &mut impl Rng) -> bool {
        if self.spawned || tick < config.boss_arrival_tick {
            return false;
        }
        self.spawned = true;
        self.boss = Some(Boss::new(rng, config));
        info!("Boss arrived at tick {}", tick);
        true
    }

    pub fn has_spawned(&self) -> bool {
        self.spawned
    }

    pub fn get(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut Boss> {
        self.boss.as_mut()
    }

    /// Test hook: places a specific boss and closes the guard.
    pub fn install(&mut self, boss: Boss) {
        self.spawned = true;
        self.boss = Some(boss);
    }
}

/// Every live entity plus the counters they affect. Owned by the driver.
pub struct World {
    pub config: GameConfig,
    pub avatar: Avatar,
    pub enemies: Vec<Enemy>,
    pub boss: BossSlot,
    pub beams: Vec<Beam>,
    pub bombs: Vec<Bomb>,
    pub boss_bombs: Vec<BossBomb>,
    pub gravity_fields: Vec<GravityField>,
    pub explosions: Vec<Explosion>,
    pub score: Score,
    pub life: Life,
    pub milestones: LifeMilestones,
    pub bomb_grace: GraceTimer,
    pub boss_bomb_grace: GraceTimer,
}

impl World {
    pub fn new(config: GameConfig) -> Self {
        World {
            avatar: Avatar::new(config.avatar_start, &config),
            enemies: Vec::new(),
            boss: BossSlot::default(),
            beams: Vec::new(),
            bombs: Vec::new(),
            boss_bombs: Vec::new(),
            gravity_fields: Vec::new(),
            explosions: Vec::new(),
            score: Score::default(),
            life: Life::new(config.starting_lives),
            milestones: LifeMilestones::new(config.life_up_thresholds()),
            bomb_grace: GraceTimer::new(config.bomb_grace_ticks),
            boss_bomb_grace: GraceTimer::new(config.boss_bomb_grace_ticks),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spending_refuses_when_short() {
        let mut score = Score::new(49);
        assert!(!score.try_spend(50));
        assert_eq!(score.value(), 49);
        score.add(1);
        assert!(score.try_spend(50));
        assert_eq!(score.value(), 0);
    }

    #[test]
    fn life_saturates_at_zero() {
        let mut life = Life::new(1);
        life.lose();
        life.lose();
        assert_eq!(life.value(), 0);
        assert!(life.is_exhausted());
    }

    #[test]
    fn milestone_claimed_once_across_dips() {
        let mut milestones = LifeMilestones::new(vec![300, 600, 900]);
        assert_eq!(milestones.sweep(250), 0);
        assert_eq!(milestones.sweep(310), 1);
        // Spending drops below 300 and climbs back: nothing new to claim.
        assert_eq!(milestones.sweep(200), 0);
        assert_eq!(milestones.sweep(320), 0);
        assert_eq!(milestones.next_threshold(), Some(600));
        assert_eq!(milestones.sweep(950), 2);
        assert_eq!(milestones.sweep(5000), 0);
    }

    #[test]
    fn grace_window_counts_elapsed_ticks() {
        let mut grace = GraceTimer::new(100);
        assert!(!grace.is_active(0));
        grace.start(10);
        assert!(grace.is_active(10));
        assert!(grace.is_active(110));
        assert!(!grace.is_active(111));
    }

    #[test]
    fn zero_period_grace_never_blocks() {
        let mut grace = GraceTimer::new(0);
        grace.start(5);
        assert!(!grace.is_active(5));
    }

    #[test]
    fn boss_spawns_exactly_once() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut slot = BossSlot::default();
        assert!(!slot.try_spawn(config.boss_arrival_tick - 1, &config, &mut rng));
        assert!(slot.try_spawn(config.boss_arrival_tick, &config, &mut rng));
        assert!(!slot.try_spawn(config.boss_arrival_tick + 1, &config, &mut rng));
        assert!(slot.has_spawned());
        assert!(slot.get().is_some());
    }
}
