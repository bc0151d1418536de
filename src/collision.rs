//! Per-tick collision and scoring pass.
//!
//! Group pairs are tested in a fixed order. Each test works on the live
//! collections as left by the previous one, so a beam or bomb consumed
//! early in the tick can never be counted again later in the same tick.

use log::{debug, info};

use crate::config::GameConfig;
use crate::effects::Explosion;
use crate::entities::{Avatar, Entity};
use crate::presentation::{AudioSink, Sound};
use crate::types::Rect;
use crate::world::World;

/// What the pass decided about the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Continue,
    GameOver,
    Victory,
}

/// Projectiles that can hurt the avatar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attacker {
    Bomb,
    BossBomb,
}

impl Attacker {
    /// Bombs burst on the avatar; boss bombs pass through it.
    fn consumed_on_contact(self) -> bool {
        matches!(self, Attacker::Bomb)
    }

    /// Points for a contact absorbed by hyper mode, if any.
    fn hyper_reward(self, config: &GameConfig) -> Option<u32> {
        match self {
            Attacker::Bomb => Some(config.score_bomb),
            Attacker::BossBomb => None,
        }
    }
}

/// Removes and returns the members of `group` that overlap `target`.
pub fn take_colliding<T: Entity, E: Entity>(group: &mut Vec<T>, target: &E) -> Vec<T> {
    let mut taken = Vec::new();
    let mut i = 0;
    while i < group.len() {
        if group[i].collides_with(target) {
            taken.push(group.remove(i));
        } else {
            i += 1;
        }
    }
    taken
}

/// Tests every member of `a` against the current members of `b`, in order.
/// Returns the rect of each `a` member that touched something and how many
/// `b` members it touched. Touched `b` members are removed when `kill_b`,
/// touching `a` members when `kill_a`.
pub fn collide_groups<A: Entity, B: Entity>(
    a: &mut Vec<A>,
    b: &mut Vec<B>,
    kill_a: bool,
    kill_b: bool,
) -> Vec<(Rect, usize)> {
    let mut hits = Vec::new();
    a.retain(|member| {
        let partners = if kill_b {
            take_colliding(&mut *b, member).len()
        } else {
            b.iter().filter(|other| other.collides_with(member)).count()
        };
        if partners == 0 {
            return true;
        }
        hits.push((*member.rect(), partners));
        !kill_a
    });
    hits
}

/// Runs the full ordered pass for one tick.
pub fn resolve_collisions(world: &mut World, audio: &mut dyn AudioSink, tick: u64) -> Resolution {
    enemies_vs_beams(world, audio);
    boss_vs_beams(world);
    bombs_vs_beams(world, audio);
    bombs_vs_gravity(world, audio);
    boss_bombs_vs_gravity(world, audio);
    claim_life_ups(world);

    for attacker in [Attacker::Bomb, Attacker::BossBomb] {
        let resolution = resolve_strikes(world, attacker, audio, tick);
        if resolution != Resolution::Continue {
            return resolution;
        }
    }

    check_boss_defeated(world, audio)
}

fn enemies_vs_beams(world: &mut World, audio: &mut dyn AudioSink) {
    for (rect, _) in collide_groups(&mut world.enemies, &mut world.beams, true, true) {
        world.explosions.push(Explosion::at(&rect, world.config.actor_explosion_life));
        world.score.add(world.config.score_enemy);
        world.avatar.cheer();
        audio.play(Sound::Explosion);
    }
}

fn boss_vs_beams(world: &mut World) {
    let Some(boss) = world.boss.get_mut() else {
        return;
    };
    let hits = take_colliding(&mut world.beams, &*boss).len();
    for _ in 0..hits {
        world.explosions.push(Explosion::at(&boss.rect, world.config.actor_explosion_life));
        world.score.add(world.config.score_boss_hit);
        boss.take_hit();
    }
    if hits > 0 {
        debug!("Boss took {} hit(s), {} left", hits, boss.hit_points);
    }
}

fn bombs_vs_beams(world: &mut World, audio: &mut dyn AudioSink) {
    for (rect, _) in collide_groups(&mut world.bombs, &mut world.beams, true, true) {
        world.explosions.push(Explosion::at(&rect, world.config.bomb_explosion_life));
        world.score.add(world.config.score_bomb);
        audio.play(Sound::Explosion);
    }
}

fn bombs_vs_gravity(world: &mut World, audio: &mut dyn AudioSink) {
    for (rect, _) in collide_groups(&mut world.bombs, &mut world.gravity_fields, true, false) {
        world.explosions.push(Explosion::at(&rect, world.config.bomb_explosion_life));
        world.score.add(world.config.score_bomb);
        audio.play(Sound::Explosion);
    }
}

fn boss_bombs_vs_gravity(world: &mut World, audio: &mut dyn AudioSink) {
    for (rect, _) in collide_groups(&mut world.boss_bombs, &mut world.gravity_fields, true, false) {
        world.explosions.push(Explosion::at(&rect, world.config.bomb_explosion_life));
        audio.play(Sound::Explosion);
    }
}

fn claim_life_ups(world: &mut World) {
    let gained = world.milestones.sweep(world.score.value());
    for _ in 0..gained {
        world.life.gain();
    }
    if gained > 0 {
        info!("Life up! score {} -> {} lives", world.score.value(), world.life.value());
    }
}

/// One damage routine for both attacker kinds.
///
/// Bombs touching the avatar always burst, grace window or not; the window
/// only spares the life. Boss bombs stay in play, so while their window is
/// open the contact is skipped outright.
fn resolve_strikes(world: &mut World, attacker: Attacker, audio: &mut dyn AudioSink, tick: u64) -> Resolution {
    let mut grace = match attacker {
        Attacker::Bomb => world.bomb_grace,
        Attacker::BossBomb => world.boss_bomb_grace,
    };
    let consume = attacker.consumed_on_contact();
    if !consume && grace.is_active(tick) {
        return Resolution::Continue;
    }

    let contacts = match attacker {
        Attacker::Bomb => strike_contacts(&mut world.bombs, &world.avatar, consume),
        Attacker::BossBomb => strike_contacts(&mut world.boss_bombs, &world.avatar, consume),
    };

    let mut resolution = Resolution::Continue;
    for rect in contacts {
        if world.avatar.is_hyper() {
            if let Some(points) = attacker.hyper_reward(&world.config) {
                world.explosions.push(Explosion::at(&rect, world.config.bomb_explosion_life));
                world.score.add(points);
                audio.play(Sound::Explosion);
            }
            continue;
        }
        // One life per attacker kind per window: a hit opens the window, and
        // every later contact in the same tick lands inside it.
        if grace.is_active(tick) {
            debug!("{:?} absorbed during grace window", attacker);
            continue;
        }

        world.avatar.grieve();
        if world.life.value() >= 2 {
            world.life.lose();
            grace.start(tick);
            info!("Hit by {:?}, {} lives left", attacker, world.life.value());
        } else {
            world.life.lose();
            audio.stop_music();
            audio.play(Sound::Damage);
            info!("Hit by {:?} on the last life", attacker);
            resolution = Resolution::GameOver;
            break;
        }
    }

    match attacker {
        Attacker::Bomb => world.bomb_grace = grace,
        Attacker::BossBomb => world.boss_bomb_grace = grace,
    }
    resolution
}

fn strike_contacts<T: Entity>(group: &mut Vec<T>, avatar: &Avatar, consume: bool) -> Vec<Rect> {
    if consume {
        take_colliding(group, avatar).iter().map(|attacker| *attacker.rect()).collect()
    } else {
        group
            .iter()
            .filter(|attacker| attacker.collides_with(avatar))
            .map(|attacker| *attacker.rect())
            .collect()
    }
}

fn check_boss_defeated(world: &mut World, audio: &mut dyn AudioSink) -> Resolution {
    match world.boss.get() {
        Some(boss) if boss.is_defeated() => {
            world.score.add(world.config.score_boss_defeated);
            world.avatar.cheer();
            audio.stop_music();
            info!("Boss defeated, final score {}", world.score.value());
            Resolution::Victory
        }
        _ => Resolution::Continue,
    }
}
