use std::io;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, info};
use rand::rngs::StdRng;

use crate::collision::{resolve_collisions, Resolution};
use crate::config::GameConfig;
use crate::effects::GravityField;
use crate::entities::{update_group, Enemy, Entity, UpdateContext};
use crate::presentation::{AudioSink, Background, Presentation, RenderSink, Sound};
use crate::projectiles::{spread_fire, Beam, Bomb, BossBomb};
use crate::terminal_io::{Command, InputSource, KeyState, TickInput};
use crate::world::World;

/// Paces the loop. `wait_for_next_tick` blocks until the next frame slot.
pub trait Clock {
    fn wait_for_next_tick(&mut self);
    fn pause(&mut self, duration: Duration);
}

/// Wall-clock governor at a fixed tick rate.
pub struct FixedRateClock {
    frame: Duration,
    next_slot: Option<Instant>,
}

impl FixedRateClock {
    pub fn new(frame: Duration) -> Self {
        FixedRateClock { frame, next_slot: None }
    }

    pub fn for_config(config: &GameConfig) -> Self {
        FixedRateClock::new(config.frame_duration())
    }
}

impl Clock for FixedRateClock {
    fn wait_for_next_tick(&mut self) {
        let now = Instant::now();
        let slot = self.next_slot.unwrap_or(now) + self.frame;
        if slot > now {
            thread::sleep(slot - now);
            self.next_slot = Some(slot);
        } else {
            // Fell behind; resync instead of bursting to catch up.
            self.next_slot = Some(now);
        }
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Never sleeps. Used for headless runs and tests.
#[derive(Default)]
pub struct UnthrottledClock {
    pub ticks: u64,
    pub paused: Duration,
}

impl Clock for UnthrottledClock {
    fn wait_for_next_tick(&mut self) {
        self.ticks += 1;
    }

    fn pause(&mut self, duration: Duration) {
        self.paused += duration;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
    GameOver,
    Victory,
}

pub struct Game {
    pub world: World,
    tick: u64,
    rng: StdRng,
}

impl Game {
    pub fn new(config: GameConfig, rng: StdRng) -> Self {
        Game { world: World::new(config), tick: 0, rng }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.tick / self.world.config.ticks_per_second.max(1) as u64
    }

    /// Advances the simulation by one tick. Rendering is left to the caller.
    pub fn step(&mut self, input: &TickInput, audio: &mut dyn AudioSink) -> TickOutcome {
        if input.commands.contains(&Command::Quit) {
            info!("Quit requested at tick {}", self.tick);
            return TickOutcome::Quit;
        }

        self.world.avatar.set_boost(input.keys.boost);
        for &command in &input.commands {
            self.apply_command(command, audio);
        }

        self.spawn_enemies();
        self.drop_bombs();
        self.update_entities(&input.keys);

        let resolution = resolve_collisions(&mut self.world, audio, self.tick);
        self.tick += 1;
        match resolution {
            Resolution::Continue => TickOutcome::Continue,
            Resolution::GameOver => {
                info!("Game over at tick {} with score {}", self.tick, self.world.score.value());
                TickOutcome::GameOver
            }
            Resolution::Victory => TickOutcome::Victory,
        }
    }

    fn apply_command(&mut self, command: Command, audio: &mut dyn AudioSink) {
        let world = &mut self.world;
        match command {
            Command::Quit => {}
            Command::Fire => {
                world.beams.push(Beam::new(&world.avatar, 0.0, &world.config));
                audio.play(Sound::Beam);
            }
            Command::SpreadFire => {
                world.beams.extend(spread_fire(&world.avatar, &world.config));
                audio.play(Sound::Beam);
            }
            Command::Hyper => {
                if world.score.try_spend(world.config.hyper_cost) {
                    world.avatar.activate_hyper(world.config.hyper_duration);
                    info!("Hyper mode on, score now {}", world.score.value());
                } else {
                    debug!("Hyper refused: score {} < {}", world.score.value(), world.config.hyper_cost);
                }
            }
            Command::Gravity => {
                if world.score.try_spend(world.config.gravity_cost) {
                    let field = GravityField::new(&world.avatar, world.config.gravity_radius, world.config.gravity_duration);
                    world.gravity_fields.push(field);
                    audio.play(Sound::Gravity);
                    info!("Gravity field on, score now {}", world.score.value());
                } else {
                    debug!("Gravity refused: score {} < {}", world.score.value(), world.config.gravity_cost);
                }
            }
        }
    }

    fn spawn_enemies(&mut self) {
        let interval = self.world.config.enemy_spawn_interval;
        if interval > 0 && self.tick % interval == 0 {
            let enemy = Enemy::new(&mut self.rng, &self.world.config);
            debug!("Enemy spawned at x {:.0}", enemy.rect.center().x);
            self.world.enemies.push(enemy);
        }
        self.world.boss.try_spawn(self.tick, &self.world.config, &mut self.rng);
    }

    fn drop_bombs(&mut self) {
        let world = &mut self.world;
        for enemy in &world.enemies {
            if enemy.descent.ready_to_drop(self.tick) {
                world.bombs.push(Bomb::new(enemy, &world.avatar, &world.config, &mut self.rng));
            }
        }
        if let Some(boss) = world.boss.get() {
            if boss.descent.ready_to_drop(self.tick) {
                world.boss_bombs.push(BossBomb::new(boss, &world.avatar, &world.config, &mut self.rng));
            }
        }
    }

    fn update_entities(&mut self, keys: &KeyState) {
        let world = &mut self.world;
        let mut ctx = UpdateContext {
            arena: &world.config.arena,
            keys,
            score: world.score.value(),
            anchor: world.avatar.rect.center(),
            config: &world.config,
        };
        world.avatar.update(&ctx);
        ctx.anchor = world.avatar.rect.center();

        update_group(&mut world.gravity_fields, &ctx);
        update_group(&mut world.beams, &ctx);
        update_group(&mut world.enemies, &ctx);
        if let Some(boss) = world.boss.get_mut() {
            boss.update(&ctx);
        }
        update_group(&mut world.bombs, &ctx);
        update_group(&mut world.boss_bombs, &ctx);
        update_group(&mut world.explosions, &ctx);
    }

    /// Draws the current state. `banner` overlays a terminal message.
    pub fn render(&self, sink: &mut dyn RenderSink, banner: Option<&str>) {
        let world = &self.world;
        let arena = &world.config.arena;
        sink.begin_frame(Background::at_elapsed(self.elapsed_seconds(), world.config.background_phase_seconds));

        for field in &world.gravity_fields {
            sink.draw(field.sprite(), field.rect());
        }
        for enemy in &world.enemies {
            sink.draw(enemy.sprite(), enemy.rect());
        }
        if let Some(boss) = world.boss.get() {
            sink.draw(boss.sprite(), boss.rect());
        }
        for bomb in &world.bombs {
            sink.draw(bomb.sprite(), bomb.rect());
        }
        for bomb in &world.boss_bombs {
            sink.draw(bomb.sprite(), bomb.rect());
        }
        for beam in &world.beams {
            sink.draw(beam.sprite(), beam.rect());
        }
        for explosion in &world.explosions {
            sink.draw(explosion.sprite(), explosion.rect());
        }
        sink.draw(world.avatar.sprite(), world.avatar.rect());

        let seconds = self.elapsed_seconds();
        sink.text(&format!("Score: {}", world.score.value()), 0.0, 0.0);
        sink.text(&format!("Life: {}", world.life.value()), arena.width * 0.25, 0.0);
        sink.text(&format!("{:02}:{:02}", seconds / 60, seconds % 60), arena.width * 0.9, 0.0);
        if let Some(banner) = banner {
            sink.text(banner, arena.width * 0.45, arena.height / 2.0);
        }
    }

    /// Runs ticks until quit, a terminal state, or `max_frames`.
    /// Music runs for exactly the span of the loop, errors included.
    pub fn run<I, A, R, C>(
        &mut self,
        input: &mut I,
        presentation: &mut Presentation<A, R>,
        clock: &mut C,
        max_frames: Option<u64>,
    ) -> io::Result<TickOutcome>
    where
        I: InputSource,
        A: AudioSink,
        R: RenderSink,
        C: Clock,
    {
        presentation.open();
        let result = self.run_loop(input, presentation, clock, max_frames);
        presentation.close();
        result
    }

    fn run_loop<I, A, R, C>(
        &mut self,
        input: &mut I,
        presentation: &mut Presentation<A, R>,
        clock: &mut C,
        max_frames: Option<u64>,
    ) -> io::Result<TickOutcome>
    where
        I: InputSource,
        A: AudioSink,
        R: RenderSink,
        C: Clock,
    {
        loop {
            if let Some(max) = max_frames {
                if self.tick >= max {
                    info!("Frame limit {} reached", max);
                    return Ok(TickOutcome::Quit);
                }
            }

            let tick_input = input.poll(self.tick)?;
            let outcome = self.step(&tick_input, &mut presentation.audio);
            let (banner, pause) = match outcome {
                TickOutcome::Continue => (None, None),
                TickOutcome::Quit => return Ok(outcome),
                TickOutcome::GameOver => (Some("GAME OVER"), Some(self.world.config.game_over_pause)),
                TickOutcome::Victory => (Some("VICTORY"), Some(self.world.config.victory_pause)),
            };

            self.render(&mut presentation.render, banner);
            presentation
                .render
                .present()
                .map_err(|e| { error!("Failed to present frame {}: {}", self.tick, e); e })?;

            match pause {
                Some(pause) => {
                    clock.pause(pause);
                    return Ok(outcome);
                }
                None => clock.wait_for_next_tick(),
            }
        }
    }
}
