use std::io::{self, Write};

use log::{debug, info};

use crate::entities::{AvatarSprite, Mood};
use crate::types::Rect;

/// What to draw for an entity. Carries no image data, only the pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sprite {
    Avatar { pose: AvatarSprite, mood: Mood, hyper: bool },
    Enemy { variant: u8 },
    Boss,
    Beam { degrees: f64 },
    Bomb { color: usize },
    BossBomb,
    Gravity,
    Explosion { frame: usize },
}

/// Sky shown behind the arena, cycling with elapsed play time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    Morning,
    Evening,
    Night,
}

impl Background {
    pub fn at_elapsed(seconds: u64, phase_seconds: u64) -> Self {
        match (seconds / phase_seconds.max(1)) % 3 {
            0 => Background::Morning,
            1 => Background::Evening,
            _ => Background::Night,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Beam,
    Explosion,
    Damage,
    Gravity,
}

/// Fire-and-forget audio. Implementations swallow their own failures.
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

/// Write-only frame sink. The simulation never reads back from it.
pub trait RenderSink {
    fn begin_frame(&mut self, background: Background);
    fn draw(&mut self, sprite: Sprite, rect: &Rect);
    /// Text anchored at world coordinates.
    fn text(&mut self, text: &str, x: f64, y: f64);
    fn present(&mut self) -> io::Result<()>;
}

/// Discards every cue.
#[derive(Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _sound: Sound) {}
    fn start_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Terminal stand-in for a mixer: cues go to the log, damage rings the bell.
pub struct TerminalAudio {
    bell: bool,
    music_playing: bool,
}

impl TerminalAudio {
    pub fn new(bell: bool) -> Self {
        TerminalAudio { bell, music_playing: false }
    }
}

impl AudioSink for TerminalAudio {
    fn play(&mut self, sound: Sound) {
        debug!("Sound: {:?}", sound);
        if self.bell && sound == Sound::Damage {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());
        }
    }

    fn start_music(&mut self) {
        if !self.music_playing {
            self.music_playing = true;
            info!("Background music started.");
        }
    }

    fn stop_music(&mut self) {
        if self.music_playing {
            self.music_playing = false;
            info!("Background music stopped.");
        }
    }
}

/// Audio and render capabilities handed to the game loop for one run.
pub struct Presentation<A: AudioSink, R: RenderSink> {
    pub audio: A,
    pub render: R,
    open: bool,
}

impl<A: AudioSink, R: RenderSink> Presentation<A, R> {
    pub fn new(audio: A, render: R) -> Self {
        Presentation { audio, render, open: false }
    }

    /// Loop start: background music on.
    pub fn open(&mut self) {
        if !self.open {
            self.open = true;
            self.audio.start_music();
        }
    }

    /// Loop end: background music off.
    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            self.audio.stop_music();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
