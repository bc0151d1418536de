use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::error;

/// Held-key snapshot sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
}

impl KeyState {
    /// Sum of the unit steps of every held direction key.
    pub fn delta(&self) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.up {
            dy -= 1;
        }
        if self.down {
            dy += 1;
        }
        if self.left {
            dx -= 1;
        }
        if self.right {
            dx += 1;
        }
        (dx, dy)
    }
}

/// Discrete key presses, consumed once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Fire,
    SpreadFire,
    Hyper,
    Gravity,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub keys: KeyState,
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn held(keys: KeyState) -> Self {
        TickInput { keys, commands: Vec::new() }
    }

    pub fn command(command: Command) -> Self {
        TickInput { keys: KeyState::default(), commands: vec![command] }
    }
}

pub trait InputSource {
    fn poll(&mut self, tick: u64) -> io::Result<TickInput>;
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, TickInput>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, TickInput>) -> Self {
        SimulatedInput { events }
    }

    /// Holds `keys` for every tick in `ticks`, keeping commands already scripted.
    pub fn hold(mut self, ticks: std::ops::Range<u64>, keys: KeyState) -> Self {
        for tick in ticks {
            self.events.entry(tick).or_default().keys = keys;
        }
        self
    }
}

impl InputSource for SimulatedInput {
    fn poll(&mut self, tick: u64) -> io::Result<TickInput> {
        Ok(self.events.remove(&tick).unwrap_or_default())
    }
}

// --- Real terminal ---

/// A key counts as held while its last press/repeat is this many ticks old.
/// Terminals without release events re-send presses at the OS repeat rate,
/// which is well inside this window.
const HOLD_WINDOW: u64 = 6;

pub struct TerminalInput {
    key_tick: HashMap<KeyCode, u64>,
    boost_tick: Option<u64>,
}

impl TerminalInput {
    pub fn new() -> Self {
        TerminalInput { key_tick: HashMap::new(), boost_tick: None }
    }

    fn is_held(&self, codes: &[KeyCode], tick: u64) -> bool {
        codes.iter().any(|code| {
            self.key_tick
                .get(code)
                .map(|&last| tick.saturating_sub(last) <= HOLD_WINDOW)
                .unwrap_or(false)
        })
    }

    fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
            KeyCode::Char(' ') => Some(Command::Fire),
            KeyCode::Char('x') | KeyCode::Char('X') => Some(Command::SpreadFire),
            KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::Hyper),
            KeyCode::Tab => Some(Command::Gravity),
            _ => None,
        }
    }

    fn record(&mut self, key: KeyEvent, tick: u64, commands: &mut Vec<Command>) {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.key_tick.insert(key.code, tick);
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.boost_tick = Some(tick);
                }
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = Self::command_for(key.code, key.modifiers) {
                        commands.push(command);
                    }
                }
            }
            KeyEventKind::Release => {
                self.key_tick.remove(&key.code);
            }
        }
    }

    fn key_state(&self, tick: u64) -> KeyState {
        let boost_by_shift = self
            .boost_tick
            .map(|last| tick.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false);
        KeyState {
            up: self.is_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], tick),
            down: self.is_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], tick),
            left: self.is_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], tick),
            right: self.is_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], tick),
            boost: boost_by_shift || self.is_held(&[KeyCode::Char('z'), KeyCode::Char('Z')], tick),
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        TerminalInput::new()
    }
}

impl InputSource for TerminalInput {
    /// Drains every pending terminal event without blocking.
    fn poll(&mut self, tick: u64) -> io::Result<TickInput> {
        let mut commands = Vec::new();
        while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
            let event = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?;
            if let Event::Key(key) = event {
                self.record(key, tick, &mut commands);
            }
        }
        Ok(TickInput { keys: self.key_state(tick), commands })
    }
}
