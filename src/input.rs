//! Cabinet input decoding
//!
//! The controller board streams one line per sample:
//!
//! ```text
//! axis0/axis1/axis2/axis3/p1_button/p2_button/p1_switch/p2_switch
//! ```
//!
//! All values are integers. Sticks are 12-bit ADC readings, buttons are
//! active-low and switches are latching toggles. `ControlDecoder` folds any
//! number of lines into one `TickInput` per frame. `KeyboardState` is the
//! fallback when no board is attached.

use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::sim::{PlayerControls, PlayerId, TickInput};

/// Fields per control line
pub const FIELD_COUNT: usize = 8;
/// Stick readings below this turn one way
pub const AXIS_LOW_THRESHOLD: i32 = 1024;
/// Stick readings above this turn the other way
pub const AXIS_HIGH_THRESHOLD: i32 = 3072;

/// Errors from a malformed control line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("expected {} fields, got {found}", FIELD_COUNT)]
    FieldCount { found: usize },
    #[error("field {index} is not an integer")]
    Field {
        index: usize,
        #[source]
        source: ParseIntError,
    },
}

/// One raw sample from the controller board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlLine {
    /// Raw stick ADC channels in board order
    pub axes: [i32; 4],
    pub p1_button: i32,
    pub p2_button: i32,
    pub p1_switch: i32,
    pub p2_switch: i32,
}

impl FromStr for ControlLine {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.trim().split('/').collect();
        if fields.len() != FIELD_COUNT {
            return Err(InputError::FieldCount { found: fields.len() });
        }

        let mut values = [0i32; FIELD_COUNT];
        for (index, (field, value)) in fields.iter().zip(values.iter_mut()).enumerate() {
            *value = field
                .trim()
                .parse()
                .map_err(|source| InputError::Field { index, source })?;
        }

        let [a0, a1, a2, a3, p1_button, p2_button, p1_switch, p2_switch] = values;
        Ok(Self {
            axes: [a0, a1, a2, a3],
            p1_button,
            p2_button,
            p1_switch,
            p2_switch,
        })
    }
}

impl ControlLine {
    /// Stick axis used for turning
    ///
    /// The sticks are mounted sideways and cross-wired in the duel cabinet:
    /// player 1 turns on channel 3, player 2 on channel 1.
    pub fn turn_axis(&self, id: PlayerId) -> i32 {
        match id {
            PlayerId::One => self.axes[3],
            PlayerId::Two => self.axes[1],
        }
    }

    pub fn button(&self, id: PlayerId) -> i32 {
        match id {
            PlayerId::One => self.p1_button,
            PlayerId::Two => self.p2_button,
        }
    }

    pub fn switch(&self, id: PlayerId) -> i32 {
        match id {
            PlayerId::One => self.p1_switch,
            PlayerId::Two => self.p2_switch,
        }
    }
}

/// Map a raw stick reading to a turn direction
pub fn axis_to_turn(raw: i32) -> i32 {
    if raw < AXIS_LOW_THRESHOLD {
        -1
    } else if raw > AXIS_HIGH_THRESHOLD {
        1
    } else {
        0
    }
}

#[derive(Debug, Clone, Default)]
struct PlayerLatch {
    turn: i32,
    button_held: bool,
    fire_edge: bool,
    switch_state: i32,
    accelerate: bool,
}

/// Folds control lines into per-frame inputs
#[derive(Debug, Clone)]
pub struct ControlDecoder {
    players: [PlayerLatch; 2],
}

impl Default for ControlDecoder {
    fn default() -> Self {
        // Resting switch positions on the cabinet
        Self::with_switch_states(0, 1)
    }
}

impl ControlDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder whose switches are assumed to start in the given positions
    pub fn with_switch_states(p1_switch: i32, p2_switch: i32) -> Self {
        let latch = |switch_state| PlayerLatch {
            switch_state,
            ..Default::default()
        };
        Self {
            players: [latch(p1_switch), latch(p2_switch)],
        }
    }

    /// Parse and apply one line; blank lines are ignored
    ///
    /// A malformed line leaves the decoder untouched.
    pub fn apply_line(&mut self, line: &str) -> Result<(), InputError> {
        if line.trim().is_empty() {
            return Ok(());
        }
        let parsed: ControlLine = line.parse()?;
        self.apply(&parsed);
        Ok(())
    }

    /// Apply one parsed sample
    pub fn apply(&mut self, line: &ControlLine) {
        for id in PlayerId::ALL {
            let latch = &mut self.players[id.index()];

            latch.turn = axis_to_turn(line.turn_axis(id));

            match line.button(id) {
                0 => {
                    if !latch.button_held {
                        latch.fire_edge = true;
                    }
                    latch.button_held = true;
                }
                1 => latch.button_held = false,
                _ => {}
            }

            // Every flip of the switch toggles thrust
            let switch = line.switch(id);
            if switch != latch.switch_state {
                latch.accelerate = !latch.accelerate;
                latch.switch_state = switch;
            }
        }
    }

    /// Thrust state as currently latched
    pub fn is_accelerating(&self, id: PlayerId) -> bool {
        self.players[id.index()].accelerate
    }

    /// Input for the coming frame; consumes pending fire presses
    ///
    /// Turn holds the most recent stick reading until a new line arrives.
    pub fn snapshot(&mut self) -> TickInput {
        let mut input = TickInput::default();
        for id in PlayerId::ALL {
            let latch = &mut self.players[id.index()];
            *input.controls_mut(id) = PlayerControls {
                turn: latch.turn,
                accelerate: latch.accelerate,
                fire: latch.fire_edge,
            };
            latch.fire_edge = false;
        }
        input
    }
}

/// Keyboard fallback: A/D/W/Space for player 1, arrows and Enter for player 2
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub p1_left: bool,
    pub p1_right: bool,
    pub p1_thrust: bool,
    pub p1_fire: bool,
    pub p2_left: bool,
    pub p2_right: bool,
    pub p2_thrust: bool,
    pub p2_fire: bool,
}

impl KeyboardState {
    /// Input for a frame given the keys held on the previous one
    ///
    /// Turn and thrust follow the held keys. Fire is reported only on the
    /// frame a fire key goes down, matching the cabinet buttons.
    pub fn to_input(&self, previous: &KeyboardState) -> TickInput {
        let controls = |left: bool, right: bool, thrust: bool, fire: bool, was_fire: bool| {
            PlayerControls {
                turn: i32::from(right) - i32::from(left),
                accelerate: thrust,
                fire: fire && !was_fire,
            }
        };
        TickInput {
            players: [
                controls(
                    self.p1_left,
                    self.p1_right,
                    self.p1_thrust,
                    self.p1_fire,
                    previous.p1_fire,
                ),
                controls(
                    self.p2_left,
                    self.p2_right,
                    self.p2_thrust,
                    self.p2_fire,
                    previous.p2_fire,
                ),
            ],
        }
    }
}
