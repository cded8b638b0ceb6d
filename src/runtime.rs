use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Input and clock events delivered to the game loop.
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    /// One frame interval elapsed. `seconds` is how many whole game seconds
    /// came due with it: 0 on most frames, 1 once per second.
    Frame { seconds: u32 },
}

/// Paces the game loop and merges two clocks into one event stream.
///
/// Keyboard input arrives from a reader thread over a channel; between key
/// presses the pump wakes at a fixed frame interval so the confetti keeps
/// animating. The round clock counts integer seconds, so the pump carries
/// the sub-second remainder across frames and stamps each `Frame` with the
/// whole seconds that have come due since the previous one.
pub struct EventPump {
    input: Receiver<GameEvent>,
    frame: Duration,
    carry_ms: u64,
}

impl EventPump {
    /// Pump fed by a crossterm reader thread. The thread lives for the rest
    /// of the process and exits on its own once the receiver is dropped.
    pub fn from_terminal(frame: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || forward_terminal_events(&tx));
        Self::new(rx, frame)
    }

    /// Pump over an arbitrary channel; tests feed events by hand.
    pub fn new(input: Receiver<GameEvent>, frame: Duration) -> Self {
        Self {
            input,
            frame,
            carry_ms: 0,
        }
    }

    /// Block for at most one frame interval. Input wins if it arrives in
    /// time, otherwise the elapsed interval is folded into the game clock
    /// and returned as a `Frame`. A dead input side degrades to a pure
    /// frame clock rather than wedging the loop.
    pub fn next_event(&mut self) -> GameEvent {
        match self.input.recv_timeout(self.frame) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                GameEvent::Frame {
                    seconds: self.fold_frame(),
                }
            }
        }
    }

    /// Drop any partial second, so a round that just started gets its full
    /// first second on the clock.
    pub fn reset_clock(&mut self) {
        self.carry_ms = 0;
    }

    fn fold_frame(&mut self) -> u32 {
        self.carry_ms += self.frame.as_millis() as u64;
        let seconds = self.carry_ms / 1000;
        self.carry_ms %= 1000;
        seconds as u32
    }
}

fn forward_terminal_events(tx: &Sender<GameEvent>) {
    loop {
        let ev = match event::read() {
            Ok(CtEvent::Key(key)) => GameEvent::Key(key),
            Ok(CtEvent::Resize(..)) => GameEvent::Resize,
            Ok(_) => continue,
            Err(_) => return,
        };
        if tx.send(ev).is_err() {
            return;
        }
    }
}
