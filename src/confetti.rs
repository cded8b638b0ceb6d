use rand::seq::SliceRandom;
use rand::Rng;
use std::time::SystemTime;

const PIECE_COUNT: usize = 100;
const GRAVITY: f64 = 4.0;
const PALETTE_SIZE: usize = 10;

/// One falling confetti piece.
#[derive(Debug, Clone)]
pub struct ConfettiPiece {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
}

impl ConfettiPiece {
    fn new<R: Rng>(width: f64, rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..width.max(1.0)),
            y: 0.0,
            vel_x: rng.gen_range(-2.0..2.0),
            vel_y: rng.gen_range(2.0..5.0),
            symbol: *['▪', '▫', '•', '◆', '★', '*'].choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..PALETTE_SIZE),
        }
    }

    fn update(&mut self, dt: f64) {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += GRAVITY * dt;
    }
}

/// Cosmetic confetti shower for the session-complete screen. Spawns pieces
/// across the top of the terminal and lets them fall under gravity until the
/// animation times out or every piece has left the screen.
#[derive(Debug)]
pub struct ConfettiAnimation {
    pub pieces: Vec<ConfettiPiece>,
    pub start_time: SystemTime,
    pub duration: f64,
    pub is_active: bool,
    terminal_width: f64,
    terminal_height: f64,
}

impl ConfettiAnimation {
    pub fn new() -> Self {
        Self {
            pieces: Vec::new(),
            start_time: SystemTime::now(),
            duration: 4.0,
            is_active: false,
            terminal_width: 80.0,
            terminal_height: 24.0,
        }
    }

    pub fn start(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();

        self.pieces.clear();
        self.start_time = SystemTime::now();
        self.is_active = true;
        self.terminal_width = f64::from(width);
        self.terminal_height = f64::from(height);

        for _ in 0..PIECE_COUNT {
            self.pieces.push(ConfettiPiece::new(self.terminal_width, &mut rng));
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.pieces.clear();
    }

    pub fn update(&mut self) {
        if !self.is_active {
            return;
        }

        let elapsed = self.start_time.elapsed().unwrap_or_default().as_secs_f64();
        if elapsed >= self.duration {
            self.stop();
            return;
        }

        // Fixed timestep; the runtime tick cadence drives the frame rate.
        let dt = 0.1;
        let width = self.terminal_width;
        let height = self.terminal_height;
        self.pieces.retain_mut(|piece| {
            piece.update(dt);
            let buffer = 3.0;
            piece.y <= height + buffer && piece.x >= -buffer && piece.x <= width + buffer
        });

        if self.pieces.is_empty() {
            self.is_active = false;
        }
    }
}

impl Default for ConfettiAnimation {
    fn default() -> Self {
        Self::new()
    }
}
