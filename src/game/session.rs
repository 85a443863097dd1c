//! Session data model: court, rackets, shuttle and scores.
//!
//! Everything here is plain Rust with no browser dependency so the rally
//! logic can be exercised under native `cargo test`. The wasm glue in the
//! parent module owns one [`GameSession`] and feeds it to the step functions
//! in [`crate::game::physics`] and [`crate::game::ai`] each frame.

use rand::Rng;

/// Racket width in court units.
pub const RACKET_WIDTH: f64 = 20.0;
/// Racket height in court units.
pub const RACKET_HEIGHT: f64 = 80.0;
/// Base racket speed; the opponent follower moves at a fraction of this per tick.
pub const RACKET_SPEED: f64 = 6.0;
/// Shuttle collision radius (the DOM sprite is drawn larger).
pub const SHUTTLE_RADIUS: f64 = 12.0;
/// Speed magnitude restored on every racket bounce and on each serve.
pub const SHUTTLE_SPEED: f64 = 4.0;
/// First side to reach this score wins and the session ends.
pub const WINNING_SCORE: u32 = 11;

/// Serve angle spread: uniform in [-45deg, +45deg].
pub const SERVE_ANGLE_SPREAD: f64 = std::f64::consts::FRAC_PI_4;

/// Fixed rectangular playing field, sized from the canvas once per session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Court {
    pub width: f64,
    pub height: f64,
}

impl Court {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which side of the net scored or won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Opponent,
}

/// A paddle-like racket; only the vertical position varies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Racket {
    pub y: f64,
}

impl Racket {
    /// Racket centered vertically in the court.
    pub fn centered(court: &Court) -> Self {
        Self {
            y: court.height / 2.0 - RACKET_HEIGHT / 2.0,
        }
    }

    pub fn center_y(&self) -> f64 {
        self.y + RACKET_HEIGHT / 2.0
    }

    /// Keep the racket fully inside the court.
    pub fn clamp_to(&mut self, court: &Court) {
        self.y = self.y.clamp(0.0, court.height - RACKET_HEIGHT);
    }

    /// Half-open vertical hit window: a shuttle center exactly on either
    /// racket edge does not count as a hit.
    pub fn spans(&self, y: f64) -> bool {
        y > self.y && y < self.y + RACKET_HEIGHT
    }
}

/// The moving ball-like game object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shuttle {
    pub x: f64,
    pub y: f64,
    pub speed_x: f64,
    pub speed_y: f64,
}

impl Shuttle {
    /// Shuttle at rest in the court center.
    pub fn at_center(court: &Court) -> Self {
        Self {
            x: court.width / 2.0,
            y: court.height / 2.0,
            speed_x: 0.0,
            speed_y: 0.0,
        }
    }

    pub fn speed(&self) -> f64 {
        (self.speed_x * self.speed_x + self.speed_y * self.speed_y).sqrt()
    }
}

/// Aggregate rally state owned by the lifecycle controller.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub court: Court,
    pub player: Racket,
    pub opponent: Racket,
    pub shuttle: Shuttle,
    pub player_score: u32,
    pub opponent_score: u32,
    pub is_running: bool,
}

impl GameSession {
    /// Idle session: rackets centered, shuttle resting at center, scores zero.
    pub fn new(court: Court) -> Self {
        Self {
            court,
            player: Racket::centered(&court),
            opponent: Racket::centered(&court),
            shuttle: Shuttle::at_center(&court),
            player_score: 0,
            opponent_score: 0,
            is_running: false,
        }
    }

    /// Start or restart: zero the scores, serve fresh, mark running.
    pub fn reset_for_start(&mut self, rng: &mut impl Rng) {
        self.player_score = 0;
        self.opponent_score = 0;
        self.serve(rng);
        self.is_running = true;
    }

    /// Re-center the shuttle and launch it at `SHUTTLE_SPEED` with a random
    /// angle in +-45deg and a 50/50 horizontal direction.
    pub fn serve(&mut self, rng: &mut impl Rng) {
        self.shuttle.x = self.court.width / 2.0;
        self.shuttle.y = self.court.height / 2.0;

        let angle = rng.gen_range(-SERVE_ANGLE_SPREAD..SERVE_ANGLE_SPREAD);
        let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

        self.shuttle.speed_x = angle.cos() * SHUTTLE_SPEED * direction;
        self.shuttle.speed_y = angle.sin() * SHUTTLE_SPEED;
    }

    /// The winning side once a score has reached [`WINNING_SCORE`].
    pub fn winner(&self) -> Option<Side> {
        if self.player_score >= WINNING_SCORE {
            Some(Side::Player)
        } else if self.opponent_score >= WINNING_SCORE {
            Some(Side::Opponent)
        } else {
            None
        }
    }

    pub fn end(&mut self) {
        self.is_running = false;
    }
}
