//! Opponent racket controller: a deliberately imperfect follower.
//!
//! Proportional, rate-limited, with a deadband, so the opponent tracks the
//! shuttle without being unbeatable.

use super::session::{Court, Racket, RACKET_SPEED};

/// Vertical slack around the racket center within which the opponent holds.
pub const FOLLOW_DEADBAND: f64 = 10.0;
/// Fraction of the base racket speed applied per tick.
pub const FOLLOW_RATE: f64 = 0.2;

/// Move the opponent racket one rate-limited step toward the shuttle's
/// vertical position, clamped inside the court.
pub fn update_opponent(racket: &mut Racket, shuttle_y: f64, court: &Court) {
    let center = racket.center_y();
    if center < shuttle_y - FOLLOW_DEADBAND {
        racket.y += RACKET_SPEED * FOLLOW_RATE;
    } else if center > shuttle_y + FOLLOW_DEADBAND {
        racket.y -= RACKET_SPEED * FOLLOW_RATE;
    }
    racket.clamp_to(court);
}
