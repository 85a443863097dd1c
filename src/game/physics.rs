//! Shuttle physics: per-tick integration, wall and racket collisions, scoring.

use rand::Rng;

use super::session::{
    GameSession, Side, RACKET_HEIGHT, RACKET_WIDTH, SHUTTLE_RADIUS, SHUTTLE_SPEED,
};

/// What a single physics step produced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    /// Player racket returned the shuttle this tick (drives the hit sound).
    pub player_hit: bool,
    /// A side scored this tick; the shuttle has already been re-served.
    pub scored: Option<Side>,
}

/// Advance the shuttle by one tick and resolve collisions and scoring.
///
/// Check order is load-bearing and kept as-is: walls, then the two rackets,
/// then the scoring edges. A step fast enough to touch a wall and a racket in
/// the same tick takes the racket's position write.
pub fn advance(session: &mut GameSession, rng: &mut impl Rng) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    let court = session.court;

    session.shuttle.x += session.shuttle.speed_x;
    session.shuttle.y += session.shuttle.speed_y;

    // Elastic bounce off top/bottom walls: clamp and flip the vertical axis.
    if session.shuttle.y - SHUTTLE_RADIUS < 0.0 {
        session.shuttle.y = SHUTTLE_RADIUS;
        session.shuttle.speed_y = -session.shuttle.speed_y;
    }
    if session.shuttle.y + SHUTTLE_RADIUS > court.height {
        session.shuttle.y = court.height - SHUTTLE_RADIUS;
        session.shuttle.speed_y = -session.shuttle.speed_y;
    }

    // Player racket: shuttle's left edge crossing the racket face while the
    // shuttle center is inside the half-open vertical span.
    if session.shuttle.x - SHUTTLE_RADIUS < RACKET_WIDTH
        && session.player.spans(session.shuttle.y)
    {
        session.shuttle.x = RACKET_WIDTH + SHUTTLE_RADIUS;
        let angle = deflection_angle(session.shuttle.y, session.player.center_y());
        session.shuttle.speed_x = angle.cos() * SHUTTLE_SPEED;
        session.shuttle.speed_y = angle.sin() * SHUTTLE_SPEED;
        outcome.player_hit = true;
    }

    // Opponent racket, mirrored horizontally; the return goes leftward.
    if session.shuttle.x + SHUTTLE_RADIUS > court.width - RACKET_WIDTH
        && session.opponent.spans(session.shuttle.y)
    {
        session.shuttle.x = court.width - RACKET_WIDTH - SHUTTLE_RADIUS;
        let angle = deflection_angle(session.shuttle.y, session.opponent.center_y());
        session.shuttle.speed_x = -angle.cos() * SHUTTLE_SPEED;
        session.shuttle.speed_y = angle.sin() * SHUTTLE_SPEED;
    }

    // A shuttle past an edge scores for the far side and is re-served.
    if session.shuttle.x - SHUTTLE_RADIUS < 0.0 {
        session.opponent_score += 1;
        session.serve(rng);
        outcome.scored = Some(Side::Opponent);
    } else if session.shuttle.x + SHUTTLE_RADIUS > court.width {
        session.player_score += 1;
        session.serve(rng);
        outcome.scored = Some(Side::Player);
    }

    outcome
}

/// Deflection angle from the vertical offset between shuttle and racket
/// center, normalized over half the racket height and scaled to +-45deg.
fn deflection_angle(shuttle_y: f64, racket_center_y: f64) -> f64 {
    let offset = (shuttle_y - racket_center_y) / (RACKET_HEIGHT / 2.0);
    offset * std::f64::consts::FRAC_PI_4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::session::Court;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn running_session() -> GameSession {
        let mut session = GameSession::new(Court::new(800.0, 400.0));
        session.is_running = true;
        session
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    // Park both rackets where the shuttle cannot reach them vertically.
    fn park_rackets(session: &mut GameSession) {
        session.player.y = session.court.height - RACKET_HEIGHT;
        session.opponent.y = session.court.height - RACKET_HEIGHT;
    }

    #[test]
    fn top_wall_bounce_flips_vertical_speed_only() {
        let mut session = running_session();
        park_rackets(&mut session);
        session.shuttle.x = 400.0;
        session.shuttle.y = SHUTTLE_RADIUS + 1.0;
        session.shuttle.speed_x = 2.0;
        session.shuttle.speed_y = -3.0;

        advance(&mut session, &mut rng());

        assert_eq!(session.shuttle.speed_y, 3.0);
        assert_eq!(session.shuttle.speed_x, 2.0);
        assert_eq!(session.shuttle.y, SHUTTLE_RADIUS);
    }

    #[test]
    fn bottom_wall_bounce_clamps_inside_court() {
        let mut session = running_session();
        park_rackets(&mut session);
        session.opponent.y = 0.0;
        session.shuttle.x = 400.0;
        session.shuttle.y = session.court.height - SHUTTLE_RADIUS - 0.5;
        session.shuttle.speed_x = -1.0;
        session.shuttle.speed_y = 3.0;

        advance(&mut session, &mut rng());

        assert_eq!(session.shuttle.speed_y, -3.0);
        assert_eq!(session.shuttle.y, session.court.height - SHUTTLE_RADIUS);
        assert!(session.shuttle.y >= SHUTTLE_RADIUS);
        assert!(session.shuttle.y <= session.court.height - SHUTTLE_RADIUS);
    }

    #[test]
    fn wall_bounce_conserves_speed_magnitude() {
        let mut session = running_session();
        park_rackets(&mut session);
        session.shuttle.x = 400.0;
        session.shuttle.y = SHUTTLE_RADIUS;
        session.shuttle.speed_x = 2.5;
        session.shuttle.speed_y = -1.5;
        let before = session.shuttle.speed();

        advance(&mut session, &mut rng());

        assert!((session.shuttle.speed() - before).abs() < 1e-9);
    }

    #[test]
    fn player_hit_restores_speed_and_sends_rightward() {
        let mut session = running_session();
        session.player.y = 160.0;
        session.shuttle.x = RACKET_WIDTH + SHUTTLE_RADIUS + 1.0;
        session.shuttle.y = 190.0;
        session.shuttle.speed_x = -3.0;
        session.shuttle.speed_y = 0.5;

        let outcome = advance(&mut session, &mut rng());

        assert!(outcome.player_hit);
        assert_eq!(outcome.scored, None);
        assert_eq!(session.shuttle.x, RACKET_WIDTH + SHUTTLE_RADIUS);
        assert!((session.shuttle.speed() - SHUTTLE_SPEED).abs() < 1e-9);
        assert!(session.shuttle.speed_x > 0.0);
    }

    #[test]
    fn opponent_hit_sends_leftward_without_player_flag() {
        let mut session = running_session();
        session.opponent.y = 160.0;
        session.shuttle.x = session.court.width - RACKET_WIDTH - SHUTTLE_RADIUS - 1.0;
        session.shuttle.y = 200.0;
        session.shuttle.speed_x = 3.0;
        session.shuttle.speed_y = -0.5;

        let outcome = advance(&mut session, &mut rng());

        assert!(!outcome.player_hit);
        assert_eq!(
            session.shuttle.x,
            session.court.width - RACKET_WIDTH - SHUTTLE_RADIUS
        );
        assert!((session.shuttle.speed() - SHUTTLE_SPEED).abs() < 1e-9);
        assert!(session.shuttle.speed_x < 0.0);
    }

    #[test]
    fn shuttle_on_racket_edge_is_a_miss() {
        let mut session = running_session();
        session.player.y = 160.0;
        session.shuttle.x = RACKET_WIDTH + SHUTTLE_RADIUS + 1.0;
        // Lands exactly on the racket's top edge after integration.
        session.shuttle.y = 160.0;
        session.shuttle.speed_x = -3.0;
        session.shuttle.speed_y = 0.0;

        let outcome = advance(&mut session, &mut rng());

        assert!(!outcome.player_hit);
        assert_eq!(session.shuttle.speed_x, -3.0);
    }

    #[test]
    fn deflection_angle_scales_with_offset() {
        // Dead-center hit goes straight; a hit at the half-height boundary
        // deflects at the full 45deg.
        assert_eq!(deflection_angle(200.0, 200.0), 0.0);
        let full = deflection_angle(200.0 + RACKET_HEIGHT / 2.0, 200.0);
        assert!((full - std::f64::consts::FRAC_PI_4).abs() < 1e-9);
        let opposite = deflection_angle(200.0 - RACKET_HEIGHT / 2.0, 200.0);
        assert!((opposite + std::f64::consts::FRAC_PI_4).abs() < 1e-9);
    }

    #[test]
    fn left_edge_crossing_scores_for_opponent_and_reserves() {
        let mut session = running_session();
        park_rackets(&mut session);
        session.shuttle.x = SHUTTLE_RADIUS - 1.0;
        session.shuttle.y = 100.0;
        session.shuttle.speed_x = -3.0;
        session.shuttle.speed_y = 0.0;

        let outcome = advance(&mut session, &mut rng());

        assert_eq!(outcome.scored, Some(Side::Opponent));
        assert_eq!(session.opponent_score, 1);
        assert_eq!(session.player_score, 0);
        assert_eq!(session.shuttle.x, session.court.width / 2.0);
        assert_eq!(session.shuttle.y, session.court.height / 2.0);
        assert!((session.shuttle.speed() - SHUTTLE_SPEED).abs() < 1e-9);
    }

    #[test]
    fn right_edge_crossing_scores_for_player_and_reserves() {
        let mut session = running_session();
        session.player.y = 0.0;
        session.opponent.y = 0.0;
        session.shuttle.x = session.court.width - SHUTTLE_RADIUS + 1.0;
        session.shuttle.y = 350.0;
        session.shuttle.speed_x = 3.0;
        session.shuttle.speed_y = 0.0;

        let outcome = advance(&mut session, &mut rng());

        assert_eq!(outcome.scored, Some(Side::Player));
        assert_eq!(session.player_score, 1);
        assert_eq!(session.opponent_score, 0);
        assert_eq!(session.shuttle.x, session.court.width / 2.0);
        assert_eq!(session.shuttle.y, session.court.height / 2.0);
        assert!((session.shuttle.speed() - SHUTTLE_SPEED).abs() < 1e-9);
    }

    #[test]
    fn wall_and_racket_in_same_tick_takes_racket_write() {
        let mut session = running_session();
        // Racket span covers the wall-clamped y, so both checks fire.
        session.player.y = 0.0;
        session.opponent.y = 300.0;
        session.shuttle.x = RACKET_WIDTH + SHUTTLE_RADIUS + 2.0;
        session.shuttle.y = SHUTTLE_RADIUS;
        session.shuttle.speed_x = -3.0;
        session.shuttle.speed_y = -3.0;

        let outcome = advance(&mut session, &mut rng());

        assert!(outcome.player_hit);
        // Wall clamp on y stands; racket overrode x and both speed axes.
        assert_eq!(session.shuttle.y, SHUTTLE_RADIUS);
        assert_eq!(session.shuttle.x, RACKET_WIDTH + SHUTTLE_RADIUS);
        assert!((session.shuttle.speed() - SHUTTLE_SPEED).abs() < 1e-9);
        assert!(session.shuttle.speed_x > 0.0);
    }
}
