//! Simulation state
//!
//! Everything one running simulation owns: the ring, the balls, the
//! counters and the seeded RNG used for new balls.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::ring::Ring;
use crate::settings::Settings;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Simulation settings (copied at creation)
    pub settings: Settings,
    /// The boundary ring
    pub ring: Ring,
    /// Live balls in spawn order
    pub balls: Vec<Ball>,
    /// Number of despawn events since creation (not cleared by reset)
    pub escaped_count: u64,
    /// Seconds counted by the driver since the last reset
    pub elapsed_seconds: u32,
    /// Steps taken since the last reset
    pub steps: u64,
    rng: Pcg32,
    next_id: u32,
}

impl SimulationState {
    /// Create a fresh state: one ball at the center and a new ring
    pub fn new(settings: Settings, seed: u64) -> Self {
        let ring = Ring::new(settings.center(), settings.ring_radius(), settings.rotate_speed);
        let mut state = Self {
            seed,
            settings,
            ring,
            balls: Vec::new(),
            escaped_count: 0,
            elapsed_seconds: 0,
            steps: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        state.spawn_ball();

        state
    }

    /// Allocate a new ball ID
    pub fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a new ball at the ring center
    pub fn spawn_ball(&mut self) -> u32 {
        let id = self.next_ball_id();
        let ball = Ball::spawn(id, self.center(), self.settings.ball_radius, &mut self.rng);
        self.balls.push(ball);
        id
    }

    /// Reinitialize ring, balls and elapsed seconds
    ///
    /// The escape counter and the RNG stream carry on.
    pub fn reset(&mut self) {
        self.ring = Ring::new(
            self.settings.center(),
            self.settings.ring_radius(),
            self.settings.rotate_speed,
        );
        self.balls.clear();
        self.elapsed_seconds = 0;
        self.steps = 0;
        self.spawn_ball();
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.ring.center
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_one_centered_ball() {
        let state = SimulationState::new(Settings::default(), 1);
        assert_eq!(state.seed, 1);
        assert_eq!(state.ball_count(), 1);
        assert_eq!(state.balls[0].pos, state.center());
        assert_eq!(state.balls[0].vel, Vec2::ZERO);
        assert_eq!(state.escaped_count, 0);
        assert_eq!(state.ring.radius, 300.0);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut state = SimulationState::new(Settings::default(), 1);
        let a = state.spawn_ball();
        let b = state.spawn_ball();
        assert!(b > a);
        assert!(a > state.balls[0].id);
    }

    #[test]
    fn test_reset_keeps_escape_counter() {
        let mut state = SimulationState::new(Settings::default(), 1);
        state.spawn_ball();
        state.spawn_ball();
        state.escaped_count = 4;
        state.elapsed_seconds = 12;
        state.ring.start_angle = -1.0;
        state.ring.end_angle = 0.5;

        state.reset();

        assert_eq!(state.ball_count(), 1);
        assert_eq!(state.balls[0].pos, state.center());
        assert_eq!(state.balls[0].vel, Vec2::ZERO);
        assert!(!state.balls[0].is_escaped());
        assert_eq!(state.elapsed_seconds, 0);
        assert_eq!((state.ring.start_angle, state.ring.end_angle), (0.0, 1.75));
        assert_eq!(state.escaped_count, 4);
    }

    #[test]
    fn test_same_seed_same_balls() {
        let a = SimulationState::new(Settings::default(), 77);
        let b = SimulationState::new(Settings::default(), 77);
        assert_eq!(a.balls[0].color(), b.balls[0].color());
        assert_eq!(a.balls[0].gravity(), b.balls[0].gravity());
    }
}
