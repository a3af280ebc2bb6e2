/*
 * Environment Signal Module
 *
 * Global inputs shared by every fish during a tick:
 * - the repulsion point reported by the pointer collaborator (or none)
 * - a speed boost pulse that raises every fish's speed ceiling and decays
 *   linearly back to zero
 *
 * Pulses fire on their own whenever the countdown lapses, and the countdown
 * is re-randomized on every pulse so the surges never fall into a rhythm.
 */

use glam::DVec2;
use rand::Rng;
use tracing::debug;

use crate::params::SimulationParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostSource {
    Scheduled,
    External,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSignal {
    repulsion_point: Option<DVec2>,
    boost_countdown: i64,
    boost_magnitude: f64,
}

impl EnvironmentSignal {
    pub fn new(params: &SimulationParams) -> Self {
        Self {
            repulsion_point: None,
            boost_countdown: params.boost_initial_countdown,
            boost_magnitude: 0.0,
        }
    }

    pub fn repulsion_point(&self) -> Option<DVec2> {
        self.repulsion_point
    }

    pub fn boost_countdown(&self) -> i64 {
        self.boost_countdown
    }

    pub fn boost_magnitude(&self) -> f64 {
        self.boost_magnitude
    }

    // Replaced wholesale every time the pointer reports in
    pub fn set_repulsion(&mut self, point: Option<DVec2>) {
        self.repulsion_point = point;
    }

    pub fn trigger_boost<R: Rng>(&mut self, params: &SimulationParams, rng: &mut R) {
        self.pulse(params, rng, BoostSource::External);
    }

    // Advance the boost schedule by one tick
    pub fn tick<R: Rng>(&mut self, params: &SimulationParams, rng: &mut R) {
        self.boost_countdown -= 1;
        if self.boost_countdown < 0 {
            self.pulse(params, rng, BoostSource::Scheduled);
        }

        self.boost_magnitude = (self.boost_magnitude - params.boost_decay_per_tick()).max(0.0);
    }

    fn pulse<R: Rng>(&mut self, params: &SimulationParams, rng: &mut R, source: BoostSource) {
        let jitter = (params.boost_interval_jitter as f64 * rng.gen::<f64>()).round() as i64;
        self.boost_countdown = params.boost_interval_min + jitter;
        self.boost_magnitude = params.speed_boost;

        debug!(
            ?source,
            magnitude = self.boost_magnitude,
            next_in = self.boost_countdown,
            "speed boost pulse"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn setup() -> (EnvironmentSignal, SimulationParams, SmallRng) {
        let params = SimulationParams::default();
        (EnvironmentSignal::new(&params), params, SmallRng::seed_from_u64(7))
    }

    #[test]
    fn starts_calm() {
        let (env, params, _) = setup();
        assert_eq!(env.boost_magnitude(), 0.0);
        assert_eq!(env.boost_countdown(), params.boost_initial_countdown);
        assert!(env.repulsion_point().is_none());
    }

    #[test]
    fn trigger_reseeds_countdown_within_range() {
        let (mut env, params, mut rng) = setup();
        for _ in 0..50 {
            env.trigger_boost(&params, &mut rng);
            assert_eq!(env.boost_magnitude(), params.speed_boost);
            assert!((400..=800).contains(&env.boost_countdown()));
        }
    }

    #[test]
    fn boost_decays_strictly_to_zero_and_stays() {
        let (mut env, params, mut rng) = setup();
        env.trigger_boost(&params, &mut rng);

        let mut previous = env.boost_magnitude();
        let mut ticks = 0;
        while env.boost_magnitude() > 0.0 {
            env.tick(&params, &mut rng);
            assert!(env.boost_magnitude() < previous);
            previous = env.boost_magnitude();
            ticks += 1;
            assert!(ticks <= 81, "boost never reached zero");
        }

        assert_eq!(env.boost_magnitude(), 0.0);
        for _ in 0..100 {
            env.tick(&params, &mut rng);
            assert_eq!(env.boost_magnitude(), 0.0);
        }
    }

    #[test]
    fn countdown_lapse_fires_scheduled_pulse() {
        let (mut env, params, mut rng) = setup();
        for _ in 0..params.boost_initial_countdown {
            env.tick(&params, &mut rng);
        }
        assert_eq!(env.boost_countdown(), 0);
        assert_eq!(env.boost_magnitude(), 0.0);

        env.tick(&params, &mut rng);
        // Pulse fires, then the same tick applies one decay step
        let expected = params.speed_boost - params.boost_decay_per_tick();
        assert!((env.boost_magnitude() - expected).abs() < 1e-12);
        assert!(env.boost_countdown() >= params.boost_interval_min);
    }

    #[test]
    fn longest_valid_schedule_stays_in_range() {
        use crate::params::MAX_BOOST_WAIT;

        let params = SimulationParams {
            boost_initial_countdown: 0,
            boost_interval_min: MAX_BOOST_WAIT - 1,
            boost_interval_jitter: 1,
            ..SimulationParams::default()
        };
        assert!(params.validate().is_ok());

        let mut env = EnvironmentSignal::new(&params);
        let mut rng = SmallRng::seed_from_u64(3);
        env.tick(&params, &mut rng);
        env.tick(&params, &mut rng);
        assert!(env.boost_countdown() >= MAX_BOOST_WAIT - 2);
        env.trigger_boost(&params, &mut rng);
        assert!(env.boost_countdown() <= MAX_BOOST_WAIT);
    }

    #[test]
    fn repulsion_is_overwritten() {
        let (mut env, _, _) = setup();
        env.set_repulsion(Some(DVec2::new(10.0, 20.0)));
        assert_eq!(env.repulsion_point(), Some(DVec2::new(10.0, 20.0)));
        env.set_repulsion(None);
        assert_eq!(env.repulsion_point(), None);
    }
}
