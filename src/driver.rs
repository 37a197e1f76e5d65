//! Fixed timestep driver
//!
//! Converts variable host frame deltas into whole simulation ticks. Any host
//! can drive it: the browser frame callback, the native headless loop, or a
//! test feeding synthetic deltas.

use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS, SIM_HZ};
use crate::sim::{GameEvent, GameState, TickInput, apply_input, tick};

/// What one host frame produced
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Ticks run this frame
    pub ticks: u32,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    tick_dt: f32,
    max_substeps: u32,
    accumulator: f32,
    /// One-shot commands waiting for the next tick, in arrival order
    pending: Vec<TickInput>,
}

impl Default for FixedStepDriver {
    fn default() -> Self {
        Self::new(SIM_HZ)
    }
}

impl FixedStepDriver {
    pub fn new(tick_hz: u32) -> Self {
        Self {
            tick_dt: 1.0 / tick_hz.max(1) as f32,
            max_substeps: MAX_SUBSTEPS,
            accumulator: 0.0,
            pending: Vec::new(),
        }
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps.max(1);
        self
    }

    #[inline]
    pub fn tick_dt(&self) -> f32 {
        self.tick_dt
    }

    /// Queue a jump for the next tick
    pub fn queue_jump(&mut self) {
        self.queue(TickInput {
            jump: true,
            ..Default::default()
        });
    }

    /// Queue a restart for the next tick
    pub fn queue_restart(&mut self) {
        self.queue(TickInput {
            restart: true,
            ..Default::default()
        });
    }

    /// Queue a command. Each press is kept, so two jumps before a tick
    /// spend two jumps.
    pub fn queue(&mut self, input: TickInput) {
        if input.jump || input.restart {
            self.pending.push(input);
        }
    }

    /// Whether a command is waiting for the next tick
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drop leftover time, e.g. when the host loop resumes after a stop
    pub fn reset_clock(&mut self) {
        self.accumulator = 0.0;
    }

    /// Run as many ticks as the elapsed time allows
    pub fn advance(&mut self, state: &mut GameState, frame_dt: f32) -> FrameReport {
        let frame_dt = frame_dt.clamp(0.0, MAX_FRAME_DELTA);
        self.accumulator += frame_dt;

        let mut report = FrameReport::default();
        while self.accumulator >= self.tick_dt && report.ticks < self.max_substeps {
            report.events.extend(self.run_tick(state));
            self.accumulator -= self.tick_dt;
            report.ticks += 1;
        }

        // Hitting the substep cap drops the backlog instead of carrying it
        if report.ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.tick_dt);
        }

        report
    }

    /// Run exactly one tick regardless of elapsed time
    pub fn step_once(&mut self, state: &mut GameState) -> Vec<GameEvent> {
        self.run_tick(state)
    }

    /// Apply every queued press but the last, then tick with the last one
    fn run_tick(&mut self, state: &mut GameState) -> Vec<GameEvent> {
        let mut queued = std::mem::take(&mut self.pending);
        let last = queued.pop().unwrap_or_default();

        let mut events = Vec::new();
        for input in &queued {
            apply_input(state, input, &mut events);
        }
        events.extend(tick(state, &last));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Viewport;

    fn state() -> GameState {
        GameState::with_viewport(5, Viewport::new(1000.0, 700.0))
    }

    #[test]
    fn test_runs_whole_ticks_only() {
        let mut driver = FixedStepDriver::new(60);
        let mut state = state();

        let report = driver.advance(&mut state, 0.5 / 60.0);
        assert_eq!(report.ticks, 0);

        let report = driver.advance(&mut state, 2.0 / 60.0);
        assert_eq!(report.ticks, 2);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_substep_cap() {
        let mut driver = FixedStepDriver::new(120).with_max_substeps(4);
        let mut state = state();

        let report = driver.advance(&mut state, 0.1);
        assert_eq!(report.ticks, 4);
        assert!(driver.accumulator <= driver.tick_dt());
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut driver = FixedStepDriver::new(60);
        let mut state = state();

        // A 5 second stall only counts as MAX_FRAME_DELTA (about 6 ticks)
        let report = driver.advance(&mut state, 5.0);
        assert!(report.ticks <= 6);
        assert_eq!(state.score, report.ticks as u64);
    }

    #[test]
    fn test_pending_jump_consumed_once() {
        let mut driver = FixedStepDriver::new(60);
        let mut state = state();
        let surface = state.viewport.surface_y();
        state.player.land_on(surface);

        driver.queue_jump();
        // No tick yet: the jump waits
        driver.advance(&mut state, 0.0);
        assert_eq!(state.player.jumps, 0);

        let report = driver.advance(&mut state, 3.5 / 60.0);
        assert_eq!(report.ticks, 3);
        assert_eq!(state.player.jumps, 1);
        let jumps = report
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Jumped { .. }))
            .count();
        assert_eq!(jumps, 1);
    }

    #[test]
    fn test_restart_through_driver() {
        let mut driver = FixedStepDriver::default();
        let mut state = state();
        state.game_over = true;
        state.score = 12;

        driver.queue_restart();
        assert!(driver.has_pending());
        let events = driver.step_once(&mut state);
        assert!(events.contains(&GameEvent::Restarted));
        assert!(!driver.has_pending());
        assert!(!state.game_over);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_two_presses_before_a_tick_double_jump() {
        let mut driver = FixedStepDriver::new(60);
        let mut state = state();
        let surface = state.viewport.surface_y();
        state.player.land_on(surface);

        driver.queue_jump();
        driver.queue_jump();
        let report = driver.advance(&mut state, 1.5 / 60.0);
        assert_eq!(report.ticks, 1);
        assert_eq!(state.player.jumps, 2);
        let jumps: Vec<_> = report
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Jumped { jumps } => Some(*jumps),
                _ => None,
            })
            .collect();
        assert_eq!(jumps, vec![1, 2]);
        assert!(!driver.has_pending());
    }

    #[test]
    fn test_third_press_is_ignored() {
        let mut driver = FixedStepDriver::new(60);
        let mut state = state();
        let surface = state.viewport.surface_y();
        state.player.land_on(surface);

        for _ in 0..3 {
            driver.queue_jump();
        }
        driver.step_once(&mut state);
        assert_eq!(state.player.jumps, 2);
    }

    #[test]
    fn test_empty_commands_are_not_queued() {
        let mut driver = FixedStepDriver::new(60);
        driver.queue(TickInput::default());
        assert!(!driver.has_pending());
    }
}
