//! Fixed timestep simulation tick
//!
//! One call to `tick` is one frame of the runner. The order of the steps is
//! part of the game's behavior: ground contact is resolved before platforms,
//! spawning happens after scrolling, and collisions see the pruned set.

use super::collision::{CollisionOutcome, lands_on_platform, resolve_obstacle};
use super::spawn::maybe_spawn;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Edge-triggered commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump (or double jump) request
    pub jump: bool,
    /// Start a new run after game over
    pub restart: bool,
}

/// Apply input commands. Jumps only count while running, restart only after
/// game over, so at most one of them takes effect.
pub fn apply_input(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if input.jump && !state.game_over && state.player.jump() {
        events.push(GameEvent::Jumped {
            jumps: state.player.jumps,
        });
    }

    if input.restart && state.game_over {
        state.reset();
        log::debug!("Run restarted");
        events.push(GameEvent::Restarted);
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    apply_input(state, input, &mut events);

    if state.game_over {
        return events;
    }

    state.time_ticks += 1;

    integrate_player(state);
    resolve_ground(state, &mut events);
    resolve_platforms(state, &mut events);
    scroll_world(state);
    maybe_spawn(state);
    prune_offscreen(state);
    resolve_obstacles(state, &mut events);

    if state.flip.tick() {
        log::debug!("Flip ended at tick {}", state.time_ticks);
        events.push(GameEvent::FlipEnded);
    }

    state.score += 1;

    events
}

/// Gravity, vertical integration and the airborne spin
fn integrate_player(state: &mut GameState) {
    let player = &mut state.player;
    player.vy += GRAVITY;
    player.y += player.vy;

    if player.is_airborne() {
        player.angle += SPIN_RATE;
        player.spinning = true;
    } else if player.spinning {
        player.angle = 0.0;
        player.spinning = false;
    }
}

fn resolve_ground(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let surface = state.viewport.surface_y();
    if state.player.bottom() > surface {
        let was_airborne = state.player.is_airborne();
        state.player.land_on(surface);
        if was_airborne {
            events.push(GameEvent::Landed);
        }
    }
}

fn resolve_platforms(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for block in &state.floating_blocks {
        if lands_on_platform(&state.player, block) {
            let was_airborne = state.player.is_airborne();
            state.player.land_on(block.y);
            if was_airborne {
                events.push(GameEvent::Landed);
            }
        }
    }
}

fn scroll_world(state: &mut GameState) {
    for obstacle in &mut state.obstacles {
        obstacle.x -= SCROLL_SPEED;
    }
    for block in &mut state.floating_blocks {
        block.x -= SCROLL_SPEED;
    }
}

fn prune_offscreen(state: &mut GameState) {
    state.obstacles.retain(|o| !o.is_offscreen());
    state.floating_blocks.retain(|b| !b.is_offscreen());
}

/// Check every obstacle against the player, oldest first. A crash does not
/// stop the pass: stars and octagons later in the list still apply.
fn resolve_obstacles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for obstacle in &mut state.obstacles {
        match resolve_obstacle(&state.player, obstacle, state.flip.active) {
            CollisionOutcome::Miss => {}
            CollisionOutcome::StarBoost => {
                state.player.boost();
                obstacle.neutralize();
                events.push(GameEvent::StarBoost);
            }
            CollisionOutcome::Flip => {
                state.flip.start(FLIP_DURATION_TICKS);
                obstacle.neutralize();
                log::debug!("Flip started at tick {}", state.time_ticks);
                events.push(GameEvent::FlipStarted);
            }
            CollisionOutcome::Lethal => {
                if !state.game_over {
                    log::info!(
                        "Crashed into {} with score {}",
                        obstacle.shape.as_str(),
                        state.score
                    );
                    events.push(GameEvent::Crashed {
                        shape: obstacle.shape,
                        score: state.score,
                    });
                }
                state.game_over = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::NeonColor;
    use crate::sim::state::{FloatingBlock, Obstacle, ObstacleShape, Viewport};

    fn state() -> GameState {
        GameState::with_viewport(12345, Viewport::new(1000.0, 700.0))
    }

    /// Player standing on the walking surface
    fn grounded_state() -> GameState {
        let mut state = state();
        let surface = state.viewport.surface_y();
        state.player.land_on(surface);
        state
    }

    /// Obstacle centered on the player after this tick's scroll
    fn obstacle_on_player(state: &GameState, shape: ObstacleShape) -> Obstacle {
        let surface = state.viewport.surface_y();
        Obstacle {
            x: state.player.x + 16.0 + SCROLL_SPEED,
            y: surface - 40.0,
            w: 40.0,
            h: 40.0,
            color: NeonColor::HotPink,
            shape,
        }
    }

    #[test]
    fn test_score_increments_once_per_tick() {
        let mut state = grounded_state();
        for expected in 1..=30 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.score, expected);
        }
    }

    #[test]
    fn test_score_frozen_after_game_over() {
        let mut state = grounded_state();
        state.game_over = true;
        state.score = 42;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, 42);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_player_falls_to_surface_from_spawn() {
        let mut state = state();
        let surface = state.viewport.surface_y();
        assert!(state.player.bottom() < surface);

        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.bottom(), surface);
        assert_eq!(state.player.vy, 0.0);
    }

    #[test]
    fn test_jump_sets_velocity_and_spins() {
        let mut state = grounded_state();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        let events = tick(&mut state, &jump);
        assert!(events.contains(&GameEvent::Jumped { jumps: 1 }));
        assert_eq!(state.player.jumps, 1);
        assert!((state.player.vy - (-JUMP_POWER + GRAVITY)).abs() < 1e-5);
        assert!(state.player.spinning);
        assert!((state.player.angle - SPIN_RATE).abs() < 1e-6);
    }

    #[test]
    fn test_double_jump_then_noop() {
        let mut state = grounded_state();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        tick(&mut state, &jump);
        assert_eq!(state.player.jumps, 2);

        let vy_before = state.player.vy;
        let events = tick(&mut state, &jump);
        assert_eq!(state.player.jumps, 2);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Jumped { .. })));
        assert!((state.player.vy - (vy_before + GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_landing_resets_jumps_and_angle() {
        let mut state = grounded_state();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);

        let mut landed = false;
        for _ in 0..120 {
            let events = tick(&mut state, &TickInput::default());
            if events.contains(&GameEvent::Landed) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(state.player.jumps, 0);
        assert_eq!(state.player.vy, 0.0);

        // Spin snaps back on the tick after landing
        assert!(state.player.spinning);
        tick(&mut state, &TickInput::default());
        assert!(!state.player.spinning);
        assert_eq!(state.player.angle, 0.0);
    }

    #[test]
    fn test_lands_on_platform() {
        let mut state = state();
        let top = 400.0;
        state.floating_blocks.push(FloatingBlock {
            x: 40.0,
            y: top,
            w: 200.0,
            h: PLATFORM_HEIGHT,
            color: NeonColor::Blush,
        });
        state.player.y = top - state.player.h - 2.0;
        state.player.vy = 3.0;
        state.player.jumps = 2;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.bottom(), top);
        assert_eq!(state.player.vy, 0.0);
        assert_eq!(state.player.jumps, 0);
        assert!(!state.player.jumping);
    }

    #[test]
    fn test_rising_player_passes_through_platform() {
        let mut state = grounded_state();
        let top = state.player.y - 10.0;
        state.floating_blocks.push(FloatingBlock {
            x: 40.0,
            y: top,
            w: 200.0,
            h: PLATFORM_HEIGHT,
            color: NeonColor::Blush,
        });
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        assert_eq!(state.player.jumps, 1);
        assert!(state.player.vy < 0.0);
    }

    #[test]
    fn test_scroll_moves_by_speed() {
        let mut state = grounded_state();
        state.obstacles.push(Obstacle {
            x: 900.0,
            y: 0.0,
            w: 30.0,
            h: 40.0,
            color: NeonColor::Candy,
            shape: ObstacleShape::Rect,
        });
        for n in 1..=20u32 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.obstacles[0].x, 900.0 - n as f32 * SCROLL_SPEED);
        }
    }

    #[test]
    fn test_prunes_offscreen() {
        let mut state = grounded_state();
        state.obstacles.push(Obstacle {
            x: -25.0,
            y: 0.0,
            w: 30.0,
            h: 40.0,
            color: NeonColor::Candy,
            shape: ObstacleShape::Rect,
        });
        state.floating_blocks.push(FloatingBlock {
            x: -100.0,
            y: 0.0,
            w: 105.0,
            h: PLATFORM_HEIGHT,
            color: NeonColor::Blush,
        });
        tick(&mut state, &TickInput::default());
        assert!(state.obstacles.iter().all(|o| o.x > 0.0));
        assert!(state.floating_blocks.iter().all(|b| b.x > 0.0));
    }

    #[test]
    fn test_lethal_hit_ends_game() {
        for shape in [
            ObstacleShape::Rect,
            ObstacleShape::Triangle,
            ObstacleShape::Circle,
            ObstacleShape::Diamond,
        ] {
            let mut state = grounded_state();
            let ob = obstacle_on_player(&state, shape);
            state.obstacles.push(ob);
            let events = tick(&mut state, &TickInput::default());
            assert!(state.game_over, "{:?} should be lethal", shape);
            assert!(
                events
                    .iter()
                    .any(|e| matches!(e, GameEvent::Crashed { shape: s, .. } if *s == shape))
            );
        }
    }

    #[test]
    fn test_flipped_player_survives_lethal_shapes() {
        for shape in [
            ObstacleShape::Rect,
            ObstacleShape::Triangle,
            ObstacleShape::Circle,
            ObstacleShape::Diamond,
        ] {
            let mut state = grounded_state();
            state.flip.start(FLIP_DURATION_TICKS);
            let ob = obstacle_on_player(&state, shape);
            state.obstacles.push(ob);
            tick(&mut state, &TickInput::default());
            assert!(!state.game_over, "{:?} must not kill while flipped", shape);
        }
    }

    #[test]
    fn test_star_boosts_and_is_consumed() {
        let mut state = grounded_state();
        let ob = obstacle_on_player(&state, ObstacleShape::Star);
        state.obstacles.push(ob);

        let events = tick(&mut state, &TickInput::default());

        assert!(events.contains(&GameEvent::StarBoost));
        assert!(!state.game_over);
        assert_eq!(state.player.jumps, 1);
        assert_eq!(state.player.vy, -STAR_BOOST);
        assert_eq!(state.obstacles[0].x, NEUTRALIZED_X);

        // Gone on the next tick
        tick(&mut state, &TickInput::default());
        assert!(state.obstacles.iter().all(|o| o.x > NEUTRALIZED_X));
    }

    #[test]
    fn test_star_still_works_while_flipped() {
        let mut state = grounded_state();
        state.flip.start(FLIP_DURATION_TICKS);
        let ob = obstacle_on_player(&state, ObstacleShape::Star);
        state.obstacles.push(ob);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.vy, -STAR_BOOST);
        assert_eq!(state.obstacles[0].x, NEUTRALIZED_X);
    }

    #[test]
    fn test_octagon_starts_flip() {
        let mut state = grounded_state();
        let ob = obstacle_on_player(&state, ObstacleShape::Octagon);
        state.obstacles.push(ob);

        let events = tick(&mut state, &TickInput::default());

        assert!(events.contains(&GameEvent::FlipStarted));
        assert!(state.is_flipped());
        // Countdown starts this tick
        assert_eq!(state.flip.ticks_left, FLIP_DURATION_TICKS - 1);
        assert!(!state.game_over);
        assert_eq!(state.obstacles[0].x, NEUTRALIZED_X);
    }

    #[test]
    fn test_octagon_ignored_while_flipped() {
        let mut state = grounded_state();
        state.flip.start(50);
        let ob = obstacle_on_player(&state, ObstacleShape::Octagon);
        state.obstacles.push(ob);

        let events = tick(&mut state, &TickInput::default());

        assert!(!events.contains(&GameEvent::FlipStarted));
        assert_eq!(state.flip.ticks_left, 49);
        assert_ne!(state.obstacles[0].x, NEUTRALIZED_X);
        assert!(!state.game_over);
    }

    #[test]
    fn test_flip_expires() {
        let mut state = grounded_state();
        state.flip.start(3);
        let mut ended = false;
        for _ in 0..3 {
            let events = tick(&mut state, &TickInput::default());
            ended |= events.contains(&GameEvent::FlipEnded);
        }
        assert!(ended);
        assert!(!state.is_flipped());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = grounded_state();
        let ob = obstacle_on_player(&state, ObstacleShape::Rect);
        state.obstacles.push(ob);
        tick(&mut state, &TickInput::default());
        assert!(state.game_over);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let events = tick(&mut state, &restart);

        assert!(events.contains(&GameEvent::Restarted));
        assert!(!state.game_over);
        // The restarted run ticks immediately
        assert_eq!(state.score, 1);
        let spawn_x = state.viewport.spawn_x();
        assert!(state.obstacles.iter().all(|o| o.x == spawn_x));
    }

    #[test]
    fn test_restart_resets_world() {
        let mut state = grounded_state();
        state.game_over = true;
        state.score = 99;
        let ob = obstacle_on_player(&state, ObstacleShape::Circle);
        state.obstacles.push(ob);
        state.player.jumps = 2;
        state.flip.start(40);

        let mut events = Vec::new();
        apply_input(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            &mut events,
        );

        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.floating_blocks.is_empty());
        assert!(!state.game_over);
        assert_eq!(state.player.x, PLAYER_X);
        assert_eq!(state.player.y, state.viewport.ground_y() - PLAYER_SIZE);
        assert_eq!(state.player.jumps, 0);
        assert!(!state.is_flipped());
        assert_eq!(state.flip.ticks_left, 0);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut state = grounded_state();
        state.score = 10;
        let events = tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert!(!events.contains(&GameEvent::Restarted));
        assert_eq!(state.score, 11);
    }

    #[test]
    fn test_jump_ignored_after_game_over() {
        let mut state = grounded_state();
        state.game_over = true;
        tick(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.jumps, 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        for i in 0..600 {
            let input = TickInput {
                jump: i % 37 == 0,
                restart: i % 97 == 0,
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.game_over, state2.game_over);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.floating_blocks, state2.floating_blocks);
        assert_eq!(state1.player, state2.player);
    }
}
