//! Keyboard mapping
//!
//! Keys become edge-triggered commands; holding a key does nothing extra
//! because the host only forwards `keydown` edges.

use crate::sim::TickInput;

/// Map a `KeyboardEvent.code` to a command.
///
/// Space and ArrowUp jump while the run is live. Once the run is over, only
/// Space restarts it.
pub fn map_key(code: &str, game_over: bool) -> Option<TickInput> {
    match (code, game_over) {
        ("Space" | "ArrowUp", false) => Some(TickInput {
            jump: true,
            ..Default::default()
        }),
        ("Space", true) => Some(TickInput {
            restart: true,
            ..Default::default()
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_keys() {
        assert_eq!(map_key("Space", false).map(|i| i.jump), Some(true));
        assert_eq!(map_key("ArrowUp", false).map(|i| i.jump), Some(true));
        assert_eq!(map_key("KeyW", false), None);
    }

    #[test]
    fn test_restart_only_on_space() {
        let restart = map_key("Space", true);
        assert_eq!(restart.map(|i| (i.jump, i.restart)), Some((false, true)));
        assert_eq!(map_key("ArrowUp", true), None);
    }
}
