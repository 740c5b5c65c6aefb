//! Target scope codes and the throw remap table
//!
//! Codes follow the host engine's scope enumeration. Throw skills collapse
//! every opposing-side scope (and the user) onto a single enemy, and every
//! friendly scope onto a single ally.

/// No target
pub const NONE: i64 = 0;
/// One enemy
pub const ONE_ENEMY: i64 = 1;
/// All enemies
pub const ALL_ENEMIES: i64 = 2;
/// One random enemy
pub const ONE_RANDOM_ENEMY: i64 = 3;
/// Four random enemies
pub const FOUR_RANDOM_ENEMIES: i64 = 6;
/// One ally
pub const ONE_ALLY: i64 = 7;
/// All allies
pub const ALL_ALLIES: i64 = 8;
/// One ally (dead)
pub const ONE_DEAD_ALLY: i64 = 9;
/// All allies (dead)
pub const ALL_DEAD_ALLIES: i64 = 10;
/// The user
pub const USER: i64 = 11;

/// Remap a source scope code to the scope of its throw skill
///
/// Enemy scopes (single, all, random) and the user become one enemy; living
/// or dead ally scopes become one ally. Every other code passes through.
pub fn remap_throw_scope(scope: i64) -> i64 {
    match scope {
        ONE_ENEMY..=FOUR_RANDOM_ENEMIES | USER => ONE_ENEMY,
        ONE_ALLY..=ALL_DEAD_ALLIES => ONE_ALLY,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_scopes_become_one_enemy() {
        for code in [ONE_ENEMY, ALL_ENEMIES, ONE_RANDOM_ENEMY, 4, 5, FOUR_RANDOM_ENEMIES] {
            assert_eq!(remap_throw_scope(code), ONE_ENEMY, "scope {}", code);
        }
    }

    #[test]
    fn test_friendly_scopes_become_one_ally() {
        for code in [ONE_ALLY, ALL_ALLIES, ONE_DEAD_ALLY, ALL_DEAD_ALLIES] {
            assert_eq!(remap_throw_scope(code), ONE_ALLY, "scope {}", code);
        }
    }

    #[test]
    fn test_user_becomes_one_enemy() {
        assert_eq!(remap_throw_scope(USER), ONE_ENEMY);
    }

    #[test]
    fn test_other_codes_pass_through() {
        for code in [NONE, 12, 13, -1] {
            assert_eq!(remap_throw_scope(code), code);
        }
    }

    #[test]
    fn test_remap_is_idempotent() {
        for code in 0..=12 {
            let once = remap_throw_scope(code);
            assert_eq!(remap_throw_scope(once), once);
        }
    }
}
