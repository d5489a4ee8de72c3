//! XP, level-ups and fragment awards.

use super::player::{Fragment, Player};
use crate::core::constants::{BASE_MAX_HP, HP_PER_LEVEL, XP_PER_LEVEL};
use crate::phases::Phase;

/// Outcome of a single XP grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGain {
    pub amount: u32,
    pub leveled_up: bool,
    pub new_level: u32,
}

/// XP threshold for leaving `level`.
pub fn xp_for_next_level(level: u32) -> u32 {
    level.saturating_mul(XP_PER_LEVEL)
}

/// Max HP at `level`.
pub fn max_hp_for_level(level: u32) -> u32 {
    BASE_MAX_HP.saturating_add(level.saturating_mul(HP_PER_LEVEL))
}

/// Adds XP and applies at most one level-up.
///
/// A grant large enough to cross two thresholds still raises the level by
/// one; the surplus stays in `xp` and is picked up by the next grant.
/// Current HP is never raised by a level-up, only capped to the new max.
pub fn gain_xp(player: &mut Player, amount: u32) -> XpGain {
    player.xp = player.xp.saturating_add(amount);

    let leveled_up = player.xp >= player.xp_to_next_level;
    if leveled_up {
        player.level += 1;
        player.xp_to_next_level = xp_for_next_level(player.level);
        player.max_hp = max_hp_for_level(player.level);
        player.hp = player.hp.min(player.max_hp);
    }

    XpGain {
        amount,
        leveled_up,
        new_level: player.level,
    }
}

/// Records the fragment for `phase`. Returns false if it was already held.
pub fn award_fragment(player: &mut Player, phase: Phase) -> bool {
    if player.has_fragment(phase) {
        return false;
    }
    player.fragments.push(Fragment::for_phase(phase));
    true
}
