//! Player modification audit

use super::PlayerListener;
use crate::domain::entities::Player;

/// Records every successful player modification in the log
pub struct AuditPlayerListener;

impl PlayerListener for AuditPlayerListener {
    fn player_modified(&self, player: &Player) {
        tracing::info!(
            identifier = %player.identifier,
            mirian = player.mirian.unwrap_or_default(),
            modification = %player.modification.to_rfc3339(),
            "Player modified"
        );
    }
}
