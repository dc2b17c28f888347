use crate::error::{ErrorSeverity, GameError};
use crate::state::{Battle, BattleId, PowerId, UserId};

/// Errors raised while resolving a battle action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    /// The battle already finished; it no longer accepts actions.
    #[error("{0} is not active")]
    NotActive(BattleId),

    /// The actor does not sit in this battle.
    #[error("{user} is not a participant of {battle}")]
    NotParticipant { battle: BattleId, user: UserId },

    /// The power was used in this battle too recently.
    #[error("{power} is on cooldown for another {remaining_ms}ms")]
    OnCooldown { power: PowerId, remaining_ms: u64 },

    /// The catalog entry carries a power type the rules do not know.
    #[error("{0} has an unsupported power type")]
    InvalidPowerType(PowerId),
}

impl BattleError {
    pub(crate) fn ensure_active(battle: &Battle) -> Result<(), Self> {
        if battle.is_active() {
            Ok(())
        } else {
            Err(Self::NotActive(battle.id))
        }
    }
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotActive(_) | Self::NotParticipant { .. } => ErrorSeverity::Validation,
            Self::OnCooldown { .. } => ErrorSeverity::Recoverable,
            Self::InvalidPowerType(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotActive(_) => "BATTLE_NOT_ACTIVE",
            Self::NotParticipant { .. } => "BATTLE_NOT_PARTICIPANT",
            Self::OnCooldown { .. } => "BATTLE_POWER_ON_COOLDOWN",
            Self::InvalidPowerType(_) => "BATTLE_INVALID_POWER_TYPE",
        }
    }
}
