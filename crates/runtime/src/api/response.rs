//! Typed responses and the success/error envelope.
//!
//! Every operation returns its own record; [`Response`] erases them for the
//! wire and [`Envelope`] wraps the result with the `success` flag.

use arena_core::{
    AttackOutcome, AttackReport, Battle, BattleId, BattleStatus, EquipSlot, GameError,
    PlayerRecord, PowerDefinition, PowerEffect, PowerId, PowerType, SpinCandidate, Timestamp,
    UserId, UserPower,
};
use serde::Serialize;

use super::errors::{ErrorKind, RuntimeError};

/// Result of `find_match`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindMatchResponse {
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battle_id: Option<BattleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent_id: Option<UserId>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub searching: bool,
}

impl FindMatchResponse {
    pub fn matched(battle_id: BattleId, opponent_id: UserId) -> Self {
        Self {
            matched: true,
            battle_id: Some(battle_id),
            opponent_id: Some(opponent_id),
            searching: false,
        }
    }

    pub fn searching() -> Self {
        Self {
            matched: false,
            battle_id: None,
            opponent_id: None,
            searching: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelSearchResponse {
    pub reward: i64,
    pub money: i64,
}

/// Compact view of an active battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleSummary {
    pub battle_id: BattleId,
    pub player1_id: UserId,
    pub player2_id: UserId,
    pub player1_hp: i32,
    pub player2_hp: i32,
}

impl From<&Battle> for BattleSummary {
    fn from(battle: &Battle) -> Self {
        Self {
            battle_id: battle.id,
            player1_id: battle.player1.user_id,
            player2_id: battle.player2.user_id,
            player1_hp: battle.player1.hp,
            player2_hp: battle.player2.hp,
        }
    }
}

/// Result of `check_match`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckMatchResponse {
    pub matched: bool,
    #[serde(flatten)]
    pub battle: Option<BattleSummary>,
}

/// Full battle row, flattened the way it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleStateResponse {
    pub id: BattleId,
    pub player1_id: UserId,
    pub player2_id: UserId,
    pub player1_hp: i32,
    pub player2_hp: i32,
    pub status: BattleStatus,
    pub winner_id: Option<UserId>,
    pub player1_shield_until: Timestamp,
    pub player2_shield_until: Timestamp,
    pub player1_counter_until: Timestamp,
    pub player2_counter_until: Timestamp,
    pub player1_counter_damage: i32,
    pub player2_counter_damage: i32,
    pub created_at: Timestamp,
}

impl From<&Battle> for BattleStateResponse {
    fn from(battle: &Battle) -> Self {
        let (p1, p2) = (&battle.player1, &battle.player2);
        Self {
            id: battle.id,
            player1_id: p1.user_id,
            player2_id: p2.user_id,
            player1_hp: p1.hp,
            player2_hp: p2.hp,
            status: battle.status,
            winner_id: battle.winner_id,
            player1_shield_until: p1.shield_until,
            player2_shield_until: p2.shield_until,
            player1_counter_until: p1.counter_until,
            player2_counter_until: p2.counter_until,
            player1_counter_damage: p1.counter_damage,
            player2_counter_damage: p2.counter_damage,
            created_at: battle.created_at,
        }
    }
}

/// Result of an attack, basic or through an attack power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackResponse {
    pub blocked: bool,
    pub countered: bool,
    /// Damage the attacker took from a counter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_taken: Option<i32>,
    /// Damage the defender took from a normal hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<i32>,
    pub player1_hp: i32,
    pub player2_hp: i32,
    pub finished: bool,
    pub winner_id: Option<UserId>,
    /// Empty inside a power use, where [`UsePowerResponse::message`] carries it.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl From<&AttackReport> for AttackResponse {
    fn from(report: &AttackReport) -> Self {
        let (damage_taken, damage) = match report.outcome {
            AttackOutcome::Blocked => (None, None),
            AttackOutcome::Countered { damage_taken } => (Some(damage_taken), None),
            AttackOutcome::Hit { damage } => (None, Some(damage)),
        };
        Self {
            blocked: report.is_blocked(),
            countered: report.is_countered(),
            damage_taken,
            damage,
            player1_hp: report.player1_hp,
            player2_hp: report.player2_hp,
            finished: report.finished(),
            winner_id: report.winner(),
            message: PowerEffect::Attack(*report).message(),
        }
    }
}

/// Effect-specific part of a power use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum PowerUseEffect {
    Attack(AttackResponse),
    Shield {
        shield_until: Timestamp,
        duration_secs: u32,
    },
    Counter {
        counter_until: Timestamp,
        counter_damage: i32,
    },
}

impl From<&PowerEffect> for PowerUseEffect {
    fn from(effect: &PowerEffect) -> Self {
        match *effect {
            PowerEffect::Attack(report) => PowerUseEffect::Attack(AttackResponse {
                message: String::new(),
                ..AttackResponse::from(&report)
            }),
            PowerEffect::Shield {
                until,
                duration_secs,
            } => PowerUseEffect::Shield {
                shield_until: until,
                duration_secs,
            },
            PowerEffect::Counter { until, damage } => PowerUseEffect::Counter {
                counter_until: until,
                counter_damage: damage,
            },
        }
    }
}

/// Result of `use_power`, with the cooldown already recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsePowerResponse {
    pub power_id: PowerId,
    pub power_type: PowerType,
    pub message: String,
    pub can_use_at: Timestamp,
    #[serde(flatten)]
    pub effect: PowerUseEffect,
}

impl UsePowerResponse {
    pub fn attack(&self) -> Option<&AttackResponse> {
        match &self.effect {
            PowerUseEffect::Attack(attack) => Some(attack),
            _ => None,
        }
    }
}

/// A catalog power joined with its rarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub id: PowerId,
    pub name: String,
    pub power_type: PowerType,
    pub rarity_name: String,
    pub drop_chance: f64,
    pub cooldown: u32,
    pub damage: i32,
    pub shield_duration: u32,
}

impl From<&SpinCandidate> for CatalogEntry {
    fn from(candidate: &SpinCandidate) -> Self {
        let power: &PowerDefinition = &candidate.power;
        Self {
            id: power.id,
            name: power.name.clone(),
            power_type: power.power_type,
            rarity_name: candidate.rarity_name.clone(),
            drop_chance: candidate.drop_chance,
            cooldown: power.cooldown,
            damage: power.damage,
            shield_duration: power.shield_duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogResponse {
    pub powers: Vec<CatalogEntry>,
}

/// Result of `spin`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinResponse {
    pub power: CatalogEntry,
    /// `false` when the user already owned the power.
    pub newly_obtained: bool,
    pub spins_left: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipResponse {
    pub power_id: PowerId,
    pub slot: EquipSlot,
    pub displaced: Option<PowerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnequipResponse {
    pub power_id: PowerId,
    /// Slot the power occupied, `None` if it was not equipped.
    pub slot: Option<EquipSlot>,
}

/// One owned power, enriched with catalog data when available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryEntry {
    pub power_id: PowerId,
    pub name: Option<String>,
    pub power_type: Option<PowerType>,
    pub obtained_at: Timestamp,
    pub equipped_slot: Option<EquipSlot>,
}

impl InventoryEntry {
    pub fn new(owned: &UserPower, definition: Option<&PowerDefinition>) -> Self {
        Self {
            power_id: owned.power_id,
            name: definition.map(|power| power.name.clone()),
            power_type: definition.map(|power| power.power_type),
            obtained_at: owned.obtained_at,
            equipped_slot: owned.equipped_slot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryResponse {
    pub powers: Vec<InventoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStatsResponse {
    pub user_id: UserId,
    pub nick: String,
    pub money: i64,
    pub spins: u32,
    pub wins: u32,
    pub losses: u32,
}

impl From<&PlayerRecord> for UserStatsResponse {
    fn from(user: &PlayerRecord) -> Self {
        Self {
            user_id: user.id,
            nick: user.nick.clone(),
            money: user.money,
            spins: user.spins,
            wins: user.wins,
            losses: user.losses,
        }
    }
}

/// Any successful response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    FindMatch(FindMatchResponse),
    CancelSearch(CancelSearchResponse),
    CheckMatch(CheckMatchResponse),
    BattleState(BattleStateResponse),
    Attack(AttackResponse),
    UsePower(UsePowerResponse),
    Spin(SpinResponse),
    Equip(EquipResponse),
    Unequip(UnequipResponse),
    Inventory(InventoryResponse),
    UserStats(UserStatsResponse),
    Catalog(CatalogResponse),
}

/// Error half of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub status: u16,
    pub code: &'static str,
    pub message: String,
}

impl From<&RuntimeError> for ErrorBody {
    fn from(err: &RuntimeError) -> Self {
        let kind = err.kind();
        Self {
            kind,
            status: kind.status_code(),
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

/// Wire envelope: `{"success":true,"data":...}` or `{"success":false,"error":...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Response>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl Envelope {
    pub fn ok(data: Response) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(err: &RuntimeError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody::from(err)),
        }
    }

    pub fn from_result(result: Result<Response, RuntimeError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::err(&err),
        }
    }

    /// Serializes the envelope as a single JSON line (without the newline).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::BattleError;
    use serde_json::json;

    #[test]
    fn searching_match_omits_battle_fields() {
        let value = serde_json::to_value(FindMatchResponse::searching()).unwrap();
        assert_eq!(value, json!({"matched": false, "searching": true}));

        let value =
            serde_json::to_value(FindMatchResponse::matched(BattleId(4), UserId(7))).unwrap();
        assert_eq!(
            value,
            json!({"matched": true, "battle_id": 4, "opponent_id": 7})
        );
    }

    #[test]
    fn blocked_attack_reports_flags() {
        let report = AttackReport {
            outcome: AttackOutcome::Blocked,
            player1_hp: 10,
            player2_hp: 10,
            end: None,
        };
        let value = serde_json::to_value(AttackResponse::from(&report)).unwrap();
        assert_eq!(value["blocked"], json!(true));
        assert_eq!(value["countered"], json!(false));
        assert!(value.get("damage_taken").is_none());
    }

    #[test]
    fn power_effect_is_flattened() {
        let response = UsePowerResponse {
            power_id: PowerId(2),
            power_type: PowerType::Defense,
            message: "Shield active for 5s".into(),
            can_use_at: Timestamp(18_000),
            effect: PowerUseEffect::Shield {
                shield_until: Timestamp(15_000),
                duration_secs: 5,
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["effect"], json!("shield"));
        assert_eq!(value["shield_until"], json!(15_000));
        assert_eq!(value["power_type"], json!("defense"));
    }

    #[test]
    fn attack_power_serializes_one_message() {
        let report = AttackReport {
            outcome: AttackOutcome::Hit { damage: 2 },
            player1_hp: 10,
            player2_hp: 8,
            end: None,
        };
        let effect = PowerEffect::Attack(report);
        let response = UsePowerResponse {
            power_id: PowerId(1),
            power_type: PowerType::Attack,
            message: effect.message(),
            can_use_at: Timestamp(12_000),
            effect: (&effect).into(),
        };

        let text = serde_json::to_string(&response).unwrap();
        assert_eq!(text.matches("\"message\"").count(), 1);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["message"], json!(effect.message()));
        assert_eq!(value["effect"], json!("attack"));
        assert_eq!(value["damage"], json!(2));

        let standalone = serde_json::to_value(AttackResponse::from(&report)).unwrap();
        assert_eq!(standalone["message"], json!(effect.message()));
    }

    #[test]
    fn error_envelope_carries_kind_and_status() {
        let err = RuntimeError::from(BattleError::NotActive(BattleId(3)));
        let value = serde_json::to_value(Envelope::err(&err)).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"]["kind"], json!("invalid_state"));
        assert_eq!(value["error"]["status"], json!(400));
        assert!(value.get("data").is_none());
    }
}
