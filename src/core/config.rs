//! Game rules configuration.
//!
//! `GameRules` is the single static description of a game: board geometry,
//! per-game limits, and the card catalog. A `Game` owns one at construction
//! and never mutates it. Rules can be built in code with the `with_*`
//! builder, or loaded from TOML or JSON:
//!
//! ```
//! use grid_ccg::core::GameRules;
//!
//! let rules = GameRules::from_toml_str(r#"
//!     boardWidth = 7
//!     boardHeight = 6
//!     ownHeight = 3
//!     blindStageUnits = 3
//!
//!     [[cardSet]]
//!     id = 0
//!     name = "Soldier"
//!     baseStrength = 5
//!     letter = "S"
//! "#).unwrap();
//!
//! assert_eq!(rules.board_width, 7);
//! assert_eq!(rules.card_set.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use super::{Geometry, RulesError};
use crate::cards::{CardCatalog, CardTemplate};

/// Static rules of one game. Field names are camelCase on the wire so the
/// value can be sent to clients verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRules {
    pub board_width: i32,
    pub board_height: i32,

    /// Rows at each end of the board that belong to that end's player.
    pub own_height: i32,

    #[serde(default = "defaults::starting_hand_size")]
    pub starting_hand_size: usize,

    /// Maximum number of units a player may deploy during the blind stage.
    pub blind_stage_units: usize,

    #[serde(default = "defaults::move_points_per_turn")]
    pub move_points_per_turn: u32,

    #[serde(default = "defaults::max_move_points")]
    pub max_move_points: u32,

    /// Size of each player's reserved id pool.
    #[serde(default = "defaults::reserved_id_count")]
    pub reserved_id_count: usize,

    /// A card that moved cannot use its active in the same turn, and the
    /// other way around.
    #[serde(default = "defaults::exclusive_move_and_active")]
    pub exclusive_move_and_active: bool,

    #[serde(default)]
    pub card_set: CardCatalog,
}

mod defaults {
    pub fn starting_hand_size() -> usize {
        8
    }

    pub fn move_points_per_turn() -> u32 {
        1
    }

    pub fn max_move_points() -> u32 {
        3
    }

    pub fn reserved_id_count() -> usize {
        5
    }

    pub fn exclusive_move_and_active() -> bool {
        true
    }
}

impl GameRules {
    /// Rules for a `width x height` board with `own_height` rows per side,
    /// an empty catalog and default limits.
    #[must_use]
    pub fn new(width: i32, height: i32, own_height: i32) -> Self {
        Self {
            board_width: width,
            board_height: height,
            own_height,
            starting_hand_size: defaults::starting_hand_size(),
            blind_stage_units: 3,
            move_points_per_turn: defaults::move_points_per_turn(),
            max_move_points: defaults::max_move_points(),
            reserved_id_count: defaults::reserved_id_count(),
            exclusive_move_and_active: defaults::exclusive_move_and_active(),
            card_set: CardCatalog::new(),
        }
    }

    #[must_use]
    pub fn with_blind_stage_units(mut self, units: usize) -> Self {
        self.blind_stage_units = units;
        self
    }

    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_move_points(mut self, per_turn: u32, max: u32) -> Self {
        self.move_points_per_turn = per_turn;
        self.max_move_points = max;
        self
    }

    #[must_use]
    pub fn with_reserved_id_count(mut self, count: usize) -> Self {
        self.reserved_id_count = count;
        self
    }

    #[must_use]
    pub fn with_exclusive_move_and_active(mut self, exclusive: bool) -> Self {
        self.exclusive_move_and_active = exclusive;
        self
    }

    #[must_use]
    pub fn with_card_set(mut self, card_set: CardCatalog) -> Self {
        self.card_set = card_set;
        self
    }

    /// Add one template to the catalog.
    pub fn with_card(mut self, template: CardTemplate) -> Result<Self, RulesError> {
        self.card_set.register(template)?;
        Ok(self)
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.board_width, self.board_height, self.own_height)
    }

    /// Parse rules from TOML and validate them.
    pub fn from_toml_str(source: &str) -> Result<Self, RulesError> {
        let rules: GameRules = toml::from_str(source)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Parse rules from JSON and validate them.
    pub fn from_json_str(source: &str) -> Result<Self, RulesError> {
        let rules: GameRules = serde_json::from_str(source)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.board_width <= 0 || self.board_height <= 0 {
            return Err(RulesError::EmptyBoard {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.own_height <= 0 || 2 * self.own_height > self.board_height {
            return Err(RulesError::OwnHalvesOverlap {
                own_height: self.own_height,
                height: self.board_height,
            });
        }
        if self.max_move_points < self.move_points_per_turn {
            return Err(RulesError::MovePointCap {
                per_turn: self.move_points_per_turn,
                max: self.max_move_points,
            });
        }
        if self.reserved_id_count < self.blind_stage_units {
            return Err(RulesError::TicketPoolTooSmall {
                reserved: self.reserved_id_count,
                units: self.blind_stage_units,
            });
        }
        self.card_set.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ProtoId;
    use crate::effects::EffectSpec;

    #[test]
    fn test_builder() {
        let rules = GameRules::new(7, 6, 3)
            .with_blind_stage_units(4)
            .with_move_points(2, 4)
            .with_reserved_id_count(6)
            .with_exclusive_move_and_active(false);

        assert_eq!(rules.blind_stage_units, 4);
        assert_eq!(rules.move_points_per_turn, 2);
        assert_eq!(rules.max_move_points, 4);
        assert!(!rules.exclusive_move_and_active);
        assert_eq!(rules.geometry(), Geometry::new(7, 6, 3));
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_validate_geometry() {
        assert!(matches!(
            GameRules::new(0, 6, 3).validate(),
            Err(RulesError::EmptyBoard { .. })
        ));
        assert!(matches!(
            GameRules::new(7, 5, 3).validate(),
            Err(RulesError::OwnHalvesOverlap { .. })
        ));
    }

    #[test]
    fn test_validate_limits() {
        let capped = GameRules::new(7, 6, 3).with_move_points(3, 2);
        assert!(matches!(capped.validate(), Err(RulesError::MovePointCap { .. })));

        let small_pool = GameRules::new(7, 6, 3)
            .with_blind_stage_units(4)
            .with_reserved_id_count(3);
        assert!(matches!(
            small_pool.validate(),
            Err(RulesError::TicketPoolTooSmall { reserved: 3, units: 4 })
        ));
    }

    #[test]
    fn test_toml_with_effects() {
        let rules = GameRules::from_toml_str(
            r#"
            boardWidth = 5
            boardHeight = 4
            ownHeight = 2
            blindStageUnits = 2
            movePointsPerTurn = 1
            maxMovePoints = 2

            [[cardSet]]
            id = 3
            name = "Gunner"
            baseStrength = 4
            letter = "G"
            active = { kind = "beam", amount = 2 }
            endOfTurn = { kind = "beam", amount = 1 }
            "#,
        )
        .unwrap();

        let gunner = rules.card_set.get(ProtoId::new(3)).unwrap();
        assert_eq!(gunner.active, Some(EffectSpec::beam(2)));
        assert_eq!(gunner.end_of_turn, Some(EffectSpec::beam(1)));
        assert_eq!(rules.reserved_id_count, 5);
        assert!(rules.exclusive_move_and_active);
    }

    #[test]
    fn test_toml_rejects_invalid_rules() {
        let err = GameRules::from_toml_str(
            r#"
            boardWidth = 5
            boardHeight = 4
            ownHeight = 3
            blindStageUnits = 2
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, RulesError::OwnHalvesOverlap { .. }));
        assert!(matches!(
            GameRules::from_toml_str("boardWidth = "),
            Err(RulesError::Toml(_))
        ));
    }

    /// A rules file cannot smuggle in an effect radius the board code would
    /// overflow on.
    #[test]
    fn test_toml_rejects_oversized_radius() {
        let err = GameRules::from_toml_str(
            r#"
            boardWidth = 7
            boardHeight = 6
            ownHeight = 3
            blindStageUnits = 3

            [[cardSet]]
            id = 2
            name = "Bomber"
            baseStrength = 6
            letter = "B"
            active = { kind = "area", amount = 5, radius = 2147483647 }
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, RulesError::EffectRadius { radius: i32::MAX, .. }));
    }

    #[test]
    fn test_json_round_trip() {
        let rules = GameRules::new(7, 6, 3)
            .with_card(CardTemplate::new(ProtoId::new(0), "Soldier", 5, "S"))
            .unwrap();

        let json = serde_json::to_string(&rules).unwrap();
        assert!(json.contains("\"boardWidth\":7"));
        assert!(json.contains("\"cardSet\":[{"));

        let back = GameRules::from_json_str(&json).unwrap();
        assert_eq!(back, rules);
    }
}
