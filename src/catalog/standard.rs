//! The standard card set and board.

use crate::cards::{CardCatalog, CardTemplate, ProtoId};
use crate::core::GameRules;
use crate::effects::EffectSpec;

pub const SOLDIER: ProtoId = ProtoId::new(0);
pub const KNIGHT: ProtoId = ProtoId::new(1);
pub const BOMBER: ProtoId = ProtoId::new(2);
pub const GUNNER: ProtoId = ProtoId::new(3);
pub const HEALER: ProtoId = ProtoId::new(4);
pub const SPOTTER: ProtoId = ProtoId::new(5);

/// The six standard cards.
#[must_use]
pub fn standard_catalog() -> CardCatalog {
    [
        CardTemplate::new(SOLDIER, "Soldier", 5, "S").with_description("A plain unit."),
        CardTemplate::new(KNIGHT, "Knight", 8, "K").with_description("A sturdy plain unit."),
        CardTemplate::new(BOMBER, "Bomber", 6, "B")
            .with_description("Active: deals 5 damage to every unit around it, itself included.")
            .with_active(EffectSpec::area(1, 5)),
        CardTemplate::new(GUNNER, "Gunner", 4, "G")
            .with_description(
                "Active: shoots the first unit ahead for 2. End of turn: shoots it for 1.",
            )
            .with_active(EffectSpec::beam(2))
            .with_end_of_turn(EffectSpec::beam(1)),
        CardTemplate::new(HEALER, "Healer", 3, "H")
            .with_description("Start of turn: heals the nearest units by 1.")
            .with_start_of_turn(EffectSpec::nearest_heal(1)),
        CardTemplate::new(SPOTTER, "Spotter", 2, "P")
            .with_description(
                "Active: marks a field. Start of turn: deals 2 damage to whatever stands on it.",
            )
            .with_active(EffectSpec::designate())
            .with_start_of_turn(EffectSpec::barrage(2)),
    ]
    .into_iter()
    .collect()
}

/// A 7x6 board with three rows per side, three blind units, and the
/// standard card set.
#[must_use]
pub fn standard_rules() -> GameRules {
    GameRules::new(7, 6, 3)
        .with_blind_stage_units(3)
        .with_starting_hand_size(8)
        .with_move_points(1, 3)
        .with_reserved_id_count(5)
        .with_card_set(standard_catalog())
}
