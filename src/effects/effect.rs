//! Effect definitions.
//!
//! An effect is a closed set of shapes (`EffectKind`) plus a parameter bag
//! (`EffectArgs`). Templates describe effects with an `EffectSpec`; when a
//! card is created each spec becomes a live `EffectBinding` owned by the game.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::targeting::TargetKind;
use crate::core::{Coord, EntityId};

/// The shape of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    /// Damage every unit in a square of `radius` around the source, source
    /// included.
    Area,
    /// Damage the first unit straight ahead of the source, toward the
    /// opponent's side.
    Beam,
    /// Heal every unit tied for the smallest Manhattan distance to the source.
    NearestHeal,
    /// Pick cells and hand them to the same card's `Barrage` binding.
    Designate,
    /// Damage whatever stands on the designated cells.
    Barrage,
}

impl EffectKind {
    /// Cells the acting player must pick before this effect resolves, in order.
    #[must_use]
    pub fn target_kinds(self) -> &'static [TargetKind] {
        match self {
            EffectKind::Designate => &[TargetKind::AnyField],
            EffectKind::Area | EffectKind::Beam | EffectKind::NearestHeal | EffectKind::Barrage => {
                &[]
            }
        }
    }
}

/// Catalog description of one effect binding.
///
/// `amount` is damage for the offensive kinds and heal for `NearestHeal`;
/// `radius` is only read by `Area`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectSpec {
    pub kind: EffectKind,
    #[serde(default)]
    pub amount: i32,
    #[serde(default)]
    pub radius: i32,
}

impl EffectSpec {
    #[must_use]
    pub const fn new(kind: EffectKind, amount: i32) -> Self {
        Self {
            kind,
            amount,
            radius: 0,
        }
    }

    #[must_use]
    pub const fn area(radius: i32, damage: i32) -> Self {
        Self {
            kind: EffectKind::Area,
            amount: damage,
            radius,
        }
    }

    #[must_use]
    pub const fn beam(damage: i32) -> Self {
        Self::new(EffectKind::Beam, damage)
    }

    #[must_use]
    pub const fn nearest_heal(amount: i32) -> Self {
        Self::new(EffectKind::NearestHeal, amount)
    }

    #[must_use]
    pub const fn designate() -> Self {
        Self::new(EffectKind::Designate, 0)
    }

    #[must_use]
    pub const fn barrage(damage: i32) -> Self {
        Self::new(EffectKind::Barrage, damage)
    }
}

/// When a binding fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerPoint {
    Active,
    StartOfTurn,
    EndOfTurn,
}

/// Identifier of a live effect binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingId(pub u32);

impl std::fmt::Display for BindingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Binding#{}", self.0)
    }
}

/// Mutable argument bag of a binding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectArgs {
    pub amount: i32,
    pub radius: i32,
    /// Cells written by a `Designate` step. Kept until overwritten.
    pub targets: SmallVec<[Coord; 2]>,
}

impl From<&EffectSpec> for EffectArgs {
    fn from(spec: &EffectSpec) -> Self {
        Self {
            amount: spec.amount,
            radius: spec.radius,
            targets: SmallVec::new(),
        }
    }
}

/// A live effect attached to a card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectBinding {
    pub id: BindingId,
    pub card: EntityId,
    pub trigger: TriggerPoint,
    pub kind: EffectKind,
    pub args: EffectArgs,
}

impl EffectBinding {
    #[must_use]
    pub fn new(id: BindingId, card: EntityId, trigger: TriggerPoint, spec: &EffectSpec) -> Self {
        Self {
            id,
            card,
            trigger,
            kind: spec.kind,
            args: EffectArgs::from(spec),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_constructors() {
        let area = EffectSpec::area(1, 5);
        assert_eq!(area.kind, EffectKind::Area);
        assert_eq!((area.amount, area.radius), (5, 1));

        assert_eq!(EffectSpec::beam(2).radius, 0);
        assert_eq!(EffectSpec::designate().amount, 0);
    }

    #[test]
    fn test_only_designate_needs_targets() {
        assert_eq!(EffectKind::Designate.target_kinds(), &[TargetKind::AnyField]);
        assert!(EffectKind::Area.target_kinds().is_empty());
        assert!(EffectKind::Barrage.target_kinds().is_empty());
    }

    #[test]
    fn test_binding_copies_spec_args() {
        let spec = EffectSpec::area(2, 3);
        let binding = EffectBinding::new(BindingId(1), EntityId(7), TriggerPoint::Active, &spec);

        assert_eq!(binding.args.amount, 3);
        assert_eq!(binding.args.radius, 2);
        assert!(binding.args.targets.is_empty());
    }

    #[test]
    fn test_spec_toml_defaults() {
        let spec: EffectSpec = toml::from_str(r#"kind = "nearestHeal""#).unwrap();
        assert_eq!(spec, EffectSpec::nearest_heal(0));
    }
}
