//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a card type: its name,
//! base strength, the letter used to draw it, and up to three effect
//! bindings (`active`, `startOfTurn`, `endOfTurn`).
//!
//! Instance-specific data (current strength, position) lives in
//! `CardInstance`.

use serde::{Deserialize, Serialize};

use crate::effects::{EffectSpec, TriggerPoint};

/// Identifier of a card template ("proto").
///
/// This identifies the type of card (e.g. "Bomber"), not a specific
/// instance in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtoId(pub u32);

impl ProtoId {
    /// Create a new proto ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ProtoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Proto({})", self.0)
    }
}

/// Static card template, loaded once with the rules and never mutated.
///
/// ## Example
///
/// ```
/// use grid_ccg::cards::{CardTemplate, ProtoId};
/// use grid_ccg::effects::EffectSpec;
///
/// let bomber = CardTemplate::new(ProtoId::new(2), "Bomber", 6, "B")
///     .with_active(EffectSpec::area(1, 5));
///
/// assert!(bomber.has_active());
/// assert_eq!(bomber.base_strength, 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTemplate {
    pub id: ProtoId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub base_strength: i32,

    /// Short code used to draw the card.
    pub letter: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<EffectSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_of_turn: Option<EffectSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_turn: Option<EffectSpec>,
}

impl CardTemplate {
    /// Create a template with no effects.
    #[must_use]
    pub fn new(
        id: ProtoId,
        name: impl Into<String>,
        base_strength: i32,
        letter: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            base_strength,
            letter: letter.into(),
            active: None,
            start_of_turn: None,
            end_of_turn: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_active(mut self, spec: EffectSpec) -> Self {
        self.active = Some(spec);
        self
    }

    #[must_use]
    pub fn with_start_of_turn(mut self, spec: EffectSpec) -> Self {
        self.start_of_turn = Some(spec);
        self
    }

    #[must_use]
    pub fn with_end_of_turn(mut self, spec: EffectSpec) -> Self {
        self.end_of_turn = Some(spec);
        self
    }

    #[must_use]
    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// The template's effect bindings with the point they trigger at.
    pub fn bindings(&self) -> impl Iterator<Item = (TriggerPoint, &EffectSpec)> {
        [
            (TriggerPoint::Active, self.active.as_ref()),
            (TriggerPoint::StartOfTurn, self.start_of_turn.as_ref()),
            (TriggerPoint::EndOfTurn, self.end_of_turn.as_ref()),
        ]
        .into_iter()
        .filter_map(|(point, spec)| spec.map(|s| (point, s)))
    }
}
