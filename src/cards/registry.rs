//! Card catalog for template lookup.
//!
//! The `CardCatalog` stores every template a game may deal. It provides fast
//! lookup by `ProtoId` and serializes as a list sorted by id, which is the
//! shape clients receive inside `gameStarted`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardTemplate, ProtoId};
use crate::core::RulesError;
use crate::effects::EffectKind;

/// Largest area radius a template may carry.
pub const MAX_EFFECT_RADIUS: i32 = 16;
/// Largest damage or heal, in either direction, a single effect may deal.
pub const MAX_EFFECT_AMOUNT: i32 = 1_000;

/// Catalog of card templates.
///
/// ## Example
///
/// ```
/// use grid_ccg::cards::{CardCatalog, CardTemplate, ProtoId};
///
/// let mut catalog = CardCatalog::new();
/// catalog
///     .register(CardTemplate::new(ProtoId::new(0), "Soldier", 5, "S"))
///     .unwrap();
///
/// assert_eq!(catalog.get(ProtoId::new(0)).unwrap().name, "Soldier");
/// assert!(catalog.register(CardTemplate::new(ProtoId::new(0), "Again", 1, "A")).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CardTemplate>", into = "Vec<CardTemplate>")]
pub struct CardCatalog {
    templates: FxHashMap<ProtoId, CardTemplate>,
}

impl CardCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. Fails if the id is already taken.
    pub fn register(&mut self, template: CardTemplate) -> Result<(), RulesError> {
        if self.templates.contains_key(&template.id) {
            return Err(RulesError::DuplicateProto(template.id));
        }
        self.templates.insert(template.id, template);
        Ok(())
    }

    /// Builder form of [`CardCatalog::register`].
    pub fn with(mut self, template: CardTemplate) -> Result<Self, RulesError> {
        self.register(template)?;
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, id: ProtoId) -> Option<&CardTemplate> {
        self.templates.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ProtoId) -> bool {
        self.templates.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// All proto ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<ProtoId> {
        let mut ids: Vec<_> = self.templates.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Templates in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        let mut templates: Vec<_> = self.templates.values().collect();
        templates.sort_unstable_by_key(|t| t.id);
        templates.into_iter()
    }

    /// Check every template for values the engine cannot run with.
    ///
    /// A template must have positive base strength, effect radii must lie in
    /// `0..=MAX_EFFECT_RADIUS` and amounts within `MAX_EFFECT_AMOUNT` either
    /// way. A `designate` active needs a `barrage` binding on the same
    /// template to write its targets into.
    pub fn validate(&self) -> Result<(), RulesError> {
        for template in self.iter() {
            if template.base_strength <= 0 {
                return Err(RulesError::NonPositiveStrength(template.id));
            }
            for (_, spec) in template.bindings() {
                if !(0..=MAX_EFFECT_RADIUS).contains(&spec.radius) {
                    return Err(RulesError::EffectRadius {
                        proto: template.id,
                        radius: spec.radius,
                    });
                }
                if spec.amount.unsigned_abs() > MAX_EFFECT_AMOUNT.unsigned_abs() {
                    return Err(RulesError::EffectAmount {
                        proto: template.id,
                        amount: spec.amount,
                    });
                }
            }

            let designates = template
                .active
                .as_ref()
                .is_some_and(|a| a.kind == EffectKind::Designate);
            let has_barrage = [&template.start_of_turn, &template.end_of_turn]
                .into_iter()
                .flatten()
                .any(|s| s.kind == EffectKind::Barrage);

            if designates && !has_barrage {
                return Err(RulesError::MissingCompanion(template.id));
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<CardTemplate>> for CardCatalog {
    type Error = RulesError;

    fn try_from(templates: Vec<CardTemplate>) -> Result<Self, Self::Error> {
        let mut catalog = CardCatalog::new();
        for template in templates {
            catalog.register(template)?;
        }
        Ok(catalog)
    }
}

/// Like collecting into a map: a later template replaces an earlier one with
/// the same id. Use [`CardCatalog::register`] to treat duplicates as errors.
impl FromIterator<CardTemplate> for CardCatalog {
    fn from_iter<I: IntoIterator<Item = CardTemplate>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().map(|t| (t.id, t)).collect(),
        }
    }
}

impl From<CardCatalog> for Vec<CardTemplate> {
    fn from(catalog: CardCatalog) -> Self {
        let mut templates: Vec<_> = catalog.templates.into_values().collect();
        templates.sort_unstable_by_key(|t| t.id);
        templates
    }
}
