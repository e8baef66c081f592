//! Effect resolution.
//!
//! Each `EffectKind` resolves through the same contract,
//! `resolve(game, source, args)`, and touches the game only through its
//! public primitives (`take_damage`, `put_card`, the designate hook). A whole
//! resolution runs inside one damage group, so eliminations are judged only
//! after every hit has landed.

use tracing::debug;

use super::effect::{BindingId, EffectArgs, EffectKind};
use super::targeting::{area_cells, beam_cells, nearest_units};
use crate::core::{EngineError, EntityId};
use crate::game::{Game, GameEvent};

impl EffectKind {
    /// Apply this effect for `source` with `args`.
    ///
    /// The source's position is read once, up front; the source may die
    /// halfway through (an area blast hits its own cell).
    pub fn resolve(self, game: &mut Game, source: EntityId, args: &EffectArgs) -> Result<(), EngineError> {
        let (origin, owner) = {
            let card = game.registered(source)?;
            let origin = card.position.ok_or_else(|| {
                EngineError::invariant(format!("{source} fired an effect from off the board"))
            })?;
            (origin, card.owner)
        };

        match self {
            EffectKind::Area => {
                for cell in area_cells(origin, args.radius, game.geometry()) {
                    if let Some(hit) = game.board().get(cell) {
                        game.take_damage(hit, args.amount)?;
                    }
                }
            }
            EffectKind::Beam => {
                let geometry = *game.geometry();
                let hit = beam_cells(origin, owner, &geometry).find_map(|c| game.board().get(c));
                if let Some(hit) = hit {
                    game.take_damage(hit, args.amount)?;
                }
            }
            EffectKind::NearestHeal => {
                for hit in nearest_units(game.board(), source, origin) {
                    game.take_damage(hit, -args.amount)?;
                }
            }
            EffectKind::Designate => {
                game.designate(source, &args.targets)?;
            }
            EffectKind::Barrage => {
                for &cell in &args.targets {
                    if let Some(hit) = game.board().get(cell) {
                        game.take_damage(hit, args.amount)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Fire one live binding as a single damage group.
///
/// A binding whose card has left the board is skipped; returns whether it
/// fired.
pub(crate) fn fire(game: &mut Game, id: BindingId) -> Result<bool, EngineError> {
    let Some(binding) = game.binding(id).cloned() else {
        return Ok(false);
    };
    if !game.board().contains_card(binding.card) {
        return Ok(false);
    }

    debug!(card = %binding.card, kind = ?binding.kind, trigger = ?binding.trigger, "effect fired");
    game.push_event(GameEvent::EffectFired {
        card: binding.card,
        kind: binding.kind,
        trigger: binding.trigger,
    });

    game.begin_group();
    let resolved = binding.kind.resolve(game, binding.card, &binding.args);
    game.end_group()?;
    resolved.map(|()| true)
}
