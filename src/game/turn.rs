//! Turn flow: the reveal, turn entry, turn exit, and fatigue.

use tracing::{debug, info};

use super::event::GameEvent;
use super::state::Game;
use crate::core::{EngineError, PlayerId};
use crate::effects::{self, TriggerPoint};
use crate::rules::{GameResult, StageTrigger};

impl Game {
    /// Leave the blind stage. The player with the higher total strength on
    /// the board moves first; player 1 wins ties.
    pub(crate) fn end_blind_stage(&mut self) -> Result<(), EngineError> {
        let p1 = self.total_strength(PlayerId::P1);
        let p2 = self.total_strength(PlayerId::P2);
        let first = if p1 >= p2 { PlayerId::P1 } else { PlayerId::P2 };

        self.transition(StageTrigger::BlindStageComplete { first })?;
        info!(%first, p1_strength = p1, p2_strength = p2, "blind stage over");
        self.push_event(GameEvent::BlindStageOver { first });

        self.start_turn(first)
    }

    /// Enter `player`'s turn: grant move points, reset the turn flags, fire
    /// start-of-turn effects.
    fn start_turn(&mut self, player: PlayerId) -> Result<(), EngineError> {
        let turn = self.begin_turn_counter();
        let (per_turn, max) = (self.rules().move_points_per_turn, self.rules().max_move_points);
        self.players[player].begin_turn(per_turn, max);

        info!(%player, turn, move_points = self.player(player).move_points(), "turn started");
        self.push_event(GameEvent::TurnStarted { player, turn });

        self.fire_triggers(player, TriggerPoint::StartOfTurn)
    }

    /// Leave `player`'s turn.
    ///
    /// A player who played no card this turn takes fatigue first. Then their
    /// end-of-turn effects fire, and the turn passes. Stops as soon as the
    /// game is over.
    pub(crate) fn end_turn(&mut self, player: PlayerId) -> Result<(), EngineError> {
        if !self.player(player).played_this_turn() {
            self.take_fatigue(player)?;
            if self.is_over() {
                return Ok(());
            }
        }

        self.fire_triggers(player, TriggerPoint::EndOfTurn)?;
        if self.is_over() {
            return Ok(());
        }

        self.transition(StageTrigger::TurnEnded)?;
        self.start_turn(player.other())
    }

    /// Damage the player's strongest unit by their fatigue counter, then
    /// raise the counter. A player with no units loses instead.
    ///
    /// Ties go to the unit nearest the player's back row, then the leftmost,
    /// both as seen from the player's own side.
    pub fn take_fatigue(&mut self, player: PlayerId) -> Result<(), EngineError> {
        let amount = self.player(player).fatigue();
        let geometry = *self.geometry();

        let target = self
            .units(player)
            .into_iter()
            .filter_map(|card| {
                let own = geometry.to_player_frame(player, card.position?);
                Some((card.id, card.strength, own))
            })
            .min_by_key(|&(_, strength, own)| (-strength, own.y, own.x))
            .map(|(id, _, _)| id);

        self.push_event(GameEvent::Fatigue {
            player,
            card: target,
            amount,
        });

        let Some(card) = target else {
            info!(%player, "fatigue with no units left");
            return self.finish(GameResult::Winner(player.other()));
        };

        debug!(%player, %card, amount, "fatigue");
        self.take_damage(card, amount)?;
        self.players[player].increment_fatigue();
        Ok(())
    }

    /// Fire the player's registered bindings for `point`, in registration
    /// order. Bindings of cards that have left the board are pruned.
    fn fire_triggers(&mut self, player: PlayerId, point: TriggerPoint) -> Result<(), EngineError> {
        self.prune_bindings(player);

        for id in self.trigger_list(player, point) {
            if self.is_over() {
                break;
            }
            effects::fire(self, id)?;
        }

        self.prune_bindings(player);
        Ok(())
    }
}
