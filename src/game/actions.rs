//! Player actions.
//!
//! Each action validates with its `can_*` predicate, then mutates. A
//! rejection leaves the game untouched. Applied actions are appended to the
//! history.

use smallvec::SmallVec;
use tracing::{debug, info};

use super::event::GameEvent;
use super::state::Game;
use crate::core::{Action, Coord, EngineError, EntityId, Placement, PlayerId};
use crate::effects;

impl Game {
    /// Apply any action. The single entry point used by the session.
    pub fn apply(&mut self, player: PlayerId, action: &Action) -> Result<(), EngineError> {
        match action {
            Action::FinishBlindStage { placements } => self.finish_blind_stage(player, placements),
            Action::PlayCard(placement) => self.play_card(player, *placement),
            Action::MoveCard { card, to } => self.move_card(player, *card, *to),
            Action::Activate { card, targets } => self.activate(player, *card, targets),
            Action::ReturnToHand { card } => self.return_to_hand(player, *card),
            Action::Skip => self.skip(player),
        }
    }

    /// Play a card from hand onto the board, spending a reserved id.
    pub fn play_card(&mut self, player: PlayerId, placement: Placement) -> Result<(), EngineError> {
        self.can_play(player, &placement)?;

        self.deploy(player, &placement)?;
        if !self.stage().is_blind() {
            self.players[player].mark_played();
        }

        debug!(%player, card = %placement.card, proto = %placement.proto, at = %placement.at, "card played");
        self.record(player, Action::PlayCard(placement));
        Ok(())
    }

    fn deploy(&mut self, player: PlayerId, placement: &Placement) -> Result<(), EngineError> {
        let state = &mut self.players[player];
        if !state.spend_ticket(placement.card) || !state.remove_from_hand(placement.proto) {
            return Err(EngineError::invariant(format!(
                "{player} lost {} or {} between validation and play",
                placement.card, placement.proto
            )));
        }
        self.create_card(player, placement.proto, placement.card)?;
        self.put_card(placement.card, placement.at)
    }

    /// Deploy a batch of units and mark the player done with the blind stage.
    /// Ends the blind stage when both players are done.
    pub fn finish_blind_stage(
        &mut self,
        player: PlayerId,
        placements: &[Placement],
    ) -> Result<(), EngineError> {
        self.can_finish_blind_stage(player, placements)?;

        for placement in placements {
            self.deploy(player, placement)?;
        }
        self.players[player].mark_ready();

        info!(%player, units = self.unit_count(player), "finished blind stage");
        self.record(
            player,
            Action::FinishBlindStage {
                placements: SmallVec::from_slice(placements),
            },
        );

        if PlayerId::BOTH.iter().all(|&p| self.player(p).is_ready()) {
            self.end_blind_stage()?;
        }
        Ok(())
    }

    /// Move a unit. Outside the blind stage this costs one move point.
    pub fn move_card(&mut self, player: PlayerId, card: EntityId, to: Coord) -> Result<(), EngineError> {
        self.can_move(player, card, to)?;

        self.put_card(card, to)?;
        if !self.stage().is_blind() {
            let state = &mut self.players[player];
            state.spend_move_point();
            state.mark_moved(card);
        }

        debug!(%player, %card, %to, "card moved");
        self.record(player, Action::MoveCard { card, to });
        Ok(())
    }

    /// Use the active ability of `card`.
    ///
    /// `targets` are the cells picked for the ability's target kinds, in
    /// order. A designate ability stores them on the card's barrage instead of
    /// dealing damage now.
    pub fn activate(
        &mut self,
        player: PlayerId,
        card: EntityId,
        targets: &[Coord],
    ) -> Result<(), EngineError> {
        let binding = self.active_binding(player, card, targets)?;

        self.players[player].mark_activated(card);
        self.set_binding_targets(binding, targets);
        effects::fire(self, binding)?;

        debug!(%player, %card, "active used");
        self.record(
            player,
            Action::Activate {
                card,
                targets: SmallVec::from_slice(targets),
            },
        );
        Ok(())
    }

    /// End the player's turn.
    pub fn skip(&mut self, player: PlayerId) -> Result<(), EngineError> {
        self.can_skip(player)?;

        self.record(player, Action::Skip);
        self.end_turn(player)
    }

    /// Lift a unit back into its owner's hand during the blind stage. The
    /// instance is destroyed; its id is not given back.
    pub fn return_to_hand(&mut self, player: PlayerId, card: EntityId) -> Result<(), EngineError> {
        self.can_return_to_hand(player, card)?;

        let proto = self.registered(card)?.proto;
        let from = self.remove_card(card)?;
        self.players[player].add_to_hand(proto);
        self.push_event(GameEvent::CardLifted { card, from });

        debug!(%player, %card, "card returned to hand");
        self.record(player, Action::ReturnToHand { card });
        Ok(())
    }
}
