//! Legality predicates.
//!
//! Every mutating action has a side-effect-free `can_*` counterpart that
//! either passes or names the reason the action is refused. The mutators in
//! `actions` call these first and never mutate on a rejection.

use rustc_hash::FxHashSet;

use super::state::Game;
use crate::cards::CardInstance;
use crate::core::{Coord, EntityId, Placement, PlayerId, Rejection};
use crate::effects::{validate_targets, BindingId};
use crate::rules::Stage;

impl Game {
    fn ensure_running(&self) -> Result<(), Rejection> {
        if self.is_over() {
            Err(Rejection::GameOver)
        } else {
            Ok(())
        }
    }

    fn ensure_turn(&self, player: PlayerId) -> Result<(), Rejection> {
        match self.stage() {
            Stage::Turn(p) if p == player => Ok(()),
            Stage::Blind => Err(Rejection::InBlindStage),
            _ => Err(Rejection::NotYourTurn),
        }
    }

    /// The card, checked to exist, belong to `player` and be on the board.
    fn own_unit(&self, player: PlayerId, card: EntityId) -> Result<&CardInstance, Rejection> {
        let instance = self.card(card).ok_or(Rejection::UnknownCard(card))?;
        if instance.owner != player {
            return Err(Rejection::NotOwner(card));
        }
        if !instance.on_board() {
            return Err(Rejection::NotOnBoard(card));
        }
        Ok(instance)
    }

    /// Cell-level play checks, independent of which card is played.
    fn check_play_cell(&self, player: PlayerId, at: Coord) -> Result<(), Rejection> {
        self.ensure_running()?;

        if self.stage().is_blind() {
            if self.player(player).is_ready() {
                return Err(Rejection::AlreadyReady);
            }
            if self.unit_count(player) >= self.rules().blind_stage_units {
                return Err(Rejection::BlindStageLimit {
                    limit: self.rules().blind_stage_units,
                });
            }
        } else {
            match self.stage().turn() {
                Some(p) if p == player => {}
                _ => return Err(Rejection::NotYourTurn),
            }
            if self.player(player).played_this_turn() {
                return Err(Rejection::AlreadyPlayed);
            }
        }

        if !self.geometry().contains(at) {
            return Err(Rejection::OutOfBounds(at));
        }
        if self.stage().is_blind() && !self.geometry().in_own_half(player, at) {
            return Err(Rejection::OutsideOwnHalf(at));
        }
        if !self.board().is_free(at) {
            return Err(Rejection::CellOccupied(at));
        }
        Ok(())
    }

    /// Can `player` play a card from hand?
    ///
    /// During the blind stage the target must lie in the player's own half,
    /// the player must not have finished deploying, and fewer than
    /// `blind_stage_units` of their units may be on the board. Afterwards the
    /// player must hold the turn and not have played yet; any empty cell is
    /// allowed. The template must be in hand and the id must be one of the
    /// player's reserved tickets.
    pub fn can_play(&self, player: PlayerId, placement: &Placement) -> Result<(), Rejection> {
        self.check_play_cell(player, placement.at)?;
        self.check_card_source(player, placement)
    }

    fn check_card_source(&self, player: PlayerId, placement: &Placement) -> Result<(), Rejection> {
        if !self.rules().card_set.contains(placement.proto) {
            return Err(Rejection::UnknownProto(placement.proto));
        }
        if self.player(player).count_in_hand(placement.proto) == 0 {
            return Err(Rejection::NotInHand(placement.proto));
        }
        if !self.player(player).holds_ticket(placement.card) {
            return Err(Rejection::TicketNotReserved(placement.card));
        }
        Ok(())
    }

    /// Can `player` deploy `placements` and finish the blind stage in one go?
    ///
    /// The whole batch is judged against the board as it is now: every
    /// placement must be individually legal, cells and ids must be distinct,
    /// the hand must cover every template, and the total must stay within
    /// `blind_stage_units`.
    pub fn can_finish_blind_stage(
        &self,
        player: PlayerId,
        placements: &[Placement],
    ) -> Result<(), Rejection> {
        self.ensure_running()?;
        if !self.stage().is_blind() {
            return Err(Rejection::NotInBlindStage);
        }
        if self.player(player).is_ready() {
            return Err(Rejection::AlreadyReady);
        }

        let limit = self.rules().blind_stage_units;
        if self.unit_count(player) + placements.len() > limit {
            return Err(Rejection::BlindStageLimit { limit });
        }

        let mut cells = FxHashSet::default();
        let mut tickets = FxHashSet::default();
        for placement in placements {
            let at = placement.at;
            if !self.geometry().contains(at) {
                return Err(Rejection::OutOfBounds(at));
            }
            if !self.geometry().in_own_half(player, at) {
                return Err(Rejection::OutsideOwnHalf(at));
            }
            if !self.board().is_free(at) {
                return Err(Rejection::CellOccupied(at));
            }
            if !cells.insert(at) {
                return Err(Rejection::DuplicateCell(at));
            }
            if !tickets.insert(placement.card) {
                return Err(Rejection::DuplicateTicket(placement.card));
            }
            self.check_card_source(player, placement)?;

            let wanted = placements
                .iter()
                .filter(|p| p.proto == placement.proto)
                .count();
            if self.player(player).count_in_hand(placement.proto) < wanted {
                return Err(Rejection::NotInHand(placement.proto));
            }
        }
        Ok(())
    }

    /// Can `player` move `card` to `to`?
    ///
    /// During the blind stage a card moves freely within its owner's half
    /// until the owner has finished deploying. Afterwards a move needs the
    /// turn, a move point, and a destination exactly one step away; with
    /// `exclusive_move_and_active`, a card that used its active this turn
    /// cannot move.
    pub fn can_move(&self, player: PlayerId, card: EntityId, to: Coord) -> Result<(), Rejection> {
        self.ensure_running()?;
        let instance = self.own_unit(player, card)?;

        if !self.geometry().contains(to) {
            return Err(Rejection::OutOfBounds(to));
        }
        if !self.board().is_free(to) {
            return Err(Rejection::CellOccupied(to));
        }

        if self.stage().is_blind() {
            if self.player(player).is_ready() {
                return Err(Rejection::AlreadyReady);
            }
            if !self.geometry().in_own_half(player, to) {
                return Err(Rejection::OutsideOwnHalf(to));
            }
            return Ok(());
        }

        self.ensure_turn(player)?;
        let state = self.player(player);
        if state.move_points() == 0 {
            return Err(Rejection::NoMovePoints);
        }
        let from = instance.position.ok_or(Rejection::NotOnBoard(card))?;
        if from.manhattan(to) != 1 {
            return Err(Rejection::NotAdjacent { from, to });
        }
        if self.rules().exclusive_move_and_active && state.activated_this_turn() == Some(card) {
            return Err(Rejection::ActivatedThisTurn(card));
        }
        Ok(())
    }

    /// Can `player` use the active ability of `card` with `targets`?
    pub fn can_activate(
        &self,
        player: PlayerId,
        card: EntityId,
        targets: &[Coord],
    ) -> Result<(), Rejection> {
        self.active_binding(player, card, targets).map(|_| ())
    }

    /// The active binding `card` would fire, after all legality checks.
    pub(crate) fn active_binding(
        &self,
        player: PlayerId,
        card: EntityId,
        targets: &[Coord],
    ) -> Result<BindingId, Rejection> {
        self.ensure_running()?;
        self.ensure_turn(player)?;
        let instance = self.own_unit(player, card)?;

        let binding = instance
            .active
            .and_then(|id| self.binding(id))
            .ok_or(Rejection::NoActive(card))?;

        let state = self.player(player);
        if state.used_active() {
            return Err(Rejection::AlreadyUsedActive);
        }
        if self.rules().exclusive_move_and_active && state.moved_this_turn(card) {
            return Err(Rejection::MovedThisTurn(card));
        }

        validate_targets(binding.kind.target_kinds(), targets, self.geometry())?;
        Ok(binding.id)
    }

    /// Can `player` end their turn?
    pub fn can_skip(&self, player: PlayerId) -> Result<(), Rejection> {
        self.ensure_running()?;
        self.ensure_turn(player)
    }

    /// Can `player` lift `card` back into their hand?
    ///
    /// Only during the blind stage, before the player has finished deploying.
    pub fn can_return_to_hand(&self, player: PlayerId, card: EntityId) -> Result<(), Rejection> {
        self.ensure_running()?;
        if !self.stage().is_blind() {
            return Err(Rejection::NotInBlindStage);
        }
        if self.player(player).is_ready() {
            return Err(Rejection::AlreadyReady);
        }
        self.own_unit(player, card).map(|_| ())
    }

    /// Every cell on which `player` could play some card right now, in board
    /// order. Hand contents and tickets are not considered.
    #[must_use]
    pub fn allowed_play_cells(&self, player: PlayerId) -> Vec<Coord> {
        self.geometry()
            .cells()
            .filter(|&at| self.check_play_cell(player, at).is_ok())
            .collect()
    }

    /// Every cell `card` could move to right now, in board order.
    #[must_use]
    pub fn allowed_move_cells(&self, player: PlayerId, card: EntityId) -> Vec<Coord> {
        self.geometry()
            .cells()
            .filter(|&to| self.can_move(player, card, to).is_ok())
            .collect()
    }
}
