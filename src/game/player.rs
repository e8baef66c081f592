//! Per-player state.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::ProtoId;
use crate::core::{EntityId, PlayerId};
use crate::effects::BindingId;

/// One player's hand, resources, and turn-scoped flags.
///
/// Turn flags are reset exactly once, when the player's turn starts
/// ([`Player::begin_turn`]).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    hand: Vec<ProtoId>,

    /// Reserved ids this player may give to cards they play.
    tickets: Vec<EntityId>,

    move_points: u32,

    /// Damage dealt by the next fatigue. Starts at 1.
    fatigue: i32,

    played_this_turn: bool,
    moved_this_turn: FxHashSet<EntityId>,
    /// The card whose active was used this turn.
    activated_this_turn: Option<EntityId>,

    /// Finished the blind stage.
    ready: bool,

    pub(crate) start_of_turn: Vec<BindingId>,
    pub(crate) end_of_turn: Vec<BindingId>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            hand: Vec::new(),
            tickets: Vec::new(),
            move_points: 0,
            fatigue: 1,
            played_this_turn: false,
            moved_this_turn: FxHashSet::default(),
            activated_this_turn: None,
            ready: false,
            start_of_turn: Vec::new(),
            end_of_turn: Vec::new(),
        }
    }

    #[must_use]
    pub fn hand(&self) -> &[ProtoId] {
        &self.hand
    }

    /// How many copies of a template the hand holds.
    #[must_use]
    pub fn count_in_hand(&self, proto: ProtoId) -> usize {
        self.hand.iter().filter(|&&p| p == proto).count()
    }

    pub(crate) fn add_to_hand(&mut self, proto: ProtoId) {
        self.hand.push(proto);
    }

    /// Remove one copy of `proto`. Returns false if the hand has none.
    pub(crate) fn remove_from_hand(&mut self, proto: ProtoId) -> bool {
        match self.hand.iter().position(|&p| p == proto) {
            Some(i) => {
                self.hand.remove(i);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn tickets(&self) -> &[EntityId] {
        &self.tickets
    }

    #[must_use]
    pub fn holds_ticket(&self, id: EntityId) -> bool {
        self.tickets.contains(&id)
    }

    pub(crate) fn grant_ticket(&mut self, id: EntityId) {
        self.tickets.push(id);
    }

    /// Consume a reserved id. Returns false if it was not reserved.
    pub(crate) fn spend_ticket(&mut self, id: EntityId) -> bool {
        match self.tickets.iter().position(|&t| t == id) {
            Some(i) => {
                self.tickets.remove(i);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn move_points(&self) -> u32 {
        self.move_points
    }

    pub(crate) fn spend_move_point(&mut self) {
        self.move_points = self.move_points.saturating_sub(1);
    }

    #[must_use]
    pub fn fatigue(&self) -> i32 {
        self.fatigue
    }

    pub(crate) fn increment_fatigue(&mut self) {
        self.fatigue += 1;
    }

    #[must_use]
    pub fn played_this_turn(&self) -> bool {
        self.played_this_turn
    }

    pub(crate) fn mark_played(&mut self) {
        self.played_this_turn = true;
    }

    #[must_use]
    pub fn moved_this_turn(&self, card: EntityId) -> bool {
        self.moved_this_turn.contains(&card)
    }

    /// Cards moved this turn, sorted.
    #[must_use]
    pub fn moved_cards(&self) -> Vec<EntityId> {
        let mut cards: Vec<_> = self.moved_this_turn.iter().copied().collect();
        cards.sort_unstable();
        cards
    }

    pub(crate) fn mark_moved(&mut self, card: EntityId) {
        self.moved_this_turn.insert(card);
    }

    #[must_use]
    pub fn used_active(&self) -> bool {
        self.activated_this_turn.is_some()
    }

    #[must_use]
    pub fn activated_this_turn(&self) -> Option<EntityId> {
        self.activated_this_turn
    }

    pub(crate) fn mark_activated(&mut self, card: EntityId) {
        self.activated_this_turn = Some(card);
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub(crate) fn mark_ready(&mut self) {
        self.ready = true;
    }

    /// Enter this player's turn: grant move points up to `max` and clear the
    /// turn flags.
    pub(crate) fn begin_turn(&mut self, per_turn: u32, max: u32) {
        self.move_points = (self.move_points + per_turn).min(max);
        self.played_this_turn = false;
        self.moved_this_turn.clear();
        self.activated_this_turn = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player() {
        let player = Player::new(PlayerId::P2);

        assert_eq!(player.fatigue(), 1);
        assert_eq!(player.move_points(), 0);
        assert!(!player.is_ready());
        assert!(!player.used_active());
        assert!(player.hand().is_empty());
    }

    #[test]
    fn test_hand_is_a_multiset() {
        let mut player = Player::new(PlayerId::P1);
        player.add_to_hand(ProtoId::new(1));
        player.add_to_hand(ProtoId::new(1));
        player.add_to_hand(ProtoId::new(2));

        assert_eq!(player.count_in_hand(ProtoId::new(1)), 2);
        assert!(player.remove_from_hand(ProtoId::new(1)));
        assert_eq!(player.count_in_hand(ProtoId::new(1)), 1);
        assert!(!player.remove_from_hand(ProtoId::new(9)));
        assert_eq!(player.hand().len(), 2);
    }

    #[test]
    fn test_tickets() {
        let mut player = Player::new(PlayerId::P1);
        player.grant_ticket(EntityId(4));
        player.grant_ticket(EntityId(5));

        assert!(player.holds_ticket(EntityId(5)));
        assert!(player.spend_ticket(EntityId(5)));
        assert!(!player.spend_ticket(EntityId(5)));
        assert_eq!(player.tickets(), &[EntityId(4)]);
    }

    #[test]
    fn test_begin_turn_caps_move_points_and_clears_flags() {
        let mut player = Player::new(PlayerId::P1);
        player.mark_played();
        player.mark_moved(EntityId(1));
        player.mark_activated(EntityId(2));

        player.begin_turn(2, 3);
        assert_eq!(player.move_points(), 2);
        assert!(!player.played_this_turn());
        assert!(!player.moved_this_turn(EntityId(1)));
        assert!(!player.used_active());

        player.begin_turn(2, 3);
        assert_eq!(player.move_points(), 3);

        player.spend_move_point();
        assert_eq!(player.move_points(), 2);
    }
}
