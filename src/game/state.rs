//! Authoritative game state and its mutation primitives.
//!
//! `Game` owns the board, the id -> card registry, the live effect bindings,
//! both players, and the stage machine. Every placement goes through
//! [`Game::put_card`] and every strength change through [`Game::take_damage`];
//! effects and the session never write the board or turn flags directly.

use im::Vector;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, info};

use super::event::GameEvent;
use super::player::Player;
use crate::board::Board;
use crate::cards::{CardInstance, ProtoId};
use crate::core::{
    Action, ActionRecord, Coord, EngineError, EntityAllocator, EntityId, GameRules, Geometry,
    PlayerId, PlayerMap, Rejection, RulesError,
};
use crate::effects::{BindingId, EffectBinding, EffectKind, EffectSpec, TriggerPoint};
use crate::rules::{GameResult, Stage, StageTrigger};

/// One game between two players.
///
/// ## Example
///
/// ```
/// use grid_ccg::catalog;
/// use grid_ccg::core::{Coord, Placement, PlayerId};
/// use grid_ccg::game::Game;
///
/// let mut game = Game::new(catalog::standard_rules()).unwrap();
/// game.deal(PlayerId::P1, &[catalog::SOLDIER]).unwrap();
///
/// let ticket = game.player(PlayerId::P1).tickets()[0];
/// game.play_card(PlayerId::P1, Placement::new(ticket, catalog::SOLDIER, Coord::new(3, 0)))
///     .unwrap();
///
/// assert_eq!(game.board().get(Coord::new(3, 0)), Some(ticket));
/// assert!(game.stage().is_blind());
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    rules: GameRules,
    geometry: Geometry,
    board: Board,

    /// Canonical id -> instance registry. Holds exactly the cards on the board.
    cards: FxHashMap<EntityId, CardInstance>,

    bindings: FxHashMap<BindingId, EffectBinding>,
    next_binding: u32,

    ids: EntityAllocator,
    pub(crate) players: PlayerMap<Player>,

    stage: Stage,
    turn_number: u32,

    /// Nesting depth of damage groups; elimination is checked at depth 0.
    group_depth: u32,
    /// Players who lost a unit since the last elimination check.
    lost_units: PlayerMap<bool>,

    events: Vec<GameEvent>,
    history: Vector<ActionRecord>,
}

impl Game {
    /// Start a game in the blind stage. Each player's reserved id pool is
    /// filled; hands start empty (see [`Game::deal`]).
    pub fn new(rules: GameRules) -> Result<Self, RulesError> {
        rules.validate()?;

        let geometry = rules.geometry();
        let mut game = Self {
            geometry,
            board: Board::new(geometry),
            rules,
            cards: FxHashMap::default(),
            bindings: FxHashMap::default(),
            next_binding: 1,
            ids: EntityAllocator::default(),
            players: PlayerMap::new(Player::new),
            stage: Stage::Blind,
            turn_number: 0,
            group_depth: 0,
            lost_units: PlayerMap::with_value(false),
            events: Vec::new(),
            history: Vector::new(),
        };
        for player in PlayerId::BOTH {
            game.replenish_tickets(player);
        }
        Ok(game)
    }

    // === Accessors ===

    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn card(&self, id: EntityId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn binding(&self, id: BindingId) -> Option<&EffectBinding> {
        self.bindings.get(&id)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.stage.is_over()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.stage.result()
    }

    /// Number of turns started so far. Zero during the blind stage.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// A player's units in board order.
    #[must_use]
    pub fn units(&self, player: PlayerId) -> Vec<&CardInstance> {
        self.board
            .iter()
            .filter_map(|(_, id)| self.cards.get(&id))
            .filter(|card| card.owner == player)
            .collect()
    }

    #[must_use]
    pub fn unit_count(&self, player: PlayerId) -> usize {
        self.units(player).len()
    }

    #[must_use]
    pub fn total_strength(&self, player: PlayerId) -> i32 {
        self.units(player).iter().map(|card| card.strength).sum()
    }

    // === Hands and tickets ===

    /// Add templates to a player's hand.
    pub fn deal(&mut self, player: PlayerId, protos: &[ProtoId]) -> Result<(), Rejection> {
        if let Some(&unknown) = protos.iter().find(|&&p| !self.rules.card_set.contains(p)) {
            return Err(Rejection::UnknownProto(unknown));
        }
        for &proto in protos {
            self.players[player].add_to_hand(proto);
        }
        Ok(())
    }

    /// Top the player's reserved id pool back up. Returns the new ids.
    pub fn replenish_tickets(&mut self, player: PlayerId) -> Vec<EntityId> {
        let missing = self
            .rules
            .reserved_id_count
            .saturating_sub(self.players[player].tickets().len());

        let granted: Vec<_> = (0..missing).map(|_| self.ids.alloc()).collect();
        for &id in &granted {
            self.players[player].grant_ticket(id);
        }
        granted
    }

    // === Board primitives ===

    /// Create a card instance off the board.
    pub(crate) fn create_card(
        &mut self,
        owner: PlayerId,
        proto: ProtoId,
        id: EntityId,
    ) -> Result<(), EngineError> {
        if self.cards.contains_key(&id) {
            return Err(EngineError::invariant(format!("{id} is already registered")));
        }
        let template = self
            .rules
            .card_set
            .get(proto)
            .ok_or_else(|| EngineError::invariant(format!("{proto} vanished from the catalog")))?;

        self.cards.insert(id, CardInstance::new(id, owner, template));
        Ok(())
    }

    /// Put a card on a cell.
    ///
    /// This is the single path onto the board. A card arriving for the first
    /// time gets its effect bindings, with start/end-of-turn bindings
    /// registered to its owner. A card already on the board moves, freeing
    /// its previous cell.
    pub fn put_card(&mut self, card: EntityId, at: Coord) -> Result<(), EngineError> {
        let (owner, proto, was_at) = {
            let instance = self.registered(card)?;
            (instance.owner, instance.proto, instance.position)
        };

        self.board.place(card, at)?;
        if was_at.is_none() {
            self.register_bindings(card)?;
        }
        if let Some(instance) = self.cards.get_mut(&card) {
            instance.position = Some(at);
        }

        self.events.push(match was_at {
            None => GameEvent::CardPlaced {
                card,
                owner,
                proto,
                at,
            },
            Some(from) => GameEvent::CardMoved { card, from, to: at },
        });
        Ok(())
    }

    fn register_bindings(&mut self, card: EntityId) -> Result<(), EngineError> {
        let (owner, proto) = {
            let instance = self.registered(card)?;
            (instance.owner, instance.proto)
        };
        let specs: SmallVec<[(TriggerPoint, EffectSpec); 3]> = self
            .rules
            .card_set
            .get(proto)
            .ok_or_else(|| EngineError::invariant(format!("{proto} vanished from the catalog")))?
            .bindings()
            .map(|(point, spec)| (point, *spec))
            .collect();

        for (point, spec) in specs {
            let id = BindingId(self.next_binding);
            self.next_binding += 1;
            self.bindings
                .insert(id, EffectBinding::new(id, card, point, &spec));

            let owner_state = &mut self.players[owner];
            let slot = match point {
                TriggerPoint::Active => None,
                TriggerPoint::StartOfTurn => Some(&mut owner_state.start_of_turn),
                TriggerPoint::EndOfTurn => Some(&mut owner_state.end_of_turn),
            };
            if let Some(list) = slot {
                list.push(id);
            }

            if let Some(instance) = self.cards.get_mut(&card) {
                match point {
                    TriggerPoint::Active => instance.active = Some(id),
                    TriggerPoint::StartOfTurn => instance.start_of_turn = Some(id),
                    TriggerPoint::EndOfTurn => instance.end_of_turn = Some(id),
                }
            }
        }
        Ok(())
    }

    /// Destroy a card: off the board, out of the registry, bindings dropped.
    /// Returns the cell it occupied.
    pub(crate) fn remove_card(&mut self, card: EntityId) -> Result<Coord, EngineError> {
        let instance = self
            .cards
            .remove(&card)
            .ok_or_else(|| EngineError::invariant(format!("{card} is missing from the registry")))?;
        for binding in instance.binding_ids() {
            self.bindings.remove(&binding);
        }
        self.board
            .remove(card)
            .ok_or_else(|| EngineError::invariant(format!("{card} is registered but not on the board")))
    }

    // === Damage ===

    /// Subtract `amount` from a card's strength (negative heals, unclamped).
    ///
    /// A card whose strength drops to zero or below is removed at once.
    /// After a death the elimination check runs immediately outside a damage
    /// group, or at the outermost [`Game::end_group`] inside one. A player
    /// whose board was already empty is not eliminated by someone else's
    /// death alone; if both players lose their last unit in the same group
    /// the game is a draw.
    pub fn take_damage(&mut self, card: EntityId, amount: i32) -> Result<(), EngineError> {
        let instance = self
            .cards
            .get_mut(&card)
            .ok_or_else(|| EngineError::invariant(format!("damage aimed at unknown {card}")))?;
        let strength = instance.apply_damage(amount);
        let dead = instance.is_dead();
        let owner = instance.owner;

        self.events.push(GameEvent::Damaged {
            card,
            amount,
            strength,
        });

        if dead {
            let at = self.remove_card(card)?;
            debug!(%card, %at, "card died");
            self.events.push(GameEvent::Died { card, at });
            self.lost_units[owner] = true;
        }

        if self.group_depth == 0 {
            self.settle()?;
        }
        Ok(())
    }

    /// Open a group of simultaneous damage applications.
    pub fn begin_group(&mut self) {
        self.group_depth += 1;
        self.events.push(GameEvent::GroupStarted);
    }

    /// Close a group; closing the outermost one settles eliminations.
    pub fn end_group(&mut self) -> Result<(), EngineError> {
        if self.group_depth == 0 {
            return Err(EngineError::invariant("end_group without begin_group"));
        }
        self.group_depth -= 1;
        self.events.push(GameEvent::GroupEnded);

        if self.group_depth == 0 {
            self.settle()?;
        }
        Ok(())
    }

    /// End the game if a death has emptied its owner's board.
    fn settle(&mut self) -> Result<(), EngineError> {
        let lost = std::mem::replace(&mut self.lost_units, PlayerMap::with_value(false));
        if self.stage.turn().is_none() {
            return Ok(());
        }

        let p1_out = lost[PlayerId::P1] && self.unit_count(PlayerId::P1) == 0;
        let p2_out = lost[PlayerId::P2] && self.unit_count(PlayerId::P2) == 0;
        let result = match (p1_out, p2_out) {
            (true, true) => GameResult::Draw,
            (true, false) => GameResult::Winner(PlayerId::P2),
            (false, true) => GameResult::Winner(PlayerId::P1),
            (false, false) => return Ok(()),
        };
        self.finish(result)
    }

    pub(crate) fn finish(&mut self, result: GameResult) -> Result<(), EngineError> {
        self.transition(StageTrigger::Eliminated(result))?;
        info!(?result, turn = self.turn_number, "game over");
        self.events.push(GameEvent::GameOver(result));
        Ok(())
    }

    // === Effects ===

    /// Write picked cells into the `Barrage` binding of `source`.
    pub(crate) fn designate(&mut self, source: EntityId, targets: &[Coord]) -> Result<(), EngineError> {
        let instance = self.registered(source)?;
        let companion = [instance.start_of_turn, instance.end_of_turn]
            .into_iter()
            .flatten()
            .find(|id| {
                self.bindings
                    .get(id)
                    .is_some_and(|b| b.kind == EffectKind::Barrage)
            })
            .ok_or_else(|| EngineError::invariant(format!("{source} has no barrage to designate for")))?;

        if let Some(binding) = self.bindings.get_mut(&companion) {
            binding.args.targets = SmallVec::from_slice(targets);
        }
        self.events.push(GameEvent::TargetsDesignated {
            card: source,
            targets: SmallVec::from_slice(targets),
        });
        Ok(())
    }

    /// Snapshot of the player's registered bindings for a passive trigger.
    pub(crate) fn trigger_list(&self, player: PlayerId, point: TriggerPoint) -> Vec<BindingId> {
        let state = &self.players[player];
        match point {
            TriggerPoint::StartOfTurn => state.start_of_turn.clone(),
            TriggerPoint::EndOfTurn => state.end_of_turn.clone(),
            TriggerPoint::Active => Vec::new(),
        }
    }

    /// Drop registrations whose binding died with its card.
    pub(crate) fn prune_bindings(&mut self, player: PlayerId) {
        let bindings = &self.bindings;
        let state = &mut self.players[player];
        state.start_of_turn.retain(|id| bindings.contains_key(id));
        state.end_of_turn.retain(|id| bindings.contains_key(id));
    }

    pub(crate) fn set_binding_targets(&mut self, id: BindingId, targets: &[Coord]) {
        if let Some(binding) = self.bindings.get_mut(&id) {
            binding.args.targets = SmallVec::from_slice(targets);
        }
    }

    // === Internals shared by the action and turn modules ===

    pub(crate) fn registered(&self, card: EntityId) -> Result<&CardInstance, EngineError> {
        self.cards
            .get(&card)
            .ok_or_else(|| EngineError::invariant(format!("{card} is missing from the registry")))
    }

    pub(crate) fn transition(&mut self, trigger: StageTrigger) -> Result<(), EngineError> {
        let next = self.stage.next(trigger).ok_or_else(|| {
            EngineError::invariant(format!("no transition from {} on {trigger:?}", self.stage))
        })?;
        debug!(from = %self.stage, to = %next, "stage transition");
        self.stage = next;
        Ok(())
    }

    pub(crate) fn begin_turn_counter(&mut self) -> u32 {
        self.turn_number += 1;
        self.turn_number
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn record(&mut self, player: PlayerId, action: Action) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(player, action, self.turn_number, sequence));
    }
}
