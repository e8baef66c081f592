//! Authoritative session adapter.
//!
//! A `GameSession` wraps one `Game` and speaks the wire protocol. For each
//! inbound message it converts coordinates from the sender's frame, runs
//! exactly one validate-then-apply cycle, and produces the outbound messages
//! for both players. Messages must be fed in arrival order; the session does
//! no locking of its own.

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::cards::ProtoId;
use crate::core::{
    Action, Coord, EngineError, GameRng, GameRules, Placement, PlayerId, PlayerMap, Rejection,
    RulesError,
};
use crate::game::{Game, GameEvent};
use crate::protocol::{
    ClientMessage, FullSync, PlayedCard, ServerMessage, SyncedOpponent, SyncedSelf, SyncedUnit,
};
use crate::rules::GameResult;

/// An outbound message and its recipient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub to: PlayerId,
    pub message: ServerMessage,
}

impl Envelope {
    #[must_use]
    pub fn new(to: PlayerId, message: ServerMessage) -> Self {
        Self { to, message }
    }
}

/// How the session judged one inbound message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Applied,
    /// Illegal action. Nothing changed and nothing is sent.
    Rejected(Rejection),
    /// Undecodable frame or fabricated payload. Nothing changed.
    ProtocolViolation(String),
    /// The server state can no longer be trusted; the session is dead.
    Desync(String),
}

/// Result of handling one inbound message.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub verdict: Verdict,
    pub outbound: Vec<Envelope>,
    /// Engine events produced while applying the message.
    pub events: Vec<GameEvent>,
}

impl Outcome {
    fn silent(verdict: Verdict) -> Self {
        Self {
            verdict,
            outbound: Vec::new(),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.verdict == Verdict::Applied
    }

    /// Messages addressed to one player, in send order.
    pub fn to(&self, player: PlayerId) -> impl Iterator<Item = &ServerMessage> {
        self.outbound
            .iter()
            .filter(move |e| e.to == player)
            .map(|e| &e.message)
    }
}

/// Failure to set up a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("cannot deal the starting hand: {0}")]
    Hand(#[from] Rejection),
}

/// Builds a `GameSession` and its `gameStarted` messages.
///
/// ## Example
///
/// ```
/// use grid_ccg::catalog;
/// use grid_ccg::core::PlayerId;
/// use grid_ccg::session::SessionBuilder;
///
/// let (session, greetings) = SessionBuilder::new(catalog::standard_rules())
///     .build(7)
///     .unwrap();
///
/// assert_eq!(greetings.len(), 2);
/// assert_eq!(session.game().player(PlayerId::P1).hand().len(), 8);
/// ```
#[derive(Clone, Debug)]
pub struct SessionBuilder {
    rules: GameRules,
    hands: Option<PlayerMap<Vec<ProtoId>>>,
}

impl SessionBuilder {
    #[must_use]
    pub fn new(rules: GameRules) -> Self {
        Self { rules, hands: None }
    }

    /// Use fixed starting hands instead of dealing from the catalog.
    #[must_use]
    pub fn with_hands(mut self, hands: PlayerMap<Vec<ProtoId>>) -> Self {
        self.hands = Some(hands);
        self
    }

    /// Start the game. Hands not given explicitly are dealt from the catalog
    /// with `seed`, `starting_hand_size` cards each.
    pub fn build(self, seed: u64) -> Result<(GameSession, Vec<Envelope>), SessionError> {
        let hands = match self.hands {
            Some(hands) => hands,
            None => deal_hands(&self.rules, seed),
        };

        let mut game = Game::new(self.rules)?;
        for (player, hand) in hands.iter() {
            game.deal(player, hand)?;
        }

        info!(
            seed,
            width = game.rules().board_width,
            height = game.rules().board_height,
            "session started"
        );

        let greetings = PlayerId::BOTH
            .into_iter()
            .map(|player| {
                Envelope::new(
                    player,
                    ServerMessage::GameStarted {
                        rules: game.rules().clone(),
                        hand: game.player(player).hand().to_vec(),
                        next_ids: game.player(player).tickets().to_vec(),
                        opponent_hand_size: game.player(player.other()).hand().len(),
                    },
                )
            })
            .collect();

        let session = GameSession {
            game,
            desynced: false,
            reported_over: false,
        };
        Ok((session, greetings))
    }
}

fn deal_hands(rules: &GameRules, seed: u64) -> PlayerMap<Vec<ProtoId>> {
    let pool = rules.card_set.ids();
    let rng = GameRng::new(seed);

    PlayerMap::new(|player| {
        let mut stream = rng.for_context(&format!("hand-{}", player.index() + 1));
        (0..rules.starting_hand_size)
            .filter_map(|_| stream.choose(&pool).copied())
            .collect()
    })
}

/// One running game plus its wire-protocol adapter.
#[derive(Clone, Debug)]
pub struct GameSession {
    game: Game,
    desynced: bool,
    reported_over: bool,
}

impl GameSession {
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn is_desynced(&self) -> bool {
        self.desynced
    }

    /// Decode and handle one raw inbound frame.
    pub fn handle_frame(&mut self, from: PlayerId, frame: &str) -> Outcome {
        match ClientMessage::parse(frame) {
            Ok(message) => self.handle(from, message),
            Err(err) => {
                warn!(player = %from, %err, "undecodable frame");
                Outcome::silent(Verdict::ProtocolViolation(err.to_string()))
            }
        }
    }

    /// Handle one decoded inbound message.
    pub fn handle(&mut self, from: PlayerId, message: ClientMessage) -> Outcome {
        if self.desynced {
            return Outcome::silent(Verdict::Desync("session already desynced".to_string()));
        }

        let Some(action) = self.to_action(from, message) else {
            let sync = ServerMessage::FullSync(self.full_sync(from));
            return Outcome {
                verdict: Verdict::Applied,
                outbound: vec![Envelope::new(from, sync)],
                events: Vec::new(),
            };
        };

        let was_blind = self.game.stage().is_blind();
        match self.game.apply(from, &action) {
            Ok(()) => {
                let outbound = self.announce(from, &action, was_blind);
                Outcome {
                    verdict: Verdict::Applied,
                    outbound,
                    events: self.game.drain_events(),
                }
            }
            Err(EngineError::Rejected(rejection)) if rejection.is_protocol_violation() => {
                warn!(player = %from, action = action.name(), %rejection, "protocol violation");
                Outcome::silent(Verdict::ProtocolViolation(rejection.to_string()))
            }
            Err(EngineError::Rejected(rejection)) => {
                debug!(player = %from, action = action.name(), %rejection, "action rejected");
                Outcome::silent(Verdict::Rejected(rejection))
            }
            Err(EngineError::Invariant { detail }) => {
                error!(player = %from, action = action.name(), %detail, "desync");
                self.desynced = true;
                Outcome {
                    outbound: PlayerId::BOTH
                        .into_iter()
                        .map(|p| {
                            Envelope::new(
                                p,
                                ServerMessage::Desync {
                                    reason: detail.clone(),
                                },
                            )
                        })
                        .collect(),
                    verdict: Verdict::Desync(detail),
                    events: self.game.drain_events(),
                }
            }
        }
    }

    fn canonical(&self, player: PlayerId, x: i32, y: i32) -> Coord {
        self.game
            .geometry()
            .from_player_frame(player, Coord::new(x, y))
    }

    fn seen_by(&self, player: PlayerId, at: Coord) -> Coord {
        self.game.geometry().to_player_frame(player, at)
    }

    /// The engine action a message asks for, with coordinates made canonical.
    /// `None` for messages that only query state.
    fn to_action(&self, from: PlayerId, message: ClientMessage) -> Option<Action> {
        let action = match message {
            ClientMessage::DoneWithBlindStage { played } => Action::FinishBlindStage {
                placements: played
                    .into_iter()
                    .map(|(card, proto, x, y)| Placement::new(card, proto, self.canonical(from, x, y)))
                    .collect(),
            },
            ClientMessage::PlayCard { id, proto, x, y } => {
                Action::PlayCard(Placement::new(id, proto, self.canonical(from, x, y)))
            }
            ClientMessage::MoveCard { id, x, y } => Action::MoveCard {
                card: id,
                to: self.canonical(from, x, y),
            },
            ClientMessage::Active { id, targets } => Action::Activate {
                card: id,
                targets: targets
                    .into_iter()
                    .map(|t| self.canonical(from, t.x, t.y))
                    .collect(),
            },
            ClientMessage::ReturnToHand { id } => Action::ReturnToHand { card: id },
            ClientMessage::Skip => Action::Skip,
            ClientMessage::RequestSync => return None,
        };
        Some(action)
    }

    /// Outbound messages for an applied action.
    fn announce(&mut self, from: PlayerId, action: &Action, was_blind: bool) -> Vec<Envelope> {
        let to = from.other();
        let mut out = Vec::new();

        match action {
            Action::FinishBlindStage { .. } | Action::PlayCard(_) => {
                let ids = self.game.replenish_tickets(from);
                if !ids.is_empty() {
                    out.push(Envelope::new(from, ServerMessage::NextIds { ids }));
                }
            }
            Action::MoveCard { .. } | Action::Activate { .. } | Action::ReturnToHand { .. } | Action::Skip => {}
        }

        // Blind-stage actions stay hidden from the opponent.
        if !was_blind {
            let notice = match action {
                Action::PlayCard(p) => {
                    let at = self.seen_by(to, p.at);
                    Some(ServerMessage::OpponentPlayedCard {
                        id: p.card,
                        proto: p.proto,
                        x: at.x,
                        y: at.y,
                    })
                }
                Action::MoveCard { card, to: dest } => {
                    let at = self.seen_by(to, *dest);
                    Some(ServerMessage::OpponentMovedCard {
                        id: *card,
                        x: at.x,
                        y: at.y,
                    })
                }
                Action::Activate { card, targets } => Some(ServerMessage::OpponentActivated {
                    id: *card,
                    targets: targets.iter().map(|&t| self.seen_by(to, t)).collect(),
                }),
                Action::Skip => Some(ServerMessage::OpponentSkipped),
                Action::FinishBlindStage { .. } | Action::ReturnToHand { .. } => None,
            };
            if let Some(message) = notice {
                out.push(Envelope::new(to, message));
            }
        }

        if was_blind && !self.game.stage().is_blind() {
            out.extend(PlayerId::BOTH.into_iter().map(|p| self.reveal_for(p)));
        }

        if let Some(result) = self.game.result() {
            if !self.reported_over {
                self.reported_over = true;
                out.extend(PlayerId::BOTH.into_iter().map(|p| {
                    Envelope::new(
                        p,
                        ServerMessage::GameOver {
                            won: result.is_winner(p),
                            draw: result == GameResult::Draw,
                        },
                    )
                }));
            }
        }
        out
    }

    /// `blindStageOver` for one recipient: the opponent's units in the
    /// recipient's frame.
    fn reveal_for(&self, player: PlayerId) -> Envelope {
        let other_player_played: Vec<PlayedCard> = self
            .game
            .units(player.other())
            .into_iter()
            .filter_map(|card| {
                let at = self.seen_by(player, card.position?);
                Some((card.id, card.proto, at.x, at.y))
            })
            .collect();

        Envelope::new(
            player,
            ServerMessage::BlindStageOver {
                other_player_played,
                my_turn: self.game.stage().turn() == Some(player),
                move_points: self.game.player(player).move_points(),
            },
        )
    }

    /// Snapshot of the game as `player` is allowed to see it. Opponent units
    /// stay hidden until the blind stage is over.
    #[must_use]
    pub fn full_sync(&self, player: PlayerId) -> FullSync {
        let blind = self.game.stage().is_blind();
        let board = self
            .game
            .board()
            .iter()
            .filter_map(|(at, id)| {
                let card = self.game.card(id)?;
                let mine = card.owner == player;
                if blind && !mine {
                    return None;
                }
                let seen = self.seen_by(player, at);
                Some(SyncedUnit {
                    id,
                    x: seen.x,
                    y: seen.y,
                    mine,
                    proto: card.proto,
                    strength: card.strength,
                })
            })
            .collect();

        let me = self.game.player(player);
        let opponent = self.game.player(player.other());
        FullSync {
            rules: self.game.rules().clone(),
            board,
            in_blind_stage: blind,
            my_turn: self.game.stage().turn() == Some(player),
            game_over: self.game.is_over(),
            me: SyncedSelf {
                hand: me.hand().to_vec(),
                next_ids: me.tickets().to_vec(),
                move_points: me.move_points(),
                fatigue: me.fatigue(),
                played_this_turn: me.played_this_turn(),
                used_active: me.used_active(),
                units_moved: me.moved_cards(),
                ready: me.is_ready(),
            },
            opponent: SyncedOpponent {
                hand_size: opponent.hand().len(),
                move_points: opponent.move_points(),
                fatigue: opponent.fatigue(),
                ready: opponent.is_ready(),
            },
        }
    }
}
