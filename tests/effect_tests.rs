//! Effect resolution integration tests.
//!
//! Each standard effect shape on a real board, simultaneous damage, and
//! how deaths end the game.

use grid_ccg::catalog::{self, BOMBER, GUNNER, HEALER, KNIGHT, SOLDIER, SPOTTER};
use grid_ccg::core::{Coord, EntityId, GameRules, Placement, PlayerId, Rejection};
use grid_ccg::effects::{EffectKind, EffectSpec};
use grid_ccg::game::{Game, GameEvent};
use grid_ccg::rules::{GameResult, Stage};
use grid_ccg::{CardTemplate, EngineError, ProtoId};

const SAPPER: ProtoId = ProtoId::new(10);

fn rejected(result: Result<(), EngineError>) -> Rejection {
    match result {
        Err(EngineError::Rejected(rejection)) => rejection,
        other => panic!("expected a rejection, got {other:?}"),
    }
}

fn deploy(game: &mut Game, player: PlayerId, units: &[(ProtoId, Coord)]) -> Vec<EntityId> {
    let tickets = game.player(player).tickets().to_vec();
    let placements: Vec<Placement> = units
        .iter()
        .zip(tickets)
        .map(|(&(proto, at), card)| Placement::new(card, proto, at))
        .collect();
    game.finish_blind_stage(player, &placements).unwrap();
    placements.iter().map(|p| p.card).collect()
}

/// Deal exactly the deployed templates and finish both blind stages.
fn setup(
    rules: GameRules,
    p1_units: &[(ProtoId, Coord)],
    p2_units: &[(ProtoId, Coord)],
) -> (Game, Vec<EntityId>, Vec<EntityId>) {
    let mut game = Game::new(rules).unwrap();
    let hand = |units: &[(ProtoId, Coord)]| units.iter().map(|&(p, _)| p).collect::<Vec<_>>();
    game.deal(PlayerId::P1, &hand(p1_units)).unwrap();
    game.deal(PlayerId::P2, &hand(p2_units)).unwrap();

    let p1 = deploy(&mut game, PlayerId::P1, p1_units);
    let p2 = deploy(&mut game, PlayerId::P2, p2_units);
    (game, p1, p2)
}

fn strength(game: &Game, card: EntityId) -> Option<i32> {
    game.card(card).map(|c| c.strength)
}

fn died(events: &[GameEvent]) -> Vec<EntityId> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Died { card, .. } => Some(*card),
            _ => None,
        })
        .collect()
}

/// A radius-1 blast at (3,3) hits the 3x3 square around it, itself included,
/// friend and foe alike.
#[test]
fn test_area_blast_hits_square_including_self() {
    let (mut game, p1, p2) = setup(
        catalog::standard_rules(),
        &[
            (SOLDIER, Coord::new(2, 2)),
            (SOLDIER, Coord::new(4, 2)),
            (SOLDIER, Coord::new(3, 1)),
        ],
        &[
            (BOMBER, Coord::new(3, 3)),
            (SOLDIER, Coord::new(4, 4)),
            (SOLDIER, Coord::new(3, 5)),
        ],
    );
    assert_eq!(game.stage(), Stage::Turn(PlayerId::P2));
    let bomber = p2[0];
    game.drain_events();

    game.activate(PlayerId::P2, bomber, &[]).unwrap();

    assert_eq!(strength(&game, bomber), Some(1));
    assert_eq!(strength(&game, p1[2]), Some(5));
    assert_eq!(strength(&game, p2[2]), Some(5));
    assert_eq!(game.board().len(), 3);

    let events = game.drain_events();
    assert_eq!(died(&events), vec![p1[0], p1[1], p2[1]]);
    assert_eq!(events.first(), Some(&GameEvent::EffectFired {
        card: bomber,
        kind: EffectKind::Area,
        trigger: grid_ccg::TriggerPoint::Active,
    }));
    assert_eq!(events.last(), Some(&GameEvent::GroupEnded));
    assert!(!game.is_over());
}

/// The beam hits only the first occupied cell ahead; the end-of-turn shot
/// follows the same line.
#[test]
fn test_beam_stops_at_first_hit() {
    let (mut game, p1, p2) = setup(
        catalog::standard_rules(),
        &[(GUNNER, Coord::new(3, 2)), (KNIGHT, Coord::new(0, 0))],
        &[(SOLDIER, Coord::new(3, 4)), (SOLDIER, Coord::new(3, 5))],
    );
    assert_eq!(game.stage(), Stage::Turn(PlayerId::P1));

    game.activate(PlayerId::P1, p1[0], &[]).unwrap();
    assert_eq!(strength(&game, p2[0]), Some(3));
    assert_eq!(strength(&game, p2[1]), Some(5));

    game.skip(PlayerId::P1).unwrap();
    assert_eq!(strength(&game, p1[1]), Some(7));
    assert_eq!(strength(&game, p2[0]), Some(2));
    assert_eq!(strength(&game, p2[1]), Some(5));
}

/// Player 2's beam travels down the board.
#[test]
fn test_beam_direction_for_player_two() {
    let (mut game, p1, p2) = setup(
        catalog::standard_rules(),
        &[(SOLDIER, Coord::new(5, 0))],
        &[(GUNNER, Coord::new(5, 4)), (SOLDIER, Coord::new(0, 5))],
    );
    assert_eq!(game.stage(), Stage::Turn(PlayerId::P2));

    game.activate(PlayerId::P2, p2[0], &[]).unwrap();
    assert_eq!(strength(&game, p1[0]), Some(3));
}

/// Start-of-turn heal reaches every unit tied at the minimum distance,
/// past base strength, and skips the healer itself.
#[test]
fn test_nearest_heal_hits_all_tied_units() {
    let (game, p1, p2) = setup(
        catalog::standard_rules(),
        &[
            (HEALER, Coord::new(3, 1)),
            (SOLDIER, Coord::new(1, 1)),
            (SOLDIER, Coord::new(5, 1)),
        ],
        &[(KNIGHT, Coord::new(3, 4)), (SOLDIER, Coord::new(3, 5))],
    );
    // 13 against 13: player 1 opens, and the heal fires on turn entry.
    assert_eq!(game.stage(), Stage::Turn(PlayerId::P1));

    assert_eq!(strength(&game, p1[0]), Some(3));
    assert_eq!(strength(&game, p1[1]), Some(6));
    assert_eq!(strength(&game, p1[2]), Some(6));
    assert_eq!(strength(&game, p2[0]), Some(8));
}

/// Designating stores targets; the barrage then hits them every start of
/// turn until new targets are picked.
#[test]
fn test_designate_then_barrage() {
    let (mut game, p1, p2) = setup(
        catalog::standard_rules(),
        &[(SPOTTER, Coord::new(3, 2)), (KNIGHT, Coord::new(0, 0))],
        &[(SOLDIER, Coord::new(3, 4)), (SOLDIER, Coord::new(6, 5))],
    );
    let spotter = p1[0];
    let target = p2[0];
    assert_eq!(game.stage(), Stage::Turn(PlayerId::P1));

    assert_eq!(
        rejected(game.activate(PlayerId::P1, spotter, &[])),
        Rejection::WrongTargetCount {
            expected: 1,
            got: 0
        }
    );
    assert_eq!(
        rejected(game.activate(PlayerId::P1, spotter, &[Coord::new(7, 0)])),
        Rejection::InvalidTarget(Coord::new(7, 0))
    );

    game.drain_events();
    game.activate(PlayerId::P1, spotter, &[Coord::new(3, 4)]).unwrap();
    assert_eq!(strength(&game, target), Some(5));
    assert!(game.drain_events().iter().any(|e| matches!(
        e,
        GameEvent::TargetsDesignated { card, targets } if *card == spotter && targets.as_slice() == [Coord::new(3, 4)]
    )));

    game.skip(PlayerId::P1).unwrap();
    game.skip(PlayerId::P2).unwrap();
    assert_eq!(strength(&game, target), Some(3));

    game.skip(PlayerId::P1).unwrap();
    game.skip(PlayerId::P2).unwrap();
    assert_eq!(strength(&game, target), Some(1));
}

/// A barrage on an empty cell does nothing.
#[test]
fn test_barrage_on_empty_cell() {
    let (mut game, p1, p2) = setup(
        catalog::standard_rules(),
        &[(SPOTTER, Coord::new(3, 2)), (KNIGHT, Coord::new(0, 0))],
        &[(SOLDIER, Coord::new(3, 4)), (SOLDIER, Coord::new(6, 5))],
    );

    game.activate(PlayerId::P1, p1[0], &[Coord::new(1, 4)]).unwrap();
    game.skip(PlayerId::P1).unwrap();
    game.skip(PlayerId::P2).unwrap();

    assert_eq!(strength(&game, p2[0]), Some(5));
    assert_eq!(game.board().len(), 4);
}

/// Killing the last enemy unit wins, after the group has settled.
#[test]
fn test_blast_eliminates_last_enemy() {
    let (mut game, p1, p2) = setup(
        catalog::standard_rules(),
        &[(BOMBER, Coord::new(3, 2)), (SOLDIER, Coord::new(0, 0))],
        &[(SOLDIER, Coord::new(3, 3))],
    );
    game.drain_events();

    game.activate(PlayerId::P1, p1[0], &[]).unwrap();

    assert!(game.card(p2[0]).is_none());
    assert_eq!(game.result(), Some(GameResult::Winner(PlayerId::P1)));

    let events = game.drain_events();
    let n = events.len();
    assert_eq!(events[n - 2], GameEvent::GroupEnded);
    assert_eq!(events[n - 1], GameEvent::GameOver(GameResult::Winner(PlayerId::P1)));
}

/// When a blast empties both boards at once the game is a draw, even though
/// the blaster died before its last victim.
#[test]
fn test_mutual_destruction_is_draw() {
    let sapper = CardTemplate::new(SAPPER, "Sapper", 3, "X").with_active(EffectSpec::area(1, 10));
    let rules = catalog::standard_rules().with_card(sapper).unwrap();
    let (mut game, p1, _) = setup(
        rules,
        &[(SAPPER, Coord::new(3, 2))],
        &[(SPOTTER, Coord::new(3, 3))],
    );
    assert_eq!(game.stage(), Stage::Turn(PlayerId::P1));

    game.activate(PlayerId::P1, p1[0], &[]).unwrap();

    assert!(game.board().is_empty());
    assert_eq!(game.result(), Some(GameResult::Draw));
}

/// A dead unit's passive effects stop firing.
#[test]
fn test_dead_unit_effects_are_dropped() {
    let (mut game, p1, p2) = setup(
        catalog::standard_rules(),
        &[(GUNNER, Coord::new(3, 2)), (SOLDIER, Coord::new(0, 0))],
        &[(BOMBER, Coord::new(3, 3)), (KNIGHT, Coord::new(0, 5))],
    );
    let gunner = p1[0];
    let shot = game.card(gunner).and_then(|c| c.end_of_turn).unwrap();
    assert!(game.binding(shot).is_some());
    assert_eq!(game.stage(), Stage::Turn(PlayerId::P2));

    game.activate(PlayerId::P2, p2[0], &[]).unwrap();
    assert!(game.card(gunner).is_none());
    assert!(game.binding(shot).is_none());
    assert_eq!(strength(&game, p2[0]), Some(1));

    game.skip(PlayerId::P2).unwrap();
    game.skip(PlayerId::P1).unwrap();
    assert_eq!(strength(&game, p2[0]), Some(1));
    assert!(!game.is_over());
}

/// Losing your own unit never eliminates an opponent who has no units yet;
/// they only lose once fatigue finds their board empty.
#[test]
fn test_own_casualty_does_not_eliminate_empty_opponent() {
    let mut game = Game::new(catalog::standard_rules()).unwrap();
    game.deal(PlayerId::P1, &[SOLDIER]).unwrap();
    game.deal(PlayerId::P2, &[BOMBER, SOLDIER, SOLDIER]).unwrap();

    deploy(&mut game, PlayerId::P1, &[]);
    let p2 = deploy(
        &mut game,
        PlayerId::P2,
        &[
            (BOMBER, Coord::new(3, 4)),
            (SOLDIER, Coord::new(3, 5)),
            (SOLDIER, Coord::new(0, 3)),
        ],
    );
    assert_eq!(game.stage(), Stage::Turn(PlayerId::P2));

    game.activate(PlayerId::P2, p2[0], &[]).unwrap();
    assert!(game.card(p2[1]).is_none());
    assert_eq!(game.unit_count(PlayerId::P1), 0);
    assert_eq!(game.unit_count(PlayerId::P2), 2);
    assert!(!game.is_over());

    game.skip(PlayerId::P2).unwrap();
    assert_eq!(game.stage(), Stage::Turn(PlayerId::P1));

    let ticket = game.player(PlayerId::P1).tickets()[0];
    game.play_card(PlayerId::P1, Placement::new(ticket, SOLDIER, Coord::new(3, 0)))
        .unwrap();
    assert_eq!(game.unit_count(PlayerId::P1), 1);
    assert!(!game.is_over());
}
