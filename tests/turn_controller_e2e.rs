//! End-to-end turn sequencing tests
//!
//! Drives the turn controller through whole turns on composed positions and
//! checks what a player would see: selection, highlighted squares, cues,
//! promotion and the hand-over between colors.

use dama_rs::core::{Color, Coord, Piece};
use dama_rs::engine::{RulesEngine, TurkishBoard};
use dama_rs::game::{Cue, GameLogger, Outcome, TurnController, TurnPhase, UiEvent};

fn c(s: &str) -> Coord {
    s.parse().unwrap()
}

fn controller(board: TurkishBoard) -> TurnController<TurkishBoard> {
    let mut logger = GameLogger::new();
    logger.enable_capture();
    TurnController::new(board, None).with_logger(logger)
}

#[test]
fn test_fresh_selection_offers_plain_destinations() {
    let mut controller = controller(TurkishBoard::new(1));
    let expected = controller
        .engine()
        .legal_destinations(c("5-2"), Piece::man(Color::Black).movement())
        .unwrap();

    let t = controller.handle(UiEvent::SelectPiece(c("5-2"))).unwrap();

    assert_eq!(
        t.outcome,
        Outcome::Selected {
            coord: c("5-2"),
            redirected_from: None
        }
    );
    assert_eq!(controller.state().available_destinations(), expected.as_slice());
    assert_eq!(controller.state().available_destinations(), &[c("4-2")]);
    assert_eq!(t.cue_count(Cue::Select), 1);
    assert!(controller.engine().is_selected(c("5-2")));
}

#[test]
fn test_selection_redirects_to_forced_capture() {
    let mut board = TurkishBoard::empty(1);
    board
        .place(c("4-3"), Piece::man(Color::Black))
        .place(c("6-0"), Piece::man(Color::Black))
        .place(c("3-3"), Piece::man(Color::White))
        .place(c("0-7"), Piece::man(Color::White));
    let mut controller = controller(board);

    let t = controller.handle(UiEvent::SelectPiece(c("6-0"))).unwrap();

    assert_eq!(
        t.outcome,
        Outcome::Selected {
            coord: c("4-3"),
            redirected_from: Some(c("6-0"))
        }
    );
    assert_eq!(controller.state().selection(), Some(c("4-3")));
    assert!(!controller.engine().is_selected(c("6-0")));
    assert_eq!(controller.state().available_destinations(), &[c("2-3")]);
}

#[test]
fn test_redirect_applies_to_opponent_and_empty_clicks() {
    let mut board = TurkishBoard::empty(1);
    board
        .place(c("4-3"), Piece::man(Color::Black))
        .place(c("3-3"), Piece::man(Color::White))
        .place(c("0-7"), Piece::man(Color::White));
    let mut controller = controller(board);

    controller.select(c("0-7")).unwrap();
    assert_eq!(controller.state().selection(), Some(c("4-3")));

    controller.select(c("7-7")).unwrap();
    assert_eq!(controller.state().selection(), Some(c("4-3")));
}

#[test]
fn test_forced_capture_hides_plain_steps() {
    let mut board = TurkishBoard::empty(1);
    board
        .place(c("4-3"), Piece::man(Color::Black))
        .place(c("3-3"), Piece::man(Color::White))
        .place(c("0-0"), Piece::man(Color::White));
    let mut controller = controller(board);

    controller.select(c("4-3")).unwrap();
    let ignored = controller.move_to(c("4-4")).unwrap();

    assert!(ignored.is_ignored());
    assert_eq!(controller.state().move_counter(), 0);
    assert_eq!(controller.engine().piece_at(c("4-3")), Some(Piece::man(Color::Black)));
}

#[test]
fn test_chain_capture_keeps_the_turn() {
    let mut board = TurkishBoard::empty(1);
    board
        .place(c("5-3"), Piece::man(Color::Black))
        .place(c("4-3"), Piece::man(Color::White))
        .place(c("2-3"), Piece::man(Color::White))
        .place(c("0-7"), Piece::man(Color::White));
    let mut controller = controller(board);

    controller.select(c("5-3")).unwrap();
    let first = controller.move_to(c("3-3")).unwrap();

    assert_eq!(first.outcome, Outcome::ChainContinues { at: c("3-3") });
    assert_eq!(controller.state().active_color(), Color::Black);
    assert_eq!(controller.state().turn_number(), 0);
    assert!(controller.state().phase().is_chain());
    assert_eq!(controller.state().selection(), Some(c("3-3")));
    assert_eq!(controller.state().available_destinations(), &[c("1-3")]);
    assert_eq!(first.cue_count(Cue::Destroy), 1);
    assert_eq!(first.cue_count(Cue::Move), 0);
    assert!(first.autoplay.is_none());
    assert_eq!(controller.engine().piece_at(c("4-3")), None);

    // Clicking elsewhere cannot abandon the chain
    assert!(controller.select(c("0-7")).unwrap().is_ignored());

    let second = controller.move_to(c("1-3")).unwrap();
    assert_eq!(second.outcome, Outcome::TurnEnded { next: Color::White });
    assert_eq!(second.cue_count(Cue::Destroy), 1);
    assert_eq!(second.cue_count(Cue::Move), 1);
    assert_eq!(controller.state().phase(), &TurnPhase::Idle);
    assert_eq!(controller.state().move_counter(), 2);
    assert_eq!(controller.state().turn_number(), 1);

    // White is down to its last piece
    assert_eq!(controller.engine().piece_at(c("0-7")), Some(Piece::king(Color::White)));
}

#[test]
fn test_move_to_back_rank_promotes() {
    let mut board = TurkishBoard::empty(1);
    board
        .place(c("1-0"), Piece::man(Color::Black))
        .place(c("5-5"), Piece::man(Color::Black))
        .place(c("7-7"), Piece::man(Color::White))
        .place(c("6-7"), Piece::man(Color::White));
    let mut controller = controller(board);

    controller.select(c("1-0")).unwrap();
    let t = controller.move_to(c("0-0")).unwrap();

    assert_eq!(controller.engine().piece_at(c("0-0")), Some(Piece::king(Color::Black)));
    assert_eq!(controller.state().board().piece_at(c("0-0")), Some(Piece::king(Color::Black)));
    assert_eq!(t.outcome, Outcome::TurnEnded { next: Color::White });
    assert_eq!(controller.state().active_color(), Color::White);
    assert_eq!(t.cue_count(Cue::Move), 1);
    assert_eq!(t.cue_count(Cue::Destroy), 0);
}

#[test]
fn test_promotion_on_capture_still_captures() {
    let mut board = TurkishBoard::empty(1);
    board
        .place(c("2-2"), Piece::man(Color::Black))
        .place(c("6-6"), Piece::man(Color::Black))
        .place(c("1-2"), Piece::man(Color::White))
        .place(c("7-7"), Piece::man(Color::White))
        .place(c("6-0"), Piece::man(Color::White));
    let mut controller = controller(board);

    controller.select(c("2-2")).unwrap();
    let t = controller.move_to(c("0-2")).unwrap();

    assert_eq!(controller.engine().piece_at(c("0-2")), Some(Piece::king(Color::Black)));
    assert_eq!(controller.engine().piece_at(c("1-2")), None);
    assert_eq!(t.cue_count(Cue::Destroy), 1);
    assert_eq!(t.outcome, Outcome::TurnEnded { next: Color::White });
}

#[test]
fn test_kings_stay_kings_on_the_back_rank() {
    let mut board = TurkishBoard::empty(1);
    board
        .place(c("3-0"), Piece::king(Color::Black))
        .place(c("6-6"), Piece::man(Color::Black))
        .place(c("7-7"), Piece::man(Color::White))
        .place(c("5-7"), Piece::man(Color::White));
    let mut controller = controller(board);

    controller.select(c("3-0")).unwrap();
    assert!(controller.state().available_destinations().contains(&c("7-0")));
    controller.move_to(c("7-0")).unwrap();

    assert_eq!(controller.engine().piece_at(c("7-0")), Some(Piece::king(Color::Black)));
    assert_eq!(controller.state().active_color(), Color::White);
}

#[test]
fn test_colors_alternate_and_counters_advance() {
    let mut controller = controller(TurkishBoard::new(1));
    let script = [("5-0", "4-0"), ("2-7", "3-7"), ("5-1", "4-1"), ("2-6", "3-6")];

    for (i, (from, to)) in script.into_iter().enumerate() {
        let mover = controller.state().active_color();
        controller.select(c(from)).unwrap();
        // A click on a square that is not highlighted changes nothing
        assert!(controller.move_to(c("3-3")).unwrap().is_ignored());
        let t = controller.move_to(c(to)).unwrap();

        assert_eq!(t.outcome, Outcome::TurnEnded { next: mover.opposite() });
        assert_eq!(controller.state().active_color(), mover.opposite());
        assert_eq!(controller.state().turn_number(), i as u32 + 1);
        assert_eq!(controller.state().move_counter(), i as u64 + 1);
        assert_eq!(controller.state().selection(), None);
    }
}

#[test]
fn test_selection_is_mirrored_in_snapshot() {
    let mut controller = controller(TurkishBoard::new(1));
    controller.select(c("5-4")).unwrap();
    controller.select(c("5-5")).unwrap();

    let board = controller.state().board();
    assert!(!board.square(c("5-4")).selected);
    assert!(board.square(c("5-5")).selected);
    assert_eq!(board.count(Color::Black), 16);
    assert_eq!(board.count(Color::White), 16);
}

#[test]
fn test_promoted_man_stays_king_after_leaving_back_rank() {
    let mut board = TurkishBoard::empty(1);
    board
        .place(c("1-0"), Piece::man(Color::Black))
        .place(c("6-2"), Piece::man(Color::Black))
        .place(c("2-5"), Piece::man(Color::White))
        .place(c("2-7"), Piece::man(Color::White));
    let mut controller = controller(board);

    controller.select(c("1-0")).unwrap();
    controller.move_to(c("0-0")).unwrap();
    controller.select(c("2-5")).unwrap();
    controller.move_to(c("3-5")).unwrap();

    controller.select(c("0-0")).unwrap();
    assert!(controller.state().available_destinations().contains(&c("3-0")));
    controller.move_to(c("3-0")).unwrap();
    assert_eq!(controller.engine().piece_at(c("3-0")), Some(Piece::king(Color::Black)));

    controller.select(c("3-5")).unwrap();
    controller.move_to(c("4-5")).unwrap();
    controller.select(c("3-0")).unwrap();
    controller.move_to(c("3-4")).unwrap();

    assert_eq!(controller.engine().piece_at(c("3-4")), Some(Piece::king(Color::Black)));
    assert_eq!(controller.state().board().piece_at(c("3-4")), Some(Piece::king(Color::Black)));
    assert_eq!(controller.state().move_counter(), 5);
}

#[test]
fn test_crowned_mid_chain_keeps_capturing_as_king() {
    let mut board = TurkishBoard::empty(1);
    board
        .place(c("2-1"), Piece::man(Color::Black))
        .place(c("1-1"), Piece::man(Color::White))
        .place(c("0-3"), Piece::man(Color::White))
        .place(c("2-4"), Piece::man(Color::White))
        .place(c("7-0"), Piece::man(Color::White));
    let mut controller = controller(board);

    controller.select(c("2-1")).unwrap();
    let first = controller.move_to(c("0-1")).unwrap();
    assert_eq!(first.outcome, Outcome::ChainContinues { at: c("0-1") });
    assert_eq!(controller.engine().piece_at(c("0-1")), Some(Piece::king(Color::Black)));
    assert_eq!(
        controller.state().available_destinations(),
        &[c("0-4"), c("0-5"), c("0-6"), c("0-7")]
    );

    let second = controller.move_to(c("0-4")).unwrap();
    assert_eq!(second.outcome, Outcome::ChainContinues { at: c("0-4") });
    assert!(controller.state().available_destinations().contains(&c("5-4")));

    // Leaving the back rank mid-chain does not revoke the crown
    let last = controller.move_to(c("5-4")).unwrap();
    assert_eq!(last.outcome, Outcome::TurnEnded { next: Color::White });
    assert_eq!(controller.engine().piece_at(c("5-4")), Some(Piece::king(Color::Black)));
    for taken in ["1-1", "0-3", "2-4"] {
        assert_eq!(controller.engine().piece_at(c(taken)), None);
    }
    assert_eq!(controller.state().move_counter(), 3);
    assert_eq!(controller.state().turn_number(), 1);
}
