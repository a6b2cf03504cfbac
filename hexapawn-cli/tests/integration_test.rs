//! Integration tests for the Hexapawn engine
//!
//! Tests the full stack: board rules, evaluation, alpha-beta search against a
//! brute-force minimax oracle, self-play, and the command-line binary.

use std::process::Command;

use hexapawn_core::{
    evaluate, hexapawn, heuristic, play_game, random_positions, search, Board, Cell, GameResult,
    HexapawnError, Move, Player, Pos, Puzzle, SearchConfig, WIN_VALUE,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Plain minimax with the same terminal rules and tie-break as the engine
fn minimax(board: &Board, maximizer: Player, to_move: Player, depth: u32) -> (i32, Option<Move>) {
    if depth == 0 || board.is_finished() {
        return (evaluate(board, maximizer, to_move), None);
    }

    let moves = board.generate_moves(to_move);
    if moves.is_empty() {
        return (evaluate(board, maximizer, to_move), None);
    }

    let maximizing = to_move == maximizer;
    let mut best_value = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for mv in moves {
        let mut child = board.clone();
        child.make_move(mv.from, mv.to).unwrap();
        let (value, _) = minimax(&child, maximizer, to_move.opponent(), depth - 1);
        let better = if maximizing { value > best_value } else { value < best_value };
        if better {
            best_value = value;
            best_move = Some(mv);
        }
    }

    (best_value, best_move)
}

fn sorted(pawns: &[Pos]) -> Vec<Pos> {
    let mut v = pawns.to_vec();
    v.sort_by_key(|p| (p.row, p.col));
    v
}

// ============================================================================
// SEARCH VS ORACLE
// ============================================================================

#[test]
fn test_alphabeta_matches_minimax_3x3() {
    for b in random_positions(11, 60, 3, 3) {
        for player in [Player::White, Player::Black] {
            for depth in 0..=5 {
                let outcome = search(&b, player, &SearchConfig::with_depth(depth));
                let (value, best_move) = minimax(&b, player, player, depth);
                assert_eq!(outcome.value, value, "value mismatch at depth {} for\n{}", depth, b);
                assert_eq!(outcome.best_move, best_move, "move mismatch at depth {} for\n{}", depth, b);
            }
        }
    }
}

#[test]
fn test_alphabeta_matches_minimax_4x4() {
    for b in random_positions(23, 30, 4, 3) {
        for player in [Player::White, Player::Black] {
            let depth = 4;
            let outcome = search(&b, player, &SearchConfig::with_depth(depth));
            let (value, best_move) = minimax(&b, player, player, depth);
            assert_eq!(outcome.value, value, "value mismatch for\n{}", b);
            assert_eq!(outcome.best_move, best_move, "move mismatch for\n{}", b);
        }
    }
}

#[test]
fn test_parallel_matches_serial_on_random_positions() {
    for b in random_positions(5, 40, 4, 4) {
        let serial = search(&b, Player::White, &SearchConfig::with_depth(4));
        let parallel = search(&b, Player::White, &SearchConfig::with_depth(4).parallel(true));
        assert_eq!(serial.value, parallel.value);
        assert_eq!(serial.board, parallel.board);
    }
}

#[test]
fn test_search_returns_immediate_child() {
    let b = Board::standard(3).unwrap();
    let outcome = search(&b, Player::White, &SearchConfig::with_depth(6));
    let mv = outcome.best_move.expect("start position has moves");
    assert!(b.generate_moves(Player::White).contains(&mv));

    let mut expected = b.clone();
    expected.make_move(mv.from, mv.to).unwrap();
    assert_eq!(outcome.board, expected);
}

// ============================================================================
// GOLDEN SCENARIOS
// ============================================================================

#[test]
fn test_standard_3x3_first_mover_loses() {
    let b = Board::standard(3).unwrap();
    for depth in [9, 10, 12] {
        for first in [Player::White, Player::Black] {
            let outcome = search(&b, first, &SearchConfig::with_depth(depth));
            assert_eq!(outcome.value, -WIN_VALUE, "{} first at depth {}", first, depth);
        }
    }

    let record = play_game(b, Player::White, &SearchConfig::with_depth(9), 20);
    assert_eq!(record.result, GameResult::BlackWins);
}

#[test]
fn test_single_pawn_advances_to_win() {
    let out = hexapawn(&["--w", "w--", "-b-"], 3, 'w', 1).unwrap();
    assert_eq!(out, vec!["--w", "---", "wb-"]);

    // Mirror image for Black
    let out = hexapawn(&["-w-", "b--", "--b"], 3, 'b', 1).unwrap();
    assert_eq!(out, vec!["bw-", "---", "--b"]);
}

#[test]
fn test_stuck_root_is_echoed_back() {
    let rows = ["-w-", "-b-", "---"];
    assert_eq!(hexapawn(&rows, 3, 'w', 5).unwrap(), rows.to_vec());
    assert_eq!(hexapawn(&rows, 3, 'b', 5).unwrap(), rows.to_vec());
}

#[test]
fn test_malformed_input_rejected() {
    assert!(matches!(
        hexapawn(&["ww", "--", "bb"], 3, 'w', 2),
        Err(HexapawnError::InvalidBoard(_))
    ));
    assert!(matches!(
        hexapawn(&["w?", "-b"], 2, 'w', 2),
        Err(HexapawnError::InvalidBoard(_))
    ));
    assert!(matches!(
        hexapawn(&["w-", "-b"], 2, 'W', 2),
        Err(HexapawnError::InvalidInput(_))
    ));
}

// ============================================================================
// BOARD PROPERTIES
// ============================================================================

#[test]
fn test_evaluate_bounds_on_random_positions() {
    for size in [3, 4, 5] {
        for b in random_positions(size as u64, 300, size, 3) {
            for player in [Player::White, Player::Black] {
                for to_move in [Player::White, Player::Black] {
                    let value = evaluate(&b, player, to_move);
                    assert!((-WIN_VALUE..=WIN_VALUE).contains(&value));

                    let terminal = b.winner(to_move).is_some() || !b.has_moves(to_move);
                    if value.abs() == WIN_VALUE {
                        assert!(terminal, "±{} on an ongoing position:\n{}", WIN_VALUE, b);
                    }
                    if !terminal {
                        assert!(heuristic(&b, player).abs() < WIN_VALUE);
                    }
                }
            }
        }
    }
}

#[test]
fn test_generated_moves_apply_cleanly() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..300 {
        let b = hexapawn_core::random_position(&mut rng, 4, 4);
        for mover in [Player::White, Player::Black] {
            for mv in b.generate_moves(mover) {
                let mut child = b.clone();
                child.make_move(mv.from, mv.to).unwrap();

                assert_eq!(child.get(mv.from), Some(Cell::Empty));
                assert_eq!(child.get(mv.to), Some(mover.cell()));

                let captured = b.get(mv.to) == Some(mover.opponent().cell());
                assert_eq!(captured, mv.is_capture());
                let expected = b.pawn_count(mover.opponent()) - usize::from(captured);
                assert_eq!(child.pawn_count(mover.opponent()), expected);
                assert_eq!(child.pawn_count(mover), b.pawn_count(mover));

                // Pawn lists agree with the grid
                let rescanned = Board::from_rows(&child.to_output(), child.size()).unwrap();
                for p in [Player::White, Player::Black] {
                    assert_eq!(sorted(child.pawns(p)), sorted(rescanned.pawns(p)));
                }
            }
        }
    }
}

#[test]
fn test_self_play_always_terminates() {
    for size in [3, 4] {
        for first in [Player::White, Player::Black] {
            let record = play_game(
                Board::standard(size).unwrap(),
                first,
                &SearchConfig::with_depth(3),
                size * size * 2,
            );
            assert_ne!(record.result, GameResult::Ongoing);
            assert!(record.plies() <= 2 * size * (size - 1));
        }
    }
}

// ============================================================================
// PUZZLE FILES
// ============================================================================

#[test]
fn test_puzzle_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("hexapawn-puzzle-{}.json", std::process::id()));
    let puzzle = Puzzle {
        board: vec!["--w".into(), "w--".into(), "-b-".into()],
        player: 'w',
        depth: 1,
    };
    puzzle.save(&path).unwrap();
    let loaded = Puzzle::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, puzzle);
    let (b, player) = loaded.to_board().unwrap();
    let outcome = search(&b, player, &SearchConfig::with_depth(loaded.depth));
    assert_eq!(outcome.board.to_output(), vec!["--w", "---", "wb-"]);
}

#[test]
fn test_puzzle_load_missing_file() {
    let path = std::env::temp_dir().join("hexapawn-does-not-exist.json");
    assert!(Puzzle::load(&path).is_err());
}

// ============================================================================
// CLI
// ============================================================================

#[test]
fn test_cli_move_json() {
    let output = Command::new(env!("CARGO_BIN_EXE_hexapawn"))
        .args(["move", "--board=--w,w--,-b-", "--player", "w", "--depth", "1", "--json"])
        .output()
        .expect("failed to run hexapawn");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["board"], serde_json::json!(["--w", "---", "wb-"]));
    assert_eq!(report["value"], WIN_VALUE);
}

#[test]
fn test_cli_rejects_bad_board() {
    let output = Command::new(env!("CARGO_BIN_EXE_hexapawn"))
        .args(["move", "--board=www,--", "--player", "w"])
        .output()
        .expect("failed to run hexapawn");
    assert!(!output.status.success());
}
