//! Property tests for the board controller over random gesture sequences.

use hlavi_board::{BoardController, BoardError, BoardLayout, Card, CardId, Column, CommitId};
use proptest::prelude::*;

const COLUMNS: [&str; 3] = ["A", "B", "C"];
const MAX_CARDS: usize = 6;
const MAX_OPS: usize = 40;

#[derive(Debug, Clone)]
enum Op {
    Start(usize),
    Over(Option<usize>),
    End(Option<usize>),
    Cancel,
    Refresh(Vec<usize>),
    Resolve(bool),
}

fn layout() -> BoardLayout {
    BoardLayout::new(
        "Props",
        COLUMNS.iter().map(|id| Column::new(*id, *id)).collect(),
    )
}

fn cards(columns: &[usize]) -> Vec<Card> {
    columns
        .iter()
        .enumerate()
        .map(|(i, col)| Card::new(format!("c{}", i), COLUMNS[*col], format!("Card {}", i)))
        .collect()
}

/// Maps an index onto card ids, then column ids, then an unknown id
fn target(index: usize, card_count: usize) -> String {
    let index = index % (card_count + COLUMNS.len() + 1);
    if index < card_count {
        format!("c{}", index)
    } else if index < card_count + COLUMNS.len() {
        COLUMNS[index - card_count].to_string()
    } else {
        "ghost".to_string()
    }
}

/// Maps an index onto column ids, then an unknown id
fn column_target(index: usize) -> String {
    COLUMNS.get(index % (COLUMNS.len() + 1)).map_or("ghost".to_string(), |id| id.to_string())
}

/// Card ids of each column, in layout order
fn per_column(board: &BoardController) -> Vec<Vec<String>> {
    COLUMNS
        .iter()
        .map(|column| {
            board
                .cards()
                .iter()
                .filter(|card| card.column.as_str() == *column)
                .map(|card| card.id.to_string())
                .collect()
        })
        .collect()
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..MAX_CARDS + 2).prop_map(Op::Start),
        proptest::option::of(0..MAX_CARDS + 4).prop_map(Op::Over),
        proptest::option::of(0..MAX_CARDS + 4).prop_map(Op::End),
        Just(Op::Cancel),
        proptest::collection::vec(0..COLUMNS.len(), MAX_CARDS).prop_map(Op::Refresh),
        any::<bool>().prop_map(Op::Resolve),
    ]
}

fn board_strategy() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0..COLUMNS.len(), 1..=MAX_CARDS)
}

fn run(board: &mut BoardController, card_count: usize, ops: &[Op]) {
    let mut pending: Vec<CommitId> = Vec::new();

    for op in ops {
        match op {
            Op::Start(i) => {
                board.start(&CardId::new(format!("c{}", i)));
            }
            Op::Over(t) => {
                let t = t.map(|t| target(t, card_count));
                board.over(t.as_deref());
            }
            Op::End(t) => {
                let t = t.map(|t| target(t, card_count));
                if let Some(commit) = board.end(t.as_deref()) {
                    pending.push(commit.id);
                }
            }
            Op::Cancel => {
                board.cancel();
            }
            Op::Refresh(columns) => {
                board.refresh(cards(&columns[..card_count]));
            }
            Op::Resolve(ok) => {
                if !pending.is_empty() {
                    let id = pending.remove(0);
                    let result = if *ok {
                        Ok(())
                    } else {
                        Err(BoardError::StorageError("offline".to_string()))
                    };
                    let _ = board.resolve_commit(id, result);
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_card_ids_are_conserved(
        columns in board_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..MAX_OPS),
    ) {
        let mut board = BoardController::new(layout(), cards(&columns));
        let before = board.working_set().ids();

        run(&mut board, columns.len(), &ops);

        prop_assert_eq!(board.working_set().ids(), before);
        prop_assert_eq!(board.cards().len(), columns.len());
    }

    #[test]
    fn prop_drop_on_origin_is_identity(
        columns in board_strategy(),
        pick in 0..MAX_CARDS,
    ) {
        let mut board = BoardController::new(layout(), cards(&columns));
        let before = board.working_set().clone();
        let id = format!("c{}", pick % columns.len());

        prop_assert!(board.start(&CardId::new(id.clone())));
        let commit = board.end(Some(id.as_str()));

        prop_assert!(commit.is_some());
        prop_assert_eq!(board.working_set(), &before);
    }

    #[test]
    fn prop_wandering_back_to_origin_column_is_identity(
        columns in board_strategy(),
        pick in 0..MAX_CARDS,
        hovers in proptest::collection::vec(proptest::option::of(0..COLUMNS.len() + 1), 0..10),
    ) {
        let mut board = BoardController::new(layout(), cards(&columns));
        let before = board.working_set().clone();
        let pick = pick % columns.len();

        let pick_id = CardId::new(format!("c{}", pick));
        prop_assert!(board.start(&pick_id));
        for hover in hovers {
            let t = hover.map(column_target);
            board.over(t.as_deref());
        }
        let commit = board.end(Some(COLUMNS[columns[pick]]));

        prop_assert!(commit.is_some());
        prop_assert_eq!(board.working_set(), &before);
    }

    #[test]
    fn prop_wandering_back_to_origin_neighbour_restores_columns(
        columns in board_strategy(),
        pick in 0..MAX_CARDS,
        away in 1..COLUMNS.len(),
        hovers in proptest::collection::vec(proptest::option::of(0..MAX_CARDS + 4), 0..10),
    ) {
        let pick = pick % columns.len();
        let origin = columns[pick];
        let neighbour = (pick + 1..columns.len()).find(|i| columns[*i] == origin);
        prop_assume!(neighbour.is_some());
        let neighbour = neighbour.map(|i| format!("c{}", i));

        let mut board = BoardController::new(layout(), cards(&columns));
        let before = per_column(&board);

        let pick_id = CardId::new(format!("c{}", pick));
        prop_assert!(board.start(&pick_id));
        board.over(Some(COLUMNS[(origin + away) % COLUMNS.len()]));
        for hover in hovers {
            let t = hover.map(|t| target(t, columns.len()));
            // Stay out of the origin column until the final drop
            let in_origin = t.as_deref().is_some_and(|t| {
                t == COLUMNS[origin]
                    || board
                        .cards()
                        .iter()
                        .any(|card| card.id.as_str() == t && card.column.as_str() == COLUMNS[origin])
            });
            if !in_origin {
                board.over(t.as_deref());
            }
        }
        let commit = board.end(neighbour.as_deref());

        prop_assert!(commit.is_some());
        prop_assert_eq!(per_column(&board), before);
    }

    #[test]
    fn prop_cancel_restores_pre_drag_order(
        columns in board_strategy(),
        pick in 0..MAX_CARDS,
        hovers in proptest::collection::vec(proptest::option::of(0..MAX_CARDS + 4), 0..10),
    ) {
        let mut board = BoardController::new(layout(), cards(&columns));
        let before = board.working_set().clone();

        board.start(&CardId::new(format!("c{}", pick % columns.len())));
        for hover in hovers {
            let t = hover.map(|t| target(t, columns.len()));
            board.over(t.as_deref());
        }
        prop_assert!(board.cancel());

        prop_assert_eq!(board.working_set(), &before);
    }
}
