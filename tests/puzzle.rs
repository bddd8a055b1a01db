use std::collections::{HashMap, VecDeque};

use itertools::Itertools;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use hexpressions::cube::CENTER_COLUMN;
use hexpressions::{
    build_puzzle, EdgeworkCounts, Face, PatternTable, PermutationTracker, Puzzle, RngChooser,
    Session, SubmitResult, TableCoordinates, TablePosition, Vertex, WordList,
};

fn tables() -> (PatternTable, WordList) {
    (PatternTable::builtin().unwrap(), WordList::builtin().unwrap())
}

fn all_coordinates(table: &PatternTable) -> Vec<TableCoordinates> {
    let mut rv = Vec::new();
    for (row_north, row_south) in (0..table.rows()).tuple_combinations() {
        for (col_west, col_east) in (0..table.columns()).tuple_combinations() {
            rv.push(TableCoordinates {
                initial: TablePosition {
                    row: row_north,
                    col: col_west,
                },
                row_north,
                row_south,
                col_west,
                col_east,
            });
        }
    }
    rv
}

fn check_puzzle(puzzle: &Puzzle) {
    let regexes = puzzle.regexes();
    let matching = puzzle.matching_words();

    for (i, word) in matching.iter().enumerate() {
        assert!(regexes[i].matches_real(word), "{} vs {}", word, regexes[i].real());
    }

    // Only one way to hand the four answers out to the four clues
    let valid_assignments = (0..4)
        .permutations(4)
        .filter(|p| (0..4).all(|i| regexes[i].matches_real(&matching[p[i]])))
        .count();
    assert_eq!(valid_assignments, 1, "answers {:?}", matching);

    // Each answer rules out every clue resolved after it
    let order = puzzle.resolution_order();
    for (k, &ri) in order.iter().enumerate() {
        for &later in &order[k + 1..] {
            assert!(!regexes[later].matches_real(&matching[ri]));
        }
    }

    let decoys = puzzle.decoy_words();
    assert_eq!(decoys.iter().unique().count(), 4);
    for decoy in decoys {
        assert!(!matching.contains(decoy));
        assert!(regexes.iter().all(|r| !r.matches_real(decoy)), "{}", decoy);
        assert!(regexes.iter().any(|r| r.matches_decoy(decoy)), "{}", decoy);
    }
}

#[test]
fn every_rectangle_yields_a_consistent_puzzle() {
    let (table, words) = tables();
    let coordinates = all_coordinates(&table);
    assert_eq!(coordinates.len(), 66 * 15);

    let mut chooser = RngChooser(StdRng::seed_from_u64(2022));
    for coords in coordinates {
        let puzzle = build_puzzle(&table, &words, coords.positions(), &mut chooser)
            .unwrap_or_else(|e| panic!("{:?}: {:#}", coords, e));
        check_puzzle(&puzzle);
    }
}

#[test]
fn many_seeds_on_one_rectangle() {
    let (table, words) = tables();
    let coords = TableCoordinates::derive(
        TablePosition { row: 6, col: 0 },
        table.rows(),
        table.columns(),
        &EdgeworkCounts {
            other_components: 9,
            batteries: 2,
            indicators: 1,
        },
        "",
    );
    for seed in 0..50 {
        let mut chooser = RngChooser(StdRng::seed_from_u64(seed));
        let puzzle = build_puzzle(&table, &words, coords.positions(), &mut chooser).unwrap();
        check_puzzle(&puzzle);
    }
}

#[test]
fn same_seed_same_puzzle() {
    let (table, words) = tables();
    let counts = EdgeworkCounts {
        other_components: 11,
        batteries: 4,
        indicators: 3,
    };
    let session_for_seed = |seed| {
        let mut chooser = RngChooser(StdRng::seed_from_u64(seed));
        Session::new(&table, &words, &counts, &mut chooser).unwrap()
    };
    let a = session_for_seed(5);
    let b = session_for_seed(5);

    assert_eq!(a.initial_coordinates_label(), b.initial_coordinates_label());
    assert_eq!(a.puzzle().matching_words(), b.puzzle().matching_words());
    assert_eq!(a.puzzle().decoy_words(), b.puzzle().decoy_words());
    for vertex in Vertex::ALL {
        assert_eq!(a.vertex_word(vertex), b.vertex_word(vertex));
    }
}

#[test]
fn new_sessions_start_mostly_unsolved() {
    let (table, words) = tables();
    let mut chooser = RngChooser(StdRng::seed_from_u64(17));
    for other_components in 0..40 {
        let counts = EdgeworkCounts {
            other_components,
            batteries: other_components % 7,
            indicators: other_components % 3,
        };
        let session = Session::new(&table, &words, &counts, &mut chooser).unwrap();
        let in_place = CENTER_COLUMN
            .iter()
            .zip(session.puzzle().matching_words().iter())
            .filter(|(&slot, expected)| session.word_at_slot(slot) == expected.as_str())
            .count();
        assert!(in_place <= 2);
        assert!(session.permutation().iter().eq(Vertex::ALL.iter()));
        assert!(!session.is_solved());

        let label = session.initial_coordinates_label();
        let coords = session.coordinates();
        assert_eq!(
            label,
            format!("R{} C{}", coords.initial.row, coords.initial.col)
        );
    }
}

fn answers_in_place(session: &Session, tracker: &PermutationTracker) -> bool {
    CENTER_COLUMN
        .iter()
        .zip(session.puzzle().matching_words().iter())
        .all(|(&slot, expected)| session.vertex_word(tracker.vertex_at_slot(slot)) == expected)
}

// Shortest face-turn sequence that puts every answer on its corner.
fn solve(session: &Session) -> Vec<Face> {
    let start = PermutationTracker::new();
    let mut seen: HashMap<[Vertex; 8], Vec<Face>> = HashMap::new();
    let mut queue = VecDeque::new();
    seen.insert(*start.inverse(), Vec::new());
    queue.push_back(start);

    while let Some(tracker) = queue.pop_front() {
        let path = seen[tracker.inverse()].clone();
        if answers_in_place(session, &tracker) {
            return path;
        }
        for face in Face::ALL {
            let mut next = tracker.clone();
            assert!(next.begin_turn(face));
            next.complete_turn();
            if !seen.contains_key(next.inverse()) {
                let mut next_path = path.clone();
                next_path.push(face);
                seen.insert(*next.inverse(), next_path);
                queue.push_back(next);
            }
        }
    }
    panic!("answers cannot be reached");
}

#[test]
fn play_through() {
    let (table, words) = tables();
    let mut chooser = RngChooser(StdRng::seed_from_u64(1236));
    let mut session = Session::new(
        &table,
        &words,
        &EdgeworkCounts {
            other_components: 3,
            batteries: 1,
            indicators: 2,
        },
        &mut chooser,
    )
    .unwrap();

    let before: Vec<String> = Vertex::ALL
        .iter()
        .map(|&slot| session.word_at_slot(slot).to_string())
        .collect();
    assert_eq!(session.top_word(), before[Vertex::Ubr.index()]);

    assert!(session.begin_turn(Face::Up));
    assert!(!session.begin_turn(Face::Up));
    assert_eq!(session.submit(), SubmitResult::Ignored);
    session.complete_turn();

    let cycle = Face::Up.cycle();
    for k in 0..4 {
        assert_eq!(session.word_at_slot(cycle[(k + 1) % 4]), before[cycle[k].index()]);
    }
    for slot in Vertex::ALL.iter().filter(|&&v| !Face::Up.contains(v)) {
        assert_eq!(session.word_at_slot(*slot), before[slot.index()]);
    }

    // Undo the UP turn, then follow the shortest solution from the start.
    for _ in 0..3 {
        assert!(session.begin_turn(Face::Up));
        session.complete_turn();
    }
    let solution = solve(&session);
    assert!(!solution.is_empty());
    for (i, &face) in solution.iter().enumerate() {
        assert!(session.begin_turn(face));
        if i + 1 < solution.len() {
            session.complete_turn();
            assert_eq!(session.submit(), SubmitResult::Failure);
        } else {
            assert_eq!(session.submit(), SubmitResult::Ignored);
            session.complete_turn();
        }
    }

    for (i, &slot) in CENTER_COLUMN.iter().enumerate() {
        assert_eq!(session.word_at_slot(slot), session.puzzle().matching_words()[i]);
    }
    assert_eq!(session.submit(), SubmitResult::Success);
    assert!(session.is_solved());
    assert_eq!(session.submit(), SubmitResult::Ignored);

    // Turning still works after the solve; submitting never does again.
    assert!(session.begin_turn(Face::Down));
    assert_eq!(session.submit(), SubmitResult::Ignored);
    session.complete_turn();
    assert_eq!(session.submit(), SubmitResult::Ignored);
}
