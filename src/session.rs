use std::sync::atomic::{AtomicUsize, Ordering};

use itertools::Itertools;
use log::{debug, info};

use crate::chooser::Chooser;
use crate::coordinates::{EdgeworkCounts, TableCoordinates};
use crate::cube::{Face, PermutationTracker, Vertex, CENTER_COLUMN, TOP_SLOT, VERTEX_COUNT};
use crate::resolver::{build_puzzle, Puzzle, DIRECTIONS};
use crate::table::{PatternTable, WordList};
use crate::Result;

static NEXT_SESSION_ID: AtomicUsize = AtomicUsize::new(1);

// More than this many answers already in place makes the start too easy.
const MAX_INITIALLY_CORRECT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResult {
    Ignored,
    Success,
    Failure,
}

/// One module instance: the generated puzzle, which word sits on which
/// corner, and how the corners have been turned since.
#[derive(Debug)]
pub struct Session {
    log_prefix: String,
    coordinates: TableCoordinates,
    puzzle: Puzzle,
    // indexed by the corner's starting slot
    vertex_words: [String; VERTEX_COUNT],
    tracker: PermutationTracker,
    solved: bool,
}

fn next_log_prefix() -> String {
    let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
    format!("[Regular Hexpressions #{}]", id)
}

impl Session {
    /// Samples clue coordinates from the edgework, then builds the session.
    pub fn new<C: Chooser>(
        table: &PatternTable,
        words: &WordList,
        counts: &EdgeworkCounts,
        chooser: &mut C,
    ) -> Result<Session> {
        let log_prefix = next_log_prefix();
        let coordinates =
            TableCoordinates::sample(table.rows(), table.columns(), counts, chooser, &log_prefix);
        Session::build(table, words, coordinates, chooser, log_prefix)
    }

    pub fn with_coordinates<C: Chooser>(
        table: &PatternTable,
        words: &WordList,
        coordinates: TableCoordinates,
        chooser: &mut C,
    ) -> Result<Session> {
        Session::build(table, words, coordinates, chooser, next_log_prefix())
    }

    fn build<C: Chooser>(
        table: &PatternTable,
        words: &WordList,
        coordinates: TableCoordinates,
        chooser: &mut C,
        log_prefix: String,
    ) -> Result<Session> {
        let puzzle = build_puzzle(table, words, coordinates.positions(), chooser)?;
        for (ri, regex) in puzzle.regexes().iter().enumerate() {
            info!(
                "{} {} regex '{}' matches word '{}'.",
                log_prefix,
                DIRECTIONS[ri],
                regex.real(),
                puzzle.matching_words()[ri]
            );
        }

        let vertex_words = shuffle_vertex_words(&puzzle, chooser);
        let session = Session::from_parts(log_prefix, coordinates, puzzle, vertex_words);
        info!(
            "{} Vertex labels and words: {}",
            session.log_prefix,
            Vertex::ALL.iter().map(|&v| session.labeled(v)).join(" ")
        );
        Ok(session)
    }

    pub(crate) fn from_parts(
        log_prefix: String,
        coordinates: TableCoordinates,
        puzzle: Puzzle,
        vertex_words: [String; VERTEX_COUNT],
    ) -> Session {
        Session {
            log_prefix,
            coordinates,
            puzzle,
            vertex_words,
            tracker: PermutationTracker::new(),
            solved: false,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn coordinates(&self) -> &TableCoordinates {
        &self.coordinates
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn turning_face(&self) -> Option<Face> {
        self.tracker.turning_face()
    }

    /// Word that started on `vertex`, wherever it is now.
    pub fn vertex_word(&self, vertex: Vertex) -> &str {
        &self.vertex_words[vertex.index()]
    }

    /// Word currently sitting in `slot`.
    pub fn word_at_slot(&self, slot: Vertex) -> &str {
        self.vertex_word(self.tracker.vertex_at_slot(slot))
    }

    pub fn top_word(&self) -> &str {
        self.word_at_slot(TOP_SLOT)
    }

    pub fn is_top_moving(&self) -> bool {
        self.tracker
            .turning_face()
            .map_or(false, |face| face.contains(TOP_SLOT))
    }

    pub fn initial_coordinates_label(&self) -> String {
        self.coordinates.initial_label()
    }

    pub fn permutation(&self) -> &[Vertex; VERTEX_COUNT] {
        self.tracker.permutation()
    }

    pub fn permutation_inverse(&self) -> &[Vertex; VERTEX_COUNT] {
        self.tracker.inverse()
    }

    pub fn begin_turn(&mut self, face: Face) -> bool {
        let started = self.tracker.begin_turn(face);
        if started {
            debug!("{} Turning face {}.", self.log_prefix, face);
        } else {
            debug!(
                "{} Ignoring turn of {}: face {:?} is still turning.",
                self.log_prefix,
                face,
                self.tracker.turning_face()
            );
        }
        started
    }

    /// Must follow a successful [`Session::begin_turn`].
    pub fn complete_turn(&mut self) {
        self.tracker.complete_turn();
        debug!(
            "{} Turn finished, slots now hold {}.",
            self.log_prefix,
            self.tracker.inverse().iter().map(|v| v.label()).join("")
        );
    }

    pub fn submit(&mut self) -> SubmitResult {
        if self.solved || self.tracker.is_turning() {
            debug!("{} Ignoring submit.", self.log_prefix);
            return SubmitResult::Ignored;
        }

        let submission: Vec<Vertex> = CENTER_COLUMN
            .iter()
            .map(|&slot| self.tracker.vertex_at_slot(slot))
            .collect();
        info!(
            "{} Submission {}.",
            self.log_prefix,
            submission.iter().map(|&v| self.labeled(v)).join(", ")
        );
        info!(
            "{} Expected words {}.",
            self.log_prefix,
            self.puzzle
                .matching_words()
                .iter()
                .map(|w| format!("'{}'", w))
                .join(", ")
        );

        let correct = submission
            .iter()
            .zip(self.puzzle.matching_words().iter())
            .all(|(&v, expected)| self.vertex_word(v) == expected);
        if !correct {
            info!("{} Strike.", self.log_prefix);
            return SubmitResult::Failure;
        }

        self.solved = true;
        info!("{} Pass.", self.log_prefix);
        SubmitResult::Success
    }

    fn labeled(&self, vertex: Vertex) -> String {
        format!("({} {})", vertex.label(), self.vertex_word(vertex))
    }
}

fn correct_in_place(puzzle: &Puzzle, order: &[String; VERTEX_COUNT]) -> usize {
    CENTER_COLUMN
        .iter()
        .zip(puzzle.matching_words().iter())
        .filter(|(v, expected)| &order[v.index()] == *expected)
        .count()
}

fn shuffle_vertex_words<C: Chooser>(puzzle: &Puzzle, chooser: &mut C) -> [String; VERTEX_COUNT] {
    let mut order: [String; VERTEX_COUNT] = std::array::from_fn(|i| {
        if i < 4 {
            puzzle.matching_words()[i].clone()
        } else {
            puzzle.decoy_words()[i - 4].clone()
        }
    });
    loop {
        chooser.shuffle(&mut order);
        if correct_in_place(puzzle, &order) <= MAX_INITIALLY_CORRECT {
            return order;
        }
    }
}
