use anyhow::Context;
use itertools::Itertools;
use log::debug;

use crate::chooser::Chooser;
use crate::coordinates::TablePosition;
use crate::table::{PatternPair, PatternTable, WordList};
use crate::Result;

pub const DIRECTIONS: [&str; 4] = ["North-west", "North-east", "South-east", "South-west"];

/// One generated puzzle. Index `i` of every array refers to the same clue,
/// in NW, NE, SE, SW order.
#[derive(Debug, Clone)]
pub struct Puzzle {
    regexes: [PatternPair; 4],
    matching_words: [String; 4],
    decoy_words: [String; 4],
    resolution_order: [usize; 4],
}

impl Puzzle {
    pub fn regexes(&self) -> &[PatternPair; 4] {
        &self.regexes
    }

    pub fn matching_words(&self) -> &[String; 4] {
        &self.matching_words
    }

    pub fn decoy_words(&self) -> &[String; 4] {
        &self.decoy_words
    }

    /// Clue indices in the order they were pinned down. The word for the
    /// k-th clue in this order matches none of the clues after it.
    pub fn resolution_order(&self) -> &[usize; 4] {
        &self.resolution_order
    }
}

struct WordMatches {
    // bit i set if the word fully matches real pattern i
    word_matches: Vec<u8>,
    counts: [usize; 4],
}

fn compute_word_matches(regexes: &[PatternPair; 4], words: &WordList) -> WordMatches {
    let mut word_matches = vec![0u8; words.len()];
    let mut counts = [0usize; 4];
    for (ri, regex) in regexes.iter().enumerate() {
        for (wi, word) in words.words().iter().enumerate() {
            if regex.matches_real(word) {
                word_matches[wi] |= 1 << ri;
                counts[ri] += 1;
            }
        }
    }
    WordMatches {
        word_matches,
        counts,
    }
}

fn select_matching_words<C: Chooser>(
    matches: &WordMatches,
    words: &WordList,
    chooser: &mut C,
) -> Result<([String; 4], [usize; 4])> {
    let mut remaining: Vec<usize> = (0..4)
        .sorted_by_key(|&ri| matches.counts[ri])
        .collect();
    let mut satisfied: u8 = 0;
    let mut selected = [0usize; 4];
    let mut order = [0usize; 4];

    for step in 0..4 {
        let found = remaining.iter().enumerate().find_map(|(pos, &ri)| {
            let flag = 1u8 << ri;
            let choices: Vec<usize> = matches
                .word_matches
                .iter()
                .positions(|&wm| wm & flag != 0 && wm & !flag & !satisfied == 0)
                .collect();
            if choices.is_empty() {
                None
            } else {
                Some((pos, ri, choices))
            }
        });

        let (pos, ri, choices) = match found {
            Some(x) => x,
            None => anyhow::bail!(
                "no word distinguishes the remaining patterns {:?}",
                remaining.iter().map(|&ri| DIRECTIONS[ri]).collect::<Vec<_>>()
            ),
        };
        debug!(
            "{} pattern has {} distinguishing words",
            DIRECTIONS[ri],
            choices.len()
        );

        selected[ri] = *chooser
            .pick(&choices)
            .context("empty choice list")?;
        order[step] = ri;
        satisfied |= 1 << ri;
        remaining.remove(pos);
    }

    Ok((selected.map(|wi| words.words()[wi].clone()), order))
}

fn select_decoy_words<C: Chooser>(
    regexes: &[PatternPair; 4],
    words: &WordList,
    chooser: &mut C,
) -> Result<[String; 4]> {
    let mut candidates: Vec<&String> = words
        .words()
        .iter()
        .filter(|w| !regexes.iter().any(|r| r.matches_real(w)))
        .filter(|w| regexes.iter().any(|r| r.matches_decoy(w)))
        .collect();
    debug!("{} decoy candidates", candidates.len());

    if candidates.len() < regexes.len() {
        anyhow::bail!(
            "only {} decoy candidates for patterns {}",
            candidates.len(),
            regexes.iter().map(|r| r.decoy()).join(", ")
        );
    }

    Ok(std::array::from_fn(|_| {
        let i = chooser.index(candidates.len());
        candidates.remove(i).clone()
    }))
}

/// Builds the puzzle for the clues at `positions` (NW, NE, SE, SW).
///
/// Errors mean the tables cannot support these clues: a position outside the
/// table, a repeated position, a clue no word can single out, or too few
/// decoys. With the built-in tables the last two never happen for
/// coordinates produced by [`crate::TableCoordinates`].
pub fn build_puzzle<C: Chooser>(
    table: &PatternTable,
    words: &WordList,
    positions: [TablePosition; 4],
    chooser: &mut C,
) -> Result<Puzzle> {
    if !positions.iter().all_unique() {
        anyhow::bail!(
            "clue positions must be distinct, got {}",
            positions.iter().join(", ")
        );
    }

    let regexes = [
        table.pair_at(positions[0])?.clone(),
        table.pair_at(positions[1])?.clone(),
        table.pair_at(positions[2])?.clone(),
        table.pair_at(positions[3])?.clone(),
    ];

    let matches = compute_word_matches(&regexes, words);
    let (matching_words, resolution_order) = select_matching_words(&matches, words, chooser)?;
    let decoy_words = select_decoy_words(&regexes, words, chooser)?;

    debug!(
        "Resolved clues in order {}; decoys {}",
        resolution_order.iter().map(|&ri| DIRECTIONS[ri]).join(", "),
        decoy_words.iter().join(", ")
    );

    Ok(Puzzle {
        regexes,
        matching_words,
        decoy_words,
        resolution_order,
    })
}
