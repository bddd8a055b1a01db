use anyhow::Context;
use itertools::Itertools;
use regex::Regex;

use crate::coordinates::TablePosition;
use crate::Result;

pub const TABLE_ROWS: usize = 12;

const SCRAMBLE_STRIDE: usize = 17;
const SCRAMBLE_OFFSET: usize = 3;

/// A clue: the real pattern answers must match, and a look-alike used to pick
/// plausible wrong words. Both match whole words only.
#[derive(Debug, Clone)]
pub struct PatternPair {
    real_str: String,
    decoy_str: String,
    real: Regex,
    decoy: Regex,
}

impl PatternPair {
    pub fn new(real: &str, decoy: &str) -> Result<PatternPair> {
        Ok(PatternPair {
            real_str: real.to_string(),
            decoy_str: decoy.to_string(),
            real: anchored(real)?,
            decoy: anchored(decoy)?,
        })
    }

    pub fn real(&self) -> &str {
        &self.real_str
    }

    pub fn decoy(&self) -> &str {
        &self.decoy_str
    }

    pub fn matches_real(&self, word: &str) -> bool {
        self.real.is_match(word)
    }

    pub fn matches_decoy(&self, word: &str) -> bool {
        self.decoy.is_match(word)
    }
}

impl PartialEq for PatternPair {
    fn eq(&self, other: &Self) -> bool {
        self.real_str == other.real_str && self.decoy_str == other.decoy_str
    }
}

impl Eq for PatternPair {}

fn anchored(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{})$", pattern))
        .with_context(|| format!("invalid pattern {:?}", pattern))
}

fn parse_entry(line: &str) -> Result<PatternPair> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 2 {
        anyhow::bail!(
            "expected real and decoy separated by a tab, got {} fields",
            fields.len()
        );
    }
    PatternPair::new(fields[0].trim(), fields[1].trim())
}

/// The clue grid. Entries are stored in definition order and laid out on the
/// grid by `(i * 17 + 3) mod N`, so neighbouring cells are unrelated clues.
#[derive(Debug)]
pub struct PatternTable {
    entries: Vec<PatternPair>,
    rows: usize,
    columns: usize,
    // grid[row * columns + col] is an index into entries
    grid: Vec<usize>,
}

impl PatternTable {
    pub fn builtin() -> Result<PatternTable> {
        PatternTable::parse(include_str!("data/patterns.tsv"), TABLE_ROWS)
            .context("built-in pattern table")
    }

    pub fn parse(text: &str, rows: usize) -> Result<PatternTable> {
        let entries = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| parse_entry(line).with_context(|| format!("pattern line {}", n + 1)))
            .collect::<Result<Vec<PatternPair>>>()?;
        PatternTable::from_entries(entries, rows)
    }

    pub fn from_entries(entries: Vec<PatternPair>, rows: usize) -> Result<PatternTable> {
        if rows == 0 || entries.is_empty() || entries.len() % rows != 0 {
            anyhow::bail!(
                "{} pattern entries cannot fill a table with {} rows",
                entries.len(),
                rows
            );
        }
        let columns = entries.len() / rows;
        if rows < 2 || columns < 2 {
            anyhow::bail!(
                "a {}x{} pattern table has no room for a rectangle of clues",
                rows,
                columns
            );
        }
        let grid = scramble_indices(entries.len())?;
        Ok(PatternTable {
            rows,
            columns,
            entries,
            grid,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pair_at(&self, position: TablePosition) -> Result<&PatternPair> {
        if position.row >= self.rows || position.col >= self.columns {
            anyhow::bail!(
                "{} is outside the {}x{} pattern table",
                position,
                self.rows,
                self.columns
            );
        }
        Ok(&self.entries[self.grid[position.row * self.columns + position.col]])
    }

    /// Real patterns laid out as they appear in the manual's table.
    pub fn grid(&self) -> String {
        let width = self
            .entries
            .iter()
            .map(|e| e.real().len())
            .max()
            .unwrap_or(0);
        let header = (0..self.columns)
            .map(|col| format!("{:>width$}", col, width = width))
            .join(" | ");
        let mut rv = vec![format!("    {} |", header)];
        for (row, cells) in self.grid.chunks(self.columns).enumerate() {
            let line = cells
                .iter()
                .map(|&i| format!("{:>width$}", self.entries[i].real(), width = width))
                .join(" | ");
            rv.push(format!("{:>2}: {} |", row, line));
        }
        rv.join("\n")
    }
}

fn scramble_indices(n: usize) -> Result<Vec<usize>> {
    let mut grid: Vec<Option<usize>> = vec![None; n];
    for i in 0..n {
        let cell = (i * SCRAMBLE_STRIDE + SCRAMBLE_OFFSET) % n;
        if let Some(previous) = grid[cell] {
            anyhow::bail!(
                "pattern entries {} and {} both land in table cell {}; {} entries do not scramble",
                previous,
                i,
                cell,
                n
            );
        }
        grid[cell] = Some(i);
    }
    // n distinct cells out of n, so every cell is filled
    Ok(grid.into_iter().flatten().collect())
}

#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn builtin() -> Result<WordList> {
        WordList::parse(include_str!("data/words.txt")).context("built-in word list")
    }

    pub fn parse(text: &str) -> Result<WordList> {
        WordList::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    pub fn from_words<I, S>(words: I) -> Result<WordList>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            anyhow::bail!("word list is empty");
        }
        if let Some(bad) = words
            .iter()
            .find(|w| w.is_empty() || !w.chars().all(|c| c.is_ascii_uppercase()))
        {
            anyhow::bail!("word {:?} is not made of uppercase letters", bad);
        }
        if let Some(dup) = words.iter().duplicates().next() {
            anyhow::bail!("word {:?} appears more than once", dup);
        }
        Ok(WordList { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
