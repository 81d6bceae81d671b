//! Command packer for the 4bpp path.
//!
//! Rewrites a canonical run list into a command sequence chosen to
//! minimize the number of 4-bit wire fields:
//!
//! 1. a length-3 window turns `black, v, white` (either direction) into a
//!    simple pattern, consuming one pixel of each flank;
//! 2. a length-4 window turns `black, v1, v2, white` (either direction)
//!    into a double pattern, likewise consuming the flanks;
//! 3. surviving runs become fills, split at the per-value-class count caps
//!    of the wire format;
//! 4. runs too short to be worth a fill become single-pixel units and are
//!    coalesced into copy commands of up to 5 literal pixels.
//!
//! Both the counting pass and the encoding pass use the same pattern
//! detection; the counting pass wires the double-pattern callback to
//! [`PatternDictionary::observe`], the encoding pass to a no-op.

use crate::dictionary::PatternDictionary;
use crate::runs::Run;

/// Black pixel value at 4bpp.
pub const BLACK: u8 = 0x0;
/// White pixel value at 4bpp.
pub const WHITE: u8 = 0xF;

/// Largest literal pixel count of a copy command (2-bit field, plus 2).
pub const MAX_COPY: usize = 5;

/// Runs shorter than this are not worth a fill command.
const FILL_THRESHOLD: usize = 2;

/// Largest fill count the wire format can carry for `value`.
///
/// White and black runs dominate glyph backgrounds and get dedicated wide
/// commands; everything else rides the generic fill with its 3..=18 count
/// field plus the x1/x2 short forms.
pub fn max_fill(value: u8) -> usize {
    match value {
        WHITE => 32,
        BLACK => 16,
        _ => 18,
    }
}

/// Which side of a pattern holds the black run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Pattern reads black, value(s), white.
    FromBlack,
    /// Pattern reads white, value(s), black.
    FromWhite,
}

/// One wire-level operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `count` repetitions of `value`.
    Fill {
        /// Pixel value.
        value: u8,
        /// Repetition count, at least 1.
        count: usize,
    },
    /// Literal pixels, 2..=5 of them after coalescing.
    Copy(Vec<u8>),
    /// Three-run bridge: flank, `value`, opposite flank.
    Simple {
        /// Direction of the flanks.
        side: Side,
        /// The bridged pixel value.
        value: u8,
    },
    /// Four-run bridge: flank, `first`, `second`, opposite flank.
    Double {
        /// Direction of the flanks.
        side: Side,
        /// First bridged value, in raster order.
        first: u8,
        /// Second bridged value, in raster order.
        second: u8,
    },
}

impl Command {
    /// Number of pixels this command reproduces.
    pub fn pixel_len(&self) -> usize {
        match self {
            Command::Fill { count, .. } => *count,
            Command::Copy(values) => values.len(),
            Command::Simple { .. } => 3,
            Command::Double { .. } => 4,
        }
    }
}

/// Canonical dictionary key of a double pattern.
///
/// White-to-black occurrences are swapped so both directions of the same
/// bridge share one counter (and one wire index).
pub fn canonical_pair(side: Side, first: u8, second: u8) -> (u8, u8) {
    match side {
        Side::FromBlack => (first, second),
        Side::FromWhite => (second, first),
    }
}

/// Working item during pattern detection: a run, or a pattern that has
/// replaced one. An explicit variant rather than a sentinel smuggled into
/// the count field.
#[derive(Debug, Clone, Copy)]
enum Item {
    Run(Run),
    Simple { side: Side, value: u8 },
    Double { side: Side, first: u8, second: u8 },
}

fn run_at(items: &[Item], index: usize) -> Option<Run> {
    match items.get(index) {
        Some(Item::Run(run)) => Some(*run),
        _ => None,
    }
}

/// Classify a flank pair as a pattern direction.
fn flank_side(before: u8, after: u8) -> Option<Side> {
    match (before, after) {
        (BLACK, WHITE) => Some(Side::FromBlack),
        (WHITE, BLACK) => Some(Side::FromWhite),
        _ => None,
    }
}

fn dec_count(items: &mut [Item], index: usize) {
    if let Item::Run(run) = &mut items[index] {
        run.count -= 1;
    }
}

/// Run both sliding-window passes over `items`, reporting each double
/// pattern to `on_double` with its canonical pair.
fn detect_patterns(items: &mut [Item], mut on_double: impl FnMut(u8, u8)) {
    // Pass A: simple patterns, length-3 window.
    for i in 1..items.len().saturating_sub(1) {
        let (Some(prev), Some(cur), Some(next)) = (
            run_at(items, i - 1),
            run_at(items, i),
            run_at(items, i + 1),
        ) else {
            continue;
        };
        if cur.count != 1 || prev.count < 1 || next.count < 1 {
            continue;
        }
        let Some(side) = flank_side(prev.value, next.value) else {
            continue;
        };
        items[i] = Item::Simple {
            side,
            value: cur.value,
        };
        dec_count(items, i - 1);
        dec_count(items, i + 1);
    }

    // Pass B: double patterns, length-4 window.
    for i in 1..items.len().saturating_sub(2) {
        let (Some(prev), Some(first), Some(second), Some(next)) = (
            run_at(items, i - 1),
            run_at(items, i),
            run_at(items, i + 1),
            run_at(items, i + 2),
        ) else {
            continue;
        };
        if first.count != 1 || second.count != 1 || prev.count < 1 || next.count < 1 {
            continue;
        }
        let Some(side) = flank_side(prev.value, next.value) else {
            continue;
        };
        let key = canonical_pair(side, first.value, second.value);
        on_double(key.0, key.1);
        items[i] = Item::Double {
            side,
            first: first.value,
            second: second.value,
        };
        // The second middle run is absorbed into the pattern.
        items[i + 1] = Item::Run(Run::new(0, second.value));
        dec_count(items, i - 1);
        dec_count(items, i + 2);
    }
}

/// Lower detected items into commands: split fills at their caps, emit
/// short runs as single-pixel copy units.
fn lower(items: &[Item]) -> Vec<Command> {
    let mut commands = Vec::new();
    for item in items {
        match *item {
            Item::Simple { side, value } => commands.push(Command::Simple { side, value }),
            Item::Double {
                side,
                first,
                second,
            } => commands.push(Command::Double {
                side,
                first,
                second,
            }),
            Item::Run(run) => {
                let cap = max_fill(run.value);
                let mut count = run.count;
                while count >= cap {
                    commands.push(Command::Fill {
                        value: run.value,
                        count: cap,
                    });
                    count -= cap;
                }
                if count >= FILL_THRESHOLD {
                    commands.push(Command::Fill {
                        value: run.value,
                        count,
                    });
                } else if count == 1 {
                    commands.push(Command::Copy(vec![run.value]));
                }
            }
        }
    }
    commands
}

/// Merge adjacent single-pixel units into copies of up to [`MAX_COPY`]
/// pixels; a leftover lone unit becomes a one-pixel fill.
fn coalesce_copies(commands: Vec<Command>) -> Vec<Command> {
    let mut merged: Vec<Command> = Vec::with_capacity(commands.len());
    for command in commands {
        if let Command::Copy(unit) = &command {
            if let Some(Command::Copy(tail)) = merged.last_mut() {
                if tail.len() < MAX_COPY {
                    tail.extend(unit);
                    continue;
                }
            }
        }
        merged.push(command);
    }
    for command in &mut merged {
        if let Command::Copy(values) = command {
            if values.len() == 1 {
                *command = Command::Fill {
                    value: values[0],
                    count: 1,
                };
            }
        }
    }
    merged
}

/// Counting pass: detect patterns over `runs` and feed every double
/// pattern into the dictionary. The command output of this pass would be
/// discarded anyway, so none is produced.
pub fn survey(runs: &[Run], dictionary: &mut PatternDictionary) {
    let mut items: Vec<Item> = runs.iter().map(|&run| Item::Run(run)).collect();
    detect_patterns(&mut items, |first, second| {
        dictionary.observe(first, second);
    });
}

/// Encoding pass: rewrite `runs` into the final command sequence.
///
/// Index selection for double patterns happens later, at serialization,
/// against the frozen dictionary; the packer itself never mutates it.
pub fn pack(runs: &[Run]) -> Vec<Command> {
    let mut items: Vec<Item> = runs.iter().map(|&run| Item::Run(run)).collect();
    detect_patterns(&mut items, |_, _| {});
    coalesce_copies(lower(&items))
}

/// Expand commands back into a run list. Zero-count runs are never
/// produced; the caller re-canonicalizes with
/// [`merge_adjacent`](crate::runs::merge_adjacent).
pub fn unpack(commands: &[Command]) -> Vec<Run> {
    let mut runs = Vec::new();
    for command in commands {
        match command {
            Command::Fill { value, count } => runs.push(Run::new(*count, *value)),
            Command::Copy(values) => {
                runs.extend(values.iter().map(|&value| Run::new(1, value)));
            }
            Command::Simple { side, value } => {
                let (before, after) = match side {
                    Side::FromBlack => (BLACK, WHITE),
                    Side::FromWhite => (WHITE, BLACK),
                };
                runs.push(Run::new(1, before));
                runs.push(Run::new(1, *value));
                runs.push(Run::new(1, after));
            }
            Command::Double {
                side,
                first,
                second,
            } => {
                let (before, after) = match side {
                    Side::FromBlack => (BLACK, WHITE),
                    Side::FromWhite => (WHITE, BLACK),
                };
                runs.push(Run::new(1, before));
                runs.push(Run::new(1, *first));
                runs.push(Run::new(1, *second));
                runs.push(Run::new(1, after));
            }
        }
    }
    runs
}
