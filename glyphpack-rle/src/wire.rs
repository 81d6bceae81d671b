//! Quartet-level serialization of the 4bpp command stream.
//!
//! Every command opens with a 4-bit discriminator, followed by a fixed
//! number of payload quartets:
//!
//! | Discriminator | Command | Payload |
//! |---|---|---|
//! | `00RR` | copy | RR+2 literal quartets (2..=5 pixels) |
//! | `0100` | fill | value, then count-3 (counts 3..=18) |
//! | `0101` | fill value x2 | value |
//! | `0110` | double pattern, black→white, indexed | index |
//! | `0111` | double pattern, white→black, indexed | index |
//! | `1000` | simple pattern, black→white | value |
//! | `1001` | simple pattern, white→black | value |
//! | `1010` | double pattern, black→white, literal | v1, v2 |
//! | `1011` | double pattern, white→black, literal | v2, v1 |
//! | `1100` | fill black | count-1 (counts 1..=16) |
//! | `1101` | fill value x1 | value |
//! | `1110` | fill white | count-1 (counts 1..=16) |
//! | `1111` | fill white, high range | count-17 (counts 17..=32) |
//!
//! The packer caps every fill count to its class range before commands
//! reach this module, so out-of-range counts are a programming error
//! (asserted, not branched on) rather than a runtime condition.
//!
//! Deserialization is the exact mirror. Every command spans at least two
//! quartets, so a lone trailing quartet can only be the writer's zero pad;
//! a lone non-zero quartet means the stream was cut mid-command.

use glyphpack_core::{QuartetReader, QuartetWriter};

use crate::dictionary::PatternDictionary;
use crate::error::{Result, RleError};
use crate::packer::{BLACK, Command, MAX_COPY, Side, WHITE, canonical_pair, max_fill};

const FILL_VALUE: u8 = 0b0100;
const FILL_VALUE_X2: u8 = 0b0101;
const DOUBLE_INDEXED_BLACK: u8 = 0b0110;
const DOUBLE_INDEXED_WHITE: u8 = 0b0111;
const SIMPLE_BLACK: u8 = 0b1000;
const SIMPLE_WHITE: u8 = 0b1001;
const DOUBLE_LITERAL_BLACK: u8 = 0b1010;
const DOUBLE_LITERAL_WHITE: u8 = 0b1011;
const FILL_BLACK: u8 = 0b1100;
const FILL_VALUE_X1: u8 = 0b1101;
const FILL_WHITE: u8 = 0b1110;
const FILL_WHITE_HIGH: u8 = 0b1111;

/// Serialize a command sequence against a frozen dictionary.
///
/// Double patterns whose canonical pair ranks in the dictionary's top 16
/// take the one-quartet indexed form; everything else is spelled out
/// literally. An unfinalized dictionary never returns an index, so the
/// stream degrades to literal patterns rather than failing.
pub fn serialize(commands: &[Command], dictionary: &PatternDictionary) -> Vec<u8> {
    let mut writer = QuartetWriter::new();
    for command in commands {
        match command {
            Command::Fill {
                value: WHITE,
                count,
            } => {
                debug_assert!((1..=max_fill(WHITE)).contains(count));
                if *count <= 16 {
                    writer.push(FILL_WHITE);
                    writer.push((count - 1) as u8);
                } else {
                    writer.push(FILL_WHITE_HIGH);
                    writer.push((count - 17) as u8);
                }
            }
            Command::Fill {
                value: BLACK,
                count,
            } => {
                debug_assert!((1..=max_fill(BLACK)).contains(count));
                writer.push(FILL_BLACK);
                writer.push((count - 1) as u8);
            }
            Command::Fill { value, count } => {
                debug_assert!((1..=max_fill(*value)).contains(count));
                match count {
                    1 => {
                        writer.push(FILL_VALUE_X1);
                        writer.push(*value);
                    }
                    2 => {
                        writer.push(FILL_VALUE_X2);
                        writer.push(*value);
                    }
                    _ => {
                        writer.push(FILL_VALUE);
                        writer.push(*value);
                        writer.push((count - 3) as u8);
                    }
                }
            }
            Command::Copy(values) => {
                debug_assert!((2..=MAX_COPY).contains(&values.len()));
                // 00RR discriminator, RR in the low two bits.
                writer.push((values.len() - 2) as u8);
                for &value in values {
                    writer.push(value);
                }
            }
            Command::Simple { side, value } => {
                writer.push(match side {
                    Side::FromBlack => SIMPLE_BLACK,
                    Side::FromWhite => SIMPLE_WHITE,
                });
                writer.push(*value);
            }
            Command::Double {
                side,
                first,
                second,
            } => {
                let (k1, k2) = canonical_pair(*side, *first, *second);
                match dictionary.index_of(k1, k2) {
                    Some(index) => {
                        writer.push(match side {
                            Side::FromBlack => DOUBLE_INDEXED_BLACK,
                            Side::FromWhite => DOUBLE_INDEXED_WHITE,
                        });
                        writer.push(index);
                    }
                    None => {
                        writer.push(match side {
                            Side::FromBlack => DOUBLE_LITERAL_BLACK,
                            Side::FromWhite => DOUBLE_LITERAL_WHITE,
                        });
                        // Both directions store the canonical pair order,
                        // which for white→black is the swapped one.
                        writer.push(k1);
                        writer.push(k2);
                    }
                }
            }
        }
    }
    writer.finish()
}

/// Read one quartet, reporting a stream cut mid-command.
fn read_quartet(reader: &mut QuartetReader<'_>) -> Result<u8> {
    reader
        .read()
        .map_err(|_| RleError::truncated(reader.position()))
}

/// Deserialize a compressed stream back into commands.
///
/// Needs the same frozen dictionary the stream was serialized against (or
/// one rebuilt from its export) to resolve indexed double patterns.
pub fn deserialize(data: &[u8], dictionary: &PatternDictionary) -> Result<Vec<Command>> {
    let mut reader = QuartetReader::new(data);
    let mut commands = Vec::new();

    loop {
        if reader.remaining() == 0 {
            break;
        }
        if reader.remaining() == 1 {
            // Sole legal lone quartet: the writer's zero pad.
            if reader.peek() == Some(0) {
                break;
            }
            return Err(RleError::truncated(reader.position()));
        }

        let discriminator = read_quartet(&mut reader)?;
        let command = match discriminator {
            0b0000..=0b0011 => {
                let len = (discriminator & 0b0011) as usize + 2;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(read_quartet(&mut reader)?);
                }
                Command::Copy(values)
            }
            FILL_VALUE => {
                let value = read_quartet(&mut reader)?;
                let count = read_quartet(&mut reader)? as usize + 3;
                Command::Fill { value, count }
            }
            FILL_VALUE_X2 => Command::Fill {
                value: read_quartet(&mut reader)?,
                count: 2,
            },
            DOUBLE_INDEXED_BLACK | DOUBLE_INDEXED_WHITE => {
                let index = read_quartet(&mut reader)?;
                let (k1, k2) = dictionary
                    .value_at(index)
                    .ok_or_else(|| RleError::bad_pattern_index(index, dictionary.indexable()))?;
                if discriminator == DOUBLE_INDEXED_BLACK {
                    Command::Double {
                        side: Side::FromBlack,
                        first: k1,
                        second: k2,
                    }
                } else {
                    Command::Double {
                        side: Side::FromWhite,
                        first: k2,
                        second: k1,
                    }
                }
            }
            SIMPLE_BLACK => Command::Simple {
                side: Side::FromBlack,
                value: read_quartet(&mut reader)?,
            },
            SIMPLE_WHITE => Command::Simple {
                side: Side::FromWhite,
                value: read_quartet(&mut reader)?,
            },
            DOUBLE_LITERAL_BLACK => {
                let first = read_quartet(&mut reader)?;
                let second = read_quartet(&mut reader)?;
                Command::Double {
                    side: Side::FromBlack,
                    first,
                    second,
                }
            }
            DOUBLE_LITERAL_WHITE => {
                let k1 = read_quartet(&mut reader)?;
                let k2 = read_quartet(&mut reader)?;
                Command::Double {
                    side: Side::FromWhite,
                    first: k2,
                    second: k1,
                }
            }
            FILL_BLACK => Command::Fill {
                value: BLACK,
                count: read_quartet(&mut reader)? as usize + 1,
            },
            FILL_VALUE_X1 => Command::Fill {
                value: read_quartet(&mut reader)?,
                count: 1,
            },
            FILL_WHITE => Command::Fill {
                value: WHITE,
                count: read_quartet(&mut reader)? as usize + 1,
            },
            FILL_WHITE_HIGH => Command::Fill {
                value: WHITE,
                count: read_quartet(&mut reader)? as usize + 17,
            },
            _ => unreachable!("4-bit discriminator"),
        };
        commands.push(command);
    }

    Ok(commands)
}
