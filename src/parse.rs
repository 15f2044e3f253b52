//! Parse footprint rows into typed values.
//!
//! Structural problems that deserve a precise message (missing `)`, missing
//! `,`, unbalanced brackets, wall without reference) are detected on the raw
//! text first. The pest grammar then splits the row into its parts.

use pest::Parser;
use pest::iterators::Pair;

use crate::coordinate::ParsedCoordinate;
use crate::errors::{GrammarError, Header, InputError, MissingHeaderError};
use crate::types::{Angle, FtIn, HeightRange, Offset};
use crate::units::{parse_ft_in_pair, to_millimeters};
use crate::world::Wall;
use crate::{FootprintParser, Rule};

/// Parse one coordinate row: `LABEL) [WALL] <REF|ROT> xFt:xIn,yFt:yIn`
pub fn parse_coordinate(line: &str) -> Result<ParsedCoordinate, InputError> {
    let line = line.trim();
    let (label, draw, label_end) = precheck(line)?;

    // The grammar sees the label with the `//` marker removed.
    let normalized = format!("{label}{}", &line[label_end..]);
    let pair = FootprintParser::parse(Rule::coordinate, &normalized)
        .map_err(|e| syntax_error(line, &e))?
        .next()
        .ok_or_else(|| syntax_error_msg(line, "empty parse"))?;

    let mut wall_name = None;
    let mut reference = None;
    let mut rotation = None;
    let mut offset = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::label => {}
            Rule::wall => {
                wall_name = inner.into_inner().next().map(|p| p.as_str().to_string());
            }
            Rule::frame => {
                for part in inner.into_inner() {
                    match part.as_rule() {
                        Rule::reference => reference = Some(part.as_str().to_string()),
                        Rule::rotation => rotation = Some(parse_rotation(&label, part.as_str())?),
                        _ => {}
                    }
                }
            }
            Rule::offset => offset = Some(parse_offset(inner)?),
            Rule::EOI => {}
            other => {
                return Err(syntax_error_msg(line, &format!("unexpected {other:?}")));
            }
        }
    }

    let wall = match wall_name {
        Some(name) => Some(Wall::from_tag(&name).ok_or_else(|| GrammarError::InvalidWall {
            label: label.clone(),
            wall: name,
        })?),
        None => None,
    };

    let (offset, written) =
        offset.ok_or_else(|| GrammarError::MissingOrderedPair { label: label.clone() })?;

    Ok(ParsedCoordinate {
        outline: ParsedCoordinate::is_outline_label(&label),
        label,
        draw,
        wall,
        reference,
        rotation,
        offset,
        written,
    })
}

/// Parse the first row of a file: `VolName)<name>`
pub fn parse_volume_header(line: &str) -> Result<String, InputError> {
    let line = line.trim();
    let missing = || InputError::from(MissingHeaderError::new(Header::VolumeName));

    let pair = FootprintParser::parse(Rule::volume_header, line)
        .map_err(|_| missing())?
        .next()
        .ok_or_else(missing)?;

    pair.into_inner()
        .find(|p| p.as_rule() == Rule::volume_name)
        .map(|p| p.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(missing)
}

/// Parse the second row of a file: `Height)<base>,<top>`
pub fn parse_height_header(line: &str) -> Result<HeightRange, InputError> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(Header::Height.keyword()) else {
        return Err(MissingHeaderError::new(Header::Height).into());
    };
    if !rest.trim_start().starts_with(')') {
        return Err(MissingHeaderError::new(Header::Height).into());
    }
    if !rest.contains(',') {
        return Err(GrammarError::MissingOrderedPair {
            label: Header::Height.keyword().to_string(),
        }
        .into());
    }

    let pair = FootprintParser::parse(Rule::height_header, line)
        .map_err(|e| syntax_error(line, &e))?
        .next()
        .ok_or_else(|| syntax_error_msg(line, "empty parse"))?;

    let offset = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::offset)
        .ok_or_else(|| syntax_error_msg(line, "missing heights"))?;
    let (heights, _) = parse_offset(offset)?;
    Ok(HeightRange::new(heights.dx, heights.dy))
}

/// Split the label off the row and run the structural checks.
/// Returns the cleaned label, the draw flag and where the label ends.
fn precheck(line: &str) -> Result<(String, bool, usize), GrammarError> {
    let label_end = line
        .find(')')
        .or_else(|| line.find('['))
        .ok_or_else(|| GrammarError::MissingLabelDelimiter { line: line.to_string() })?;

    let (label, draw) = strip_hidden_marker(line[..label_end].trim());
    if label.is_empty() {
        return Err(GrammarError::EmptyLabel { line: line.to_string() });
    }

    if !line.contains(',') {
        return Err(GrammarError::MissingOrderedPair { label });
    }

    check_balanced(line, '[', ']')?;
    check_balanced(line, '<', '>')?;

    if line.contains('[') && !line.contains('<') {
        return Err(GrammarError::WallWithoutReference { label });
    }

    Ok((label, draw, label_end))
}

/// `//` in a label hides the point: `//A` and `A//` both mean label `A`.
fn strip_hidden_marker(raw: &str) -> (String, bool) {
    match raw.rsplit_once("//") {
        Some((before, after)) => {
            let label = if after.trim().is_empty() { before } else { after };
            (label.trim_matches('/').trim().to_string(), false)
        }
        None => (raw.to_string(), true),
    }
}

/// Every `open` must be closed before the next one opens.
fn check_balanced(line: &str, open: char, close: char) -> Result<(), GrammarError> {
    let unbalanced = || GrammarError::Unbalanced {
        open,
        close,
        line: line.to_string(),
    };

    let mut depth = 0u32;
    for c in line.chars() {
        if c == open {
            if depth > 0 {
                return Err(unbalanced());
            }
            depth += 1;
        } else if c == close {
            if depth == 0 {
                return Err(unbalanced());
            }
            depth -= 1;
        }
    }

    if depth == 0 { Ok(()) } else { Err(unbalanced()) }
}

fn parse_rotation(label: &str, text: &str) -> Result<Angle, GrammarError> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Angle)
        .ok_or_else(|| GrammarError::InvalidRotation {
            label: label.to_string(),
            value: text.to_string(),
        })
}

fn parse_offset(pair: Pair<Rule>) -> Result<(Offset, [FtIn; 2]), InputError> {
    let mut measures = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::measure)
        .map(|p| p.as_str());

    let x_token = measures.next().unwrap_or_default();
    let y_token = measures.next().unwrap_or_default();

    let x = parse_ft_in_pair(x_token)?;
    let y = parse_ft_in_pair(y_token)?;
    let offset = Offset::new(to_millimeters(x, x_token)?, to_millimeters(y, y_token)?);
    Ok((offset, [x, y]))
}

fn syntax_error(line: &str, err: &pest::error::Error<Rule>) -> InputError {
    syntax_error_msg(line, &err.variant.message())
}

fn syntax_error_msg(line: &str, message: &str) -> InputError {
    GrammarError::Syntax {
        line: line.to_string(),
        message: message.to_string(),
    }
    .into()
}
