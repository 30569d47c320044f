//! Plain-text scripts of pattern assembler actions.
//!
//! One action per line; blank lines and `#` comments are skipped.
//!
//! | Line                 | Action |
//! |----------------------|--------|
//! | `add <id>`           | append a section |
//! | `replace <pos> <id>` | replace the section at `pos`, keeping its key |
//! | `delete <pos>`       | delete the section at `pos` |
//! | `up <pos>`           | move the section at `pos` up |
//! | `down <pos>`         | move the section at `pos` down |
//! | `header <id\|none>`  | set or clear the header |
//! | `footer <id\|none>`  | set or clear the footer |
//!
//! Positions are 0-based section indices; the header never counts.

use storefront_core::PatternSlot;
use storefront_core::session::AssemblerSession;
use thiserror::Error;
use tracing::debug;

use crate::catalog::PatternCatalog;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown operation '{op}'")]
    UnknownOperation { line: usize, op: String },

    #[error("line {line}: '{op}' expects {expected} argument(s)")]
    ArgumentCount {
        line: usize,
        op: String,
        expected: usize,
    },

    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: pattern {id} is not in the catalog")]
    UnknownPattern { line: usize, id: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Header(Option<u32>),
    Footer(Option<u32>),
    Add(u32),
    Replace { position: usize, id: u32 },
    Delete(usize),
    MoveUp(usize),
    MoveDown(usize),
}

/// An operation with the 1-based line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub operation: Operation,
}

fn number<T: std::str::FromStr>(
    line: usize,
    value: &str,
) -> Result<T, ScriptError> {
    value.parse().map_err(|_| ScriptError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

fn optional_id(
    line: usize,
    value: &str,
) -> Result<Option<u32>, ScriptError> {
    if value.eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        number(line, value).map(Some)
    }
}

fn parse_line(
    line: usize,
    op: &str,
    args: &[&str],
) -> Result<Operation, ScriptError> {
    let expected = match op {
        "replace" => 2,
        "add" | "delete" | "up" | "down" | "header" | "footer" => 1,
        _ => {
            return Err(ScriptError::UnknownOperation {
                line,
                op: op.to_string(),
            });
        }
    };
    if args.len() != expected {
        return Err(ScriptError::ArgumentCount {
            line,
            op: op.to_string(),
            expected,
        });
    }

    Ok(match op {
        "add" => Operation::Add(number(line, args[0])?),
        "replace" => Operation::Replace {
            position: number(line, args[0])?,
            id: number(line, args[1])?,
        },
        "delete" => Operation::Delete(number(line, args[0])?),
        "up" => Operation::MoveUp(number(line, args[0])?),
        "down" => Operation::MoveDown(number(line, args[0])?),
        "header" => Operation::Header(optional_id(line, args[0])?),
        _ => Operation::Footer(optional_id(line, args[0])?),
    })
}

/// Parse a whole script. Stops at the first malformed line.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let content = raw.split('#').next().unwrap_or_default().trim();
            (!content.is_empty()).then_some((idx + 1, content))
        })
        .map(|(line, content)| {
            let mut words = content.split_whitespace();
            let op = words.next().unwrap_or_default().to_ascii_lowercase();
            let args: Vec<&str> = words.collect();
            parse_line(line, &op, &args).map(|operation| ScriptLine { line, operation })
        })
        .collect()
}

/// Apply `script` to `session` the way the views would, resolving pattern
/// ids against `catalog`.
///
/// Every id is checked before anything is applied, so an unknown pattern
/// leaves the session untouched.
pub fn replay(
    session: &mut AssemblerSession,
    catalog: &PatternCatalog,
    script: &[ScriptLine],
) -> Result<(), ScriptError> {
    for step in script {
        let id = match step.operation {
            Operation::Add(id) | Operation::Replace { id, .. } => Some(id),
            Operation::Header(id) | Operation::Footer(id) => id,
            _ => None,
        };
        if let Some(id) = id.filter(|id| catalog.get(*id).is_none()) {
            return Err(ScriptError::UnknownPattern {
                line: step.line,
                id,
            });
        }
    }

    let lookup = |id: u32| catalog.get(id).cloned();
    for step in script {
        debug!(line = step.line, operation = ?step.operation, "replay");
        match step.operation {
            Operation::Header(id) => {
                session.on_add(PatternSlot::Header);
                session.on_select(PatternSlot::Header, id.and_then(lookup));
            }
            Operation::Footer(id) => {
                session.on_add(PatternSlot::Footer);
                session.on_select(PatternSlot::Footer, id.and_then(lookup));
            }
            Operation::Add(id) => {
                session.on_add(PatternSlot::Section);
                session.on_select(PatternSlot::Section, lookup(id));
            }
            Operation::Replace { position, id } => {
                session.on_replace_section(position);
                session.on_select(PatternSlot::Section, lookup(id));
            }
            Operation::Delete(position) => session.on_delete_section(position),
            Operation::MoveUp(position) => session.on_move_up_section(position),
            Operation::MoveDown(position) => session.on_move_down_section(position),
        }
    }

    Ok(())
}
