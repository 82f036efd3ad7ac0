//! JSONL action scripts
//!
//! A script is a text file with one JSON command per line, the gesture
//! stream of an interactive session written down: rotations, toggles,
//! swaps, uploads, undo/redo. Blank lines and `#` comment lines are
//! skipped. Parsing is lenient: a malformed line becomes a line-numbered
//! warning and parsing continues, so one typo does not invalidate a whole
//! script. Callers that want strict behavior promote warnings to errors.

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{Action, Warning};
use crate::session::Session;

/// One script command, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum ScriptCommand {
    RotateCw { row: u32, col: u32 },
    RotateCcw { row: u32, col: u32 },
    Toggle { row: u32, col: u32 },
    Swap { row_a: u32, col_a: u32, row_b: u32, col_b: u32 },
    /// Decode and tile the named image file, then upload it.
    Upload { image: PathBuf },
    Reset,
    Undo,
    Redo,
}

/// A parsed command together with its source line number.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: ScriptCommand,
}

/// Result of parsing a script stream.
#[derive(Debug, Clone, Default)]
pub struct ScriptParse {
    pub lines: Vec<ScriptLine>,
    pub warnings: Vec<Warning>,
}

/// Parse a script stream, one JSON command per line.
///
/// Collects warnings for malformed lines and continues parsing.
pub fn parse_script<R: Read>(reader: R) -> ScriptParse {
    let mut result = ScriptParse::default();
    let buf_reader = BufReader::new(reader);

    for (index, line) in buf_reader.lines().enumerate() {
        let line_number = index + 1;
        let Ok(text) = line else {
            result.warnings.push(Warning {
                message: "unreadable line".to_string(),
                line: line_number,
            });
            continue;
        };

        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match serde_json::from_str::<ScriptCommand>(trimmed) {
            Ok(command) => result.lines.push(ScriptLine { line: line_number, command }),
            Err(e) => result.warnings.push(Warning {
                message: e.to_string(),
                line: line_number,
            }),
        }
    }

    result
}

/// Execute parsed script commands against a session, in order.
///
/// Image paths in `upload` commands are resolved against `base_dir` (the
/// script's own directory, typically). Failures stay local to their line:
/// an unreadable or undecodable image, or an out-of-range coordinate,
/// produces a warning and the session keeps its last-known-good state.
pub fn run_script(session: &mut Session, lines: &[ScriptLine], base_dir: &Path) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for entry in lines {
        match &entry.command {
            ScriptCommand::RotateCw { row, col } => {
                if check_bounds(session, *row, *col, entry.line, &mut warnings) {
                    session.dispatch(Action::RotateClockwise { row: *row, col: *col });
                }
            }
            ScriptCommand::RotateCcw { row, col } => {
                if check_bounds(session, *row, *col, entry.line, &mut warnings) {
                    session.dispatch(Action::RotateCounterclockwise { row: *row, col: *col });
                }
            }
            ScriptCommand::Toggle { row, col } => {
                if check_bounds(session, *row, *col, entry.line, &mut warnings) {
                    session.dispatch(Action::ToggleTransparency { row: *row, col: *col });
                }
            }
            ScriptCommand::Swap { row_a, col_a, row_b, col_b } => {
                let a_ok = check_bounds(session, *row_a, *col_a, entry.line, &mut warnings);
                let b_ok = check_bounds(session, *row_b, *col_b, entry.line, &mut warnings);
                if a_ok && b_ok {
                    session.dispatch(Action::Swap {
                        row_a: *row_a,
                        col_a: *col_a,
                        row_b: *row_b,
                        col_b: *col_b,
                    });
                }
            }
            ScriptCommand::Upload { image } => {
                let path = if image.is_absolute() {
                    image.clone()
                } else {
                    base_dir.join(image)
                };
                match fs::read(&path) {
                    Ok(bytes) => {
                        if let Err(e) = session.load_image(&bytes) {
                            warnings.push(Warning {
                                message: format!("upload '{}' failed: {}", path.display(), e),
                                line: entry.line,
                            });
                        }
                    }
                    Err(e) => {
                        warnings.push(Warning {
                            message: format!("cannot read '{}': {}", path.display(), e),
                            line: entry.line,
                        });
                    }
                }
            }
            ScriptCommand::Reset => {
                session.reset();
            }
            ScriptCommand::Undo => {
                session.undo();
            }
            ScriptCommand::Redo => {
                session.redo();
            }
        }
    }

    warnings
}

fn check_bounds(
    session: &Session,
    row: u32,
    col: u32,
    line: usize,
    warnings: &mut Vec<Warning>,
) -> bool {
    let grid = session.current_grid();
    if row < grid.rows() && col < grid.cols() {
        true
    } else {
        warnings.push(Warning {
            message: format!(
                "coordinate ({}, {}) outside {}x{} grid",
                row,
                col,
                grid.rows(),
                grid.cols()
            ),
            line,
        });
        false
    }
}
