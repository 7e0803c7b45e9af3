//! Regex-based PGN reader for main-line SAN moves.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Error, Debug, Clone)]
pub enum PgnError {
    #[error("game starts from a custom position")]
    NonStandardStart,

    #[error("no moves found in PGN")]
    NoMoves,

    #[error("PGN pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}

struct Patterns {
    header: Regex,
    header_block: Regex,
    comment: Regex,
    variation: Regex,
    san: Regex,
}

static PATTERNS: LazyLock<Result<Patterns, regex::Error>> = LazyLock::new(|| {
    Ok(Patterns {
        header: Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#)?,
        header_block: Regex::new(r"\[[^\]]*\]")?,
        comment: Regex::new(r"\{[^}]*\}")?,
        variation: Regex::new(r"\([^)]*\)")?,
        san: Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O[+#]?|O-O[+#]?")?,
    })
});

fn patterns() -> Result<&'static Patterns, PgnError> {
    PATTERNS.as_ref().map_err(|e| PgnError::Pattern(e.clone()))
}

/// Main-line SAN moves of a PGN game that starts from the initial position.
pub fn parse_pgn(pgn: &str) -> Result<Vec<String>, PgnError> {
    let patterns = patterns()?;

    let mut setup = None;
    let mut fen = None;
    for cap in patterns.header.captures_iter(pgn) {
        match &cap[1] {
            "SetUp" => setup = Some(cap[2].to_string()),
            "FEN" => fen = Some(cap[2].to_string()),
            _ => {}
        }
    }

    // Replay always starts from the initial position
    if setup.as_deref() == Some("1") && fen.as_deref().is_some_and(|f| f != STANDARD_START_FEN) {
        return Err(PgnError::NonStandardStart);
    }

    let moves = extract_moves(pgn)?;
    if moves.is_empty() {
        return Err(PgnError::NoMoves);
    }

    Ok(moves)
}

/// Extract SAN moves from PGN text (after removing headers, comments, variations).
pub fn extract_moves(pgn: &str) -> Result<Vec<String>, PgnError> {
    let patterns = patterns()?;

    let no_headers = patterns.header_block.replace_all(pgn, "");
    let no_comments = patterns.comment.replace_all(&no_headers, "");
    let no_variations = patterns.variation.replace_all(&no_comments, "");

    Ok(patterns
        .san
        .find_iter(&no_variations)
        .map(|m| m.as_str().to_string())
        .collect())
}
