//! Reading game records from JSON lines

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use chess_core::GameRecord;
use tracing::warn;

use crate::config::STDIO;
use crate::error::WorkerError;

/// Streams game records out of a JSON-lines reader, one line at a time.
///
/// Blank lines are skipped. Lines that are not valid records are logged and
/// counted. A read error ends iteration and is returned from [`GameLines::finish`].
pub struct GameLines<R> {
    lines: io::Lines<R>,
    line_no: usize,
    malformed: usize,
    error: Option<io::Error>,
}

impl<R: BufRead> GameLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            malformed: 0,
            error: None,
        }
    }

    pub fn malformed(&self) -> usize {
        self.malformed
    }

    /// Malformed line count, or the read error that stopped the stream.
    pub fn finish(self) -> Result<usize, WorkerError> {
        match self.error {
            Some(e) => Err(e.into()),
            None => Ok(self.malformed),
        }
    }
}

impl<R: BufRead> Iterator for GameLines<R> {
    type Item = GameRecord;

    fn next(&mut self) -> Option<GameRecord> {
        if self.error.is_some() {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.error = Some(e);
                    return None;
                }
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<GameRecord>(&line) {
                Ok(record) => return Some(record),
                Err(e) => {
                    warn!(line = self.line_no, error = %e, "Malformed game record");
                    self.malformed += 1;
                }
            }
        }
    }
}

pub fn open_input(path: &str) -> Result<Box<dyn BufRead>, WorkerError> {
    if path == STDIO {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

pub fn open_output(path: &str) -> Result<Box<dyn Write>, WorkerError> {
    if path == STDIO {
        Ok(Box::new(BufWriter::new(io::stdout())))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}
