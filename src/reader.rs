//! Source sequencer
//!
//! Emulates the legacy "read next line from stdin or named files" operator:
//! an ordered list of sources, standard input conceptually first, then each
//! named file in argument order, consumed strictly in order with a
//! per-source line counter. Sources are opened lazily and the handle for a
//! source is dropped as soon as the cursor moves past it.
//!
//! Two deliberate legacy quirks live here and must not be "fixed":
//!
//! - Read and open failures on an individual source are swallowed and
//!   treated exactly like end-of-file; the sequencer silently advances.
//!   They are visible only as debug-level trace events.
//! - After the last source is exhausted, `next_line` returns the
//!   end-marker (`None`) once and re-arms: the very next call rebuilds the
//!   source list and starts over from source 0, line 1. Repeated
//!   exhaustion therefore re-reads the same sources forever; stopping at
//!   the first end-marker is the caller's job.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use tracing::debug;

/// One readable input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

enum State {
    /// No pass in progress. The next read starts (or restarts) at source 0.
    Idle,
    Reading {
        index: usize,
        handle: Box<dyn BufRead>,
    },
}

/// Sequential reader over an ordered list of sources.
pub struct LineReader {
    sources: Vec<Source>,
    state: State,
    line_number: u64,
}

impl LineReader {
    /// Standard input first, then each named file in argument order.
    pub fn new<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut sources = vec![Source::Stdin];
        sources.extend(paths.into_iter().map(Source::File));
        Self::from_sources(sources)
    }

    /// Build a reader over an explicit source list. Used by callers that
    /// want to control exactly which sources take part (tests in
    /// particular, where stdin is not in play).
    pub fn from_sources(sources: Vec<Source>) -> Self {
        LineReader {
            sources,
            state: State::Idle,
            line_number: 0,
        }
    }

    /// Read the next line of the current pass, or return the end-marker.
    ///
    /// The trailing newline is kept, as the legacy operator keeps it;
    /// [`crate::list::chomp`] strips it.
    pub fn next_line(&mut self) -> Option<String> {
        loop {
            // Where the cursor needs to move next: source 0 for a fresh
            // pass, or the source after the one that just ran dry.
            let next_index = match &mut self.state {
                State::Idle => 0,
                State::Reading { index, handle } => {
                    let mut line = String::new();
                    match handle.read_line(&mut line) {
                        Ok(0) => *index + 1,
                        Err(err) => {
                            // Read faults are indistinguishable from EOF
                            // in the legacy semantics.
                            debug!(source = *index, error = %err, "read failed, advancing");
                            *index + 1
                        }
                        Ok(_) => {
                            self.line_number += 1;
                            return Some(line);
                        }
                    }
                }
            };

            match self.open_from(next_index) {
                Some((index, handle)) => {
                    debug!(source = index, "reading source");
                    self.line_number = 0;
                    self.state = State::Reading { index, handle };
                }
                None => {
                    // End of the pass. Tear down so the following call
                    // restarts from source 0; the counter is left alone
                    // for current_line_number queries.
                    self.state = State::Idle;
                    return None;
                }
            }
        }
    }

    /// Per-source line counter for the source currently being read, or
    /// last read before exhaustion.
    pub fn current_line_number(&self) -> u64 {
        self.line_number
    }

    /// Open the first source at or after `start` that can be opened.
    /// Unopenable sources are skipped like empty ones.
    fn open_from(&self, start: usize) -> Option<(usize, Box<dyn BufRead>)> {
        for index in start..self.sources.len() {
            match &self.sources[index] {
                Source::Stdin => {
                    return Some((index, Box::new(io::stdin().lock())));
                }
                Source::File(path) => match File::open(path) {
                    Ok(file) => {
                        return Some((index, Box::new(BufReader::new(file))));
                    }
                    Err(err) => {
                        debug!(path = %path.display(), error = %err, "cannot open source, skipping");
                    }
                },
            }
        }
        None
    }
}

impl std::fmt::Debug for LineReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            State::Idle => "Idle".to_string(),
            State::Reading { index, .. } => format!("Reading({})", index),
        };
        f.debug_struct("LineReader")
            .field("sources", &self.sources)
            .field("state", &state)
            .field("line_number", &self.line_number)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.path().join(name);
        let mut content = lines.join("\n");
        if !lines.is_empty() {
            content.push('\n');
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn file_reader(paths: Vec<PathBuf>) -> LineReader {
        LineReader::from_sources(paths.into_iter().map(Source::File).collect())
    }

    #[test]
    fn test_reads_sources_in_order() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.txt", &["a1", "a2"]);
        let b = write_source(&dir, "b.txt", &["b1", "b2", "b3"]);

        let mut reader = file_reader(vec![a, b]);
        assert_eq!(reader.next_line().as_deref(), Some("a1\n"));
        assert_eq!(reader.next_line().as_deref(), Some("a2\n"));
        assert_eq!(reader.next_line().as_deref(), Some("b1\n"));
        assert_eq!(reader.next_line().as_deref(), Some("b2\n"));
        assert_eq!(reader.next_line().as_deref(), Some("b3\n"));
        assert_eq!(reader.next_line(), None);
    }

    #[test]
    fn test_line_counter_resets_at_source_boundary() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.txt", &["a1", "a2"]);
        let b = write_source(&dir, "b.txt", &["b1", "b2", "b3"]);

        let mut reader = file_reader(vec![a, b]);
        reader.next_line();
        reader.next_line();
        assert_eq!(reader.current_line_number(), 2);

        // First line of the second source restarts the counter.
        reader.next_line();
        assert_eq!(reader.current_line_number(), 1);
        reader.next_line();
        reader.next_line();
        assert_eq!(reader.current_line_number(), 3);
    }

    #[test]
    fn test_counter_survives_exhaustion() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.txt", &["a1"]);

        let mut reader = file_reader(vec![a]);
        reader.next_line();
        assert_eq!(reader.next_line(), None);
        // "Last read before exhaustion" stays visible.
        assert_eq!(reader.current_line_number(), 1);
    }

    #[test]
    fn test_restart_after_end_marker() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.txt", &["a1", "a2"]);
        let b = write_source(&dir, "b.txt", &["b1"]);

        let mut reader = file_reader(vec![a, b]);
        for _ in 0..3 {
            reader.next_line();
        }
        assert_eq!(reader.next_line(), None);

        // The call immediately following the end-marker re-reads source 0
        // from its first line.
        assert_eq!(reader.next_line().as_deref(), Some("a1\n"));
        assert_eq!(reader.current_line_number(), 1);
    }

    #[test]
    fn test_empty_source_is_skipped_transparently() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.txt", &["a1"]);
        let empty = write_source(&dir, "empty.txt", &[]);
        let b = write_source(&dir, "b.txt", &["b1"]);

        let mut reader = file_reader(vec![a, empty, b]);
        assert_eq!(reader.next_line().as_deref(), Some("a1\n"));
        assert_eq!(reader.next_line().as_deref(), Some("b1\n"));
        assert_eq!(reader.next_line(), None);
    }

    #[test]
    fn test_unopenable_source_is_skipped() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist.txt");
        let b = write_source(&dir, "b.txt", &["b1"]);

        let mut reader = file_reader(vec![missing, b]);
        assert_eq!(reader.next_line().as_deref(), Some("b1\n"));
        assert_eq!(reader.next_line(), None);
    }

    #[test]
    fn test_no_sources_at_all() {
        let mut reader = LineReader::from_sources(Vec::new());
        assert_eq!(reader.next_line(), None);
        assert_eq!(reader.next_line(), None);
    }

    #[test]
    fn test_all_sources_empty() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.txt", &[]);
        let b = write_source(&dir, "b.txt", &[]);

        let mut reader = file_reader(vec![a, b]);
        assert_eq!(reader.next_line(), None);
        assert_eq!(reader.next_line(), None);
    }

    #[test]
    fn test_last_line_without_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "x\ny").unwrap();

        let mut reader = file_reader(vec![path]);
        assert_eq!(reader.next_line().as_deref(), Some("x\n"));
        assert_eq!(reader.next_line().as_deref(), Some("y"));
        assert_eq!(reader.next_line(), None);
    }

    #[test]
    fn test_repeated_exhaustion_keeps_restarting() {
        let dir = TempDir::new().unwrap();
        let a = write_source(&dir, "a.txt", &["x"]);

        let mut reader = file_reader(vec![a]);
        for _ in 0..3 {
            assert_eq!(reader.next_line().as_deref(), Some("x\n"));
            assert_eq!(reader.next_line(), None);
        }
    }
}
