// THEORY:
// The trace writer persists frames for offline tuning of scan bands and the
// target color. It is write-only: the loop never reads traces back. Two kinds of
// file are produced when tracing is enabled:
// - `<millis>_<ACTION>.png` for every iteration, named after the action taken.
// - `FOUND_<millis>__<x>-<y>.png` whenever a band matched, named after the
//   first matching coordinate.
//
// Names only resolve to the millisecond. When a name is already taken in the
// same run (fps above 1000 gives a zero frame interval) a `-<n>` counter is
// appended before the extension, so no trace ever replaces another.
//
// A failed write is logged and skipped. Traces are observational and must never
// take the player down mid-game.

use crate::core_modules::action_planner::Action;
use crate::core_modules::frame::Frame;
use crate::core_modules::geometry::Point;
use crate::core_modules::utils::image_helper;
use crate::error::Result;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_TRACE_DIR: &str = "traceImages";

#[derive(Debug, Clone)]
pub struct TraceWriter {
    dir: PathBuf,
    enabled: bool,
}

impl TraceWriter {
    /// Creates the trace directory up front when tracing is enabled.
    pub fn new(dir: impl Into<PathBuf>, enabled: bool) -> Result<Self> {
        let dir = dir.into();
        if enabled {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir, enabled })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn step_file_name(timestamp_millis: u64, action: Action) -> String {
        format!("{timestamp_millis}_{}.png", action.label())
    }

    pub fn found_file_name(timestamp_millis: u64, point: Point) -> String {
        format!("FOUND_{timestamp_millis}__{}-{}.png", point.x, point.y)
    }

    pub fn record_step(&self, frame: &Frame, action: Action, timestamp_millis: u64) -> Option<PathBuf> {
        self.write(frame, Self::step_file_name(timestamp_millis, action))
    }

    pub fn record_found(&self, frame: &Frame, point: Point, timestamp_millis: u64) -> Option<PathBuf> {
        self.write(frame, Self::found_file_name(timestamp_millis, point))
    }

    fn write(&self, frame: &Frame, file_name: String) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        let path = self.free_path(&file_name);
        match image_helper::save(&path, frame.image()) {
            Ok(()) => Some(path),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping trace image");
                None
            }
        }
    }

    /// `dir/file_name`, or the first `dir/<stem>-<n>.png` not on disk yet.
    fn free_path(&self, file_name: &str) -> PathBuf {
        let path = self.dir.join(file_name);
        if !path.exists() {
            return path;
        }
        let stem = file_name.strip_suffix(".png").unwrap_or(file_name);
        (1u32..)
            .map(|n| self.dir.join(format!("{stem}-{n}.png")))
            .find(|candidate| !candidate.exists())
            .unwrap_or(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color::Color;

    #[test]
    fn disabled_writer_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let traces = dir.path().join("traces");
        let writer = TraceWriter::new(&traces, false).unwrap();
        let frame = Frame::filled(4, 4, Color::WOOD);
        assert_eq!(writer.record_step(&frame, Action::Continue, 1), None);
        assert!(!traces.exists());
    }

    #[test]
    fn names_follow_action_and_coordinate() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TraceWriter::new(dir.path().join("traces"), true).unwrap();
        let frame = Frame::filled(4, 4, Color::WOOD);

        let step = writer.record_step(&frame, Action::MoveRight, 1700).unwrap();
        let found = writer
            .record_found(&frame, Point::new(5, 60), 1700)
            .unwrap();

        assert_eq!(step.file_name().unwrap(), "1700_RIGHT.png");
        assert_eq!(found.file_name().unwrap(), "FOUND_1700__5-60.png");
        assert!(step.exists() && found.exists());
    }

    #[test]
    fn same_millisecond_steps_keep_both_frames() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TraceWriter::new(dir.path(), true).unwrap();
        let frame = Frame::filled(4, 4, Color::WOOD);

        let first = writer.record_step(&frame, Action::Continue, 42).unwrap();
        let second = writer.record_step(&frame, Action::Continue, 42).unwrap();
        let third = writer.record_step(&frame, Action::Continue, 42).unwrap();

        assert_eq!(first.file_name().unwrap(), "42_CONTINUE.png");
        assert_eq!(second.file_name().unwrap(), "42_CONTINUE-1.png");
        assert_eq!(third.file_name().unwrap(), "42_CONTINUE-2.png");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn write_failure_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let traces = dir.path().join("traces");
        let writer = TraceWriter::new(&traces, true).unwrap();
        fs::remove_dir(&traces).unwrap();

        let frame = Frame::filled(4, 4, Color::WOOD);
        assert_eq!(writer.record_step(&frame, Action::MoveLeft, 1), None);
    }
}
