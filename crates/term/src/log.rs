//! EventLog: bracket-prefixed diagnostics for a running session.
//!
//! Sink callbacks cannot fail, so the first write error is kept and can be
//! collected with [`EventLog::take_error`]. Later lines are still attempted.

use std::io::{self, Write};

use crate::core::{CommandOutcome, GravityOutcome, LockReport, Session, SessionSink, TickOutcome};

pub struct EventLog<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// First write error since the last call, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n")) {
            self.error.get_or_insert(e);
        }
    }

    /// Log what an active tick did; quiet ticks write nothing
    pub fn record(&mut self, outcome: &TickOutcome, session: &Session) {
        match outcome {
            TickOutcome::Gravity(GravityOutcome::Spawned(piece)) => {
                self.line(format_args!(
                    "[Piece] spawned {} ({}) at ({}, {})",
                    piece.id,
                    piece.shape.as_str(),
                    piece.x,
                    piece.y
                ));
            }
            TickOutcome::Gravity(GravityOutcome::Locked(report))
            | TickOutcome::Command {
                outcome: CommandOutcome::Locked(report),
                ..
            } => self.locked(report),
            TickOutcome::Gravity(GravityOutcome::GameOver(_)) => {
                self.line(format_args!(
                    "[Session] game over after {} pieces, score {}",
                    session.spawned_count(),
                    session.score_text()
                ));
            }
            TickOutcome::Command {
                command,
                outcome: CommandOutcome::Rejected,
            } => {
                self.line(format_args!("[Input] {} rejected", command.as_str()));
            }
            _ => {}
        }
    }

    fn locked(&mut self, report: &LockReport) {
        self.line(format_args!(
            "[Session] locked piece {} ({}), cleared {} rows, +{}",
            report.piece.id,
            report.piece.shape.as_str(),
            report.rows_cleared,
            report.points
        ));
    }

    /// Write the diagnostic grid dump under a header line
    pub fn dump(&mut self, session: &Session) {
        self.line(format_args!("[Grid] dump"));
        let dump = session.dump();
        for row in dump.lines() {
            self.line(format_args!("{}", row));
        }
    }

    pub fn note(&mut self, message: &str) {
        self.line(format_args!("[Host] {}", message));
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> SessionSink for EventLog<W> {
    fn report_score(&mut self, total: u32, text: &str) {
        if total > 0 {
            self.line(format_args!("[Score] {}", text));
        }
    }

    fn on_session_start(&mut self) {
        self.line(format_args!("[Session] started"));
    }

    fn on_game_over(&mut self) {
        self.line(format_args!("[Session] spawn blocked"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NullSink, ScriptedShapes, Session};
    use crate::types::{Command, ShapeKind};

    fn text(log: EventLog<Vec<u8>>) -> String {
        String::from_utf8(log.into_inner()).unwrap()
    }

    #[test]
    fn test_session_start_and_score_lines() {
        let mut log = EventLog::new(Vec::new());
        let _session = Session::new(8, &mut log);
        log.report_score(40, "00000040");

        assert_eq!(text(log), "[Session] started\n[Score] 00000040\n");
    }

    #[test]
    fn test_lock_line() {
        let mut source = ScriptedShapes::repeat(ShapeKind::T);
        let mut session = Session::new(8, &mut NullSink);
        session.spawn(&mut source, &mut NullSink);
        let outcome = session.apply_command(Command::HardDrop, &mut NullSink);

        let mut log = EventLog::new(Vec::new());
        log.record(
            &TickOutcome::Command {
                command: Command::HardDrop,
                outcome,
            },
            &session,
        );
        assert_eq!(
            text(log),
            "[Session] locked piece 1 (T), cleared 0 rows, +0\n"
        );
    }

    #[test]
    fn test_dump_writes_every_row() {
        let session = Session::new(8, &mut NullSink);
        let mut log = EventLog::new(Vec::new());
        log.dump(&session);

        let out = text(log);
        assert_eq!(out.lines().count(), 1 + 22);
        assert!(out.lines().nth(1).unwrap().starts_with("[##]"));
    }

    #[test]
    fn test_write_error_is_kept() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut log = EventLog::new(Broken);
        log.note("one");
        log.note("two");
        assert!(log.take_error().is_some());
        assert!(log.take_error().is_none());
    }
}
