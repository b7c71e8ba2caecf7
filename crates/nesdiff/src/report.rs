//! Line-synchronized comparison pass and discrepancy reporting.
//!
//! Pairs of lines are compared in order. A discrepancy prints a context block
//! (previous and current line of both streams around the message) unless it
//! repeats the previous comparison verbatim, in which case it is only
//! counted. A program counter mismatch stops the pass. Lines that fail to
//! parse are skipped; within a run of malformed pairs each kind of failure is
//! printed once.

use std::io::{self, Write};

use nesdiff_trace::{CandidateFormat, ParseError, ReferenceFormat, TraceFormat};
use tracing::{debug, info, warn};

use crate::compare::{Comparison, compare};
use crate::metrics;

/// Printed when the shorter stream is exhausted without a desync.
pub const SUCCESS_MESSAGE: &str = "Congrats!!!";

/// Progress of a comparison pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Program counters diverged at this 1-based line; nothing after it was
    /// examined.
    FatalStopped { line: usize },
    Completed,
}

/// Outcome of a comparison pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub state: RunState,
    /// Line pairs parsed and compared successfully.
    pub lines_compared: usize,
    /// Discrepancies found, printed or not.
    pub errors: usize,
    /// Discrepancies whose context block was suppressed as a repeat.
    pub suppressed: usize,
    /// Lines that failed to parse.
    pub malformed: usize,
}

/// Compare two fully loaded traces and write the report to `out`.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn run<R, C, W>(reference: &[R], candidate: &[C], out: W) -> io::Result<RunSummary>
where
    R: AsRef<str>,
    C: AsRef<str>,
    W: Write,
{
    let mut reporter = Reporter::new(out);
    for index in 0..reference.len().min(candidate.len()) {
        let previous = index
            .checked_sub(1)
            .map(|prev| (reference[prev].as_ref(), candidate[prev].as_ref()));
        reporter.step(
            index,
            previous,
            reference[index].as_ref(),
            candidate[index].as_ref(),
        )?;
        if reporter.state() != RunState::Running {
            break;
        }
    }
    reporter.finish()
}

/// Loop state carried from one line pair to the next.
pub struct Reporter<W> {
    out: W,
    state: RunState,
    previous: Option<Comparison>,
    /// Kinds of parse failure seen since the last pair that parsed.
    previous_malformed: Vec<ParseError>,
    lines_compared: usize,
    errors: usize,
    suppressed: usize,
    malformed: usize,
}

impl<W: Write> Reporter<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            state: RunState::Running,
            previous: None,
            previous_malformed: Vec::new(),
            lines_compared: 0,
            errors: 0,
            suppressed: 0,
            malformed: 0,
        }
    }

    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Parse, compare and report the pair at 0-based `index`.
    ///
    /// `previous` holds the raw lines of the pair before it, used only for
    /// context. Does nothing once the pass has stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the report fails.
    pub fn step(
        &mut self,
        index: usize,
        previous: Option<(&str, &str)>,
        reference_line: &str,
        candidate_line: &str,
    ) -> io::Result<()> {
        if self.state != RunState::Running {
            return Ok(());
        }
        let line = index + 1;

        let reference = ReferenceFormat::parse_line(reference_line);
        let candidate = CandidateFormat::parse_line(candidate_line);
        let (reference, candidate) = match (reference, candidate) {
            (Ok(reference), Ok(candidate)) => (reference, candidate),
            (reference, candidate) => {
                let mut failures = Vec::with_capacity(2);
                if let Err(err) = reference {
                    failures.push((err, reference_line));
                }
                if let Err(err) = candidate {
                    failures.push((err, candidate_line));
                }
                for (err, raw) in &failures {
                    self.report_malformed(line, err, raw)?;
                }
                // The comparison state is left as it was before this pair.
                for (err, _) in failures {
                    if !self.previous_malformed.iter().any(|prev| prev.same_kind(&err)) {
                        self.previous_malformed.push(err);
                    }
                }
                return Ok(());
            }
        };
        self.previous_malformed.clear();

        self.lines_compared += 1;
        metrics::record_compared();

        let comparison = compare(&candidate, &reference);
        if !comparison.is_match() {
            self.report_discrepancy(line, previous, &comparison, reference_line, candidate_line)?;
            if comparison.is_fatal() {
                warn!(line, severity = %comparison.severity, "program counters diverged, stopping");
                self.state = RunState::FatalStopped { line };
            }
        }
        self.previous = Some(comparison);
        Ok(())
    }

    /// End the pass and return its summary.
    ///
    /// A pass that is still running has exhausted its input and completes,
    /// printing the success message.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the report fails.
    pub fn finish(mut self) -> io::Result<RunSummary> {
        if self.state == RunState::Running {
            self.state = RunState::Completed;
            writeln!(self.out, "{SUCCESS_MESSAGE}")?;
        }
        self.out.flush()?;
        info!(
            state = ?self.state,
            lines_compared = self.lines_compared,
            errors = self.errors,
            suppressed = self.suppressed,
            malformed = self.malformed,
            "comparison finished"
        );
        Ok(RunSummary {
            state: self.state,
            lines_compared: self.lines_compared,
            errors: self.errors,
            suppressed: self.suppressed,
            malformed: self.malformed,
        })
    }

    fn report_discrepancy(
        &mut self,
        line: usize,
        previous: Option<(&str, &str)>,
        comparison: &Comparison,
        reference_line: &str,
        candidate_line: &str,
    ) -> io::Result<()> {
        self.errors += 1;
        metrics::record_discrepancy(comparison.severity);

        if self.previous.as_ref() == Some(comparison) {
            self.suppressed += 1;
            metrics::record_suppressed();
            debug!(line, severity = comparison.severity.level(), "repeated discrepancy");
            return Ok(());
        }

        if let Some((prev_reference, prev_candidate)) = previous {
            writeln!(self.out, "{} {}", line - 1, prev_reference)?;
            writeln!(self.out, "{} {}", line - 1, prev_candidate)?;
        }
        writeln!(self.out, "{}", comparison.message())?;
        writeln!(self.out, "{line} {reference_line}")?;
        writeln!(self.out, "{line} {candidate_line}")?;
        writeln!(self.out)
    }

    fn report_malformed(&mut self, line: usize, err: &ParseError, raw: &str) -> io::Result<()> {
        self.malformed += 1;
        metrics::record_malformed();
        warn!(line, format = %err.format(), error = %err, "skipping malformed trace line");

        if self.previous_malformed.iter().any(|prev| prev.same_kind(err)) {
            return Ok(());
        }

        writeln!(self.out, "malformed {} trace at line {line}: {err}", err.format())?;
        writeln!(self.out, "{line} {raw}")?;
        writeln!(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_line(pc: &str, a: &str) -> String {
        format!("{pc}  EA        NOP                             A:{a} X:00 Y:00 P:24 SP:FD CYC:  0 SL:241")
    }

    fn candidate_line(pc: &str, a: &str) -> String {
        format!("0x{pc} 0xEA 0x{a} 0x00 0x00 0x24 0xFD CYC: 0 SL:241")
    }

    fn traces(n: usize) -> (Vec<String>, Vec<String>) {
        let pcs: Vec<String> = (0..n).map(|i| format!("C{i:03X}")).collect();
        (
            pcs.iter().map(|pc| reference_line(pc, "00")).collect(),
            pcs.iter().map(|pc| candidate_line(pc, "00")).collect(),
        )
    }

    fn run_to_string(reference: &[String], candidate: &[String]) -> (RunSummary, String) {
        let mut out = Vec::new();
        let summary = run(reference, candidate, &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_matching_traces_complete() {
        let (reference, candidate) = traces(10);
        let (summary, output) = run_to_string(&reference, &candidate);

        assert_eq!(summary.state, RunState::Completed);
        assert_eq!(summary.lines_compared, 10);
        assert_eq!(summary.errors, 0);
        assert_eq!(output, "Congrats!!!\n");
    }

    #[test]
    fn test_register_divergence_continues() {
        let (reference, mut candidate) = traces(10);
        candidate[4] = candidate_line("C004", "01");

        let (summary, output) = run_to_string(&reference, &candidate);

        assert_eq!(summary.state, RunState::Completed);
        assert_eq!(summary.lines_compared, 10);
        assert_eq!(summary.errors, 1);
        let expected = format!(
            "4 {}\n4 {}\n A: 01 00\n5 {}\n5 {}\n\nCongrats!!!\n",
            reference[3], candidate[3], reference[4], candidate[4]
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_pc_desync_stops_immediately() {
        let (reference, mut candidate) = traces(10);
        candidate[4] = candidate_line("D004", "00");
        // Would be malformed if it were ever parsed.
        candidate[5] = "garbage".to_string();

        let (summary, output) = run_to_string(&reference, &candidate);

        assert_eq!(summary.state, RunState::FatalStopped { line: 5 });
        assert_eq!(summary.lines_compared, 5);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.malformed, 0);
        assert!(output.contains("PC: D004 C004\n"));
        assert!(!output.contains("Congrats"));
        assert!(!output.contains("garbage"));
    }

    #[test]
    fn test_repeated_discrepancy_printed_once() {
        let (reference, mut candidate) = traces(6);
        candidate[2] = candidate_line("C002", "01");
        candidate[3] = candidate_line("C003", "01");

        let (summary, output) = run_to_string(&reference, &candidate);

        assert_eq!(summary.errors, 2);
        assert_eq!(summary.suppressed, 1);
        assert_eq!(output.matches(" A: 01 00").count(), 1);
    }

    #[test]
    fn test_match_between_repeats_rearms_report() {
        let (reference, mut candidate) = traces(6);
        candidate[1] = candidate_line("C001", "01");
        candidate[3] = candidate_line("C003", "01");

        let (summary, output) = run_to_string(&reference, &candidate);

        assert_eq!(summary.errors, 2);
        assert_eq!(summary.suppressed, 0);
        assert_eq!(output.matches(" A: 01 00").count(), 2);
    }

    #[test]
    fn test_first_line_has_no_previous_context() {
        let (reference, mut candidate) = traces(2);
        candidate[0] = candidate_line("C000", "7F");

        let (_, output) = run_to_string(&reference, &candidate);

        let expected = format!(
            " A: 7F 00\n1 {}\n1 {}\n\nCongrats!!!\n",
            reference[0], candidate[0]
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let (reference, mut candidate) = traces(4);
        candidate[1] = "0xC001 0xEA 0x00 0x00".to_string();

        let (summary, output) = run_to_string(&reference, &candidate);

        assert_eq!(summary.state, RunState::Completed);
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.lines_compared, 3);
        assert_eq!(summary.errors, 0);
        assert!(output.starts_with(
            "malformed candidate trace at line 2: candidate line has 4 tokens, need at least 10\n\
             2 0xC001 0xEA 0x00 0x00\n\n"
        ));
    }

    #[test]
    fn test_shorter_stream_bounds_the_pass() {
        let (reference, candidate) = traces(8);
        let (summary, _) = run_to_string(&reference, &candidate[..3]);
        assert_eq!(summary.state, RunState::Completed);
        assert_eq!(summary.lines_compared, 3);

        let (summary, _) = run_to_string(&reference[..2], &candidate);
        assert_eq!(summary.lines_compared, 2);
    }

    #[test]
    fn test_step_after_fatal_is_noop() {
        let mut out = Vec::new();
        let mut reporter = Reporter::new(&mut out);
        reporter
            .step(0, None, &reference_line("C000", "00"), &candidate_line("C100", "00"))
            .unwrap();
        assert_eq!(reporter.state(), RunState::FatalStopped { line: 1 });

        reporter
            .step(1, None, &reference_line("C001", "00"), &candidate_line("C001", "05"))
            .unwrap();
        let summary = reporter.finish().unwrap();
        assert_eq!(summary.lines_compared, 1);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn test_malformed_pair_keeps_previous_comparison() {
        let (reference, mut candidate) = traces(5);
        candidate[1] = candidate_line("C001", "01");
        candidate[2] = "junk".to_string();
        candidate[3] = candidate_line("C003", "01");

        let (summary, output) = run_to_string(&reference, &candidate);

        assert_eq!(summary.state, RunState::Completed);
        assert_eq!(summary.lines_compared, 4);
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.errors, 2);
        // Line 4 repeats line 2's discrepancy across the skipped pair.
        assert_eq!(summary.suppressed, 1);
        assert_eq!(output.matches(" A: 01 00").count(), 1);
        assert!(output.contains("malformed candidate trace at line 3: "));
    }

    #[test]
    fn test_malformed_reference_line_is_skipped() {
        let (mut reference, candidate) = traces(4);
        reference[2] = "C002  EA".to_string();

        let (summary, output) = run_to_string(&reference, &candidate);

        assert_eq!(summary.state, RunState::Completed);
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.lines_compared, 3);
        assert_eq!(summary.errors, 0);
        assert!(output.starts_with("malformed reference trace at line 3: reference line has 2 tokens"));
        assert!(output.contains("\n3 C002  EA\n\n"));
        assert!(output.ends_with("Congrats!!!\n"));
    }

    #[test]
    fn test_both_sides_malformed_reported_separately() {
        let (mut reference, mut candidate) = traces(3);
        reference[1] = "C001  EA".to_string();
        candidate[1] = "junk".to_string();

        let (summary, output) = run_to_string(&reference, &candidate);

        assert_eq!(summary.malformed, 2);
        assert_eq!(summary.lines_compared, 2);
        let reference_block = output.find("malformed reference trace at line 2").unwrap();
        let candidate_block = output.find("malformed candidate trace at line 2").unwrap();
        assert!(reference_block < candidate_block);
        assert!(output.contains("\n2 junk\n"));
    }

    #[test]
    fn test_malformed_run_prints_each_kind_once() {
        let (reference, mut candidate) = traces(8);
        let short = |pc: &str| format!("0x{pc} 0xEA");
        let bad_stack = |pc: &str| candidate_line(pc, "00").replacen("0xFD", "FD", 1);
        candidate[1] = short("C001");
        candidate[2] = bad_stack("C002");
        candidate[3] = short("C003");
        candidate[4] = bad_stack("C004");
        candidate[6] = short("C006");

        let (summary, output) = run_to_string(&reference, &candidate);

        assert_eq!(summary.malformed, 5);
        assert_eq!(summary.lines_compared, 3);
        assert_eq!(output.matches("malformed candidate trace").count(), 3);
        assert!(output.contains("\n2 0xC001 0xEA\n"));
        assert!(output.contains("malformed candidate trace at line 3: candidate field SP"));
        assert!(!output.contains("line 4:"));
        assert!(!output.contains("line 5:"));
        assert!(output.contains("\n7 0xC006 0xEA\n"));
    }

    #[test]
    fn test_logs_desync_and_completion() {
        let (reference, mut candidate) = traces(4);
        candidate[2] = candidate_line("D002", "00");

        let logs = crate::test_log::capture_logs(|| {
            run_to_string(&reference, &candidate);
        });

        assert!(logs.contains("WARN"));
        assert!(logs.contains("program counters diverged"));
        assert!(logs.contains("severity=stream desynchronization"));
        assert!(logs.contains("INFO"));
        assert!(logs.contains("comparison finished"));
        assert!(logs.contains("lines_compared=3"));
    }
}
