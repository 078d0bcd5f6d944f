//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `transitions.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, TransitionRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    transitions: Writer<File>,
    summaries:   Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut transitions = Writer::from_path(dir.join("transitions.csv"))?;
        transitions.write_record(["tick", "agent_id", "transition", "from_state", "to_state"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "unix_time_secs", "woken_agents", "transitions"])?;

        Ok(Self { transitions, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_transition(&mut self, row: &TransitionRow) -> OutputResult<()> {
        self.transitions.write_record([
            row.tick.to_string().as_str(),
            row.agent_id.to_string().as_str(),
            row.transition.as_str(),
            row.from_state.as_str(),
            row.to_state.as_str(),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.woken_agents.to_string(),
            row.transitions.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.transitions.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
