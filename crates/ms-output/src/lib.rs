//! `ms-output` — output writers for metasim runs.
//!
//! | Module     | Output                                                     |
//! |------------|------------------------------------------------------------|
//! | [`csv`]    | `transitions.csv`, `tick_summaries.csv`                    |
//! | [`dot`]    | Graphviz digraph of a `TransitionGraph`                    |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ms_sim::SimObserver`.  The DOT
//! exporter uses only the graph's public traversal API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ms_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &sim.config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ms_output::dot::write_dot(&graph, File::create("graph.dot")?)?;
//! ```

pub mod csv;
pub mod dot;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use dot::write_dot;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{TickSummaryRow, TransitionRow};
pub use writer::OutputWriter;
