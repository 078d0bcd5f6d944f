//! Integration tests for ms-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{TickSummaryRow, TransitionRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn transition_row(agent_id: u32, tick: u64) -> TransitionRow {
        TransitionRow {
            tick,
            agent_id,
            transition: "walk".into(),
            from_state: "ChoosingMode".into(),
            to_state:   "InActivity".into(),
        }
    }

    fn read_all(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read_all(&dir.path().join("transitions.csv"));
        assert_eq!(headers, ["tick", "agent_id", "transition", "from_state", "to_state"]);
        assert!(rows.is_empty());

        let (headers, _) = read_all(&dir.path().join("tick_summaries.csv"));
        assert_eq!(headers, ["tick", "unix_time_secs", "woken_agents", "transitions"]);
    }

    #[test]
    fn csv_transition_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        for (agent, tick) in [(0, 5), (1, 5), (0, 6)] {
            w.write_transition(&transition_row(agent, tick)).unwrap();
        }
        w.finish().unwrap();

        let (_, rows) = read_all(&dir.path().join("transitions.csv"));
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "5"); // tick
        assert_eq!(&rows[1][1], "1"); // agent_id
        assert_eq!(&rows[2][0], "6");
        assert_eq!(&rows[2][3], "ChoosingMode");
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let mut row = transition_row(0, 1);
        row.transition = "walk, then bus".into();
        w.write_transition(&row).unwrap();
        w.finish().unwrap();

        let (_, rows) = read_all(&dir.path().join("transitions.csv"));
        assert_eq!(&rows[0][2], "walk, then bus");
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:           3,
            unix_time_secs: 10_800,
            woken_agents:   4,
            transitions:    2,
        })
        .unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // idempotent

        let (_, rows) = read_all(&dir.path().join("tick_summaries.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "10800");
        assert_eq!(&rows[0][2], "4");
        assert_eq!(&rows[0][3], "2");
    }
}

#[cfg(test)]
mod observer_tests {
    use std::sync::Arc;

    use ms_agent::PopulationBuilder;
    use ms_choice::FirstEligible;
    use ms_core::{SimConfig, Tick};
    use ms_graph::{AgentView, GraphBuilder, TransitionGraph, TransitionSpec};
    use ms_sim::{SimBuilder, SimObserver, TransitionEvent};
    use tempfile::TempDir;

    use crate::{
        CsvWriter, OutputError, OutputResult, OutputWriter, SimOutputObserver, TickSummaryRow,
        TransitionRow,
    };

    #[derive(Default)]
    struct Trip {
        arrived: bool,
    }

    fn trip_graph() -> Arc<TransitionGraph<Trip>> {
        let mut b = GraphBuilder::new();
        let traveling = b.add_state("Traveling").unwrap();
        let choosing = b.add_state("ChoosingMode").unwrap();
        let active = b.add_terminal_state("InActivity").unwrap();
        b.add_transition(
            traveling,
            choosing,
            TransitionSpec::when(|v: &AgentView<'_, Trip>| v.ctx.arrived).named("arrive"),
        )
        .unwrap();
        b.add_transition(choosing, active, TransitionSpec::always().named("walk")).unwrap();
        Arc::new(b.validate().unwrap())
    }

    /// Fails every write after the first `ok` successes.
    struct Flaky {
        ok:    usize,
        calls: usize,
    }

    impl Flaky {
        fn step(&mut self) -> OutputResult<()> {
            self.calls += 1;
            if self.calls > self.ok {
                let msg = format!("write {} failed", self.calls);
                return Err(OutputError::Io(std::io::Error::other(msg)));
            }
            Ok(())
        }
    }

    impl OutputWriter for Flaky {
        fn write_transition(&mut self, _row: &TransitionRow) -> OutputResult<()> {
            self.step()
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.step()
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn integration_csv() {
        let config = SimConfig {
            start_unix_secs:           1_000,
            tick_duration_secs:        60,
            total_ticks:               10,
            seed:                      1,
            reevaluate_interval_ticks: 1,
        };
        let (agents, rngs) = PopulationBuilder::new(2, 1, trip_graph(), Arc::new(FirstEligible))
            .build()
            .unwrap();
        let mut sim = SimBuilder::new(config.clone(), Trip { arrived: true }, agents, rngs)
            .build()
            .unwrap();

        let dir = TempDir::new().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("transitions.csv")).unwrap();
        let rows: Vec<Vec<String>> = rdr
            .records()
            .map(|r| r.unwrap().iter().map(str::to_owned).collect())
            .collect();
        assert_eq!(rows, vec![
            vec!["0", "0", "arrive", "Traveling", "ChoosingMode"],
            vec!["0", "1", "arrive", "Traveling", "ChoosingMode"],
            vec!["1", "0", "walk", "ChoosingMode", "InActivity"],
            vec!["1", "1", "walk", "ChoosingMode", "InActivity"],
        ]);

        // Both agents finish at tick 1, so the run stops after two ticks.
        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 2);
        assert_eq!(&summaries[1][1], "1060");
        assert_eq!(&summaries[1][2], "2");
        assert_eq!(&summaries[1][3], "2");
    }

    #[test]
    fn first_error_kept() {
        let config = SimConfig::default();
        let mut obs = SimOutputObserver::new(Flaky { ok: 1, calls: 0 }, &config);
        obs.on_tick_end(Tick(0), 0, 0);
        obs.on_transition(&TransitionEvent {
            tick:       Tick(1),
            agent:      ms_core::AgentId(0),
            transition: ms_core::TransitionId(0),
            label:      "walk",
            from:       "A",
            to:         "B",
        });
        obs.on_tick_end(Tick(1), 1, 1);

        let err = obs.take_error().expect("write error stored");
        assert_eq!(err.to_string(), "I/O error: write 2 failed");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 3);
    }
}

#[cfg(test)]
mod dot_tests {
    use ms_graph::{AgentView, GraphBuilder, TransitionSpec};

    use crate::dot::write_dot;

    #[test]
    fn renders_states_and_edges() {
        let mut b = GraphBuilder::new();
        let traveling = b.add_state("Traveling").unwrap();
        let choosing = b.add_state("ChoosingMode").unwrap();
        let active = b.add_terminal_state("InActivity").unwrap();
        b.add_transition(
            traveling,
            choosing,
            TransitionSpec::when(|_v: &AgentView<'_, ()>| true).named("arrive"),
        )
        .unwrap();
        b.add_transition(choosing, active, TransitionSpec::always().named("say \"hi\""))
            .unwrap();
        let graph = b.validate().unwrap();

        let mut out = Vec::new();
        write_dot(&graph, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("digraph transitions {"));
        assert!(text.trim_end().ends_with('}'));
        assert!(text.contains("\"Traveling\" [shape=circle, style=bold];"));
        assert!(text.contains("\"ChoosingMode\" [shape=circle];"));
        assert!(text.contains("\"InActivity\" [shape=doublecircle];"));
        assert!(text.contains("\"Traveling\" -> \"ChoosingMode\" [label=\"arrive\", style=dashed];"));
        assert!(text.contains("\"ChoosingMode\" -> \"InActivity\" [label=\"say \\\"hi\\\"\"];"));
    }
}
