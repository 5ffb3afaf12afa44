//! Integration tests for ns-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_HEADERS, SUMMARY_HEADERS};
    use crate::row::{AgentSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            tick,
            x:          agent_id as i32,
            y:          3,
            hunger:     42.5,
            thirst:     10.0,
            energy:     90.0,
            health:     100.0,
            mood:       70.0,
            activity:   "going to drink",
            frustrated: false,
            dead:       agent_id == 2,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_creates_missing_dir() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let mut w = CsvWriter::new(&nested).unwrap();
        w.finish().unwrap();
        assert!(nested.join("agent_snapshots.csv").exists());
    }

    #[test]
    fn csv_dir_blocked_by_file() {
        let dir = tmp();
        let file = dir.path().join("taken");
        std::fs::write(&file, "x").unwrap();
        let err = CsvWriter::new(&file.join("out")).err().expect("should fail");
        assert!(matches!(err, crate::OutputError::CreateDir { .. }), "got {err}");
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, SNAPSHOT_HEADERS);
        assert_eq!(headers[10], "frustrated");

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, SUMMARY_HEADERS);
    }

    #[test]
    fn csv_snapshot_fields() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5), snap_row(2, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][0], "1");              // agent_id
        assert_eq!(&rows[1][1], "5");              // tick
        assert_eq!(&rows[1][2], "1");              // x
        assert_eq!(&rows[1][4], "42.50");          // hunger
        assert_eq!(&rows[1][9], "going to drink"); // activity
        assert_eq!(&rows[1][11], "0");
        assert_eq!(&rows[2][11], "1");             // dead
    }

    #[test]
    fn csv_tick_summary_fields() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:        3,
            alive:       4,
            sleeping:    1,
            frustrated:  0,
            with_intent: 2,
            deaths:      1,
            collapses:   0,
            steps:       6,
            blocked:     1,
            effects:     2,
            orders_open: 3,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "4");
        assert_eq!(&rows[0][5], "1");  // deaths
        assert_eq!(&rows[0][7], "6");  // steps
        assert_eq!(&rows[0][10], "3"); // orders_open
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use ns_agent::{AgentSpec, AgentStoreBuilder};
    use ns_behavior::NoopBehavior;
    use ns_core::{Pos, SimConfig};
    use ns_sim::{SimBuilder, SimObserver, TickSummary};
    use ns_world::GridWorldBuilder;
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::{AgentSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    /// Fails every write after the first `ok` calls.
    struct FlakyWriter {
        ok:       usize,
        attempts: usize,
    }

    impl OutputWriter for FlakyWriter {
        fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
            self.write()
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.write()
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    impl FlakyWriter {
        fn write(&mut self) -> OutputResult<()> {
            self.attempts += 1;
            if self.attempts > self.ok {
                Err(OutputError::Io(std::io::Error::other("disk full")))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn first_error_kept_and_later_writes_skipped() {
        let mut obs = SimOutputObserver::new(FlakyWriter { ok: 1, attempts: 0 });
        for t in 0..5 {
            obs.on_tick_end(&TickSummary { tick: ns_core::Tick(t), ..TickSummary::default() });
        }
        let err = obs.take_error().expect("error stored");
        assert!(err.to_string().contains("disk full"));
        assert!(obs.take_error().is_none(), "take_error drains the slot");
        assert_eq!(obs.into_writer().attempts, 2, "writes stop after the first failure");
    }

    #[test]
    fn integration_csv() {
        let config = SimConfig {
            tick_duration_secs:    0.25,
            total_ticks:           6,
            seed:                  1,
            num_threads:           Some(1),
            output_interval_ticks: 2,
        };

        let (store, rngs) = AgentStoreBuilder::new(config.seed)
            .spawn(AgentSpec::at(Pos::new(0, 0)))
            .spawn(AgentSpec::at(Pos::new(1, 0)))
            .spawn(AgentSpec::at(Pos::new(2, 0)))
            .build();
        let world = GridWorldBuilder::new(4, 4).build().unwrap();
        let mut sim = SimBuilder::new(config, store, rngs, world, NoopBehavior)
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // Snapshots at ticks 0, 2, 4 for three agents.
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 9, "expected 3 snapshots × 3 agents, got {}", rows.len());
        assert_eq!(&rows[5][0], "2");
        assert_eq!(&rows[5][1], "2");
        assert_eq!(&rows[5][2], "2");
        assert!(rows.iter().all(|r| &r[9] == "idle"));

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 6);
        assert_eq!(&summaries[5][0], "5");
        assert!(summaries.iter().all(|r| &r[1] == "3"), "all agents alive");
    }
}
