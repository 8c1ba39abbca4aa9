//! CSV writers for the simulation history and benchmark summary.

use biofilm_core::Result;
use biofilm_world::{history_records, EntityStore, StepObserver};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

const HISTORY_HEADER: &str = "step,cell_id,bacterium_state,nutrient_state";
const BENCHMARK_HEADER: &str = "steps,num_rows,num_columns,sim_time,run_mode";
const LINE_END: &str = "\r\n";

/// Streams one CSV row per regular cell per step.
///
/// The header goes out with the first step written.
pub struct HistoryWriter<W: Write> {
    writer: W,
    header_written: bool,
    rows_written: u64,
}

impl HistoryWriter<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> HistoryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
            rows_written: 0,
        }
    }

    pub fn write_step(&mut self, step: u64, entities: &EntityStore) -> Result<()> {
        if !self.header_written {
            write!(self.writer, "{}{}", HISTORY_HEADER, LINE_END)?;
            self.header_written = true;
        }

        for record in history_records(entities, step) {
            write!(
                self.writer,
                "{},{},{},{}{}",
                record.step, record.cell_id, record.bacterium_state, record.nutrient, LINE_END
            )?;
            self.rows_written += 1;
        }

        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StepObserver for HistoryWriter<W> {
    fn observe(&mut self, step: u64, entities: &EntityStore) -> Result<()> {
        self.write_step(step, entities)
    }
}

/// One row of the benchmark summary
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord<'a> {
    pub steps: u64,
    pub rows: usize,
    pub columns: usize,
    pub sim_time: f64,
    pub run_mode: &'a str,
}

pub fn write_benchmark<W: Write>(writer: &mut W, record: &BenchmarkRecord<'_>, with_header: bool) -> Result<()> {
    if with_header {
        write!(writer, "{}{}", BENCHMARK_HEADER, LINE_END)?;
    }
    write!(
        writer,
        "{},{},{},{},{}{}",
        record.steps, record.rows, record.columns, record.sim_time, record.run_mode, LINE_END
    )?;
    Ok(())
}

/// Append a benchmark row, writing the header first when the file is new or empty
pub fn append_benchmark<P: AsRef<Path>>(path: P, record: &BenchmarkRecord<'_>) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let is_empty = file.metadata()?.len() == 0;
    write_benchmark(&mut file, record, is_empty)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use biofilm_core::{GridConfig, RunConfig};
    use biofilm_world::Simulation;
    use std::fs;
    use tempfile::tempdir;

    fn small_simulation(num_steps: u64) -> Simulation {
        Simulation::new(RunConfig {
            num_steps,
            seed: 12,
            grid: GridConfig { rows: 2, columns: 3 },
            ..Default::default()
        })
    }

    #[test]
    fn test_history_header_written_once() {
        let mut sim = small_simulation(2);
        let mut writer = HistoryWriter::new(Vec::new());
        sim.run(&mut writer).unwrap();

        assert_eq!(writer.rows_written(), 3 * 6);
        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<_> = text.split_terminator("\r\n").collect();

        assert_eq!(lines.len(), 1 + 3 * 6);
        assert_eq!(lines[0], HISTORY_HEADER);
        assert_eq!(text.matches("step,").count(), 1);
        assert!(lines[1].starts_with("0,0,"));
        assert!(lines[7].starts_with("1,0,"));
        assert!(lines[18].starts_with("2,5,"));
    }

    #[test]
    fn test_history_rows_use_state_codes() {
        let sim = small_simulation(0);
        let mut writer = HistoryWriter::new(Vec::new());
        writer.write_step(0, sim.entities()).unwrap();

        let text = String::from_utf8(writer.into_inner()).unwrap();
        for line in text.split_terminator("\r\n").skip(1) {
            let fields: Vec<_> = line.split(',').collect();
            assert_eq!(fields.len(), 4);
            assert!(matches!(fields[2], "0" | "1"));
            assert_eq!(fields[3], "1");
        }
    }

    #[test]
    fn test_identical_seeds_write_identical_history() {
        let mut first = HistoryWriter::new(Vec::new());
        small_simulation(10).run(&mut first).unwrap();
        let mut second = HistoryWriter::new(Vec::new());
        small_simulation(10).run(&mut second).unwrap();

        assert_eq!(first.into_inner(), second.into_inner());
    }

    #[test]
    fn test_write_benchmark_row() {
        let record = BenchmarkRecord {
            steps: 10,
            rows: 4,
            columns: 5,
            sim_time: 0.5,
            run_mode: "serial",
        };
        let mut buffer = Vec::new();
        write_benchmark(&mut buffer, &record, true).unwrap();
        write_benchmark(&mut buffer, &record, false).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "steps,num_rows,num_columns,sim_time,run_mode\r\n10,4,5,0.5,serial\r\n10,4,5,0.5,serial\r\n"
        );
    }

    #[test]
    fn test_append_benchmark_writes_header_only_for_new_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("summary.csv");

        let record = BenchmarkRecord {
            steps: 1,
            rows: 2,
            columns: 3,
            sim_time: 0.25,
            run_mode: "serial",
        };
        append_benchmark(&path, &record)?;
        append_benchmark(&path, &record)?;

        let text = fs::read_to_string(&path)?;
        assert_eq!(text.matches(BENCHMARK_HEADER).count(), 1);
        assert_eq!(text.split_terminator("\r\n").count(), 3);
        Ok(())
    }

    #[test]
    fn test_history_writer_creates_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.csv");

        let mut writer = HistoryWriter::create(&path)?;
        small_simulation(1).run(&mut writer)?;
        writer.flush()?;

        let text = fs::read_to_string(&path)?;
        assert!(text.starts_with(HISTORY_HEADER));
        assert_eq!(text.split_terminator("\r\n").count(), 1 + 2 * 6);
        Ok(())
    }
}
