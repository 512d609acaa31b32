//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `tick_summaries.csv`
//! - `vehicle_snapshots.csv`
//! - `station_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, StationSnapshotRow, TickSummaryRow, VehicleSnapshotRow};

pub const SUMMARIES_FILE: &str = "tick_summaries.csv";
pub const VEHICLES_FILE:  &str = "vehicle_snapshots.csv";
pub const STATIONS_FILE:  &str = "station_snapshots.csv";

const SUMMARY_HEADER: [&str; 11] = [
    "tick",
    "sim_time_secs",
    "activated",
    "created",
    "boarded",
    "served",
    "departed",
    "stalled",
    "ticket_revenue",
    "maintenance",
    "money",
];

const VEHICLE_HEADER: [&str; 10] = [
    "tick",
    "vehicle_id",
    "line_id",
    "state",
    "station_index",
    "percent",
    "x",
    "y",
    "passengers",
    "overcrowded",
];

const STATION_HEADER: [&str; 4] = ["tick", "station_id", "waiting", "overcrowded"];

/// One output table: its file name and open writer.
struct Table {
    file:   &'static str,
    writer: Writer<File>,
}

impl Table {
    fn create(dir: &Path, file: &'static str, header: &[&str]) -> OutputResult<Self> {
        let writer = Writer::from_path(dir.join(file)).map_err(|source| OutputError::Csv { file, source })?;
        let mut table = Self { file, writer };
        table.write(header)?;
        Ok(table)
    }

    fn write<I, T>(&mut self, record: I) -> OutputResult<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let file = self.file;
        self.writer.write_record(record).map_err(|source| OutputError::Csv { file, source })
    }

    fn flush(&mut self) -> OutputResult<()> {
        let file = self.file;
        self.writer.flush().map_err(|source| OutputError::Io { file, source })
    }
}

/// Writes simulation output to CSV files.
pub struct CsvWriter {
    summaries: Table,
    vehicles:  Table,
    stations:  Table,
    finished:  bool,
}

impl CsvWriter {
    /// Create the CSV files in `dir` (truncating existing ones) and write the
    /// header rows.  The directory must exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            summaries: Table::create(dir, SUMMARIES_FILE, &SUMMARY_HEADER)?,
            vehicles:  Table::create(dir, VEHICLES_FILE, &VEHICLE_HEADER)?,
            stations:  Table::create(dir, STATIONS_FILE, &STATION_HEADER)?,
            finished:  false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write([
            row.tick.to_string(),
            format!("{:.3}", row.sim_time_secs),
            row.activated.to_string(),
            row.created.to_string(),
            row.boarded.to_string(),
            row.served.to_string(),
            row.departed.to_string(),
            row.stalled.to_string(),
            format!("{:.2}", row.ticket_revenue),
            format!("{:.4}", row.maintenance),
            format!("{:.2}", row.money),
        ])
    }

    fn write_vehicle_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.vehicles.write([
                row.tick.to_string(),
                row.vehicle_id.to_string(),
                row.line_id.to_string(),
                row.state.as_str().to_owned(),
                row.station_index.to_string(),
                format!("{:.3}", row.percent),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
                row.passengers.to_string(),
                (row.overcrowded as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_station_snapshots(&mut self, rows: &[StationSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.stations.write([
                row.tick.to_string(),
                row.station_id.to_string(),
                row.waiting.to_string(),
                (row.overcrowded as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.vehicles.flush()?;
        self.stations.flush()
    }
}
