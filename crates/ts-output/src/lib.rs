//! `ts-output`: simulation output writers for the transit network simulator.
//!
//! | Backend | Files created                                                        |
//! |---------|----------------------------------------------------------------------|
//! | CSV     | `tick_summaries.csv`, `vehicle_snapshots.csv`, `station_snapshots.csv` |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ts_sim::SimObserver`.  Tick
//! summaries are written every tick; snapshots at the interval passed to
//! `World::run_ticks` / `World::run_until`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ts_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! world.run_ticks(3_600, 1_000.0, 60, &mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{StationSnapshotRow, TickSummaryRow, VehicleSnapshotRow};
pub use writer::OutputWriter;
