//! paris: the transit simulator on the Paris RER network.
//!
//! Builds nine stations and the RER A / B / D lines, runs a number of
//! simulated hours at a fixed 60 fps frame, writes CSV output under
//! `output/paris/` and saves the world to `output/paris/save/`.  A later run
//! resumes from that save.
//!
//! ```text
//! paris [HOURS] [CONFIG.json]
//! RUST_LOG=debug paris 2
//! ```

mod network;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};

use ts_core::{SimClock, SimConfig};
use ts_output::{CsvWriter, OutputWriter, SimOutputObserver};
use ts_sim::{SimObserver, TickReport, World, WorldBuilder};
use ts_store::{keys, load_config, load_world, save_world, FileStore, KeyValueStore, SavedWorld};

use network::{build_fleet, build_network};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                 u64 = 42;
const DEFAULT_HOURS:        f64 = 6.0;
const FRAME_MS:             f64 = 1_000.0 / 60.0;
/// One frame is one simulated second at this speed.
const MULTIPLIER:           f64 = 60.0;
const SNAPSHOT_EVERY_TICKS: u64 = 60;
const STARTING_MONEY:       f64 = 20_000.0;
const OUTPUT_DIR:           &str = "output/paris";
const SAVE_DIR:             &str = "output/paris/save";

// ── Observer wrapper to keep totals ───────────────────────────────────────────

#[derive(Default)]
struct Totals {
    ticks:       u64,
    activated:   usize,
    created:     usize,
    served:      usize,
    revenue:     f64,
    maintenance: f64,
    stalls:      usize,
}

struct TotalsObserver<W: OutputWriter> {
    inner:  SimOutputObserver<W>,
    totals: Totals,
}

impl<W: OutputWriter> TotalsObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, totals: Totals::default() }
    }
}

impl<W: OutputWriter> SimObserver for TotalsObserver<W> {
    fn on_tick_start(&mut self, clock: &SimClock) {
        self.inner.on_tick_start(clock);
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        let t = &mut self.totals;
        t.ticks += 1;
        t.activated += report.activated.len();
        t.created += report.created;
        t.served += report.served;
        t.revenue += report.ticket_revenue;
        t.maintenance += report.maintenance;
        t.stalls += report.stalled.len();
        for change in &report.overcrowding {
            let state = if change.overcrowded { "overcrowded" } else { "back to normal" };
            info!("{} {state} at t={:.0}s", change.station, report.now);
        }
        self.inner.on_tick_end(report);
    }

    fn on_snapshot(
        &mut self,
        clock:   &SimClock,
        network: &ts_network::Network,
        fleet:   &ts_fleet::Fleet,
        economy: &ts_core::Economy,
    ) {
        self.inner.on_snapshot(clock, network, fleet, economy);
    }

    fn on_run_end(&mut self, clock: &SimClock) {
        self.inner.on_run_end(clock);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn config_from_args(path: Option<&str>) -> Result<SimConfig> {
    match path {
        Some(p) => load_config(Path::new(p)).with_context(|| format!("reading config {p}")),
        None => Ok(SimConfig {
            seed:           Some(SEED),
            multiplier:     MULTIPLIER,
            starting_money: STARTING_MONEY,
            ..SimConfig::default()
        }),
    }
}

/// A fresh world, or the saved one when `store` holds game data.  Keys the
/// save lacks fall back to the fresh network and fleet.
fn open_world(store: &FileStore, config: SimConfig) -> Result<World> {
    let (fleet, lines) = build_fleet()?;
    let fresh = WorldBuilder::new(config.clone())
        .network(build_network())
        .fleet(fleet)
        .build()?;

    if store.get(keys::GAMEDATA)?.is_none() {
        info!("new game: {} stations, {} lines", fresh.network.station_count(), lines.len());
        return Ok(fresh);
    }
    let base = SavedWorld { game: None, ..SavedWorld::capture(&fresh) };
    let world = load_world(store, config, base)?;
    info!("resumed from {} at {}", store.dir().display(), world.clock);
    Ok(world)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let hours = match args.get(1) {
        Some(h) => h.parse::<f64>().with_context(|| format!("HOURS must be a number, got {h:?}"))?,
        None => DEFAULT_HOURS,
    };
    let config = config_from_args(args.get(2).map(String::as_str))?;

    // 1. World, new or resumed.
    let mut store = FileStore::open(SAVE_DIR)?;
    let mut world = open_world(&store, config)?;

    // 2. A second RER A train, if the budget allows.
    let rer_a = ts_core::LineId(0);
    match world.add_vehicle(ts_core::VehicleTypeId(0), rer_a) {
        Ok(id) => info!("bought {id} for RER A; balance {:.2}", world.money()),
        Err(e) => warn!("no extra train: {e}"),
    }

    // 3. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = TotalsObserver::new(SimOutputObserver::new(writer));

    // 4. Run.
    let end_secs = world.clock.seconds + hours * 3_600.0;
    info!("running {hours} h from {} at x{}", world.clock, world.clock.multiplier);
    let t0 = Instant::now();
    world.run_until(end_secs, FRAME_MS, SNAPSHOT_EVERY_TICKS, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!("output error: {e}");
    }

    // 5. Save.
    save_world(&mut store, &world)?;

    // 6. Summary.
    let t = &obs.totals;
    info!(
        "{} ticks in {:.3} s; now {}",
        t.ticks,
        elapsed.as_secs_f64(),
        world.clock
    );
    info!(
        "stations activated {}, passengers created {}, served {}, in system {}",
        t.activated,
        t.created,
        t.served,
        world.passengers_in_system()
    );
    info!(
        "tickets {:.2}, maintenance {:.2}, balance {:.2}, stall events {}",
        t.revenue,
        t.maintenance,
        world.money(),
        t.stalls
    );

    println!();
    println!("{:<16} {:>8} {:>12}", "Station", "Waiting", "Overcrowded");
    println!("{}", "-".repeat(38));
    for s in world.network.stations.iter().filter(|s| s.spawned) {
        println!(
            "{:<16} {:>8} {:>12}",
            s.name,
            s.waiting.len(),
            if s.is_overcrowded() { "yes" } else { "no" }
        );
    }

    println!();
    println!("{:<8} {:<10} {:<10} {:>8}", "Vehicle", "Line", "State", "Aboard");
    println!("{}", "-".repeat(40));
    for v in world.fleet.iter_vehicles() {
        let line = world.line(v.line).map_or("?", |l| l.name.as_str());
        println!(
            "{:<8} {:<10} {:<10} {:>8}",
            v.id.0,
            line,
            v.state().as_str(),
            v.passengers.len()
        );
    }

    Ok(())
}
