//! The `World` struct: tick entry point, mutation surface, queries.

use log::{debug, info, warn};

use ts_core::{
    CoreError, Economy, LineId, Position, SimClock, SimConfig, SimRng, StationId, Stats, VehicleId,
    VehicleTypeId,
};
use ts_demand::{refresh_itineraries, reroute_stranded, PassengerGenerator, RefreshReport};
use ts_fleet::{Fleet, FleetError, Line, Schedule, TickContext, Vehicle, VehicleInfo};
use ts_network::{HopRouter, Network, NetworkError, Pathfinder, Router, Station};

use crate::{SimError, SimObserver, SimResult, TickReport};

// ── World ─────────────────────────────────────────────────────────────────────

/// The simulation controller.
///
/// `World<R>` owns every piece of mutable state: the graph, the path cache,
/// the fleet, the ledger, the clock and the RNG.  There is no shared or
/// global state; everything goes through `&mut World`.
///
/// One [`advance`](Self::advance) runs, in order:
///
/// 1. **Clock**: convert the wall-clock delta to simulated seconds.
/// 2. **Maintenance**: debit links and vehicles for the elapsed time.
/// 3. **Demand**: station activation, passenger arrivals.
/// 4. **Vehicles**: every vehicle on every non-inert line, in line order.
/// 5. **Settlement**: ticket revenue, served counter, re-routing of
///    passengers dropped off away from their itinerary.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World<R: Router = HopRouter> {
    pub config:     SimConfig,
    pub clock:      SimClock,
    /// Number of `advance` calls so far.
    pub ticks:      u64,
    pub economy:    Economy,
    pub network:    Network,
    pub pathfinder: Pathfinder<R>,
    pub generator:  PassengerGenerator,
    pub fleet:      Fleet,
    pub rng:        SimRng,
}

impl<R: Router> World<R> {
    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the world by `elapsed_ms` of wall-clock time.
    ///
    /// Negative deltas are treated as 0.  Never fails: anomalies degrade a
    /// single vehicle or passenger and show up in the report.
    pub fn advance(&mut self, elapsed_ms: f64) -> TickReport {
        let elapsed_ms = elapsed_ms.max(0.0);
        let elapsed_secs = self.clock.advance(elapsed_ms);
        let now = self.clock.seconds;
        self.ticks += 1;

        // ── Maintenance ───────────────────────────────────────────────────
        let maintenance = self.maintenance_per_sec() * elapsed_secs;
        self.economy.charge(maintenance);

        // ── Demand ────────────────────────────────────────────────────────
        let demand = self.generator.tick(
            elapsed_secs,
            now,
            &mut self.network,
            &mut self.pathfinder,
            &mut self.rng,
            &mut self.economy,
        );

        // ── Vehicles ──────────────────────────────────────────────────────
        let ctx = TickContext {
            now,
            elapsed_ms,
            multiplier: self.clock.multiplier,
            capacity:   self.config.capacity_policy,
        };
        let fleet = self.fleet.tick(&mut self.network, &ctx);

        // ── Settlement ────────────────────────────────────────────────────
        let ticket_revenue = fleet.boarded as f64 * self.config.prices.ticket;
        self.economy.credit(ticket_revenue);
        self.economy.stats.passengers_served += fleet.served as u64;

        let mut stranded = fleet.stranded_at;
        stranded.sort_unstable();
        stranded.dedup();
        for station in stranded {
            let n = reroute_stranded(&mut self.network, &mut self.pathfinder, station);
            debug!("re-routed {n} passengers dropped at {station}");
        }

        let mut overcrowding = demand.overcrowding;
        overcrowding.extend(fleet.overcrowding);

        TickReport {
            tick: self.ticks,
            now,
            elapsed_secs,
            activated: demand.activated,
            created: demand.created,
            unroutable: demand.unroutable,
            boarded: fleet.boarded,
            served: fleet.served,
            trip_secs: fleet.trip_secs,
            departed: fleet.departed,
            arrivals: fleet.arrivals,
            ticket_revenue,
            maintenance,
            money: self.economy.money,
            stalled: fleet.stalled,
            overcrowding,
        }
    }

    /// [`advance`](Self::advance) wrapped in observer callbacks.
    pub fn advance_with<O: SimObserver>(&mut self, elapsed_ms: f64, observer: &mut O) -> TickReport {
        observer.on_tick_start(&self.clock);
        let report = self.advance(elapsed_ms);
        observer.on_tick_end(&report);
        report
    }

    /// Run exactly `n` ticks of `frame_ms` each.
    ///
    /// `on_snapshot` fires every `snapshot_every` ticks (never when 0).
    pub fn run_ticks<O: SimObserver>(
        &mut self,
        n:              u64,
        frame_ms:       f64,
        snapshot_every: u64,
        observer:       &mut O,
    ) {
        for _ in 0..n {
            self.step(frame_ms, snapshot_every, observer);
        }
        observer.on_run_end(&self.clock);
    }

    /// Run ticks of `frame_ms` until the clock reaches `end_secs`.  Returns
    /// the number of ticks run.
    ///
    /// Fails when a frame advances no simulated time (zero multiplier or
    /// non-positive frame) and the clock is not yet at `end_secs`.
    pub fn run_until<O: SimObserver>(
        &mut self,
        end_secs:       f64,
        frame_ms:       f64,
        snapshot_every: u64,
        observer:       &mut O,
    ) -> SimResult<u64> {
        if self.clock.seconds < end_secs && self.clock.scaled_secs(frame_ms) <= 0.0 {
            return Err(CoreError::Config(format!(
                "frame of {frame_ms} ms at x{} never reaches {end_secs} s",
                self.clock.multiplier
            ))
            .into());
        }
        let mut n = 0;
        while self.clock.seconds < end_secs {
            self.step(frame_ms, snapshot_every, observer);
            n += 1;
        }
        observer.on_run_end(&self.clock);
        Ok(n)
    }

    fn step<O: SimObserver>(&mut self, frame_ms: f64, snapshot_every: u64, observer: &mut O) {
        self.advance_with(frame_ms, observer);
        if snapshot_every > 0 && self.ticks.is_multiple_of(snapshot_every) {
            observer.on_snapshot(&self.clock, &self.network, &self.fleet, &self.economy);
        }
    }

    /// Hourly maintenance of everything owned, per simulated second.
    pub fn maintenance_per_sec(&self) -> f64 {
        let p = &self.config.prices;
        let links = self.network.link_count() as f64 * p.link.maintain;
        let vehicles = self.fleet.vehicle_count() as f64 * p.vehicle.maintain;
        (links + vehicles) / 3_600.0
    }

    pub fn set_multiplier(&mut self, multiplier: f64) {
        self.clock.multiplier = multiplier.max(0.0);
    }

    // ── Links ─────────────────────────────────────────────────────────────

    /// Buy a connection between `a` and `b`.
    pub fn create_link(&mut self, a: StationId, b: StationId) -> SimResult<RefreshReport> {
        self.check_stations(&[a, b])?;
        if a == b {
            return Err(NetworkError::SelfLink(a).into());
        }
        if self.network.has_link(a, b) {
            return Err(SimError::AlreadyLinked { a, b });
        }
        self.buy_links(&[(a, b)])?;
        Ok(self.refresh(&[a, b]))
    }

    /// Remove the connection between `a` and `b`.  Nothing is refunded.
    ///
    /// Vehicles already on the link finish crossing it; vehicles that need
    /// it later stall.
    pub fn delete_link(&mut self, a: StationId, b: StationId) -> SimResult<RefreshReport> {
        self.network.disconnect(a, b)?;
        self.pathfinder.link_removed(a, b);
        Ok(self.refresh(&[a, b]))
    }

    // ── Lines ─────────────────────────────────────────────────────────────

    /// Create a line, buying any link its sequence needs.
    ///
    /// The links are paid for up front as one purchase: if the balance does
    /// not cover all of them, nothing is created.
    pub fn add_line(
        &mut self,
        name:        impl Into<String>,
        color:       impl Into<String>,
        station_ids: Vec<StationId>,
        schedule:    Schedule,
    ) -> SimResult<LineId> {
        let draft = Line::new(LineId::INVALID, name, color, station_ids);
        self.check_stations(&draft.station_ids)?;
        let missing = self.missing_links(&draft);
        self.buy_links(&missing)?;

        let Line { name, color, station_ids, .. } = draft;
        let id = self.fleet.add_line(name, color, station_ids.clone(), schedule);
        self.sync_membership(id, &[], &station_ids);
        self.refresh(&station_ids);
        debug!("line {id} created with {} stations", station_ids.len());
        Ok(id)
    }

    /// Replace name, color, visibility, station sequence and schedule of
    /// line `line.id`, buying any link the new sequence needs.
    pub fn edit_line(&mut self, line: Line, schedule: Schedule) -> SimResult<()> {
        let id = line.id;
        self.line_or_err(id)?;
        self.check_stations(&line.station_ids)?;
        let missing = self.missing_links(&line);
        self.buy_links(&missing)?;

        let new_ids = line.station_ids.clone();
        let previous = self.fleet.edit_line(line, schedule)?;
        self.sync_membership(id, &previous.station_ids, &new_ids);

        let changed: Vec<StationId> = previous
            .station_ids
            .iter()
            .filter(|s| !new_ids.contains(s))
            .chain(new_ids.iter().filter(|s| !previous.station_ids.contains(s)))
            .copied()
            .collect();
        self.refresh(&changed);
        Ok(())
    }

    /// Append `station` to the end of `line`.
    pub fn add_station_to_line(&mut self, line: LineId, station: StationId) -> SimResult<()> {
        let mut draft = self.line_or_err(line)?.clone();
        draft.push_station(station);
        self.reshape_line(draft, station)
    }

    /// Insert `station` so that it ends up at `index` (`index == len`
    /// appends).
    pub fn insert_station_in_line(
        &mut self,
        line:    LineId,
        station: StationId,
        index:   usize,
    ) -> SimResult<()> {
        let mut draft = self.line_or_err(line)?.clone();
        if !draft.insert_station(index, station) {
            return Err(FleetError::IndexOutOfRange { line, index, len: draft.len() }.into());
        }
        self.reshape_line(draft, station)
    }

    /// Remove every occurrence of `station` from `line`, linking the
    /// stations that become adjacent if needed.  Returns `false` when the
    /// station was not on the line.
    pub fn remove_station_from_line(&mut self, line: LineId, station: StationId) -> SimResult<bool> {
        let mut draft = self.line_or_err(line)?.clone();
        if !draft.remove_station(station) {
            return Ok(false);
        }
        self.reshape_line(draft, station)?;
        Ok(true)
    }

    /// Swap in the station sequence of the edited copy `draft`.  `touched`
    /// is the station whose itineraries are refreshed.
    fn reshape_line(&mut self, draft: Line, touched: StationId) -> SimResult<()> {
        self.check_stations(&draft.station_ids)?;
        let missing = self.missing_links(&draft);
        self.buy_links(&missing)?;

        let line = draft.id;
        let l = self.fleet.line_mut(line)?;
        let previous = std::mem::replace(&mut l.station_ids, draft.station_ids);
        let current = l.station_ids.clone();
        self.sync_membership(line, &previous, &current);
        self.refresh(&[touched]);
        Ok(())
    }

    // ── Vehicles ──────────────────────────────────────────────────────────

    pub fn add_vehicle_type(&mut self, info: VehicleInfo) -> VehicleTypeId {
        self.fleet.add_vehicle_type(info)
    }

    pub fn edit_vehicle_type(&mut self, id: VehicleTypeId, info: VehicleInfo) -> SimResult<()> {
        Ok(self.fleet.edit_vehicle_type(id, info)?)
    }

    /// Buy a vehicle of `type_id` and attach it to `line`, idle at the origin.
    pub fn add_vehicle(&mut self, type_id: VehicleTypeId, line: LineId) -> SimResult<VehicleId> {
        if self.fleet.vehicle_type(type_id).is_none() {
            return Err(FleetError::VehicleTypeNotFound(type_id).into());
        }
        self.line_or_err(line)?;
        self.spend(self.config.prices.vehicle.buy)?;
        Ok(self.fleet.add_vehicle(type_id, line)?)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.network.station(id)
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.fleet.line(id)
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.fleet.vehicle(id)
    }

    /// Planar position of vehicle `id`.  Idle vehicles sit at their line's
    /// origin.
    pub fn vehicle_position(&self, id: VehicleId) -> Option<Position> {
        let v = self.fleet.vehicle(id)?;
        v.position(&self.network).or_else(|| {
            let origin = *self.fleet.line(v.line)?.station_ids.first()?;
            Some(self.network.station(origin)?.position)
        })
    }

    pub fn is_station_overcrowded(&self, id: StationId) -> Option<bool> {
        self.network.station(id).map(Station::is_overcrowded)
    }

    pub fn is_vehicle_overcrowded(&self, id: VehicleId) -> Option<bool> {
        self.fleet.vehicle(id).map(Vehicle::is_overcrowded)
    }

    /// Memoized shortest path; see [`Pathfinder::find_path`].
    pub fn find_path(&mut self, from: StationId, to: StationId) -> Vec<StationId> {
        self.pathfinder.find_path(&self.network, from, to)
    }

    pub fn waiting_count(&self) -> usize {
        self.network.waiting_count()
    }

    pub fn passengers_aboard(&self) -> usize {
        self.fleet.passengers_aboard()
    }

    /// Passengers created and not yet served.  Always equals
    /// `waiting_count() + passengers_aboard()`.
    pub fn passengers_in_system(&self) -> u64 {
        let s = &self.economy.stats;
        s.passengers_created.saturating_sub(s.passengers_served)
    }

    pub fn money(&self) -> f64 {
        self.economy.money
    }

    /// Bring the passenger counters in line with the passengers actually in
    /// the world.
    ///
    /// Needed when stats and passengers come from different sources, such as
    /// a save whose game data was lost.  Afterwards new ids start above every
    /// live id and `created - served` equals the live count.  Returns `true`
    /// if anything changed.
    pub fn reconcile_passenger_stats(&mut self) -> bool {
        let live = self.waiting_count() + self.passengers_aboard();
        let next_id = self
            .network
            .stations
            .iter()
            .flat_map(|s| s.waiting.iter())
            .chain(self.fleet.vehicles.iter().flatten().flat_map(|v| v.passengers.iter()))
            .map(|p| p.id.0.saturating_add(1))
            .max()
            .unwrap_or(0);

        let before = self.economy.stats.clone();
        let created = before.passengers_created.max(next_id).max(live as u64);
        let reconciled = Stats { passengers_created: created, passengers_served: created - live as u64 };
        if reconciled == before {
            return false;
        }
        warn!(
            "passenger stats reconciled: created {} -> {}, served {} -> {} ({live} live)",
            before.passengers_created,
            reconciled.passengers_created,
            before.passengers_served,
            reconciled.passengers_served,
        );
        self.economy.stats = reconciled;
        true
    }

    pub fn stats(&self) -> &Stats {
        &self.economy.stats
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn check_stations(&self, ids: &[StationId]) -> SimResult<()> {
        match ids.iter().find(|&&s| !self.network.contains(s)) {
            Some(&s) => Err(CoreError::StationNotFound(s).into()),
            None => Ok(()),
        }
    }

    fn line_or_err(&self, id: LineId) -> SimResult<&Line> {
        self.fleet.line(id).ok_or_else(|| FleetError::LineNotFound(id).into())
    }

    /// Debit a purchase, or fail without touching the balance.
    fn spend(&mut self, price: f64) -> SimResult<()> {
        if self.economy.try_spend(price) {
            Ok(())
        } else {
            Err(SimError::InsufficientFunds { price, balance: self.economy.money })
        }
    }

    /// Links `line` needs that do not exist yet, each pair once.
    fn missing_links(&self, line: &Line) -> Vec<(StationId, StationId)> {
        let mut out: Vec<(StationId, StationId)> = Vec::new();
        for (a, b) in line.required_links() {
            if a == b || self.network.has_link(a, b) || out.contains(&(a, b)) || out.contains(&(b, a)) {
                continue;
            }
            out.push((a, b));
        }
        out
    }

    /// Pay for and create every connection in `pairs`, or none of them.
    ///
    /// The endpoints must have been checked: the total is debited before
    /// the first connection is made.
    fn buy_links(&mut self, pairs: &[(StationId, StationId)]) -> SimResult<()> {
        if pairs.is_empty() {
            return Ok(());
        }
        self.spend(self.config.prices.link.buy * pairs.len() as f64)?;
        for &(a, b) in pairs {
            self.network.connect(a, b)?;
            self.pathfinder.link_added(a, b);
        }
        Ok(())
    }

    fn sync_membership(&mut self, line: LineId, old: &[StationId], new: &[StationId]) {
        for s in old.iter().filter(|s| !new.contains(s)) {
            if let Some(st) = self.network.station_mut(*s) {
                st.remove_line(line);
            }
        }
        for &s in new {
            if let Some(st) = self.network.station_mut(s) {
                st.add_line(line);
            }
        }
    }

    fn refresh(&mut self, affected: &[StationId]) -> RefreshReport {
        let report = refresh_itineraries(&mut self.network, &mut self.pathfinder, affected);
        if report.rerouted > 0 {
            info!(
                "itinerary refresh: {} re-routed, {} unreachable pairs",
                report.rerouted,
                report.unreachable.len()
            );
        }
        report
    }
}
