//! Passenger transfer between a station queue and a vehicle.
//!
//! Both rules key on the vehicle's *next* scheduled station.  A passenger
//! rides a vehicle only while the stop after the current one on its
//! itinerary is where the vehicle is going next.  Disembarking always runs
//! before boarding at the same station visit.

use ts_core::{CapacityPolicy, Passenger, StationId};
use ts_network::Station;

/// Outcome of [`disembark`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Disembarked {
    /// Reached the end of their itinerary and left the simulation.
    pub served:      usize,
    /// Sum of `served_at - created_at` over the served passengers.
    pub trip_secs:   f64,
    /// Put back on the station queue to continue by another vehicle.
    pub transferred: usize,
    /// Transferred passengers whose itinerary does not pass through the
    /// station; they need a new route from here.
    pub stranded:    usize,
}

/// Drop off the passengers of `aboard` who end their trip at `station` or
/// whose next stop is not `next`.
///
/// `next == None` unloads everyone.  Served passengers are stamped with
/// `now` and discarded; everyone else joins the station queue in the order
/// they were aboard.
pub fn disembark(
    aboard:  &mut Vec<Passenger>,
    station: &mut Station,
    next:    Option<StationId>,
    now:     f64,
) -> Disembarked {
    let here = station.id;
    let mut out = Disembarked::default();

    let (leaving, staying): (Vec<Passenger>, Vec<Passenger>) = std::mem::take(aboard)
        .into_iter()
        .partition(|p| p.ends_at(here) || next.is_none() || p.next_after(here) != next);
    *aboard = staying;

    for mut p in leaving {
        if p.ends_at(here) {
            p.served_at = now;
            out.served += 1;
            out.trip_secs += p.served_at - p.created_at;
            continue;
        }
        if !p.itinerary.contains(&here) {
            out.stranded += 1;
        }
        p.waiting = true;
        station.waiting.push(p);
        out.transferred += 1;
    }
    out
}

/// Move waiting passengers whose next stop is `next` from `station` onto
/// the vehicle.  Returns the number boarded.
///
/// Queue order is preserved for those left behind.  Under
/// [`CapacityPolicy::Enforced`] boarding stops once `aboard` reaches
/// `capacity`; otherwise capacity is ignored.
pub fn board(
    aboard:   &mut Vec<Passenger>,
    capacity: usize,
    station:  &mut Station,
    next:     StationId,
    policy:   CapacityPolicy,
) -> usize {
    let here = station.id;
    let mut boarded = 0;
    let mut i = 0;
    while i < station.waiting.len() {
        if policy == CapacityPolicy::Enforced && aboard.len() >= capacity {
            break;
        }
        if station.waiting[i].next_after(here) == Some(next) {
            let mut p = station.waiting.remove(i);
            p.waiting = false;
            aboard.push(p);
            boarded += 1;
        } else {
            i += 1;
        }
    }
    boarded
}
