//! The Paris RER dataset: nine stations and three lines.

use ts_core::{GeoPoint, LineId, MapProjection, StationId};
use ts_fleet::{Fleet, FleetResult, Schedule, VehicleInfo};
use ts_network::{Network, NetworkBuilder};

/// Map corners: north-west of Etoile to south-east of Vincennes.
const MAP_START: GeoPoint = GeoPoint { lat: 48.90, lon: 2.25 };
const MAP_END:   GeoPoint = GeoPoint { lat: 48.78, lon: 2.45 };

/// Station ids in insertion order.
pub const GARE_DE_LYON:   StationId = StationId(0);
pub const CHATELET:       StationId = StationId(1);
pub const ETOILE:         StationId = StationId(2);
pub const AUBER:          StationId = StationId(3);
pub const NATION:         StationId = StationId(4);
pub const GARE_DU_NORD:   StationId = StationId(5);
pub const SAINT_MICHEL:   StationId = StationId(6);
pub const MAISONS_ALFORT: StationId = StationId(7);
pub const VINCENNES:      StationId = StationId(8);

/// Build the nine-station network with its track already laid.
pub fn build_network() -> Network {
    let mut b = NetworkBuilder::new(MapProjection::new(MAP_START, MAP_END));

    b.add_station("Gare de Lyon",   GeoPoint::new(48.844331423536104, 2.3743789755592752));
    b.add_station("Chatelet",       GeoPoint::new(48.86214501019702,  2.3469808486242782));
    b.add_station("Etoile",         GeoPoint::new(48.8740320341854,   2.2954183548242755));
    b.add_station("Auber",          GeoPoint::new(48.872953508800514, 2.3297494951888225));
    b.add_station("Nation",         GeoPoint::new(48.84887653031363,  2.397037739771677));
    b.add_station("Gare du Nord",   GeoPoint::new(48.881041137398256, 2.3553216153040224));
    b.add_station("Saint-Michel",   GeoPoint::new(48.8537757118776,   2.3449661735682734));
    b.add_station("Maisons-Alfort", GeoPoint::new(48.80226232608523,  2.426887820649135));
    b.add_station("Vincennes",      GeoPoint::new(48.84731139381693,  2.4332493504876904));

    b.add_link(GARE_DE_LYON, CHATELET);
    b.add_link(GARE_DE_LYON, NATION);
    b.add_link(GARE_DE_LYON, MAISONS_ALFORT);
    b.add_link(CHATELET,     AUBER);
    b.add_link(CHATELET,     GARE_DU_NORD);
    b.add_link(CHATELET,     SAINT_MICHEL);
    b.add_link(ETOILE,       AUBER);
    b.add_link(NATION,       VINCENNES);

    b.build()
}

/// RER A, B and D with one train each.  B and D start hidden.
///
/// Returns the fleet and the ids of the three lines in that order.
pub fn build_fleet() -> FleetResult<(Fleet, [LineId; 3])> {
    let mut fleet = Fleet::new();
    let mi09 = fleet.add_vehicle_type(VehicleInfo::new("Mi09", 140.0, 1_300));
    let regio = fleet.add_vehicle_type(VehicleInfo::new("Regio 2N", 140.0, 1_300));

    let rer_a = fleet.add_line(
        "RER A",
        "#da291c",
        vec![VINCENNES, NATION, GARE_DE_LYON, CHATELET, AUBER, ETOILE],
        Schedule::new(300.0, 30.0),
    );
    let rer_b = fleet.add_line(
        "RER B",
        "#7ba4db",
        vec![SAINT_MICHEL, CHATELET, GARE_DU_NORD],
        Schedule::new(420.0, 30.0),
    );
    let rer_d = fleet.add_line(
        "RER D",
        "#007a53",
        vec![MAISONS_ALFORT, GARE_DE_LYON, CHATELET, GARE_DU_NORD],
        Schedule::new(420.0, 30.0),
    );
    fleet.line_mut(rer_b)?.hidden = true;
    fleet.line_mut(rer_d)?.hidden = true;

    fleet.add_vehicle(mi09, rer_a)?;
    fleet.add_vehicle(mi09, rer_b)?;
    fleet.add_vehicle(regio, rer_d)?;

    Ok((fleet, [rer_a, rer_b, rer_d]))
}
