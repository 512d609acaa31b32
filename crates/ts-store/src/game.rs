//! The `gamedata` blob: clock, money, prices, settings and stats.

use serde::{Deserialize, Serialize};

use ts_core::{CapacityPolicy, Economy, Prices, Settings, SimClock, Stats};
use ts_network::Router;
use ts_sim::World;

/// Clock state plus the station-activation countdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeData {
    pub seconds:            f64,
    #[serde(alias = "multiplicator")]
    pub multiplier:         f64,
    pub next_station_spawn: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoneyData {
    pub money: f64,
}

/// Everything in a world that is neither graph nor fleet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameData {
    pub time:            TimeData,
    pub economy:         MoneyData,
    #[serde(default)]
    pub prices:          Prices,
    #[serde(default)]
    pub settings:        Settings,
    #[serde(default)]
    pub stats:           Stats,
    #[serde(default)]
    pub capacity_policy: CapacityPolicy,
}

impl GameData {
    pub fn from_world<R: Router>(world: &World<R>) -> Self {
        Self {
            time: TimeData {
                seconds:            world.clock.seconds,
                multiplier:         world.clock.multiplier,
                next_station_spawn: world.generator.next_station_spawn,
            },
            economy:         MoneyData { money: world.economy.money },
            prices:          world.config.prices.clone(),
            settings:        world.generator.settings.clone(),
            stats:           world.economy.stats.clone(),
            capacity_policy: world.config.capacity_policy,
        }
    }

    pub fn clock(&self) -> SimClock {
        SimClock::new(self.time.seconds, self.time.multiplier)
    }

    pub fn economy(&self) -> Economy {
        Economy { money: self.economy.money, stats: self.stats.clone() }
    }
}
