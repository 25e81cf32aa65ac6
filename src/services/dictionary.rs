use serde_json::Value;

use super::{answer_list, api_class};
use crate::{api::ApiClass, args, error::Result};

api_class!(
    /// Reference data: cities, metro stations, pickup points and so on.
    Dictionary
);

/// The dictionaries `get_dictionary` serves, and where each keeps its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Cities,
    MetroStations,
    PickupPoints,
    Filials,
    Statuses,
}

impl Kind {
    fn dictionary_type(self) -> &'static str {
        match self {
            Kind::Cities => "city",
            Kind::MetroStations => "metro",
            Kind::PickupPoints => "pickup",
            Kind::Filials => "filials",
            Kind::Statuses => "status",
        }
    }

    /// `(root, item)` keys of the entries within the answer.
    fn entries(self) -> (&'static str, &'static str) {
        match self {
            Kind::Cities => ("cities", "city"),
            Kind::MetroStations => ("metro_stations", "metro_station"),
            Kind::PickupPoints => ("pickups", "pickup"),
            Kind::Filials => ("filials", "filial"),
            Kind::Statuses => ("statuses", "status"),
        }
    }
}

impl Dictionary {
    pub fn get_cities(&mut self) -> Result<Option<Vec<Value>>> {
        self.lookup(Kind::Cities)
    }

    pub fn get_metro_stations(&mut self) -> Result<Option<Vec<Value>>> {
        self.lookup(Kind::MetroStations)
    }

    pub fn get_pickup_points(&mut self) -> Result<Option<Vec<Value>>> {
        self.lookup(Kind::PickupPoints)
    }

    pub fn get_filials(&mut self) -> Result<Option<Vec<Value>>> {
        self.lookup(Kind::Filials)
    }

    pub fn get_statuses(&mut self) -> Result<Option<Vec<Value>>> {
        self.lookup(Kind::Statuses)
    }

    fn lookup(&mut self, kind: Kind) -> Result<Option<Vec<Value>>> {
        let called = self.call_method(
            "get_dictionary",
            &args! { "dictionary_type" => kind.dictionary_type() },
        )?;
        if !called {
            return Ok(None);
        }

        let (root, item) = kind.entries();
        Ok(Some(answer_list(self, root, item)))
    }
}
