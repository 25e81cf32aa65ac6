use serde_json::Value;

use super::{answer_list, api_class, require};
use crate::{
    api::ApiClass,
    args,
    error::{Error, Result},
    xml::{Args, Field},
};

api_class!(
    /// Creating courier deliveries and following them up.
    Delivery
);

/// Parameters of a tariff calculation.
#[derive(Debug, Clone, Default)]
pub struct TariffQuery {
    pub from_city: String,
    pub to_city: String,
    /// Parcel weight in kilograms.
    pub weight: f64,
    pub order_length: Option<u32>,
    pub order_width: Option<u32>,
    pub order_height: Option<u32>,
    /// Restricts the result to a single pickup point.
    pub pickup_place: Option<String>,
}

impl Delivery {
    /// Registers deliveries. Each entry holds the fields of one `<delivery>`.
    ///
    /// Returns the service's per-delivery results.
    pub fn add(&mut self, deliveries: Vec<Args>) -> Result<Option<Vec<Value>>> {
        let deliveries = require("deliveries", deliveries)?;

        let called = self.call_method(
            "add_delivery",
            &args! { "deliveries" => Field::group([("delivery", deliveries)]) },
        )?;
        if !called {
            return Ok(None);
        }

        Ok(Some(answer_list(self, "deliveries", "delivery")))
    }

    /// Calculates delivery tariffs for a route and parcel.
    pub fn get_tariffs(&mut self, query: &TariffQuery) -> Result<Option<Vec<Value>>> {
        let from_city = require("from_city", query.from_city.as_str())?;
        let to_city = require("to_city", query.to_city.as_str())?;
        if query.weight.is_nan() || query.weight <= 0.0 {
            return Err(Error::invalid("weight must be positive"));
        }

        let called = self.call_method(
            "get_deliveries_tarifs",
            &args! {
                "from_city" => from_city,
                "to_city" => to_city,
                "weight" => query.weight,
                "order_length" => query.order_length,
                "order_width" => query.order_width,
                "order_height" => query.order_height,
                "pickup_place" => query.pickup_place.as_deref(),
            },
        )?;
        if !called {
            return Ok(None);
        }

        Ok(Some(answer_list(self, "tarifs", "tarif")))
    }

    /// Looks up the current status of deliveries by their codes.
    pub fn get_status(&mut self, codes: &[&str]) -> Result<Option<Vec<Value>>> {
        let codes = require("codes", codes.to_vec())?;

        let called = self.call_method(
            "get_deliveries_status",
            &args! { "deliveries" => Field::group([("code", codes)]) },
        )?;
        if !called {
            return Ok(None);
        }

        Ok(Some(answer_list(self, "deliveries", "delivery")))
    }
}
