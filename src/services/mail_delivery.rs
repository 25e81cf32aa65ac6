use serde_json::Value;

use super::{answer_list, api_class, require};
use crate::{
    api::ApiClass,
    args,
    error::{Error, Result},
    xml::Args,
};

api_class!(
    /// Deliveries handed over to Russian Post.
    MailDelivery
);

impl MailDelivery {
    /// Calculates postal tariffs to `to_index` for a parcel of `weight` kilograms.
    pub fn get_tariffs(
        &mut self,
        to_index: &str,
        weight: f64,
        declared_value: Option<f64>,
    ) -> Result<Option<Vec<Value>>> {
        let to_index = require("to_index", to_index)?;
        if weight.is_nan() || weight <= 0.0 {
            return Err(Error::invalid("weight must be positive"));
        }

        let called = self.call_method(
            "get_mail_deliveries_tarifs",
            &args! {
                "to_index" => to_index,
                "weight" => weight,
                "declared_value" => declared_value,
            },
        )?;
        if !called {
            return Ok(None);
        }

        Ok(Some(answer_list(self, "tarifs", "tarif")))
    }

    /// Registers postal deliveries. Each entry holds the fields of one `<delivery>`.
    pub fn add(&mut self, deliveries: Vec<Args>) -> Result<Option<Vec<Value>>> {
        let deliveries = require("deliveries", deliveries)?;

        let called = self.call_method(
            "add_mail_delivery",
            &args! { "deliveries" => args! { "delivery" => deliveries } },
        )?;
        if !called {
            return Ok(None);
        }

        Ok(Some(answer_list(self, "deliveries", "delivery")))
    }
}
