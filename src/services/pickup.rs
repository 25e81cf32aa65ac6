use serde_json::Value;

use super::{answer_list, api_class, require};
use crate::{api::ApiClass, args, error::Result, xml::Args};

api_class!(Pickup);

impl Pickup {
    /// Orders a courier to collect goods from the sender's warehouse.
    ///
    /// `pickup` holds the fields of the `<zabor>` request.
    pub fn add(&mut self, pickup: Args) -> Result<Option<Vec<Value>>> {
        let pickup = require("pickup", pickup)?;

        let called = self.call_method(
            "add_zabor",
            &args! { "zabors" => args! { "zabor" => pickup } },
        )?;
        if !called {
            return Ok(None);
        }

        Ok(Some(answer_list(self, "zabors", "zabor")))
    }
}
