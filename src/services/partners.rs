use serde_json::Value;

use super::{api_class, require};
use crate::{api::ApiClass, args, error::Result, xml::Field};

api_class!(
    /// Courier partners serving a route.
    Partners
);

impl Partners {
    /// Lists the courier partners delivering from `from_city` (to `to_city`, if given).
    ///
    /// Returns `Ok(None)` if the call failed. Note that the result is the
    /// `partners/partner` fragment exactly as decoded: a single partner comes
    /// back as a bare object rather than a one-element list.
    pub fn get_partners(
        &mut self,
        from_city: impl Into<Field>,
        to_city: Option<i64>,
    ) -> Result<Option<Value>> {
        let from_city = require("from_city", from_city)?;

        let called = self.call_method(
            "get_all_couriers_partners",
            &args! {
                "from_city_code" => from_city,
                "to_city_code" => to_city,
            },
        )?;
        if !called {
            return Ok(None);
        }

        // TODO: confirm with ShopLogistics whether a lone partner should be
        // normalized into a list like the dictionary lookups are.
        let partners = self
            .answer()
            .and_then(|answer| answer.lookup(&["partners", "partner"]))
            .cloned();
        if partners.is_none() {
            self.unexpected_answer();
        }

        Ok(partners)
    }
}
