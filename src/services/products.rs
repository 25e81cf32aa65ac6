use serde_json::Value;

use super::{answer_list, api_class, require};
use crate::{api::ApiClass, args, error::Result};

api_class!(
    /// Goods stored at ShopLogistics warehouses.
    Products
);

impl Products {
    /// Looks up products by their article numbers.
    pub fn get_products(&mut self, articles: &[&str]) -> Result<Option<Vec<Value>>> {
        let articles = require("articles", articles.to_vec())?;

        let called = self.call_method(
            "get_products_by_article",
            &args! { "products" => args! { "article" => articles } },
        )?;
        if !called {
            return Ok(None);
        }

        Ok(Some(answer_list(self, "products", "product")))
    }

    /// Lists warehouse remains for every product of the account.
    pub fn get_remains(&mut self) -> Result<Option<Vec<Value>>> {
        if !self.call_method("get_products_remains", &args! {})? {
            return Ok(None);
        }

        Ok(Some(answer_list(self, "products", "product")))
    }
}
