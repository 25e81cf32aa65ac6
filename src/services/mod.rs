//! The domain APIs, one per area of the service.

mod delivery;
mod dictionary;
mod mail_delivery;
mod partners;
mod pickup;
mod products;

use std::sync::Arc;

use serde_json::Value;

use crate::{
    api::{ApiClass, ApiClient},
    error::{Error, Result},
    xml::Field,
};

pub use delivery::{Delivery, TariffQuery};
pub use dictionary::Dictionary;
pub use mail_delivery::MailDelivery;
pub use partners::Partners;
pub use pickup::Pickup;
pub use products::Products;

/// Defines a sub-API type around an [`ApiState`](crate::api::ApiState).
macro_rules! api_class {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            state: $crate::api::ApiState,
        }

        impl $name {
            pub fn new(client: ::std::sync::Arc<$crate::api::ApiClient>) -> Self {
                Self {
                    state: $crate::api::ApiState::new(client),
                }
            }
        }

        impl $crate::api::ApiClass for $name {
            fn state(&self) -> &$crate::api::ApiState {
                &self.state
            }

            fn state_mut(&mut self) -> &mut $crate::api::ApiState {
                &mut self.state
            }
        }
    };
}

pub(crate) use api_class;

/// A sub-API looked up by name through [`ApiClient::get`].
#[derive(Debug, Clone)]
pub enum SubApi {
    Delivery(Delivery),
    Dictionary(Dictionary),
    MailDelivery(MailDelivery),
    Partners(Partners),
    Pickup(Pickup),
    Products(Products),
}

type Constructor = fn(Arc<ApiClient>) -> SubApi;

/// Names [`ApiClient::get`] understands.
static REGISTRY: [(&str, Constructor); 6] = [
    ("delivery", |client| SubApi::Delivery(Delivery::new(client))),
    ("dictionary", |client| SubApi::Dictionary(Dictionary::new(client))),
    ("mail_delivery", |client| SubApi::MailDelivery(MailDelivery::new(client))),
    ("partners", |client| SubApi::Partners(Partners::new(client))),
    ("pickup", |client| SubApi::Pickup(Pickup::new(client))),
    ("products", |client| SubApi::Products(Products::new(client))),
];

pub(crate) fn construct(name: &str, client: Arc<ApiClient>) -> Option<SubApi> {
    REGISTRY
        .iter()
        .find(|(registered, _)| *registered == name)
        .map(|(_, constructor)| constructor(client))
}

impl SubApi {
    /// Every registered name, in registry order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|(name, _)| *name)
    }

    /// The name this sub-API is registered under.
    pub fn name(&self) -> &'static str {
        match self {
            SubApi::Delivery(_) => "delivery",
            SubApi::Dictionary(_) => "dictionary",
            SubApi::MailDelivery(_) => "mail_delivery",
            SubApi::Partners(_) => "partners",
            SubApi::Pickup(_) => "pickup",
            SubApi::Products(_) => "products",
        }
    }

    /// The shared behavior, whichever sub-API this is.
    pub fn as_api_class(&mut self) -> &mut dyn ApiClass {
        match self {
            SubApi::Delivery(api) => api,
            SubApi::Dictionary(api) => api,
            SubApi::MailDelivery(api) => api,
            SubApi::Partners(api) => api,
            SubApi::Pickup(api) => api,
            SubApi::Products(api) => api,
        }
    }

    pub fn into_partners(self) -> Option<Partners> {
        match self {
            SubApi::Partners(api) => Some(api),
            _ => None,
        }
    }

    pub fn into_delivery(self) -> Option<Delivery> {
        match self {
            SubApi::Delivery(api) => Some(api),
            _ => None,
        }
    }

    pub fn into_dictionary(self) -> Option<Dictionary> {
        match self {
            SubApi::Dictionary(api) => Some(api),
            _ => None,
        }
    }

    pub fn into_mail_delivery(self) -> Option<MailDelivery> {
        match self {
            SubApi::MailDelivery(api) => Some(api),
            _ => None,
        }
    }

    pub fn into_pickup(self) -> Option<Pickup> {
        match self {
            SubApi::Pickup(api) => Some(api),
            _ => None,
        }
    }

    pub fn into_products(self) -> Option<Products> {
        match self {
            SubApi::Products(api) => Some(api),
            _ => None,
        }
    }
}

/// Rejects missing values: null, empty or `"0"` text, and empty groups or lists.
/// Whitespace counts as a value.
pub(crate) fn require(name: &str, value: impl Into<Field>) -> Result<Field> {
    let value = value.into();
    let empty = match &value {
        Field::Null => true,
        Field::Text(text) => matches!(text.as_str(), "" | "0"),
        Field::Group(fields) => fields.is_empty(),
        Field::List(items) => items.is_empty(),
    };

    if empty {
        return Err(Error::invalid(format!("{name} must not be empty")));
    }
    Ok(value)
}

/// Reads `answer[root_key][item_key]` as a list, flagging an answer that
/// lacks `root_key` altogether.
pub(crate) fn answer_list<A: ApiClass + ?Sized>(
    api: &mut A,
    root_key: &str,
    item_key: &str,
) -> Vec<Value> {
    if api.answer().and_then(|answer| answer.get(root_key)).is_none() {
        api.unexpected_answer();
    }

    api.return_as_array_list(root_key, item_key)
}
