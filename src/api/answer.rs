use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AnswerError;

/// Key of the service-reported error code within an answer.
const ERROR_KEY: &str = "error";

/// The decoded `<answer>` of a single API call.
///
/// Every method answers with its own shape, so the payload is kept as a
/// generic tree. Values are strings as sent by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    data: Map<String, Value>,
}

impl Answer {
    /// Wraps the decoded `<answer>` node.
    ///
    /// Only a non-empty element with children makes an answer. Anything
    /// else (an empty element, bare text) is treated as no answer at all.
    pub fn new(answer: Value) -> Result<Self, AnswerError> {
        match answer {
            Value::Object(data) if !data.is_empty() => Ok(Self { data }),
            _ => Err(AnswerError::EmptyAnswer),
        }
    }

    /// The error code the service reported, if any.
    ///
    /// `None` when there is no `error` element or it isn't numeric.
    pub fn error_code(&self) -> Option<i64> {
        match self.data.get(ERROR_KEY)? {
            Value::String(code) => code.trim().parse().ok(),
            Value::Number(code) => code.as_i64(),
            _ => None,
        }
    }

    /// Whether the service reported no error (a missing code or `0`).
    pub fn is_success(&self) -> bool {
        matches!(self.error_code(), None | Some(0))
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Walks nested objects, e.g. `["partners", "partner"]`.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.data.get(*first)?, |value, key| value.get(key))
    }

    /// Deserializes the value under `key` into a typed record.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> serde_json::Result<Option<T>> {
        self.data
            .get(key)
            .map(|value| T::deserialize(value))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn answer(value: Value) -> Answer {
        Answer::new(value).unwrap()
    }

    #[test]
    fn only_non_empty_objects_are_answers() {
        assert!(matches!(Answer::new(json!("")), Err(AnswerError::EmptyAnswer)));
        assert!(matches!(Answer::new(json!("text")), Err(AnswerError::EmptyAnswer)));
        assert!(matches!(Answer::new(json!({})), Err(AnswerError::EmptyAnswer)));
        assert!(Answer::new(json!({ "error": "0" })).is_ok());
    }

    #[test]
    fn reads_error_code() {
        assert_eq!(answer(json!({ "error": "0" })).error_code(), Some(0));
        assert_eq!(answer(json!({ "error": " 12 " })).error_code(), Some(12));
        assert_eq!(answer(json!({ "error": 3 })).error_code(), Some(3));
        assert_eq!(answer(json!({ "error": "oops" })).error_code(), None);
        assert_eq!(answer(json!({ "partners": "" })).error_code(), None);
    }

    #[test]
    fn success_means_no_error_code() {
        assert!(answer(json!({ "error": "0" })).is_success());
        assert!(answer(json!({ "partners": "" })).is_success());
        assert!(!answer(json!({ "error": "7" })).is_success());
    }

    #[test]
    fn lookup_walks_nested_objects() {
        let answer = answer(json!({ "partners": { "partner": { "id": "5" } } }));
        assert_eq!(
            answer.lookup(&["partners", "partner", "id"]),
            Some(&json!("5"))
        );
        assert_eq!(answer.lookup(&["partners", "missing"]), None);
        assert_eq!(answer.lookup(&[]), None);
    }

    #[test]
    fn deserializes_typed_records() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct City {
            code_id: String,
            name: String,
        }

        let answer = answer(json!({ "city": { "code_id": "405065", "name": "Moscow" } }));
        let city: Option<City> = answer.get_as("city").unwrap();
        assert_eq!(
            city,
            Some(City {
                code_id: "405065".into(),
                name: "Moscow".into()
            })
        );
        assert_eq!(answer.get_as::<City>("missing").unwrap(), None);
    }
}
