use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use super::{Answer, ApiClient};
use crate::{
    error::{Error, Result},
    xml::Args,
};

/// Recorded when the service answered without the fragment an operation reads.
pub const UNEXPECTED_ANSWER: i64 = -1;

/// What every sub-API carries around: the shared client, the last answer,
/// and an explicitly recorded error code.
#[derive(Debug, Clone)]
pub struct ApiState {
    client: Arc<ApiClient>,
    answer: Option<Answer>,
    error_code: Option<i64>,
}

impl ApiState {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            answer: None,
            error_code: None,
        }
    }
}

/// Behavior shared by the domain APIs (partners, deliveries, ...).
///
/// Implementors only expose their [`ApiState`]; calling methods, keeping
/// the answer, and error bookkeeping come for free.
pub trait ApiClass {
    fn state(&self) -> &ApiState;

    fn state_mut(&mut self) -> &mut ApiState;

    fn client(&self) -> &Arc<ApiClient> {
        &self.state().client
    }

    /// The answer of the last successful call.
    fn answer(&self) -> Option<&Answer> {
        self.state().answer.as_ref()
    }

    /// Calls `method` and keeps its answer.
    ///
    /// Returns `Ok(false)` when no usable answer came back. The cause is
    /// logged and otherwise dropped. Invalid arguments are still errors.
    fn call_method(&mut self, method: &str, args: &Args) -> Result<bool> {
        let answer = match self.client().call_method(method, args) {
            Ok(answer) => Some(answer),
            Err(Error::Answer(error)) => {
                warn!(method, %error, "API call failed");
                None
            }
            Err(error) => return Err(error),
        };

        self.state_mut().answer = answer;
        Ok(!self.has_error())
    }

    /// Whether the last call left us without an answer.
    fn has_error(&self) -> bool {
        self.state().answer.is_none()
    }

    /// Records an error code to be reported by [`ApiClass::last_error_code`].
    fn set_error_code(&mut self, code: i64) {
        self.state_mut().error_code = Some(code);
    }

    /// Returns the last error code.
    ///
    /// An explicitly recorded code is handed out once and then forgotten.
    /// Otherwise this is the error code of the last answer, if there is one.
    fn last_error_code(&mut self) -> Option<i64> {
        if let Some(code) = self.state_mut().error_code.take() {
            return Some(code);
        }

        self.answer().and_then(Answer::error_code)
    }

    /// Flags that the answer lacked what the operation needed, unless the
    /// service already explained itself with an error code of its own.
    fn unexpected_answer(&mut self) {
        let reported = self.answer().is_some_and(|answer| !answer.is_success());
        if !reported {
            self.set_error_code(UNEXPECTED_ANSWER);
        }
    }

    /// Returns `answer[root_key][item_key]` as a list.
    ///
    /// The decoded XML holds a single item as a bare object and several as an
    /// array. Either way this gives back a list, empty when the item is
    /// missing or isn't composite.
    fn return_as_array_list(&self, root_key: &str, item_key: &str) -> Vec<Value> {
        let Some(items) = self
            .answer()
            .and_then(|answer| answer.lookup(&[root_key, item_key]))
        else {
            return Vec::new();
        };

        match items {
            Value::Array(items) => items.clone(),
            Value::Object(_) => vec![items.clone()],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::{
        args,
        config::{Credentials, Environment},
        error::TransportError,
    };

    struct Sample {
        state: ApiState,
    }

    impl ApiClass for Sample {
        fn state(&self) -> &ApiState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ApiState {
            &mut self.state
        }
    }

    /// Answers with the body named by the request's `reply` argument.
    fn scripted(_: &Url, _: &str, body: &[u8]) -> std::result::Result<Vec<u8>, TransportError> {
        let request = String::from_utf8_lossy(body);
        let reply = match request.split("<reply>").nth(1).and_then(|rest| rest.split("</reply>").next()) {
            Some("single") => "<answer><error>0</error><root><item><id>1</id></item></root></answer>",
            Some("many") => "<answer><error>0</error><root><item><id>1</id></item><item><id>2</id></item></root></answer>",
            Some("empty_root") => "<answer><error>0</error><root/></answer>",
            Some("text_item") => "<answer><error>0</error><root><item>plain</item></root></answer>",
            Some("service_error") => "<answer><error>4</error></answer>",
            Some("garbage") => "<<<",
            _ => {
                return Err(TransportError::Status {
                    status: 500,
                    body: String::new(),
                })
            }
        };
        Ok(reply.as_bytes().to_vec())
    }

    fn sample() -> Sample {
        let credentials = Credentials::new("testkey", Environment::Test).unwrap();
        let client = ApiClient::with_transport(credentials, Environment::Test.base_url(), scripted);
        Sample {
            state: ApiState::new(Arc::new(client)),
        }
    }

    fn call(sample: &mut Sample, reply: &str) -> bool {
        sample.call_method("sample", &args! { "reply" => reply }).unwrap()
    }

    #[test]
    fn wraps_a_single_item() {
        let mut sample = sample();
        assert!(call(&mut sample, "single"));
        assert_eq!(sample.return_as_array_list("root", "item"), vec![json!({ "id": "1" })]);
    }

    #[test]
    fn keeps_a_list_of_items() {
        let mut sample = sample();
        assert!(call(&mut sample, "many"));
        assert_eq!(
            sample.return_as_array_list("root", "item"),
            vec![json!({ "id": "1" }), json!({ "id": "2" })]
        );
    }

    #[test]
    fn missing_or_scalar_items_are_empty() {
        let mut sample = sample();
        assert!(call(&mut sample, "empty_root"));
        assert!(sample.return_as_array_list("root", "item").is_empty());
        assert!(sample.return_as_array_list("missing", "item").is_empty());

        assert!(call(&mut sample, "text_item"));
        assert!(sample.return_as_array_list("root", "item").is_empty());
    }

    #[test]
    fn failures_clear_the_answer() {
        let mut sample = sample();
        assert!(call(&mut sample, "single"));
        assert!(!sample.has_error());

        assert!(!call(&mut sample, "garbage"));
        assert!(sample.has_error());
        assert!(sample.answer().is_none());
        assert!(sample.return_as_array_list("root", "item").is_empty());

        assert!(!call(&mut sample, "unreachable"));
        assert!(sample.has_error());
        assert_eq!(sample.last_error_code(), None);
    }

    #[test]
    fn invalid_arguments_are_not_swallowed() {
        let mut sample = sample();
        assert!(matches!(
            sample.call_method("", &Args::new()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn explicit_error_code_is_read_once() {
        let mut sample = sample();
        assert!(call(&mut sample, "service_error"));
        sample.set_error_code(99);

        assert_eq!(sample.last_error_code(), Some(99));
        // Falls through to the answer afterwards.
        assert_eq!(sample.last_error_code(), Some(4));
        assert_eq!(sample.last_error_code(), Some(4));
    }

    #[test]
    fn unexpected_answer_defers_to_service_errors() {
        let mut sample = sample();
        assert!(call(&mut sample, "service_error"));
        sample.unexpected_answer();
        assert_eq!(sample.last_error_code(), Some(4));

        assert!(call(&mut sample, "empty_root"));
        sample.unexpected_answer();
        assert_eq!(sample.last_error_code(), Some(UNEXPECTED_ANSWER));
        assert_eq!(sample.last_error_code(), Some(0));
    }
}
