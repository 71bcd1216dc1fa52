// Property tests for request encoding and response envelope decoding

use ankiconnect_core::{parse_envelope, parse_multi, AnkiError, BatchQueue, Params, Request};
use proptest::prelude::*;
use serde_json::{json, Value};

fn action() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z]{0,20}"
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,24}".prop_map(Value::from),
    ]
}

fn params() -> impl Strategy<Value = Params> {
    prop::collection::btree_map("[a-z][a-zA-Z]{0,10}", scalar(), 0..4)
        .prop_map(|fields| fields.into_iter().collect())
}

fn request() -> impl Strategy<Value = Request> {
    (action(), 1u32..8, params()).prop_map(|(action, version, params)| {
        Request::with_params(action, version, params)
    })
}

proptest! {
    #[test]
    fn multi_preserves_call_order(calls in prop::collection::vec(request(), 0..16), version in 1u32..8) {
        let multi = Request::multi(version, &calls);

        prop_assert!(multi.is_multi());
        prop_assert_eq!(multi.call_count(), calls.len());
        let encoded = multi.to_value();
        prop_assert_eq!(&encoded["version"], &json!(version));
        let actions = encoded["params"]["actions"].as_array().cloned().unwrap_or_default();
        for (item, call) in actions.iter().zip(&calls) {
            let decoded: Request = serde_json::from_value(item.clone()).unwrap();
            prop_assert_eq!(&decoded, call);
        }
    }

    #[test]
    fn serialized_request_matches_to_value(call in request()) {
        prop_assert_eq!(serde_json::to_value(&call).unwrap(), call.to_value());
        prop_assert_eq!(call.to_value().get("params").is_some(), !call.params.is_empty());
    }

    #[test]
    fn envelope_with_null_error_yields_result(result in scalar()) {
        prop_assert_eq!(parse_envelope(json!({"error": null, "result": result.clone()})), Ok(result));
    }

    #[test]
    fn envelope_with_string_error_is_api_error(message in "[ -~]{0,40}", result in scalar()) {
        prop_assert_eq!(
            parse_envelope(json!({"error": message.clone(), "result": result})),
            Err(AnkiError::Api(message))
        );
    }

    #[test]
    fn extra_fields_are_protocol_errors(key in "[a-z]{1,8}", value in scalar()) {
        prop_assume!(key != "error" && key != "result");
        let mut envelope = json!({"error": null, "result": 1});
        envelope[key.as_str()] = value;
        prop_assert!(parse_envelope(envelope).unwrap_err().is_protocol());
    }

    #[test]
    fn multi_outcomes_follow_positions(errors in prop::collection::vec(prop::option::of("[a-z]{1,8}"), 0..16)) {
        let items: Vec<Value> = errors
            .iter()
            .enumerate()
            .map(|(i, error)| match error {
                Some(message) => json!({"error": message, "result": null}),
                None => json!({"error": null, "result": i}),
            })
            .collect();

        let outcomes = parse_multi(json!({"error": null, "result": items}), errors.len()).unwrap();

        prop_assert_eq!(outcomes.len(), errors.len());
        for (i, (outcome, error)) in outcomes.into_iter().zip(&errors).enumerate() {
            match error {
                Some(message) => {
                    prop_assert_eq!(outcome, Err(AnkiError::Api(message.clone())));
                }
                None => {
                    prop_assert_eq!(outcome, Ok(json!(i)));
                }
            }
        }
    }

    #[test]
    fn generation_advances_once_per_nonempty_take(sizes in prop::collection::vec(0usize..4, 0..10)) {
        let mut queue = BatchQueue::new();
        let mut advanced = 0u64;
        for size in sizes {
            for _ in 0..size {
                queue.push(Request::new("echo", 6));
            }
            if queue.take().is_some() {
                advanced += 1;
            }
            prop_assert_eq!(queue.generation().get(), advanced);
            prop_assert!(queue.is_empty());
        }
    }
}
