/// Build the named parameters of an action.
///
/// Evaluates to `Result<Params>`; an argument that cannot be encoded as JSON
/// yields [`AnkiError::InvalidArgument`](crate::AnkiError::InvalidArgument).
///
/// # Example
///
/// ```rust
/// use ankiconnect_core::params;
/// let params = params! { "query" => "deck:Default", "complete" => true }.unwrap();
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::result::Result::<$crate::Params, $crate::AnkiError>::Ok($crate::Params::new())
    };
    ($($key:literal => $value:expr),+ $(,)?) => {
        (|| -> ::std::result::Result<$crate::Params, $crate::AnkiError> {
            let mut params = $crate::Params::new();
            $(
                params.insert($key.to_string(), $crate::request::to_param($key, &$value)?);
            )+
            Ok(params)
        })()
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn test_empty_params() {
        let params = params! {}.unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_params_macro_keeps_keys() {
        let cards = vec![1i64, 2, 3];
        let params = params! {
            "cards" => cards,
            "easeFactors" => [4100, 3900, 2500],
        }
        .unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params["cards"], json!([1, 2, 3]));
        assert_eq!(params["easeFactors"], json!([4100, 3900, 2500]));
    }

    #[test]
    fn test_none_encodes_as_null() {
        let clone_from: Option<i64> = None;
        let params = params! { "cloneFrom" => clone_from }.unwrap();
        assert_eq!(params["cloneFrom"], json!(null));
    }
}
