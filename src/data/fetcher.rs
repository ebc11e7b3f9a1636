//! Per-horizon fetch and response normalization.
//!
//! The statistics API is not consistent about how it wraps its records, nor
//! about which field carries the operator code. Both are resolved with
//! explicit priority lists; malformed individual records are dropped without
//! failing the fetch.

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::data::endpoints::EndpointTable;
use crate::data::transport::{FetchError, Transport};
use crate::domain::{Horizon, HorizonReturnMap};

/// Envelope keys that may hold the record list, in priority order.
pub const ENVELOPE_KEYS: [&str; 4] = ["datos", "data", "records", "result"];

/// Fields that may hold the operator code, in priority order.
pub const CODE_FIELDS: [&str; 3] = ["operadora", "operador", "codigo_operadora"];

pub struct HorizonFetcher<'a, T: Transport> {
    transport: &'a T,
    endpoints: &'a EndpointTable,
}

impl<'a, T: Transport> HorizonFetcher<'a, T> {
    pub fn new(transport: &'a T, endpoints: &'a EndpointTable) -> Self {
        Self { transport, endpoints }
    }

    /// One network call for `horizon`, normalized into code -> return.
    pub fn fetch(&self, horizon: Horizon) -> Result<HorizonReturnMap, FetchError> {
        let url = self.endpoints.url(horizon);
        debug!(horizon = horizon.label(), %url, "requesting returns");

        let body = self.transport.get_json(&url)?;
        let records = locate_records(&body).map_err(|detail| FetchError::shape(&url, detail))?;
        let returns = extract_returns(records, self.endpoints.field(horizon));

        info!(
            horizon = horizon.label(),
            records = records.len(),
            operators = returns.len(),
            "fetched returns"
        );
        Ok(returns)
    }
}

/// Find the record list: a bare array, or the first envelope key holding an array.
pub fn locate_records(body: &Value) -> Result<&[Value], String> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(obj) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .ok_or_else(|| format!("none of {ENVELOPE_KEYS:?} holds a list")),
        other => Err(format!("expected a list or an object, got {}", json_kind(other))),
    }
}

/// Build code -> return from raw records. Later duplicates overwrite earlier ones.
pub fn extract_returns(records: &[Value], field: &str) -> HorizonReturnMap {
    let mut out = HorizonReturnMap::new();
    let mut skipped = 0usize;

    for (idx, rec) in records.iter().enumerate() {
        match parse_record(rec, field) {
            Ok((code, value)) => {
                out.insert(code, value);
            }
            Err(reason) => {
                skipped += 1;
                debug!(index = idx, reason, "skipping record");
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, kept = out.len(), "records skipped");
    }
    out
}

fn parse_record(rec: &Value, field: &str) -> Result<(String, f64), &'static str> {
    let obj = rec.as_object().ok_or("record is not an object")?;
    let raw_value = obj.get(field).ok_or("missing return field")?;
    let code = record_code(obj).ok_or("missing operator code")?;
    let value = coerce_return(raw_value).ok_or("return value is not numeric")?;
    Ok((code, value))
}

/// First present, non-null code field. Strings are trimmed; numbers use their JSON text.
fn record_code(obj: &Map<String, Value>) -> Option<String> {
    let raw = CODE_FIELDS
        .iter()
        .find_map(|f| obj.get(*f).filter(|v| !v.is_null()))?;

    let code = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!code.is_empty()).then_some(code)
}

/// Numbers pass through; strings must parse with a `.` decimal separator.
fn coerce_return(raw: &Value) -> Option<f64> {
    let v = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Canned(Result<Value, FetchError>);

    impl Transport for Canned {
        fn get_json(&self, _url: &str) -> Result<Value, FetchError> {
            self.0.clone()
        }
    }

    fn fetch(body: Value) -> Result<HorizonReturnMap, FetchError> {
        let transport = Canned(Ok(body));
        let endpoints = EndpointTable::nominal_returns("http://test");
        HorizonFetcher::new(&transport, &endpoints).fetch(Horizon::Short)
    }

    #[test]
    fn bare_list_is_accepted() {
        let map = fetch(json!([{"operadora": "BNV", "rendimiento": 8.75}])).unwrap();
        assert_eq!(map.get("BNV"), Some(&8.75));
    }

    #[test]
    fn envelope_keys_follow_priority() {
        let body = json!({
            "result": [{"operadora": "R", "rendimiento": 1.0}],
            "data": [{"operadora": "D", "rendimiento": 2.0}],
        });
        let map = fetch(body).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("D"), Some(&2.0));
    }

    #[test]
    fn non_list_envelope_value_falls_through() {
        let body = json!({
            "datos": {"not": "a list"},
            "records": [{"operadora": "X", "rendimiento": 3.5}],
        });
        let map = fetch(body).unwrap();
        assert_eq!(map.get("X"), Some(&3.5));
    }

    #[test]
    fn unknown_envelope_is_shape_error() {
        let err = fetch(json!({"foo": [1, 2, 3]})).unwrap_err();
        assert!(matches!(err, FetchError::Shape { .. }));
        assert!(err.to_string().contains("12meses"));

        assert!(matches!(fetch(json!("text")).unwrap_err(), FetchError::Shape { .. }));
        assert!(matches!(fetch(json!(null)).unwrap_err(), FetchError::Shape { .. }));
    }

    #[test]
    fn transport_errors_pass_through() {
        let transport = Canned(Err(FetchError::transport("http://test", "status 503")));
        let endpoints = EndpointTable::nominal_returns("http://test");
        let err = HorizonFetcher::new(&transport, &endpoints).fetch(Horizon::Long).unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[test]
    fn non_numeric_value_is_skipped() {
        let body = json!({"datos": [
            {"operador": "C1", "rendimiento": "n/a"},
            {"operador": "C2", "rendimiento": "7.25"},
        ]});
        let map = fetch(body).unwrap();
        assert!(!map.contains_key("C1"));
        assert_eq!(map.get("C2"), Some(&7.25));
    }

    #[test]
    fn duplicate_codes_last_write_wins() {
        let body = json!([
            {"operadora": "C1", "rendimiento": 1.0},
            {"operadora": "C1", "rendimiento": 2.0},
        ]);
        let map = fetch(body).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("C1"), Some(&2.0));
    }

    #[test]
    fn code_fields_fall_back_in_order() {
        let records = vec![
            json!({"operadora": "A", "operador": "B", "rendimiento": 1.0}),
            json!({"operadora": null, "operador": " B ", "rendimiento": 2.0}),
            json!({"codigo_operadora": 7, "rendimiento": 3.0}),
        ];
        let map = extract_returns(&records, "rendimiento");
        assert_eq!(map.get("A"), Some(&1.0));
        assert_eq!(map.get("B"), Some(&2.0));
        assert_eq!(map.get("7"), Some(&3.0));
    }

    #[test]
    fn malformed_records_are_dropped() {
        let records = vec![
            json!(42),
            json!({"rendimiento": 1.0}),
            json!({"operadora": "   ", "rendimiento": 1.0}),
            json!({"operadora": "X"}),
            json!({"operadora": "Y", "rendimiento": null}),
            json!({"operadora": "Z", "rendimiento": true}),
            json!({"operadora": ["W"], "rendimiento": 1.0}),
            json!({"operadora": "NAN", "rendimiento": "NaN"}),
            json!({"operadora": "OK", "rendimiento": " 6.5 "}),
        ];
        let map = extract_returns(&records, "rendimiento");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("OK"), Some(&6.5));
    }

    #[test]
    fn comma_decimal_strings_are_not_guessed() {
        let records = vec![json!({"operadora": "X", "rendimiento": "8,75"})];
        assert!(extract_returns(&records, "rendimiento").is_empty());
    }

    #[test]
    fn codes_are_case_sensitive() {
        let records = vec![
            json!({"operadora": "bnv", "rendimiento": 1.0}),
            json!({"operadora": "BNV", "rendimiento": 2.0}),
        ];
        let map = extract_returns(&records, "rendimiento");
        assert_eq!(map.len(), 2);
    }
}
