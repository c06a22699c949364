//! Partial-field merge shared by both backends.

use serde_json::Value;

/// Merge `delta` into `existing`, top-level fields only.
///
/// A field present in the delta replaces the stored field wholesale,
/// including sub-records like an order's `location`, which must never be
/// stitched together from two states. Fields absent from the delta keep
/// their stored value.
pub fn merge_fields(existing: &mut Value, delta: &Value) {
    let (Value::Object(base), Value::Object(changes)) = (existing, delta) else {
        return;
    };
    for (key, value) in changes {
        base.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_keeps_untouched_fields() {
        let mut stored = json!({"name": "a", "price": 10.0});
        merge_fields(&mut stored, &json!({"price": 12.5}));
        assert_eq!(stored, json!({"name": "a", "price": 12.5}));
    }

    #[test]
    fn merge_replaces_sub_records_wholesale() {
        let mut stored = json!({
            "location": {"locationId": "A", "qrCodeId": "qr-1"}
        });
        merge_fields(&mut stored, &json!({"location": {"locationId": "B"}}));
        // qrCodeId must not survive from the old sub-record
        assert_eq!(stored, json!({"location": {"locationId": "B"}}));
    }

    #[test]
    fn merge_adds_new_fields() {
        let mut stored = json!({"name": "a"});
        merge_fields(&mut stored, &json!({"updatedAt": "2026-01-01T00:00:00Z"}));
        assert_eq!(stored["updatedAt"], "2026-01-01T00:00:00Z");
    }
}
