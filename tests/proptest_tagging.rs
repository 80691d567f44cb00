//! Property-based tests for the type-tag and decode rules.
//!
//! These run the client against an in-memory store and check both the
//! stored wire form and what comes back out of `fetch_value`.

use proptest::prelude::*;
use serde_json::json;
use status_kv::{AttributeValue, MemoryItemStore, Scalar, StatusClient};

fn client() -> StatusClient<MemoryItemStore> {
    StatusClient::new(MemoryItemStore::with_table("t", "pk"), "t", "pk")
}

fn scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<i64>().prop_map(Scalar::Int),
        ".*".prop_map(Scalar::Str),
    ]
}

proptest! {
    #[test]
    fn string_key_integer_value_wire_form(k in ".*", v in any::<i64>()) {
        let client = client();
        client.store(k.as_str(), v).unwrap();

        let item = client.fetch_raw(k.as_str()).unwrap().unwrap();
        prop_assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({ "pk": {"S": k}, "status": {"N": v.to_string()} })
        );
    }

    #[test]
    fn integer_key_is_tagged_numeric(k in any::<i64>(), v in scalar()) {
        let client = client();
        client.store(k, v).unwrap();

        let item = client.fetch_raw(k).unwrap().unwrap();
        prop_assert_eq!(item.get("pk"), Some(&AttributeValue::N(k.to_string())));
    }

    #[test]
    fn store_then_fetch_value_roundtrips(k in scalar(), v in scalar()) {
        let client = client();
        client.store(&k, &v).unwrap();
        prop_assert_eq!(client.fetch_value(&k).unwrap(), Some(v));
    }

    #[test]
    fn delete_removes_exactly_one_key(a in scalar(), b in scalar()) {
        prop_assume!(a != b);
        let client = client();
        client.store(&a, 1).unwrap();
        client.store(&b, 2).unwrap();

        client.delete(&a).unwrap();
        prop_assert_eq!(client.fetch_value(&a).unwrap(), None);
        prop_assert_eq!(client.fetch_value(&b).unwrap(), Some(Scalar::Int(2)));
    }

    #[test]
    fn string_payload_decodes_unchanged(s in ".*") {
        let attr = AttributeValue::S(s.clone());
        prop_assert_eq!(attr.decode(), Scalar::Str(s));
    }

    #[test]
    fn numeric_payload_decode_never_fails(s in ".*") {
        let attr = AttributeValue::N(s);
        prop_assert!(matches!(attr.decode(), Scalar::Int(_)));
    }

    #[test]
    fn integer_payload_decodes_exactly(n in any::<i64>()) {
        prop_assert_eq!(AttributeValue::N(n.to_string()).decode(), Scalar::Int(n));
    }
}
