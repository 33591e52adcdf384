use serde::{Deserialize, Serialize};
use shardkv_store::codec::{GuidKeyCodec, I64KeyCodec, JsonValueCodec, KeyCodec, ValueCodec};
use shardkv_store::storage_engine::SingleFileStore;
use tempfile::tempdir;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
struct Record {
    name: String,
    count: u32,
}

#[test]
fn json_value_codec_round_trips_structured_values_through_a_store() {
    let dir = tempdir().unwrap();
    let store: SingleFileStore<I64KeyCodec, JsonValueCodec<Record>> = SingleFileStore::open(
        dir.path().join("store.log"),
        I64KeyCodec,
        JsonValueCodec::default(),
        false,
    )
    .unwrap();

    let record = Record {
        name: "widget".to_string(),
        count: 42,
    };
    store.put(&1, &record).unwrap();
    assert_eq!(store.get(&1).unwrap(), Some(record));
}

#[test]
fn json_value_codec_rejects_malformed_bytes() {
    let codec: JsonValueCodec<Record> = JsonValueCodec::default();
    assert!(codec.deserialize(b"not json").is_err());
}

#[test]
fn i64_key_codec_round_trips_negative_and_zero_keys() {
    let codec = I64KeyCodec;
    for key in [i64::MIN, -1, 0, 1, i64::MAX] {
        let encoded = codec.encode(&key);
        assert_eq!(codec.decode(&encoded).unwrap(), key);
    }
}

#[test]
fn guid_key_codec_hash_is_stable_across_instances() {
    let codec_a = GuidKeyCodec;
    let codec_b = GuidKeyCodec;
    let guid = 0x0123_4567_89ab_cdef_0011_2233_4455_6677u128;
    assert_eq!(codec_a.hash64(&guid), codec_b.hash64(&guid));
}
