//! Property-based tests for the core guarantees: typed values survive an
//! encode/decode cycle, map structure is preserved level for level, and the
//! lookup cursor never leaves the table.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_tabkv::{from_str, to_string, Decoder, Encoder, FromText, ToText};
use std::collections::BTreeMap;

fn roundtrip_text<T>(value: &T) -> Option<T>
where
    T: ToText + FromText,
{
    let mut encoder = Encoder::new();
    encoder.pair("k", value);
    let decoder = Decoder::parse(&encoder.content());
    decoder.get("k").parse::<T>()
}

fn roundtrip_serde<T>(value: &T) -> bool
where
    T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Inner {
    count: u32,
    label: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Record {
    id: i64,
    ratio: f64,
    enabled: bool,
    inner: Inner,
}

proptest! {
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert_eq!(roundtrip_text(&n), Some(n));
    }

    #[test]
    fn prop_u64(n in any::<u64>()) {
        prop_assert_eq!(roundtrip_text(&n), Some(n));
    }

    #[test]
    fn prop_f64(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert_eq!(roundtrip_text(&f), Some(f));
    }

    #[test]
    fn prop_f32(f in any::<f32>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert_eq!(roundtrip_text(&f), Some(f));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert_eq!(roundtrip_text(&b), Some(b));
    }

    // Any single-line string survives, leading and trailing spaces included
    #[test]
    fn prop_single_line_string(s in "[^\r\n]{0,40}") {
        prop_assert_eq!(roundtrip_text(&s), Some(s.clone()));
    }

    #[test]
    fn prop_last_write_wins(first in any::<i32>(), second in any::<i32>()) {
        let mut encoder = Encoder::new();
        encoder.pair("k", first).pair("k", second);
        let decoder = Decoder::parse(&encoder.content());
        prop_assert_eq!(decoder.level(0).map(|level| level.len()), Some(1));
        prop_assert_eq!(decoder.get("k").to::<i32>(), second);
    }

    #[test]
    fn prop_nested_maps_keep_their_keys(depth in 0usize..8, tab_size in 0usize..12) {
        let mut encoder = Encoder::new();
        encoder.set_tab_size(tab_size);
        for d in 0..depth {
            encoder.begin_map(format!("Map {}", d)).begin_tab().pair("d", d);
        }
        for d in (0..depth).rev() {
            encoder.end_tab().end_map(format!("Map {}", d));
        }

        let mut decoder = Decoder::parse(&encoder.content());
        prop_assert_eq!(decoder.levels().len(), depth + 1);
        prop_assert_eq!(decoder.parse_depth(), 0);

        decoder.set_depth(0);
        for d in 0..depth {
            decoder.push_depth();
            prop_assert_eq!(decoder.get("d").to::<usize>(), d);
        }
    }

    #[test]
    fn prop_cursor_stays_in_table(
        text in "(( ------------- x| ============= x|k: v)\n){0,20}",
        moves in proptest::collection::vec(0u8..3, 0..30),
    ) {
        let mut decoder = Decoder::parse(&text);
        let deepest = decoder.levels().len() - 1;
        for m in moves {
            match m {
                0 => decoder.push_depth(),
                1 => decoder.pop_depth(),
                _ => decoder.set_depth(usize::MAX),
            }
            prop_assert!(decoder.depth() <= deepest);
        }
    }

    #[test]
    fn prop_record(
        id in any::<i64>(),
        ratio in any::<f64>().prop_filter("finite", |f| f.is_finite()),
        enabled in any::<bool>(),
        count in any::<u32>(),
        label in "[a-zA-Z0-9 ]{0,20}",
    ) {
        let record = Record {
            id,
            ratio,
            enabled,
            inner: Inner { count, label },
        };
        prop_assert!(roundtrip_serde(&record));
    }

    #[test]
    fn prop_string_map(map in proptest::collection::btree_map("[a-z]{1,8}", any::<i16>(), 0..10)) {
        let map: BTreeMap<String, i16> = map;
        prop_assert!(roundtrip_serde(&map));
    }
}
