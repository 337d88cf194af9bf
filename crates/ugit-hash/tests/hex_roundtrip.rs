use proptest::prelude::*;
use ugit_hash::hex::{decode_into, encode, is_hex_str};
use ugit_hash::{hasher::Hasher, ObjectId};

proptest! {
    #[test]
    fn decode_recovers_encoded_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let hex = encode(&bytes);
        let mut back = vec![0u8; bytes.len()];
        decode_into(&hex, &mut back).unwrap();
        prop_assert_eq!(back, bytes);
    }

    #[test]
    fn encoded_form_is_lowercase(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
        let hex = encode(&bytes);
        prop_assert_eq!(hex.to_ascii_lowercase(), hex.clone());
        prop_assert!(is_hex_str(&hex));
    }

    #[test]
    fn encoding_doubles_the_length(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        prop_assert_eq!(encode(&bytes).len(), bytes.len() * 2);
    }

    #[test]
    fn uppercased_input_decodes_identically(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
        let hex = encode(&bytes);
        let mut from_lower = vec![0u8; bytes.len()];
        let mut from_upper = vec![0u8; bytes.len()];
        decode_into(&hex, &mut from_lower).unwrap();
        decode_into(&hex.to_ascii_uppercase(), &mut from_upper).unwrap();
        prop_assert_eq!(from_lower, from_upper);
    }

    #[test]
    fn oid_survives_display_and_parse(bytes in proptest::collection::vec(any::<u8>(), 20..=20)) {
        let oid = ObjectId::from_bytes(&bytes).unwrap();
        let parsed: ObjectId = oid.to_hex().parse().unwrap();
        prop_assert_eq!(oid, parsed);
    }

    #[test]
    fn hashing_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(Hasher::digest(&data), Hasher::digest(&data));
    }
}
