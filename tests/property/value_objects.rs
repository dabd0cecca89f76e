// Copyright (c) 2025 - Cowboy AI, Inc.
//! Properties of the network value objects

use mpls_inventory::domain::{path_name, IpAddressWithCidr, VlanNumber, VlanRange, PATH_PREFIX};
use proptest::prelude::*;
use std::net::Ipv4Addr;

proptest! {
    #[test]
    fn vlan_number_accepts_exactly_1_to_4095(n in -10i64..5000) {
        let accepted = VlanNumber::new(n).is_ok();
        prop_assert_eq!(accepted, (1..=4095).contains(&n));
    }

    #[test]
    fn vlan_number_deserializes_like_new(n in -10i64..5000) {
        let decoded = serde_json::from_value::<VlanNumber>(serde_json::json!(n));
        prop_assert_eq!(decoded.is_ok(), VlanNumber::new(n).is_ok());
    }

    #[test]
    fn creation_range_is_bounded_and_ordered(start in -5i64..4100, end in -5i64..4100) {
        let range = VlanRange::for_creation(start, end);
        let valid = start < end && start >= 2 && end <= 4094;
        prop_assert_eq!(range.is_ok(), valid);
        if let Ok(range) = range {
            prop_assert_eq!(range.len() as i64, end - start);
            prop_assert_eq!(range.numbers().count(), range.len());
            prop_assert!(range.numbers().all(|n| range.contains(n)));
            prop_assert!(!range.contains(range.end()));
        }
    }

    #[test]
    fn deletion_range_only_checks_order(start in -100i64..5000, end in -100i64..5000) {
        prop_assert_eq!(VlanRange::for_deletion(start, end).is_ok(), start < end);
    }

    #[test]
    fn same_host_ignores_prefix_length(octets in any::<[u8; 4]>(), a in 0u8..=32, b in 0u8..=32) {
        let host = Ipv4Addr::from(octets);
        let left = IpAddressWithCidr::new(format!("{host}/{a}")).unwrap();
        let right = IpAddressWithCidr::new(format!("{host}/{b}")).unwrap();
        prop_assert!(left.same_host(&right));
        prop_assert_eq!(left.address(), right.address());
    }

    #[test]
    fn path_names_are_prefixed_and_uppercase(name in "[a-z0-9-]{1,16}") {
        let named = path_name(&name);
        prop_assert!(named.starts_with(PATH_PREFIX));
        prop_assert_eq!(named.clone(), named.to_uppercase());
        prop_assert_eq!(&named[PATH_PREFIX.len()..], name.to_uppercase());
    }
}
