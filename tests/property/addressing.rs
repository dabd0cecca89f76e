// Copyright (c) 2025 - Cowboy AI, Inc.
//! Properties of bulk VLAN creation and deletion

use mpls_inventory::domain::L2Domain;
use mpls_inventory::Inventory;
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("Failed to build runtime")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Deleting `[a, b)` removes exactly the overlap with the created range
    #[test]
    fn range_delete_removes_the_overlap(
        start in 2i64..200,
        len in 1i64..40,
        del_start in 0i64..260,
        del_len in 1i64..60,
    ) {
        let end = start + len;
        let del_end = del_start + del_len;
        let overlap = (end.min(del_end) - start.max(del_start)).max(0);

        let (created, removed, left) = runtime().block_on(async {
            let inventory = Inventory::in_memory();
            let domain = inventory
                .addressing
                .create_l2domain(L2Domain::named("DC1"))
                .await
                .unwrap();
            let created = inventory
                .addressing
                .create_vlan_range(domain.id, start, end)
                .await
                .unwrap()
                .len();
            let removed = inventory
                .addressing
                .delete_vlan_range(domain.id, del_start, del_end)
                .await
                .unwrap_or(0);
            let left = inventory.addressing.list_vlans(0).await.unwrap().len();
            (created, removed, left)
        });

        prop_assert_eq!(created as i64, len);
        prop_assert_eq!(removed as i64, overlap);
        prop_assert_eq!(left as i64, len - overlap);
    }

    /// A range overlapping an existing one writes nothing
    #[test]
    fn overlapping_range_is_all_or_nothing(start in 2i64..100, len in 1i64..30, shift in 0i64..29) {
        let shift = shift.min(len - 1);
        let count = runtime().block_on(async {
            let inventory = Inventory::in_memory();
            let domain = inventory
                .addressing
                .create_l2domain(L2Domain::named("DC1"))
                .await
                .unwrap();
            inventory
                .addressing
                .create_vlan_range(domain.id, start, start + len)
                .await
                .unwrap();
            let second = inventory
                .addressing
                .create_vlan_range(domain.id, start + shift, start + shift + len)
                .await;
            assert_eq!(second.unwrap_err().kind(), "already_exists");
            inventory.addressing.list_vlans(0).await.unwrap().len()
        });
        prop_assert_eq!(count as i64, len);
    }
}
