use kitchen_dispatch::model::{Courier, Order};
use kitchen_dispatch::policy::PolicyKind;
use kitchen_dispatch::{DispatchConfig, Driver, RunReport};
use proptest::prelude::*;
use std::time::Duration;

fn arb_keyed_policy() -> impl Strategy<Value = PolicyKind> {
    prop_oneof![Just(PolicyKind::KeyedExact), Just(PolicyKind::KeyedIndexed)]
}

fn arb_policy() -> impl Strategy<Value = PolicyKind> {
    prop_oneof![
        Just(PolicyKind::Fifo),
        Just(PolicyKind::KeyedExact),
        Just(PolicyKind::KeyedIndexed)
    ]
}

fn run_paused(policy: PolicyKind, orders: Vec<Order>, couriers: Vec<Courier>) -> RunReport {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();
    let driver = Driver::new(
        DispatchConfig::default()
            .with_policy(policy)
            .with_time_unit(Duration::from_millis(10)),
    );
    runtime.block_on(driver.run(orders, couriers)).unwrap()
}

// ── policies in isolation ────────────────────────────────────────────

proptest! {
    /// Keyed policies never pair an order with a courier of a different duration.
    #[test]
    fn keyed_policies_never_match_unequal_durations(
        kind in arb_keyed_policy(),
        prep in prop::collection::vec(0i64..50, 1..20),
        arrive in prop::collection::vec(0i64..50, 1..20),
    ) {
        let mut policy = kind.build();
        for (i, p) in prep.iter().enumerate() {
            policy.push_ready_order(Order::new(format!("o{i}"), "Prop", p * 2));
        }
        for (i, a) in arrive.iter().enumerate() {
            let courier = Courier::new(format!("c{i}"), a * 2 + 1);
            let key = courier.key();
            policy.push_arrived_courier(courier);
            prop_assert!(policy.take_match(Some(key)).is_none());
        }
        prop_assert_eq!(policy.ready_len(), prep.len());
        prop_assert_eq!(policy.arrived_len(), arrive.len());
    }

    /// FIFO pairs orders and couriers in submission order, whatever their durations.
    #[test]
    fn fifo_pairs_in_submission_order(
        prep in prop::collection::vec(-5i64..50, 1..20),
        arrive in prop::collection::vec(-5i64..50, 1..20),
    ) {
        let mut policy = PolicyKind::Fifo.build();
        for (i, p) in prep.iter().enumerate() {
            policy.push_ready_order(Order::new(format!("o{i}"), "Prop", *p));
        }
        for (i, a) in arrive.iter().enumerate() {
            policy.push_arrived_courier(Courier::new(format!("c{i}"), *a));
        }

        let mut pairs = Vec::new();
        while let Some((order, courier)) = policy.take_match(None) {
            pairs.push((order.id, courier.name));
        }

        let expected: Vec<(String, String)> = (0..prep.len().min(arrive.len()))
            .map(|i| (format!("o{i}"), format!("c{i}")))
            .collect();
        prop_assert_eq!(pairs, expected);
    }

    /// Both keyed variants pick the same pairs for the same arrivals.
    #[test]
    fn keyed_variants_agree(
        prep in prop::collection::vec(0i64..6, 0..24),
        arrive in prop::collection::vec(0i64..6, 0..24),
    ) {
        let mut exact = PolicyKind::KeyedExact.build();
        let mut indexed = PolicyKind::KeyedIndexed.build();
        for (i, p) in prep.iter().enumerate() {
            exact.push_ready_order(Order::new(format!("o{i}"), "Prop", *p));
            indexed.push_ready_order(Order::new(format!("o{i}"), "Prop", *p));
        }
        for (i, a) in arrive.iter().enumerate() {
            let courier = Courier::new(format!("c{i}"), *a);
            let key = Some(courier.key());
            exact.push_arrived_courier(courier.clone());
            indexed.push_arrived_courier(courier);
            let left = exact.take_match(key).map(|(o, c)| (o.id, c.name));
            let right = indexed.take_match(key).map(|(o, c)| (o.id, c.name));
            prop_assert_eq!(left, right);
        }
        prop_assert_eq!(exact.ready_order_ids(), indexed.ready_order_ids());
    }
}

// ── full runs ────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every courier is accounted for once a run finishes, and no more pairs
    /// are made than there were orders or courier trips.
    #[test]
    fn run_accounts_for_every_courier(
        kind in arb_policy(),
        prep in prop::collection::vec(0i64..5, 0..8),
        arrive in prop::collection::vec(0i64..5, 0..5),
    ) {
        let orders: Vec<Order> = prep
            .iter()
            .enumerate()
            .map(|(i, p)| Order::new(format!("o{i}"), "Prop", *p))
            .collect();
        let couriers: Vec<Courier> = arrive
            .iter()
            .enumerate()
            .map(|(i, a)| Courier::new(format!("c{i}"), *a))
            .collect();

        let report = run_paused(kind, orders, couriers);

        let bound = report.stats.orders_submitted.min(report.courier_trips) as u64;
        prop_assert!(report.stats.matches <= bound);
        prop_assert!(report.courier_trips <= prep.len());
        if arrive.is_empty() {
            prop_assert_eq!(report.courier_trips, 0);
        }
        prop_assert_eq!(report.en_route, 0);
        prop_assert_eq!(
            report.free_couriers.len() + report.idle_couriers.len(),
            arrive.len()
        );
        prop_assert_eq!(
            report.unmatched_orders.len() as u64 + report.stats.matches,
            prep.len() as u64
        );
        if kind.is_keyed() {
            for record in &report.matches {
                let order = &prep[record.order_id[1..].parse::<usize>().unwrap()];
                let courier = &arrive[record.courier_name[1..].parse::<usize>().unwrap()];
                prop_assert_eq!(order, courier);
            }
        }
    }
}
