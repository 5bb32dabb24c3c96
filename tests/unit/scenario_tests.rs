use kitchen_dispatch::model::{Courier, Order};
use kitchen_dispatch::{DispatchConfig, Driver, PolicyKind, RunReport};
use std::time::Duration;

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(policy: PolicyKind) -> Driver {
        Driver::new(
            DispatchConfig::default()
                .with_policy(policy)
                .with_time_unit(Duration::from_secs(1)),
        )
    }

    fn assert_accounting(report: &RunReport) {
        let pool = report.initial_couriers.len();
        let bound = report.stats.orders_submitted.min(report.courier_trips) as u64;
        assert!(report.stats.matches <= bound);
        assert_eq!(report.en_route, 0);
        assert_eq!(
            report.free_couriers.len() + report.en_route + report.idle_couriers.len(),
            pool
        );
        assert_eq!(report.matches.len() as u64, report.stats.matches);
    }

    // --- keyed policies ---

    #[tokio::test(start_paused = true)]
    async fn test_keyed_single_pair_matches() {
        let report = driver(PolicyKind::KeyedExact)
            .run(vec![Order::new("A", "Burger", 2)], vec![Courier::new("C1", 2)])
            .await
            .unwrap();

        assert_eq!(report.stats.matches, 1);
        assert_eq!(report.matches[0].order_id, "A");
        assert_eq!(report.matches[0].courier_name, "C1");
        assert_eq!(report.matches[0].order_wait, Duration::ZERO);
        assert_eq!(report.matches[0].courier_wait, Duration::ZERO);
        assert!(report.unmatched_orders.is_empty());
        assert_eq!(report.free_couriers, vec!["C1".to_string()]);
        assert_accounting(&report);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyed_surplus_order_stays_unmatched() {
        let orders = vec![Order::new("A", "Burger", 2), Order::new("B", "Pasta", 2)];
        let report = driver(PolicyKind::KeyedExact)
            .run(orders, vec![Courier::new("C1", 2)])
            .await
            .unwrap();

        assert_eq!(report.stats.matches, 1);
        assert_eq!(report.unmatched_orders, vec!["B".to_string()]);
        assert_eq!(report.matches[0].order_id, "A");
        assert_eq!(report.matches[0].courier_name, "C1");
        assert!(report.idle_couriers.is_empty());
        assert_eq!(report.courier_trips, 1);
        assert_accounting(&report);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyed_indexed_surplus_order_stays_unmatched() {
        let orders = vec![Order::new("A", "Burger", 2), Order::new("B", "Pasta", 2)];
        let report = driver(PolicyKind::KeyedIndexed)
            .run(orders, vec![Courier::new("C1", 2)])
            .await
            .unwrap();

        assert_eq!(report.stats.matches, 1);
        assert_eq!(report.unmatched_orders, vec!["B".to_string()]);
        assert_eq!(report.matches[0].order_id, "A");
        assert_eq!(report.matches[0].courier_name, "C1");
        assert_eq!(report.courier_trips, 1);
        assert_accounting(&report);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyed_order_without_eligible_courier_is_never_picked() {
        let report = driver(PolicyKind::KeyedExact)
            .run(vec![Order::new("A", "Burger", 3)], vec![Courier::new("C1", 2)])
            .await
            .unwrap();

        assert_eq!(report.stats.matches, 0);
        assert_eq!(report.courier_trips, 0);
        assert_eq!(report.unmatched_orders, vec!["A".to_string()]);
        assert_eq!(report.free_couriers, vec!["C1".to_string()]);
        assert_eq!(report.stats.average_order_wait_ms, Some(0.0));
        assert_eq!(report.stats.average_courier_wait_ms, Some(0.0));
        assert_accounting(&report);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyed_courier_never_leaves_pool_without_matching_order() {
        let orders = vec![Order::new("A", "Burger", 3), Order::new("B", "Pasta", 4)];
        let report = driver(PolicyKind::KeyedExact)
            .run(orders, vec![Courier::new("C1", 2)])
            .await
            .unwrap();

        assert_eq!(report.courier_trips, 0);
        assert_eq!(report.stats.matches, 0);
        assert_eq!(report.unmatched_orders, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(report.free_couriers, vec!["C1".to_string()]);
        assert_accounting(&report);
    }

    // --- fifo ---

    #[tokio::test(start_paused = true)]
    async fn test_fifo_pairs_mismatched_durations() {
        let report = driver(PolicyKind::Fifo)
            .run(vec![Order::new("A", "Burger", 1)], vec![Courier::new("C1", 5)])
            .await
            .unwrap();

        assert_eq!(report.stats.matches, 1);
        let record = &report.matches[0];
        assert_eq!(record.order_id, "A");
        assert_eq!(record.courier_name, "C1");
        assert_eq!(record.order_wait, Duration::from_secs(4));
        assert_eq!(record.courier_wait, Duration::ZERO);
        assert_eq!(record.matched_at, Duration::from_secs(5));
        assert_eq!(report.stats.average_order_wait_ms, Some(4_000.0));
        assert_eq!(report.stats.average_courier_wait_ms, Some(0.0));
        assert_accounting(&report);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fifo_courier_waits_for_slow_order() {
        let report = driver(PolicyKind::Fifo)
            .run(vec![Order::new("A", "Stew", 6)], vec![Courier::new("C1", 2)])
            .await
            .unwrap();

        assert_eq!(report.stats.matches, 1);
        assert_eq!(report.matches[0].order_wait, Duration::ZERO);
        assert_eq!(report.matches[0].courier_wait, Duration::from_secs(4));
        assert_accounting(&report);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fifo_more_orders_than_couriers() {
        let orders = (0..5).map(|i| Order::new(format!("o{i}"), "Soup", 1)).collect();
        let couriers = vec![Courier::new("C1", 1), Courier::new("C2", 1)];
        let report = driver(PolicyKind::Fifo).run(orders, couriers).await.unwrap();

        assert_eq!(
            report.unmatched_orders.len() as u64 + report.stats.matches,
            5
        );
        assert_accounting(&report);
    }

    // --- degenerate inputs ---

    #[tokio::test(start_paused = true)]
    async fn test_no_orders_finishes_without_matches() {
        let report = driver(PolicyKind::Fifo)
            .run(Vec::new(), vec![Courier::new("C1", 1)])
            .await
            .unwrap();

        assert_eq!(report.stats.matches, 0);
        assert_eq!(report.stats.average_order_wait_ms, None);
        assert!(report.journal.events().is_empty());
        assert_accounting(&report);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_couriers_leaves_every_order_unmatched() {
        let orders = vec![Order::new("A", "Burger", 1), Order::new("B", "Pasta", 2)];
        let report = driver(PolicyKind::Fifo).run(orders, Vec::new()).await.unwrap();

        assert_eq!(report.stats.matches, 0);
        assert_eq!(report.unmatched_orders.len(), 2);
        assert_eq!(report.courier_trips, 0);
        assert_eq!(report.stats.average_courier_wait_ms, None);
        assert_accounting(&report);
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_durations_run_as_zero() {
        let report = driver(PolicyKind::KeyedExact)
            .run(vec![Order::new("A", "Toast", -3)], vec![Courier::new("C1", -3)])
            .await
            .unwrap();

        assert_eq!(report.stats.matches, 1);
        assert_eq!(report.matches[0].matched_at, Duration::ZERO);
        assert_accounting(&report);
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_spaces_out_order_spawns() {
        let orders = (0..5).map(|i| Order::new(format!("o{i}"), "Soup", 0)).collect();
        let couriers = (0..5).map(|i| Courier::new(format!("c{i}"), 0)).collect();
        let report = driver(PolicyKind::Fifo).run(orders, couriers).await.unwrap();

        assert_eq!(report.stats.matches, 5);
        for record in &report.matches {
            let expected = match record.order_id.as_str() {
                "o3" | "o4" => Duration::from_secs(1),
                _ => Duration::ZERO,
            };
            assert_eq!(record.matched_at, expected, "order {}", record.order_id);
        }
        assert_accounting(&report);
    }
}
