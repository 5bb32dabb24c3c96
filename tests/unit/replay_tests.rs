use kitchen_dispatch::engine::journal::Journal;
use kitchen_dispatch::engine::replay::{ReplayEngine, ReplayError};
use kitchen_dispatch::engine::{DispatchBook, EngineCommand};
use kitchen_dispatch::model::{Courier, Order};
use kitchen_dispatch::{DispatchConfig, Driver, PolicyKind, RunReport};
use std::time::Duration;

#[cfg(test)]
mod tests {
    use super::*;

    async fn recorded_run(policy: PolicyKind) -> RunReport {
        let orders = vec![
            Order::new("a", "Burger", 2),
            Order::new("b", "Pasta", 3),
            Order::new("c", "Salad", 1),
            Order::new("d", "Soup", 2),
        ];
        let couriers = vec![
            Courier::new("ana", 3),
            Courier::new("bo", 2),
            Courier::new("cy", 1),
        ];
        Driver::new(
            DispatchConfig::default()
                .with_policy(policy)
                .with_time_unit(Duration::from_millis(100)),
        )
        .run(orders, couriers)
        .await
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fifo_run_replays_to_same_matches() {
        let report = recorded_run(PolicyKind::Fifo).await;
        assert!(report.stats.matches > 0);
        assert_eq!(report.verify_replay(), Ok(true));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyed_run_replays_to_same_matches() {
        let report = recorded_run(PolicyKind::KeyedIndexed).await;
        assert_eq!(report.verify_replay(), Ok(true));
    }

    #[tokio::test(start_paused = true)]
    async fn test_replayed_book_matches_final_stats() {
        let report = recorded_run(PolicyKind::KeyedExact).await;
        let fresh = DispatchBook::new(
            report.policy,
            report.initial_couriers.clone(),
            report.stats.orders_submitted,
        );

        let (book, last_seq) = ReplayEngine::replay_from(&report.journal, 0, fresh).unwrap();
        assert_eq!(Some(last_seq), report.journal.last_sequence());
        assert_eq!(book.stats().snapshot(), report.stats);
        assert_eq!(book.snapshot().ready_orders, report.unmatched_orders);
        assert_eq!(book.snapshot().free_couriers, report.free_couriers);
    }

    #[tokio::test(start_paused = true)]
    async fn test_journal_sequence_is_gap_free() {
        let report = recorded_run(PolicyKind::Fifo).await;
        let events = report.journal.events();

        // Four dispatch attempts, four ready orders, one arrival per dispatched courier.
        assert!(events.len() >= 8);
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.sequence_num, i as u64 + 1);
        }
        let dispatches = events
            .iter()
            .filter(|e| matches!(e.command, EngineCommand::DispatchCourier { .. }))
            .count();
        assert_eq!(dispatches, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_under_other_policy_diverges() {
        let report = recorded_run(PolicyKind::KeyedExact).await;
        let wrong = DispatchBook::new(
            PolicyKind::Fifo,
            report.initial_couriers.clone(),
            report.stats.orders_submitted,
        );

        let result = ReplayEngine::verify(&report.journal, wrong, &report.matches);
        assert!(matches!(result, Err(ReplayError::Diverged { .. }) | Ok(false)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_journal_records_nothing() {
        let report = Driver::new(DispatchConfig::default().with_journal(false))
            .run(vec![Order::new("a", "Burger", 1)], vec![Courier::new("ana", 1)])
            .await
            .unwrap();

        assert!(report.journal.is_empty());
        assert_eq!(report.verify_replay(), Err(ReplayError::EmptyJournal));
    }
}
