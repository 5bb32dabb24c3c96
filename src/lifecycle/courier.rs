/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

use super::{DispatchResult, LifecycleContext, LifecycleResult, TripOutcome};
use crate::engine::EngineResult;
use crate::model::{Courier, MatchKey};
use tracing::info;

/// Drives one dispatched courier through Dispatched and Arrived.
///
/// The courier rejoins the free pool inside the engine once matched; this
/// task ends after reporting arrival.
#[derive(Debug)]
pub struct CourierLifecycle {
    courier: Courier,
    ctx: LifecycleContext,
}

impl CourierLifecycle {
    #[must_use]
    pub fn new(courier: Courier, ctx: LifecycleContext) -> Self {
        Self { courier, ctx }
    }

    /// Asks the engine for a courier for `order_id` and, if one is handed
    /// out, runs its trip.
    ///
    /// When no eligible courier is free the attempt is dropped and the
    /// order goes on without one.
    ///
    /// # Errors
    ///
    /// Fails only if the engine has shut down.
    pub async fn dispatch_for(ctx: LifecycleContext, order_id: String, key: MatchKey) -> DispatchResult {
        let receipt = ctx.engine.dispatch_courier(&order_id, key).await?;
        match receipt.result {
            EngineResult::CourierDispatched { courier } => {
                info!(courier = %courier.name, order_id = %order_id, "courier dispatched: {}", courier.name);
                Self::new(courier, ctx).run().await.map(TripOutcome::Completed)
            }
            _ => Ok(TripOutcome::NotDispatched),
        }
    }

    /// Travels to the kitchen and reports arrival.
    ///
    /// # Errors
    ///
    /// Fails only if the engine has shut down.
    pub async fn run(self) -> LifecycleResult {
        let Self { mut courier, ctx } = self;

        tokio::time::sleep(courier.key().delay(ctx.time_unit)).await;

        courier.mark_arrived(ctx.clock.now());
        info!(courier = %courier.name, "courier arrived: {}", courier.name);

        let receipt = ctx.engine.submit_arrived_courier(courier).await?;
        Ok(receipt.result.match_record().cloned())
    }
}
