/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

use super::{CourierLifecycle, CourierTracker, LifecycleContext, LifecycleResult};
use crate::model::Order;
use tracing::info;

/// Drives one order through Received, Preparing and Ready.
///
/// The Picked transition happens inside the engine, either when this task
/// submits the ready order or later when a courier arrives for it.
#[derive(Debug)]
pub struct OrderLifecycle {
    order: Order,
    ctx: LifecycleContext,
    couriers: CourierTracker,
}

impl OrderLifecycle {
    #[must_use]
    pub fn new(order: Order, ctx: LifecycleContext, couriers: CourierTracker) -> Self {
        Self {
            order,
            ctx,
            couriers,
        }
    }

    /// Runs the order to readiness and submits it.
    ///
    /// Returns the match record if the submission itself completed a match.
    ///
    /// # Errors
    ///
    /// Fails only if the engine has shut down.
    pub async fn run(self) -> LifecycleResult {
        let Self {
            mut order,
            ctx,
            couriers,
        } = self;

        info!(order_id = %order.id, name = %order.name, "order received: {}", order.id);
        let dispatch = tokio::spawn(CourierLifecycle::dispatch_for(
            ctx.clone(),
            order.id.clone(),
            order.key(),
        ));
        couriers.track(dispatch);
        drop(couriers);

        order.mark_preparing();
        tokio::time::sleep(order.key().delay(ctx.time_unit)).await;

        order.mark_ready(ctx.clock.now());
        info!(order_id = %order.id, "order prepared: {}", order.id);

        let receipt = ctx.engine.submit_ready_order(order).await?;
        Ok(receipt.result.match_record().cloned())
    }
}
