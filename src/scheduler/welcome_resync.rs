use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    error::AppError,
    service::welcome::worker::{WelcomeCommand, WelcomeQueue},
};

/// Starts the welcome resync scheduler.
///
/// Every tick queues a reconciliation pass for the welcome worker. A tick while a
/// previous pass is still queued simply adds another command; the worker runs them in order.
///
/// # Arguments
/// - `schedule` - Cron expression with seconds, e.g. `0 0 * * * *`
/// - `queue` - Command queue of the welcome worker
///
/// # Returns
/// - `Ok(())` - Scheduler running
/// - `Err(AppError)` - Invalid cron expression or scheduler failure
pub async fn start_scheduler(schedule: &str, queue: WelcomeQueue) -> Result<(), AppError> {
    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let queue = queue.clone();

        Box::pin(async move {
            tracing::debug!("Welcome resync tick");
            queue.push(WelcomeCommand::Reconcile);
        })
    })?;

    let scheduler = JobScheduler::new().await?;
    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Welcome resync scheduler started with schedule '{}'", schedule);

    Ok(())
}
