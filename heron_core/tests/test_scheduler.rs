use std::sync::Arc;
use std::time::Duration;

use common::{
    FailingProcessor, RecordingProcessor, THROTTLE_INTERVAL, create_scheduler,
    create_scheduler_with,
};
use heron_core::{BatchStatus, IngestionStatus, Priority, Result};

mod common;

#[tokio::test]
async fn test_medium_ingestion_processes_both_batches() -> Result<()> {
    tokio::time::pause();
    let (task, service, ct) = create_scheduler();
    let ct_guard = ct.drop_guard();

    // Expected timeline: first batch runs 0s-2s, throttle until 7s, second
    // batch runs 7s-9s.
    let id = service.submit(vec![1, 2, 3, 4, 5], Priority::Medium).await;

    tokio::time::sleep(Duration::from_secs(1)).await;
    let ingestion = service.status(id).await?;
    assert_eq!(2, ingestion.batches.len());
    assert_eq!(vec![1, 2, 3], ingestion.batches[0].records);
    assert_eq!(vec![4, 5], ingestion.batches[1].records);
    assert_eq!(BatchStatus::Triggered, ingestion.batches[0].status);
    assert_eq!(BatchStatus::Pending, ingestion.batches[1].status);
    assert_eq!(IngestionStatus::Triggered, ingestion.overall_status());

    tokio::time::sleep(Duration::from_secs(2)).await;
    let ingestion = service.status(id).await?;
    assert_eq!(BatchStatus::Completed, ingestion.batches[0].status);
    assert_eq!(BatchStatus::Pending, ingestion.batches[1].status);
    // One completed batch plus one pending batch still reads yet_to_start.
    assert_eq!(IngestionStatus::YetToStart, ingestion.overall_status());

    tokio::time::sleep(Duration::from_secs(5)).await;
    let ingestion = service.status(id).await?;
    assert_eq!(BatchStatus::Triggered, ingestion.batches[1].status);
    assert_eq!(IngestionStatus::Triggered, ingestion.overall_status());

    tokio::time::sleep(Duration::from_secs(2)).await;
    let ingestion = service.status(id).await?;
    assert!(
        ingestion
            .batches
            .iter()
            .all(|batch| batch.status == BatchStatus::Completed)
    );
    assert_eq!(IngestionStatus::Completed, ingestion.overall_status());

    drop(ct_guard);
    task.await.expect("scheduler terminated");

    Ok(())
}

#[tokio::test]
async fn test_later_high_priority_overtakes_queued_medium() -> Result<()> {
    tokio::time::pause();
    let (task, service, ct) = create_scheduler();
    let ct_guard = ct.drop_guard();

    let medium_id = service.submit(vec![1, 2, 3, 4, 5], Priority::Medium).await;

    // Submit the HIGH ingestion while the first MEDIUM batch is in flight
    // and the second MEDIUM batch is still queued.
    tokio::time::sleep(Duration::from_secs(1)).await;
    let high_id = service.submit(vec![6, 7, 8], Priority::High).await;

    // After the throttle wait ends at 7s the HIGH batch must win over the
    // earlier-submitted MEDIUM one.
    tokio::time::sleep(Duration::from_secs(7)).await;
    let high = service.status(high_id).await?;
    let medium = service.status(medium_id).await?;
    assert_eq!(IngestionStatus::Triggered, high.overall_status());
    assert_eq!(BatchStatus::Pending, medium.batches[1].status);

    // The HIGH batch completes before the still-pending MEDIUM batch even
    // starts.
    tokio::time::sleep(Duration::from_secs(2)).await;
    let high = service.status(high_id).await?;
    let medium = service.status(medium_id).await?;
    assert_eq!(IngestionStatus::Completed, high.overall_status());
    assert_eq!(BatchStatus::Pending, medium.batches[1].status);

    tokio::time::sleep(Duration::from_secs(7)).await;
    let medium = service.status(medium_id).await?;
    assert_eq!(IngestionStatus::Completed, medium.overall_status());

    drop(ct_guard);
    task.await.expect("scheduler terminated");

    Ok(())
}

#[tokio::test]
async fn test_consecutive_batch_starts_respect_throttle_interval() -> Result<()> {
    tokio::time::pause();
    let processor = Arc::new(RecordingProcessor::default());
    let (task, service, ct) = create_scheduler_with(processor.clone());
    let ct_guard = ct.drop_guard();

    service
        .submit(vec![1, 2, 3, 4, 5, 6, 7, 8, 9], Priority::Low)
        .await;

    tokio::time::sleep(Duration::from_secs(20)).await;

    let starts = processor.starts.lock().await;
    assert_eq!(3, starts.len());
    for pair in starts.windows(2) {
        assert!(pair[1] - pair[0] >= THROTTLE_INTERVAL);
    }
    drop(starts);

    drop(ct_guard);
    task.await.expect("scheduler terminated");

    Ok(())
}

#[tokio::test]
async fn test_at_most_one_batch_triggered_at_any_instant() -> Result<()> {
    tokio::time::pause();
    let (task, service, ct) = create_scheduler();
    let ct_guard = ct.drop_guard();

    let first = service.submit(vec![1, 2, 3, 4, 5], Priority::Medium).await;
    let second = service.submit(vec![6, 7, 8, 9], Priority::Medium).await;

    let mut completed = 0;
    for _ in 0..25 {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let mut triggered = 0;
        completed = 0;
        for id in [first, second] {
            let ingestion = service.status(id).await?;
            for batch in &ingestion.batches {
                match batch.status {
                    BatchStatus::Triggered => triggered += 1,
                    BatchStatus::Completed => completed += 1,
                    _ => {}
                }
            }
        }

        assert!(triggered <= 1, "observed {triggered} triggered batches");
    }

    assert_eq!(4, completed);

    drop(ct_guard);
    task.await.expect("scheduler terminated");

    Ok(())
}

#[tokio::test]
async fn test_processor_failure_marks_batch_failed_and_loop_survives() -> Result<()> {
    tokio::time::pause();
    let (task, service, ct) = create_scheduler_with(Arc::new(FailingProcessor));
    let ct_guard = ct.drop_guard();

    // Two batches: the failure of the first must not prevent the second
    // from being attempted after the throttle wait.
    let id = service.submit(vec![1, 2, 3, 4], Priority::Medium).await;

    tokio::time::sleep(Duration::from_secs(6)).await;
    let ingestion = service.status(id).await?;
    assert!(
        ingestion
            .batches
            .iter()
            .all(|batch| batch.status == BatchStatus::Failed)
    );
    assert_eq!(IngestionStatus::Failed, ingestion.overall_status());

    drop(ct_guard);
    task.await.expect("scheduler terminated");

    Ok(())
}
