//! Edge case tests for the queue system

#[cfg(test)]
mod tests {
    use crate::queue::api::{CloseOptions, Item, PushQueue, QueueError, Sentinel};
    use futures::{poll, StreamExt, TryStreamExt};

    #[tokio::test]
    async fn test_empty_enqueue_raises_failure_at_marker() {
        let queue: PushQueue<u32> = PushQueue::new();
        let mut stream = queue.stream().unwrap();

        queue.push(1);
        queue.enqueue(Vec::<Item<u32>>::new());

        // The queue is not closed by the empty enqueue
        assert!(!queue.is_closed());
        assert_eq!(queue.stats().failure_count, 1);

        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
        let failure = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(failure, QueueError::EmptyEnqueue));
    }

    #[tokio::test]
    async fn test_values_after_empty_enqueue_are_unreachable() {
        let queue: PushQueue<u32> = PushQueue::new();
        queue.enqueue(std::iter::empty());
        queue.push(2);
        queue.close();

        let mut stream = queue.stream().unwrap();
        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_close_after_empty_enqueue_aggregates() {
        let queue: PushQueue<u32> = PushQueue::new();
        queue.enqueue(std::iter::empty());
        queue.close_with(CloseOptions::new().failure(QueueError::producer("late")));

        // First marker raises everything recorded so far
        let mut stream = queue.stream().unwrap();
        let failure = stream.next().await.unwrap().unwrap_err();
        assert_eq!(failure.failure_count(), 2);
        assert!(matches!(failure.failures()[0], QueueError::EmptyEnqueue));
    }

    #[tokio::test]
    async fn test_immediate_close_with_failure_precedes_values() {
        let queue = PushQueue::new();
        queue.push(1);
        queue.push(2);
        queue.close_with(
            CloseOptions::new()
                .immediate()
                .failure(QueueError::producer("cancelled")),
        );

        assert_eq!(queue.stats().head_sentinel, Some(Sentinel::Error));
        let result: Result<Vec<i32>, QueueError> = queue.stream().unwrap().try_collect().await;
        assert_eq!(result.unwrap_err().to_string(), "Producer failed: cancelled");
    }

    #[tokio::test]
    async fn test_immediate_close_keeps_already_yielded_values() {
        let queue = PushQueue::new();
        let mut stream = queue.stream().unwrap();
        queue.push(1);
        queue.push(2);
        queue.push(3);

        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
        queue.close_with(CloseOptions::new().immediate());

        assert!(stream.next().await.is_none());
        assert_eq!(queue.stats().buffered_values, 2);
    }

    #[tokio::test]
    async fn test_immediate_close_wakes_waiting_consumer() {
        let queue: PushQueue<u8> = PushQueue::new();
        let mut stream = queue.stream().unwrap();

        assert!(poll!(stream.next()).is_pending());
        queue.close_with(CloseOptions::new().immediate());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_dropping_last_handle_closes_queue() {
        let queue = PushQueue::new();
        let mut stream = queue.stream().unwrap();
        let producer = queue.clone();

        producer.push("a");
        drop(queue);
        // One handle still alive
        assert!(poll!(stream.next()).is_ready());
        assert!(poll!(stream.next()).is_pending());

        drop(producer);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_drop_after_explicit_failure_keeps_failure() {
        let queue: PushQueue<u8> = PushQueue::new();
        let mut stream = queue.stream().unwrap();
        queue.fail("broken");
        drop(queue);

        assert!(stream.next().await.unwrap().is_err());
    }

    #[tokio::test]
    async fn test_dropped_stream_does_not_lose_entries() {
        let queue = PushQueue::new();
        let mut stream = queue.stream().unwrap();
        assert!(poll!(stream.next()).is_pending());
        drop(stream);

        // The stale waiter is skipped and the value stays buffered
        queue.push(5);
        assert_eq!(queue.len(), 1);
        assert!(!queue.stats().consumer_waiting);
    }

    #[tokio::test]
    async fn test_record_failure_without_close_is_silent_until_marker() {
        let queue = PushQueue::new();
        let mut stream = queue.stream().unwrap();

        queue.record_failure(QueueError::producer("page 3 missing"));
        queue.push(1);
        assert_eq!(stream.next().await.unwrap().unwrap(), 1);

        // Close now places an error marker because a failure is pending
        queue.close();
        assert!(stream.next().await.unwrap().is_err());
    }

    #[test]
    fn test_item_debug_output() {
        assert_eq!(format!("{:?}", Item::ready(3)), "Ready(3)");
        assert_eq!(format!("{:?}", Item::pending(async { 3 })), "Pending(..)");
    }
}
