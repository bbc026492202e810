//! Tests for the consuming side of the queue

#[cfg(test)]
mod tests {
    use crate::queue::api::{PushQueue, QueueError};
    use futures::stream::FusedStream;
    use futures::{poll, StreamExt};
    use std::task::Poll;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_waiting_consumer_receives_push_directly() {
        let queue = PushQueue::new();
        let mut stream = queue.stream().unwrap();

        // Empty buffer: the consumer suspends and registers as waiter
        assert!(poll!(stream.next()).is_pending());
        assert!(queue.stats().consumer_waiting);

        queue.push("live");

        // Handed over without passing through the buffer
        assert_eq!(queue.len(), 0);
        assert!(!queue.stats().consumer_waiting);
        assert_eq!(stream.next().await.unwrap().unwrap(), "live");
    }

    #[tokio::test]
    async fn test_waiting_consumer_woken_by_close() {
        let queue: PushQueue<u8> = PushQueue::new();
        let mut stream = queue.stream().unwrap();

        assert!(poll!(stream.next()).is_pending());
        queue.close();

        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_consumer_task_resumes_after_push() {
        let queue = PushQueue::new();
        let mut stream = queue.stream().unwrap();

        let consumer = tokio::spawn(async move { stream.next().await });

        // Let the consumer reach its suspension point
        while !queue.stats().consumer_waiting {
            tokio::task::yield_now().await;
        }
        queue.push(7u64);

        let received = timeout(Duration::from_secs(1), consumer)
            .await
            .expect("consumer should resume")
            .unwrap();
        assert_eq!(received.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_consumer_stays_suspended_without_pushes() {
        let queue: PushQueue<u8> = PushQueue::new();
        let mut stream = queue.stream().unwrap();

        let result = timeout(Duration::from_millis(50), stream.next()).await;
        assert!(result.is_err(), "consumer should still be waiting");

        // The timed-out attempt did not lose its place: a later push arrives
        queue.push(1);
        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_stream_is_fused_after_end() {
        let queue: PushQueue<u8> = PushQueue::new();
        let mut stream = queue.stream().unwrap();
        queue.close();

        assert!(!stream.is_terminated());
        assert!(stream.next_value().await.is_none());
        assert!(stream.is_terminated());
        assert!(stream.next_value().await.is_none());
    }

    #[tokio::test]
    async fn test_stream_is_fused_after_failure() {
        let queue: PushQueue<u8> = PushQueue::new();
        let mut stream = queue.stream().unwrap();
        queue.fail("boom");

        assert!(matches!(stream.next().await, Some(Err(_))));
        assert!(stream.is_terminated());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_failing_pending_value_ends_consumption() {
        let queue = PushQueue::new();
        let mut stream = queue.stream().unwrap();

        queue.push(1);
        queue.push_try_future(async { Err::<i32, _>("page fetch failed") });
        queue.push(3);
        queue.close();

        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
        match stream.next().await {
            Some(Err(QueueError::PendingValue { source })) => {
                assert_eq!(source.to_string(), "page fetch failed");
            }
            other => panic!("Expected pending value failure, got: {:?}", other),
        }
        assert!(stream.next().await.is_none());
    }

    #[test]
    fn test_only_one_consumer_per_queue() {
        let queue: PushQueue<u8> = PushQueue::new();
        let _stream = queue.stream().unwrap();

        let clone = queue.clone();
        assert!(matches!(clone.stream(), Err(QueueError::ConsumerTaken)));
    }

    #[test]
    fn test_stream_reports_buffer_depth() {
        let queue = PushQueue::new();
        let stream = queue.stream().unwrap();
        queue.push(1);
        queue.push(2);

        assert_eq!(stream.len(), 2);
        assert!(!stream.is_empty());
    }
}
