//! Demo run: a simulated paginated source drained through a queue
//!
//! The source delivers each page through a callback on a timer, the way an
//! HTTP client or an event emitter would. The callback pushes records into
//! a [`PushQueue`]; the consumer pulls them with a plain `while let` loop.

use crate::app::cli::config::DemoConfig;
use crate::queue::api::{CloseOptions, Item, PushQueue, QueueError, QueueResult};
use futures::StreamExt;

/// One record of a simulated page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub page: usize,
    pub index: usize,
}

impl Record {
    pub fn id(&self) -> String {
        format!("p{}-r{}", self.page, self.index)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("page {page} failed to load")]
    PageFailed { page: usize },
}

/// Outcome of a demo run
#[derive(Debug, Clone, Default)]
pub struct DemoSummary {
    pub consumed: usize,
    pub cancelled: bool,
    pub failure: Option<QueueError>,
}

impl DemoSummary {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// Simulated paginated source: calls `on_page` once per page on a timer
async fn fetch_pages<F>(config: DemoConfig, mut on_page: F) -> Result<(), SourceError>
where
    F: FnMut(Vec<Record>),
{
    // A zero interval delivers pages back to back
    let mut ticker =
        (!config.interval().is_zero()).then(|| tokio::time::interval(config.interval()));
    for page in 1..=config.pages {
        match ticker.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
            }
            None => tokio::task::yield_now().await,
        }
        if config.fail_at_page == Some(page) {
            return Err(SourceError::PageFailed { page });
        }
        let records = (0..config.page_size)
            .map(|index| Record { page, index })
            .collect();
        on_page(records);
    }
    Ok(())
}

/// Run the demo to completion and summarize what the consumer saw
pub async fn run_demo(config: &DemoConfig) -> QueueResult<DemoSummary> {
    let source_config = config.clone();
    let high_water = config.lag_threshold();

    let queue = PushQueue::spawn(move |producer: PushQueue<Record>| {
        fetch_pages(source_config, move |records| {
            log::debug!("Page of {} records arrived", records.len());
            producer.enqueue(records.into_iter().map(Item::ready));
            if producer.len() > high_water {
                log::info!("Consumer lagging: {} entries buffered", producer.len());
            }
        })
    })?;

    let mut stream = queue.stream()?;
    let mut summary = DemoSummary::default();

    while let Some(item) = stream.next().await {
        match item {
            Ok(record) => {
                summary.consumed += 1;
                log::trace!("Consumed {}", record.id());
                if config.stop_after == Some(summary.consumed) {
                    log::info!("Stopping after {} records", summary.consumed);
                    queue.close_with(CloseOptions::new().immediate());
                    summary.cancelled = true;
                }
            }
            Err(err) => {
                log::warn!("Source failed after {} records: {}", summary.consumed, err);
                summary.failure = Some(err);
            }
        }
    }

    Ok(summary)
}
