use async_trait::async_trait;
use core_types::RawRow;
use loader::{DatasetLoader, DatasetState, LoadError, RecordSource};
use std::sync::Arc;
use std::time::Duration;

/// Answers with one row per ticker after an optional delay.
struct StubSource {
    tickers: Vec<&'static str>,
    delay: Duration,
    fail: bool,
}

impl StubSource {
    fn rows(tickers: Vec<&'static str>) -> Self {
        Self { tickers, delay: Duration::ZERO, fail: false }
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn failing() -> Self {
        Self { tickers: Vec::new(), delay: Duration::ZERO, fail: true }
    }
}

#[async_trait]
impl RecordSource for StubSource {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, LoadError> {
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(LoadError::Status(503));
        }
        Ok(self
            .tickers
            .iter()
            .map(|ticker| {
                RawRow::new()
                    .with("ticker", *ticker)
                    .with("date", "2023-07-31")
                    .with("breakout", "up")
            })
            .collect())
    }

    fn describe(&self) -> String {
        format!("stub:{}", self.tickers.join(","))
    }
}

fn tickers_of(state: &DatasetState) -> Vec<String> {
    state
        .dataset()
        .map(|dataset| dataset.tickers().into_iter().map(String::from).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn starts_not_loaded() {
    let loader = DatasetLoader::new();
    assert!(!loader.current().is_loaded());
}

#[tokio::test]
async fn load_publishes_the_normalized_dataset() {
    let loader = DatasetLoader::new();
    let state = loader.load(Arc::new(StubSource::rows(vec!["NQ=F", "ES=F"]))).await;

    assert!(state.is_loaded());
    assert_eq!(state.dataset().map(|d| d.len()), Some(2));
    assert_eq!(tickers_of(&loader.current()), vec!["NQ=F", "ES=F"]);
}

#[tokio::test]
async fn last_requested_load_wins_over_a_slower_earlier_one() {
    let loader = DatasetLoader::new();
    let slow = loader.request(Arc::new(
        StubSource::rows(vec!["OLD"]).slow(Duration::from_millis(200)),
    ));
    let fast = loader.request(Arc::new(StubSource::rows(vec!["NEW"])));

    fast.await.unwrap();
    // The superseded load is aborted; awaiting it reports cancellation.
    let _ = slow.await;

    assert_eq!(tickers_of(&loader.current()), vec!["NEW"]);
}

#[tokio::test]
async fn stale_result_is_discarded_even_if_it_finishes() {
    let loader = DatasetLoader::new();
    let first = loader.request(Arc::new(StubSource::rows(vec!["FIRST"])));
    let second = loader.request(Arc::new(
        StubSource::rows(vec!["SECOND"]).slow(Duration::from_millis(50)),
    ));

    let _ = first.await;
    second.await.unwrap();

    assert_eq!(tickers_of(&loader.current()), vec!["SECOND"]);
}

#[tokio::test]
async fn failure_leaves_the_dataset_not_loaded() {
    let loader = DatasetLoader::new();
    loader.load(Arc::new(StubSource::rows(vec!["NQ=F"]))).await;
    assert!(loader.current().is_loaded());

    let state = loader.load(Arc::new(StubSource::failing())).await;
    assert!(!state.is_loaded());
}

#[tokio::test]
async fn subscribers_see_each_publication() {
    let loader = DatasetLoader::new();
    let mut rx = loader.subscribe();

    loader.request(Arc::new(StubSource::rows(vec!["NQ=F"])));
    rx.changed().await.unwrap();

    assert_eq!(tickers_of(&rx.borrow()), vec!["NQ=F"]);
}

#[test]
fn concurrent_requests_from_threads_always_leave_one_loaded() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap();

    for _ in 0..200 {
        let loader = Arc::new(DatasetLoader::new());
        let barrier = Arc::new(std::sync::Barrier::new(2));

        let callers: Vec<_> = ["A", "B"]
            .into_iter()
            .map(|ticker| {
                let loader = Arc::clone(&loader);
                let barrier = Arc::clone(&barrier);
                let handle = runtime.handle().clone();
                std::thread::spawn(move || {
                    let _guard = handle.enter();
                    barrier.wait();
                    loader.request(Arc::new(StubSource::rows(vec![ticker])))
                })
            })
            .collect();

        let tasks: Vec<_> = callers.into_iter().map(|c| c.join().unwrap()).collect();
        runtime.block_on(async {
            for task in tasks {
                let _ = task.await;
            }
        });

        let tickers = tickers_of(&loader.current());
        assert!(tickers == vec!["A"] || tickers == vec!["B"], "got {tickers:?}");
    }
}
