//! Ingestion pipeline: batching and the loader orchestration.
//!
//! The pipeline is strictly sequential: one fetch, then one upload at a
//! time, each blocking on its response. A fetch failure aborts the run; an
//! upload failure is scoped to its batch.

use std::sync::Arc;

use tracing::{error, info};

use super::ports::{CatalogWriter, PoiSource, PoiSourceError, PoiSourceQuery};

/// Invalid batching configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("batch size must be a positive integer")]
pub struct BatchSizeError;

/// Split an ordered sequence into ordered batches of at most `size` items.
///
/// Concatenating the returned batches reproduces the input exactly. Every
/// batch has length `size` except possibly the last. An empty input yields
/// a single empty batch rather than no batches.
///
/// # Errors
///
/// Returns [`BatchSizeError`] when `size` is zero.
///
/// # Examples
/// ```
/// use spotter_backend::domain::split_batches;
///
/// let batches = split_batches(vec![1, 2, 3, 4, 5], 2)?;
/// assert_eq!(batches, vec![vec![1, 2], vec![3, 4], vec![5]]);
/// # Ok::<(), spotter_backend::domain::BatchSizeError>(())
/// ```
pub fn split_batches<T>(items: Vec<T>, size: usize) -> Result<Vec<Vec<T>>, BatchSizeError> {
    if size == 0 {
        return Err(BatchSizeError);
    }
    if items.is_empty() {
        return Ok(vec![Vec::new()]);
    }

    let mut batches = Vec::with_capacity(items.len().div_ceil(size));
    let mut iter = items.into_iter();
    loop {
        let batch: Vec<T> = iter.by_ref().take(size).collect();
        if batch.is_empty() {
            break;
        }
        batches.push(batch);
    }
    Ok(batches)
}

/// Errors that abort an ingestion run entirely.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoaderError {
    /// The run was configured with an invalid batch size.
    #[error(transparent)]
    Config(#[from] BatchSizeError),
    /// The upstream fetch failed; partial results are never used.
    #[error(transparent)]
    Fetch(#[from] PoiSourceError),
}

/// Summary of one ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Elements returned by the source.
    pub fetched: usize,
    /// Batches produced by the splitter.
    pub batches: usize,
    /// Batches the catalog accepted.
    pub uploaded: usize,
    /// Batches that failed and were skipped.
    pub failed: usize,
}

/// Sequential fetch-split-upload orchestration.
#[derive(Clone)]
pub struct LoaderService<S, W> {
    source: Arc<S>,
    writer: Arc<W>,
    batch_size: usize,
}

impl<S, W> LoaderService<S, W>
where
    S: PoiSource,
    W: CatalogWriter,
{
    /// Create a loader over a source and a catalog writer.
    pub fn new(source: Arc<S>, writer: Arc<W>, batch_size: usize) -> Self {
        Self {
            source,
            writer,
            batch_size,
        }
    }

    /// Execute one ingestion run.
    ///
    /// Batches are uploaded one at a time, in order, with no retries and no
    /// concurrency. A failed batch is logged and skipped; the run continues
    /// with the next batch. Empty batches perform no network call.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError`] when the batch size is invalid or the fetch
    /// itself fails.
    pub async fn run(&self, query: &PoiSourceQuery) -> Result<LoadReport, LoaderError> {
        let elements = self.source.fetch_pois(query).await?;
        let mut report = LoadReport {
            fetched: elements.len(),
            ..LoadReport::default()
        };

        let batches = split_batches(elements, self.batch_size)?;
        report.batches = batches.len();

        for (index, batch) in batches.iter().enumerate() {
            if batch.is_empty() {
                continue;
            }
            match self.writer.upload_batch(batch).await {
                Ok(()) => {
                    info!(batch = index, records = batch.len(), "uploaded batch");
                    report.uploaded += 1;
                }
                Err(upload_error) => {
                    error!(batch = index, error = %upload_error, "failed to upload batch");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::geo::BoundingBox;
    use crate::domain::poi::TagMap;
    use crate::domain::ports::{CatalogWriteError, MockCatalogWriter, MockPoiSource, RawPoi};
    use rstest::rstest;

    fn raw(id: i64) -> RawPoi {
        RawPoi {
            id,
            latitude: 55.7,
            longitude: 37.6,
            tags: TagMap::new(),
        }
    }

    fn query() -> PoiSourceQuery {
        PoiSourceQuery {
            bounding_box: BoundingBox::new(55.56, 37.25, 55.91, 37.95).expect("bbox"),
            category: "cafe".to_owned(),
        }
    }

    #[rstest]
    #[case::exact_multiple(6, 3, vec![3, 3])]
    #[case::remainder(5, 2, vec![2, 2, 1])]
    #[case::oversized_batch(2, 10, vec![2])]
    #[case::single_items(3, 1, vec![1, 1, 1])]
    fn split_preserves_order_and_sizes(
        #[case] item_count: i64,
        #[case] size: usize,
        #[case] expected_lengths: Vec<usize>,
    ) {
        let items: Vec<i64> = (0..item_count).collect();
        let batches = split_batches(items.clone(), size).expect("valid size");

        let lengths: Vec<usize> = batches.iter().map(Vec::len).collect();
        assert_eq!(lengths, expected_lengths);

        let rejoined: Vec<i64> = batches.into_iter().flatten().collect();
        assert_eq!(rejoined, items, "concatenating batches reproduces input");
    }

    #[rstest]
    fn split_of_empty_input_yields_one_empty_batch() {
        let batches = split_batches(Vec::<i64>::new(), 4).expect("valid size");
        assert_eq!(batches, vec![Vec::<i64>::new()]);
    }

    #[rstest]
    fn split_rejects_zero_size() {
        assert_eq!(split_batches(vec![1], 0), Err(BatchSizeError));
    }

    #[actix_web::test]
    async fn loader_uploads_every_batch_sequentially() {
        let mut source = MockPoiSource::new();
        source
            .expect_fetch_pois()
            .times(1)
            .returning(|_| Ok((1..=5).map(raw).collect()));

        let mut writer = MockCatalogWriter::new();
        writer.expect_upload_batch().times(3).returning(|_| Ok(()));

        let loader = LoaderService::new(Arc::new(source), Arc::new(writer), 2);
        let report = loader.run(&query()).await.expect("run succeeds");
        assert_eq!(
            report,
            LoadReport {
                fetched: 5,
                batches: 3,
                uploaded: 3,
                failed: 0,
            }
        );
    }

    #[actix_web::test]
    async fn loader_continues_after_a_failed_batch() {
        let mut source = MockPoiSource::new();
        source
            .expect_fetch_pois()
            .returning(|_| Ok((1..=6).map(raw).collect()));

        let calls = AtomicUsize::new(0);
        let mut writer = MockCatalogWriter::new();
        writer.expect_upload_batch().times(3).returning(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) == 1 {
                Err(CatalogWriteError::rejected("status 500"))
            } else {
                Ok(())
            }
        });

        let loader = LoaderService::new(Arc::new(source), Arc::new(writer), 2);
        let report = loader.run(&query()).await.expect("run completes");
        assert_eq!(report.uploaded, 2);
        assert_eq!(report.failed, 1);
    }

    #[actix_web::test]
    async fn loader_performs_no_uploads_for_an_empty_source() {
        let mut source = MockPoiSource::new();
        source.expect_fetch_pois().returning(|_| Ok(Vec::new()));

        let mut writer = MockCatalogWriter::new();
        writer.expect_upload_batch().never();

        let loader = LoaderService::new(Arc::new(source), Arc::new(writer), 1024);
        let report = loader.run(&query()).await.expect("run completes");
        assert_eq!(report.fetched, 0);
        assert_eq!(report.batches, 1, "empty input still yields one batch");
        assert_eq!(report.uploaded, 0);
    }

    #[actix_web::test]
    async fn loader_aborts_the_run_on_fetch_failure() {
        let mut source = MockPoiSource::new();
        source
            .expect_fetch_pois()
            .returning(|_| Err(PoiSourceError::transport("connection refused")));

        let mut writer = MockCatalogWriter::new();
        writer.expect_upload_batch().never();

        let loader = LoaderService::new(Arc::new(source), Arc::new(writer), 2);
        let error = loader.run(&query()).await.expect_err("fetch failure is fatal");
        assert!(matches!(error, LoaderError::Fetch(_)));
    }
}
