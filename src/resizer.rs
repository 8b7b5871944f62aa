//! Asynchronous resizing.
//!
//! A [`Resizer`] moves one resize at a time onto a rayon thread pool and
//! hands the result back through one of three surfaces:
//!
//! | Surface | Delivery |
//! |---|---|
//! | [`Resizer::resize_with`] | completion callback, run on the worker thread |
//! | [`Resizer::resize`] | [`PendingResize`], a future resolving once |
//! | [`Resizer::resize_stream`] | [`ResizeStream`], yields one value then ends |
//!
//! All three deliver `Option<RasterImage>`. `None` means no image was
//! produced: either the source was dropped before the worker got to it (the
//! job holds only a `Weak` reference), or the backend rejected the request.
//! Neither case is an error from the caller's point of view.
//!
//! The future and stream are built on a `tokio::sync::oneshot` channel and
//! can be awaited from any executor.

use crate::config::{self, ConfigError, ResizeConfig};
use crate::imaging::{
    self, CornerRadius, Filter, ImageBackend, RasterImage, ResizeRequest, SizePolicy, SkiaBackend,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Error, Debug)]
pub enum ResizerError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Off-thread resizer backed by a rayon pool.
///
/// Cheap to share: the backend and pool are reference counted, and every
/// call is independent of every other.
pub struct Resizer<B = SkiaBackend> {
    backend: Arc<B>,
    pool: Arc<rayon::ThreadPool>,
    display_scale: f32,
    filter: Filter,
}

impl<B> Clone for Resizer<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            pool: Arc::clone(&self.pool),
            display_scale: self.display_scale,
            filter: self.filter,
        }
    }
}

impl Resizer<SkiaBackend> {
    /// Build a resizer with the `tiny-skia` backend and a dedicated pool.
    pub fn new(config: &ResizeConfig) -> Result<Self, ResizerError> {
        Self::with_backend(SkiaBackend::new(), config)
    }
}

impl<B: ImageBackend + 'static> Resizer<B> {
    /// Build a resizer with a custom backend and a dedicated pool sized from
    /// `config.processing`.
    pub fn with_backend(backend: B, config: &ResizeConfig) -> Result<Self, ResizerError> {
        config.validate()?;
        let threads = config::effective_threads(&config.processing);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("resize-{i}"))
            .build()?;
        log::info!("resize pool started with {} worker(s)", threads);
        Ok(Self::with_pool(backend, Arc::new(pool), config))
    }

    /// Build a resizer on an existing pool.
    ///
    /// `config.processing` is ignored; the pool is used as given.
    pub fn with_pool(backend: B, pool: Arc<rayon::ThreadPool>, config: &ResizeConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            pool,
            display_scale: config.display_scale,
            filter: config.filter,
        }
    }

    pub fn display_scale(&self) -> f32 {
        self.display_scale
    }

    /// Schedule a resize and call `completion` with the result.
    ///
    /// `image` is held weakly: if every strong reference is dropped before
    /// the worker starts, `completion` receives `None`. The callback runs on
    /// a pool thread; redispatch if it must run elsewhere.
    pub fn resize_with<F>(
        &self,
        image: &Arc<RasterImage>,
        policy: SizePolicy,
        corner_radius: impl Into<CornerRadius>,
        completion: F,
    ) where
        F: FnOnce(Option<RasterImage>) + Send + 'static,
    {
        let source = Arc::downgrade(image);
        let request = ResizeRequest::new(policy).with_corner_radius(corner_radius);
        let backend = Arc::clone(&self.backend);
        let display_scale = self.display_scale;
        let filter = self.filter;

        log::debug!("scheduling {} resize", policy.name());
        self.pool.spawn(move || {
            let result = run_job(&*backend, &source, &request, display_scale, filter);
            completion(result);
        });
    }

    /// Schedule a resize and return a future for its result.
    pub fn resize(
        &self,
        image: &Arc<RasterImage>,
        policy: SizePolicy,
        corner_radius: impl Into<CornerRadius>,
    ) -> PendingResize {
        let (tx, rx) = oneshot::channel();
        self.resize_with(image, policy, corner_radius, move |result| {
            if tx.send(result).is_err() {
                log::debug!("resize finished after its receiver was dropped");
            }
        });
        PendingResize { rx }
    }

    /// Schedule a resize and return a one-shot stream for its result.
    pub fn resize_stream(
        &self,
        image: &Arc<RasterImage>,
        policy: SizePolicy,
        corner_radius: impl Into<CornerRadius>,
    ) -> ResizeStream {
        ResizeStream {
            pending: Some(self.resize(image, policy, corner_radius)),
        }
    }
}

/// Body of one background job.
fn run_job<B: ImageBackend>(
    backend: &B,
    source: &Weak<RasterImage>,
    request: &ResizeRequest,
    display_scale: f32,
    filter: Filter,
) -> Option<RasterImage> {
    let Some(source) = source.upgrade() else {
        log::debug!("source image released before resize ran");
        return None;
    };

    match imaging::resize(backend, &source, request, display_scale, filter) {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("{} resize produced no image: {}", request.policy.name(), e);
            None
        }
    }
}

/// Future returned by [`Resizer::resize`].
///
/// Resolves to `None` if the job produced no image, including the case where
/// the worker went away without answering.
#[must_use = "futures do nothing unless awaited"]
pub struct PendingResize {
    rx: oneshot::Receiver<Option<RasterImage>>,
}

impl Future for PendingResize {
    type Output = Option<RasterImage>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.ok().flatten())
    }
}

impl PendingResize {
    /// Block the current thread until the result arrives.
    ///
    /// Must not be called from inside an async runtime.
    pub fn wait(self) -> Option<RasterImage> {
        self.rx.blocking_recv().ok().flatten()
    }
}

/// One-shot stream returned by [`Resizer::resize_stream`].
///
/// The first [`next`](Self::next) yields `Some(result)`; every later call
/// yields `None`, meaning the stream has completed.
pub struct ResizeStream {
    pending: Option<PendingResize>,
}

impl ResizeStream {
    pub async fn next(&mut self) -> Option<Option<RasterImage>> {
        let pending = self.pending.take()?;
        Some(pending.await)
    }

    pub fn is_terminated(&self) -> bool {
        self.pending.is_none()
    }
}
