//! Background resolution of asset requests
//!
//! One task runs per request: probe, then load. Results go back over an mpsc
//! channel tagged with the request generation. Starting a new request aborts
//! the previous task, and dropping the [`AssetTask`] aborts whatever is still
//! running, so no result ever reaches a canvas that moved on.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::{AssetFailure, AssetLoader, AssetMsg, AssetProbe, AssetRequest};

pub struct AssetTask<P, L> {
    probe: Arc<P>,
    loader: Arc<L>,
    tx: UnboundedSender<AssetMsg>,
    handle: Option<JoinHandle<()>>,
}

impl<P: AssetProbe, L: AssetLoader> AssetTask<P, L> {
    pub fn new(probe: P, loader: L, tx: UnboundedSender<AssetMsg>) -> Self {
        Self {
            probe: Arc::new(probe),
            loader: Arc::new(loader),
            tx,
            handle: None,
        }
    }

    /// Start resolving `request`, abandoning any request still in flight
    pub fn start(&mut self, request: AssetRequest) {
        self.cancel();
        log::debug!("Resolving floorplan {} (generation {})", request.path, request.generation);

        let probe = Arc::clone(&self.probe);
        let loader = Arc::clone(&self.loader);
        let tx = self.tx.clone();
        self.handle = Some(tokio::spawn(async move {
            resolve(probe.as_ref(), loader.as_ref(), request, &tx).await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl<P, L> Drop for AssetTask<P, L> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Probe then load `request`, sending progress to `tx`
///
/// Stops after the probe when the asset is missing or the probe failed.
pub async fn resolve<P: AssetProbe, L: AssetLoader>(
    probe: &P,
    loader: &L,
    request: AssetRequest,
    tx: &UnboundedSender<AssetMsg>,
) {
    let AssetRequest { generation, path } = request;

    let probed = match probe.exists(&path).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(AssetFailure::NotFound(path.clone())),
        Err(err) => Err(AssetFailure::Probe {
            path: path.clone(),
            reason: format!("{err:#}"),
        }),
    };
    let found = probed.is_ok();
    if tx.send(AssetMsg::Probed { generation, outcome: probed }).is_err() || !found {
        return;
    }

    let outcome = loader.load(&path).await.map_err(|err| AssetFailure::LoadFailed {
        path: path.clone(),
        reason: format!("{err:#}"),
    });
    if tx.send(AssetMsg::Loaded { generation, outcome }).is_err() {
        log::debug!("Floorplan {} resolved after receiver closed", path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{FileProbe, ImageLoader};
    use image::RgbaImage;
    use tokio::sync::mpsc;

    struct FailingProbe;

    impl AssetProbe for FailingProbe {
        async fn exists(&self, _path: &str) -> anyhow::Result<bool> {
            anyhow::bail!("network unreachable")
        }
    }

    /// Never answers for `stalled`, reports everything else missing
    struct StallingProbe {
        stalled: &'static str,
    }

    impl AssetProbe for StallingProbe {
        async fn exists(&self, path: &str) -> anyhow::Result<bool> {
            if path == self.stalled {
                std::future::pending::<()>().await;
            }
            Ok(false)
        }
    }

    fn request(generation: u64, path: &std::path::Path) -> AssetRequest {
        AssetRequest {
            generation,
            path: path.to_string_lossy().into_owned(),
        }
    }

    #[tokio::test]
    async fn test_missing_asset_stops_after_probe() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        resolve(&FileProbe, &ImageLoader::default(), request(3, &dir.path().join("x.png")), &tx).await;
        drop(tx);

        match rx.recv().await {
            Some(AssetMsg::Probed {
                generation: 3,
                outcome: Err(AssetFailure::NotFound(_)),
            }) => {}
            other => panic!("unexpected message: {other:?}"),
        }
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_probe_error_is_reported() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let req = AssetRequest {
            generation: 1,
            path: "https://example.invalid/plan.png".to_string(),
        };
        resolve(&FailingProbe, &ImageLoader::default(), req, &tx).await;

        assert!(matches!(
            rx.recv().await,
            Some(AssetMsg::Probed {
                outcome: Err(AssetFailure::Probe { .. }),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_undecodable_asset_reports_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.png");
        std::fs::write(&file, b"garbage").unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        resolve(&FileProbe, &ImageLoader::default(), request(1, &file), &tx).await;

        assert!(matches!(rx.recv().await, Some(AssetMsg::Probed { outcome: Ok(()), .. })));
        assert!(matches!(
            rx.recv().await,
            Some(AssetMsg::Loaded {
                outcome: Err(AssetFailure::LoadFailed { .. }),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_spawned_task_delivers_image() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plan.png");
        RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 255, 255]))
            .save(&file)
            .unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut task = AssetTask::new(FileProbe, ImageLoader::default(), tx);
        task.start(request(7, &file));

        assert_eq!(rx.recv().await.unwrap().generation(), 7);
        match rx.recv().await {
            Some(AssetMsg::Loaded {
                generation: 7,
                outcome: Ok(img),
            }) => assert_eq!(img.dimensions(), (8, 8)),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_new_request_aborts_the_previous_one() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let probe = StallingProbe { stalled: "old.png" };
        let mut task = AssetTask::new(probe, ImageLoader::default(), tx);

        task.start(AssetRequest {
            generation: 1,
            path: "old.png".to_string(),
        });
        task.start(AssetRequest {
            generation: 2,
            path: "new.png".to_string(),
        });

        match rx.recv().await {
            Some(AssetMsg::Probed {
                generation: 2,
                outcome: Err(AssetFailure::NotFound(path)),
            }) => assert_eq!(path, "new.png"),
            other => panic!("unexpected message: {other:?}"),
        }

        // every sender is gone once both tasks ended, without a generation 1 message
        drop(task);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_drop_aborts_in_flight_request() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let probe = StallingProbe { stalled: "plan.png" };
        let mut task = AssetTask::new(probe, ImageLoader::default(), tx);
        task.start(AssetRequest {
            generation: 1,
            path: "plan.png".to_string(),
        });
        tokio::task::yield_now().await;

        drop(task);
        assert!(rx.recv().await.is_none());
    }
}
