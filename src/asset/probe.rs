//! Existence checks for floorplan assets

use std::future::Future;

use super::is_remote;

/// Answers whether an asset exists, without fetching it
pub trait AssetProbe: Send + Sync + 'static {
    fn exists(&self, path: &str) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

/// HEAD request; any 2xx status counts as present
#[derive(Clone, Debug, Default)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl AssetProbe for HttpProbe {
    async fn exists(&self, path: &str) -> anyhow::Result<bool> {
        let response = self.client.head(path).send().await?;
        log::debug!("HEAD {} -> {}", path, response.status());
        Ok(response.status().is_success())
    }
}

/// Local file check; directories do not count
#[derive(Clone, Copy, Debug, Default)]
pub struct FileProbe;

impl AssetProbe for FileProbe {
    async fn exists(&self, path: &str) -> anyhow::Result<bool> {
        match tokio::fs::metadata(path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

/// Dispatches on the path: HTTP(S) URLs go to [`HttpProbe`], the rest to disk
#[derive(Clone, Debug, Default)]
pub struct AnyProbe {
    http: HttpProbe,
    file: FileProbe,
}

impl AnyProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            http: HttpProbe::new(client),
            file: FileProbe,
        }
    }
}

impl AssetProbe for AnyProbe {
    async fn exists(&self, path: &str) -> anyhow::Result<bool> {
        if is_remote(path) {
            self.http.exists(path).await
        } else {
            self.file.exists(path).await
        }
    }
}
