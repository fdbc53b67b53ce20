use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::engine::EngineError;

/// Read at most `max_bytes` from the file at `path`
pub async fn read_text(path: impl AsRef<Path>, max_bytes: usize) -> Result<Vec<u8>> {
    let path = path.as_ref();
    if max_bytes == 0 {
        return Err(EngineError::InvalidArgument("read limit must be at least one byte".into()).into());
    }

    let file = File::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;

    // One byte past the limit tells a full file from a truncated one.
    let mut buf = Vec::new();
    file.take(max_bytes as u64 + 1)
        .read_to_end(&mut buf)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    if buf.len() > max_bytes {
        warn!("{} is longer than {} bytes, input truncated", path.display(), max_bytes);
        buf.truncate(max_bytes);
    }

    debug!("read {} bytes from {}", buf.len(), path.display());
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("huffseed-io-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn reads_whole_short_file() {
        let path = temp_path("short.txt");
        tokio::fs::write(&path, b"to be or not to be").await.unwrap();
        let text = read_text(&path, 1024).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();
        assert_eq!(text, b"to be or not to be");
    }

    #[tokio::test]
    async fn caps_long_file() {
        let path = temp_path("long.txt");
        tokio::fs::write(&path, vec![b'a'; 2000]).await.unwrap();
        let text = read_text(&path, 1024).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();
        assert_eq!(text.len(), 1024);
    }

    #[tokio::test]
    async fn empty_file_is_empty_text() {
        let path = temp_path("empty.txt");
        tokio::fs::write(&path, b"").await.unwrap();
        let text = read_text(&path, 8).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn missing_file_fails() {
        let err = read_text(temp_path("missing.txt"), 8).await.unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }

    #[tokio::test]
    async fn zero_limit_is_invalid() {
        let err = read_text(temp_path("any.txt"), 0).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::InvalidArgument(_))
        ));
    }
}
