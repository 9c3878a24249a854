use std::path::Path;
use tokio::io::{AsyncBufRead, BufReader};

use crate::core::error::{Result, UrlPulseError};

/// Buffered source of candidate lines.
pub type LineSource = Box<dyn AsyncBufRead + Unpin + Send>;

/// Open the input file, or standard input when no path is given.
///
/// Failing to open the file is fatal for the run.
pub async fn open_input(path: Option<&Path>) -> Result<LineSource> {
    match path {
        Some(path) => {
            let file =
                tokio::fs::File::open(path)
                    .await
                    .map_err(|source| UrlPulseError::InputOpen {
                        path: path.display().to_string(),
                        source,
                    })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
    }
}
