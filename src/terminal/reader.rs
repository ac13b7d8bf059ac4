//! Stream Readers
//!
//! Drains one child stream into a console buffer, line by line. Each
//! stream gets its own task so stdout and stderr are consumed in parallel
//! and the child can never stall on a full OS pipe buffer.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;

use super::buffer::{Console, StreamKind};

/// Spawn a task that reads `source` to end-of-stream, appending each
/// decoded line to the console's buffer for `stream`. Appending fans the
/// line out to the buffer's observers synchronously, on this task.
///
/// A read error ends the task quietly: an abruptly closed pipe is the
/// normal end-of-life signal for a child's streams, not a failure the
/// caller can act on.
pub fn spawn_line_reader<R>(
    source: R,
    console: Arc<Console>,
    stream: StreamKind,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(source).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => console.append(stream, line),
                Ok(None) => {
                    trace!("stream reader reached end of {:?}", stream);
                    break;
                }
                Err(e) => {
                    debug!("stream reader stopped on {:?}: {}", stream, e);
                    break;
                }
            }
        }
    })
}
