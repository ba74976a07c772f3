// Operations endpoint
//
// Lifecycle changes and some network mutations return `type: async` with an
// operation URL. We block on `/wait` until the operation reaches a terminal
// state; operations cannot be cancelled from the console.

use tracing::{debug, trace};

use crate::client::LxdClient;
use crate::error::Error;
use crate::models::Operation;

/// Seconds the server holds each `/wait` request open.
const WAIT_SLICE_SECS: &str = "30";

impl LxdClient {
    /// Wait for an operation to finish and return its final state.
    ///
    /// `GET /1.0/operations/{id}/wait?timeout=30`, repeated while the
    /// operation is still pending or running.
    pub async fn wait_operation(&self, operation: &str) -> Result<Operation, Error> {
        loop {
            let mut url = self.operation_url(operation, "/wait")?;
            url.query_pairs_mut().append_pair("timeout", WAIT_SLICE_SECS);
            debug!(operation, "waiting for operation");

            let op: Operation = self.get(url).await?;
            if op.is_finished() {
                trace!(id = %op.id, status = %op.status, "operation finished");
                return Ok(op);
            }
            trace!(id = %op.id, status = %op.status, "operation still in flight");
        }
    }
}
