//! gRPC delivery: wire messages in, use cases called, wire messages out.

use log::error;
use tonic::{Response, Status};

use crate::errors::AppError;

pub mod client;
pub mod job;

pub use client::ClientGrpc;
pub use job::JobGrpc;

/// Logs a failed RPC once and converts it to a wire status.
fn respond<T>(operation: &str, result: Result<T, AppError>) -> Result<Response<T>, Status> {
    match result {
        Ok(message) => Ok(Response::new(message)),
        Err(err) => {
            error!("{} failed: {}", operation, err);
            Err(Status::from(err))
        }
    }
}
