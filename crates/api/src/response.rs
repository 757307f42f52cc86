//! Response envelopes.

use axum::Json;
use serde::Serialize;

/// `{ "data": T }`, used by read endpoints whose payload the web client
/// unwraps before rendering.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Wrap `data` in the envelope.
pub fn data<T: Serialize>(data: T) -> Json<DataResponse<T>> {
    Json(DataResponse { data })
}
