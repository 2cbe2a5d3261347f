//! Event-stream capability consumed by the gateway.

use async_trait::async_trait;
use axum::extract::Request;
use axum::response::Response;

/// Something that can serve subscriber connections and later close them.
///
/// The gateway routes the event-stream path to [`EventStream::serve`] and
/// calls [`EventStream::close`] once when it stops. Payload format and fan-out
/// are the implementation's business.
#[async_trait]
pub trait EventStream: Send + Sync + 'static {
    /// Establish a subscriber connection for `request`.
    async fn serve(&self, request: Request) -> Response;

    /// Terminate every current subscriber connection.
    fn close(&self);
}
