//! gRPC wire messages and tonic glue for the client and job services.
//!
//! Messages are plain `prost` derives and the server/client halves are
//! written out by hand, so no protoc step is needed at build time.

use chrono::{DateTime, SecondsFormat, Utc};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::codegen::GrpcMethod;
use tonic::transport::Channel;

use crate::errors::AppError;
use crate::utils::validation::parse_rfc3339;

/// Expands to the routing arm of one unary method inside a server's `call`.
macro_rules! unary_route {
    ($service:ident, $inner:expr, $req:expr, $method:ident, $request:ty, $response:ty) => {{
        struct Route<T: $service>(Arc<T>);

        impl<T: $service> tonic::server::UnaryService<$request> for Route<T> {
            type Response = $response;
            type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;

            fn call(&mut self, request: tonic::Request<$request>) -> Self::Future {
                let inner = Arc::clone(&self.0);
                Box::pin(async move { inner.$method(request).await })
            }
        }

        let route = Route($inner);
        let req = $req;
        Box::pin(async move {
            let mut grpc = tonic::server::Grpc::new(tonic::codec::ProstCodec::default());
            Ok(grpc.unary(route, req).await)
        })
    }};
}

pub mod client_service;
pub mod job_service;

/// Response for paths no method is registered under (`grpc-status: 12`).
fn unimplemented() -> tonic::codegen::http::Response<tonic::body::BoxBody> {
    use tonic::codegen::http::header::{HeaderName, HeaderValue, CONTENT_TYPE};

    let mut response = tonic::codegen::http::Response::new(tonic::body::empty_body());
    let headers = response.headers_mut();
    headers.insert(HeaderName::from_static("grpc-status"), HeaderValue::from_static("12"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/grpc"));
    response
}

/// Sends one unary call over `grpc`.
async fn unary<M1, M2>(
    grpc: &mut tonic::client::Grpc<Channel>,
    request: tonic::Request<M1>,
    service: &'static str,
    method: &'static str,
    path: &'static str,
) -> Result<tonic::Response<M2>, tonic::Status>
where
    M1: prost::Message + Send + Sync + 'static,
    M2: prost::Message + Default + Send + Sync + 'static,
{
    grpc.ready()
        .await
        .map_err(|err| tonic::Status::unknown(format!("Service was not ready: {}", err)))?;

    let mut request = request;
    request.extensions_mut().insert(GrpcMethod::new(service, method));
    let codec = tonic::codec::ProstCodec::default();
    grpc.unary(request, PathAndQuery::from_static(path), codec).await
}

pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Absent timestamps travel as empty strings.
pub fn format_optional_time(time: Option<DateTime<Utc>>) -> String {
    time.map(format_time).unwrap_or_default()
}

pub fn parse_optional_time(value: &str) -> Result<Option<DateTime<Utc>>, AppError> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_rfc3339(value).map(Some)
}
