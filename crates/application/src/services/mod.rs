//! Services for the APIs under test.
//!
//! Each service maps one endpoint to one method and hands back an
//! [`AssertableResponse`] for the caller to verify. Services never
//! inspect status codes themselves.

mod store;
mod user;

pub use store::StoreService;
pub use user::UserService;

use restcheck_domain::RequestSpec;
use tracing::debug;

use crate::assertable::AssertableResponse;
use crate::error::ApplicationResult;
use crate::ports::HttpClient;

/// Media type both APIs answer with.
const ACCEPT_JSON: &str = "application/json";

/// Executes `request` once, asking for JSON, and wraps the response.
async fn send<C: HttpClient>(
    client: &C,
    request: RequestSpec,
) -> ApplicationResult<AssertableResponse> {
    let request = request.with_header("Accept", ACCEPT_JSON);
    debug!(method = %request.method, url = %request.url, "Sending request");
    let response = client.execute(&request).await?;
    debug!(status = response.status_code(), "Received response");
    Ok(AssertableResponse::new(response))
}
