pub mod account_http;
pub mod credential_file;
pub mod favorites_http;
pub mod recipes_http;
pub mod translate;

pub use account_http::HttpAccountService;
pub use credential_file::FileCredentialStore;
pub use favorites_http::HttpFavoritesStore;
pub use recipes_http::HttpRecipeSource;
pub use translate::GtxTranslateAdapter;

use serde::Deserialize;
use smartchef_core::ports::PortError;

/// Body shape of the backend's client-error rejections.
#[derive(Deserialize)]
struct RejectionBody {
    #[serde(default)]
    message: String,
}

/// Maps a non-success backend response onto a port error: 400/401 become
/// `Rejected` (with the body message, so the session guard can classify
/// expiry), 404 becomes `NotFound`, everything else is a server failure.
async fn error_from_response(response: reqwest::Response, what: &str) -> PortError {
    let status = response.status();
    let message = response
        .json::<RejectionBody>()
        .await
        .map(|body| body.message)
        .unwrap_or_default();

    match status.as_u16() {
        400 | 401 => PortError::Rejected {
            status: status.as_u16(),
            message,
        },
        404 => PortError::NotFound(if message.is_empty() {
            what.to_string()
        } else {
            message
        }),
        _ => PortError::Network(format!("{} answered {}", what, status)),
    }
}
