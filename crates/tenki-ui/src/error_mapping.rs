//! Maps JMA client errors to tenki_core::AppError for consistent user-facing messages.

use tenki_core::{AppError, NetworkError, ParseError, ReqwestErrorExt};
use tenki_jma::JmaError;

/// Both types live in other crates, so this is a function rather than a `From` impl.
pub fn app_error(e: JmaError) -> AppError {
    match e {
        JmaError::Network(e) => AppError::Network(e.into_network_error()),
        JmaError::Status { status, url } => AppError::Network(NetworkError::ServerError {
            status,
            message: url,
        }),
        JmaError::Decode(s) => AppError::Parse(ParseError::MalformedJson(s)),
        JmaError::Parse(s) => AppError::Parse(ParseError::UnexpectedShape(s)),
    }
}
