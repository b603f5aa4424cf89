//! End-to-end tests for dynsh request building.
//!
//! Each test goes from the strings an operator types to the JSON body that
//! would be sent to DynamoDB, through the same builders the shell uses.

use std::sync::Once;

use dynsh_core::DynamoRequest;

static INIT: Once = Once::new();

/// Table name used by the tests.
pub const TABLE: &str = "users";

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// The JSON body of `request`.
#[must_use]
pub fn body(request: &DynamoRequest) -> serde_json::Value {
    init_tracing();
    request
        .to_value()
        .unwrap_or_else(|e| panic!("failed to serialize {}: {e}", request.operation()))
}

mod test_error;
mod test_item;
mod test_query;
mod test_scan;
