// Client-facing messages; the probe endpoint texts match the upstream
// status they stand for.
pub static MESSAGE_NOT_AUTHORIZED: &str = "Error: Not authorized ";
pub static MESSAGE_NOT_FOUND: &str = "Error: 404 not found";
pub static MESSAGE_UNKNOWN_ERROR: &str = "Unknown error";

pub static MESSAGE_UPSTREAM_UNREACHABLE: &str = "upstream unreachable";
pub static MESSAGE_NO_SNAPSHOT: &str = "no snapshot available";
pub static MESSAGE_INTERNAL_SERVER_ERROR: &str = "internal server error";
