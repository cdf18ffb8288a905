use serde::{Deserialize, Serialize};

/// Body returned by `GET /`.
pub const LIVENESS_TEXT: &str = "server is running";

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
