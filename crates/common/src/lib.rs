//! Shared building blocks for the mess ledger crates: logging setup and
//! small wire types that more than one crate serialises.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn liveness_text_is_stable() {
        assert_eq!(types::LIVENESS_TEXT, "server is running");
    }
}
