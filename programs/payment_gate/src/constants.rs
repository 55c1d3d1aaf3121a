/// Constants for the payment gate registry
pub const COUNTER_SEED: &[u8] = b"gate_counter";
pub const GATE_SEED: &[u8] = b"gate";
pub const ROUTER_SEED: &[u8] = b"router";
pub const MERCHANT_SEED: &[u8] = b"merchant";
pub const FLOW_SEED: &[u8] = b"flow";

/// Registry limits
pub const MAX_GATES_PER_MERCHANT: usize = 128;
pub const MAX_GATE_NAME_LEN: usize = 64;

/// Per-gate limits
pub const MAX_ACTIVE_USERS_PER_GATE: usize = 32;
