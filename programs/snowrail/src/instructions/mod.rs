pub mod bridge_to_pool;
pub mod can_pay;
pub mod deposit;
pub mod execute_signed_payment;
pub mod fund_escrow;
pub mod initialize;
pub mod initialize_pool;
pub mod manage_role;
pub mod pay;
pub mod reclaim_escrow;
pub mod record_trust_attestation;
pub mod register_agent;
pub mod set_agent_limits;
pub mod set_denomination_active;
pub mod set_fee_sink;
pub mod set_pause;
pub mod set_protocol_fee;
pub mod settle;
pub mod withdraw;

pub use bridge_to_pool::*;
pub use can_pay::*;
pub use deposit::*;
pub use execute_signed_payment::*;
pub use fund_escrow::*;
pub use initialize::*;
pub use initialize_pool::*;
pub use manage_role::*;
pub use pay::*;
pub use reclaim_escrow::*;
pub use record_trust_attestation::*;
pub use register_agent::*;
pub use set_agent_limits::*;
pub use set_denomination_active::*;
pub use set_fee_sink::*;
pub use set_pause::*;
pub use set_protocol_fee::*;
pub use withdraw::*;
