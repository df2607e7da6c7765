pub mod agent;
pub mod authorization;
pub mod guard;
pub mod merkle;
pub mod nullifier;
pub mod pool;
pub mod role;
pub mod settlement;
pub mod trust;

pub use agent::*;
pub use authorization::*;
pub use guard::*;
pub use merkle::*;
pub use nullifier::*;
pub use pool::*;
pub use role::*;
pub use settlement::*;
pub use trust::*;
