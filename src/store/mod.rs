mod slot;
pub use slot::FileSlot;

mod memory;
pub use memory::MemorySlot;

use async_trait::async_trait;

use crate::core::principal::Principal;
use crate::Result;

// Durable single-slot persistence for the current principal. One slot per
// profile directory, so there is exactly zero or one current session.
//
// `load` treats a corrupt slot as an absent session rather than an error;
// the resolver on top of it must never fail.
#[async_trait]
pub trait SessionSlot: Send + Sync {
    async fn load(&self) -> Result<Option<Principal>>;
    async fn store(&self, principal: &Principal) -> Result<()>;
    // Idempotent. Clearing an empty slot succeeds.
    async fn clear(&self) -> Result<()>;
}
