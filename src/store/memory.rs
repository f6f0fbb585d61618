use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::core::principal::Principal;
use crate::store::SessionSlot;
use crate::Result;

// Non durable slot for tests and ephemeral profiles.
#[derive(Default)]
pub struct MemorySlot {
    current: Mutex<Option<Principal>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionSlot for MemorySlot {
    async fn load(&self) -> Result<Option<Principal>> {
        Ok(self.current.lock().await.clone())
    }

    async fn store(&self, principal: &Principal) -> Result<()> {
        *self.current.lock().await = Some(principal.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.current.lock().await = None;
        Ok(())
    }
}
