use std::sync::Mutex;

use anyhow::{anyhow, Result};

use cb_core::PayloadSet;

use crate::ports::SystemBufferPort;

/// In-process buffer. Holds every tag, including custom and reserved ones.
#[derive(Debug, Default)]
pub struct MemoryBuffer {
    contents: Mutex<PayloadSet>,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SystemBufferPort for MemoryBuffer {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn read(&self) -> Result<PayloadSet> {
        let contents = self
            .contents
            .lock()
            .map_err(|_| anyhow!("memory buffer lock poisoned"))?;
        Ok(contents.clone())
    }

    fn write(&self, payloads: &PayloadSet) -> Result<()> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| anyhow!("memory buffer lock poisoned"))?;
        *contents = payloads.clone();
        Ok(())
    }
}
