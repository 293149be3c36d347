use anyhow::Result;

use cb_core::PayloadSet;

/// The process-wide clipboard buffer that every context copies into and pastes from.
///
/// Writes replace the whole buffer; writing an empty set clears it.
pub trait SystemBufferPort: Send + Sync {
    fn backend(&self) -> &'static str;

    fn read(&self) -> Result<PayloadSet>;

    fn write(&self, payloads: &PayloadSet) -> Result<()>;
}
