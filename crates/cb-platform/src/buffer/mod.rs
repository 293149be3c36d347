mod memory;
mod system;

pub use memory::MemoryBuffer;
pub use system::SystemClipboardBuffer;
