mod system_buffer;

pub use system_buffer::SystemBufferPort;
