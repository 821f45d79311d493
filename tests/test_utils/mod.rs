pub mod shared_buffer;

pub mod fixtures;

pub mod timeout;

pub use shared_buffer::SharedBuf;
