pub mod langflow;

pub use langflow::Langflow;
