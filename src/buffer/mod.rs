pub mod batch;
pub mod queue;

pub use batch::Batch;
pub use queue::ErrorBuffer;
