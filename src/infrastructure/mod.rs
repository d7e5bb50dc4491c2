//! Infrastructure layer - Concrete pipeline stages and strategies

pub mod assets;
pub mod escape;
pub mod extract;
pub mod limits;
pub mod logging;
pub mod markdown;
pub mod pipeline;
pub mod platforms;
pub mod recovery;

pub use pipeline::Pipeline;
pub use platforms::PlatformFactory;
