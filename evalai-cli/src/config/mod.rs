mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_OUTPUT, RawClientSection, RawEvalConfig, RawOutputSection, RawRetrySection, RunConfig,
};
