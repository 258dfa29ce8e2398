pub mod journal;
pub mod locale;
pub mod pipeline;
pub mod storage;
pub mod types;
