pub mod logger;
pub mod pixel_pipeline;
