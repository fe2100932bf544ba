pub mod color_space;
pub mod downsampler;
pub mod pixel;
pub mod region;
pub mod region_analyzer;
pub mod region_labeler;
pub mod skin_classifier;
pub mod skin_mask;
pub mod utils;
