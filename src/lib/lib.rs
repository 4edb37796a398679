pub mod beta;
pub mod error;
pub mod histogram;
pub mod observation;
pub mod sampler;
pub mod updater;
