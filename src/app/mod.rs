//! Application layer - usecases over the domain ports

mod usecases;

pub use usecases::LightUsecases;
