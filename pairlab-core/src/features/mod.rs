//! Feature engineering: frame container, engineer trait, default implementation.

pub mod engineer;
pub mod frame;

pub use engineer::{
    FeatureEngineer, FeatureError, FeatureKind, FillMethod, RsiMethod, TechnicalFeatureEngineer,
};
pub use frame::FeatureFrame;
