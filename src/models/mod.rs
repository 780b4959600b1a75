pub mod config;
pub mod definition;

pub use config::{AlphaRule, AppConfig, ToleranceConfig};
pub use definition::{
    Anchor, ColorValue, ColormapDefinition, FunctionSpec, ListedColors, ListedInterpolation,
    SegmentData,
};
