pub mod measure;

pub use measure::{
    Fit, FnOracle, LayoutOracle, MeasureError, MeasureSurface, Measurement, check_fit,
};
