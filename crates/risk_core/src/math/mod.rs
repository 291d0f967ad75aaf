//! Mathematical helpers shared by the model and engine layers.
//!
//! - [`distributions`]: standard normal CDF and PDF

pub mod distributions;

pub use distributions::{norm_cdf, norm_pdf};
