pub mod label;
pub mod predictions;
pub mod rankings;

pub use label::display_label;
pub use predictions::align_predictions;
pub use rankings::align_rankings;
