pub mod keyword;
pub mod series;
