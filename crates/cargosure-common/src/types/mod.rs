//! Input and output records of the insurance decision engine

pub mod decision;
pub mod risk_summary;
