pub mod add;
pub mod chart;
pub mod input;
pub mod report;
