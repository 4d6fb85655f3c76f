pub mod chart;
pub mod dashboard;
pub mod logger;
pub mod table;
