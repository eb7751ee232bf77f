// Dashboard handlers
pub mod d400_sales_dashboard;

// Shared
pub mod indicators;
