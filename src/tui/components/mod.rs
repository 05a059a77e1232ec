pub mod log_indicator;
