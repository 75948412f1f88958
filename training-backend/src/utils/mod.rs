pub mod error_helper;
