pub mod aggregate;
pub mod clock_status;
pub mod expected;
