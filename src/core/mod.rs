pub mod approval;
pub mod bus;
pub mod calculator;
pub mod clock;
pub mod del;
pub mod employee;
pub mod log;
pub mod report;
pub mod schedule;
pub mod source;
