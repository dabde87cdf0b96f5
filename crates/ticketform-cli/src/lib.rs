//! Library side of the `ticketform` command-line driver.

pub mod logging;
pub mod replay;
