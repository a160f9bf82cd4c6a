//! # shoebill
//!
//! Parser for Shoebill section markup: a `TEMPLATE` submit description, a CSV
//! `TABLE` of job parameters and optional `EXEC` source, delimited by marker
//! lines such as `%HTCSS TEMPLATE`, either in a plain markup file or inside the
//! comments of a program. The TEMPLATE is turned into a submit description that
//! queues one job per TABLE row.
//!
//! ```text
//! %HTCSS TEMPLATE
//! executable = /bin/echo
//! arguments = $(Message)
//! %HTCSS TABLE
//! JobID, Message
//! 1, Hello
//! ```
//!
//! ## Testing
//!
//! Unit tests use the verified markup under `samples/` through the
//! `shoebill::testing` module.

pub mod shoebill;
