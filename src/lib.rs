#![deny(missing_docs)]
#![deny(missing_copy_implementations)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unused_import_braces)]
#![deny(unused_qualifications)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

//! This crate turns one-shot printer commands, the kind a voice assistant
//! or automation flow produces, into OctoPrint requests with uniform
//! outcomes. Operations live in [intents]; the printers they run against
//! come from a [Config] file or a tunnel URL.

mod config;
pub mod intents;

pub use config::{Config, Printer};
