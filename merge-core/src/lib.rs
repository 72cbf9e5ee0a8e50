#![deny(rust_2018_idioms)]

#[macro_use]
extern crate anyhow;

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

pub mod checkout;
pub mod commit_graph;
pub mod error;
pub mod index;
pub mod lockfile;
pub mod merge;
pub mod mode;
pub mod obj;
pub mod octopus;
pub mod odb;
pub mod oid;
pub mod path;
pub mod repo;
pub mod resolve;
pub mod serialize;
pub mod unpack;
pub mod xdiff;

mod io;

#[cfg(test)]
mod test_utils;
