#[macro_use]
extern crate log;

mod codes;
pub mod config;
mod literal;
mod pixels;
mod source;

pub use codes::{compress, encode, RunCodes, MAX_COUNT};
pub use literal::c_string;
pub use pixels::{classify, is_black, runs, Run, Runs};
pub use source::{make_c_image, render, Header};
