// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An emulator of the Ricoh 2A03, the 6502 variant that drives the NES. The
//! library exposes the CPU core along with the iNES loader and the Nintendulator
//! trace tooling used to verify it.

extern crate byteorder;
extern crate chrono;
#[macro_use]
extern crate enum_primitive;
extern crate rustyline;

pub mod debugger;
pub mod io;
pub mod nes;
pub mod utils;
