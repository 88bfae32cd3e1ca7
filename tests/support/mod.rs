#![allow(dead_code)]

pub mod aiff;
pub mod reference;
pub mod wav;
