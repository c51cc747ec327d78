//! Post-processing of radial Kohn-Sham orbitals: file-name parsing, sample
//! loading, occupancy-weighted charge density and renderer-neutral figures.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
