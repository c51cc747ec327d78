//! Physical and presentation constants shared by the density and figure
//! modules.

pub const PI: f64 = std::f64::consts::PI;
pub const FOUR_PI: f64 = 4.0 * PI;

/// Upper x-window cap for wavefunction figures, in Bohr.
pub const WAVEFUNCTION_WINDOW_CAP_BOHR: f64 = 15.0;
/// Upper x-window cap for charge-density figures, in Bohr.
pub const DENSITY_WINDOW_CAP_BOHR: f64 = 10.0;

pub const DEFAULT_DATA_EXTENSION: &str = "dat";

pub const RADIAL_AXIS_LABEL: &str = "r (Bohr)";
pub const WAVEFUNCTION_AXIS_LABEL: &str = "u_nl(r)";
pub const DENSITY_AXIS_LABEL: &str = "n(r) (Bohr^-3)";
