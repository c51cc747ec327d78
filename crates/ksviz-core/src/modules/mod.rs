pub mod density;
pub mod discovery;
pub mod figure;
pub mod naming;
pub mod sample;
pub mod workflow;

mod traits;

pub use density::{DensityAggregator, DensityCurve, DensityProfile, aggregate_density};
pub use discovery::discover_orbital_files;
pub use naming::parse_orbital_file_name;
pub use sample::{load_orbital, load_radial_sample};
pub use traits::FigureRenderer;
pub use workflow::{PreparedFigure, prepare_figure, render_prepared};
