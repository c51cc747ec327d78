use super::figure::Figure;
use crate::domain::KsvizResult;
use std::path::Path;

/// Draws a prepared figure to `output_path`.
pub trait FigureRenderer {
    fn render(&self, figure: &Figure, output_path: &Path) -> KsvizResult<()>;
}

impl<T> FigureRenderer for &T
where
    T: FigureRenderer + ?Sized,
{
    fn render(&self, figure: &Figure, output_path: &Path) -> KsvizResult<()> {
        (**self).render(figure, output_path)
    }
}
