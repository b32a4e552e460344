/// Render layer: file layout decisions and PNG drawing.

pub mod layout;
pub mod plot;
