pub mod pdf;
pub mod text;

pub use pdf::PdfWriter;
pub use text::TextWriter;
