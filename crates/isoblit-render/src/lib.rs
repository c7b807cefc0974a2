pub mod blit;
pub mod display;
pub mod glyphs;
pub mod irq;
pub mod renderer;

pub use display::{Display, RecordingDisplay};
pub use irq::{InterruptPolicy, NoInterrupts};
pub use renderer::Renderer;
