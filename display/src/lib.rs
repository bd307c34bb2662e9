pub use display::{SdlDisplay, SharedEvents};

mod display;
