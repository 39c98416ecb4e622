pub mod timer;

pub use timer::request_timer;
