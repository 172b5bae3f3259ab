//! Front-ends
//!
//! Both front-ends render from [`view::CalculatorView`] and send every edit
//! through [`Calculator`](crate::calculator::Calculator).

#[cfg(not(target_arch = "wasm32"))]
pub mod console;
pub mod labels;
pub mod view;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use view::{CalculatorView, SemesterView};
