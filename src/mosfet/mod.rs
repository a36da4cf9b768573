//! MOSFET 선정 계산 모듈 모음.

pub mod margin;
pub mod params;
pub mod selection;

pub use margin::*;
pub use params::*;
pub use selection::*;
