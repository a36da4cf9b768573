//! 핵심 계산 로직을 라이브러리로 분리하여 CLI와 GUI 양쪽에서 공유한다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod mosfet;
pub mod report;
pub mod ui_cli;
