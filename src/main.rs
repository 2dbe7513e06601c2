#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_config;
mod app_constants;
mod app_runtime;
mod app_state_store;
mod app_types;
mod bridge_commands;
mod crash_report;
mod dev_tools;
mod file_open;
mod ipc_events;
mod logging;
mod menu_actions;
mod menu_handler;
mod menu_setup;
mod persisted_state;
mod quit_coordinator;
mod quit_flow;
mod window_actions;
mod window_manager;

pub(crate) use app_constants::*;
pub(crate) use app_state_store::AppStateStore;
pub(crate) use app_types::{
    DesktopBridgeResult, LaunchState, LoadArchiveFilePayload, QuitState, QuitStatus,
};
pub(crate) use logging::{append_desktop_log, append_shutdown_log, append_startup_log};
pub(crate) use window_manager::WindowRegistry;

fn main() {
    app_runtime::run();
}
