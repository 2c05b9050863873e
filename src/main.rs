#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

mod app;
mod entrypoints;
mod task;

fn main() {
    entrypoints::main::main();
}
