use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::{SharedFrame, Window};
use vm8::Vm;

mod keyboard;
mod keymap;

/// How long the render loop sleeps between frames.
const FRAME_TIME: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(name = "chip8", about = "A Chip-8 virtual machine")]
struct Cli {
    /// Path to the rom image to run.
    rom: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let program = fs::read(&cli.rom)?;
    log::info!("loaded a {} byte rom from {}", program.len(), cli.rom.display());

    let sdl = sdl2::init()?;
    let mut window = Window::new(&sdl, "Chip-8")?;
    let mut events = sdl.event_pump()?;

    let frame = Arc::new(SharedFrame::new());
    let pad = Arc::new(keyboard::EventKeyboard::new());
    let mut vm = Vm::new(program, frame.clone(), pad.clone())?;
    vm.run();

    'render: loop {
        if let Some(pixels) = frame.take_frame() {
            window.render(&pixels)?;
        }

        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'render,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(key) = keymap::keymap(key) {
                        pad.press(key);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(key) = keymap::keymap(key) {
                        pad.release(key);
                    }
                }
                _ => continue,
            }
        }

        // The machine halts itself on a fault; follow it down.
        if !vm.is_running() {
            break 'render;
        }
        std::thread::sleep(FRAME_TIME);
    }

    vm.stop();
    if let Some(fault) = vm.fault() {
        eprintln!("halted: {}", fault);
        process::exit(1);
    }
    Ok(())
}
