//! NES emulator entry point.
//!
//! Loads a cartridge and runs the machine on a worker thread with a
//! display window on the main thread.
//! Usage: vesper path/to/game.nes

use std::env;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use minifb::{Key, Scale, ScaleMode, Window, WindowOptions};
use vesper::joypad::Button;
use vesper::ppu::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};
use vesper::vm::VirtualMachine;

/// NES runs at ~60.0988 Hz (NTSC). Target one frame per 16.67 ms for ~60 fps.
const FRAME_DURATION: Duration = Duration::from_nanos(16_666_667);

const KEY_BINDINGS: [(Key, Button); 8] = [
    (Key::Z, Button::A),
    (Key::X, Button::B),
    (Key::RightShift, Button::Select),
    (Key::Enter, Button::Start),
    (Key::Up, Button::Up),
    (Key::Down, Button::Down),
    (Key::Left, Button::Left),
    (Key::Right, Button::Right),
];

enum InputEvent {
    Press(Button),
    Release(Button),
}

fn main() {
    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: vesper path/to/game.nes");
            process::exit(2);
        }
    };

    let (frame_tx, frame_rx) = mpsc::channel::<Vec<u32>>();
    let (input_tx, input_rx) = mpsc::channel::<InputEvent>();
    let stop = Arc::new(AtomicBool::new(false));

    let mut vm = VirtualMachine::new(Box::new(move |frame| {
        let _ = frame_tx.send(frame.to_vec());
    }));
    if let Err(err) = vm.load_rom(&path) {
        eprintln!("failed to load {path}: {err}");
        process::exit(1);
    }

    let emu_stop = Arc::clone(&stop);
    let emu_thread = thread::spawn(move || {
        while !emu_stop.load(Ordering::Relaxed) {
            let frame_start = Instant::now();

            while let Ok(event) = input_rx.try_recv() {
                match event {
                    InputEvent::Press(button) => vm.press(button),
                    InputEvent::Release(button) => vm.release(button),
                }
            }

            vm.tick();

            // Pace to ~60 fps; emulation is far faster than a real NES.
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_DURATION {
                thread::sleep(FRAME_DURATION - elapsed);
            }
        }
    });

    let mut window = Window::new(
        "Vesper",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        WindowOptions {
            resize: true,
            scale: Scale::FitScreen,
            scale_mode: ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        },
    )
    .expect("Failed to create window");

    window.set_target_fps(60);

    let mut held = [false; KEY_BINDINGS.len()];
    while window.is_open() && !window.is_key_down(Key::Escape) {
        for (slot, (key, button)) in KEY_BINDINGS.iter().enumerate() {
            let down = window.is_key_down(*key);
            if down != held[slot] {
                held[slot] = down;
                let event = if down {
                    InputEvent::Press(*button)
                } else {
                    InputEvent::Release(*button)
                };
                let _ = input_tx.send(event);
            }
        }

        // Keep only the newest frame if the emulator ran ahead.
        let mut latest = None;
        while let Ok(frame) = frame_rx.try_recv() {
            latest = Some(frame);
        }

        match latest {
            Some(frame) => window
                .update_with_buffer(&frame, SCREEN_WIDTH, SCREEN_HEIGHT)
                .expect("Failed to update window"),
            None => window.update(),
        }
    }

    stop.store(true, Ordering::Relaxed);
    let _ = emu_thread.join();
}
